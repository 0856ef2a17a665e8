pub mod errors;
pub mod db;
pub mod validation;
pub mod time_format;
pub mod user;
pub mod event;
pub mod event_attendee;
pub mod picture;

#[cfg(test)]
mod tests;
