//! Service layer: business rules on top of `models`.
//! - Handlers talk to services, services talk to repository traits.
//! - Every repository has a SeaORM implementation and an in-memory one.
//! - Picture bytes go through an `ObjectStore`.

pub mod errors;
pub mod auth;
pub mod events;
pub mod pictures;
pub mod storage;
pub mod repo;
pub mod seed;
#[cfg(test)]
pub mod test_support;
