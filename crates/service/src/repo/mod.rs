//! Repository implementations shared by the auth, event and picture services.

pub mod memory;
pub mod seaorm;

pub use memory::InMemoryRepository;
pub use seaorm::SeaOrmRepository;
