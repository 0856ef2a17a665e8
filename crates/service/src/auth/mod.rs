//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Sign-up, login and JWT issuing/verification live here; handlers only
//! translate HTTP to these calls.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AuthService;
pub use token::{Claims, TokenConfig, TokenIssuer};
