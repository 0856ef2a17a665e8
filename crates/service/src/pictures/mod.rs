pub mod repository;
pub mod service;
pub mod upload;

pub use service::PictureService;
