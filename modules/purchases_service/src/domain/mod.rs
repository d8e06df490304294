//! Domain layer - repository contracts and the CRUD service

pub mod repository;
pub mod resource;
pub mod service;

pub use repository::{CrudRepository, Store, UnitOfWork};
pub use resource::Resource;
pub use service::Service;
