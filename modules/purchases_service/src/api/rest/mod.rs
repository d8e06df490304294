//! REST API layer

pub mod dto;
pub mod error;
pub mod handlers;
pub mod headers;
pub mod mapper;
pub mod paging;
pub mod routes;
