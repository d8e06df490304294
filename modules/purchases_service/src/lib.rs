//! Purchases Service Module
//!
//! Records product types and customer purchases for the green firm house
//! application and exposes them as paginated REST resources under `/api`.

// Public exports
pub mod contract;
pub use contract::{
    CustomerBought, Direction, Page, PageRequest, PaymentStatus, ProductType, PurchasesError,
    WeightType,
};

pub mod module;
pub use module::PurchasesServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
