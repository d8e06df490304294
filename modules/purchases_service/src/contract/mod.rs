//! Contract layer - public models and errors of the purchases module
//!
//! This layer contains transport-agnostic models only.
//! NO serde derives on models - these are pure domain types.

pub mod error;
pub mod model;

pub use error::PurchasesError;
pub use model::{
    CustomerBought, CustomerBoughtData, CustomerBoughtPatch, Direction, EntityId, Page,
    PageRequest, PaymentStatus, ProductType, ProductTypeData, ProductTypePatch, SortOrder,
    WeightType,
};
