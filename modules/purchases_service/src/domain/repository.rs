//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use super::resource::Resource;
use crate::contract::{CustomerBought, EntityId, Page, PageRequest, ProductType};
use anyhow::Result;
use async_trait::async_trait;

/// Generic persistence gateway, identical for every entity type
#[async_trait]
pub trait CrudRepository<E: Resource>: Send + Sync {
    /// Insert a new row and return it with its assigned identity
    async fn insert(&self, data: &E::Data) -> Result<E>;

    /// Overwrite every field of an existing row
    async fn save(&self, entity: &E) -> Result<E>;

    /// Find a row by identity
    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>>;

    /// Fetch one page of rows plus the total row count.
    ///
    /// Sort properties are expected to be validated against
    /// [`Resource::SORTABLE_FIELDS`] by the caller.
    async fn find_all(&self, request: &PageRequest) -> Result<Page<E>>;

    /// Check if a row exists
    async fn exists_by_id(&self, id: EntityId) -> Result<bool>;

    /// Delete a row; deleting an absent identity is not an error
    async fn delete_by_id(&self, id: EntityId) -> Result<()>;
}

/// Repositories bound to one store transaction.
///
/// Dropping a unit of work without calling [`UnitOfWork::commit`] rolls
/// back everything done through it.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn product_types(&self) -> &dyn CrudRepository<ProductType>;

    fn customer_boughts(&self) -> &dyn CrudRepository<CustomerBought>;

    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;
}

/// Entry point to the backing store
#[async_trait]
pub trait Store: Send + Sync {
    /// Begin a new transaction
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>>;
}
