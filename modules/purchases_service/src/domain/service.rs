//! Domain service - uniform CRUD flow for every resource
//!
//! Each public operation runs inside exactly one unit of work. Early
//! returns drop the unit of work, which rolls the transaction back.

use super::repository::{CrudRepository, Store, UnitOfWork};
use super::resource::Resource;
use crate::contract::{EntityId, Page, PageRequest, PurchasesError};
use std::sync::Arc;

/// Domain service for product types and customer purchases
pub struct Service {
    store: Arc<dyn Store>,
}

impl Service {
    /// Create a new service instance
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Persist a new entity. `id` is the identity found in the request body,
    /// which must be absent.
    pub async fn create<E: Resource>(
        &self,
        id: Option<EntityId>,
        data: E::Data,
    ) -> Result<E, PurchasesError> {
        tracing::debug!(entity = E::ENTITY_NAME, "Request to save new entity");
        if id.is_some() {
            return Err(PurchasesError::IdAlreadySet {
                entity: E::ENTITY_NAME,
            });
        }

        let uow = self.begin().await?;
        let created = E::repository(uow.as_ref())
            .insert(&data)
            .await
            .map_err(internal)?;
        uow.commit().await.map_err(internal)?;

        tracing::debug!(entity = E::ENTITY_NAME, id = created.id(), "Entity created");
        Ok(created)
    }

    /// Replace every field of an existing entity
    pub async fn update<E: Resource>(
        &self,
        path_id: EntityId,
        body_id: Option<EntityId>,
        data: E::Data,
    ) -> Result<E, PurchasesError> {
        tracing::debug!(entity = E::ENTITY_NAME, path_id, ?body_id, "Request to update entity");
        let id = check_identity::<E>(path_id, body_id)?;

        let uow = self.begin().await?;
        let repo = E::repository(uow.as_ref());
        ensure_exists(repo, id).await?;
        let saved = repo.save(&E::from_data(id, data)).await.map_err(internal)?;
        uow.commit().await.map_err(internal)?;

        Ok(saved)
    }

    /// Overwrite only the fields present in `patch`.
    ///
    /// The existence check and the fetch are two statements; if the row is
    /// deleted in between, the call fails with `NotFound`.
    pub async fn partial_update<E: Resource>(
        &self,
        path_id: EntityId,
        body_id: Option<EntityId>,
        patch: E::Patch,
    ) -> Result<E, PurchasesError> {
        tracing::debug!(
            entity = E::ENTITY_NAME,
            path_id,
            ?body_id,
            "Request to partially update entity"
        );
        let id = check_identity::<E>(path_id, body_id)?;

        let uow = self.begin().await?;
        let repo = E::repository(uow.as_ref());
        ensure_exists(repo, id).await?;

        let mut existing = repo
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or(PurchasesError::NotFound {
                entity: E::ENTITY_NAME,
                id,
            })?;
        existing.apply_patch(patch);

        let saved = repo.save(&existing).await.map_err(internal)?;
        uow.commit().await.map_err(internal)?;

        Ok(saved)
    }

    /// Get one entity by identity
    pub async fn find_one<E: Resource>(&self, id: EntityId) -> Result<E, PurchasesError> {
        tracing::debug!(entity = E::ENTITY_NAME, id, "Request to get entity");
        let uow = self.begin().await?;
        let found = E::repository(uow.as_ref())
            .find_by_id(id)
            .await
            .map_err(internal)?;
        uow.commit().await.map_err(internal)?;

        found.ok_or(PurchasesError::NotFound {
            entity: E::ENTITY_NAME,
            id,
        })
    }

    /// Get one page of entities
    pub async fn find_all<E: Resource>(
        &self,
        request: &PageRequest,
    ) -> Result<Page<E>, PurchasesError> {
        tracing::debug!(
            entity = E::ENTITY_NAME,
            page = request.page,
            size = request.size,
            "Request to get a page of entities"
        );
        if let Some(order) = request
            .sort
            .iter()
            .find(|order| !E::SORTABLE_FIELDS.contains(&order.property.as_str()))
        {
            return Err(PurchasesError::validation(
                E::ENTITY_NAME,
                format!("No property '{}' found for sorting", order.property),
            ));
        }

        let uow = self.begin().await?;
        let page = E::repository(uow.as_ref())
            .find_all(request)
            .await
            .map_err(internal)?;
        uow.commit().await.map_err(internal)?;

        Ok(page)
    }

    /// Delete an entity; an absent identity is not an error
    pub async fn delete<E: Resource>(&self, id: EntityId) -> Result<(), PurchasesError> {
        tracing::debug!(entity = E::ENTITY_NAME, id, "Request to delete entity");
        let uow = self.begin().await?;
        E::repository(uow.as_ref())
            .delete_by_id(id)
            .await
            .map_err(internal)?;
        uow.commit().await.map_err(internal)?;

        Ok(())
    }

    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, PurchasesError> {
        self.store.begin().await.map_err(internal)
    }
}

/// Body identity must be present and equal to the path identity
fn check_identity<E: Resource>(
    path_id: EntityId,
    body_id: Option<EntityId>,
) -> Result<EntityId, PurchasesError> {
    match body_id {
        None => Err(PurchasesError::IdMissing {
            entity: E::ENTITY_NAME,
        }),
        Some(id) if id != path_id => Err(PurchasesError::IdMismatch {
            entity: E::ENTITY_NAME,
        }),
        Some(id) => Ok(id),
    }
}

async fn ensure_exists<E: Resource>(
    repo: &dyn CrudRepository<E>,
    id: EntityId,
) -> Result<(), PurchasesError> {
    let exists = repo.exists_by_id(id).await.map_err(internal)?;
    if exists {
        Ok(())
    } else {
        Err(PurchasesError::EntityNotFound {
            entity: E::ENTITY_NAME,
            id,
        })
    }
}

fn internal(error: anyhow::Error) -> PurchasesError {
    tracing::error!("Store operation failed: {:?}", error);
    PurchasesError::Internal
}
