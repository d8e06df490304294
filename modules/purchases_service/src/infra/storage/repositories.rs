//! SeaORM repository implementations
//!
//! Every repository call runs on the transaction owned by
//! [`SeaOrmUnitOfWork`]; dropping it without commit rolls back.

use crate::contract::{
    CustomerBought, CustomerBoughtData, Direction, EntityId, Page, PageRequest, ProductType,
    ProductTypeData, SortOrder,
};
use crate::domain::repository::{CrudRepository, Store, UnitOfWork};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Order,
    PaginatorTrait, QueryOrder, Select, TransactionTrait,
};
use std::sync::Arc;

use super::entity::{customer_bought, product_type};

// ===== Store =====

pub struct SeaOrmStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for SeaOrmStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let txn = self.db.begin().await?;
        Ok(Box::new(SeaOrmUnitOfWork { txn }))
    }
}

// ===== Unit of Work =====

pub struct SeaOrmUnitOfWork {
    txn: DatabaseTransaction,
}

#[async_trait]
impl UnitOfWork for SeaOrmUnitOfWork {
    fn product_types(&self) -> &dyn CrudRepository<ProductType> {
        self
    }

    fn customer_boughts(&self) -> &dyn CrudRepository<CustomerBought> {
        self
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.txn.commit().await?;
        Ok(())
    }
}

// ===== Product Type Repository =====

#[async_trait]
impl CrudRepository<ProductType> for SeaOrmUnitOfWork {
    async fn insert(&self, data: &ProductTypeData) -> Result<ProductType> {
        let active: product_type::ActiveModel = data.into();
        let model = active.insert(&self.txn).await?;
        Ok(model.into())
    }

    async fn save(&self, entity: &ProductType) -> Result<ProductType> {
        let active: product_type::ActiveModel = entity.into();
        let model = active.update(&self.txn).await?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<ProductType>> {
        let result = product_type::Entity::find_by_id(id).one(&self.txn).await?;
        Ok(result.map(|e| e.into()))
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<ProductType>> {
        let query = sorted(
            product_type::Entity::find(),
            &request.sort,
            product_type_column,
            product_type::Column::Id,
        );
        let (models, total) = fetch_page(&self.txn, query, request).await?;

        Ok(Page {
            items: models.into_iter().map(|e| e.into()).collect(),
            page: request.page,
            size: request.size,
            total,
        })
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool> {
        let count = product_type::Entity::find_by_id(id)
            .count(&self.txn)
            .await?;

        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<()> {
        product_type::Entity::delete_by_id(id)
            .exec(&self.txn)
            .await?;

        Ok(())
    }
}

fn product_type_column(property: &str) -> Option<product_type::Column> {
    match property {
        "id" => Some(product_type::Column::Id),
        "name" => Some(product_type::Column::Name),
        _ => None,
    }
}

// ===== Customer Bought Repository =====

#[async_trait]
impl CrudRepository<CustomerBought> for SeaOrmUnitOfWork {
    async fn insert(&self, data: &CustomerBoughtData) -> Result<CustomerBought> {
        let active: customer_bought::ActiveModel = data.into();
        let model = active.insert(&self.txn).await?;
        model.try_into()
    }

    async fn save(&self, entity: &CustomerBought) -> Result<CustomerBought> {
        let active: customer_bought::ActiveModel = entity.into();
        let model = active.update(&self.txn).await?;
        model.try_into()
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<CustomerBought>> {
        let result = customer_bought::Entity::find_by_id(id)
            .one(&self.txn)
            .await?;

        match result {
            Some(entity) => Ok(Some(entity.try_into()?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<CustomerBought>> {
        let query = sorted(
            customer_bought::Entity::find(),
            &request.sort,
            customer_bought_column,
            customer_bought::Column::Id,
        );
        let (models, total) = fetch_page(&self.txn, query, request).await?;

        let items = models
            .into_iter()
            .map(|e| e.try_into())
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            items,
            page: request.page,
            size: request.size,
            total,
        })
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool> {
        let count = customer_bought::Entity::find_by_id(id)
            .count(&self.txn)
            .await?;

        Ok(count > 0)
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<()> {
        customer_bought::Entity::delete_by_id(id)
            .exec(&self.txn)
            .await?;

        Ok(())
    }
}

fn customer_bought_column(property: &str) -> Option<customer_bought::Column> {
    match property {
        "id" => Some(customer_bought::Column::Id),
        "weightType" => Some(customer_bought::Column::WeightType),
        "unitPrice" => Some(customer_bought::Column::UnitPrice),
        "totalPrice" => Some(customer_bought::Column::TotalPrice),
        "deliveryDate" => Some(customer_bought::Column::DeliveryDate),
        "remarks" => Some(customer_bought::Column::Remarks),
        "status" => Some(customer_bought::Column::Status),
        "totalWeight" => Some(customer_bought::Column::TotalWeight),
        _ => None,
    }
}

// ===== Paging helpers =====

/// Apply the requested sort keys, then the identity as tie-breaker so
/// pages are stable.
fn sorted<E: EntityTrait>(
    mut query: Select<E>,
    sort: &[SortOrder],
    column_for: fn(&str) -> Option<E::Column>,
    id_column: E::Column,
) -> Select<E> {
    let mut by_id = false;
    for order in sort {
        if let Some(column) = column_for(&order.property) {
            by_id |= order.property == "id";
            query = query.order_by(column, sea_order(order.direction));
        }
    }
    if !by_id {
        query = query.order_by_asc(id_column);
    }
    query
}

fn sea_order(direction: Direction) -> Order {
    match direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    }
}

async fn fetch_page<E>(
    txn: &DatabaseTransaction,
    query: Select<E>,
    request: &PageRequest,
) -> Result<(Vec<E::Model>, u64)>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
{
    let size = request.size.max(1);
    let paginator = query.paginate(txn, size);
    let total = paginator.num_items().await?;
    // an offset past u64 can hold no rows
    if request.page.checked_mul(size).is_none() {
        return Ok((Vec::new(), total));
    }
    let models = paginator.fetch_page(request.page).await?;
    Ok((models, total))
}
