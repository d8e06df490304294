//! Per-entity bindings used by the generic service

use super::repository::{CrudRepository, UnitOfWork};
use crate::contract::{
    CustomerBought, CustomerBoughtData, CustomerBoughtPatch, EntityId, ProductType,
    ProductTypeData, ProductTypePatch,
};

/// An entity type managed through the uniform CRUD flow
pub trait Resource: Clone + Send + Sync + 'static {
    /// All fields except the identity
    type Data: Send + Sync + 'static;
    /// Optional-field representation for merge-patch
    type Patch: Send + Sync + 'static;

    /// Name used in error payloads and alert headers
    const ENTITY_NAME: &'static str;
    /// JSON field names accepted in `sort` parameters
    const SORTABLE_FIELDS: &'static [&'static str];

    fn id(&self) -> EntityId;

    fn from_data(id: EntityId, data: Self::Data) -> Self;

    /// Overwrite the fields present in `patch`, keep the others
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Repository for this entity inside the given unit of work
    fn repository(uow: &dyn UnitOfWork) -> &dyn CrudRepository<Self>;
}

impl Resource for ProductType {
    type Data = ProductTypeData;
    type Patch = ProductTypePatch;

    const ENTITY_NAME: &'static str = "productType";
    const SORTABLE_FIELDS: &'static [&'static str] = &["id", "name"];

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_data(id: EntityId, data: ProductTypeData) -> Self {
        Self {
            id,
            name: data.name,
        }
    }

    fn apply_patch(&mut self, patch: ProductTypePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }

    fn repository(uow: &dyn UnitOfWork) -> &dyn CrudRepository<Self> {
        uow.product_types()
    }
}

impl Resource for CustomerBought {
    type Data = CustomerBoughtData;
    type Patch = CustomerBoughtPatch;

    const ENTITY_NAME: &'static str = "customerBought";
    const SORTABLE_FIELDS: &'static [&'static str] = &[
        "id",
        "weightType",
        "unitPrice",
        "totalPrice",
        "deliveryDate",
        "remarks",
        "status",
        "totalWeight",
    ];

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_data(id: EntityId, data: CustomerBoughtData) -> Self {
        Self {
            id,
            weight_type: data.weight_type,
            unit_price: data.unit_price,
            total_price: data.total_price,
            delivery_date: data.delivery_date,
            remarks: data.remarks,
            status: data.status,
            total_weight: data.total_weight,
            product_type_id: data.product_type_id,
            customer_id: data.customer_id,
        }
    }

    fn apply_patch(&mut self, patch: CustomerBoughtPatch) {
        if let Some(weight_type) = patch.weight_type {
            self.weight_type = weight_type;
        }
        if let Some(unit_price) = patch.unit_price {
            self.unit_price = unit_price;
        }
        if let Some(total_price) = patch.total_price {
            self.total_price = total_price;
        }
        if let Some(delivery_date) = patch.delivery_date {
            self.delivery_date = delivery_date;
        }
        if let Some(remarks) = patch.remarks {
            self.remarks = Some(remarks);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(total_weight) = patch.total_weight {
            self.total_weight = total_weight;
        }
    }

    fn repository(uow: &dyn UnitOfWork) -> &dyn CrudRepository<Self> {
        uow.customer_boughts()
    }
}
