//! Contract models for purchases service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, FixedOffset};

/// Identity assigned by the store
pub type EntityId = i64;

// ===== Product Type =====

/// Kind of product a customer can buy (rice, milk, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductType {
    /// Server-assigned identity
    pub id: EntityId,
    /// Descriptive label
    pub name: String,
}

/// Product type fields without identity, used for create and full replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTypeData {
    pub name: String,
}

/// Partial update for a product type; `None` leaves the stored value untouched
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductTypePatch {
    pub name: Option<String>,
}

// ===== Customer Bought =====

/// Unit in which a purchase is weighed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightType {
    Littre,
    Kg,
    Gram,
}

/// Payment status of a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Due,
    Paid,
}

/// A purchase made by a customer
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerBought {
    /// Server-assigned identity
    pub id: EntityId,
    pub weight_type: WeightType,
    pub unit_price: f64,
    pub total_price: f64,
    pub delivery_date: DateTime<FixedOffset>,
    pub remarks: Option<String>,
    pub status: PaymentStatus,
    pub total_weight: i32,
    /// Foreign key to `product_type`
    pub product_type_id: EntityId,
    /// Foreign key to `customer` (owned elsewhere)
    pub customer_id: EntityId,
}

/// Purchase fields without identity, used for create and full replace
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerBoughtData {
    pub weight_type: WeightType,
    pub unit_price: f64,
    pub total_price: f64,
    pub delivery_date: DateTime<FixedOffset>,
    pub remarks: Option<String>,
    pub status: PaymentStatus,
    pub total_weight: i32,
    pub product_type_id: EntityId,
    pub customer_id: EntityId,
}

/// Partial update for a purchase.
///
/// Only scalar fields are patchable; the product type and customer
/// references can only change through a full replace.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomerBoughtPatch {
    pub weight_type: Option<WeightType>,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
    pub delivery_date: Option<DateTime<FixedOffset>>,
    pub remarks: Option<String>,
    pub status: Option<PaymentStatus>,
    pub total_weight: Option<i32>,
}

// ===== Paging =====

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One sort key; `property` is the JSON field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

/// Page request (zero-based page number)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, property: impl Into<String>, direction: Direction) -> Self {
        self.sort.push(SortOrder {
            property: property.into(),
            direction,
        });
        self
    }
}

/// One page of results plus the total row count
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
}

impl<T> Page<T> {
    /// Number of pages needed to hold `total` rows
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total.div_ceil(self.size)
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
        }
    }
}
