//! REST DTOs with serde derives for HTTP API
//!
//! Request DTOs keep every field optional: presence rules differ between
//! create/replace (all required fields present) and merge-patch (anything
//! may be missing), and are checked in mapper.rs.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ===== Product Type DTOs =====

/// Product type response DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeDto {
    /// Server-assigned identity
    pub id: i64,

    /// Descriptive label
    pub name: String,
}

/// Product type request body for POST, PUT and PATCH
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTypeRequest {
    /// Must be absent on create, equal to the path id otherwise
    pub id: Option<i64>,

    pub name: Option<String>,
}

// ===== Customer Bought DTOs =====

/// Weight unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeightTypeDto {
    Littre,
    Kg,
    Gram,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatusDto {
    Due,
    Paid,
}

/// Reference to another entity by identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRefDto {
    pub id: i64,
}

/// Customer purchase response DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBoughtDto {
    pub id: i64,

    pub weight_type: WeightTypeDto,

    pub unit_price: f64,

    pub total_price: f64,

    pub delivery_date: DateTime<FixedOffset>,

    pub remarks: Option<String>,

    pub status: PaymentStatusDto,

    pub total_weight: i32,

    pub product_type: EntityRefDto,

    pub customer: EntityRefDto,
}

/// Customer purchase request body for POST, PUT and PATCH
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBoughtRequest {
    /// Must be absent on create, equal to the path id otherwise
    pub id: Option<i64>,

    pub weight_type: Option<WeightTypeDto>,

    pub unit_price: Option<f64>,

    pub total_price: Option<f64>,

    pub delivery_date: Option<DateTime<FixedOffset>>,

    pub remarks: Option<String>,

    pub status: Option<PaymentStatusDto>,

    pub total_weight: Option<i32>,

    /// Ignored by PATCH
    pub product_type: Option<EntityRefDto>,

    /// Ignored by PATCH
    pub customer: Option<EntityRefDto>,
}

// Note: Conversion implementations live in mapper.rs
