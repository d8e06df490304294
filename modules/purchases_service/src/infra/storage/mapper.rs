//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity::{customer_bought, product_type};
use crate::contract::{
    CustomerBought, CustomerBoughtData, PaymentStatus, ProductType, ProductTypeData, WeightType,
};
use anyhow::anyhow;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

// ===== Product Type Conversions =====

impl From<product_type::Model> for ProductType {
    fn from(entity: product_type::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

impl From<&ProductType> for product_type::ActiveModel {
    fn from(model: &ProductType) -> Self {
        Self {
            id: Set(model.id),
            name: Set(model.name.clone()),
        }
    }
}

impl From<&ProductTypeData> for product_type::ActiveModel {
    fn from(data: &ProductTypeData) -> Self {
        Self {
            id: NotSet,
            name: Set(data.name.clone()),
        }
    }
}

// ===== Customer Bought Conversions =====

impl TryFrom<customer_bought::Model> for CustomerBought {
    type Error = anyhow::Error;

    fn try_from(entity: customer_bought::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            weight_type: parse_weight_type(&entity.weight_type)?,
            unit_price: entity.unit_price,
            total_price: entity.total_price,
            delivery_date: entity.delivery_date,
            remarks: entity.remarks,
            status: parse_payment_status(&entity.status)?,
            total_weight: entity.total_weight,
            product_type_id: entity.product_type_id,
            customer_id: entity.customer_id,
        })
    }
}

impl From<&CustomerBought> for customer_bought::ActiveModel {
    fn from(model: &CustomerBought) -> Self {
        Self {
            id: Set(model.id),
            weight_type: Set(format_weight_type(model.weight_type).to_string()),
            unit_price: Set(model.unit_price),
            total_price: Set(model.total_price),
            delivery_date: Set(to_utc(model.delivery_date)),
            remarks: Set(model.remarks.clone()),
            status: Set(format_payment_status(model.status).to_string()),
            total_weight: Set(model.total_weight),
            product_type_id: Set(model.product_type_id),
            customer_id: Set(model.customer_id),
        }
    }
}

impl From<&CustomerBoughtData> for customer_bought::ActiveModel {
    fn from(data: &CustomerBoughtData) -> Self {
        Self {
            id: NotSet,
            weight_type: Set(format_weight_type(data.weight_type).to_string()),
            unit_price: Set(data.unit_price),
            total_price: Set(data.total_price),
            delivery_date: Set(to_utc(data.delivery_date)),
            remarks: Set(data.remarks.clone()),
            status: Set(format_payment_status(data.status).to_string()),
            total_weight: Set(data.total_weight),
            product_type_id: Set(data.product_type_id),
            customer_id: Set(data.customer_id),
        }
    }
}

/// Timestamps are stored in UTC so text-backed columns (SQLite) sort in
/// time order
fn to_utc(instant: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    instant.with_timezone(&Utc).fixed_offset()
}

// ===== Enum columns =====

fn parse_weight_type(s: &str) -> anyhow::Result<WeightType> {
    match s {
        "LITTRE" => Ok(WeightType::Littre),
        "KG" => Ok(WeightType::Kg),
        "GRAM" => Ok(WeightType::Gram),
        other => Err(anyhow!("unknown weight_type in customer_bought row: {other}")),
    }
}

fn format_weight_type(weight_type: WeightType) -> &'static str {
    match weight_type {
        WeightType::Littre => "LITTRE",
        WeightType::Kg => "KG",
        WeightType::Gram => "GRAM",
    }
}

fn parse_payment_status(s: &str) -> anyhow::Result<PaymentStatus> {
    match s {
        "DUE" => Ok(PaymentStatus::Due),
        "PAID" => Ok(PaymentStatus::Paid),
        other => Err(anyhow!("unknown status in customer_bought row: {other}")),
    }
}

fn format_payment_status(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Due => "DUE",
        PaymentStatus::Paid => "PAID",
    }
}
