//! Mapper implementations for converting between DTOs and contract models
//!
//! Create and full-replace bodies must carry every required field; a
//! missing one is a validation error. Merge-patch bodies map field by field
//! onto the optional patch types.

use super::dto::*;
use crate::contract::{
    CustomerBought, CustomerBoughtData, CustomerBoughtPatch, PaymentStatus, ProductType,
    ProductTypeData, ProductTypePatch, PurchasesError, WeightType,
};
use crate::domain::Resource;

// ===== Product Type conversions =====

impl From<ProductType> for ProductTypeDto {
    fn from(product_type: ProductType) -> Self {
        Self {
            id: product_type.id,
            name: product_type.name,
        }
    }
}

impl TryFrom<ProductTypeRequest> for ProductTypeData {
    type Error = PurchasesError;

    fn try_from(req: ProductTypeRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: required::<ProductType, _>(req.name, "name")?,
        })
    }
}

impl From<ProductTypeRequest> for ProductTypePatch {
    fn from(req: ProductTypeRequest) -> Self {
        Self { name: req.name }
    }
}

// ===== Customer Bought conversions =====

impl From<CustomerBought> for CustomerBoughtDto {
    fn from(purchase: CustomerBought) -> Self {
        Self {
            id: purchase.id,
            weight_type: purchase.weight_type.into(),
            unit_price: purchase.unit_price,
            total_price: purchase.total_price,
            delivery_date: purchase.delivery_date,
            remarks: purchase.remarks,
            status: purchase.status.into(),
            total_weight: purchase.total_weight,
            product_type: EntityRefDto {
                id: purchase.product_type_id,
            },
            customer: EntityRefDto {
                id: purchase.customer_id,
            },
        }
    }
}

impl TryFrom<CustomerBoughtRequest> for CustomerBoughtData {
    type Error = PurchasesError;

    fn try_from(req: CustomerBoughtRequest) -> Result<Self, Self::Error> {
        type E = CustomerBought;

        Ok(Self {
            weight_type: required::<E, _>(req.weight_type, "weightType")?.into(),
            unit_price: required::<E, _>(req.unit_price, "unitPrice")?,
            total_price: required::<E, _>(req.total_price, "totalPrice")?,
            delivery_date: required::<E, _>(req.delivery_date, "deliveryDate")?,
            remarks: req.remarks,
            status: required::<E, _>(req.status, "status")?.into(),
            total_weight: required::<E, _>(req.total_weight, "totalWeight")?,
            product_type_id: required::<E, _>(req.product_type, "productType")?.id,
            customer_id: required::<E, _>(req.customer, "customer")?.id,
        })
    }
}

impl From<CustomerBoughtRequest> for CustomerBoughtPatch {
    fn from(req: CustomerBoughtRequest) -> Self {
        Self {
            weight_type: req.weight_type.map(Into::into),
            unit_price: req.unit_price,
            total_price: req.total_price,
            delivery_date: req.delivery_date,
            remarks: req.remarks,
            status: req.status.map(Into::into),
            total_weight: req.total_weight,
        }
    }
}

// ===== Enum conversions =====

impl From<WeightType> for WeightTypeDto {
    fn from(weight_type: WeightType) -> Self {
        match weight_type {
            WeightType::Littre => Self::Littre,
            WeightType::Kg => Self::Kg,
            WeightType::Gram => Self::Gram,
        }
    }
}

impl From<WeightTypeDto> for WeightType {
    fn from(dto: WeightTypeDto) -> Self {
        match dto {
            WeightTypeDto::Littre => Self::Littre,
            WeightTypeDto::Kg => Self::Kg,
            WeightTypeDto::Gram => Self::Gram,
        }
    }
}

impl From<PaymentStatus> for PaymentStatusDto {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Due => Self::Due,
            PaymentStatus::Paid => Self::Paid,
        }
    }
}

impl From<PaymentStatusDto> for PaymentStatus {
    fn from(dto: PaymentStatusDto) -> Self {
        match dto {
            PaymentStatusDto::Due => Self::Due,
            PaymentStatusDto::Paid => Self::Paid,
        }
    }
}

fn required<R: Resource, T>(value: Option<T>, field: &str) -> Result<T, PurchasesError> {
    value.ok_or_else(|| {
        PurchasesError::validation(R::ENTITY_NAME, format!("{field}: must not be null"))
    })
}
