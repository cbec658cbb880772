//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use vestry::pricing::{ClothDiscount, Material, ProductPricing};

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub denomination: String,
    pub description: String,
    pub base_price: Decimal,
    pub materials: Vec<Material>,
    pub cloth_provided_discount: ClothDiscount,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    /// Inputs to the price calculator.
    pub fn pricing(&self) -> ProductPricing {
        ProductPricing {
            base_price: self.base_price,
            materials: self.materials.clone(),
            cloth_provided_discount: self.cloth_provided_discount,
        }
    }

    /// Whether customers may see and order this product.
    pub fn is_orderable(&self) -> bool {
        self.is_active && self.deleted_at.is_none()
    }
}
