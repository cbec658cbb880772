//! Products Data

use rust_decimal::Decimal;
use vestry::pricing::{ClothDiscount, Material, PricingError, ProductPricing};

use crate::domain::products::records::ProductUuid;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetails,
}

/// Editable product fields, replaced as a whole on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub name: String,
    pub denomination: String,
    pub description: String,
    pub base_price: Decimal,
    pub materials: Vec<Material>,
    pub cloth_provided_discount: ClothDiscount,
    pub is_active: bool,
}

impl ProductDetails {
    /// Check the amounts are usable by the price calculator.
    ///
    /// # Errors
    ///
    /// Returns the first pricing problem found.
    pub fn validate(&self) -> Result<(), PricingError> {
        ProductPricing {
            base_price: self.base_price,
            materials: self.materials.clone(),
            cloth_provided_discount: self.cloth_provided_discount,
        }
        .validate()
    }
}

/// Options a customer picks when pricing a product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuoteRequest {
    pub material: Option<String>,
    pub cloth_provided: bool,
}
