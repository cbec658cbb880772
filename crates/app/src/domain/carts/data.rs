//! Cart Data

use crate::domain::{
    available_dates::data::SlotRequest, carts::records::CartItemUuid,
    products::records::ProductUuid,
};

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub material: Option<String>,
    pub cloth_provided: bool,
    pub quantity: u32,
    pub allocations: Vec<SlotRequest>,
    pub measurements: Option<String>,
    pub notes: Option<String>,
}
