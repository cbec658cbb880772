//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use vestry::pricing::{PriceBreakdown, round_money};

use crate::{
    domain::{
        available_dates::data::SlotRequest, products::records::ProductUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartRecord {
    /// Sum of the line totals.
    pub fn total(&self) -> Decimal {
        round_money(self.items.iter().map(|item| item.price.total).sum())
    }
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub material: Option<String>,
    pub cloth_provided: bool,
    pub quantity: u32,
    pub allocations: Vec<SlotRequest>,
    pub price: PriceBreakdown,
    pub measurements: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}
