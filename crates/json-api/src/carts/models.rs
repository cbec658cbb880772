//! Cart Payloads

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{
    available_dates::models::SlotRequestBody, orders::models::PriceBreakdownResponse,
};

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub material: Option<String>,
    pub cloth_provided: bool,
    pub quantity: u32,

    /// Requested slots; booked only at checkout
    pub allocations: Vec<SlotRequestBody>,

    pub price: PriceBreakdownResponse,
    pub measurements: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(record: CartItemRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            product_uuid: record.product_uuid.into(),
            product_name: record.product_name,
            material: record.material,
            cloth_provided: record.cloth_provided,
            quantity: record.quantity,
            allocations: record.allocations.into_iter().map(Into::into).collect(),
            price: record.price.into(),
            measurements: record.measurements,
            notes: record.notes,
            created_at: record.created_at.to_string(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,
    pub items: Vec<CartItemResponse>,

    /// Sum of the line totals
    pub total: String,
}

impl From<CartRecord> for CartResponse {
    fn from(record: CartRecord) -> Self {
        let total = record.total().to_string();

        Self {
            uuid: record.uuid.into(),
            items: record.items.into_iter().map(Into::into).collect(),
            total,
        }
    }
}
