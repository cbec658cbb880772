//! Order Records

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry::{
    orders::{OrderStatus, PaymentStatus},
    pricing::PriceBreakdown,
};

use crate::{
    domain::{available_dates::records::SlotAllocation, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Id shared by every order paid in one payment attempt.
pub type CheckoutUuid = TypedUuid<Checkout>;

/// Contact details copied onto the order when it is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSnapshot {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// What was ordered, frozen at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub product_uuid: Uuid,
    pub name: String,
    pub denomination: String,
    pub material: Option<String>,
    pub cloth_provided: bool,
    pub quantity: u32,
    pub measurements: Option<String>,
    pub notes: Option<String>,
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: UserUuid,
    pub checkout_uuid: CheckoutUuid,
    pub customer: CustomerSnapshot,
    pub product: ProductSnapshot,
    pub allocations: Vec<SlotAllocation>,
    pub price: PriceBreakdown,
    pub earliest_delivery_date: Option<Date>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Orders created together and charged as one payment.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub checkout_uuid: CheckoutUuid,
    pub orders: Vec<OrderRecord>,
    pub total: Decimal,
    pub total_minor_units: i64,
}
