//! Order Payloads

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry::pricing::PriceBreakdown;
use vestry_app::domain::orders::{
    data::CustomerDetails,
    records::{Checkout, OrderRecord, ProductSnapshot},
};

use crate::available_dates::models::SlotAllocationResponse;

/// What was ordered, as it was at purchase time.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSnapshotResponse {
    pub product_uuid: Uuid,
    pub name: String,
    pub denomination: String,
    pub material: Option<String>,
    pub cloth_provided: bool,
    pub quantity: u32,
    pub measurements: Option<String>,
    pub notes: Option<String>,
}

impl From<ProductSnapshot> for ProductSnapshotResponse {
    fn from(snapshot: ProductSnapshot) -> Self {
        Self {
            product_uuid: snapshot.product_uuid,
            name: snapshot.name,
            denomination: snapshot.denomination,
            material: snapshot.material,
            cloth_provided: snapshot.cloth_provided,
            quantity: snapshot.quantity,
            measurements: snapshot.measurements,
            notes: snapshot.notes,
        }
    }
}

/// Price Breakdown
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceBreakdownResponse {
    pub unit_price: String,
    pub quantity: u32,
    pub base_total: String,
    pub normal_slots_used: u32,
    pub emergency_slots_used: u32,
    pub emergency_surcharge: String,
    pub total: String,
}

impl From<PriceBreakdown> for PriceBreakdownResponse {
    fn from(price: PriceBreakdown) -> Self {
        Self {
            unit_price: price.unit_price.to_string(),
            quantity: price.quantity,
            base_total: price.base_total.to_string(),
            normal_slots_used: price.normal_slots_used,
            emergency_slots_used: price.emergency_slots_used,
            emergency_surcharge: price.emergency_surcharge.to_string(),
            total: price.total.to_string(),
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub user_uuid: Uuid,

    /// Shared by every order paid together
    pub checkout_uuid: Uuid,

    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub product: ProductSnapshotResponse,
    pub allocations: Vec<SlotAllocationResponse>,
    pub price: PriceBreakdownResponse,

    /// Total in minor currency units
    pub total_minor_units: Option<i64>,

    pub earliest_delivery_date: Option<String>,
    pub status: String,
    pub payment_status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(record: OrderRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            order_number: record.order_number,
            user_uuid: record.user_uuid.into(),
            checkout_uuid: record.checkout_uuid.into(),
            customer_name: record.customer.name,
            customer_email: record.customer.email,
            customer_phone: record.customer.phone,
            product: record.product.into(),
            allocations: record.allocations.into_iter().map(Into::into).collect(),
            total_minor_units: record.price.total_minor_units().ok(),
            price: record.price.into(),
            earliest_delivery_date: record.earliest_delivery_date.map(|date| date.to_string()),
            status: record.status.to_string(),
            payment_status: record.payment_status.to_string(),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Checkout Response
///
/// Every order created by one checkout, charged as a single payment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    pub checkout_uuid: Uuid,
    pub orders: Vec<OrderResponse>,
    pub total: String,
    pub total_minor_units: i64,
}

impl From<Checkout> for CheckoutResponse {
    fn from(checkout: Checkout) -> Self {
        Self {
            checkout_uuid: checkout.checkout_uuid.into(),
            orders: checkout.orders.into_iter().map(Into::into).collect(),
            total: checkout.total.to_string(),
            total_minor_units: checkout.total_minor_units,
        }
    }
}

/// Contact details for an order. Omitted fields come from the profile.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerDetailsBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<CustomerDetailsBody> for CustomerDetails {
    fn from(body: CustomerDetailsBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            phone: body.phone,
        }
    }
}
