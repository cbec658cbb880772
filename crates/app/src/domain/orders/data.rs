//! Order Data

use vestry::orders::PaymentOutcome;

use crate::domain::{
    available_dates::data::SlotRequest,
    orders::records::{CustomerSnapshot, OrderUuid},
    products::records::ProductUuid,
    users::records::UserRecord,
};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub material: Option<String>,
    pub cloth_provided: bool,
    pub quantity: u32,
    pub allocations: Vec<SlotRequest>,
    pub measurements: Option<String>,
    pub notes: Option<String>,
    pub customer: CustomerDetails,
}

/// Contact details supplied at checkout. Missing fields fall back to the
/// user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerDetails {
    pub fn resolve(self, user: &UserRecord) -> CustomerSnapshot {
        CustomerSnapshot {
            name: self
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| user.display_name().to_string()),
            email: self
                .email
                .filter(|email| !email.trim().is_empty())
                .unwrap_or_else(|| user.email.clone()),
            phone: self.phone.or_else(|| user.phone.clone()),
        }
    }
}

/// Result of one payment attempt covering several orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReport {
    pub orders: Vec<OrderUuid>,
    pub outcome: PaymentOutcome,
}
