//! Create Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry_app::domain::orders::{data::NewOrder, records::OrderUuid};

use crate::{
    available_dates::models::SlotRequestBody,
    extensions::*,
    orders::{
        errors::into_api_error,
        models::{CheckoutResponse, CustomerDetailsBody},
    },
    responses::{ApiError, Envelope},
    state::State,
};

const fn one() -> u32 {
    1
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub product_uuid: Uuid,
    pub material: Option<String>,

    #[serde(default)]
    pub cloth_provided: bool,

    #[serde(default = "one")]
    pub quantity: u32,

    /// Slots to book; at least one
    pub allocations: Vec<SlotRequestBody>,

    pub measurements: Option<String>,
    pub notes: Option<String>,

    #[serde(default)]
    pub customer: CustomerDetailsBody,
}

impl From<CreateOrderRequest> for NewOrder {
    fn from(request: CreateOrderRequest) -> Self {
        Self {
            uuid: OrderUuid::new(),
            product_uuid: request.product_uuid.into(),
            material: request.material,
            cloth_provided: request.cloth_provided,
            quantity: request.quantity,
            allocations: request.allocations.into_iter().map(Into::into).collect(),
            measurements: request.measurements,
            notes: request.notes,
            customer: request.customer.into(),
        }
    }
}

/// Create Order Handler
///
/// Books the requested slots and places the order in one step. Nothing is
/// booked when any slot request cannot be met.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Insufficient capacity or invalid request"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown product or date"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Envelope<CheckoutResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order: NewOrder = json.into_inner().into();
    let uuid = order.uuid;

    let span = tracing::Span::current();
    span.record("user_uuid", tracing::field::display(principal.user_uuid));
    span.record("order_uuid", tracing::field::display(uuid));

    let checkout = state
        .app
        .orders
        .create_order(principal.user_uuid, order)
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/orders/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Envelope::new(checkout.into()))
}
