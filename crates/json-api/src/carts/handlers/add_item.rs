//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry_app::domain::carts::{data::NewCartItem, records::CartItemUuid};

use crate::{
    available_dates::models::SlotRequestBody,
    carts::{errors::into_api_error, models::CartItemResponse},
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

const fn one() -> u32 {
    1
}

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,
    pub material: Option<String>,

    #[serde(default)]
    pub cloth_provided: bool,

    #[serde(default = "one")]
    pub quantity: u32,

    /// Slots wanted; checked against capacity at checkout
    #[serde(default)]
    pub allocations: Vec<SlotRequestBody>,

    pub measurements: Option<String>,
    pub notes: Option<String>,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        Self {
            uuid: CartItemUuid::new(),
            product_uuid: request.product_uuid.into(),
            material: request.material,
            cloth_provided: request.cloth_provided,
            quantity: request.quantity,
            allocations: request.allocations.into_iter().map(Into::into).collect(),
            measurements: request.measurements,
            notes: request.notes,
        }
    }
}

/// Add Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
#[tracing::instrument(
    name = "cart.add_item",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        cart_item_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Envelope<CartItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let span = tracing::Span::current();
    span.record("user_uuid", tracing::field::display(principal.user_uuid));

    let item = state
        .app
        .carts
        .add_item(principal.user_uuid, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    span.record("cart_item_uuid", tracing::field::display(item.uuid));

    res.status_code(StatusCode::CREATED);

    Ok(Envelope::new(item.into()))
}
