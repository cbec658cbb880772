//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::errors::into_api_error,
    extensions::*,
    responses::{ApiError, Envelope, MessageResponse},
    state::State,
};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "cart.clear",
    skip(depot),
    fields(
        user_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Envelope<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(principal.user_uuid));

    state
        .app
        .carts
        .clear_cart(principal.user_uuid)
        .await
        .map_err(into_api_error)?;

    Ok(MessageResponse::new("Cart cleared"))
}
