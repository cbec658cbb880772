//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;
use vestry_app::domain::products::data::ProductDetails;

use crate::{
    extensions::*,
    products::{
        errors::into_api_error,
        models::{ProductRequest, ProductResponse},
    },
    responses::{ApiError, Envelope},
    state::State,
};

/// Update Product Handler
///
/// Replaces every editable field of the product.
#[endpoint(
    tags("admin"),
    summary = "Update Product",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Envelope<ProductResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    let span = tracing::Span::current();
    span.record("product_uuid", tracing::field::display(product));

    let details = ProductDetails::try_from(json.into_inner())?;

    let record = state
        .app
        .products
        .update_product(product.into(), details)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(record.into()))
}
