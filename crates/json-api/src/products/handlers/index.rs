//! Product Catalog Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_api_error, models::ProductResponse},
    responses::{ApiError, Envelope},
    state::State,
};

/// Product Catalog Handler
///
/// Active products, optionally limited to one denomination.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    denomination: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Envelope<Vec<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let denomination = denomination
        .into_inner()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let products = state
        .app
        .products
        .list_products(denomination)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(products.into_iter().map(Into::into).collect()))
}
