//! Product Quote Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry_app::domain::products::data::QuoteRequest;

use crate::{
    extensions::*,
    products::{errors::into_api_error, models::QuoteResponse},
    responses::{ApiError, Envelope},
    state::State,
};

/// Quote Request Body
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteRequestBody {
    /// Material name as listed on the product
    pub material: Option<String>,

    /// Customer supplies the cloth
    #[serde(default)]
    pub cloth_provided: bool,
}

impl From<QuoteRequestBody> for QuoteRequest {
    fn from(body: QuoteRequestBody) -> Self {
        Self {
            material: body.material,
            cloth_provided: body.cloth_provided,
        }
    }
}

/// Product Quote Handler
///
/// Prices one unit of a product for the chosen options.
#[endpoint(tags("products"), summary = "Quote Product Price")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<QuoteRequestBody>,
    depot: &mut Depot,
) -> Result<Envelope<QuoteResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let price = state
        .app
        .products
        .quote_product(product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(price.into()))
}
