//! Product Errors

use tracing::error;
use vestry_app::domain::products::ProductsServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::AlreadyExists => ApiError::conflict("Product already exists"),
        ProductsServiceError::NotFound => ApiError::not_found("Product not found"),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => ApiError::bad_request("Invalid product payload"),
        ProductsServiceError::InvalidPrice(source) => ApiError::bad_request(source.to_string()),
        ProductsServiceError::Sql(source) => {
            error!("products storage error: {source}");

            ApiError::internal()
        }
    }
}
