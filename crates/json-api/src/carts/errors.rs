//! Cart Errors

use tracing::error;
use vestry_app::domain::carts::CartsServiceError;

use crate::{available_dates::errors::allocation_error, responses::ApiError};

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::AlreadyExists => ApiError::conflict("Cart item already exists"),
        CartsServiceError::NotFound => ApiError::not_found("Cart item not found"),
        CartsServiceError::ProductNotFound => ApiError::not_found("Product not found"),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => ApiError::bad_request("Invalid cart item payload"),
        CartsServiceError::InvalidPrice(source) => ApiError::bad_request(source.to_string()),
        CartsServiceError::Allocation(source) => allocation_error(source),
        CartsServiceError::Sql(source) => {
            error!("carts storage error: {source}");

            ApiError::internal()
        }
    }
}
