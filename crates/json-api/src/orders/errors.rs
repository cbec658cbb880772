//! Order Errors

use tracing::error;
use vestry_app::domain::orders::OrdersServiceError;

use crate::{available_dates::errors::allocation_error, responses::ApiError};

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::AlreadyExists => ApiError::conflict("Order already exists"),
        OrdersServiceError::NotFound => ApiError::not_found("Order not found"),
        OrdersServiceError::ProductNotFound => ApiError::not_found("Product not found"),
        OrdersServiceError::UserNotFound => ApiError::not_found("User not found"),
        OrdersServiceError::EmptyCart => ApiError::bad_request("Cart is empty"),
        OrdersServiceError::NoOrders => ApiError::bad_request("At least one order is required"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => ApiError::bad_request("Invalid order payload"),
        OrdersServiceError::InvalidPrice(source) => ApiError::bad_request(source.to_string()),
        OrdersServiceError::Allocation(source) => allocation_error(source),
        OrdersServiceError::Sql(source) => {
            error!("orders storage error: {source}");

            ApiError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use vestry_app::domain::available_dates::AllocationError;

    use super::*;

    #[test]
    fn booking_problems_use_the_slot_mapping() {
        let error = into_api_error(AllocationError::NoAllocations.into());

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn empty_cart_is_a_bad_request() {
        assert_eq!(
            into_api_error(OrdersServiceError::EmptyCart).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
