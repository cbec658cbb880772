//! Checkout Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    orders::{
        errors::into_api_error,
        models::{CheckoutResponse, CustomerDetailsBody},
    },
    responses::{ApiError, Envelope},
    state::State,
};

/// Checkout Handler
///
/// Turns every cart line into an order under one checkout id, booking all
/// slots in a single transaction, then empties the cart. The returned total
/// is what the payment provider should charge.
#[endpoint(
    tags("cart"),
    summary = "Checkout Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Orders placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or insufficient capacity"),
    ),
)]
#[tracing::instrument(
    name = "cart.checkout",
    skip(json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        orders_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CustomerDetailsBody>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Envelope<CheckoutResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let span = tracing::Span::current();
    span.record("user_uuid", tracing::field::display(principal.user_uuid));

    let checkout = state
        .app
        .orders
        .checkout_cart(principal.user_uuid, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    span.record("orders_count", tracing::field::display(checkout.orders.len()));

    res.status_code(StatusCode::CREATED);

    Ok(Envelope::new(checkout.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vestry::orders::OrderStatus;
    use vestry_app::domain::orders::{
        MockOrdersService, OrdersServiceError, data::CustomerDetails, records::OrderUuid,
    };

    use crate::{
        orders::models::fixtures::{make_checkout, make_order},
        responses::ErrorResponse,
        test_helpers::{Mocks, TEST_USER_UUID, customer_service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        customer_service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("cart/checkout").post(handler),
        )
    }

    #[tokio::test]
    async fn test_checkout_places_one_order_per_item() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout_cart()
            .once()
            .withf(|user, customer| {
                *user == TEST_USER_UUID
                    && *customer
                        == CustomerDetails {
                            phone: Some("0123".to_string()),
                            ..CustomerDetails::default()
                        }
            })
            .return_once(|_, _| {
                Ok(make_checkout(vec![
                    make_order(OrderUuid::new(), OrderStatus::Pending),
                    make_order(OrderUuid::new(), OrderStatus::Pending),
                ]))
            });

        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&json!({ "phone": "0123" }))
            .send(&make_service(orders))
            .await;

        let body: Envelope<CheckoutResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.data.orders.len(), 2, "expected two orders");
        assert_eq!(body.data.total, "1040.00");
        assert_eq!(body.data.total_minor_units, 104_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_checkout_cart()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyCart));

        let mut res = TestClient::post("http://example.com/cart/checkout")
            .json(&json!({}))
            .send(&make_service(orders))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, "Cart is empty");

        Ok(())
    }
}
