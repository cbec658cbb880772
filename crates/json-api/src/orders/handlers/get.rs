//! Get Own Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    responses::{ApiError, Envelope},
    state::State,
};

/// Get Own Order Handler
///
/// Orders belonging to other users are reported as not found.
#[endpoint(
    tags("orders"),
    summary = "Get Own Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Envelope<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .get_user_order(principal.user_uuid, order.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use vestry::orders::OrderStatus;
    use vestry_app::domain::orders::{MockOrdersService, OrdersServiceError, records::OrderUuid};

    use crate::{
        orders::models::fixtures::make_order,
        test_helpers::{Mocks, TEST_USER_UUID, customer_service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        customer_service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_own_order() -> TestResult {
        let uuid = OrderUuid::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_user_order()
            .once()
            .withf(move |user, order| *user == TEST_USER_UUID && *order == uuid)
            .return_once(move |_, _| Ok(make_order(uuid, OrderStatus::Confirmed)));

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        let body: Envelope<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.uuid, uuid.into_uuid());
        assert_eq!(body.data.status, "confirmed");

        Ok(())
    }

    #[tokio::test]
    async fn test_someone_elses_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_user_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
