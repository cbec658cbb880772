//! Own Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    responses::{ApiError, Envelope},
    state::State,
};

/// Own Orders Handler
#[endpoint(
    tags("orders"),
    summary = "List Own Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Envelope<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .list_user_orders(principal.user_uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use vestry::orders::OrderStatus;
    use vestry_app::domain::orders::{MockOrdersService, records::OrderUuid};

    use crate::{
        orders::models::fixtures::make_order,
        test_helpers::{Mocks, TEST_USER_UUID, customer_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_lists_callers_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_user_orders()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(vec![make_order(OrderUuid::new(), OrderStatus::Pending)]));

        let service = customer_service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("orders").get(handler),
        );

        let mut res = TestClient::get("http://example.com/orders").send(&service).await;

        let body: Envelope<Vec<OrderResponse>> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.len(), 1, "expected one order");
        assert_eq!(body.data[0].status, "pending");

        Ok(())
    }
}
