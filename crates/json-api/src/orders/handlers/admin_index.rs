//! Admin Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use vestry::orders::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    responses::{ApiError, Envelope},
    state::State,
};

pub(crate) fn parse_status(value: &str) -> Result<OrderStatus, ApiError> {
    value.trim().parse::<OrderStatus>().or_400("invalid \"status\"")
}

/// Admin Orders Handler
#[endpoint(
    tags("admin"),
    summary = "List Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Envelope<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = status.into_inner().as_deref().map(parse_status).transpose()?;

    let orders = state
        .app
        .orders
        .list_orders(status)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use vestry_app::domain::orders::{MockOrdersService, records::OrderUuid};

    use crate::{
        orders::models::fixtures::make_order,
        test_helpers::{Mocks, admin_service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        admin_service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("admin/orders").get(handler),
        )
    }

    #[tokio::test]
    async fn test_filter_by_status() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|status| *status == Some(OrderStatus::Processing))
            .return_once(|_| Ok(vec![make_order(OrderUuid::new(), OrderStatus::Processing)]));

        let mut res = TestClient::get("http://example.com/admin/orders?status=processing")
            .send(&make_service(orders))
            .await;

        let body: Envelope<Vec<OrderResponse>> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data[0].status, "processing");

        Ok(())
    }

    #[tokio::test]
    async fn test_all_orders_without_filter() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(Option::is_none)
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/admin/orders?status=shipped")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
