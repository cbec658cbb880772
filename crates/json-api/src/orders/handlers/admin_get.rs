//! Admin Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    responses::{ApiError, Envelope},
    state::State,
};

/// Admin Get Order Handler
#[endpoint(
    tags("admin"),
    summary = "Get Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Envelope<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .get_order(order.into_inner().into())
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
        test_helpers::{Mocks, admin_service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        admin_service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            Router::with_path("admin/orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_any_order() -> TestResult {
        let uuid = OrderUuid::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |order| *order == uuid)
            .return_once(move |_| Ok(make_order(uuid, OrderStatus::Cancelled)));

        let mut res = TestClient::get(format!("http://example.com/admin/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        let body: Envelope<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.uuid, uuid.into_uuid());
        assert_eq!(body.data.status, "cancelled");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/admin/orders/{}", Uuid::now_v7()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
