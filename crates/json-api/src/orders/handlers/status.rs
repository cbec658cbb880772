//! Update Order Status Handler

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

use crate::{
    extensions::*,
    orders::{errors::into_api_error, handlers::admin_index::parse_status, models::OrderResponse},
    responses::{ApiError, Envelope},
    state::State,
};

/// Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusRequest {
    /// `pending`, `confirmed`, `processing`, `completed` or `cancelled`
    pub status: String,
}

/// Update Order Status Handler
///
/// Cancelling releases the order's slots; reopening a cancelled order books
/// them again and fails if they have been taken meanwhile.
#[endpoint(
    tags("admin"),
    summary = "Update Order Status",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(
        order_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<OrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Envelope<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = parse_status(&json.into_inner().status)?;
    let order = order.into_inner();

    let span = tracing::Span::current();
    span.record("order_uuid", tracing::field::display(order));
    span.record("status", tracing::field::display(status));

    let record = state
        .app
        .orders
        .update_status(order.into(), status)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(record.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vestry::{orders::OrderStatus, slots::SlotKind};
    use vestry_app::domain::{
        available_dates::AllocationError,
        orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
    };

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
            Router::with_path("admin/orders/{order}/status").put(handler),
        )
    }

    #[tokio::test]
    async fn test_cancel_order() -> TestResult {
        let uuid = OrderUuid::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_status()
            .once()
            .withf(move |order, status| *order == uuid && *status == OrderStatus::Cancelled)
            .return_once(move |_, status| Ok(make_order(uuid, status)));

        let mut res = TestClient::put(format!("http://example.com/admin/orders/{uuid}/status"))
            .json(&json!({ "status": "cancelled" }))
            .send(&make_service(orders))
            .await;

        let body: Envelope<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.status, "cancelled");

        Ok(())
    }

    #[tokio::test]
    async fn test_reopen_without_capacity_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().once().return_once(|_, _| {
            Err(OrdersServiceError::Allocation(
                AllocationError::InsufficientCapacity {
                    date: date(2025, 12, 1),
                    slot_kind: SlotKind::Normal,
                    requested: 1,
                    remaining: 0,
                },
            ))
        });

        let res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "pending" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_update_status().never();

        let res = TestClient::put(format!(
            "http://example.com/admin/orders/{}/status",
            OrderUuid::new()
        ))
        .json(&json!({ "status": "lost" }))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
