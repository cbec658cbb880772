//! Check Allocations Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    available_dates::{
        errors::into_api_error,
        models::{AvailableDateResponse, SlotRequestBody},
    },
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

/// Check Allocations Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckAllocationsRequest {
    pub allocations: Vec<SlotRequestBody>,
}

/// Check Allocations Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckAllocationsResponse {
    /// Always `true`; shortfalls are reported as errors
    pub valid: bool,

    /// Current state of every requested date
    pub dates: Vec<AvailableDateResponse>,
}

/// Check Allocations Handler
///
/// Validates slot requests against remaining capacity without booking them.
#[endpoint(
    tags("available-dates"),
    summary = "Check Slot Availability",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Every request fits"),
        (status_code = StatusCode::BAD_REQUEST, description = "Insufficient capacity or invalid request"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown date"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckAllocationsRequest>,
    depot: &mut Depot,
) -> Result<Envelope<CheckAllocationsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let requests = json
        .into_inner()
        .allocations
        .into_iter()
        .map(Into::into)
        .collect();

    let dates = state
        .app
        .available_dates
        .check_allocations(requests)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(CheckAllocationsResponse {
        valid: true,
        dates: dates.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vestry::slots::SlotKind;
    use vestry_app::domain::available_dates::{
        AllocationError, MockAvailableDatesService, data::SlotRequest, records::AvailableDateUuid,
    };

    use crate::{
        available_dates::models::fixtures::make_date,
        responses::ErrorResponse,
        test_helpers::{Mocks, customer_service},
    };

    use super::*;

    fn make_service(available_dates: MockAvailableDatesService) -> Service {
        customer_service(
            Mocks {
                available_dates,
                ..Mocks::default()
            },
            Router::with_path("available-dates/check").post(handler),
        )
    }

    #[tokio::test]
    async fn test_fitting_request_returns_dates() -> TestResult {
        let uuid = AvailableDateUuid::new();
        let mut available_dates = MockAvailableDatesService::new();

        available_dates
            .expect_check_allocations()
            .once()
            .withf(move |requests| requests == &[SlotRequest::new(uuid, 0, 1)])
            .return_once(move |_| Ok(vec![make_date(uuid, date(2025, 12, 1))]));

        let mut res = TestClient::post("http://example.com/available-dates/check")
            .json(&json!({
                "allocations": [
                    { "available_date_uuid": uuid.into_uuid(), "emergency_slots_used": 1 }
                ]
            }))
            .send(&make_service(available_dates))
            .await;

        let body: Envelope<CheckAllocationsResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.data.valid);
        assert_eq!(body.data.dates.len(), 1, "expected one date");

        Ok(())
    }

    #[tokio::test]
    async fn test_shortfall_returns_400_with_reason() -> TestResult {
        let uuid = AvailableDateUuid::new();
        let mut available_dates = MockAvailableDatesService::new();

        available_dates
            .expect_check_allocations()
            .once()
            .return_once(|_| {
                Err(AllocationError::InsufficientCapacity {
                    date: date(2025, 12, 1),
                    slot_kind: SlotKind::Normal,
                    requested: 1,
                    remaining: 0,
                }
                .into())
            });

        let mut res = TestClient::post("http://example.com/available-dates/check")
            .json(&json!({
                "allocations": [{ "available_date_uuid": uuid.into_uuid(), "normal_slots_used": 1 }]
            }))
            .send(&make_service(available_dates))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(!body.success);
        assert_eq!(
            body.error,
            "insufficient normal slots on 2025-12-01: requested 1, remaining 0"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_date_returns_404() -> TestResult {
        let uuid = AvailableDateUuid::new();
        let mut available_dates = MockAvailableDatesService::new();

        available_dates
            .expect_check_allocations()
            .once()
            .return_once(move |_| Err(AllocationError::DateNotFound(uuid).into()));

        let res = TestClient::post("http://example.com/available-dates/check")
            .json(&json!({
                "allocations": [{ "available_date_uuid": uuid.into_uuid(), "normal_slots_used": 1 }]
            }))
            .send(&make_service(available_dates))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
