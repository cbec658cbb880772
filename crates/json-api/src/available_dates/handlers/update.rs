//! Update Available Date Handler

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
use vestry_app::domain::available_dates::data::AvailableDateUpdate;

use crate::{
    available_dates::{errors::into_api_error, models::AvailableDateResponse},
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

/// Update Available Date Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateAvailableDateRequest {
    pub normal_slots: Option<u32>,
    pub emergency_slots: Option<u32>,
    pub emergency_slot_cost: Option<String>,
    pub is_available: Option<bool>,
}

impl TryFrom<UpdateAvailableDateRequest> for AvailableDateUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateAvailableDateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            normal_slots: check_count(request.normal_slots, "normal_slots")?,
            emergency_slots: check_count(request.emergency_slots, "emergency_slots")?,
            emergency_slot_cost: request
                .emergency_slot_cost
                .as_deref()
                .map(|cost| parse_money(cost, "emergency_slot_cost"))
                .transpose()?,
            is_available: request.is_available,
        })
    }
}

/// Update Available Date Handler
///
/// Capacity can never drop below what is already booked.
#[endpoint(
    tags("admin"),
    summary = "Update Available Date",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Date updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Date not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Capacity below booked slots"),
    ),
)]
#[tracing::instrument(
    name = "available_dates.update",
    skip(date, json, depot),
    fields(
        date_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    date: PathParam<Uuid>,
    json: JsonBody<UpdateAvailableDateRequest>,
    depot: &mut Depot,
) -> Result<Envelope<AvailableDateResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = AvailableDateUpdate::try_from(json.into_inner())?;
    let date = date.into_inner();

    let span = tracing::Span::current();
    span.record("date_uuid", tracing::field::display(date));

    let record = state
        .app
        .available_dates
        .update_date(date.into(), update)
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
    use vestry::slots::{CapacityError, SlotKind};
    use vestry_app::domain::available_dates::{
        AvailableDatesServiceError, MockAvailableDatesService, records::AvailableDateUuid,
    };

    use crate::{
        available_dates::models::fixtures::make_date,
        test_helpers::{Mocks, admin_service},
    };

    use super::*;

    fn make_service(available_dates: MockAvailableDatesService) -> Service {
        admin_service(
            Mocks {
                available_dates,
                ..Mocks::default()
            },
            Router::with_path("admin/available-dates/{date}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_partial_update_passes_only_given_fields() -> TestResult {
        let uuid = AvailableDateUuid::new();
        let mut available_dates = MockAvailableDatesService::new();

        available_dates
            .expect_update_date()
            .once()
            .withf(move |target, update| {
                *target == uuid
                    && *update
                        == AvailableDateUpdate {
                            is_available: Some(false),
                            ..AvailableDateUpdate::default()
                        }
            })
            .return_once(move |_, _| Ok(make_date(uuid, date(2025, 12, 1))));

        let res = TestClient::put(format!(
            "http://example.com/admin/available-dates/{}",
            uuid.into_uuid()
        ))
        .json(&json!({ "is_available": false }))
        .send(&make_service(available_dates))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_capacity_below_booked_returns_400() -> TestResult {
        let uuid = AvailableDateUuid::new();
        let mut available_dates = MockAvailableDatesService::new();

        available_dates
            .expect_update_date()
            .once()
            .return_once(|_, _| {
                Err(AvailableDatesServiceError::Capacity(
                    CapacityError::BelowBooked {
                        kind: SlotKind::Normal,
                        capacity: 0,
                        booked: 1,
                    },
                ))
            });

        let mut res = TestClient::put(format!(
            "http://example.com/admin/available-dates/{}",
            uuid.into_uuid()
        ))
        .json(&json!({ "normal_slots": 0 }))
        .send(&make_service(available_dates))
        .await;

        let body: crate::responses::ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(!body.success);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_date_returns_404() -> TestResult {
        let mut available_dates = MockAvailableDatesService::new();

        available_dates
            .expect_update_date()
            .once()
            .return_once(|_, _| Err(AvailableDatesServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/admin/available-dates/{}",
            AvailableDateUuid::new().into_uuid()
        ))
        .json(&json!({ "normal_slots": 5 }))
        .send(&make_service(available_dates))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_emergency_slots_past_integer_range_returns_400() -> TestResult {
        let res = TestClient::put(format!(
            "http://example.com/admin/available-dates/{}",
            AvailableDateUuid::new().into_uuid()
        ))
        .json(&json!({ "emergency_slots": 3_000_000_000_u64 }))
        .send(&make_service(MockAvailableDatesService::new()))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
