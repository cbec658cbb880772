//! Admin Available Dates Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    available_dates::{
        errors::into_api_error, handlers::index::date_range, models::AvailableDateResponse,
    },
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

/// Admin Available Dates Handler
///
/// Every date in range, including those closed for booking.
#[endpoint(
    tags("admin"),
    summary = "List All Dates",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    month: QueryParam<i8, false>,
    year: QueryParam<i16, false>,
    depot: &mut Depot,
) -> Result<Envelope<Vec<AvailableDateResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let range = date_range(month, year)?;

    let dates = state
        .app
        .available_dates
        .list_all_dates(range)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(dates.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use vestry_app::domain::available_dates::{
        MockAvailableDatesService, records::{AvailableDateRecord, AvailableDateUuid},
    };

    use crate::{
        available_dates::models::fixtures::make_date,
        test_helpers::{Mocks, admin_service},
    };

    use super::*;

    #[tokio::test]
    async fn test_closed_dates_are_listed() -> TestResult {
        let closed = AvailableDateRecord {
            is_available: false,
            ..make_date(AvailableDateUuid::new(), date(2025, 12, 2))
        };

        let mut available_dates = MockAvailableDatesService::new();

        available_dates.expect_list_available_dates().never();
        available_dates
            .expect_list_all_dates()
            .once()
            .return_once(move |_| Ok(vec![closed]));

        let service = admin_service(
            Mocks {
                available_dates,
                ..Mocks::default()
            },
            Router::with_path("admin/available-dates").get(handler),
        );

        let mut res = TestClient::get("http://example.com/admin/available-dates?month=12&year=2025")
            .send(&service)
            .await;

        let body: Envelope<Vec<AvailableDateResponse>> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.len(), 1, "expected the closed date");
        assert!(!body.data[0].is_available);

        Ok(())
    }
}
