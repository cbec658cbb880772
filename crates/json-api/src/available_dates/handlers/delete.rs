//! Delete Available Date Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    available_dates::errors::into_api_error,
    extensions::*,
    responses::{ApiError, Envelope, MessageResponse},
    state::State,
};

/// Delete Available Date Handler
#[endpoint(
    tags("admin"),
    summary = "Delete Available Date",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "available_dates.delete",
    skip(date, depot),
    fields(
        available_date_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    date: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Envelope<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let date = date.into_inner();

    let span = tracing::Span::current();
    span.record("available_date_uuid", tracing::field::display(date));

    state
        .app
        .available_dates
        .delete_date(date.into())
        .await
        .map_err(into_api_error)?;

    Ok(MessageResponse::new("Available date deleted"))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use vestry_app::domain::available_dates::{
        AvailableDatesServiceError, MockAvailableDatesService, records::AvailableDateUuid,
    };

    use crate::test_helpers::{Mocks, admin_service};

    use super::*;

    fn make_service(available_dates: MockAvailableDatesService) -> Service {
        admin_service(
            Mocks {
                available_dates,
                ..Mocks::default()
            },
            Router::with_path("admin/available-dates/{date}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_date() -> TestResult {
        let uuid = AvailableDateUuid::new();
        let mut available_dates = MockAvailableDatesService::new();

        available_dates
            .expect_delete_date()
            .once()
            .withf(move |target| *target == uuid)
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete(format!(
            "http://example.com/admin/available-dates/{}",
            uuid.into_uuid()
        ))
        .send(&make_service(available_dates))
        .await;

        let body: Envelope<MessageResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.message, "Available date deleted");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_date_returns_404() -> TestResult {
        let mut available_dates = MockAvailableDatesService::new();

        available_dates
            .expect_delete_date()
            .once()
            .return_once(|_| Err(AvailableDatesServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/admin/available-dates/{}",
            AvailableDateUuid::new().into_uuid()
        ))
        .send(&make_service(available_dates))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
