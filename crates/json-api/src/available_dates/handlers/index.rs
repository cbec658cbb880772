//! Public Available Dates Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use vestry::calendar::{DateRange, today_utc};

use crate::{
    available_dates::{errors::into_api_error, models::AvailableDateResponse},
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

/// Resolve the optional `month`/`year` filter against today's date.
pub(crate) fn date_range(
    month: QueryParam<i8, false>,
    year: QueryParam<i16, false>,
) -> Result<DateRange, ApiError> {
    DateRange::resolve(month.into_inner(), year.into_inner(), today_utc())
        .map_err(|error| ApiError::bad_request(error.to_string()))
}

/// List Available Dates
///
/// Dates open for booking in the given month, or from today onwards when no
/// month is given.
#[endpoint(tags("available-dates"), summary = "List Available Dates")]
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
        .list_available_dates(range)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(dates.into_iter().map(Into::into).collect()))
}
