//! Bulk Upsert Available Dates Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    available_dates::{
        errors::into_api_error, handlers::create::AvailableDateRequest,
        models::AvailableDateResponse,
    },
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

/// Bulk Upsert Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BulkUpsertRequest {
    pub dates: Vec<AvailableDateRequest>,
}

/// Bulk Upsert Available Dates Handler
///
/// Creates missing days and replaces settings on existing ones. Booked
/// counters are never touched.
#[endpoint(
    tags("admin"),
    summary = "Bulk Upsert Available Dates",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "available_dates.bulk_upsert",
    skip(json, depot),
    fields(
        requested = tracing::field::Empty,
        upserted = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<BulkUpsertRequest>,
    depot: &mut Depot,
) -> Result<Envelope<Vec<AvailableDateResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.dates.is_empty() {
        return Err(ApiError::bad_request("at least one date is required"));
    }

    let upserts = request
        .dates
        .into_iter()
        .map(AvailableDateRequest::into_upsert)
        .collect::<Result<Vec<_>, _>>()?;

    let span = tracing::Span::current();
    span.record("requested", tracing::field::display(upserts.len()));

    let dates = state
        .app
        .available_dates
        .upsert_dates(upserts)
        .await
        .map_err(into_api_error)?;

    span.record("upserted", tracing::field::display(dates.len()));

    Ok(Envelope::new(dates.into_iter().map(Into::into).collect()))
}
