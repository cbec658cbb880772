//! Available Dates Cleanup Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    available_dates::errors::into_api_error,
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

/// Cleanup Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CleanupResponse {
    /// Number of date records removed
    pub deleted: u64,
}

/// Available Dates Cleanup Handler
///
/// Removes every date strictly before `before`.
#[endpoint(
    tags("admin"),
    summary = "Delete Past Dates",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "available_dates.cleanup",
    skip(before, depot),
    fields(
        before = tracing::field::Empty,
        deleted = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    before: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Envelope<CleanupResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let before = before
        .into_date("before")?
        .ok_or_else(|| ApiError::bad_request("\"before\" is required"))?;

    let span = tracing::Span::current();
    span.record("before", tracing::field::display(before));

    let deleted = state
        .app
        .available_dates
        .delete_dates_before(before)
        .await
        .map_err(into_api_error)?;

    span.record("deleted", tracing::field::display(deleted));

    Ok(Envelope::new(CleanupResponse { deleted }))
}
