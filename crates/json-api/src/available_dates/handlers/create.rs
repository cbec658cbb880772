//! Create Available Date Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use vestry_app::domain::available_dates::data::{AvailableDateUpsert, NewAvailableDate};

use crate::{
    available_dates::{errors::into_api_error, models::AvailableDateResponse},
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

/// Available Date Request
///
/// Unset fields fall back to 4 normal slots, 1 emergency slot, no surcharge
/// and open for booking.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailableDateRequest {
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,

    pub normal_slots: Option<u32>,
    pub emergency_slots: Option<u32>,

    /// Surcharge per emergency slot, e.g. `"25.00"`
    pub emergency_slot_cost: Option<String>,

    pub is_available: Option<bool>,
}

impl AvailableDateRequest {
    pub(crate) fn into_upsert(self) -> Result<AvailableDateUpsert, ApiError> {
        Ok(AvailableDateUpsert {
            date: parse_date(&self.date, "date")?,
            normal_slots: check_count(self.normal_slots, "normal_slots")?,
            emergency_slots: check_count(self.emergency_slots, "emergency_slots")?,
            emergency_slot_cost: self
                .emergency_slot_cost
                .as_deref()
                .map(|cost| parse_money(cost, "emergency_slot_cost"))
                .transpose()?,
            is_available: self.is_available,
        })
    }
}

/// Create Available Date Handler
#[endpoint(
    tags("admin"),
    summary = "Create Available Date",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Date created"),
        (status_code = StatusCode::CONFLICT, description = "Date already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(
    name = "available_dates.create",
    skip(json, depot, res),
    fields(
        date = tracing::field::Empty,
        available_date_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AvailableDateRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Envelope<AvailableDateResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let new_date: NewAvailableDate = json.into_inner().into_upsert()?.resolve();

    let span = tracing::Span::current();
    span.record("date", tracing::field::display(new_date.date));

    let record = state
        .app
        .available_dates
        .create_date(new_date)
        .await
        .map_err(into_api_error)?;

    span.record("available_date_uuid", tracing::field::display(record.uuid));

    res.add_header(
        LOCATION,
        format!("/admin/available-dates/{}", record.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Envelope::new(record.into()))
}
