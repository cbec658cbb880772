//! Payment Outcome Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use vestry::orders::PaymentOutcome;
use vestry_app::domain::orders::data::PaymentReport;

use crate::{
    extensions::*,
    orders::{errors::into_api_error, models::OrderResponse},
    responses::{ApiError, Envelope},
    state::State,
};

/// Payment Outcome Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentOutcomeRequest {
    /// Orders covered by the payment attempt
    pub orders: Vec<Uuid>,

    /// `succeeded` or `failed`
    pub outcome: String,
}

impl TryFrom<PaymentOutcomeRequest> for PaymentReport {
    type Error = ApiError;

    fn try_from(request: PaymentOutcomeRequest) -> Result<Self, Self::Error> {
        let outcome = match request.outcome.trim() {
            "succeeded" => PaymentOutcome::Succeeded,
            "failed" => PaymentOutcome::Failed,
            other => {
                return Err(ApiError::bad_request(format!(
                    "unknown payment outcome \"{other}\""
                )));
            }
        };

        Ok(Self {
            orders: request.orders.into_iter().map(Into::into).collect(),
            outcome,
        })
    }
}

/// Payment Outcome Handler
///
/// Records a payment attempt's result on every order it covered. Reporting
/// the same outcome again changes nothing.
#[endpoint(
    tags("payments"),
    summary = "Report Payment Outcome",
    responses(
        (status_code = StatusCode::OK, description = "Outcome applied"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or wrong webhook secret"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown order"),
    ),
)]
#[tracing::instrument(
    name = "payments.outcome",
    skip(json, depot),
    fields(
        outcome = tracing::field::Empty,
        orders_count = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PaymentOutcomeRequest>,
    depot: &mut Depot,
) -> Result<Envelope<Vec<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let report = PaymentReport::try_from(json.into_inner())?;
    let outcome = report.outcome;

    let span = tracing::Span::current();
    span.record("outcome", tracing::field::debug(outcome));

    let orders = state
        .app
        .orders
        .apply_payment_outcome(report)
        .await
        .map_err(into_api_error)?;

    span.record("orders_count", tracing::field::display(orders.len()));

    info!(?outcome, orders = orders.len(), "payment outcome applied");

    Ok(Envelope::new(orders.into_iter().map(Into::into).collect()))
}
