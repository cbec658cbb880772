//! Notifications Report Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;
use vestry_app::domain::notifications::{NotificationsServiceError, records::NotificationsReport};

use crate::{
    extensions::*,
    orders::models::OrderResponse,
    responses::{ApiError, Envelope},
    state::State,
};

/// Notifications Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsResponse {
    /// Pending orders older than the overdue threshold
    pub overdue_orders: Vec<OrderResponse>,

    /// Open orders with a delivery date coming up
    pub upcoming_orders: Vec<OrderResponse>,

    /// Enquiries nobody has read yet
    pub new_contacts: u64,
}

impl From<NotificationsReport> for NotificationsResponse {
    fn from(report: NotificationsReport) -> Self {
        Self {
            overdue_orders: report.overdue_orders.into_iter().map(Into::into).collect(),
            upcoming_orders: report.upcoming_orders.into_iter().map(Into::into).collect(),
            new_contacts: report.new_contacts,
        }
    }
}

/// Notifications Report Handler
#[endpoint(
    tags("admin"),
    summary = "Notifications",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Envelope<NotificationsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let report = state
        .app
        .notifications
        .report(Timestamp::now())
        .await
        .map_err(|error| {
            match error {
                NotificationsServiceError::OutOfRange(source) => {
                    error!("notification window out of range: {source}");
                }
                NotificationsServiceError::Sql(source) => {
                    error!("notifications storage error: {source}");
                }
            }

            ApiError::internal()
        })?;

    Ok(Envelope::new(report.into()))
}
