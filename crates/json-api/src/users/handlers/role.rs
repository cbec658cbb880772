//! Set User Role Handler

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
use vestry_app::domain::users::records::{UserRole, UserUuid};

use crate::{
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
    users::{errors::into_api_error, models::UserResponse},
};

/// Role Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RoleRequest {
    /// `customer` or `admin`
    pub role: String,
}

/// Set User Role Handler
///
/// Administrators cannot demote themselves.
#[endpoint(
    tags("admin"),
    summary = "Set User Role",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "users.set_role",
    skip(user, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        role = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<RoleRequest>,
    depot: &mut Depot,
) -> Result<Envelope<UserResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let role = json
        .into_inner()
        .role
        .trim()
        .parse::<UserRole>()
        .or_400("invalid \"role\"")?;

    let user = UserUuid::from_uuid(user.into_inner());

    let span = tracing::Span::current();
    span.record("user_uuid", tracing::field::display(user));
    span.record("role", tracing::field::display(role));

    if user == principal.user_uuid && role != UserRole::Admin {
        return Err(ApiError::bad_request("You cannot remove your own admin role"));
    }

    let record = state
        .app
        .users
        .set_role(user, role)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(record.into()))
}
