//! List Users Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
    users::{errors::into_api_error, models::UserResponse},
};

/// List Users Handler
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Envelope<Vec<UserResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users()
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(users.into_iter().map(Into::into).collect()))
}
