//! Current User Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
    users::{errors::into_api_error, models::UserResponse},
};

/// Current User Handler
#[endpoint(
    tags("users"),
    summary = "Get Own Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Envelope<UserResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .users
        .get_user(principal.user_uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(user.into()))
}
