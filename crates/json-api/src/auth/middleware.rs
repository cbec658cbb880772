//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;
use vestry_app::auth::AuthServiceError;

use crate::{extensions::*, responses::ApiError, state::State};

/// Resolve the bearer token to a [`Principal`](vestry_app::auth::Principal)
/// and store it in the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(ApiError::unauthorized(
            "Missing or invalid Authorization header",
        ));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    let principal = match state.app.auth.authenticate_bearer(token).await {
        Ok(principal) => principal,
        Err(AuthServiceError::InvalidCredentials) => {
            res.render(ApiError::unauthorized("Invalid or expired token"));
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::Upstream(source)) => {
            error!("identity provider error during authentication: {source}");

            res.render(ApiError::internal());
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::Users(source)) => {
            error!("failed to sync user during authentication: {source}");

            res.render(ApiError::internal());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_principal(principal);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
