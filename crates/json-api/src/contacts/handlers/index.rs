//! List Enquiries Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    contacts::{
        errors::into_api_error,
        models::{ContactResponse, parse_status},
    },
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

/// List Enquiries Handler
#[endpoint(
    tags("admin"),
    summary = "List Enquiries",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Envelope<Vec<ContactResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = status.into_inner().as_deref().map(parse_status).transpose()?;

    let contacts = state
        .app
        .contacts
        .list_contacts(status)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(contacts.into_iter().map(Into::into).collect()))
}
