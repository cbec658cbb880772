//! Delete Enquiry Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    contacts::errors::into_api_error,
    extensions::*,
    responses::{ApiError, Envelope, MessageResponse},
    state::State,
};

/// Delete Enquiry Handler
#[endpoint(
    tags("admin"),
    summary = "Delete Enquiry",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "contacts.delete",
    skip(contact, depot),
    fields(
        contact_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    contact: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Envelope<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let contact = contact.into_inner();

    let span = tracing::Span::current();
    span.record("contact_uuid", tracing::field::display(contact));

    state
        .app
        .contacts
        .delete_contact(contact.into())
        .await
        .map_err(into_api_error)?;

    Ok(MessageResponse::new("Enquiry deleted"))
}
