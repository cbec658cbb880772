//! Contact Form Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use vestry_app::domain::contacts::{data::NewContact, records::ContactUuid};

use crate::{
    contacts::errors::into_api_error,
    extensions::*,
    responses::{ApiError, Envelope, MessageResponse},
    state::State,
};

/// Contact Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,

    #[serde(default)]
    pub subject: String,

    pub message: String,
}

impl From<ContactRequest> for NewContact {
    fn from(request: ContactRequest) -> Self {
        Self {
            uuid: ContactUuid::new(),
            name: request.name,
            email: request.email,
            phone: request.phone.filter(|phone| !phone.trim().is_empty()),
            subject: request.subject,
            message: request.message,
        }
    }
}

/// Contact Form Handler
///
/// Stores an enquiry for the workshop to follow up.
#[endpoint(
    tags("contact"),
    summary = "Send Enquiry",
    responses(
        (status_code = StatusCode::CREATED, description = "Enquiry received"),
        (status_code = StatusCode::BAD_REQUEST, description = "Incomplete enquiry"),
    ),
)]
#[tracing::instrument(
    name = "contacts.create",
    skip(json, depot, res),
    fields(
        contact_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ContactRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Envelope<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let contact = state
        .app
        .contacts
        .create_contact(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    tracing::Span::current().record("contact_uuid", tracing::field::display(contact.uuid));

    res.status_code(StatusCode::CREATED);

    Ok(MessageResponse::new("Thank you, we will be in touch"))
}
