//! Update Enquiry Status Handler

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

use crate::{
    contacts::{
        errors::into_api_error,
        models::{ContactResponse, parse_status},
    },
    extensions::*,
    responses::{ApiError, Envelope},
    state::State,
};

/// Contact Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactStatusRequest {
    /// `new`, `read` or `resolved`
    pub status: String,
}

/// Update Enquiry Status Handler
#[endpoint(
    tags("admin"),
    summary = "Update Enquiry Status",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "contacts.update_status",
    skip(contact, json, depot),
    fields(
        contact_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    contact: PathParam<Uuid>,
    json: JsonBody<ContactStatusRequest>,
    depot: &mut Depot,
) -> Result<Envelope<ContactResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let status = parse_status(&json.into_inner().status)?;
    let contact = contact.into_inner();

    let span = tracing::Span::current();
    span.record("contact_uuid", tracing::field::display(contact));
    span.record("status", tracing::field::display(status));

    let record = state
        .app
        .contacts
        .set_status(contact.into(), status)
        .await
        .map_err(into_api_error)?;

    Ok(Envelope::new(record.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vestry_app::domain::contacts::{
        ContactsServiceError, MockContactsService,
        records::{ContactStatus, ContactUuid},
    };

    use crate::{
        contacts::models::fixtures::make_contact,
        test_helpers::{Mocks, admin_service},
    };

    use super::*;

    fn make_service(contacts: MockContactsService) -> Service {
        admin_service(
            Mocks {
                contacts,
                ..Mocks::default()
            },
            Router::with_path("admin/contacts/{contact}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_mark_resolved() -> TestResult {
        let uuid = ContactUuid::new();
        let mut contacts = MockContactsService::new();

        contacts
            .expect_set_status()
            .once()
            .withf(move |contact, status| *contact == uuid && *status == ContactStatus::Resolved)
            .return_once(move |_, status| Ok(make_contact(uuid, status)));

        let mut res = TestClient::put(format!("http://example.com/admin/contacts/{uuid}"))
            .json(&json!({ "status": "resolved" }))
            .send(&make_service(contacts))
            .await;

        let body: Envelope<ContactResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.status, "resolved");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_enquiry_returns_404() -> TestResult {
        let mut contacts = MockContactsService::new();

        contacts
            .expect_set_status()
            .once()
            .return_once(|_, _| Err(ContactsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/admin/contacts/{}", Uuid::now_v7()))
            .json(&json!({ "status": "read" }))
            .send(&make_service(contacts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
