//! Contact Errors

use tracing::error;
use vestry_app::domain::contacts::ContactsServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: ContactsServiceError) -> ApiError {
    match error {
        ContactsServiceError::AlreadyExists => ApiError::conflict("Enquiry already exists"),
        ContactsServiceError::NotFound => ApiError::not_found("Enquiry not found"),
        ContactsServiceError::MissingRequiredData => {
            ApiError::bad_request("Name, a valid email and a message are required")
        }
        ContactsServiceError::InvalidData => ApiError::bad_request("Invalid enquiry payload"),
        ContactsServiceError::Sql(source) => {
            error!("contacts storage error: {source}");

            ApiError::internal()
        }
    }
}
