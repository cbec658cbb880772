//! User Errors

use tracing::error;
use vestry_app::domain::users::UsersServiceError;

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: UsersServiceError) -> ApiError {
    match error {
        UsersServiceError::AlreadyExists => ApiError::conflict("User already exists"),
        UsersServiceError::NotFound => ApiError::not_found("User not found"),
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            ApiError::bad_request("Invalid user payload")
        }
        UsersServiceError::Sql(source) => {
            error!("users storage error: {source}");

            ApiError::internal()
        }
    }
}
