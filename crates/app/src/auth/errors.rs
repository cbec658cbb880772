//! Auth service errors.

use thiserror::Error;

use crate::{auth::IdentityError, domain::users::UsersServiceError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("identity provider unavailable")]
    Upstream(#[source] IdentityError),

    #[error("failed to sync the local user")]
    Users(#[source] UsersServiceError),
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        Self::Users(error)
    }
}

impl From<IdentityError> for AuthServiceError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::Rejected(_) => Self::InvalidCredentials,
            IdentityError::Http(_) => Self::Upstream(error),
        }
    }
}
