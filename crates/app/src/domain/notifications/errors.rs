//! Notifications service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationsServiceError {
    #[error("notification window out of range")]
    OutOfRange(#[from] jiff::Error),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
