//! Notifications

pub mod errors;
pub mod records;
pub mod service;

pub use errors::NotificationsServiceError;
pub use service::*;
