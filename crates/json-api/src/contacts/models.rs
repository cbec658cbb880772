//! Contact Payloads

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry_app::domain::contacts::records::{ContactRecord, ContactStatus};

use crate::{extensions::*, responses::ApiError};

/// Contact Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,

    /// `new`, `read` or `resolved`
    pub status: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<ContactRecord> for ContactResponse {
    fn from(record: ContactRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            name: record.name,
            email: record.email,
            phone: record.phone,
            subject: record.subject,
            message: record.message,
            status: record.status.to_string(),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

pub(crate) fn parse_status(value: &str) -> Result<ContactStatus, ApiError> {
    value.trim().parse::<ContactStatus>().or_400("invalid \"status\"")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use jiff::Timestamp;
    use vestry_app::domain::contacts::records::{ContactRecord, ContactStatus, ContactUuid};

    pub(crate) fn make_contact(uuid: ContactUuid, status: ContactStatus) -> ContactRecord {
        ContactRecord {
            uuid,
            name: "Sister Agnes".to_string(),
            email: "agnes@example.com".to_string(),
            phone: None,
            subject: "Altar frontal".to_string(),
            message: "Do you take commissions for frontals?".to_string(),
            status,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
