//! Contact Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Contact UUID
pub type ContactUuid = TypedUuid<ContactRecord>;

/// Triage state of an enquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Resolved,
}

impl ContactStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown contact status: {0}")]
pub struct UnknownContactStatus(String);

impl FromStr for ContactStatus {
    type Err = UnknownContactStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "resolved" => Ok(Self::Resolved),
            other => Err(UnknownContactStatus(other.to_string())),
        }
    }
}

/// Contact Record
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    pub uuid: ContactUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
