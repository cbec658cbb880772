//! Contact Data

use crate::domain::contacts::records::ContactUuid;

/// New Contact Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub uuid: ContactUuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl NewContact {
    /// Whether the fields an administrator needs to reply are present.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && self.email.contains('@')
            && !self.message.trim().is_empty()
    }
}
