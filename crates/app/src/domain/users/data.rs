//! User Data

/// Identity asserted by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub external_id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Profile fields a user may edit. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}
