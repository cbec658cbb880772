//! Authentication

mod errors;
pub mod identity;
mod service;
mod webhook;

pub use errors::*;
pub use identity::{
    IdentityError, IdentityProviderClient, IdentityProviderConfig, IdentityVerifier,
    MockIdentityVerifier, ProviderApiKey,
};
pub use service::*;
pub use webhook::WebhookSecret;
