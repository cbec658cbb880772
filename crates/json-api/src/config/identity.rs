//! Identity Provider Config

use clap::Args;

/// Bearer token verification settings.
#[derive(Debug, Args)]
pub struct IdentityProviderSettings {
    /// Identity provider base URL
    #[arg(long, env = "IDENTITY_PROVIDER_URL")]
    pub identity_provider_url: String,

    /// API key presented to the identity provider
    #[arg(long, env = "IDENTITY_PROVIDER_API_KEY", hide_env_values = true)]
    pub identity_provider_api_key: String,
}
