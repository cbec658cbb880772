//! Identity provider client for bearer token verification.

use std::fmt;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroize;

use crate::domain::users::data::VerifiedIdentity;

/// Header carrying the server's API key on verification requests.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Secret used to authenticate this server to the identity provider.
#[derive(Clone)]
pub struct ProviderApiKey(String);

impl ProviderApiKey {
    #[must_use]
    pub fn new(key: String) -> Self {
        Self(key)
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProviderApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProviderApiKey(**redacted**)")
    }
}

impl Drop for ProviderApiKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Configuration for connecting to the identity provider.
#[derive(Debug, Clone)]
pub struct IdentityProviderConfig {
    /// Base URL, e.g. `"https://id.example.com"`.
    pub url: String,

    pub api_key: ProviderApiKey,
}

/// Errors that can occur when verifying a token upstream.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider refused the token.
    #[error("token rejected with status {0}")]
    Rejected(StatusCode),

    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

#[automock]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Resolve a bearer token to the identity it was issued for.
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError>;
}

/// HTTP client for the identity provider's token verification endpoint.
#[derive(Debug, Clone)]
pub struct IdentityProviderClient {
    config: IdentityProviderConfig,
    http: Client,
}

impl IdentityProviderClient {
    #[must_use]
    pub fn new(config: IdentityProviderConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn verify_url(&self) -> String {
        format!("{}/v1/tokens/verify", self.config.url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IdentityVerifier for IdentityProviderClient {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let body = serde_json::json!({ "token": token });

        let response = self
            .http
            .post(self.verify_url())
            .header(API_KEY_HEADER, self.config.api_key.expose())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::Rejected(response.status()));
        }

        let parsed: VerifyResponse = response.json().await?;

        Ok(VerifiedIdentity {
            external_id: parsed.uid,
            email: parsed.email,
            name: parsed.name.filter(|name| !name.trim().is_empty()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    uid: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> IdentityProviderClient {
        IdentityProviderClient::new(IdentityProviderConfig {
            url: url.to_string(),
            api_key: ProviderApiKey::new("secret".to_string()),
        })
    }

    #[test]
    fn verify_url_tolerates_trailing_slash() {
        assert_eq!(
            client("https://id.example.com/").verify_url(),
            "https://id.example.com/v1/tokens/verify"
        );
        assert_eq!(
            client("https://id.example.com").verify_url(),
            "https://id.example.com/v1/tokens/verify"
        );
    }

    #[test]
    fn api_key_is_redacted_in_debug_output() {
        let formatted = format!("{:?}", ProviderApiKey::new("hunter2".to_string()));

        assert!(!formatted.contains("hunter2"));
    }

    #[test]
    fn response_name_is_optional() -> Result<(), serde_json::Error> {
        let parsed: VerifyResponse =
            serde_json::from_str(r#"{"uid":"abc","email":"a@example.com"}"#)?;

        assert_eq!(parsed.uid, "abc");
        assert!(parsed.name.is_none());

        Ok(())
    }
}
