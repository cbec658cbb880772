//! Shared-secret check for payment provider callbacks.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Digest of the configured webhook secret.
#[derive(Clone)]
pub struct WebhookSecret {
    digest: [u8; 32],
}

impl WebhookSecret {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            digest: Sha256::digest(secret.as_bytes()).into(),
        }
    }

    /// Whether `presented` matches the configured secret, compared in
    /// constant time.
    #[must_use]
    pub fn verify(&self, presented: &str) -> bool {
        let presented: [u8; 32] = Sha256::digest(presented.as_bytes()).into();

        constant_time_eq::constant_time_eq(&self.digest, &presented)
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(**redacted**)")
    }
}

impl Drop for WebhookSecret {
    fn drop(&mut self) {
        self.digest.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_secret_verifies() {
        assert!(WebhookSecret::new("whsec_123").verify("whsec_123"));
    }

    #[test]
    fn different_secret_fails() {
        let secret = WebhookSecret::new("whsec_123");

        assert!(!secret.verify("whsec_124"));
        assert!(!secret.verify(""));
    }

    #[test]
    fn near_miss_secrets_fail() {
        let secret = WebhookSecret::new("whsec_123");

        assert!(!secret.verify("whsec_12"));
        assert!(!secret.verify("whsec_1234"));
        assert!(secret.verify(&String::from("whsec_123")));
    }
}
