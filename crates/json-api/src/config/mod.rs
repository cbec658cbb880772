//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    identity::IdentityProviderSettings,
    notifications::NotificationsConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    payments::PaymentsConfig,
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod identity;
pub(crate) mod notifications;
pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod server;

/// Vestry JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "vestry-json", about = "Vestry JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging and metrics settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub identity: IdentityProviderSettings,

    /// Payment callback settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Administrator notification thresholds.
    #[command(flatten)]
    pub notifications: NotificationsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const REQUIRED: [&str; 5] = [
        "vestry-json",
        "--database-url",
        "postgres://localhost/vestry",
        "--identity-provider-url",
        "https://id.example.com",
    ];

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from(
            REQUIRED
                .iter()
                .copied()
                .chain(["--identity-provider-api-key", "key"]),
        )?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.notifications.overdue_order_after_hours, 48);
        assert_eq!(config.notifications.upcoming_order_within_days, 7);
        assert!(config.payments.payment_webhook_secret.is_none());

        Ok(())
    }

    #[test]
    fn missing_identity_provider_key_is_rejected() {
        let result = ServerConfig::try_parse_from(REQUIRED);

        assert!(result.is_err(), "api key should be required");
    }
}
