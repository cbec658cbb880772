//! Payments Config

use clap::Args;

/// Payment provider callback settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Shared secret expected in the `X-Webhook-Secret` header. Payment
    /// callbacks are refused when unset.
    #[arg(long, env = "PAYMENT_WEBHOOK_SECRET", hide_env_values = true)]
    pub payment_webhook_secret: Option<String>,
}
