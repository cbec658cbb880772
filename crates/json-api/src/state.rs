//! State

use std::sync::Arc;

use vestry_app::{auth::WebhookSecret, context::AppContext};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Secret payment callbacks must present. Callbacks are refused when unset.
    pub(crate) webhook_secret: Option<WebhookSecret>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, webhook_secret: Option<WebhookSecret>) -> Self {
        Self {
            app,
            webhook_secret,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(
        app: AppContext,
        webhook_secret: Option<WebhookSecret>,
    ) -> Arc<Self> {
        Arc::new(Self::new(app, webhook_secret))
    }
}
