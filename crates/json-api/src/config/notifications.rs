//! Notifications Config

use clap::Args;
use vestry_app::domain::notifications::records::{
    DEFAULT_OVERDUE_AFTER_HOURS, DEFAULT_UPCOMING_WITHIN_DAYS, NotificationSettings,
};

/// Thresholds for the administrator notifications report.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Hours after which a pending order is reported as overdue
    #[arg(long, env = "OVERDUE_ORDER_AFTER_HOURS", default_value_t = DEFAULT_OVERDUE_AFTER_HOURS)]
    pub overdue_order_after_hours: u32,

    /// Days ahead within which deliveries are reported as upcoming
    #[arg(long, env = "UPCOMING_ORDER_WITHIN_DAYS", default_value_t = DEFAULT_UPCOMING_WITHIN_DAYS)]
    pub upcoming_order_within_days: u32,
}

impl NotificationsConfig {
    #[must_use]
    pub fn settings(&self) -> NotificationSettings {
        NotificationSettings {
            overdue_after_hours: self.overdue_order_after_hours,
            upcoming_within_days: self.upcoming_order_within_days,
        }
    }
}
