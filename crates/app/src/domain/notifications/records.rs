//! Notification Records

use jiff::{SignedDuration, Span, Timestamp, civil::Date};
use vestry::calendar::utc_date;

use crate::domain::orders::records::OrderRecord;

/// Default age after which a pending order is flagged.
pub const DEFAULT_OVERDUE_AFTER_HOURS: u32 = 48;

/// Default look-ahead for upcoming deliveries.
pub const DEFAULT_UPCOMING_WITHIN_DAYS: u32 = 7;

/// Thresholds for the administrator report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    pub overdue_after_hours: u32,
    pub upcoming_within_days: u32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            overdue_after_hours: DEFAULT_OVERDUE_AFTER_HOURS,
            upcoming_within_days: DEFAULT_UPCOMING_WITHIN_DAYS,
        }
    }
}

impl NotificationSettings {
    /// Pending orders placed before this instant are overdue.
    ///
    /// # Errors
    ///
    /// Returns an error if the cutoff falls outside the supported range.
    pub fn overdue_cutoff(&self, now: Timestamp) -> Result<Timestamp, jiff::Error> {
        now.checked_sub(SignedDuration::from_hours(i64::from(self.overdue_after_hours)))
    }

    /// Inclusive range of delivery dates considered upcoming.
    ///
    /// # Errors
    ///
    /// Returns an error if the range end falls outside the supported range.
    pub fn upcoming_window(&self, now: Timestamp) -> Result<(Date, Date), jiff::Error> {
        let today = utc_date(now);
        let until = today.checked_add(Span::new().days(i64::from(self.upcoming_within_days)))?;

        Ok((today, until))
    }
}

/// Things needing an administrator's attention.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationsReport {
    pub overdue_orders: Vec<OrderRecord>,
    pub upcoming_orders: Vec<OrderRecord>,
    pub new_contacts: u64,
}

impl NotificationsReport {
    pub fn is_empty(&self) -> bool {
        self.overdue_orders.is_empty() && self.upcoming_orders.is_empty() && self.new_contacts == 0
    }
}
