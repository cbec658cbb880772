//! Calendar
//!
//! Delivery dates are civil calendar days with no time-of-day, so two
//! bookings for "the same day" always land on the same record.

use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};
use thiserror::Error;

/// Errors raised while building a date range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// Month outside `1..=12`.
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(i8),

    /// Year that is not four digits.
    #[error("year must be a four digit number, got {0}")]
    InvalidYear(i16),

    /// Only one of month and year was supplied.
    #[error("month and year must be provided together")]
    IncompleteMonth,

    /// The calendar could not represent the requested day.
    #[error("date out of range: {0}")]
    OutOfRange(String),
}

/// Inclusive range of calendar days, open-ended when `end` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day included.
    pub start: Date,

    /// Last day included, if bounded.
    pub end: Option<Date>,
}

impl DateRange {
    /// Every day of one calendar month.
    ///
    /// # Errors
    ///
    /// Returns an error for a month outside `1..=12` or a year that is not
    /// four digits.
    pub fn month(year: i16, month: i8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }

        if !(1000..=9999).contains(&year) {
            return Err(CalendarError::InvalidYear(year));
        }

        let start = Date::new(year, month, 1)
            .map_err(|error| CalendarError::OutOfRange(error.to_string()))?;

        Ok(Self {
            start,
            end: Some(start.last_of_month()),
        })
    }

    /// Every day from `start` onwards.
    pub const fn from(start: Date) -> Self {
        Self { start, end: None }
    }

    /// Range for an optional month and year filter: a whole month when both
    /// are given, today onwards when neither is.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::IncompleteMonth`] when only one is given, or
    /// the error from [`DateRange::month`].
    pub fn resolve(
        month: Option<i8>,
        year: Option<i16>,
        today: Date,
    ) -> Result<Self, CalendarError> {
        match (month, year) {
            (Some(month), Some(year)) => Self::month(year, month),
            (None, None) => Ok(Self::from(today)),
            _ => Err(CalendarError::IncompleteMonth),
        }
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && self.end.is_none_or(|end| date <= end)
    }
}

/// Today's date in UTC.
pub fn today_utc() -> Date {
    utc_date(Timestamp::now())
}

/// Calendar day of `timestamp` in UTC.
pub fn utc_date(timestamp: Timestamp) -> Date {
    timestamp.to_zoned(TimeZone::UTC).date()
}

/// `days` consecutive days starting at `start`.
pub fn consecutive_days(start: Date, days: usize) -> Vec<Date> {
    start.series(1.day()).take(days).collect()
}
