//! Parsing helpers for dates and amounts carried as strings.

use jiff::civil::Date;
use rust_decimal::Decimal;
use salvo::oapi::extract::QueryParam;

use crate::{extensions::*, responses::ApiError};

/// Parse a `YYYY-MM-DD` value.
pub(crate) fn parse_date(value: &str, field: &str) -> Result<Date, ApiError> {
    value
        .trim()
        .parse::<Date>()
        .or_400(&format!("could not parse \"{field}\" as a date"))
}

/// Parse a decimal amount such as `"12.50"`.
pub(crate) fn parse_money(value: &str, field: &str) -> Result<Decimal, ApiError> {
    value
        .trim()
        .parse::<Decimal>()
        .or_400(&format!("could not parse \"{field}\" as an amount"))
}

/// Largest slot count or quantity the ledger can store.
pub(crate) const MAX_COUNT: u32 = i32::MAX.unsigned_abs();

/// Reject counts the ledger cannot store.
pub(crate) fn check_count(value: Option<u32>, field: &str) -> Result<Option<u32>, ApiError> {
    match value {
        Some(count) if count > MAX_COUNT => Err(ApiError::bad_request(format!(
            "\"{field}\" must be at most {MAX_COUNT}"
        ))),
        _ => Ok(value),
    }
}

pub(crate) trait DateParamExt {
    fn into_date(self, field: &str) -> Result<Option<Date>, ApiError>;
}

impl DateParamExt for QueryParam<String, false> {
    fn into_date(self, field: &str) -> Result<Option<Date>, ApiError> {
        self.into_inner()
            .map(|value| parse_date(&value, field))
            .transpose()
    }
}
