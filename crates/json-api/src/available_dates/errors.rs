//! Available Date Errors

use tracing::error;
use vestry_app::domain::available_dates::{AllocationError, AvailableDatesServiceError};

use crate::responses::ApiError;

pub(crate) fn into_api_error(error: AvailableDatesServiceError) -> ApiError {
    match error {
        AvailableDatesServiceError::AlreadyExists => {
            ApiError::conflict("A record for this date already exists")
        }
        AvailableDatesServiceError::NotFound => ApiError::not_found("Available date not found"),
        AvailableDatesServiceError::InvalidReference
        | AvailableDatesServiceError::MissingRequiredData
        | AvailableDatesServiceError::InvalidData => {
            ApiError::bad_request("Invalid available date payload")
        }
        AvailableDatesServiceError::InvalidRange(source) => ApiError::bad_request(source.to_string()),
        AvailableDatesServiceError::Capacity(source) => ApiError::bad_request(source.to_string()),
        AvailableDatesServiceError::Allocation(source) => allocation_error(source),
        AvailableDatesServiceError::Sql(source) => {
            error!("available dates storage error: {source}");

            ApiError::internal()
        }
    }
}

/// Map a slot validation failure. Capacity problems are client errors.
pub(crate) fn allocation_error(error: AllocationError) -> ApiError {
    match error {
        AllocationError::DateNotFound(_) => ApiError::not_found(error.to_string()),
        AllocationError::NoAllocations
        | AllocationError::EmptyAllocation(_)
        | AllocationError::DuplicateDate(_)
        | AllocationError::DateUnavailable(_)
        | AllocationError::InsufficientCapacity { .. } => ApiError::bad_request(error.to_string()),
        AllocationError::Sql(source) => {
            error!("slot reservation storage error: {source}");

            ApiError::internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::http::StatusCode;
    use vestry::{calendar::CalendarError, slots::SlotKind};

    use super::*;

    #[test]
    fn capacity_shortfall_is_a_bad_request() {
        let error = allocation_error(AllocationError::InsufficientCapacity {
            date: date(2025, 12, 1),
            slot_kind: SlotKind::Normal,
            requested: 1,
            remaining: 0,
        });

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn incomplete_month_filter_is_a_bad_request() {
        let error = into_api_error(CalendarError::IncompleteMonth.into());

        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }
}
