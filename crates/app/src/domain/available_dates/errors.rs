//! Available dates service errors.

use jiff::civil::Date;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use vestry::{
    calendar::CalendarError,
    slots::{CapacityError, SlotKind},
};

use crate::domain::available_dates::records::AvailableDateUuid;

/// Reasons a set of slot requests cannot be booked.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("at least one delivery date is required")]
    NoAllocations,

    #[error("allocation for date {0} uses no slots")]
    EmptyAllocation(AvailableDateUuid),

    #[error("date {0} is listed more than once")]
    DuplicateDate(AvailableDateUuid),

    #[error("available date {0} not found")]
    DateNotFound(AvailableDateUuid),

    #[error("{0} is not open for booking")]
    DateUnavailable(Date),

    #[error(
        "insufficient {slot_kind} slots on {date}: requested {requested}, remaining {remaining}"
    )]
    InsufficientCapacity {
        date: Date,
        slot_kind: SlotKind,
        requested: u32,
        remaining: u32,
    },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AllocationError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl AllocationError {
    pub(crate) fn capacity(date: Date, error: CapacityError) -> Self {
        match error {
            CapacityError::Insufficient {
                kind,
                requested,
                remaining,
            } => Self::InsufficientCapacity {
                date,
                slot_kind: kind,
                requested,
                remaining,
            },
            CapacityError::BelowBooked { kind, .. } | CapacityError::Overflow { kind } => {
                Self::InsufficientCapacity {
                    date,
                    slot_kind: kind,
                    requested: 0,
                    remaining: 0,
                }
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum AvailableDatesServiceError {
    #[error("a record for this date already exists")]
    AlreadyExists,

    #[error("available date not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    InvalidRange(#[from] CalendarError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AvailableDatesServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => return Self::NotFound,
            Error::Encode(_) => return Self::InvalidData,
            _ => {}
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
