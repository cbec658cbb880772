//! Available Dates

pub mod data;
pub mod errors;
pub(crate) mod ledger;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::{AllocationError, AvailableDatesServiceError};
pub use service::*;
