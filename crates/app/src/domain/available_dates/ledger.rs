//! Slot reservations against the available dates ledger.
//!
//! Shared by every service that books or frees delivery slots so that the
//! counters only ever move inside the caller's transaction.

use std::collections::HashSet;

use sqlx::{Postgres, Transaction};
use tracing::warn;
use vestry::slots::{SlotKind, SlotUsage};

use crate::domain::available_dates::{
    data::SlotRequest,
    errors::AllocationError,
    records::{AvailableDateRecord, AvailableDateUuid, SlotAllocation},
    repository::PgAvailableDatesRepository,
};

/// Whether unavailable dates may be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Availability {
    /// Customer bookings: the date must be open.
    Required,

    /// Administrative re-reservation: the gate is ignored.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSlotReservations {
    repository: PgAvailableDatesRepository,
}

impl PgSlotReservations {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            repository: PgAvailableDatesRepository::new(),
        }
    }

    /// Row-lock every listed date in id order.
    ///
    /// Must be taken before any counter moves when a transaction books or
    /// releases for more than one order or cart line.
    pub(crate) async fn lock_dates<I>(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        dates: I,
    ) -> Result<(), sqlx::Error>
    where
        I: IntoIterator<Item = AvailableDateUuid>,
    {
        let mut dates: Vec<AvailableDateUuid> = dates.into_iter().collect();
        dates.sort();
        dates.dedup();

        if dates.is_empty() {
            return Ok(());
        }

        self.repository.lock_dates(tx, &dates).await?;

        Ok(())
    }

    /// Check every request against the current ledger without changing it.
    pub(crate) async fn validate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requests: &[SlotRequest],
        availability: Availability,
    ) -> Result<Vec<(AvailableDateRecord, SlotUsage)>, AllocationError> {
        check_shape(requests)?;

        let mut checked = Vec::with_capacity(requests.len());

        for request in requests {
            let record = self
                .repository
                .get_date(tx, request.available_date())
                .await?
                .ok_or(AllocationError::DateNotFound(request.available_date()))?;

            if availability == Availability::Required && !record.is_available {
                return Err(AllocationError::DateUnavailable(record.date));
            }

            record
                .ledger()
                .check(request.usage())
                .map_err(|error| AllocationError::capacity(record.date, error))?;

            checked.push((record, request.usage()));
        }

        Ok(checked)
    }

    /// Book every request, or fail on the first one that does not fit.
    ///
    /// Dates are updated in id order so concurrent bookings over the same
    /// dates lock rows consistently. The returned allocations are sorted by
    /// date.
    pub(crate) async fn reserve(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        requests: &[SlotRequest],
        availability: Availability,
    ) -> Result<Vec<SlotAllocation>, AllocationError> {
        self.validate(tx, requests, availability).await?;

        let mut ordered = requests.to_vec();
        ordered.sort_by_key(|request| request.available_date_uuid);

        let mut allocations = Vec::with_capacity(ordered.len());

        for request in ordered {
            let reserved = self
                .repository
                .reserve_slots(tx, request.available_date(), request.usage())
                .await?;

            let Some(record) = reserved else {
                return Err(self.explain_rejection(tx, &request).await);
            };

            allocations.push(record.allocate(request.usage()));
        }

        allocations.sort_by_key(|allocation| allocation.date);

        Ok(allocations)
    }

    /// Give previously reserved slots back. Dates purged since booking are
    /// skipped.
    pub(crate) async fn release(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        allocations: &[SlotAllocation],
    ) -> Result<(), sqlx::Error> {
        let mut ordered = allocations.to_vec();
        ordered.sort_by_key(|allocation| allocation.available_date_uuid);

        for allocation in ordered {
            let released = self
                .repository
                .release_slots(tx, allocation.available_date(), allocation.usage())
                .await?;

            if released.is_none() {
                warn!(
                    available_date = %allocation.available_date_uuid,
                    date = %allocation.date,
                    "released slots for a date that no longer exists"
                );
            }
        }

        Ok(())
    }

    async fn explain_rejection(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        request: &SlotRequest,
    ) -> AllocationError {
        match self.repository.get_date(tx, request.available_date()).await {
            Ok(Some(record)) => match record.ledger().check(request.usage()) {
                Err(error) => AllocationError::capacity(record.date, error),
                Ok(()) => {
                    let usage = request.usage();
                    let slot_kind = if usage.normal > 0 {
                        SlotKind::Normal
                    } else {
                        SlotKind::Emergency
                    };

                    AllocationError::InsufficientCapacity {
                        date: record.date,
                        slot_kind,
                        requested: usage.of(slot_kind),
                        remaining: record.ledger().remaining(slot_kind),
                    }
                }
            },
            Ok(None) => AllocationError::DateNotFound(request.available_date()),
            Err(error) => AllocationError::Sql(error),
        }
    }
}

/// Reject empty request lists, zero-slot entries and repeated dates.
pub(crate) fn check_shape(requests: &[SlotRequest]) -> Result<(), AllocationError> {
    if requests.is_empty() {
        return Err(AllocationError::NoAllocations);
    }

    let mut seen = HashSet::with_capacity(requests.len());

    for request in requests {
        if request.usage().is_empty() {
            return Err(AllocationError::EmptyAllocation(request.available_date()));
        }

        if !seen.insert(request.available_date_uuid) {
            return Err(AllocationError::DuplicateDate(request.available_date()));
        }
    }

    Ok(())
}
