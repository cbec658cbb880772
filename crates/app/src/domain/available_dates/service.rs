//! Available dates service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tracing::info;
use vestry::calendar::DateRange;

use crate::{
    database::Db,
    domain::available_dates::{
        data::{AvailableDateUpdate, AvailableDateUpsert, NewAvailableDate, SlotRequest},
        errors::AvailableDatesServiceError,
        ledger::{Availability, PgSlotReservations},
        records::{AvailableDateRecord, AvailableDateUuid},
        repository::PgAvailableDatesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAvailableDatesService {
    db: Db,
    repository: PgAvailableDatesRepository,
    reservations: PgSlotReservations,
}

impl PgAvailableDatesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAvailableDatesRepository::new(),
            reservations: PgSlotReservations::new(),
        }
    }

    async fn list(
        &self,
        range: DateRange,
        only_available: bool,
    ) -> Result<Vec<AvailableDateRecord>, AvailableDatesServiceError> {
        let mut tx = self.db.begin().await?;

        let dates = self
            .repository
            .list_dates(&mut tx, range, only_available)
            .await?;

        tx.commit().await?;

        Ok(dates)
    }
}

#[async_trait]
impl AvailableDatesService for PgAvailableDatesService {
    async fn list_available_dates(
        &self,
        range: DateRange,
    ) -> Result<Vec<AvailableDateRecord>, AvailableDatesServiceError> {
        self.list(range, true).await
    }

    async fn list_all_dates(
        &self,
        range: DateRange,
    ) -> Result<Vec<AvailableDateRecord>, AvailableDatesServiceError> {
        self.list(range, false).await
    }

    async fn check_allocations(
        &self,
        requests: Vec<SlotRequest>,
    ) -> Result<Vec<AvailableDateRecord>, AvailableDatesServiceError> {
        let mut tx = self.db.begin().await?;

        let checked = self
            .reservations
            .validate(&mut tx, &requests, Availability::Required)
            .await?;

        tx.commit().await?;

        Ok(checked.into_iter().map(|(record, _usage)| record).collect())
    }

    async fn create_date(
        &self,
        date: NewAvailableDate,
    ) -> Result<AvailableDateRecord, AvailableDatesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_date(&mut tx, &date).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn upsert_dates(
        &self,
        dates: Vec<AvailableDateUpsert>,
    ) -> Result<Vec<AvailableDateRecord>, AvailableDatesServiceError> {
        let mut tx = self.db.begin().await?;

        let mut resolved: Vec<NewAvailableDate> =
            dates.iter().map(AvailableDateUpsert::resolve).collect();

        resolved.sort_by_key(|date| date.date);

        let mut upserted = Vec::with_capacity(resolved.len());

        for date in &resolved {
            if let Some(current) = self.repository.lock_date_on(&mut tx, date.date).await? {
                current
                    .ledger()
                    .resize(date.normal_slots, date.emergency_slots)?;
            }

            upserted.push(self.repository.upsert_date(&mut tx, date).await?);
        }

        tx.commit().await?;

        info!(count = upserted.len(), "upserted available dates");

        Ok(upserted)
    }

    async fn update_date(
        &self,
        date: AvailableDateUuid,
        update: AvailableDateUpdate,
    ) -> Result<AvailableDateRecord, AvailableDatesServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_date(&mut tx, date).await?;

        let ledger = current.ledger().resize(
            update.normal_slots.unwrap_or(current.normal_slots),
            update.emergency_slots.unwrap_or(current.emergency_slots),
        )?;

        let edited = AvailableDateRecord {
            normal_slots: ledger.normal_slots,
            emergency_slots: ledger.emergency_slots,
            emergency_slot_cost: update
                .emergency_slot_cost
                .unwrap_or(current.emergency_slot_cost),
            is_available: update.is_available.unwrap_or(current.is_available),
            ..current
        };

        let updated = self.repository.update_date(&mut tx, &edited).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_date(&self, date: AvailableDateUuid) -> Result<(), AvailableDatesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_date(&mut tx, date).await?;

        if rows_affected == 0 {
            return Err(AvailableDatesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn delete_dates_before(&self, before: Date) -> Result<u64, AvailableDatesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_dates_before(&mut tx, before).await?;

        tx.commit().await?;

        info!(%before, deleted = rows_affected, "purged past available dates");

        Ok(rows_affected)
    }
}

#[automock]
#[async_trait]
pub trait AvailableDatesService: Send + Sync {
    /// Dates open for booking within the range, ascending.
    async fn list_available_dates(
        &self,
        range: DateRange,
    ) -> Result<Vec<AvailableDateRecord>, AvailableDatesServiceError>;

    /// Every date within the range, open or not, ascending.
    async fn list_all_dates(
        &self,
        range: DateRange,
    ) -> Result<Vec<AvailableDateRecord>, AvailableDatesServiceError>;

    /// Check slot requests against remaining capacity without booking them.
    async fn check_allocations(
        &self,
        requests: Vec<SlotRequest>,
    ) -> Result<Vec<AvailableDateRecord>, AvailableDatesServiceError>;

    /// Create a single date. Fails if the day already has a record.
    async fn create_date(
        &self,
        date: NewAvailableDate,
    ) -> Result<AvailableDateRecord, AvailableDatesServiceError>;

    /// Insert or replace dates keyed by day, keeping booked counters.
    ///
    /// Capacity can never drop below what is already booked. Results are
    /// ascending by day.
    async fn upsert_dates(
        &self,
        dates: Vec<AvailableDateUpsert>,
    ) -> Result<Vec<AvailableDateRecord>, AvailableDatesServiceError>;

    /// Edit capacity, cost or availability of a date.
    async fn update_date(
        &self,
        date: AvailableDateUuid,
        update: AvailableDateUpdate,
    ) -> Result<AvailableDateRecord, AvailableDatesServiceError>;

    /// Delete a single date.
    async fn delete_date(&self, date: AvailableDateUuid) -> Result<(), AvailableDatesServiceError>;

    /// Delete every date strictly before `before`, returning how many went.
    async fn delete_dates_before(&self, before: Date) -> Result<u64, AvailableDatesServiceError>;
}
