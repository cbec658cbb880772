//! Available Dates Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;
use vestry::{calendar::DateRange, slots::SlotUsage};

use crate::{
    database::{count_param, try_get_count},
    domain::available_dates::{
        data::NewAvailableDate,
        records::{AvailableDateRecord, AvailableDateUuid},
    },
};

const LIST_AVAILABLE_DATES_SQL: &str = include_str!("sql/list_available_dates.sql");
const GET_AVAILABLE_DATE_SQL: &str = include_str!("sql/get_available_date.sql");
const LOCK_AVAILABLE_DATE_SQL: &str = include_str!("sql/lock_available_date.sql");
const LOCK_AVAILABLE_DATE_ON_SQL: &str = include_str!("sql/lock_available_date_on.sql");
const LOCK_AVAILABLE_DATES_SQL: &str = include_str!("sql/lock_available_dates.sql");
const CREATE_AVAILABLE_DATE_SQL: &str = include_str!("sql/create_available_date.sql");
const UPSERT_AVAILABLE_DATE_SQL: &str = include_str!("sql/upsert_available_date.sql");
const UPDATE_AVAILABLE_DATE_SQL: &str = include_str!("sql/update_available_date.sql");
const DELETE_AVAILABLE_DATE_SQL: &str = include_str!("sql/delete_available_date.sql");
const DELETE_AVAILABLE_DATES_BEFORE_SQL: &str =
    include_str!("sql/delete_available_dates_before.sql");
const RESERVE_SLOTS_SQL: &str = include_str!("sql/reserve_slots.sql");
const RELEASE_SLOTS_SQL: &str = include_str!("sql/release_slots.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAvailableDatesRepository;

impl PgAvailableDatesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_dates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        range: DateRange,
        only_available: bool,
    ) -> Result<Vec<AvailableDateRecord>, sqlx::Error> {
        query_as::<Postgres, AvailableDateRecord>(LIST_AVAILABLE_DATES_SQL)
            .bind(SqlxDate::from(range.start))
            .bind(range.end.map(SqlxDate::from))
            .bind(only_available)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: AvailableDateUuid,
    ) -> Result<Option<AvailableDateRecord>, sqlx::Error> {
        query_as::<Postgres, AvailableDateRecord>(GET_AVAILABLE_DATE_SQL)
            .bind(date.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn lock_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: AvailableDateUuid,
    ) -> Result<AvailableDateRecord, sqlx::Error> {
        query_as::<Postgres, AvailableDateRecord>(LOCK_AVAILABLE_DATE_SQL)
            .bind(date.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock every listed date that exists, in id order.
    pub(crate) async fn lock_dates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        dates: &[AvailableDateUuid],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = dates.iter().copied().map(AvailableDateUuid::into_uuid).collect();

        let locked = query(LOCK_AVAILABLE_DATES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        Ok(locked.len() as u64)
    }

    /// Lock the record for a calendar day, if there is one.
    pub(crate) async fn lock_date_on(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        day: Date,
    ) -> Result<Option<AvailableDateRecord>, sqlx::Error> {
        query_as::<Postgres, AvailableDateRecord>(LOCK_AVAILABLE_DATE_ON_SQL)
            .bind(SqlxDate::from(day))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: &NewAvailableDate,
    ) -> Result<AvailableDateRecord, sqlx::Error> {
        query_as::<Postgres, AvailableDateRecord>(CREATE_AVAILABLE_DATE_SQL)
            .bind(date.uuid.into_uuid())
            .bind(SqlxDate::from(date.date))
            .bind(count_param(date.normal_slots, "normal_slots")?)
            .bind(count_param(date.emergency_slots, "emergency_slots")?)
            .bind(date.emergency_slot_cost)
            .bind(date.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert a date, or replace capacity, cost and availability of the
    /// existing record for that day while keeping its booked counters.
    pub(crate) async fn upsert_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: &NewAvailableDate,
    ) -> Result<AvailableDateRecord, sqlx::Error> {
        query_as::<Postgres, AvailableDateRecord>(UPSERT_AVAILABLE_DATE_SQL)
            .bind(date.uuid.into_uuid())
            .bind(SqlxDate::from(date.date))
            .bind(count_param(date.normal_slots, "normal_slots")?)
            .bind(count_param(date.emergency_slots, "emergency_slots")?)
            .bind(date.emergency_slot_cost)
            .bind(date.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &AvailableDateRecord,
    ) -> Result<AvailableDateRecord, sqlx::Error> {
        query_as::<Postgres, AvailableDateRecord>(UPDATE_AVAILABLE_DATE_SQL)
            .bind(record.uuid.into_uuid())
            .bind(count_param(record.normal_slots, "normal_slots")?)
            .bind(count_param(record.emergency_slots, "emergency_slots")?)
            .bind(record.emergency_slot_cost)
            .bind(record.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_date(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: AvailableDateUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_AVAILABLE_DATE_SQL)
            .bind(date.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_dates_before(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        before: Date,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_AVAILABLE_DATES_BEFORE_SQL)
            .bind(SqlxDate::from(before))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Add `usage` to the booked counters if both pools have room.
    ///
    /// Returns `None` when the date does not exist or lacks capacity.
    pub(crate) async fn reserve_slots(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: AvailableDateUuid,
        usage: SlotUsage,
    ) -> Result<Option<AvailableDateRecord>, sqlx::Error> {
        query_as::<Postgres, AvailableDateRecord>(RESERVE_SLOTS_SQL)
            .bind(date.into_uuid())
            .bind(count_param(usage.normal, "normal_booked_slots")?)
            .bind(count_param(usage.emergency, "emergency_booked_slots")?)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Subtract `usage` from the booked counters, flooring at zero.
    ///
    /// Returns `None` when the date no longer exists.
    pub(crate) async fn release_slots(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        date: AvailableDateUuid,
        usage: SlotUsage,
    ) -> Result<Option<AvailableDateRecord>, sqlx::Error> {
        query_as::<Postgres, AvailableDateRecord>(RELEASE_SLOTS_SQL)
            .bind(date.into_uuid())
            .bind(count_param(usage.normal, "normal_booked_slots")?)
            .bind(count_param(usage.emergency, "emergency_booked_slots")?)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for AvailableDateRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AvailableDateUuid::from_uuid(row.try_get("uuid")?),
            date: row.try_get::<SqlxDate, _>("date")?.to_jiff(),
            normal_slots: try_get_count(row, "normal_slots")?,
            emergency_slots: try_get_count(row, "emergency_slots")?,
            emergency_slot_cost: row.try_get("emergency_slot_cost")?,
            normal_booked_slots: try_get_count(row, "normal_booked_slots")?,
            emergency_booked_slots: try_get_count(row, "emergency_booked_slots")?,
            is_available: row.try_get("is_available")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
