//! Available Date Data

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vestry::slots::SlotUsage;

use crate::domain::available_dates::records::AvailableDateUuid;

/// Normal slots given to a date created without explicit capacity.
pub const DEFAULT_NORMAL_SLOTS: u32 = 4;

/// Emergency slots given to a date created without explicit capacity.
pub const DEFAULT_EMERGENCY_SLOTS: u32 = 1;

/// New Available Date Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAvailableDate {
    pub uuid: AvailableDateUuid,
    pub date: Date,
    pub normal_slots: u32,
    pub emergency_slots: u32,
    pub emergency_slot_cost: Decimal,
    pub is_available: bool,
}

impl NewAvailableDate {
    /// A date with default capacity, no surcharge, open for booking.
    pub fn with_defaults(date: Date) -> Self {
        Self {
            uuid: AvailableDateUuid::new(),
            date,
            normal_slots: DEFAULT_NORMAL_SLOTS,
            emergency_slots: DEFAULT_EMERGENCY_SLOTS,
            emergency_slot_cost: Decimal::ZERO,
            is_available: true,
        }
    }
}

/// Partial edit of an existing date. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AvailableDateUpdate {
    pub normal_slots: Option<u32>,
    pub emergency_slots: Option<u32>,
    pub emergency_slot_cost: Option<Decimal>,
    pub is_available: Option<bool>,
}

/// One entry of a bulk upsert, keyed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableDateUpsert {
    pub date: Date,
    pub normal_slots: Option<u32>,
    pub emergency_slots: Option<u32>,
    pub emergency_slot_cost: Option<Decimal>,
    pub is_available: Option<bool>,
}

impl AvailableDateUpsert {
    /// An upsert that only names the date.
    #[must_use]
    pub fn for_date(date: Date) -> Self {
        Self {
            date,
            normal_slots: None,
            emergency_slots: None,
            emergency_slot_cost: None,
            is_available: None,
        }
    }

    /// Fill unset fields with the defaults for a new date.
    pub fn resolve(&self) -> NewAvailableDate {
        NewAvailableDate {
            uuid: AvailableDateUuid::new(),
            date: self.date,
            normal_slots: self.normal_slots.unwrap_or(DEFAULT_NORMAL_SLOTS),
            emergency_slots: self.emergency_slots.unwrap_or(DEFAULT_EMERGENCY_SLOTS),
            emergency_slot_cost: self.emergency_slot_cost.unwrap_or(Decimal::ZERO),
            is_available: self.is_available.unwrap_or(true),
        }
    }
}

/// Slots requested from one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    pub available_date_uuid: uuid::Uuid,
    pub normal_slots_used: u32,
    pub emergency_slots_used: u32,
}

impl SlotRequest {
    pub fn new(available_date: AvailableDateUuid, normal: u32, emergency: u32) -> Self {
        Self {
            available_date_uuid: available_date.into_uuid(),
            normal_slots_used: normal,
            emergency_slots_used: emergency,
        }
    }

    pub fn available_date(&self) -> AvailableDateUuid {
        AvailableDateUuid::from_uuid(self.available_date_uuid)
    }

    pub fn usage(&self) -> SlotUsage {
        SlotUsage::new(self.normal_slots_used, self.emergency_slots_used)
    }
}
