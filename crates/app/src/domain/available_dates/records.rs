//! Available Date Records

use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry::slots::{SlotKind, SlotLedger, SlotUsage};

use crate::{domain::available_dates::data::SlotRequest, uuids::TypedUuid};

/// Available Date UUID
pub type AvailableDateUuid = TypedUuid<AvailableDateRecord>;

/// Available Date Record
#[derive(Debug, Clone, PartialEq)]
pub struct AvailableDateRecord {
    pub uuid: AvailableDateUuid,
    pub date: Date,
    pub normal_slots: u32,
    pub emergency_slots: u32,
    pub emergency_slot_cost: Decimal,
    pub normal_booked_slots: u32,
    pub emergency_booked_slots: u32,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AvailableDateRecord {
    /// Capacity counters of this date.
    pub fn ledger(&self) -> SlotLedger {
        SlotLedger {
            normal_slots: self.normal_slots,
            emergency_slots: self.emergency_slots,
            normal_booked_slots: self.normal_booked_slots,
            emergency_booked_slots: self.emergency_booked_slots,
        }
    }

    pub fn remaining_normal_slots(&self) -> u32 {
        self.ledger().remaining(SlotKind::Normal)
    }

    pub fn remaining_emergency_slots(&self) -> u32 {
        self.ledger().remaining(SlotKind::Emergency)
    }

    /// Freeze this date together with the slots an order takes from it.
    pub fn allocate(&self, usage: SlotUsage) -> SlotAllocation {
        SlotAllocation {
            available_date_uuid: self.uuid.into_uuid(),
            date: self.date,
            normal_slots: self.normal_slots,
            emergency_slots: self.emergency_slots,
            emergency_slot_cost: self.emergency_slot_cost,
            normal_booked_slots: self.normal_booked_slots,
            emergency_booked_slots: self.emergency_booked_slots,
            normal_slots_used: usage.normal,
            emergency_slots_used: usage.emergency,
        }
    }
}

/// Frozen copy of a date's ledger at booking time plus the slots taken.
///
/// Stored inside orders; later edits to the date never change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAllocation {
    pub available_date_uuid: Uuid,
    pub date: Date,
    pub normal_slots: u32,
    pub emergency_slots: u32,
    pub emergency_slot_cost: Decimal,
    pub normal_booked_slots: u32,
    pub emergency_booked_slots: u32,
    pub normal_slots_used: u32,
    pub emergency_slots_used: u32,
}

impl SlotAllocation {
    pub fn available_date(&self) -> AvailableDateUuid {
        AvailableDateUuid::from_uuid(self.available_date_uuid)
    }

    pub fn usage(&self) -> SlotUsage {
        SlotUsage::new(self.normal_slots_used, self.emergency_slots_used)
    }

    /// The request that would book these slots again.
    pub fn request(&self) -> SlotRequest {
        SlotRequest::new(
            self.available_date(),
            self.normal_slots_used,
            self.emergency_slots_used,
        )
    }
}
