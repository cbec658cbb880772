//! Available Date Payloads

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vestry_app::domain::available_dates::{
    data::SlotRequest,
    records::{AvailableDateRecord, SlotAllocation},
};

/// Available Date Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailableDateResponse {
    /// The unique identifier of the date record
    pub uuid: Uuid,

    /// Calendar day, `YYYY-MM-DD`
    pub date: String,

    pub normal_slots: u32,
    pub emergency_slots: u32,

    /// Surcharge per emergency slot
    pub emergency_slot_cost: String,

    pub normal_booked_slots: u32,
    pub emergency_booked_slots: u32,
    pub remaining_normal_slots: u32,
    pub remaining_emergency_slots: u32,

    /// Whether customers may book this day
    pub is_available: bool,

    pub created_at: String,
    pub updated_at: String,
}

impl From<AvailableDateRecord> for AvailableDateResponse {
    fn from(record: AvailableDateRecord) -> Self {
        Self {
            uuid: record.uuid.into(),
            date: record.date.to_string(),
            normal_slots: record.normal_slots,
            emergency_slots: record.emergency_slots,
            emergency_slot_cost: record.emergency_slot_cost.to_string(),
            normal_booked_slots: record.normal_booked_slots,
            emergency_booked_slots: record.emergency_booked_slots,
            remaining_normal_slots: record.remaining_normal_slots(),
            remaining_emergency_slots: record.remaining_emergency_slots(),
            is_available: record.is_available,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Slots wanted from one date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct SlotRequestBody {
    /// The date record to book from
    pub available_date_uuid: Uuid,

    #[serde(default)]
    pub normal_slots_used: u32,

    #[serde(default)]
    pub emergency_slots_used: u32,
}

impl From<SlotRequestBody> for SlotRequest {
    fn from(body: SlotRequestBody) -> Self {
        SlotRequest::new(
            body.available_date_uuid.into(),
            body.normal_slots_used,
            body.emergency_slots_used,
        )
    }
}

impl From<SlotRequest> for SlotRequestBody {
    fn from(request: SlotRequest) -> Self {
        Self {
            available_date_uuid: request.available_date_uuid,
            normal_slots_used: request.normal_slots_used,
            emergency_slots_used: request.emergency_slots_used,
        }
    }
}

/// A date as it was when the order booked it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SlotAllocationResponse {
    pub available_date_uuid: Uuid,
    pub date: String,
    pub normal_slots: u32,
    pub emergency_slots: u32,
    pub emergency_slot_cost: String,
    pub normal_booked_slots: u32,
    pub emergency_booked_slots: u32,
    pub normal_slots_used: u32,
    pub emergency_slots_used: u32,
}

impl From<SlotAllocation> for SlotAllocationResponse {
    fn from(allocation: SlotAllocation) -> Self {
        Self {
            available_date_uuid: allocation.available_date_uuid,
            date: allocation.date.to_string(),
            normal_slots: allocation.normal_slots,
            emergency_slots: allocation.emergency_slots,
            emergency_slot_cost: allocation.emergency_slot_cost.to_string(),
            normal_booked_slots: allocation.normal_booked_slots,
            emergency_booked_slots: allocation.emergency_booked_slots,
            normal_slots_used: allocation.normal_slots_used,
            emergency_slots_used: allocation.emergency_slots_used,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use jiff::{Timestamp, civil::Date};
    use rust_decimal::Decimal;
    use vestry_app::domain::available_dates::records::{AvailableDateRecord, AvailableDateUuid};

    pub(crate) fn make_date(uuid: AvailableDateUuid, date: Date) -> AvailableDateRecord {
        AvailableDateRecord {
            uuid,
            date,
            normal_slots: 4,
            emergency_slots: 1,
            emergency_slot_cost: Decimal::new(500, 0),
            normal_booked_slots: 1,
            emergency_booked_slots: 0,
            is_available: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
