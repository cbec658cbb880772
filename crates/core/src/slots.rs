//! Delivery Slots
//!
//! Every delivery date carries two independent pools of production capacity:
//! normal slots and emergency (rush) slots. A [`SlotLedger`] is the capacity
//! and consumption of one date; [`SlotUsage`] is what a single booking takes
//! from it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slot pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Regular production capacity.
    Normal,

    /// Rush capacity, charged with a per-slot surcharge.
    Emergency,
}

impl SlotKind {
    /// Lower-case name used in messages and payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Emergency => "emergency",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when a ledger cannot accommodate a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    /// The booking asks for more slots than remain in a pool.
    #[error("requested {requested} {kind} slot(s) but only {remaining} remain")]
    Insufficient {
        /// Pool that ran out.
        kind: SlotKind,

        /// Slots requested from the pool.
        requested: u32,

        /// Slots still free in the pool.
        remaining: u32,
    },

    /// A capacity change would leave the pool smaller than its bookings.
    #[error("{kind} capacity {capacity} is below the {booked} slot(s) already booked")]
    BelowBooked {
        /// Pool being resized.
        kind: SlotKind,

        /// Proposed capacity.
        capacity: u32,

        /// Slots already booked from the pool.
        booked: u32,
    },

    /// Counter arithmetic would overflow.
    #[error("{kind} slot counter overflowed")]
    Overflow {
        /// Pool whose counter overflowed.
        kind: SlotKind,
    },
}

/// Slots consumed by one booking on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotUsage {
    /// Normal slots consumed.
    pub normal: u32,

    /// Emergency slots consumed.
    pub emergency: u32,
}

impl SlotUsage {
    /// Create a usage from both pool counts.
    pub const fn new(normal: u32, emergency: u32) -> Self {
        Self { normal, emergency }
    }

    /// A usage that takes nothing from either pool.
    pub const fn is_empty(&self) -> bool {
        self.normal == 0 && self.emergency == 0
    }

    /// Slots taken from the given pool.
    pub const fn of(&self, kind: SlotKind) -> u32 {
        match kind {
            SlotKind::Normal => self.normal,
            SlotKind::Emergency => self.emergency,
        }
    }
}

/// Capacity and consumption counters of a single delivery date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotLedger {
    /// Normal slot capacity.
    pub normal_slots: u32,

    /// Emergency slot capacity.
    pub emergency_slots: u32,

    /// Normal slots already booked.
    pub normal_booked_slots: u32,

    /// Emergency slots already booked.
    pub emergency_booked_slots: u32,
}

impl SlotLedger {
    /// An empty ledger with the given capacities.
    pub const fn with_capacity(normal_slots: u32, emergency_slots: u32) -> Self {
        Self {
            normal_slots,
            emergency_slots,
            normal_booked_slots: 0,
            emergency_booked_slots: 0,
        }
    }

    /// Capacity of a pool.
    pub const fn capacity(&self, kind: SlotKind) -> u32 {
        match kind {
            SlotKind::Normal => self.normal_slots,
            SlotKind::Emergency => self.emergency_slots,
        }
    }

    /// Booked counter of a pool.
    pub const fn booked(&self, kind: SlotKind) -> u32 {
        match kind {
            SlotKind::Normal => self.normal_booked_slots,
            SlotKind::Emergency => self.emergency_booked_slots,
        }
    }

    /// Free slots in a pool. Never negative, even for a corrupt ledger.
    pub const fn remaining(&self, kind: SlotKind) -> u32 {
        self.capacity(kind).saturating_sub(self.booked(kind))
    }

    /// Whether both booked counters sit within their capacities.
    pub const fn is_consistent(&self) -> bool {
        self.normal_booked_slots <= self.normal_slots
            && self.emergency_booked_slots <= self.emergency_slots
    }

    /// Check a booking against the remaining capacity of both pools.
    ///
    /// Pools are checked independently; the normal pool is reported first
    /// when both are short.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Insufficient`] naming the first pool that
    /// cannot satisfy the usage.
    pub const fn check(&self, usage: SlotUsage) -> Result<(), CapacityError> {
        if let Err(error) = self.check_pool(SlotKind::Normal, usage.normal) {
            return Err(error);
        }

        self.check_pool(SlotKind::Emergency, usage.emergency)
    }

    const fn check_pool(&self, kind: SlotKind, requested: u32) -> Result<(), CapacityError> {
        let remaining = self.remaining(kind);

        if requested > remaining {
            return Err(CapacityError::Insufficient {
                kind,
                requested,
                remaining,
            });
        }

        Ok(())
    }

    /// Book a usage, returning the updated ledger.
    ///
    /// # Errors
    ///
    /// Returns an error when either pool lacks capacity. The ledger is left
    /// untouched on failure.
    pub fn reserve(self, usage: SlotUsage) -> Result<Self, CapacityError> {
        self.check(usage)?;

        Ok(Self {
            normal_booked_slots: self
                .normal_booked_slots
                .checked_add(usage.normal)
                .ok_or(CapacityError::Overflow {
                    kind: SlotKind::Normal,
                })?,
            emergency_booked_slots: self
                .emergency_booked_slots
                .checked_add(usage.emergency)
                .ok_or(CapacityError::Overflow {
                    kind: SlotKind::Emergency,
                })?,
            ..self
        })
    }

    /// Give a usage back. Counters floor at zero.
    #[must_use]
    pub const fn release(self, usage: SlotUsage) -> Self {
        Self {
            normal_booked_slots: self.normal_booked_slots.saturating_sub(usage.normal),
            emergency_booked_slots: self.emergency_booked_slots.saturating_sub(usage.emergency),
            ..self
        }
    }

    /// Change both capacities, keeping the booked counters.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::BelowBooked`] when a new capacity would be
    /// smaller than the slots already booked from that pool.
    pub const fn resize(
        self,
        normal_slots: u32,
        emergency_slots: u32,
    ) -> Result<Self, CapacityError> {
        if normal_slots < self.normal_booked_slots {
            return Err(CapacityError::BelowBooked {
                kind: SlotKind::Normal,
                capacity: normal_slots,
                booked: self.normal_booked_slots,
            });
        }

        if emergency_slots < self.emergency_booked_slots {
            return Err(CapacityError::BelowBooked {
                kind: SlotKind::Emergency,
                capacity: emergency_slots,
                booked: self.emergency_booked_slots,
            });
        }

        Ok(Self {
            normal_slots,
            emergency_slots,
            ..self
        })
    }
}
