//! Pricing
//!
//! Unit prices are derived from a product's base price, an optional material
//! surcharge and the discount granted when the customer provides their own
//! cloth. Order totals add quantity and the per-slot emergency surcharge.
//! Every amount leaving this module carries exactly two decimal places.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while pricing a product or an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A monetary input was below zero.
    #[error("{0} must not be negative")]
    NegativeAmount(&'static str),

    /// A percentage discount fell outside `0..=1`.
    #[error("percentage discount {0} must be between 0 and 1")]
    InvalidPercentage(Decimal),

    /// Orders need at least one unit.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// Arithmetic overflowed.
    #[error("price calculation overflowed")]
    Overflow,
}

/// Discount applied when the customer supplies the cloth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClothDiscount {
    /// Fraction of the base price taken off, e.g. `0.1` for ten percent.
    Percentage {
        /// Fraction in `0..=1`.
        value: Decimal,
    },

    /// Fixed amount taken off the base price.
    Fixed {
        /// Non-negative amount.
        value: Decimal,
    },
}

impl Default for ClothDiscount {
    fn default() -> Self {
        Self::Fixed {
            value: Decimal::ZERO,
        }
    }
}

impl ClothDiscount {
    /// Interpret an untagged legacy number: values up to `1` are fractions,
    /// anything larger is a fixed amount.
    pub fn from_legacy(value: Decimal) -> Self {
        if value <= Decimal::ONE {
            Self::Percentage { value }
        } else {
            Self::Fixed { value }
        }
    }

    /// Check the discount is usable.
    ///
    /// # Errors
    ///
    /// Returns an error for negative values or percentages above one.
    pub fn validate(&self) -> Result<(), PricingError> {
        match *self {
            Self::Percentage { value } if value < Decimal::ZERO || value > Decimal::ONE => {
                Err(PricingError::InvalidPercentage(value))
            }
            Self::Fixed { value } if value < Decimal::ZERO => {
                Err(PricingError::NegativeAmount("cloth provided discount"))
            }
            _ => Ok(()),
        }
    }

    /// Discounted price for `base`, never below zero.
    ///
    /// # Errors
    ///
    /// Returns an error when the discount is invalid.
    pub fn apply(&self, base: Decimal) -> Result<Decimal, PricingError> {
        self.validate()?;

        let discounted = match *self {
            // Validated to 0..=1, so the product never exceeds `base`.
            Self::Percentage { value } => base - Percentage::from(value) * base,
            Self::Fixed { value } => base - value,
        };

        Ok(discounted.max(Decimal::ZERO))
    }
}

/// Fabric option with its surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Display name, matched exactly when pricing.
    pub name: String,

    /// Added to the base price when this material is chosen.
    pub additional_cost: Decimal,
}

/// Everything needed to price one unit of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPricing {
    /// Price before material or discount.
    pub base_price: Decimal,

    /// Selectable materials.
    pub materials: Vec<Material>,

    /// Discount for customer-provided cloth.
    pub cloth_provided_discount: ClothDiscount,
}

impl ProductPricing {
    /// Find a material by exact name.
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.name == name)
    }

    /// Check every amount is usable.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative base price or material surcharge, or
    /// an invalid discount.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.base_price < Decimal::ZERO {
            return Err(PricingError::NegativeAmount("base price"));
        }

        if self
            .materials
            .iter()
            .any(|material| material.additional_cost < Decimal::ZERO)
        {
            return Err(PricingError::NegativeAmount("material additional cost"));
        }

        self.cloth_provided_discount.validate()
    }
}

/// How a unit price was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// Customer provides the cloth; discount applied.
    ClothProvided,

    /// Named material surcharge added.
    Material,

    /// No material chosen.
    Base,

    /// A material was named but the product does not offer it.
    UnknownMaterial,
}

/// Price of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrice {
    /// Rounded amount.
    pub amount: Decimal,

    /// Rule that produced the amount.
    pub basis: PriceBasis,
}

/// Price a single unit of a product.
///
/// Providing cloth takes precedence over any material choice. An unknown
/// material prices at the base price and is reported through
/// [`PriceBasis::UnknownMaterial`].
///
/// # Errors
///
/// Returns an error when the product pricing is invalid or arithmetic
/// overflows.
pub fn unit_price(
    pricing: &ProductPricing,
    material: Option<&str>,
    cloth_provided: bool,
) -> Result<UnitPrice, PricingError> {
    pricing.validate()?;

    let (amount, basis) = if cloth_provided {
        (
            pricing.cloth_provided_discount.apply(pricing.base_price)?,
            PriceBasis::ClothProvided,
        )
    } else {
        match material {
            None => (pricing.base_price, PriceBasis::Base),
            Some(name) => match pricing.material(name) {
                Some(found) => (
                    pricing
                        .base_price
                        .checked_add(found.additional_cost)
                        .ok_or(PricingError::Overflow)?,
                    PriceBasis::Material,
                ),
                None => (pricing.base_price, PriceBasis::UnknownMaterial),
            },
        }
    };

    Ok(UnitPrice {
        amount: round_money(amount),
        basis,
    })
}

/// Slot usage and surcharge of one allocation, as seen by the order total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationCharge {
    /// Surcharge per emergency slot on that date.
    pub emergency_slot_cost: Decimal,

    /// Normal slots used on that date.
    pub normal_slots_used: u32,

    /// Emergency slots used on that date.
    pub emergency_slots_used: u32,
}

/// Frozen price of an order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Price of one unit.
    pub unit_price: Decimal,

    /// Units ordered.
    pub quantity: u32,

    /// `unit_price * quantity`.
    pub base_total: Decimal,

    /// Normal slots across all allocations.
    pub normal_slots_used: u32,

    /// Emergency slots across all allocations.
    pub emergency_slots_used: u32,

    /// Sum of emergency surcharges across all allocations.
    pub emergency_surcharge: Decimal,

    /// `base_total + emergency_surcharge`.
    pub total: Decimal,
}

impl PriceBreakdown {
    /// Total in minor currency units (cents).
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit an `i64`.
    pub fn total_minor_units(&self) -> Result<i64, PricingError> {
        self.total
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|minor| minor.to_i64())
            .ok_or(PricingError::Overflow)
    }
}

/// Compose the price of an order line from its unit price, quantity and the
/// allocations it books.
///
/// # Errors
///
/// Returns an error for a zero quantity, a negative input or overflow.
pub fn order_price(
    unit_price: Decimal,
    quantity: u32,
    allocations: &[AllocationCharge],
) -> Result<PriceBreakdown, PricingError> {
    if quantity == 0 {
        return Err(PricingError::ZeroQuantity);
    }

    if unit_price < Decimal::ZERO {
        return Err(PricingError::NegativeAmount("unit price"));
    }

    let base_total = unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)?;

    let mut emergency_surcharge = Decimal::ZERO;
    let mut normal_slots_used: u32 = 0;
    let mut emergency_slots_used: u32 = 0;

    for allocation in allocations {
        if allocation.emergency_slot_cost < Decimal::ZERO {
            return Err(PricingError::NegativeAmount("emergency slot cost"));
        }

        let surcharge = allocation
            .emergency_slot_cost
            .checked_mul(Decimal::from(allocation.emergency_slots_used))
            .ok_or(PricingError::Overflow)?;

        emergency_surcharge = emergency_surcharge
            .checked_add(surcharge)
            .ok_or(PricingError::Overflow)?;

        normal_slots_used = normal_slots_used
            .checked_add(allocation.normal_slots_used)
            .ok_or(PricingError::Overflow)?;

        emergency_slots_used = emergency_slots_used
            .checked_add(allocation.emergency_slots_used)
            .ok_or(PricingError::Overflow)?;
    }

    let total = base_total
        .checked_add(emergency_surcharge)
        .ok_or(PricingError::Overflow)?;

    Ok(PriceBreakdown {
        unit_price: round_money(unit_price),
        quantity,
        base_total: round_money(base_total),
        normal_slots_used,
        emergency_slots_used,
        emergency_surcharge: round_money(emergency_surcharge),
        total: round_money(total),
    })
}

/// Round to cents, midpoint away from zero, always carrying two decimals.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    rounded
}
