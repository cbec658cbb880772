//! Vestry
//!
//! Domain rules for the vestry storefront: delivery-slot capacity accounting,
//! garment price calculation, calendar ranges and the order lifecycle.
//!
//! Nothing in this crate performs I/O. Persistence and transport live in
//! `vestry-app` and `vestry-json`.

pub mod calendar;
pub mod orders;
pub mod pricing;
pub mod slots;
