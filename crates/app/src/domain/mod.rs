//! Vestry Domain Concerns

pub mod available_dates;
pub mod carts;
pub mod contacts;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod users;
