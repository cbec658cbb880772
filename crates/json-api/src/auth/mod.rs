//! Authentication and authorization hoops.

pub(crate) mod admin;
pub(crate) mod middleware;
pub(crate) mod webhook;
