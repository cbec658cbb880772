//! Available Date Handlers

pub(crate) mod admin_index;
pub(crate) mod bulk;
pub(crate) mod check;
pub(crate) mod cleanup;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;
