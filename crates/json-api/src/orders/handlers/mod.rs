pub(crate) mod admin_get;
pub(crate) mod admin_index;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;
