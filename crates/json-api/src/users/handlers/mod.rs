pub(crate) mod index;
pub(crate) mod me;
pub(crate) mod role;
pub(crate) mod update_me;
