//! Extension traits

mod depot;
mod params;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use params::{DateParamExt as _, check_count, parse_date, parse_money};
pub(crate) use result::ResultExt as _;
