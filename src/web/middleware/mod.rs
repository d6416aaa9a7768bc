//! Tower middleware applied to every route.

pub mod request_id;
pub mod trace;
