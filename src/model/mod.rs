//! Wire-format DTOs shared by every API endpoint.

pub mod ad;
pub mod api;
pub mod blacklist;
