//! SeaORM entity models for the marketplace store.

pub mod prelude;

pub mod ad;
pub mod user;
