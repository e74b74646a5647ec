//! Domain models and operation-specific parameter types.
//!
//! Repositories convert SeaORM entity models into these types at the data boundary, services
//! operate on them, and controllers convert them into wire DTOs.

pub mod ad;
pub mod user;
