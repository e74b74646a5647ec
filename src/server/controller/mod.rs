//! HTTP request handlers.
//!
//! Handlers extract request parameters, call into the service layer and convert domain
//! models into DTOs. Every API handler finishes through [`observer::Observation`] so that
//! request metrics and error reports are recorded in one place.

pub mod ad;
pub mod blacklist;
pub mod health;
pub mod observer;
pub mod photo;
pub mod profile;
