//! Request middleware: mini-app authentication and rate limiting.

pub mod auth;
pub mod rate_limit;
