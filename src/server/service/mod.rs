//! Service layer for business logic and orchestration.
//!
//! Services sit between the controller (API) layer and the data (repository) layer. They
//! are responsible for:
//!
//! - **Business Logic**: Ranking, bucketing and username normalization rules
//! - **Orchestration**: Combining repository calls with external collaborators such as the
//!   file host and the rate-limit counter store
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod blacklist;
pub mod file_host;
pub mod listing;
pub mod photo;
pub mod rate_limit;
