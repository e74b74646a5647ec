//! Server-side API backend and business logic.
//!
//! This module contains the complete backend of the marketplace: read endpoints over
//! listings and the blacklist, the photo proxy to the Telegram file host, rate limiting,
//! metrics and error capture. The backend uses Axum as the web framework, SeaORM for
//! database operations and Redis for the shared rate-limit counters.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, outcome recording and DTO conversion
//! - **Service Layer** (`service/`) - Ranking, blacklist checks, photo resolution and rate limiting
//! - **Data Layer** (`data/`) - Database and counter store operations, entity-to-domain conversion
//! - **Model Layer** (`model/`) - Domain models, status derivation and ordering rules
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Mini-app authentication and rate limiting
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, limiter, file host, metrics, reporter)
//! - **Startup** (`startup`) - Initialization of database, Redis, HTTP client and collaborators
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Cron job refreshing the business gauges
//! - **Metrics** (`metrics`) - Prometheus registry and recording helpers
//! - **Report** (`report`) - Fire-and-forget error reporting
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request
//! 2. **Middleware** applies rate limiting and, for `/api` JSON routes, authentication
//! 3. **Controller** extracts parameters and calls the service
//! 4. **Service** executes business logic, orchestrates data operations
//! 5. **Data** queries the database, converts entities to domain models
//! 6. **Controller** converts domain models to DTOs and records the outcome

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod model;
pub mod report;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
