//! Marketboard Test Utils
//!
//! Shared testing utilities for the marketboard server. Provides a builder for test contexts
//! backed by in-memory SQLite databases, plus factories that seed ads and users with sensible
//! defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders inserting `ad` and `user` rows
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn lists_ads() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new()
//!         .with_marketplace_tables()
//!         .build()
//!         .await
//!         .unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let ad = factory::ad::create_ad(db).await?;
//!     // Perform queries against `db`...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
