//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` builder for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Defaults: active, non-premium, expiring in a week
//! let ad = factory::ad::create_ad(&db).await?;
//!
//! // Customized
//! let premium = factory::ad::AdFactory::new(&db)
//!     .category("services")
//!     .premium(true)
//!     .build()
//!     .await?;
//!
//! let scammer = factory::user::UserFactory::new(&db)
//!     .username("fraudster")
//!     .scammer(true)
//!     .build()
//!     .await?;
//! ```

pub mod ad;
pub mod helpers;
pub mod user;

pub use ad::create_ad;
pub use user::create_user;
