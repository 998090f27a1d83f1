//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` struct for
//! customization and a `create_*` convenience function for quick default
//! creation. Factories generate unique identifiers automatically so that
//! tests do not collide on unique columns.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Create with defaults
//! let listing = factory::server_listing::create_listing(&db).await?;
//!
//! // Customize through the builder
//! let stat = factory::user_stat::UserStatFactory::new(&db)
//!     .player_name("Helldiver One")
//!     .kills(300)
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod server_listing;
pub mod sos_record;
pub mod user_stat;

// Re-export commonly used factory functions for concise usage
pub use server_listing::create_listing;
pub use sos_record::create_sos_record;
pub use user_stat::create_user_stat;
