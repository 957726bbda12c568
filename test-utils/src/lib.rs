//! Guild Dashboard Test Utils
//!
//! Shared testing utilities for the dashboard. Provides a builder for test contexts backed
//! by an in-memory SQLite database with the requested tables, plus factories for inserting
//! rows with sensible defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::GuildSetting;
//!
//! #[tokio::test]
//! async fn stores_override() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(GuildSetting)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
