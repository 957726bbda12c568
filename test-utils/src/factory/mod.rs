//! Factory methods for creating test rows.
//!
//! Each table has a `Factory` builder for customization and a `create_*` shortcut that
//! inserts a row with defaults.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let row = factory::guild_setting::GuildSettingFactory::new(&db)
//!     .guild_id("1000")
//!     .key("prefix")
//!     .value("!")
//!     .build()
//!     .await?;
//! ```

pub mod guild_setting;
