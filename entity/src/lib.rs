//! SeaORM entity models for the dashboard database.

pub mod prelude;

pub mod guild_setting;
