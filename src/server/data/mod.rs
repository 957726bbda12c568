//! Database repository layer.
//!
//! Repositories wrap SeaORM queries for a single table and return entity models; the
//! service layer turns them into domain types.

pub mod guild_setting;

#[cfg(test)]
mod test;
