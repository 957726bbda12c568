//! Snapshots of Discord state taken from the bot cache.
//!
//! These are plain owned structs so request handlers never hold a cache lock while
//! filtering, sorting or rendering.

pub mod channel;
pub mod guild;
pub mod member;
pub mod role;

pub use channel::{Channel, ChannelKind};
pub use guild::Guild;
pub use member::{DiscordUser, Member, PresenceStatus};
pub use role::Role;

/// Milliseconds between the Unix epoch and the Discord epoch (2015-01-01).
const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// Creation time encoded in a Discord snowflake, as Unix milliseconds.
pub fn snowflake_timestamp_ms(id: u64) -> i64 {
    ((id >> 22) as i64) + DISCORD_EPOCH_MS
}
