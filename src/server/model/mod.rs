//! Server-side domain models and parameter types.
//!
//! Domain models are snapshots or parameter types used by the service layer. They are
//! converted from bot cache structures or entity models at the edges and shaped into
//! template data or DTOs by the controllers.

pub mod discord;
pub mod member_list;
pub mod settings;
pub mod stats;
pub mod user;
