//! Response DTOs serialized to the browser.

pub mod api;
pub mod member;
