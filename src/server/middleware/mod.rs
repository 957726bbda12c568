//! Session state and request guards.

pub mod auth;
pub mod security_headers;
pub mod session;

#[cfg(test)]
mod test;
