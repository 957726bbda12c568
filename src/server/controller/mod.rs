//! HTTP handlers.
//!
//! Handlers extract the session and request data, call into the service layer and render
//! a template or return JSON. Errors are returned as `AppError` and converted to the
//! matching status code or redirect.

pub mod auth;
pub mod dashboard;
pub mod guild;
pub mod member;
pub mod page;

#[cfg(test)]
mod test;
