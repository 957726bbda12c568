//! Business logic layer.
//!
//! Services sit between controllers and the data layer or bot client. They take borrowed
//! collaborators so a service is cheap to build per request.

pub mod guild;
pub mod member_list;
pub mod oauth;
pub mod settings;
pub mod stats;
