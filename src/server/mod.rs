//! Dashboard web server, Discord bot integration and business logic.
//!
//! # Architecture
//!
//! The server follows a layered architecture:
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, access control and page shaping
//! - **Service Layer** (`service/`) - Member listing, settings, statistics and OAuth
//! - **Data Layer** (`data/`) - Guild settings persistence through SeaORM
//! - **Model Layer** (`model/`) - Domain snapshots of guilds, members, sessions and settings
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Typed session state and the authentication gate
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based configuration injected at startup
//! - **State** (`state`) - Shared application state (database, bot client, identity provider)
//! - **Startup** (`startup`) - Logging, database, session and OAuth client initialization
//! - **Router** (`router`) - Axum route table
//! - **Bot** (`bot/`) - Serenity gateway client, cache snapshots and prefix commands
//!
//! # Request Flow
//!
//! 1. **Router** dispatches the request to a controller
//! 2. **Middleware** resolves the session and, for management pages, enforces login
//! 3. **Controller** resolves the guild and checks manage permission
//! 4. **Service** reads the bot snapshot or the settings store
//! 5. **Controller** renders a template, returns JSON, or redirects

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
pub mod view;
