//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `pending` / `approved` - Moderation listings
//! - `approve` / `reject` / `remove` - Restaurant moderation
//! - `notifications` - Inspect a user's feed

pub mod args;

pub use args::{Cli, Commands};
