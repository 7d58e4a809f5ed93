//! Restaurant Hub - restaurant marketplace core
//!
//! Owners submit restaurants, admins approve, reject or remove them, and
//! customers browse, order, review and favorite approved restaurants. Every
//! lifecycle transition and its cascades (favorites cleanup, order
//! cancellation, review archival, notifications) commit as one atomic unit.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: The JSON-backed store and its Unit of Work
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve --port 3000
//!
//! # Review the approval queue
//! cargo run -- pending
//! cargo run -- reject <id> --reason "Incomplete information"
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Restaurant, RestaurantStatus, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::{Persistence, UnitOfWork};
pub use services::{ServiceContainer, Services};
