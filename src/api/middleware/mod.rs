//! API middleware.

mod auth;

pub use auth::{admin_middleware, require_admin};
