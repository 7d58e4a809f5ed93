//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed items per page
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// User Roles
// =============================================================================

pub const ROLE_CUSTOMER: &str = "customer";

pub const ROLE_OWNER: &str = "owner";

pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Restaurant lifecycle
// =============================================================================

/// Cancellation reason written onto pending orders by the removal cascade
pub const CANCELLATION_REASON_RESTAURANT_REMOVED: &str = "Restaurant removed from platform";

/// Category filter value meaning "no filter"
pub const CATEGORY_ALL: &str = "all";

// =============================================================================
// Money
// =============================================================================

/// Decimal places kept for menu prices and order totals
pub const PRICE_SCALE: u32 = 2;

// =============================================================================
// HTTP
// =============================================================================

/// Request header naming the acting user
pub const CALLER_HEADER: &str = "x-user-email";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Storage
// =============================================================================

/// Default location of the JSON data file
pub const DEFAULT_DATA_FILE: &str = "data/marketplace.json";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;
