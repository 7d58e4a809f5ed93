//! User domain entity and related types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_CUSTOMER, ROLE_OWNER};
use crate::errors::{AppError, AppResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Owner,
    Admin,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn is_owner(&self) -> bool {
        matches!(self, UserRole::Owner)
    }
}

impl TryFrom<&str> for UserRole {
    type Error = AppError;

    fn try_from(s: &str) -> AppResult<Self> {
        match s {
            ROLE_CUSTOMER => Ok(UserRole::Customer),
            ROLE_OWNER => Ok(UserRole::Owner),
            ROLE_ADMIN => Ok(UserRole::Admin),
            other => Err(AppError::validation(format!("Unknown role: {}", other))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Customer => write!(f, "{}", ROLE_CUSTOMER),
            UserRole::Owner => write!(f, "{}", ROLE_OWNER),
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
        }
    }
}

/// User domain entity
///
/// The password is an opaque credential: it is stored as given and never
/// serialized into API responses (see [`UserResponse`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    /// Ids of restaurants this user owns
    #[serde(default)]
    pub restaurants: BTreeSet<String>,
}

impl User {
    pub fn new(email: String, password: String, role: UserRole) -> Self {
        Self {
            email,
            password,
            role,
            restaurants: BTreeSet::new(),
        }
    }

    pub fn owns(&self, restaurant_id: &str) -> bool {
        self.restaurants.contains(restaurant_id)
    }

    /// Drop a restaurant from the owned set. Returns true if it was present.
    pub fn release(&mut self, restaurant_id: &str) -> bool {
        self.restaurants.remove(restaurant_id)
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "owner@example.com")]
    pub email: String,
    pub role: UserRole,
    pub restaurants: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            role: user.role,
            restaurants: user.restaurants.into_iter().collect(),
        }
    }
}
