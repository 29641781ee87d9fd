//! User model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::non_blank;

/// User model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique across all users
    pub email: String,
}

/// Create user request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

/// Update user request. Absent or blank fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUser {
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(&self.email)
    }

    /// Apply the present fields on top of an existing user
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = self.name() {
            user.name = name.to_string();
        }
        if let Some(email) = self.email() {
            user.email = email.to_string();
        }
    }
}
