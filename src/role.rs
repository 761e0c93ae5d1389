//! Current-user role, as supplied by the authentication collaborator.
//!
//! The board only uses the role to decide whether to *offer* edit and
//! delete affordances. The server is the real enforcement point; a
//! crafted request still gets a permission error there.

use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The authenticated user's role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Manages projects and their boards.
    Manager,
    /// Regular project member.
    Member,
}

impl Role {
    /// Whether edit/delete affordances are offered at all.
    #[must_use]
    pub fn can_manage_tasks(self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "MANAGER" => Ok(Role::Manager),
            "MEMBER" => Ok(Role::Member),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
