//! Environment-backed configuration for the CLI and the live adapter.
//!
//! Reads `.env` via dotenvy, then the process environment. The role
//! arrives from the authentication collaborator; here it is carried in
//! `BOARD_ROLE` alongside the session token.

use std::env;

use thiserror::Error;

use crate::role::Role;

/// Why configuration could not be assembled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("{0} is not set")]
    Missing(&'static str),
    /// A variable is present but unusable.
    #[error("{name} has an invalid value: {reason}")]
    Invalid {
        /// The offending variable.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// Everything the CLI needs to talk to one project's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    /// Bearer token for the session, if any.
    pub api_token: Option<String>,
    /// The project whose board this is.
    pub project_id: String,
    /// The current user's role. Defaults to member.
    pub role: Role,
}

impl BoardConfig {
    /// Loads configuration from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `BOARD_API_URL` or `BOARD_PROJECT_ID`
    /// is missing, or `BOARD_ROLE` is not a known role.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("BOARD_API_URL")
            .ok_or(ConfigError::Missing("BOARD_API_URL"))?
            .trim_end_matches('/')
            .to_string();
        let project_id =
            lookup("BOARD_PROJECT_ID").ok_or(ConfigError::Missing("BOARD_PROJECT_ID"))?;
        let api_token = lookup("BOARD_API_TOKEN");
        let role = match lookup("BOARD_ROLE") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                name: "BOARD_ROLE",
                reason,
            })?,
            None => Role::Member,
        };
        Ok(Self { api_url, api_token, project_id, role })
    }
}
