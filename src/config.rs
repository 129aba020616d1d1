//! Runtime configuration for a board client.
//!
//! Every setting has a default matching the hosted deployment, so most
//! callers use [`BoardConfig::default`]. [`BoardConfig::from_env`] overlays
//! `TRELLIS_*` environment variables on top of the defaults.

use thiserror::Error;

/// Environment variable overriding [`BoardConfig::tasks_table`].
pub const TASKS_TABLE_VAR: &str = "TRELLIS_TASKS_TABLE";
/// Environment variable overriding [`BoardConfig::due_soon_days`].
pub const DUE_SOON_DAYS_VAR: &str = "TRELLIS_DUE_SOON_DAYS";
/// Environment variable overriding [`BoardConfig::login_path`].
pub const LOGIN_PATH_VAR: &str = "TRELLIS_LOGIN_PATH";
/// Environment variable overriding [`BoardConfig::home_path`].
pub const HOME_PATH_VAR: &str = "TRELLIS_HOME_PATH";

/// Board client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Table whose change notifications trigger a refresh.
    pub tasks_table: String,
    /// Length of the due-soon window in days, counted from today.
    pub due_soon_days: u32,
    /// Path of the sign-in page.
    pub login_path: String,
    /// Path signed-in users land on.
    pub home_path: String,
    /// Path prefixes served without a session check (static assets).
    pub public_prefixes: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tasks_table: "tasks".to_owned(),
            due_soon_days: 7,
            login_path: "/login".to_owned(),
            home_path: "/".to_owned(),
            public_prefixes: vec![
                "/_next/static".to_owned(),
                "/_next/image".to_owned(),
                "/favicon.ico".to_owned(),
            ],
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {variable}: {reason}")]
    InvalidValue {
        /// Variable name.
        variable: &'static str,
        /// Raw value found.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl BoardConfig {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads overrides through `lookup`, which maps a variable name to its
    /// value when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a
    /// malformed value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(table) = lookup(TASKS_TABLE_VAR) {
            config.tasks_table = non_blank(TASKS_TABLE_VAR, table)?;
        }
        if let Some(days) = lookup(DUE_SOON_DAYS_VAR) {
            config.due_soon_days = days.trim().parse().map_err(|_| ConfigError::InvalidValue {
                variable: DUE_SOON_DAYS_VAR,
                value: days.clone(),
                reason: "expected a non-negative whole number of days",
            })?;
        }
        if let Some(path) = lookup(LOGIN_PATH_VAR) {
            config.login_path = absolute_path(LOGIN_PATH_VAR, path)?;
        }
        if let Some(path) = lookup(HOME_PATH_VAR) {
            config.home_path = absolute_path(HOME_PATH_VAR, path)?;
        }
        Ok(config)
    }
}

fn non_blank(variable: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            variable,
            value,
            reason: "must not be blank",
        });
    }
    Ok(trimmed.to_owned())
}

fn absolute_path(variable: &'static str, value: String) -> Result<String, ConfigError> {
    let path = non_blank(variable, value)?;
    if !path.starts_with('/') {
        return Err(ConfigError::InvalidValue {
            variable,
            value: path,
            reason: "must start with '/'",
        });
    }
    Ok(path)
}
