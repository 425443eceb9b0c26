//! Runtime configuration read from the process environment.
//!
//! | Variable          | Required | Default                                          |
//! |-------------------|----------|--------------------------------------------------|
//! | `GOOGLE_API_KEY`  | yes      |                                                  |
//! | `LISTEN_ADDR`     | no       | `0.0.0.0:8787`                                   |
//! | `SHEETS_API_BASE` | no       | `https://sheets.googleapis.com/v4/spreadsheets`  |

use std::fmt;

use thiserror::Error;
use url::Url;

use crate::sheets::client::DEFAULT_API_BASE;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const LISTEN_ADDR_VAR: &str = "LISTEN_ADDR";
pub const API_BASE_VAR: &str = "SHEETS_API_BASE";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {name} must be set")]
    Missing { name: &'static str },

    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Everything the binary needs to start.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub listen_addr: String,
    pub api_base: Url,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var(API_KEY_VAR).ok_or(ConfigError::Missing { name: API_KEY_VAR })?;
        let listen_addr = var(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let api_base = var(API_BASE_VAR).unwrap_or_else(|| DEFAULT_API_BASE.to_owned());
        let api_base = Url::parse(&api_base).map_err(|source| ConfigError::InvalidUrl {
            name: API_BASE_VAR,
            source,
        })?;

        Ok(Self {
            api_key,
            listen_addr,
            api_base,
        })
    }
}

// The API key must never reach the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("listen_addr", &self.listen_addr)
            .field("api_base", &self.api_base.as_str())
            .finish()
    }
}
