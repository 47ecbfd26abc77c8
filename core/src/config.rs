//! Client configuration.
//!
//! Defaults point at the production API. `from_env` lets deployments and
//! local runs against the mock server override them.

use std::time::Duration;

use crate::endpoint::{Environment, DEFAULT_TIMEOUT, PRODUCTION_BASE_URL};
use crate::error::{ApiError, Result};

/// Signing token the production API expects in the `sign` query parameter.
pub const DEFAULT_SIGN: &str = "a7f3d9b2c5e8g1h6i4j0k7l3m9n2o5p8q1r6s4t0u";

pub const BASE_URL_VAR: &str = "SC_API_BASE_URL";
pub const SIGN_VAR: &str = "SC_API_SIGN";
pub const TIMEOUT_VAR: &str = "SC_API_TIMEOUT_SECS";

/// Settings needed to reach the challenge API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub sign: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: PRODUCTION_BASE_URL.to_string(),
            sign: DEFAULT_SIGN.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `SC_API_BASE_URL`: API root (default: production)
    /// - `SC_API_SIGN`: signing token
    /// - `SC_API_TIMEOUT_SECS`: per-call timeout in whole seconds (default: 30)
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Configuration` if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(sign) = lookup(SIGN_VAR) {
            config.sign = sign;
        }
        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ApiError::Configuration(format!("{TIMEOUT_VAR}={raw:?} is not a positive integer")))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// The environment every request built from this config runs in.
    pub fn environment(&self) -> Environment {
        Environment::new(self.base_url.clone())
            .with_timeout(self.timeout)
            .with_json_content_type()
    }
}
