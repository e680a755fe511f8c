//! Configuration types
//!
//! The configuration is a JSON file holding the provider endpoint and API
//! credentials:
//!
//! ```json
//! {
//!   "endpoint": "https://api.porkbun.com/api/json/v3",
//!   "apikey": "pk1_...",
//!   "secretapikey": "sk1_..."
//! }
//! ```
//!
//! It is loaded once per run and never modified afterwards. Request bodies
//! borrow the credentials instead of extending the config.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdnsConfig {
    /// Provider API base URL (e.g. `https://api.porkbun.com/api/json/v3`)
    pub endpoint: String,

    /// Credentials sent with every provider request
    #[serde(flatten)]
    pub credentials: ApiCredentials,

    /// How stale and correct records are reconciled
    #[serde(default)]
    pub policy: ReconcilePolicy,
}

impl DdnsConfig {
    /// Create a configuration with the default policy
    pub fn new(endpoint: impl Into<String>, credentials: ApiCredentials) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint.into()),
            credentials,
            policy: ReconcilePolicy::default(),
        }
    }

    /// Set the reconcile policy
    pub fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load and validate a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;

        Self::from_json(&raw).map_err(|e| match e {
            Error::Json(err) => {
                Error::config(format!("Invalid config file {}: {}", path.display(), err))
            }
            other => other,
        })
    }

    /// Parse and validate a configuration from a JSON string
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.endpoint = normalize_endpoint(config.endpoint);
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::config("endpoint cannot be empty"));
        }

        if !self.endpoint.starts_with("https://") && !self.endpoint.starts_with("http://") {
            return Err(Error::config(format!(
                "endpoint must use HTTP or HTTPS scheme. Got: {}",
                self.endpoint
            )));
        }

        self.credentials.validate()
    }
}

fn normalize_endpoint(endpoint: String) -> String {
    endpoint.trim().trim_end_matches('/').to_string()
}

/// API key pair required by the provider on every request.
///
/// Serializes to `{"apikey": ..., "secretapikey": ...}`, the shape the
/// provider expects at the top level of each request body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredentials {
    /// Public API key
    pub apikey: String,
    /// Secret API key
    pub secretapikey: String,
}

impl ApiCredentials {
    pub fn new(apikey: impl Into<String>, secretapikey: impl Into<String>) -> Self {
        Self {
            apikey: apikey.into(),
            secretapikey: secretapikey.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.apikey.is_empty() {
            return Err(Error::config("apikey cannot be empty"));
        }
        if self.secretapikey.is_empty() {
            return Err(Error::config("secretapikey cannot be empty"));
        }
        Ok(())
    }
}

// Keys never end up in logs
impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("apikey", &"<REDACTED>")
            .field("secretapikey", &"<REDACTED>")
            .finish()
    }
}

/// What to do with matching records when one already holds the current IP
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcilePolicy {
    /// Keep matching records that already point at the IP and skip creation
    /// if any exist; delete the other matching records.
    #[default]
    KeepCorrect,
    /// Delete every matching record and always create a fresh A record.
    Replace,
}
