//! DNS record model
//!
//! Records are owned by the provider. They are decoded from API responses,
//! inspected, and referenced by id when deleting; nothing is stored locally.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Fixed time-to-live for records created by pbddns (seconds)
pub const DEFAULT_TTL: u32 = 300;

/// A DNS record as listed by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Provider record id; may arrive as a JSON string or number
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Fully-qualified record name (e.g. `www.example.com`)
    pub name: String,

    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Record answer (address for A records, target for CNAME/ALIAS)
    #[serde(default)]
    pub content: String,

    /// Time-to-live in seconds
    #[serde(default, deserialize_with = "optional_u32")]
    pub ttl: Option<u32>,

    /// Any other provider-specific fields (`prio`, `notes`, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DnsRecord {
    /// Create a record with no extra fields
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        record_type: RecordType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            record_type,
            content: content.into(),
            ttl: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// DNS record type.
///
/// Only A, ALIAS and CNAME take part in reconciliation; every other type is
/// carried through as [`RecordType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    A,
    Alias,
    Cname,
    Other(String),
}

impl RecordType {
    /// Whether records of this type point a name at an address and can
    /// therefore conflict with the A record pbddns maintains.
    pub fn is_address_like(&self) -> bool {
        matches!(self, Self::A | Self::Alias | Self::Cname)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Alias => "ALIAS",
            Self::Cname => "CNAME",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "A" => Self::A,
            "ALIAS" => Self::Alias,
            "CNAME" => Self::Cname,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields of a record to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecord {
    /// Subdomain prefix (empty for the apex)
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub content: String,
    pub ttl: u32,
}

impl NewRecord {
    /// An A record for `sub_domain` pointing at `ip` with [`DEFAULT_TTL`]
    pub fn a(sub_domain: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            name: sub_domain.into(),
            record_type: RecordType::A,
            content: ip.into(),
            ttl: DEFAULT_TTL,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn optional_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid ttl: {}", n))),
        serde_json::Value::String(s) if s.is_empty() => Ok(None),
        serde_json::Value::String(s) => s
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid ttl: {}", s))),
        other => Err(serde::de::Error::custom(format!("invalid ttl: {}", other))),
    }
}
