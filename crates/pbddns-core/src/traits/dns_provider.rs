// # DNS Provider Trait
//
// Defines the four remote operations a run needs from a DNS provider.
//
// ## Implementations
//
// - Porkbun-style JSON API: `pbddns-provider-porkbun` crate
//
// ## Usage
//
// ```rust,ignore
// use pbddns_core::DnsProvider;
//
// let ip = provider.ping().await?;
// let records = provider.retrieve_records("example.com").await?;
// ```

use crate::error::Result;
use crate::record::{DnsRecord, NewRecord};
use async_trait::async_trait;

/// Raw body returned by a mutating call.
///
/// Delete and create responses are not interpreted; they are only logged.
pub type ProviderResponse = serde_json::Value;

/// Trait for DNS provider implementations
///
/// # Contract
///
/// - One HTTP request per method call; no retries, no caching.
/// - `retrieve_records` is the domain precondition check: a provider-reported
///   error must surface as [`crate::Error::DomainRejected`].
/// - `delete_record` and `create_record` return `Ok` whenever the provider
///   answered, even if the answer reports a failure. Only transport errors
///   are `Err`.
/// - Implementations never decide which records to touch; that is the
///   engine's job.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Ask the provider which public IP address the caller appears to have
    async fn ping(&self) -> Result<String>;

    /// List all records under `root_domain`, in the order the provider
    /// returns them
    async fn retrieve_records(&self, root_domain: &str) -> Result<Vec<DnsRecord>>;

    /// Delete record `record_id` from `root_domain`
    async fn delete_record(&self, root_domain: &str, record_id: &str) -> Result<ProviderResponse>;

    /// Create `record` under `root_domain`
    async fn create_record(&self, root_domain: &str, record: &NewRecord)
        -> Result<ProviderResponse>;

    /// Provider name for logging (e.g. "porkbun")
    fn provider_name(&self) -> &'static str;
}
