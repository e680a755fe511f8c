//! Core traits
//!
//! - [`DnsProvider`]: the remote operations a run needs from a DNS provider

pub mod dns_provider;

pub use dns_provider::{DnsProvider, ProviderResponse};
