// # pbddns-core
//
// Core library for the pbddns dynamic DNS updater.
//
// ## Architecture Overview
//
// One run is a straight pipeline against the provider's HTTP API:
// - **DnsProvider**: Trait for the four remote calls (ping, retrieve, delete, create)
// - **DomainName**: Splits the target FQDN into root domain and subdomain prefix
// - **plan_reconciliation**: Pure decision of which records to delete and whether to create
// - **DdnsEngine**: Runs ping → retrieve → plan → mutate and reports progress as events
//
// ## Design Principles
//
// 1. **Library-First**: The binary only parses arguments, sets up logging and maps exit codes
// 2. **No hidden state**: Config is immutable, nothing is cached or persisted between runs
// 3. **Errors propagate**: Nothing below `main` terminates the process

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use config::{ApiCredentials, DdnsConfig, ReconcilePolicy};
pub use domain::DomainName;
pub use engine::{DdnsEngine, EngineEvent, ReconcilePlan, RunSummary, plan_reconciliation};
pub use error::{Error, Result};
pub use record::{DEFAULT_TTL, DnsRecord, NewRecord, RecordType};
pub use traits::{DnsProvider, ProviderResponse};
