//! Core DDNS engine
//!
//! The DdnsEngine runs one reconciliation pass:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌───────────┐    ┌──────────────────┐
//! │   ping   │───▶│ retrieve │───▶│   plan    │───▶│ delete* create?  │
//! └──────────┘    └──────────┘    └───────────┘    └──────────────────┘
//!   current IP      records        pure decision     provider mutations
//! ```
//!
//! Every provider call is awaited before the next one starts. The first
//! error ends the pass; nothing is retried.
//!
//! Progress is reported on the [`EngineEvent`] channel returned by
//! [`DdnsEngine::new`]. The engine itself only emits `tracing` debug output.

pub mod plan;

pub use plan::{ReconcilePlan, plan_reconciliation, record_matches};

use crate::config::{DdnsConfig, ReconcilePolicy};
use crate::domain::DomainName;
use crate::error::{Error, Result};
use crate::record::RecordType;
use crate::traits::{DnsProvider, ProviderResponse};
use tokio::sync::mpsc;
use tracing::debug;

/// Events emitted by the DdnsEngine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The provider reported our public IP
    IpResolved { ip: String },

    /// Records for the root domain were listed
    RecordsListed { root_domain: String, count: usize },

    /// The provider refused to list records; the pass stops here
    DomainRejected { root_domain: String, message: String },

    /// A matching record already points at the IP and is left alone
    RecordKept {
        id: String,
        record_type: RecordType,
        content: String,
    },

    /// A matching record was out of date and a delete was issued
    RecordDeleted {
        id: String,
        record_type: RecordType,
        content: String,
        response: ProviderResponse,
    },

    /// A new A record was requested
    RecordCreated {
        name: String,
        content: String,
        response: ProviderResponse,
    },

    /// The pass completed
    Finished { deleted: usize, created: bool },
}

/// Outcome of a completed pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// IP the provider reported
    pub ip: String,
    /// Ids of matching records left in place
    pub kept: Vec<String>,
    /// Ids of records a delete was issued for
    pub deleted: Vec<String>,
    /// Whether a create was issued
    pub created: bool,
}

/// Core DDNS engine
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsEngine::new()`], keep the event receiver
/// 2. Call [`DdnsEngine::run_once()`] for the target domain
/// 3. Drop the engine; the event channel closes
pub struct DdnsEngine {
    /// DNS provider for all remote calls
    provider: Box<dyn DnsProvider>,

    /// Reconcile policy
    policy: ReconcilePolicy,

    /// Event sender for external reporting
    event_tx: mpsc::UnboundedSender<EngineEvent>,
}

impl DdnsEngine {
    /// Create a new engine
    ///
    /// # Returns
    ///
    /// A tuple of (engine, event_receiver) where event_receiver yields engine events
    pub fn new(
        provider: Box<dyn DnsProvider>,
        config: &DdnsConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<EngineEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::unbounded_channel();

        let engine = Self {
            provider,
            policy: config.policy,
            event_tx: tx,
        };

        Ok((engine, rx))
    }

    /// Bring the provider's records for `target` in line with the current IP
    ///
    /// # Returns
    ///
    /// - `Ok(RunSummary)`: every planned call was issued
    /// - `Err(Error::DomainRejected)`: the provider refused the root domain;
    ///   no record was touched
    /// - `Err(Error)`: a transport or parse failure ended the pass
    pub async fn run_once(&self, target: &DomainName) -> Result<RunSummary> {
        let root_domain = target.root_domain();
        let sub_domain = target.sub_domain();

        let ip = self.provider.ping().await?;
        debug!("{} reports public IP {}", self.provider.provider_name(), ip);
        self.emit_event(EngineEvent::IpResolved { ip: ip.clone() });

        let records = match self.provider.retrieve_records(root_domain).await {
            Ok(records) => records,
            Err(Error::DomainRejected { domain, message }) => {
                self.emit_event(EngineEvent::DomainRejected {
                    root_domain: domain.clone(),
                    message: message.clone(),
                });
                return Err(Error::DomainRejected { domain, message });
            }
            Err(e) => return Err(e),
        };
        self.emit_event(EngineEvent::RecordsListed {
            root_domain: root_domain.to_string(),
            count: records.len(),
        });

        let plan = plan_reconciliation(&ip, sub_domain, &records, self.policy);
        debug!(
            "Plan for {}: keep {}, delete {}, create {}",
            target,
            plan.kept.len(),
            plan.deletions.len(),
            plan.create.is_some()
        );

        for record in &plan.kept {
            self.emit_event(EngineEvent::RecordKept {
                id: record.id.clone(),
                record_type: record.record_type.clone(),
                content: record.content.clone(),
            });
        }

        let mut deleted = Vec::with_capacity(plan.deletions.len());
        for record in &plan.deletions {
            let response = self.provider.delete_record(root_domain, &record.id).await?;
            debug!("Delete {} response: {}", record.id, response);
            deleted.push(record.id.clone());
            self.emit_event(EngineEvent::RecordDeleted {
                id: record.id.clone(),
                record_type: record.record_type.clone(),
                content: record.content.clone(),
                response,
            });
        }

        let created = match &plan.create {
            Some(new_record) => {
                let response = self.provider.create_record(root_domain, new_record).await?;
                debug!("Create {} response: {}", target, response);
                self.emit_event(EngineEvent::RecordCreated {
                    name: new_record.name.clone(),
                    content: new_record.content.clone(),
                    response,
                });
                true
            }
            None => false,
        };

        self.emit_event(EngineEvent::Finished {
            deleted: deleted.len(),
            created,
        });

        Ok(RunSummary {
            kept: plan.kept.iter().map(|r| r.id.clone()).collect(),
            ip,
            deleted,
            created,
        })
    }

    /// Emit an engine event
    fn emit_event(&self, event: EngineEvent) {
        if self.event_tx.send(event).is_err() {
            // Nobody is listening; reporting is optional
            debug!("Event receiver dropped, event discarded");
        }
    }
}
