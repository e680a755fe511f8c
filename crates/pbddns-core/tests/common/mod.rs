//! Test doubles shared by the contract tests
//!
//! `RecordingProvider` answers from canned data and records every call in
//! order, so tests can assert on the exact sequence a pass issues.

use async_trait::async_trait;
use pbddns_core::{
    ApiCredentials, DdnsConfig, DnsProvider, DnsRecord, Error, NewRecord, ProviderResponse,
    RecordType, Result,
};
use std::sync::{Arc, Mutex};

/// One provider call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Ping,
    Retrieve { root_domain: String },
    Delete { root_domain: String, id: String },
    Create { root_domain: String, record: NewRecord },
}

/// How the mock answers `retrieve_records`
#[derive(Clone)]
pub enum RetrieveAnswer {
    Records(Vec<DnsRecord>),
    Rejected(String),
}

pub struct RecordingProvider {
    ip: String,
    retrieve: RetrieveAnswer,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingProvider {
    pub fn new(ip: &str, records: Vec<DnsRecord>) -> Self {
        Self {
            ip: ip.to_string(),
            retrieve: RetrieveAnswer::Records(records),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rejecting(ip: &str, message: &str) -> Self {
        Self {
            ip: ip.to_string(),
            retrieve: RetrieveAnswer::Rejected(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the call log that stays valid after the provider is boxed
    pub fn calls(&self) -> Arc<Mutex<Vec<Call>>> {
        Arc::clone(&self.calls)
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl DnsProvider for RecordingProvider {
    async fn ping(&self) -> Result<String> {
        self.record(Call::Ping);
        Ok(self.ip.clone())
    }

    async fn retrieve_records(&self, root_domain: &str) -> Result<Vec<DnsRecord>> {
        self.record(Call::Retrieve {
            root_domain: root_domain.to_string(),
        });
        match &self.retrieve {
            RetrieveAnswer::Records(records) => Ok(records.clone()),
            RetrieveAnswer::Rejected(message) => {
                Err(Error::domain_rejected(root_domain, message.clone()))
            }
        }
    }

    async fn delete_record(&self, root_domain: &str, record_id: &str) -> Result<ProviderResponse> {
        self.record(Call::Delete {
            root_domain: root_domain.to_string(),
            id: record_id.to_string(),
        });
        Ok(serde_json::json!({"status": "SUCCESS"}))
    }

    async fn create_record(&self, root_domain: &str, record: &NewRecord) -> Result<ProviderResponse> {
        self.record(Call::Create {
            root_domain: root_domain.to_string(),
            record: record.clone(),
        });
        Ok(serde_json::json!({"status": "SUCCESS", "id": 1000}))
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}

pub fn record(id: &str, name: &str, record_type: &str, content: &str) -> DnsRecord {
    DnsRecord::new(id, name, RecordType::from(record_type), content)
}

pub fn config() -> DdnsConfig {
    DdnsConfig::new("https://api.example/api", ApiCredentials::new("k", "s"))
}

pub fn mutations(calls: &[Call]) -> Vec<Call> {
    calls
        .iter()
        .filter(|c| matches!(c, Call::Delete { .. } | Call::Create { .. }))
        .cloned()
        .collect()
}
