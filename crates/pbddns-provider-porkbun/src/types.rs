//! Porkbun API request and response bodies

use pbddns_core::{ApiCredentials, DnsRecord, NewRecord};
use serde::{Deserialize, Serialize};

/// Value of `status` on a failed call
pub(crate) const STATUS_ERROR: &str = "ERROR";

/// Body of calls that only need authentication (ping, retrieve, delete)
#[derive(Serialize)]
pub(crate) struct AuthRequest<'a> {
    #[serde(flatten)]
    pub credentials: &'a ApiCredentials,
}

/// Body of `dns/create`: credentials with the record fields alongside
#[derive(Serialize)]
pub(crate) struct CreateRequest<'a> {
    #[serde(flatten)]
    pub credentials: &'a ApiCredentials,
    #[serde(flatten)]
    pub record: &'a NewRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PingResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "yourIp")]
    pub your_ip: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RetrieveResponse {
    pub status: String,
    #[serde(default)]
    pub records: Option<Vec<DnsRecord>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_merges_credentials_and_record() {
        let credentials = ApiCredentials::new("k", "s");
        let record = NewRecord::a("www", "1.2.3.4");

        let body = serde_json::to_value(CreateRequest {
            credentials: &credentials,
            record: &record,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "apikey": "k",
                "secretapikey": "s",
                "name": "www",
                "type": "A",
                "content": "1.2.3.4",
                "ttl": 300
            })
        );
    }

    #[test]
    fn retrieve_error_has_no_records() {
        let response: RetrieveResponse = serde_json::from_value(json!({
            "status": "ERROR",
            "message": "Invalid domain."
        }))
        .unwrap();

        assert_eq!(response.status, STATUS_ERROR);
        assert!(response.records.is_none());
        assert_eq!(response.message.as_deref(), Some("Invalid domain."));
    }
}
