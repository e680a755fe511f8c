// # Porkbun DNS Provider
//
// This crate provides a `DnsProvider` over the Porkbun JSON API (v3).
//
// Every call is a POST whose JSON body carries the API key pair, plus the
// record fields for `dns/create`:
//
// - Ping:            POST `{endpoint}/ping`
// - Retrieve:        POST `{endpoint}/dns/retrieve/{domain}`
// - Delete:          POST `{endpoint}/dns/delete/{domain}/{id}`
// - Create:          POST `{endpoint}/dns/create/{domain}`
//
// Porkbun reports failures in the body as `{"status": "ERROR", "message": ...}`,
// usually alongside an HTTP 400, so bodies are read regardless of the HTTP
// status.
//
// ## Security
//
// - API keys NEVER appear in logs or `Debug` output
// - Keys travel in the request body only, never in URLs
//
// ## Dry-Run Mode
//
// In dry-run mode `ping` and `retrieve` are sent as usual, while delete and
// create requests are logged instead of sent.

mod types;

use async_trait::async_trait;
use pbddns_core::{
    ApiCredentials, DdnsConfig, DnsProvider, DnsRecord, Error, NewRecord, ProviderResponse, Result,
};
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use types::{AuthRequest, CreateRequest, PingResponse, RetrieveResponse, STATUS_ERROR};

const PROVIDER_NAME: &str = "porkbun";

/// Public Porkbun API base URL
pub const PORKBUN_API_BASE: &str = "https://api.porkbun.com/api/json/v3";

/// Message logged when the provider refuses a domain without saying why
const DOMAIN_REJECTED_HINT: &str = "Error getting domain. Check to make sure you specified the \
     correct domain, and that API access has been switched on for this domain.";

/// Porkbun DNS provider
pub struct PorkbunProvider {
    /// API base URL without trailing slash
    endpoint: String,

    /// API key pair
    credentials: ApiCredentials,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Dry-run mode: if true, skip delete and create requests
    dry_run: bool,
}

// Custom Debug implementation that hides the API keys
impl std::fmt::Debug for PorkbunProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PorkbunProvider")
            .field("endpoint", &self.endpoint)
            .field("credentials", &"<REDACTED>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl PorkbunProvider {
    /// Create a new Porkbun provider from a validated configuration
    ///
    /// No request timeout is set; the transport default applies.
    pub fn new(config: &DdnsConfig, dry_run: bool) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("pbddns/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
            client,
            dry_run,
        })
    }

    /// Create a provider that sends every request
    pub fn new_live(config: &DdnsConfig) -> Result<Self> {
        Self::new(config, false)
    }

    /// Create a provider that logs delete and create requests instead of
    /// sending them
    pub fn new_dry_run(config: &DdnsConfig) -> Result<Self> {
        Self::new(config, true)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    fn auth(&self) -> AuthRequest<'_> {
        AuthRequest {
            credentials: &self.credentials,
        }
    }

    /// POST a JSON body and return the HTTP status with the raw response text
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(StatusCode, String)> {
        tracing::debug!("POST {}", path);

        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::http(format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read {} response: {}", path, e)))?;

        tracing::debug!("{} answered {}: {}", path, status, text);
        Ok((status, text))
    }

    /// POST and decode the body as `T`
    async fn post_decode<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let (status, text) = self.post(path, body).await?;

        serde_json::from_str(&text).map_err(|e| {
            Error::unexpected(
                PROVIDER_NAME,
                format!("Failed to parse {} response (HTTP {}): {}", path, status, e),
            )
        })
    }

    /// POST a mutating request and hand back whatever came back.
    ///
    /// A body that is not JSON is returned as a JSON string.
    async fn post_raw<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ProviderResponse> {
        let (_, text) = self.post(path, body).await?;
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }
}

#[async_trait]
impl DnsProvider for PorkbunProvider {
    async fn ping(&self) -> Result<String> {
        tracing::debug!("Getting external IP address");

        let response: PingResponse = self.post_decode("ping", &self.auth()).await?;

        if response.status.as_deref() == Some(STATUS_ERROR) {
            return Err(Error::unexpected(
                PROVIDER_NAME,
                format!(
                    "ping failed: {}",
                    response.message.as_deref().unwrap_or("no message")
                ),
            ));
        }

        response
            .your_ip
            .ok_or_else(|| Error::unexpected(PROVIDER_NAME, "ping response lacks yourIp"))
    }

    async fn retrieve_records(&self, root_domain: &str) -> Result<Vec<DnsRecord>> {
        tracing::debug!("Getting existing domain records");

        let path = format!("dns/retrieve/{}", root_domain);
        let response: RetrieveResponse = self.post_decode(&path, &self.auth()).await?;

        if response.status == STATUS_ERROR {
            let message = response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DOMAIN_REJECTED_HINT.to_string());
            return Err(Error::domain_rejected(root_domain, message));
        }

        response.records.ok_or_else(|| {
            Error::unexpected(PROVIDER_NAME, "retrieve response lacks records")
        })
    }

    async fn delete_record(&self, root_domain: &str, record_id: &str) -> Result<ProviderResponse> {
        let path = format!("dns/delete/{}/{}", root_domain, record_id);

        if self.dry_run {
            tracing::info!("[DRY-RUN] Would send POST {}", path);
            return Ok(serde_json::json!({ "status": "DRY_RUN" }));
        }

        self.post_raw(&path, &self.auth()).await
    }

    async fn create_record(&self, root_domain: &str, record: &NewRecord) -> Result<ProviderResponse> {
        let path = format!("dns/create/{}", root_domain);

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send POST {} with record: {}",
                path,
                serde_json::to_string(record)?
            );
            return Ok(serde_json::json!({ "status": "DRY_RUN" }));
        }

        let body = CreateRequest {
            credentials: &self.credentials,
            record,
        };
        self.post_raw(&path, &body).await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
