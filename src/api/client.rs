use log::{debug, info};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;

use super::builder::{self, LookupPlan, SubRequest};
use super::fanout::{join_with_policy, Task};
use super::http_client::{HttpGet, HttpResponse, ReqwestHttpClient};
use super::request::RequestDescriptor;
use super::types::{NameSearchOptions, NumberOptions, ResponseType};
use super::ApiType;
use crate::error::{CompanyInfoError, Result};

/// Resolved client configuration. One backend per client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_type: ApiType,
    /// Protocol version, used in MOF paths
    pub version: String,
    pub response_type: ResponseType,
    pub base_url: String,
    /// MOF application ID or gBizINFO API token, depending on `api_type`
    pub credential: String,
    /// Request timeout in seconds
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_type: ApiType::Mof,
            version: "4".to_string(),
            response_type: ResponseType::XmlUnicode,
            base_url: ApiType::Mof.default_base_url().to_string(),
            credential: String::new(),
            timeout: 30,
            user_agent: format!("company-info/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// MOF configuration with the default base URL
    pub fn mof(
        application_id: impl Into<String>,
        version: impl Into<String>,
        response_type: ResponseType,
    ) -> Self {
        Self {
            credential: application_id.into(),
            version: version.into(),
            response_type,
            ..Default::default()
        }
    }

    /// gBizINFO configuration with the default base URL
    pub fn meti(token: impl Into<String>) -> Self {
        Self {
            api_type: ApiType::Meti,
            version: "1".to_string(),
            response_type: ResponseType::Json,
            base_url: ApiType::Meti.default_base_url().to_string(),
            credential: token.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Numeric protocol version, if it parses (`"4"` and `"4.0"` alike)
    pub fn version_number(&self) -> Option<f64> {
        self.version
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    pub fn is_configured(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    /// Credential with everything past the first five characters hidden
    pub fn masked_credential(&self) -> String {
        let prefix: String = self.credential.chars().take(5).collect();
        format!("{}...", prefix)
    }
}

/// Response body as returned by the backend, or the composite for detailed lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Vec<u8>);

impl Payload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Body as UTF-8 text. Shift-JIS CSV bodies are decoded lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }

    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.0)?)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Corporate registry client over the MOF and gBizINFO APIs
pub struct CompanyInfoClient {
    config: ClientConfig,
    http: Arc<dyn HttpGet>,
}

impl CompanyInfoClient {
    /// Create a client on the reqwest capability
    pub fn new(config: ClientConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout);
        let http = ReqwestHttpClient::new(timeout, &config.user_agent)?;
        Ok(Self::with_http(config, Arc::new(http)))
    }

    /// Create a client on an injected HTTP capability
    pub fn with_http(config: ClientConfig, http: Arc<dyn HttpGet>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api_type(&self) -> ApiType {
        self.config.api_type
    }

    /// Look up one or more corporate numbers (comma-joined, up to 10 on MOF).
    ///
    /// A detailed gBizINFO lookup returns a JSON object with `basic` and one
    /// field per sub-resource; sub-resources that failed hold
    /// `{"error": "Failed to fetch <path>"}`.
    pub async fn search_by_number(&self, number: &str, options: &NumberOptions) -> Result<Payload> {
        match builder::number_search(&self.config, number, options)? {
            LookupPlan::Single(request) => {
                let response = self.fetch(&request).await?;
                Ok(Payload::from(response.body))
            }
            LookupPlan::Detailed { base, details } => self.detailed_lookup(&base, details).await,
        }
    }

    /// Search by corporate name. MOF only.
    pub async fn search_by_name(&self, name: &str, options: &NameSearchOptions) -> Result<Payload> {
        let request = builder::name_search(&self.config, name, options)?;
        let response = self.fetch(&request).await?;
        Ok(Payload::from(response.body))
    }

    async fn detailed_lookup(
        &self,
        base: &RequestDescriptor,
        details: Vec<SubRequest>,
    ) -> Result<Payload> {
        // a failed base lookup ends the call before any sub-resource is requested
        let basic = body_json(&self.fetch(base).await?);

        let tasks = details
            .into_iter()
            .map(|detail| {
                let placeholder = json!({ "error": format!("Failed to fetch {}", detail.path) });
                Task::placeholder(
                    detail.resource.as_str(),
                    placeholder,
                    self.fetch_json(detail.request),
                )
            })
            .collect::<Vec<_>>();
        let labels: Vec<String> = tasks.iter().map(|t| t.label.clone()).collect();

        let settled = join_with_policy(tasks).await?;
        let failed = settled.iter().filter(|s| s.is_placeholder()).count();
        if failed > 0 {
            info!("{} of {} sub-resources could not be fetched", failed, labels.len());
        }

        let mut composite = Map::new();
        composite.insert("basic".to_string(), basic);
        for (label, outcome) in labels.into_iter().zip(settled) {
            composite.insert(label, outcome.into_value());
        }

        Ok(Payload::from(serde_json::to_vec(&Value::Object(composite))?))
    }

    async fn fetch_json(&self, request: RequestDescriptor) -> Result<Value> {
        let response = self.fetch(&request).await?;
        Ok(body_json(&response))
    }

    /// Send one request; status >= 400 becomes an API error
    async fn fetch(&self, request: &RequestDescriptor) -> Result<HttpResponse> {
        let url = request.url();
        debug!("{} {}", request.method, url);
        if self.config.api_type == ApiType::Meti {
            debug!(
                "Auth header: {} {}",
                builder::METI_TOKEN_HEADER,
                self.config.masked_credential()
            );
        }

        let response = self.http.get(&url, &request.headers).await?;
        if response.is_error() {
            debug!("{} returned status {}", url, response.status);
            return Err(CompanyInfoError::api_error(response.status, response.text()));
        }
        debug!(
            "{} returned {} bytes of {}",
            url,
            response.body.len(),
            response.header("content-type").unwrap_or("unknown content")
        );
        Ok(response)
    }
}

/// Parse a body as JSON, keeping non-JSON bodies as a string
fn body_json(response: &HttpResponse) -> Value {
    serde_json::from_slice(&response.body).unwrap_or_else(|_| Value::String(response.text()))
}
