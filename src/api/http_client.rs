use async_trait::async_trait;
use log::debug;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::error::{CompanyInfoError, Result};

/// Raw HTTP response, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Value of the first header named `name`, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Status >= 400
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Body decoded as UTF-8, lossily
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The HTTP GET capability the client runs on.
///
/// Implementations return `Ok` for every response that arrived, including
/// error statuses, and `Err` only when no response was obtained.
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse>;
}

/// Production capability backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a client with connection pooling and the given timeout
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .user_agent(user_agent)
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(CompanyInfoError::Transport)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpGet for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> Result<HttpResponse> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
