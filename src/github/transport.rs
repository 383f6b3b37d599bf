//! HTTP transport seam.
//!
//! One trait, one production implementation. The trait exists so the retry
//! and pagination logic in [`crate::github::client`] can be exercised against
//! scripted responses without a network.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use reqwest::header;

use crate::config::HttpSettings;
use crate::error::{FetchError, FetchResult};

/// One HTTP response, reduced to the parts the fetch loop inspects.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
}

impl HttpResponse {
    pub fn new(status: u16, headers: &[(&str, &str)], body: impl Into<String>) -> Self {
        Self {
            status,
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
                .collect(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Executes a single GET against the API.
///
/// Implementations do no retrying of their own; resilience lives one layer up
/// in the request executor. Any error returned here is treated as transient
/// (connection refused, timeout, TLS failure), mirroring how status-level
/// failures come back as an `Ok` response carrying the status.
pub trait Transport {
    fn get(&self, url: &str) -> FetchResult<HttpResponse>;
}

/// Production transport backed by a blocking reqwest client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    token: Option<String>,
}

impl ReqwestTransport {
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            token: settings.token.clone(),
        })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> FetchResult<HttpResponse> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

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
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
