//! Shared HTTP plumbing for all sites.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::AdapterError;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Connection settings shared by every request of one node run.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Proxy used for both http and https.
    pub proxy: Option<String>,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            proxy: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    /// Build a reqwest client from these settings.
    pub fn build_client(&self) -> Result<Client, AdapterError> {
        let mut builder = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str());

        if let Some(proxy) = self.proxy.as_deref().filter(|p| !p.is_empty()) {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| AdapterError::Config(format!("proxy '{}': {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(builder.build()?)
    }
}

/// GET a page and return its body as text.
pub(crate) async fn get_text(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<String, AdapterError> {
    debug!(url, ?query, "GET");
    let response = client.get(url).query(query).send().await?;

    if !response.status().is_success() {
        return Err(AdapterError::Http(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }

    Ok(response.text().await?)
}

/// GET a JSON endpoint. The body is decoded as UTF-8 whatever the headers say.
pub(crate) async fn get_json(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<Value, AdapterError> {
    debug!(url, ?query, "GET");
    let response = client.get(url).query(query).send().await?;

    if !response.status().is_success() {
        return Err(AdapterError::Http(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| AdapterError::Parse(format!("{} {:?}: {}", url, query, e)))
}
