//! Rivne NPP adapter (www.rnpp.rv.ua).
//!
//! The plant publishes JSON through its informer endpoint. Two payloads are
//! requested:
//!
//! - `value=sprutbase`: meteo and ASKRO readings, addressed by the descriptors'
//!   `parameter` keys;
//! - `value=rnpp_current_state_sm`: electricity production for the current
//!   day and month.
//!
//! Only the first payload is required.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::client::get_json;
use crate::graph::{
    Reading, AIR_TEMPERATURE, ATM, HPA_TO_MMHG, HUMIDITY, KILO_TO_MEGA, PRODUCTION_ELECTRICITY,
    RADIOLOGY, RAINFALL_INTENSITY, WIND_SPEED,
};
use crate::{AdapterError, HttpConfig, Plant, SiteAdapter};

const DEFAULT_HOST: &str = "www.rnpp.rv.ua";
const INFORMER_PATH: &str = "/informer/sprut.php";

const BASE_QUERY: &[(&str, &str)] = &[("value", "sprutbase")];
const PRODUCTION_QUERY: &[(&str, &str)] = &[("value", "rnpp_current_state_sm")];

/// Rivne NPP site adapter.
#[derive(Debug, Clone)]
pub struct RnppAdapter {
    client: Client,
    endpoint: String,
}

impl RnppAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> RnppAdapterBuilder {
        RnppAdapterBuilder::default()
    }

    /// Informer URL queried by this adapter.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SiteAdapter for RnppAdapter {
    fn plant(&self) -> Plant {
        Plant::Rnpp
    }

    async fn fetch(&self) -> Result<Vec<Reading>, AdapterError> {
        let base = get_json(&self.client, &self.endpoint, BASE_QUERY).await?;
        let production = get_json(&self.client, &self.endpoint, PRODUCTION_QUERY).await;
        Ok(readings(base, production, &self.endpoint))
    }
}

fn readings(
    base: Value,
    production: Result<Value, AdapterError>,
    endpoint: &str,
) -> Vec<Reading> {
    let mut readings = vec![
        Reading::new(&AIR_TEMPERATURE, base.clone()),
        Reading::new(&HUMIDITY, base.clone()),
        Reading::new(&ATM, base.clone()).with_ratio(HPA_TO_MMHG),
        Reading::new(&RAINFALL_INTENSITY, base.clone()),
        Reading::new(&WIND_SPEED, base.clone()),
        Reading::new(&RADIOLOGY, base),
    ];

    match production {
        Ok(data) => {
            readings.push(Reading::new(&PRODUCTION_ELECTRICITY, data).with_ratio(KILO_TO_MEGA))
        }
        Err(e) => warn!(
            url = endpoint,
            query = ?PRODUCTION_QUERY,
            "electricity production unavailable: {}",
            e
        ),
    }

    readings
}

/// Builder for RnppAdapter.
#[derive(Debug, Default)]
pub struct RnppAdapterBuilder {
    host: Option<String>,
    http: Option<HttpConfig>,
}

impl RnppAdapterBuilder {
    /// Set the host name or base URL (default: "www.rnpp.rv.ua").
    ///
    /// A bare host name is reached over https.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set connection settings.
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<RnppAdapter, AdapterError> {
        let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        Ok(RnppAdapter {
            client: self.http.unwrap_or_default().build_client()?,
            endpoint: informer_url(&host),
        })
    }
}

fn informer_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}{}", host, INFORMER_PATH)
    } else {
        format!("https://{}{}", host, INFORMER_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_informer_url() {
        assert_eq!(
            informer_url("www.rnpp.rv.ua"),
            "https://www.rnpp.rv.ua/informer/sprut.php"
        );
        assert_eq!(
            informer_url("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080/informer/sprut.php"
        );
    }

    #[test]
    fn test_builder_defaults() {
        let adapter = RnppAdapter::builder().build().unwrap();
        assert_eq!(adapter.endpoint(), "https://www.rnpp.rv.ua/informer/sprut.php");
        assert_eq!(adapter.plant(), Plant::Rnpp);
    }

    #[test]
    fn test_readings_share_base_payload() {
        let base = json!({"meteo": {"t": "1,5"}});
        let readings = readings(base.clone(), Ok(json!({"day": 1})), "x");

        assert_eq!(readings.len(), 7);
        assert!(readings[..6].iter().all(|r| r.data == base));
        assert_eq!(readings[2].graph, "atm");
        assert_eq!(readings[2].ratio, Some(HPA_TO_MMHG));
        assert_eq!(readings[6].graph, "production_electricity");
        assert_eq!(readings[6].ratio, Some(KILO_TO_MEGA));
    }

    #[test]
    fn test_production_failure_drops_only_production() {
        let readings = readings(
            json!({}),
            Err(AdapterError::Parse("not json".to_string())),
            "x",
        );
        assert_eq!(readings.len(), 6);
        assert!(readings.iter().all(|r| r.graph != "production_electricity"));
    }
}
