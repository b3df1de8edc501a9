//! Khmelnytskyi NPP adapter (www.xaec.org.ua).
//!
//! Three HTML pages are scraped:
//!
//! - the home page: the `#lightmeteo` widget (temperature, wind, humidity,
//!   pressure) and the first `.m_table` (unit loads);
//! - the radiation page: ASKRO measuring points;
//! - the meteo page: detailed readings, of which the rainfall intensity is used.
//!
//! The home page is required; a failure on either of the other two pages
//! only drops the graph it feeds.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::client::get_text;
use crate::graph::{
    Reading, AIR_TEMPERATURE, ATM, HPA_TO_MMHG, HUMIDITY, LOADS_UNITS, RADIOLOGY,
    RAINFALL_INTENSITY, WIND_SPEED,
};
use crate::html::{cell, document, find, first_token, rows, selector, text, texts};
use crate::{AdapterError, HttpConfig, Plant, SiteAdapter};

const DEFAULT_HOST: &str = "http://www.xaec.org.ua";
const DEFAULT_RADIO_URL: &str = "http://www.xaec.org.ua/store/pages/ukr/nuccon";
const DEFAULT_METEO_URL: &str = "http://www.xaec.org.ua/store/pages/ukr/meteo";

/// Position of the rainfall intensity among the meteo page items.
const RAINFALL_ITEM: usize = 3;

/// Khmelnytskyi NPP site adapter.
#[derive(Debug, Clone)]
pub struct KhnppAdapter {
    client: Client,
    host: String,
    radio_url: String,
    meteo_url: String,
}

impl KhnppAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> KhnppAdapterBuilder {
        KhnppAdapterBuilder::default()
    }
}

#[async_trait]
impl SiteAdapter for KhnppAdapter {
    fn plant(&self) -> Plant {
        Plant::Khnpp
    }

    async fn fetch(&self) -> Result<Vec<Reading>, AdapterError> {
        let home = get_text(&self.client, &self.host, &[]).await?;
        let home = parse_home(&home)?;

        let radiology = get_text(&self.client, &self.radio_url, &[])
            .await
            .and_then(|page| parse_radiology(&page));
        let rainfall = get_text(&self.client, &self.meteo_url, &[])
            .await
            .and_then(|page| parse_rainfall(&page));

        Ok(self.readings(home, radiology, rainfall))
    }
}

impl KhnppAdapter {
    fn readings(
        &self,
        home: HomePage,
        radiology: Result<Vec<String>, AdapterError>,
        rainfall: Result<Value, AdapterError>,
    ) -> Vec<Reading> {
        let mut readings = vec![
            Reading::new(&AIR_TEMPERATURE, home.air_temperature),
            Reading::new(&ATM, home.pressure).with_ratio(HPA_TO_MMHG),
            Reading::new(&HUMIDITY, home.humidity),
        ];
        match rainfall {
            Ok(value) => readings.push(Reading::new(&RAINFALL_INTENSITY, value)),
            Err(e) => warn!(url = %self.meteo_url, "rainfall intensity unavailable: {}", e),
        }
        readings.push(Reading::new(&WIND_SPEED, home.wind_speed));
        readings.push(Reading::new(&LOADS_UNITS, home.units));
        match radiology {
            Ok(values) => readings.push(Reading::new(&RADIOLOGY, values)),
            Err(e) => warn!(url = %self.radio_url, "radiological situation unavailable: {}", e),
        }
        readings
    }
}

/// Builder for KhnppAdapter.
#[derive(Debug, Default)]
pub struct KhnppAdapterBuilder {
    host: Option<String>,
    radio_url: Option<String>,
    meteo_url: Option<String>,
    http: Option<HttpConfig>,
}

impl KhnppAdapterBuilder {
    /// Set the home page URL (default: "http://www.xaec.org.ua").
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the radiation page URL.
    pub fn radio_url(mut self, url: impl Into<String>) -> Self {
        self.radio_url = Some(url.into());
        self
    }

    /// Set the detailed meteo page URL.
    pub fn meteo_url(mut self, url: impl Into<String>) -> Self {
        self.meteo_url = Some(url.into());
        self
    }

    /// Set connection settings.
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<KhnppAdapter, AdapterError> {
        Ok(KhnppAdapter {
            client: self.http.unwrap_or_default().build_client()?,
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            radio_url: self
                .radio_url
                .unwrap_or_else(|| DEFAULT_RADIO_URL.to_string()),
            meteo_url: self
                .meteo_url
                .unwrap_or_else(|| DEFAULT_METEO_URL.to_string()),
        })
    }
}

#[derive(Debug, PartialEq)]
struct HomePage {
    air_temperature: String,
    wind_speed: String,
    humidity: String,
    pressure: String,
    units: Vec<String>,
}

fn parse_home(page: &str) -> Result<HomePage, AdapterError> {
    let doc = document(page);
    let root = doc.root_element();

    let meteo = rows(find(root, "#lightmeteo")?, "div.m_row", "div.m_cell")?;
    let perform = rows(find(root, "div.m_table")?, "div.m_row", "div.m_cell")?;

    Ok(HomePage {
        air_temperature: first_token(cell(&meteo, 0, 1)?).to_string(),
        wind_speed: first_token(cell(&meteo, 1, 1)?).to_string(),
        humidity: first_token(cell(&meteo, 2, 1)?).to_string(),
        pressure: first_token(cell(&meteo, 3, 1)?).to_string(),
        units: vec![
            first_token(cell(&perform, 0, 1)?).to_string(),
            first_token(cell(&perform, 1, 1)?).to_string(),
        ],
    })
}

fn parse_radiology(page: &str) -> Result<Vec<String>, AdapterError> {
    let doc = document(page);
    let container = find(doc.root_element(), "div.dataASKRO")?;
    let point_selector = selector("div.mesPoint")?;
    let data_selector = selector("div.nucItemData")?;

    container
        .select(&point_selector)
        .map(|point| {
            point
                .select(&data_selector)
                .next()
                .map(|data| first_token(&text(data)).to_string())
                .ok_or_else(|| AdapterError::Parse("measuring point without data".to_string()))
        })
        .collect()
}

fn parse_rainfall(page: &str) -> Result<Value, AdapterError> {
    let doc = document(page);
    let container = find(doc.root_element(), "div.meteoData")?;
    let values = texts(container, "div.smallItem div.valueM")?;
    values
        .into_iter()
        .nth(RAINFALL_ITEM)
        .map(Value::String)
        .ok_or_else(|| AdapterError::Parse("rainfall intensity item missing".to_string()))
}
