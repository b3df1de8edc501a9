//! Zaporizhzhia NPP adapter (www.npp.zp.ua).
//!
//! Readings come from three sidebar/content blocks:
//!
//! - `#block-znppmawssidebar`: automatic weather station table;
//! - `#block-znppunitssidebar`: one row per power unit;
//! - `#block-porto-content`: 30-km zone ASKRO table on the radiation page.
//!
//! The weather page is required; the other two only drop their own graph.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::client::get_text;
use crate::graph::{
    Reading, AIR_TEMPERATURE, ATM, HPA_TO_MMHG, HUMIDITY, LOADS_UNITS, RADIOLOGY_30KM,
    WIND_SPEED,
};
use crate::html::{cell, document, find, first_token, rows};
use crate::{AdapterError, HttpConfig, Plant, SiteAdapter};

const DEFAULT_METEO_URL: &str = "https://www.npp.zp.ua/uk/safety/meteo";
const DEFAULT_PERFORM_URL: &str = "https://www.npp.zp.ua/uk/activities/performance-indicators";
const DEFAULT_RADIO_URL: &str = "https://www.npp.zp.ua/uk/safety/arms";

const METEO_TABLE: &str = "#block-znppmawssidebar table";
const UNITS_TABLE: &str = "#block-znppunitssidebar table";
const RADIO_TABLE: &str = "#block-porto-content table";

const AIR_TEMPERATURE_ROW: usize = 0;
const WIND_SPEED_ROW: usize = 2;
const HUMIDITY_ROW: usize = 3;
const PRESSURE_ROW: usize = 4;

/// Zaporizhzhia NPP site adapter.
#[derive(Debug, Clone)]
pub struct ZnppAdapter {
    client: Client,
    meteo_url: String,
    perform_url: String,
    radio_url: String,
}

impl ZnppAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> ZnppAdapterBuilder {
        ZnppAdapterBuilder::default()
    }
}

#[async_trait]
impl SiteAdapter for ZnppAdapter {
    fn plant(&self) -> Plant {
        Plant::Znpp
    }

    async fn fetch(&self) -> Result<Vec<Reading>, AdapterError> {
        let meteo = get_text(&self.client, &self.meteo_url, &[]).await?;
        let meteo = parse_meteo(&meteo)?;
        let units = get_text(&self.client, &self.perform_url, &[])
            .await
            .and_then(|page| parse_units(&page));
        let radiology = get_text(&self.client, &self.radio_url, &[])
            .await
            .and_then(|page| parse_radiology(&page));

        Ok(self.readings(meteo, units, radiology))
    }
}

impl ZnppAdapter {
    fn readings(
        &self,
        meteo: Meteo,
        units: Result<Vec<Value>, AdapterError>,
        radiology: Result<Vec<String>, AdapterError>,
    ) -> Vec<Reading> {
        let mut readings = vec![
            Reading::new(&AIR_TEMPERATURE, meteo.air_temperature),
            Reading::new(&ATM, meteo.pressure).with_ratio(HPA_TO_MMHG),
            Reading::new(&HUMIDITY, meteo.humidity),
            Reading::new(&WIND_SPEED, meteo.wind_speed),
        ];
        match units {
            Ok(values) => readings.push(Reading::new(&LOADS_UNITS, values)),
            Err(e) => warn!(url = %self.perform_url, "unit loads unavailable: {}", e),
        }
        match radiology {
            Ok(values) => readings.push(Reading::new(&RADIOLOGY_30KM, values)),
            Err(e) => warn!(url = %self.radio_url, "radiological situation unavailable: {}", e),
        }
        readings
    }
}

/// Builder for ZnppAdapter.
#[derive(Debug, Default)]
pub struct ZnppAdapterBuilder {
    meteo_url: Option<String>,
    perform_url: Option<String>,
    radio_url: Option<String>,
    http: Option<HttpConfig>,
}

impl ZnppAdapterBuilder {
    /// Set the page carrying the weather station block.
    pub fn meteo_url(mut self, url: impl Into<String>) -> Self {
        self.meteo_url = Some(url.into());
        self
    }

    /// Set the page carrying the power unit block.
    pub fn perform_url(mut self, url: impl Into<String>) -> Self {
        self.perform_url = Some(url.into());
        self
    }

    /// Set the radiation page URL.
    pub fn radio_url(mut self, url: impl Into<String>) -> Self {
        self.radio_url = Some(url.into());
        self
    }

    /// Set connection settings.
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<ZnppAdapter, AdapterError> {
        Ok(ZnppAdapter {
            client: self.http.unwrap_or_default().build_client()?,
            meteo_url: self
                .meteo_url
                .unwrap_or_else(|| DEFAULT_METEO_URL.to_string()),
            perform_url: self
                .perform_url
                .unwrap_or_else(|| DEFAULT_PERFORM_URL.to_string()),
            radio_url: self
                .radio_url
                .unwrap_or_else(|| DEFAULT_RADIO_URL.to_string()),
        })
    }
}

#[derive(Debug, PartialEq)]
struct Meteo {
    air_temperature: String,
    wind_speed: String,
    humidity: String,
    pressure: String,
}

fn parse_meteo(page: &str) -> Result<Meteo, AdapterError> {
    let doc = document(page);
    let table = rows(find(doc.root_element(), METEO_TABLE)?, "tr", "td")?;

    Ok(Meteo {
        air_temperature: cell(&table, AIR_TEMPERATURE_ROW, 1)?.to_string(),
        wind_speed: cell(&table, WIND_SPEED_ROW, 1)?.to_string(),
        humidity: first_token(cell(&table, HUMIDITY_ROW, 1)?).to_string(),
        pressure: cell(&table, PRESSURE_ROW, 1)?.to_string(),
    })
}

/// A unit row with fewer than three cells is a unit with no reported load.
fn parse_units(page: &str) -> Result<Vec<Value>, AdapterError> {
    let doc = document(page);
    let table = rows(find(doc.root_element(), UNITS_TABLE)?, "tr", "td")?;

    Ok(table
        .into_iter()
        .map(|mut row| {
            if row.len() > 2 {
                Value::String(row.swap_remove(1))
            } else {
                Value::from(0)
            }
        })
        .collect())
}

fn parse_radiology(page: &str) -> Result<Vec<String>, AdapterError> {
    let doc = document(page);
    let table = rows(find(doc.root_element(), RADIO_TABLE)?, "tr", "td")?;

    (1..table.len())
        .map(|row| cell(&table, row, 1).map(str::to_string))
        .collect()
}
