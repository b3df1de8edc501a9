//! South Ukraine NPP adapter (www.sunpp.mk.ua).
//!
//! The home page carries a single parameter table with unit loads and meteo
//! readings at fixed rows. The radiation page has an ASKRO table whose third
//! column is the dose rate.

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::client::get_text;
use crate::graph::{
    Reading, AIR_TEMPERATURE, ATM, HPA_TO_MMHG, HUMIDITY, LOADS_UNITS, RADIOLOGY,
    WIND_SPEED,
};
use crate::html::{cell, document, find, rows};
use crate::{AdapterError, HttpConfig, Plant, SiteAdapter};

const DEFAULT_HOME_URL: &str = "https://www.sunpp.mk.ua/";
const DEFAULT_RADIO_URL: &str = "https://www.sunpp.mk.ua/uk/activities/radiation";

// The site emits class='"table-param-block"', quotes included.
const PARAM_TABLE: &str = r#"table[class*="table-param-block"]"#;
const ASKRO_TABLE: &str = r#"table[class*="table-param-askro"]"#;

const UNIT_ROWS: [usize; 3] = [0, 1, 2];
const AIR_TEMPERATURE_ROW: usize = 4;
const WIND_SPEED_ROW: usize = 6;
const PRESSURE_ROW: usize = 7;
const HUMIDITY_ROW: usize = 8;
const DOSE_RATE_COLUMN: usize = 2;

/// South Ukraine NPP site adapter.
#[derive(Debug, Clone)]
pub struct SunppAdapter {
    client: Client,
    home_url: String,
    radio_url: String,
}

impl SunppAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> SunppAdapterBuilder {
        SunppAdapterBuilder::default()
    }
}

#[async_trait]
impl SiteAdapter for SunppAdapter {
    fn plant(&self) -> Plant {
        Plant::Sunpp
    }

    async fn fetch(&self) -> Result<Vec<Reading>, AdapterError> {
        let home = get_text(&self.client, &self.home_url, &[]).await?;
        let home = parse_home(&home)?;
        let radiology = get_text(&self.client, &self.radio_url, &[])
            .await
            .and_then(|page| parse_radiology(&page));

        Ok(self.readings(home, radiology))
    }
}

impl SunppAdapter {
    fn readings(
        &self,
        home: HomePage,
        radiology: Result<Vec<String>, AdapterError>,
    ) -> Vec<Reading> {
        let mut readings = vec![
            Reading::new(&AIR_TEMPERATURE, home.air_temperature),
            Reading::new(&ATM, home.pressure).with_ratio(HPA_TO_MMHG),
            Reading::new(&HUMIDITY, home.humidity),
            Reading::new(&WIND_SPEED, home.wind_speed),
            Reading::new(&LOADS_UNITS, home.units),
        ];
        match radiology {
            Ok(values) => readings.push(Reading::new(&RADIOLOGY, values)),
            Err(e) => warn!(url = %self.radio_url, "radiological situation unavailable: {}", e),
        }
        readings
    }
}

/// Builder for SunppAdapter.
#[derive(Debug, Default)]
pub struct SunppAdapterBuilder {
    home_url: Option<String>,
    radio_url: Option<String>,
    http: Option<HttpConfig>,
}

impl SunppAdapterBuilder {
    /// Set the home page URL (default: "https://www.sunpp.mk.ua/").
    pub fn home_url(mut self, url: impl Into<String>) -> Self {
        self.home_url = Some(url.into());
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
    pub fn build(self) -> Result<SunppAdapter, AdapterError> {
        Ok(SunppAdapter {
            client: self.http.unwrap_or_default().build_client()?,
            home_url: self
                .home_url
                .unwrap_or_else(|| DEFAULT_HOME_URL.to_string()),
            radio_url: self
                .radio_url
                .unwrap_or_else(|| DEFAULT_RADIO_URL.to_string()),
        })
    }
}

#[derive(Debug, PartialEq)]
struct HomePage {
    units: Vec<String>,
    air_temperature: String,
    wind_speed: String,
    pressure: String,
    humidity: String,
}

fn parse_home(page: &str) -> Result<HomePage, AdapterError> {
    let doc = document(page);
    let table = rows(find(doc.root_element(), PARAM_TABLE)?, "tr", "td")?;

    let units = UNIT_ROWS
        .iter()
        .map(|&row| cell(&table, row, 1).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HomePage {
        units,
        air_temperature: cell(&table, AIR_TEMPERATURE_ROW, 1)?.to_string(),
        wind_speed: cell(&table, WIND_SPEED_ROW, 1)?.to_string(),
        pressure: cell(&table, PRESSURE_ROW, 1)?.to_string(),
        humidity: cell(&table, HUMIDITY_ROW, 1)?.to_string(),
    })
}

fn parse_radiology(page: &str) -> Result<Vec<String>, AdapterError> {
    let doc = document(page);
    let table = rows(find(doc.root_element(), ASKRO_TABLE)?, "tr", "td")?;

    (1..table.len())
        .map(|row| cell(&table, row, DOSE_RATE_COLUMN).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = r#"
        <table class='"table-param-block"'>
          <tr><td>Енергоблок №1</td><td>1000</td></tr>
          <tr><td>Енергоблок №2</td><td>985</td></tr>
          <tr><td>Енергоблок №3</td><td>0</td></tr>
          <tr><td>Метеоумови</td></tr>
          <tr><td>Температура повітря</td><td>7,2</td></tr>
          <tr><td>Напрямок вітру</td><td>ПнЗ</td></tr>
          <tr><td>Швидкість вітру</td><td>3,1</td></tr>
          <tr><td>Атмосферний тиск</td><td>1009</td></tr>
          <tr><td>Вологість</td><td>64</td></tr>
        </table>
    "#;

    const RADIO: &str = r#"
        <table class="table-param-askro">
          <tr><th>Пункт</th><th>Відстань</th><th>мкЗв/год</th></tr>
          <tr><td>Южноукраїнськ</td><td>3 км</td><td>0,10</td></tr>
          <tr><td>Костянтинівка</td><td>11 км</td><td>0,12</td></tr>
        </table>
    "#;

    #[test]
    fn test_parse_home() {
        let home = parse_home(HOME).unwrap();
        assert_eq!(home.units, vec!["1000", "985", "0"]);
        assert_eq!(home.air_temperature, "7,2");
        assert_eq!(home.wind_speed, "3,1");
        assert_eq!(home.pressure, "1009");
        assert_eq!(home.humidity, "64");
    }

    #[test]
    fn test_parse_home_short_table() {
        let page = r#"<table class="table-param-block"><tr><td>a</td><td>1</td></tr></table>"#;
        assert!(matches!(parse_home(page), Err(AdapterError::Parse(_))));
    }

    #[test]
    fn test_parse_radiology_skips_header() {
        assert_eq!(parse_radiology(RADIO).unwrap(), vec!["0,10", "0,12"]);
    }

    #[test]
    fn test_readings_order_and_ratio() {
        let adapter = SunppAdapter::builder().build().unwrap();
        let readings = adapter.readings(parse_home(HOME).unwrap(), parse_radiology(RADIO));

        let graphs: Vec<_> = readings.iter().map(|r| r.graph).collect();
        assert_eq!(
            graphs,
            vec![
                "air_temperature",
                "atm",
                "humidity",
                "wind_speed",
                "loads_units",
                "radiology"
            ]
        );
        assert_eq!(readings[1].data, serde_json::Value::from("1009"));
        assert_eq!(readings[1].ratio, Some(HPA_TO_MMHG));
        assert_eq!(readings[4].data, serde_json::json!(["1000", "985", "0"]));
    }

    #[test]
    fn test_radiology_failure_drops_only_radiology() {
        let adapter = SunppAdapter::builder().build().unwrap();
        let readings = adapter.readings(
            parse_home(HOME).unwrap(),
            Err(AdapterError::Http("503 Service Unavailable".to_string())),
        );

        assert_eq!(readings.len(), 5);
        assert!(readings.iter().all(|r| r.graph != "radiology"));
        assert_eq!(readings[1].ratio, Some(HPA_TO_MMHG));
    }

    #[test]
    fn test_builder_defaults() {
        let adapter = SunppAdapter::builder().build().unwrap();
        assert_eq!(adapter.home_url, DEFAULT_HOME_URL);
        assert_eq!(adapter.radio_url, DEFAULT_RADIO_URL);
        assert_eq!(adapter.plant().graphs().len(), 6);
    }
}
