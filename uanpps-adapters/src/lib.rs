//! # uanpps-adapters
//!
//! Site adapters that scrape Ukrainian nuclear power plant websites into
//! Munin runtime data.
//!
//! Each [`Plant`] publishes a fixed list of graphs. Its adapter turns the
//! plant's pages into one [`Reading`] per graph. Rendering the readings is
//! left to `uanpps-munin`.
//!
//! ## Supported Plants
//!
//! - **Khmelnytskyi** (`khnpp` feature) - HTML home, radiation and meteo pages
//! - **Rivne** (`rnpp` feature) - JSON informer endpoint
//! - **South Ukraine** (`sunpp` feature) - HTML parameter and ASKRO tables
//! - **Zaporizhzhia** (`znpp` feature) - HTML sidebar blocks
//!
//! ## Quick Start (Rivne)
//!
//! ```rust,no_run
//! # #[cfg(feature = "rnpp")]
//! # async fn run() -> Result<(), uanpps_adapters::AdapterError> {
//! use uanpps_adapters::rnpp::RnppAdapter;
//! use uanpps_adapters::SiteAdapter;
//!
//! let adapter = RnppAdapter::builder().host("www.rnpp.rv.ua").build()?;
//! for reading in adapter.fetch().await? {
//!     println!("{}: {}", reading.graph, reading.data);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod graph;

#[cfg(feature = "html")]
mod html;

#[cfg(feature = "khnpp")]
pub mod khnpp;

#[cfg(feature = "rnpp")]
pub mod rnpp;

#[cfg(feature = "sunpp")]
pub mod sunpp;

#[cfg(feature = "znpp")]
pub mod znpp;

pub use client::{HttpConfig, DEFAULT_USER_AGENT};
pub use error::AdapterError;
pub use graph::{FieldDirective, GraphSpec, Reading, HPA_TO_MMHG, KILO_TO_MEGA};

/// A plant website that can be turned into Munin readings.
#[async_trait]
pub trait SiteAdapter: Send + Sync + fmt::Debug {
    /// Plant served by this adapter.
    fn plant(&self) -> Plant;

    /// Download and extract the current readings.
    ///
    /// An error means the plant's primary source is unusable and no graph
    /// can be produced. Secondary pages that fail are logged and their
    /// graphs left out of the result.
    async fn fetch(&self) -> Result<Vec<Reading>, AdapterError>;
}

/// Plants with a node implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plant {
    Khnpp,
    Rnpp,
    Sunpp,
    Znpp,
}

impl Plant {
    pub const ALL: [Plant; 4] = [Plant::Khnpp, Plant::Rnpp, Plant::Sunpp, Plant::Znpp];

    /// Short name used for data directories, executable names and Munin
    /// graph prefixes.
    pub fn name(&self) -> &'static str {
        match self {
            Plant::Khnpp => "khnpp",
            Plant::Rnpp => "rnpp",
            Plant::Sunpp => "sunpp",
            Plant::Znpp => "znpp",
        }
    }

    /// Graphs the plant publishes, in output order.
    pub fn graphs(&self) -> &'static [GraphSpec] {
        match self {
            Plant::Khnpp => graph::KHNPP_GRAPHS,
            Plant::Rnpp => graph::RNPP_GRAPHS,
            Plant::Sunpp => graph::SUNPP_GRAPHS,
            Plant::Znpp => graph::ZNPP_GRAPHS,
        }
    }

    /// Infer the plant from a Munin plugin symlink name such as
    /// `khnpp_node` or `/etc/munin/plugins/rnpp-node`.
    pub fn from_executable(path: &str) -> Option<Plant> {
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        Plant::ALL
            .into_iter()
            .find(|plant| name.starts_with(plant.name()))
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Plant {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plant::ALL
            .into_iter()
            .find(|plant| plant.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AdapterError::Config(format!("unknown plant '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_from_str() {
        assert_eq!("khnpp".parse::<Plant>().unwrap(), Plant::Khnpp);
        assert_eq!(" ZNPP ".parse::<Plant>().unwrap(), Plant::Znpp);
        assert!("chnpp".parse::<Plant>().is_err());
    }

    #[test]
    fn test_plant_from_executable() {
        assert_eq!(Plant::from_executable("khnpp_node"), Some(Plant::Khnpp));
        assert_eq!(
            Plant::from_executable("/etc/munin/plugins/rnpp-node"),
            Some(Plant::Rnpp)
        );
        assert_eq!(Plant::from_executable("sunpp"), Some(Plant::Sunpp));
        assert_eq!(Plant::from_executable("uanpps-node"), None);
    }

    #[test]
    fn test_graph_counts() {
        let counts: Vec<usize> = Plant::ALL.iter().map(|p| p.graphs().len()).collect();
        assert_eq!(counts, vec![7, 7, 6, 6]);
    }

    #[test]
    fn test_display_matches_name() {
        for plant in Plant::ALL {
            assert_eq!(plant.to_string(), plant.name());
        }
    }
}
