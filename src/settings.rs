//! Node settings.
//!
//! Layered, lowest priority first:
//!
//! 1. built-in defaults;
//! 2. an optional TOML file (`--config <path>`);
//! 3. `UANPPS_*` environment variables, e.g. `env.UANPPS_PROXY` in a Munin
//!    `plugin-conf.d` section.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use uanpps_adapters::{HttpConfig, DEFAULT_USER_AGENT};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "UANPPS";

/// Filter installed when `logging` is on and `RUST_LOG` is unset.
pub const HTTP_TRACE_FILTER: &str = "uanpps=debug,reqwest=debug,hyper_util=debug";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Proxy for both http and https requests.
    pub proxy: Option<String>,
    pub user_agent: String,
    /// Trace HTTP requests on stderr.
    pub logging: bool,
    /// Directory with `colors.json` and `<plant>/<graph>.json`, replacing the
    /// built-in descriptors.
    pub data_dir: Option<PathBuf>,

    // Per-site overrides. Each adapter reads the ones it knows.
    pub host: Option<String>,
    pub home_url: Option<String>,
    pub meteo_url: Option<String>,
    pub radio_url: Option<String>,
    pub perform_url: Option<String>,
}

impl Settings {
    /// Load settings from defaults, `file` (if given and present) and the
    /// environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("timeout", 10)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("logging", false)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("failed to read settings")?
            .try_deserialize()
            .context("invalid settings")
    }

    /// Connection settings for the site adapters.
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            timeout: Duration::from_secs(self.timeout),
            proxy: self.proxy.clone().filter(|p| !p.is_empty()),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.timeout, 10);
        assert_eq!(settings.user_agent, DEFAULT_USER_AGENT);
        assert!(!settings.logging);

        let http = settings.http();
        assert_eq!(http.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "timeout = 3\nproxy = \"http://10.0.0.1:3128\"\nhost = \"mirror.local\""
        )
        .unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.timeout, 3);
        assert_eq!(settings.host.as_deref(), Some("mirror.local"));
        assert_eq!(
            settings.http().proxy.as_deref(),
            Some("http://10.0.0.1:3128")
        );
    }

    #[test]
    fn test_missing_file_is_ignored() {
        let settings = Settings::load(Some(Path::new("/nonexistent/uanpps.toml"))).unwrap();
        assert_eq!(settings.timeout, 10);
    }

    #[test]
    fn test_empty_proxy_is_none() {
        let settings = Settings {
            proxy: Some(String::new()),
            ..Settings::load(None).unwrap()
        };
        assert!(settings.http().proxy.is_none());
    }
}
