//! Munin plugin modes.

use std::ffi::OsStr;
use std::io::Write;

use anyhow::{Context, Result};
use tracing::{error, info};
use uanpps_adapters::{
    khnpp::KhnppAdapter, rnpp::RnppAdapter, sunpp::SunppAdapter, znpp::ZnppAdapter, Plant,
    Reading, SiteAdapter,
};
use uanpps_munin::{render_descriptor, render_fields, render_values, DiagnosticSink, Output};

use crate::catalog::Catalog;
use crate::settings::Settings;

/// Plant named by the path the program was started as. The path need not be
/// valid UTF-8.
pub fn plant_from_program(program: &OsStr) -> Option<Plant> {
    Plant::from_executable(&program.to_string_lossy())
}

/// Build the adapter for `plant`, applying site overrides from `settings`.
pub fn adapter(plant: Plant, settings: &Settings) -> Result<Box<dyn SiteAdapter>> {
    let http = settings.http();
    let adapter: Box<dyn SiteAdapter> = match plant {
        Plant::Khnpp => {
            let mut builder = KhnppAdapter::builder().http(http);
            if let Some(host) = settings.host.as_deref().or(settings.home_url.as_deref()) {
                builder = builder.host(host);
            }
            if let Some(url) = &settings.radio_url {
                builder = builder.radio_url(url);
            }
            if let Some(url) = &settings.meteo_url {
                builder = builder.meteo_url(url);
            }
            Box::new(builder.build()?)
        }
        Plant::Rnpp => {
            let mut builder = RnppAdapter::builder().http(http);
            if let Some(host) = &settings.host {
                builder = builder.host(host);
            }
            Box::new(builder.build()?)
        }
        Plant::Sunpp => {
            let mut builder = SunppAdapter::builder().http(http);
            if let Some(url) = settings.home_url.as_deref().or(settings.host.as_deref()) {
                builder = builder.home_url(url);
            }
            if let Some(url) = &settings.radio_url {
                builder = builder.radio_url(url);
            }
            Box::new(builder.build()?)
        }
        Plant::Znpp => {
            let mut builder = ZnppAdapter::builder().http(http);
            if let Some(url) = &settings.meteo_url {
                builder = builder.meteo_url(url);
            }
            if let Some(url) = &settings.perform_url {
                builder = builder.perform_url(url);
            }
            if let Some(url) = &settings.radio_url {
                builder = builder.radio_url(url);
            }
            Box::new(builder.build()?)
        }
    };
    Ok(adapter)
}

/// `config` mode: one block per graph.
///
/// Each block is the descriptor header, the `graph_args` line, the field
/// lines, then the per-field directives of the graph.
pub fn config<W: Write>(catalog: &Catalog, out: &mut Output<W>) -> Result<()> {
    for spec in catalog.plant().graphs() {
        let descriptor = catalog.descriptor(spec.name)?;

        let mut lines = render_descriptor(descriptor);
        lines.push(spec.args_line());
        lines.extend(render_fields(descriptor, catalog.palette())?);
        lines.extend(
            descriptor
                .fields
                .iter()
                .filter_map(|field| spec.directive.render(field)),
        );
        out.block(&lines).context("failed to write config")?;
    }
    out.flush().context("failed to write config")
}

/// Render the value lines of each reading, in order.
pub fn values<W: Write, S: DiagnosticSink + ?Sized>(
    catalog: &Catalog,
    readings: &[Reading],
    out: &mut Output<W>,
    sink: &mut S,
) -> Result<()> {
    for reading in readings {
        let descriptor = catalog.descriptor(reading.graph)?;
        let lines = render_values(&reading.data, descriptor, reading.ratio, sink);
        out.lines(&lines).context("failed to write values")?;
    }
    out.flush().context("failed to write values")
}

/// Fetch mode. A site that cannot be reached at all yields no value lines.
pub async fn fetch<W: Write, S: DiagnosticSink + ?Sized>(
    adapter: &dyn SiteAdapter,
    catalog: &Catalog,
    out: &mut Output<W>,
    sink: &mut S,
) -> Result<()> {
    let readings = match adapter.fetch().await {
        Ok(readings) => readings,
        Err(e) => {
            error!(plant = %adapter.plant(), "fetch failed: {}", e);
            return Ok(());
        }
    };
    info!(plant = %adapter.plant(), readings = readings.len(), "fetched");
    values(catalog, &readings, out, sink)
}
