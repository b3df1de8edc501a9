use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uanpps_adapters::Plant;
use uanpps_munin::{Output, TracingSink};
use uanpps_node::{plugin, Catalog, Settings};

#[derive(Parser, Debug)]
#[command(name = "uanpps-node")]
#[command(about = "Munin plugin for Ukrainian nuclear power plant telemetry")]
struct Args {
    /// Plant to report on (default: taken from the executable name)
    #[arg(short, long)]
    plant: Option<Plant>,

    /// Settings file (TOML); UANPPS_* environment variables take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// `config` to print graph metadata, nothing to print current values
    mode: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;
    init_tracing(settings.logging);

    let plant = match args.plant {
        Some(plant) => plant,
        None => {
            let program = std::env::args_os().next().unwrap_or_default();
            plugin::plant_from_program(&program).with_context(|| {
                format!(
                    "cannot infer plant from '{}', use --plant",
                    program.to_string_lossy()
                )
            })?
        }
    };

    let catalog = match &settings.data_dir {
        Some(dir) => Catalog::load(plant, dir)?,
        None => Catalog::embedded(plant)?,
    };
    catalog.validate()?;

    let mut out = Output::stdout();
    match args.mode.as_deref() {
        Some("config") => plugin::config(&catalog, &mut out),
        Some(other) => bail!("unknown mode '{}'", other),
        None => run_fetch(plant, &settings, &catalog, &mut out),
    }
}

fn run_fetch(
    plant: Plant,
    settings: &Settings,
    catalog: &Catalog,
    out: &mut Output<std::io::Stdout>,
) -> Result<()> {
    info!("Start {}-node", plant);

    let adapter = plugin::adapter(plant, settings)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(plugin::fetch(adapter.as_ref(), catalog, out, &mut TracingSink))?;

    info!("Finish {}-node", plant);
    Ok(())
}

/// Logs go to stderr; stdout belongs to Munin.
fn init_tracing(http_trace: bool) {
    let default = if http_trace {
        uanpps_node::settings::HTTP_TRACE_FILTER
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .compact()
        .init();
}
