//! Production plan service entry point: CLI wiring, config, and logging.

mod cli;

use std::path::Path;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use powerplant_dispatch::config::ServiceConfig;
use powerplant_dispatch::dispatch::{Dispatcher, PlanSummary, TracingObserver};
use powerplant_dispatch::fleet::DispatchRequest;
use powerplant_dispatch::io::export::export_csv;
use powerplant_dispatch::payload::{ProductionPlanPayload, plan_items};

use crate::cli::{Args, Command};

/// Loads the configuration file, or defaults when none is given, and validates it.
fn load_config(path: Option<&Path>) -> anyhow::Result<ServiceConfig> {
    let config = match path {
        Some(path) => ServiceConfig::from_toml_file(path)?,
        None => ServiceConfig::default(),
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("invalid configuration ({} error(s))", errors.len());
    }
    Ok(config)
}

fn init_logging(config: &ServiceConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Plans one payload file, prints the response JSON and summary.
fn run_plan(
    config: &ServiceConfig,
    payload_path: &Path,
    plan_out: Option<&Path>,
) -> anyhow::Result<()> {
    let payload = ProductionPlanPayload::from_json_file(payload_path)?;
    let request = DispatchRequest::from(payload);
    let dispatcher = Dispatcher::new(config.dispatch_settings());

    let plan = dispatcher.plan(&request, &mut TracingObserver)?;

    println!("{}", serde_json::to_string_pretty(&plan_items(&plan))?);
    eprintln!("\n{}", PlanSummary::from_plan(&plan));

    if let Some(path) = plan_out {
        export_csv(&plan, path)
            .with_context(|| format!("failed to write CSV to \"{}\"", path.display()))?;
        info!(path = %path.display(), "Plan written");
    }
    Ok(())
}

#[cfg(feature = "api")]
fn run_server(config: &ServiceConfig, port: Option<u16>) -> anyhow::Result<()> {
    use std::sync::Arc;

    use powerplant_dispatch::api::{self, AppState};

    let mut addr = config.server.socket_addr();
    if let Some(port) = port {
        addr.set_port(port);
    }

    let dispatcher = Dispatcher::new(config.dispatch_settings());
    let settings = dispatcher.settings();
    info!(
        co2_emission_factor = settings.co2_emission_factor,
        tolerance_mw = settings.tolerance_mw,
        cap_wind_at_availability = settings.cap_wind_at_availability,
        "Dispatch settings"
    );
    let state = Arc::new(AppState { dispatcher });
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    rt.block_on(api::serve(state, addr))
        .with_context(|| format!("API server on {addr} failed"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    init_logging(&config);

    match args.command {
        #[cfg(feature = "api")]
        Command::Serve { port } => run_server(&config, port),
        Command::Plan { payload, plan_out } => run_plan(&config, &payload, plan_out.as_deref()),
    }
}
