//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Merit-order production planning for power plant fleets.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Service configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true, env = "POWERPLANT_DISPATCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `POST /productionplan` over HTTP.
    #[cfg(feature = "api")]
    Serve {
        /// Override the configured port.
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compute the plan for one payload file and print it as JSON.
    Plan {
        /// Request payload (JSON).
        payload: PathBuf,

        /// Also export the plan to this CSV file.
        #[arg(long)]
        plan_out: Option<PathBuf>,
    },
}
