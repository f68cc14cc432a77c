//! CLI definitions for the `wellness` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Multi-agent mental wellness chat service.
#[derive(Parser)]
#[command(name = "wellness", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides `server.host`).
    #[arg(long, env = "WELLNESS_HOST")]
    pub host: Option<String>,

    /// Port to bind (overrides `server.port`).
    #[arg(long, short, env = "WELLNESS_PORT")]
    pub port: Option<u16>,

    /// Config file; `wellness.toml` in the working directory when omitted.
    #[arg(long, env = "WELLNESS_CONFIG")]
    pub config: Option<PathBuf>,
}
