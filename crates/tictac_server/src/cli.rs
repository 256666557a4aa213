//! Command-line interface for the session server.

use clap::Parser;
use std::path::PathBuf;

/// Tic-tac-toe session server
#[derive(Parser, Debug)]
#[command(name = "tictac-server")]
#[command(about = "Authoritative game server for remote tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "TICTAC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "TICTAC_HOST")]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long, env = "TICTAC_PORT")]
    pub port: Option<u16>,

    /// Route prefix, e.g. "/api" (empty for none)
    #[arg(long, env = "TICTAC_API_PREFIX")]
    pub api_prefix: Option<String>,

    /// Maximum number of live sessions
    #[arg(long, env = "TICTAC_MAX_SESSIONS")]
    pub max_sessions: Option<usize>,
}
