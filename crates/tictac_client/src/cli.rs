//! Command-line interface for the game client.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_core::Player;

/// Play tic-tac-toe against a remote session server
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Client for the tic-tac-toe session server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "TICTAC_CLIENT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the game API
    #[arg(long, env = "TICTAC_SERVER_URL")]
    pub server_url: Option<String>,

    /// Skip the local pre-check and let the server judge every move
    #[arg(long)]
    pub no_precheck: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new match
    Create,

    /// Show the board of a match
    Status {
        /// Match id
        #[arg(short, long = "match")]
        match_id: u64,
    },

    /// Place a mark
    Move {
        /// Match id
        #[arg(short, long = "match")]
        match_id: u64,

        /// Symbol to play; defaults to whoever is to move
        #[arg(short, long)]
        player: Option<Player>,

        /// Row, 1 to 3
        #[arg(long)]
        row: i32,

        /// Column, 1 to 3
        #[arg(long)]
        column: i32,
    },

    /// Print the board each time it changes until the match ends
    Watch {
        /// Match id
        #[arg(short, long = "match")]
        match_id: u64,
    },
}
