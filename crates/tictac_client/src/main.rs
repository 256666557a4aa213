//! Tic-tac-toe command-line client

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use tictac_client::{ClientConfig, ClientError, HttpGameApi, IdentityStore, SyncClient};
use tictac_core::{GameSession, GameStatus, MatchId, Square};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url);
    }
    if cli.no_precheck {
        config = config.with_precheck(false);
    }

    let client = config.connect(IdentityStore::new())?;

    let outcome = match cli.command {
        Command::Create => create(&client).await,
        Command::Status { match_id } => status(&client, MatchId::from(match_id)).await,
        Command::Move {
            match_id,
            player,
            row,
            column,
        } => {
            play(
                &client,
                MatchId::from(match_id),
                player,
                Square::new(row, column),
            )
            .await
        }
        Command::Watch { match_id } => watch(&client, &config, MatchId::from(match_id)).await,
    };

    if let Err(e) = outcome {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

fn print_session(session: &GameSession) {
    println!("Game {}", session.id());
    println!("{}", session.board().display());
    match session.status() {
        GameStatus::InProgress => println!("{} to move", session.current_turn()),
        GameStatus::Draw => println!("Draw"),
        status => {
            if let Some(winner) = status.winner() {
                println!("{} wins", winner);
            }
        }
    }
}

#[instrument(skip(client))]
async fn create(client: &SyncClient<HttpGameApi>) -> Result<(), ClientError> {
    let match_id = client.create_session().await?;
    let session = client.fetch_status(match_id).await?;
    print_session(&session);
    Ok(())
}

#[instrument(skip(client))]
async fn status(client: &SyncClient<HttpGameApi>, match_id: MatchId) -> Result<(), ClientError> {
    let session = client.fetch_status(match_id).await?;
    print_session(&session);
    Ok(())
}

/// Hot-seat move: without an explicit symbol, plays for whoever is to move.
#[instrument(skip(client))]
async fn play(
    client: &SyncClient<HttpGameApi>,
    match_id: MatchId,
    player: Option<tictac_core::Player>,
    square: Square,
) -> Result<(), ClientError> {
    let current = client.fetch_status(match_id).await?;
    let player = player.unwrap_or_else(|| current.current_turn());
    client.identity().select_player(player);
    client.identity().set_active_match(match_id);

    info!(%player, %square, "Submitting move");
    let session = client.submit_move(match_id, player, square).await?;
    print_session(&session);
    Ok(())
}

#[instrument(skip(client, config))]
async fn watch(
    client: &SyncClient<HttpGameApi>,
    config: &ClientConfig,
    match_id: MatchId,
) -> Result<(), ClientError> {
    let mut session = client.fetch_status(match_id).await?;
    print_session(&session);

    while !session.status().is_terminal() {
        session = client
            .await_change(match_id, config.poll_interval(), *config.max_polls())
            .await?;
        println!();
        print_session(&session);
    }
    Ok(())
}
