use anyhow::{Context as _, Result};
use clap::Parser;

use gridsnake::cli::Cli;
use gridsnake::core::engine::Engine;
use gridsnake::games::snake::SnakeGame;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let config = cli.game_config()?;
    let game = SnakeGame::new(config);

    let terminal = ratatui::init();
    let result = Engine::new(game).run(terminal).await;
    ratatui::restore();
    result
}

/// Logs go to a file when requested and are otherwise discarded: the TUI
/// owns both stdout and stderr while the game runs.
fn init_tracing(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
