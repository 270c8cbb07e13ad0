// CLI entry point for a Life Game Arena participant.
//
// Connects to a server, plays one game with the chosen strategy and prints
// the final board.
//
// Usage:
//   lifegame-player <HOST> <PORT> [--strategy KIND] [--seed N] [--depth N]
//                   [--playouts N] [--name NAME] [--config FILE] [--verbose]
//
// `--config` must match the server's config: the quota and generation count
// it carries are not sent over the wire, and the search strategies depend on
// them. Logs go to stderr so they do not interleave with the manual prompt.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use lifegame_engine::{GameConfig, Strategy};
use lifegame_players::{
    DEFAULT_DEPTH, DEFAULT_PLAYOUTS, Greedy, Manual, Minimax, MonteCarlo, RandomStrategy,
    count_line, render_board,
};
use lifegame_server::{ClientConfig, play_game};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyKind {
    Random,
    Greedy,
    Minimax,
    Montecarlo,
    Manual,
}

#[derive(Parser, Debug)]
#[command(name = "lifegame-player", about = "Play one Life Game Arena match")]
struct Cli {
    /// Server hostname, e.g. localhost.
    host: String,
    /// Server port, e.g. 2000.
    port: u16,
    #[arg(long, value_enum, default_value_t = StrategyKind::Random)]
    strategy: StrategyKind,
    /// Seed for the random and Monte Carlo strategies.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Minimax search depth in plies, counting our own move.
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,
    /// Monte Carlo playouts per candidate cell.
    #[arg(long, default_value_t = DEFAULT_PLAYOUTS)]
    playouts: u32,
    /// Display name to send instead of the strategy's own.
    #[arg(long)]
    name: Option<String>,
    /// JSON game config shared with the server.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

fn build_strategy(cli: &Cli, game: &GameConfig) -> Box<dyn Strategy> {
    match cli.strategy {
        StrategyKind::Random => Box::new(RandomStrategy::new(cli.seed)),
        StrategyKind::Greedy => Box::new(Greedy::new(game.generations)),
        StrategyKind::Minimax => Box::new(Minimax::new(cli.depth, game.generations)),
        StrategyKind::Montecarlo => Box::new(MonteCarlo::new(
            cli.seed,
            cli.playouts,
            game.placement_quota,
            game.generations,
        )),
        StrategyKind::Manual => Box::new(Manual::new(io::stdin().lock(), io::stdout()).with_color(true)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let game = match &cli.config {
        Some(path) => match GameConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let mut strategy = build_strategy(&cli, &game);
    let config = ClientConfig {
        name: cli.name.clone(),
    };
    match play_game((cli.host.as_str(), cli.port), strategy.as_mut(), &config) {
        Ok(summary) => {
            println!("\nYou played as {}: {}", summary.me, summary.status);
            print!("{}", render_board(&summary.board, true));
            if let Some(count) = summary.count {
                println!("{}", count_line(count));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "game failed");
            eprintln!("Game failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .init();
}
