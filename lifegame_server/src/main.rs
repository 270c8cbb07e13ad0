// CLI entry point for the Life Game Arena server.
//
// Binds, hosts exactly one session, prints the result and exits. See
// `server.rs` for the session flow.
//
// Usage:
//   lifegame-server <HOST> <PORT> [--config FILE] [--verbose]
//
// Logging goes through `tracing`; `RUST_LOG` overrides the level chosen by
// `--verbose`.

use std::net::TcpListener;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lifegame_engine::GameConfig;
use lifegame_server::{SessionEnd, serve};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lifegame-server", about = "Host one Life Game Arena session")]
struct Cli {
    /// Hostname or IP address to bind.
    host: String,
    /// Port to listen on, e.g. 2000.
    port: u16,
    /// JSON game config (board size, quota, generations, tie-break).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log every line sent to or received from participants.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => match GameConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let listener = match TcpListener::bind((cli.host.as_str(), cli.port)) {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}:{}: {e}", cli.host, cli.port);
            return ExitCode::FAILURE;
        }
    };
    match listener.local_addr() {
        Ok(addr) => println!("Lifegame server listening on {addr}"),
        Err(_) => println!("Lifegame server listening on {}:{}", cli.host, cli.port),
    }

    match serve(&listener, &config) {
        Ok(report) => {
            match &report.end {
                SessionEnd::Completed { count, .. } => println!(
                    "Final count: {} {}, {} {}",
                    report.names[0], count.player1, report.names[1], count.player2
                ),
                SessionEnd::Forfeit { loser, reason } => {
                    println!("{} forfeits: {reason}", report.names[loser.index()]);
                }
            }
            match report.winner() {
                Some(winner) => println!("Winner: {} ({winner})", report.names[winner.index()]),
                None => println!("Draw"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "session aborted");
            eprintln!("Session aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}
