// Test harness for end-to-end matches.
//
// `run_match` starts a real server on a random localhost port and plays two
// real client runtimes (`lifegame_server::client::run_client`) against it,
// each on its own thread with its own strategy. Nothing is mocked: the
// server, framing, controller and strategies are the production code paths.
//
// Connection order decides who is Player One. Both TCP connections are
// opened on the calling thread, first then second, before either client
// thread starts, so the server's accept queue sees them in that order.
//
// See also: `tests/full_pipeline.rs` for the scenarios.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;
use std::thread;

use lifegame_engine::{Field, GameConfig, Strategy, StrategyError};
use lifegame_protocol::{Player, Pos};
use lifegame_server::{
    ClientConfig, ClientError, GameSummary, ServerConfig, SessionError, SessionReport, run_client,
    start_server,
};

/// Everything both sides reported for one match.
pub struct MatchResult {
    pub report: Result<SessionReport, SessionError>,
    pub first: Result<GameSummary, ClientError>,
    pub second: Result<GameSummary, ClientError>,
}

/// Play one full match between two strategies.
pub fn run_match(
    game: GameConfig,
    first: Box<dyn Strategy + Send>,
    second: Box<dyn Strategy + Send>,
) -> MatchResult {
    let (handle, addr) = start_server(ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        game,
    })
    .expect("start_server failed");

    let first_stream = TcpStream::connect(addr).expect("first connect failed");
    let second_stream = TcpStream::connect(addr).expect("second connect failed");
    let first = spawn_client(first_stream, first);
    let second = spawn_client(second_stream, second);

    MatchResult {
        report: handle.join(),
        first: first.join().expect("first client panicked"),
        second: second.join().expect("second client panicked"),
    }
}

fn spawn_client(
    stream: TcpStream,
    mut strategy: Box<dyn Strategy + Send>,
) -> thread::JoinHandle<Result<GameSummary, ClientError>> {
    thread::spawn(move || {
        let reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream);
        let strategy: &mut dyn Strategy = &mut strategy;
        run_client(reader, writer, strategy, &ClientConfig::default())
    })
}

/// Plays a fixed list of coordinates, whether or not they are legal.
pub struct Scripted {
    moves: Vec<Pos>,
}

impl Scripted {
    pub fn new(moves: &[(i32, i32)]) -> Self {
        Self {
            moves: moves.iter().rev().map(|&(row, col)| Pos::new(row, col)).collect(),
        }
    }
}

impl Strategy for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn choose_placement(&mut self, _board: &Field, _me: Player) -> Result<Pos, StrategyError> {
        self.moves.pop().ok_or(StrategyError::NoEmptyCell)
    }
}
