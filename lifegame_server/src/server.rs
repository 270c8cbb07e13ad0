// Server loop: one two-player session from accept to result.
//
// Architecture: single thread, strictly synchronous.
//
// - `serve` blocks on `accept` twice. Each connection completes its handshake
//   (greeting, name, dimensions) before the next one is accepted, and its
//   arrival index fixes its `Player`.
// - `run_game` owns the rest: it prompts the current participant with
//   `placement` and the other with `waiting`, reads exactly one line, applies
//   it through `GameControl`, and broadcasts the resulting observation to
//   both. After the last placement it sends `simulation`, runs the batch,
//   broadcasts `life_result`, and finishes with the terminal status tokens.
// - `start_server` runs `serve` on a background thread so an embedding
//   process (or a test) can drive clients against it.
//
// The server is the only writer on either channel and never reads from the
// participant who is waiting, so there is no concurrent access to a stream.
// There are no timeouts: a participant that never answers stalls the session.
//
// Failure policy:
// - malformed placement line (bad JSON, wrong shape, oversize, not UTF-8) or
//   a placement `GameControl` rejects: the sender forfeits. `you_lose` to
//   them, `you_win` to the other, no simulation. This is a normal session
//   end and is reported in `SessionReport`.
// - EOF from a participant during handshake or placement: logged at error
//   level, no result is broadcast, `SessionError::Disconnected`.

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

use derive_more::Display;
use lifegame_engine::{GameConfig, GameControl, Outcome, PlacementRejection};
use lifegame_protocol::{Board, CellCounts, FieldInfo, Observation, PlacementCommand, Player, Status};
use tracing::{error, info, warn};

use crate::error::{SessionError, SessionStage};
use crate::session::Client;

/// Default listen port for the standalone binary.
pub const DEFAULT_PORT: u16 = 2000;

/// Configuration for `start_server`.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub game: GameConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: DEFAULT_PORT,
            game: GameConfig::default(),
        }
    }
}

/// Why a participant lost without a simulation.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum ForfeitReason {
    #[display("illegal move: {_0}")]
    IllegalMove(PlacementRejection),
    #[display("malformed placement {line:?}: {message}")]
    Malformed { line: String, message: String },
}

/// How a session that was not aborted ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Completed { outcome: Outcome, count: CellCounts },
    Forfeit { loser: Player, reason: ForfeitReason },
}

/// Summary of a finished session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReport {
    /// Display names, by connection index.
    pub names: [String; 2],
    pub end: SessionEnd,
    /// Final board: after simulation, or as it stood at the forfeit.
    pub board: Board,
}

impl SessionReport {
    /// The winning player, or `None` for a draw.
    pub fn winner(&self) -> Option<Player> {
        match &self.end {
            SessionEnd::Completed {
                outcome: Outcome::Winner(player),
                ..
            } => Some(*player),
            SessionEnd::Completed {
                outcome: Outcome::Draw,
                ..
            } => None,
            SessionEnd::Forfeit { loser, .. } => Some(loser.opponent()),
        }
    }
}

/// Handle returned by `start_server`.
pub struct ServerHandle {
    thread: thread::JoinHandle<Result<SessionReport, SessionError>>,
}

impl ServerHandle {
    /// Wait for the session to end and return its result.
    pub fn join(self) -> Result<SessionReport, SessionError> {
        match self.thread.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

/// Bind and run one session on a background thread. Returns the handle and
/// the bound address (port 0 lets the OS pick).
pub fn start_server(config: ServerConfig) -> io::Result<(ServerHandle, SocketAddr)> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))?;
    let addr = listener.local_addr()?;
    let game = config.game;
    let thread = thread::spawn(move || serve(&listener, &game));
    Ok((ServerHandle { thread }, addr))
}

/// Accept two participants on `listener` and play one game. Blocks until the
/// session ends. Both connections are closed on return.
pub fn serve(listener: &TcpListener, config: &GameConfig) -> Result<SessionReport, SessionError> {
    config.validate()?;
    let info = config.field_info();
    info!(
        height = info.height,
        width = info.width,
        quota = config.placement_quota,
        generations = config.generations,
        "waiting for participants"
    );

    let first = accept_participant(listener, 0, info)?;
    let second = accept_participant(listener, 1, info)?;
    let mut clients = [first, second];
    run_game(&mut clients, config)
}

fn accept_participant(
    listener: &TcpListener,
    index: usize,
    info: FieldInfo,
) -> Result<Client<BufReader<TcpStream>, BufWriter<TcpStream>>, SessionError> {
    let (stream, peer) = listener.accept()?;
    info!(index, %peer, "participant connected");
    let reader = BufReader::new(stream.try_clone()?);
    let writer = BufWriter::new(stream);
    Client::handshake(index, reader, writer, info).inspect_err(|e| {
        error!(index, error = %e, "handshake failed");
    })
}

/// Play one game between two handshaken participants.
pub fn run_game<R: BufRead, W: Write>(
    clients: &mut [Client<R, W>; 2],
    config: &GameConfig,
) -> Result<SessionReport, SessionError> {
    let names = [clients[0].name().to_owned(), clients[1].name().to_owned()];
    let mut game = GameControl::new(config.clone());
    info!(player1 = %names[0], player2 = %names[1], "game started");

    while !game.is_placement_complete() {
        let current = game.current_player();
        let waiting = 1 - current;
        clients[current].send_status(Status::Placement)?;
        clients[waiting].send_status(Status::Waiting)?;

        let line = match clients[current].read_line() {
            Ok(Some(line)) => line,
            Ok(None) => {
                error!(index = current, name = %names[current], "participant disconnected");
                return Err(SessionError::Disconnected {
                    index: current,
                    stage: SessionStage::Placement,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                let reason = ForfeitReason::Malformed {
                    line: String::new(),
                    message: e.to_string(),
                };
                return forfeit(clients, &game, current, reason, names);
            }
            Err(e) => {
                error!(index = current, name = %names[current], error = %e, "read failed");
                return Err(e.into());
            }
        };

        let applied = PlacementCommand::parse(&line)
            .map_err(|e| ForfeitReason::Malformed {
                line: line.clone(),
                message: e.to_string(),
            })
            .and_then(|command| {
                game.place_cell(current, command.place)
                    .map_err(ForfeitReason::IllegalMove)
            });
        match applied {
            Ok(observation) => broadcast(clients, &observation)?,
            Err(reason) => return forfeit(clients, &game, current, reason, names),
        }
    }

    for client in clients.iter_mut() {
        client.send_status(Status::Simulation)?;
    }
    let result = game.run_simulation();
    broadcast(clients, &result)?;

    let outcome = game.outcome();
    for client in clients.iter_mut() {
        let status = outcome.status_for(client.player());
        client.send_status(status)?;
    }
    info!(?outcome, "game ended");

    let (board, count) = match result {
        Observation::LifeResult { board, count } => (board, count),
        Observation::Placement { board, .. } => (board, game.field().counts()),
    };
    Ok(SessionReport {
        names,
        end: SessionEnd::Completed { outcome, count },
        board,
    })
}

fn broadcast<R: BufRead, W: Write>(
    clients: &mut [Client<R, W>; 2],
    observation: &Observation,
) -> io::Result<()> {
    for client in clients.iter_mut() {
        client.send_json(observation)?;
    }
    Ok(())
}

/// End the game with `loser` forfeiting. The loser may already have hung up,
/// so a failed write to them is only logged.
fn forfeit<R: BufRead, W: Write>(
    clients: &mut [Client<R, W>; 2],
    game: &GameControl,
    loser: usize,
    reason: ForfeitReason,
    names: [String; 2],
) -> Result<SessionReport, SessionError> {
    warn!(index = loser, name = %names[loser], %reason, "participant forfeits");
    if let Err(e) = clients[loser].send_status(Status::YouLose) {
        warn!(index = loser, error = %e, "could not notify forfeiting participant");
    }
    clients[1 - loser].send_status(Status::YouWin)?;
    Ok(SessionReport {
        names,
        end: SessionEnd::Forfeit {
            loser: Player::from_index(loser),
            reason,
        },
        board: game.field().get_board_state(),
    })
}
