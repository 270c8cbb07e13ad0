// Client runtime: the participant's side of the protocol.
//
// `run_client` drives one game over any line channel; `play_game` opens the
// TCP connection and calls it. The flow mirrors the server loop:
//
//   1. read the greeting and check it,
//   2. send the display name (the strategy's name unless overridden),
//   3. read the field dimensions, which size the mirror board,
//   4. loop over server lines until a terminal status token.
//
// Each line is either a bare status token or a JSON observation
// (`ServerLine::parse`). On `placement` the strategy is asked for a cell and
// the answer is sent straight back; `waiting` and `simulation` only get
// logged. Observations replace the mirror board wholesale.
//
// ## Identity
//
// The server never tells a client which player it is. `ClientSession`
// starts out assuming Player One. The first placement observation that
// arrives before we have placed anything names the player to move next,
// and that must be us, so it fixes our identity. Player One is prompted
// before any observation exists, so the default is right for it.
//
// See also: `server.rs` for the other end, `lifegame_engine::strategy` for
// the decision point.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{TcpStream, ToSocketAddrs};

use lifegame_engine::{BoardError, Field, Strategy};
use lifegame_protocol::{
    CellCounts, FieldInfo, GREETING, Observation, PlacementCommand, Player, ServerLine, Status,
    read_line, write_json, write_line,
};
use tracing::{debug, info};

use crate::error::ClientError;

#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Display name sent in the handshake. Defaults to the strategy's name.
    pub name: Option<String>,
}

/// Mirror state a client keeps between server lines.
#[derive(Clone, Debug)]
pub struct ClientSession {
    info: FieldInfo,
    field: Field,
    me: Player,
    identity_known: bool,
    placements: u32,
    count: Option<CellCounts>,
}

impl ClientSession {
    /// Fails if the advertised dimensions are zero or over `MAX_DIMENSION`.
    pub fn new(info: FieldInfo) -> Result<Self, BoardError> {
        Ok(Self {
            field: Field::try_new(info.height, info.width)?,
            info,
            me: Player::One,
            identity_known: false,
            placements: 0,
            count: None,
        })
    }

    /// The mirror board, as of the last observation.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Who we are playing as (assumed Player One until an observation says
    /// otherwise).
    pub fn me(&self) -> Player {
        self.me
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    pub fn record_placement(&mut self) {
        // Being prompted before any observation only happens to Player One.
        self.identity_known = true;
        self.placements += 1;
    }

    /// Replace the mirror board with an observation's snapshot. The snapshot
    /// must have the dimensions announced in the handshake.
    pub fn apply(&mut self, observation: &Observation) -> Result<(), BoardError> {
        let field = Field::from_board(observation.board())?;
        if (field.height(), field.width()) != (self.info.height, self.info.width) {
            return Err(BoardError::Mismatch {
                height: self.info.height,
                width: self.info.width,
                found_height: field.height(),
                found_width: field.width(),
            });
        }
        self.field = field;
        match observation {
            Observation::Placement { next_player, .. } => {
                if !self.identity_known && self.placements == 0 {
                    self.me = *next_player;
                    self.identity_known = true;
                    debug!(me = %self.me, "identity fixed");
                }
            }
            Observation::LifeResult { count, .. } => self.count = Some(*count),
        }
        Ok(())
    }

    fn finish(self, status: Status) -> GameSummary {
        GameSummary {
            me: self.me,
            status,
            placements: self.placements,
            board: self.field,
            count: self.count,
        }
    }
}

/// What a client saw by the end of a game.
#[derive(Clone, Debug)]
pub struct GameSummary {
    pub me: Player,
    /// The terminal status token: `you_win`, `you_lose` or `draw`.
    pub status: Status,
    pub placements: u32,
    /// Last board received. Empty if the game ended before any observation.
    pub board: Field,
    /// Final counts, present only if the simulation ran.
    pub count: Option<CellCounts>,
}

/// Connect to a server and play one game.
pub fn play_game(
    addr: impl ToSocketAddrs,
    strategy: &mut dyn Strategy,
    config: &ClientConfig,
) -> Result<GameSummary, ClientError> {
    let stream = TcpStream::connect(addr)?;
    info!(peer = ?stream.peer_addr().ok(), "connected");
    let reader = BufReader::new(stream.try_clone()?);
    let writer = BufWriter::new(stream);
    run_client(reader, writer, strategy, config)
}

/// Play one game over an arbitrary line channel.
pub fn run_client<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    strategy: &mut dyn Strategy,
    config: &ClientConfig,
) -> Result<GameSummary, ClientError> {
    let greeting = read_line(&mut reader)?.ok_or(ClientError::Disconnected)?;
    if greeting != GREETING {
        return Err(ClientError::GreetingMismatch { received: greeting });
    }

    let name = config
        .name
        .clone()
        .unwrap_or_else(|| strategy.name().to_owned());
    write_line(&mut writer, &name)?;

    let info_line = read_line(&mut reader)?.ok_or(ClientError::Disconnected)?;
    let info: FieldInfo = serde_json::from_str(&info_line)?;
    info!(name = %name, height = info.height, width = info.width, "joined game");
    let mut session = ClientSession::new(info)?;

    loop {
        let line = read_line(&mut reader)?.ok_or(ClientError::Disconnected)?;
        match ServerLine::parse(&line)? {
            ServerLine::Status(Status::Placement) => {
                let place = strategy.choose_placement(session.field(), session.me())?;
                debug!(me = %session.me(), %place, "placing");
                write_json(&mut writer, &PlacementCommand { place })?;
                session.record_placement();
            }
            ServerLine::Status(status) if status.is_terminal() => {
                info!(me = %session.me(), %status, "game over");
                return Ok(session.finish(status));
            }
            ServerLine::Status(status) => debug!(%status, "status"),
            ServerLine::Observation(observation) => session.apply(&observation)?,
        }
    }
}
