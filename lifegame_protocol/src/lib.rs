// lifegame_protocol: wire protocol for the Life Game Arena.
//
// Shared by the server loop and the client runtime (`lifegame_server`) and by
// the engine (`lifegame_engine`), which produces observations. It has no game
// logic of its own.
//
// Module overview:
// - `types.rs`:    `Cell`, `Player`, `Pos`, `Board`, `CellCounts` with their
//                  integer wire encodings.
// - `message.rs`:  Status tokens, `FieldInfo`, `PlacementCommand`,
//                  `Observation`, and `ServerLine` classification.
// - `framing.rs`:  Newline-delimited framing over any `BufRead`/`Write`.
// - `error.rs`:    `ProtocolError`.
//
// Design decisions:
// - **Text lines, JSON payloads.** Status tokens are bare words; payloads are
//   compact single-line JSON. There is no version field: the status line that
//   precedes a payload tells the reader what shape to expect.
// - **No async runtime.** Framing works on blocking `std::io` streams, the
//   same way for TCP sockets and in-memory buffers in tests.

pub mod error;
pub mod framing;
pub mod message;
pub mod types;

pub use error::ProtocolError;
pub use framing::{MAX_LINE_SIZE, read_line, write_json, write_line};
pub use message::{FieldInfo, GREETING, Observation, PlacementCommand, ServerLine, Status};
pub use types::{Board, Cell, CellCounts, Player, Pos};
