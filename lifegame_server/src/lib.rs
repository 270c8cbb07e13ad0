// lifegame_server: networking for the Life Game Arena.
//
// Both ends of the protocol live here: the server loop that hosts one
// two-player session, and the client runtime that plays it through a
// `Strategy`. Game rules come from `lifegame_engine`; message shapes and
// framing from `lifegame_protocol`.
//
// Module overview:
// - `server.rs`:   Accept loop, handshake, placement/simulation phases,
//                  forfeits, `start_server` for embedding.
// - `session.rs`:  `Client`, one participant's line channel and identity.
// - `client.rs`:   `run_client` / `play_game` and the `ClientSession` mirror.
// - `error.rs`:    `SessionError`, `ClientError`.
//
// Everything is blocking `std::net`/`std::io`. A session is small and
// strictly turn-based, so there is one thread of control per session and no
// async runtime.

pub mod client;
pub mod error;
pub mod server;
pub mod session;

pub use client::{ClientConfig, ClientSession, GameSummary, play_game, run_client};
pub use error::{ClientError, SessionError, SessionStage};
pub use server::{
    DEFAULT_PORT, ForfeitReason, ServerConfig, ServerHandle, SessionEnd, SessionReport, run_game,
    serve, start_server,
};
pub use session::Client;
