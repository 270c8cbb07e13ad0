// Per-connection state for the server loop.
//
// A `Client` is one participant's side of the session: its connection index
// (arrival order, which fixes its `Player`), the display name it sent in the
// handshake, and its line channel. The channel is any `BufRead` reader plus
// any `Write` writer, so the same code runs on a `TcpStream` pair in
// production and on `Cursor`/`Vec<u8>` buffers in unit tests.
//
// Placement counting is not duplicated here; `GameControl` keeps each
// participant's counter and is the only thing that checks the quota.
//
// Every line sent or received is logged at `debug` with the participant
// index, which is enough to reconstruct a full session transcript from the
// server log.

use std::io::{self, BufRead, Write};

use lifegame_protocol::{FieldInfo, GREETING, Player, Status, read_line, write_json, write_line};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{SessionError, SessionStage};

pub struct Client<R, W> {
    index: usize,
    name: String,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Client<R, W> {
    pub fn new(index: usize, name: impl Into<String>, reader: R, writer: W) -> Self {
        Self {
            index,
            name: name.into(),
            reader,
            writer,
        }
    }

    /// Run the server side of the handshake on a fresh connection: greeting
    /// out, display name in, field dimensions out.
    pub fn handshake(
        index: usize,
        mut reader: R,
        mut writer: W,
        field: FieldInfo,
    ) -> Result<Self, SessionError> {
        write_line(&mut writer, GREETING)?;
        let Some(name) = read_line(&mut reader)? else {
            return Err(SessionError::Disconnected {
                index,
                stage: SessionStage::Handshake,
            });
        };
        info!(index, name = %name, "participant joined");
        let mut client = Self::new(index, name, reader, writer);
        client.send_json(&field)?;
        Ok(client)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn player(&self) -> Player {
        Player::from_index(self.index)
    }

    pub fn send_status(&mut self, status: Status) -> io::Result<()> {
        debug!(index = self.index, %status, "send status");
        write_line(&mut self.writer, status.as_str())
    }

    pub fn send_json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        debug!(index = self.index, "send payload");
        write_json(&mut self.writer, value)
    }

    /// Next line from this participant, `None` once the connection is closed.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let line = read_line(&mut self.reader)?;
        debug!(index = self.index, line = ?line, "recv");
        Ok(line)
    }

    /// Give back the channel halves.
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn handshake_writes_greeting_then_dimensions() {
        let reader = Cursor::new(b"alice\n".to_vec());
        let client = Client::handshake(
            1,
            reader,
            Vec::new(),
            FieldInfo {
                height: 6,
                width: 6,
            },
        )
        .unwrap();
        assert_eq!(client.name(), "alice");
        assert_eq!(client.player(), Player::Two);
        let (_, written) = client.into_parts();
        assert_eq!(
            String::from_utf8(written).unwrap(),
            "lifegame\n{\"height\":6,\"width\":6}\n"
        );
    }

    #[test]
    fn handshake_eof_is_disconnect() {
        let reader = Cursor::new(Vec::new());
        let err = Client::handshake(
            0,
            reader,
            Vec::new(),
            FieldInfo {
                height: 6,
                width: 6,
            },
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            SessionError::Disconnected {
                index: 0,
                stage: SessionStage::Handshake
            }
        ));
    }

    #[test]
    fn status_lines_are_bare_tokens() {
        let mut client = Client::new(0, "bob", Cursor::new(Vec::new()), Vec::new());
        client.send_status(Status::Placement).unwrap();
        client.send_status(Status::YouWin).unwrap();
        let (_, written) = client.into_parts();
        assert_eq!(written, b"placement\nyou_win\n");
    }
}
