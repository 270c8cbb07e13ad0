// Integration smoke test for the server loop.
//
// Starts a server on localhost, connects two mock TCP participants that speak
// the protocol by hand (framing helpers plus literal JSON), and checks the
// line sequence each one sees. No strategy or client runtime is involved.

use std::io::{BufReader, BufWriter};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use lifegame_engine::{GameConfig, Outcome};
use lifegame_protocol::{FieldInfo, Observation, Player, ServerLine, Status, read_line, write_line};
use lifegame_server::{
    ServerConfig, ServerHandle, SessionEnd, SessionError, SessionStage, start_server,
};

struct MockPlayer {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
}

impl MockPlayer {
    /// Connect and complete the handshake. Returns the advertised dimensions.
    fn join(addr: SocketAddr, name: &str) -> (Self, FieldInfo) {
        let stream = TcpStream::connect(addr).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .unwrap();
        let mut player = Self {
            reader: BufReader::new(stream.try_clone().unwrap()),
            writer: BufWriter::new(stream),
        };
        assert_eq!(player.recv_raw(), "lifegame");
        write_line(&mut player.writer, name).unwrap();
        let info = serde_json::from_str(&player.recv_raw()).unwrap();
        (player, info)
    }

    fn recv_raw(&mut self) -> String {
        read_line(&mut self.reader).unwrap().expect("server closed early")
    }

    fn recv(&mut self) -> ServerLine {
        ServerLine::parse(&self.recv_raw()).unwrap()
    }

    fn expect_status(&mut self, expected: Status) {
        match self.recv() {
            ServerLine::Status(status) => assert_eq!(status, expected),
            other => panic!("expected {expected}, got {other:?}"),
        }
    }

    fn expect_observation(&mut self) -> Observation {
        match self.recv() {
            ServerLine::Observation(observation) => observation,
            other => panic!("expected observation, got {other:?}"),
        }
    }

    fn place(&mut self, row: i32, col: i32) {
        write_line(&mut self.writer, &format!("{{\"place\": [{row}, {col}]}}")).unwrap();
    }

    /// Everything left until the server closes the connection.
    fn drain(mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(Some(line)) = read_line(&mut self.reader) {
            lines.push(line);
        }
        lines
    }
}

fn local_server(game: GameConfig) -> (ServerHandle, SocketAddr) {
    start_server(ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        game,
    })
    .unwrap()
}

#[test]
fn full_session_lifecycle() {
    let (handle, addr) = local_server(GameConfig::default());

    let (mut alice, info) = MockPlayer::join(addr, "alice");
    assert_eq!(info, FieldInfo { height: 6, width: 6 });
    let (mut bob, _) = MockPlayer::join(addr, "bob");

    // Alice builds a blinker in row 1; Bob scatters lone cells that all die.
    let alice_moves = [(1, 1), (1, 2), (1, 3)];
    let bob_moves = [(4, 0), (5, 5), (3, 5)];
    for ((alice_row, alice_col), (bob_row, bob_col)) in alice_moves.into_iter().zip(bob_moves) {
        alice.expect_status(Status::Placement);
        bob.expect_status(Status::Waiting);
        alice.place(alice_row, alice_col);
        let seen_by_alice = alice.expect_observation();
        assert_eq!(seen_by_alice, bob.expect_observation());
        assert!(matches!(
            seen_by_alice,
            Observation::Placement {
                next_player: Player::Two,
                ..
            }
        ));

        alice.expect_status(Status::Waiting);
        bob.expect_status(Status::Placement);
        bob.place(bob_row, bob_col);
        let seen_by_bob = bob.expect_observation();
        assert_eq!(seen_by_bob, alice.expect_observation());
    }

    alice.expect_status(Status::Simulation);
    bob.expect_status(Status::Simulation);
    let result = alice.expect_observation();
    assert_eq!(result, bob.expect_observation());
    match &result {
        Observation::LifeResult { count, .. } => {
            assert_eq!(count.player1, 3);
            assert_eq!(count.player2, 0);
        }
        other => panic!("expected life_result, got {other:?}"),
    }
    alice.expect_status(Status::YouWin);
    bob.expect_status(Status::YouLose);
    assert!(alice.drain().is_empty());
    assert!(bob.drain().is_empty());

    let report = handle.join().unwrap();
    assert_eq!(report.names, ["alice".to_owned(), "bob".to_owned()]);
    assert!(matches!(
        report.end,
        SessionEnd::Completed {
            outcome: Outcome::Winner(Player::One),
            ..
        }
    ));
    assert_eq!(&report.board, result.board());
}

#[test]
fn occupied_cell_forfeits_over_tcp() {
    let (handle, addr) = local_server(GameConfig::default());
    let (mut alice, _) = MockPlayer::join(addr, "alice");
    let (mut bob, _) = MockPlayer::join(addr, "bob");

    alice.expect_status(Status::Placement);
    bob.expect_status(Status::Waiting);
    alice.place(2, 2);
    alice.expect_observation();
    bob.expect_observation();

    alice.expect_status(Status::Waiting);
    bob.expect_status(Status::Placement);
    bob.place(2, 2);

    bob.expect_status(Status::YouLose);
    alice.expect_status(Status::YouWin);
    assert!(alice.drain().is_empty());
    assert!(bob.drain().is_empty());

    let report = handle.join().unwrap();
    assert_eq!(report.winner(), Some(Player::One));
    assert!(matches!(
        report.end,
        SessionEnd::Forfeit {
            loser: Player::Two,
            ..
        }
    ));
}

#[test]
fn disconnect_aborts_session() {
    let (handle, addr) = local_server(GameConfig::default());
    let (mut alice, _) = MockPlayer::join(addr, "alice");
    let (bob, _) = MockPlayer::join(addr, "bob");

    alice.expect_status(Status::Placement);
    drop(bob);
    alice.place(0, 0);

    // Depending on timing the server sees either EOF or a failed write.
    let err = handle.join().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Disconnected {
            index: 1,
            stage: SessionStage::Placement
        } | SessionError::Io { .. }
    ));

    for line in alice.drain() {
        if let Ok(ServerLine::Status(status)) = ServerLine::parse(&line) {
            assert!(!status.is_terminal(), "unexpected {status}");
        }
    }
}

#[test]
fn invalid_config_is_rejected_before_accepting() {
    let config = GameConfig {
        width: 0,
        ..GameConfig::default()
    };
    let (handle, _addr) = local_server(config);
    assert!(matches!(handle.join(), Err(SessionError::Config { .. })));
}
