// Authoritative game controller.
//
// `GameControl` is the single source of truth for one game: it owns the
// `Field` and the two `Participant`s and enforces turn order and quotas. It
// performs no I/O. The server loop (`lifegame_server::server`) feeds it
// placements read off the wire and broadcasts the `Observation`s it returns.
//
// ## Lifecycle
//
//   AwaitingPlacements --(both quotas used)--> SimulationRun
//   SimulationRun --(run_simulation)--> Finished
//
// Participant 0 (Player One) moves first and turns strictly alternate. A
// successful placement flips `current_player`; a rejected one changes
// nothing. Rejections are returned as values: the controller does not decide
// what a rejection means for the session. The server treats every rejection
// as a forfeit.
//
// ## Winner
//
// `get_winner` awards exact ties to Player One, the first mover. `outcome`
// applies the configured `TieBreak`, which can turn ties into a draw instead.
//
// See also: `field.rs` for the transition rule, `config.rs` for the quota and
// generation count.

use derive_more::{Display, Error};
use lifegame_protocol::{Observation, Player, Pos, Status};
use tracing::{debug, info};

use crate::config::{GameConfig, TieBreak};
use crate::field::Field;

/// Where the game currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingPlacements,
    SimulationRun,
    Finished,
}

/// Per-connection identity and placement bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    index: usize,
    placements: u32,
    quota: u32,
}

impl Participant {
    pub fn new(index: usize, quota: u32) -> Self {
        Self {
            index,
            placements: 0,
            quota,
        }
    }

    pub fn player(&self) -> Player {
        Player::from_index(self.index)
    }

    pub fn placements(&self) -> u32 {
        self.placements
    }

    pub fn remaining(&self) -> u32 {
        self.quota - self.placements
    }

    pub fn has_quota_left(&self) -> bool {
        self.placements < self.quota
    }

    fn record_placement(&mut self) {
        debug_assert!(self.has_quota_left());
        self.placements += 1;
    }
}

/// Why a placement was refused. Every variant is an illegal move.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum PlacementRejection {
    #[display("placement attempted during {phase:?}")]
    WrongPhase { phase: GamePhase },
    #[display("participant {index} moved out of turn (current is {current})")]
    NotYourTurn { index: usize, current: usize },
    #[display("participant {index} has used all {quota} placements")]
    QuotaExhausted { index: usize, quota: u32 },
    #[display("{pos} is outside the field")]
    OutOfBounds { pos: Pos },
    #[display("{pos} is already occupied")]
    Occupied { pos: Pos },
}

/// Final result of a game after the configured tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

impl Outcome {
    /// The terminal status token to send to `player`.
    pub fn status_for(self, player: Player) -> Status {
        match self {
            Outcome::Winner(winner) if winner == player => Status::YouWin,
            Outcome::Winner(_) => Status::YouLose,
            Outcome::Draw => Status::Draw,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameControl {
    config: GameConfig,
    field: Field,
    participants: [Participant; 2],
    current: usize,
    phase: GamePhase,
}

impl GameControl {
    pub fn new(config: GameConfig) -> Self {
        let field = Field::new(config.height, config.width);
        Self::with_field(config, field)
    }

    /// Start from a prepared field instead of an empty one. The field's
    /// dimensions take precedence over the config's.
    pub fn with_field(config: GameConfig, field: Field) -> Self {
        let quota = config.placement_quota;
        Self {
            config,
            field,
            participants: [Participant::new(0, quota), Participant::new(1, quota)],
            current: 0,
            phase: GamePhase::AwaitingPlacements,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Index of the participant whose turn it is.
    pub fn current_player(&self) -> usize {
        self.current
    }

    pub fn player_for(&self, index: usize) -> Player {
        Player::from_index(index)
    }

    /// Panics if `index` is not 0 or 1.
    pub fn participant(&self, index: usize) -> &Participant {
        &self.participants[index]
    }

    /// Apply one placement by participant `index`.
    pub fn place_cell(&mut self, index: usize, pos: Pos) -> Result<Observation, PlacementRejection> {
        if self.phase != GamePhase::AwaitingPlacements {
            return Err(PlacementRejection::WrongPhase { phase: self.phase });
        }
        if index != self.current {
            return Err(PlacementRejection::NotYourTurn {
                index,
                current: self.current,
            });
        }
        if !self.participants[index].has_quota_left() {
            return Err(PlacementRejection::QuotaExhausted {
                index,
                quota: self.config.placement_quota,
            });
        }
        let player = self.player_for(index);
        if !self.field.place(player.cell(), pos) {
            return Err(if self.field.in_bounds(pos) {
                PlacementRejection::Occupied { pos }
            } else {
                PlacementRejection::OutOfBounds { pos }
            });
        }

        self.participants[index].record_placement();
        self.current = 1 - index;
        if self.is_placement_complete() {
            self.phase = GamePhase::SimulationRun;
        }
        debug!(%player, %pos, remaining = self.participants[index].remaining(), "placement applied");

        Ok(Observation::Placement {
            board: self.field.get_board_state(),
            next_player: self.player_for(self.current),
        })
    }

    /// True once both participants have used their full quota.
    pub fn is_placement_complete(&self) -> bool {
        self.participants.iter().all(|p| !p.has_quota_left())
    }

    /// Advance the field by the configured number of generations.
    pub fn run_simulation(&mut self) -> Observation {
        self.field.advance(self.config.generations);
        self.phase = GamePhase::Finished;
        let count = self.field.counts();
        info!(
            generations = self.config.generations,
            player1 = count.player1,
            player2 = count.player2,
            "simulation finished"
        );
        Observation::LifeResult {
            board: self.field.get_board_state(),
            count,
        }
    }

    /// Player with strictly more live cells. Ties go to Player One.
    pub fn get_winner(&self) -> Player {
        let counts = self.field.counts();
        if counts.player2 > counts.player1 {
            Player::Two
        } else {
            Player::One
        }
    }

    pub fn outcome(&self) -> Outcome {
        let counts = self.field.counts();
        match self.config.tie_break {
            TieBreak::Draw if counts.player1 == counts.player2 => Outcome::Draw,
            _ => Outcome::Winner(self.get_winner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegame_protocol::{Cell, CellCounts};

    fn small_config() -> GameConfig {
        GameConfig {
            height: 4,
            width: 4,
            placement_quota: 2,
            generations: 1,
            ..GameConfig::default()
        }
    }

    #[test]
    fn turns_alternate_from_participant_zero() {
        let mut game = GameControl::new(small_config());
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.phase(), GamePhase::AwaitingPlacements);

        let obs = game.place_cell(0, Pos::new(0, 0)).unwrap();
        match obs {
            Observation::Placement { board, next_player } => {
                assert_eq!(board[0][0], Cell::Player1);
                assert_eq!(next_player, Player::Two);
            }
            other => panic!("unexpected observation {other:?}"),
        }
        assert_eq!(game.current_player(), 1);

        let obs = game.place_cell(1, Pos::new(3, 3)).unwrap();
        assert_eq!(obs.board()[3][3], Cell::Player2);
        assert_eq!(game.current_player(), 0);
    }

    #[test]
    fn out_of_turn_is_rejected_without_state_change() {
        let mut game = GameControl::new(small_config());
        let err = game.place_cell(1, Pos::new(0, 0)).unwrap_err();
        assert_eq!(err, PlacementRejection::NotYourTurn { index: 1, current: 0 });
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.field().count(Cell::Empty), 16);
    }

    #[test]
    fn occupied_and_out_of_bounds_are_distinguished() {
        let mut game = GameControl::new(small_config());
        game.place_cell(0, Pos::new(1, 1)).unwrap();

        let err = game.place_cell(1, Pos::new(1, 1)).unwrap_err();
        assert_eq!(err, PlacementRejection::Occupied { pos: Pos::new(1, 1) });
        let err = game.place_cell(1, Pos::new(-1, 2)).unwrap_err();
        assert_eq!(err, PlacementRejection::OutOfBounds { pos: Pos::new(-1, 2) });
        let err = game.place_cell(1, Pos::new(4, 0)).unwrap_err();
        assert_eq!(err, PlacementRejection::OutOfBounds { pos: Pos::new(4, 0) });

        // Rejections did not consume quota or the turn.
        assert_eq!(game.participant(1).placements(), 0);
        assert_eq!(game.current_player(), 1);
        assert_eq!(game.field().count(Cell::Player2), 0);
    }

    #[test]
    fn placement_completes_after_both_quotas() {
        let mut game = GameControl::new(small_config());
        let moves = [(0, 0), (3, 3), (0, 1), (3, 2)];
        for (turn, (row, col)) in moves.into_iter().enumerate() {
            assert!(!game.is_placement_complete());
            game.place_cell(turn % 2, Pos::new(row, col)).unwrap();
        }
        assert!(game.is_placement_complete());
        assert_eq!(game.phase(), GamePhase::SimulationRun);
        assert_eq!(game.participant(0).remaining(), 0);
        assert_eq!(game.participant(1).remaining(), 0);

        let err = game.place_cell(0, Pos::new(2, 2)).unwrap_err();
        assert_eq!(
            err,
            PlacementRejection::WrongPhase {
                phase: GamePhase::SimulationRun
            }
        );
    }

    #[test]
    fn quota_is_checked_before_the_field() {
        // Unequal quotas are not reachable through GameConfig, but the
        // participant check must still fire on its own.
        let mut game = GameControl::new(small_config());
        game.participants[0].placements = 2;
        let err = game.place_cell(0, Pos::new(9, 9)).unwrap_err();
        assert_eq!(err, PlacementRejection::QuotaExhausted { index: 0, quota: 2 });
    }

    #[test]
    fn simulation_runs_configured_generations() {
        let config = GameConfig {
            generations: 2,
            ..small_config()
        };
        let mut field = Field::new(4, 4);
        // Horizontal blinker: period 2, so two generations return to start.
        for col in 0..3 {
            field.place(Cell::Player1, Pos::new(1, col));
        }
        let before = field.clone();
        let mut game = GameControl::with_field(config, field);
        let obs = game.run_simulation();
        assert_eq!(game.phase(), GamePhase::Finished);
        assert_eq!(game.field(), &before);
        match obs {
            Observation::LifeResult { count, .. } => {
                assert_eq!(
                    count,
                    CellCounts {
                        player1: 3,
                        player2: 0
                    }
                );
            }
            other => panic!("unexpected observation {other:?}"),
        }
    }

    #[test]
    fn winner_by_majority() {
        let mut field = Field::new(4, 4);
        field.place(Cell::Player2, Pos::new(0, 0));
        field.place(Cell::Player2, Pos::new(3, 3));
        field.place(Cell::Player1, Pos::new(0, 3));
        let game = GameControl::with_field(small_config(), field);
        assert_eq!(game.get_winner(), Player::Two);
        assert_eq!(game.outcome(), Outcome::Winner(Player::Two));
    }

    #[test]
    fn tie_goes_to_first_mover() {
        let mut field = Field::new(4, 4);
        field.place(Cell::Player1, Pos::new(0, 0));
        field.place(Cell::Player2, Pos::new(3, 3));
        let game = GameControl::with_field(small_config(), field.clone());
        assert_eq!(game.get_winner(), Player::One);
        assert_eq!(game.get_winner().index(), 0);
        assert_eq!(game.outcome(), Outcome::Winner(Player::One));

        // Empty board is also a tie.
        let game = GameControl::new(small_config());
        assert_eq!(game.get_winner(), Player::One);

        let draw_config = GameConfig {
            tie_break: TieBreak::Draw,
            ..small_config()
        };
        let game = GameControl::with_field(draw_config, field);
        assert_eq!(game.get_winner(), Player::One);
        assert_eq!(game.outcome(), Outcome::Draw);
    }

    #[test]
    fn outcome_status_tokens() {
        let won = Outcome::Winner(Player::Two);
        assert_eq!(won.status_for(Player::Two), Status::YouWin);
        assert_eq!(won.status_for(Player::One), Status::YouLose);
        assert_eq!(Outcome::Draw.status_for(Player::One), Status::Draw);
    }
}
