// Game configuration.
//
// `GameConfig` holds the protocol constants both ends must agree on: board
// dimensions, the per-player placement quota and the number of generations in
// the simulation batch. `Default` is the standard arena setup (6×6, three
// placements each, five generations). A server can load an alternative from
// JSON; missing keys fall back to the defaults.
//
// The server advertises only the dimensions on the wire. Quota and generation
// count are not negotiated, so clients whose strategies depend on them must be
// started with the same config as the server.
//
// See also: `control.rs`, which owns a `GameConfig`, and the strategies in
// `lifegame_players`, which read `generations` and `placement_quota` to
// simulate hypothetical boards.

use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use lifegame_protocol::FieldInfo;
use serde::{Deserialize, Serialize};

use crate::field::MAX_DIMENSION;

pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIDTH: usize = 6;
pub const DEFAULT_PLACEMENT_QUOTA: u32 = 3;
pub const DEFAULT_GENERATIONS: u32 = 5;

/// How an exact tie in final cell counts is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The first mover (Player One) wins ties. Standard arena rule.
    #[default]
    FirstMover,
    /// Ties are announced to both clients as `draw`.
    Draw,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    /// Placements allowed per player. Both players get the same quota.
    pub placement_quota: u32,
    /// Generations stepped in the single simulation batch.
    pub generations: u32,
    pub tie_break: TieBreak,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            placement_quota: DEFAULT_PLACEMENT_QUOTA,
            generations: DEFAULT_GENERATIONS,
            tie_break: TieBreak::FirstMover,
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("invalid config JSON: {source}")]
    Json { source: serde_json::Error },
    #[display("invalid config: {reason}")]
    Invalid { reason: String },
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::Json { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });
        if self.height == 0 || self.width == 0 {
            return invalid(format!(
                "board must be at least 1x1, got {}x{}",
                self.height, self.width
            ));
        }
        if self.height > MAX_DIMENSION || self.width > MAX_DIMENSION {
            return invalid(format!(
                "board sides are limited to {MAX_DIMENSION}, got {}x{}",
                self.height, self.width
            ));
        }
        if self.placement_quota == 0 {
            return invalid("placement quota must be at least 1".into());
        }
        if self.total_placements() > self.cell_count() {
            return invalid(format!(
                "{} placements do not fit on a {}x{} board",
                self.total_placements(),
                self.height,
                self.width
            ));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Placements made by both players together over a whole game.
    pub fn total_placements(&self) -> usize {
        2 * self.placement_quota as usize
    }

    /// Dimensions as advertised to clients.
    pub fn field_info(&self) -> FieldInfo {
        FieldInfo {
            height: self.height,
            width: self.width,
        }
    }
}
