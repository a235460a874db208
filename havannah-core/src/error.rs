//! Error types for configuration, moves and game records

use crate::game::{Action, Player};

/// Invalid game configuration
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size must be odd, got {0}")]
    EvenBoardSize(usize),

    #[error("board size {size} outside {min}..={max}")]
    BoardSizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("input channel count {channels} outside 1..={max}")]
    InputChannelsOutOfRange { channels: usize, max: usize },
}

/// A rejected move. The state is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("{played:?} played but {to_move:?} is to move")]
    WrongTurn { played: Player, to_move: Player },

    #[error("cell {0} is not available")]
    IllegalCell(usize),
}

/// A game record that cannot be replayed
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("invalid record config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("illegal action {action:?} at ply {ply}: {source}")]
    IllegalAction {
        ply: usize,
        action: Action,
        source: MoveError,
    },

    #[error("ply {ply} out of range (record has {len} actions)")]
    PlyOutOfRange { ply: usize, len: usize },
}
