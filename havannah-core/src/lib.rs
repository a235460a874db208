//! Havannah Core - rule engine and incremental win detection
//!
//! This crate provides the game logic for Havannah:
//! - Board geometry (square grid trimmed to a hexagon, corner/edge flags)
//! - Union-find over stones carrying corner/edge masks (fork and bridge wins)
//! - Ring detection by degree pruning
//! - Game state with the optional swap rule
//! - Network input features and one-hot action targets
//! - Replayable game records

pub mod board;
pub mod union_find;
pub mod ring;
pub mod game;
pub mod features;
pub mod config;
pub mod record;
pub mod error;

// Re-exports for convenient access
pub use board::{Geometry, CORNER_MASK, EDGE_MASK, MAX_BOARD_SIZE};
pub use game::{Action, GameResult, GameState, Player, WinKind};
pub use features::{action_features, features};
pub use config::GameConfig;
pub use record::GameRecord;
pub use error::{ConfigError, MoveError, RecordError};
