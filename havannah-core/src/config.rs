//! GameConfig - board size and rule switches, stored as JSON

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::MAX_BOARD_SIZE;
use crate::error::ConfigError;

/// Smallest board with six distinct corners
pub const MIN_BOARD_SIZE: usize = 3;

/// Channels understood by the feature encoder
pub const MAX_INPUT_CHANNELS: usize = 28;

/// Rule and encoder settings for one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of the bounding square (odd)
    pub board_size: usize,
    /// Let the second player take over the first stone
    pub use_swap_rule: bool,
    /// Feature channels produced per position
    pub num_input_channels: usize,
}

impl GameConfig {
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Enable or disable the swap rule
    pub fn with_swap_rule(mut self, use_swap_rule: bool) -> Self {
        self.use_swap_rule = use_swap_rule;
        self
    }

    /// Set the number of feature channels
    pub fn with_input_channels(mut self, channels: usize) -> Self {
        self.num_input_channels = channels;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size % 2 == 0 {
            return Err(ConfigError::EvenBoardSize(self.board_size));
        }
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSizeOutOfRange {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        if !(1..=MAX_INPUT_CHANNELS).contains(&self.num_input_channels) {
            return Err(ConfigError::InputChannelsOutOfRange {
                channels: self.num_input_channels,
                max: MAX_INPUT_CHANNELS,
            });
        }
        Ok(())
    }

    /// Environment name, e.g. `havannah_9x9`
    pub fn name(&self) -> String {
        format!("havannah_{}x{}", self.board_size, self.board_size)
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 9,
            use_swap_rule: false,
            num_input_channels: 4,
        }
    }
}
