//! GameRecord - finished or partial games stored for replay and training

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::{MoveError, RecordError};
use crate::features::one_hot;
use crate::game::{Action, GameState};

/// Configuration plus the ordered actions of one game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub config: GameConfig,
    pub actions: Vec<Action>,
}

impl GameRecord {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            actions: Vec::new(),
        }
    }

    /// Capture the history of a game in progress or finished
    pub fn from_state(state: &GameState) -> Self {
        Self {
            config: state.config().clone(),
            actions: state.history().to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Rebuild the game on a fresh board
    pub fn replay(&self) -> Result<GameState, RecordError> {
        self.replay_to(self.actions.len())
    }

    /// Rebuild the position after the first `plies` actions
    pub fn replay_to(&self, plies: usize) -> Result<GameState, RecordError> {
        if plies > self.actions.len() {
            return Err(RecordError::PlyOutOfRange {
                ply: plies,
                len: self.actions.len(),
            });
        }

        let mut state = GameState::new(&self.config)?;
        for (ply, &action) in self.actions[..plies].iter().enumerate() {
            if action.cell >= state.policy_size() {
                return Err(RecordError::IllegalAction {
                    ply,
                    action,
                    source: MoveError::IllegalCell(action.cell),
                });
            }
            state
                .act(action)
                .map_err(|source| RecordError::IllegalAction { ply, action, source })?;
        }
        Ok(state)
    }

    /// Final score of the recorded game, Black's point of view
    pub fn value(&self) -> Result<f32, RecordError> {
        Ok(self.replay()?.eval_score(false))
    }

    /// One-hot policy target for the action played at `ply`
    pub fn action_features(&self, ply: usize) -> Result<Vec<f32>, RecordError> {
        let action = self.actions.get(ply).ok_or(RecordError::PlyOutOfRange {
            ply,
            len: self.actions.len(),
        })?;
        self.config.validate()?;
        let cells = self.config.board_size * self.config.board_size;
        if action.cell >= cells {
            return Err(RecordError::IllegalAction {
                ply,
                action: *action,
                source: MoveError::IllegalCell(action.cell),
            });
        }
        Ok(one_hot(cells, action.cell))
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record: {}", path.display()))?;
        let record: GameRecord = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse record: {}", path.display()))?;
        record
            .config
            .validate()
            .with_context(|| format!("Invalid config in record: {}", path.display()))?;
        Ok(record)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
