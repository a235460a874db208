//! Game state and move transition

use serde::{Deserialize, Serialize};

use crate::board::Geometry;
use crate::config::GameConfig;
use crate::error::{ConfigError, MoveError};
use crate::ring::has_ring;
use crate::union_find::GroupSet;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color. Black is player 1 and moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Single-letter tag used in records and logs
    pub fn to_char(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    BlackWins,
    WhiteWins,
    /// Board filled without any winning structure
    Draw,
}

/// Structure that ended the game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    /// One group touching two corners
    Fork,
    /// One group touching three distinct edges
    Bridge,
    /// A closed loop of at least six stones
    Ring,
}

/// A stone placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub cell: usize,
    pub player: Player,
}

impl Action {
    pub const fn new(cell: usize, player: Player) -> Self {
        Self { cell, player }
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Game state. Clone to branch; each clone is fully independent.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    geometry: Geometry,

    /// Stone owner per cell, `None` for empty and off-board cells
    board: Vec<Option<Player>>,
    /// Cells that may be played next
    legal: Vec<bool>,
    groups: GroupSet,

    /// Side to move
    turn: Player,
    winner: Option<Player>,
    win_kind: Option<WinKind>,
    /// Playable cells without a stone
    empty_count: usize,

    /// Every accepted action, including a swapped-away first stone
    history: Vec<Action>,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create an empty board for `config`
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = Geometry::new(config.board_size);
        let mut state = Self {
            config: config.clone(),
            geometry,
            board: Vec::new(),
            legal: Vec::new(),
            groups: GroupSet::new(&geometry),
            turn: Player::Black,
            winner: None,
            win_kind: None,
            empty_count: 0,
            history: Vec::new(),
        };
        state.reset();
        Ok(state)
    }

    /// Back to the empty board with Black to move
    pub fn reset(&mut self) {
        let geometry = self.geometry;
        let cells = geometry.num_cells();
        self.board.clear();
        self.board.resize(cells, None);
        self.legal.clear();
        self.legal
            .extend((0..cells).map(|cell| geometry.is_playable_cell(cell)));
        self.empty_count = self.legal.iter().filter(|&&legal| legal).count();
        self.groups.reset(&geometry);
        self.turn = Player::Black;
        self.winner = None;
        self.win_kind = None;
        self.history.clear();
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Side to move
    pub fn current_player(&self) -> Player {
        self.turn
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn win_kind(&self) -> Option<WinKind> {
        self.win_kind
    }

    pub fn empty_count(&self) -> usize {
        self.empty_count
    }

    /// Stone owner per cell
    pub fn board(&self) -> &[Option<Player>] {
        &self.board
    }

    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board[cell]
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    /// Length of the one-hot policy vector
    pub fn policy_size(&self) -> usize {
        self.geometry.num_cells()
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.empty_count == 0
    }

    pub fn result(&self) -> GameResult {
        match self.winner {
            Some(Player::Black) => GameResult::BlackWins,
            Some(Player::White) => GameResult::WhiteWins,
            None if self.empty_count == 0 => GameResult::Draw,
            None => GameResult::Ongoing,
        }
    }

    /// Score from Black's point of view: +1 Black won, -1 White won, 0 otherwise.
    ///
    /// With `is_resign` the side to move resigns.
    pub fn eval_score(&self, is_resign: bool) -> f32 {
        if is_resign {
            return match self.turn {
                Player::Black => -1.0,
                Player::White => 1.0,
            };
        }
        match self.winner {
            Some(Player::Black) => 1.0,
            Some(Player::White) => -1.0,
            None => 0.0,
        }
    }

    /// Cells to highlight after a win.
    ///
    /// The winning structure is not reconstructed, so every cell is reported.
    pub fn winning_stones(&self) -> Vec<usize> {
        if self.winner.is_none() {
            return Vec::new();
        }
        (0..self.geometry.num_cells()).collect()
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Check an action without applying it.
    ///
    /// Panics if the cell is outside the board.
    pub fn is_legal_action(&self, action: Action) -> bool {
        self.check_action(action).is_ok()
    }

    /// All legal actions for the side to move (empty once terminal)
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.legal
            .iter()
            .enumerate()
            .filter(|&(_, &legal)| legal)
            .map(|(cell, _)| Action::new(cell, self.turn))
            .collect()
    }

    fn check_action(&self, action: Action) -> Result<(), MoveError> {
        assert!(
            action.cell < self.geometry.num_cells(),
            "cell {} outside a {}x{} board",
            action.cell,
            self.geometry.size(),
            self.geometry.size()
        );

        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if action.player != self.turn {
            return Err(MoveError::WrongTurn {
                played: action.player,
                to_move: self.turn,
            });
        }
        if !self.legal[action.cell] {
            return Err(MoveError::IllegalCell(action.cell));
        }
        Ok(())
    }

    // ========================================================================
    // MOVE APPLICATION
    // ========================================================================

    /// Place a stone. On error nothing changes.
    pub fn act(&mut self, action: Action) -> Result<(), MoveError> {
        if let Err(err) = self.check_action(action) {
            tracing::debug!("Rejected {:?}: {}", action, err);
            return Err(err);
        }

        self.history.push(action);
        let cell = action.cell;
        let swapped = self.is_swap(cell);
        if swapped {
            self.board[cell] = None;
        }

        self.board[cell] = Some(action.player);
        self.legal[cell] = false;
        self.empty_count -= 1;
        if self.config.use_swap_rule {
            self.update_swap_window(cell, swapped);
        }

        self.update_winner(cell);
        self.turn = self.turn.opponent();
        Ok(())
    }

    /// Second ply on the first stone's cell, with the swap rule on
    fn is_swap(&self, cell: usize) -> bool {
        self.config.use_swap_rule && self.history.len() == 2 && self.history[0].cell == cell
    }

    /// Legality bookkeeping for the first two plies under the swap rule
    fn update_swap_window(&mut self, cell: usize, swapped: bool) {
        match self.history.len() {
            // the opponent may still claim this stone
            1 => self.legal[cell] = true,
            2 if swapped => {
                // the stone changed owner, the cell was already counted
                self.empty_count += 1;
                tracing::debug!("{:?} swapped cell {}", self.turn, cell);
            }
            2 => {
                let first = self.history[0].cell;
                self.legal[first] = false;
            }
            _ => {}
        }
    }

    /// Merge the new stone with friendly neighbours and look for a win
    fn update_winner(&mut self, cell: usize) {
        let geometry = self.geometry;
        for neighbor in geometry.neighbors(cell) {
            if self.board[neighbor] != Some(self.turn) {
                continue;
            }
            if let Some(kind) = self.groups.union(cell, neighbor) {
                self.win_kind.get_or_insert(kind);
            }
        }

        if self.win_kind.is_none() && has_ring(&geometry, &mut self.groups, cell) {
            self.win_kind = Some(WinKind::Ring);
        }

        if let Some(kind) = self.win_kind {
            self.winner = Some(self.turn);
            tracing::debug!(
                "{:?} wins by {:?} at cell {} (ply {})",
                self.turn,
                kind,
                cell,
                self.history.len()
            );
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
