//! Network input features
//!
//! Output is channel-major, then cell-major: `features[channel * cells + cell]`.
//!
//! | channels | meaning |
//! |----------|---------|
//! | 0        | stones of the side to move |
//! | 1        | stones of the opponent |
//! | 2        | Black to move (constant plane) |
//! | 3        | White to move (constant plane) |
//! | 4-9      | empty cell carrying a virtual bridge of the side to move, per direction |
//! | 10-15    | same for the opponent |
//! | 16-21    | empty cell that would form a new virtual bridge for the side to move |
//! | 22-27    | same for the opponent |

use crate::board::{MAKE_BRIDGE_OFFSETS, ON_BRIDGE_OFFSETS};
use crate::game::{GameState, Player};

const BRIDGE_DIRECTIONS: usize = 6;

/// Feature planes for the current position, `num_input_channels` of them
pub fn features(state: &GameState) -> Vec<f32> {
    let channels = state.config().num_input_channels;
    let cells = state.geometry().num_cells();
    let mover = state.current_player();
    let opponent = mover.opponent();

    let mut planes = Vec::with_capacity(channels * cells);
    for channel in 0..channels {
        for cell in 0..cells {
            let on = match channel {
                0 => state.get(cell) == Some(mover),
                1 => state.get(cell) == Some(opponent),
                2 => mover == Player::Black,
                3 => mover == Player::White,
                4..=9 => on_virtual_bridge(state, cell, mover, channel - 4),
                10..=15 => on_virtual_bridge(state, cell, opponent, channel - 10),
                16..=21 => makes_virtual_bridge(state, cell, mover, channel - 16),
                22..=27 => makes_virtual_bridge(state, cell, opponent, channel - 22),
                _ => false,
            };
            planes.push(if on { 1.0 } else { 0.0 });
        }
    }
    planes
}

/// One-hot policy target for `cell`
pub fn action_features(state: &GameState, cell: usize) -> Vec<f32> {
    one_hot(state.policy_size(), cell)
}

pub(crate) fn one_hot(len: usize, cell: usize) -> Vec<f32> {
    let mut out = vec![0.0; len];
    out[cell] = 1.0;
    out
}

/// `cell` is empty and is one of the two carriers of a bridge between two
/// `player` stones, in bridge direction `direction`
pub fn on_virtual_bridge(state: &GameState, cell: usize, player: Player, direction: usize) -> bool {
    debug_assert!(direction < BRIDGE_DIRECTIONS);
    let [own1, own2, carrier1, carrier2] = ON_BRIDGE_OFFSETS[direction];
    owned_at(state, cell, own1, player)
        && owned_at(state, cell, own2, player)
        && empty_at(state, cell, carrier1)
        && empty_at(state, cell, carrier2)
}

/// A `player` stone on empty `cell` would form a bridge in direction `direction`
pub fn makes_virtual_bridge(state: &GameState, cell: usize, player: Player, direction: usize) -> bool {
    debug_assert!(direction < BRIDGE_DIRECTIONS);
    let [partner, carrier1, carrier2] = MAKE_BRIDGE_OFFSETS[direction];
    empty_at(state, cell, (0, 0))
        && owned_at(state, cell, partner, player)
        && empty_at(state, cell, carrier1)
        && empty_at(state, cell, carrier2)
}

fn owned_at(state: &GameState, cell: usize, delta: (i32, i32), player: Player) -> bool {
    state
        .geometry()
        .offset(cell, delta)
        .is_some_and(|target| state.get(target) == Some(player))
}

/// Empty and on the hexagon; off-board cells never carry a bridge
fn empty_at(state: &GameState, cell: usize, delta: (i32, i32)) -> bool {
    let geometry = state.geometry();
    geometry
        .offset(cell, delta)
        .is_some_and(|target| geometry.is_playable_cell(target) && state.get(target).is_none())
}
