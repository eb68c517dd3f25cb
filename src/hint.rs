/*
hint.rs

Copyright 2026 The Shroomhop developers

This file is part of Shroomhop.

Shroomhop is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Shroomhop is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Shroomhop. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Hints for a game in progress.
//!
//! The hint runs the level solver from the current [`GameplayState`], with a small expansion
//! budget. The search plays the remaining moves with the engine rules, so the tide turns and the
//! lily pads resurface as they would in the real game.
//!
//! The solver only tries the moves that end on a tile that needs a visit. When the tide or the
//! lily pads matter and the player could also spend moves hopping between bridge tiles, a failed
//! search proves nothing, and the hint is [`HintResult::Unsure`].

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::board::{Board, Direction, Position};
use crate::game::GameplayState;
use crate::generator::solver::{Budget, Solver, SolverError};
use crate::rules;
use crate::tiles::TileType;

/// Expansions allowed for one hint.
pub const HINT_BUDGET: usize = 20_000;

/// Outcome of a hint request. Exactly one applies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum HintResult {
    /// Tiles to stop on, in order, to complete the level. Empty when the level is already won.
    Path(Vec<Position>),

    /// The level cannot be completed from here. `dead_ends` are the tiles the player can
    /// still move to.
    NeedsUndo { dead_ends: Vec<Position> },

    /// The search gave up before reaching a conclusion.
    Unsure,
}

/// Compute a hint with the default budget.
pub fn find_hint(state: &GameplayState) -> HintResult {
    find_hint_with_budget(state, HINT_BUDGET)
}

/// Compute a hint, exploring at most `budget` moves.
pub fn find_hint_with_budget(state: &GameplayState, budget: usize) -> HintResult {
    if state.won {
        return HintResult::Path(Vec::new());
    }

    // Same hint for the same position
    let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(state.move_count as u64);
    let mut solver: Solver = Solver::new(&state.board).with_budget(Budget::fixed(budget));

    let result: HintResult = match solver.solve_from(state, &mut rng) {
        Ok(path) => HintResult::Path(path.get().iter().skip(1).copied().collect()),
        Err(SolverError::NoPath) if depends_on_timing(state) => HintResult::Unsure,
        Err(SolverError::NoPath) => HintResult::NeedsUndo {
            dead_ends: dead_ends(state),
        },
        Err(SolverError::BudgetExceeded) => HintResult::Unsure,
    };
    debug!(
        "Hint from {}: {result:?} (iterations = {})",
        state.player, solver.iteration
    );
    result
}

/// Whether the player could change the outcome by spending moves on bridge tiles while the
/// tide turns or the lily pads resurface.
fn depends_on_timing(state: &GameplayState) -> bool {
    if !state.cooldowns.is_empty() {
        return true;
    }
    let timed: usize = state
        .board
        .count(|t| matches!(t, TileType::LowSand | TileType::Pond));
    timed > 0 && state.board.count(TileType::is_bridge) > 0
}

/// Landing tiles of the moves available from the player position.
fn dead_ends(state: &GameplayState) -> Vec<Position> {
    let mut board: Board = state.board.clone();
    let tile: TileType = rules::vacate(&mut board, state.player).unwrap_or(TileType::Void);
    let landings: BTreeSet<Position> = Direction::ALL
        .into_iter()
        .filter_map(|d| rules::plan_move(&board, state.tide, state.player, tile, d))
        .map(|plan| plan.landing)
        .collect();
    landings.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::rules::TidePhase;

    fn state(art: &str) -> GameplayState {
        GameplayState::new(&Level::from_ascii(art).expect("valid level"))
    }

    #[test]
    fn finds_the_remaining_tiles() {
        let hint: HintResult = find_hint(&state("@...."));
        assert_eq!(
            hint,
            HintResult::Path(vec![
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(3, 0),
                Position::new(4, 0)
            ])
        );
    }

    #[test]
    fn asks_for_an_undo_when_stuck() {
        // The middle tile cannot be reached without leaving one side behind
        let hint: HintResult = find_hint(&state(".@.\n#.#"));
        assert!(matches!(hint, HintResult::NeedsUndo { .. }));
        if let HintResult::NeedsUndo { dead_ends } = hint {
            assert!(!dead_ends.is_empty());
        }
    }

    #[test]
    fn gives_up_when_the_budget_is_too_small() {
        let hint: HintResult = find_hint_with_budget(&state("@.....\n......\n......"), 1);
        assert_eq!(hint, HintResult::Unsure);
    }

    #[test]
    fn keeps_searching_past_a_high_tide() {
        let level: Level = Level::from_ascii("@....\ns....").expect("valid level");
        let (_, high) = GameplayState::new(&level)
            .play(&[Direction::Right; 4])
            .expect("valid moves");
        assert_eq!(high.tide, TidePhase::High);
        assert_eq!(
            find_hint(&high),
            HintResult::Path(vec![
                Position::new(4, 1),
                Position::new(3, 1),
                Position::new(2, 1),
                Position::new(1, 1),
                Position::new(0, 1)
            ])
        );
    }

    #[test]
    fn stays_unsure_when_timing_matters() {
        // Both halves are cut off by the sea
        assert!(matches!(
            find_hint(&state("@~.\n.~.")),
            HintResult::NeedsUndo { .. }
        ));
        assert_eq!(find_hint(&state("@~.S\n.~.s")), HintResult::Unsure);
    }
}
