/*
solver.rs

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

//! Find a path that visits every grass and dirt tile.
//!
//! The solver plays the level with the game engine rules: each move is replayed on a copy of
//! the [`GameplayState`], so the tiles convert exactly as they do for the player (grass into a
//! mushroom, dirt into grass...), and the tide and the lily pads change with every move. The
//! candidate moves come from [`GameplayState::successors`]. The search is a depth-first search
//! with backtracking, kept on an explicit stack of choice points, and bounded by a number of
//! expansions.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::error::Error;
use std::fmt;
use std::time::Instant;

use super::path::Path;
use crate::board::{Board, Position};
use crate::game::GameplayState;
use crate::tiles::TileType;

/// Upper bound of the expansions for one starting tile.
const MAX_EXPANSIONS: usize = 50_000;

/// Expansions allowed per grass tile, for small levels.
const EXPANSIONS_PER_TILE: usize = 5_000;

/// The search over all the starting tiles gets this many times the budget of one start.
const GLOBAL_BUDGET_FACTOR: usize = 4;

/// Type of errors.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum SolverError {
    /// The search explored every possibility: no path exists.
    NoPath,

    /// No path found before running out of expansions.
    BudgetExceeded,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::NoPath => write!(f, "no path visits every tile"),
            SolverError::BudgetExceeded => write!(f, "search budget exceeded"),
        }
    }
}

impl Error for SolverError {}

/// Number of expansions the search can use.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Budget {
    /// For one starting tile.
    pub per_start: usize,

    /// For the whole search.
    pub total: usize,
}

impl Budget {
    /// Budget for a generated board: `min(50000, grass × 5000)` per start.
    pub fn for_board(board: &Board) -> Self {
        let grass: usize = board.count(|t| t == TileType::Grass);
        let per_start: usize = MAX_EXPANSIONS.min(grass.max(1) * EXPANSIONS_PER_TILE);
        Self {
            per_start,
            total: per_start * GLOBAL_BUDGET_FACTOR,
        }
    }

    /// Same budget for one start and for the whole search.
    pub fn fixed(expansions: usize) -> Self {
        Self {
            per_start: expansions,
            total: expansions,
        }
    }
}

/// Moves still to try from one tile of the path.
struct ChoicePoint {
    /// Candidate landing tiles with the state after the move, shuffled. Tried from the end.
    candidates: Vec<(Position, GameplayState)>,
}

impl ChoicePoint {
    fn new<R: Rng>(state: &GameplayState, rng: &mut R) -> Self {
        let mut candidates: Vec<(Position, GameplayState)> = state.successors();
        candidates.shuffle(rng);
        Self { candidates }
    }
}

/// [`Solver`] object.
pub struct Solver {
    /// Board to solve. Never modified: the search works on copies.
    board: Board,

    budget: Budget,

    /// Starting tile of the last path found.
    pub starting_position: Option<Position>,

    /// Number of expansions used by the last search.
    pub iteration: usize,

    /// Duration in seconds of the last search.
    pub duration: f32,

    /// Time when the search started. Used to compute the [`Solver::duration`].
    start: Instant,
}

impl Solver {
    /// Create the object.
    pub fn new(board: &Board) -> Self {
        Self {
            board: board.clone(),
            budget: Budget::for_board(board),
            starting_position: None,
            iteration: 0,
            duration: 0.0,
            start: Instant::now(),
        }
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Find a path, trying the grass tiles as starting tiles in random order.
    ///
    /// Every start begins a fresh game: no move played yet, low tide.
    ///
    /// # Errors
    ///
    /// The method returns [`SolverError::NoPath`] if no starting tile leads to a path, or
    /// [`SolverError::BudgetExceeded`] if at least one search was abandoned before completion.
    pub fn solve<R: Rng>(&mut self, rng: &mut R) -> Result<Path, SolverError> {
        self.iteration = 0;
        self.start = Instant::now();
        self.starting_position = None;

        let mut starts: Vec<Position> = self.board.cells_matching(|t| t == TileType::Grass);
        starts.shuffle(rng);
        debug!(
            "Solving with {} candidate starts, budget {:?}",
            starts.len(),
            self.budget
        );

        let mut exceeded: bool = false;
        for start in starts {
            let remaining: usize = self.budget.total.saturating_sub(self.iteration);
            if remaining == 0 {
                debug!("    Global budget exhausted");
                exceeded = true;
                break;
            }
            let state: GameplayState = GameplayState::on_board(self.board.clone(), start);
            match self.search(state, self.budget.per_start.min(remaining), rng) {
                Ok(path) => {
                    self.starting_position = Some(start);
                    self.duration = self.start.elapsed().as_secs_f32();
                    debug!(
                        "Path found from {start}: iterations = {}  duration = {}",
                        self.iteration, self.duration
                    );
                    return Ok(path);
                }
                Err(SolverError::BudgetExceeded) => {
                    debug!("    Back: start {start} abandoned after too many expansions");
                    exceeded = true;
                }
                Err(SolverError::NoPath) => {
                    debug!("    Back: no path from start {start}");
                }
            }
        }
        self.duration = self.start.elapsed().as_secs_f32();
        if exceeded {
            Err(SolverError::BudgetExceeded)
        } else {
            Err(SolverError::NoPath)
        }
    }

    /// Find a path that completes a game in progress, with the per-start budget.
    ///
    /// The player does not need to stand on a grass tile. The search continues from the move
    /// counter, tide, and lily pads of the provided state.
    pub fn solve_from<R: Rng>(
        &mut self,
        state: &GameplayState,
        rng: &mut R,
    ) -> Result<Path, SolverError> {
        self.iteration = 0;
        self.start = Instant::now();
        self.starting_position = None;
        let res: Result<Path, SolverError> =
            self.search(state.clone(), self.budget.per_start, rng);
        self.duration = self.start.elapsed().as_secs_f32();
        if res.is_ok() {
            self.starting_position = Some(state.player);
        }
        debug!(
            "Search from {}: {:?}  iterations = {}  duration = {}",
            state.player,
            res.as_ref().map(Path::len),
            self.iteration,
            self.duration
        );
        res
    }

    /// Depth-first search from the given state.
    fn search<R: Rng>(
        &mut self,
        state: GameplayState,
        limit: usize,
        rng: &mut R,
    ) -> Result<Path, SolverError> {
        let mut path: Path = Path::new(state.board.walkable_count() * 2);
        path.push(state.player);
        if state.won {
            return Ok(path);
        }

        let mut stack: Vec<ChoicePoint> = vec![ChoicePoint::new(&state, rng)];
        let mut expansions: usize = 0;

        while let Some(point) = stack.last_mut() {
            let Some((candidate, next)) = point.candidates.pop() else {
                // Every candidate failed: go back to the previous tile
                stack.pop();
                path.pop();
                continue;
            };

            expansions += 1;
            self.iteration += 1;
            if expansions > limit {
                return Err(SolverError::BudgetExceeded);
            }

            path.push(candidate);
            if next.won {
                return Ok(path);
            }
            stack.push(ChoicePoint::new(&next, rng));
        }
        Err(SolverError::NoPath)
    }
}
