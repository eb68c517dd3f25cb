/*
rules.rs

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

//! Movement rules shared by the level generator and the game engine.
//!
//! A move always happens in two parts:
//!
//! 1. The player leaves the current tile, which converts according to
//!    [`TileType::left_behind`] (see [`vacate`]).
//! 2. [`plan_move`] resolves the step on the updated board: a plain step, a jump over one
//!    obstacle, and then any forced movement (water flow, ice slide, portal teleport, bounce
//!    pad launch).
//!
//! [`explore`] builds on [`plan_move`] to find every tile the player can reach from a position,
//! crossing bridge tiles (stone, water, ice, portals...) along the way.
//! The carver uses it to keep the level connected, the solver to enumerate candidate moves, and
//! the engine to validate clicks on far away tiles.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::board::{Board, Direction, Position};
use crate::tiles::{TileClass, TileType};

/// Maximum number of tiles a bounce pad throws the player.
pub const BOUNCE_DISTANCE: usize = 3;

/// Binary tide cycle. Low sand is flooded at high tide.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TidePhase {
    #[default]
    Low,
    High,
}

impl TidePhase {
    pub fn flipped(self) -> Self {
        match self {
            TidePhase::Low => TidePhase::High,
            TidePhase::High => TidePhase::Low,
        }
    }

    /// Whether the tile is under water during this phase.
    pub fn floods(self, tile: TileType) -> bool {
        self == TidePhase::High && tile == TileType::LowSand
    }
}

/// Class of a tile, taking the tide into account.
pub fn class_of(tile: TileType, tide: TidePhase) -> TileClass {
    if tide.floods(tile) {
        TileClass::Terminal
    } else {
        tile.class()
    }
}

/// Whether the player can step on the tile at the position.
pub fn enterable(board: &Board, tide: TidePhase, position: Position) -> bool {
    board
        .get(position)
        .is_some_and(|t| class_of(t, tide) == TileClass::Walkable)
}

/// Whether the player can jump over the tile at the position.
fn jumpable(board: &Board, tide: TidePhase, position: Position) -> bool {
    board
        .get(position)
        .is_some_and(|t| class_of(t, tide) == TileClass::Obstacle)
}

/// Resolved move.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// Position before the move.
    pub from: Position,

    /// Final position, once all the forced movements are done.
    pub landing: Position,

    /// Requested direction.
    pub direction: Direction,

    /// Whether the player jumped over an obstacle.
    pub jumped: bool,

    /// Tiles crossed by forced movement after the first landing, one per animation tick.
    pub trail: Vec<Position>,

    /// Entry and exit portals when the move went through a portal.
    pub teleport: Option<(Position, Position)>,

    /// Whether a bounce pad launched the player.
    pub bounced: bool,
}

/// Leave the tile at the position: the tile converts to what the player leaves behind.
///
/// Return the tile that was there before, or None outside the board.
pub fn vacate(board: &mut Board, position: Position) -> Option<TileType> {
    let tile: TileType = board.get(position)?;
    board.set(position, tile.left_behind());
    Some(tile)
}

/// Resolve a move from the given position.
///
/// The board must already be vacated (see [`vacate`]); `from_tile` is the tile the player was
/// standing on before leaving it. Return None if the move is not possible.
pub fn plan_move(
    board: &Board,
    tide: TidePhase,
    from: Position,
    from_tile: TileType,
    direction: Direction,
) -> Option<MovePlan> {
    let next: Position = from.step(direction);
    let (target, jumped) = if enterable(board, tide, next) {
        (next, false)
    } else if from_tile != TileType::Honey
        && jumpable(board, tide, next)
        && enterable(board, tide, next.step(direction))
    {
        (next.step(direction), true)
    } else {
        return None;
    };

    let mut plan: MovePlan = MovePlan {
        from,
        landing: target,
        direction,
        jumped,
        trail: Vec::new(),
        teleport: None,
        bounced: false,
    };
    resolve_chain(board, tide, &mut plan);
    Some(plan)
}

/// Apply the forced movements from the landing tile of the plan.
fn resolve_chain(board: &Board, tide: TidePhase, plan: &mut MovePlan) {
    // Water loops or facing bounce pads cannot keep the player moving forever
    let max_ticks: usize = board.width() * board.height() * 4;
    let mut current: Position = plan.landing;
    let mut heading: Direction = plan.direction;

    for _ in 0..max_ticks {
        match board.get(current) {
            Some(TileType::Water) => {
                heading = board.flow(current).unwrap_or(heading);
                let next: Position = current.step(heading);
                if !enterable(board, tide, next) {
                    break;
                }
                current = next;
                plan.trail.push(current);
            }
            Some(TileType::Ice) => {
                let next: Position = current.step(heading);
                if !enterable(board, tide, next) {
                    break;
                }
                current = next;
                plan.trail.push(current);
            }
            Some(TileType::Portal(_)) => {
                // One teleport per move, so that the player can walk away from the exit portal
                if plan.teleport.is_none()
                    && let Some(partner) = board.portal_partner(current)
                {
                    plan.teleport = Some((current, partner));
                    current = partner;
                    plan.trail.push(current);
                }
                break;
            }
            Some(TileType::BouncePad) => {
                let mut flown: usize = 0;
                while flown < BOUNCE_DISTANCE && enterable(board, tide, current.step(heading)) {
                    current = current.step(heading);
                    plan.trail.push(current);
                    flown += 1;
                }
                if flown == 0 {
                    break;
                }
                plan.bounced = true;
            }
            _ => break,
        }
    }
    plan.landing = current;
}

/// Tiles reachable from a position, with the moves to get there.
#[derive(Debug, Clone, Default)]
pub struct Reach {
    /// Starting position.
    origin: Position,

    /// For each reached position, the position the last move started from and its direction.
    parents: HashMap<Position, (Position, Direction)>,

    /// Reached tiles that need a visit, in discovery order.
    targets: Vec<Position>,
}

impl Reach {
    /// Whether the position can be reached.
    pub fn contains(&self, position: Position) -> bool {
        self.parents.contains_key(&position)
    }

    /// Reachable tiles that still need a visit, closest first.
    pub fn targets(&self) -> &[Position] {
        &self.targets
    }

    /// Directions of the moves that lead from the origin to the position.
    pub fn route(&self, position: Position) -> Option<Vec<Direction>> {
        let mut directions: Vec<Direction> = Vec::new();
        let mut current: Position = position;
        while current != self.origin {
            let (parent, direction) = self.parents.get(&current)?;
            directions.push(*direction);
            current = *parent;
        }
        directions.reverse();
        Some(directions)
    }
}

/// Find all the tiles reachable from a position.
///
/// Like [`plan_move`], the board must already be vacated. Tiles that need a visit end the
/// exploration: the player stops there. Bridge tiles are crossed, one move at a time.
pub fn explore(board: &Board, tide: TidePhase, from: Position, from_tile: TileType) -> Reach {
    let mut reach: Reach = Reach {
        origin: from,
        ..Reach::default()
    };
    let mut queue: VecDeque<(Position, TileType)> = VecDeque::from([(from, from_tile)]);

    while let Some((position, tile)) = queue.pop_front() {
        for direction in Direction::ALL {
            let Some(plan) = plan_move(board, tide, position, tile, direction) else {
                continue;
            };
            let landing: Position = plan.landing;
            if landing == from || reach.parents.contains_key(&landing) {
                continue;
            }
            reach.parents.insert(landing, (position, direction));
            match board.get(landing) {
                Some(t) if t.required_visits() > 0 => reach.targets.push(landing),
                Some(t) => queue.push_back((landing, t)),
                None => (),
            }
        }
    }
    reach
}

/// Number of visits still needed to win, not counting the visit of the tile the player is
/// standing on.
pub fn outstanding_visits(board: &Board, standing_on: Option<Position>) -> usize {
    let total: usize = board
        .positions()
        .filter_map(|p| board.get(p))
        .map(TileType::required_visits)
        .sum();
    let current: usize = standing_on
        .and_then(|p| board.get(p))
        .map_or(0, |t| t.required_visits().min(1));
    total - current
}

/// Whether every tile that needs a visit can be reached from the first one, hopping from
/// target to target. The board is not vacated along the way.
pub fn is_connected(board: &Board) -> bool {
    let required: Vec<Position> = board.cells_matching(|t| t.required_visits() > 0);
    let Some(first) = required.first() else {
        return false;
    };

    let mut seen: HashSet<Position> = HashSet::from([*first]);
    let mut stack: Vec<Position> = vec![*first];
    while let Some(position) = stack.pop() {
        let tile: TileType = match board.get(position) {
            Some(t) => t,
            None => continue,
        };
        for target in explore(board, TidePhase::Low, position, tile).targets() {
            if seen.insert(*target) {
                stack.push(*target);
            }
        }
    }
    seen.len() == required.len()
}
