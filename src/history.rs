/*
history.rs

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

//! Undo history.
//!
//! Before each accepted move, the game pushes a full copy of its [`GameplayState`]. Undoing a
//! move pops the last copy and restores it. The history is bounded: when full, the oldest
//! snapshot is dropped.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::game::GameplayState;

/// Maximum number of moves that can be undone.
pub const UNDO_LIMIT: usize = 256;

/// Bounded stack of game snapshots.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct History {
    entries: VecDeque<GameplayState>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(UNDO_LIMIT)
    }
}

impl History {
    /// Create a [`History`] object that keeps at most `limit` snapshots.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit.min(UNDO_LIMIT)),
            limit: limit.max(1),
        }
    }

    /// Save a snapshot. The oldest snapshot is dropped when the history is full.
    pub fn push(&mut self, state: GameplayState) {
        if self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(state);
    }

    /// Remove and return the last snapshot.
    pub fn pop(&mut self) -> Option<GameplayState> {
        self.entries.pop_back()
    }

    /// Snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GameplayState> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn state(moves: usize) -> GameplayState {
        let level: Level = Level::from_ascii("@...").expect("valid level");
        let mut state: GameplayState = GameplayState::new(&level);
        state.move_count = moves;
        state
    }

    #[test]
    fn pops_in_reverse_order() {
        let mut history: History = History::default();
        assert_eq!(history.pop(), None);
        history.push(state(1));
        history.push(state(2));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().map(|s| s.move_count), Some(2));
        assert_eq!(history.pop().map(|s| s.move_count), Some(1));
        assert!(history.is_empty());
    }

    #[test]
    fn drops_the_oldest_snapshot_when_full() {
        let mut history: History = History::new(3);
        for moves in 0..5 {
            history.push(state(moves));
        }
        assert_eq!(history.len(), 3);
        let remaining: Vec<usize> = std::iter::from_fn(|| history.pop())
            .map(|s| s.move_count)
            .collect();
        assert_eq!(remaining, vec![4, 3, 2]);
    }
}
