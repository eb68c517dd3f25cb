/*
path.rs

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

//! Solution path: the tiles the player stops on, in order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::board::Position;

/// Path object.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of positions.
    path: Vec<Position>,

    /// Number of times each position appears in the path. Dirt tiles appear twice.
    /// Instead of counting the positions in the [`Path::path`] vector, this
    /// [`std::collections::HashMap`] speeds up the lookup.
    visits: HashMap<Position, usize>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visits: HashMap::with_capacity(capacity),
        }
    }

    /// Create a [`Path`] object from a list of positions.
    pub fn from_positions(positions: &[Position]) -> Self {
        let mut path: Path = Path::new(positions.len());
        for p in positions {
            path.push(*p);
        }
        path
    }

    /// Add a position to the path.
    pub fn push(&mut self, position: Position) {
        self.path.push(position);
        *self.visits.entry(position).or_insert(0) += 1;
    }

    /// Remove the last position from the path.
    pub fn pop(&mut self) -> Option<Position> {
        let p: Position = self.path.pop()?;
        if let Some(count) = self.visits.get_mut(&p) {
            *count -= 1;
            if *count == 0 {
                self.visits.remove(&p);
            }
        }
        Some(p)
    }

    /// Get the number of positions in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of times the position is in the path.
    pub fn visits(&self, position: Position) -> usize {
        self.visits.get(&position).copied().unwrap_or(0)
    }

    /// Return a reference to the positions.
    pub fn get(&self) -> &[Position] {
        &self.path
    }

    /// Return the first position in the path.
    pub fn first(&self) -> Option<Position> {
        self.path.first().copied()
    }

    /// Return the last position in the path.
    pub fn last(&self) -> Option<Position> {
        self.path.last().copied()
    }

    /// Return the path with all the positions shifted by the given offsets.
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        let positions: Vec<Position> = self.path.iter().map(|p| p.shifted(dx, dy)).collect();
        Self::from_positions(&positions)
    }
}
