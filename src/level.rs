/*
level.rs

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

//! Level payload handed to the rendering layer and to the game engine.
//!
//! A [`Level`] is immutable once generated. The engine works on a [`Board`] built from it with
//! [`Level::board`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::board::{AsciiError, Board, Direction, Position, Room};
use crate::tiles::TileType;

/// Minimum number of grass and dirt tiles in a level.
pub const MIN_WALKABLE: usize = 8;

/// Serialize and deserialize position-keyed maps with Serde.
///
/// JSON objects only accept string keys, so the map is stored as a list of
/// `(position, value)` pairs, sorted by position.
pub mod position_map {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    use crate::board::Position;

    /// Serialize the map.
    pub fn serialize<V, S>(map: &HashMap<Position, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: Serialize,
        S: Serializer,
    {
        let mut entries: Vec<(&Position, &V)> = map.iter().collect();
        entries.sort_by_key(|(p, _)| **p);
        entries.serialize(serializer)
    }

    /// Deserialize the map.
    pub fn deserialize<'de, V, D>(deserializer: D) -> Result<HashMap<Position, V>, D::Error>
    where
        V: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let entries: Vec<(Position, V)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

/// Generated or hand-made level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level {
    pub width: usize,
    pub height: usize,

    /// Tiles, indexed by `grid[y][x]`.
    pub grid: Vec<Vec<TileType>>,

    /// Grass tile where the player starts.
    pub start_position: Position,

    /// Room borders, for rendering only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rooms: Vec<Room>,

    /// Flow direction of the water tiles.
    #[serde(
        default,
        with = "position_map",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub water_flow: HashMap<Position, Direction>,
}

impl Level {
    /// Create a [`Level`] object from a board.
    pub fn from_board(board: &Board, start_position: Position, rooms: Vec<Room>) -> Self {
        let grid: Vec<Vec<TileType>> = (0..board.height() as i32)
            .map(|y| {
                (0..board.width() as i32)
                    .map(|x| board.get(Position::new(x, y)).unwrap_or(TileType::Void))
                    .collect()
            })
            .collect();
        let water_flow: HashMap<Position, Direction> = board
            .positions()
            .filter_map(|p| board.flow(p).map(|d| (p, d)))
            .collect();
        Self {
            width: board.width(),
            height: board.height(),
            grid,
            start_position,
            rooms,
            water_flow,
        }
    }

    /// Parse an ASCII art level. The `@` character marks the start position.
    pub fn from_ascii(art: &str) -> Result<Self, AsciiError> {
        let (board, start) = Board::from_ascii(art)?;
        let start: Position = start.ok_or(AsciiError::MissingStart)?;
        Ok(Self::from_board(&board, start, Vec::new()))
    }

    /// ASCII art of the level, with `@` on the start tile. [`Level::from_ascii`] reads it back.
    pub fn to_ascii(&self) -> String {
        let mut rows: Vec<Vec<char>> = self
            .board()
            .to_string()
            .lines()
            .map(|l| l.chars().collect())
            .collect();
        if let Some(c) = rows
            .get_mut(self.start_position.y as usize)
            .and_then(|r| r.get_mut(self.start_position.x as usize))
        {
            *c = '@';
        }
        rows.iter()
            .map(|r| r.iter().collect::<String>() + "\n")
            .collect()
    }

    /// Build the runtime board.
    pub fn board(&self) -> Board {
        let mut board: Board = Board::from_rows(&self.grid);
        for (position, direction) in &self.water_flow {
            board.set_flow(*position, Some(*direction));
        }
        board
    }

    /// Tile at the position, or None outside the level.
    pub fn tile(&self, position: Position) -> Option<TileType> {
        if position.x < 0 || position.y < 0 {
            return None;
        }
        self.grid
            .get(position.y as usize)
            .and_then(|row| row.get(position.x as usize))
            .copied()
    }

    /// Number of grass and dirt tiles.
    pub fn walkable_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|t| **t == TileType::Grass || **t == TileType::Dirt)
            .count()
    }

    /// Verify the level invariants: the start position is in bounds and on grass, and the level
    /// has at least `min_walkable` grass and dirt tiles.
    ///
    /// # Errors
    ///
    /// The method returns a message describing the first broken invariant.
    pub fn verify(&self, min_walkable: usize) -> Result<(), String> {
        if self.grid.len() != self.height || self.grid.iter().any(|r| r.len() != self.width) {
            return Err(format!(
                "Grid does not match the {}x{} level size",
                self.width, self.height
            ));
        }
        match self.tile(self.start_position) {
            None => {
                return Err(format!(
                    "Start position {} is out of bounds",
                    self.start_position
                ));
            }
            Some(TileType::Grass) => (),
            Some(tile) => {
                return Err(format!(
                    "Start position {} is on {tile:?} instead of grass",
                    self.start_position
                ));
            }
        }
        let walkable: usize = self.walkable_count();
        if walkable < min_walkable {
            return Err(format!(
                "Only {walkable} grass and dirt tiles (at least {min_walkable} required)"
            ));
        }
        Ok(())
    }
}
