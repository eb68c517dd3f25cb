/*
board.rs

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

//! Grid coordinates, directions, and the flat board used by the generator and the engine.
//!
//! A [`Board`] can be built from an "ASCII art" representation such as:
//!
//! ```text
//! ..#..
//! .S>>.
//! .....
//! ```
//!
//! See [`TileType::symbol`] for the list of characters.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use strum_macros::FromRepr;

use crate::tiles::TileType;

/// Grid coordinates.
///
/// Coordinates are signed so that neighbor arithmetic can step outside the board. The
/// [`Board`] checks the bounds.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a [`Position`] object.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the adjacent position in the given direction.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Return the position shifted by the given offsets.
    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement and water flow directions.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Coordinate offsets for one step.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The two directions at a right angle.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    /// Direction from a position to an adjacent position.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL.into_iter().find(|d| from.step(*d) == to)
    }

    /// Parse a move letter (`U`, `D`, `L`, `R`, case insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Arrow used to draw a water tile flowing in this direction.
    pub fn arrow(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}

/// Axis-aligned rectangle. Only used to draw room borders.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.x
            && position.x < self.x + self.width
            && position.y >= self.y
            && position.y < self.y + self.height
    }

    /// Whether the two rooms overlap once this room is grown by `margin` cells on every side.
    pub fn overlaps(&self, other: &Room, margin: i32) -> bool {
        self.x - margin < other.x + other.width
            && other.x < self.x + self.width + margin
            && self.y - margin < other.y + other.height
            && other.y < self.y + self.height + margin
    }

    /// Center cell of the room.
    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// All the cells of the room.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Position::new(x, y)))
    }
}

/// Errors raised while parsing an ASCII art board.
#[derive(Debug, PartialEq)]
pub enum AsciiError {
    /// The art has no rows.
    Empty,

    /// The character does not represent a tile.
    UnknownSymbol { symbol: char, position: Position },

    /// More than one start marker.
    MultipleStarts,

    /// A level requires a start marker (`@`).
    MissingStart,
}

impl fmt::Display for AsciiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AsciiError::Empty => write!(f, "the board is empty"),
            AsciiError::UnknownSymbol { symbol, position } => {
                write!(f, "unknown tile symbol {symbol:?} at {position}")
            }
            AsciiError::MultipleStarts => write!(f, "more than one start marker"),
            AsciiError::MissingStart => write!(f, "no start marker"),
        }
    }
}

impl Error for AsciiError {}

/// Flat grid of tiles, indexed by `y * width + x`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,

    /// Tiles, row after row.
    tiles: Vec<TileType>,

    /// Flow direction of the water tiles.
    flows: Vec<Option<Direction>>,
}

impl Board {
    /// Create a board filled with the given tile.
    pub fn new(width: usize, height: usize, fill: TileType) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width * height],
            flows: vec![None; width * height],
        }
    }

    /// Build a board from rows of tiles. Short rows are padded with [`TileType::Void`].
    pub fn from_rows(rows: &[Vec<TileType>]) -> Self {
        let width: usize = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut board: Board = Board::new(width, rows.len(), TileType::Void);
        for (y, row) in rows.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                board.tiles[y * width + x] = *tile;
            }
        }
        board
    }

    /// Parse an ASCII art board. Return the board and the position of the `@` start marker,
    /// if any. The start marker stands on a grass tile.
    ///
    /// Leading and trailing blank lines are ignored, rows are padded with void tiles.
    pub fn from_ascii(art: &str) -> Result<(Self, Option<Position>), AsciiError> {
        let rows: Vec<&str> = art.lines().map(str::trim_end).collect();
        let first: Option<usize> = rows.iter().position(|r| !r.is_empty());
        let last: Option<usize> = rows.iter().rposition(|r| !r.is_empty());
        let (first, last) = match (first, last) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(AsciiError::Empty),
        };
        let rows: &[&str] = &rows[first..=last];
        let width: usize = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        let mut board: Board = Board::new(width, rows.len(), TileType::Void);
        let mut start: Option<Position> = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                let position: Position = Position::new(x as i32, y as i32);
                if symbol == '@' {
                    if start.is_some() {
                        return Err(AsciiError::MultipleStarts);
                    }
                    start = Some(position);
                    board.set(position, TileType::Grass);
                    continue;
                }
                let (tile, flow) = TileType::from_symbol(symbol)
                    .ok_or(AsciiError::UnknownSymbol { symbol, position })?;
                board.set(position, tile);
                board.set_flow(position, flow);
            }
        }
        Ok((board, start))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the tile and flow vectors match the board size. Always true for boards built by
    /// this module, but not for deserialized ones.
    pub fn is_well_formed(&self) -> bool {
        self.tiles.len() == self.width * self.height && self.flows.len() == self.tiles.len()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.width
            && (position.y as usize) < self.height
    }

    /// Flat index of the position, or None outside the board.
    pub fn index(&self, position: Position) -> Option<usize> {
        if self.in_bounds(position) {
            Some(position.y as usize * self.width + position.x as usize)
        } else {
            None
        }
    }

    /// Position of the given flat index.
    pub fn position(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Tile at the position, or None outside the board.
    pub fn get(&self, position: Position) -> Option<TileType> {
        self.index(position).and_then(|i| self.tiles.get(i).copied())
    }

    /// Change the tile at the position. Positions outside the board are ignored.
    pub fn set(&mut self, position: Position, tile: TileType) {
        if let Some(t) = self.index(position).and_then(|i| self.tiles.get_mut(i)) {
            *t = tile;
        }
    }

    /// Flow direction of the water tile at the position.
    pub fn flow(&self, position: Position) -> Option<Direction> {
        self.index(position)
            .and_then(|i| self.flows.get(i).copied().flatten())
    }

    pub fn set_flow(&mut self, position: Position, flow: Option<Direction>) {
        if let Some(f) = self.index(position).and_then(|i| self.flows.get_mut(i)) {
            *f = flow;
        }
    }

    /// All the positions of the board, row after row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.tiles.len()).map(|i| self.position(i))
    }

    /// Positions of the tiles that match the predicate, row after row.
    pub fn cells_matching<F>(&self, predicate: F) -> Vec<Position>
    where
        F: Fn(TileType) -> bool,
    {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| predicate(**t))
            .map(|(i, _)| self.position(i))
            .collect()
    }

    /// Number of tiles that match the predicate.
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(TileType) -> bool,
    {
        self.tiles.iter().filter(|t| predicate(**t)).count()
    }

    /// Number of grass and dirt tiles.
    pub fn walkable_count(&self) -> usize {
        self.count(|t| t == TileType::Grass || t == TileType::Dirt)
    }

    /// Position of the portal paired with the portal at the given position.
    ///
    /// Portals of one color are paired in row order: the first with the second, the third with
    /// the fourth, and so on. A portal without a partner returns None.
    pub fn portal_partner(&self, position: Position) -> Option<Position> {
        let color = match self.get(position)? {
            TileType::Portal(c) => c,
            _ => return None,
        };
        let same_color: Vec<Position> = self.cells_matching(|t| t == TileType::Portal(color));
        let rank: usize = same_color.iter().position(|p| *p == position)?;
        let partner: usize = if rank % 2 == 0 { rank + 1 } else { rank - 1 };
        same_color.get(partner).copied()
    }

    /// Smallest rectangle `(top_left, bottom_right)` that contains all the non-void tiles.
    pub fn bounding_box(&self) -> Option<(Position, Position)> {
        let cells: Vec<Position> = self.cells_matching(|t| t != TileType::Void);
        let first: &Position = cells.first()?;
        let mut min: Position = *first;
        let mut max: Position = *first;
        for c in &cells {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        Some((min, max))
    }

    /// Return the part of the board between the two corners (inclusive).
    pub fn crop(&self, top_left: Position, bottom_right: Position) -> Board {
        let width: usize = (bottom_right.x - top_left.x + 1).max(0) as usize;
        let height: usize = (bottom_right.y - top_left.y + 1).max(0) as usize;
        let mut board: Board = Board::new(width, height, TileType::Void);
        for p in board.positions().collect::<Vec<Position>>() {
            let source: Position = p.shifted(top_left.x, top_left.y);
            if let Some(tile) = self.get(source) {
                board.set(p, tile);
                board.set_flow(p, self.flow(source));
            }
        }
        board
    }

    /// Print the board.
    pub fn debug(&self) {
        if log_enabled!(Level::Debug) {
            for line in self.to_string().lines() {
                debug!("|{line}|");
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            let mut row: String = String::with_capacity(self.width);
            for x in 0..self.width {
                let i: usize = y * self.width + x;
                match (self.tiles.get(i), self.flows.get(i)) {
                    (Some(TileType::Water), Some(Some(d))) => row.push(d.arrow()),
                    (Some(tile), _) => row.push(tile.symbol()),
                    (None, _) => row.push('?'),
                }
            }
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::PortalColor;

    #[test]
    fn parses_and_prints_ascii_art() {
        let art: &str = "\n..#..\n.S>>.\n1 ~ 1\n";
        let (board, start) = Board::from_ascii(art).expect("valid art");
        assert_eq!(start, None);
        assert_eq!(board.width(), 5);
        assert_eq!(board.height(), 3);
        assert_eq!(board.get(Position::new(2, 0)), Some(TileType::Bramble));
        assert_eq!(board.get(Position::new(2, 1)), Some(TileType::Water));
        assert_eq!(board.flow(Position::new(3, 1)), Some(Direction::Right));
        assert_eq!(board.get(Position::new(1, 2)), Some(TileType::Void));
        assert_eq!(board.to_string(), "..#..\n.S>>.\n1 ~ 1\n");
    }

    #[test]
    fn rejects_unknown_symbols_and_double_starts() {
        assert_eq!(
            Board::from_ascii("..z").unwrap_err(),
            AsciiError::UnknownSymbol {
                symbol: 'z',
                position: Position::new(2, 0)
            }
        );
        assert_eq!(
            Board::from_ascii("@.@").unwrap_err(),
            AsciiError::MultipleStarts
        );
        assert_eq!(Board::from_ascii("\n  \n").unwrap_err(), AsciiError::Empty);
    }

    #[test]
    fn portals_pair_in_row_order() {
        let (board, _) = Board::from_ascii("1.2\n...\n2.1").expect("valid art");
        assert_eq!(
            board.portal_partner(Position::new(0, 0)),
            Some(Position::new(2, 2))
        );
        assert_eq!(
            board.portal_partner(Position::new(0, 2)),
            Some(Position::new(2, 0))
        );
        assert_eq!(board.portal_partner(Position::new(1, 1)), None);
        assert_eq!(
            board.get(Position::new(2, 0)),
            Some(TileType::Portal(PortalColor::Blue))
        );
    }

    #[test]
    fn crops_to_the_bounding_box() {
        let mut board: Board = Board::new(5, 4, TileType::Void);
        board.set(Position::new(2, 1), TileType::Grass);
        board.set(Position::new(3, 1), TileType::Water);
        board.set_flow(Position::new(3, 1), Some(Direction::Right));
        board.set(Position::new(2, 2), TileType::Grass);
        board.set(Position::new(3, 2), TileType::Stone);
        let (min, max) = board.bounding_box().expect("non-void tiles");
        assert_eq!((min, max), (Position::new(2, 1), Position::new(3, 2)));
        let cropped: Board = board.crop(min, max);
        assert_eq!(cropped.to_string(), ".>\n.S\n");
    }

    #[test]
    fn prints_damaged_boards() {
        let board: Board =
            serde_json::from_str(r#"{"width":2,"height":1,"tiles":["Grass"],"flows":[]}"#)
                .expect("valid JSON");
        assert!(!board.is_well_formed());
        assert_eq!(board.to_string(), ".?\n");
    }
}
