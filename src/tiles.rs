/*
tiles.rs

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

//! Tile types and their rule tables.
//!
//! Every gameplay property of a tile is a lookup on the closed [`TileType`] enumeration:
//!
//! * [`TileType::class`]: whether the tile can be stepped on, jumped over, or neither.
//! * [`TileType::required_visits`]: how many times the player must stand on the tile to win.
//! * [`TileType::left_behind`]: what the tile turns into when the player leaves it.
//!
//! The generator and the runtime engine both go through these tables, so a level that the
//! solver proves solvable stays solvable once the player starts planting mushrooms.

use serde::{Deserialize, Serialize};
use strum_macros::FromRepr;

use crate::board::Direction;

/// Portal colors. Portals of the same color are paired.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, FromRepr)]
#[repr(u8)]
pub enum PortalColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl PortalColor {
    /// Number of available colors.
    pub const COUNT: usize = 5;

    /// Character used in the ASCII art representation.
    pub fn symbol(self) -> char {
        (b'1' + self as u8) as char
    }
}

/// Movement class of a tile. Exactly one applies to every tile type.
///
/// - A `Walkable` tile can be stepped on.
/// - An `Obstacle` blocks a step, but the player can jump over it when the tile behind is
///   walkable.
/// - A `Terminal` tile blocks both steps and jumps.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TileClass {
    Walkable,
    Obstacle,
    Terminal,
}

/// Type of a grid tile.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum TileType {
    #[default]
    Grass,
    Bramble,
    Void,
    /// Planted mushroom, left behind on grass.
    Mushroom,
    /// Bridge tile, never needs to be visited.
    Stone,
    /// River tile, carries a flow direction.
    Water,
    Ice,
    /// Turns into grass when left, so it must be visited twice.
    Dirt,
    /// Sand that floods at high tide.
    LowSand,
    Sea,
    SandMushroom,
    /// Lily pad. Sinks for a few moves after the player leaves it.
    Pond,
    /// Sunken lily pad.
    PondWater,
    BouncePad,
    /// The player cannot jump while standing on honey.
    Honey,
    HoneyMushroom,
    Acorn,
    Squirrel,
    Portal(PortalColor),
}

impl TileType {
    /// Movement class of the tile, regardless of the tide.
    pub fn class(self) -> TileClass {
        match self {
            TileType::Grass
            | TileType::Dirt
            | TileType::LowSand
            | TileType::Honey
            | TileType::Acorn
            | TileType::Stone
            | TileType::Water
            | TileType::Ice
            | TileType::BouncePad
            | TileType::Portal(_)
            | TileType::Pond => TileClass::Walkable,
            TileType::Bramble
            | TileType::Mushroom
            | TileType::SandMushroom
            | TileType::HoneyMushroom
            | TileType::Squirrel
            | TileType::PondWater => TileClass::Obstacle,
            TileType::Void | TileType::Sea => TileClass::Terminal,
        }
    }

    /// Number of times the player must stand on the tile before the level is won.
    pub fn required_visits(self) -> usize {
        match self {
            TileType::Dirt => 2,
            TileType::Grass | TileType::LowSand | TileType::Honey | TileType::Acorn => 1,
            _ => 0,
        }
    }

    /// Tile left behind when the player walks off this tile.
    pub fn left_behind(self) -> TileType {
        match self {
            TileType::Grass => TileType::Mushroom,
            TileType::Dirt => TileType::Grass,
            TileType::LowSand => TileType::SandMushroom,
            TileType::Honey => TileType::HoneyMushroom,
            TileType::Acorn => TileType::Squirrel,
            TileType::Pond => TileType::PondWater,
            other => other,
        }
    }

    /// Whether the tile is walkable but never needs to be visited.
    pub fn is_bridge(self) -> bool {
        self.class() == TileClass::Walkable && self.required_visits() == 0
    }

    /// Whether the tile is a planted mushroom of any kind.
    pub fn is_mushroom(self) -> bool {
        matches!(
            self,
            TileType::Mushroom | TileType::SandMushroom | TileType::HoneyMushroom
        )
    }

    /// Character used in the ASCII art representation. Water tiles with a flow are drawn with
    /// an arrow instead, see [`crate::board::Board`].
    pub fn symbol(self) -> char {
        match self {
            TileType::Grass => '.',
            TileType::Bramble => '#',
            TileType::Void => ' ',
            TileType::Mushroom => 'M',
            TileType::Stone => 'S',
            TileType::Water => 'w',
            TileType::Ice => 'I',
            TileType::Dirt => 'd',
            TileType::LowSand => 's',
            TileType::Sea => '~',
            TileType::SandMushroom => 'm',
            TileType::Pond => 'O',
            TileType::PondWater => 'o',
            TileType::BouncePad => 'B',
            TileType::Honey => 'h',
            TileType::HoneyMushroom => 'H',
            TileType::Acorn => 'a',
            TileType::Squirrel => 'q',
            TileType::Portal(color) => color.symbol(),
        }
    }

    /// Parse an ASCII art character into a tile and an optional water flow.
    pub fn from_symbol(symbol: char) -> Option<(TileType, Option<Direction>)> {
        let tile: TileType = match symbol {
            '.' => TileType::Grass,
            '#' => TileType::Bramble,
            ' ' => TileType::Void,
            'M' => TileType::Mushroom,
            'S' => TileType::Stone,
            'w' => TileType::Water,
            '^' => return Some((TileType::Water, Some(Direction::Up))),
            'v' => return Some((TileType::Water, Some(Direction::Down))),
            '<' => return Some((TileType::Water, Some(Direction::Left))),
            '>' => return Some((TileType::Water, Some(Direction::Right))),
            'I' => TileType::Ice,
            'd' => TileType::Dirt,
            's' => TileType::LowSand,
            '~' => TileType::Sea,
            'm' => TileType::SandMushroom,
            'O' => TileType::Pond,
            'o' => TileType::PondWater,
            'B' => TileType::BouncePad,
            'h' => TileType::Honey,
            'H' => TileType::HoneyMushroom,
            'a' => TileType::Acorn,
            'q' => TileType::Squirrel,
            '1'..='5' => TileType::Portal(PortalColor::from_repr(symbol as u8 - b'1')?),
            _ => return None,
        };
        Some((tile, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_tiles_never_need_another_visit_except_dirt() {
        for tile in [
            TileType::Grass,
            TileType::LowSand,
            TileType::Honey,
            TileType::Acorn,
        ] {
            assert_eq!(tile.required_visits(), 1);
            assert_eq!(tile.left_behind().required_visits(), 0);
            assert_eq!(tile.left_behind().class(), TileClass::Obstacle);
        }
        assert_eq!(TileType::Dirt.left_behind(), TileType::Grass);
    }

    #[test]
    fn bridges_keep_their_type_except_lily_pads() {
        for tile in [
            TileType::Stone,
            TileType::Water,
            TileType::Ice,
            TileType::BouncePad,
            TileType::Portal(PortalColor::Blue),
        ] {
            assert!(tile.is_bridge());
            assert_eq!(tile.left_behind(), tile);
        }
        assert_eq!(TileType::Pond.left_behind(), TileType::PondWater);
    }

    #[test]
    fn symbols_parse_back() {
        for tile in [
            TileType::Grass,
            TileType::Bramble,
            TileType::Void,
            TileType::Sea,
            TileType::Squirrel,
            TileType::Portal(PortalColor::Purple),
        ] {
            assert_eq!(TileType::from_symbol(tile.symbol()), Some((tile, None)));
        }
        assert_eq!(TileType::from_symbol('6'), None);
        assert_eq!(TileType::from_symbol('z'), None);
    }
}
