/*
shape.rs

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

//! Draw the outline of a level.
//!
//! Two strategies, picked at random for each level:
//!
//! * Overlapping rectangles: a base rectangle, then rectangles that each overlap a cell already
//!   in the shape. The result looks like an organic blob.
//! * Corridor rooms: two or three separated rooms, joined by L-shaped corridors. The rooms are
//!   kept so that the user interface can draw their borders.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;

use super::config::GeneratorConfig;
use crate::board::{Board, Position, Room};
use crate::tiles::TileType;

/// Attempts to place one room before giving up on it.
const ROOM_PLACEMENT_ATTEMPTS: usize = 30;

/// Outline of a level.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub width: usize,
    pub height: usize,

    /// Cells inside the shape. Ordered so that random picks depend on the seed only.
    pub cells: BTreeSet<Position>,

    /// Rooms of the corridor strategy. Empty for the overlapping rectangles.
    pub rooms: Vec<Room>,
}

impl Shape {
    /// Build the board: grass inside the shape, void outside.
    pub fn to_board(&self) -> Board {
        let mut board: Board = Board::new(self.width, self.height, TileType::Void);
        for p in &self.cells {
            board.set(*p, TileType::Grass);
        }
        board
    }
}

/// [`ShapeBuilder`] object.
pub struct ShapeBuilder {
    min_width: usize,
    max_width: usize,
    min_height: usize,
    max_height: usize,
    min_rectangles: usize,
    max_rectangles: usize,
}

impl ShapeBuilder {
    /// Create the object.
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            min_width: config.min_width.max(2),
            max_width: config.max_width.max(config.min_width.max(2)),
            min_height: config.min_height.max(2),
            max_height: config.max_height.max(config.min_height.max(2)),
            min_rectangles: config.min_rectangles.max(1),
            max_rectangles: config.max_rectangles.max(config.min_rectangles.max(1)),
        }
    }

    /// Build a shape with a randomly selected strategy.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Shape {
        let width: usize = rng.random_range(self.min_width..=self.max_width);
        let height: usize = rng.random_range(self.min_height..=self.max_height);

        if rng.random_bool(0.5) {
            if let Some(shape) = self.corridor_rooms(width, height, rng) {
                debug!(
                    "Shape: {} rooms in {width}x{height}, {} cells",
                    shape.rooms.len(),
                    shape.cells.len()
                );
                return shape;
            }
            debug!("Shape: rooms do not fit in {width}x{height}, using rectangles");
        }
        let shape: Shape = self.overlapping_rectangles(width, height, rng);
        debug!(
            "Shape: rectangles in {width}x{height}, {} cells",
            shape.cells.len()
        );
        shape
    }

    /// Union of rectangles, each one overlapping a cell of the previous ones.
    fn overlapping_rectangles<R: Rng>(&self, width: usize, height: usize, rng: &mut R) -> Shape {
        let w: i32 = width as i32;
        let h: i32 = height as i32;
        let mut cells: BTreeSet<Position> = BTreeSet::new();

        // Base rectangle: at least half the box in each direction
        let base_w: i32 = rng.random_range((w / 2).max(2).min(w)..=w);
        let base_h: i32 = rng.random_range((h / 2).max(2).min(h)..=h);
        let base: Room = Room {
            x: rng.random_range(0..=w - base_w),
            y: rng.random_range(0..=h - base_h),
            width: base_w,
            height: base_h,
        };
        cells.extend(base.cells());

        let count: usize = rng.random_range(self.min_rectangles..=self.max_rectangles);
        for _ in 1..count {
            let anchors: Vec<Position> = cells.iter().copied().collect();
            let Some(anchor) = anchors.choose(rng).copied() else {
                break;
            };
            let rect_w: i32 = rng.random_range(2_i32.min(w)..=(w / 2 + 1).min(w));
            let rect_h: i32 = rng.random_range(2_i32.min(h)..=(h / 2 + 1).min(h));

            // Clamping keeps the anchor inside the rectangle
            let x: i32 = (anchor.x - rng.random_range(0..rect_w)).clamp(0, w - rect_w);
            let y: i32 = (anchor.y - rng.random_range(0..rect_h)).clamp(0, h - rect_h);
            let rect: Room = Room {
                x,
                y,
                width: rect_w,
                height: rect_h,
            };
            cells.extend(rect.cells());
        }

        Shape {
            width,
            height,
            cells,
            rooms: Vec::new(),
        }
    }

    /// Separated rooms joined by corridors. Return None if fewer than two rooms fit.
    fn corridor_rooms<R: Rng>(&self, width: usize, height: usize, rng: &mut R) -> Option<Shape> {
        let w: i32 = width as i32;
        let h: i32 = height as i32;
        let wanted: usize = rng.random_range(2..=3);
        let mut rooms: Vec<Room> = Vec::with_capacity(wanted);

        for _ in 0..wanted {
            for _ in 0..ROOM_PLACEMENT_ATTEMPTS {
                let room_w: i32 = rng.random_range(2..=(w / 2).max(2));
                let room_h: i32 = rng.random_range(2..=(h / 2).max(2));
                let room: Room = Room {
                    x: rng.random_range(0..=w - room_w),
                    y: rng.random_range(0..=h - room_h),
                    width: room_w,
                    height: room_h,
                };
                if rooms.iter().all(|r| !room.overlaps(r, 1)) {
                    rooms.push(room);
                    break;
                }
            }
        }
        if rooms.len() < 2 {
            return None;
        }

        let mut cells: BTreeSet<Position> = BTreeSet::new();
        for room in &rooms {
            cells.extend(room.cells());
        }
        for pair in rooms.windows(2) {
            let horizontal_first: bool = rng.random_bool(0.5);
            corridor(
                &mut cells,
                pair[0].center(),
                pair[1].center(),
                horizontal_first,
            );
        }

        Some(Shape {
            width,
            height,
            cells,
            rooms,
        })
    }
}

/// Add a single-width L-shaped corridor between two cells.
fn corridor(cells: &mut BTreeSet<Position>, from: Position, to: Position, horizontal_first: bool) {
    let corner: Position = if horizontal_first {
        Position::new(to.x, from.y)
    } else {
        Position::new(from.x, to.y)
    };
    for (a, b) in [(from, corner), (corner, to)] {
        for x in a.x.min(b.x)..=a.x.max(b.x) {
            for y in a.y.min(b.y)..=a.y.max(b.y) {
                cells.insert(Position::new(x, y));
            }
        }
    }
}
