/*
generator.rs

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

//! Generate random levels and prove that they can be solved.
//!
//! Generating a level goes through three stages, repeated until one attempt succeeds:
//!
//! * A [`shape::ShapeBuilder`] draws the outline of the level: a set of grass cells built from
//!   overlapping rectangles or from rooms joined by corridors.
//!
//! * A [`carver::Carver`] turns some of the grass into brambles, stone bridges, rivers, ice,
//!   dirt, and portal pairs. Every change that would split the level is reverted.
//!
//! * A [`solver::Solver`] searches for a path that visits every grass and dirt tile, by playing
//!   the level with the same rules as the player (see [`crate::rules`]).
//!   If the search takes too many iterations, the attempt is abandoned.
//!
//! [`orchestrator::LevelGenerator`] runs the stages, crops the result into a
//! [`crate::level::Level`], and replays the solution through the game engine as a final check.
//! All the stages draw their randomness from the generator handle provided by the caller, so a
//! seed always produces the same level.

pub mod carver;
pub mod config;
pub mod orchestrator;
pub mod path;
pub mod shape;
pub mod solver;

pub use orchestrator::{GenerationError, generate_level, generate_level_seeded};
