/*
lib.rs

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

//! Tile-hopping puzzle engine.
//!
//! The player hops across a grid and plants a mushroom on every tile they leave. A level is won
//! once every grass tile has been visited. The crate provides the level generator
//! ([`generator`]), the game engine ([`game`]) with undo and hints ([`hint`]), and the movement
//! rules that both share ([`rules`]).

pub mod board;
pub mod events;
pub mod game;
pub mod generator;
pub mod hint;
pub mod history;
pub mod level;
pub mod rules;
pub mod saver;
pub mod tiles;
