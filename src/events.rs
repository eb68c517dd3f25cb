/*
events.rs

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

//! Notifications for the presentation layer.
//!
//! The game queues events as moves are resolved. The caller drains them with
//! [`crate::game::Game::take_events`] and decides what to draw or play. The game never waits
//! for an answer.

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::tiles::TileType;

/// Sound to play. Playback belongs to the caller.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AudioCue {
    GrassStep,
    DirtStep,
    SandStep,
    StoneStep,
    Splash,
    IceSlide,
    LilyPad,
    Boing,
    Sticky,
    AcornCrunch,
    Warp,
    Jump,
    Win,
}

impl AudioCue {
    /// Sound for landing on the tile.
    pub fn for_landing(tile: TileType) -> Option<Self> {
        match tile {
            TileType::Grass => Some(AudioCue::GrassStep),
            TileType::Dirt => Some(AudioCue::DirtStep),
            TileType::LowSand => Some(AudioCue::SandStep),
            TileType::Stone => Some(AudioCue::StoneStep),
            TileType::Water => Some(AudioCue::Splash),
            TileType::Ice => Some(AudioCue::IceSlide),
            TileType::Pond => Some(AudioCue::LilyPad),
            TileType::BouncePad => Some(AudioCue::Boing),
            TileType::Honey => Some(AudioCue::Sticky),
            TileType::Acorn => Some(AudioCue::AcornCrunch),
            TileType::Portal(_) => Some(AudioCue::Warp),
            _ => None,
        }
    }
}

/// Game notification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The player reached a new tile. `moves` is the move counter after the move.
    MoveCompleted {
        from: Position,
        to: Position,
        moves: usize,
    },

    /// Number of planted mushrooms on the board.
    MushroomCountChanged(usize),

    Won,

    /// The player cannot move anymore but tiles still need a visit.
    Stuck,

    Cue(AudioCue),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::PortalColor;

    #[test]
    fn obstacles_have_no_landing_sound() {
        assert_eq!(AudioCue::for_landing(TileType::Bramble), None);
        assert_eq!(AudioCue::for_landing(TileType::Mushroom), None);
        assert_eq!(
            AudioCue::for_landing(TileType::Portal(PortalColor::Green)),
            Some(AudioCue::Warp)
        );
    }
}
