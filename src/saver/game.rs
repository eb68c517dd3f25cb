/*
game.rs

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

//! Save and restore the game in progress.
//!
//! The game is saved in the `savegame.json` file, as a serialization of the [`Game`] object in
//! JSON format by using [`serde`], together with the time of the save. The undo history is part
//! of the save, so players can still undo their moves after reloading.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::game::Game;

/// Content of the save file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SavedGame {
    /// When the game was saved.
    pub saved_at: DateTime<Utc>,

    pub game: Game,
}

/// Object to save and restore a game in progress.
pub struct SaverGame {
    /// Path to the save file.
    save_file: PathBuf,
}

impl SaverGame {
    /// Create a [`SaverGame`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the game must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("savegame.json");
        debug!("Save game file: {data_dir:?}");
        SaverGame {
            save_file: data_dir,
        }
    }

    /// Retrieve the saved game.
    ///
    /// Return None if there is no saved game.
    ///
    /// # Errors
    ///
    /// The method returns an error if the file cannot be read, is not valid JSON, or holds a
    /// game state or an undo snapshot that does not match its level.
    pub fn get_game(&self) -> Result<Option<SavedGame>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let saved: SavedGame = serde_json::from_reader(reader)?;

        saved.game.validate()?;
        debug!("Loaded the game saved at {}", saved.saved_at);
        Ok(Some(saved))
    }

    /// Save the provided [`Game`] object.
    pub fn save_game(&self, game: &Game) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        let saved: SavedGame = SavedGame {
            saved_at: Utc::now(),
            game: game.clone(),
        };
        serde_json::to_writer(&mut writer, &saved)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved game.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
