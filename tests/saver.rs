/*
saver.rs

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

use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use shroomhop::board::Direction;
use shroomhop::game::Game;
use shroomhop::level::Level;
use shroomhop::saver::game::{SavedGame, SaverGame};

fn game() -> Game {
    let mut g: Game = Game::new(Level::from_ascii("@d.\n.O.\n...").expect("valid level"));
    assert!(g.move_in(Direction::Right).is_accepted());
    assert!(g.move_in(Direction::Down).is_accepted());
    g
}

#[test]
fn nothing_to_load_without_a_save() {
    let dir: TempDir = tempfile::tempdir().expect("temporary directory");
    let saver: SaverGame = SaverGame::new(dir.path().to_path_buf());
    assert!(saver.get_game().expect("no error").is_none());
}

#[test]
fn restores_the_saved_game() {
    let dir: TempDir = tempfile::tempdir().expect("temporary directory");
    let saver: SaverGame = SaverGame::new(dir.path().to_path_buf());
    let original: Game = game();
    saver.save_game(&original).expect("saved");

    let saved: SavedGame = saver.get_game().expect("no error").expect("a save");
    let mut restored: Game = saved.game;
    assert_eq!(restored.state(), original.state());
    assert_eq!(restored.level(), original.level());
    assert!(restored.can_undo());
    assert!(restored.undo());
    assert!(restored.undo());
    assert!(!restored.can_undo());

    saver.delete_save();
    assert!(saver.get_game().expect("no error").is_none());
}

#[test]
fn rejects_damaged_saves() {
    let dir: TempDir = tempfile::tempdir().expect("temporary directory");
    let saver: SaverGame = SaverGame::new(dir.path().to_path_buf());
    let file: PathBuf = dir.path().join("savegame.json");

    fs::write(&file, "{ not json").expect("written");
    assert!(saver.get_game().is_err());

    // Valid JSON, but the player is off the board
    saver.save_game(&game()).expect("saved");
    let mut content: Value =
        serde_json::from_str(&fs::read_to_string(&file).expect("read")).expect("JSON");
    content["game"]["state"]["player"]["x"] = Value::from(99);
    fs::write(&file, content.to_string()).expect("written");
    assert!(saver.get_game().is_err());
}

#[test]
fn rejects_damaged_undo_snapshots() {
    let dir: TempDir = tempfile::tempdir().expect("temporary directory");
    let saver: SaverGame = SaverGame::new(dir.path().to_path_buf());
    let file: PathBuf = dir.path().join("savegame.json");
    saver.save_game(&game()).expect("saved");

    // The current state is fine, but the first snapshot lost a tile
    let mut content: Value =
        serde_json::from_str(&fs::read_to_string(&file).expect("read")).expect("JSON");
    let tiles: &mut Vec<Value> = content["game"]["history"]["entries"][0]["board"]["tiles"]
        .as_array_mut()
        .expect("a tile list");
    tiles.pop();
    fs::write(&file, content.to_string()).expect("written");
    assert!(saver.get_game().is_err());
}
