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

//! Manage the status of a game in progress.
//!
//! [`Game`] is the only writer of the [`GameplayState`]. A move request is resolved completely
//! (jumps, slides, teleports, bounces) on a copy of the state. The copy replaces the current
//! state only if every part of the request is valid, so a rejected request never leaves a trace.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::board::{Board, Direction, Position};
use crate::events::{AudioCue, GameEvent};
use crate::hint::{self, HintResult};
use crate::history::History;
use crate::level::{Level, position_map};
use crate::rules::{self, MovePlan, Reach, TidePhase};
use crate::tiles::TileType;

/// Number of moves between two tide changes.
pub const TIDE_PERIOD: usize = 4;

/// Number of moves a lily pad stays under water once the player leaves it.
pub const LILY_PAD_COOLDOWN: u32 = 3;

/// Everything that changes while playing a level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameplayState {
    /// Current tiles. Mushrooms appear as the player moves.
    pub board: Board,

    pub player: Position,
    pub facing: Direction,

    /// Number of moves since the start. Each part of a multi-tile request counts.
    pub move_count: usize,

    pub tide: TidePhase,

    /// Sunken lily pads and the number of moves before they resurface.
    #[serde(default, with = "position_map")]
    pub cooldowns: HashMap<Position, u32>,

    pub won: bool,
}

impl GameplayState {
    /// Create the state at the start of the level.
    pub fn new(level: &Level) -> Self {
        Self::on_board(level.board(), level.start_position)
    }

    /// Create the state of a game that starts on the given tile of the board.
    pub fn on_board(board: Board, player: Position) -> Self {
        let won: bool = rules::outstanding_visits(&board, Some(player)) == 0;
        Self {
            board,
            player,
            facing: Direction::Down,
            move_count: 0,
            tide: TidePhase::default(),
            cooldowns: HashMap::new(),
            won,
        }
    }

    /// Number of planted mushrooms.
    pub fn mushroom_count(&self) -> usize {
        self.board.count(TileType::is_mushroom)
    }

    /// Tiles the player can reach from the current position.
    pub fn reach(&self) -> Reach {
        let mut board: Board = self.board.clone();
        let tile: TileType = rules::vacate(&mut board, self.player).unwrap_or(TileType::Void);
        rules::explore(&board, self.tide, self.player, tile)
    }

    /// Play the moves on a copy of the state.
    ///
    /// Return the resolved moves and the resulting state, or None if one of the moves is not
    /// possible. The tide and the lily pads change after each move, as in the real game.
    pub fn play(&self, directions: &[Direction]) -> Option<(Vec<MovePlan>, GameplayState)> {
        if self.won || directions.is_empty() {
            return None;
        }
        let mut next: GameplayState = self.clone();
        let mut steps: Vec<MovePlan> = Vec::with_capacity(directions.len());
        for direction in directions {
            let Some(plan) = next.advance(*direction) else {
                debug!("Move {direction:?} from {} rejected", next.player);
                return None;
            };
            steps.push(plan);
        }
        Some((steps, next))
    }

    /// Play the moves that lead to the target tile, on a copy of the state.
    ///
    /// The route comes from [`GameplayState::reach`], and is then replayed move after move, so
    /// a route that crosses a tide change can still fail.
    pub fn travel(&self, target: Position) -> Option<(Vec<MovePlan>, GameplayState)> {
        if target == self.player {
            return None;
        }
        let route: Vec<Direction> = self.reach().route(target)?;
        self.play(&route).filter(|(_, next)| next.player == target)
    }

    /// Tiles that need a visit and that the player can move to, with the state after the move.
    pub fn successors(&self) -> Vec<(Position, GameplayState)> {
        let reach: Reach = self.reach();
        reach
            .targets()
            .iter()
            .filter_map(|target| {
                let route: Vec<Direction> = reach.route(*target)?;
                let (_, next) = self.play(&route)?;
                (next.player == *target).then_some((*target, next))
            })
            .collect()
    }

    /// Check that the state can be used with the level. Used when loading a saved game.
    ///
    /// # Errors
    ///
    /// The method returns a message describing the inconsistency.
    pub fn validate(&self, level: &Level) -> Result<(), String> {
        if !self.board.is_well_formed()
            || self.board.width() != level.width
            || self.board.height() != level.height
        {
            return Err(format!(
                "Board is not a {}x{} grid",
                level.width, level.height
            ));
        }
        if !self.board.in_bounds(self.player) {
            return Err(format!("Player position {} is out of bounds", self.player));
        }
        if let Some(p) = self.cooldowns.keys().find(|p| !self.board.in_bounds(**p)) {
            return Err(format!("Lily pad cooldown at {p} is out of bounds"));
        }
        Ok(())
    }

    /// Resolve one move in the given direction. Return None if the move is not possible, in
    /// which case the state must be discarded.
    fn advance(&mut self, direction: Direction) -> Option<MovePlan> {
        let from: Position = self.player;
        let from_tile: TileType = rules::vacate(&mut self.board, from)?;
        let plan: MovePlan = rules::plan_move(&self.board, self.tide, from, from_tile, direction)?;

        self.player = plan.landing;
        self.facing = direction;
        self.move_count += 1;

        // Sunken lily pads resurface once their cooldown expires
        let mut sunken: Vec<Position> = self.cooldowns.keys().copied().collect();
        sunken.sort();
        for p in sunken {
            let remaining: u32 = self.cooldowns.get(&p).copied().unwrap_or(0).saturating_sub(1);
            if remaining == 0 {
                self.cooldowns.remove(&p);
                if self.board.get(p) == Some(TileType::PondWater) {
                    self.board.set(p, TileType::Pond);
                }
            } else {
                self.cooldowns.insert(p, remaining);
            }
        }
        if from_tile == TileType::Pond {
            self.cooldowns.insert(from, LILY_PAD_COOLDOWN);
        }

        if self.move_count % TIDE_PERIOD == 0 {
            self.tide = self.tide.flipped();
            debug!("Tide is now {:?}", self.tide);
        }
        self.won = rules::outstanding_visits(&self.board, Some(self.player)) == 0;
        Some(plan)
    }
}

/// Result of a move request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The request was not possible. Nothing changed.
    Rejected,

    /// The request was applied.
    Accepted {
        /// One resolved move per part of the request, with the slides, teleports, and bounces.
        steps: Vec<MovePlan>,

        /// Whether the request completed the level.
        won: bool,
    },
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

/// Manage the status of the game in progress.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Game {
    /// Level being played.
    level: Level,

    /// Current state.
    state: GameplayState,

    /// Previous states, for undoing moves.
    history: History,

    /// Notifications not yet collected by the caller.
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Game {
    /// Create a [`Game`] object at the start of the given level.
    pub fn new(level: Level) -> Self {
        let state: GameplayState = GameplayState::new(&level);
        Self {
            level,
            state,
            history: History::default(),
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn state(&self) -> &GameplayState {
        &self.state
    }

    pub fn player(&self) -> Position {
        self.state.player
    }

    pub fn is_won(&self) -> bool {
        self.state.won
    }

    /// Move one tile in the given direction, or jump over an obstacle.
    pub fn move_in(&mut self, direction: Direction) -> MoveOutcome {
        self.apply(&[direction])
    }

    /// Move to the given tile, crossing bridge tiles if needed.
    pub fn move_to_position(&mut self, target: Position) -> MoveOutcome {
        match self.state.travel(target) {
            Some((steps, next)) => self.accept(steps, next),
            None => {
                debug!("Target {target} is out of reach");
                MoveOutcome::Rejected
            }
        }
    }

    /// Whether [`Game::move_to_position`] would accept the target.
    pub fn can_reach(&self, target: Position) -> bool {
        self.state.travel(target).is_some()
    }

    /// Revert the last accepted request. Return false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                let mushrooms: usize = self.state.mushroom_count();
                self.state = previous;
                if mushrooms != self.state.mushroom_count() {
                    self.events
                        .push(GameEvent::MushroomCountChanged(self.state.mushroom_count()));
                }
                true
            }
            None => false,
        }
    }

    /// Check that the current state and every undo snapshot match the level. Used when
    /// loading a saved game.
    ///
    /// # Errors
    ///
    /// The method returns a message describing the first inconsistency.
    pub fn validate(&self) -> Result<(), String> {
        self.level.verify(0)?;
        self.state.validate(&self.level)?;
        for (i, snapshot) in self.history.iter().enumerate() {
            snapshot
                .validate(&self.level)
                .map_err(|e| format!("Undo snapshot {i}: {e}"))?;
        }
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Go back to the start of the level. The history is cleared.
    pub fn restart(&mut self) {
        self.state = GameplayState::new(&self.level);
        self.history.clear();
        self.events
            .push(GameEvent::MushroomCountChanged(self.state.mushroom_count()));
    }

    /// Search for the remaining moves from the current position. The game is not modified.
    pub fn hint(&self) -> HintResult {
        hint::find_hint(&self.state)
    }

    /// Collect the pending notifications.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply the moves as one request.
    fn apply(&mut self, directions: &[Direction]) -> MoveOutcome {
        match self.state.play(directions) {
            Some((steps, next)) => self.accept(steps, next),
            None => MoveOutcome::Rejected,
        }
    }

    /// Replace the current state with the result of a request, and keep the previous one.
    fn accept(&mut self, steps: Vec<MovePlan>, next: GameplayState) -> MoveOutcome {
        let previous: GameplayState = std::mem::replace(&mut self.state, next);
        let mushrooms_before: usize = previous.mushroom_count();
        self.history.push(previous);
        self.notify(&steps, mushrooms_before);

        MoveOutcome::Accepted {
            steps,
            won: self.state.won,
        }
    }

    /// Queue the events of an accepted request.
    fn notify(&mut self, steps: &[MovePlan], mushrooms_before: usize) {
        for plan in steps {
            if plan.jumped {
                self.events.push(GameEvent::Cue(AudioCue::Jump));
            }
            if plan.bounced {
                self.events.push(GameEvent::Cue(AudioCue::Boing));
            }
            if plan.teleport.is_some() {
                self.events.push(GameEvent::Cue(AudioCue::Warp));
            }
            if let Some(cue) = self.state.board.get(plan.landing).and_then(AudioCue::for_landing) {
                self.events.push(GameEvent::Cue(cue));
            }
        }
        if let (Some(first), Some(last)) = (steps.first(), steps.last()) {
            self.events.push(GameEvent::MoveCompleted {
                from: first.from,
                to: last.landing,
                moves: self.state.move_count,
            });
        }

        let mushrooms: usize = self.state.mushroom_count();
        if mushrooms != mushrooms_before {
            self.events.push(GameEvent::MushroomCountChanged(mushrooms));
        }
        if self.state.won {
            info!("Level completed in {} moves", self.state.move_count);
            self.events.push(GameEvent::Cue(AudioCue::Win));
            self.events.push(GameEvent::Won);
        } else if self.state.successors().is_empty() {
            debug!("Player stuck at {}", self.state.player);
            self.events.push(GameEvent::Stuck);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(art: &str) -> Game {
        Game::new(Level::from_ascii(art).expect("valid level"))
    }

    #[test]
    fn rejected_moves_leave_no_trace() {
        let mut g: Game = game("@#\n..");
        let before: GameplayState = g.state().clone();
        assert_eq!(g.move_in(Direction::Right), MoveOutcome::Rejected);
        assert_eq!(g.move_in(Direction::Up), MoveOutcome::Rejected);
        assert_eq!(g.state(), &before);
        assert!(!g.can_undo());
        assert!(g.take_events().is_empty());
    }

    #[test]
    fn lily_pads_sink_and_resurface() {
        let mut g: Game = game("@O....\n......");
        assert!(g.move_in(Direction::Right).is_accepted());
        assert!(g.move_in(Direction::Right).is_accepted());
        let pad: Position = Position::new(1, 0);
        assert_eq!(g.state().board.get(pad), Some(TileType::PondWater));
        assert_eq!(g.state().cooldowns.get(&pad), Some(&LILY_PAD_COOLDOWN));

        assert!(g.move_in(Direction::Right).is_accepted());
        assert!(g.move_in(Direction::Right).is_accepted());
        assert_eq!(g.state().board.get(pad), Some(TileType::PondWater));
        assert!(g.move_in(Direction::Down).is_accepted());
        assert_eq!(g.state().board.get(pad), Some(TileType::Pond));
        assert!(g.state().cooldowns.is_empty());
    }

    #[test]
    fn the_tide_turns_every_few_moves() {
        let mut g: Game = game("@.......s");
        for _ in 0..TIDE_PERIOD - 1 {
            assert!(g.move_in(Direction::Right).is_accepted());
            assert_eq!(g.state().tide, TidePhase::Low);
        }
        assert!(g.move_in(Direction::Right).is_accepted());
        assert_eq!(g.state().tide, TidePhase::High);
    }

    #[test]
    fn reachability_follows_the_tide_along_the_route() {
        // The third move turns the tide while crossing the stone
        let mut g: Game = game("@...Ss\n......");
        for _ in 0..3 {
            assert!(g.move_in(Direction::Right).is_accepted());
        }
        let sand: Position = Position::new(5, 0);
        assert!(!g.can_reach(sand));
        assert_eq!(g.move_to_position(sand), MoveOutcome::Rejected);
        assert_eq!(g.state().move_count, 3);

        for target in g.state().board.positions() {
            let mut copy: Game = g.clone();
            assert_eq!(
                g.can_reach(target),
                copy.move_to_position(target).is_accepted(),
                "{target}"
            );
        }
    }

    #[test]
    fn validates_loaded_states() {
        let g: Game = game("@..\n...");
        assert_eq!(g.state().validate(g.level()), Ok(()));
        let mut bad: GameplayState = g.state().clone();
        bad.player = Position::new(5, 0);
        assert!(bad.validate(g.level()).is_err());

        let mut g: Game = game("@..\n...");
        assert!(g.move_in(Direction::Right).is_accepted());
        assert_eq!(g.validate(), Ok(()));
        let mut snapshot: GameplayState = g.history.pop().expect("a snapshot");
        snapshot.board = Board::new(2, 2, TileType::Grass);
        g.history.push(snapshot);
        assert!(g.validate().is_err());
    }
}
