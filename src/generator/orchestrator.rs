/*
orchestrator.rs

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

//! Run the generation stages until a solvable level comes out.

use log::{debug, info, warn};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::error::Error;
use std::fmt;
use std::time::Instant;

use super::carver::{CarveReport, Carver};
use super::config::{GeneratorConfig, Mechanic, PartialGeneratorConfig};
use super::path::Path;
use super::shape::{Shape, ShapeBuilder};
use super::solver::{Solver, SolverError};
use crate::board::{Board, Position, Room};
use crate::game::Game;
use crate::level::Level;

/// Type of errors.
#[derive(Debug, PartialEq, Clone)]
pub enum GenerationError {
    /// The settings are out of range.
    InvalidConfig(String),

    /// No attempt produced a solvable level.
    Exhausted { attempts: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::InvalidConfig(message) => write!(f, "invalid settings: {message}"),
            GenerationError::Exhausted { attempts } => {
                write!(f, "no solvable level after {attempts} attempts")
            }
        }
    }
}

impl Error for GenerationError {}

/// [`LevelGenerator`] object.
pub struct LevelGenerator {
    config: GeneratorConfig,
    mechanics: Vec<Mechanic>,

    /// Number of attempts used by the last generation.
    pub attempts: usize,

    /// Solver expansions, all attempts included.
    pub iteration: usize,

    /// Duration in seconds of the last generation.
    pub duration: f32,

    /// Solution of the last generated level, in level coordinates.
    pub solution: Option<Path>,

    /// What the carver did for the last generated level.
    pub report: Option<CarveReport>,
}

impl LevelGenerator {
    /// Create the object. Missing settings take their default values.
    ///
    /// # Errors
    ///
    /// The method returns [`GenerationError::InvalidConfig`] if the settings are out of range.
    pub fn new(
        config: &PartialGeneratorConfig,
        mechanics: &[Mechanic],
    ) -> Result<Self, GenerationError> {
        let config: GeneratorConfig = config.resolve();
        config.validate().map_err(GenerationError::InvalidConfig)?;
        Ok(Self {
            config,
            mechanics: mechanics.to_vec(),
            attempts: 0,
            iteration: 0,
            duration: 0.0,
            solution: None,
            report: None,
        })
    }

    /// Generate a level.
    ///
    /// # Errors
    ///
    /// The method returns [`GenerationError::Exhausted`] when no attempt succeeds.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> Result<Level, GenerationError> {
        let start: Instant = Instant::now();
        self.attempts = 0;
        self.iteration = 0;
        self.solution = None;
        self.report = None;

        for attempt in 1..=self.config.max_attempts {
            self.attempts = attempt;
            debug!("Attempt {attempt}/{}", self.config.max_attempts);
            if let Some(level) = self.attempt(rng) {
                self.duration = start.elapsed().as_secs_f32();
                info!(
                    "Level {}x{} generated in {attempt} attempts ({} iterations, {:.3}s)",
                    level.width, level.height, self.iteration, self.duration
                );
                return Ok(level);
            }
        }
        self.duration = start.elapsed().as_secs_f32();
        warn!(
            "No level after {} attempts ({:.3}s)",
            self.config.max_attempts, self.duration
        );
        Err(GenerationError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// One pass of the shape, carve, and solve stages.
    fn attempt<R: Rng>(&mut self, rng: &mut R) -> Option<Level> {
        let shape: Shape = ShapeBuilder::new(&self.config).build(rng);
        if shape.cells.len() < self.config.min_walkable {
            debug!("    Shape too small ({} cells)", shape.cells.len());
            return None;
        }

        let mut board: Board = shape.to_board();
        let report: CarveReport = Carver::new(&self.config, &self.mechanics).carve(&mut board, rng);
        if board.walkable_count() < self.config.min_walkable {
            debug!("    Not enough grass left ({})", board.walkable_count());
            return None;
        }

        let mut solver: Solver = Solver::new(&board);
        let solved: Result<Path, SolverError> = solver.solve(rng);
        self.iteration += solver.iteration;
        let path: Path = match solved {
            Ok(p) => p,
            Err(e) => {
                debug!("    {e}");
                return None;
            }
        };

        // Crop to the tiles in use
        let (top_left, bottom_right) = board.bounding_box()?;
        let cropped: Board = board.crop(top_left, bottom_right);
        let path: Path = path.shifted(-top_left.x, -top_left.y);
        let rooms: Vec<Room> = shape
            .rooms
            .iter()
            .map(|r| Room {
                x: r.x - top_left.x,
                y: r.y - top_left.y,
                ..*r
            })
            .collect();
        let start: Position = path.first()?;
        let level: Level = Level::from_board(&cropped, start, rooms);

        if let Err(e) = level.verify(self.config.min_walkable) {
            warn!("    Generated level rejected: {e}");
            return None;
        }
        if !replay(&level, &path) {
            warn!("    The game engine does not accept the solution");
            return None;
        }

        self.solution = Some(path);
        self.report = Some(report);
        Some(level)
    }
}

/// Play the solution with the game engine. Return whether it wins the level.
pub fn replay(level: &Level, solution: &Path) -> bool {
    let mut game: Game = Game::new(level.clone());
    for target in solution.get().iter().skip(1) {
        if !game.move_to_position(*target).is_accepted() {
            debug!("    Replay blocked before {target}");
            return false;
        }
    }
    game.is_won()
}

/// Generate a level.
///
/// `mechanics` selects the optional carver passes. Missing settings take their default values.
///
/// # Errors
///
/// The function returns an error if the settings are out of range, or if no attempt produces a
/// solvable level.
pub fn generate_level<R: Rng>(
    config: &PartialGeneratorConfig,
    mechanics: &[Mechanic],
    rng: &mut R,
) -> Result<Level, GenerationError> {
    LevelGenerator::new(config, mechanics)?.generate(rng)
}

/// Generate a level from a seed. The same seed and settings always produce the same level.
pub fn generate_level_seeded(
    config: &PartialGeneratorConfig,
    mechanics: &[Mechanic],
    seed: u64,
) -> Result<Level, GenerationError> {
    let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(seed);
    generate_level(config, mechanics, &mut rng)
}
