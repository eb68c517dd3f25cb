/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers designing levels and tuning the generator.
//!
//! # Examples
//!
//! Generate three hard levels with rivers and portals, and print some statistics:
//!
//! ```
//! $ shroomhop -c 3 -f hard -m rivers,portals --seed 42 -s
//! ```
//!
//! Play a hand-made level and ask for a hint after two moves:
//!
//! ```
//! $ shroomhop -l level.txt --moves RD --hint
//! ```

use clap::Parser;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::env;
use std::path::PathBuf;

use shroomhop::board::{Direction, Position};
use shroomhop::game::{Game, MoveOutcome};
use shroomhop::generator::GenerationError;
use shroomhop::generator::config::{
    Difficulty, GeneratorConfig, Mechanic, PartialGeneratorConfig,
};
use shroomhop::generator::orchestrator::LevelGenerator;
use shroomhop::hint::HintResult;
use shroomhop::level::Level;

const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright 2026 The Shroomhop developers
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law."
);

/// Generate, print, and play Shroomhop levels.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of levels to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Difficulty preset for the generator
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// TOML file with the generator settings (replaces the difficulty preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed of the first level. The next levels use the following seeds
    #[arg(long)]
    seed: Option<u64>,

    /// Optional mechanics, comma separated
    #[arg(value_enum, short, long, value_delimiter = ',')]
    mechanics: Vec<Mechanic>,

    /// Load an ASCII art level instead of generating levels
    #[arg(short, long, conflicts_with_all = ["count", "seed"])]
    level: Option<PathBuf>,

    /// Moves to play on each level (letters U, D, L, R)
    #[arg(long)]
    moves: Option<String>,

    /// Print a hint, after the moves if any
    #[arg(long, default_value_t = false)]
    hint: bool,

    /// Print the levels in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Print the solution found by the generator
    #[arg(long, default_value_t = false)]
    solution: bool,

    /// Print some statistics after generating the levels
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let moves: Vec<Direction> = match &args.moves {
        Some(letters) => match letters.chars().map(Direction::from_letter).collect() {
            Some(m) => m,
            None => {
                eprintln!("Invalid move string {letters:?}: use the letters U, D, L, and R");
                return 2;
            }
        },
        None => Vec::new(),
    };

    //
    // Hand-made level
    //
    if let Some(path) = &args.level {
        let art: String = match std::fs::read_to_string(path) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("Cannot read {}: {e}", path.display());
                return 1;
            }
        };
        let level: Level = match Level::from_ascii(&art) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                return 1;
            }
        };
        print_level(&level, args.json);
        play(&level, &moves, args.hint);
        return 0;
    }

    //
    // Generated levels
    //
    let base: GeneratorConfig = match &args.config {
        Some(path) => match GeneratorConfig::from_file(path) {
            Ok(c) => c,
            Err(msg) => {
                eprintln!("{msg}");
                return 1;
            }
        },
        None => GeneratorConfig::for_difficulty(args.difficulty),
    };
    let partial: PartialGeneratorConfig = PartialGeneratorConfig::from(base);
    let mut generator: LevelGenerator = match LevelGenerator::new(&partial, &args.mechanics) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };

    let first_seed: u64 = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut iterations: usize = 0;
    let mut attempts: usize = 0;
    let mut errors: usize = 0;
    for i in 0..args.count {
        let seed: u64 = first_seed.wrapping_add(i as u64);
        info!("Level {i}: seed {seed}");
        let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(seed);
        let ret: Result<Level, GenerationError> = generator.generate(&mut rng);

        total += generator.duration;
        if generator.duration > max {
            max = generator.duration;
        }
        iterations += generator.iteration;
        attempts += generator.attempts;

        match ret {
            Ok(level) => {
                println!("# seed {seed}");
                print_level(&level, args.json);
                if args.solution
                    && let Some(solution) = &generator.solution
                {
                    let stops: Vec<String> =
                        solution.get().iter().map(Position::to_string).collect();
                    println!("solution: {}", stops.join(" "));
                }
                play(&level, &moves, args.hint);
            }
            Err(e) => {
                errors += 1;
                eprintln!("# seed {seed}: {e}");
            }
        }
    }

    // Print some stats
    if args.summary && args.count > 0 {
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
average iterations = {}
  average attempts = {}
            errors = {}",
            total,
            total / args.count as f32,
            max,
            iterations / args.count,
            attempts as f32 / args.count as f32,
            errors
        );
    }
    if errors > 0 { 1 } else { 0 }
}

fn print_level(level: &Level, json: bool) {
    if json {
        match serde_json::to_string_pretty(level) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Cannot serialize the level: {e}"),
        }
    } else {
        print!("{}", level.to_ascii());
    }
}

/// Play the moves on the level, and print the result and the hint.
fn play(level: &Level, moves: &[Direction], hint: bool) {
    if moves.is_empty() && !hint {
        return;
    }
    let mut game: Game = Game::new(level.clone());
    for direction in moves {
        match game.move_in(*direction) {
            MoveOutcome::Accepted { steps, won } => {
                let landing: Option<Position> = steps.last().map(|s| s.landing);
                debug!("{direction:?}: {steps:?}");
                println!(
                    "{direction:?} -> {}{}",
                    landing.map_or_else(String::new, |p| p.to_string()),
                    if won { " (won)" } else { "" }
                );
            }
            MoveOutcome::Rejected => println!("{direction:?} -> rejected"),
        }
    }
    for event in game.take_events() {
        debug!("Event: {event:?}");
    }
    if !moves.is_empty() {
        print!("{}", game.state().board);
        println!(
            "player at {}, {} moves, {} mushrooms, tide {:?}",
            game.player(),
            game.state().move_count,
            game.state().mushroom_count(),
            game.state().tide
        );
    }

    if hint {
        match game.hint() {
            HintResult::Path(stops) => {
                let stops: Vec<String> = stops.iter().map(Position::to_string).collect();
                println!("hint: {}", stops.join(" "));
            }
            HintResult::NeedsUndo { dead_ends } => {
                let ends: Vec<String> = dead_ends.iter().map(Position::to_string).collect();
                println!("hint: undo, no way forward ({})", ends.join(" "));
            }
            HintResult::Unsure => println!("hint: unsure"),
        }
    }
}
