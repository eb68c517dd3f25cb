/*
carver.rs

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

//! Carve obstacles and mechanics into a grass shape.
//!
//! The passes run in a fixed order: brambles, stone bridges, rivers, ice clusters, dirt, and
//! portal pairs. Each pass proposes edits on a copy of the board and keeps the copy only when
//! the edit passes its own check and [`rules::is_connected`] still holds.

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::BTreeSet;

use super::config::{GeneratorConfig, Mechanic};
use crate::board::{Board, Direction, Position};
use crate::rules;
use crate::tiles::{PortalColor, TileType};

/// Minimum number of tiles that need a visit once the brambles are in place.
const MIN_REQUIRED_AFTER_BRAMBLES: usize = 6;

/// Attempts to place one river before giving up on it.
const RIVER_ATTEMPTS: usize = 10;

/// Attempts to place one portal pair before giving up on it.
const PORTAL_ATTEMPTS: usize = 10;

/// Largest ice cluster.
const MAX_ICE_CLUSTER: usize = 3;

/// Number of tiles each pass changed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CarveReport {
    pub brambles: usize,
    pub stones: usize,
    pub rivers: usize,
    pub ice: usize,
    pub dirt: usize,
    pub portal_pairs: usize,
}

/// [`Carver`] object.
pub struct Carver<'a> {
    config: &'a GeneratorConfig,
    mechanics: &'a [Mechanic],
}

/// Apply the edit to a copy of the board, and keep the copy if `accept` approves it.
fn propose<E, A>(board: &mut Board, edit: E, accept: A) -> bool
where
    E: FnOnce(&mut Board),
    A: Fn(&Board) -> bool,
{
    let mut candidate: Board = board.clone();
    edit(&mut candidate);
    if accept(&candidate) {
        *board = candidate;
        true
    } else {
        false
    }
}

fn grass_count(board: &Board) -> usize {
    board.count(|t| t == TileType::Grass)
}

impl<'a> Carver<'a> {
    /// Create the object.
    pub fn new(config: &'a GeneratorConfig, mechanics: &'a [Mechanic]) -> Self {
        Self { config, mechanics }
    }

    fn active(&self, mechanic: Mechanic) -> bool {
        self.mechanics.contains(&mechanic)
    }

    /// Run all the passes on the board.
    pub fn carve<R: Rng>(&self, board: &mut Board, rng: &mut R) -> CarveReport {
        let mut report: CarveReport = CarveReport {
            brambles: self.brambles(board, rng),
            stones: self.stones(board, rng),
            ..CarveReport::default()
        };
        if self.active(Mechanic::Rivers) {
            report.rivers = self.rivers(board, rng);
        }
        if self.active(Mechanic::Ice) && self.config.ice_chance > 0.0 {
            report.ice = self.ice(board, rng);
        }
        if self.active(Mechanic::Dirt) {
            report.dirt = self.dirt(board, rng);
        }
        if self.active(Mechanic::Portals) {
            report.portal_pairs = self.portals(board, rng);
        }
        debug!("Carved: {report:?}");
        board.debug();
        report
    }

    /// Convert single grass tiles, one at a time, until `target` tiles are converted or the
    /// candidates run out.
    fn scatter<R, A>(
        &self,
        board: &mut Board,
        tile: TileType,
        target: usize,
        accept: A,
        rng: &mut R,
    ) -> usize
    where
        R: Rng,
        A: Fn(&Board) -> bool,
    {
        let mut candidates: Vec<Position> = board.cells_matching(|t| t == TileType::Grass);
        candidates.shuffle(rng);
        let mut placed: usize = 0;
        for p in candidates {
            if placed >= target {
                break;
            }
            if propose(board, |b| b.set(p, tile), &accept) {
                placed += 1;
            }
        }
        placed
    }

    fn brambles<R: Rng>(&self, board: &mut Board, rng: &mut R) -> usize {
        let shape: usize = board.count(|t| t != TileType::Void);
        let target: usize = (self.config.bramble_chance * shape as f64) as usize;
        self.scatter(
            board,
            TileType::Bramble,
            target,
            |b| {
                b.count(|t| t.required_visits() > 0) >= MIN_REQUIRED_AFTER_BRAMBLES
                    && rules::is_connected(b)
            },
            rng,
        )
    }

    fn stones<R: Rng>(&self, board: &mut Board, rng: &mut R) -> usize {
        let target: usize = (self.config.stone_chance * grass_count(board) as f64) as usize;
        let min_walkable: usize = self.config.min_walkable;
        self.scatter(
            board,
            TileType::Stone,
            target,
            |b| grass_count(b) > min_walkable && rules::is_connected(b),
            rng,
        )
    }

    fn rivers<R: Rng>(&self, board: &mut Board, rng: &mut R) -> usize {
        if self.config.max_rivers == 0 || !rng.random_bool(self.config.river_chance) {
            debug!("No river for this level");
            return 0;
        }
        let wanted: usize = rng.random_range(1..=self.config.max_rivers);
        let mut placed: usize = 0;
        for _ in 0..wanted {
            for _ in 0..RIVER_ATTEMPTS {
                let Some((course, exit)) = river_course(board, rng) else {
                    continue;
                };
                let min_walkable: usize = self.config.min_walkable;
                let accepted: bool = propose(
                    board,
                    |b| {
                        for (i, cell) in course.iter().enumerate() {
                            let next: Position = course.get(i + 1).copied().unwrap_or(exit);
                            b.set(*cell, TileType::Water);
                            b.set_flow(*cell, Direction::between(*cell, next));
                        }
                        b.set(exit, TileType::Stone);
                    },
                    |b| grass_count(b) >= min_walkable && rules::is_connected(b),
                );
                if accepted {
                    debug!("River {course:?} exits at {exit}");
                    placed += 1;
                    break;
                }
            }
        }
        placed
    }

    fn ice<R: Rng>(&self, board: &mut Board, rng: &mut R) -> usize {
        let clusters: usize =
            (self.config.ice_chance * grass_count(board) as f64 / MAX_ICE_CLUSTER as f64).ceil()
                as usize;
        let min_walkable: usize = self.config.min_walkable;
        let mut placed: usize = 0;
        for _ in 0..clusters {
            let size: usize = rng.random_range(1..=MAX_ICE_CLUSTER);
            let Some(cluster) = grass_cluster(board, size, rng) else {
                break;
            };
            if propose(
                board,
                |b| cluster.iter().for_each(|p| b.set(*p, TileType::Ice)),
                |b| grass_count(b) >= min_walkable && rules::is_connected(b),
            ) {
                placed += cluster.len();
            }
        }
        placed
    }

    fn dirt<R: Rng>(&self, board: &mut Board, rng: &mut R) -> usize {
        let target: usize = (self.config.dirt_chance * grass_count(board) as f64) as usize;
        self.scatter(
            board,
            TileType::Dirt,
            target,
            // At least one grass tile for two dirt tiles, so that a grass start always exists
            |b| grass_count(b) * 2 >= b.count(|t| t == TileType::Dirt) && rules::is_connected(b),
            rng,
        )
    }

    fn portals<R: Rng>(&self, board: &mut Board, rng: &mut R) -> usize {
        let min_walkable: usize = self.config.min_walkable;
        let mut placed: usize = 0;
        for i in 0..self.config.portal_pairs.min(PortalColor::COUNT) {
            let Some(color) = PortalColor::from_repr(i as u8) else {
                break;
            };
            for _ in 0..PORTAL_ATTEMPTS {
                let grass: Vec<Position> = board.cells_matching(|t| t == TileType::Grass);
                let ends: Vec<Position> = grass.choose_multiple(rng, 2).copied().collect();
                if ends.len() < 2 {
                    break;
                }
                if propose(
                    board,
                    |b| ends.iter().for_each(|p| b.set(*p, TileType::Portal(color))),
                    |b| b.walkable_count() >= min_walkable && rules::is_connected(b),
                ) {
                    debug!("{color:?} portals at {} and {}", ends[0], ends[1]);
                    placed += 1;
                    break;
                }
            }
        }
        placed
    }
}

/// Draw the course of a river: 2 to 4 grass cells in one direction, with at most one bend, and
/// the grass cell after the last one, which becomes the stone exit.
fn river_course<R: Rng>(board: &Board, rng: &mut R) -> Option<(Vec<Position>, Position)> {
    let grass: Vec<Position> = board.cells_matching(|t| t == TileType::Grass);
    let source: Position = *grass.choose(rng)?;
    let mut heading: Direction = Direction::from_repr(rng.random_range(0..4))?;
    let length: usize = rng.random_range(2..=4);
    let bend_at: Option<usize> = if rng.random_bool(0.5) {
        Some(rng.random_range(1..length))
    } else {
        None
    };
    let bend: Direction = heading.perpendicular()[rng.random_range(0..2)];

    let mut course: Vec<Position> = vec![source];
    let mut current: Position = source;
    for i in 1..length {
        if bend_at == Some(i) {
            heading = bend;
        }
        current = current.step(heading);
        course.push(current);
    }
    let exit: Position = current.step(heading);

    let distinct: BTreeSet<Position> = course.iter().copied().chain([exit]).collect();
    let all_grass: bool = distinct
        .iter()
        .all(|p| board.get(*p) == Some(TileType::Grass));
    if distinct.len() == length + 1 && all_grass {
        Some((course, exit))
    } else {
        None
    }
}

/// Pick a random grass tile and grow it into a cluster of adjacent grass tiles.
fn grass_cluster<R: Rng>(board: &Board, size: usize, rng: &mut R) -> Option<Vec<Position>> {
    let grass: Vec<Position> = board.cells_matching(|t| t == TileType::Grass);
    let seed: Position = *grass.choose(rng)?;
    let mut cluster: Vec<Position> = vec![seed];
    while cluster.len() < size {
        let frontier: BTreeSet<Position> = cluster
            .iter()
            .flat_map(|p| Direction::ALL.map(|d| p.step(d)))
            .filter(|p| board.get(*p) == Some(TileType::Grass) && !cluster.contains(p))
            .collect();
        let frontier: Vec<Position> = frontier.into_iter().collect();
        match frontier.choose(rng) {
            Some(p) => cluster.push(*p),
            None => break,
        }
    }
    Some(cluster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn field(width: usize, height: usize) -> Board {
        Board::new(width, height, TileType::Grass)
    }

    fn all_mechanics() -> Vec<Mechanic> {
        vec![
            Mechanic::Rivers,
            Mechanic::Ice,
            Mechanic::Dirt,
            Mechanic::Portals,
        ]
    }

    #[test]
    fn carved_boards_stay_connected() {
        let config: GeneratorConfig = GeneratorConfig {
            bramble_chance: 0.3,
            stone_chance: 0.2,
            river_chance: 1.0,
            ice_chance: 0.3,
            ..GeneratorConfig::default()
        };
        let mechanics: Vec<Mechanic> = all_mechanics();
        let carver: Carver = Carver::new(&config, &mechanics);
        let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..30 {
            let mut board: Board = field(6, 6);
            carver.carve(&mut board, &mut rng);
            assert!(rules::is_connected(&board));
            assert!(board.walkable_count() >= config.min_walkable);
            assert!(board.count(|t| t == TileType::Grass) > 0);
        }
    }

    #[test]
    fn inactive_mechanics_are_skipped() {
        let config: GeneratorConfig = GeneratorConfig {
            river_chance: 1.0,
            ice_chance: 0.5,
            dirt_chance: 0.5,
            ..GeneratorConfig::default()
        };
        let carver: Carver = Carver::new(&config, &[]);
        let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(22);
        let mut board: Board = field(7, 7);
        let report: CarveReport = carver.carve(&mut board, &mut rng);
        assert_eq!(report.rivers + report.ice + report.dirt + report.portal_pairs, 0);
        assert_eq!(
            board.count(|t| matches!(
                t,
                TileType::Water | TileType::Ice | TileType::Dirt | TileType::Portal(_)
            )),
            0
        );
    }

    #[test]
    fn rivers_flow_into_a_stone_exit() {
        let config: GeneratorConfig = GeneratorConfig {
            bramble_chance: 0.0,
            stone_chance: 0.0,
            river_chance: 1.0,
            max_rivers: 1,
            ..GeneratorConfig::default()
        };
        let mechanics: [Mechanic; 1] = [Mechanic::Rivers];
        let carver: Carver = Carver::new(&config, &mechanics);
        let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(23);
        let mut board: Board = field(9, 9);
        let report: CarveReport = carver.carve(&mut board, &mut rng);
        assert_eq!(report.rivers, 1);

        for water in board.cells_matching(|t| t == TileType::Water) {
            let slide: Option<rules::MovePlan> = rules::plan_move(
                &board,
                rules::TidePhase::Low,
                water,
                TileType::Water,
                board.flow(water).expect("flowing water"),
            );
            let landing: Position = slide.expect("a slide").landing;
            assert_eq!(board.get(landing), Some(TileType::Stone));
        }
    }

    #[test]
    fn portals_come_in_pairs() {
        let config: GeneratorConfig = GeneratorConfig {
            portal_pairs: 2,
            ..GeneratorConfig::default()
        };
        let mechanics: [Mechanic; 1] = [Mechanic::Portals];
        let carver: Carver = Carver::new(&config, &mechanics);
        let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(24);
        let mut board: Board = field(6, 6);
        carver.carve(&mut board, &mut rng);
        for color in [PortalColor::Red, PortalColor::Blue] {
            let count: usize = board.count(|t| t == TileType::Portal(color));
            assert!(count == 0 || count == 2);
        }
    }

    #[test]
    fn dirt_keeps_grass_for_the_start() {
        let config: GeneratorConfig = GeneratorConfig {
            bramble_chance: 0.0,
            stone_chance: 0.0,
            dirt_chance: 1.0,
            ..GeneratorConfig::default()
        };
        let mechanics: [Mechanic; 1] = [Mechanic::Dirt];
        let carver: Carver = Carver::new(&config, &mechanics);
        let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(25);
        let mut board: Board = field(4, 4);
        let report: CarveReport = carver.carve(&mut board, &mut rng);
        let grass: usize = board.count(|t| t == TileType::Grass);
        assert!(report.dirt > 0);
        assert!(grass * 2 >= report.dirt);
    }
}
