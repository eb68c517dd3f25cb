/*
config.rs

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

//! Level generator settings.
//!
//! Settings come from a [`Difficulty`] preset, from a TOML file, or from a
//! [`PartialGeneratorConfig`] where only some fields are set, the others keeping their default
//! values.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::level::MIN_WALKABLE;

/// Largest accepted level side.
const MAX_SIDE: usize = 64;

/// Level difficulty.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Default,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Optional level mechanics. The matching carver pass only runs when the mechanic is active.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum)]
pub enum Mechanic {
    Rivers,
    Ice,
    Dirt,
    Portals,
}

/// Level generator settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub min_width: usize,
    pub max_width: usize,
    pub min_height: usize,
    pub max_height: usize,

    /// Number of rectangles for the overlapping rectangles shapes.
    pub min_rectangles: usize,
    pub max_rectangles: usize,

    /// Fraction of the shape turned into brambles.
    pub bramble_chance: f64,

    /// Fraction of the grass turned into stone bridges.
    pub stone_chance: f64,

    /// Probability that a level gets rivers at all.
    pub river_chance: f64,

    /// Maximum number of rivers.
    pub max_rivers: usize,

    /// Fraction of the grass turned into ice, in clusters of up to three tiles.
    pub ice_chance: f64,

    /// Fraction of the grass turned into dirt.
    pub dirt_chance: f64,

    /// Number of portal pairs.
    pub portal_pairs: usize,

    /// Number of shape, carve, and solve attempts before giving up.
    pub max_attempts: usize,

    /// Minimum number of grass and dirt tiles.
    pub min_walkable: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_width: 4,
            max_width: 7,
            min_height: 4,
            max_height: 7,
            min_rectangles: 2,
            max_rectangles: 4,
            bramble_chance: 0.12,
            stone_chance: 0.05,
            river_chance: 0.5,
            max_rivers: 2,
            ice_chance: 0.1,
            dirt_chance: 0.1,
            portal_pairs: 1,
            max_attempts: 100,
            min_walkable: MIN_WALKABLE,
        }
    }
}

impl GeneratorConfig {
    /// Settings for the given difficulty.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                max_width: 5,
                max_height: 5,
                max_rectangles: 3,
                bramble_chance: 0.08,
                stone_chance: 0.0,
                ice_chance: 0.05,
                dirt_chance: 0.0,
                portal_pairs: 0,
                ..Self::default()
            },
            Difficulty::Medium => Self::default(),
            Difficulty::Hard => Self {
                min_width: 6,
                max_width: 8,
                min_height: 6,
                max_height: 8,
                min_rectangles: 3,
                max_rectangles: 5,
                bramble_chance: 0.15,
                stone_chance: 0.06,
                dirt_chance: 0.12,
                portal_pairs: 2,
                ..Self::default()
            },
        }
    }

    /// Load the settings from a TOML file. Missing fields keep their default values.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content: String = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| format!("Invalid TOML in {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the parameter ranges.
    pub fn validate(&self) -> Result<(), String> {
        for (name, min, max) in [
            ("width", self.min_width, self.max_width),
            ("height", self.min_height, self.max_height),
        ] {
            if min < 2 || max > MAX_SIDE || min > max {
                return Err(format!(
                    "{name} must be between 2 and {MAX_SIDE} with min <= max, got {min}-{max}"
                ));
            }
        }
        if self.min_rectangles < 1 || self.min_rectangles > self.max_rectangles {
            return Err(format!(
                "rectangles must be >= 1 with min <= max, got {}-{}",
                self.min_rectangles, self.max_rectangles
            ));
        }
        for (name, value) in [
            ("bramble_chance", self.bramble_chance),
            ("stone_chance", self.stone_chance),
            ("river_chance", self.river_chance),
            ("ice_chance", self.ice_chance),
            ("dirt_chance", self.dirt_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be 0.0-1.0, got {value}"));
            }
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be >= 1".to_string());
        }
        if self.min_walkable > self.max_width * self.max_height {
            return Err(format!(
                "min_walkable ({}) does not fit in a {}x{} level",
                self.min_walkable, self.max_width, self.max_height
            ));
        }
        Ok(())
    }
}

/// Generator settings where only some fields are provided.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PartialGeneratorConfig {
    pub min_width: Option<usize>,
    pub max_width: Option<usize>,
    pub min_height: Option<usize>,
    pub max_height: Option<usize>,
    pub min_rectangles: Option<usize>,
    pub max_rectangles: Option<usize>,
    pub bramble_chance: Option<f64>,
    pub stone_chance: Option<f64>,
    pub river_chance: Option<f64>,
    pub max_rivers: Option<usize>,
    pub ice_chance: Option<f64>,
    pub dirt_chance: Option<f64>,
    pub portal_pairs: Option<usize>,
    pub max_attempts: Option<usize>,
    pub min_walkable: Option<usize>,
}

impl PartialGeneratorConfig {
    /// Fill the missing fields from the given settings.
    pub fn over(&self, base: &GeneratorConfig) -> GeneratorConfig {
        GeneratorConfig {
            min_width: self.min_width.unwrap_or(base.min_width),
            max_width: self.max_width.unwrap_or(base.max_width),
            min_height: self.min_height.unwrap_or(base.min_height),
            max_height: self.max_height.unwrap_or(base.max_height),
            min_rectangles: self.min_rectangles.unwrap_or(base.min_rectangles),
            max_rectangles: self.max_rectangles.unwrap_or(base.max_rectangles),
            bramble_chance: self.bramble_chance.unwrap_or(base.bramble_chance),
            stone_chance: self.stone_chance.unwrap_or(base.stone_chance),
            river_chance: self.river_chance.unwrap_or(base.river_chance),
            max_rivers: self.max_rivers.unwrap_or(base.max_rivers),
            ice_chance: self.ice_chance.unwrap_or(base.ice_chance),
            dirt_chance: self.dirt_chance.unwrap_or(base.dirt_chance),
            portal_pairs: self.portal_pairs.unwrap_or(base.portal_pairs),
            max_attempts: self.max_attempts.unwrap_or(base.max_attempts),
            min_walkable: self.min_walkable.unwrap_or(base.min_walkable),
        }
    }

    /// Fill the missing fields with the default settings.
    pub fn resolve(&self) -> GeneratorConfig {
        self.over(&GeneratorConfig::default())
    }
}

impl From<GeneratorConfig> for PartialGeneratorConfig {
    fn from(config: GeneratorConfig) -> Self {
        Self {
            min_width: Some(config.min_width),
            max_width: Some(config.max_width),
            min_height: Some(config.min_height),
            max_height: Some(config.max_height),
            min_rectangles: Some(config.min_rectangles),
            max_rectangles: Some(config.max_rectangles),
            bramble_chance: Some(config.bramble_chance),
            stone_chance: Some(config.stone_chance),
            river_chance: Some(config.river_chance),
            max_rivers: Some(config.max_rivers),
            ice_chance: Some(config.ice_chance),
            dirt_chance: Some(config.dirt_chance),
            portal_pairs: Some(config.portal_pairs),
            max_attempts: Some(config.max_attempts),
            min_walkable: Some(config.min_walkable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(GeneratorConfig::for_difficulty(difficulty).validate(), Ok(()));
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config: GeneratorConfig = GeneratorConfig {
            bramble_chance: 1.5,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let config: GeneratorConfig = GeneratorConfig {
            min_width: 9,
            max_width: 5,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let config: GeneratorConfig = GeneratorConfig {
            max_attempts: 0,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_settings_keep_the_defaults() {
        let partial: PartialGeneratorConfig = PartialGeneratorConfig {
            ice_chance: Some(0.0),
            max_width: Some(6),
            ..PartialGeneratorConfig::default()
        };
        let config: GeneratorConfig = partial.resolve();
        assert_eq!(config.ice_chance, 0.0);
        assert_eq!(config.max_width, 6);
        assert_eq!(config.max_attempts, 100);
        assert_eq!(PartialGeneratorConfig::from(config.clone()).resolve(), config);
    }

    #[test]
    fn parses_toml_with_missing_fields() {
        let config: GeneratorConfig =
            toml::from_str("max_width = 6\nportal_pairs = 2\n").expect("valid TOML");
        assert_eq!(config.max_width, 6);
        assert_eq!(config.portal_pairs, 2);
        assert_eq!(config.min_walkable, MIN_WALKABLE);
    }
}
