/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that holds all the tunable
 * parameters of the simulation, and the ParamUpdate message through which the
 * control surface changes them one field at a time. It also provides change
 * detection between two parameter sets, the human readable summary shown in
 * the UI and loading of parameters from a TOML file.
 */

use std::path::Path;

use color_eyre::eyre::{bail, Result, WrapErr as _};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::TICKS_PER_SECOND;

// Parameters for the simulation that can be adjusted via UI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub repulsion_distance: f32,
    pub attraction_distance: f32,
    pub max_speed: f32,
    pub lifespan_ticks: u32,
    pub spawn_rate: f32, // Automatic spawns per second
    pub capacity: usize,
    pub paused: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            repulsion_distance: 15.0,
            attraction_distance: 100.0,
            max_speed: 5.0,
            lifespan_ticks: 10 * TICKS_PER_SECOND,
            spawn_rate: 100.0,
            capacity: 2048,
            paused: false,
        }
    }
}

// A single field change requested by the control surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamUpdate {
    RepulsionDistance(f32),
    AttractionDistance(f32),
    MaxSpeed(f32),
    LifespanSeconds(u32),
    SpawnRate(f32),
    Capacity(usize),
}

impl ParamUpdate {
    // Parse a `name=value` style request coming from outside the engine
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        let value = value.trim();
        let update = match name.trim() {
            "repulsionDistance" | "repulsion_distance" => {
                Self::RepulsionDistance(parse_value(name, value)?)
            }
            "attractionDistance" | "attraction_distance" => {
                Self::AttractionDistance(parse_value(name, value)?)
            }
            "maxSpeed" | "max_speed" => Self::MaxSpeed(parse_value(name, value)?),
            "lifespanTicks" | "lifespan" | "lifespan_seconds" => {
                Self::LifespanSeconds(parse_value(name, value)?)
            }
            "spawnRatePerSecond" | "spawn_rate" => Self::SpawnRate(parse_value(name, value)?),
            "capacity" => Self::Capacity(parse_value(name, value)?),
            unknown => bail!("Unknown simulation parameter `{unknown}`"),
        };
        Ok(update)
    }

    // Parse a single `name=value` pair, as given on the command line
    pub fn parse_assignment(assignment: &str) -> Result<Self> {
        match assignment.split_once('=') {
            Some((name, value)) => Self::parse(name, value),
            None => bail!("Expected `name=value`, got `{assignment}`"),
        }
    }

    pub fn apply(self, params: &mut SimulationParams) {
        match self {
            Self::RepulsionDistance(distance) => params.repulsion_distance = distance,
            Self::AttractionDistance(distance) => params.attraction_distance = distance,
            Self::MaxSpeed(speed) => params.max_speed = speed,
            Self::LifespanSeconds(seconds) => {
                params.lifespan_ticks = seconds.saturating_mul(TICKS_PER_SECOND);
            }
            Self::SpawnRate(rate) => params.spawn_rate = rate,
            Self::Capacity(capacity) => params.capacity = capacity,
        }
    }
}

fn parse_value<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .wrap_err_with(|| format!("Invalid value `{value}` for `{name}`"))
}

impl SimulationParams {
    pub fn lifespan_seconds(&self) -> u32 {
        self.lifespan_ticks / TICKS_PER_SECOND
    }

    // Both distances become independent whole numbers in 0..=200
    pub fn randomize_distances<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let max = *Self::get_distance_range().end();
        self.repulsion_distance = rng.gen_range(0..=max as u32) as f32;
        self.attraction_distance = rng.gen_range(0..=max as u32) as f32;
    }

    // Short formula-like summary of the key parameters, for display only
    pub fn summary(&self) -> String {
        format!(
            "R{}  A{}  L{}  G{}",
            self.repulsion_distance,
            self.max_speed,
            self.lifespan_seconds(),
            self.spawn_rate
        )
    }

    // The updates that turn `previous` into `self`. The pause flag is not a
    // parameter update, it has its own toggle.
    pub fn changes_since(&self, previous: &Self) -> Vec<ParamUpdate> {
        let mut changes = Vec::new();

        if self.repulsion_distance != previous.repulsion_distance {
            changes.push(ParamUpdate::RepulsionDistance(self.repulsion_distance));
        }
        if self.attraction_distance != previous.attraction_distance {
            changes.push(ParamUpdate::AttractionDistance(self.attraction_distance));
        }
        if self.max_speed != previous.max_speed {
            changes.push(ParamUpdate::MaxSpeed(self.max_speed));
        }
        if self.lifespan_ticks != previous.lifespan_ticks {
            changes.push(ParamUpdate::LifespanSeconds(self.lifespan_seconds()));
        }
        if self.spawn_rate != previous.spawn_rate {
            changes.push(ParamUpdate::SpawnRate(self.spawn_rate));
        }
        if self.capacity != previous.capacity {
            changes.push(ParamUpdate::Capacity(self.capacity));
        }

        changes
    }

    // Get parameter ranges for UI sliders
    pub fn get_distance_range() -> std::ops::RangeInclusive<f32> {
        0.0..=200.0
    }

    pub fn get_lifespan_seconds_range() -> std::ops::RangeInclusive<u32> {
        1..=300
    }

    pub fn get_spawn_rate_range() -> std::ops::RangeInclusive<f32> {
        1.0..=300.0
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        1.0..=20.0
    }

    pub fn get_capacity_range() -> std::ops::RangeInclusive<usize> {
        1..=4096
    }
}

// The two looks of the simulation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Default,
    Alternative,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Default => Self::Alternative,
            Self::Alternative => Self::Default,
        }
    }
}

// Everything a config file can set
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(flatten)]
    pub params: SimulationParams,
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

impl ConfigFile {
    // Load a TOML config file, missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Couldn't read config file {}", path.display()))?;
        toml::from_str(&contents)
            .wrap_err_with(|| format!("Couldn't parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifespan_is_set_in_seconds() {
        let mut params = SimulationParams::default();
        ParamUpdate::LifespanSeconds(4).apply(&mut params);
        assert_eq!(params.lifespan_ticks, 4 * TICKS_PER_SECOND);
        assert_eq!(params.lifespan_seconds(), 4);
    }

    #[test]
    fn parses_named_parameters() {
        assert_eq!(
            ParamUpdate::parse("repulsionDistance", "42").unwrap(),
            ParamUpdate::RepulsionDistance(42.0)
        );
        assert_eq!(
            ParamUpdate::parse_assignment("capacity=12").unwrap(),
            ParamUpdate::Capacity(12)
        );
        assert_eq!(
            ParamUpdate::parse_assignment("lifespanTicks = 3").unwrap(),
            ParamUpdate::LifespanSeconds(3)
        );
        assert!(ParamUpdate::parse("gravity", "1").is_err());
        assert!(ParamUpdate::parse("maxSpeed", "fast").is_err());
        assert!(ParamUpdate::parse_assignment("capacity").is_err());
    }

    #[test]
    fn summary_reflects_key_parameters() {
        let params = SimulationParams::default();
        assert_eq!(params.summary(), "R15  A5  L10  G100");
    }

    #[test]
    fn randomized_distances_are_whole_and_in_range() {
        let mut params = SimulationParams::default();
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            params.randomize_distances(&mut rng);
            for distance in [params.repulsion_distance, params.attraction_distance] {
                assert!((0.0..=200.0).contains(&distance));
                assert_eq!(distance.fract(), 0.0);
            }
        }
    }

    #[test]
    fn detects_changed_fields_only() {
        let before = SimulationParams::default();
        let mut after = before.clone();
        assert!(after.changes_since(&before).is_empty());

        after.max_speed = 7.0;
        after.capacity = 10;
        after.paused = true;
        assert_eq!(
            after.changes_since(&before),
            vec![ParamUpdate::MaxSpeed(7.0), ParamUpdate::Capacity(10)]
        );
    }

    #[test]
    fn config_file_overrides_defaults() {
        let config: ConfigFile = toml::from_str(
            r#"
            repulsion_distance = 30.0
            capacity = 64
            color_scheme = "alternative"
            "#,
        )
        .unwrap();
        assert_eq!(config.params.repulsion_distance, 30.0);
        assert_eq!(config.params.capacity, 64);
        assert_eq!(config.params.attraction_distance, 100.0);
        assert_eq!(config.color_scheme, ColorScheme::Alternative);
    }

    #[test]
    fn scheme_toggles_back_and_forth() {
        assert_eq!(ColorScheme::Default.toggled(), ColorScheme::Alternative);
        assert_eq!(ColorScheme::Default.toggled().toggled(), ColorScheme::Default);
    }
}
