//! Session settings loaded from an optional TOML file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use metro_mayhem_core::{GameConfig, WeaponKind};
use serde::Deserialize;

/// Game tuning plus the knobs of the headless host.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    #[serde(flatten)]
    pub(crate) game: GameConfig,
    pub(crate) session: SessionTuning,
}

/// Stand-ins for the engine collaborators the host simulates.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct SessionTuning {
    /// Length of the straight path every enemy walks.
    pub(crate) path_length: f32,
    /// Distance an enemy covers per second of simulated time.
    pub(crate) walk_speed: f32,
    /// Damage of a single shot, ordered by armory slot.
    pub(crate) shot_damage: [f32; WeaponKind::COUNT],
    /// Upper bound on command rounds settled within one tick.
    pub(crate) max_rounds: usize,
}

impl SessionTuning {
    pub(crate) fn shot_damage(&self, kind: WeaponKind) -> f32 {
        self.shot_damage[kind.index()]
    }
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            path_length: 40.0,
            walk_speed: 2.0,
            shot_damage: [35.0, 120.0, 50.0, 160.0],
            max_rounds: 32,
        }
    }
}

/// Loads settings from `path`, falling back to defaults when no path is given.
pub(crate) fn load(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("failed to parse config at {}", path.display()))
}

fn parse(contents: &str) -> Result<Settings> {
    Ok(toml::from_str(contents)?)
}
