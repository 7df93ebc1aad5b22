//! Tuning knobs shared by the world, the systems, and the adapters.
//!
//! Every section deserializes with defaults so a configuration file only
//! needs to mention the values it overrides.

use std::time::Duration;

use serde::Deserialize;

use crate::{EnemyKind, WeaponKind};

/// Complete tuning for a play session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Funds, prices, and rewards.
    pub economy: EconomyTuning,
    /// Health, level count, and board size.
    pub level: LevelTuning,
    /// Wave size and cadence.
    pub wave: WaveTuning,
    /// Enemy lifecycle timings and per-kind profiles.
    pub actors: ActorTuning,
    /// Pool sizing for enemies and missiles.
    pub pool: PoolTuning,
    /// Seed feeding every deterministic random stream.
    pub seed: u64,
}

/// Funds, prices, and rewards.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EconomyTuning {
    /// Funds available when the session starts.
    pub starting_funds: u32,
    /// Funds credited for every enemy killed.
    pub kill_reward: u32,
    /// Price of every weapon kind, ordered by armory slot.
    pub prices: [u32; WeaponKind::COUNT],
    /// Share of the price refunded when a weapon is dismantled.
    pub dismantle_refund_percent: u32,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            starting_funds: 350,
            kill_reward: 150,
            prices: [200, 300, 350, 450],
            dismantle_refund_percent: 50,
        }
    }
}

/// Health, level count, and board size.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Player health restored at the start of every level.
    pub starting_health: u32,
    /// Health removed for every enemy that escapes.
    pub escape_damage: u32,
    /// Last level of the campaign.
    pub max_level: u32,
    /// Delay between winning a level and setting up the next one.
    pub level_won_delay_secs: f32,
    /// Number of placement platforms on the board.
    pub platform_count: u32,
}

impl LevelTuning {
    /// Delay between winning a level and setting up the next one.
    #[must_use]
    pub fn level_won_delay(&self) -> Duration {
        seconds(self.level_won_delay_secs)
    }
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            starting_health: 100,
            escape_damage: 1,
            max_level: 10,
            level_won_delay_secs: 7.0,
            platform_count: 8,
        }
    }
}

/// Wave size and cadence, derived from the level number.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Enemies released before level scaling applies.
    pub base_count: u32,
    /// Additional enemies released per level.
    pub per_level_increment: u32,
    /// Delay between spawns before level scaling applies.
    pub base_interval_ms: u64,
    /// Reduction of the spawn delay per level.
    pub per_level_decrement_ms: u64,
    /// Floor applied to the spawn delay.
    pub min_interval_ms: u64,
    /// Rectangle enemies are scattered across when spawned.
    pub spawn_area: SpawnArea,
}

impl WaveTuning {
    /// Number of enemies released during the provided level.
    #[must_use]
    pub fn target_count(&self, level: u32) -> u32 {
        self.base_count
            .saturating_add(level.saturating_mul(self.per_level_increment))
    }

    /// Delay between two spawns during the provided level.
    #[must_use]
    pub fn spawn_interval(&self, level: u32) -> Duration {
        let decrement = self
            .per_level_decrement_ms
            .saturating_mul(u64::from(level));
        let interval = self
            .base_interval_ms
            .saturating_sub(decrement)
            .max(self.min_interval_ms);
        Duration::from_millis(interval)
    }
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            base_count: 10,
            per_level_increment: 20,
            base_interval_ms: 1_000,
            per_level_decrement_ms: 10,
            min_interval_ms: 100,
            spawn_area: SpawnArea::default(),
        }
    }
}

/// Axis-aligned rectangle on the ground plane used for spawn offsets.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnArea {
    /// Lower horizontal bound.
    pub min_x: f32,
    /// Upper horizontal bound.
    pub max_x: f32,
    /// Height of every spawn point.
    pub y: f32,
    /// Lower depth bound.
    pub min_z: f32,
    /// Upper depth bound.
    pub max_z: f32,
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            min_x: -1.468,
            max_x: 0.005,
            y: 0.64,
            min_z: -0.76,
            max_z: 0.737,
        }
    }
}

/// Enemy lifecycle timings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    /// Window after a hit during which further damage is ignored.
    pub hit_recovery_secs: f32,
    /// Duration of an attack sequence.
    pub attack_secs: f32,
    /// Profile of light enemies.
    pub small: EnemyProfile,
    /// Profile of heavy enemies.
    pub large: EnemyProfile,
}

impl ActorTuning {
    /// Window after a hit during which further damage is ignored.
    #[must_use]
    pub fn hit_recovery(&self) -> Duration {
        seconds(self.hit_recovery_secs)
    }

    /// Duration of an attack sequence.
    #[must_use]
    pub fn attack_duration(&self) -> Duration {
        seconds(self.attack_secs)
    }

    /// Profile applied to enemies of the provided kind.
    #[must_use]
    pub fn profile(&self, kind: EnemyKind) -> &EnemyProfile {
        match kind {
            EnemyKind::Small => &self.small,
            EnemyKind::Large => &self.large,
        }
    }
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            hit_recovery_secs: 1.5,
            attack_secs: 0.5,
            small: EnemyProfile {
                health: 100.0,
                dissolve_secs: 3.0,
            },
            large: EnemyProfile {
                health: 250.0,
                dissolve_secs: 10.0,
            },
        }
    }
}

/// Health and dissolve timing of an enemy variant.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct EnemyProfile {
    /// Health assigned on spawn.
    pub health: f32,
    /// Time a killed enemy takes to dissolve before returning to the pool.
    pub dissolve_secs: f32,
}

impl EnemyProfile {
    /// Time a killed enemy takes to dissolve before returning to the pool.
    #[must_use]
    pub fn dissolve(&self) -> Duration {
        seconds(self.dissolve_secs)
    }
}

/// Whether a pool may create new instances once every instance is in use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolGrowth {
    /// Create a new instance when the pool runs dry.
    #[default]
    Grow,
    /// Fail with `PoolExhausted` when the pool runs dry.
    Fixed,
}

/// Pool sizing for enemies and missiles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoolTuning {
    /// Enemies created up front.
    pub prewarm: u32,
    /// Growth policy of the enemy pool.
    pub growth: PoolGrowth,
    /// Missiles created up front.
    pub missile_prewarm: u32,
    /// Growth policy of the missile pool.
    pub missile_growth: PoolGrowth,
    /// Time a fired missile stays out of the pool.
    pub missile_lifetime_secs: f32,
}

impl PoolTuning {
    /// Time a fired missile stays out of the pool.
    #[must_use]
    pub fn missile_lifetime(&self) -> Duration {
        seconds(self.missile_lifetime_secs)
    }
}

impl Default for PoolTuning {
    fn default() -> Self {
        Self {
            prewarm: 20,
            growth: PoolGrowth::Grow,
            missile_prewarm: 20,
            missile_growth: PoolGrowth::Grow,
            missile_lifetime_secs: 10.0,
        }
    }
}

// Negative or non-finite values collapse to zero rather than panicking.
fn seconds(value: f32) -> Duration {
    Duration::try_from_secs_f32(value).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_size_grows_with_level() {
        let tuning = WaveTuning {
            base_count: 10,
            per_level_increment: 20,
            ..WaveTuning::default()
        };
        assert_eq!(tuning.target_count(3), 70);
    }

    #[test]
    fn spawn_interval_shrinks_with_level() {
        let tuning = WaveTuning {
            base_interval_ms: 1_000,
            per_level_decrement_ms: 10,
            ..WaveTuning::default()
        };
        assert_eq!(tuning.spawn_interval(3), Duration::from_millis(970));
    }

    #[test]
    fn spawn_interval_respects_floor() {
        let tuning = WaveTuning {
            base_interval_ms: 500,
            per_level_decrement_ms: 100,
            min_interval_ms: 200,
            ..WaveTuning::default()
        };
        assert_eq!(tuning.spawn_interval(9), Duration::from_millis(200));
    }

    #[test]
    fn negative_durations_collapse_to_zero() {
        let tuning = ActorTuning {
            hit_recovery_secs: -1.0,
            ..ActorTuning::default()
        };
        assert_eq!(tuning.hit_recovery(), Duration::ZERO);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GameConfig = toml::from_str(
            r#"
            seed = 7

            [economy]
            starting_funds = 500

            [pool]
            growth = "fixed"
            "#,
        )
        .expect("config parses");

        assert_eq!(config.seed, 7);
        assert_eq!(config.economy.starting_funds, 500);
        assert_eq!(config.economy.kill_reward, 150);
        assert_eq!(config.pool.growth, PoolGrowth::Fixed);
        assert_eq!(config.level.max_level, 10);
    }
}
