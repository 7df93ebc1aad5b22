#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave scheduler responsible for metering enemy spawns and declaring
//! the waves of a level cleared.

use std::time::Duration;

use metro_mayhem_core::{Command, Event, Phase, SpawnArea, SpawnPoint, WaveTuning};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Configuration parameters required to construct the wave scheduler.
#[derive(Clone, Debug)]
pub struct Config {
    wave: WaveTuning,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided wave tuning and seed.
    #[must_use]
    pub const fn new(wave: WaveTuning, rng_seed: u64) -> Self {
        Self { wave, rng_seed }
    }
}

/// Pure system that releases the waves of a level one enemy at a time.
///
/// The scheduler only counts spawns the world confirmed. Requests in flight
/// are tracked separately so a skipped spawn can be retried on the next tick.
#[derive(Debug)]
pub struct WaveScheduler {
    wave: WaveTuning,
    rng: ChaCha8Rng,
    phase: Phase,
    armed: bool,
    level: u32,
    target: u32,
    interval: Duration,
    countdown: Duration,
    confirmed: u32,
    in_flight: u32,
    clear_requested: bool,
    cleared_signalled: bool,
}

impl WaveScheduler {
    /// Creates a new scheduler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            wave: config.wave,
            phase: Phase::Setup,
            armed: false,
            level: 0,
            target: 0,
            interval: Duration::ZERO,
            countdown: Duration::ZERO,
            confirmed: 0,
            in_flight: 0,
            clear_requested: false,
            cleared_signalled: false,
        }
    }

    /// Consumes world events and the active enemy count to emit spawn and clear commands.
    pub fn handle(&mut self, events: &[Event], active_actors: usize, out: &mut Vec<Command>) {
        let mut ticked = false;

        for event in events {
            match event {
                Event::PhaseChanged { phase } => {
                    self.phase = *phase;
                    self.clear_requested = false;
                }
                Event::LevelStarted { level } | Event::LevelRestarted { level } => {
                    self.arm(*level);
                }
                Event::ActorSpawned { .. } => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.confirmed = self.confirmed.saturating_add(1);
                }
                Event::SpawnSkipped { error } => {
                    debug!(%error, "spawn request returned");
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.countdown = Duration::ZERO;
                }
                Event::TimeAdvanced { dt } if self.phase == Phase::Playing => {
                    self.countdown = self.countdown.saturating_sub(*dt);
                    self.clear_requested = false;
                    ticked = true;
                }
                Event::AllEnemiesCleared { .. } => self.cleared_signalled = true,
                _ => {}
            }
        }

        if !self.armed || self.phase != Phase::Playing {
            return;
        }

        if ticked && self.countdown.is_zero() && self.requested() < self.target {
            let spawn = self.spawn_point();
            self.in_flight = self.in_flight.saturating_add(1);
            self.countdown = self.interval;
            out.push(Command::SpawnActor { spawn });
        }

        // Only the world's AllEnemiesCleared settles the level; an unanswered
        // declaration is repeated after the next tick or phase change.
        if !self.cleared_signalled
            && !self.clear_requested
            && self.confirmed >= self.target
            && self.in_flight == 0
            && active_actors == 0
        {
            self.clear_requested = true;
            debug!(level = self.level, spawned = self.confirmed, "declaring waves cleared");
            out.push(Command::DeclareWavesCleared);
        }
    }

    /// Number of spawns the world confirmed during the current level.
    #[must_use]
    pub const fn confirmed(&self) -> u32 {
        self.confirmed
    }

    /// Number of spawn requests awaiting confirmation.
    #[must_use]
    pub const fn in_flight(&self) -> u32 {
        self.in_flight
    }

    /// Number of enemies released during the current level.
    #[must_use]
    pub const fn target(&self) -> u32 {
        self.target
    }

    /// Delay between two spawns during the current level.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    fn arm(&mut self, level: u32) {
        self.armed = true;
        self.level = level;
        self.target = self.wave.target_count(level);
        self.interval = self.wave.spawn_interval(level);
        self.countdown = Duration::ZERO;
        self.confirmed = 0;
        self.in_flight = 0;
        self.clear_requested = false;
        self.cleared_signalled = false;
        debug!(
            level,
            target = self.target,
            interval_ms = self.interval.as_millis() as u64,
            "wave armed"
        );
    }

    fn requested(&self) -> u32 {
        self.confirmed.saturating_add(self.in_flight)
    }

    fn spawn_point(&mut self) -> SpawnPoint {
        let SpawnArea {
            min_x,
            max_x,
            y,
            min_z,
            max_z,
        } = self.wave.spawn_area;
        let x = sample(&mut self.rng, min_x, max_x);
        let z = sample(&mut self.rng, min_z, max_z);
        SpawnPoint::new(x, y, z)
    }
}

fn sample(rng: &mut ChaCha8Rng, a: f32, b: f32) -> f32 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    if low < high && low.is_finite() && high.is_finite() {
        rng.gen_range(low..high)
    } else {
        low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_degenerate_range_returns_bound() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(sample(&mut rng, 0.5, 0.5), 0.5);
        assert_eq!(sample(&mut rng, f32::NAN, 1.0), 1.0);
    }

    #[test]
    fn sampling_accepts_reversed_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let value = sample(&mut rng, 2.0, 1.0);
            assert!((1.0..2.0).contains(&value), "{value} out of range");
        }
    }
}
