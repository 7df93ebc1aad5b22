#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Metro Mayhem simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod config;

pub use config::{
    ActorTuning, EconomyTuning, EnemyProfile, GameConfig, LevelTuning, PoolGrowth, PoolTuning,
    SpawnArea, WaveTuning,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Metro Mayhem.";

/// Degrees a weapon turns for a single rotation intent.
pub const ROTATION_STEP_DEGREES: f32 = 15.0;

/// Phase of the level state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Level is being prepared; awaiting the start of the level.
    Setup,
    /// Simulation is halted; towers may be placed and managed.
    Paused(PauseKind),
    /// Waves are spawning and towers may fire.
    Playing,
    /// Every enemy of the level was cleared.
    Won,
    /// Player health was exhausted; the board is about to be restored.
    Lost,
}

impl Phase {
    /// Reports whether the phase halts the simulation clock for actors and towers.
    #[must_use]
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused(_))
    }
}

/// Distinguishes the pause that precedes play from a pause requested mid-level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauseKind {
    /// Pause entered after setup, before the first wave is released.
    PrePlay,
    /// Pause requested by the player while the level was playing.
    MidPlay,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Unscaled duration that elapsed since the previous tick.
        dt: Duration,
    },
    /// Sets the global fast-forward multiplier applied to every tick.
    SetTimeScale {
        /// Factor applied to tick durations; must be finite and non-negative.
        multiplier: f32,
    },
    /// Runs level setup and enters the pre-play pause.
    StartLevel,
    /// Leaves the pre-play pause and releases the waves.
    StartPlay,
    /// Pauses a level that is currently playing.
    Pause,
    /// Resumes a level paused mid-play.
    Resume,
    /// Marks a platform as the current placement target.
    SelectPlatform {
        /// Platform the player clicked.
        platform: PlatformId,
    },
    /// Marks an armory slot as the pending weapon purchase.
    SelectWeapon {
        /// Zero-based armory slot index supplied by the input layer.
        slot: usize,
    },
    /// Buys the pending weapon for the selected platform.
    ConfirmPurchase,
    /// Clears the platform selection and the pending weapon.
    CancelSelection,
    /// Places a weapon of the provided kind on a platform.
    PlaceTower {
        /// Platform that should host the weapon.
        platform: PlatformId,
        /// Kind of weapon to construct.
        kind: WeaponKind,
    },
    /// Removes the weapon hosted by a platform.
    RemoveTower {
        /// Platform whose weapon should be destroyed.
        platform: PlatformId,
    },
    /// Replaces a weapon with its upgraded variant.
    UpgradeTower {
        /// Platform whose weapon should be upgraded.
        platform: PlatformId,
    },
    /// Removes a weapon and refunds part of its price.
    DismantleTower {
        /// Platform whose weapon should be dismantled.
        platform: PlatformId,
    },
    /// Turns a weapon by one rotation step.
    RotateWeapon {
        /// Platform whose weapon should turn.
        platform: PlatformId,
        /// Direction of the turn.
        direction: RotationDirection,
    },
    /// Fires the weapon hosted by a platform.
    FireWeapon {
        /// Platform whose weapon should fire.
        platform: PlatformId,
    },
    /// Acquires an enemy from the pool and places it at the spawn point.
    SpawnActor {
        /// World position assigned to the spawned enemy.
        spawn: SpawnPoint,
    },
    /// Applies damage to an active enemy.
    DamageActor {
        /// Enemy receiving the damage.
        actor: ActorId,
        /// Amount of health removed; negative amounts are ignored.
        amount: f32,
    },
    /// Starts an enemy attack sequence.
    ActorAttack {
        /// Enemy that begins attacking.
        actor: ActorId,
    },
    /// Records the progress of an enemy along its path.
    AdvanceActor {
        /// Enemy that moved.
        actor: ActorId,
        /// Fraction of the path covered, between zero and one.
        progress: f32,
    },
    /// Reports that an enemy completed its path.
    ActorReachedEnd {
        /// Enemy that escaped.
        actor: ActorId,
    },
    /// Declares that every wave of the level has been spawned and cleared.
    DeclareWavesCleared,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Scaled duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms a new fast-forward multiplier.
    TimeScaleChanged {
        /// Multiplier that became active.
        multiplier: f32,
    },
    /// Announces that the level state machine entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Announces that setup completed for a level.
    LevelStarted {
        /// Level number, starting at one.
        level: u32,
    },
    /// Announces that a lost level was restored and will be replayed.
    LevelRestarted {
        /// Level number being replayed.
        level: u32,
    },
    /// Reports a change in player health.
    HealthChanged {
        /// Remaining player health.
        health: u32,
    },
    /// Reports a change in available funds.
    FundsChanged {
        /// Funds available after the change.
        funds: u32,
    },
    /// Reports a change in the enemy counters.
    EnemyCountChanged {
        /// Enemies spawned and not yet killed or escaped.
        alive: u32,
        /// Enemies the level releases in total.
        total: u32,
    },
    /// Confirms that an enemy left the pool and entered the level.
    ActorSpawned {
        /// Identifier of the spawned enemy.
        actor: ActorId,
        /// Variant of the spawned enemy.
        kind: EnemyKind,
        /// Position assigned to the enemy.
        spawn: SpawnPoint,
    },
    /// Reports that a spawn request could not be honoured this tick.
    SpawnSkipped {
        /// Reason the spawn was skipped.
        error: GameError,
    },
    /// Reports that an enemy took damage and entered its recovery window.
    ActorHit {
        /// Enemy that was hit.
        actor: ActorId,
        /// Health remaining after the hit.
        health: f32,
    },
    /// Reports that an enemy was killed and started dissolving.
    ActorDying {
        /// Enemy that was killed.
        actor: ActorId,
    },
    /// Reports that a killed enemy finished dissolving and returned to the pool.
    ActorDied {
        /// Enemy that was removed.
        actor: ActorId,
    },
    /// Reports that an enemy started attacking.
    ActorAttacking {
        /// Enemy that attacks.
        actor: ActorId,
    },
    /// Reports that an enemy completed its path and returned to the pool.
    ActorReachedEnd {
        /// Enemy that escaped.
        actor: ActorId,
    },
    /// Reports that the level ended and active enemies were force-returned.
    ActorsFlushed {
        /// Number of enemies returned to the pool.
        count: u32,
    },
    /// Confirms that a platform became the placement target.
    PlatformSelected {
        /// Platform that was selected.
        platform: PlatformId,
    },
    /// Confirms that the selection and pending weapon were cleared.
    SelectionCleared,
    /// Confirms that an armory slot became the pending purchase.
    WeaponSelected {
        /// Kind of weapon pending purchase.
        kind: WeaponKind,
    },
    /// Asks the presentation layer to confirm a purchase.
    PurchaseRequested {
        /// Platform targeted by the purchase.
        platform: PlatformId,
        /// Kind of weapon to buy.
        kind: WeaponKind,
        /// Price of the weapon.
        price: u32,
    },
    /// Confirms that a weapon was placed onto a platform.
    TowerPlaced {
        /// Platform hosting the weapon.
        platform: PlatformId,
        /// Identifier allocated to the weapon.
        weapon: WeaponId,
        /// Kind of weapon placed.
        kind: WeaponKind,
    },
    /// Confirms that a weapon was removed from a platform.
    TowerRemoved {
        /// Platform that hosted the weapon.
        platform: PlatformId,
        /// Identifier of the destroyed weapon.
        weapon: WeaponId,
    },
    /// Confirms that a weapon was replaced by its upgraded variant.
    TowerUpgraded {
        /// Platform hosting the weapon.
        platform: PlatformId,
        /// Kind of weapon after the upgrade.
        kind: WeaponKind,
    },
    /// Confirms that a weapon turned.
    WeaponRotated {
        /// Platform hosting the weapon.
        platform: PlatformId,
        /// Orientation after the turn, in degrees.
        rotation: f32,
    },
    /// Reports that a weapon fired.
    WeaponFired {
        /// Platform hosting the weapon.
        platform: PlatformId,
        /// Kind of weapon that fired.
        kind: WeaponKind,
    },
    /// Confirms that the board was archived during setup.
    BoardArchived {
        /// Funds captured by the archive.
        funds: u32,
        /// Number of occupied platforms captured by the archive.
        towers: u32,
    },
    /// Confirms that the board was restored from the archive.
    BoardRestored {
        /// Funds after the restore.
        funds: u32,
        /// Number of weapons recreated.
        towers: u32,
    },
    /// Signals that every enemy of the level was spawned and removed.
    AllEnemiesCleared {
        /// Level that was cleared.
        level: u32,
    },
    /// Announces that a level was won.
    LevelWon {
        /// Level that was won.
        level: u32,
    },
    /// Announces that a level was lost.
    LevelLost {
        /// Level that was lost.
        level: u32,
    },
    /// Announces that the final level was won.
    GameWon,
    /// Reports that a command was rejected.
    CommandRejected {
        /// Reason the command failed.
        error: GameError,
    },
}

/// Recoverable failures reported by simulation operations.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum GameError {
    /// Funds do not cover the price of the requested weapon.
    #[error("insufficient funds for the requested weapon")]
    InsufficientFunds,
    /// The platform already hosts a weapon.
    #[error("platform is already occupied")]
    PlatformOccupied,
    /// The platform does not host a weapon.
    #[error("platform is not occupied")]
    PlatformNotOccupied,
    /// The platform identifier is out of range.
    #[error("platform does not exist")]
    InvalidPlatform,
    /// The weapon kind or armory slot is not valid for the operation.
    #[error("weapon kind is not valid for this operation")]
    InvalidWeaponKind,
    /// The pool has no free instance and may not grow.
    #[error("pool is exhausted")]
    PoolExhausted,
    /// The released instance was not checked out of the pool.
    #[error("instance was not active in the pool")]
    InvalidRelease,
    /// The current phase does not permit the operation.
    #[error("operation not permitted during {phase:?}")]
    InvalidPhase {
        /// Phase active when the operation was attempted.
        phase: Phase,
    },
    /// The requested time multiplier is negative or not finite.
    #[error("time multiplier must be finite and non-negative")]
    InvalidTimeScale,
}

/// Unique identifier assigned to a pooled enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a fixed placement platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlatformId(u32);

impl PlatformId {
    /// Creates a new platform identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a weapon instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponId(u32);

impl WeaponId {
    /// Creates a new weapon identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Enemy variants released by the waves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Light citizen with a short dissolve.
    Small,
    /// Heavy citizen that takes longer to dissolve.
    Large,
}

impl EnemyKind {
    /// Every enemy variant in declaration order.
    pub const ALL: [Self; 2] = [Self::Small, Self::Large];
}

/// Weapons that can be hosted by a platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Single-barrel gatling gun.
    GatlingGun,
    /// Rocket launcher firing pooled missiles.
    MissileLauncher,
    /// Upgraded twin-barrel gatling gun.
    DualGatlingGun,
    /// Upgraded twin-rack missile launcher.
    DualMissileLauncher,
}

impl WeaponKind {
    /// Number of weapon kinds, which is also the price table length.
    pub const COUNT: usize = 4;

    /// Every weapon kind ordered by armory slot.
    pub const ALL: [Self; Self::COUNT] = [
        Self::GatlingGun,
        Self::MissileLauncher,
        Self::DualGatlingGun,
        Self::DualMissileLauncher,
    ];

    /// Resolves an armory slot index into a weapon kind.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Armory slot index of the weapon kind.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::GatlingGun => 0,
            Self::MissileLauncher => 1,
            Self::DualGatlingGun => 2,
            Self::DualMissileLauncher => 3,
        }
    }

    /// Weapon kind produced by upgrading this one, if any.
    #[must_use]
    pub const fn upgrade(self) -> Option<Self> {
        match self {
            Self::GatlingGun => Some(Self::DualGatlingGun),
            Self::MissileLauncher => Some(Self::DualMissileLauncher),
            Self::DualGatlingGun | Self::DualMissileLauncher => None,
        }
    }

    /// Reports whether firing the weapon launches pooled missiles.
    #[must_use]
    pub const fn fires_missiles(self) -> bool {
        matches!(self, Self::MissileLauncher | Self::DualMissileLauncher)
    }

    /// Minimum simulated time between two shots.
    ///
    /// Gatling guns fire on every tick the trigger is held; launchers must
    /// reload between salvos.
    #[must_use]
    pub const fn fire_interval(self) -> Duration {
        match self {
            Self::GatlingGun => Duration::from_millis(100),
            Self::DualGatlingGun => Duration::from_millis(50),
            Self::MissileLauncher => Duration::from_millis(2_000),
            Self::DualMissileLauncher => Duration::from_millis(1_500),
        }
    }
}

/// Direction of a weapon rotation intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    /// Counter-clockwise turn, decreasing the heading.
    Left,
    /// Clockwise turn, increasing the heading.
    Right,
}

/// World position assigned to a spawned enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
    /// Depth coordinate.
    pub z: f32,
}

impl SpawnPoint {
    /// Creates a spawn point from world coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Lifecycle state of a pooled enemy as observed by queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorStatus {
    /// Resting inside the pool.
    Idle,
    /// Travelling along its path.
    Moving,
    /// Recovering from a hit; further damage is ignored.
    Hit,
    /// Performing an attack.
    Attacking,
    /// Killed and dissolving.
    Dying,
    /// Returned to the pool after dying or escaping.
    Removed,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorSnapshot {
    /// Identifier of the enemy.
    pub id: ActorId,
    /// Variant of the enemy.
    pub kind: EnemyKind,
    /// Remaining health.
    pub health: f32,
    /// Lifecycle state.
    pub status: ActorStatus,
    /// Fraction of the path covered.
    pub progress: f32,
    /// Spawn position.
    pub spawn: SpawnPoint,
}

/// Read-only snapshot describing every active enemy.
#[derive(Clone, Debug, Default)]
pub struct ActorView {
    snapshots: Vec<ActorSnapshot>,
}

impl ActorView {
    /// Creates a new actor view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ActorSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ActorSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ActorSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single platform used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlatformSnapshot {
    /// Identifier of the platform.
    pub id: PlatformId,
    /// Weapon hosted by the platform, if any.
    pub weapon: Option<WeaponSnapshot>,
    /// Reports whether the platform is the current placement target.
    pub selected: bool,
}

/// Immutable representation of a hosted weapon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponSnapshot {
    /// Identifier of the weapon instance.
    pub id: WeaponId,
    /// Kind of weapon.
    pub kind: WeaponKind,
    /// Heading in degrees.
    pub rotation: f32,
}

/// Read-only snapshot describing every platform.
#[derive(Clone, Debug, Default)]
pub struct PlatformView {
    snapshots: Vec<PlatformSnapshot>,
}

impl PlatformView {
    /// Creates a new platform view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PlatformSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PlatformSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a single platform.
    #[must_use]
    pub fn get(&self, platform: PlatformId) -> Option<&PlatformSnapshot> {
        self.snapshots
            .binary_search_by_key(&platform, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlatformSnapshot> {
        self.snapshots
    }
}

/// Occupancy figures of an object pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances currently checked out.
    pub active: usize,
    /// Instances resting in the pool.
    pub free: usize,
}

#[cfg(test)]
mod tests {
    use super::{GameError, Phase, PauseKind, WeaponKind};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn game_error_round_trips_through_bincode() {
        assert_round_trip(&GameError::InvalidPhase {
            phase: Phase::Paused(PauseKind::MidPlay),
        });
    }

    #[test]
    fn armory_slots_resolve_in_order() {
        for (index, kind) in WeaponKind::ALL.iter().enumerate() {
            assert_eq!(WeaponKind::from_index(index), Some(*kind));
            assert_eq!(kind.index(), index);
        }
        assert_eq!(WeaponKind::from_index(WeaponKind::COUNT), None);
    }

    #[test]
    fn only_base_weapons_upgrade() {
        assert_eq!(
            WeaponKind::GatlingGun.upgrade(),
            Some(WeaponKind::DualGatlingGun)
        );
        assert_eq!(
            WeaponKind::MissileLauncher.upgrade(),
            Some(WeaponKind::DualMissileLauncher)
        );
        assert_eq!(WeaponKind::DualGatlingGun.upgrade(), None);
        assert_eq!(WeaponKind::DualMissileLauncher.upgrade(), None);
    }

    #[test]
    fn launchers_fire_missiles() {
        assert!(WeaponKind::MissileLauncher.fires_missiles());
        assert!(!WeaponKind::GatlingGun.fires_missiles());
    }

    #[test]
    fn error_messages_name_the_phase() {
        let message = GameError::InvalidPhase { phase: Phase::Won }.to_string();
        assert!(message.contains("Won"), "unexpected message: {message}");
    }
}
