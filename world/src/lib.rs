#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Metro Mayhem.
//!
//! The [`World`] owns the level state machine, the economy ledger, the
//! placement grid, the board archive, and both object pools. Every mutation
//! enters through [`apply`], which never panics: failures are reported as
//! [`Event::CommandRejected`] or [`Event::SpawnSkipped`].

use std::time::Duration;

use metro_mayhem_core::{
    ActorId, ActorStatus, Command, EnemyKind, Event, GameConfig, GameError, PauseKind, Phase,
    PlatformId, SpawnPoint, WeaponKind, WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

pub mod actor;
pub mod ledger;
pub mod platforms;
pub mod pool;

use actor::{Actor, ActorTransition, DamageOutcome};
use ledger::EconomyLedger;
use platforms::{BoardLayout, PlacementGrid, SelectOutcome};
use pool::{ObjectPool, PoolSlot, VariantDeck};

/// Missile launched by a launcher weapon and recycled after its lifetime.
#[derive(Clone, Debug, Default)]
struct Missile {
    remaining: Duration,
}

impl Missile {
    fn launch(&mut self, lifetime: Duration) {
        self.remaining = lifetime;
    }

    fn advance(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        self.remaining.is_zero()
    }
}

/// Represents the authoritative Metro Mayhem world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    phase: Phase,
    level: u32,
    health: u32,
    ledger: EconomyLedger,
    grid: PlacementGrid,
    archive: Option<BoardLayout>,
    actors: ObjectPool<Actor>,
    missiles: ObjectPool<Missile>,
    deck: VariantDeck<EnemyKind>,
    rng: ChaCha8Rng,
    enemies_alive: u32,
    enemies_total: u32,
    enemies_spawned: u32,
    cleared_signalled: bool,
    next_level_in: Option<Duration>,
    time_scale: f32,
}

impl World {
    /// Creates a world awaiting the setup of the first level.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut deck = VariantDeck::new(&EnemyKind::ALL);
        let actors = ObjectPool::prewarmed(config.pool.prewarm, config.pool.growth, |_| {
            Actor::new(deck.draw(&mut rng).unwrap_or(EnemyKind::Small))
        });
        let missiles = ObjectPool::prewarmed(
            config.pool.missile_prewarm,
            config.pool.missile_growth,
            |_| Missile::default(),
        );

        Self {
            banner: WELCOME_BANNER,
            phase: Phase::Setup,
            level: 1,
            health: config.level.starting_health,
            ledger: EconomyLedger::new(&config.economy),
            grid: PlacementGrid::new(config.level.platform_count),
            archive: None,
            actors,
            missiles,
            deck,
            rng,
            enemies_alive: 0,
            enemies_total: config.wave.target_count(1),
            enemies_spawned: 0,
            cleared_signalled: false,
            next_level_in: None,
            time_scale: 1.0,
            config,
        }
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        debug!(from = ?self.phase, to = ?phase, level = self.level, "phase changed");
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn ensure_phase(&self, permitted: fn(Phase) -> bool) -> Result<(), GameError> {
        if permitted(self.phase) {
            Ok(())
        } else {
            Err(GameError::InvalidPhase { phase: self.phase })
        }
    }

    fn transition(
        &mut self,
        from: Phase,
        to: Phase,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        if self.phase != from {
            return Err(GameError::InvalidPhase { phase: self.phase });
        }
        self.set_phase(to, out_events);
        Ok(())
    }

    fn push_enemy_counts(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::EnemyCountChanged {
            alive: self.enemies_alive,
            total: self.enemies_total,
        });
    }

    fn reset_enemy_counters(&mut self) {
        self.enemies_alive = 0;
        self.enemies_spawned = 0;
        self.enemies_total = self.config.wave.target_count(self.level);
        self.cleared_signalled = false;
    }

    fn start_level(&mut self, out_events: &mut Vec<Event>) -> Result<(), GameError> {
        self.ensure_phase(|phase| phase == Phase::Setup)?;

        self.health = self.config.level.starting_health;
        out_events.push(Event::HealthChanged {
            health: self.health,
        });

        self.grid.clear_selection();
        out_events.push(Event::SelectionCleared);

        self.ledger.archive();
        self.archive = Some(self.grid.layout());
        out_events.push(Event::BoardArchived {
            funds: self.ledger.funds(),
            towers: self.grid.occupied_count(),
        });

        self.reset_enemy_counters();
        self.push_enemy_counts(out_events);

        info!(level = self.level, total = self.enemies_total, "level started");
        out_events.push(Event::LevelStarted { level: self.level });
        self.set_phase(Phase::Paused(PauseKind::PrePlay), out_events);
        Ok(())
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let scaled = scale_duration(dt, self.time_scale);
        out_events.push(Event::TimeAdvanced { dt: scaled });

        match self.phase {
            Phase::Playing => self.advance_play(scaled, out_events),
            Phase::Won => {
                if let Some(remaining) = self.next_level_in {
                    let remaining = remaining.saturating_sub(scaled);
                    if remaining.is_zero() {
                        self.next_level_in = None;
                        self.set_phase(Phase::Setup, out_events);
                        if let Err(error) = self.start_level(out_events) {
                            warn!(%error, "automatic level setup failed");
                        }
                    } else {
                        self.next_level_in = Some(remaining);
                    }
                }
            }
            Phase::Setup | Phase::Paused(_) | Phase::Lost => {}
        }
    }

    fn advance_play(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut dissolved = Vec::new();
        for (slot, actor) in self.actors.iter_active_mut() {
            match actor.advance(dt) {
                Some(ActorTransition::Dissolved) => dissolved.push(slot),
                Some(transition) => debug!(actor = slot.index(), ?transition, "actor timer"),
                None => {}
            }
        }
        for slot in dissolved {
            if let Err(error) = self.actors.release(slot) {
                warn!(actor = slot.index(), %error, "dissolved actor was not active");
                continue;
            }
            out_events.push(Event::ActorDied {
                actor: actor_id(slot),
            });
        }

        let expired: Vec<PoolSlot> = self
            .missiles
            .iter_active_mut()
            .filter_map(|(slot, missile)| missile.advance(dt).then_some(slot))
            .collect();
        for slot in expired {
            if let Err(error) = self.missiles.release(slot) {
                warn!(missile = slot.index(), %error, "expired missile was not active");
            }
        }

        self.grid.cool_down(dt);
    }

    fn spawn_actor(&mut self, spawn: SpawnPoint, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing {
            out_events.push(Event::SpawnSkipped {
                error: GameError::InvalidPhase { phase: self.phase },
            });
            return;
        }

        let deck = &mut self.deck;
        let rng = &mut self.rng;
        let slot = match self
            .actors
            .acquire(|_| Actor::new(deck.draw(rng).unwrap_or(EnemyKind::Small)))
        {
            Ok(slot) => slot,
            Err(error) => {
                debug!(%error, "spawn skipped");
                out_events.push(Event::SpawnSkipped { error });
                return;
            }
        };

        let Some(actor) = self.actors.get_mut(slot) else {
            return;
        };
        let kind = actor.kind();
        actor.activate(self.config.actors.profile(kind), spawn);

        self.enemies_spawned = self.enemies_spawned.saturating_add(1);
        self.enemies_alive = self.enemies_alive.saturating_add(1);
        debug!(actor = slot.index(), ?kind, spawned = self.enemies_spawned, "actor spawned");
        out_events.push(Event::ActorSpawned {
            actor: actor_id(slot),
            kind,
            spawn,
        });
        self.push_enemy_counts(out_events);
    }

    fn damage_actor(&mut self, id: ActorId, amount: f32, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing {
            return;
        }
        let hit_recovery = self.config.actors.hit_recovery();
        let Some(actor) = self.actors.get_mut(actor_slot(id)) else {
            debug!(actor = id.get(), "damage for inactive actor ignored");
            return;
        };
        let dissolve = self.config.actors.profile(actor.kind()).dissolve();

        match actor.damage(amount, hit_recovery, dissolve) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hit { health } => {
                out_events.push(Event::ActorHit { actor: id, health });
            }
            DamageOutcome::Killed => {
                self.enemies_alive = self.enemies_alive.saturating_sub(1);
                let funds = self.ledger.credit(self.config.economy.kill_reward);
                debug!(actor = id.get(), funds, "actor killed");
                out_events.push(Event::ActorDying { actor: id });
                out_events.push(Event::FundsChanged { funds });
                self.push_enemy_counts(out_events);
            }
        }
    }

    fn actor_attack(&mut self, id: ActorId, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing {
            return;
        }
        let duration = self.config.actors.attack_duration();
        if let Some(actor) = self.actors.get_mut(actor_slot(id)) {
            if actor.begin_attack(duration) {
                out_events.push(Event::ActorAttacking { actor: id });
            }
        }
    }

    fn advance_actor(&mut self, id: ActorId, progress: f32) {
        if self.phase != Phase::Playing {
            return;
        }
        if let Some(actor) = self.actors.get_mut(actor_slot(id)) {
            actor.set_progress(progress);
        }
    }

    fn actor_reached_end(&mut self, id: ActorId, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Playing {
            return;
        }
        let slot = actor_slot(id);
        match self.actors.get_mut(slot) {
            Some(actor) if actor.status() == ActorStatus::Moving => actor.retire(),
            _ => return,
        }
        if let Err(error) = self.actors.release(slot) {
            warn!(actor = id.get(), %error, "escaped actor was not active");
            return;
        }

        self.enemies_alive = self.enemies_alive.saturating_sub(1);
        self.health = self
            .health
            .saturating_sub(self.config.level.escape_damage);
        debug!(actor = id.get(), health = self.health, "actor escaped");
        out_events.push(Event::ActorReachedEnd { actor: id });
        out_events.push(Event::HealthChanged {
            health: self.health,
        });
        self.push_enemy_counts(out_events);

        if self.health == 0 {
            self.lose(out_events);
        }
    }

    fn declare_waves_cleared(&mut self, out_events: &mut Vec<Event>) {
        let active = self.actors.active_count();
        if self.phase != Phase::Playing
            || self.cleared_signalled
            || self.enemies_spawned < self.enemies_total
            || active > 0
        {
            debug!(
                phase = ?self.phase,
                spawned = self.enemies_spawned,
                total = self.enemies_total,
                active,
                "waves not cleared yet"
            );
            return;
        }

        self.cleared_signalled = true;
        out_events.push(Event::AllEnemiesCleared { level: self.level });
        self.win(out_events);
    }

    fn flush_pools(&mut self, out_events: &mut Vec<Event>) {
        for (_, actor) in self.actors.iter_active_mut() {
            actor.retire();
        }
        let flushed = self.actors.release_all();
        let _ = self.missiles.release_all();
        self.enemies_alive = 0;
        out_events.push(Event::ActorsFlushed {
            count: u32::try_from(flushed.len()).unwrap_or(u32::MAX),
        });
        self.push_enemy_counts(out_events);
    }

    fn win(&mut self, out_events: &mut Vec<Event>) {
        self.set_phase(Phase::Won, out_events);
        self.flush_pools(out_events);
        info!(level = self.level, funds = self.ledger.funds(), "level won");
        out_events.push(Event::LevelWon { level: self.level });

        if self.level >= self.config.level.max_level {
            info!(level = self.level, "game won");
            out_events.push(Event::GameWon);
            return;
        }
        self.level = self.level.saturating_add(1);
        self.next_level_in = Some(self.config.level.level_won_delay());
    }

    fn lose(&mut self, out_events: &mut Vec<Event>) {
        self.set_phase(Phase::Lost, out_events);
        self.flush_pools(out_events);
        info!(level = self.level, "level lost");
        out_events.push(Event::LevelLost { level: self.level });

        let funds = self.ledger.restore();
        let towers = match &self.archive {
            Some(layout) => self.grid.restore(layout),
            None => self.grid.restore(&[]),
        };
        out_events.push(Event::BoardRestored { funds, towers });
        out_events.push(Event::FundsChanged { funds });

        self.health = self.config.level.starting_health;
        out_events.push(Event::HealthChanged {
            health: self.health,
        });
        self.reset_enemy_counters();
        self.push_enemy_counts(out_events);

        out_events.push(Event::LevelRestarted { level: self.level });
        self.set_phase(Phase::Paused(PauseKind::PrePlay), out_events);
    }

    fn select_platform(
        &mut self,
        platform: PlatformId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.ensure_phase(building)?;
        match self.grid.select(platform)? {
            SelectOutcome::Ignored => {}
            SelectOutcome::Selected => out_events.push(Event::PlatformSelected { platform }),
            SelectOutcome::PurchasePending(kind) => {
                out_events.push(Event::PlatformSelected { platform });
                out_events.push(Event::PurchaseRequested {
                    platform,
                    kind,
                    price: self.ledger.price(kind),
                });
            }
        }
        Ok(())
    }

    fn select_weapon(&mut self, slot: usize, out_events: &mut Vec<Event>) -> Result<(), GameError> {
        self.ensure_phase(building)?;
        let kind = WeaponKind::from_index(slot).ok_or(GameError::InvalidWeaponKind)?;
        out_events.push(Event::WeaponSelected { kind });
        if let Some(platform) = self.grid.select_weapon(kind) {
            out_events.push(Event::PurchaseRequested {
                platform,
                kind,
                price: self.ledger.price(kind),
            });
        }
        Ok(())
    }

    fn confirm_purchase(&mut self, out_events: &mut Vec<Event>) -> Result<(), GameError> {
        match self.grid.selection() {
            (Some(platform), Some(kind)) => self.place_tower(platform, kind, out_events),
            (None, _) => Err(GameError::InvalidPlatform),
            (Some(_), None) => Err(GameError::InvalidWeaponKind),
        }
    }

    fn place_tower(
        &mut self,
        platform: PlatformId,
        kind: WeaponKind,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.ensure_phase(building)?;
        self.grid.ensure_vacant(platform)?;
        let funds = self.ledger.spend(kind)?;
        let weapon = self.grid.occupy(platform, kind, 0.0)?;
        self.grid.clear_selection();

        debug!(platform = platform.get(), ?kind, funds, "tower placed");
        out_events.push(Event::TowerPlaced {
            platform,
            weapon,
            kind,
        });
        out_events.push(Event::FundsChanged { funds });
        out_events.push(Event::SelectionCleared);
        Ok(())
    }

    fn remove_tower(
        &mut self,
        platform: PlatformId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.ensure_phase(building)?;
        let weapon = self.grid.vacate(platform)?;
        out_events.push(Event::TowerRemoved {
            platform,
            weapon: weapon.id(),
        });
        Ok(())
    }

    fn upgrade_tower(
        &mut self,
        platform: PlatformId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.ensure_phase(Phase::is_paused)?;
        let current = self
            .grid
            .weapon(platform)?
            .ok_or(GameError::PlatformNotOccupied)?;
        let upgraded = current.kind().upgrade().ok_or(GameError::InvalidWeaponKind)?;
        if !self.ledger.can_afford(upgraded) {
            return Err(GameError::InsufficientFunds);
        }
        let rotation = current.rotation();

        let removed = self.grid.vacate(platform)?;
        out_events.push(Event::TowerRemoved {
            platform,
            weapon: removed.id(),
        });
        let funds = self.ledger.spend(upgraded)?;
        let weapon = self.grid.occupy(platform, upgraded, rotation)?;

        debug!(platform = platform.get(), kind = ?upgraded, funds, "tower upgraded");
        out_events.push(Event::TowerPlaced {
            platform,
            weapon,
            kind: upgraded,
        });
        out_events.push(Event::TowerUpgraded {
            platform,
            kind: upgraded,
        });
        out_events.push(Event::FundsChanged { funds });
        Ok(())
    }

    fn dismantle_tower(
        &mut self,
        platform: PlatformId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.ensure_phase(Phase::is_paused)?;
        let weapon = self.grid.vacate(platform)?;
        let refund = self.ledger.refund(weapon.kind());

        debug!(platform = platform.get(), refund, "tower dismantled");
        out_events.push(Event::TowerRemoved {
            platform,
            weapon: weapon.id(),
        });
        out_events.push(Event::FundsChanged {
            funds: self.ledger.funds(),
        });
        Ok(())
    }

    fn fire_weapon(
        &mut self,
        platform: PlatformId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        self.ensure_phase(|phase| phase == Phase::Playing)?;
        let Some(kind) = self.grid.loaded(platform)? else {
            return Ok(());
        };

        // The reload starts only once a missile is in hand.
        if kind.fires_missiles() {
            let slot = self.missiles.acquire(|_| Missile::default())?;
            let lifetime = self.config.pool.missile_lifetime();
            if let Some(missile) = self.missiles.get_mut(slot) {
                missile.launch(lifetime);
            }
        }
        let _ = self.grid.fire(platform)?;
        out_events.push(Event::WeaponFired { platform, kind });
        Ok(())
    }

    fn set_time_scale(
        &mut self,
        multiplier: f32,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(GameError::InvalidTimeScale);
        }
        self.time_scale = multiplier;
        out_events.push(Event::TimeScaleChanged { multiplier });
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let result = match command {
        Command::Tick { dt } => {
            world.tick(dt, out_events);
            Ok(())
        }
        Command::SetTimeScale { multiplier } => world.set_time_scale(multiplier, out_events),
        Command::StartLevel => world.start_level(out_events),
        Command::StartPlay => world.transition(
            Phase::Paused(PauseKind::PrePlay),
            Phase::Playing,
            out_events,
        ),
        Command::Pause => world.transition(
            Phase::Playing,
            Phase::Paused(PauseKind::MidPlay),
            out_events,
        ),
        Command::Resume => world.transition(
            Phase::Paused(PauseKind::MidPlay),
            Phase::Playing,
            out_events,
        ),
        Command::SelectPlatform { platform } => world.select_platform(platform, out_events),
        Command::SelectWeapon { slot } => world.select_weapon(slot, out_events),
        Command::ConfirmPurchase => world.confirm_purchase(out_events),
        Command::CancelSelection => world.ensure_phase(building).map(|()| {
            world.grid.clear_selection();
            out_events.push(Event::SelectionCleared);
        }),
        Command::PlaceTower { platform, kind } => world.place_tower(platform, kind, out_events),
        Command::RemoveTower { platform } => world.remove_tower(platform, out_events),
        Command::UpgradeTower { platform } => world.upgrade_tower(platform, out_events),
        Command::DismantleTower { platform } => world.dismantle_tower(platform, out_events),
        Command::RotateWeapon {
            platform,
            direction,
        } => world
            .ensure_phase(building)
            .and_then(|()| world.grid.rotate(platform, direction))
            .map(|rotation| out_events.push(Event::WeaponRotated { platform, rotation })),
        Command::FireWeapon { platform } => world.fire_weapon(platform, out_events),
        Command::SpawnActor { spawn } => {
            world.spawn_actor(spawn, out_events);
            Ok(())
        }
        Command::DamageActor { actor, amount } => {
            world.damage_actor(actor, amount, out_events);
            Ok(())
        }
        Command::ActorAttack { actor } => {
            world.actor_attack(actor, out_events);
            Ok(())
        }
        Command::AdvanceActor { actor, progress } => {
            world.advance_actor(actor, progress);
            Ok(())
        }
        Command::ActorReachedEnd { actor } => {
            world.actor_reached_end(actor, out_events);
            Ok(())
        }
        Command::DeclareWavesCleared => {
            world.declare_waves_cleared(out_events);
            Ok(())
        }
    };

    if let Err(error) = result {
        warn!(%error, phase = ?world.phase, "command rejected");
        out_events.push(Event::CommandRejected { error });
    }
}

fn building(phase: Phase) -> bool {
    matches!(phase, Phase::Paused(_) | Phase::Playing)
}

fn scale_duration(dt: Duration, multiplier: f32) -> Duration {
    if multiplier == 1.0 {
        return dt;
    }
    Duration::try_from_secs_f64(dt.as_secs_f64() * f64::from(multiplier)).unwrap_or(Duration::MAX)
}

pub(crate) fn actor_id(slot: PoolSlot) -> ActorId {
    ActorId::new(slot.index())
}

fn actor_slot(actor: ActorId) -> PoolSlot {
    PoolSlot::new(actor.get())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use metro_mayhem_core::{
        ActorView, GameConfig, Phase, PlatformId, PlatformView, PoolStats, WeaponKind,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Current phase of the level state machine.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Current level number, starting at one.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Remaining player health.
    #[must_use]
    pub fn health(world: &World) -> u32 {
        world.health
    }

    /// Funds currently available.
    #[must_use]
    pub fn funds(world: &World) -> u32 {
        world.ledger.funds()
    }

    /// Price of the provided weapon kind.
    #[must_use]
    pub fn price(world: &World, kind: WeaponKind) -> u32 {
        world.ledger.price(kind)
    }

    /// Enemies spawned and not yet killed or escaped.
    #[must_use]
    pub fn enemies_alive(world: &World) -> u32 {
        world.enemies_alive
    }

    /// Enemies the current level releases in total.
    #[must_use]
    pub fn enemies_total(world: &World) -> u32 {
        world.enemies_total
    }

    /// Enemies spawned so far during the current level.
    #[must_use]
    pub fn enemies_spawned(world: &World) -> u32 {
        world.enemies_spawned
    }

    /// Number of enemies currently checked out of the pool, dying ones included.
    #[must_use]
    pub fn active_actor_count(world: &World) -> usize {
        world.actors.active_count()
    }

    /// Active fast-forward multiplier.
    #[must_use]
    pub fn time_scale(world: &World) -> f32 {
        world.time_scale
    }

    /// Remaining delay before the next level is set up, if a level was just won.
    #[must_use]
    pub fn next_level_in(world: &World) -> Option<Duration> {
        world.next_level_in
    }

    /// Currently selected platform, if any.
    #[must_use]
    pub fn selected_platform(world: &World) -> Option<PlatformId> {
        world.grid.selection().0
    }

    /// Weapon kind pending purchase, if any.
    #[must_use]
    pub fn pending_weapon(world: &World) -> Option<WeaponKind> {
        world.grid.selection().1
    }

    /// Captures a read-only view of every platform.
    #[must_use]
    pub fn platform_view(world: &World) -> PlatformView {
        world.grid.view()
    }

    /// Captures a read-only view of every active enemy.
    #[must_use]
    pub fn actor_view(world: &World) -> ActorView {
        ActorView::from_snapshots(
            world
                .actors
                .iter_active()
                .map(|(slot, actor)| actor.snapshot(slot))
                .collect(),
        )
    }

    /// Occupancy of the enemy pool.
    #[must_use]
    pub fn actor_pool_stats(world: &World) -> PoolStats {
        world.actors.stats()
    }

    /// Occupancy of the missile pool.
    #[must_use]
    pub fn missile_pool_stats(world: &World) -> PoolStats {
        world.missiles.stats()
    }
}
