//! Headless tick loop wiring the world to every system.

use std::{collections::BTreeMap, fmt, time::Duration};

use metro_mayhem_core::{
    ActorId, ActorStatus, ActorView, Command, Event, GameError, Phase,
};
use metro_mayhem_system_builder::Builder;
use metro_mayhem_system_movement::{Movement, PathingProvider};
use metro_mayhem_system_spawning::{Config as SpawningConfig, WaveScheduler};
use metro_mayhem_system_tower_combat::{FireInput, TowerCombat};
use metro_mayhem_world::{self as world, query, World};
use tracing::{debug, info, warn};

use crate::{
    config::{SessionTuning, Settings},
    player::ScriptedPlayer,
};

/// Straight-line navigation agents advancing at a constant speed.
#[derive(Debug)]
struct LinearPaths {
    length: f32,
    speed: f32,
    travelled: BTreeMap<ActorId, f32>,
}

impl LinearPaths {
    fn new(length: f32, speed: f32) -> Self {
        Self {
            length: length.max(0.0),
            speed: speed.max(0.0),
            travelled: BTreeMap::new(),
        }
    }

    fn observe(&mut self, events: &[Event], actors: &ActorView) {
        for event in events {
            match event {
                Event::ActorSpawned { actor, .. } => {
                    let _ = self.travelled.insert(*actor, 0.0);
                }
                Event::ActorDying { actor }
                | Event::ActorDied { actor }
                | Event::ActorReachedEnd { actor } => {
                    let _ = self.travelled.remove(actor);
                }
                Event::ActorsFlushed { .. } => self.travelled.clear(),
                Event::TimeAdvanced { dt } => {
                    let step = self.speed * dt.as_secs_f32();
                    for snapshot in actors
                        .iter()
                        .filter(|snapshot| snapshot.status == ActorStatus::Moving)
                    {
                        if let Some(travelled) = self.travelled.get_mut(&snapshot.id) {
                            *travelled = (*travelled + step).min(self.length);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl PathingProvider for LinearPaths {
    fn remaining_distance(&self, actor: ActorId) -> Option<f32> {
        self.travelled
            .get(&actor)
            .map(|travelled| self.length - travelled)
    }

    fn path_length(&self, actor: ActorId) -> Option<f32> {
        self.travelled.contains_key(&actor).then_some(self.length)
    }
}

/// Resolves weapon fire into hits on the front-most enemy in range.
///
/// Launchers provoke the enemy they target into attacking.
fn resolve_shots(
    events: &[Event],
    actors: &ActorView,
    tuning: &SessionTuning,
    out: &mut Vec<Command>,
) {
    for event in events {
        let Event::WeaponFired { kind, .. } = event else {
            continue;
        };
        let target = actors
            .iter()
            .filter(|snapshot| {
                matches!(snapshot.status, ActorStatus::Moving | ActorStatus::Attacking)
            })
            .max_by(|left, right| left.progress.total_cmp(&right.progress));
        let Some(target) = target else {
            continue;
        };

        if kind.fires_missiles() && target.status == ActorStatus::Moving {
            out.push(Command::ActorAttack { actor: target.id });
        }
        out.push(Command::DamageActor {
            actor: target.id,
            amount: tuning.shot_damage(*kind),
        });
    }
}

/// Tallies of a finished session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Summary {
    pub(crate) ticks: u32,
    pub(crate) level: u32,
    pub(crate) funds: u32,
    pub(crate) health: u32,
    pub(crate) levels_won: u32,
    pub(crate) levels_lost: u32,
    pub(crate) kills: u32,
    pub(crate) escapes: u32,
    pub(crate) shots: u32,
    pub(crate) rejected: u32,
    pub(crate) game_won: bool,
}

impl Summary {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::LevelWon { .. } => self.levels_won += 1,
                Event::LevelLost { .. } => self.levels_lost += 1,
                Event::ActorDying { .. } => self.kills += 1,
                Event::ActorReachedEnd { .. } => self.escapes += 1,
                Event::WeaponFired { .. } => self.shots += 1,
                Event::CommandRejected { .. } => self.rejected += 1,
                Event::GameWon => self.game_won = true,
                _ => {}
            }
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ticks {} | level {} | funds {} | health {}",
            self.ticks, self.level, self.funds, self.health
        )?;
        writeln!(
            f,
            "levels won {} | levels lost {} | kills {} | escapes {} | shots {} | rejected {}",
            self.levels_won,
            self.levels_lost,
            self.kills,
            self.escapes,
            self.shots,
            self.rejected
        )?;
        write!(
            f,
            "{}",
            if self.game_won {
                "every level cleared"
            } else {
                "session ended before the final level was cleared"
            }
        )
    }
}

/// World plus every system, advanced one tick at a time.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    tuning: SessionTuning,
    scheduler: WaveScheduler,
    builder: Builder,
    movement: Movement,
    combat: TowerCombat,
    fire: FireInput,
    paths: LinearPaths,
    player: ScriptedPlayer,
    summary: Summary,
}

impl Session {
    pub(crate) fn new(settings: Settings) -> Self {
        let Settings { game, session } = settings;
        let scheduler = WaveScheduler::new(SpawningConfig::new(game.wave.clone(), game.seed));
        let mut created = Self {
            world: World::new(game),
            paths: LinearPaths::new(session.path_length, session.walk_speed),
            tuning: session,
            scheduler,
            builder: Builder::new(),
            movement: Movement::default(),
            combat: TowerCombat::new(),
            fire: FireInput::new(),
            player: ScriptedPlayer::new(),
            summary: Summary::default(),
        };
        created.submit(Command::StartLevel);
        created
    }

    pub(crate) fn banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }

    pub(crate) fn set_time_scale(&mut self, multiplier: f32) -> Result<(), GameError> {
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::SetTimeScale { multiplier },
            &mut events,
        );
        let rejected = events.iter().find_map(|event| match event {
            Event::CommandRejected { error } => Some(*error),
            _ => None,
        });
        self.settle(events);
        rejected.map_or(Ok(()), Err)
    }

    /// Advances the simulation by one tick and settles every resulting command.
    pub(crate) fn step(&mut self, dt: Duration) {
        self.summary.ticks += 1;
        self.submit(Command::Tick { dt });
    }

    /// Steps until the game is won or `ticks` ticks elapsed.
    pub(crate) fn run(&mut self, ticks: u32, dt: Duration) -> Summary {
        for _ in 0..ticks {
            if self.summary.game_won {
                break;
            }
            self.step(dt);
        }
        info!(
            ticks = self.summary.ticks,
            level = query::level(&self.world),
            won = self.summary.game_won,
            "session finished"
        );
        self.summary()
    }

    pub(crate) fn summary(&self) -> Summary {
        Summary {
            level: query::level(&self.world),
            funds: query::funds(&self.world),
            health: query::health(&self.world),
            ..self.summary.clone()
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        query::phase(&self.world)
    }

    fn submit(&mut self, command: Command) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.settle(events);
    }

    fn settle(&mut self, pending_events: Vec<Event>) {
        let mut events = pending_events;

        for _ in 0..self.tuning.max_rounds {
            if events.is_empty() {
                return;
            }
            self.summary.record(&events);

            let actors = query::actor_view(&self.world);
            let platforms = query::platform_view(&self.world);
            self.paths.observe(&events, &actors);

            let mut commands = Vec::new();
            let intent = self.player.handle(
                &events,
                &platforms,
                query::funds(&self.world),
                |kind| query::price(&self.world, kind),
                &mut self.fire,
                &mut commands,
            );
            self.builder
                .handle(&events, intent, &platforms, &mut commands);
            self.scheduler.handle(
                &events,
                query::active_actor_count(&self.world),
                &mut commands,
            );
            self.movement
                .handle(&events, &actors, &self.paths, &mut commands);
            self.combat
                .handle(&events, &self.fire, &platforms, &mut commands);
            resolve_shots(&events, &actors, &self.tuning, &mut commands);

            if commands.is_empty() {
                return;
            }
            debug!(commands = commands.len(), "settling round");

            events.clear();
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }

        if !events.is_empty() {
            warn!(
                pending = events.len(),
                "round limit reached with unsettled events"
            );
            self.summary.record(&events);
        }
    }
}
