use std::{collections::BTreeMap, time::Duration};

use metro_mayhem_core::{ActorId, ActorView, Command, Event, PauseKind, Phase, SpawnPoint};
use metro_mayhem_system_movement::{Movement, PathingProvider};
use metro_mayhem_world::{self as world, query, World};

#[derive(Default)]
struct FixedPaths {
    paths: BTreeMap<ActorId, (f32, f32)>,
}

impl FixedPaths {
    fn set(&mut self, actor: ActorId, remaining: f32, length: f32) {
        let _ = self.paths.insert(actor, (remaining, length));
    }
}

impl PathingProvider for FixedPaths {
    fn remaining_distance(&self, actor: ActorId) -> Option<f32> {
        self.paths.get(&actor).map(|(remaining, _)| *remaining)
    }

    fn path_length(&self, actor: ActorId) -> Option<f32> {
        self.paths.get(&actor).map(|(_, length)| *length)
    }
}

fn tick() -> Event {
    Event::TimeAdvanced {
        dt: Duration::from_millis(100),
    }
}

fn playing_world_with_actor() -> (World, ActorId, Vec<Event>) {
    let mut world = World::default();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartLevel, &mut events);
    world::apply(&mut world, Command::StartPlay, &mut events);
    world::apply(
        &mut world,
        Command::SpawnActor {
            spawn: SpawnPoint::default(),
        },
        &mut events,
    );
    let actor = events
        .iter()
        .find_map(|event| match event {
            Event::ActorSpawned { actor, .. } => Some(*actor),
            _ => None,
        })
        .expect("actor spawned");
    (world, actor, events)
}

#[test]
fn publishes_progress_for_moving_actors() {
    let (world, actor, mut events) = playing_world_with_actor();
    let mut paths = FixedPaths::default();
    paths.set(actor, 30.0, 40.0);
    let mut movement = Movement::default();
    let mut commands = Vec::new();

    events.push(tick());
    movement.handle(&events, &query::actor_view(&world), &paths, &mut commands);

    assert_eq!(
        commands,
        vec![Command::AdvanceActor {
            actor,
            progress: 0.25,
        }]
    );
}

#[test]
fn reports_arrival_inside_radius() {
    let (mut world, actor, mut events) = playing_world_with_actor();
    let mut paths = FixedPaths::default();
    paths.set(actor, 1.0, 40.0);
    let mut movement = Movement::default();
    let mut commands = Vec::new();

    events.push(tick());
    movement.handle(&events, &query::actor_view(&world), &paths, &mut commands);
    assert!(commands.contains(&Command::ActorReachedEnd { actor }));

    let mut world_events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut world_events);
    }
    assert!(world_events.contains(&Event::ActorReachedEnd { actor }));
    assert_eq!(query::health(&world), 99);
}

#[test]
fn idle_without_time_or_outside_play() {
    let (world, actor, events) = playing_world_with_actor();
    let mut paths = FixedPaths::default();
    paths.set(actor, 0.0, 40.0);
    let view = query::actor_view(&world);
    let mut movement = Movement::default();
    let mut commands = Vec::new();

    movement.handle(&events, &view, &paths, &mut commands);
    assert!(commands.is_empty(), "no movement without elapsed time");

    movement.handle(
        &[
            Event::PhaseChanged {
                phase: Phase::Paused(PauseKind::MidPlay),
            },
            tick(),
        ],
        &view,
        &paths,
        &mut commands,
    );
    assert!(commands.is_empty(), "paused level must not move actors");
}

#[test]
fn actors_without_path_or_not_moving_are_skipped() {
    let (mut world, actor, mut events) = playing_world_with_actor();
    let paths = FixedPaths::default();
    let mut movement = Movement::default();
    let mut commands = Vec::new();

    events.push(tick());
    movement.handle(&events, &query::actor_view(&world), &paths, &mut commands);
    assert!(commands.is_empty(), "actor without path stays put");

    let mut hit_events = Vec::new();
    world::apply(
        &mut world,
        Command::DamageActor { actor, amount: 1.0 },
        &mut hit_events,
    );
    let mut paths = FixedPaths::default();
    paths.set(actor, 0.0, 40.0);
    movement.handle(&[tick()], &query::actor_view(&world), &paths, &mut commands);
    assert!(commands.is_empty(), "recovering actor must not arrive");
}

#[test]
fn empty_view_emits_nothing() {
    let mut movement = Movement::default();
    let mut commands = Vec::new();
    movement.handle(
        &[
            Event::PhaseChanged {
                phase: Phase::Playing,
            },
            tick(),
        ],
        &ActorView::default(),
        &FixedPaths::default(),
        &mut commands,
    );
    assert!(commands.is_empty());
}
