use metro_mayhem_core::{
    Command, Event, PauseKind, Phase, PlatformId, PlatformView, RotationDirection, WeaponKind,
};
use metro_mayhem_system_builder::{Builder, BuilderInput};
use metro_mayhem_world::{self as world, query, World};

fn paused() -> Event {
    Event::PhaseChanged {
        phase: Phase::Paused(PauseKind::PrePlay),
    }
}

fn playing() -> Event {
    Event::PhaseChanged {
        phase: Phase::Playing,
    }
}

fn board_with_weapon_on(platform: PlatformId) -> PlatformView {
    let mut world = World::default();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartLevel, &mut events);
    world::apply(
        &mut world,
        Command::PlaceTower {
            platform,
            kind: WeaponKind::GatlingGun,
        },
        &mut events,
    );
    query::platform_view(&world)
}

#[test]
fn purchase_intents_emit_selection_commands() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[paused()],
        BuilderInput {
            select_weapon: Some(1),
            select_platform: Some(PlatformId::new(4)),
            confirm_purchase: true,
            ..BuilderInput::default()
        },
        &PlatformView::default(),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::SelectWeapon { slot: 1 },
            Command::SelectPlatform {
                platform: PlatformId::new(4)
            },
            Command::ConfirmPurchase,
        ],
        "builder should forward purchase intents in selection order",
    );
}

#[test]
fn cancel_overrides_confirmation() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[playing()],
        BuilderInput {
            confirm_purchase: true,
            cancel: true,
            ..BuilderInput::default()
        },
        &PlatformView::default(),
        &mut commands,
    );

    assert_eq!(commands, vec![Command::CancelSelection]);
}

#[test]
fn intents_ignored_before_level_setup_completes() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        BuilderInput {
            select_platform: Some(PlatformId::new(0)),
            confirm_purchase: true,
            ..BuilderInput::default()
        },
        &PlatformView::default(),
        &mut commands,
    );

    assert!(commands.is_empty(), "setup phase must not emit commands");
}

#[test]
fn upgrade_and_dismantle_require_pause() {
    let platform = PlatformId::new(2);
    let board = board_with_weapon_on(platform);
    let mut builder = Builder::default();
    let input = BuilderInput {
        upgrade: Some(platform),
        dismantle: Some(platform),
        ..BuilderInput::default()
    };

    let mut commands = Vec::new();
    builder.handle(&[playing()], input, &board, &mut commands);
    assert!(
        commands.is_empty(),
        "upgrade and dismantle must be dropped while playing"
    );

    builder.handle(
        &[Event::PhaseChanged {
            phase: Phase::Paused(PauseKind::MidPlay),
        }],
        input,
        &board,
        &mut commands,
    );
    assert_eq!(
        commands,
        vec![
            Command::UpgradeTower { platform },
            Command::DismantleTower { platform },
        ]
    );
}

#[test]
fn management_intents_skip_empty_platforms() {
    let board = board_with_weapon_on(PlatformId::new(2));
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[paused()],
        BuilderInput {
            rotate: Some((PlatformId::new(5), RotationDirection::Left)),
            upgrade: Some(PlatformId::new(5)),
            dismantle: Some(PlatformId::new(99)),
            ..BuilderInput::default()
        },
        &board,
        &mut commands,
    );

    assert!(commands.is_empty(), "empty platforms have nothing to manage");
}

#[test]
fn rotation_is_forwarded_while_playing() {
    let platform = PlatformId::new(2);
    let board = board_with_weapon_on(platform);
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[playing()],
        BuilderInput {
            rotate: Some((platform, RotationDirection::Right)),
            ..BuilderInput::default()
        },
        &board,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::RotateWeapon {
            platform,
            direction: RotationDirection::Right,
        }]
    );
}

#[test]
fn builder_commands_drive_world_purchase() {
    let mut world = World::default();
    let mut builder = Builder::default();
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartLevel, &mut events);

    let mut commands = Vec::new();
    builder.handle(
        &events,
        BuilderInput {
            select_weapon: Some(0),
            select_platform: Some(PlatformId::new(1)),
            confirm_purchase: true,
            ..BuilderInput::default()
        },
        &query::platform_view(&world),
        &mut commands,
    );

    events.clear();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert!(
        !events
            .iter()
            .any(|event| matches!(event, Event::CommandRejected { .. })),
        "purchase flow rejected: {events:?}"
    );
    assert_eq!(query::funds(&world), 150);
}
