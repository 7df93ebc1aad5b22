//! Deterministic stand-in for a human player.

use metro_mayhem_core::{Command, Event, PauseKind, Phase, PlatformView, WeaponKind};
use metro_mayhem_system_builder::BuilderInput;
use metro_mayhem_system_tower_combat::FireInput;

/// Builds towers during the pre-play pause, starts the level, and holds every fire button.
#[derive(Debug)]
pub(crate) struct ScriptedPlayer {
    phase: Phase,
}

impl ScriptedPlayer {
    pub(crate) const fn new() -> Self {
        Self {
            phase: Phase::Setup,
        }
    }

    /// Reacts to a batch of world events, returning this round's builder intents.
    pub(crate) fn handle(
        &mut self,
        events: &[Event],
        platforms: &PlatformView,
        funds: u32,
        price: impl Fn(WeaponKind) -> u32,
        fire: &mut FireInput,
        out: &mut Vec<Command>,
    ) -> BuilderInput {
        for event in events {
            if let Event::PhaseChanged { phase } = event {
                self.phase = *phase;
            }
        }

        match self.phase {
            Phase::Paused(PauseKind::PrePlay) => {
                fire.release_all();
                let intent = next_purchase(platforms, funds, &price);
                if intent == BuilderInput::default() {
                    out.push(Command::StartPlay);
                }
                intent
            }
            Phase::Playing => {
                fire.release_all();
                for platform in platforms.iter().filter(|platform| platform.weapon.is_some()) {
                    fire.press(platform.id);
                }
                BuilderInput::default()
            }
            Phase::Setup | Phase::Paused(PauseKind::MidPlay) | Phase::Won | Phase::Lost => {
                fire.release_all();
                BuilderInput::default()
            }
        }
    }
}

// Strict comparison mirrors the ledger so the world never rejects the intent.
fn next_purchase(
    platforms: &PlatformView,
    funds: u32,
    price: &impl Fn(WeaponKind) -> u32,
) -> BuilderInput {
    if let Some(vacant) = platforms.iter().find(|platform| platform.weapon.is_none()) {
        let kind = if vacant.id.get() % 2 == 0 {
            WeaponKind::GatlingGun
        } else {
            WeaponKind::MissileLauncher
        };
        if price(kind) < funds {
            return BuilderInput {
                select_weapon: Some(kind.index()),
                select_platform: Some(vacant.id),
                confirm_purchase: true,
                ..BuilderInput::default()
            };
        }
    }

    let upgradable = platforms.iter().find(|platform| {
        platform
            .weapon
            .and_then(|weapon| weapon.kind.upgrade())
            .is_some_and(|upgraded| price(upgraded) < funds)
    });
    match upgradable {
        Some(platform) => BuilderInput {
            upgrade: Some(platform.id),
            ..BuilderInput::default()
        },
        None => BuilderInput::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metro_mayhem_core::{PlatformId, PlatformSnapshot, WeaponId, WeaponSnapshot};

    fn price(kind: WeaponKind) -> u32 {
        [200, 300, 350, 450][kind.index()]
    }

    fn board(kinds: &[Option<WeaponKind>]) -> PlatformView {
        PlatformView::from_snapshots(
            kinds
                .iter()
                .enumerate()
                .map(|(index, kind)| PlatformSnapshot {
                    id: PlatformId::new(index as u32),
                    weapon: kind.map(|kind| WeaponSnapshot {
                        id: WeaponId::new(index as u32),
                        kind,
                        rotation: 0.0,
                    }),
                    selected: false,
                })
                .collect(),
        )
    }

    fn pre_play() -> Vec<Event> {
        vec![Event::PhaseChanged {
            phase: Phase::Paused(PauseKind::PrePlay),
        }]
    }

    #[test]
    fn buys_for_first_vacant_platform() {
        let mut player = ScriptedPlayer::new();
        let mut fire = FireInput::new();
        let mut commands = Vec::new();

        let intent = player.handle(
            &pre_play(),
            &board(&[Some(WeaponKind::GatlingGun), None]),
            301,
            price,
            &mut fire,
            &mut commands,
        );

        assert_eq!(intent.select_platform, Some(PlatformId::new(1)));
        assert_eq!(intent.select_weapon, Some(WeaponKind::MissileLauncher.index()));
        assert!(intent.confirm_purchase);
        assert!(commands.is_empty());
    }

    #[test]
    fn starts_play_when_nothing_is_affordable() {
        let mut player = ScriptedPlayer::new();
        let mut fire = FireInput::new();
        let mut commands = Vec::new();

        let intent = player.handle(
            &pre_play(),
            &board(&[None, None]),
            200,
            price,
            &mut fire,
            &mut commands,
        );

        assert_eq!(intent, BuilderInput::default());
        assert_eq!(commands, vec![Command::StartPlay]);
    }

    #[test]
    fn upgrades_once_board_is_full() {
        let mut player = ScriptedPlayer::new();
        let mut fire = FireInput::new();
        let mut commands = Vec::new();

        let intent = player.handle(
            &pre_play(),
            &board(&[Some(WeaponKind::DualGatlingGun), Some(WeaponKind::GatlingGun)]),
            400,
            price,
            &mut fire,
            &mut commands,
        );

        assert_eq!(intent.upgrade, Some(PlatformId::new(1)));
    }

    #[test]
    fn holds_fire_on_occupied_platforms_while_playing() {
        let mut player = ScriptedPlayer::new();
        let mut fire = FireInput::new();
        let mut commands = Vec::new();

        let _ = player.handle(
            &[Event::PhaseChanged {
                phase: Phase::Playing,
            }],
            &board(&[None, Some(WeaponKind::GatlingGun)]),
            0,
            price,
            &mut fire,
            &mut commands,
        );

        assert_eq!(fire.iter().collect::<Vec<_>>(), vec![PlatformId::new(1)]);
        assert!(commands.is_empty());
    }
}
