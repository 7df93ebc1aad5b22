#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns held fire buttons into per-tick firing commands.

use std::collections::BTreeSet;

use metro_mayhem_core::{Command, Event, Phase, PlatformId, PlatformView};

/// Fire buttons currently held by the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FireInput {
    held: BTreeSet<PlatformId>,
}

impl FireInput {
    /// Creates an input with no fire button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that the fire button of the platform was pressed.
    pub fn press(&mut self, platform: PlatformId) {
        let _ = self.held.insert(platform);
    }

    /// Records that the fire button of the platform was released.
    pub fn release(&mut self, platform: PlatformId) {
        let _ = self.held.remove(&platform);
    }

    /// Releases every held fire button.
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Reports whether the fire button of the platform is held.
    #[must_use]
    pub fn is_held(&self, platform: PlatformId) -> bool {
        self.held.contains(&platform)
    }

    /// Iterator over the held platforms in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PlatformId> + '_ {
        self.held.iter().copied()
    }
}

/// Tower combat system that queues firing commands for held weapons.
#[derive(Debug)]
pub struct TowerCombat {
    phase: Phase,
}

impl Default for TowerCombat {
    fn default() -> Self {
        Self::new()
    }
}

impl TowerCombat {
    /// Creates a new tower combat system.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Setup,
        }
    }

    /// Emits `Command::FireWeapon` entries for every occupied platform whose button is held.
    ///
    /// Reload timers are enforced by the world; a held launcher simply fires
    /// again once it has reloaded.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: &FireInput,
        platforms: &PlatformView,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::PhaseChanged { phase } = event {
                self.phase = *phase;
            }
        }

        if self.phase != Phase::Playing {
            return;
        }

        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for platform in input.iter() {
            let occupied = platforms
                .get(platform)
                .is_some_and(|snapshot| snapshot.weapon.is_some());
            if occupied {
                out.push(Command::FireWeapon { platform });
            }
        }
    }
}
