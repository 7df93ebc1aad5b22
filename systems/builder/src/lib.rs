#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure builder system responsible for emitting placement, selection, and
//! weapon management commands.

use metro_mayhem_core::{Command, Event, Phase, PlatformId, PlatformView, RotationDirection};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuilderInput {
    /// Platform clicked by the player on this frame.
    pub select_platform: Option<PlatformId>,
    /// Armory slot chosen by the player on this frame.
    pub select_weapon: Option<usize>,
    /// Indicates whether the player confirmed the pending purchase.
    pub confirm_purchase: bool,
    /// Indicates whether the player dismissed the selection.
    pub cancel: bool,
    /// Platform whose weapon the player turned, and the direction of the turn.
    pub rotate: Option<(PlatformId, RotationDirection)>,
    /// Platform whose weapon the player asked to upgrade.
    pub upgrade: Option<PlatformId>,
    /// Platform whose weapon the player asked to dismantle.
    pub dismantle: Option<PlatformId>,
}

/// Builder system that translates player intents into world commands.
#[derive(Debug, Clone)]
pub struct Builder {
    phase: Phase,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a new builder system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Setup,
        }
    }

    /// Consumes world events and adapter-derived input to emit builder commands.
    ///
    /// Intents are dropped while the level is not accepting construction.
    /// Upgrade and dismantle intents additionally require a paused level and
    /// an occupied platform in `platforms`.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: BuilderInput,
        platforms: &PlatformView,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::PhaseChanged { phase } = event {
                self.phase = *phase;
            }
        }

        if !matches!(self.phase, Phase::Paused(_) | Phase::Playing) {
            return;
        }

        let occupied = |platform: PlatformId| {
            platforms
                .get(platform)
                .is_some_and(|snapshot| snapshot.weapon.is_some())
        };

        if let Some(slot) = input.select_weapon {
            out.push(Command::SelectWeapon { slot });
        }
        if let Some(platform) = input.select_platform {
            out.push(Command::SelectPlatform { platform });
        }

        if input.cancel {
            out.push(Command::CancelSelection);
        } else if input.confirm_purchase {
            out.push(Command::ConfirmPurchase);
        }

        if let Some((platform, direction)) = input.rotate {
            if occupied(platform) {
                out.push(Command::RotateWeapon {
                    platform,
                    direction,
                });
            }
        }

        if !self.phase.is_paused() {
            return;
        }

        if let Some(platform) = input.upgrade.filter(|platform| occupied(*platform)) {
            out.push(Command::UpgradeTower { platform });
        }
        if let Some(platform) = input.dismantle.filter(|platform| occupied(*platform)) {
            out.push(Command::DismantleTower { platform });
        }
    }
}
