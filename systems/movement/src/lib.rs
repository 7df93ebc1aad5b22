#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that reads agent progress from a pathing provider and
//! reports path completion to the world.

use metro_mayhem_core::{ActorId, ActorStatus, ActorView, Command, Event, Phase};

/// Distance below which an actor counts as having reached the end of its path.
pub const DEFAULT_ARRIVAL_RADIUS: f32 = 1.0;

/// Navigation agent lookup consumed by the movement system.
///
/// Implementations own the actual path following; the movement system only
/// reads how far each actor still has to travel.
pub trait PathingProvider {
    /// Remaining distance along the actor's path, if the actor has a path.
    fn remaining_distance(&self, actor: ActorId) -> Option<f32>;

    /// Total length of the actor's path, if the actor has a path.
    fn path_length(&self, actor: ActorId) -> Option<f32>;
}

/// Pure system that reacts to world events and emits movement commands.
#[derive(Debug)]
pub struct Movement {
    phase: Phase,
    arrival_radius: f32,
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(DEFAULT_ARRIVAL_RADIUS)
    }
}

impl Movement {
    /// Creates a movement system with the provided arrival radius.
    #[must_use]
    pub const fn new(arrival_radius: f32) -> Self {
        Self {
            phase: Phase::Setup,
            arrival_radius,
        }
    }

    /// Consumes world events and immutable views to emit movement commands.
    pub fn handle<P>(
        &mut self,
        events: &[Event],
        actors: &ActorView,
        pathing: &P,
        out: &mut Vec<Command>,
    ) where
        P: PathingProvider + ?Sized,
    {
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

        for actor in actors
            .iter()
            .filter(|snapshot| snapshot.status == ActorStatus::Moving)
        {
            let Some(remaining) = pathing.remaining_distance(actor.id) else {
                continue;
            };

            if let Some(length) = pathing.path_length(actor.id) {
                if length > 0.0 {
                    out.push(Command::AdvanceActor {
                        actor: actor.id,
                        progress: (1.0 - remaining / length).clamp(0.0, 1.0),
                    });
                }
            }

            if remaining <= self.arrival_radius {
                out.push(Command::ActorReachedEnd { actor: actor.id });
            }
        }
    }
}
