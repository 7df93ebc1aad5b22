//! Pooled enemy lifecycle.

use std::time::Duration;

use metro_mayhem_core::{ActorSnapshot, ActorStatus, EnemyKind, EnemyProfile, SpawnPoint};

use crate::pool::PoolSlot;

/// Enemy instance owned by the actor pool.
#[derive(Clone, Debug)]
pub struct Actor {
    kind: EnemyKind,
    health: f32,
    progress: f32,
    spawn: SpawnPoint,
    state: ActorState,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ActorState {
    Idle,
    Moving,
    Hit { remaining: Duration },
    Attacking { remaining: Duration },
    Dying { remaining: Duration },
    Removed,
}

/// Result of a damage request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    /// The damage had no effect.
    Ignored,
    /// Health dropped but stayed positive; the actor is recovering.
    Hit {
        /// Health left after the hit.
        health: f32,
    },
    /// Health reached zero; the actor started dissolving.
    Killed,
}

/// Timer expiry reported by [`Actor::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorTransition {
    /// The hit recovery window closed.
    Recovered,
    /// The attack sequence finished.
    AttackFinished,
    /// The dissolve finished; the actor must return to its pool.
    Dissolved,
}

impl Actor {
    /// Creates an idle actor of the provided kind.
    #[must_use]
    pub fn new(kind: EnemyKind) -> Self {
        Self {
            kind,
            health: 0.0,
            progress: 0.0,
            spawn: SpawnPoint::default(),
            state: ActorState::Idle,
        }
    }

    /// Resets the actor for a fresh trip along its path.
    pub fn activate(&mut self, profile: &EnemyProfile, spawn: SpawnPoint) {
        self.health = profile.health.max(0.0);
        self.progress = 0.0;
        self.spawn = spawn;
        self.state = ActorState::Moving;
    }

    /// Applies damage unless the actor is recovering, dying, or not in play.
    pub fn damage(
        &mut self,
        amount: f32,
        hit_recovery: Duration,
        dissolve: Duration,
    ) -> DamageOutcome {
        if amount.is_nan() || amount < 0.0 {
            return DamageOutcome::Ignored;
        }
        if !matches!(
            self.state,
            ActorState::Moving | ActorState::Attacking { .. }
        ) {
            return DamageOutcome::Ignored;
        }

        self.health = (self.health - amount).max(0.0);
        if self.health > 0.0 {
            self.state = ActorState::Hit {
                remaining: hit_recovery,
            };
            DamageOutcome::Hit {
                health: self.health,
            }
        } else {
            self.state = ActorState::Dying {
                remaining: dissolve,
            };
            DamageOutcome::Killed
        }
    }

    /// Starts an attack sequence; only moving actors may attack.
    pub fn begin_attack(&mut self, duration: Duration) -> bool {
        if self.state != ActorState::Moving {
            return false;
        }
        self.state = ActorState::Attacking {
            remaining: duration,
        };
        true
    }

    /// Records progress along the path while the actor is moving.
    pub fn set_progress(&mut self, progress: f32) {
        if self.state == ActorState::Moving && progress.is_finite() {
            self.progress = progress.clamp(0.0, 1.0);
        }
    }

    /// Counts down the active timer, reporting an expiry if one occurred.
    pub fn advance(&mut self, dt: Duration) -> Option<ActorTransition> {
        match &mut self.state {
            ActorState::Hit { remaining } => {
                *remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    self.state = ActorState::Moving;
                    return Some(ActorTransition::Recovered);
                }
            }
            ActorState::Attacking { remaining } => {
                *remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    self.state = ActorState::Moving;
                    return Some(ActorTransition::AttackFinished);
                }
            }
            ActorState::Dying { remaining } => {
                *remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    self.state = ActorState::Removed;
                    return Some(ActorTransition::Dissolved);
                }
            }
            ActorState::Idle | ActorState::Moving | ActorState::Removed => {}
        }
        None
    }

    /// Marks the actor as back in the pool.
    pub fn retire(&mut self) {
        self.state = ActorState::Removed;
    }

    /// Variant of the actor.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    /// Fraction of the path covered.
    #[must_use]
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Reports whether the actor is dying and no longer counts as alive.
    #[must_use]
    pub const fn is_dying(&self) -> bool {
        matches!(self.state, ActorState::Dying { .. })
    }

    /// Lifecycle state exposed to queries.
    #[must_use]
    pub const fn status(&self) -> ActorStatus {
        match self.state {
            ActorState::Idle => ActorStatus::Idle,
            ActorState::Moving => ActorStatus::Moving,
            ActorState::Hit { .. } => ActorStatus::Hit,
            ActorState::Attacking { .. } => ActorStatus::Attacking,
            ActorState::Dying { .. } => ActorStatus::Dying,
            ActorState::Removed => ActorStatus::Removed,
        }
    }

    pub(crate) fn snapshot(&self, slot: PoolSlot) -> ActorSnapshot {
        ActorSnapshot {
            id: crate::actor_id(slot),
            kind: self.kind,
            health: self.health,
            status: self.status(),
            progress: self.progress,
            spawn: self.spawn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECOVERY: Duration = Duration::from_millis(1_500);
    const DISSOLVE: Duration = Duration::from_secs(3);

    fn moving_actor(health: f32) -> Actor {
        let mut actor = Actor::new(EnemyKind::Small);
        actor.activate(
            &EnemyProfile {
                health,
                dissolve_secs: 3.0,
            },
            SpawnPoint::default(),
        );
        actor
    }

    #[test]
    fn fresh_actor_is_idle_and_ignores_damage() {
        let mut actor = Actor::new(EnemyKind::Large);
        assert_eq!(actor.status(), ActorStatus::Idle);
        assert_eq!(
            actor.damage(10.0, RECOVERY, DISSOLVE),
            DamageOutcome::Ignored
        );
    }

    #[test]
    fn hit_window_suppresses_follow_up_damage() {
        let mut actor = moving_actor(40.0);

        assert_eq!(
            actor.damage(35.0, RECOVERY, DISSOLVE),
            DamageOutcome::Hit { health: 5.0 }
        );
        assert_eq!(actor.status(), ActorStatus::Hit);

        assert_eq!(
            actor.damage(10.0, RECOVERY, DISSOLVE),
            DamageOutcome::Ignored
        );
        assert!((actor.health() - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn recovery_returns_to_moving() {
        let mut actor = moving_actor(40.0);
        let _ = actor.damage(10.0, RECOVERY, DISSOLVE);

        assert_eq!(actor.advance(Duration::from_millis(1_000)), None);
        assert_eq!(
            actor.advance(Duration::from_millis(500)),
            Some(ActorTransition::Recovered)
        );
        assert_eq!(actor.status(), ActorStatus::Moving);
        assert_eq!(
            actor.damage(10.0, RECOVERY, DISSOLVE),
            DamageOutcome::Hit { health: 20.0 }
        );
    }

    #[test]
    fn lethal_damage_enters_dying_exactly_once() {
        let mut actor = moving_actor(30.0);
        assert!(!actor.is_dying());

        assert_eq!(
            actor.damage(45.0, RECOVERY, DISSOLVE),
            DamageOutcome::Killed
        );
        assert!(actor.is_dying());
        assert_eq!(actor.health(), 0.0);
        for _ in 0..3 {
            assert_eq!(
                actor.damage(100.0, RECOVERY, DISSOLVE),
                DamageOutcome::Ignored
            );
        }
        assert_eq!(actor.status(), ActorStatus::Dying);
    }

    #[test]
    fn dissolve_expiry_is_reported_once() {
        let mut actor = moving_actor(10.0);
        let _ = actor.damage(10.0, RECOVERY, DISSOLVE);

        assert_eq!(
            actor.advance(DISSOLVE),
            Some(ActorTransition::Dissolved)
        );
        assert_eq!(actor.status(), ActorStatus::Removed);
        assert_eq!(actor.advance(DISSOLVE), None);
    }

    #[test]
    fn negative_damage_is_ignored() {
        let mut actor = moving_actor(10.0);
        assert_eq!(
            actor.damage(-5.0, RECOVERY, DISSOLVE),
            DamageOutcome::Ignored
        );
        assert_eq!(
            actor.damage(f32::NAN, RECOVERY, DISSOLVE),
            DamageOutcome::Ignored
        );
        assert_eq!(actor.status(), ActorStatus::Moving);
    }

    #[test]
    fn attacking_actor_can_be_hit() {
        let mut actor = moving_actor(50.0);
        assert!(actor.begin_attack(Duration::from_millis(500)));
        assert!(!actor.begin_attack(Duration::from_millis(500)));
        assert_eq!(
            actor.damage(20.0, RECOVERY, DISSOLVE),
            DamageOutcome::Hit { health: 30.0 }
        );
    }

    #[test]
    fn attack_finishes_back_to_moving() {
        let mut actor = moving_actor(50.0);
        assert!(actor.begin_attack(Duration::from_millis(500)));
        assert_eq!(
            actor.advance(Duration::from_millis(500)),
            Some(ActorTransition::AttackFinished)
        );
        assert_eq!(actor.status(), ActorStatus::Moving);
    }

    #[test]
    fn progress_is_clamped_and_frozen_while_hit() {
        let mut actor = moving_actor(50.0);
        actor.set_progress(1.4);
        assert_eq!(actor.progress(), 1.0);

        actor.set_progress(0.25);
        let _ = actor.damage(1.0, RECOVERY, DISSOLVE);
        actor.set_progress(0.9);
        assert_eq!(actor.progress(), 0.25);
    }
}
