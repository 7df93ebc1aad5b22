//! Reusable instance pools for transient simulation objects.

use std::collections::VecDeque;

use metro_mayhem_core::{GameError, PoolGrowth, PoolStats};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Dense index of an instance owned by an [`ObjectPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolSlot(u32);

impl PoolSlot {
    /// Creates a slot handle from its numeric index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Numeric index of the slot.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Pool that owns every instance of `T` it ever created and lends them out.
///
/// Every slot is either active (checked out by exactly one caller) or free.
/// Which free instance `acquire` hands out is unspecified.
#[derive(Debug)]
pub struct ObjectPool<T> {
    instances: Vec<T>,
    active: Vec<bool>,
    free: VecDeque<PoolSlot>,
    growth: PoolGrowth,
}

impl<T> ObjectPool<T> {
    /// Creates an empty pool with the provided growth policy.
    #[must_use]
    pub fn new(growth: PoolGrowth) -> Self {
        Self {
            instances: Vec::new(),
            active: Vec::new(),
            free: VecDeque::new(),
            growth,
        }
    }

    /// Creates a pool holding `count` free instances built by `create`.
    pub fn prewarmed<F>(count: u32, growth: PoolGrowth, mut create: F) -> Self
    where
        F: FnMut(PoolSlot) -> T,
    {
        let mut pool = Self::new(growth);
        for _ in 0..count {
            let Some(slot) = pool.push(&mut create) else {
                break;
            };
            pool.free.push_back(slot);
        }
        pool
    }

    /// Checks out a free instance, creating one with `create` if the pool may grow.
    pub fn acquire<F>(&mut self, mut create: F) -> Result<PoolSlot, GameError>
    where
        F: FnMut(PoolSlot) -> T,
    {
        let slot = match self.free.pop_front() {
            Some(slot) => slot,
            None => match self.growth {
                PoolGrowth::Grow => self.push(&mut create).ok_or(GameError::PoolExhausted)?,
                PoolGrowth::Fixed => return Err(GameError::PoolExhausted),
            },
        };

        self.active[slot_index(slot)] = true;
        Ok(slot)
    }

    /// Returns an active instance to the free set.
    pub fn release(&mut self, slot: PoolSlot) -> Result<(), GameError> {
        match self.active.get_mut(slot_index(slot)) {
            Some(active) if *active => {
                *active = false;
                self.free.push_back(slot);
                Ok(())
            }
            _ => Err(GameError::InvalidRelease),
        }
    }

    /// Force-returns every active instance, yielding the released slots in index order.
    pub fn release_all(&mut self) -> Vec<PoolSlot> {
        let flushed: Vec<PoolSlot> = self.active_slots().collect();
        for slot in &flushed {
            self.active[slot_index(*slot)] = false;
            self.free.push_back(*slot);
        }
        flushed
    }

    /// Shared access to an active instance.
    #[must_use]
    pub fn get(&self, slot: PoolSlot) -> Option<&T> {
        let index = slot_index(slot);
        if self.active.get(index).copied().unwrap_or(false) {
            self.instances.get(index)
        } else {
            None
        }
    }

    /// Exclusive access to an active instance.
    pub fn get_mut(&mut self, slot: PoolSlot) -> Option<&mut T> {
        let index = slot_index(slot);
        if self.active.get(index).copied().unwrap_or(false) {
            self.instances.get_mut(index)
        } else {
            None
        }
    }

    /// Reports whether the slot is currently checked out.
    #[must_use]
    pub fn is_active(&self, slot: PoolSlot) -> bool {
        self.active.get(slot_index(slot)).copied().unwrap_or(false)
    }

    /// Iterator over the slots currently checked out, in index order.
    pub fn active_slots(&self) -> impl Iterator<Item = PoolSlot> + '_ {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .filter_map(|(index, _)| slot_at(index))
    }

    /// Iterator over the active instances paired with their slots.
    pub fn iter_active(&self) -> impl Iterator<Item = (PoolSlot, &T)> + '_ {
        self.instances
            .iter()
            .zip(self.active.iter())
            .enumerate()
            .filter(|(_, (_, active))| **active)
            .filter_map(|(index, (instance, _))| slot_at(index).map(|slot| (slot, instance)))
    }

    /// Iterator over the active instances with exclusive access.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (PoolSlot, &mut T)> + '_ {
        self.instances
            .iter_mut()
            .zip(self.active.iter())
            .enumerate()
            .filter(|(_, (_, active))| **active)
            .filter_map(|(index, (instance, _))| slot_at(index).map(|slot| (slot, instance)))
    }

    /// Number of instances currently checked out.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|active| **active).count()
    }

    /// Number of instances resting in the pool.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of instances the pool owns.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.instances.len()
    }

    /// Active and free counts.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            active: self.active_count(),
            free: self.free_count(),
        }
    }

    // None once slot indices no longer fit a `u32`.
    fn push<F>(&mut self, create: &mut F) -> Option<PoolSlot>
    where
        F: FnMut(PoolSlot) -> T,
    {
        let slot = slot_at(self.instances.len())?;
        self.instances.push(create(slot));
        self.active.push(false);
        Some(slot)
    }
}

fn slot_at(index: usize) -> Option<PoolSlot> {
    u32::try_from(index).ok().map(PoolSlot::new)
}

fn slot_index(slot: PoolSlot) -> usize {
    slot.index() as usize
}

/// Shuffled queue of variants that reshuffles itself whenever it runs dry.
///
/// Newly created pool instances draw their variant from the deck so that
/// consecutive spawns cycle through every variant before any repeats.
#[derive(Debug)]
pub struct VariantDeck<K> {
    variants: Vec<K>,
    queue: VecDeque<K>,
}

impl<K: Copy> VariantDeck<K> {
    /// Creates a deck over the provided variants.
    #[must_use]
    pub fn new(variants: &[K]) -> Self {
        Self {
            variants: variants.to_vec(),
            queue: VecDeque::with_capacity(variants.len()),
        }
    }

    /// Draws the next variant, reshuffling first if the queue is empty.
    pub fn draw(&mut self, rng: &mut ChaCha8Rng) -> Option<K> {
        if self.queue.is_empty() {
            let mut shuffled = self.variants.clone();
            shuffled.shuffle(rng);
            self.queue.extend(shuffled);
        }
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;

    use super::*;

    #[test]
    fn prewarmed_pool_starts_free() {
        let pool = ObjectPool::prewarmed(3, PoolGrowth::Fixed, |slot| slot.index());
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.free_count(), 3);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn fixed_pool_reports_exhaustion() {
        let mut pool = ObjectPool::prewarmed(1, PoolGrowth::Fixed, |_| ());
        let _slot = pool.acquire(|_| ()).expect("first acquire succeeds");
        assert_eq!(pool.acquire(|_| ()), Err(GameError::PoolExhausted));
    }

    #[test]
    fn growing_pool_creates_on_demand() {
        let mut pool: ObjectPool<u32> = ObjectPool::new(PoolGrowth::Grow);
        let first = pool.acquire(|slot| slot.index() * 10).expect("grows");
        let second = pool.acquire(|slot| slot.index() * 10).expect("grows");
        assert_ne!(first, second);
        assert_eq!(pool.get(second), Some(&10));
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn double_release_is_rejected() {
        let mut pool = ObjectPool::prewarmed(2, PoolGrowth::Fixed, |_| ());
        let slot = pool.acquire(|_| ()).expect("acquire");
        assert!(pool.is_active(slot));
        assert_eq!(pool.release(slot), Ok(()));
        assert!(!pool.is_active(slot));
        assert_eq!(pool.release(slot), Err(GameError::InvalidRelease));
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn releasing_unknown_slot_is_rejected() {
        let mut pool: ObjectPool<()> = ObjectPool::new(PoolGrowth::Grow);
        assert!(!pool.is_active(PoolSlot::new(9)));
        assert_eq!(
            pool.release(PoolSlot::new(9)),
            Err(GameError::InvalidRelease)
        );
    }

    #[test]
    fn free_instances_are_not_reachable() {
        let mut pool = ObjectPool::prewarmed(1, PoolGrowth::Fixed, |_| 5_u8);
        let slot = pool.acquire(|_| 0).expect("acquire");
        assert!(pool.get_mut(slot).is_some());
        pool.release(slot).expect("release");
        assert!(pool.get(slot).is_none());
        assert!(pool.get_mut(slot).is_none());
    }

    #[test]
    fn never_hands_out_an_active_instance() {
        let mut pool: ObjectPool<()> = ObjectPool::prewarmed(4, PoolGrowth::Grow, |_| ());
        let mut checked_out = BTreeSet::new();
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        for step in 0..500_u32 {
            let release = !checked_out.is_empty() && rand::Rng::gen_bool(&mut rng, 0.45);
            if release {
                let victim = *checked_out
                    .iter()
                    .nth(step as usize % checked_out.len())
                    .expect("non-empty");
                assert!(checked_out.remove(&victim));
                pool.release(victim).expect("active slot releases");
            } else {
                let slot = pool.acquire(|_| ()).expect("growing pool acquires");
                assert!(
                    checked_out.insert(slot),
                    "slot {slot:?} handed out twice at step {step}",
                );
            }

            assert_eq!(pool.active_count(), checked_out.len());
            assert_eq!(pool.active_count() + pool.free_count(), pool.capacity());
        }
    }

    #[test]
    fn release_all_flushes_every_active_slot() {
        let mut pool = ObjectPool::prewarmed(3, PoolGrowth::Fixed, |_| ());
        let first = pool.acquire(|_| ()).expect("acquire");
        let second = pool.acquire(|_| ()).expect("acquire");

        let flushed = pool.release_all();

        assert_eq!(flushed.len(), 2);
        assert!(flushed.contains(&first) && flushed.contains(&second));
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.free_count(), 3);
        assert_eq!(pool.release(first), Err(GameError::InvalidRelease));
    }

    #[test]
    fn deck_cycles_every_variant_before_repeating() {
        let mut deck = VariantDeck::new(&['a', 'b', 'c']);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..4 {
            let mut round: Vec<char> = (0..3).filter_map(|_| deck.draw(&mut rng)).collect();
            round.sort_unstable();
            assert_eq!(round, vec!['a', 'b', 'c']);
        }
    }

    #[test]
    fn empty_deck_draws_nothing() {
        let mut deck: VariantDeck<u8> = VariantDeck::new(&[]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(deck.draw(&mut rng), None);
    }
}
