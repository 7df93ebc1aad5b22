//! Authoritative platform occupancy and weapon bookkeeping.

use std::{collections::BTreeMap, time::Duration};

use metro_mayhem_core::{
    GameError, PlatformId, PlatformSnapshot, PlatformView, RotationDirection, WeaponId,
    WeaponKind, WeaponSnapshot, ROTATION_STEP_DEGREES,
};

const MAX_ROTATION_DEGREES: f32 = 360.0;

/// Weapon exclusively owned by a single platform.
#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    id: WeaponId,
    kind: WeaponKind,
    rotation: f32,
    cooldown: Duration,
}

impl Weapon {
    /// Identifier allocated to the weapon.
    #[must_use]
    pub const fn id(&self) -> WeaponId {
        self.id
    }

    /// Kind of weapon.
    #[must_use]
    pub const fn kind(&self) -> WeaponKind {
        self.kind
    }

    /// Heading in degrees.
    #[must_use]
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }
}

/// Weapon description captured by a board archive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchivedWeapon {
    /// Kind of weapon hosted at archive time.
    pub kind: WeaponKind,
    /// Heading at archive time.
    pub rotation: f32,
}

/// Per-platform occupancy captured by a board archive, indexed by platform.
pub type BoardLayout = Vec<Option<ArchivedWeapon>>;

/// Result of a platform selection request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Another platform was already selected; nothing changed.
    Ignored,
    /// The platform became the placement target.
    Selected,
    /// The platform became the placement target and a weapon is pending purchase.
    PurchasePending(WeaponKind),
}

/// Registry of platforms, their weapons, and the current selection.
#[derive(Debug)]
pub struct PlacementGrid {
    platforms: BTreeMap<PlatformId, Option<Weapon>>,
    next_weapon_id: WeaponId,
    selected: Option<PlatformId>,
    pending: Option<WeaponKind>,
}

impl PlacementGrid {
    /// Creates a grid of empty platforms numbered from zero.
    #[must_use]
    pub fn new(platform_count: u32) -> Self {
        Self {
            platforms: (0..platform_count)
                .map(|index| (PlatformId::new(index), None))
                .collect(),
            next_weapon_id: WeaponId::new(0),
            selected: None,
            pending: None,
        }
    }

    /// Number of platforms on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    /// Reports whether the board has no platforms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Weapon hosted by the platform, if any.
    pub fn weapon(&self, platform: PlatformId) -> Result<Option<&Weapon>, GameError> {
        self.platforms
            .get(&platform)
            .map(Option::as_ref)
            .ok_or(GameError::InvalidPlatform)
    }

    /// Selects the platform unless another selection is already active.
    pub fn select(&mut self, platform: PlatformId) -> Result<SelectOutcome, GameError> {
        if !self.platforms.contains_key(&platform) {
            return Err(GameError::InvalidPlatform);
        }
        if self.selected.is_some() {
            return Ok(SelectOutcome::Ignored);
        }

        self.selected = Some(platform);
        Ok(match self.pending {
            Some(kind) => SelectOutcome::PurchasePending(kind),
            None => SelectOutcome::Selected,
        })
    }

    /// Marks a weapon as pending purchase, returning the selected platform if any.
    pub fn select_weapon(&mut self, kind: WeaponKind) -> Option<PlatformId> {
        self.pending = Some(kind);
        self.selected
    }

    /// Currently selected platform and pending weapon.
    #[must_use]
    pub const fn selection(&self) -> (Option<PlatformId>, Option<WeaponKind>) {
        (self.selected, self.pending)
    }

    /// Clears the selected platform and the pending weapon.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.pending = None;
    }

    /// Verifies that the platform exists and hosts no weapon.
    pub fn ensure_vacant(&self, platform: PlatformId) -> Result<(), GameError> {
        match self.weapon(platform)? {
            Some(_) => Err(GameError::PlatformOccupied),
            None => Ok(()),
        }
    }

    /// Constructs a weapon on a vacant platform.
    pub fn occupy(
        &mut self,
        platform: PlatformId,
        kind: WeaponKind,
        rotation: f32,
    ) -> Result<WeaponId, GameError> {
        let slot = self
            .platforms
            .get_mut(&platform)
            .ok_or(GameError::InvalidPlatform)?;
        if slot.is_some() {
            return Err(GameError::PlatformOccupied);
        }

        let id = self.next_weapon_id;
        self.next_weapon_id = WeaponId::new(id.get().wrapping_add(1));
        *slot = Some(Weapon {
            id,
            kind,
            rotation: rotation.clamp(0.0, MAX_ROTATION_DEGREES),
            cooldown: Duration::ZERO,
        });
        Ok(id)
    }

    /// Destroys the weapon hosted by the platform.
    pub fn vacate(&mut self, platform: PlatformId) -> Result<Weapon, GameError> {
        self.platforms
            .get_mut(&platform)
            .ok_or(GameError::InvalidPlatform)?
            .take()
            .ok_or(GameError::PlatformNotOccupied)
    }

    /// Turns the hosted weapon by one step, returning the new heading.
    pub fn rotate(
        &mut self,
        platform: PlatformId,
        direction: RotationDirection,
    ) -> Result<f32, GameError> {
        let weapon = self.weapon_mut(platform)?;
        let delta = match direction {
            RotationDirection::Left => -ROTATION_STEP_DEGREES,
            RotationDirection::Right => ROTATION_STEP_DEGREES,
        };
        weapon.rotation = (weapon.rotation + delta).clamp(0.0, MAX_ROTATION_DEGREES);
        Ok(weapon.rotation)
    }

    /// Kind of the hosted weapon if it finished reloading, without firing it.
    pub fn loaded(&self, platform: PlatformId) -> Result<Option<WeaponKind>, GameError> {
        let weapon = self
            .weapon(platform)?
            .ok_or(GameError::PlatformNotOccupied)?;
        Ok(weapon.cooldown.is_zero().then_some(weapon.kind))
    }

    /// Fires the hosted weapon if it finished reloading.
    ///
    /// Returns the weapon kind when a shot left the barrel, `None` while reloading.
    pub fn fire(&mut self, platform: PlatformId) -> Result<Option<WeaponKind>, GameError> {
        let weapon = self.weapon_mut(platform)?;
        if !weapon.cooldown.is_zero() {
            return Ok(None);
        }
        weapon.cooldown = weapon.kind.fire_interval();
        Ok(Some(weapon.kind))
    }

    /// Advances every reload timer.
    pub fn cool_down(&mut self, dt: Duration) {
        for weapon in self.platforms.values_mut().flatten() {
            weapon.cooldown = weapon.cooldown.saturating_sub(dt);
        }
    }

    /// Captures kind and heading of every hosted weapon.
    #[must_use]
    pub fn layout(&self) -> BoardLayout {
        self.platforms
            .values()
            .map(|slot| {
                slot.as_ref().map(|weapon| ArchivedWeapon {
                    kind: weapon.kind,
                    rotation: weapon.rotation,
                })
            })
            .collect()
    }

    /// Replaces every weapon with the archived layout, returning how many were recreated.
    ///
    /// Recreated weapons receive fresh identifiers.
    pub fn restore(&mut self, layout: &[Option<ArchivedWeapon>]) -> u32 {
        self.clear_selection();
        let mut recreated = 0;
        let ids: Vec<PlatformId> = self.platforms.keys().copied().collect();
        for (index, platform) in ids.into_iter().enumerate() {
            let _ = self.vacate(platform);
            if let Some(Some(archived)) = layout.get(index) {
                if self
                    .occupy(platform, archived.kind, archived.rotation)
                    .is_ok()
                {
                    recreated += 1;
                }
            }
        }
        recreated
    }

    /// Number of platforms hosting a weapon.
    #[must_use]
    pub fn occupied_count(&self) -> u32 {
        let occupied = self.platforms.values().filter(|slot| slot.is_some()).count();
        u32::try_from(occupied).unwrap_or(u32::MAX)
    }

    /// Read-only snapshot of every platform.
    #[must_use]
    pub fn view(&self) -> PlatformView {
        PlatformView::from_snapshots(
            self.platforms
                .iter()
                .map(|(id, slot)| PlatformSnapshot {
                    id: *id,
                    weapon: slot.as_ref().map(|weapon| WeaponSnapshot {
                        id: weapon.id,
                        kind: weapon.kind,
                        rotation: weapon.rotation,
                    }),
                    selected: self.selected == Some(*id),
                })
                .collect(),
        )
    }

    fn weapon_mut(&mut self, platform: PlatformId) -> Result<&mut Weapon, GameError> {
        self.platforms
            .get_mut(&platform)
            .ok_or(GameError::InvalidPlatform)?
            .as_mut()
            .ok_or(GameError::PlatformNotOccupied)
    }
}
