//! War funds bookkeeping.

use metro_mayhem_core::{EconomyTuning, GameError, WeaponKind};

/// Tracks funds, weapon prices, and the funds captured at the last archive.
#[derive(Clone, Debug)]
pub struct EconomyLedger {
    funds: u32,
    prices: [u32; WeaponKind::COUNT],
    refund_percent: u32,
    archived: Option<u32>,
}

impl EconomyLedger {
    /// Creates a ledger seeded with the configured starting funds and prices.
    #[must_use]
    pub fn new(tuning: &EconomyTuning) -> Self {
        Self {
            funds: tuning.starting_funds,
            prices: tuning.prices,
            refund_percent: tuning.dismantle_refund_percent,
            archived: None,
        }
    }

    /// Funds currently available.
    #[must_use]
    pub const fn funds(&self) -> u32 {
        self.funds
    }

    /// Price of the provided weapon kind.
    #[must_use]
    pub const fn price(&self, kind: WeaponKind) -> u32 {
        self.prices[kind.index()]
    }

    /// Reports whether the weapon can be bought.
    ///
    /// The comparison is strict: a weapon priced at exactly the available
    /// funds is not affordable.
    #[must_use]
    pub const fn can_afford(&self, kind: WeaponKind) -> bool {
        self.price(kind) < self.funds
    }

    /// Deducts the price of the weapon, returning the remaining funds.
    pub fn spend(&mut self, kind: WeaponKind) -> Result<u32, GameError> {
        if !self.can_afford(kind) {
            return Err(GameError::InsufficientFunds);
        }
        self.funds -= self.price(kind);
        Ok(self.funds)
    }

    /// Adds funds, returning the new balance.
    pub fn credit(&mut self, amount: u32) -> u32 {
        self.funds = self.funds.saturating_add(amount);
        self.funds
    }

    /// Credits the dismantle refund for the weapon, returning the amount refunded.
    pub fn refund(&mut self, kind: WeaponKind) -> u32 {
        let amount = u64::from(self.price(kind)) * u64::from(self.refund_percent) / 100;
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        let _ = self.credit(amount);
        amount
    }

    /// Captures the current funds for a later [`EconomyLedger::restore`].
    pub fn archive(&mut self) {
        self.archived = Some(self.funds);
    }

    /// Rolls funds back to the last archive, returning the restored balance.
    ///
    /// Without a prior archive the funds are left untouched.
    pub fn restore(&mut self) -> u32 {
        if let Some(archived) = self.archived {
            self.funds = archived;
        }
        self.funds
    }

    /// Funds captured by the last archive, if any.
    #[must_use]
    pub const fn archived(&self) -> Option<u32> {
        self.archived
    }
}
