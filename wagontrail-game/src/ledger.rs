//! Money and supplies with clamped, never-negative mutators.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyKind {
    Oxen,
    Food,
    Clothing,
    Ammunition,
    Wheels,
    Axles,
    Tongues,
}

impl SupplyKind {
    pub const ALL: [Self; 7] = [
        Self::Oxen,
        Self::Food,
        Self::Clothing,
        Self::Ammunition,
        Self::Wheels,
        Self::Axles,
        Self::Tongues,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Oxen => "oxen",
            Self::Food => "food",
            Self::Clothing => "clothing",
            Self::Ammunition => "ammunition",
            Self::Wheels => "wheels",
            Self::Axles => "axles",
            Self::Tongues => "tongues",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oxen => "Oxen",
            Self::Food => "Food",
            Self::Clothing => "Clothing",
            Self::Ammunition => "Ammunition",
            Self::Wheels => "Wagon Wheels",
            Self::Axles => "Wagon Axles",
            Self::Tongues => "Wagon Tongues",
        }
    }

    /// Unit noun used in narratives.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Oxen => "oxen",
            Self::Food => "lbs",
            Self::Clothing => "sets",
            Self::Ammunition => "boxes",
            Self::Wheels | Self::Axles | Self::Tongues => "spares",
        }
    }

    #[must_use]
    pub const fn is_spare_part(self) -> bool {
        matches!(self, Self::Wheels | Self::Axles | Self::Tongues)
    }
}

/// Wagon inventory. Food is counted in pounds, ammunition in boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplies {
    pub oxen: u32,
    pub food: u32,
    pub clothing: u32,
    pub ammunition: u32,
    pub wheels: u32,
    pub axles: u32,
    pub tongues: u32,
}

impl Supplies {
    #[must_use]
    pub const fn get(&self, kind: SupplyKind) -> u32 {
        match kind {
            SupplyKind::Oxen => self.oxen,
            SupplyKind::Food => self.food,
            SupplyKind::Clothing => self.clothing,
            SupplyKind::Ammunition => self.ammunition,
            SupplyKind::Wheels => self.wheels,
            SupplyKind::Axles => self.axles,
            SupplyKind::Tongues => self.tongues,
        }
    }

    const fn slot_mut(&mut self, kind: SupplyKind) -> &mut u32 {
        match kind {
            SupplyKind::Oxen => &mut self.oxen,
            SupplyKind::Food => &mut self.food,
            SupplyKind::Clothing => &mut self.clothing,
            SupplyKind::Ammunition => &mut self.ammunition,
            SupplyKind::Wheels => &mut self.wheels,
            SupplyKind::Axles => &mut self.axles,
            SupplyKind::Tongues => &mut self.tongues,
        }
    }

    pub fn add(&mut self, kind: SupplyKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Remove up to `amount`, clamping at zero. Returns how much was actually taken.
    pub fn remove(&mut self, kind: SupplyKind, amount: u32) -> u32 {
        let slot = self.slot_mut(kind);
        let taken = amount.min(*slot);
        *slot -= taken;
        taken
    }

    /// Remove exactly `amount` or nothing at all.
    pub fn try_remove(&mut self, kind: SupplyKind, amount: u32) -> bool {
        if self.get(kind) < amount {
            return false;
        }
        self.remove(kind, amount);
        true
    }

    pub fn set(&mut self, kind: SupplyKind, amount: u32) {
        *self.slot_mut(kind) = amount;
    }
}

/// Money (in cents) plus supplies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    money_cents: u64,
    pub supplies: Supplies,
}

impl Ledger {
    #[must_use]
    pub const fn new(money_cents: u64) -> Self {
        Self {
            money_cents,
            supplies: Supplies {
                oxen: 0,
                food: 0,
                clothing: 0,
                ammunition: 0,
                wheels: 0,
                axles: 0,
                tongues: 0,
            },
        }
    }

    #[must_use]
    pub const fn money_cents(&self) -> u64 {
        self.money_cents
    }

    #[must_use]
    pub const fn can_afford(&self, cents: u64) -> bool {
        self.money_cents >= cents
    }

    /// Deduct `cents` if affordable; leaves the ledger untouched otherwise.
    pub const fn spend_cents(&mut self, cents: u64) -> bool {
        if self.money_cents < cents {
            return false;
        }
        self.money_cents -= cents;
        true
    }

    pub const fn earn_cents(&mut self, cents: u64) {
        self.money_cents = self.money_cents.saturating_add(cents);
    }

    /// Pay `cents` and receive `amount` of `kind` in one step.
    pub fn purchase(&mut self, kind: SupplyKind, amount: u32, cents: u64) -> bool {
        if !self.spend_cents(cents) {
            return false;
        }
        self.supplies.add(kind, amount);
        true
    }

    /// Give up exactly `amount` of `kind` for `cents`, or do nothing.
    pub fn sell(&mut self, kind: SupplyKind, amount: u32, cents: u64) -> bool {
        if amount == 0 || !self.supplies.try_remove(kind, amount) {
            return false;
        }
        self.earn_cents(cents);
        true
    }
}

/// Format cents as `$12.34`.
#[must_use]
pub fn format_money(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
