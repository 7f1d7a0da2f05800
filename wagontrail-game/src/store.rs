//! Outfitting store and shopping cart used before departure.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::{Ledger, SupplyKind};

/// A single item available in the outfitting store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreItem {
    pub kind: SupplyKind,
    /// Price in cents to avoid floating-point issues
    pub price_cents: u64,
    pub max_qty: u32,
    pub desc: &'static str,
}

pub const OUTFITTING_ITEMS: [StoreItem; 7] = [
    StoreItem {
        kind: SupplyKind::Oxen,
        price_cents: 4000,
        max_qty: 20,
        desc: "Pull your wagon. Fewer than two halves your speed.",
    },
    StoreItem {
        kind: SupplyKind::Food,
        price_cents: 20,
        max_qty: 9999,
        desc: "Pounds of food. Each traveler eats 2-4 lbs a day.",
    },
    StoreItem {
        kind: SupplyKind::Clothing,
        price_cents: 1000,
        max_qty: 99,
        desc: "Sets of clothing against the cold.",
    },
    StoreItem {
        kind: SupplyKind::Ammunition,
        price_cents: 200,
        max_qty: 99,
        desc: "Boxes of 20 bullets for hunting.",
    },
    StoreItem {
        kind: SupplyKind::Wheels,
        price_cents: 1000,
        max_qty: 9,
        desc: "Spare wagon wheels.",
    },
    StoreItem {
        kind: SupplyKind::Axles,
        price_cents: 1000,
        max_qty: 9,
        desc: "Spare wagon axles.",
    },
    StoreItem {
        kind: SupplyKind::Tongues,
        price_cents: 1000,
        max_qty: 9,
        desc: "Spare wagon tongues.",
    },
];

#[must_use]
pub fn find_item(kind: SupplyKind) -> Option<&'static StoreItem> {
    OUTFITTING_ITEMS.iter().find(|item| item.kind == kind)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{item} quantity {qty} exceeds the limit of {max}")]
    QuantityOutOfRange {
        item: &'static str,
        qty: u32,
        max: u32,
    },
    #[error("cart total {total_cents} cents exceeds budget of {budget_cents} cents")]
    OverBudget { total_cents: u64, budget_cents: u64 },
}

/// A line item in the shopping cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub kind: SupplyKind,
    pub qty: u32,
}

/// Shopping cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn quantity(&self, kind: SupplyKind) -> u32 {
        self.lines
            .iter()
            .find(|line| line.kind == kind)
            .map_or(0, |line| line.qty)
    }

    /// Set the quantity for an item, rejecting values above the store limit
    /// or totals the budget cannot cover. The cart is unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the quantity or resulting total is invalid.
    pub fn set_quantity(
        &mut self,
        kind: SupplyKind,
        qty: u32,
        budget_cents: u64,
    ) -> Result<(), StoreError> {
        let max = find_item(kind).map_or(0, |item| item.max_qty);
        if qty > max {
            return Err(StoreError::QuantityOutOfRange {
                item: kind.label(),
                qty,
                max,
            });
        }
        let mut next = self.clone();
        next.lines.retain(|line| line.kind != kind);
        if qty > 0 {
            next.lines.push(CartLine { kind, qty });
        }
        let total_cents = next.total_cents();
        if total_cents > budget_cents {
            return Err(StoreError::OverBudget {
                total_cents,
                budget_cents,
            });
        }
        *self = next;
        Ok(())
    }

    #[must_use]
    pub fn total_cents(&self) -> u64 {
        self.lines
            .iter()
            .filter_map(|line| {
                find_item(line.kind).map(|item| item.price_cents.saturating_mul(u64::from(line.qty)))
            })
            .fold(0, u64::saturating_add)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pay for the cart and load the wagon.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OverBudget` if the ledger cannot cover the total;
    /// the ledger is untouched in that case.
    pub fn checkout(&self, ledger: &mut Ledger) -> Result<u64, StoreError> {
        let total_cents = self.total_cents();
        if !ledger.spend_cents(total_cents) {
            return Err(StoreError::OverBudget {
                total_cents,
                budget_cents: ledger.money_cents(),
            });
        }
        for line in &self.lines {
            ledger.supplies.add(line.kind, line.qty);
        }
        Ok(total_cents)
    }
}
