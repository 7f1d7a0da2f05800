//! Professions, departure month, and turning a finished setup into a session.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::TrailDate;
use crate::constants::{NAME_MAX_CHARS, PARTY_SIZE};
use crate::journey::{JourneyConfig, Session};
use crate::ledger::Ledger;
use crate::party::Party;
use crate::store::{Cart, StoreError};

pub const DEPARTURE_YEAR: u16 = 1848;
pub const DEPARTURE_MONTHS: std::ops::RangeInclusive<u8> = 3..=7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    #[default]
    Banker,
    Carpenter,
    Farmer,
}

impl Profession {
    pub const ALL: [Self; 3] = [Self::Banker, Self::Carpenter, Self::Farmer];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Banker => "banker",
            Self::Carpenter => "carpenter",
            Self::Farmer => "farmer",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Banker => "Banker from Boston",
            Self::Carpenter => "Carpenter from Ohio",
            Self::Farmer => "Farmer from Illinois",
        }
    }

    #[must_use]
    pub const fn starting_cents(self) -> u64 {
        match self {
            Self::Banker => 160_000,
            Self::Carpenter => 80_000,
            Self::Farmer => 40_000,
        }
    }

    /// Final score multiplier; poorer starts earn more.
    #[must_use]
    pub const fn score_multiplier(self) -> f64 {
        match self {
            Self::Banker => 1.0,
            Self::Carpenter => 2.0,
            Self::Farmer => 3.0,
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.key().eq_ignore_ascii_case(key.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("party needs exactly {expected} members besides the leader (got {got})")]
    PartySize { expected: usize, got: usize },
    #[error("name {0:?} must be 1-15 letters or spaces")]
    InvalidName(String),
    #[error("departure month {0} must be between March and July")]
    DepartureMonth(u8),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything chosen before the wagon leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySetup {
    pub leader: String,
    pub members: Vec<String>,
    pub profession: Profession,
    pub departure_month: u8,
    #[serde(default)]
    pub cart: Cart,
}

impl JourneySetup {
    #[must_use]
    pub fn new(leader: &str, members: &[&str], profession: Profession) -> Self {
        Self {
            leader: leader.to_string(),
            members: members.iter().map(|m| (*m).to_string()).collect(),
            profession,
            departure_month: 3,
            cart: Cart::new(),
        }
    }

    #[must_use]
    pub const fn with_departure_month(mut self, month: u8) -> Self {
        self.departure_month = month;
        self
    }

    #[must_use]
    pub fn with_cart(mut self, cart: Cart) -> Self {
        self.cart = cart;
        self
    }

    /// Check names and the departure month.
    ///
    /// # Errors
    ///
    /// Returns the first `SetupError` found.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.members.len() != PARTY_SIZE {
            return Err(SetupError::PartySize {
                expected: PARTY_SIZE,
                got: self.members.len(),
            });
        }
        for name in std::iter::once(&self.leader).chain(&self.members) {
            if !is_valid_name(name) {
                return Err(SetupError::InvalidName(name.clone()));
            }
        }
        if !DEPARTURE_MONTHS.contains(&self.departure_month) {
            return Err(SetupError::DepartureMonth(self.departure_month));
        }
        Ok(())
    }

    /// Validate, pay for the cart, and start the journey.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` when validation or checkout fails.
    pub fn embark(&self, cfg: &JourneyConfig) -> Result<Session, SetupError> {
        self.validate()?;
        let mut ledger = Ledger::new(self.profession.starting_cents());
        self.cart.checkout(&mut ledger)?;
        let party = Party::from_names(&self.leader, &self.members);
        log::info!(
            "embarking: {} with {} members, {} left in the purse",
            self.profession.key(),
            party.members().len(),
            crate::ledger::format_money(ledger.money_cents())
        );
        Ok(Session::new(
            party,
            ledger,
            self.profession,
            TrailDate::new(self.departure_month, 1, DEPARTURE_YEAR),
            cfg.total_miles,
        ))
    }
}

fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed.chars().count() <= NAME_MAX_CHARS
        && trimmed.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}
