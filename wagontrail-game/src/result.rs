//! End-of-journey outcome, score breakdown, and rating.

use serde::Serialize;

use crate::constants::{SCORE_ARRIVAL_BONUS, SCORE_MONEY_FACTOR, SCORE_PER_SURVIVOR};
use crate::journey::Session;
use crate::ledger::{Supplies, SupplyKind};
use crate::numbers::{floor_f64_to_u64, u64_to_f64};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    Reached,
    Death,
}

impl Ending {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Reached => "reached",
            Self::Death => "death",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    LegendaryTrailBlazer,
    OutstandingPioneer,
    SuccessfulSettler,
    ExperiencedTraveler,
    CompetentAdventurer,
    NoviceExplorer,
    StrugglingWanderer,
}

impl Rating {
    #[must_use]
    pub const fn for_score(score: u64) -> Self {
        match score {
            10_000.. => Self::LegendaryTrailBlazer,
            7_500.. => Self::OutstandingPioneer,
            5_000.. => Self::SuccessfulSettler,
            3_000.. => Self::ExperiencedTraveler,
            1_500.. => Self::CompetentAdventurer,
            500.. => Self::NoviceExplorer,
            _ => Self::StrugglingWanderer,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LegendaryTrailBlazer => "Legendary Trail Blazer",
            Self::OutstandingPioneer => "Outstanding Pioneer",
            Self::SuccessfulSettler => "Successful Settler",
            Self::ExperiencedTraveler => "Experienced Traveler",
            Self::CompetentAdventurer => "Competent Adventurer",
            Self::NoviceExplorer => "Novice Explorer",
            Self::StrugglingWanderer => "Struggling Wanderer",
        }
    }
}

/// Points per unit of each remaining supply.
const fn supply_points(kind: SupplyKind) -> f64 {
    match kind {
        SupplyKind::Oxen => 25.0,
        SupplyKind::Food => 0.2,
        SupplyKind::Clothing | SupplyKind::Wheels | SupplyKind::Axles | SupplyKind::Tongues => {
            10.0
        }
        SupplyKind::Ammunition => 2.0,
    }
}

#[must_use]
pub fn supplies_value(supplies: &Supplies) -> f64 {
    SupplyKind::ALL
        .iter()
        .map(|kind| f64::from(supplies.get(*kind)) * supply_points(*kind))
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub distance: u64,
    pub survivors: u64,
    pub health: u64,
    pub supplies: u64,
    pub money: u64,
    pub arrival_bonus: u64,
    pub multiplier: f64,
    pub total: u64,
    pub rating: Rating,
}

/// Summarize a finished session.
#[must_use]
pub fn score_journey(session: &Session, ending: Ending) -> ScoreBreakdown {
    let distance = u64::from(session.trail.miles_traveled());
    let survivors = u64::from(session.party.alive_count()) * SCORE_PER_SURVIVOR;
    let health = floor_f64_to_u64(f64::from(session.party.total_alive_health()));
    let supplies = floor_f64_to_u64(supplies_value(&session.ledger.supplies));
    let dollars = u64_to_f64(session.ledger.money_cents()) / 100.0;
    let money = floor_f64_to_u64(dollars * SCORE_MONEY_FACTOR);
    let arrival_bonus = if ending == Ending::Reached {
        SCORE_ARRIVAL_BONUS
    } else {
        0
    };
    let base = distance + survivors + health + supplies + money + arrival_bonus;
    let multiplier = session.profession().score_multiplier();
    let total = floor_f64_to_u64(u64_to_f64(base) * multiplier);
    ScoreBreakdown {
        distance,
        survivors,
        health,
        supplies,
        money,
        arrival_bonus,
        multiplier,
        total,
        rating: Rating::for_score(total),
    }
}
