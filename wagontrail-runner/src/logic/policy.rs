use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wagontrail_game::store::{Cart, find_item};
use wagontrail_game::trade::BarterOffer;
use wagontrail_game::{
    CrossingChoice, HealthLabel, LANDMARKS, Pace, Profession, Session, SupplyKind,
};

/// Menu errand the autopilot runs from the travel screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errand {
    SetPace(Pace),
    Rest(u8),
    Hunt,
    Barter,
}

/// Decisions an automated player makes over one journey.
pub trait PilotPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    fn profession(&self) -> Profession;

    /// Shopping list for the outfitting store, in purchase order.
    fn shopping_list(&self) -> Vec<(SupplyKind, u32)>;

    fn departure_month(&self) -> u8 {
        4
    }

    /// Called at most once per trail day while the wagon is rolling.
    fn errand(&mut self, session: &Session) -> Option<Errand>;

    fn crossing(&mut self, session: &Session, depth: f32) -> CrossingChoice;

    /// Supply worth buying at a fort, if any.
    fn restock(&mut self, session: &Session) -> Option<SupplyKind>;

    fn accept_barter(&mut self, session: &Session, offer: &BarterOffer) -> bool;
}

/// Built-in strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Cautious,
    Balanced,
    Reckless,
    Random,
}

impl Strategy {
    pub const ALL: [Self; 4] = [Self::Cautious, Self::Balanced, Self::Reckless, Self::Random];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cautious => "cautious",
            Self::Balanced => "balanced",
            Self::Reckless => "reckless",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Cautious => "Rich banker, ferries when possible, rests when weak",
            Self::Balanced => "Carpenter, fords shallow water, hunts when food runs low",
            Self::Reckless => "Farmer at a grueling pace, fords every river",
            Self::Random => "Seeded coin flips for every decision",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.key().eq_ignore_ascii_case(key.trim()))
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PilotPolicy> {
        match self {
            Self::Cautious => Box::new(CautiousPolicy),
            Self::Balanced => Box::new(BalancedPolicy),
            Self::Reckless => Box::new(RecklessPolicy),
            Self::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fill a cart in list order; items the budget cannot fully cover are
/// trimmed to what is left.
#[must_use]
pub fn stock_cart(budget_cents: u64, list: &[(SupplyKind, u32)]) -> Cart {
    let mut cart = Cart::new();
    for &(kind, qty) in list {
        let Some(item) = find_item(kind) else {
            continue;
        };
        let remaining = budget_cents.saturating_sub(cart.total_cents());
        let affordable = u32::try_from(remaining / item.price_cents.max(1)).unwrap_or(u32::MAX);
        let qty = qty.min(affordable).min(item.max_qty);
        if cart.set_quantity(kind, qty, budget_cents).is_err() {
            log::warn!("could not stock {} x{qty}", kind.key());
        }
    }
    cart
}

fn ferry_fare(session: &Session) -> Option<u64> {
    let index = *session.trail.visited_landmarks().last()?;
    LANDMARKS.get(index).and_then(|lm| lm.ferry_cents)
}

fn can_ferry(session: &Session) -> bool {
    ferry_fare(session).is_some_and(|fare| session.ledger.can_afford(fare))
}

fn weakened(session: &Session) -> bool {
    matches!(
        session.trail.health_label,
        HealthLabel::Poor | HealthLabel::VeryPoor
    )
}

struct CautiousPolicy;
struct BalancedPolicy;
struct RecklessPolicy;

struct RandomPolicy {
    rng: SmallRng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl PilotPolicy for CautiousPolicy {
    fn name(&self) -> &'static str {
        "Cautious"
    }

    fn profession(&self) -> Profession {
        Profession::Banker
    }

    fn shopping_list(&self) -> Vec<(SupplyKind, u32)> {
        vec![
            (SupplyKind::Oxen, 8),
            (SupplyKind::Clothing, 10),
            (SupplyKind::Ammunition, 15),
            (SupplyKind::Wheels, 2),
            (SupplyKind::Axles, 2),
            (SupplyKind::Tongues, 2),
            (SupplyKind::Food, 2000),
        ]
    }

    fn errand(&mut self, session: &Session) -> Option<Errand> {
        if session.trail.pace != Pace::Steady {
            return Some(Errand::SetPace(Pace::Steady));
        }
        if weakened(session) && session.ledger.supplies.food > 100 {
            return Some(Errand::Rest(3));
        }
        (session.ledger.supplies.food < 300 && session.ledger.supplies.ammunition > 0)
            .then_some(Errand::Hunt)
    }

    fn crossing(&mut self, session: &Session, depth: f32) -> CrossingChoice {
        if can_ferry(session) {
            CrossingChoice::Ferry
        } else if depth < 2.5 {
            CrossingChoice::Ford
        } else {
            CrossingChoice::Caulk
        }
    }

    fn restock(&mut self, session: &Session) -> Option<SupplyKind> {
        let supplies = &session.ledger.supplies;
        if supplies.food < 600 {
            Some(SupplyKind::Food)
        } else if supplies.oxen < 4 {
            Some(SupplyKind::Oxen)
        } else if supplies.clothing < 5 {
            Some(SupplyKind::Clothing)
        } else {
            None
        }
    }

    fn accept_barter(&mut self, _session: &Session, _offer: &BarterOffer) -> bool {
        false
    }
}

impl PilotPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "Balanced"
    }

    fn profession(&self) -> Profession {
        Profession::Carpenter
    }

    fn shopping_list(&self) -> Vec<(SupplyKind, u32)> {
        vec![
            (SupplyKind::Oxen, 6),
            (SupplyKind::Clothing, 6),
            (SupplyKind::Ammunition, 10),
            (SupplyKind::Wheels, 1),
            (SupplyKind::Axles, 1),
            (SupplyKind::Tongues, 1),
            (SupplyKind::Food, 1200),
        ]
    }

    fn errand(&mut self, session: &Session) -> Option<Errand> {
        let supplies = &session.ledger.supplies;
        if session.trail.health_label == HealthLabel::VeryPoor && supplies.food > 50 {
            return Some(Errand::Rest(2));
        }
        if supplies.food < 200 {
            if supplies.ammunition > 0 {
                return Some(Errand::Hunt);
            }
            return Some(Errand::Barter);
        }
        None
    }

    fn crossing(&mut self, session: &Session, depth: f32) -> CrossingChoice {
        if depth < 3.0 {
            CrossingChoice::Ford
        } else if depth > 5.0 && can_ferry(session) {
            CrossingChoice::Ferry
        } else {
            CrossingChoice::Caulk
        }
    }

    fn restock(&mut self, session: &Session) -> Option<SupplyKind> {
        let supplies = &session.ledger.supplies;
        if supplies.food < 400 {
            Some(SupplyKind::Food)
        } else if supplies.ammunition < 3 {
            Some(SupplyKind::Ammunition)
        } else {
            None
        }
    }

    fn accept_barter(&mut self, _session: &Session, offer: &BarterOffer) -> bool {
        offer.receive == SupplyKind::Food
    }
}

impl PilotPolicy for RecklessPolicy {
    fn name(&self) -> &'static str {
        "Reckless"
    }

    fn profession(&self) -> Profession {
        Profession::Farmer
    }

    fn shopping_list(&self) -> Vec<(SupplyKind, u32)> {
        vec![
            (SupplyKind::Oxen, 4),
            (SupplyKind::Ammunition, 5),
            (SupplyKind::Clothing, 2),
            (SupplyKind::Food, 800),
        ]
    }

    fn departure_month(&self) -> u8 {
        3
    }

    fn errand(&mut self, session: &Session) -> Option<Errand> {
        if session.trail.pace != Pace::Grueling {
            return Some(Errand::SetPace(Pace::Grueling));
        }
        (session.ledger.supplies.food < 100 && session.ledger.supplies.ammunition > 0)
            .then_some(Errand::Hunt)
    }

    fn crossing(&mut self, _session: &Session, _depth: f32) -> CrossingChoice {
        CrossingChoice::Ford
    }

    fn restock(&mut self, session: &Session) -> Option<SupplyKind> {
        (session.ledger.supplies.food < 150).then_some(SupplyKind::Food)
    }

    fn accept_barter(&mut self, _session: &Session, _offer: &BarterOffer) -> bool {
        true
    }
}

impl PilotPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "Random"
    }

    fn profession(&self) -> Profession {
        Profession::Carpenter
    }

    fn shopping_list(&self) -> Vec<(SupplyKind, u32)> {
        vec![
            (SupplyKind::Oxen, 5),
            (SupplyKind::Ammunition, 8),
            (SupplyKind::Clothing, 5),
            (SupplyKind::Wheels, 1),
            (SupplyKind::Food, 1000),
        ]
    }

    fn errand(&mut self, _session: &Session) -> Option<Errand> {
        match self.rng.gen_range(0..40) {
            0 => Some(Errand::SetPace(Pace::ALL[self.rng.gen_range(0..Pace::ALL.len())])),
            1 => Some(Errand::Rest(self.rng.gen_range(1..=4))),
            2 => Some(Errand::Hunt),
            3 => Some(Errand::Barter),
            _ => None,
        }
    }

    fn crossing(&mut self, session: &Session, _depth: f32) -> CrossingChoice {
        let choice = CrossingChoice::ALL[self.rng.gen_range(0..CrossingChoice::ALL.len())];
        if choice == CrossingChoice::Ferry && !can_ferry(session) {
            CrossingChoice::Caulk
        } else {
            choice
        }
    }

    fn restock(&mut self, _session: &Session) -> Option<SupplyKind> {
        self.rng
            .gen_bool(0.3)
            .then(|| SupplyKind::ALL[self.rng.gen_range(0..SupplyKind::ALL.len())])
    }

    fn accept_barter(&mut self, _session: &Session, _offer: &BarterOffer) -> bool {
        self.rng.gen_bool(0.5)
    }
}
