//! Weighted table of trail events and the interpreter for their effects.

use rand::Rng;
use serde::Serialize;

use crate::constants::{EVENT_NEGATIVE_CUTOFF, EVENT_POSITIVE_CUTOFF};
use crate::disease::Illness;
use crate::journey::session::Session;
use crate::ledger::SupplyKind;
use crate::numbers::{floor_f64_to_u64, u32_to_f32};
use crate::weather::Weather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Positive,
    Negative,
    Disease,
}

impl EventCategory {
    /// Map a uniform `[0, 1)` roll onto the cumulative category thresholds.
    #[must_use]
    pub fn from_roll(roll: f32) -> Self {
        if roll < EVENT_POSITIVE_CUTOFF {
            Self::Positive
        } else if roll < EVENT_NEGATIVE_CUTOFF {
            Self::Negative
        } else {
            Self::Disease
        }
    }
}

/// What an event does, as data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EventEffect {
    Gain { food: u32, ammunition: u32 },
    ClearWeather,
    Morale { heal: f32 },
    Breakdown { part: SupplyKind, damage: f32 },
    Storm,
    ColdSnap { clothing_needed: u32, damage: f32 },
    Theft { food_share: f32, food_cap: u32, ammo_cap: u32 },
    LoseOx,
    Fire { food_share: f32, food_cap: u32, clothing_cap: u32 },
    Sickness,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RandomEvent {
    pub id: &'static str,
    pub category: EventCategory,
    pub message: &'static str,
    pub effect: EventEffect,
}

pub const POSITIVE_EVENTS: [RandomEvent; 5] = [
    RandomEvent {
        id: "wild_fruit",
        category: EventCategory::Positive,
        message: "Found wild fruit and berries!",
        effect: EventEffect::Gain {
            food: 20,
            ammunition: 0,
        },
    },
    RandomEvent {
        id: "fair_skies",
        category: EventCategory::Positive,
        message: "Beautiful weather, making good time!",
        effect: EventEffect::ClearWeather,
    },
    RandomEvent {
        id: "shared_food",
        category: EventCategory::Positive,
        message: "Helpful travelers shared some food.",
        effect: EventEffect::Gain {
            food: 15,
            ammunition: 0,
        },
    },
    RandomEvent {
        id: "abandoned_supplies",
        category: EventCategory::Positive,
        message: "Found abandoned supplies on the trail.",
        effect: EventEffect::Gain {
            food: 10,
            ammunition: 1,
        },
    },
    RandomEvent {
        id: "high_morale",
        category: EventCategory::Positive,
        message: "Party morale is high!",
        effect: EventEffect::Morale { heal: 5.0 },
    },
];

pub const NEGATIVE_EVENTS: [RandomEvent; 8] = [
    RandomEvent {
        id: "broken_wheel",
        category: EventCategory::Negative,
        message: "Wagon wheel broke!",
        effect: EventEffect::Breakdown {
            part: SupplyKind::Wheels,
            damage: 10.0,
        },
    },
    RandomEvent {
        id: "broken_axle",
        category: EventCategory::Negative,
        message: "Wagon axle broke!",
        effect: EventEffect::Breakdown {
            part: SupplyKind::Axles,
            damage: 15.0,
        },
    },
    RandomEvent {
        id: "broken_tongue",
        category: EventCategory::Negative,
        message: "Wagon tongue broke!",
        effect: EventEffect::Breakdown {
            part: SupplyKind::Tongues,
            damage: 12.0,
        },
    },
    RandomEvent {
        id: "storm",
        category: EventCategory::Negative,
        message: "Heavy rain and storms!",
        effect: EventEffect::Storm,
    },
    RandomEvent {
        id: "cold_snap",
        category: EventCategory::Negative,
        message: "Very cold weather!",
        effect: EventEffect::ColdSnap {
            clothing_needed: 3,
            damage: 8.0,
        },
    },
    RandomEvent {
        id: "thieves",
        category: EventCategory::Negative,
        message: "Thieves stole supplies during the night!",
        effect: EventEffect::Theft {
            food_share: 0.2,
            food_cap: 50,
            ammo_cap: 3,
        },
    },
    RandomEvent {
        id: "ox_died",
        category: EventCategory::Negative,
        message: "Ox died!",
        effect: EventEffect::LoseOx,
    },
    RandomEvent {
        id: "wagon_fire",
        category: EventCategory::Negative,
        message: "Fire in the wagon!",
        effect: EventEffect::Fire {
            food_share: 0.15,
            food_cap: 40,
            clothing_cap: 2,
        },
    },
];

pub const SICKNESS_EVENT: RandomEvent = RandomEvent {
    id: "sickness",
    category: EventCategory::Disease,
    message: "Illness strikes the party.",
    effect: EventEffect::Sickness,
};

/// Pick a category by cumulative threshold, then an entry uniformly within it.
pub fn pick_event<R>(rng: &mut R) -> &'static RandomEvent
where
    R: Rng + ?Sized,
{
    match EventCategory::from_roll(rng.r#gen::<f32>()) {
        EventCategory::Positive => &POSITIVE_EVENTS[rng.gen_range(0..POSITIVE_EVENTS.len())],
        EventCategory::Negative => &NEGATIVE_EVENTS[rng.gen_range(0..NEGATIVE_EVENTS.len())],
        EventCategory::Disease => &SICKNESS_EVENT,
    }
}

fn share_of(amount: u32, share: f32, cap: u32) -> u32 {
    let portion = floor_f64_to_u64(f64::from(u32_to_f32(amount) * share));
    u32::try_from(portion).unwrap_or(u32::MAX).min(cap)
}

/// A disease that struck a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseStrike {
    pub member: usize,
    pub name: String,
    pub illness: Illness,
    pub died: bool,
}

/// Infect a random healthy traveler. Returns `None` when nobody is healthy.
pub fn strike_disease<R>(session: &mut Session, rng: &mut R) -> Option<DiseaseStrike>
where
    R: Rng + ?Sized,
{
    let healthy = session.party.healthy_indices();
    if healthy.is_empty() {
        return None;
    }
    let member = healthy[rng.gen_range(0..healthy.len())];
    let illness = Illness::random(rng);
    let target = session.party.member_mut(member)?;
    let died = target.contract(illness);
    Some(DiseaseStrike {
        member,
        name: target.name().to_string(),
        illness,
        died,
    })
}

/// Apply an effect to the session. Returns the follow-up narrative, if any.
pub fn apply_effect<R>(effect: EventEffect, session: &mut Session, rng: &mut R) -> Option<String>
where
    R: Rng + ?Sized,
{
    let supplies = &mut session.ledger.supplies;
    match effect {
        EventEffect::Gain { food, ammunition } => {
            supplies.add(SupplyKind::Food, food);
            supplies.add(SupplyKind::Ammunition, ammunition);
            None
        }
        EventEffect::ClearWeather => {
            session.trail.weather = Weather::Fair;
            None
        }
        EventEffect::Morale { heal } => {
            session.party.heal_all_alive(heal);
            None
        }
        EventEffect::Breakdown { part, damage } => {
            let noun = part_noun(part);
            if supplies.try_remove(part, 1) {
                Some(format!("Used a spare {noun} to repair."))
            } else {
                session.party.damage_all_alive(damage);
                Some(format!("No spare {noun}! Delayed repairs damaged health."))
            }
        }
        EventEffect::Storm => {
            session.trail.weather = Weather::Stormy;
            Some("Progress slowed by bad weather.".to_string())
        }
        EventEffect::ColdSnap {
            clothing_needed,
            damage,
        } => {
            session.trail.weather = Weather::VeryCold;
            if supplies.clothing < clothing_needed {
                session.party.damage_all_alive(damage);
                Some("Inadequate clothing in cold weather.".to_string())
            } else {
                Some("Bitter cold slows travel.".to_string())
            }
        }
        EventEffect::Theft {
            food_share,
            food_cap,
            ammo_cap,
        } => {
            let stolen = share_of(supplies.food, food_share, food_cap);
            let food = supplies.remove(SupplyKind::Food, stolen);
            let ammo = supplies.remove(SupplyKind::Ammunition, ammo_cap);
            Some(format!(
                "Lost {food} lbs of food and {ammo} boxes of ammunition."
            ))
        }
        EventEffect::LoseOx => supplies
            .try_remove(SupplyKind::Oxen, 1)
            .then(|| "Lost an ox. Travel will be slower.".to_string()),
        EventEffect::Fire {
            food_share,
            food_cap,
            clothing_cap,
        } => {
            let burned = share_of(supplies.food, food_share, food_cap);
            let food = supplies.remove(SupplyKind::Food, burned);
            let clothing = supplies.remove(SupplyKind::Clothing, clothing_cap);
            Some(format!(
                "Lost {food} lbs of food and {clothing} sets of clothing."
            ))
        }
        EventEffect::Sickness => strike_disease(session, rng)
            .map(|strike| format!("{} {}.", strike.name, strike.illness.onset_phrase())),
    }
}

const fn part_noun(part: SupplyKind) -> &'static str {
    match part {
        SupplyKind::Wheels => "wheel",
        SupplyKind::Axles => "axle",
        SupplyKind::Tongues => "tongue",
        _ => "part",
    }
}

/// What a fired event did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventResolution {
    pub id: &'static str,
    pub category: EventCategory,
    pub message: &'static str,
    pub detail: Option<String>,
    /// Travelers the event killed.
    pub casualties: Vec<String>,
}

/// Pick an event and apply it.
pub fn resolve_random_event<R>(session: &mut Session, rng: &mut R) -> EventResolution
where
    R: Rng + ?Sized,
{
    let event = pick_event(rng);
    fire_event(event, session, rng)
}

/// Apply one event, noting who was alive before and dead after.
pub fn fire_event<R>(event: &RandomEvent, session: &mut Session, rng: &mut R) -> EventResolution
where
    R: Rng + ?Sized,
{
    let alive = session.party.alive_indices();
    let detail = apply_effect(event.effect, session, rng);
    let casualties = alive
        .into_iter()
        .filter_map(|idx| session.party.members().get(idx))
        .filter(|member| !member.is_alive())
        .map(|member| member.name().to_string())
        .collect();
    EventResolution {
        id: event.id,
        category: event.category,
        message: event.message,
        detail,
        casualties,
    }
}
