//! The daily travel tick.

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::calendar::TrailDate;
use crate::constants::LOG_TARGET_DAY;
use crate::journey::daily::{apply_daily_health, consume_daily_food, travel_miles_for_day};
use crate::journey::event::LogKind;
use crate::journey::session::Session;
use crate::journey::{JourneyConfig, RngBundle};
use crate::random_events::{EventCategory, EventResolution, resolve_random_event, strike_disease};
use crate::trail::{LandmarkKind, landmark};
use crate::weather::roll_weather_shift;

/// Where the day left the journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayTransition {
    Continue,
    /// A non-destination landmark was reached; holds its table index.
    Landmark(usize),
    Arrived,
    PartyLost,
}

impl DayTransition {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Arrived | Self::PartyLost)
    }
}

/// Result returned by a travel day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOutcome {
    pub date: TrailDate,
    pub day: u32,
    pub miles: u32,
    pub food_consumed: u32,
    pub narratives: Vec<String>,
    pub transition: DayTransition,
}

/// Run one simulated travel day against the session.
pub fn advance_day(session: &mut Session, rngs: &RngBundle, cfg: &JourneyConfig) -> DayOutcome {
    let log_start = session.log.len();

    session.trail.date.advance();
    session.trail.days_elapsed = session.trail.days_elapsed.saturating_add(1);

    let miles = travel_miles_for_day(&session.trail, &session.ledger.supplies);
    session.trail.advance_miles(miles);

    let food = consume_daily_food(session);
    apply_daily_health(session, &mut *rngs.health());

    roll_daily_triggers(session, rngs, cfg);
    session.refresh_health_label();

    let reached = check_landmarks(session);

    let transition = if session.party.is_wiped_out() {
        info!(target: LOG_TARGET_DAY, "party lost on day {}", session.trail.days_elapsed);
        DayTransition::PartyLost
    } else if session.trail.has_arrived()
        || matches!(reached, Some((_, LandmarkKind::Destination)))
    {
        info!(target: LOG_TARGET_DAY, "arrived after {} days", session.trail.days_elapsed);
        DayTransition::Arrived
    } else {
        reached.map_or(DayTransition::Continue, |(index, _)| {
            DayTransition::Landmark(index)
        })
    };

    debug!(
        target: LOG_TARGET_DAY,
        "day {} ({}): +{} mi -> {} mi, food {} (-{}), alive {}, weather {}",
        session.trail.days_elapsed,
        session.trail.date,
        miles,
        session.trail.miles_traveled(),
        session.ledger.supplies.food,
        food.consumed,
        session.party.alive_count(),
        session.trail.weather.key()
    );

    DayOutcome {
        date: session.trail.date,
        day: session.trail.days_elapsed,
        miles,
        food_consumed: food.consumed,
        narratives: session.log.entries()[log_start..]
            .iter()
            .map(|entry| entry.text.clone())
            .collect(),
        transition,
    }
}

/// Generic event, disease, and weather rolls. Each is an independent draw.
fn roll_daily_triggers(session: &mut Session, rngs: &RngBundle, cfg: &JourneyConfig) {
    let (event_roll, disease_roll, weather_roll) = {
        let mut travel = rngs.travel();
        (
            travel.r#gen::<f32>(),
            travel.r#gen::<f32>(),
            travel.r#gen::<f32>(),
        )
    };

    if event_roll < cfg.event_chance {
        let resolution = resolve_random_event(session, &mut *rngs.events());
        note_event(session, resolution);
    }

    if disease_roll < cfg.disease_chance
        && let Some(strike) = strike_disease(session, &mut *rngs.events())
    {
        session.note(
            LogKind::Disease,
            format!("{} {}.", strike.name, strike.illness.onset_phrase()),
        );
        if strike.died {
            session.note(LogKind::Death, format!("{} has died.", strike.name));
        }
    }

    if weather_roll < cfg.weather_chance {
        let before = session.trail.weather;
        let after = roll_weather_shift(before, &mut *rngs.travel());
        session.trail.weather = after;
        if after != before {
            session.note(
                LogKind::Weather,
                format!("The weather turns {}.", after.label().to_lowercase()),
            );
        }
    }
}

/// Journal a fired event. Sickness reads like a direct disease strike.
fn note_event(session: &mut Session, resolution: EventResolution) {
    let kind = if resolution.category == EventCategory::Disease {
        LogKind::Disease
    } else {
        session.note(LogKind::Event, resolution.message);
        LogKind::Event
    };
    if let Some(detail) = resolution.detail {
        session.note(kind, detail);
    }
    for name in resolution.casualties {
        session.note(LogKind::Death, format!("{name} has died."));
    }
}

/// Mark the first reachable unvisited landmark and report it.
fn check_landmarks(session: &mut Session) -> Option<(usize, LandmarkKind)> {
    let index = session.trail.reachable_landmark()?;
    let lm = landmark(index)?;
    session.trail.mark_visited(index);
    session.note(LogKind::Landmark, format!("You have reached {}.", lm.name));
    info!(target: LOG_TARGET_DAY, "landmark reached: {} at {} mi", lm.name, session.trail.miles_traveled());
    Some((index, lm.kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::Session;
    use crate::ledger::Ledger;
    use crate::party::Party;
    use crate::random_events::{SICKNESS_EVENT, fire_event};
    use crate::setup::Profession;
    use crate::trail::{LANDMARKS, Pace};
    use crate::weather::Weather;

    fn quiet_cfg() -> JourneyConfig {
        JourneyConfig {
            event_chance: 0.0,
            disease_chance: 0.0,
            weather_chance: 0.0,
            ..JourneyConfig::default()
        }
    }

    fn session() -> Session {
        let party = Party::from_names("Ezra", &["Ada", "Bo", "Cy", "Di"]);
        let mut ledger = Ledger::new(0);
        ledger.supplies.oxen = 4;
        ledger.supplies.food = 1000;
        ledger.supplies.clothing = 8;
        Session::new(party, ledger, Profession::Banker, TrailDate::default(), 2040)
    }

    #[test]
    fn fatal_sickness_event_writes_a_death_entry() {
        let mut s = session();
        for member in s.party.members_mut() {
            member.apply_health_delta(-99.0);
        }
        let rngs = RngBundle::from_user_seed(8);
        let resolution = fire_event(&SICKNESS_EVENT, &mut s, &mut *rngs.events());
        note_event(&mut s, resolution);
        assert_eq!(s.log.count_of(LogKind::Disease), 1);
        assert_eq!(s.log.count_of(LogKind::Death), 1);
        assert_eq!(s.log.count_of(LogKind::Event), 0);
        let last = s.log.entries().last().expect("death entry");
        assert!(last.text.ends_with("has died."));
    }

    #[test]
    fn steady_fair_day_moves_twelve_miles() {
        let mut s = session();
        s.trail.advance_miles(90);
        s.trail.mark_visited(0);
        s.trail.advance_miles(10);
        let rngs = RngBundle::from_user_seed(1);
        let outcome = advance_day(&mut s, &rngs, &quiet_cfg());
        assert_eq!(s.trail.miles_traveled(), 112);
        assert_eq!(outcome.miles, 12);
        assert_eq!(outcome.transition, DayTransition::Continue);
        assert_eq!(s.trail.date, TrailDate::new(3, 2, 1848));
        assert_eq!(s.trail.days_elapsed, 1);
    }

    #[test]
    fn crossing_a_landmark_distance_reports_it_once() {
        let mut s = session();
        s.trail.advance_miles(95);
        let rngs = RngBundle::from_user_seed(2);
        let outcome = advance_day(&mut s, &rngs, &quiet_cfg());
        assert_eq!(outcome.transition, DayTransition::Landmark(0));
        let next = advance_day(&mut s, &rngs, &quiet_cfg());
        assert_eq!(next.transition, DayTransition::Continue);
        assert_eq!(s.trail.visited_landmarks(), &[0]);
    }

    #[test]
    fn reaching_the_end_arrives() {
        let mut s = session();
        for idx in 0..LANDMARKS.len() - 1 {
            s.trail.mark_visited(idx);
        }
        s.trail.advance_miles(2035);
        s.trail.pace = Pace::Grueling;
        let rngs = RngBundle::from_user_seed(3);
        let outcome = advance_day(&mut s, &rngs, &quiet_cfg());
        assert_eq!(outcome.transition, DayTransition::Arrived);
        assert!(outcome.transition.is_terminal());
    }

    #[test]
    fn wipeout_supersedes_landmark() {
        let mut s = session();
        s.trail.advance_miles(95);
        s.ledger.supplies.food = 0;
        for member in s.party.members_mut() {
            member.apply_health_delta(-96.0);
        }
        let rngs = RngBundle::from_user_seed(4);
        let outcome = advance_day(&mut s, &rngs, &quiet_cfg());
        assert_eq!(outcome.transition, DayTransition::PartyLost);
        assert!(s.trail.is_visited(0));
        assert!(s.party.is_wiped_out());
    }

    #[test]
    fn starving_day_costs_exactly_five() {
        let mut s = session();
        s.ledger.supplies.food = 0;
        s.trail.rations = crate::trail::Rations::Meager;
        for member in s.party.members_mut() {
            member.apply_health_delta(-50.0);
        }
        let rngs = RngBundle::from_user_seed(5);
        advance_day(&mut s, &rngs, &quiet_cfg());
        for member in s.party.members() {
            // 50 - 5 starvation - 0.5 meager rations
            assert!((member.health() - 44.5).abs() < 1e-4);
        }
        assert_eq!(s.ledger.supplies.food, 0);
    }

    #[test]
    fn forced_triggers_fire_every_day() {
        let cfg = JourneyConfig {
            event_chance: 1.0,
            disease_chance: 1.0,
            weather_chance: 1.0,
            ..JourneyConfig::default()
        };
        let mut s = session();
        let rngs = RngBundle::from_user_seed(6);
        let mut last = 0;
        for _ in 0..30 {
            let outcome = advance_day(&mut s, &rngs, &cfg);
            assert!(s.trail.miles_traveled() >= last);
            last = s.trail.miles_traveled();
            if outcome.transition.is_terminal() {
                break;
            }
        }
        assert!(s.log.count_of(LogKind::Disease) > 0);
        assert!(Weather::ALL.contains(&s.trail.weather));
    }
}
