//! Per-day movement, food, and health steps used by the travel kernel.

use rand::Rng;

use crate::constants::{
    COLD_CLOTHING_MIN, COLD_EXPOSURE_DAMAGE, GRUELING_PACE_DAMAGE, OXEN_MIN_FOR_FULL_SPEED,
    RATION_BARE_BONES_HEALTH, RATION_FILLING_HEALTH, RATION_MEAGER_HEALTH, SLOWDOWN_FACTOR,
    STARVATION_DAMAGE,
};
use crate::disease::{Illness, roll_percent, travel_recovery_chance};
use crate::journey::event::LogKind;
use crate::journey::session::Session;
use crate::ledger::{SupplyKind, Supplies};
use crate::numbers::round_f32_to_u32;
use crate::trail::{Pace, Rations, TrailState};

/// Miles covered today given pace, oxen, and weather.
#[must_use]
pub fn travel_miles_for_day(trail: &TrailState, supplies: &Supplies) -> u32 {
    let mut miles = trail.pace.base_miles();
    if supplies.oxen < OXEN_MIN_FOR_FULL_SPEED {
        miles *= SLOWDOWN_FACTOR;
    }
    if trail.weather.slows_travel() {
        miles *= SLOWDOWN_FACTOR;
    }
    round_f32_to_u32(miles)
}

/// Result of the daily meal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodReport {
    pub consumed: u32,
    pub ran_short: bool,
    pub starved: Vec<String>,
}

/// Feed every living traveler, or starve them all when the wagon cannot.
pub fn consume_daily_food(session: &mut Session) -> FoodReport {
    let needed = session
        .trail
        .rations
        .food_per_person()
        .saturating_mul(session.party.alive_count());
    if session.ledger.supplies.food >= needed {
        session.ledger.supplies.remove(SupplyKind::Food, needed);
        return FoodReport {
            consumed: needed,
            ..FoodReport::default()
        };
    }

    let consumed = session.ledger.supplies.food;
    session.ledger.supplies.set(SupplyKind::Food, 0);
    let starved = session.party.damage_all_alive(STARVATION_DAMAGE);
    if starved.is_empty() {
        session.note(LogKind::Starvation, "Out of food! Party health declining!");
    } else {
        for name in &starved {
            session.note(
                LogKind::Starvation,
                format!("Out of food! {name} starved to death!"),
            );
        }
    }
    FoodReport {
        consumed,
        ran_short: true,
        starved,
    }
}

/// Who recovered and who died during the health step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthReport {
    pub recovered: Vec<(String, Illness)>,
    pub died: Vec<String>,
}

const fn ration_health(rations: Rations) -> f32 {
    match rations {
        Rations::BareBones => RATION_BARE_BONES_HEALTH,
        Rations::Meager => RATION_MEAGER_HEALTH,
        Rations::Filling => RATION_FILLING_HEALTH,
    }
}

/// Apply illness, rations, pace, and cold to every living traveler, in that order.
pub fn apply_daily_health<R>(session: &mut Session, rng: &mut R) -> HealthReport
where
    R: Rng + ?Sized,
{
    let pace = session.trail.pace;
    let rations = session.trail.rations;
    let cold = session.trail.weather.is_cold()
        && session.ledger.supplies.clothing < COLD_CLOTHING_MIN;
    let mut report = HealthReport::default();

    for member in session.party.members_mut() {
        if !member.is_alive() {
            continue;
        }
        let mut died = false;
        if let Some(illness) = member.illness() {
            let days = member.note_illness_day();
            died |= member.apply_health_delta(-illness.daily_damage());
            if !died && roll_percent(rng, travel_recovery_chance(pace, rations, days)) {
                member.recover();
                report.recovered.push((member.name().to_string(), illness));
            }
        }
        if !member.is_ill() {
            died |= member.apply_health_delta(ration_health(rations));
        }
        if pace == Pace::Grueling {
            died |= member.apply_health_delta(-GRUELING_PACE_DAMAGE);
        }
        if cold {
            died |= member.apply_health_delta(-COLD_EXPOSURE_DAMAGE);
        }
        if died {
            report.died.push(member.name().to_string());
        }
    }

    for (name, illness) in &report.recovered {
        session.note(
            LogKind::Recovery,
            format!("{name} has recovered from {}.", illness.label().to_lowercase()),
        );
    }
    for name in &report.died {
        session.note(LogKind::Death, format!("{name} has died."));
    }
    session.refresh_health_label();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::TrailDate;
    use crate::ledger::Ledger;
    use crate::party::Party;
    use crate::setup::Profession;
    use crate::weather::Weather;
    use rand::RngCore;

    /// Always rolls the top of the range so percent checks fail.
    struct HighRng;

    impl RngCore for HighRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xFF);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Always rolls zero so percent checks with a positive chance pass.
    struct LowRng;

    impl RngCore for LowRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn session() -> Session {
        let party = Party::from_names("Ezra", &["Ada", "Bo", "Cy", "Di"]);
        let mut ledger = Ledger::new(0);
        ledger.supplies.oxen = 4;
        ledger.supplies.food = 500;
        ledger.supplies.clothing = 8;
        Session::new(party, ledger, Profession::Banker, TrailDate::default(), 2040)
    }

    #[test]
    fn miles_halve_for_oxen_and_weather() {
        let mut s = session();
        assert_eq!(travel_miles_for_day(&s.trail, &s.ledger.supplies), 12);
        s.ledger.supplies.oxen = 1;
        assert_eq!(travel_miles_for_day(&s.trail, &s.ledger.supplies), 6);
        s.trail.weather = Weather::Stormy;
        assert_eq!(travel_miles_for_day(&s.trail, &s.ledger.supplies), 3);
        s.trail.pace = Pace::Grueling;
        // 17 * 0.25 = 4.25
        assert_eq!(travel_miles_for_day(&s.trail, &s.ledger.supplies), 4);
        s.trail.pace = Pace::Slow;
        s.ledger.supplies.oxen = 3;
        assert_eq!(travel_miles_for_day(&s.trail, &s.ledger.supplies), 4);
    }

    #[test]
    fn meals_scale_with_the_living() {
        let mut s = session();
        if let Some(m) = s.party.member_mut(0) {
            m.apply_health_delta(-100.0);
        }
        let report = consume_daily_food(&mut s);
        assert_eq!(report.consumed, 12);
        assert_eq!(s.ledger.supplies.food, 488);
        assert!(!report.ran_short);
    }

    #[test]
    fn empty_wagon_costs_everyone_five_health() {
        let mut s = session();
        s.ledger.supplies.food = 5;
        let report = consume_daily_food(&mut s);
        assert!(report.ran_short);
        assert_eq!(s.ledger.supplies.food, 0);
        for member in s.party.members() {
            assert!((member.health() - 95.0).abs() < f32::EPSILON);
        }
        assert_eq!(s.log.count_of(LogKind::Starvation), 1);
    }

    #[test]
    fn starvation_deaths_are_named() {
        let mut s = session();
        s.ledger.supplies.food = 0;
        if let Some(m) = s.party.member_mut(2) {
            m.apply_health_delta(-97.0);
        }
        let report = consume_daily_food(&mut s);
        assert_eq!(report.starved, vec!["Cy".to_string()]);
        assert!(
            s.log
                .entries()
                .iter()
                .any(|e| e.text == "Out of food! Cy starved to death!")
        );
    }

    #[test]
    fn ill_members_skip_ration_bonus_and_take_damage() {
        let mut s = session();
        if let Some(m) = s.party.member_mut(0) {
            m.contract(Illness::Cholera);
        }
        let report = apply_daily_health(&mut s, &mut HighRng);
        assert!(report.recovered.is_empty());
        let sick = &s.party.members()[0];
        assert!((sick.health() - 78.0).abs() < 1e-4);
        assert_eq!(sick.illness_days(), 1);
        // Filling rations at full health stays clamped.
        assert!((s.party.members()[1].health() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn recovered_members_eat_the_same_day() {
        let mut s = session();
        s.trail.pace = Pace::Slow;
        s.trail.rations = Rations::BareBones;
        if let Some(m) = s.party.member_mut(0) {
            m.contract(Illness::Fever);
        }
        let report = apply_daily_health(&mut s, &mut LowRng);
        assert_eq!(report.recovered.len(), 1);
        let member = &s.party.members()[0];
        assert!(member.illness().is_none());
        // 90 - 0.8 illness - 2 bare bones
        assert!((member.health() - 87.2).abs() < 1e-4);
    }

    #[test]
    fn grueling_cold_and_ragged_stacks_penalties() {
        let mut s = session();
        s.trail.pace = Pace::Grueling;
        s.trail.rations = Rations::Meager;
        s.trail.weather = Weather::VeryCold;
        s.ledger.supplies.clothing = 1;
        apply_daily_health(&mut s, &mut HighRng);
        for member in s.party.members() {
            assert!((member.health() - 97.0).abs() < 1e-4);
        }
    }

    #[test]
    fn deaths_are_reported_once() {
        let mut s = session();
        s.trail.pace = Pace::Grueling;
        if let Some(m) = s.party.member_mut(3) {
            m.apply_health_delta(-99.5);
        }
        let first = apply_daily_health(&mut s, &mut HighRng);
        assert_eq!(first.died, vec!["Di".to_string()]);
        let second = apply_daily_health(&mut s, &mut HighRng);
        assert!(second.died.is_empty());
        assert_eq!(s.party.alive_count(), 3);
    }
}
