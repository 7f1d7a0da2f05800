//! Illness catalog, daily damage, and recovery odds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    RECOVERY_BARE_BONES_PENALTY, RECOVERY_BASE, RECOVERY_FILLING_BONUS,
    RECOVERY_GRUELING_PENALTY, RECOVERY_LONG_ILLNESS_BONUS, RECOVERY_LONG_ILLNESS_DAYS,
    RECOVERY_MID_ILLNESS_BONUS, RECOVERY_MID_ILLNESS_DAYS, RECOVERY_SLOW_BONUS,
    REST_RECOVERY_BASE, REST_RECOVERY_PER_ILL_DAY,
};
use crate::trail::{Pace, Rations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Illness {
    Dysentery,
    Cholera,
    Typhoid,
    Measles,
    Fever,
    BrokenLeg,
    SnakeBite,
    Exhaustion,
}

impl Illness {
    pub const ALL: [Self; 8] = [
        Self::Dysentery,
        Self::Cholera,
        Self::Typhoid,
        Self::Measles,
        Self::Fever,
        Self::BrokenLeg,
        Self::SnakeBite,
        Self::Exhaustion,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Dysentery => "dysentery",
            Self::Cholera => "cholera",
            Self::Typhoid => "typhoid",
            Self::Measles => "measles",
            Self::Fever => "fever",
            Self::BrokenLeg => "broken_leg",
            Self::SnakeBite => "snake_bite",
            Self::Exhaustion => "exhaustion",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dysentery => "Dysentery",
            Self::Cholera => "Cholera",
            Self::Typhoid => "Typhoid",
            Self::Measles => "Measles",
            Self::Fever => "Fever",
            Self::BrokenLeg => "Broken Leg",
            Self::SnakeBite => "Snake Bite",
            Self::Exhaustion => "Exhaustion",
        }
    }

    /// Health lost when the illness first strikes.
    #[must_use]
    pub const fn onset_damage(self) -> f32 {
        match self {
            Self::Dysentery => 15.0,
            Self::Cholera => 20.0,
            Self::Typhoid => 18.0,
            Self::Measles => 12.0,
            Self::Fever => 10.0,
            Self::BrokenLeg => 14.0,
            Self::SnakeBite => 16.0,
            Self::Exhaustion => 8.0,
        }
    }

    /// Health lost on every travel day spent sick.
    #[must_use]
    pub const fn daily_damage(self) -> f32 {
        match self {
            Self::Dysentery => 1.5,
            Self::Cholera => 2.0,
            Self::Typhoid => 1.8,
            Self::Measles => 1.0,
            Self::Fever => 0.8,
            Self::BrokenLeg => 0.5,
            Self::SnakeBite => 1.2,
            Self::Exhaustion => 0.6,
        }
    }

    /// Narrative fragment following the victim's name.
    #[must_use]
    pub const fn onset_phrase(self) -> &'static str {
        match self {
            Self::Dysentery => "has dysentery",
            Self::Cholera => "has cholera",
            Self::Typhoid => "has typhoid fever",
            Self::Measles => "has measles",
            Self::Fever => "has a fever",
            Self::BrokenLeg => "broke their leg",
            Self::SnakeBite => "was bitten by a snake",
            Self::Exhaustion => "is exhausted",
        }
    }

    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let idx = rng.gen_range(0..Self::ALL.len());
        Self::ALL[idx]
    }
}

/// Percent chance that a sick traveler recovers on a travel day.
#[must_use]
pub fn travel_recovery_chance(pace: Pace, rations: Rations, illness_days: u16) -> f32 {
    let mut chance = RECOVERY_BASE;
    match pace {
        Pace::Slow => chance += RECOVERY_SLOW_BONUS,
        Pace::Grueling => chance -= RECOVERY_GRUELING_PENALTY,
        Pace::Steady => {}
    }
    match rations {
        Rations::Filling => chance += RECOVERY_FILLING_BONUS,
        Rations::BareBones => chance -= RECOVERY_BARE_BONES_PENALTY,
        Rations::Meager => {}
    }
    if illness_days > RECOVERY_LONG_ILLNESS_DAYS {
        chance += RECOVERY_LONG_ILLNESS_BONUS;
    } else if illness_days > RECOVERY_MID_ILLNESS_DAYS {
        chance += RECOVERY_MID_ILLNESS_BONUS;
    }
    chance.max(0.0)
}

/// Percent chance that a sick traveler recovers on a full rest day.
#[must_use]
pub fn rest_recovery_chance(illness_days: u16) -> f32 {
    REST_RECOVERY_BASE + REST_RECOVERY_PER_ILL_DAY * f32::from(illness_days)
}

/// Roll a percent chance against `uniform[0, 100)`.
pub fn roll_percent<R>(rng: &mut R, chance: f32) -> bool
where
    R: Rng + ?Sized,
{
    rng.r#gen::<f32>() * 100.0 < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn recovery_chance_stacks_modifiers() {
        assert!((travel_recovery_chance(Pace::Steady, Rations::Meager, 0) - 5.0).abs() < f32::EPSILON);
        assert!((travel_recovery_chance(Pace::Slow, Rations::Filling, 4) - 28.0).abs() < f32::EPSILON);
        assert!((travel_recovery_chance(Pace::Slow, Rations::Filling, 8) - 38.0).abs() < f32::EPSILON);
    }

    #[test]
    fn recovery_chance_never_negative() {
        let chance = travel_recovery_chance(Pace::Grueling, Rations::BareBones, 0);
        assert!(chance.abs() < f32::EPSILON);
    }

    #[test]
    fn rest_recovery_grows_with_illness_length() {
        assert!((rest_recovery_chance(0) - 30.0).abs() < f32::EPSILON);
        assert!((rest_recovery_chance(5) - 45.0).abs() < f32::EPSILON);
    }

    #[test]
    fn percent_rolls_respect_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert!((0..50).all(|_| !roll_percent(&mut rng, 0.0)));
        assert!((0..50).all(|_| roll_percent(&mut rng, 100.0)));
    }

    #[test]
    fn severity_tables_cover_every_illness() {
        for illness in Illness::ALL {
            assert!(illness.onset_damage() > illness.daily_damage());
            assert!(!illness.onset_phrase().is_empty());
        }
        assert_eq!(Illness::BrokenLeg.key(), "broken_leg");
    }
}
