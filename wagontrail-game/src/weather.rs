//! Trail weather and its daily drift.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{WEATHER_RESET_SHARE, WEATHER_STEP_SHARE};

/// Weather levels ordered from mildest to harshest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Fair,
    Warm,
    Cool,
    Cold,
    VeryCold,
    Stormy,
}

impl Weather {
    pub const ALL: [Self; 6] = [
        Self::Fair,
        Self::Warm,
        Self::Cool,
        Self::Cold,
        Self::VeryCold,
        Self::Stormy,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Fair => "fair",
            Self::Warm => "warm",
            Self::Cool => "cool",
            Self::Cold => "cold",
            Self::VeryCold => "very_cold",
            Self::Stormy => "stormy",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fair => "Fair",
            Self::Warm => "Warm",
            Self::Cool => "Cool",
            Self::Cold => "Cold",
            Self::VeryCold => "Very Cold",
            Self::Stormy => "Stormy",
        }
    }

    /// Weather that halves the day's progress.
    #[must_use]
    pub const fn slows_travel(self) -> bool {
        matches!(self, Self::Stormy | Self::VeryCold)
    }

    /// Weather that punishes a party short on clothing.
    #[must_use]
    pub const fn is_cold(self) -> bool {
        matches!(self, Self::Cold | Self::VeryCold)
    }

    const fn index(self) -> usize {
        match self {
            Self::Fair => 0,
            Self::Warm => 1,
            Self::Cool => 2,
            Self::Cold => 3,
            Self::VeryCold => 4,
            Self::Stormy => 5,
        }
    }

    /// Next level toward the harsh end, saturating at `Stormy`.
    #[must_use]
    pub fn step_harsher(self) -> Self {
        let next = (self.index() + 1).min(Self::ALL.len() - 1);
        Self::ALL[next]
    }
}

/// Roll a weather change: mostly clearing, sometimes worsening, otherwise any level.
pub fn roll_weather_shift<R>(current: Weather, rng: &mut R) -> Weather
where
    R: Rng + ?Sized,
{
    let roll = rng.r#gen::<f32>();
    if roll < WEATHER_RESET_SHARE {
        Weather::Fair
    } else if roll < WEATHER_RESET_SHARE + WEATHER_STEP_SHARE {
        current.step_harsher()
    } else {
        Weather::ALL[rng.gen_range(0..Weather::ALL.len())]
    }
}
