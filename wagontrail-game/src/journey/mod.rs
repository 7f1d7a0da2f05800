//! Journey primitives shared by the daily kernel and the screen controller.
use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::cell::{RefCell, RefMut};
use thiserror::Error;

use crate::constants::{DISEASE_CHANCE, EVENT_CHANCE, TRAIL_TOTAL_MILES, WEATHER_CHANCE};

pub mod daily;
pub mod event;
pub mod kernel;
pub mod session;

pub use daily::{apply_daily_health, consume_daily_food, travel_miles_for_day};
pub use event::{JourneyLog, LogEntry, LogKind};
pub use kernel::{DayOutcome, DayTransition, advance_day};
pub use session::{JourneySnapshot, MemberSnapshot, Session};

/// Tunable pacing and probabilities for a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyConfig {
    /// Real seconds of travel that make up one trail day.
    #[serde(default = "JourneyConfig::default_day_length_secs")]
    pub day_length_secs: f32,
    #[serde(default = "JourneyConfig::default_rest_day_length_secs")]
    pub rest_day_length_secs: f32,
    #[serde(default = "JourneyConfig::default_landmark_pause_secs")]
    pub landmark_pause_secs: f32,
    #[serde(default = "JourneyConfig::default_total_miles")]
    pub total_miles: u32,
    #[serde(default = "JourneyConfig::default_event_chance")]
    pub event_chance: f32,
    #[serde(default = "JourneyConfig::default_disease_chance")]
    pub disease_chance: f32,
    #[serde(default = "JourneyConfig::default_weather_chance")]
    pub weather_chance: f32,
    #[serde(default)]
    pub hunt: HuntConfig,
}

impl JourneyConfig {
    #[must_use]
    pub const fn default_day_length_secs() -> f32 {
        2.0
    }

    #[must_use]
    pub const fn default_rest_day_length_secs() -> f32 {
        2.0
    }

    #[must_use]
    pub const fn default_landmark_pause_secs() -> f32 {
        2.0
    }

    #[must_use]
    pub const fn default_total_miles() -> u32 {
        TRAIL_TOTAL_MILES
    }

    #[must_use]
    pub const fn default_event_chance() -> f32 {
        EVENT_CHANCE
    }

    #[must_use]
    pub const fn default_disease_chance() -> f32 {
        DISEASE_CHANCE
    }

    #[must_use]
    pub const fn default_weather_chance() -> f32 {
        WEATHER_CHANCE
    }

    /// Parse and validate a JSON configuration; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `JourneyConfigError::Parse` for malformed JSON and the matching
    /// range error when a value is out of bounds.
    pub fn from_json(json: &str) -> Result<Self, JourneyConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|err| JourneyConfigError::Parse(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns `JourneyConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), JourneyConfigError> {
        check_range("day_length_secs", self.day_length_secs, 0.01, 60.0)?;
        check_range("rest_day_length_secs", self.rest_day_length_secs, 0.01, 60.0)?;
        check_range("landmark_pause_secs", self.landmark_pause_secs, 0.0, 60.0)?;
        check_range("event_chance", self.event_chance, 0.0, 1.0)?;
        check_range("disease_chance", self.disease_chance, 0.0, 1.0)?;
        check_range("weather_chance", self.weather_chance, 0.0, 1.0)?;
        if !(100..=10_000).contains(&self.total_miles) {
            return Err(JourneyConfigError::TotalMiles(self.total_miles));
        }
        self.hunt.validate()
    }
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            day_length_secs: Self::default_day_length_secs(),
            rest_day_length_secs: Self::default_rest_day_length_secs(),
            landmark_pause_secs: Self::default_landmark_pause_secs(),
            total_miles: Self::default_total_miles(),
            event_chance: Self::default_event_chance(),
            disease_chance: Self::default_disease_chance(),
            weather_chance: Self::default_weather_chance(),
            hunt: HuntConfig::default(),
        }
    }
}

/// Shape and timing of the hunting grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuntConfig {
    #[serde(default = "HuntConfig::default_time_limit_secs")]
    pub time_limit_secs: f32,
    #[serde(default = "HuntConfig::default_grid_width")]
    pub grid_width: u8,
    #[serde(default = "HuntConfig::default_grid_height")]
    pub grid_height: u8,
    #[serde(default = "HuntConfig::default_carry_capacity")]
    pub carry_capacity: u32,
    #[serde(default = "HuntConfig::default_max_animals")]
    pub max_animals: usize,
    #[serde(default = "HuntConfig::default_spawn_interval_secs")]
    pub spawn_interval_secs: f32,
    #[serde(default = "HuntConfig::default_animal_step_secs")]
    pub animal_step_secs: f32,
    #[serde(default = "HuntConfig::default_player_step_secs")]
    pub player_step_secs: f32,
    #[serde(default = "HuntConfig::default_bullet_range")]
    pub bullet_range: u8,
    #[serde(default = "HuntConfig::default_obstacle_count")]
    pub obstacle_count: usize,
}

impl HuntConfig {
    const fn default_time_limit_secs() -> f32 {
        45.0
    }

    const fn default_grid_width() -> u8 {
        20
    }

    const fn default_grid_height() -> u8 {
        15
    }

    const fn default_carry_capacity() -> u32 {
        100
    }

    const fn default_max_animals() -> usize {
        5
    }

    const fn default_spawn_interval_secs() -> f32 {
        2.0
    }

    const fn default_animal_step_secs() -> f32 {
        1.0
    }

    const fn default_player_step_secs() -> f32 {
        0.1
    }

    const fn default_bullet_range() -> u8 {
        10
    }

    const fn default_obstacle_count() -> usize {
        15
    }

    fn validate(&self) -> Result<(), JourneyConfigError> {
        check_range("hunt.time_limit_secs", self.time_limit_secs, 1.0, 600.0)?;
        check_range("hunt.spawn_interval_secs", self.spawn_interval_secs, 0.1, 60.0)?;
        check_range("hunt.animal_step_secs", self.animal_step_secs, 0.05, 10.0)?;
        check_range("hunt.player_step_secs", self.player_step_secs, 0.0, 5.0)?;
        if self.grid_width < 4 || self.grid_height < 4 {
            return Err(JourneyConfigError::HuntGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        let cells = usize::from(self.grid_width) * usize::from(self.grid_height);
        if self.obstacle_count >= cells / 2 {
            return Err(JourneyConfigError::HuntObstacles {
                count: self.obstacle_count,
                cells,
            });
        }
        if self.bullet_range == 0 {
            return Err(JourneyConfigError::HuntBulletRange);
        }
        Ok(())
    }
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            time_limit_secs: Self::default_time_limit_secs(),
            grid_width: Self::default_grid_width(),
            grid_height: Self::default_grid_height(),
            carry_capacity: Self::default_carry_capacity(),
            max_animals: Self::default_max_animals(),
            spawn_interval_secs: Self::default_spawn_interval_secs(),
            animal_step_secs: Self::default_animal_step_secs(),
            player_step_secs: Self::default_player_step_secs(),
            bullet_range: Self::default_bullet_range(),
            obstacle_count: Self::default_obstacle_count(),
        }
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), JourneyConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(JourneyConfigError::RangeViolation {
            field,
            min,
            max,
            value,
        })
    }
}

/// Errors raised when journey configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum JourneyConfigError {
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("total_miles must be between 100 and 10000 (got {0})")]
    TotalMiles(u32),
    #[error("hunt grid {width}x{height} is too small")]
    HuntGrid { width: u8, height: u8 },
    #[error("hunt grid of {cells} cells cannot hold {count} obstacles")]
    HuntObstacles { count: usize, cells: usize },
    #[error("hunt bullet range must be positive")]
    HuntBulletRange,
    #[error("invalid journey config: {0}")]
    Parse(String),
}

/// Deterministic bundle of RNG streams segregated by simulation domain.
#[derive(Debug, Clone)]
pub struct RngBundle {
    travel: RefCell<CountingRng<SmallRng>>,
    events: RefCell<CountingRng<SmallRng>>,
    health: RefCell<CountingRng<SmallRng>>,
    crossing: RefCell<CountingRng<SmallRng>>,
    hunt: RefCell<CountingRng<SmallRng>>,
    trade: RefCell<CountingRng<SmallRng>>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let stream = |tag: &[u8]| RefCell::new(CountingRng::new(derive_stream_seed(seed, tag)));
        Self {
            travel: stream(b"travel"),
            events: stream(b"events"),
            health: stream(b"health"),
            crossing: stream(b"crossing"),
            hunt: stream(b"hunt"),
            trade: stream(b"trade"),
        }
    }

    /// Weather shifts and daily trigger rolls.
    #[must_use]
    pub fn travel(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.travel.borrow_mut()
    }

    /// Random event selection and effect magnitudes.
    #[must_use]
    pub fn events(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.events.borrow_mut()
    }

    /// Recovery rolls during travel and rest.
    #[must_use]
    pub fn health(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.health.borrow_mut()
    }

    #[must_use]
    pub fn crossing(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.crossing.borrow_mut()
    }

    #[must_use]
    pub fn hunt(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.hunt.borrow_mut()
    }

    #[must_use]
    pub fn trade(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.trade.borrow_mut()
    }

    /// Total draws across every stream.
    #[must_use]
    pub fn total_draws(&self) -> u64 {
        [
            &self.travel,
            &self.events,
            &self.health,
            &self.crossing,
            &self.hunt,
            &self.trade,
        ]
        .iter()
        .map(|cell| cell.borrow().draws())
        .fold(0, u64::saturating_add)
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed ^ u64::from(domain_tag.iter().map(|b| u32::from(*b)).sum::<u32>());
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn default_config_validates() {
        assert_eq!(JourneyConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = JourneyConfig::from_json(r#"{"day_length_secs": 0.5, "hunt": {"time_limit_secs": 10}}"#)
            .expect("valid config");
        assert!((cfg.day_length_secs - 0.5).abs() < f32::EPSILON);
        assert!((cfg.hunt.time_limit_secs - 10.0).abs() < f32::EPSILON);
        assert_eq!(cfg.hunt.grid_width, 20);
        assert_eq!(cfg.total_miles, 2040);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = JourneyConfig::from_json(r#"{"event_chance": 1.5}"#).unwrap_err();
        assert!(matches!(
            err,
            JourneyConfigError::RangeViolation {
                field: "event_chance",
                ..
            }
        ));
        let err = JourneyConfig::from_json(r#"{"hunt": {"obstacle_count": 500}}"#).unwrap_err();
        assert!(matches!(err, JourneyConfigError::HuntObstacles { .. }));
        let err = JourneyConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, JourneyConfigError::Parse(_)));
    }

    #[test]
    fn streams_are_deterministic_and_independent() {
        let a = RngBundle::from_user_seed(42);
        let b = RngBundle::from_user_seed(42);
        assert_eq!(a.travel().next_u64(), b.travel().next_u64());
        assert_ne!(a.hunt().next_u64(), a.trade().next_u64());
        assert_eq!(a.total_draws(), 3);
    }
}
