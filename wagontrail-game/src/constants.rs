//! Centralized balance and tuning constants for the trail simulation.
//!
//! Values that shape the deterministic math of a journey live here so they
//! are only changed through reviewed code. Pacing of real-time screens is
//! tunable through `JourneyConfig` instead.

// Log targets -------------------------------------------------------------
pub(crate) const LOG_TARGET_DAY: &str = "wagontrail::day";
pub(crate) const LOG_TARGET_SCREEN: &str = "wagontrail::screen";
pub(crate) const LOG_TARGET_ENCOUNTER: &str = "wagontrail::encounter";

// Party --------------------------------------------------------------------
pub(crate) const HEALTH_MAX: f32 = 100.0;
pub(crate) const HEALTH_MIN: f32 = 0.0;
pub(crate) const PARTY_SIZE: usize = 4;
pub(crate) const NAME_MAX_CHARS: usize = 15;

pub(crate) const HEALTH_LABEL_GOOD: f32 = 80.0;
pub(crate) const HEALTH_LABEL_FAIR: f32 = 50.0;
pub(crate) const HEALTH_LABEL_POOR: f32 = 20.0;

// Travel -------------------------------------------------------------------
pub(crate) const MILES_SLOW: f32 = 8.0;
pub(crate) const MILES_STEADY: f32 = 12.0;
pub(crate) const MILES_GRUELING: f32 = 17.0;
pub(crate) const OXEN_MIN_FOR_FULL_SPEED: u32 = 2;
pub(crate) const SLOWDOWN_FACTOR: f32 = 0.5;
pub(crate) const TRAIL_TOTAL_MILES: u32 = 2040;

// Rations and health -------------------------------------------------------
pub(crate) const FOOD_BARE_BONES: u32 = 2;
pub(crate) const FOOD_MEAGER: u32 = 3;
pub(crate) const FOOD_FILLING: u32 = 4;
pub(crate) const STARVATION_DAMAGE: f32 = 5.0;
pub(crate) const RATION_BARE_BONES_HEALTH: f32 = -2.0;
pub(crate) const RATION_MEAGER_HEALTH: f32 = -0.5;
pub(crate) const RATION_FILLING_HEALTH: f32 = 0.5;
pub(crate) const GRUELING_PACE_DAMAGE: f32 = 1.0;
pub(crate) const COLD_CLOTHING_MIN: u32 = 2;
pub(crate) const COLD_EXPOSURE_DAMAGE: f32 = 1.5;

// Recovery -----------------------------------------------------------------
pub(crate) const RECOVERY_BASE: f32 = 5.0;
pub(crate) const RECOVERY_SLOW_BONUS: f32 = 10.0;
pub(crate) const RECOVERY_GRUELING_PENALTY: f32 = 5.0;
pub(crate) const RECOVERY_FILLING_BONUS: f32 = 8.0;
pub(crate) const RECOVERY_BARE_BONES_PENALTY: f32 = 5.0;
pub(crate) const RECOVERY_LONG_ILLNESS_DAYS: u16 = 7;
pub(crate) const RECOVERY_LONG_ILLNESS_BONUS: f32 = 15.0;
pub(crate) const RECOVERY_MID_ILLNESS_DAYS: u16 = 3;
pub(crate) const RECOVERY_MID_ILLNESS_BONUS: f32 = 5.0;

// Rest ---------------------------------------------------------------------
pub(crate) const REST_DAYS_MIN: u8 = 1;
pub(crate) const REST_DAYS_MAX: u8 = 9;
pub(crate) const REST_HEAL_PER_DAY: f32 = 5.0;
pub(crate) const REST_RECOVERY_BASE: f32 = 30.0;
pub(crate) const REST_RECOVERY_PER_ILL_DAY: f32 = 3.0;
pub(crate) const REST_LOG_CAPACITY: usize = 10;

// Daily triggers -----------------------------------------------------------
pub(crate) const EVENT_CHANCE: f32 = 0.08;
pub(crate) const DISEASE_CHANCE: f32 = 0.03;
pub(crate) const WEATHER_CHANCE: f32 = 0.15;
pub(crate) const WEATHER_RESET_SHARE: f32 = 0.5;
pub(crate) const WEATHER_STEP_SHARE: f32 = 0.2;
pub(crate) const EVENT_POSITIVE_CUTOFF: f32 = 0.3;
pub(crate) const EVENT_NEGATIVE_CUTOFF: f32 = 0.7;

// River crossings ----------------------------------------------------------
pub(crate) const RIVER_DEPTH_BASE: f32 = 2.5;
pub(crate) const RIVER_DEPTH_SPRING_BONUS: f32 = 1.5;
pub(crate) const RIVER_DEPTH_STORM_BONUS: f32 = 1.0;
pub(crate) const RIVER_DEPTH_JITTER: f32 = 0.75;
pub(crate) const RIVER_DEPTH_MIN: f32 = 1.5;
pub(crate) const RIVER_DEPTH_MAX: f32 = 6.0;
pub(crate) const RIVER_DEFAULT_WIDTH_FT: u16 = 200;
pub(crate) const FORD_SHALLOW_DEPTH: f32 = 2.5;
pub(crate) const FORD_MODERATE_DEPTH: f32 = 4.0;
pub(crate) const FORD_SHALLOW_SUCCESS: f32 = 90.0;
pub(crate) const FORD_MODERATE_SUCCESS: f32 = 60.0;
pub(crate) const FORD_DEEP_SUCCESS: f32 = 30.0;
pub(crate) const FORD_OXEN_BONUS_MIN: u32 = 3;
pub(crate) const FORD_OXEN_BONUS: f32 = 10.0;
pub(crate) const CAULK_SUCCESS: f32 = 75.0;
pub(crate) const CAULK_STORM_PENALTY: f32 = 20.0;
pub(crate) const CROSSING_PROGRESS_PER_SEC: f32 = 20.0;
pub(crate) const WAIT_DAYS_MIN: u32 = 2;
pub(crate) const WAIT_DAYS_MAX: u32 = 4;
pub(crate) const WAIT_FOOD_PER_PERSON: u32 = 3;

// Hunting ------------------------------------------------------------------
pub(crate) const HUNT_ROUNDS_PER_BOX: u32 = 20;
pub(crate) const HUNT_MAX_ROUNDS: u32 = 100;
pub(crate) const MEAT_RABBIT: u32 = 5;
pub(crate) const MEAT_SQUIRREL: u32 = 3;
pub(crate) const MEAT_DEER: u32 = 50;
pub(crate) const MEAT_BUFFALO: u32 = 100;

// Scoring ------------------------------------------------------------------
pub(crate) const SCORE_PER_SURVIVOR: u64 = 50;
pub(crate) const SCORE_ARRIVAL_BONUS: u64 = 500;
pub(crate) const SCORE_MONEY_FACTOR: f64 = 0.5;
