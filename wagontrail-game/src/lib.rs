//! Wagontrail Game Engine
//!
//! Platform-agnostic core of a turn-based wagon-train survival simulation:
//! the party ledger, the daily travel tick, encounter resolvers, and the
//! stack-based screen controller that drives them. Rendering and input
//! devices live outside this crate; it consumes `dt` plus an input snapshot
//! and produces read-only views.

pub mod calendar;
pub mod camp;
pub mod constants;
pub mod controller;
pub mod crossings;
pub mod disease;
pub mod hunt;
pub mod journey;
pub mod ledger;
pub mod numbers;
pub mod party;
pub mod random_events;
pub mod result;
pub mod setup;
pub mod store;
pub mod trade;
pub mod trail;
pub mod weather;

// Re-export commonly used types
pub use calendar::TrailDate;
pub use camp::{RestDayReport, RestResolver, rest_one_day};
pub use controller::{
    InputSnapshot, Key, Screen, ScreenCtx, ScreenKind, ScreenModel, ScreenView, StateController,
    Transition,
};
pub use crossings::{CrossingChoice, CrossingMode, CrossingOutcome, RiverCrossingResolver};
pub use disease::Illness;
pub use hunt::{HuntSummary, HuntingEncounter, Species};
pub use journey::{
    DayOutcome, DayTransition, HuntConfig, JourneyConfig, JourneyConfigError, JourneyLog,
    JourneySnapshot, LogKind, RngBundle, Session, advance_day,
};
pub use ledger::{Ledger, Supplies, SupplyKind, format_money};
pub use party::{HealthLabel, Party, PartyMember};
pub use random_events::{EventCategory, EventEffect, RandomEvent, resolve_random_event};
pub use result::{Ending, Rating, ScoreBreakdown, score_journey};
pub use setup::{JourneySetup, Profession, SetupError};
pub use store::{Cart, StoreError, StoreItem};
pub use trade::{BarterOffer, FortPrices, TradePost};
pub use trail::{LANDMARKS, Landmark, LandmarkKind, Pace, Rations, TrailState};
pub use weather::Weather;
