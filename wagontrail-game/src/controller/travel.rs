//! The travel screen: real time in, trail days out.

use serde::Serialize;

use crate::controller::game_over::GameOverScreen;
use crate::controller::menu::TravelMenu;
use crate::controller::pause::LandmarkPause;
use crate::controller::screen::Screen;
use crate::controller::{InputSnapshot, ScreenCtx, Transition};
use crate::crossings::RiverCrossingResolver;
use crate::journey::{DayOutcome, DayTransition, advance_day};
use crate::result::Ending;
use crate::trade::TradePost;
use crate::trail::{LandmarkKind, landmark};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelView {
    pub day_progress: f32,
    pub next_landmark: Option<&'static str>,
    pub miles_to_next: Option<u32>,
    pub last_day: Option<DayOutcome>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelScreen {
    clock: f32,
    day_length: f32,
    next_landmark: Option<&'static str>,
    miles_to_next: Option<u32>,
    last_day: Option<DayOutcome>,
}

impl TravelScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds accumulated toward the next trail day.
    #[must_use]
    pub const fn clock(&self) -> f32 {
        self.clock
    }

    #[must_use]
    pub const fn last_day(&self) -> Option<&DayOutcome> {
        self.last_day.as_ref()
    }

    fn refresh(&mut self, ctx: &mut ScreenCtx<'_>) {
        ctx.session.trail.refresh_next_landmark();
        self.day_length = ctx.cfg.day_length_secs;
        self.next_landmark = ctx.session.trail.next_landmark().map(|lm| lm.name);
        self.miles_to_next = ctx.session.trail.miles_to_next_landmark();
    }

    pub fn enter(&mut self, ctx: &mut ScreenCtx<'_>) {
        self.clock = 0.0;
        self.refresh(ctx);
    }

    pub fn resume(&mut self, ctx: &mut ScreenCtx<'_>) {
        self.refresh(ctx);
    }

    pub fn exit(&mut self, _ctx: &mut ScreenCtx<'_>) {
        self.clock = 0.0;
        self.last_day = None;
    }

    pub fn update(&mut self, dt: f32, input: &InputSnapshot, ctx: &mut ScreenCtx<'_>) -> Transition {
        if input.confirm() {
            return Transition::Push(Screen::TravelMenu(TravelMenu::new()));
        }
        self.clock += dt.max(0.0);
        if self.clock < self.day_length {
            return Transition::None;
        }
        self.clock = 0.0;
        let outcome = advance_day(ctx.session, ctx.rngs, ctx.cfg);
        let transition = outcome.transition;
        self.last_day = Some(outcome);
        self.refresh(ctx);
        transition_for_day(transition)
    }

    #[must_use]
    pub fn render(&self) -> TravelView {
        TravelView {
            day_progress: if self.day_length > 0.0 {
                (self.clock / self.day_length).clamp(0.0, 1.0)
            } else {
                0.0
            },
            next_landmark: self.next_landmark,
            miles_to_next: self.miles_to_next,
            last_day: self.last_day.clone(),
        }
    }
}

/// Which screen a finished travel day leads to.
#[must_use]
pub fn transition_for_day(day: DayTransition) -> Transition {
    match day {
        DayTransition::Continue => Transition::None,
        DayTransition::Arrived => Transition::Reset(Screen::GameOver(GameOverScreen::new(Ending::Reached))),
        DayTransition::PartyLost => Transition::Reset(Screen::GameOver(GameOverScreen::new(Ending::Death))),
        DayTransition::Landmark(index) => match landmark(index).map(|lm| lm.kind) {
            Some(LandmarkKind::River) => {
                Transition::Push(Screen::RiverCrossing(RiverCrossingResolver::new(index)))
            }
            Some(LandmarkKind::Fort) => Transition::Push(Screen::TradePost(TradePost::new(index))),
            Some(LandmarkKind::Landmark) => {
                Transition::Push(Screen::LandmarkPause(LandmarkPause::new(index)))
            }
            Some(LandmarkKind::Destination) => {
                Transition::Reset(Screen::GameOver(GameOverScreen::new(Ending::Reached)))
            }
            None => Transition::None,
        },
    }
}
