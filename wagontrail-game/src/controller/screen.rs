//! The closed set of screens and their uniform dispatch.

use serde::Serialize;

use crate::camp::{RestResolver, RestView};
use crate::controller::game_over::{GameOverScreen, GameOverView};
use crate::controller::menu::{MenuView, TravelMenu};
use crate::controller::pause::{LandmarkPause, PauseView};
use crate::controller::travel::{TravelScreen, TravelView};
use crate::controller::{InputSnapshot, ScreenCtx, Transition};
use crate::crossings::{CrossingView, RiverCrossingResolver};
use crate::hunt::{HuntView, HuntingEncounter};
use crate::journey::{JourneySnapshot, Session};
use crate::trade::{TradePost, TradePostView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    Travel,
    TravelMenu,
    RiverCrossing,
    Hunting,
    Rest,
    TradePost,
    LandmarkPause,
    GameOver,
}

impl ScreenKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::TravelMenu => "travel_menu",
            Self::RiverCrossing => "river_crossing",
            Self::Hunting => "hunting",
            Self::Rest => "rest",
            Self::TradePost => "trade_post",
            Self::LandmarkPause => "landmark_pause",
            Self::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Travel(TravelScreen),
    TravelMenu(TravelMenu),
    RiverCrossing(RiverCrossingResolver),
    Hunting(Box<HuntingEncounter>),
    Rest(RestResolver),
    TradePost(TradePost),
    LandmarkPause(LandmarkPause),
    GameOver(GameOverScreen),
}

/// Screen-specific half of a render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "screen", content = "view")]
pub enum ScreenModel {
    Travel(TravelView),
    TravelMenu(MenuView),
    RiverCrossing(CrossingView),
    Hunting(HuntView),
    Rest(RestView),
    TradePost(TradePostView),
    LandmarkPause(PauseView),
    GameOver(GameOverView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenView {
    pub kind: ScreenKind,
    pub model: ScreenModel,
    pub journey: JourneySnapshot,
}

impl Screen {
    #[must_use]
    pub const fn kind(&self) -> ScreenKind {
        match self {
            Self::Travel(_) => ScreenKind::Travel,
            Self::TravelMenu(_) => ScreenKind::TravelMenu,
            Self::RiverCrossing(_) => ScreenKind::RiverCrossing,
            Self::Hunting(_) => ScreenKind::Hunting,
            Self::Rest(_) => ScreenKind::Rest,
            Self::TradePost(_) => ScreenKind::TradePost,
            Self::LandmarkPause(_) => ScreenKind::LandmarkPause,
            Self::GameOver(_) => ScreenKind::GameOver,
        }
    }

    pub fn enter(&mut self, ctx: &mut ScreenCtx<'_>) {
        match self {
            Self::Travel(s) => s.enter(ctx),
            Self::TravelMenu(s) => s.enter(),
            Self::RiverCrossing(s) => s.enter(ctx),
            Self::Hunting(s) => s.enter(ctx),
            Self::Rest(s) => s.enter(ctx),
            Self::TradePost(s) => s.enter(ctx),
            Self::LandmarkPause(s) => s.enter(ctx),
            Self::GameOver(s) => s.enter(ctx),
        }
    }

    /// Only the travel screen keeps per-visit state to drop.
    pub fn exit(&mut self, ctx: &mut ScreenCtx<'_>) {
        if let Self::Travel(s) = self {
            s.exit(ctx);
        }
    }

    /// Refresh derived state after the screen above was popped.
    pub fn resume(&mut self, ctx: &mut ScreenCtx<'_>) {
        match self {
            Self::Travel(s) => s.resume(ctx),
            Self::TravelMenu(s) => s.resume(),
            _ => {}
        }
    }

    pub fn update(&mut self, dt: f32, input: &InputSnapshot, ctx: &mut ScreenCtx<'_>) -> Transition {
        match self {
            Self::Travel(s) => s.update(dt, input, ctx),
            Self::TravelMenu(s) => s.update(input, ctx),
            Self::RiverCrossing(s) => s.update(dt, input, ctx),
            Self::Hunting(s) => s.update(dt, input, ctx),
            Self::Rest(s) => s.update(dt, input, ctx),
            Self::TradePost(s) => s.update(dt, input, ctx),
            Self::LandmarkPause(s) => s.update(dt, input),
            Self::GameOver(s) => s.update(input),
        }
    }

    #[must_use]
    pub fn render(&self, session: &Session) -> ScreenModel {
        match self {
            Self::Travel(s) => ScreenModel::Travel(s.render()),
            Self::TravelMenu(s) => ScreenModel::TravelMenu(s.render(session)),
            Self::RiverCrossing(s) => ScreenModel::RiverCrossing(s.render()),
            Self::Hunting(s) => ScreenModel::Hunting(s.render()),
            Self::Rest(s) => ScreenModel::Rest(s.render()),
            Self::TradePost(s) => ScreenModel::TradePost(
                s.render(&session.ledger.supplies, session.ledger.money_cents()),
            ),
            Self::LandmarkPause(s) => ScreenModel::LandmarkPause(s.render()),
            Self::GameOver(s) => ScreenModel::GameOver(s.render()),
        }
    }
}
