//! Terminal screen with the final score.

use log::info;
use serde::Serialize;

use crate::constants::LOG_TARGET_SCREEN;
use crate::controller::{InputSnapshot, ScreenCtx, Transition};
use crate::journey::LogKind;
use crate::result::{Ending, ScoreBreakdown, score_journey};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverView {
    pub ending: Ending,
    pub headline: &'static str,
    pub score: Option<ScoreBreakdown>,
    pub acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOverScreen {
    ending: Ending,
    score: Option<ScoreBreakdown>,
    acknowledged: bool,
}

impl GameOverScreen {
    #[must_use]
    pub const fn new(ending: Ending) -> Self {
        Self {
            ending,
            score: None,
            acknowledged: false,
        }
    }

    #[must_use]
    pub const fn ending(&self) -> Ending {
        self.ending
    }

    #[must_use]
    pub const fn score(&self) -> Option<&ScoreBreakdown> {
        self.score.as_ref()
    }

    pub fn enter(&mut self, ctx: &mut ScreenCtx<'_>) {
        let score = score_journey(ctx.session, self.ending);
        let text = match self.ending {
            Ending::Reached => "You have arrived in Oregon City!",
            Ending::Death => "Everyone in your party has died.",
        };
        ctx.session.note(LogKind::Travel, text);
        info!(
            target: LOG_TARGET_SCREEN,
            "journey over ({}) after {} days, score {}",
            self.ending.key(),
            ctx.session.trail.days_elapsed,
            score.total
        );
        self.score = Some(score);
    }

    /// The journey is over; confirming only marks the result as seen.
    pub fn update(&mut self, input: &InputSnapshot) -> Transition {
        if input.confirm() {
            self.acknowledged = true;
        }
        Transition::None
    }

    #[must_use]
    pub fn render(&self) -> GameOverView {
        GameOverView {
            ending: self.ending,
            headline: match self.ending {
                Ending::Reached => "Congratulations!",
                Ending::Death => "Game Over",
            },
            score: self.score.clone(),
            acknowledged: self.acknowledged,
        }
    }
}
