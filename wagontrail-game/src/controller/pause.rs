//! Short stop at a plain landmark before travel resumes.

use serde::Serialize;

use crate::controller::{InputSnapshot, ScreenCtx, Transition};
use crate::trail::landmark;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PauseView {
    pub name: &'static str,
    pub description: &'static str,
    pub remaining_secs: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkPause {
    landmark: usize,
    remaining: f32,
}

impl LandmarkPause {
    #[must_use]
    pub const fn new(landmark: usize) -> Self {
        Self {
            landmark,
            remaining: 0.0,
        }
    }

    pub fn enter(&mut self, ctx: &mut ScreenCtx<'_>) {
        self.remaining = ctx.cfg.landmark_pause_secs;
    }

    /// Counts down per tick; Enter or Space skips ahead.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) -> Transition {
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 || input.confirm() {
            Transition::Pop
        } else {
            Transition::None
        }
    }

    #[must_use]
    pub fn render(&self) -> PauseView {
        let lm = landmark(self.landmark);
        PauseView {
            name: lm.map_or("", |lm| lm.name),
            description: lm.map_or("", |lm| lm.description),
            remaining_secs: self.remaining.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Key;

    #[test]
    fn pause_counts_down_or_skips() {
        let mut pause = LandmarkPause::new(3);
        pause.remaining = 2.0;
        assert_eq!(pause.update(1.0, &InputSnapshot::idle()), Transition::None);
        assert_eq!(pause.render().name, "Chimney Rock");
        assert_eq!(pause.update(1.0, &InputSnapshot::idle()), Transition::Pop);

        let mut pause = LandmarkPause::new(5);
        pause.remaining = 2.0;
        assert_eq!(pause.update(0.0, &InputSnapshot::pressed(Key::Enter)), Transition::Pop);
    }
}
