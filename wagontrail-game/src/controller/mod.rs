//! Stack-based screen controller.
//!
//! One screen is active; screens underneath are suspended untouched. Screens
//! never see the controller. They receive a [`ScreenCtx`] lending the session,
//! the RNG bundle, and the config for exactly one call, and answer with a
//! [`Transition`] that the controller applies afterwards.

use log::debug;

use crate::constants::LOG_TARGET_SCREEN;
use crate::journey::{JourneyConfig, RngBundle, Session};
use crate::result::Ending;

pub mod game_over;
pub mod input;
pub mod menu;
pub mod pause;
pub mod screen;
pub mod travel;

pub use game_over::{GameOverScreen, GameOverView};
pub use input::{InputSnapshot, Key, KeySet};
pub use menu::{MenuMode, MenuOption, MenuView, TravelMenu};
pub use pause::{LandmarkPause, PauseView};
pub use screen::{Screen, ScreenKind, ScreenModel, ScreenView};
pub use travel::{TravelScreen, TravelView};

/// Everything a screen may touch during one call.
#[derive(Debug)]
pub struct ScreenCtx<'a> {
    pub session: &'a mut Session,
    pub rngs: &'a RngBundle,
    pub cfg: &'a JourneyConfig,
}

impl<'a> ScreenCtx<'a> {
    #[must_use]
    pub const fn new(session: &'a mut Session, rngs: &'a RngBundle, cfg: &'a JourneyConfig) -> Self {
        Self { session, rngs, cfg }
    }
}

/// Stack change requested by the active screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    None,
    Push(Screen),
    Pop,
    Set(Screen),
    /// Drop every suspended screen, then set.
    Reset(Screen),
}

#[derive(Debug)]
pub struct StateController {
    session: Session,
    rngs: RngBundle,
    cfg: JourneyConfig,
    active: Option<Screen>,
    stack: Vec<Screen>,
    ticks: u64,
}

impl StateController {
    /// Controller with no active screen.
    #[must_use]
    pub const fn new(session: Session, rngs: RngBundle, cfg: JourneyConfig) -> Self {
        Self {
            session,
            rngs,
            cfg,
            active: None,
            stack: Vec::new(),
            ticks: 0,
        }
    }

    /// Controller already on the trail.
    #[must_use]
    pub fn on_trail(session: Session, rngs: RngBundle, cfg: JourneyConfig) -> Self {
        let mut controller = Self::new(session, rngs, cfg);
        controller.set_screen(Screen::Travel(TravelScreen::new()));
        controller
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub const fn config(&self) -> &JourneyConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn rngs(&self) -> &RngBundle {
        &self.rngs
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn active(&self) -> Option<&Screen> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn active_kind(&self) -> Option<ScreenKind> {
        self.active.as_ref().map(Screen::kind)
    }

    /// Number of suspended screens beneath the active one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Kinds of the suspended screens, bottom first.
    #[must_use]
    pub fn suspended_kinds(&self) -> Vec<ScreenKind> {
        self.stack.iter().map(Screen::kind).collect()
    }

    /// `Some` once the journey has reached its end screen.
    #[must_use]
    pub fn ending(&self) -> Option<Ending> {
        match &self.active {
            Some(Screen::GameOver(screen)) => Some(screen.ending()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.ending().is_some()
    }

    /// Replace the active screen. The suspended stack is untouched.
    pub fn set_screen(&mut self, mut screen: Screen) {
        if let Some(mut old) = self.active.take() {
            old.exit(&mut ScreenCtx::new(&mut self.session, &self.rngs, &self.cfg));
        }
        debug!(target: LOG_TARGET_SCREEN, "set {:?}", screen.kind());
        screen.enter(&mut ScreenCtx::new(&mut self.session, &self.rngs, &self.cfg));
        self.active = Some(screen);
    }

    /// Suspend the active screen as-is and enter `screen` on top of it.
    pub fn push_screen(&mut self, mut screen: Screen) {
        if let Some(old) = self.active.take() {
            self.stack.push(old);
        }
        debug!(
            target: LOG_TARGET_SCREEN,
            "push {:?} at depth {}",
            screen.kind(),
            self.stack.len()
        );
        screen.enter(&mut ScreenCtx::new(&mut self.session, &self.rngs, &self.cfg));
        self.active = Some(screen);
    }

    /// Exit the active screen and resume the one below. No-op on an empty stack.
    pub fn pop_screen(&mut self) {
        let Some(mut below) = self.stack.pop() else {
            return;
        };
        if let Some(mut old) = self.active.take() {
            debug!(target: LOG_TARGET_SCREEN, "pop {:?}", old.kind());
            old.exit(&mut ScreenCtx::new(&mut self.session, &self.rngs, &self.cfg));
        }
        below.resume(&mut ScreenCtx::new(&mut self.session, &self.rngs, &self.cfg));
        self.active = Some(below);
    }

    /// Clear the stack and set `screen` as the only screen.
    pub fn reset_to(&mut self, screen: Screen) {
        let mut ctx = ScreenCtx::new(&mut self.session, &self.rngs, &self.cfg);
        while let Some(mut suspended) = self.stack.pop() {
            suspended.exit(&mut ctx);
        }
        self.set_screen(screen);
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Push(screen) => self.push_screen(screen),
            Transition::Pop => self.pop_screen(),
            Transition::Set(screen) => self.set_screen(screen),
            Transition::Reset(screen) => self.reset_to(screen),
        }
    }

    /// Advance the active screen by `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) {
        self.ticks = self.ticks.saturating_add(1);
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let mut ctx = ScreenCtx::new(&mut self.session, &self.rngs, &self.cfg);
        let transition = active.update(dt, input, &mut ctx);
        self.apply(transition);

        if self.session.party.is_wiped_out() && self.active_kind() != Some(ScreenKind::GameOver) {
            debug!(target: LOG_TARGET_SCREEN, "party lost, ending journey");
            self.reset_to(Screen::GameOver(GameOverScreen::new(Ending::Death)));
        }
    }

    /// Read-only view of the active screen plus the journey snapshot.
    #[must_use]
    pub fn render(&self) -> Option<ScreenView> {
        self.active.as_ref().map(|screen| ScreenView {
            kind: screen.kind(),
            model: screen.render(&self.session),
            journey: self.session.snapshot(),
        })
    }
}
