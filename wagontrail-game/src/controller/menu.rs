//! Trail menu opened from the travel screen.

use serde::Serialize;

use crate::camp::{RestResolver, clamp_rest_days};
use crate::constants::{REST_DAYS_MAX, REST_DAYS_MIN};
use crate::controller::screen::Screen;
use crate::controller::{InputSnapshot, Key, ScreenCtx, Transition};
use crate::hunt::HuntingEncounter;
use crate::journey::{LogKind, Session};
use crate::ledger::Supplies;
use crate::trade::{BarterOffer, roll_barter_offer};
use crate::trail::{Pace, Rations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuOption {
    Continue,
    CheckSupplies,
    ChangePace,
    ChangeRations,
    Rest,
    Trade,
    Hunt,
}

impl MenuOption {
    pub const ALL: [Self; 7] = [
        Self::Continue,
        Self::CheckSupplies,
        Self::ChangePace,
        Self::ChangeRations,
        Self::Rest,
        Self::Trade,
        Self::Hunt,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Continue => "Continue on trail",
            Self::CheckSupplies => "Check supplies",
            Self::ChangePace => "Change pace",
            Self::ChangeRations => "Change food rations",
            Self::Rest => "Stop to rest",
            Self::Trade => "Attempt to trade",
            Self::Hunt => "Hunt for food",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuMode {
    Main,
    Supplies,
    Pace,
    Rations,
    Rest,
    Barter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub mode: MenuMode,
    pub options: Vec<&'static str>,
    pub selected: usize,
    pub rest_days: u8,
    pub pace: Pace,
    pub rations: Rations,
    pub supplies: Supplies,
    pub offer: Option<String>,
    pub message: Option<String>,
}

const fn wrap(selected: usize, count: usize, forward: bool) -> usize {
    if forward {
        (selected + 1) % count
    } else {
        (selected + count - 1) % count
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TravelMenu {
    mode: MenuMode,
    selected: usize,
    rest_days: u8,
    offer: Option<BarterOffer>,
    message: Option<String>,
}

impl Default for TravelMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl TravelMenu {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: MenuMode::Main,
            selected: 0,
            rest_days: REST_DAYS_MIN,
            offer: None,
            message: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> MenuMode {
        self.mode
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub const fn rest_days(&self) -> u8 {
        self.rest_days
    }

    #[must_use]
    pub const fn offer(&self) -> Option<&BarterOffer> {
        self.offer.as_ref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn enter(&mut self) {
        self.mode = MenuMode::Main;
        self.selected = 0;
        self.message = None;
        self.offer = None;
    }

    pub fn resume(&mut self) {
        self.mode = MenuMode::Main;
    }

    fn back_to_main(&mut self) {
        self.mode = MenuMode::Main;
        self.selected = 0;
        self.offer = None;
    }

    fn option_count(&self) -> usize {
        match self.mode {
            MenuMode::Main => MenuOption::ALL.len(),
            MenuMode::Pace => Pace::ALL.len(),
            MenuMode::Rations => Rations::ALL.len(),
            MenuMode::Barter => 2,
            MenuMode::Supplies | MenuMode::Rest => 1,
        }
    }

    pub fn update(&mut self, input: &InputSnapshot, ctx: &mut ScreenCtx<'_>) -> Transition {
        if input.was_pressed(Key::Escape) {
            if self.mode == MenuMode::Main {
                return Transition::Pop;
            }
            if self.mode == MenuMode::Barter {
                self.message = Some("You decline the offer.".to_string());
            }
            self.back_to_main();
            return Transition::None;
        }
        let count = self.option_count();
        if input.was_pressed(Key::Down) {
            self.selected = wrap(self.selected, count, true);
        }
        if input.was_pressed(Key::Up) {
            self.selected = wrap(self.selected, count, false);
        }
        if self.mode == MenuMode::Rest {
            if input.was_pressed(Key::Left) {
                self.rest_days = clamp_rest_days(self.rest_days.saturating_sub(1));
            }
            if input.was_pressed(Key::Right) && self.rest_days < REST_DAYS_MAX {
                self.rest_days += 1;
            }
        }
        if !input.was_pressed(Key::Enter) {
            return Transition::None;
        }
        match self.mode {
            MenuMode::Main => self.select(MenuOption::ALL[self.selected], ctx),
            MenuMode::Supplies => {
                self.back_to_main();
                Transition::None
            }
            MenuMode::Pace => {
                ctx.session.trail.pace = Pace::ALL[self.selected];
                self.back_to_main();
                Transition::None
            }
            MenuMode::Rations => {
                ctx.session.trail.rations = Rations::ALL[self.selected];
                self.back_to_main();
                Transition::None
            }
            MenuMode::Rest => {
                self.mode = MenuMode::Main;
                Transition::Push(Screen::Rest(RestResolver::new(self.rest_days)))
            }
            MenuMode::Barter => {
                self.settle_barter(ctx.session);
                self.back_to_main();
                Transition::None
            }
        }
    }

    /// Act on a main-menu entry.
    pub fn select(&mut self, option: MenuOption, ctx: &mut ScreenCtx<'_>) -> Transition {
        self.message = None;
        match option {
            MenuOption::Continue => return Transition::Pop,
            MenuOption::CheckSupplies => self.mode = MenuMode::Supplies,
            MenuOption::ChangePace => {
                self.mode = MenuMode::Pace;
                self.selected = Pace::ALL
                    .iter()
                    .position(|p| *p == ctx.session.trail.pace)
                    .unwrap_or(0);
            }
            MenuOption::ChangeRations => {
                self.mode = MenuMode::Rations;
                self.selected = Rations::ALL
                    .iter()
                    .position(|r| *r == ctx.session.trail.rations)
                    .unwrap_or(0);
            }
            MenuOption::Rest => {
                self.mode = MenuMode::Rest;
                self.selected = 0;
            }
            MenuOption::Trade => {
                let offer = roll_barter_offer(&ctx.session.ledger.supplies, &mut *ctx.rngs.trade());
                match offer {
                    Some(offer) => {
                        self.mode = MenuMode::Barter;
                        self.selected = 0;
                        self.message = Some(offer.describe());
                        self.offer = Some(offer);
                    }
                    None => self.message = Some("You have nothing to trade.".to_string()),
                }
            }
            MenuOption::Hunt => {
                if ctx.session.ledger.supplies.ammunition > 0 {
                    return Transition::Push(Screen::Hunting(Box::new(HuntingEncounter::new(
                        &ctx.cfg.hunt,
                    ))));
                }
                self.message = Some("You have no ammunition to hunt with.".to_string());
            }
        }
        Transition::None
    }

    fn settle_barter(&mut self, session: &mut Session) {
        let Some(offer) = self.offer.take() else {
            return;
        };
        let text = if self.selected != 0 {
            "You decline the offer.".to_string()
        } else if offer.accept(&mut session.ledger.supplies) {
            let text = format!(
                "Traded {} {} for {} {}.",
                offer.give_qty,
                offer.give.label(),
                offer.receive_qty,
                offer.receive.label()
            );
            session.note(LogKind::Trade, text.clone());
            text
        } else {
            "You no longer have enough to make that trade.".to_string()
        };
        self.message = Some(text);
    }

    #[must_use]
    pub fn render(&self, session: &Session) -> MenuView {
        let options = match self.mode {
            MenuMode::Main => MenuOption::ALL.iter().map(|o| o.label()).collect(),
            MenuMode::Pace => Pace::ALL.iter().map(|p| p.label()).collect(),
            MenuMode::Rations => Rations::ALL.iter().map(|r| r.label()).collect(),
            MenuMode::Barter => vec!["Accept", "Decline"],
            MenuMode::Supplies | MenuMode::Rest => Vec::new(),
        };
        MenuView {
            mode: self.mode,
            options,
            selected: self.selected,
            rest_days: self.rest_days,
            pace: session.trail.pace,
            rations: session.trail.rations,
            supplies: session.ledger.supplies,
            offer: self.offer.map(|offer| offer.describe()),
            message: self.message.clone(),
        }
    }
}
