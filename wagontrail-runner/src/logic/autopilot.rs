//! Turns policy decisions into the key presses a human would make.

use log::debug;
use wagontrail_game::controller::{MenuMode, MenuOption, TravelMenu};
use wagontrail_game::crossings::CrossingMode;
use wagontrail_game::hunt::{Cell, Facing};
use wagontrail_game::trade::TradeView;
use wagontrail_game::{
    CrossingChoice, HuntingEncounter, InputSnapshot, Key, Pace, RiverCrossingResolver, Screen,
    ScreenKind, StateController, SupplyKind, TradePost,
};

use super::policy::{Errand, PilotPolicy};

/// Purchases per fort visit before the pilot moves on.
const FORT_PURCHASE_LIMIT: u32 = 6;
/// Failed confirmations on a crossing before falling back to fording.
const CROSSING_RETRIES: u32 = 2;

pub struct Autopilot {
    policy: Box<dyn PilotPolicy>,
    errand: Option<Errand>,
    last_errand_day: Option<u32>,
    screen: Option<ScreenKind>,
    crossing_pick: Option<CrossingChoice>,
    crossing_attempts: u32,
    purchases: u32,
    errands_run: u32,
}

impl Autopilot {
    #[must_use]
    pub fn new(policy: Box<dyn PilotPolicy>) -> Self {
        Self {
            policy,
            errand: None,
            last_errand_day: None,
            screen: None,
            crossing_pick: None,
            crossing_attempts: 0,
            purchases: 0,
            errands_run: 0,
        }
    }

    #[must_use]
    pub const fn errands_run(&self) -> u32 {
        self.errands_run
    }

    /// Input for the next tick, read from the active screen.
    pub fn next_input(&mut self, controller: &StateController) -> InputSnapshot {
        let kind = controller.active_kind();
        if kind != self.screen {
            self.screen = kind;
            self.crossing_pick = None;
            self.crossing_attempts = 0;
            self.purchases = 0;
        }
        match controller.active() {
            Some(Screen::Travel(_)) => self.travel(controller),
            Some(Screen::TravelMenu(menu)) => self.menu(menu, controller),
            Some(Screen::RiverCrossing(crossing)) => self.crossing(crossing, controller),
            Some(Screen::Hunting(hunt)) => aim(hunt, controller.config().hunt.bullet_range),
            Some(Screen::TradePost(post)) => self.trade(post, controller),
            Some(Screen::Rest(rest)) if rest.is_complete() => InputSnapshot::pressed(Key::Enter),
            Some(Screen::GameOver(_)) => InputSnapshot::pressed(Key::Enter),
            _ => InputSnapshot::idle(),
        }
    }

    fn travel(&mut self, controller: &StateController) -> InputSnapshot {
        let session = controller.session();
        let day = session.trail.days_elapsed;
        if self.last_errand_day == Some(day) {
            return InputSnapshot::idle();
        }
        let Some(errand) = self.policy.errand(session) else {
            return InputSnapshot::idle();
        };
        debug!("day {day}: {} runs {errand:?}", self.policy.name());
        self.errand = Some(errand);
        self.last_errand_day = Some(day);
        self.errands_run += 1;
        InputSnapshot::pressed(Key::Enter)
    }

    fn menu(&mut self, menu: &TravelMenu, controller: &StateController) -> InputSnapshot {
        let selected = menu.selected();
        match (self.errand, menu.mode()) {
            (Some(Errand::SetPace(_)), MenuMode::Main) => {
                steer(selected, option_index(MenuOption::ChangePace))
            }
            (Some(Errand::SetPace(pace)), MenuMode::Pace) => {
                let target = Pace::ALL.iter().position(|p| *p == pace).unwrap_or(0);
                self.finish_on(selected, target)
            }
            (Some(Errand::Rest(_)), MenuMode::Main) => {
                steer(selected, option_index(MenuOption::Rest))
            }
            (Some(Errand::Rest(days)), MenuMode::Rest) => {
                let current = menu.rest_days();
                if current < days {
                    InputSnapshot::pressed(Key::Right)
                } else if current > days {
                    InputSnapshot::pressed(Key::Left)
                } else {
                    self.errand = None;
                    InputSnapshot::pressed(Key::Enter)
                }
            }
            (Some(Errand::Hunt), MenuMode::Main) => {
                self.finish_on(selected, option_index(MenuOption::Hunt))
            }
            (Some(Errand::Barter), MenuMode::Main) => {
                self.finish_on(selected, option_index(MenuOption::Trade))
            }
            (None, MenuMode::Barter) => match menu.offer() {
                Some(offer) if self.policy.accept_barter(controller.session(), offer) => {
                    steer(selected, 0)
                }
                _ => InputSnapshot::pressed(Key::Escape),
            },
            _ => {
                self.errand = None;
                InputSnapshot::pressed(Key::Escape)
            }
        }
    }

    fn finish_on(&mut self, selected: usize, target: usize) -> InputSnapshot {
        if selected == target {
            self.errand = None;
        }
        steer(selected, target)
    }

    fn crossing(
        &mut self,
        crossing: &RiverCrossingResolver,
        controller: &StateController,
    ) -> InputSnapshot {
        match crossing.mode() {
            CrossingMode::Crossing => InputSnapshot::idle(),
            CrossingMode::Result => InputSnapshot::pressed(Key::Enter),
            CrossingMode::Choice => {
                let pick = match self.crossing_pick {
                    Some(pick) if self.crossing_attempts < CROSSING_RETRIES => pick,
                    Some(_) => CrossingChoice::Ford,
                    None => {
                        let pick = self.policy.crossing(controller.session(), crossing.depth());
                        debug!(
                            "{} chooses {} at {:.1} ft",
                            self.policy.name(),
                            pick.label(),
                            crossing.depth()
                        );
                        self.crossing_pick = Some(pick);
                        pick
                    }
                };
                let target = CrossingChoice::ALL.iter().position(|c| *c == pick).unwrap_or(0);
                let selected = crossing.render().selected;
                if selected == target {
                    self.crossing_attempts += 1;
                }
                steer(selected, target)
            }
        }
    }

    fn trade(&mut self, post: &TradePost, controller: &StateController) -> InputSnapshot {
        let session = controller.session();
        let view = post.render(&session.ledger.supplies, session.ledger.money_cents());
        let wanted = if self.purchases < FORT_PURCHASE_LIMIT {
            self.policy.restock(session).filter(|kind| {
                post.prices()
                    .is_some_and(|prices| session.ledger.can_afford(prices.buy_cents(*kind)))
            })
        } else {
            None
        };
        match (wanted, view.view) {
            (Some(_), TradeView::Main) => steer(view.selected, 0),
            (Some(kind), TradeView::Buy) => {
                let target = supply_index(kind);
                if view.selected == target {
                    self.purchases += 1;
                }
                steer(view.selected, target)
            }
            _ => InputSnapshot::pressed(Key::Escape),
        }
    }
}

fn option_index(option: MenuOption) -> usize {
    MenuOption::ALL.iter().position(|o| *o == option).unwrap_or(0)
}

fn supply_index(kind: SupplyKind) -> usize {
    SupplyKind::ALL.iter().position(|k| *k == kind).unwrap_or(0)
}

/// One step of list navigation toward `target`, confirming once there.
fn steer(selected: usize, target: usize) -> InputSnapshot {
    match selected.cmp(&target) {
        std::cmp::Ordering::Less => InputSnapshot::pressed(Key::Down),
        std::cmp::Ordering::Greater => InputSnapshot::pressed(Key::Up),
        std::cmp::Ordering::Equal => InputSnapshot::pressed(Key::Enter),
    }
}

const fn toward(dx: i16, dy: i16) -> Key {
    if dx < 0 {
        Key::Left
    } else if dx > 0 {
        Key::Right
    } else if dy < 0 {
        Key::Up
    } else {
        Key::Down
    }
}

const fn facing_key(facing: Facing) -> Key {
    match facing {
        Facing::Up => Key::Up,
        Facing::Down => Key::Down,
        Facing::Left => Key::Left,
        Facing::Right => Key::Right,
    }
}

fn distance(a: Cell, b: Cell) -> i16 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Line up with the nearest animal and fire along the row or column.
fn aim(hunt: &HuntingEncounter, range: u8) -> InputSnapshot {
    if hunt.is_complete() {
        return InputSnapshot::pressed(Key::Enter);
    }
    let player = hunt.player();
    let Some(target) = hunt
        .animals()
        .iter()
        .map(|animal| animal.cell)
        .min_by_key(|cell| distance(player, *cell))
    else {
        return InputSnapshot::idle();
    };
    let dx = target.x - player.x;
    let dy = target.y - player.y;
    let aligned = (dx == 0) != (dy == 0);
    if aligned && (dx.abs() + dy.abs()) <= i16::from(range) {
        let wanted = toward(dx, dy);
        if facing_key(hunt.facing()) == wanted && hunt.rounds() > 0 {
            return InputSnapshot::pressed(Key::Space);
        }
        return InputSnapshot::idle().hold(wanted);
    }
    // Close the shorter gap first so a shot lines up sooner.
    let key = if dx != 0 && (dy == 0 || dx.abs() <= dy.abs()) {
        toward(dx, 0)
    } else {
        toward(0, dy)
    };
    InputSnapshot::idle().hold(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steer_walks_lists_then_confirms() {
        assert!(steer(0, 3).was_pressed(Key::Down));
        assert!(steer(5, 2).was_pressed(Key::Up));
        assert!(steer(4, 4).was_pressed(Key::Enter));
    }

    #[test]
    fn toward_prefers_the_horizontal_axis() {
        assert_eq!(toward(-2, 0), Key::Left);
        assert_eq!(toward(3, -1), Key::Right);
        assert_eq!(toward(0, -4), Key::Up);
        assert_eq!(toward(0, 1), Key::Down);
    }

    #[test]
    fn menu_indices_follow_the_option_table() {
        assert_eq!(option_index(MenuOption::Continue), 0);
        assert_eq!(option_index(MenuOption::Hunt), MenuOption::ALL.len() - 1);
        assert_eq!(supply_index(SupplyKind::Oxen), 0);
    }
}
