//! Fort trading posts and trailside barter.

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::constants::LOG_TARGET_ENCOUNTER;
use crate::controller::{InputSnapshot, Key, ScreenCtx, Transition};
use crate::journey::LogKind;
use crate::ledger::{Ledger, Supplies, SupplyKind, format_money};
use crate::numbers::{floor_f64_to_u64, u64_to_f64};
use crate::store::find_item;
use crate::trail::landmark;

/// Pounds of food moved per buy or sell.
pub const FOOD_LOT_LBS: u32 = 50;

/// Per-unit price band in cents, upper bound exclusive.
#[must_use]
pub const fn price_band(kind: SupplyKind) -> (u64, u64) {
    match kind {
        SupplyKind::Oxen => (2000, 4000),
        SupplyKind::Food => (15, 35),
        SupplyKind::Clothing => (800, 1500),
        SupplyKind::Ammunition => (150, 350),
        SupplyKind::Wheels | SupplyKind::Axles | SupplyKind::Tongues => (800, 1500),
    }
}

/// Units moved per purchase.
#[must_use]
pub const fn buy_lot(kind: SupplyKind) -> u32 {
    match kind {
        SupplyKind::Food => FOOD_LOT_LBS,
        _ => 1,
    }
}

/// Per-unit prices fixed for one visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FortPrices {
    cents: [u64; 7],
}

impl FortPrices {
    pub fn roll<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut cents = [0; 7];
        for (slot, kind) in cents.iter_mut().zip(SupplyKind::ALL) {
            let (low, high) = price_band(kind);
            *slot = rng.gen_range(low..high);
        }
        Self { cents }
    }

    #[must_use]
    pub fn unit_cents(&self, kind: SupplyKind) -> u64 {
        SupplyKind::ALL
            .iter()
            .position(|k| *k == kind)
            .map_or(0, |idx| self.cents[idx])
    }

    #[must_use]
    pub fn buy_cents(&self, kind: SupplyKind) -> u64 {
        self.unit_cents(kind)
            .saturating_mul(u64::from(buy_lot(kind)))
    }

    /// Half the buying price for `amount` units, rounded down.
    #[must_use]
    pub fn sell_cents(&self, kind: SupplyKind, amount: u32) -> u64 {
        self.unit_cents(kind).saturating_mul(u64::from(amount)) / 2
    }
}

/// Units a sale would move given current holdings.
#[must_use]
pub fn sell_lot(kind: SupplyKind, held: u32) -> u32 {
    match kind {
        SupplyKind::Food => held.min(FOOD_LOT_LBS),
        _ => held.min(1),
    }
}

/// Narrative result of one buy or sell attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeReceipt {
    pub accepted: bool,
    pub message: String,
}

pub fn buy(ledger: &mut Ledger, prices: &FortPrices, kind: SupplyKind) -> TradeReceipt {
    let amount = buy_lot(kind);
    let cost = prices.buy_cents(kind);
    if ledger.purchase(kind, amount, cost) {
        TradeReceipt {
            accepted: true,
            message: format!(
                "Bought {amount} {} for {}.",
                kind.unit(),
                format_money(cost)
            ),
        }
    } else {
        TradeReceipt {
            accepted: false,
            message: format!("You cannot afford {}.", kind.label()),
        }
    }
}

pub fn sell(ledger: &mut Ledger, prices: &FortPrices, kind: SupplyKind) -> TradeReceipt {
    let amount = sell_lot(kind, ledger.supplies.get(kind));
    let earned = prices.sell_cents(kind, amount);
    if ledger.sell(kind, amount, earned) {
        TradeReceipt {
            accepted: true,
            message: format!(
                "Sold {amount} {} for {}.",
                kind.unit(),
                format_money(earned)
            ),
        }
    } else {
        TradeReceipt {
            accepted: false,
            message: format!("You have no {} to sell.", kind.label()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeView {
    Main,
    Buy,
    Sell,
}

const MAIN_OPTIONS: [&str; 3] = ["Buy Supplies", "Sell Supplies", "Leave"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeLine {
    pub kind: SupplyKind,
    pub lot: u32,
    pub cents: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradePostView {
    pub fort: &'static str,
    pub view: TradeView,
    pub selected: usize,
    pub options: Vec<TradeLine>,
    pub money: String,
    pub message: Option<String>,
}

/// Screen for a fort visit. Prices are rolled once on entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePost {
    landmark: usize,
    prices: Option<FortPrices>,
    view: TradeView,
    selected: usize,
    message: Option<String>,
}

impl TradePost {
    #[must_use]
    pub const fn new(landmark: usize) -> Self {
        Self {
            landmark,
            prices: None,
            view: TradeView::Main,
            selected: 0,
            message: None,
        }
    }

    #[must_use]
    pub const fn view(&self) -> TradeView {
        self.view
    }

    #[must_use]
    pub const fn prices(&self) -> Option<&FortPrices> {
        self.prices.as_ref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn fort_name(&self) -> &'static str {
        landmark(self.landmark).map_or("Trading Post", |lm| lm.name)
    }

    pub fn enter(&mut self, ctx: &mut ScreenCtx<'_>) {
        self.prices = Some(FortPrices::roll(&mut *ctx.rngs.trade()));
        self.view = TradeView::Main;
        self.selected = 0;
        self.message = None;
        ctx.session
            .note(LogKind::Trade, format!("Arrived at the {} trading post.", self.fort_name()));
        info!(target: LOG_TARGET_ENCOUNTER, "trading post opened at {}", self.fort_name());
    }

    fn sellable(supplies: &Supplies) -> Vec<SupplyKind> {
        SupplyKind::ALL
            .into_iter()
            .filter(|kind| supplies.get(*kind) > 0)
            .collect()
    }

    fn option_count(&self, supplies: &Supplies) -> usize {
        match self.view {
            TradeView::Main => MAIN_OPTIONS.len(),
            TradeView::Buy => SupplyKind::ALL.len() + 1,
            TradeView::Sell => Self::sellable(supplies).len() + 1,
        }
    }

    fn back_to_main(&mut self) {
        self.view = TradeView::Main;
        self.selected = 0;
    }

    pub fn update(&mut self, _dt: f32, input: &InputSnapshot, ctx: &mut ScreenCtx<'_>) -> Transition {
        let Some(prices) = self.prices else {
            return Transition::Pop;
        };
        if input.was_pressed(Key::Escape) {
            if self.view == TradeView::Main {
                return Transition::Pop;
            }
            self.back_to_main();
            return Transition::None;
        }
        let count = self.option_count(&ctx.session.ledger.supplies);
        if input.was_pressed(Key::Up) {
            self.selected = self.selected.saturating_sub(1);
        }
        if input.was_pressed(Key::Down) {
            self.selected = (self.selected + 1).min(count - 1);
        }
        if !input.confirm() {
            return Transition::None;
        }
        match self.view {
            TradeView::Main => match self.selected {
                0 => {
                    self.view = TradeView::Buy;
                    self.selected = 0;
                }
                1 => {
                    self.view = TradeView::Sell;
                    self.selected = 0;
                }
                _ => return Transition::Pop,
            },
            TradeView::Buy => match SupplyKind::ALL.get(self.selected) {
                Some(kind) => {
                    let receipt = buy(&mut ctx.session.ledger, &prices, *kind);
                    self.record(receipt, ctx);
                }
                None => self.back_to_main(),
            },
            TradeView::Sell => {
                let sellable = Self::sellable(&ctx.session.ledger.supplies);
                match sellable.get(self.selected) {
                    Some(kind) => {
                        let receipt = sell(&mut ctx.session.ledger, &prices, *kind);
                        self.record(receipt, ctx);
                        let remaining = Self::sellable(&ctx.session.ledger.supplies).len();
                        self.selected = self.selected.min(remaining);
                    }
                    None => self.back_to_main(),
                }
            }
        }
        Transition::None
    }

    fn record(&mut self, receipt: TradeReceipt, ctx: &mut ScreenCtx<'_>) {
        debug!(target: LOG_TARGET_ENCOUNTER, "{}", receipt.message);
        if receipt.accepted {
            ctx.session.note(LogKind::Trade, receipt.message.clone());
        }
        self.message = Some(receipt.message);
    }

    #[must_use]
    pub fn render(&self, supplies: &Supplies, money_cents: u64) -> TradePostView {
        let options = match (self.view, self.prices) {
            (TradeView::Buy, Some(prices)) => SupplyKind::ALL
                .into_iter()
                .map(|kind| TradeLine {
                    kind,
                    lot: buy_lot(kind),
                    cents: prices.buy_cents(kind),
                })
                .collect(),
            (TradeView::Sell, Some(prices)) => Self::sellable(supplies)
                .into_iter()
                .map(|kind| {
                    let lot = sell_lot(kind, supplies.get(kind));
                    TradeLine {
                        kind,
                        lot,
                        cents: prices.sell_cents(kind, lot),
                    }
                })
                .collect(),
            _ => Vec::new(),
        };
        TradePostView {
            fort: self.fort_name(),
            view: self.view,
            selected: self.selected,
            options,
            money: format_money(money_cents),
            message: self.message.clone(),
        }
    }
}

/// A stranger's offer: hand over one good for another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarterOffer {
    pub give: SupplyKind,
    pub give_qty: u32,
    pub receive: SupplyKind,
    pub receive_qty: u32,
}

impl BarterOffer {
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "A traveler offers {} {} for {} of your {} {}.",
            self.receive_qty,
            self.receive.label(),
            self.give_qty,
            self.give.label(),
            self.give.unit()
        )
    }

    /// Apply the swap if the goods are still on hand.
    pub fn accept(&self, supplies: &mut Supplies) -> bool {
        if !supplies.try_remove(self.give, self.give_qty) {
            return false;
        }
        supplies.add(self.receive, self.receive_qty);
        true
    }
}

fn store_value(kind: SupplyKind) -> u64 {
    find_item(kind).map_or(1, |item| item.price_cents.max(1))
}

/// Roll a trailside offer against what the party holds. `None` when the wagon is empty.
pub fn roll_barter_offer<R>(supplies: &Supplies, rng: &mut R) -> Option<BarterOffer>
where
    R: Rng + ?Sized,
{
    let held: Vec<SupplyKind> = SupplyKind::ALL
        .into_iter()
        .filter(|kind| supplies.get(*kind) >= buy_lot(*kind))
        .collect();
    if held.is_empty() {
        return None;
    }
    let give = held[rng.gen_range(0..held.len())];
    let give_qty = buy_lot(give);
    let value = u64_to_f64(store_value(give).saturating_mul(u64::from(give_qty)));
    let worth = value * rng.gen_range(0.6..1.3);
    // Only goods that fit whole into the offered worth; a unit never rounds up.
    let others: Vec<SupplyKind> = SupplyKind::ALL
        .into_iter()
        .filter(|kind| *kind != give && u64_to_f64(store_value(*kind)) <= worth)
        .collect();
    if others.is_empty() {
        return None;
    }
    let receive = others[rng.gen_range(0..others.len())];
    let receive_units = floor_f64_to_u64(worth / u64_to_f64(store_value(receive)));
    let receive_qty = u32::try_from(receive_units).unwrap_or(u32::MAX);
    if receive_qty == 0 {
        return None;
    }
    Some(BarterOffer {
        give,
        give_qty,
        receive,
        receive_qty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::TrailDate;
    use crate::journey::{JourneyConfig, RngBundle, Session};
    use crate::party::Party;
    use crate::setup::Profession;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn session(cents: u64) -> Session {
        let party = Party::from_names("Ezra", &["Ada", "Bo", "Cy", "Di"]);
        let mut ledger = Ledger::new(cents);
        ledger.supplies.food = 120;
        ledger.supplies.clothing = 2;
        Session::new(party, ledger, Profession::Banker, TrailDate::default(), 2040)
    }

    #[test]
    fn rolled_prices_stay_in_band() {
        let mut rng = SmallRng::seed_from_u64(21);
        for _ in 0..200 {
            let prices = FortPrices::roll(&mut rng);
            for kind in SupplyKind::ALL {
                let (low, high) = price_band(kind);
                let cents = prices.unit_cents(kind);
                assert!(cents >= low && cents < high);
            }
        }
    }

    #[test]
    fn food_moves_in_fifty_pound_lots() {
        let prices = FortPrices {
            cents: [3000, 20, 1000, 200, 1000, 1000, 1000],
        };
        let mut ledger = Ledger::new(5000);
        let receipt = buy(&mut ledger, &prices, SupplyKind::Food);
        assert!(receipt.accepted);
        assert_eq!(ledger.supplies.food, 50);
        assert_eq!(ledger.money_cents(), 4000);

        ledger.supplies.food = 30;
        let receipt = sell(&mut ledger, &prices, SupplyKind::Food);
        assert!(receipt.accepted);
        assert_eq!(ledger.supplies.food, 0);
        assert_eq!(ledger.money_cents(), 4300);
    }

    #[test]
    fn unaffordable_and_empty_trades_are_refused() {
        let prices = FortPrices {
            cents: [3000, 20, 1000, 200, 1000, 1000, 1000],
        };
        let mut ledger = Ledger::new(100);
        assert!(!buy(&mut ledger, &prices, SupplyKind::Oxen).accepted);
        assert!(!sell(&mut ledger, &prices, SupplyKind::Wheels).accepted);
        assert_eq!(ledger.money_cents(), 100);
        assert_eq!(prices.sell_cents(SupplyKind::Oxen, 1), 1500);
    }

    #[test]
    fn menu_navigation_buys_and_leaves() {
        let mut s = session(100_000);
        let rngs = RngBundle::from_user_seed(77);
        let cfg = JourneyConfig::default();
        let mut ctx = ScreenCtx::new(&mut s, &rngs, &cfg);
        let mut post = TradePost::new(2);
        post.enter(&mut ctx);
        post.update(0.0, &InputSnapshot::pressed(Key::Enter), &mut ctx);
        assert_eq!(post.view(), TradeView::Buy);
        post.update(0.0, &InputSnapshot::pressed(Key::Enter), &mut ctx);
        assert_eq!(ctx.session.ledger.supplies.oxen, 1);
        post.update(0.0, &InputSnapshot::pressed(Key::Escape), &mut ctx);
        assert_eq!(post.view(), TradeView::Main);
        assert_eq!(
            post.update(0.0, &InputSnapshot::pressed(Key::Escape), &mut ctx),
            Transition::Pop
        );
    }

    #[test]
    fn sell_view_lists_only_held_goods() {
        let mut s = session(0);
        let rngs = RngBundle::from_user_seed(78);
        let cfg = JourneyConfig::default();
        let mut ctx = ScreenCtx::new(&mut s, &rngs, &cfg);
        let mut post = TradePost::new(2);
        post.enter(&mut ctx);
        post.update(0.0, &InputSnapshot::pressed(Key::Down), &mut ctx);
        post.update(0.0, &InputSnapshot::pressed(Key::Space), &mut ctx);
        assert_eq!(post.view(), TradeView::Sell);
        let view = post.render(&ctx.session.ledger.supplies, ctx.session.ledger.money_cents());
        let kinds: Vec<SupplyKind> = view.options.iter().map(|line| line.kind).collect();
        assert_eq!(kinds, vec![SupplyKind::Food, SupplyKind::Clothing]);
        assert_eq!(view.options[0].lot, 50);
        post.update(0.0, &InputSnapshot::pressed(Key::Enter), &mut ctx);
        assert_eq!(ctx.session.ledger.supplies.food, 70);
        assert!(ctx.session.ledger.money_cents() > 0);
    }

    #[test]
    fn barter_offers_swap_held_goods() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut supplies = Supplies {
            food: 200,
            ammunition: 3,
            ..Supplies::default()
        };
        for _ in 0..50 {
            let offer = roll_barter_offer(&supplies, &mut rng).expect("offer");
            assert_ne!(offer.give, offer.receive);
            assert!(offer.receive_qty >= 1);
            let before = supplies.get(offer.give);
            if offer.accept(&mut supplies) {
                assert_eq!(supplies.get(offer.give), before - offer.give_qty);
            }
        }
        assert_eq!(roll_barter_offer(&Supplies::default(), &mut rng), None);
    }

    #[test]
    fn barter_never_pays_more_than_the_fairness_ceiling() {
        for seed in 0..40 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let supplies = Supplies {
                food: 300,
                ammunition: 10,
                clothing: 2,
                oxen: 2,
                ..Supplies::default()
            };
            for _ in 0..50 {
                let Some(offer) = roll_barter_offer(&supplies, &mut rng) else {
                    continue;
                };
                let paid = store_value(offer.receive) * u64::from(offer.receive_qty);
                let given = store_value(offer.give) * u64::from(offer.give_qty);
                assert!(
                    paid * 10 <= given * 13,
                    "seed {seed}: {offer:?} pays {paid}c for {given}c"
                );
            }
        }
    }

    #[test]
    fn ammunition_never_buys_an_ox() {
        let mut rng = SmallRng::seed_from_u64(17);
        let mut supplies = Supplies {
            ammunition: 10,
            ..Supplies::default()
        };
        for _ in 0..200 {
            let Some(offer) = roll_barter_offer(&supplies, &mut rng) else {
                continue;
            };
            if offer.receive == SupplyKind::Oxen {
                offer.accept(&mut supplies);
            }
        }
        assert_eq!(supplies.oxen, 0);
    }
}
