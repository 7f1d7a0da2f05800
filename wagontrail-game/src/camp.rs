//! Resting in camp: days pass without travel while the party heals.

use std::collections::VecDeque;

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::constants::{
    HEALTH_MAX, LOG_TARGET_ENCOUNTER, REST_DAYS_MAX, REST_DAYS_MIN, REST_HEAL_PER_DAY,
    REST_LOG_CAPACITY,
};
use crate::controller::{InputSnapshot, ScreenCtx, Transition};
use crate::disease::{Illness, rest_recovery_chance, roll_percent};
use crate::journey::{LogKind, Session};
use crate::ledger::SupplyKind;
use crate::numbers::round_f32_to_u32;

/// Clamp a requested rest length into the allowed range.
#[must_use]
pub fn clamp_rest_days(days: u8) -> u8 {
    days.clamp(REST_DAYS_MIN, REST_DAYS_MAX)
}

/// What one day of rest did to the party.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RestDayReport {
    pub food_eaten: u32,
    pub ran_out: bool,
    pub gains: Vec<(String, f32)>,
    pub recovered: Vec<(String, Illness)>,
}

/// Advance one calendar day in camp: eat, heal, and roll illness recovery.
pub fn rest_one_day<R>(session: &mut Session, rng: &mut R) -> RestDayReport
where
    R: Rng + ?Sized,
{
    session.trail.date.advance();
    session.trail.days_elapsed = session.trail.days_elapsed.saturating_add(1);

    let needed = session
        .trail
        .rations
        .food_per_person()
        .saturating_mul(session.party.alive_count());
    let food_eaten = session.ledger.supplies.remove(SupplyKind::Food, needed);
    let mut report = RestDayReport {
        food_eaten,
        ran_out: food_eaten < needed,
        ..RestDayReport::default()
    };

    for member in session.party.members_mut() {
        if !member.is_alive() {
            continue;
        }
        let before = member.health();
        member.apply_health_delta(REST_HEAL_PER_DAY.min(HEALTH_MAX - before));
        let gained = member.health() - before;
        if gained > 0.0 {
            report.gains.push((member.name().to_string(), gained));
        }
        if member.is_ill() {
            let days = member.note_illness_day();
            if roll_percent(rng, rest_recovery_chance(days))
                && let Some(illness) = member.recover()
            {
                report.recovered.push((member.name().to_string(), illness));
            }
        }
    }
    for (name, illness) in &report.recovered {
        session.note(
            LogKind::Recovery,
            format!("{name} has recovered from {}.", illness.label()),
        );
    }
    session.refresh_health_label();
    report
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestLine {
    pub day: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestView {
    pub total_days: u8,
    pub days_remaining: u8,
    pub day_progress: f32,
    pub lines: Vec<RestLine>,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestResolver {
    total_days: u8,
    days_remaining: u8,
    clock: f32,
    day_length: f32,
    lines: VecDeque<RestLine>,
}

impl RestResolver {
    #[must_use]
    pub fn new(days: u8) -> Self {
        let days = clamp_rest_days(days);
        Self {
            total_days: days,
            days_remaining: days,
            clock: 0.0,
            day_length: 0.0,
            lines: VecDeque::with_capacity(REST_LOG_CAPACITY),
        }
    }

    #[must_use]
    pub const fn total_days(&self) -> u8 {
        self.total_days
    }

    #[must_use]
    pub const fn days_remaining(&self) -> u8 {
        self.days_remaining
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.days_remaining == 0
    }

    pub fn lines(&self) -> impl Iterator<Item = &RestLine> {
        self.lines.iter()
    }

    fn push_line(&mut self, text: impl Into<String>) {
        if self.lines.len() == REST_LOG_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(RestLine {
            day: self.total_days - self.days_remaining + 1,
            text: text.into(),
        });
    }

    pub fn enter(&mut self, ctx: &mut ScreenCtx<'_>) {
        self.day_length = ctx.cfg.rest_day_length_secs;
        self.days_remaining = self.total_days;
        self.clock = 0.0;
        self.lines.clear();
        let unit = if self.total_days == 1 { "day" } else { "days" };
        let text = format!("Resting for {} {unit}...", self.total_days);
        ctx.session.note(LogKind::Rest, text.clone());
        self.push_line(text);
        info!(target: LOG_TARGET_ENCOUNTER, "resting for {} days", self.total_days);
    }

    pub fn update(&mut self, dt: f32, input: &InputSnapshot, ctx: &mut ScreenCtx<'_>) -> Transition {
        if self.is_complete() {
            return if input.confirm() {
                Transition::Pop
            } else {
                Transition::None
            };
        }
        self.clock += dt.max(0.0);
        if self.clock >= self.day_length {
            self.clock = 0.0;
            self.rest_day(ctx);
        }
        Transition::None
    }

    fn rest_day(&mut self, ctx: &mut ScreenCtx<'_>) {
        let report = rest_one_day(ctx.session, &mut *ctx.rngs.health());
        debug!(
            target: LOG_TARGET_ENCOUNTER,
            "rest day ate {} lbs, {} recovered",
            report.food_eaten,
            report.recovered.len()
        );
        if report.ran_out {
            self.push_line("Out of food during rest!");
        }
        for (name, illness) in &report.recovered {
            self.push_line(format!("{name} recovered from {}!", illness.label()));
        }
        if !report.gains.is_empty() {
            let gains = report
                .gains
                .iter()
                .map(|(name, gain)| format!("{name} +{}%", round_f32_to_u32(*gain)))
                .collect::<Vec<_>>()
                .join(", ");
            self.push_line(format!("Health recovered: {gains}"));
        }
        if self.days_remaining == 1 {
            self.push_line("Rest complete!");
            ctx.session.note(LogKind::Rest, "Rest complete!");
        }
        self.days_remaining -= 1;
    }

    #[must_use]
    pub fn render(&self) -> RestView {
        RestView {
            total_days: self.total_days,
            days_remaining: self.days_remaining,
            day_progress: if self.day_length > 0.0 {
                (self.clock / self.day_length).clamp(0.0, 1.0)
            } else {
                0.0
            },
            lines: self.lines.iter().cloned().collect(),
            complete: self.is_complete(),
        }
    }
}
