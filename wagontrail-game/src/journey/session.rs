//! The single owned journey state and its read-only snapshot.

use serde::Serialize;

use crate::calendar::TrailDate;
use crate::disease::Illness;
use crate::journey::event::{JourneyLog, LogKind};
use crate::ledger::{Ledger, Supplies, format_money};
use crate::party::{HealthLabel, Party};
use crate::setup::Profession;
use crate::trail::{Pace, Rations, TrailState};
use crate::weather::Weather;

/// Everything one journey owns: who travels, what they carry, and where they are.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub party: Party,
    pub ledger: Ledger,
    pub trail: TrailState,
    profession: Profession,
    pub log: JourneyLog,
}

impl Session {
    #[must_use]
    pub fn new(
        party: Party,
        ledger: Ledger,
        profession: Profession,
        start: TrailDate,
        total_miles: u32,
    ) -> Self {
        let mut trail = TrailState::new(start);
        trail.total_miles = total_miles;
        trail.health_label = party.health_label();
        Self {
            party,
            ledger,
            trail,
            profession,
            log: JourneyLog::default(),
        }
    }

    #[must_use]
    pub const fn profession(&self) -> Profession {
        self.profession
    }

    /// Journal a line against the current trail day.
    pub fn note(&mut self, kind: LogKind, text: impl Into<String>) {
        self.log.push(self.trail.days_elapsed, kind, text);
    }

    pub fn refresh_health_label(&mut self) {
        self.trail.health_label = self.party.health_label();
    }

    /// Owned copy of everything the presentation layer may show.
    #[must_use]
    pub fn snapshot(&self) -> JourneySnapshot {
        let next = self.trail.next_landmark();
        JourneySnapshot {
            date: self.trail.date.label(),
            days_elapsed: self.trail.days_elapsed,
            weather: self.trail.weather,
            pace: self.trail.pace,
            rations: self.trail.rations,
            health: self.trail.health_label,
            supplies: self.ledger.supplies,
            money_cents: self.ledger.money_cents(),
            money: format_money(self.ledger.money_cents()),
            roster: self
                .party
                .members()
                .iter()
                .map(|m| MemberSnapshot {
                    name: m.name().to_string(),
                    health: m.health(),
                    alive: m.is_alive(),
                    illness: m.illness(),
                })
                .collect(),
            leader: self.party.leader().to_string(),
            miles_traveled: self.trail.miles_traveled(),
            total_miles: self.trail.total_miles,
            next_landmark: next.map(|lm| lm.name.to_string()),
            miles_to_next_landmark: self.trail.miles_to_next_landmark(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberSnapshot {
    pub name: String,
    pub health: f32,
    pub alive: bool,
    pub illness: Option<Illness>,
}

/// Read-only view of a session for rendering and reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneySnapshot {
    pub date: String,
    pub days_elapsed: u32,
    pub weather: Weather,
    pub pace: Pace,
    pub rations: Rations,
    pub health: HealthLabel,
    pub supplies: Supplies,
    pub money_cents: u64,
    pub money: String,
    pub leader: String,
    pub roster: Vec<MemberSnapshot>,
    pub miles_traveled: u32,
    pub total_miles: u32,
    pub next_landmark: Option<String>,
    pub miles_to_next_landmark: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_state() {
        let party = Party::from_names("Ezra", &["Ada", "Bo", "Cy", "Di"]);
        let mut session = Session::new(
            party,
            Ledger::new(12_345),
            Profession::Carpenter,
            TrailDate::new(4, 1, 1848),
            2040,
        );
        session.ledger.supplies.food = 300;
        let snap = session.snapshot();
        assert_eq!(snap.date, "April 1, 1848");
        assert_eq!(snap.money, "$123.45");
        assert_eq!(snap.supplies.food, 300);
        assert_eq!(snap.roster.len(), 4);
        assert_eq!(snap.next_landmark.as_deref(), Some("Kansas River Crossing"));
        assert_eq!(snap.miles_to_next_landmark, Some(102));

        session.ledger.supplies.food = 0;
        assert_eq!(snap.supplies.food, 300);
    }
}
