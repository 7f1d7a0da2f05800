//! Party roster and the health invariants of each traveler.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{
    HEALTH_LABEL_FAIR, HEALTH_LABEL_GOOD, HEALTH_LABEL_POOR, HEALTH_MAX, HEALTH_MIN,
};
use crate::disease::Illness;
use crate::numbers::u32_to_f32;

/// Inline storage for per-member index lists.
pub type MemberIndices = SmallVec<[usize; 8]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLabel {
    Good,
    Fair,
    Poor,
    VeryPoor,
    Dead,
}

impl HealthLabel {
    #[must_use]
    pub fn from_average(average: Option<f32>) -> Self {
        match average {
            None => Self::Dead,
            Some(avg) if avg >= HEALTH_LABEL_GOOD => Self::Good,
            Some(avg) if avg >= HEALTH_LABEL_FAIR => Self::Fair,
            Some(avg) if avg >= HEALTH_LABEL_POOR => Self::Poor,
            Some(_) => Self::VeryPoor,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
            Self::Dead => "Dead",
        }
    }
}

/// A single traveler. Health is kept in `[0, 100]`; death is permanent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMember {
    name: String,
    health: f32,
    alive: bool,
    illness: Option<Illness>,
    illness_days: u16,
}

impl PartyMember {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health: HEALTH_MAX,
            alive: true,
            illness: None,
            illness_days: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn health(&self) -> f32 {
        self.health
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub const fn illness(&self) -> Option<Illness> {
        self.illness
    }

    #[must_use]
    pub const fn illness_days(&self) -> u16 {
        self.illness_days
    }

    #[must_use]
    pub const fn is_ill(&self) -> bool {
        self.illness.is_some()
    }

    /// Alive and free of illness.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.alive && self.illness.is_none()
    }

    /// Apply a health change, clamp it, and mark death.
    ///
    /// Returns `true` only on the call that kills the member. Dead members
    /// ignore further changes.
    pub fn apply_health_delta(&mut self, delta: f32) -> bool {
        if !self.alive || !delta.is_finite() {
            return false;
        }
        self.health = (self.health + delta).clamp(HEALTH_MIN, HEALTH_MAX);
        if self.health <= HEALTH_MIN {
            self.health = HEALTH_MIN;
            self.alive = false;
            return true;
        }
        false
    }

    /// Strike with an illness, applying its onset damage. Returns `true` if it killed.
    pub fn contract(&mut self, illness: Illness) -> bool {
        if !self.alive {
            return false;
        }
        self.illness = Some(illness);
        self.illness_days = 0;
        self.apply_health_delta(-illness.onset_damage())
    }

    /// Count another day of illness, returning the new total.
    pub const fn note_illness_day(&mut self) -> u16 {
        if self.illness.is_some() {
            self.illness_days = self.illness_days.saturating_add(1);
        }
        self.illness_days
    }

    /// Clear the current illness, returning what it was.
    pub const fn recover(&mut self) -> Option<Illness> {
        let cured = self.illness.take();
        self.illness_days = 0;
        cured
    }
}

/// Leader plus the traveling members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    leader: String,
    members: Vec<PartyMember>,
}

impl Party {
    #[must_use]
    pub fn from_names<S: AsRef<str>>(leader: &str, names: &[S]) -> Self {
        Self {
            leader: leader.trim().to_string(),
            members: names
                .iter()
                .map(|name| PartyMember::new(name.as_ref().trim()))
                .collect(),
        }
    }

    #[must_use]
    pub fn leader(&self) -> &str {
        &self.leader
    }

    #[must_use]
    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    /// Mutable view of the roster; members can change but not be added or removed.
    pub fn members_mut(&mut self) -> &mut [PartyMember] {
        &mut self.members
    }

    pub fn member_mut(&mut self, idx: usize) -> Option<&mut PartyMember> {
        self.members.get_mut(idx)
    }

    #[must_use]
    pub fn alive_count(&self) -> u32 {
        let count = self.members.iter().filter(|m| m.is_alive()).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_wiped_out(&self) -> bool {
        self.members.iter().all(|m| !m.is_alive())
    }

    #[must_use]
    pub fn alive_indices(&self) -> MemberIndices {
        self.indices_where(PartyMember::is_alive)
    }

    /// Members who are alive and not already sick.
    #[must_use]
    pub fn healthy_indices(&self) -> MemberIndices {
        self.indices_where(PartyMember::is_healthy)
    }

    fn indices_where(&self, pred: impl Fn(&PartyMember) -> bool) -> MemberIndices {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, m)| pred(m))
            .map(|(idx, _)| idx)
            .collect()
    }

    #[must_use]
    pub fn total_alive_health(&self) -> f32 {
        self.members
            .iter()
            .filter(|m| m.is_alive())
            .map(PartyMember::health)
            .sum()
    }

    #[must_use]
    pub fn average_health(&self) -> Option<f32> {
        let alive = self.alive_count();
        if alive == 0 {
            return None;
        }
        Some(self.total_alive_health() / u32_to_f32(alive))
    }

    #[must_use]
    pub fn health_label(&self) -> HealthLabel {
        HealthLabel::from_average(self.average_health())
    }

    /// Damage every living member. Returns the names of those it killed.
    pub fn damage_all_alive(&mut self, amount: f32) -> Vec<String> {
        let mut fallen = Vec::new();
        for member in self.members.iter_mut().filter(|m| m.is_alive()) {
            if member.apply_health_delta(-amount) {
                fallen.push(member.name.clone());
            }
        }
        fallen
    }

    pub fn heal_all_alive(&mut self, amount: f32) {
        for member in self.members.iter_mut().filter(|m| m.is_alive()) {
            member.apply_health_delta(amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party() -> Party {
        Party::from_names("Ezra", &["Ada", "Bo", "Cy", "Di"])
    }

    #[test]
    fn health_is_clamped_both_ways() {
        let mut member = PartyMember::new("Ada");
        assert!(!member.apply_health_delta(25.0));
        assert!((member.health() - 100.0).abs() < f32::EPSILON);
        assert!(!member.apply_health_delta(-40.0));
        assert!((member.health() - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn death_happens_once_and_sticks() {
        let mut member = PartyMember::new("Bo");
        assert!(member.apply_health_delta(-150.0));
        assert!(!member.is_alive());
        assert!(member.health().abs() < f32::EPSILON);
        assert!(!member.apply_health_delta(-10.0));
        assert!(!member.apply_health_delta(50.0));
        assert!(!member.is_alive());
        assert!(member.health().abs() < f32::EPSILON);
    }

    #[test]
    fn non_finite_deltas_are_ignored() {
        let mut member = PartyMember::new("Cy");
        assert!(!member.apply_health_delta(f32::NAN));
        assert!((member.health() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn contracting_applies_onset_damage() {
        let mut member = PartyMember::new("Di");
        member.contract(Illness::Cholera);
        assert_eq!(member.illness(), Some(Illness::Cholera));
        assert!((member.health() - 80.0).abs() < f32::EPSILON);
        assert_eq!(member.note_illness_day(), 1);
        assert_eq!(member.recover(), Some(Illness::Cholera));
        assert_eq!(member.illness_days(), 0);
        assert_eq!(member.note_illness_day(), 0);
    }

    #[test]
    fn labels_follow_average_health() {
        let mut party = party();
        assert_eq!(party.health_label(), HealthLabel::Good);
        party.damage_all_alive(45.0);
        assert_eq!(party.health_label(), HealthLabel::Fair);
        party.damage_all_alive(40.0);
        assert_eq!(party.health_label(), HealthLabel::VeryPoor);
        let fallen = party.damage_all_alive(20.0);
        assert_eq!(fallen.len(), 4);
        assert_eq!(party.health_label(), HealthLabel::Dead);
        assert!(party.is_wiped_out());
    }

    #[test]
    fn healthy_indices_skip_sick_and_dead() {
        let mut party = party();
        if let Some(m) = party.member_mut(0) {
            m.contract(Illness::Fever);
        }
        if let Some(m) = party.member_mut(1) {
            m.apply_health_delta(-100.0);
        }
        assert_eq!(party.healthy_indices().as_slice(), &[2, 3]);
        assert_eq!(party.alive_indices().as_slice(), &[0, 2, 3]);
        assert_eq!(party.alive_count(), 3);
    }
}
