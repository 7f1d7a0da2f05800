//! Travel settings, the landmark table, and the journey's position on it.

use serde::{Deserialize, Serialize};

use crate::calendar::TrailDate;
use crate::constants::{
    FOOD_BARE_BONES, FOOD_FILLING, FOOD_MEAGER, MILES_GRUELING, MILES_SLOW, MILES_STEADY,
    RIVER_DEFAULT_WIDTH_FT, TRAIL_TOTAL_MILES,
};
use crate::party::HealthLabel;
use crate::weather::Weather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Slow,
    #[default]
    Steady,
    Grueling,
}

impl Pace {
    pub const ALL: [Self; 3] = [Self::Slow, Self::Steady, Self::Grueling];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Steady => "steady",
            Self::Grueling => "grueling",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Steady => "Steady",
            Self::Grueling => "Grueling",
        }
    }

    #[must_use]
    pub const fn base_miles(self) -> f32 {
        match self {
            Self::Slow => MILES_SLOW,
            Self::Steady => MILES_STEADY,
            Self::Grueling => MILES_GRUELING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rations {
    BareBones,
    Meager,
    #[default]
    Filling,
}

impl Rations {
    pub const ALL: [Self; 3] = [Self::BareBones, Self::Meager, Self::Filling];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::BareBones => "bare_bones",
            Self::Meager => "meager",
            Self::Filling => "filling",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BareBones => "Bare Bones",
            Self::Meager => "Meager",
            Self::Filling => "Filling",
        }
    }

    /// Pounds of food each living traveler eats per day.
    #[must_use]
    pub const fn food_per_person(self) -> u32 {
        match self {
            Self::BareBones => FOOD_BARE_BONES,
            Self::Meager => FOOD_MEAGER,
            Self::Filling => FOOD_FILLING,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkKind {
    River,
    Fort,
    Landmark,
    Destination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Landmark {
    pub name: &'static str,
    pub distance: u32,
    pub kind: LandmarkKind,
    /// Ferry fare in cents, for rivers that have one.
    pub ferry_cents: Option<u64>,
    pub width_ft: Option<u16>,
    pub description: &'static str,
}

impl Landmark {
    const fn new(
        name: &'static str,
        distance: u32,
        kind: LandmarkKind,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            distance,
            kind,
            ferry_cents: None,
            width_ft: None,
            description,
        }
    }

    const fn river(
        name: &'static str,
        distance: u32,
        ferry_cents: u64,
        width_ft: u16,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            distance,
            kind: LandmarkKind::River,
            ferry_cents: Some(ferry_cents),
            width_ft: Some(width_ft),
            description,
        }
    }

    #[must_use]
    pub fn river_width_ft(&self) -> u16 {
        self.width_ft.unwrap_or(RIVER_DEFAULT_WIDTH_FT)
    }
}

/// Waypoints of the Oregon Trail, sorted by ascending distance.
pub const LANDMARKS: [Landmark; 16] = [
    Landmark::river(
        "Kansas River Crossing",
        102,
        500,
        200,
        "A river crossing on the trail.",
    ),
    Landmark::river(
        "Big Blue River Crossing",
        185,
        400,
        180,
        "Another river to cross.",
    ),
    Landmark::new(
        "Fort Kearney",
        304,
        LandmarkKind::Fort,
        "A military outpost and trading post.",
    ),
    Landmark::new(
        "Chimney Rock",
        554,
        LandmarkKind::Landmark,
        "A famous rock formation marking progress west.",
    ),
    Landmark::new(
        "Fort Laramie",
        640,
        LandmarkKind::Fort,
        "Important trading post and rest stop.",
    ),
    Landmark::new(
        "Independence Rock",
        830,
        LandmarkKind::Landmark,
        "Travelers often carved their names here.",
    ),
    Landmark::new(
        "South Pass",
        932,
        LandmarkKind::Landmark,
        "The Continental Divide, highest point of the journey.",
    ),
    Landmark::new(
        "Fort Bridger",
        1025,
        LandmarkKind::Fort,
        "Last chance to rest and resupply.",
    ),
    Landmark::new(
        "Soda Springs",
        1180,
        LandmarkKind::Landmark,
        "Natural springs with carbonated water.",
    ),
    Landmark::new(
        "Fort Hall",
        1288,
        LandmarkKind::Fort,
        "Trading post near Snake River.",
    ),
    Landmark::river(
        "Snake River Crossing",
        1412,
        800,
        300,
        "Dangerous river crossing.",
    ),
    Landmark::new(
        "Fort Boise",
        1543,
        LandmarkKind::Fort,
        "Near the end of the trail.",
    ),
    Landmark::new(
        "Blue Mountains",
        1672,
        LandmarkKind::Landmark,
        "Steep mountain passage.",
    ),
    Landmark::new(
        "Fort Walla Walla",
        1793,
        LandmarkKind::Fort,
        "Final fort before the Columbia River.",
    ),
    Landmark::new(
        "The Dalles",
        1950,
        LandmarkKind::Landmark,
        "The final challenge before Oregon City.",
    ),
    Landmark::new(
        "Oregon City",
        2040,
        LandmarkKind::Destination,
        "The end of the Oregon Trail!",
    ),
];

#[must_use]
pub fn landmark(index: usize) -> Option<&'static Landmark> {
    LANDMARKS.get(index)
}

/// Where the wagon is and how it is traveling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailState {
    pub date: TrailDate,
    pub days_elapsed: u32,
    miles_traveled: u32,
    pub total_miles: u32,
    pub pace: Pace,
    pub rations: Rations,
    pub weather: Weather,
    pub health_label: HealthLabel,
    visited: Vec<usize>,
    next_landmark: Option<usize>,
}

impl TrailState {
    #[must_use]
    pub fn new(date: TrailDate) -> Self {
        let mut trail = Self {
            date,
            days_elapsed: 0,
            miles_traveled: 0,
            total_miles: TRAIL_TOTAL_MILES,
            pace: Pace::default(),
            rations: Rations::default(),
            weather: Weather::default(),
            health_label: HealthLabel::Good,
            visited: Vec::new(),
            next_landmark: None,
        };
        trail.refresh_next_landmark();
        trail
    }

    #[must_use]
    pub const fn miles_traveled(&self) -> u32 {
        self.miles_traveled
    }

    /// Move the wagon forward. Progress never decreases.
    pub const fn advance_miles(&mut self, miles: u32) {
        self.miles_traveled = self.miles_traveled.saturating_add(miles);
    }

    #[must_use]
    pub const fn has_arrived(&self) -> bool {
        self.miles_traveled >= self.total_miles
    }

    /// Landmark indices in the order they were first reached.
    #[must_use]
    pub fn visited_landmarks(&self) -> &[usize] {
        &self.visited
    }

    #[must_use]
    pub fn is_visited(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    /// First unvisited landmark already within reach, if any.
    #[must_use]
    pub fn reachable_landmark(&self) -> Option<usize> {
        LANDMARKS
            .iter()
            .enumerate()
            .find(|(idx, lm)| !self.is_visited(*idx) && lm.distance <= self.miles_traveled)
            .map(|(idx, _)| idx)
    }

    /// Record a first visit. Returns `false` if the landmark was already visited.
    pub fn mark_visited(&mut self, index: usize) -> bool {
        if index >= LANDMARKS.len() || self.is_visited(index) {
            return false;
        }
        self.visited.push(index);
        self.refresh_next_landmark();
        true
    }

    pub fn refresh_next_landmark(&mut self) {
        self.next_landmark = LANDMARKS
            .iter()
            .enumerate()
            .find(|(idx, _)| !self.visited.contains(idx))
            .map(|(idx, _)| idx);
    }

    #[must_use]
    pub fn next_landmark(&self) -> Option<&'static Landmark> {
        self.next_landmark.and_then(landmark)
    }

    /// Miles to the next landmark, or zero when it is already in reach.
    #[must_use]
    pub fn miles_to_next_landmark(&self) -> Option<u32> {
        self.next_landmark()
            .map(|lm| lm.distance.saturating_sub(self.miles_traveled))
    }
}
