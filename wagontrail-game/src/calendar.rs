//! Non-leap trail calendar.

use serde::{Deserialize, Serialize};

const MONTH_LENGTHS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar date on the trail. Every February has 28 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrailDate {
    year: u16,
    month: u8,
    day: u8,
}

impl TrailDate {
    /// Build a date, clamping month into 1..=12 and day into the month length.
    #[must_use]
    pub fn new(month: u8, day: u8, year: u16) -> Self {
        let month = month.clamp(1, 12);
        let day = day.clamp(1, days_in_month(month));
        Self { year, month, day }
    }

    #[must_use]
    pub const fn month(self) -> u8 {
        self.month
    }

    #[must_use]
    pub const fn day(self) -> u8 {
        self.day
    }

    #[must_use]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// Move forward one day, rolling months and years.
    pub fn advance(&mut self) {
        self.day = self.day.saturating_add(1);
        if self.day > days_in_month(self.month) {
            self.day = 1;
            self.month += 1;
            if self.month > 12 {
                self.month = 1;
                self.year = self.year.saturating_add(1);
            }
        }
    }

    pub fn advance_days(&mut self, days: u32) {
        for _ in 0..days {
            self.advance();
        }
    }

    #[must_use]
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES
            .get(usize::from(self.month.saturating_sub(1)))
            .copied()
            .unwrap_or("January")
    }

    /// Human readable form such as `March 1, 1848`.
    #[must_use]
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl Default for TrailDate {
    fn default() -> Self {
        Self::new(3, 1, 1848)
    }
}

impl std::fmt::Display for TrailDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}, {}", self.month_name(), self.day, self.year)
    }
}

#[must_use]
pub fn days_in_month(month: u8) -> u8 {
    MONTH_LENGTHS
        .get(usize::from(month.saturating_sub(1)))
        .copied()
        .unwrap_or(30)
}
