use chrono::{Duration, NaiveDate};

/// Inclusive span of calendar days covered by a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StayRange {
    /// Builds a range from two days in either order.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn is_ordered(arrival: NaiveDate, departure: NaiveDate) -> bool {
        arrival <= departure
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..=self.nights()).map(move |i| start + Duration::days(i))
    }
}
