use crate::domain::StayRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded stay. Equality is structural: two entries with the same
/// name and dates are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingEntry {
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub name: String,
}

impl BookingEntry {
    pub fn new(arrival_date: NaiveDate, departure_date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            arrival_date,
            departure_date,
            name: name.into(),
        }
    }

    pub fn stay(&self) -> StayRange {
        StayRange::new(self.arrival_date, self.departure_date)
    }
}

impl fmt::Display for BookingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            self.name, self.arrival_date, self.departure_date
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_structural_equality() {
        let a = BookingEntry::new(date(2024, 6, 1), date(2024, 6, 5), "Alice");
        let b = BookingEntry::new(date(2024, 6, 1), date(2024, 6, 5), "Alice");
        let c = BookingEntry::new(date(2024, 6, 1), date(2024, 6, 6), "Alice");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let entry = BookingEntry::new(date(2024, 6, 1), date(2024, 6, 5), "Alice");
        assert_eq!(entry.to_string(), "Alice (2024-06-01 - 2024-06-05)");
    }

    #[test]
    fn test_stay_counts_nights() {
        let entry = BookingEntry::new(date(2024, 6, 1), date(2024, 6, 5), "Alice");
        assert_eq!(entry.stay().nights(), 4);
    }

    #[test]
    fn test_serializes_dates_as_iso() {
        let entry = BookingEntry::new(date(2024, 7, 1), date(2024, 7, 3), "Bob");
        let json = serde_json::to_string(&entry).unwrap();

        assert_eq!(
            json,
            r#"{"arrival_date":"2024-07-01","departure_date":"2024-07-03","name":"Bob"}"#
        );
        let back: BookingEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
