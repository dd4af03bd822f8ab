use chrono::{DateTime, FixedOffset, Local, NaiveDate};

/// Checks that a candidate entry is complete: both dates present and a name
/// that is not blank. Date order is not checked.
pub fn is_booking_entry_valid(
    arrival_date: Option<NaiveDate>,
    departure_date: Option<NaiveDate>,
    name: Option<&str>,
) -> bool {
    arrival_date.is_some()
        && departure_date.is_some()
        && name.is_some_and(|name| !name.trim().is_empty())
}

/// Calendar date of an epoch-millisecond timestamp at a fixed offset.
///
/// Timestamps chrono cannot represent saturate to the first or last
/// representable date.
pub fn to_date_with_offset(timestamp_millis: i64, offset: FixedOffset) -> NaiveDate {
    match DateTime::from_timestamp_millis(timestamp_millis) {
        Some(instant) => instant.with_timezone(&offset).date_naive(),
        None if timestamp_millis < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// Calendar date of an epoch-millisecond timestamp, using the host's
/// current local offset (not the offset in effect at the timestamp).
pub fn to_local_date(timestamp_millis: i64) -> NaiveDate {
    to_date_with_offset(timestamp_millis, *Local::now().offset())
}

/// Whether the date picker may offer `candidate` when today is `today`.
pub fn is_selectable_on(candidate: NaiveDate, today: NaiveDate) -> bool {
    candidate >= today
}

pub fn is_selectable_date(candidate_timestamp_millis: i64) -> bool {
    is_selectable_on(
        to_local_date(candidate_timestamp_millis),
        Local::now().date_naive(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_complete_entry_is_valid() {
        assert!(is_booking_entry_valid(
            Some(date(2024, 6, 1)),
            Some(date(2024, 6, 5)),
            Some("Alice")
        ));
        assert!(is_booking_entry_valid(
            Some(date(2024, 6, 1)),
            Some(date(2024, 6, 1)),
            Some("  Bob  ")
        ));
    }

    #[test]
    fn test_blank_or_missing_name_is_invalid() {
        let arrival = Some(date(2024, 6, 1));
        let departure = Some(date(2024, 6, 5));

        assert!(!is_booking_entry_valid(arrival, departure, None));
        assert!(!is_booking_entry_valid(arrival, departure, Some("")));
        assert!(!is_booking_entry_valid(arrival, departure, Some("   ")));
        assert!(!is_booking_entry_valid(arrival, departure, Some("\t\n")));
        assert!(!is_booking_entry_valid(None, None, Some(" ")));
    }

    #[test]
    fn test_missing_date_is_invalid() {
        let day = Some(date(2024, 6, 1));

        assert!(!is_booking_entry_valid(None, day, Some("Alice")));
        assert!(!is_booking_entry_valid(day, None, Some("Alice")));
        assert!(!is_booking_entry_valid(None, None, Some("Alice")));
    }

    #[test]
    fn test_reversed_dates_are_accepted() {
        assert!(is_booking_entry_valid(
            Some(date(2024, 6, 5)),
            Some(date(2024, 6, 1)),
            Some("Alice")
        ));
    }

    #[test]
    fn test_new_year_at_utc() {
        assert_eq!(to_date_with_offset(1_704_067_200_000, utc()), date(2024, 1, 1));
        assert_eq!(to_date_with_offset(1_704_067_199_999, utc()), date(2023, 12, 31));
    }

    #[test]
    fn test_offset_shifts_the_day() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        // 2024-01-01T23:00:00Z
        let late_evening = 1_704_150_000_000;

        assert_eq!(to_date_with_offset(late_evening, utc()), date(2024, 1, 1));
        assert_eq!(to_date_with_offset(late_evening, plus_two), date(2024, 1, 2));
        assert_eq!(to_date_with_offset(1_704_067_200_000, minus_five), date(2023, 12, 31));
    }

    #[test]
    fn test_negative_timestamp_floors() {
        assert_eq!(to_date_with_offset(-1, utc()), date(1969, 12, 31));
        assert_eq!(to_date_with_offset(0, utc()), date(1970, 1, 1));
    }

    #[test]
    fn test_out_of_range_saturates() {
        assert_eq!(to_date_with_offset(i64::MIN, utc()), NaiveDate::MIN);
        assert_eq!(to_date_with_offset(i64::MAX, utc()), NaiveDate::MAX);
    }

    #[test]
    fn test_local_date_of_now_is_today() {
        let now = Local::now();
        assert_eq!(to_local_date(now.timestamp_millis()), now.date_naive());
    }

    #[test]
    fn test_selectable_boundary() {
        let today = date(2024, 6, 1);

        assert!(is_selectable_on(today, today));
        assert!(is_selectable_on(date(2024, 6, 2), today));
        assert!(is_selectable_on(date(2030, 1, 1), today));
        assert!(!is_selectable_on(date(2024, 5, 31), today));
    }

    #[test]
    fn test_selectable_relative_to_now() {
        let now = Local::now();

        assert!(is_selectable_date(now.timestamp_millis()));
        assert!(is_selectable_date((now + Duration::days(3)).timestamp_millis()));
        assert!(!is_selectable_date((now - Duration::days(2)).timestamp_millis()));
    }
}
