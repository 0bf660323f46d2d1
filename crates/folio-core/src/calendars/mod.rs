//! Business day calendars.
//!
//! Projections are dated on business days only. The engine uses the
//! [`WeekendCalendar`] (weekends skipped, no holiday list).

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Trading days in a year, used for annualization and projection horizons.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: NaiveDate) -> bool;

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut result = date;
        while !self.is_business_day(result) {
            result += Duration::days(1);
        }
        result
    }

    /// Advances a date by a number of business days.
    fn add_business_days(&self, date: NaiveDate, days: i32) -> NaiveDate {
        let mut result = date;
        let mut remaining = days.abs();
        let direction = Duration::days(if days >= 0 { 1 } else { -1 });

        while remaining > 0 {
            result += direction;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Returns `count` consecutive business days, the first being
    /// `start` rolled forward to a business day.
    fn business_days(&self, start: NaiveDate, count: usize) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(count);
        if count == 0 {
            return dates;
        }
        let mut current = self.next_business_day(start);
        dates.push(current);
        while dates.len() < count {
            current = self.add_business_days(current, 1);
            dates.push(current);
        }
        dates
    }
}

/// A simple weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(date(2025, 1, 6))); // Monday
        assert!(!cal.is_business_day(date(2025, 1, 4))); // Saturday
        assert!(!cal.is_business_day(date(2025, 1, 5))); // Sunday
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;
        // Friday + 1 business day = Monday
        assert_eq!(cal.add_business_days(date(2025, 1, 3), 1), date(2025, 1, 6));
        // Monday - 1 business day = Friday
        assert_eq!(cal.add_business_days(date(2025, 1, 6), -1), date(2025, 1, 3));
    }

    #[test]
    fn test_business_days_from_weekend_start() {
        let cal = WeekendCalendar;
        // Saturday start rolls to Monday
        let days = cal.business_days(date(2025, 1, 4), 6);
        assert_eq!(
            days,
            vec![
                date(2025, 1, 6),
                date(2025, 1, 7),
                date(2025, 1, 8),
                date(2025, 1, 9),
                date(2025, 1, 10),
                date(2025, 1, 13),
            ]
        );
    }

    #[test]
    fn test_business_days_count() {
        let cal = WeekendCalendar;
        let days = cal.business_days(date(2025, 1, 6), 252);
        assert_eq!(days.len(), 252);
        assert!(days.iter().all(|d| cal.is_business_day(*d)));
        assert!(days.windows(2).all(|w| w[0] < w[1]));
        assert!(cal.business_days(date(2025, 1, 6), 0).is_empty());
    }
}
