//! Business-day arithmetic (weekends only, no holiday calendar)

use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First weekday strictly after `date`
pub fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    date.iter_days().skip(1).find(|d| is_business_day(*d))
}

/// The `count` consecutive business days strictly after `date`.
///
/// Shorter than `count` only at the very end of the representable calendar.
pub fn business_days_after(date: NaiveDate, count: usize) -> Vec<NaiveDate> {
    date.iter_days()
        .skip(1)
        .filter(|d| is_business_day(*d))
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_friday_rolls_to_monday() {
        // 2024-03-08 is a Friday
        let days = business_days_after(ymd(2024, 3, 8), 3);
        assert_eq!(days, vec![ymd(2024, 3, 11), ymd(2024, 3, 12), ymd(2024, 3, 13)]);
    }

    #[test]
    fn test_starts_after_weekend_date() {
        // Saturday input still yields Monday first
        assert_eq!(next_business_day(ymd(2024, 3, 9)), Some(ymd(2024, 3, 11)));
        assert_eq!(business_days_after(ymd(2024, 3, 10), 1), vec![ymd(2024, 3, 11)]);
    }

    #[test]
    fn test_thirty_days_skip_weekends() {
        let start = ymd(2024, 3, 6);
        let days = business_days_after(start, 30);
        assert_eq!(days.len(), 30);
        assert!(days.iter().all(|d| is_business_day(*d)));
        assert!(days[0] > start);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
        // six full weeks of weekdays
        assert_eq!(days[29], ymd(2024, 4, 17));
    }
}
