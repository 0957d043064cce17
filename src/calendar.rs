//! Holiday policy holder and factory for calendar instants.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use std::collections::BTreeSet;

use crate::instant::CalendarInstant;

/// Holds one holiday policy: an immutable set of non-working dates beyond
/// weekends, plus the weekday considered the start of a week.
///
/// Constructed once per policy and consulted by every [`CalendarInstant`]
/// it creates. Read-only after construction, so freely shareable.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    holidays: BTreeSet<NaiveDate>,
    first_day_of_week: Weekday,
}

impl HolidayCalendar {
    pub fn new(holidays: BTreeSet<NaiveDate>, first_day_of_week: Weekday) -> HolidayCalendar {
        HolidayCalendar {
            holidays,
            first_day_of_week,
        }
    }

    /// Create an instant wrapping a copy of `base`, bound to this calendar.
    pub fn create(&self, base: NaiveDateTime) -> CalendarInstant<'_> {
        CalendarInstant::new(base, self.first_day_of_week, self)
    }

    /// Returns true if `date` falls on a weekend or is in the holiday set.
    /// Matched by calendar date only; time-of-day never enters into it.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || self.holidays.contains(&date)
    }

    /// Returns true if `date` is a working day, i.e. not a holiday.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.is_holiday(date)
    }

    /// Calculate the next business day strictly after `date`.
    pub fn next_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut date = date.succ_opt().unwrap();
        while !self.is_business_day(date) {
            date = date.succ_opt().unwrap();
        }
        date
    }

    /// Calculate the previous business day strictly before `date`.
    pub fn prev_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut date = date.pred_opt().unwrap();
        while !self.is_business_day(date) {
            date = date.pred_opt().unwrap();
        }
        date
    }

    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }
}

pub fn from_ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Returns true if the specified year is a leap year (i.e. Feb 29th exists for this year)
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Calculate the last day of a given month in a given year
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap_or_else(|| from_ymd(year + 1, 1, 1))
        .pred_opt()
        .unwrap()
        .day()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::OfficeCalendar;

    fn make_cal() -> HolidayCalendar {
        OfficeCalendar::with_default_rules(true).get_cal()
    }

    #[test]
    fn fixed_dates_calendar() {
        let holidays = BTreeSet::from([
            from_ymd(2019, 11, 20),
            from_ymd(2019, 11, 24),
            from_ymd(2019, 11, 25),
        ]);
        let cal = HolidayCalendar::new(holidays, Weekday::Mon);

        assert_eq!(false, cal.is_business_day(from_ymd(2019, 11, 20)));
        assert_eq!(true, cal.is_business_day(from_ymd(2019, 11, 21)));
        assert_eq!(true, cal.is_business_day(from_ymd(2019, 11, 22)));
        // plain weekend
        assert_eq!(false, cal.is_business_day(from_ymd(2019, 11, 23)));
        assert_eq!(true, cal.is_holiday(from_ymd(2019, 11, 23)));
        // weekend and listed holiday
        assert_eq!(false, cal.is_business_day(from_ymd(2019, 11, 24)));
        assert_eq!(true, cal.is_holiday(from_ymd(2019, 11, 24)));
        assert_eq!(false, cal.is_business_day(from_ymd(2019, 11, 25)));
        assert_eq!(true, cal.is_business_day(from_ymd(2019, 11, 26)));
    }

    #[test]
    fn office_holidays_around_new_year() {
        let cal = make_cal();
        let expected = [
            (from_ymd(2020, 12, 25), false), // weekday
            (from_ymd(2020, 12, 26), true),  // Saturday
            (from_ymd(2020, 12, 27), true),  // Sunday
            (from_ymd(2020, 12, 28), false), // weekday
            (from_ymd(2020, 12, 29), true),  // office closure
            (from_ymd(2020, 12, 30), true),  // office closure
            (from_ymd(2020, 12, 31), true),  // office closure
            (from_ymd(2021, 1, 1), true),    // New Year's Day
            (from_ymd(2021, 1, 2), true),    // office closure
            (from_ymd(2021, 1, 3), true),    // office closure
            (from_ymd(2021, 1, 4), false),   // weekday
            (from_ymd(2021, 1, 5), false),   // weekday
            (from_ymd(2021, 1, 6), false),   // weekday
            (from_ymd(2021, 1, 7), false),   // weekday
            (from_ymd(2021, 1, 8), false),   // weekday
            (from_ymd(2021, 1, 9), true),    // Saturday
            (from_ymd(2021, 1, 10), true),   // Sunday
            (from_ymd(2021, 1, 11), true),   // Coming-of-Age Day
            (from_ymd(2021, 1, 12), false),  // weekday
        ];
        for (date, holiday) in expected {
            assert_eq!(holiday, cal.is_holiday(date), "is_holiday({})", date);
            assert_eq!(!holiday, cal.is_business_day(date), "is_business_day({})", date);
        }
    }

    #[test]
    fn next_business_day_skips_closure() {
        let cal = make_cal();
        assert_eq!(
            cal.next_business_day(from_ymd(2020, 12, 28)),
            from_ymd(2021, 1, 4)
        );
        assert_eq!(
            cal.next_business_day(from_ymd(2021, 1, 4)),
            from_ymd(2021, 1, 5)
        );
        assert_eq!(
            cal.next_business_day(from_ymd(2021, 1, 8)),
            from_ymd(2021, 1, 12)
        );
    }

    #[test]
    fn prev_business_day_skips_closure() {
        let cal = make_cal();
        assert_eq!(
            cal.prev_business_day(from_ymd(2021, 1, 4)),
            from_ymd(2020, 12, 28)
        );
        assert_eq!(
            cal.prev_business_day(from_ymd(2021, 1, 12)),
            from_ymd(2021, 1, 8)
        );
    }

    #[test]
    fn leap_years() {
        assert_eq!(true, is_leap_year(2020));
        assert_eq!(false, is_leap_year(2021));
        assert_eq!(true, is_leap_year(2024));
        assert_eq!(false, is_leap_year(1900));
        assert_eq!(true, is_leap_year(2000));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(31, last_day_of_month(2020, 1));
        assert_eq!(29, last_day_of_month(2020, 2));
        assert_eq!(28, last_day_of_month(2021, 2));
        assert_eq!(30, last_day_of_month(2020, 4));
        assert_eq!(31, last_day_of_month(2020, 12));
    }
}
