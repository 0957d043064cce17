//! Per-value date arithmetic engine.
//!
//! A [`CalendarInstant`] wraps one wall-clock timestamp with millisecond
//! precision and mutates it in place; every mutator returns `&mut Self` so
//! operations chain. Business-day queries delegate to the owning
//! [`HolidayCalendar`].

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::cmp::Ordering;

use crate::calendar::{from_ymd, is_leap_year, last_day_of_month, HolidayCalendar};

/// One timestamp bound to a holiday policy.
///
/// Cheap to create and meant to be short-lived: obtain one from
/// [`HolidayCalendar::create`], run a computation, read the result off
/// [`CalendarInstant::to_datetime`] and discard it.
#[derive(Debug, Clone)]
pub struct CalendarInstant<'a> {
    timestamp: NaiveDateTime,
    first_day_of_week: Weekday,
    calendar: &'a HolidayCalendar,
}

/// Rebuild a timestamp from raw components, carrying each out-of-range
/// component into the next larger unit (milliseconds into seconds, months
/// into years, and day overflow/underflow through the month length).
/// `month0` is 0-based; `day` is 1-based, so 0 lands on the last day of the
/// preceding month.
fn normalize(
    year: i64,
    month0: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
) -> NaiveDateTime {
    let second = second + millisecond.div_euclid(1000);
    let millisecond = millisecond.rem_euclid(1000);
    let minute = minute + second.div_euclid(60);
    let second = second.rem_euclid(60);
    let hour = hour + minute.div_euclid(60);
    let minute = minute.rem_euclid(60);
    let day = day + hour.div_euclid(24);
    let hour = hour.rem_euclid(24);
    let year = year + month0.div_euclid(12);
    let month0 = month0.rem_euclid(12);
    let date = from_ymd(year as i32, month0 as u32 + 1, 1)
        .checked_add_signed(Duration::days(day - 1))
        .unwrap();
    let time = NaiveTime::from_hms_milli_opt(
        hour as u32,
        minute as u32,
        second as u32,
        millisecond as u32,
    )
    .unwrap();
    NaiveDateTime::new(date, time)
}

impl<'a> CalendarInstant<'a> {
    pub(crate) fn new(
        timestamp: NaiveDateTime,
        first_day_of_week: Weekday,
        calendar: &'a HolidayCalendar,
    ) -> CalendarInstant<'a> {
        CalendarInstant {
            timestamp,
            first_day_of_week,
            calendar,
        }
    }

    fn parts(&self) -> (i64, i64, i64, i64, i64, i64, i64) {
        (
            self.year() as i64,
            self.month0() as i64,
            self.day_of_month() as i64,
            self.hour() as i64,
            self.minute() as i64,
            self.second() as i64,
            self.millisecond() as i64,
        )
    }

    // ----- component accessors/mutators -----

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Set the year; out-of-range days carry (Feb 29 set to a non-leap
    /// year rolls over to Mar 1).
    pub fn set_year(&mut self, year: i64) -> &mut Self {
        let (_, mo, d, h, mi, s, ms) = self.parts();
        self.timestamp = normalize(year, mo, d, h, mi, s, ms);
        self
    }

    /// 0-based month, 0 = January.
    pub fn month0(&self) -> u32 {
        self.timestamp.month0()
    }

    /// Set the 0-based month; values outside 0..=11 carry into the year.
    pub fn set_month0(&mut self, month0: i64) -> &mut Self {
        let (y, _, d, h, mi, s, ms) = self.parts();
        self.timestamp = normalize(y, month0, d, h, mi, s, ms);
        self
    }

    pub fn day_of_month(&self) -> u32 {
        self.timestamp.day()
    }

    /// Set the day of month; values past the month length carry forward,
    /// 0 and negatives carry backward.
    pub fn set_day_of_month(&mut self, day: i64) -> &mut Self {
        let (y, mo, _, h, mi, s, ms) = self.parts();
        self.timestamp = normalize(y, mo, day, h, mi, s, ms);
        self
    }

    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    pub fn set_hour(&mut self, hour: i64) -> &mut Self {
        let (y, mo, d, _, mi, s, ms) = self.parts();
        self.timestamp = normalize(y, mo, d, hour, mi, s, ms);
        self
    }

    pub fn minute(&self) -> u32 {
        self.timestamp.minute()
    }

    pub fn set_minute(&mut self, minute: i64) -> &mut Self {
        let (y, mo, d, h, _, s, ms) = self.parts();
        self.timestamp = normalize(y, mo, d, h, minute, s, ms);
        self
    }

    pub fn second(&self) -> u32 {
        self.timestamp.second()
    }

    pub fn set_second(&mut self, second: i64) -> &mut Self {
        let (y, mo, d, h, mi, _, ms) = self.parts();
        self.timestamp = normalize(y, mo, d, h, mi, second, ms);
        self
    }

    pub fn millisecond(&self) -> u32 {
        self.timestamp.time().nanosecond() / 1_000_000
    }

    pub fn set_millisecond(&mut self, millisecond: i64) -> &mut Self {
        let (y, mo, d, h, mi, s, _) = self.parts();
        self.timestamp = normalize(y, mo, d, h, mi, s, millisecond);
        self
    }

    /// Local weekday of the wrapped timestamp.
    pub fn weekday(&self) -> Weekday {
        self.timestamp.date().weekday()
    }

    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Override the week start for this instance only; the owning
    /// calendar's setting is untouched.
    pub fn set_first_day_of_week(&mut self, day: Weekday) -> &mut Self {
        self.first_day_of_week = day;
        self
    }

    // ----- holiday queries -----

    pub fn is_holiday(&self) -> bool {
        self.calendar.is_holiday(self.timestamp.date())
    }

    pub fn is_business_day(&self) -> bool {
        self.calendar.is_business_day(self.timestamp.date())
    }

    // ----- advancement -----

    /// Shift by exactly `days` calendar days, time-of-day preserved.
    pub fn advance_days(&mut self, days: i64) -> &mut Self {
        self.timestamp = self.timestamp + Duration::days(days);
        self
    }

    /// Shift by `months` months. When the target month is shorter than the
    /// current day-of-month, the day clamps to the last day of the target
    /// month; time-of-day is preserved.
    pub fn advance_months(&mut self, months: i64) -> &mut Self {
        let total = self.year() as i64 * 12 + self.month0() as i64 + months;
        let year = total.div_euclid(12) as i32;
        let month = total.rem_euclid(12) as u32 + 1;
        let day = self.day_of_month().min(last_day_of_month(year, month));
        self.timestamp = NaiveDateTime::new(from_ymd(year, month, day), self.timestamp.time());
        self
    }

    /// Shift by `years` years, clamping Feb 29 to Feb 28 in non-leap
    /// target years.
    pub fn advance_years(&mut self, years: i64) -> &mut Self {
        self.advance_months(years * 12)
    }

    /// Shift by `n` signed business days.
    ///
    /// Steps one calendar day at a time in the sign of `n`; a step landing
    /// on a holiday does not count. The starting date never counts, and
    /// `n == 0` leaves the timestamp unchanged even when it sits on a
    /// holiday. Time-of-day is preserved.
    pub fn advance_business_days(&mut self, n: i64) -> &mut Self {
        let step = if n >= 0 { 1 } else { -1 };
        let mut remaining = n.abs();
        while remaining > 0 {
            self.timestamp = self.timestamp + Duration::days(step);
            if self.calendar.is_business_day(self.timestamp.date()) {
                remaining -= 1;
            }
        }
        self
    }

    // ----- period boundaries -----

    pub fn start_of_day(&mut self) -> &mut Self {
        self.timestamp = self.timestamp.date().and_hms_opt(0, 0, 0).unwrap();
        self
    }

    pub fn end_of_day(&mut self) -> &mut Self {
        self.timestamp = self
            .timestamp
            .date()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap();
        self
    }

    /// Days back to the most recent occurrence of the configured week
    /// start; 0 when the wrapped date already falls on it.
    fn week_offset(&self) -> u32 {
        (self.weekday().num_days_from_sunday() + 7 - self.first_day_of_week.num_days_from_sunday())
            % 7
    }

    /// Move to the start of day on the most recent `first_day_of_week`.
    pub fn start_of_week(&mut self) -> &mut Self {
        let offset = self.week_offset();
        self.advance_days(-(offset as i64)).start_of_day()
    }

    /// Move to the end of day on the last day of the current week.
    pub fn end_of_week(&mut self) -> &mut Self {
        let offset = self.week_offset();
        self.advance_days((6 - offset) as i64).end_of_day()
    }

    /// Move to the end of day on the last calendar day of the current month.
    pub fn end_of_month(&mut self) -> &mut Self {
        let (year, month) = (self.year(), self.month0() + 1);
        self.timestamp = NaiveDateTime::new(
            from_ymd(year, month, last_day_of_month(year, month)),
            self.timestamp.time(),
        );
        self.end_of_day()
    }

    pub fn start_of_year(&mut self) -> &mut Self {
        self.timestamp = NaiveDateTime::new(from_ymd(self.year(), 1, 1), self.timestamp.time());
        self.start_of_day()
    }

    pub fn end_of_year(&mut self) -> &mut Self {
        self.timestamp = NaiveDateTime::new(from_ymd(self.year(), 12, 31), self.timestamp.time());
        self.end_of_day()
    }

    // ----- counts, interop, comparison -----

    /// Number of calendar days in the current month (28-31).
    pub fn count_days_in_month(&self) -> u32 {
        last_day_of_month(self.year(), self.month0() + 1)
    }

    /// 365, or 366 in a leap year.
    pub fn count_days_in_year(&self) -> u32 {
        if is_leap_year(self.year()) {
            366
        } else {
            365
        }
    }

    /// Copy of the wrapped timestamp; never a live handle onto the instant.
    pub fn to_datetime(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Millisecond-exact total order against another timestamp.
    pub fn compare(&self, other: &NaiveDateTime) -> Ordering {
        self.timestamp.cmp(other)
    }

    /// Order the wrapped time-of-day against the supplied components,
    /// ignoring the calendar date entirely.
    pub fn compare_time(&self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Ordering {
        (self.hour(), self.minute(), self.second(), self.millisecond())
            .cmp(&(hour, minute, second, millisecond))
    }
}
