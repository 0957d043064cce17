//! Rule-based holiday data provider.
//!
//! Holiday tables are described by a small set of serializable rules and
//! expanded into concrete dates over a year range. Weekends are not rules;
//! [`HolidayCalendar`](crate::calendar::HolidayCalendar) treats Saturday and
//! Sunday as non-working on its own.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;

use crate::calendar::{from_ymd, last_day_of_month, HolidayCalendar};

/// Specifies the nth week of a month
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum NthWeek {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

/// One non-working-day rule.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum HolidayRule {
    /// A single holiday which is valid only once in time.
    SingularDay(NaiveDate),
    /// The same date every year. `first` and `last` are the first and last
    /// year this day is a holiday (inclusively).
    YearlyDay {
        month: u32,
        day: u32,
        first: Option<i32>,
        last: Option<i32>,
    },
    /// A span of days within one month every year, e.g. an office closure
    /// around the turn of the year. `to_day` clamps to the month length.
    YearlyRange {
        month: u32,
        from_day: u32,
        to_day: u32,
        first: Option<i32>,
        last: Option<i32>,
    },
    /// A holiday that falls on the nth (or last) weekday of a specific month,
    /// e.g. the second Monday in January.
    MonthWeekday {
        month: u32,
        weekday: Weekday,
        nth: NthWeek,
        first: Option<i32>,
        last: Option<i32>,
    },
}

fn year_span(start: i32, end: i32, first: &Option<i32>, last: &Option<i32>) -> (i32, i32) {
    let first = match first {
        Some(year) => std::cmp::max(start, *year),
        _ => start,
    };
    let last = match last {
        Some(year) => std::cmp::min(end, *year),
        _ => end,
    };
    (first, last)
}

/// Expand all rules into concrete dates for years `start` to `end`
/// (inclusively).
pub fn expand_rules(rules: &[HolidayRule], start: i32, end: i32) -> BTreeSet<NaiveDate> {
    let mut holidays = BTreeSet::new();
    for rule in rules {
        match rule {
            HolidayRule::SingularDay(date) => {
                let year = date.year();
                if year >= start && year <= end {
                    holidays.insert(*date);
                }
            }
            HolidayRule::YearlyDay {
                month,
                day,
                first,
                last,
            } => {
                let (first, last) = year_span(start, end, first, last);
                for year in first..=last {
                    holidays.insert(from_ymd(year, *month, *day));
                }
            }
            HolidayRule::YearlyRange {
                month,
                from_day,
                to_day,
                first,
                last,
            } => {
                let (first, last) = year_span(start, end, first, last);
                for year in first..=last {
                    let to_day = (*to_day).min(last_day_of_month(year, *month));
                    for day in *from_day..=to_day {
                        holidays.insert(from_ymd(year, *month, day));
                    }
                }
            }
            HolidayRule::MonthWeekday {
                month,
                weekday,
                nth,
                first,
                last,
            } => {
                let (first, last) = year_span(start, end, first, last);
                for year in first..=last {
                    let day = match nth {
                        NthWeek::First => 1,
                        NthWeek::Second => 8,
                        NthWeek::Third => 15,
                        NthWeek::Fourth => 22,
                        NthWeek::Last => last_day_of_month(year, *month),
                    };
                    let mut date = from_ymd(year, *month, day);
                    while date.weekday() != *weekday {
                        date = match nth {
                            NthWeek::Last => date.pred_opt().unwrap(),
                            _ => date.succ_opt().unwrap(),
                        }
                    }
                    holidays.insert(date);
                }
            }
        }
    }
    holidays
}

/// Default rule set: Japanese national holidays plus the customary office
/// closure around the turn of the year.
pub fn japanese_office_rules() -> Vec<HolidayRule> {
    vec![
        // New Year's Day
        HolidayRule::YearlyDay {
            month: 1,
            day: 1,
            first: None,
            last: None,
        },
        // office closure, Dec 29 through Jan 3
        HolidayRule::YearlyRange {
            month: 12,
            from_day: 29,
            to_day: 31,
            first: None,
            last: None,
        },
        HolidayRule::YearlyRange {
            month: 1,
            from_day: 2,
            to_day: 3,
            first: None,
            last: None,
        },
        // Coming-of-Age Day, 2nd Monday of January
        HolidayRule::MonthWeekday {
            month: 1,
            weekday: Weekday::Mon,
            nth: NthWeek::Second,
            first: Some(2000),
            last: None,
        },
        // National Foundation Day
        HolidayRule::YearlyDay {
            month: 2,
            day: 11,
            first: None,
            last: None,
        },
        // Emperor's Birthday
        HolidayRule::YearlyDay {
            month: 2,
            day: 23,
            first: Some(2020),
            last: None,
        },
        // Showa Day
        HolidayRule::YearlyDay {
            month: 4,
            day: 29,
            first: None,
            last: None,
        },
        // Constitution Memorial Day
        HolidayRule::YearlyDay {
            month: 5,
            day: 3,
            first: None,
            last: None,
        },
        // Greenery Day
        HolidayRule::YearlyDay {
            month: 5,
            day: 4,
            first: None,
            last: None,
        },
        // Children's Day
        HolidayRule::YearlyDay {
            month: 5,
            day: 5,
            first: None,
            last: None,
        },
        // Marine Day, 3rd Monday of July
        HolidayRule::MonthWeekday {
            month: 7,
            weekday: Weekday::Mon,
            nth: NthWeek::Third,
            first: Some(2003),
            last: None,
        },
        // Mountain Day
        HolidayRule::YearlyDay {
            month: 8,
            day: 11,
            first: Some(2016),
            last: None,
        },
        // Respect-for-the-Aged Day, 3rd Monday of September
        HolidayRule::MonthWeekday {
            month: 9,
            weekday: Weekday::Mon,
            nth: NthWeek::Third,
            first: Some(2003),
            last: None,
        },
        // Sports Day, 2nd Monday of October
        HolidayRule::MonthWeekday {
            month: 10,
            weekday: Weekday::Mon,
            nth: NthWeek::Second,
            first: Some(2000),
            last: None,
        },
        // Culture Day
        HolidayRule::YearlyDay {
            month: 11,
            day: 3,
            first: None,
            last: None,
        },
        // Labor Thanksgiving Day
        HolidayRule::YearlyDay {
            month: 11,
            day: 23,
            first: None,
            last: None,
        },
    ]
}

/// Builder wiring a rule list and a first-day-of-week setting into a
/// [`HolidayCalendar`].
#[derive(Debug, Clone)]
pub struct OfficeCalendar {
    rules: Vec<HolidayRule>,
    first_day_of_week: Weekday,
    cal: HolidayCalendar,
}

impl OfficeCalendar {
    /// Create a calendar builder with the default Japanese office rules and
    /// Monday as the first day of the week. Extra rules may be supplied as
    /// JSON through the `EXTRA_HOLIDAY_RULES` environment variable. The
    /// holiday table is expanded over the default range (2000-2050) when
    /// `populate` is set to `true`.
    pub fn with_default_rules(populate: bool) -> OfficeCalendar {
        let mut rules = japanese_office_rules();
        if let Ok(extra) = env::var("EXTRA_HOLIDAY_RULES") {
            let mut extra: Vec<HolidayRule> = serde_json::from_str(&extra).unwrap();
            rules.append(&mut extra);
        }
        let mut oc = OfficeCalendar {
            rules,
            first_day_of_week: Weekday::Mon,
            cal: HolidayCalendar::new(BTreeSet::new(), Weekday::Mon),
        };
        if populate {
            oc.populate_cal(None, None);
        }
        oc
    }

    /// Add an ad-hoc holiday rule to the rule list.
    pub fn add_rule(&mut self, rule: HolidayRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn set_first_day_of_week(&mut self, day: Weekday) -> &mut Self {
        self.first_day_of_week = day;
        self
    }

    /// Expand the holiday table for the given `start` and `end` years
    /// (inclusively, defaults to 2000 and 2050 if None, None are given).
    pub fn populate_cal(&mut self, start: Option<i32>, end: Option<i32>) -> &mut Self {
        let start = start.unwrap_or(2000);
        let end = end.unwrap_or(2050);
        self.cal = HolidayCalendar::new(
            expand_rules(&self.rules, start, end),
            self.first_day_of_week,
        );
        self
    }

    pub fn get_cal(&self) -> HolidayCalendar {
        self.cal.clone()
    }
}
