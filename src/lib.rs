//! Business-calendar-aware date arithmetic.
//!
//! A [`HolidayCalendar`] holds an immutable set of holiday dates plus the
//! configured first day of the week, and hands out [`CalendarInstant`]
//! values bound to a base timestamp. The instant carries all the
//! arithmetic: component accessors/mutators, calendar/business-day
//! advancement, period boundaries and comparisons.
//!
//! Holiday sets are built from serializable rules, see [`holidays`].

pub mod calendar;
pub mod holidays;
pub mod instant;

pub use calendar::HolidayCalendar;
pub use instant::CalendarInstant;
