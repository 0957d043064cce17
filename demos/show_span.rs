use bizcal::calendar::from_ymd;
use bizcal::holidays::OfficeCalendar;
use chrono::{Duration, NaiveDate};
/// example to show office holidays over a year range
use std::env::args;
fn main() {
    let args: Vec<String> = args().collect();
    let len = args.len();
    if len < 2 {
        panic!("Usage: {} first [last]", args[0]);
    }
    let first: i32 = (&args[1]).parse().unwrap();
    let last: i32 = if len > 2 {
        (&args[2]).parse().unwrap()
    } else {
        first
    };
    let mut oc = OfficeCalendar::with_default_rules(false);
    let oc = oc.populate_cal(Some(first), Some(last));
    let cal = oc.get_cal();
    let mut date = from_ymd(first, 1, 1);
    let last_date = from_ymd(last, 12, 31);
    let mut holidays: Vec<NaiveDate> = Vec::new();
    while date <= last_date {
        if cal.is_holiday(date) {
            holidays.push(date);
        }
        date = date + Duration::days(1);
    }
    println!("holidays: {:?}", holidays);
}
