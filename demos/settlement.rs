use bizcal::holidays::OfficeCalendar;
use chrono::NaiveDate;

/// T+2 settlement from a trade timestamp
fn main() {
    let cal = OfficeCalendar::with_default_rules(true).get_cal();
    let trade = NaiveDate::from_ymd_opt(2020, 12, 28)
        .unwrap()
        .and_hms_opt(15, 30, 0)
        .unwrap();
    let mut inst = cal.create(trade);
    inst.advance_business_days(2).start_of_day();
    println!("trade {} settles {}", trade, inst.to_datetime());
}
