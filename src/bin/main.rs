use bizcal::holidays::OfficeCalendar;
fn main() {
    let mut oc = OfficeCalendar::with_default_rules(false);
    oc.populate_cal(Some(2024), Some(2026));
    let cal = oc.get_cal();
    println!("{:?}", cal);
}
