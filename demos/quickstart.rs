use chrono::Local;
use waqt::{Coordinate, PrayerSchedule};

fn main() {
    // Mecca; swap in your own coordinate and let your device clock supply
    // the date and UTC offset.
    let coordinate = Coordinate::from_degrees(21.4225, 39.8262);
    let now = Local::now();

    let schedule = PrayerSchedule::compute(coordinate, &now);
    for pt in schedule.iter() {
        println!("{pt}");
    }

    let next = schedule.next(&now);
    println!("next: {next}");
}
