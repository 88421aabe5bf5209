//! Lock-time parsing in the local timezone.
//!
//! Lives in its own test binary because it sets `TZ` for the process.

use std::path::Path;

use serde_json::json;
use tfchain_protocol::types::OutputLock;

#[test]
fn local_dates_follow_daylight_saving() {
    if !Path::new("/usr/share/zoneinfo/Europe/Brussels").exists() {
        eprintln!("skipping: no tz database");
        return;
    }
    std::env::set_var("TZ", "Europe/Brussels");

    // CEST (+02:00) and CET (+01:00), whatever the current date is
    let summer: OutputLock = "30/06/2020".parse().unwrap();
    let winter: OutputLock = "30/11/2020".parse().unwrap();
    assert_eq!(summer.value(), 1_593_468_000);
    assert_eq!(winter.value(), 1_606_690_800);

    let from_json = OutputLock::from_json(&json!("30/11/2020"), "locktime").unwrap();
    assert_eq!(from_json, winter);

    // 02:30 never happens on the spring-forward night
    assert!("29/03/2020 02:30".parse::<OutputLock>().is_err());
    // 02:30 happens twice on the fall-back night; the first one wins
    let repeated: OutputLock = "25/10/2020 02:30".parse().unwrap();
    assert_eq!(repeated.value(), 1_603_585_800);
}
