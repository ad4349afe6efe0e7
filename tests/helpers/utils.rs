use dispo_sdk::ID;

pub fn unique_email() -> String {
    format!("{}@example.com", ID::new())
}

/// Paris wall clock times of Monday 2025-03-03 used throughout the tests, in UTC millis
pub const MONDAY_S10_9AM: i64 = 1_740_988_800_000;
pub const MONDAY_S10_10AM: i64 = 1_740_992_400_000;
pub const SUMMER_MONDAY_9AM: i64 = 1_752_476_400_000;
pub const SUMMER_MONDAY_10AM: i64 = 1_752_480_000_000;
