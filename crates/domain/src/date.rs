use chrono::prelude::*;
use chrono::Duration;
use chrono_tz::Tz;

/// Day names indexed Sunday first, matching `Weekday::num_days_from_sunday`
pub const DAY_NAMES: [&str; 7] = [
    "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
];

/// ISO-8601 week number of the given date.
///
/// The date is shifted to the Thursday of its (Monday-start) week and the week is
/// counted from the 1st of January of that Thursday's year. Week keys are persisted,
/// so this must keep returning the exact same numbers.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    // Monday = 1 .. Sunday = 7
    let day_num = i64::from(date.weekday().number_from_monday());
    let thursday = date + Duration::days(4 - day_num);
    let days_since_year_start = thursday.ordinal0();
    (days_since_year_start + 7) / 7
}

pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

pub fn weekday_from_day_name(name: &str) -> Option<Weekday> {
    match name {
        "lundi" => Some(Weekday::Mon),
        "mardi" => Some(Weekday::Tue),
        "mercredi" => Some(Weekday::Wed),
        "jeudi" => Some(Weekday::Thu),
        "vendredi" => Some(Weekday::Fri),
        "samedi" => Some(Weekday::Sat),
        "dimanche" => Some(Weekday::Sun),
        _ => None,
    }
}

/// July and August are closed for scheduling
pub fn is_summer_recess(date: NaiveDate) -> bool {
    date.month() == 7 || date.month() == 8
}

pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Wall clock time in `tz` of the given unix timestamp in millis
pub fn localize(timestamp_millis: i64, tz: &Tz) -> Option<NaiveDateTime> {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.with_timezone(tz).naive_local())
}

pub fn to_timestamp_millis(local: &NaiveDateTime, tz: &Tz) -> i64 {
    if let Some(dt) = tz.from_local_datetime(local).earliest() {
        return dt.timestamp_millis();
    }
    // Wall clock time skipped by a DST transition resolves to the time after the gap
    match tz.from_local_datetime(&(*local + Duration::hours(1))).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => Utc.from_utc_datetime(local).timestamp_millis(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono_tz::Europe::Paris;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn it_computes_iso_week_numbers() {
        assert_eq!(iso_week_number(date(2025, 3, 3)), 10);
        assert_eq!(iso_week_number(date(2025, 7, 14)), 29);
        assert_eq!(iso_week_number(date(2024, 1, 1)), 1);
    }

    #[test]
    fn dec_31_can_land_in_week_1_of_next_year() {
        assert_eq!(iso_week_number(date(2024, 12, 31)), 1);
        assert_eq!(iso_week_number(date(2025, 12, 29)), 1);
        assert_eq!(iso_week_number(date(2019, 12, 30)), 1);
    }

    #[test]
    fn jan_1_can_land_in_last_week_of_previous_year() {
        assert_eq!(iso_week_number(date(2021, 1, 1)), 53);
        assert_eq!(iso_week_number(date(2022, 1, 1)), 52);
        assert_eq!(iso_week_number(date(2023, 1, 1)), 52);
        assert_eq!(iso_week_number(date(2027, 1, 1)), 53);
    }

    #[test]
    fn it_agrees_with_chrono_iso_week() {
        let mut day = date(2015, 1, 1);
        let end = date(2035, 12, 31);
        while day <= end {
            assert_eq!(iso_week_number(day), day.iso_week().week(), "{}", day);
            day += Duration::days(1);
        }
    }

    #[test]
    fn it_names_days_in_french() {
        assert_eq!(day_name(date(2025, 3, 2)), "dimanche");
        assert_eq!(day_name(date(2025, 3, 3)), "lundi");
        assert_eq!(day_name(date(2025, 3, 7)), "vendredi");
        assert_eq!(day_name(date(2025, 3, 8)), "samedi");
        for name in DAY_NAMES.iter() {
            let wday = weekday_from_day_name(name).unwrap();
            assert_eq!(DAY_NAMES[wday.num_days_from_sunday() as usize], *name);
        }
        assert!(weekday_from_day_name("Lundi").is_none());
    }

    #[test]
    fn summer_recess_covers_july_and_august() {
        assert!(!is_summer_recess(date(2025, 6, 30)));
        assert!(is_summer_recess(date(2025, 7, 1)));
        assert!(is_summer_recess(date(2025, 8, 31)));
        assert!(!is_summer_recess(date(2025, 9, 1)));
    }

    #[test]
    fn it_finds_monday_of_week() {
        assert_eq!(monday_of_week(date(2025, 3, 3)), date(2025, 3, 3));
        assert_eq!(monday_of_week(date(2025, 3, 9)), date(2025, 3, 3));
        assert_eq!(monday_of_week(date(2025, 1, 1)), date(2024, 12, 30));
    }

    #[test]
    fn it_converts_between_timestamps_and_wall_clock() {
        // 2025-03-03T08:00:00Z is 09:00 in Paris (UTC+1)
        let ts = 1_740_988_800_000;
        let local = localize(ts, &Paris).unwrap();
        assert_eq!(local, date(2025, 3, 3).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(to_timestamp_millis(&local, &Paris), ts);
    }

    #[test]
    fn wall_clock_time_in_dst_gap_resolves_after_the_gap() {
        // Paris skips from 02:00 to 03:00 on 2025-03-30
        let skipped = date(2025, 3, 30).and_hms_opt(2, 30, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 3, 30, 1, 30, 0).unwrap();
        assert_eq!(to_timestamp_millis(&skipped, &Paris), expected.timestamp_millis());
        assert_eq!(
            localize(expected.timestamp_millis(), &Paris),
            Some(date(2025, 3, 30).and_hms_opt(3, 30, 0).unwrap())
        );

        // Ambiguous fall-back times keep the earliest instant
        let repeated = date(2025, 10, 26).and_hms_opt(2, 30, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 10, 26, 0, 30, 0).unwrap();
        assert_eq!(to_timestamp_millis(&repeated, &Paris), expected.timestamp_millis());
    }
}
