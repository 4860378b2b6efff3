// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Concrete calendars users set up, checked day by day.

use chrono::{Datelike, Weekday};
use lunarcal_core::{
    DEFAULT_MAX_OCCURRENCES, DateRange, DateTimeRange, expand, is_date_included, next_occurrence,
    occurrences_between, summary,
};

use crate::common::{date, datetime, rule};

#[test]
fn weekly_mon_wed_fri_ten_times() {
    // Arrange
    let rule = rule("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10");
    let anchor = datetime(2025, 1, 6, 9);

    // Act
    let occurrences = expand(anchor, &rule, DEFAULT_MAX_OCCURRENCES);

    // Assert
    let days: Vec<u32> = occurrences.iter().map(Datelike::day).collect();
    assert_eq!(days, vec![6, 8, 10, 13, 15, 17, 20, 22, 24, 27]);
    assert!(occurrences.iter().all(|o| o.time() == anchor.time()));
    assert_eq!(
        summary(&rule),
        "every week on Mon, Wed, Fri for 10 occurrences"
    );
}

#[test]
fn monthly_on_31st_skips_short_months() {
    // Arrange
    let rule = rule("FREQ=MONTHLY;COUNT=6");

    // Act
    let occurrences = expand(datetime(2025, 1, 31, 12), &rule, DEFAULT_MAX_OCCURRENCES);

    // Assert
    let months: Vec<u32> = occurrences.iter().map(Datelike::month).collect();
    assert_eq!(months, vec![1, 3, 5, 7, 8, 10]);
}

#[test]
fn month_end_via_negative_month_day() {
    let rule = rule("FREQ=MONTHLY;BYMONTHDAY=-1");
    let occurrences = expand(datetime(2024, 1, 31, 8), &rule, 3);
    assert_eq!(
        occurrences,
        vec![
            datetime(2024, 1, 31, 8),
            datetime(2024, 2, 29, 8),
            datetime(2024, 3, 31, 8)
        ]
    );
}

#[test]
fn second_to_last_sunday_every_other_month() {
    let rule = rule("FREQ=MONTHLY;INTERVAL=2;BYDAY=-2SU");
    let occurrences = expand(datetime(2025, 1, 1, 8), &rule, 3);
    assert_eq!(
        occurrences,
        vec![
            datetime(2025, 1, 19, 8),
            datetime(2025, 3, 23, 8),
            datetime(2025, 5, 18, 8)
        ]
    );
    assert!(occurrences.iter().all(|o| o.weekday() == Weekday::Sun));
}

#[test]
fn yearly_birthday_on_leap_day() {
    let rule = rule("FREQ=YEARLY;UNTIL=20400101");
    let occurrences = expand(datetime(2000, 2, 29, 0), &rule, DEFAULT_MAX_OCCURRENCES);
    let years: Vec<i32> = occurrences.iter().map(Datelike::year).collect();
    assert_eq!(years, vec![2000, 2004, 2008, 2012, 2016, 2020, 2024, 2028, 2032, 2036]);
}

#[test]
fn weekdays_with_sunday_week_start() {
    // Arrange: biweekly on weekends, weeks starting on Sunday
    let rule = rule("FREQ=WEEKLY;INTERVAL=2;BYDAY=SA,SU;WKST=SU");

    // Act
    let range = DateTimeRange::days(DateRange::new(date(2025, 1, 1), date(2025, 1, 31)));
    let occurrences = occurrences_between(datetime(2025, 1, 4, 10), &rule, range, 10);

    // Assert: the week of Sun 01-05 is skipped, Sun 01-12 and Sat 01-18 share a week
    assert_eq!(
        occurrences,
        vec![
            datetime(2025, 1, 4, 10),
            datetime(2025, 1, 12, 10),
            datetime(2025, 1, 18, 10),
            datetime(2025, 1, 26, 10)
        ]
    );
}

#[test]
fn queries_agree_with_each_other() {
    let rule = rule("FREQ=DAILY;INTERVAL=3;BYMONTH=2");
    let anchor = datetime(2025, 1, 30, 7);

    let next = next_occurrence(anchor, &rule, datetime(2025, 2, 10, 0));
    assert_eq!(next, Some(datetime(2025, 2, 11, 7)));
    assert!(is_date_included(date(2025, 2, 11), anchor, &rule));
    assert!(!is_date_included(date(2025, 2, 10), anchor, &rule));
    assert!(!is_date_included(date(2025, 1, 30), anchor, &rule));
}
