// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Stored events expanded into occurrences and their reminders.

use chrono::Duration;
use lunarcal_core::{
    DateRange, DateTimeRange, LeadTime, RecurringEvent, Reminder, ReminderError,
};

use crate::common::{date, datetime};

fn january() -> DateTimeRange {
    DateTimeRange::days(DateRange::month(2025, 1).unwrap())
}

#[test]
fn expands_stored_event_with_exclusions() {
    // Arrange
    let event = RecurringEvent::new("yoga", datetime(2025, 1, 6, 19), datetime(2025, 1, 6, 20))
        .with_rrule("FREQ=WEEKLY;BYDAY=MO,TH")
        .with_exclusions([date(2025, 1, 9), date(2025, 1, 20)]);

    // Act
    let occurrences = event.occurrences(january(), 100);

    // Assert
    let days: Vec<_> = occurrences.iter().map(|o| o.start.date()).collect();
    assert_eq!(
        days,
        vec![
            date(2025, 1, 6),
            date(2025, 1, 13),
            date(2025, 1, 16),
            date(2025, 1, 23),
            date(2025, 1, 27),
            date(2025, 1, 30)
        ]
    );
    assert!(occurrences.iter().all(|o| o.end - o.start == Duration::hours(1)));
}

#[test]
fn caps_occurrences_after_exclusions() {
    let event = RecurringEvent::new("daily", datetime(2025, 1, 1, 7), datetime(2025, 1, 1, 8))
        .with_rrule("FREQ=DAILY")
        .with_exclusions([date(2025, 1, 2)]);
    let occurrences = event.occurrences(january(), 3);
    let days: Vec<_> = occurrences.iter().map(|o| o.start.date()).collect();
    assert_eq!(days, vec![date(2025, 1, 1), date(2025, 1, 3), date(2025, 1, 4)]);
}

#[test]
fn malformed_rule_falls_back_to_single_occurrence() {
    let event = RecurringEvent::new("odd", datetime(2025, 1, 15, 9), datetime(2025, 1, 15, 9))
        .with_rrule("FREQ=WEEKLY;BYSETPOS=1");
    assert!(!event.is_recurring());
    assert_eq!(event.occurrences(january(), 10).len(), 1);
}

#[test]
fn validates_reminders_per_occurrence() {
    // Arrange
    let event = RecurringEvent::new("call", datetime(2025, 1, 6, 9), datetime(2025, 1, 6, 10))
        .with_rrule("FREQ=DAILY;COUNT=3");
    let reminder = Reminder::Before(LeadTime::from(Duration::minutes(30)));
    let now = datetime(2025, 1, 7, 8) + Duration::minutes(29);

    // Act
    let results: Vec<_> = event
        .occurrences(january(), 10)
        .iter()
        .map(|o| reminder.validate(now, o.start, event.all_day, LeadTime::default()))
        .collect();

    // Assert: the first two triggers are past or too close, the third is fine
    assert!(matches!(results[0], Err(ReminderError::TooSoon { .. })));
    assert!(matches!(results[1], Err(ReminderError::TooSoon { .. })));
    assert_eq!(results[2], Ok(datetime(2025, 1, 8, 8) + Duration::minutes(30)));
}
