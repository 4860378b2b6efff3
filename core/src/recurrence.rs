// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion of recurrence rules into concrete occurrences.
//!
//! Every entry point is bounded: by the rule's own count or until date, by a caller-supplied
//! cap, and by a guard against rules that can never produce another occurrence.

mod event;
mod expand;
mod summary;

use chrono::{NaiveDate, NaiveDateTime};
use lunarcal_rrule::RecurrenceRule;

pub use crate::recurrence::event::{EventOccurrence, RecurringEvent};
pub use crate::recurrence::summary::summary;

use crate::datetime::DateTimeRange;
use crate::recurrence::expand::Expander;

/// Default upper bound on the occurrences produced by one expansion.
pub const DEFAULT_MAX_OCCURRENCES: usize = 365;

/// Upper bound on the occurrences scanned while looking for a window.
const MAX_SCAN: usize = 100_000;

/// Occurrences of `rule` anchored at `anchor`, at most `max_occurrences` of them.
///
/// Truncation at the cap is silent.
pub fn expand(
    anchor: NaiveDateTime,
    rule: &RecurrenceRule,
    max_occurrences: usize,
) -> Vec<NaiveDateTime> {
    Expander::new(anchor, rule).take(max_occurrences).collect()
}

/// Occurrences starting inside the half-open `range`, at most `max_occurrences` of them.
pub fn occurrences_between(
    anchor: NaiveDateTime,
    rule: &RecurrenceRule,
    range: DateTimeRange,
    max_occurrences: usize,
) -> Vec<NaiveDateTime> {
    occurrences_in(anchor, rule, range)
        .take(max_occurrences)
        .collect()
}

/// The earliest occurrence at or after `after`, `None` once the rule has terminated.
pub fn next_occurrence(
    anchor: NaiveDateTime,
    rule: &RecurrenceRule,
    after: NaiveDateTime,
) -> Option<NaiveDateTime> {
    occurrences_in(anchor, rule, DateTimeRange::from(after)).next()
}

/// Whether any of the first [`DEFAULT_MAX_OCCURRENCES`] occurrences falls on `date`,
/// whatever its time of day.
pub fn is_date_included(date: NaiveDate, anchor: NaiveDateTime, rule: &RecurrenceRule) -> bool {
    Expander::new(anchor, rule)
        .take(DEFAULT_MAX_OCCURRENCES)
        .map(|dt| dt.date())
        .take_while(|d| *d <= date)
        .any(|d| d == date)
}

fn occurrences_in(
    anchor: NaiveDateTime,
    rule: &RecurrenceRule,
    range: DateTimeRange,
) -> impl Iterator<Item = NaiveDateTime> + '_ {
    Expander::new(anchor, rule)
        .fast_forward(range.start.date())
        .take(MAX_SCAN)
        .skip_while(move |dt| *dt < range.start)
        .take_while(move |dt| *dt < range.end)
}
