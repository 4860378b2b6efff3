// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::OnceLock;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use lunarcal_rrule::{RecurrenceRule, parse_rule};

use crate::datetime::DateTimeRange;
use crate::recurrence::occurrences_in;

/// One concrete instance of an event, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct EventOccurrence {
    /// Identifier of the event this occurrence belongs to
    pub event_id: String,

    /// Start of this instance
    pub start: NaiveDateTime,

    /// End of this instance, keeping the event's duration
    pub end: NaiveDateTime,
}

/// An event as stored, with its recurrence rule kept as text.
#[derive(Debug, Clone)]
pub struct RecurringEvent {
    /// Identifier of the event
    pub id: String,

    /// Start of the first instance
    pub start: NaiveDateTime,

    /// End of the first instance
    pub end: NaiveDateTime,

    /// Whether the event spans whole days
    pub all_day: bool,

    /// Days on which an occurrence is skipped
    pub exclusions: Vec<NaiveDate>,

    rrule: Option<String>,
    rule: OnceLock<Option<RecurrenceRule>>,
}

impl RecurringEvent {
    /// A non-recurring event.
    pub fn new(id: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            all_day: false,
            exclusions: Vec::new(),
            rrule: None,
            rule: OnceLock::new(),
        }
    }

    /// Marks the event as spanning whole days.
    #[must_use]
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Sets the recurrence rule text.
    #[must_use]
    pub fn with_rrule(mut self, rrule: impl Into<String>) -> Self {
        self.set_rrule(Some(rrule.into()));
        self
    }

    /// Sets the excluded days.
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.exclusions = exclusions.into_iter().collect();
        self
    }

    /// The stored rule text.
    pub fn rrule(&self) -> Option<&str> {
        self.rrule.as_deref()
    }

    /// Replaces the rule text, dropping the previously parsed rule.
    pub fn set_rrule(&mut self, rrule: Option<String>) {
        self.rrule = rrule;
        self.rule = OnceLock::new();
    }

    /// The parsed rule, parsed once and cached.
    ///
    /// Rule text that fails to parse is logged and the event is treated as non-recurring.
    pub fn rule(&self) -> Option<&RecurrenceRule> {
        self.rule
            .get_or_init(|| {
                let text = self.rrule.as_deref()?;
                match parse_rule(text) {
                    Ok(rule) => Some(rule),
                    Err(err) => {
                        tracing::warn!(event_id = %self.id, %err, "ignoring unparsable recurrence rule");
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Whether the event repeats.
    pub fn is_recurring(&self) -> bool {
        self.rule().is_some()
    }

    /// Length of each occurrence.
    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// Whether occurrences on `date` are skipped.
    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.exclusions.contains(&date)
    }

    /// Occurrences starting inside `range`, excluded days removed, at most `max_occurrences`.
    pub fn occurrences(&self, range: DateTimeRange, max_occurrences: usize) -> Vec<EventOccurrence> {
        let starts: Box<dyn Iterator<Item = NaiveDateTime> + '_> = match self.rule() {
            Some(rule) => Box::new(occurrences_in(self.start, rule, range)),
            None => Box::new(range.contains(self.start).then_some(self.start).into_iter()),
        };

        let duration = self.duration();
        starts
            .filter(|start| !self.is_excluded(start.date()))
            .take(max_occurrences)
            .map(|start| EventOccurrence {
                event_id: self.id.clone(),
                start,
                end: start.checked_add_signed(duration).unwrap_or(NaiveDateTime::MAX),
            })
            .collect()
    }
}
