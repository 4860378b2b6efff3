// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDateTime, NaiveTime};

use crate::config::LeadTime;
use crate::datetime::start_of_day;
use crate::error::ReminderError;

/// When to remind the user of an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reminder {
    /// A fixed amount of time before the occurrence starts
    Before(LeadTime),

    /// At a fixed time of day on the occurrence's day
    AtTimeOfDay(NaiveTime),
}

impl Reminder {
    /// When the reminder fires for an occurrence starting at `start`.
    ///
    /// All-day occurrences count from midnight. Returns `None` when the subtraction overflows.
    pub fn trigger_at(&self, start: NaiveDateTime, all_day: bool) -> Option<NaiveDateTime> {
        match *self {
            Reminder::Before(lead) => {
                let start = if all_day { start_of_day(start.date()) } else { start };
                start.checked_sub_signed(lead.duration())
            }
            Reminder::AtTimeOfDay(time) => Some(start.date().and_time(time)),
        }
    }

    /// Computes the trigger and checks that it lies at least `min_lead` after `now`.
    ///
    /// Fixed time-of-day reminders and all-day occurrences are not checked.
    ///
    /// ## Errors
    ///
    /// Returns [`ReminderError::TooSoon`] when the trigger is in the past or too close to `now`.
    pub fn validate(
        &self,
        now: NaiveDateTime,
        start: NaiveDateTime,
        all_day: bool,
        min_lead: LeadTime,
    ) -> Result<NaiveDateTime, ReminderError> {
        let trigger = self.trigger_at(start, all_day).unwrap_or(NaiveDateTime::MIN);
        let checked = matches!(self, Reminder::Before(_)) && !all_day;
        if checked && trigger < now.checked_add_signed(min_lead.0).unwrap_or(NaiveDateTime::MAX) {
            return Err(ReminderError::TooSoon {
                trigger,
                now,
                min_lead_minutes: min_lead.0.num_minutes(),
            });
        }
        Ok(trigger)
    }
}
