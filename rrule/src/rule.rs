// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule type definitions.

use chrono::NaiveDate;

use crate::error::RRuleError;
use crate::keyword::{KW_RRULE_BYDAY, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY};

/// Recurrence rule
///
/// Build one with [`RecurrenceRule::new`] and the `with_*` methods, which
/// validate their input, or obtain one from [`crate::parse_rule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Frequency of recurrence
    pub freq: Frequency,

    /// Interval between recurrences, at least 1
    pub interval: u32,

    /// How the rule ends, `None` for an unbounded rule
    pub termination: Option<Termination>,

    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,

    /// Day of month specifier, negative values count from the end of the month
    pub by_month_day: Vec<i8>,

    /// Month specifier
    pub by_month: Vec<u8>,

    /// Start day of week
    pub wkst: Option<WeekDay>,
}

impl RecurrenceRule {
    /// Creates an unbounded rule repeating every single unit of `freq`.
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            termination: None,
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_month: Vec::new(),
            wkst: None,
        }
    }

    /// Repeat every `interval` units.
    ///
    /// ## Errors
    ///
    /// Returns [`RRuleError::InvalidInterval`] if `interval` is zero.
    pub fn with_interval(mut self, interval: u32) -> Result<Self, RRuleError> {
        if interval == 0 {
            return Err(RRuleError::InvalidInterval);
        }
        self.interval = interval;
        Ok(self)
    }

    /// Stop after `count` occurrences, replacing any previous termination.
    ///
    /// ## Errors
    ///
    /// Returns [`RRuleError::InvalidCount`] if `count` is zero.
    pub fn with_count(mut self, count: u32) -> Result<Self, RRuleError> {
        if count == 0 {
            return Err(RRuleError::InvalidCount);
        }
        self.termination = Some(Termination::Count(count));
        Ok(self)
    }

    /// Stop after the given date (inclusive), replacing any previous termination.
    #[must_use]
    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.termination = Some(Termination::Until(until));
        self
    }

    /// Restrict or expand the rule by weekdays.
    ///
    /// ## Errors
    ///
    /// Returns [`RRuleError::InvalidValue`] for an ordinal outside `-53..=-1` and `1..=53`.
    pub fn with_by_day(
        mut self,
        days: impl IntoIterator<Item = impl Into<WeekDayNum>>,
    ) -> Result<Self, RRuleError> {
        let days: Vec<WeekDayNum> = days.into_iter().map(Into::into).collect();
        for day in &days {
            if let Some(n) = day.occurrence
                && !(1..=53).contains(&n.unsigned_abs())
            {
                return Err(RRuleError::InvalidValue {
                    part: KW_RRULE_BYDAY,
                    value: i32::from(n),
                });
            }
        }
        self.by_day = days;
        Ok(self)
    }

    /// Restrict or expand the rule by days of the month.
    ///
    /// ## Errors
    ///
    /// Returns [`RRuleError::InvalidValue`] for values outside `-31..=-1` and `1..=31`.
    pub fn with_by_month_day(
        mut self,
        days: impl IntoIterator<Item = i8>,
    ) -> Result<Self, RRuleError> {
        let days: Vec<i8> = days.into_iter().collect();
        if let Some(&bad) = days.iter().find(|d| !(1..=31).contains(&d.unsigned_abs())) {
            return Err(RRuleError::InvalidValue {
                part: KW_RRULE_BYMONTHDAY,
                value: i32::from(bad),
            });
        }
        self.by_month_day = days;
        Ok(self)
    }

    /// Restrict or expand the rule by months.
    ///
    /// ## Errors
    ///
    /// Returns [`RRuleError::InvalidValue`] for values outside `1..=12`.
    pub fn with_by_month(mut self, months: impl IntoIterator<Item = u8>) -> Result<Self, RRuleError> {
        let months: Vec<u8> = months.into_iter().collect();
        if let Some(&bad) = months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(RRuleError::InvalidValue {
                part: KW_RRULE_BYMONTH,
                value: i32::from(bad),
            });
        }
        self.by_month = months;
        Ok(self)
    }

    /// Set the day a week starts on.
    #[must_use]
    pub fn with_wkst(mut self, wkst: WeekDay) -> Self {
        self.wkst = Some(wkst);
        self
    }

    /// The maximum number of occurrences, if the rule is count-terminated.
    pub fn count(&self) -> Option<u32> {
        match self.termination {
            Some(Termination::Count(n)) => Some(n),
            _ => None,
        }
    }

    /// The last date an occurrence may fall on, if the rule is date-terminated.
    pub fn until(&self) -> Option<NaiveDate> {
        match self.termination {
            Some(Termination::Until(d)) => Some(d),
            _ => None,
        }
    }

    /// Checks the invariants the builder methods enforce, for rules assembled by hand.
    ///
    /// ## Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), RRuleError> {
        if self.interval == 0 {
            return Err(RRuleError::InvalidInterval);
        }
        if self.count() == Some(0) {
            return Err(RRuleError::InvalidCount);
        }
        Self::new(self.freq)
            .with_by_day(self.by_day.iter().copied())?
            .with_by_month_day(self.by_month_day.iter().copied())?
            .with_by_month(self.by_month.iter().copied())?;
        Ok(())
    }
}

/// How a recurrence ends. `COUNT` and `UNTIL` are mutually exclusive in RFC 5545.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Stop after this many occurrences
    Count(u32),

    /// Stop after this date, inclusive
    Until(NaiveDate),
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,

    /// Occurrence in month, negative values count from the end (optional)
    pub occurrence: Option<i8>,
}

impl WeekDayNum {
    /// The `n`-th `day` of the month, e.g. `WeekDayNum::nth(-1, WeekDay::Friday)` for the last Friday.
    pub fn nth(n: i8, day: WeekDay) -> Self {
        Self {
            day,
            occurrence: Some(n),
        }
    }
}

impl From<WeekDay> for WeekDayNum {
    fn from(day: WeekDay) -> Self {
        Self {
            day,
            occurrence: None,
        }
    }
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(missing_docs)]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for WeekDay {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => WeekDay::Monday,
            chrono::Weekday::Tue => WeekDay::Tuesday,
            chrono::Weekday::Wed => WeekDay::Wednesday,
            chrono::Weekday::Thu => WeekDay::Thursday,
            chrono::Weekday::Fri => WeekDay::Friday,
            chrono::Weekday::Sat => WeekDay::Saturday,
            chrono::Weekday::Sun => WeekDay::Sunday,
        }
    }
}

impl From<WeekDay> for chrono::Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Monday => chrono::Weekday::Mon,
            WeekDay::Tuesday => chrono::Weekday::Tue,
            WeekDay::Wednesday => chrono::Weekday::Wed,
            WeekDay::Thursday => chrono::Weekday::Thu,
            WeekDay::Friday => chrono::Weekday::Fri,
            WeekDay::Saturday => chrono::Weekday::Sat,
            WeekDay::Sunday => chrono::Weekday::Sun,
        }
    }
}
