// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical text form of recurrence rules.
//!
//! Parts are written in a fixed order: `FREQ`, `INTERVAL` (only when not 1),
//! `BYMONTH`, `BYMONTHDAY`, `BYDAY`, `WKST`, then `COUNT` or `UNTIL`.

use std::fmt::{self, Display};

use crate::error::RRuleError;
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_FREQ_DAILY,
    KW_RRULE_FREQ_MONTHLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::rule::{Frequency, RecurrenceRule, Termination, WeekDay, WeekDayNum};

/// Serialize a rule to its canonical `RRULE` value, without the `RRULE:` prefix.
///
/// ## Errors
///
/// Returns an error if the rule violates one of the invariants checked by
/// [`RecurrenceRule::validate`].
pub fn generate_rule(rule: &RecurrenceRule) -> Result<String, RRuleError> {
    rule.validate()?;
    Ok(rule.to_string())
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;

        if self.interval != 1 {
            write!(f, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }

        write_list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        write_list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        write_list(f, KW_RRULE_BYDAY, &self.by_day)?;

        if let Some(wkst) = self.wkst {
            write!(f, ";{KW_RRULE_WKST}={wkst}")?;
        }

        match self.termination {
            Some(Termination::Count(n)) => write!(f, ";{KW_RRULE_COUNT}={n}"),
            Some(Termination::Until(d)) => {
                write!(f, ";{KW_RRULE_UNTIL}={}", d.format("%Y%m%d"))
            }
            None => Ok(()),
        }
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, kw: &str, values: &[T]) -> fmt::Result {
    if values.is_empty() {
        return Ok(());
    }

    write!(f, ";{kw}=")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "{KW_RRULE_FREQ_DAILY}"),
            Frequency::Weekly => write!(f, "{KW_RRULE_FREQ_WEEKLY}"),
            Frequency::Monthly => write!(f, "{KW_RRULE_FREQ_MONTHLY}"),
            Frequency::Yearly => write!(f, "{KW_RRULE_FREQ_YEARLY}"),
        }
    }
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.occurrence {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.day)
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekDay::Sunday => write!(f, "{KW_DAY_SU}"),
            WeekDay::Monday => write!(f, "{KW_DAY_MO}"),
            WeekDay::Tuesday => write!(f, "{KW_DAY_TU}"),
            WeekDay::Wednesday => write!(f, "{KW_DAY_WE}"),
            WeekDay::Thursday => write!(f, "{KW_DAY_TH}"),
            WeekDay::Friday => write!(f, "{KW_DAY_FR}"),
            WeekDay::Saturday => write!(f, "{KW_DAY_SA}"),
        }
    }
}
