// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period-stepping expansion of a recurrence rule.

use std::collections::VecDeque;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use lunarcal_rrule::{Frequency, RecurrenceRule, Termination, WeekDay, WeekDayNum};

use crate::datetime::{add_months, days_in_month};

/// A run of this many consecutive periods without a single candidate ends the sequence.
pub(crate) const MAX_EMPTY_PERIODS: u32 = 3000;

/// Lazily yields the occurrences of a rule, in ascending order.
#[derive(Debug)]
pub(crate) struct Expander<'a> {
    rule: &'a RecurrenceRule,
    anchor: NaiveDate,
    time: NaiveTime,
    wkst: Weekday,
    period: u64,
    emitted: u32,
    empty_run: u32,
    pending: VecDeque<NaiveDate>,
    done: bool,
}

impl<'a> Expander<'a> {
    pub fn new(anchor: NaiveDateTime, rule: &'a RecurrenceRule) -> Self {
        Self {
            rule,
            anchor: anchor.date(),
            time: anchor.time(),
            wkst: rule.wkst.unwrap_or(WeekDay::Monday).into(),
            period: 0,
            emitted: 0,
            empty_run: 0,
            pending: VecDeque::new(),
            done: rule.interval == 0,
        }
    }

    /// Skips whole periods ending before `from`.
    ///
    /// Count-terminated rules must be scanned from the anchor, so they are left untouched.
    pub fn fast_forward(mut self, from: NaiveDate) -> Self {
        if self.rule.count().is_some() || from <= self.anchor || self.period != 0 {
            return self;
        }

        let units = match self.rule.freq {
            Frequency::Daily => from.signed_duration_since(self.anchor).num_days(),
            Frequency::Weekly => {
                let (Some(a), Some(b)) = (self.week_start(self.anchor), self.week_start(from))
                else {
                    return self;
                };
                b.signed_duration_since(a).num_days() / 7
            }
            Frequency::Monthly => {
                i64::from(from.year() - self.anchor.year()) * 12 + i64::from(from.month())
                    - i64::from(self.anchor.month())
            }
            Frequency::Yearly => i64::from(from.year() - self.anchor.year()),
        };

        if let Ok(units) = u64::try_from(units) {
            self.period = units / u64::from(self.rule.interval);
            tracing::trace!(period = self.period, %from, "fast-forwarded expansion");
        }
        self
    }

    fn week_start(&self, date: NaiveDate) -> Option<NaiveDate> {
        let offset = date.weekday().days_since(self.wkst);
        date.checked_sub_days(Days::new(u64::from(offset)))
    }

    /// First day of period `k`, and the sorted candidate days in it.
    fn period(&self, k: u64) -> Option<(NaiveDate, Vec<NaiveDate>)> {
        let step = k.checked_mul(u64::from(self.rule.interval))?;
        let (start, mut days) = match self.rule.freq {
            Frequency::Daily => {
                let day = self.anchor.checked_add_days(Days::new(step))?;
                let keep = self.matches_month(day)
                    && self.matches_month_day(day)
                    && self.matches_weekday(day);
                (day, if keep { vec![day] } else { Vec::new() })
            }
            Frequency::Weekly => {
                let start = self
                    .week_start(self.anchor)?
                    .checked_add_days(Days::new(step.checked_mul(7)?))?;
                let days = self.week_candidates(start);
                (start, days)
            }
            Frequency::Monthly => {
                let start = add_months(self.anchor, u32::try_from(step).ok()?)?;
                let days = if self.matches_month(start) {
                    self.month_candidates(start.year(), start.month())
                } else {
                    Vec::new()
                };
                (start, days)
            }
            Frequency::Yearly => {
                let year = self.anchor.year().checked_add(i32::try_from(step).ok()?)?;
                let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
                let days = if !self.rule.by_month.is_empty() {
                    let mut months = self.rule.by_month.clone();
                    months.sort_unstable();
                    months.dedup();
                    months
                        .into_iter()
                        .flat_map(|m| self.month_candidates(year, u32::from(m)))
                        .collect()
                } else if self.rule.by_day.is_empty() && self.rule.by_month_day.is_empty() {
                    self.month_candidates(year, self.anchor.month())
                } else {
                    self.year_candidates(year)
                };
                (start, days)
            }
        };

        days.sort_unstable();
        days.dedup();
        Some((start, days))
    }

    fn week_candidates(&self, week_start: NaiveDate) -> Vec<NaiveDate> {
        let offsets: Vec<u32> = if self.rule.by_day.is_empty() {
            vec![self.anchor.weekday().days_since(self.wkst)]
        } else {
            self.rule
                .by_day
                .iter()
                .map(|d| Weekday::from(d.day).days_since(self.wkst))
                .collect()
        };

        offsets
            .into_iter()
            .filter_map(|off| week_start.checked_add_days(Days::new(u64::from(off))))
            .filter(|d| self.matches_month(*d) && self.matches_month_day(*d))
            .collect()
    }

    fn month_candidates(&self, year: i32, month: u32) -> Vec<NaiveDate> {
        let Some(len) = days_in_month(year, month) else {
            return Vec::new();
        };
        let rule = self.rule;

        let by_month_day: Option<Vec<u32>> = (!rule.by_month_day.is_empty()).then(|| {
            rule.by_month_day
                .iter()
                .filter_map(|&d| resolve_month_day(d, len))
                .collect()
        });

        let by_day: Option<Vec<u32>> = (!rule.by_day.is_empty()).then(|| {
            rule.by_day
                .iter()
                .flat_map(|wd| weekday_days(year, month, len, *wd))
                .collect()
        });

        let days: Vec<u32> = match (by_month_day, by_day) {
            (None, None) => {
                // The anchor's day of month, skipped in months too short for it
                let day = self.anchor.day();
                if day <= len { vec![day] } else { Vec::new() }
            }
            (Some(md), None) => md,
            (None, Some(wd)) => wd,
            (Some(md), Some(wd)) => md.into_iter().filter(|d| wd.contains(d)).collect(),
        };

        days.into_iter()
            .filter_map(|d| NaiveDate::from_ymd_opt(year, month, d))
            .collect()
    }

    /// Candidates of a year without `BYMONTH`; `BYDAY` ordinals count within the year.
    fn year_candidates(&self, year: i32) -> Vec<NaiveDate> {
        if self.rule.by_day.is_empty() {
            return (1..=12)
                .flat_map(|m| self.month_candidates(year, m))
                .collect();
        }
        let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            return Vec::new();
        };

        self.rule
            .by_day
            .iter()
            .flat_map(|wd| weekday_dates(first, last, *wd))
            .filter(|d| self.matches_month_day(*d))
            .collect()
    }

    fn matches_month(&self, date: NaiveDate) -> bool {
        self.rule.by_month.is_empty()
            || self
                .rule
                .by_month
                .iter()
                .any(|&m| u32::from(m) == date.month())
    }

    fn matches_month_day(&self, date: NaiveDate) -> bool {
        if self.rule.by_month_day.is_empty() {
            return true;
        }
        let Some(len) = days_in_month(date.year(), date.month()) else {
            return false;
        };
        self.rule
            .by_month_day
            .iter()
            .any(|&d| resolve_month_day(d, len) == Some(date.day()))
    }

    fn matches_weekday(&self, date: NaiveDate) -> bool {
        self.rule.by_day.is_empty()
            || self
                .rule
                .by_day
                .iter()
                .any(|d| Weekday::from(d.day) == date.weekday())
    }

    fn past_until(&self, date: NaiveDate) -> bool {
        matches!(self.rule.termination, Some(Termination::Until(until)) if date > until)
    }

    fn finish(&mut self, reason: &'static str) {
        tracing::debug!(reason, emitted = self.emitted, "recurrence expansion ended");
        self.done = true;
        self.pending.clear();
    }
}

impl Iterator for Expander<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(date) = self.pending.pop_front() {
                if self.past_until(date) {
                    self.finish("until");
                    return None;
                }
                if self.rule.count().is_some_and(|n| self.emitted >= n) {
                    self.finish("count");
                    return None;
                }
                self.emitted += 1;
                return Some(date.and_time(self.time));
            }

            if self.done {
                return None;
            }

            let Some((start, days)) = self.period(self.period) else {
                self.finish("date overflow");
                return None;
            };
            self.period += 1;

            if self.past_until(start) {
                self.finish("until");
                return None;
            }

            let anchor = self.anchor;
            self.pending.extend(days.into_iter().filter(|d| *d >= anchor));
            if self.pending.is_empty() {
                self.empty_run += 1;
                if self.empty_run >= MAX_EMPTY_PERIODS {
                    self.finish("too many empty periods");
                    return None;
                }
            } else {
                self.empty_run = 0;
            }
        }
    }
}

/// Day of month for a signed `BYMONTHDAY` value, `None` when the month is too short.
fn resolve_month_day(day: i8, len: u32) -> Option<u32> {
    let magnitude = u32::from(day.unsigned_abs());
    match day {
        1.. if magnitude <= len => Some(magnitude),
        ..=-1 if magnitude <= len => Some(len + 1 - magnitude),
        _ => None,
    }
}

/// Days of a month matching a `BYDAY` entry, all of them without an ordinal.
fn weekday_days(year: i32, month: u32, len: u32, wd: WeekDayNum) -> Vec<u32> {
    let (Some(first), Some(last)) = (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(year, month, len),
    ) else {
        return Vec::new();
    };
    weekday_dates(first, last, wd)
        .into_iter()
        .map(|d| d.day())
        .collect()
}

/// Dates in `first..=last` matching a `BYDAY` entry, with the ordinal counted within that span.
fn weekday_dates(first: NaiveDate, last: NaiveDate, wd: WeekDayNum) -> Vec<NaiveDate> {
    let offset = Weekday::from(wd.day).days_since(first.weekday());
    let all: Vec<NaiveDate> = first
        .checked_add_days(Days::new(u64::from(offset)))
        .into_iter()
        .flat_map(|start| start.iter_weeks())
        .take_while(|d| *d <= last)
        .collect();

    match wd.occurrence {
        None => all,
        Some(n) => {
            let Some(index) = usize::from(n.unsigned_abs()).checked_sub(1) else {
                return Vec::new();
            };
            let picked = if n > 0 {
                all.get(index)
            } else {
                all.len().checked_sub(index + 1).and_then(|i| all.get(i))
            };
            picked.copied().into_iter().collect()
        }
    }
}
