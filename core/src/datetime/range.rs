// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

use crate::datetime::util::{RangePosition, days_in_month, start_of_day};

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    /// First day of the range.
    pub start: NaiveDate,

    /// Last day of the range, inclusive.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` to `end`, both inclusive.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A single day.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Every day of a Gregorian month, `None` if the month does not exist.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = start.with_day(days_in_month(year, month)?)?;
        Some(Self::new(start, end))
    }

    /// The whole weeks covering a Gregorian month, as shown in a month view.
    pub fn month_grid(year: i32, month: u32, week_start: WeekStart) -> Option<Self> {
        let month = Self::month(year, month)?;
        let first = week_start.weekday();
        let lead = month.start.weekday().days_since(first);
        let trail = 6 - month.end.weekday().days_since(first);
        Some(Self::new(
            month.start.checked_sub_days(Days::new(u64::from(lead)))?,
            month.end.checked_add_days(Days::new(u64::from(trail)))?,
        ))
    }

    /// Iterates over every day in the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Number of days in the range, zero when the range is inverted.
    pub fn len(&self) -> usize {
        let days = self.end.signed_duration_since(self.start).num_days() + 1;
        usize::try_from(days).unwrap_or(0)
    }

    /// Whether the range contains no day.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `date` lies in the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.position(date) == RangePosition::InRange
    }

    /// The position of `date` relative to the range.
    pub fn position(&self, date: NaiveDate) -> RangePosition {
        if self.start > self.end {
            RangePosition::InvalidRange
        } else if date < self.start {
            RangePosition::Before
        } else if date > self.end {
            RangePosition::After
        } else {
            RangePosition::InRange
        }
    }
}

/// A half-open range of instants, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeRange {
    /// Inclusive lower bound.
    pub start: NaiveDateTime,

    /// Exclusive upper bound.
    pub end: NaiveDateTime,
}

impl DateTimeRange {
    /// Creates the range `[start, end)`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// From the start of `date` to the start of the next day.
    pub fn day(date: NaiveDate) -> Self {
        Self::days(DateRange::day(date))
    }

    /// From the start of the first day to the start of the day after the last one.
    pub fn days(range: DateRange) -> Self {
        let end = range
            .end
            .succ_opt()
            .map_or(NaiveDateTime::MAX, start_of_day);
        Self::new(start_of_day(range.start), end)
    }

    /// Everything from `start` on.
    pub fn from(start: NaiveDateTime) -> Self {
        Self::new(start, NaiveDateTime::MAX)
    }

    /// Whether `dt` lies in the range.
    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        self.position(dt) == RangePosition::InRange
    }

    /// The position of `dt` relative to the range.
    pub fn position(&self, dt: NaiveDateTime) -> RangePosition {
        if self.start > self.end {
            RangePosition::InvalidRange
        } else if dt < self.start {
            RangePosition::Before
        } else if dt >= self.end {
            RangePosition::After
        } else {
            RangePosition::InRange
        }
    }
}

/// The first day of a displayed week.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Weeks start on Monday.
    #[default]
    Monday,

    /// Weeks start on Sunday.
    Sunday,
}

impl WeekStart {
    /// The corresponding chrono weekday.
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}
