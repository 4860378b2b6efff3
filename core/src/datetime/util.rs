// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// NOTE: Used in JSON output and cache keys, so it should be stable across different runs.
pub const STABLE_FORMAT_DATEONLY: &str = "%Y-%m-%d";

/// The position of a date relative to a range defined by a start and an end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePosition {
    /// The date is before the start of the range.
    Before,

    /// The date is within the range.
    InRange,

    /// The date is after the end of the range.
    After,

    /// The range is invalid, e.g., start date is after end date.
    InvalidRange,
}

const fn start_of_day_naive() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("00:00:00 must exist in NaiveTime")
}

/// Using a leap second to represent the end of the day
const fn end_of_day_naive() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 1_999_999_999)
        .expect("23:59:59:1_999_999_999 must exist in NaiveTime")
}

/// The start of the day (00:00:00).
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, start_of_day_naive())
}

/// The last representable instant of the day.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, end_of_day_naive())
}

/// Number of days in the given Gregorian month, `None` for an invalid month.
pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// The first day of the month `months` after the month containing `date`.
pub(crate) fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.with_day(1)?.checked_add_months(Months::new(months))
}
