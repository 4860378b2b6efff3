// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};

/// Errors of the lunar/solar conversion engine.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LunarError {
    /// The Gregorian date is outside the supported range
    #[error("Date {0} is outside the supported range (1900-01-31 to 2100-12-31)")]
    OutOfRange(NaiveDate),

    /// The lunar year is outside the supported range
    #[error("Lunar year {0} is outside the supported range (1900 to 2100)")]
    YearOutOfRange(i32),

    /// The lunar date does not exist
    #[error("Lunar date {year}-{month:02}-{day:02} (leap month: {is_leap}) does not exist")]
    InvalidLunarDate {
        /// Lunar year
        year: i32,
        /// Lunar month, 1 to 12
        month: u8,
        /// Day of the lunar month
        day: u8,
        /// Whether the leap month was requested
        is_leap: bool,
    },
}

/// Errors raised while validating a reminder.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReminderError {
    /// The reminder would fire too close to now, or in the past
    #[error("Reminder at {trigger} is too soon, it must be at least {min_lead_minutes} minutes after {now}")]
    TooSoon {
        /// When the reminder would fire
        trigger: NaiveDateTime,
        /// The reference time
        now: NaiveDateTime,
        /// Required lead in minutes
        min_lead_minutes: i64,
    },
}

/// Errors raised while loading the configuration.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A duration string could not be parsed
    #[error("Invalid duration '{0}', expected \"HH:MM\", \"1d\", \"24h\", \"60m\" or \"1800s\"")]
    InvalidDuration(String),

    /// The expansion cap must allow at least one occurrence
    #[error("max_occurrences must be at least 1")]
    ZeroMaxOccurrences,

    /// A user-specific directory could not be determined
    #[error("User-specific {0} directory not found")]
    DirectoryNotFound(&'static str),

    /// The path is not valid unicode
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
