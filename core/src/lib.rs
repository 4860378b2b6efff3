// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Computational core of lunarcal.
//!
//! Two independent engines live here:
//!
//! - [`recurrence`]: expands an event's `RRULE` into concrete occurrences over a window.
//! - [`lunar`]: reconciles Gregorian dates with the Chinese lunar calendar, including
//!   leap months, sexagenary labels, solar terms and festivals.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::similar_names
)]

mod config;
mod datetime;
mod error;
pub mod lunar;
pub mod recurrence;
mod reminder;

pub use crate::config::{APP_NAME, Config, LeadTime, expand_path, get_config_dir, get_home_dir};
pub use crate::datetime::{
    DateRange, DateTimeRange, RangePosition, STABLE_FORMAT_DATEONLY, WeekStart, end_of_day,
    start_of_day,
};
pub use crate::error::{ConfigError, LunarError, ReminderError};
pub use crate::lunar::{
    CompositeDateInfo, Festival, FestivalCategory, LunarCalendar, LunarDate, SolarTerm,
    SolarTermName, TermKind, Zodiac,
};
pub use crate::recurrence::{
    DEFAULT_MAX_OCCURRENCES, EventOccurrence, RecurringEvent, expand, is_date_included,
    next_occurrence, occurrences_between, summary,
};
pub use crate::reminder::Reminder;
pub use lunarcal_rrule::{
    Frequency, RRuleError, RecurrenceRule, Termination, WeekDay, WeekDayNum, generate_rule,
    parse_rule,
};
