// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse and format RFC 5545 recurrence rules (`RRULE`).
//!
//! Only the rule parts a day-granular calendar can honor are accepted: `FREQ`
//! (`DAILY` to `YEARLY`), `INTERVAL`, `COUNT`, `UNTIL`, `BYDAY`, `BYMONTHDAY`,
//! `BYMONTH` and `WKST`. Anything else is reported as a malformed rule so the
//! caller can fall back to treating the event as non-recurring.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
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
#![allow(clippy::similar_names, clippy::single_match_else)]

mod error;
mod formatter;
mod keyword;
mod parser;
mod rule;

pub use crate::error::RRuleError;
pub use crate::formatter::generate_rule;
pub use crate::parser::parse_rule;
pub use crate::rule::{Frequency, RecurrenceRule, Termination, WeekDay, WeekDayNum};
