// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories.

use chrono::{NaiveDate, NaiveDateTime};
use lunarcal_core::{RecurrenceRule, parse_rule};

/// Builds a date, panicking on invalid input.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Builds a date-time on the hour.
pub fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, 0, 0).expect("valid test time")
}

/// Parses a rule that is known to be valid.
pub fn rule(src: &str) -> RecurrenceRule {
    parse_rule(src).unwrap_or_else(|e| panic!("test rule {src:?} should parse: {e}"))
}

/// Asserts every element is strictly greater than the one before.
pub fn assert_strictly_increasing<T: PartialOrd + std::fmt::Debug>(items: &[T]) {
    for pair in items.windows(2) {
        assert!(pair[0] < pair[1], "not strictly increasing: {pair:?}");
    }
}
