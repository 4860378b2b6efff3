// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Packed month-length table of the Chinese lunar calendar, lunar years 1900 to 2100.
//!
//! Each entry describes one lunar year:
//!
//! - bits 0..=3: the leap month, 0 when the year has none
//! - bits 4..=15: month sizes, month 1 in bit 15 down to month 12 in bit 4 (1 = 30 days, 0 = 29 days)
//! - bit 16: size of the leap month, meaningful only when bits 0..=3 are non-zero

use chrono::NaiveDate;

/// First supported lunar year.
pub const MIN_YEAR: i32 = 1900;

/// Last supported lunar year.
pub const MAX_YEAR: i32 = 2100;

const LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900-1909
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910-1919
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920-1929
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930-1939
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940-1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950-1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960-1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970-1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980-1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990-1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000-2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010-2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020-2029
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030-2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040-2049
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06aa0, 0x1a6c4, 0x0aae0, // 2050-2059
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060-2069
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070-2079
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080-2089
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090-2099
    0x0d520, // 2100
];

/// Gregorian date of lunar 1900-01-01.
pub(crate) const fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 31).expect("1900-01-31 must exist")
}

/// Last Gregorian date handled by the engine.
pub(crate) const fn last_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2100, 12, 31).expect("2100-12-31 must exist")
}

fn info(year: i32) -> Option<u32> {
    let index = usize::try_from(year.checked_sub(MIN_YEAR)?).ok()?;
    LUNAR_INFO.get(index).copied()
}

/// One month of a lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct LunarMonth {
    /// Month number, 1 to 12
    pub month: u8,

    /// Whether this is the leap month following the regular month of the same number
    pub is_leap: bool,

    /// Length in days, 29 or 30
    pub days: u8,
}

/// The leap month of a lunar year, `None` if the year has none or is unsupported.
pub fn leap_month(year: i32) -> Option<u8> {
    let leap = u8::try_from(info(year)? & 0xf).ok()?;
    (leap != 0).then_some(leap)
}

fn regular_month_days(info: u32, month: u8) -> u8 {
    if info & (0x10000 >> month) != 0 { 30 } else { 29 }
}

fn leap_month_days(info: u32) -> u8 {
    if info & 0x10000 != 0 { 30 } else { 29 }
}

/// Months of a lunar year in calendar order, the leap month right after its regular month.
pub(crate) fn months_of(year: i32) -> Option<Vec<LunarMonth>> {
    let info = info(year)?;
    let leap = leap_month(year);
    let mut months = Vec::with_capacity(13);
    for month in 1..=12 {
        months.push(LunarMonth {
            month,
            is_leap: false,
            days: regular_month_days(info, month),
        });
        if leap == Some(month) {
            months.push(LunarMonth {
                month,
                is_leap: true,
                days: leap_month_days(info),
            });
        }
    }
    Some(months)
}

/// Total days of a lunar year.
pub(crate) fn year_days(year: i32) -> Option<u32> {
    Some(months_of(year)?.iter().map(|m| u32::from(m.days)).sum())
}

/// Length of a lunar month, 29 or 30.
///
/// Falls back to 30 when the year is unsupported, the month is out of range, or
/// the leap month is requested for a month that is not the year's leap month.
pub fn lunar_month_day_count(year: i32, month: u8, is_leap: bool) -> u8 {
    month_day_count(year, month, is_leap).unwrap_or(30)
}

/// Like [`lunar_month_day_count`], but `None` when the month does not exist.
pub(crate) fn month_day_count(year: i32, month: u8, is_leap: bool) -> Option<u8> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let info = info(year)?;
    match is_leap {
        false => Some(regular_month_days(info, month)),
        true if leap_month(year) == Some(month) => Some(leap_month_days(info)),
        true => None,
    }
}

/// Lunar years a date picker may offer.
pub fn lunar_year_list() -> Vec<i32> {
    (MIN_YEAR..=MAX_YEAR).collect()
}

/// Months of `year` a date picker may offer, empty for an unsupported year.
pub fn lunar_month_list(year: i32) -> Vec<LunarMonth> {
    months_of(year).unwrap_or_default()
}

/// Days of a lunar month a date picker may offer, empty when the month does not exist.
pub fn lunar_day_list(year: i32, month: u8, is_leap: bool) -> Vec<u8> {
    month_day_count(year, month, is_leap).map_or_else(Vec::new, |n| (1..=n).collect())
}
