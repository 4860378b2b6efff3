// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};

use chrono::{Days, NaiveDate};

use crate::error::LunarError;
use crate::lunar::ganzhi::{Sexagenary, Zodiac, day_ganzhi, month_ganzhi, year_ganzhi};
use crate::lunar::solar_term::is_after_jie;
use crate::lunar::table::{
    MAX_YEAR, MIN_YEAR, epoch, last_date, month_day_count, months_of, year_days,
};

/// A date of the Chinese lunar calendar, with its sexagenary labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct LunarDate {
    /// Lunar year, named after the Gregorian year it mostly overlaps
    pub year: i32,

    /// Lunar month, 1 to 12
    pub month: u8,

    /// Day of the lunar month, 1 to 30
    pub day: u8,

    /// Whether `month` is the leap month following the regular month of the same number
    pub is_leap_month: bool,

    /// Year label, e.g. 丙午
    pub year_ganzhi: Sexagenary,

    /// Month label, following the solar months
    pub month_ganzhi: Sexagenary,

    /// Day label
    pub day_ganzhi: Sexagenary,

    /// Zodiac animal of the lunar year
    pub zodiac: Zodiac,
}

const MONTH_NAMES: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊",
];

const DIGITS: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

impl LunarDate {
    /// Chinese month name, e.g. 正月, 闰六月 or 腊月.
    pub fn month_name(&self) -> String {
        let name = MONTH_NAMES
            .get(usize::from(self.month.saturating_sub(1)))
            .copied()
            .unwrap_or("?");
        let leap = if self.is_leap_month { "闰" } else { "" };
        format!("{leap}{name}月")
    }

    /// Chinese day name, e.g. 初八, 十五, 廿一 or 三十.
    pub fn day_name(&self) -> String {
        let digit = |n: u8| DIGITS.get(usize::from(n % 10)).copied().unwrap_or("?");
        match self.day {
            10 => "初十".to_string(),
            20 => "二十".to_string(),
            30 => "三十".to_string(),
            d @ 1..=9 => format!("初{}", digit(d)),
            d @ 11..=19 => format!("十{}", digit(d)),
            d @ 21..=29 => format!("廿{}", digit(d)),
            d => d.to_string(),
        }
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}年 {}{}",
            self.year_ganzhi,
            self.month_name(),
            self.day_name()
        )
    }
}

/// Converts a Gregorian date to the lunar calendar.
///
/// ## Errors
///
/// Returns [`LunarError::OutOfRange`] before 1900-01-31 or after 2100-12-31.
pub fn solar_to_lunar(date: NaiveDate) -> Result<LunarDate, LunarError> {
    if date < epoch() || date > last_date() {
        return Err(LunarError::OutOfRange(date));
    }

    let mut offset = u32::try_from(date.signed_duration_since(epoch()).num_days())
        .map_err(|_| LunarError::OutOfRange(date))?;

    let mut year = MIN_YEAR;
    loop {
        let days = year_days(year).ok_or(LunarError::OutOfRange(date))?;
        if offset < days {
            break;
        }
        offset -= days;
        year += 1;
    }

    let months = months_of(year).ok_or(LunarError::OutOfRange(date))?;
    for m in months {
        let days = u32::from(m.days);
        if offset < days {
            let day = u8::try_from(offset + 1).map_err(|_| LunarError::OutOfRange(date))?;
            return Ok(build(date, year, m.month, day, m.is_leap));
        }
        offset -= days;
    }

    Err(LunarError::OutOfRange(date))
}

fn build(date: NaiveDate, year: i32, month: u8, day: u8, is_leap_month: bool) -> LunarDate {
    let year_ganzhi = year_ganzhi(year);
    LunarDate {
        year,
        month,
        day,
        is_leap_month,
        year_ganzhi,
        month_ganzhi: month_ganzhi(date, is_after_jie(date)),
        day_ganzhi: day_ganzhi(date),
        zodiac: Zodiac::from(year_ganzhi.branch),
    }
}

/// Converts a lunar date to the Gregorian calendar.
///
/// ## Errors
///
/// - [`LunarError::YearOutOfRange`] for years outside 1900 to 2100
/// - [`LunarError::InvalidLunarDate`] when the month does not exist (including a leap
///   month the year does not have) or the day exceeds the month's length
/// - [`LunarError::OutOfRange`] when the result falls after 2100-12-31
pub fn lunar_to_solar(
    year: i32,
    month: u8,
    day: u8,
    is_leap: bool,
) -> Result<NaiveDate, LunarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(LunarError::YearOutOfRange(year));
    }

    let invalid = LunarError::InvalidLunarDate {
        year,
        month,
        day,
        is_leap,
    };
    let length = month_day_count(year, month, is_leap).ok_or(invalid.clone())?;
    if day == 0 || day > length {
        return Err(invalid);
    }

    let mut offset: u64 = (MIN_YEAR..year)
        .filter_map(year_days)
        .map(u64::from)
        .sum();
    for m in months_of(year).unwrap_or_default() {
        if m.month == month && m.is_leap == is_leap {
            break;
        }
        offset += u64::from(m.days);
    }
    offset += u64::from(day - 1);

    let date = epoch()
        .checked_add_days(Days::new(offset))
        .ok_or(invalid)?;
    if date > last_date() {
        return Err(LunarError::OutOfRange(date));
    }
    Ok(date)
}

/// Like [`lunar_to_solar`], but a day past the end of the month is clamped to its
/// last day and a missing leap month falls back to the regular month.
///
/// ## Errors
///
/// Returns an error for unsupported years, months outside 1 to 12, day 0, or results
/// after 2100-12-31.
pub fn lunar_to_solar_clamped(
    year: i32,
    month: u8,
    day: u8,
    is_leap: bool,
) -> Result<NaiveDate, LunarError> {
    let is_leap = is_leap && month_day_count(year, month, true).is_some();
    let day = match month_day_count(year, month, is_leap) {
        Some(length) if day > length => length,
        _ => day,
    };
    lunar_to_solar(year, month, day, is_leap)
}
