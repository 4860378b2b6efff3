// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::OnceLock;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Arg, ArgMatches, arg, value_parser};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    pub fn arg() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn from(matches: &ArgMatches) -> Self {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

/// A lunar date as typed on the command line, e.g. `2025-L06-01` for the leap sixth month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarArg {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub is_leap: bool,
}

/// Parse a lunar date in the format "YYYY-MM-DD", with an `L` before the month for leap months.
pub fn parse_lunar_date(s: &str) -> Result<LunarArg, String> {
    const RE: &str = r"(?i)^\s*(\d{4})-(l)?(\d{1,2})-(\d{1,2})\s*$";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());

    let invalid = || format!("Invalid lunar date '{s}', expected YYYY-MM-DD or YYYY-LMM-DD");
    let captures = re.captures(s).ok_or_else(invalid)?;
    Ok(LunarArg {
        year: captures[1].parse().map_err(|_| invalid())?,
        is_leap: captures.get(2).is_some(),
        month: captures[3].parse().map_err(|_| invalid())?,
        day: captures[4].parse().map_err(|_| invalid())?,
    })
}

/// Parse a date in the format "YYYY-MM-DD", or the keywords "today" and "tomorrow".
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let today = Local::now().date_naive();
    match s.trim() {
        "today" => Ok(today),
        "tomorrow" => today
            .succ_opt()
            .ok_or_else(|| "Date out of range".to_string()),
        t => NaiveDate::parse_from_str(t, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{t}', expected YYYY-MM-DD")),
    }
}

/// Parse a month in the format "YYYY-MM".
pub fn parse_year_month(s: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("Invalid month '{s}', expected YYYY-MM");
    let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year = y.parse().map_err(|_| invalid())?;
    let month = m.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Parse a date-time in the format "YYYY-MM-DD HH:MM", "YYYY-MM-DDTHH:MM", or a bare date at midnight.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    let t = s.trim();
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, format) {
            return Ok(dt);
        }
    }
    match NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        Ok(date) => Ok(date.and_time(NaiveTime::MIN)),
        Err(_) => Err(format!(
            "Invalid date-time '{t}', expected YYYY-MM-DD, YYYY-MM-DD HH:MM or YYYY-MM-DDTHH:MM"
        )),
    }
}

/// Pads `s` with spaces to `width` terminal columns, CJK characters counting double.
pub fn pad_to_width(s: &str, width: usize, left_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(s.width()));
    if left_align {
        format!("{s}{fill}")
    } else {
        format!("{fill}{s}")
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
