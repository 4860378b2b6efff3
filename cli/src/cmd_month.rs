// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate, Weekday};
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use lunarcal_core::{CompositeDateInfo, DateRange, WeekStart};
use unicode_width::UnicodeWidthChar;

use crate::cli::Context;
use crate::config::Config;
use crate::util::{OutputFormat, pad_to_width, parse_year_month, print_json};

/// Width of one grid cell: a two-digit day, a space and four CJK characters.
const CELL_WIDTH: usize = 11;

/// Shows a month as a week grid with lunar labels.
#[derive(Debug, Clone)]
pub struct CmdMonth {
    pub month: Option<(i32, u32)>,
    pub week_start: Option<WeekStart>,
    pub output_format: OutputFormat,
}

impl CmdMonth {
    pub const NAME: &str = "month";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("m")
            .about("Show a month grid with lunar days, solar terms and festivals")
            .arg(arg!([MONTH] "Month in YYYY-MM. Defaults to the current month"))
            .arg(
                arg!(--"week-start" <DAY> "First day of the week, overriding the configuration")
                    .value_parser(value_parser!(WeekStart)),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let month = match matches.get_one::<String>("MONTH") {
            Some(s) => Some(parse_year_month(s)?),
            None => None,
        };
        Ok(Self {
            month,
            week_start: matches.get_one("week-start").copied(),
            output_format: OutputFormat::from(matches),
        })
    }

    pub fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing month...");
        let (year, month) = self
            .month
            .unwrap_or_else(|| (ctx.now.year(), ctx.now.month()));

        match self.output_format {
            OutputFormat::Json => {
                let range = DateRange::month(year, month).ok_or("Month out of range")?;
                let infos = ctx.calendar.date_infos(range)?;
                let infos: Vec<&CompositeDateInfo> = infos.iter().map(AsRef::as_ref).collect();
                print_json(&infos)?;
            }
            OutputFormat::Table => {
                let week_start = self.week_start.unwrap_or(ctx.display.week_start);
                let grid = DateRange::month_grid(year, month, week_start)
                    .ok_or("Month out of range")?;
                let infos = ctx.calendar.date_infos(grid)?;
                let infos: Vec<&CompositeDateInfo> = infos.iter().map(AsRef::as_ref).collect();
                let today = ctx.now.date();
                print!(
                    "{}",
                    render(year, month, week_start, &infos, &ctx.display, today)
                );
            }
        }
        Ok(())
    }
}

fn render(
    year: i32,
    month: u32,
    week_start: WeekStart,
    infos: &[&CompositeDateInfo],
    display: &Config,
    today: NaiveDate,
) -> String {
    let mut out = format!("{year}-{month:02}");
    if display.show_lunar
        && let Some(first) = infos.iter().find(|i| i.solar_date.day() == 1)
    {
        let lunar = &first.lunar_date;
        let _ = write!(out, "  {}年 ({})", lunar.year_ganzhi, lunar.zodiac);
    }
    out.push('\n');

    let header: Vec<String> = weekdays(week_start)
        .map(|w| pad_to_width(&w.to_string(), CELL_WIDTH, true))
        .collect();
    let _ = writeln!(out, "{}", header.join(" ").trim_end().bold());

    for week in infos.chunks(7) {
        let cells: Vec<String> = week
            .iter()
            .map(|info| cell(info, month, display, today))
            .collect();
        let _ = writeln!(out, "{}", cells.join(" ").trim_end());
    }
    out
}

fn weekdays(week_start: WeekStart) -> impl Iterator<Item = Weekday> {
    let first = week_start.weekday();
    (0..7u8).scan(first, |day, _| {
        let current = *day;
        *day = day.succ();
        Some(current)
    })
}

fn cell(info: &CompositeDateInfo, month: u32, display: &Config, today: NaiveDate) -> String {
    let date = info.solar_date;
    let (label, color) = label(info, display);
    let text = pad_to_width(&format!("{:>2} {label}", date.day()), CELL_WIDTH, true);

    if date.month() != month {
        text.dimmed().to_string()
    } else if date == today {
        text.reversed().to_string()
    } else {
        match color {
            Some(color) => text.color(color).to_string(),
            None => text,
        }
    }
}

/// Festivals win over solar terms, which win over the lunar day.
fn label(info: &CompositeDateInfo, display: &Config) -> (String, Option<colored::Color>) {
    if display.show_festivals
        && let Some(festival) = info.festivals.first()
    {
        return (truncate(festival.name), Some(colored::Color::Red));
    }
    if display.show_solar_terms
        && let Some(term) = &info.solar_term
    {
        return (term.term.to_string(), Some(colored::Color::Green));
    }
    if display.show_lunar {
        let lunar = &info.lunar_date;
        let name = if lunar.day == 1 {
            lunar.month_name()
        } else {
            lunar.day_name()
        };
        return (name, None);
    }
    (String::new(), None)
}

fn truncate(s: &str) -> String {
    let mut width = 0;
    s.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= CELL_WIDTH - 3
        })
        .collect()
}
