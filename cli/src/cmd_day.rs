// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{Datelike, NaiveDate};
use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use lunarcal_core::CompositeDateInfo;

use crate::cli::Context;
use crate::config::Config;
use crate::util::{OutputFormat, pad_to_width, parse_date, print_json};

/// Shows everything the calendar knows about one day.
#[derive(Debug, Clone)]
pub struct CmdDay {
    pub date: Option<NaiveDate>,
    pub output_format: OutputFormat,
}

impl CmdDay {
    pub const NAME: &str = "day";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("d")
            .about("Show the lunar date, pillars, solar term and festivals of a day")
            .arg(arg!([DATE] "Date in YYYY-MM-DD, or today/tomorrow. Defaults to today"))
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let date = match matches.get_one::<String>("DATE") {
            Some(s) => Some(parse_date(s)?),
            None => None,
        };
        Ok(Self {
            date,
            output_format: OutputFormat::from(matches),
        })
    }

    /// Today, as shown when no command is given.
    pub fn today() -> Self {
        Self {
            date: None,
            output_format: OutputFormat::Table,
        }
    }

    pub fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing day...");
        let date = self.date.unwrap_or(ctx.now.date());
        let info = ctx.calendar.full_date_info(date)?;
        match self.output_format {
            OutputFormat::Json => print_json(&*info)?,
            OutputFormat::Table => print!("{}", render(&info, &ctx.display)),
        }
        Ok(())
    }
}

fn render(info: &CompositeDateInfo, display: &Config) -> String {
    let lunar = &info.lunar_date;
    let mut rows = vec![(
        "Date",
        format!(
            "{} {}",
            info.solar_date.format("%Y-%m-%d"),
            info.solar_date.weekday()
        ),
    )];
    if display.show_lunar {
        rows.push((
            "Lunar",
            format!("{}年{}{}", lunar.year, lunar.month_name(), lunar.day_name()),
        ));
        rows.push((
            "Pillars",
            format!(
                "{}年 {}月 {}日",
                lunar.year_ganzhi, lunar.month_ganzhi, lunar.day_ganzhi
            ),
        ));
        rows.push(("Zodiac", lunar.zodiac.to_string()));
    }
    if display.show_solar_terms
        && let Some(term) = &info.solar_term
    {
        rows.push(("Solar Term", term.term.to_string().green().to_string()));
    }
    if display.show_festivals && !info.festivals.is_empty() {
        let names: Vec<_> = info.festivals.iter().map(|f| f.name).collect();
        rows.push(("Festivals", names.join(", ").red().to_string()));
    }

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.into_iter()
        .map(|(k, v)| format!("{} {v}\n", pad_to_width(k, width, true).bold()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(y: i32, m: u32, d: u32) -> CompositeDateInfo {
        CompositeDateInfo::compute(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_day() {
        let cmd = Command::new("test").subcommand(CmdDay::command());
        let matches = cmd
            .try_get_matches_from(["test", "day", "2025-04-04", "--output-format", "json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("day").unwrap();
        let parsed = CmdDay::from(sub_matches).unwrap();
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2025, 4, 4));
        assert_eq!(parsed.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_day_invalid() {
        let cmd = Command::new("test").subcommand(CmdDay::command());
        let matches = cmd.try_get_matches_from(["test", "day", "2025-02-30"]).unwrap();
        let sub_matches = matches.subcommand_matches("day").unwrap();
        assert!(CmdDay::from(sub_matches).is_err());
    }

    #[test]
    fn test_render_qingming() {
        colored::control::set_override(false);
        let out = render(&info(2025, 4, 4), &Config::default());
        assert_eq!(
            out,
            "\
Date       2025-04-04 Fri
Lunar      2025年三月初七
Pillars    乙巳年 庚辰月 癸卯日
Zodiac     蛇
Solar Term 清明
Festivals  清明节
"
        );
    }

    #[test]
    fn test_render_respects_toggles() {
        colored::control::set_override(false);
        let display = Config {
            show_lunar: false,
            show_festivals: false,
            ..Config::default()
        };
        let out = render(&info(2025, 4, 4), &display);
        assert_eq!(out, "Date       2025-04-04 Fri\nSolar Term 清明\n");
    }
}
