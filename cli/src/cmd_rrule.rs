// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use lunarcal_core::{
    DateTimeRange, LunarCalendar, RecurrenceRule, expand, generate_rule, is_date_included,
    next_occurrence, occurrences_between, parse_rule, summary,
};
use serde_json::json;

use crate::cli::Context;
use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{OutputFormat, parse_date, parse_datetime, print_json};

fn rule_arg() -> Arg {
    arg!(<RULE> "Recurrence rule, e.g. FREQ=WEEKLY;BYDAY=MO,WE")
        .value_parser(parse_rule)
}

fn start_arg() -> Arg {
    arg!(-s --start <START> "Start of the first occurrence, YYYY-MM-DD[ HH:MM]")
        .value_parser(parse_datetime)
        .required(true)
}

fn get_rule(matches: &ArgMatches) -> Result<RecurrenceRule, Box<dyn Error>> {
    Ok(matches
        .get_one::<RecurrenceRule>("RULE")
        .ok_or("Recurrence rule is required")?
        .clone())
}

fn get_start(matches: &ArgMatches) -> Result<NaiveDateTime, Box<dyn Error>> {
    Ok(*matches
        .get_one::<NaiveDateTime>("start")
        .ok_or("Start is required")?)
}

/// Expands a rule into its occurrences.
#[derive(Debug, Clone)]
pub struct CmdRRuleExpand {
    pub rule: RecurrenceRule,
    pub start: NaiveDateTime,
    pub from: Option<NaiveDateTime>,
    pub until: Option<NaiveDateTime>,
    pub max: Option<usize>,
    pub output_format: OutputFormat,
}

impl CmdRRuleExpand {
    pub const NAME: &str = "expand";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("e")
            .about("List the occurrences of a recurrence rule")
            .arg(rule_arg())
            .arg(start_arg())
            .arg(
                arg!(--from <FROM> "Only occurrences at or after this time")
                    .value_parser(parse_datetime),
            )
            .arg(
                arg!(--until <UNTIL> "Only occurrences before this time")
                    .value_parser(parse_datetime),
            )
            .arg(
                arg!(-n --max <N> "At most this many occurrences, defaults to the configured cap")
                    .value_parser(value_parser!(usize)),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            rule: get_rule(matches)?,
            start: get_start(matches)?,
            from: matches.get_one("from").copied(),
            until: matches.get_one("until").copied(),
            max: matches.get_one("max").copied(),
            output_format: OutputFormat::from(matches),
        })
    }

    pub fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "expanding recurrence rule...");
        let occurrences = self.occurrences(ctx.core.max_occurrences);
        match self.output_format {
            OutputFormat::Json => print_json(&occurrences)?,
            OutputFormat::Table => {
                let rows = OccurrenceRow::rows(&occurrences, &ctx.calendar);
                let mut columns = vec![
                    OccurrenceColumn::Index,
                    OccurrenceColumn::Start,
                    OccurrenceColumn::Weekday,
                ];
                if ctx.display.show_lunar {
                    columns.push(OccurrenceColumn::Lunar);
                }
                print!("{}", Table::new(&columns, &rows).with_header(true));
            }
        }
        Ok(())
    }

    fn occurrences(&self, default_max: usize) -> Vec<NaiveDateTime> {
        let max = self.max.unwrap_or(default_max);
        match (self.from, self.until) {
            (None, None) => expand(self.start, &self.rule, max),
            (from, until) => {
                let range = DateTimeRange::new(
                    from.unwrap_or(self.start),
                    until.unwrap_or(NaiveDateTime::MAX),
                );
                occurrences_between(self.start, &self.rule, range, max)
            }
        }
    }
}

/// Finds the first occurrence at or after some time.
#[derive(Debug, Clone)]
pub struct CmdRRuleNext {
    pub rule: RecurrenceRule,
    pub start: NaiveDateTime,
    pub after: Option<NaiveDateTime>,
    pub output_format: OutputFormat,
}

impl CmdRRuleNext {
    pub const NAME: &str = "next";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the next occurrence of a recurrence rule")
            .arg(rule_arg())
            .arg(start_arg())
            .arg(
                arg!(-a --after <AFTER> "Search from this time, defaults to now")
                    .value_parser(parse_datetime),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            rule: get_rule(matches)?,
            start: get_start(matches)?,
            after: matches.get_one("after").copied(),
            output_format: OutputFormat::from(matches),
        })
    }

    pub fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "finding next occurrence...");
        let after = self.after.unwrap_or(ctx.now);
        let next = next_occurrence(self.start, &self.rule, after);
        match self.output_format {
            OutputFormat::Json => print_json(&json!({ "next": next }))?,
            OutputFormat::Table => match next {
                Some(next) => println!("{}", next.format("%Y-%m-%d %H:%M %a")),
                None => println!("No occurrence after {}", after.format("%Y-%m-%d %H:%M")),
            },
        }
        Ok(())
    }
}

/// Checks whether a rule produces an occurrence on some day.
#[derive(Debug, Clone)]
pub struct CmdRRuleIncludes {
    pub rule: RecurrenceRule,
    pub start: NaiveDateTime,
    pub date: NaiveDate,
    pub output_format: OutputFormat,
}

impl CmdRRuleIncludes {
    pub const NAME: &str = "includes";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Check whether a recurrence rule has an occurrence on a day")
            .arg(rule_arg())
            .arg(start_arg())
            .arg(arg!(<DATE> "Day to check, YYYY-MM-DD or today/tomorrow").value_parser(parse_date))
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            rule: get_rule(matches)?,
            start: get_start(matches)?,
            date: *matches.get_one::<NaiveDate>("DATE").ok_or("Date is required")?,
            output_format: OutputFormat::from(matches),
        })
    }

    pub fn run(self, _ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "checking date...");
        let included = is_date_included(self.date, self.start, &self.rule);
        match self.output_format {
            OutputFormat::Json => print_json(&json!({ "date": self.date, "included": included }))?,
            OutputFormat::Table => println!("{}", if included { "yes" } else { "no" }),
        }
        Ok(())
    }
}

/// Describes a rule in plain words.
#[derive(Debug, Clone)]
pub struct CmdRRuleSummary {
    pub rule: RecurrenceRule,
    pub output_format: OutputFormat,
}

impl CmdRRuleSummary {
    pub const NAME: &str = "summary";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("s")
            .about("Describe a recurrence rule in plain words")
            .arg(rule_arg())
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            rule: get_rule(matches)?,
            output_format: OutputFormat::from(matches),
        })
    }

    pub fn run(self, _ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "summarizing recurrence rule...");
        let canonical = generate_rule(&self.rule)?;
        let text = summary(&self.rule);
        match self.output_format {
            OutputFormat::Json => print_json(&json!({ "rule": canonical, "summary": text }))?,
            OutputFormat::Table => println!("{text}\n{canonical}"),
        }
        Ok(())
    }
}

#[derive(Debug)]
struct OccurrenceRow {
    index: usize,
    start: NaiveDateTime,
    lunar: Option<String>,
}

impl OccurrenceRow {
    /// Occurrences outside the lunar calendar's range get no lunar label.
    fn rows(occurrences: &[NaiveDateTime], calendar: &LunarCalendar) -> Vec<Self> {
        occurrences
            .iter()
            .enumerate()
            .map(|(i, start)| Self {
                index: i + 1,
                start: *start,
                lunar: calendar
                    .solar_to_lunar(start.date())
                    .ok()
                    .map(|l| format!("{}{}", l.month_name(), l.day_name())),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum OccurrenceColumn {
    Index,
    Start,
    Weekday,
    Lunar,
}

impl TableColumn<OccurrenceRow> for OccurrenceColumn {
    fn name(&self) -> &'static str {
        match self {
            OccurrenceColumn::Index => "#",
            OccurrenceColumn::Start => "Start",
            OccurrenceColumn::Weekday => "Day",
            OccurrenceColumn::Lunar => "Lunar",
        }
    }

    fn format(&self, row: &OccurrenceRow) -> String {
        match self {
            OccurrenceColumn::Index => row.index.to_string(),
            OccurrenceColumn::Start => row.start.format("%Y-%m-%d %H:%M").to_string(),
            OccurrenceColumn::Weekday => row.start.weekday().to_string(),
            OccurrenceColumn::Lunar => row.lunar.clone().unwrap_or_default(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            OccurrenceColumn::Index => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }
}
