// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::Datelike;
use clap::{ArgMatches, Command, arg, value_parser};
use colored::Color;
use lunarcal_core::{SolarTerm, TermKind, lunar::solar_terms_of_year};

use crate::cli::Context;
use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{OutputFormat, print_json};

/// Lists the 24 solar terms of a year.
#[derive(Debug, Clone)]
pub struct CmdTerms {
    pub year: Option<i32>,
    pub output_format: OutputFormat,
}

impl CmdTerms {
    pub const NAME: &str = "terms";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List the 24 solar terms of a year")
            .arg(
                arg!([YEAR] "Gregorian year, 1900 to 2100. Defaults to the current year")
                    .value_parser(value_parser!(i32)),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            year: matches.get_one("YEAR").copied(),
            output_format: OutputFormat::from(matches),
        }
    }

    pub fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing solar terms...");
        let year = self.year.unwrap_or(ctx.now.year());
        let terms = solar_terms_of_year(year)?;
        match self.output_format {
            OutputFormat::Json => print_json(&terms)?,
            OutputFormat::Table => {
                let columns = [
                    TermColumn::Name,
                    TermColumn::Kind,
                    TermColumn::Date,
                    TermColumn::Weekday,
                ];
                print!("{}", Table::new(&columns, &terms).with_header(true));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum TermColumn {
    Name,
    Kind,
    Date,
    Weekday,
}

impl TableColumn<SolarTerm> for TermColumn {
    fn name(&self) -> &'static str {
        match self {
            TermColumn::Name => "Term",
            TermColumn::Kind => "Kind",
            TermColumn::Date => "Date",
            TermColumn::Weekday => "Day",
        }
    }

    fn format(&self, term: &SolarTerm) -> String {
        match self {
            TermColumn::Name => term.term.to_string(),
            TermColumn::Kind => match term.kind {
                TermKind::Jie => "节".to_string(),
                TermKind::Qi => "气".to_string(),
            },
            TermColumn::Date => term.date.format("%Y-%m-%d").to_string(),
            TermColumn::Weekday => term.date.weekday().to_string(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, term: &SolarTerm) -> Option<Color> {
        match (self, term.kind) {
            (TermColumn::Name, TermKind::Jie) => Some(Color::Green),
            _ => None,
        }
    }
}
