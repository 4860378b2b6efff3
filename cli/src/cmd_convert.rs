// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::NaiveDate;
use clap::{ArgAction, ArgGroup, ArgMatches, Command, arg};
use lunarcal_core::LunarCalendar;

use crate::cli::Context;
use crate::date_formatter::DateFormatter;
use crate::util::{LunarArg, OutputFormat, parse_date, parse_lunar_date};

/// What to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertInput {
    /// A Gregorian date, converted to the lunar calendar
    Solar(NaiveDate),

    /// A lunar date, converted to the Gregorian calendar
    Lunar(LunarArg),
}

#[derive(Debug, Clone)]
pub struct CmdConvert {
    pub input: ConvertInput,
    pub clamp: bool,
    pub output_format: OutputFormat,
}

impl CmdConvert {
    pub const NAME: &str = "convert";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("c")
            .about("Convert a date between the Gregorian and lunar calendars")
            .arg(arg!([DATE] "Gregorian date in YYYY-MM-DD, or today/tomorrow"))
            .arg(
                arg!(-l --lunar <LUNAR> "Lunar date in YYYY-MM-DD, YYYY-LMM-DD for a leap month")
                    .value_parser(parse_lunar_date),
            )
            .arg(
                arg!(--clamp "Move a day past the end of the lunar month to its last day")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("DATE"),
            )
            .group(
                ArgGroup::new("input")
                    .args(["DATE", "lunar"])
                    .required(true),
            )
            .arg(OutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let input = match (
            matches.get_one::<String>("DATE"),
            matches.get_one::<LunarArg>("lunar"),
        ) {
            (Some(date), None) => ConvertInput::Solar(parse_date(date)?),
            (None, Some(lunar)) => ConvertInput::Lunar(*lunar),
            _ => return Err("Exactly one of DATE or --lunar is required".into()),
        };
        let clamp = matches.get_flag("clamp");
        if clamp && !matches!(input, ConvertInput::Lunar(_)) {
            return Err("--clamp only applies to a --lunar date".into());
        }
        Ok(Self {
            input,
            clamp,
            output_format: OutputFormat::from(matches),
        })
    }

    pub fn run(self, ctx: &Context) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "converting date...");
        let date = self.solar_date(&ctx.calendar)?;
        let infos = [ctx.calendar.full_date_info(date)?];
        let formatter = DateFormatter::new(&ctx.display).with_output_format(self.output_format);
        print!("{}", formatter.format(&infos));
        Ok(())
    }

    fn solar_date(&self, calendar: &LunarCalendar) -> Result<NaiveDate, Box<dyn Error>> {
        let date = match self.input {
            ConvertInput::Solar(date) => date,
            ConvertInput::Lunar(l) if self.clamp => {
                calendar.lunar_to_solar_clamped(l.year, l.month, l.day, l.is_leap)?
            }
            ConvertInput::Lunar(l) => calendar.lunar_to_solar(l.year, l.month, l.day, l.is_leap)?,
        };
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CmdConvert, Box<dyn Error>> {
        let cmd = Command::new("test").subcommand(CmdConvert::command());
        let matches = cmd.try_get_matches_from(args)?;
        let sub_matches = matches.subcommand_matches("convert").ok_or("no subcommand")?;
        CmdConvert::from(sub_matches)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_convert_solar() {
        let parsed = parse(&["test", "convert", "2026-02-17"]).unwrap();
        assert_eq!(parsed.input, ConvertInput::Solar(date(2026, 2, 17)));
        assert!(!parsed.clamp);
    }

    #[test]
    fn test_parse_convert_lunar() {
        let parsed = parse(&["test", "convert", "-l", "2025-L06-01", "--clamp"]).unwrap();
        assert_eq!(
            parsed.input,
            ConvertInput::Lunar(LunarArg {
                year: 2025,
                month: 6,
                day: 1,
                is_leap: true
            })
        );
        assert!(parsed.clamp);
    }

    #[test]
    fn test_parse_convert_requires_one_input() {
        assert!(parse(&["test", "convert"]).is_err());
        assert!(parse(&["test", "convert", "2026-02-17", "-l", "2026-01-01"]).is_err());
        assert!(parse(&["test", "convert", "-l", "2026-13"]).is_err());
    }

    #[test]
    fn test_parse_convert_rejects_clamp_without_lunar() {
        assert!(parse(&["test", "convert", "2026-02-17", "--clamp"]).is_err());
        assert!(parse(&["test", "convert", "--clamp", "today"]).is_err());
        assert!(parse(&["test", "convert", "--clamp"]).is_err());
    }

    #[test]
    fn test_from_rejects_clamp_on_solar_input() {
        // Same arguments without the clap-level group and conflict
        let unchecked = || {
            Command::new("convert")
                .arg(arg!([DATE] "date"))
                .arg(arg!(-l --lunar <LUNAR> "lunar").value_parser(parse_lunar_date))
                .arg(arg!(--clamp "clamp").action(ArgAction::SetTrue))
                .arg(OutputFormat::arg())
        };

        let matches = unchecked()
            .try_get_matches_from(["convert", "2026-02-17", "--clamp"])
            .unwrap();
        assert!(CmdConvert::from(&matches).is_err());

        let matches = unchecked().try_get_matches_from(["convert"]).unwrap();
        assert!(CmdConvert::from(&matches).is_err());
    }

    #[test]
    fn test_lunar_to_solar() {
        let calendar = LunarCalendar::new();
        let parsed = parse(&["test", "convert", "-l", "2026-01-01"]).unwrap();
        assert_eq!(parsed.solar_date(&calendar).unwrap(), date(2026, 2, 17));

        let parsed = parse(&["test", "convert", "-l", "2025-L06-01"]).unwrap();
        assert_eq!(parsed.solar_date(&calendar).unwrap(), date(2025, 7, 25));
    }

    #[test]
    fn test_lunar_to_solar_clamp() {
        let calendar = LunarCalendar::new();
        // The twelfth month of 2025 has 29 days
        let parsed = parse(&["test", "convert", "-l", "2025-12-30"]).unwrap();
        assert!(parsed.solar_date(&calendar).is_err());

        let parsed = parse(&["test", "convert", "-l", "2025-12-30", "--clamp"]).unwrap();
        assert_eq!(parsed.solar_date(&calendar).unwrap(), date(2026, 2, 16));
    }
}
