// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use chrono::{Local, NaiveDateTime};
use clap::{ArgAction, ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use lunarcal_core::{APP_NAME, Config as CoreConfig, LunarCalendar};
use tracing_subscriber::EnvFilter;

use crate::cmd_convert::CmdConvert;
use crate::cmd_day::CmdDay;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_month::CmdMonth;
use crate::cmd_rrule::{CmdRRuleExpand, CmdRRuleIncludes, CmdRRuleNext, CmdRRuleSummary};
use crate::cmd_terms::CmdTerms;
use crate::config::{Config, parse_config};

/// Run the lunarcal command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse() {
        Ok(cli) => {
            init_tracing(cli.verbose);
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// `RUST_LOG` wins when set, otherwise warnings only, or everything down to debug with `-v`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Whether to log debug output
    pub verbose: bool,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Recurring events and the Chinese lunar calendar, from the terminal.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to today
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $LUNARCAL_CONFIG, then $XDG_CONFIG_HOME/lunarcal/config.toml \
on Linux and MacOS, %LOCALAPPDATA%/lunarcal/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                arg!(-v --verbose "Log debug output to stderr")
                    .global(true)
                    .action(ArgAction::SetTrue),
            )
            .subcommand(CmdDay::command())
            .subcommand(CmdMonth::command())
            .subcommand(CmdConvert::command())
            .subcommand(CmdTerms::command())
            .subcommand(
                Command::new("rrule")
                    .alias("r")
                    .about("Work with recurrence rules")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdRRuleExpand::command())
                    .subcommand(CmdRRuleNext::command())
                    .subcommand(CmdRRuleIncludes::command())
                    .subcommand(CmdRRuleSummary::command()),
            )
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdDay::NAME, matches)) => Day(CmdDay::from(matches)?),
            Some((CmdMonth::NAME, matches)) => Month(CmdMonth::from(matches)?),
            Some((CmdConvert::NAME, matches)) => Convert(CmdConvert::from(matches)?),
            Some((CmdTerms::NAME, matches)) => Terms(CmdTerms::from(matches)),
            Some(("rrule", matches)) => match matches.subcommand() {
                Some((CmdRRuleExpand::NAME, matches)) => RRuleExpand(CmdRRuleExpand::from(matches)?),
                Some((CmdRRuleNext::NAME, matches)) => RRuleNext(CmdRRuleNext::from(matches)?),
                Some((CmdRRuleIncludes::NAME, matches)) => {
                    RRuleIncludes(CmdRRuleIncludes::from(matches)?)
                }
                Some((CmdRRuleSummary::NAME, matches)) => {
                    RRuleSummary(CmdRRuleSummary::from(matches)?)
                }
                _ => return Err("Unknown rrule subcommand".into()),
            },
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Day(CmdDay::today()),
            Some((name, _)) => return Err(format!("Unknown command: {name}").into()),
        };

        let config = matches.get_one("config").cloned();
        let verbose = matches.get_flag("verbose");
        Ok(Cli {
            config,
            verbose,
            command,
        })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show everything known about a day
    Day(CmdDay),

    /// Show a month grid with lunar labels
    Month(CmdMonth),

    /// Convert between the Gregorian and lunar calendars
    Convert(CmdConvert),

    /// List the solar terms of a year
    Terms(CmdTerms),

    /// Expand a recurrence rule
    RRuleExpand(CmdRRuleExpand),

    /// Find the next occurrence of a recurrence rule
    RRuleNext(CmdRRuleNext),

    /// Check whether a recurrence rule hits a day
    RRuleIncludes(CmdRRuleIncludes),

    /// Describe a recurrence rule in plain words
    RRuleSummary(CmdRRuleSummary),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Day(a)           => Self::run_with(config, |x| a.run(x)).await,
            Month(a)         => Self::run_with(config, |x| a.run(x)).await,
            Convert(a)       => Self::run_with(config, |x| a.run(x)).await,
            Terms(a)         => Self::run_with(config, |x| a.run(x)).await,
            RRuleExpand(a)   => Self::run_with(config, |x| a.run(x)).await,
            RRuleNext(a)     => Self::run_with(config, |x| a.run(x)).await,
            RRuleIncludes(a) => Self::run_with(config, |x| a.run(x)).await,
            RRuleSummary(a)  => Self::run_with(config, |x| a.run(x)).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&Context) -> Result<(), Box<dyn Error>>,
    {
        tracing::debug!("parsing configuration...");
        let (core, display) = parse_config(config).await?;
        let ctx = Context::new(core, display);

        f(&ctx)?;

        tracing::debug!(
            cached = ctx.calendar.cache_len(),
            computed = ctx.calendar.computations(),
            "lunar calendar cache"
        );
        Ok(())
    }
}

/// State shared by the commands of one invocation.
#[derive(Debug)]
pub struct Context {
    /// Memoizing lunar calendar service
    pub calendar: LunarCalendar,

    /// The `[core]` section of the configuration
    pub core: CoreConfig,

    /// The `[display]` section of the configuration
    pub display: Config,

    /// Local wall-clock time at startup
    pub now: NaiveDateTime,
}

impl Context {
    /// Create a context with an empty calendar cache
    pub fn new(core: CoreConfig, display: Config) -> Self {
        Self {
            calendar: LunarCalendar::new(),
            core,
            display,
            now: Local::now().naive_local(),
        }
    }
}
