// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end of lunarcal: lunar calendar lookups and recurrence rule tooling.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod cli;
mod cmd_convert;
mod cmd_day;
mod cmd_generate_completion;
mod cmd_month;
mod cmd_rrule;
mod cmd_terms;
mod config;
mod date_formatter;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, Context, run};
pub use crate::config::{Config, parse_config};
