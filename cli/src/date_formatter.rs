// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, sync::Arc};

use chrono::Datelike;
use colored::Color;
use lunarcal_core::CompositeDateInfo;

use crate::config::Config;
use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::OutputFormat;

/// Renders composite date infos, one row per day.
#[derive(Debug)]
pub struct DateFormatter {
    columns: Vec<DateColumn>,
    format: OutputFormat,
}

impl DateFormatter {
    pub fn new(display: &Config) -> Self {
        let mut columns = vec![DateColumn::Date, DateColumn::Weekday];
        if display.show_lunar {
            columns.extend([DateColumn::Lunar, DateColumn::Pillars, DateColumn::Zodiac]);
        }
        if display.show_solar_terms {
            columns.push(DateColumn::SolarTerm);
        }
        if display.show_festivals {
            columns.push(DateColumn::Festivals);
        }
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, infos: &'a [Arc<CompositeDateInfo>]) -> Display<'a> {
        Display {
            infos,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    infos: &'a [Arc<CompositeDateInfo>],
    formatter: &'a DateFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let infos: Vec<&CompositeDateInfo> = self.infos.iter().map(AsRef::as_ref).collect();
                let json = serde_json::to_string_pretty(&infos).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(&self.formatter.columns, self.infos).with_header(true)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateColumn {
    Date,
    Weekday,
    Lunar,
    Pillars,
    Zodiac,
    SolarTerm,
    Festivals,
}

impl TableColumn<Arc<CompositeDateInfo>> for DateColumn {
    fn name(&self) -> &'static str {
        match self {
            DateColumn::Date => "Date",
            DateColumn::Weekday => "Day",
            DateColumn::Lunar => "Lunar",
            DateColumn::Pillars => "Pillars",
            DateColumn::Zodiac => "Zodiac",
            DateColumn::SolarTerm => "Solar Term",
            DateColumn::Festivals => "Festivals",
        }
    }

    fn format(&self, info: &Arc<CompositeDateInfo>) -> String {
        let lunar = &info.lunar_date;
        match self {
            DateColumn::Date => info.solar_date.format("%Y-%m-%d").to_string(),
            DateColumn::Weekday => info.solar_date.weekday().to_string(),
            DateColumn::Lunar => format!("{}{}", lunar.month_name(), lunar.day_name()),
            DateColumn::Pillars => format!(
                "{}年 {}月 {}日",
                lunar.year_ganzhi, lunar.month_ganzhi, lunar.day_ganzhi
            ),
            DateColumn::Zodiac => lunar.zodiac.to_string(),
            DateColumn::SolarTerm => info
                .solar_term
                .map(|term| term.term.to_string())
                .unwrap_or_default(),
            DateColumn::Festivals => info
                .festivals
                .iter()
                .map(|festival| festival.name)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, info: &Arc<CompositeDateInfo>) -> Option<Color> {
        match self {
            DateColumn::SolarTerm if info.solar_term.is_some() => Some(Color::Green),
            DateColumn::Festivals if !info.festivals.is_empty() => Some(Color::Red),
            _ => None,
        }
    }
}
