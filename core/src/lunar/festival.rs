// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Datelike, NaiveDate};

use crate::lunar::convert::LunarDate;
use crate::lunar::solar_term::{SolarTerm, SolarTermName};
use crate::lunar::table::{leap_month, lunar_month_day_count};

/// Where a festival comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FestivalCategory {
    /// Fixed on a lunar month and day
    TraditionalLunar,

    /// Falls on a solar term
    SolarTerm,

    /// Fixed on a Gregorian month and day
    ModernSolar,
}

/// A festival or holiday observed on some day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Festival {
    /// Display name
    pub name: &'static str,

    /// Source calendar of the festival
    pub category: FestivalCategory,

    /// Whether the date follows the lunar calendar
    pub is_lunar_anchored: bool,
}

impl Festival {
    const fn traditional(name: &'static str) -> Self {
        Self {
            name,
            category: FestivalCategory::TraditionalLunar,
            is_lunar_anchored: true,
        }
    }

    const fn solar_term(name: &'static str) -> Self {
        Self {
            name,
            category: FestivalCategory::SolarTerm,
            is_lunar_anchored: false,
        }
    }

    const fn modern(name: &'static str) -> Self {
        Self {
            name,
            category: FestivalCategory::ModernSolar,
            is_lunar_anchored: false,
        }
    }
}

/// Festivals on a lunar (month, day), regular months only.
const TRADITIONAL: [(u8, u8, &str); 10] = [
    (1, 1, "春节"),
    (1, 15, "元宵节"),
    (2, 2, "龙抬头"),
    (5, 5, "端午节"),
    (7, 7, "七夕节"),
    (7, 15, "中元节"),
    (8, 15, "中秋节"),
    (9, 9, "重阳节"),
    (12, 8, "腊八节"),
    (12, 23, "小年"),
];

const NEW_YEARS_EVE: &str = "除夕";

/// Solar terms also observed as festivals.
const SOLAR_TERM_FESTIVALS: [(SolarTermName, &str); 2] = [
    (SolarTermName::PureBrightness, "清明节"),
    (SolarTermName::WinterSolstice, "冬至"),
];

/// Festivals on a Gregorian (month, day).
const MODERN: [(u32, u32, &str); 14] = [
    (1, 1, "元旦"),
    (2, 14, "情人节"),
    (3, 8, "妇女节"),
    (3, 12, "植树节"),
    (4, 1, "愚人节"),
    (5, 1, "劳动节"),
    (5, 4, "青年节"),
    (6, 1, "儿童节"),
    (7, 1, "建党节"),
    (8, 1, "建军节"),
    (9, 10, "教师节"),
    (10, 1, "国庆节"),
    (12, 24, "平安夜"),
    (12, 25, "圣诞节"),
];

/// Festivals observed on `date`: traditional lunar ones first, then solar-term ones,
/// then modern Gregorian holidays.
pub fn festivals_for_date(
    date: NaiveDate,
    lunar: &LunarDate,
    term: Option<&SolarTerm>,
) -> Vec<Festival> {
    let mut festivals = Vec::new();

    if !lunar.is_leap_month {
        festivals.extend(
            TRADITIONAL
                .iter()
                .filter(|(m, d, _)| *m == lunar.month && *d == lunar.day)
                .map(|(_, _, name)| Festival::traditional(*name)),
        );
    }
    if is_new_years_eve(lunar) {
        festivals.push(Festival::traditional(NEW_YEARS_EVE));
    }

    if let Some(term) = term {
        festivals.extend(
            SOLAR_TERM_FESTIVALS
                .iter()
                .filter(|(t, _)| *t == term.term)
                .map(|(_, name)| Festival::solar_term(*name)),
        );
    }

    festivals.extend(
        MODERN
            .iter()
            .filter(|(m, d, _)| *m == date.month() && *d == date.day())
            .map(|(_, _, name)| Festival::modern(*name)),
    );

    festivals
}

/// The last day of the twelfth month, or of the leap twelfth month when the year has one.
fn is_new_years_eve(lunar: &LunarDate) -> bool {
    let leap_twelfth = leap_month(lunar.year) == Some(12);
    lunar.month == 12
        && lunar.is_leap_month == leap_twelfth
        && lunar.day == lunar_month_day_count(lunar.year, 12, leap_twelfth)
}
