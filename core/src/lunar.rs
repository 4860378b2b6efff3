// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Gregorian and Chinese lunar calendar reconciliation.

mod convert;
mod festival;
mod ganzhi;
mod service;
mod solar_term;
mod table;

pub use convert::{LunarDate, lunar_to_solar, lunar_to_solar_clamped, solar_to_lunar};
pub use festival::{Festival, FestivalCategory, festivals_for_date};
pub use ganzhi::{Branch, Sexagenary, Stem, Zodiac};
pub use service::{CompositeDateInfo, LunarCalendar};
pub use solar_term::{SolarTerm, SolarTermName, TermKind, solar_term_for_date, solar_terms_of_year};
pub use table::{
    LunarMonth, MAX_YEAR, MIN_YEAR, leap_month, lunar_day_list, lunar_month_day_count,
    lunar_month_list, lunar_year_list,
};
