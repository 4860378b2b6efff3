// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The memoizing calendar service as the rendering layer uses it.

use std::sync::Arc;

use lunarcal_core::lunar::{
    leap_month, lunar_day_list, lunar_month_day_count, lunar_month_list, lunar_year_list,
};
use lunarcal_core::{DateRange, FestivalCategory, LunarCalendar, WeekStart};

use crate::common::{date, datetime};

#[test]
fn new_years_eve_in_short_and_long_twelfth_months() {
    // Arrange
    let calendar = LunarCalendar::new();

    // Act
    let short = calendar.full_date_info(date(2025, 1, 28)).unwrap();
    let long = calendar.full_date_info(date(2024, 2, 9)).unwrap();

    // Assert
    assert_eq!(lunar_month_day_count(2024, 12, false), 29);
    assert_eq!(short.lunar_date.day, 29);
    assert_eq!(short.festivals[0].name, "除夕");

    assert_eq!(lunar_month_day_count(2023, 12, false), 30);
    assert_eq!(long.lunar_date.day, 30);
    assert_eq!(long.festivals[0].name, "除夕");
    assert_eq!(long.festivals[0].category, FestivalCategory::TraditionalLunar);
}

#[test]
fn cache_is_idempotent() {
    let calendar = LunarCalendar::new();
    let morning = datetime(2025, 10, 6, 8);
    let evening = datetime(2025, 10, 6, 22);

    let first = calendar.full_date_info(morning.date()).unwrap();
    let second = calendar.full_date_info(evening.date()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calendar.computations(), 1);
    assert_eq!(first.festivals[0].name, "中秋节");
}

#[test]
fn fills_a_month_grid_once() {
    // Arrange
    let calendar = LunarCalendar::new();
    let grid = DateRange::month_grid(2025, 6, WeekStart::Monday).unwrap();

    // Act
    let infos = calendar.date_infos(grid).unwrap();
    let again = calendar.date_infos(grid).unwrap();

    // Assert
    assert_eq!(infos.len() % 7, 0);
    assert_eq!(infos.len(), grid.len());
    assert_eq!(calendar.computations(), grid.len());
    assert_eq!(infos, again);

    let terms: Vec<_> = infos
        .iter()
        .filter_map(|i| i.solar_term.map(|t| t.term.to_string()))
        .collect();
    assert_eq!(terms, vec!["芒种", "夏至"]);

    calendar.clear_cache();
    assert_eq!(calendar.cache_len(), 0);
}

#[test]
fn serializes_for_json_output() {
    let calendar = LunarCalendar::new();
    let info = calendar.full_date_info(date(2026, 2, 17)).unwrap();
    let json = serde_json::to_value(&*info).unwrap();
    assert_eq!(json["solar_date"], "2026-02-17");
    assert_eq!(json["lunar_date"]["year_ganzhi"], "丙午");
    assert_eq!(json["lunar_date"]["zodiac"], "马");
    assert_eq!(json["festivals"][0]["category"], "traditional_lunar");
}

#[test]
fn selector_lists_agree_with_table() {
    let years = lunar_year_list();
    assert_eq!(years.first(), Some(&1900));
    assert_eq!(years.last(), Some(&2100));

    for year in [2023, 2025, 2033] {
        let months = lunar_month_list(year);
        let leaps: Vec<_> = months.iter().filter(|m| m.is_leap).collect();
        assert_eq!(leaps.len(), usize::from(leap_month(year).is_some()));
        for m in &months {
            let days = lunar_day_list(year, m.month, m.is_leap);
            assert_eq!(days.len(), usize::from(m.days));
            assert_eq!(m.days, lunar_month_day_count(year, m.month, m.is_leap));
        }
    }
    // A leap month directly follows its regular month
    let months = lunar_month_list(2033);
    let leap = months.iter().position(|m| m.is_leap).unwrap();
    assert_eq!(months[leap - 1].month, 11);
    assert_eq!(months[leap].month, 11);
}

#[test]
fn leap_and_regular_months_have_distinct_day_lists() {
    for (year, month, regular_days, leap_days) in [(2025, 6, 30, 29), (2020, 4, 30, 29)] {
        // Arrange
        assert_eq!(leap_month(year), Some(month));

        // Act
        let regular = lunar_day_list(year, month, false);
        let leap = lunar_day_list(year, month, true);

        // Assert
        assert_ne!(regular, leap, "{year} month {month}");
        assert_eq!(regular.len(), usize::from(regular_days));
        assert_eq!(leap.len(), usize::from(leap_days));
        assert_eq!(lunar_month_day_count(year, month, false), regular_days);
        assert_eq!(lunar_month_day_count(year, month, true), leap_days);
    }
}
