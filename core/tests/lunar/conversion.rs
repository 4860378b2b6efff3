// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Gregorian and lunar conversion, labels and solar terms.

use lunarcal_core::lunar::{
    MAX_YEAR, MIN_YEAR, leap_month, lunar_month_list, lunar_to_solar, lunar_to_solar_clamped,
    solar_term_for_date, solar_terms_of_year, solar_to_lunar,
};
use lunarcal_core::{DateRange, LunarError, TermKind, Zodiac};

use crate::common::date;

#[test]
fn lunar_new_year_2026() {
    // Arrange
    let new_year = date(2026, 2, 17);

    // Act
    let lunar = solar_to_lunar(new_year).unwrap();

    // Assert
    assert_eq!((lunar.year, lunar.month, lunar.day), (2026, 1, 1));
    assert!(!lunar.is_leap_month);
    assert_eq!(lunar.year_ganzhi.to_string(), "丙午");
    assert_eq!(lunar.zodiac, Zodiac::Horse);
    assert_eq!(lunar_to_solar(2026, 1, 1, false), Ok(new_year));
}

#[test]
fn day_before_new_year_belongs_to_previous_year() {
    let lunar = solar_to_lunar(date(2026, 2, 16)).unwrap();
    assert_eq!((lunar.year, lunar.month, lunar.day), (2025, 12, 29));
    assert_eq!(lunar.year_ganzhi.to_string(), "乙巳");
    assert_eq!(lunar.zodiac, Zodiac::Snake);
    // The month pillar already follows 立春
    assert_eq!(lunar.month_ganzhi.to_string(), "庚寅");
}

#[test]
fn leap_months_are_distinct() {
    assert_eq!(leap_month(2023), Some(2));
    assert_eq!(leap_month(2025), Some(6));
    assert_eq!(leap_month(2026), None);

    let regular = lunar_to_solar(2025, 6, 1, false).unwrap();
    let leap = lunar_to_solar(2025, 6, 1, true).unwrap();
    assert_eq!(regular, date(2025, 6, 25));
    assert_eq!(leap, date(2025, 7, 25));

    let lunar = solar_to_lunar(date(2025, 8, 1)).unwrap();
    assert!(lunar.is_leap_month);
    assert_eq!(lunar.month_name(), "闰六月");
    assert_eq!(lunar.day_name(), "初八");
    assert_eq!(lunar.to_string(), "乙巳年 闰六月初八");
}

#[test]
fn round_trips_every_day_of_a_decade() {
    for day in DateRange::new(date(2018, 1, 1), date(2027, 12, 31)).days() {
        let lunar = solar_to_lunar(day).unwrap();
        let back = lunar_to_solar(lunar.year, lunar.month, lunar.day, lunar.is_leap_month);
        assert_eq!(back, Ok(day), "{day} -> {lunar}");
    }
}

#[test]
fn rejects_dates_that_do_not_exist() {
    // 2026 has no leap month, the leap sixth month of 2025 has 29 days
    assert!(matches!(
        lunar_to_solar(2026, 6, 1, true),
        Err(LunarError::InvalidLunarDate { .. })
    ));
    assert!(matches!(
        lunar_to_solar(2025, 6, 30, true),
        Err(LunarError::InvalidLunarDate { .. })
    ));
    assert!(matches!(
        lunar_to_solar(2025, 13, 1, false),
        Err(LunarError::InvalidLunarDate { .. })
    ));
    assert_eq!(
        lunar_to_solar(MAX_YEAR + 1, 1, 1, false),
        Err(LunarError::YearOutOfRange(MAX_YEAR + 1))
    );

    // The clamped variant snaps to the month's last day instead
    assert_eq!(
        lunar_to_solar_clamped(2025, 6, 30, true),
        lunar_to_solar(2025, 6, 29, true)
    );
}

#[test]
fn enforces_supported_range() {
    assert!(solar_to_lunar(date(1900, 1, 31)).is_ok());
    assert_eq!(
        solar_to_lunar(date(1900, 1, 30)),
        Err(LunarError::OutOfRange(date(1900, 1, 30)))
    );
    assert!(solar_to_lunar(date(2100, 12, 31)).is_ok());
    assert_eq!(
        solar_to_lunar(date(2101, 1, 1)),
        Err(LunarError::OutOfRange(date(2101, 1, 1)))
    );
    assert_eq!(lunar_to_solar(MIN_YEAR, 1, 1, false), Ok(date(1900, 1, 31)));
}

#[test]
fn month_lists_cover_each_year() {
    for year in [2023, 2025, 2026] {
        let months = lunar_month_list(year);
        let expected = if leap_month(year).is_some() { 13 } else { 12 };
        assert_eq!(months.len(), expected, "{year}");

        let days: i64 = months.iter().map(|m| i64::from(m.days)).sum();
        let next = lunar_to_solar(year + 1, 1, 1, false).unwrap();
        let first = lunar_to_solar(year, 1, 1, false).unwrap();
        assert_eq!(days, (next - first).num_days(), "{year}");
    }
}

#[test]
fn solar_terms_of_2025() {
    // Arrange
    let terms = solar_terms_of_year(2025).unwrap();

    // Assert
    assert_eq!(terms.len(), 24);
    let dates: Vec<_> = terms.iter().map(|t| (t.term.to_string(), t.date)).collect();
    for (name, expected) in [
        ("小寒", date(2025, 1, 5)),
        ("立春", date(2025, 2, 3)),
        ("春分", date(2025, 3, 20)),
        ("清明", date(2025, 4, 4)),
        ("夏至", date(2025, 6, 21)),
        ("处暑", date(2025, 8, 23)),
        ("秋分", date(2025, 9, 23)),
        ("大雪", date(2025, 12, 7)),
        ("冬至", date(2025, 12, 21)),
    ] {
        assert!(
            dates.contains(&(name.to_owned(), expected)),
            "{name} should fall on {expected}"
        );
    }

    let jie = terms.iter().filter(|t| t.kind == TermKind::Jie).count();
    assert_eq!(jie, 12);
    assert!(terms.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn finds_term_of_a_day() {
    let term = solar_term_for_date(date(2026, 4, 5)).unwrap();
    assert_eq!(term.term.to_string(), "清明");
    assert_eq!(term.kind, TermKind::Jie);
    assert!(solar_term_for_date(date(2026, 4, 4)).is_none());
    assert_eq!(
        solar_terms_of_year(1899),
        Err(LunarError::YearOutOfRange(1899))
    );
}

#[test]
fn day_pillars_of_known_dates() {
    for (d, expected) in [
        (date(1900, 1, 31), "甲辰"),
        (date(2000, 1, 1), "戊午"),
        (date(2025, 2, 3), "癸卯"),
    ] {
        assert_eq!(solar_to_lunar(d).unwrap().day_ganzhi.to_string(), expected, "{d}");
    }
}
