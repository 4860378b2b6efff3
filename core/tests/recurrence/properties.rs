// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Properties every expansion must hold, checked over a mix of rules.

use lunarcal_core::{
    DEFAULT_MAX_OCCURRENCES, DateRange, DateTimeRange, Termination, expand, generate_rule,
    is_date_included, occurrences_between, parse_rule,
};

use crate::common::{assert_strictly_increasing, date, datetime, rule};

const RULES: [&str; 10] = [
    "FREQ=DAILY",
    "FREQ=DAILY;INTERVAL=5;COUNT=40",
    "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10",
    "FREQ=WEEKLY;INTERVAL=3;BYDAY=SU,TH;WKST=SU;UNTIL=20260630",
    "FREQ=MONTHLY;BYMONTHDAY=1,-1",
    "FREQ=MONTHLY;BYDAY=1MO,-1FR;COUNT=30",
    "FREQ=MONTHLY;INTERVAL=2;BYDAY=FR;BYMONTHDAY=13",
    "FREQ=YEARLY;BYMONTH=2,8;BYMONTHDAY=29",
    "FREQ=YEARLY;BYMONTH=11;BYDAY=4TH;UNTIL=20351231",
    "FREQ=DAILY;BYDAY=SA,SU;BYMONTH=12",
];

#[test]
fn canonical_text_round_trips() {
    for src in RULES {
        let parsed = rule(src);
        let text = generate_rule(&parsed).unwrap();
        assert_eq!(parse_rule(&text), Ok(parsed), "{src} -> {text}");
    }
}

#[test]
fn occurrences_are_strictly_increasing() {
    let anchor = datetime(2025, 1, 13, 18);
    for src in RULES {
        let occurrences = expand(anchor, &rule(src), DEFAULT_MAX_OCCURRENCES);
        assert!(!occurrences.is_empty(), "{src}");
        assert!(occurrences.iter().all(|o| *o >= anchor), "{src}");
        assert_strictly_increasing(&occurrences);
    }
}

#[test]
fn expansion_is_bounded() {
    let anchor = datetime(2025, 1, 13, 18);
    for src in RULES {
        let rule = rule(src);
        for cap in [1, 7, DEFAULT_MAX_OCCURRENCES] {
            let occurrences = expand(anchor, &rule, cap);
            assert!(occurrences.len() <= cap, "{src}");

            match rule.termination {
                Some(Termination::Count(n)) => {
                    assert!(occurrences.len() <= n as usize, "{src}");
                }
                Some(Termination::Until(until)) => {
                    assert!(occurrences.iter().all(|o| o.date() <= until), "{src}");
                }
                None => assert_eq!(occurrences.len(), cap, "{src}"),
            }
        }
    }
}

#[test]
fn membership_matches_expansion() {
    let anchor = datetime(2025, 1, 13, 18);
    let year = DateRange::new(date(2025, 1, 1), date(2025, 12, 31));
    for src in RULES {
        let rule = rule(src);
        let in_year = occurrences_between(
            anchor,
            &rule,
            DateTimeRange::days(year),
            DEFAULT_MAX_OCCURRENCES,
        );
        for day in year.days() {
            let expected = in_year.iter().any(|o| o.date() == day);
            assert_eq!(
                is_date_included(day, anchor, &rule),
                expected,
                "{src} on {day}"
            );
        }
    }
}

#[test]
fn window_is_a_slice_of_the_full_expansion() {
    let anchor = datetime(2025, 1, 13, 18);
    let range = DateTimeRange::days(DateRange::new(date(2025, 6, 1), date(2025, 9, 30)));
    for src in RULES {
        let rule = rule(src);
        let full: Vec<_> = expand(anchor, &rule, 2000)
            .into_iter()
            .filter(|o| range.contains(*o))
            .collect();
        let window = occurrences_between(anchor, &rule, range, 2000);
        assert_eq!(window, full, "{src}");
    }
}
