// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use lunarcal_rrule::{RRuleError, generate_rule, parse_rule};

#[test]
fn canonical_rules_survive_parse_and_generate() {
    let rules = [
        "FREQ=DAILY",
        "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE,FR;COUNT=10",
        "FREQ=MONTHLY;BYMONTHDAY=1,-1;UNTIL=20260101",
        "FREQ=MONTHLY;BYDAY=-1FR",
        "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=29",
        "FREQ=WEEKLY;BYDAY=SU;WKST=SU",
    ];

    for src in rules {
        let rule = parse_rule(src).unwrap();
        assert_eq!(generate_rule(&rule).unwrap(), src);
    }
}

#[test]
fn non_canonical_input_is_normalized() {
    let rule = parse_rule("RRULE:count=5;interval=1;freq=daily").unwrap();
    assert_eq!(generate_rule(&rule).unwrap(), "FREQ=DAILY;COUNT=5");

    let rule = parse_rule("FREQ=DAILY;UNTIL=20251231T120000Z").unwrap();
    assert_eq!(generate_rule(&rule).unwrap(), "FREQ=DAILY;UNTIL=20251231");
}

#[test]
fn malformed_rule_reports_input() {
    let err = parse_rule("FREQ=WEEKLY;BYDAY=XX").unwrap_err();
    assert!(matches!(err, RRuleError::Malformed { ref input, .. } if input == "FREQ=WEEKLY;BYDAY=XX"));
    assert!(err.to_string().contains("FREQ=WEEKLY;BYDAY=XX"));
}
