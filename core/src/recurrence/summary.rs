// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write;

use lunarcal_rrule::{Frequency, RecurrenceRule, Termination, WeekDay, WeekDayNum};

use crate::datetime::STABLE_FORMAT_DATEONLY;

/// A short English description of a rule, e.g. "every 2 weeks on Mon, Wed, Fri".
pub fn summary(rule: &RecurrenceRule) -> String {
    let unit = match rule.freq {
        Frequency::Daily => "day",
        Frequency::Weekly => "week",
        Frequency::Monthly => "month",
        Frequency::Yearly => "year",
    };

    let mut s = match rule.interval {
        1 => format!("every {unit}"),
        n => format!("every {n} {unit}s"),
    };

    if !rule.by_month.is_empty() {
        let months: Vec<_> = rule.by_month.iter().map(|&m| month_abbr(m)).collect();
        let _ = write!(s, " in {}", months.join(", "));
    }

    let mut on = Vec::new();
    if !rule.by_day.is_empty() {
        let days: Vec<_> = rule.by_day.iter().map(|d| weekday_phrase(*d)).collect();
        on.push(days.join(", "));
    }
    if !rule.by_month_day.is_empty() {
        let days: Vec<_> = rule.by_month_day.iter().map(ToString::to_string).collect();
        on.push(format!("day {}", days.join(", ")));
    }
    if !on.is_empty() {
        let _ = write!(s, " on {}", on.join(", "));
    }

    match rule.termination {
        Some(Termination::Count(1)) => s.push_str(" for 1 occurrence"),
        Some(Termination::Count(n)) => {
            let _ = write!(s, " for {n} occurrences");
        }
        Some(Termination::Until(until)) => {
            let _ = write!(s, " until {}", until.format(STABLE_FORMAT_DATEONLY));
        }
        None => {}
    }

    s
}

fn weekday_phrase(day: WeekDayNum) -> String {
    let name = weekday_abbr(day.day);
    match day.occurrence {
        None => name.to_owned(),
        Some(-1) => format!("last {name}"),
        Some(n) if n < 0 => format!("{} last {name}", ordinal(n.unsigned_abs())),
        Some(n) => format!("{} {name}", ordinal(n.unsigned_abs())),
    }
}

fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn weekday_abbr(day: WeekDay) -> &'static str {
    match day {
        WeekDay::Monday => "Mon",
        WeekDay::Tuesday => "Tue",
        WeekDay::Wednesday => "Wed",
        WeekDay::Thursday => "Thu",
        WeekDay::Friday => "Fri",
        WeekDay::Saturday => "Sat",
        WeekDay::Sunday => "Sun",
    }
}

fn month_abbr(month: u8) -> &'static str {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    MONTHS
        .get(usize::from(month).wrapping_sub(1))
        .copied()
        .unwrap_or("?")
}
