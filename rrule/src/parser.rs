// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parser for the `recur` value type defined in RFC 5545 Section 3.3.10.

use std::borrow::Cow;

use chrono::NaiveDate;
use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::ValueInput;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::error::RRuleError;
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE,
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY,
    KW_RRULE_FREQ_MONTHLY, KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY,
    KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::rule::{Frequency, RecurrenceRule, Termination, WeekDay, WeekDayNum};

/// Parse a recurrence rule such as `FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10`.
///
/// A leading `RRULE:` is accepted, and the rule is matched case-insensitively.
///
/// ## Errors
///
/// Returns [`RRuleError::Malformed`] when the text is not a rule this crate can evaluate.
pub fn parse_rule(src: &str) -> Result<RecurrenceRule, RRuleError> {
    let trimmed = src.trim();
    let body = match trimmed.get(..KW_RRULE.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(KW_RRULE) => {
            trimmed.get(KW_RRULE.len()..).unwrap_or_default()
        }
        _ => trimmed,
    };
    let normalized = body.to_ascii_uppercase();

    rrule::<_, extra::Err<Rich<'_, char>>>()
        .parse(normalized.as_str())
        .into_result()
        .map_err(|errs| RRuleError::Malformed {
            input: src.to_string(),
            reason: errs
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        })
}

/// Failure reasons surfaced as parser labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleExpected {
    Date,
    PositiveU32,
    OutOfRange(&'static str),
    DuplicatePart,
    RequiredFreq,
    CountUntilExclusion,
    SubDailyFrequency,
    UnsupportedPart,
}

impl From<RuleExpected> for RichPattern<'_, char> {
    fn from(expected: RuleExpected) -> Self {
        let label = match expected {
            RuleExpected::Date => Cow::Borrowed("a valid date (YYYYMMDD)"),
            RuleExpected::PositiveU32 => Cow::Borrowed("a positive integer"),
            RuleExpected::OutOfRange(part) => Cow::Owned(format!("a {part} value in range")),
            RuleExpected::DuplicatePart => Cow::Borrowed("each rule part at most once"),
            RuleExpected::RequiredFreq => Cow::Borrowed("a FREQ rule part"),
            RuleExpected::CountUntilExclusion => {
                Cow::Borrowed("either COUNT or UNTIL, not both")
            }
            RuleExpected::SubDailyFrequency => Cow::Borrowed("DAILY, WEEKLY, MONTHLY or YEARLY"),
            RuleExpected::UnsupportedPart => {
                Cow::Borrowed("a day-granular rule part (no BYSECOND, BYMINUTE, BYHOUR, BYYEARDAY, BYWEEKNO or BYSETPOS)")
            }
        };
        Self::Label(label)
    }
}

/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
/// ```
fn rrule<'src, I, E>() -> impl Parser<'src, I, RecurrenceRule, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    rrule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect()
        .try_map(build_from_parts::<I, E::Error>)
        .then_ignore(end())
}

#[derive(Debug, Clone)]
enum Part {
    Freq(Frequency),
    Until(NaiveDate),
    Count(u32),
    Interval(u32),
    ByMonthDay(Vec<i8>),
    ByMonth(Vec<u8>),
    ByDay(Vec<WeekDayNum>),
    Wkst(WeekDay),
}

fn build_from_parts<'src, I, Err>(parts: Vec<Part>, span: I::Span) -> Result<RecurrenceRule, Err>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    Err: LabelError<'src, I, RuleExpected>,
{
    fn set_once<'src, I, Err, T>(slot: &mut Option<T>, value: T, span: I::Span) -> Result<(), Err>
    where
        I: ValueInput<'src, Token = char, Span = SimpleSpan>,
        Err: LabelError<'src, I, RuleExpected>,
    {
        if slot.is_some() {
            return Err(Err::expected_found([RuleExpected::DuplicatePart], None, span));
        }
        *slot = Some(value);
        Ok(())
    }

    let mut freq = None;
    let mut until = None;
    let mut count = None;
    let mut interval = None;
    let mut by_month_day = None;
    let mut by_month = None;
    let mut by_day = None;
    let mut wkst = None;

    for part in parts {
        match part {
            Part::Freq(v) => set_once::<I, Err, _>(&mut freq, v, span)?,
            Part::Until(v) => set_once::<I, Err, _>(&mut until, v, span)?,
            Part::Count(v) => set_once::<I, Err, _>(&mut count, v, span)?,
            Part::Interval(v) => set_once::<I, Err, _>(&mut interval, v, span)?,
            Part::ByMonthDay(v) => set_once::<I, Err, _>(&mut by_month_day, v, span)?,
            Part::ByMonth(v) => set_once::<I, Err, _>(&mut by_month, v, span)?,
            Part::ByDay(v) => set_once::<I, Err, _>(&mut by_day, v, span)?,
            Part::Wkst(v) => set_once::<I, Err, _>(&mut wkst, v, span)?,
        }
    }

    let freq =
        freq.ok_or_else(|| Err::expected_found([RuleExpected::RequiredFreq], None, span))?;

    let termination = match (count, until) {
        (Some(_), Some(_)) => {
            return Err(Err::expected_found(
                [RuleExpected::CountUntilExclusion],
                None,
                span,
            ));
        }
        (Some(n), None) => Some(Termination::Count(n)),
        (None, Some(d)) => Some(Termination::Until(d)),
        (None, None) => None,
    };

    Ok(RecurrenceRule {
        freq,
        interval: interval.unwrap_or(1),
        termination,
        by_day: by_day.unwrap_or_default(),
        by_month_day: by_month_day.unwrap_or_default(),
        by_month: by_month.unwrap_or_default(),
        wkst,
    })
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "WKST" "=" weekday )
/// ```
///
/// `BYSECOND`, `BYMINUTE`, `BYHOUR`, `BYYEARDAY`, `BYWEEKNO` and `BYSETPOS`
/// are recognized but rejected.
fn rrule_part<'src, I, E>() -> impl Parser<'src, I, Part, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    let kw = |kw| just(kw).ignore_then(just('='));

    let freq = kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq);

    let until = kw(KW_RRULE_UNTIL).ignore_then(enddate()).map(Part::Until);

    let count = kw(KW_RRULE_COUNT)
        .ignore_then(u32_non_zero())
        .map(Part::Count);

    let interval = kw(KW_RRULE_INTERVAL)
        .ignore_then(u32_non_zero())
        .map(Part::Interval);

    let by_day = kw(KW_RRULE_BYDAY)
        .ignore_then(weekdaynum().separated_by(just(',')).at_least(1).collect())
        .map(Part::ByDay);

    // BYMONTHDAY - -31 to -1 and 1 to 31
    let by_month_day = kw(KW_RRULE_BYMONTHDAY)
        .ignore_then(
            signed(KW_RRULE_BYMONTHDAY, 31)
                .separated_by(just(','))
                .at_least(1)
                .collect(),
        )
        .map(Part::ByMonthDay);

    // BYMONTH - 1 to 12
    let by_month = kw(KW_RRULE_BYMONTH)
        .ignore_then(monthnum().separated_by(just(',')).at_least(1).collect())
        .map(Part::ByMonth);

    let wkst = kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst);

    let unsupported = choice((
        just(KW_RRULE_BYSECOND),
        just(KW_RRULE_BYMINUTE),
        just(KW_RRULE_BYHOUR),
        just(KW_RRULE_BYYEARDAY),
        just(KW_RRULE_BYWEEKNO),
        just(KW_RRULE_BYSETPOS),
    ))
    .then_ignore(just('='))
    .then_ignore(none_of(';').repeated())
    .try_map(|_, span| {
        Err::<Part, _>(E::Error::expected_found(
            [RuleExpected::UnsupportedPart],
            None,
            span,
        ))
    });

    choice((
        freq,
        until,
        count,
        interval,
        by_day,
        by_month_day,
        by_month,
        wkst,
        unsupported,
    ))
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src, I, E>() -> impl Parser<'src, I, Frequency, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    let sub_daily = choice((
        just(KW_RRULE_FREQ_SECONDLY),
        just(KW_RRULE_FREQ_MINUTELY),
        just(KW_RRULE_FREQ_HOURLY),
    ))
    .try_map(|_, span| {
        Err::<Frequency, _>(E::Error::expected_found(
            [RuleExpected::SubDailyFrequency],
            None,
            span,
        ))
    });

    choice((
        just(KW_RRULE_FREQ_DAILY).to(Frequency::Daily),
        just(KW_RRULE_FREQ_WEEKLY).to(Frequency::Weekly),
        just(KW_RRULE_FREQ_MONTHLY).to(Frequency::Monthly),
        just(KW_RRULE_FREQ_YEARLY).to(Frequency::Yearly),
        sub_daily,
    ))
}

/// ```txt
/// enddate     = date / date-time
/// ```
///
/// Occurrences are day-granular, so the time of a date-time is dropped.
fn enddate<'src, I, E>() -> impl Parser<'src, I, NaiveDate, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    let time = just('T')
        .then(digits(6, 6))
        .then(just('Z').or_not())
        .or_not();

    digits(8, 8)
        .try_map(|s, span| {
            NaiveDate::parse_from_str(&s, "%Y%m%d")
                .map_err(|_| E::Error::expected_found([RuleExpected::Date], None, span))
        })
        .then_ignore(time)
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekDayNum, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    signed(KW_RRULE_BYDAY, 53)
        .or_not()
        .then(weekday())
        .map(|(occurrence, day)| WeekDayNum { day, occurrence })
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src, I, E>() -> impl Parser<'src, I, WeekDay, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_DAY_SU).to(WeekDay::Sunday),
        just(KW_DAY_MO).to(WeekDay::Monday),
        just(KW_DAY_TU).to(WeekDay::Tuesday),
        just(KW_DAY_WE).to(WeekDay::Wednesday),
        just(KW_DAY_TH).to(WeekDay::Thursday),
        just(KW_DAY_FR).to(WeekDay::Friday),
        just(KW_DAY_SA).to(WeekDay::Saturday),
    ))
}

/// ```txt
/// monthnum    = 1*2DIGIT       ;1 to 12
/// ```
fn monthnum<'src, I, E>() -> impl Parser<'src, I, u8, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    digits(1, 2).try_map(|s, span| {
        lexical::parse::<u8, _>(&s)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| {
                E::Error::expected_found([RuleExpected::OutOfRange(KW_RRULE_BYMONTH)], None, span)
            })
    })
}

// Helper parsers

fn digits<'src, I, E>(min: usize, max: usize) -> impl Parser<'src, I, String, E> + Clone
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
{
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(min)
        .at_most(max)
        .collect::<String>()
}

/// `[plus / minus] 1*2DIGIT` with a magnitude in `1..=max`
fn signed<'src, I, E>(part: &'static str, max: u8) -> impl Parser<'src, I, i8, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    let is_positive = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')));

    is_positive
        .then(digits(1, 2))
        .try_map(move |(positive, s), span| {
            let n = lexical::parse::<u8, _>(&s)
                .ok()
                .filter(|n| (1..=max).contains(n))
                .and_then(|n| i8::try_from(n).ok())
                .ok_or_else(|| {
                    E::Error::expected_found([RuleExpected::OutOfRange(part)], None, span)
                })?;
            Ok(if positive { n } else { -n })
        })
}

/// Parse u32 (1 or more digits)
fn u32_non_zero<'src, I, E>() -> impl Parser<'src, I, u32, E>
where
    I: ValueInput<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, RuleExpected>,
{
    digits(1, 10).try_map(|s, span| match lexical::parse::<u32, _>(&s) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(E::Error::expected_found(
            [RuleExpected::PositiveU32],
            None,
            span,
        )),
    })
}
