// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The 24 solar terms (二十四节气).
//!
//! Terms are computed from the apparent ecliptic longitude of the sun with the
//! low-precision solar theory of Meeus, *Astronomical Algorithms*, chapter 25,
//! and dated in China Standard Time (UTC+8). The error is well under an hour
//! for 1900 to 2100, so only terms falling within minutes of midnight can land
//! on a neighbouring day.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::LunarError;
use crate::lunar::table::{MAX_YEAR, MIN_YEAR};

/// Name of a solar term, in calendar order starting with 小寒.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::FromRepr,
)]
#[repr(u8)]
#[expect(missing_docs)]
pub enum SolarTermName {
    #[strum(serialize = "小寒")]
    MinorCold,
    #[strum(serialize = "大寒")]
    MajorCold,
    #[strum(serialize = "立春")]
    StartOfSpring,
    #[strum(serialize = "雨水")]
    RainWater,
    #[strum(serialize = "惊蛰")]
    AwakeningOfInsects,
    #[strum(serialize = "春分")]
    SpringEquinox,
    #[strum(serialize = "清明")]
    PureBrightness,
    #[strum(serialize = "谷雨")]
    GrainRain,
    #[strum(serialize = "立夏")]
    StartOfSummer,
    #[strum(serialize = "小满")]
    GrainBuds,
    #[strum(serialize = "芒种")]
    GrainInEar,
    #[strum(serialize = "夏至")]
    SummerSolstice,
    #[strum(serialize = "小暑")]
    MinorHeat,
    #[strum(serialize = "大暑")]
    MajorHeat,
    #[strum(serialize = "立秋")]
    StartOfAutumn,
    #[strum(serialize = "处暑")]
    EndOfHeat,
    #[strum(serialize = "白露")]
    WhiteDew,
    #[strum(serialize = "秋分")]
    AutumnEquinox,
    #[strum(serialize = "寒露")]
    ColdDew,
    #[strum(serialize = "霜降")]
    FrostsDescent,
    #[strum(serialize = "立冬")]
    StartOfWinter,
    #[strum(serialize = "小雪")]
    MinorSnow,
    #[strum(serialize = "大雪")]
    MajorSnow,
    #[strum(serialize = "冬至")]
    WinterSolstice,
}

impl SolarTermName {
    /// Jie terms open a solar month, Qi terms fall in its middle.
    pub fn kind(self) -> TermKind {
        if (self as u8) % 2 == 0 {
            TermKind::Jie
        } else {
            TermKind::Qi
        }
    }

    /// Ecliptic longitude of the sun at this term, in degrees.
    pub fn longitude(self) -> f64 {
        f64::from((285 + 15 * u32::from(self as u8)) % 360)
    }
}

impl serde::Serialize for SolarTermName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether a term opens a solar month (节) or sits in its middle (气).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    /// 节, the first term of a solar month
    Jie,

    /// 气, the second term of a solar month
    Qi,
}

/// A solar term and the day it falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SolarTerm {
    /// Which term
    pub term: SolarTermName,

    /// Local (UTC+8) date of the term
    pub date: NaiveDate,

    /// Jie or Qi
    pub kind: TermKind,
}

/// The solar term falling on `date`, if any.
pub fn solar_term_for_date(date: NaiveDate) -> Option<SolarTerm> {
    // Every Gregorian month holds exactly two terms, a jie and the following qi
    let jie = u8::try_from(2 * (date.month0())).ok()?;
    [jie, jie + 1]
        .into_iter()
        .filter_map(|index| term_of_year(date.year(), index))
        .find(|term| term.date == date)
}

/// All 24 terms of a Gregorian year, in calendar order.
///
/// ## Errors
///
/// Returns [`LunarError::YearOutOfRange`] outside 1900 to 2100.
pub fn solar_terms_of_year(year: i32) -> Result<Vec<SolarTerm>, LunarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(LunarError::YearOutOfRange(year));
    }
    Ok((0..24).filter_map(|i| term_of_year(year, i)).collect())
}

/// Whether `date` is on or after the jie term of its Gregorian month.
pub(crate) fn is_after_jie(date: NaiveDate) -> bool {
    u8::try_from(2 * date.month0())
        .ok()
        .and_then(|index| term_of_year(date.year(), index))
        .is_some_and(|jie| date >= jie.date)
}

fn term_of_year(year: i32, index: u8) -> Option<SolarTerm> {
    let term = SolarTermName::from_repr(index)?;
    // 小寒 falls around January 6, later terms roughly every 15.22 days
    let guess = julian_day(NaiveDate::from_ymd_opt(year, 1, 6)?) + 15.2184 * f64::from(index);
    let jde = find_longitude(term.longitude(), guess);
    let date = date_in_china(jde - delta_t(year) / 86_400.0)?;
    Some(SolarTerm {
        term,
        date,
        kind: term.kind(),
    })
}

const J2000: f64 = 2_451_545.0;
const TROPICAL_YEAR: f64 = 365.242_2;

/// Julian day number at 00:00 UT of `date`.
fn julian_day(date: NaiveDate) -> f64 {
    let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN);
    #[expect(clippy::cast_precision_loss)]
    let days = date.signed_duration_since(base).num_days() as f64;
    J2000 - 0.5 + days
}

/// Local date in UTC+8 of an instant given as a Julian day (UT).
fn date_in_china(jd_ut: f64) -> Option<NaiveDate> {
    let local = jd_ut + 8.0 / 24.0;
    #[expect(clippy::cast_possible_truncation)]
    let days = (local + 0.5).floor() as i64 - J2000 as i64;
    let base = NaiveDate::from_ymd_opt(2000, 1, 1)?;
    match u64::try_from(days) {
        Ok(d) => base.checked_add_days(Days::new(d)),
        Err(_) => base.checked_sub_days(Days::new(days.unsigned_abs())),
    }
}

/// Newton iteration on the apparent solar longitude.
fn find_longitude(target: f64, mut jde: f64) -> f64 {
    for _ in 0..8 {
        let diff = (target - apparent_longitude(jde) + 540.0).rem_euclid(360.0) - 180.0;
        jde += diff * TROPICAL_YEAR / 360.0;
        if diff.abs() < 1e-7 {
            break;
        }
    }
    jde
}

/// Apparent geocentric ecliptic longitude of the sun in degrees, Meeus (25.2) to (25.8).
fn apparent_longitude(jde: f64) -> f64 {
    let t = (jde - J2000) / 36_525.0;
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    (l0 + c - 0.005_69 - 0.004_78 * omega.sin()).rem_euclid(360.0)
}

/// Approximate TT - UT in seconds (Espenak and Meeus polynomials).
fn delta_t(year: i32) -> f64 {
    let y = f64::from(year);
    if (2005..=2050).contains(&year) {
        let t = y - 2000.0;
        62.92 + 0.322_17 * t + 0.005_589 * t * t
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}
