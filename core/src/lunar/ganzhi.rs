// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Sexagenary (干支) cycle labels and the zodiac.

use std::fmt::{self, Display};

use chrono::{Datelike, NaiveDate};

/// Heavenly stem (天干)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::FromRepr,
)]
#[repr(u8)]
#[expect(missing_docs)]
pub enum Stem {
    #[strum(serialize = "甲")]
    Jia,
    #[strum(serialize = "乙")]
    Yi,
    #[strum(serialize = "丙")]
    Bing,
    #[strum(serialize = "丁")]
    Ding,
    #[strum(serialize = "戊")]
    Wu,
    #[strum(serialize = "己")]
    Ji,
    #[strum(serialize = "庚")]
    Geng,
    #[strum(serialize = "辛")]
    Xin,
    #[strum(serialize = "壬")]
    Ren,
    #[strum(serialize = "癸")]
    Gui,
}

/// Earthly branch (地支)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::FromRepr,
)]
#[repr(u8)]
#[expect(missing_docs)]
pub enum Branch {
    #[strum(serialize = "子")]
    Zi,
    #[strum(serialize = "丑")]
    Chou,
    #[strum(serialize = "寅")]
    Yin,
    #[strum(serialize = "卯")]
    Mao,
    #[strum(serialize = "辰")]
    Chen,
    #[strum(serialize = "巳")]
    Si,
    #[strum(serialize = "午")]
    Wu,
    #[strum(serialize = "未")]
    Wei,
    #[strum(serialize = "申")]
    Shen,
    #[strum(serialize = "酉")]
    You,
    #[strum(serialize = "戌")]
    Xu,
    #[strum(serialize = "亥")]
    Hai,
}

/// Chinese zodiac animal (生肖), one per earthly branch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::FromRepr,
)]
#[repr(u8)]
#[expect(missing_docs)]
pub enum Zodiac {
    #[strum(serialize = "鼠")]
    Rat,
    #[strum(serialize = "牛")]
    Ox,
    #[strum(serialize = "虎")]
    Tiger,
    #[strum(serialize = "兔")]
    Rabbit,
    #[strum(serialize = "龙")]
    Dragon,
    #[strum(serialize = "蛇")]
    Snake,
    #[strum(serialize = "马")]
    Horse,
    #[strum(serialize = "羊")]
    Goat,
    #[strum(serialize = "猴")]
    Monkey,
    #[strum(serialize = "鸡")]
    Rooster,
    #[strum(serialize = "狗")]
    Dog,
    #[strum(serialize = "猪")]
    Pig,
}

impl From<Branch> for Zodiac {
    fn from(branch: Branch) -> Self {
        match branch {
            Branch::Zi => Zodiac::Rat,
            Branch::Chou => Zodiac::Ox,
            Branch::Yin => Zodiac::Tiger,
            Branch::Mao => Zodiac::Rabbit,
            Branch::Chen => Zodiac::Dragon,
            Branch::Si => Zodiac::Snake,
            Branch::Wu => Zodiac::Horse,
            Branch::Wei => Zodiac::Goat,
            Branch::Shen => Zodiac::Monkey,
            Branch::You => Zodiac::Rooster,
            Branch::Xu => Zodiac::Dog,
            Branch::Hai => Zodiac::Pig,
        }
    }
}

impl serde::Serialize for Zodiac {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A position in the sixty-term stem-branch cycle, e.g. 甲子.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sexagenary {
    /// Heavenly stem
    pub stem: Stem,

    /// Earthly branch
    pub branch: Branch,
}

impl Sexagenary {
    /// The `index`-th term of the cycle, 0 being 甲子. Any integer is reduced modulo 60.
    pub fn from_index(index: i64) -> Self {
        let stem = index.rem_euclid(10);
        let branch = index.rem_euclid(12);
        Self {
            stem: u8::try_from(stem)
                .ok()
                .and_then(Stem::from_repr)
                .unwrap_or(Stem::Jia),
            branch: u8::try_from(branch)
                .ok()
                .and_then(Branch::from_repr)
                .unwrap_or(Branch::Zi),
        }
    }

    /// Position in the cycle, 0 to 59.
    pub fn index(self) -> u8 {
        let stem = self.stem as u8;
        let branch = self.branch as u8;
        // the unique n < 60 with n % 10 == stem and n % 12 == branch
        (0..6)
            .map(|k| stem + 10 * k)
            .find(|n| n % 12 == branch)
            .unwrap_or(0)
    }
}

impl Display for Sexagenary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl serde::Serialize for Sexagenary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Year label, from the lunar year number; 4 CE was a 甲子 year.
pub(crate) fn year_ganzhi(lunar_year: i32) -> Sexagenary {
    Sexagenary::from_index(i64::from(lunar_year) - 4)
}

/// Month label, from solar months: the label advances on each month's first (jie) solar term.
///
/// `after_jie` tells whether `date` is on or after the jie term of its Gregorian month.
pub(crate) fn month_ganzhi(date: NaiveDate, after_jie: bool) -> Sexagenary {
    // January 1900 before 小寒 belongs to 丙子
    let months = (i64::from(date.year()) - 1900) * 12 + i64::from(date.month()) + 11;
    Sexagenary::from_index(months + i64::from(after_jie))
}

/// Day label, counting from 1900-01-01 (甲戌).
pub(crate) fn day_ganzhi(date: NaiveDate) -> Sexagenary {
    let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN);
    Sexagenary::from_index(date.signed_duration_since(base).num_days() + 10)
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cycles_through_sixty_terms() {
        assert_eq!(Sexagenary::from_index(0).to_string(), "甲子");
        assert_eq!(Sexagenary::from_index(59).to_string(), "癸亥");
        assert_eq!(Sexagenary::from_index(60), Sexagenary::from_index(0));
        assert_eq!(Sexagenary::from_index(-1).to_string(), "癸亥");
        for i in 0..60 {
            assert_eq!(i64::from(Sexagenary::from_index(i).index()), i);
        }
    }

    #[test]
    fn labels_years() {
        assert_eq!(year_ganzhi(1984).to_string(), "甲子");
        assert_eq!(year_ganzhi(2024).to_string(), "甲辰");
        assert_eq!(year_ganzhi(2025).to_string(), "乙巳");
        assert_eq!(year_ganzhi(2026).to_string(), "丙午");
        assert_eq!(Zodiac::from(year_ganzhi(2026).branch), Zodiac::Horse);
    }

    #[test]
    fn labels_days() {
        assert_eq!(day_ganzhi(date(1900, 1, 1)).to_string(), "甲戌");
        assert_eq!(day_ganzhi(date(2000, 1, 1)).to_string(), "戊午");
    }

    #[test]
    fn labels_months_by_jie() {
        // 立春 2025 falls on 2025-02-03
        assert_eq!(month_ganzhi(date(2025, 2, 2), false).to_string(), "丁丑");
        assert_eq!(month_ganzhi(date(2025, 2, 3), true).to_string(), "戊寅");
    }

    #[test]
    fn zodiac_follows_branches() {
        let zodiacs: Vec<_> = Branch::iter().map(Zodiac::from).collect();
        assert_eq!(zodiacs, Zodiac::iter().collect::<Vec<_>>());
        assert_eq!(Stem::iter().count(), 10);
    }
}
