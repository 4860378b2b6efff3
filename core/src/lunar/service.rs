// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use crate::datetime::DateRange;
use crate::error::LunarError;
use crate::lunar::convert::{LunarDate, lunar_to_solar, lunar_to_solar_clamped, solar_to_lunar};
use crate::lunar::festival::{Festival, festivals_for_date};
use crate::lunar::solar_term::{SolarTerm, solar_term_for_date};

/// Everything the calendar knows about one Gregorian day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CompositeDateInfo {
    /// The Gregorian day
    pub solar_date: NaiveDate,

    /// The same day in the lunar calendar
    pub lunar_date: LunarDate,

    /// The solar term falling on this day, if any
    pub solar_term: Option<SolarTerm>,

    /// Festivals observed on this day
    pub festivals: Vec<Festival>,
}

impl CompositeDateInfo {
    /// Computes the info of `date` without any caching.
    ///
    /// ## Errors
    ///
    /// Returns [`LunarError::OutOfRange`] outside the supported range.
    pub fn compute(date: NaiveDate) -> Result<Self, LunarError> {
        let lunar_date = solar_to_lunar(date)?;
        let solar_term = solar_term_for_date(date);
        let festivals = festivals_for_date(date, &lunar_date, solar_term.as_ref());
        Ok(Self {
            solar_date: date,
            lunar_date,
            solar_term,
            festivals,
        })
    }
}

/// Lunar calendar service, memoizing the composite info of every day it is asked about.
///
/// Construct one per application and pass it by reference. The cache is keyed by
/// calendar day, so callers holding a date-time should pass its local date.
#[derive(Debug, Default)]
pub struct LunarCalendar {
    cache: Mutex<HashMap<NaiveDate, Arc<CompositeDateInfo>>>,
    computations: AtomicUsize,
}

impl LunarCalendar {
    /// Creates a service with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Composite info for `date`, computed once and then served from the cache.
    ///
    /// ## Errors
    ///
    /// Returns [`LunarError::OutOfRange`] outside the supported range; failures are not cached.
    pub fn full_date_info(&self, date: NaiveDate) -> Result<Arc<CompositeDateInfo>, LunarError> {
        if let Some(info) = self.lock().get(&date) {
            return Ok(Arc::clone(info));
        }

        // Computed outside the lock, racing misses store equal values
        tracing::debug!(%date, "lunar cache miss");
        let info = Arc::new(CompositeDateInfo::compute(date)?);
        self.computations.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(date, Arc::clone(&info));
        Ok(info)
    }

    /// Composite info for every day of `range`, e.g. one month grid.
    ///
    /// ## Errors
    ///
    /// Fails on the first day outside the supported range.
    pub fn date_infos(&self, range: DateRange) -> Result<Vec<Arc<CompositeDateInfo>>, LunarError> {
        range.days().map(|date| self.full_date_info(date)).collect()
    }

    /// Converts a Gregorian date to the lunar calendar, through the cache.
    ///
    /// ## Errors
    ///
    /// See [`LunarCalendar::full_date_info`].
    pub fn solar_to_lunar(&self, date: NaiveDate) -> Result<LunarDate, LunarError> {
        Ok(self.full_date_info(date)?.lunar_date)
    }

    /// Converts a lunar date to the Gregorian calendar, failing on dates that do not exist.
    ///
    /// ## Errors
    ///
    /// See [`lunar_to_solar`].
    pub fn lunar_to_solar(
        &self,
        year: i32,
        month: u8,
        day: u8,
        is_leap: bool,
    ) -> Result<NaiveDate, LunarError> {
        lunar_to_solar(year, month, day, is_leap)
    }

    /// Converts a lunar date to the Gregorian calendar, clamping impossible days.
    ///
    /// ## Errors
    ///
    /// See [`lunar_to_solar_clamped`].
    pub fn lunar_to_solar_clamped(
        &self,
        year: i32,
        month: u8,
        day: u8,
        is_leap: bool,
    ) -> Result<NaiveDate, LunarError> {
        lunar_to_solar_clamped(year, month, day, is_leap)
    }

    /// Drops every cached entry.
    pub fn clear_cache(&self) {
        let mut cache = self.lock();
        tracing::debug!(entries = cache.len(), "clearing lunar cache");
        cache.clear();
    }

    /// Number of cached days.
    pub fn cache_len(&self) -> usize {
        self.lock().len()
    }

    /// How many times a day's info was computed rather than served from the cache.
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<NaiveDate, Arc<CompositeDateInfo>>> {
        // The map holds plain values, a panic elsewhere cannot leave it half-updated
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn serves_repeated_queries_from_cache() {
        let calendar = LunarCalendar::new();
        let first = calendar.full_date_info(date(2026, 2, 17)).unwrap();
        let second = calendar.full_date_info(date(2026, 2, 17)).unwrap();
        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calendar.computations(), 1);
        assert_eq!(calendar.cache_len(), 1);
    }

    #[test]
    fn recomputes_after_clear() {
        let calendar = LunarCalendar::new();
        let before = calendar.full_date_info(date(2025, 8, 1)).unwrap();
        calendar.clear_cache();
        assert_eq!(calendar.cache_len(), 0);
        let after = calendar.full_date_info(date(2025, 8, 1)).unwrap();
        assert_eq!(before, after);
        assert_eq!(calendar.computations(), 2);
    }

    #[test]
    fn does_not_cache_failures() {
        let calendar = LunarCalendar::new();
        assert!(calendar.full_date_info(date(1800, 1, 1)).is_err());
        assert_eq!(calendar.cache_len(), 0);
        assert_eq!(calendar.computations(), 0);
    }

    #[test]
    fn fills_month_grid() {
        let calendar = LunarCalendar::new();
        let range = DateRange::month(2026, 2).unwrap();
        let infos = calendar.date_infos(range).unwrap();
        assert_eq!(infos.len(), 28);
        assert_eq!(calendar.computations(), 28);

        let cny = infos.iter().find(|i| i.solar_date == date(2026, 2, 17)).unwrap();
        assert_eq!((cny.lunar_date.month, cny.lunar_date.day), (1, 1));
        assert_eq!(cny.festivals.first().map(|f| f.name), Some("春节"));

        // A second pass is served from the cache
        calendar.date_infos(range).unwrap();
        assert_eq!(calendar.computations(), 28);
    }

    #[test]
    fn is_shareable_across_threads() {
        let calendar = Arc::new(LunarCalendar::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let calendar = Arc::clone(&calendar);
                std::thread::spawn(move || calendar.full_date_info(date(2025, 1, 28)).unwrap())
            })
            .collect();
        let infos: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(infos.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(calendar.cache_len(), 1);
    }
}
