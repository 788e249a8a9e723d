//! Calendar arithmetic for emission year windows.
//!
//! Emission year `k` spans the half-open interval between the epoch's
//! anniversary `k` years out and the next one. Window lengths come from real
//! calendar subtraction, so a leap day is counted wherever it falls inside the
//! window.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::emissions_epoch;

/// Maps instants to emission-year indices and window boundaries relative to a
/// fixed epoch. All operations are total: any instant and any index resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionCalendar {
    epoch: NaiveDate,
}

impl EmissionCalendar {
    /// Calendar anchored at an arbitrary epoch date.
    pub fn new(epoch: NaiveDate) -> Self {
        Self { epoch }
    }

    /// Calendar shared by all Helium token classes.
    pub fn helium() -> Self {
        Self::new(emissions_epoch())
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Epoch anniversary in the given calendar year. A February 29th epoch
    /// anchors to March 1st in common years.
    fn anchor(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.epoch.month(), self.epoch.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
            .expect("anchor date is constructible")
    }

    /// Start boundary of emission year `k`. Negative `k` counts boundaries
    /// backwards from the epoch.
    pub fn window_start(&self, k: i32) -> NaiveDate {
        self.anchor(self.epoch.year() + k)
    }

    /// End boundary of emission year `k`, i.e. the start of year `k + 1`.
    pub fn window_end(&self, k: i32) -> NaiveDate {
        self.window_start(k + 1)
    }

    /// Index of the emission year containing `instant`. A boundary instant
    /// belongs to the window that begins at that boundary; instants before
    /// the epoch get negative indices.
    pub fn emission_year_index(&self, instant: DateTime<Utc>) -> i32 {
        let date = instant.date_naive();
        let mut k = date.year() - self.epoch.year();
        if date < self.anchor(date.year()) {
            k -= 1;
        }
        k
    }

    /// Number of days in emission year `k` (365, or 366 when the window
    /// straddles a leap day).
    pub fn window_day_count(&self, k: i32) -> i64 {
        (self.window_end(k) - self.window_start(k)).num_days()
    }

    /// Whole calendar days from `instant` to the end boundary of its window.
    /// Time of day within the date is ignored; an instant anywhere on the
    /// epoch date still sees the full window.
    pub fn days_until_window_end(&self, instant: DateTime<Utc>) -> i64 {
        let k = self.emission_year_index(instant);
        (self.window_end(k) - instant.date_naive()).num_days()
    }
}

impl Default for EmissionCalendar {
    fn default() -> Self {
        Self::helium()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn index_at_and_after_epoch() {
        let cal = EmissionCalendar::helium();
        assert_eq!(cal.emission_year_index(utc(2023, 8, 1, 0)), 0);
        assert_eq!(cal.emission_year_index(utc(2023, 8, 1, 23)), 0);
        assert_eq!(cal.emission_year_index(utc(2024, 7, 31, 0)), 0);
        assert_eq!(cal.emission_year_index(utc(2024, 8, 1, 0)), 1);
        assert_eq!(cal.emission_year_index(utc(2025, 8, 2, 0)), 2);
    }

    #[test]
    fn index_before_epoch() {
        let cal = EmissionCalendar::helium();
        assert_eq!(cal.emission_year_index(utc(2023, 7, 31, 23)), -1);
        assert_eq!(cal.emission_year_index(utc(2022, 8, 1, 0)), -1);
        assert_eq!(cal.emission_year_index(utc(2022, 7, 31, 0)), -2);
    }

    #[test]
    fn window_boundaries_tile_the_timeline() {
        let cal = EmissionCalendar::helium();
        for k in -3..6 {
            assert_eq!(cal.window_end(k), cal.window_start(k + 1));
        }
    }

    #[test]
    fn leap_day_windows_have_366_days() {
        let cal = EmissionCalendar::helium();
        // Aug 2023 - Aug 2024 contains Feb 29th, 2024.
        assert_eq!(cal.window_day_count(0), 366);
        assert_eq!(cal.window_day_count(1), 365);
        assert_eq!(cal.window_day_count(2), 365);
        assert_eq!(cal.window_day_count(3), 365);
        // Aug 2027 - Aug 2028 contains Feb 29th, 2028.
        assert_eq!(cal.window_day_count(4), 366);
        // Pre-epoch windows use the same arithmetic.
        assert_eq!(cal.window_day_count(-1), 365);
        assert_eq!(cal.window_day_count(-4), 366);
    }

    #[test]
    fn leap_day_counts_regardless_of_epoch_month() {
        // Epoch in January: the leap day of the same calendar year lands
        // inside window 0.
        let cal = EmissionCalendar::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(cal.window_day_count(0), 366);
        assert_eq!(cal.window_day_count(1), 365);
    }

    #[test]
    fn days_until_window_end_ignores_time_of_day() {
        let cal = EmissionCalendar::helium();
        assert_eq!(cal.days_until_window_end(utc(2023, 8, 1, 0)), 366);
        assert_eq!(cal.days_until_window_end(utc(2023, 8, 1, 23)), 366);
        assert_eq!(cal.days_until_window_end(utc(2023, 8, 2, 1)), 365);
        assert_eq!(cal.days_until_window_end(utc(2024, 7, 31, 12)), 1);
        assert_eq!(cal.days_until_window_end(utc(2024, 8, 1, 0)), 365);
        // 1 day 6 hours before the epoch: two calendar days remain in the
        // pre-epoch window.
        assert_eq!(cal.days_until_window_end(utc(2023, 7, 30, 18)), 2);
    }

    #[test]
    fn feb_29_epoch_anchors_to_mar_1() {
        let cal = EmissionCalendar::new(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(cal.window_start(0), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(cal.window_end(0), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert!(cal.window_day_count(0) > 0);
    }
}
