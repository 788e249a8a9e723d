//! Property tests over the schedule math.

use chrono::{DateTime, Duration, TimeZone, Utc};
use helium_emissions::{EmissionCalendar, EmissionSchedule, TokenClass};
use proptest::prelude::*;

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 8, 1, 0, 0, 0).unwrap()
}

fn any_token() -> impl Strategy<Value = TokenClass> {
    prop_oneof![
        Just(TokenClass::Hnt),
        Just(TokenClass::Mobile),
        Just(TokenClass::Iot),
    ]
}

proptest! {
    // Remaining supply never grows as time advances past the epoch.
    #[test]
    fn remaining_is_non_increasing(
        token in any_token(),
        earlier_hours in 0i64..200_000,
        gap_hours in 0i64..200_000,
    ) {
        let schedule = EmissionSchedule::for_token(token);
        let earlier = epoch() + Duration::hours(earlier_hours);
        let later = earlier + Duration::hours(gap_hours);
        prop_assert!(
            schedule.remaining_emissions(later) <= schedule.remaining_emissions(earlier)
        );
    }

    // The per-day division introduces no drift: rate times the window's day
    // count reconstructs the window's yearly quantity.
    #[test]
    fn daily_rate_reconstructs_the_window_total(
        token in any_token(),
        offset_days in -2_000i64..10_000,
    ) {
        let schedule = EmissionSchedule::for_token(token);
        let instant = epoch() + Duration::days(offset_days);
        let k = schedule.calendar().emission_year_index(instant);
        let reconstructed =
            schedule.daily_rate(instant) * schedule.calendar().window_day_count(k) as f64;
        let yearly = schedule.window_yearly_rate(k);
        prop_assert!((reconstructed - yearly).abs() <= yearly * 1e-12);
    }

    // Exactly two consecutive emission years share a halvening index.
    #[test]
    fn halvening_pairs(token in any_token(), k in -50i32..50) {
        let schedule = EmissionSchedule::for_token(token);
        if k.rem_euclid(2) == 0 {
            prop_assert_eq!(
                schedule.window_yearly_rate(k),
                schedule.window_yearly_rate(k + 1)
            );
        } else {
            prop_assert_eq!(
                schedule.window_yearly_rate(k),
                schedule.window_yearly_rate(k - 1)
            );
            prop_assert_eq!(
                schedule.window_yearly_rate(k + 1),
                schedule.window_yearly_rate(k) / 2.0
            );
        }
    }

    // Windows tile the timeline: every instant falls inside the window its
    // index names, and boundary dates start their own window.
    #[test]
    fn windows_contain_their_instants(offset_days in -4_000i64..12_000, hour in 0u32..24) {
        let calendar = EmissionCalendar::helium();
        let instant = epoch() + Duration::days(offset_days) + Duration::hours(i64::from(hour));
        let k = calendar.emission_year_index(instant);
        let date = instant.date_naive();
        prop_assert!(calendar.window_start(k) <= date);
        prop_assert!(date < calendar.window_end(k));
        // Day counts stay calendar-plausible.
        let days = calendar.window_day_count(k);
        prop_assert!(days == 365 || days == 366);
    }
}
