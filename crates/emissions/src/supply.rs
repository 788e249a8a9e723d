//! Remaining-supply integration over the emission schedule.
//!
//! The schedule is an infinite geometric series (yearly quantities run
//! Y, Y, Y/2, Y/2, Y/4, ...), so the amount still to be emitted after any
//! instant is the balance of the current window plus a closed-form tail sum.
//! No summation loop: the result is exact and constant time.

use chrono::{DateTime, Utc};

use crate::schedule::EmissionSchedule;
use crate::types::TokenAmount;

impl EmissionSchedule {
    /// Lifetime quantity a class emits from its epoch onward: the geometric
    /// sum `2·Y·(1 + 1/2 + 1/4 + ...) = 4·Y`.
    pub fn lifetime_emissions(&self) -> TokenAmount {
        4.0 * self.base_yearly()
    }

    /// Total emitted by windows `m`, `m + 1`, ... in closed form.
    ///
    /// From the start of a halvening pair the tail is `4·Y_m` (two windows at
    /// `Y_m`, two at `Y_m / 2`, ...). One year into a pair the leading window
    /// is the pair's second year, leaving `Y_m + 4·(Y_m / 2) = 3·Y_m`.
    fn tail_total_from(&self, m: i32) -> TokenAmount {
        let pair_factor = if m.rem_euclid(2) == 0 { 4.0 } else { 3.0 };
        pair_factor * self.window_yearly_rate(m)
    }

    /// Quantity still to be emitted after `instant`: the balance of the
    /// containing window at whole-day granularity plus the tail of all later
    /// windows.
    ///
    /// Instants before the epoch resolve through the same formulas at
    /// negative indices, so the result exceeds `lifetime_emissions` by the
    /// pre-epoch quantity not yet emitted. Non-increasing as `instant`
    /// advances.
    pub fn remaining_emissions(&self, instant: DateTime<Utc>) -> TokenAmount {
        let k = self.calendar().emission_year_index(instant);
        let days_left = self.calendar().days_until_window_end(instant);
        self.daily_rate(instant) * days_left as f64 + self.tail_total_from(k + 1)
    }
}
