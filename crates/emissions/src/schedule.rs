//! Halvening decay of yearly emission rates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::EmissionCalendar;
use crate::types::{TokenAmount, TokenClass};

/// Emission years per halvening: two consecutive windows share a rate before
/// it halves.
pub const YEARS_PER_HALVENING: i32 = 2;

/// Decaying emission schedule for one token class.
///
/// The epoch and base rate are plain immutable state so schedules can be
/// parameterized per class, per network, or per test; `for_token` supplies
/// the mainnet values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionSchedule {
    token: TokenClass,
    base_yearly: TokenAmount,
    calendar: EmissionCalendar,
}

impl EmissionSchedule {
    /// Schedule with explicit parameters.
    pub fn new(token: TokenClass, base_yearly: TokenAmount, calendar: EmissionCalendar) -> Self {
        Self {
            token,
            base_yearly,
            calendar,
        }
    }

    /// Mainnet schedule for a token class.
    pub fn for_token(token: TokenClass) -> Self {
        Self::new(token, token.base_yearly(), EmissionCalendar::helium())
    }

    pub fn token(&self) -> TokenClass {
        self.token
    }

    pub fn base_yearly(&self) -> TokenAmount {
        self.base_yearly
    }

    pub fn calendar(&self) -> &EmissionCalendar {
        &self.calendar
    }

    /// Halvening index for emission year `k`. Floor division, so the index is
    /// defined for negative years too: windows -1 and -2 share index -1.
    pub fn halvening_index(k: i32) -> i32 {
        k.div_euclid(YEARS_PER_HALVENING)
    }

    /// Yearly quantity for emission year `k` after halvening decay. Negative
    /// `k` extrapolates the decay backwards, doubling the rate per pre-epoch
    /// halvening pair.
    pub fn window_yearly_rate(&self, k: i32) -> TokenAmount {
        self.base_yearly / 2f64.powi(Self::halvening_index(k))
    }

    /// Per-day rate at `instant`: the containing window's yearly quantity
    /// spread over that window's actual day count, so the rate shifts
    /// slightly between leap and common windows at the same yearly quantity.
    pub fn daily_rate(&self, instant: DateTime<Utc>) -> TokenAmount {
        let k = self.calendar.emission_year_index(instant);
        self.window_yearly_rate(k) / self.calendar.window_day_count(k) as f64
    }
}
