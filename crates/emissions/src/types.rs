//! Core types and constants for the Helium emission schedule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token quantity in whole tokens. Fractional amounts are meaningful (per-day
/// rates divide a yearly quantity by 365 or 366).
pub type TokenAmount = f64;

/// Yearly HNT emissions as of the August 2023 halvening.
pub const HNT_YEARLY_EMISSIONS: TokenAmount = 15_000_000.0;
/// Yearly MOBILE emissions as of the August 2023 halvening.
pub const MOBILE_YEARLY_EMISSIONS: TokenAmount = 30_000_000_000.0;
/// Yearly IOT emissions as of the August 2023 halvening.
pub const IOT_YEARLY_EMISSIONS: TokenAmount = 32_500_000_000.0;

/// August 1st, 2023: the start of emission year zero for every token class.
pub fn emissions_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 1).expect("valid calendar date")
}

/// The three Helium token classes.
///
/// Each has its own base yearly quantity but all share the same epoch and
/// halvening cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    Hnt,
    Mobile,
    Iot,
}

impl TokenClass {
    /// Base yearly emission quantity for this class.
    pub fn base_yearly(self) -> TokenAmount {
        match self {
            TokenClass::Hnt => HNT_YEARLY_EMISSIONS,
            TokenClass::Mobile => MOBILE_YEARLY_EMISSIONS,
            TokenClass::Iot => IOT_YEARLY_EMISSIONS,
        }
    }

    /// All token classes, in display order.
    pub fn all() -> [TokenClass; 3] {
        [TokenClass::Hnt, TokenClass::Mobile, TokenClass::Iot]
    }

    /// Parse the lowercase ticker used in URLs and the reference data.
    pub fn from_slug(slug: &str) -> Option<TokenClass> {
        match slug {
            "hnt" => Some(TokenClass::Hnt),
            "mobile" => Some(TokenClass::Mobile),
            "iot" => Some(TokenClass::Iot),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenClass::Hnt => "hnt",
            TokenClass::Mobile => "mobile",
            TokenClass::Iot => "iot",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
