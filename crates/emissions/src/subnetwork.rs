//! Stepped emission schedules for the IOT and MOBILE sub-networks.
//!
//! Sub-network emissions change in discrete steps at governance-scheduled
//! dates rather than decaying continuously. The table ships with the binary
//! as static data; this module only looks it up and never validates it beyond
//! non-emptiness (entries are trusted to be sorted ascending by date).

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::EmissionsError;

/// One step of a sub-network emission schedule: the per-epoch quantity in
/// effect from `effective_date` until the next entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubNetworkEmission {
    pub effective_date: DateTime<Utc>,
    pub emissions_per_epoch: f64,
}

/// Sub-networks with their own stepped schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubNetwork {
    Iot,
    Mobile,
}

impl SubNetwork {
    /// Parse the lowercase name used in URLs and the schedule data.
    pub fn from_slug(slug: &str) -> Option<SubNetwork> {
        match slug {
            "iot" => Some(SubNetwork::Iot),
            "mobile" => Some(SubNetwork::Mobile),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubNetwork::Iot => "iot",
            SubNetwork::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubNetworkTable {
    iot: Vec<SubNetworkEmission>,
    mobile: Vec<SubNetworkEmission>,
}

static SUB_NETWORK_EMISSIONS: Lazy<SubNetworkTable> = Lazy::new(|| {
    serde_json::from_str(include_str!("../data/subnetwork_emissions.json"))
        .expect("embedded sub-network table parses")
});

/// Schedule entries for `network`, ascending by effective date.
pub fn sub_network_schedule(network: SubNetwork) -> &'static [SubNetworkEmission] {
    match network {
        SubNetwork::Iot => &SUB_NETWORK_EMISSIONS.iot,
        SubNetwork::Mobile => &SUB_NETWORK_EMISSIONS.mobile,
    }
}

/// Per-epoch rate in effect at `instant`: the last entry whose effective date
/// does not exceed `instant`. Instants before the earliest entry get that
/// entry's rate (the earliest known rate is retroactively effective). Only an
/// empty schedule is an error.
pub fn latest_emissions(
    schedule: &[SubNetworkEmission],
    instant: DateTime<Utc>,
) -> Result<f64, EmissionsError> {
    let first = schedule.first().ok_or(EmissionsError::EmptySchedule)?;
    Ok(schedule
        .iter()
        .rev()
        .find(|entry| entry.effective_date <= instant)
        .unwrap_or(first)
        .emissions_per_epoch)
}
