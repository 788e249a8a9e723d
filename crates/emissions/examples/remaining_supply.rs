//! Print the current emission state for every token class.

use chrono::Utc;
use helium_emissions::{EmissionSchedule, TokenClass};

fn main() {
    let now = Utc::now();
    println!("emission state at {now}");

    for token in TokenClass::all() {
        let schedule = EmissionSchedule::for_token(token);
        let k = schedule.calendar().emission_year_index(now);
        println!(
            "{:>6}: year {} ({} days), daily {:.4}, remaining {:.4}",
            token.as_str(),
            k,
            schedule.calendar().window_day_count(k),
            schedule.daily_rate(now),
            schedule.remaining_emissions(now),
        );
    }
}
