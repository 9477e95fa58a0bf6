pub mod histogram;
pub mod rate;
pub mod ranking;

pub use self::histogram::{bin_floor, histogram, HistogramBin, PowerDomain};
pub use self::rate::{power_rate_index, NormTable};
pub use self::ranking::{ranked, top_n, RankedRow};

use crate::consts::GIGA;
use crate::roster::PlayerRecord;

/// Sum of member power; 0 for an empty set. Saturates at `u64::MAX`.
pub fn total_power<'a, I>(records: I) -> u64
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    records
        .into_iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.power))
}

/// Total power in billions, rounded to two decimals.
pub fn total_power_giga(total: u64) -> f64 {
    (total as f64 / GIGA * 100.0).round() / 100.0
}
