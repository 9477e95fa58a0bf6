use crate::roster::PlayerRecord;
use serde::{Deserialize, Serialize};

/// Inclusive range of bin lower bounds shared by every histogram that
/// should be comparable on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerDomain {
    pub min: u64,
    pub max: u64,
}

impl PowerDomain {
    /// Number of bins a dense histogram over this domain has.
    pub fn bin_count(&self, bin_size: u64) -> usize {
        if self.max < self.min {
            return 0;
        }
        ((self.max - self.min) / bin_size.max(1)) as usize + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    pub lower_bound: u64,
    pub count: usize,
}

#[inline(always)]
pub fn bin_floor(power: u64, bin_size: u64) -> u64 {
    let bin = bin_size.max(1);
    power / bin * bin
}

/// Dense histogram: one bin per `bin_size` step from `domain.min` to
/// `domain.max` inclusive, empty bins included.
///
/// Records whose bucket is not one of the emitted lower bounds are not
/// counted; with the roster's global domain every record lands somewhere.
pub fn histogram<'a, I>(records: I, bin_size: u64, domain: PowerDomain) -> Vec<HistogramBin>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let bin = bin_size.max(1);
    let mut bins: Vec<HistogramBin> = (0..domain.bin_count(bin))
        .map(|i| HistogramBin {
            lower_bound: domain.min + i as u64 * bin,
            count: 0,
        })
        .collect();

    for r in records {
        let b = bin_floor(r.power, bin);
        if b < domain.min || b > domain.max {
            continue;
        }
        let offset = b - domain.min;
        if offset % bin != 0 {
            continue;
        }
        bins[(offset / bin) as usize].count += 1;
    }

    bins
}
