use rayon::prelude::*;
use std::collections::BTreeMap;

/// Per-group L2 norms of member power plus the largest norm among them.
///
/// Built once per roster and shared, so a single group's index is always
/// relative to every other group rather than computed in isolation.
#[derive(Debug, Clone)]
pub struct NormTable<K: Ord> {
    norms: BTreeMap<K, f64>,
    max_norm: f64,
}

impl<K: Ord + Send> NormTable<K> {
    /// Repeated keys are merged into one group.
    pub fn from_groups<I, P>(groups: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        P: IntoIterator<Item = u64>,
    {
        let mut merged: BTreeMap<K, Vec<u64>> = BTreeMap::new();
        for (key, powers) in groups {
            merged.entry(key).or_default().extend(powers);
        }

        // Each group is summed sequentially; only groups run in parallel.
        let norms: BTreeMap<K, f64> = merged
            .into_par_iter()
            .map(|(key, powers)| (key, l2_norm(&powers)))
            .collect();

        let max_norm = norms.values().copied().fold(0.0, f64::max);

        Self { norms, max_norm }
    }
}

impl<K: Ord> NormTable<K> {
    pub fn norm(&self, key: &K) -> Option<f64> {
        self.norms.get(key).copied()
    }

    pub fn max_norm(&self) -> f64 {
        self.max_norm
    }

    pub fn len(&self) -> usize {
        self.norms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.norms.is_empty()
    }

    /// Power-rate index of one group, `None` for unknown keys.
    pub fn index_of(&self, key: &K) -> Option<f64> {
        self.norm(key).map(|n| scale(n, self.max_norm))
    }

    pub fn into_indices(self) -> BTreeMap<K, f64> {
        let max = self.max_norm;
        self.norms
            .into_iter()
            .map(|(k, n)| (k, scale(n, max)))
            .collect()
    }
}

fn l2_norm(powers: &[u64]) -> f64 {
    powers
        .iter()
        .map(|&p| {
            let p = p as f64;
            p * p
        })
        .sum::<f64>()
        .sqrt()
}

/// `norm / max * 100`, rounded to two decimals; 0 when there is no data.
fn scale(norm: f64, max_norm: f64) -> f64 {
    if max_norm > 0.0 {
        (norm / max_norm * 10_000.0).round() / 100.0
    } else {
        0.0
    }
}

/// Power-rate index (0..=100) for every group.
pub fn power_rate_index<K, I, P>(groups: I) -> BTreeMap<K, f64>
where
    K: Ord + Send,
    I: IntoIterator<Item = (K, P)>,
    P: IntoIterator<Item = u64>,
{
    NormTable::from_groups(groups).into_indices()
}
