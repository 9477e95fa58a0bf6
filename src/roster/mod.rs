pub mod loader;
pub mod types;

pub use self::types::{GroupKey, GroupKind, PlayerRecord, RawRecord};

use crate::consts::MAX_EXACT_INT;
use crate::error::{RecordIssue, RfResult, RosterError};
use crate::stats::histogram::PowerDomain;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Immutable snapshot of every player record plus lookup indices.
///
/// Indices hold positions into `records`, so members of a group always come
/// back in roster (input) order.
#[derive(Debug, Clone)]
pub struct Roster {
    records: Vec<PlayerRecord>,
    by_alliance: BTreeMap<String, Vec<usize>>,
    by_server: BTreeMap<i64, Vec<usize>>,
    fingerprint: String,
}

impl Roster {
    /// Validates raw input and builds the snapshot.
    ///
    /// Every invalid record is reported, not just the first one.
    pub fn load<I>(raw: I) -> RfResult<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut records = Vec::new();
        let mut offending = Vec::new();

        for (index, r) in raw.into_iter().enumerate() {
            match validate_record(r) {
                Ok(rec) => records.push(rec),
                Err(reason) => offending.push(RecordIssue { index, reason }),
            }
        }

        if !offending.is_empty() {
            warn!("Rejected roster: {} invalid record(s)", offending.len());
            return Err(RosterError::Validation { offending });
        }

        Ok(Self::from_records(records))
    }

    fn from_records(records: Vec<PlayerRecord>) -> Self {
        let mut by_alliance: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut by_server: BTreeMap<i64, Vec<usize>> = BTreeMap::new();

        for (i, r) in records.iter().enumerate() {
            by_alliance.entry(r.alliance.clone()).or_default().push(i);
            by_server.entry(r.server).or_default().push(i);
        }

        let fingerprint = fingerprint_records(&records);

        info!(
            "📚 Roster loaded: {} records, {} alliances, {} servers",
            records.len(),
            by_alliance.len(),
            by_server.len()
        );

        Self {
            records,
            by_alliance,
            by_server,
            fingerprint,
        }
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Content hash of the snapshot (SHA-256, hex).
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Distinct alliance tags, sorted.
    pub fn alliances(&self) -> Vec<&str> {
        self.by_alliance.keys().map(String::as_str).collect()
    }

    /// Distinct server ids, ascending.
    pub fn servers(&self) -> Vec<i64> {
        self.by_server.keys().copied().collect()
    }

    pub fn is_valid(&self, key: &GroupKey) -> bool {
        match key {
            GroupKey::Alliance(tag) => self.by_alliance.contains_key(tag),
            GroupKey::Server(id) => self.by_server.contains_key(id),
        }
    }

    /// Members of a group in roster order; empty for unknown keys.
    pub fn members(&self, key: &GroupKey) -> Vec<&PlayerRecord> {
        let positions = match key {
            GroupKey::Alliance(tag) => self.by_alliance.get(tag),
            GroupKey::Server(id) => self.by_server.get(id),
        };
        positions
            .map(|idxs| idxs.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Power values of every group of one kind, in key order.
    pub fn grouped_powers(&self, kind: GroupKind) -> Vec<(GroupKey, Vec<u64>)> {
        let powers = |idxs: &Vec<usize>| -> Vec<u64> {
            idxs.iter().map(|&i| self.records[i].power).collect()
        };
        match kind {
            GroupKind::Alliance => self
                .by_alliance
                .iter()
                .map(|(tag, idxs)| (GroupKey::Alliance(tag.clone()), powers(idxs)))
                .collect(),
            GroupKind::Server => self
                .by_server
                .iter()
                .map(|(&id, idxs)| (GroupKey::Server(id), powers(idxs)))
                .collect(),
        }
    }

    /// Global power range snapped outward to multiples of `bin_size`.
    ///
    /// An empty roster yields `0..=0`. A zero bin size is treated as 1.
    pub fn global_power_domain(&self, bin_size: u64) -> PowerDomain {
        let bin = bin_size.max(1);
        let lo = self.records.iter().map(|r| r.power).min();
        let hi = self.records.iter().map(|r| r.power).max();
        match (lo, hi) {
            (Some(lo), Some(hi)) => PowerDomain {
                min: lo / bin * bin,
                max: hi.div_ceil(bin).saturating_mul(bin),
            },
            _ => PowerDomain { min: 0, max: 0 },
        }
    }
}

fn validate_record(r: RawRecord) -> Result<PlayerRecord, String> {
    let mut problems = Vec::new();

    if r.player.trim().is_empty() {
        problems.push("player name is empty".to_string());
    }
    if r.alliance.trim().is_empty() {
        problems.push("alliance tag is empty".to_string());
    }
    if !r.server.is_finite() || r.server.fract() != 0.0 {
        problems.push(format!("server {} is not an integer", r.server));
    } else if r.server.abs() > MAX_EXACT_INT as f64 {
        problems.push(format!("server {} is out of exact integer range", r.server));
    }
    if !r.power.is_finite() || r.power.fract() != 0.0 {
        problems.push(format!("power {} is not an integer", r.power));
    } else if r.power < 0.0 {
        problems.push(format!("power {} is negative", r.power));
    } else if r.power > MAX_EXACT_INT as f64 {
        problems.push(format!("power {} is out of exact integer range", r.power));
    }

    if !problems.is_empty() {
        return Err(problems.join(", "));
    }

    Ok(PlayerRecord {
        player: r.player,
        alliance: r.alliance,
        server: r.server as i64,
        power: r.power as u64,
    })
}

fn fingerprint_records(records: &[PlayerRecord]) -> String {
    let mut hasher = Sha256::new();
    for r in records {
        hasher.update(r.player.as_bytes());
        hasher.update([0u8]);
        hasher.update(r.alliance.as_bytes());
        hasher.update([0u8]);
        hasher.update(r.server.to_le_bytes());
        hasher.update(r.power.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}
