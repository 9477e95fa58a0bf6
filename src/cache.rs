use crate::config::ViewParams;
use crate::roster::{GroupKey, GroupKind, PlayerRecord, Roster};
use crate::stats::{self, HistogramBin, NormTable, PowerDomain};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Comparison-panel figures for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub key: GroupKey,
    pub members: usize,
    pub total_power: u64,
    pub total_power_giga: f64,
    pub rate_index: f64,
    pub histogram: Vec<HistogramBin>,
    pub top: Vec<PlayerRecord>,
}

/// Memoized [`GroupStats`] per group key for one roster snapshot.
///
/// Entries live until the roster content changes (compared by
/// fingerprint) or the view parameters change. The per-kind norm tables
/// and the global histogram domain are shared by every entry.
pub struct DerivedViewCache {
    roster: Arc<Roster>,
    params: ViewParams,
    domain: PowerDomain,
    alliance_norms: NormTable<GroupKey>,
    server_norms: NormTable<GroupKey>,
    entries: HashMap<GroupKey, Arc<GroupStats>>,
    hits: u64,
    misses: u64,
}

impl DerivedViewCache {
    pub fn new(roster: Arc<Roster>, params: ViewParams) -> Self {
        let domain = roster.global_power_domain(params.bin_size);
        let alliance_norms = NormTable::from_groups(roster.grouped_powers(GroupKind::Alliance));
        let server_norms = NormTable::from_groups(roster.grouped_powers(GroupKind::Server));

        debug!(
            "Derived-view tables built: {} alliances, {} servers, domain {}..={}",
            alliance_norms.len(),
            server_norms.len(),
            domain.min,
            domain.max
        );

        Self {
            roster,
            params,
            domain,
            alliance_norms,
            server_norms,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Stats for `key`, or `None` if the key is not in the current roster.
    pub fn stats_for(&mut self, key: &GroupKey) -> Option<Arc<GroupStats>> {
        if !self.roster.is_valid(key) {
            return None;
        }
        if let Some(hit) = self.entries.get(key) {
            self.hits += 1;
            return Some(Arc::clone(hit));
        }

        self.misses += 1;
        debug!("Derived-view miss for {:?}", key);
        let computed = Arc::new(self.compute(key));
        self.entries.insert(key.clone(), Arc::clone(&computed));
        Some(computed)
    }

    fn compute(&self, key: &GroupKey) -> GroupStats {
        let members = self.roster.members(key);
        let total = stats::total_power(members.iter().copied());

        GroupStats {
            key: key.clone(),
            members: members.len(),
            total_power: total,
            total_power_giga: stats::total_power_giga(total),
            rate_index: self.rate_index(key).unwrap_or(0.0),
            histogram: stats::histogram(members.iter().copied(), self.params.bin_size, self.domain),
            top: stats::top_n(members.iter().copied(), self.params.top_n)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Index of `key` relative to every group of the same kind.
    pub fn rate_index(&self, key: &GroupKey) -> Option<f64> {
        match key.kind() {
            GroupKind::Alliance => self.alliance_norms.index_of(key),
            GroupKind::Server => self.server_norms.index_of(key),
        }
    }

    /// Swaps in a new roster. Returns `true` if its content differs, in
    /// which case every entry and shared table is rebuilt.
    pub fn set_roster(&mut self, roster: Arc<Roster>) -> bool {
        if roster.fingerprint() == self.roster.fingerprint() {
            self.roster = roster;
            return false;
        }
        debug!("Roster changed, dropping {} cached views", self.entries.len());
        self.rebuild(roster, self.params.clone());
        true
    }

    /// Returns `true` if the parameters changed and the cache was cleared.
    pub fn set_params(&mut self, params: ViewParams) -> bool {
        if params == self.params {
            return false;
        }
        self.rebuild(Arc::clone(&self.roster), params);
        true
    }

    fn rebuild(&mut self, roster: Arc<Roster>, params: ViewParams) {
        let (hits, misses) = (self.hits, self.misses);
        *self = Self::new(roster, params);
        self.hits = hits;
        self.misses = misses;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn domain(&self) -> PowerDomain {
        self.domain
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
