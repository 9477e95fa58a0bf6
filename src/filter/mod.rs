pub mod criteria;

pub use self::criteria::{FilterCriteria, PowerRange, ServerSelector};

use crate::config::ViewParams;
use crate::roster::{GroupKey, PlayerRecord, Roster};
use crate::stats::{bin_floor, histogram, ranked, PowerDomain, RankedRow};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// How the working set was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "alliance", rename_all = "snake_case")]
pub enum FilterMode {
    Criteria,
    /// Quick search resolved to a whole alliance.
    QuickAlliance(String),
    /// Quick search fell back to exact player-name matches.
    QuickPlayer,
}

/// An entry of the contextual alliance dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllianceOption<'a> {
    pub alliance: &'a str,
    /// Server of the first member seen in the working set.
    pub server: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOutcome<'a> {
    pub mode: FilterMode,
    pub working_set: Vec<&'a PlayerRecord>,
    pub alliance_options: Vec<AllianceOption<'a>>,
}

/// Applies the criteria to the roster.
///
/// The power window is not applied here; see [`query`].
pub fn apply<'a>(roster: &'a Roster, criteria: &FilterCriteria) -> FilterOutcome<'a> {
    let (working_set, mode) = if criteria.is_quick_search() {
        quick_search(roster, &criteria.search_term)
    } else {
        let alliance = criteria.alliance_filter();
        let working: Vec<&PlayerRecord> = roster
            .records()
            .iter()
            .filter(|r| criteria.server_selector.admits(r.server))
            .filter(|r| alliance.map_or(true, |tag| r.alliance == tag))
            .collect();
        (working, FilterMode::Criteria)
    };

    debug!("Filter {:?}: {} records", mode, working_set.len());

    let alliance_options = alliance_options(&working_set);
    FilterOutcome {
        mode,
        working_set,
        alliance_options,
    }
}

/// Alliance prefix match wins over player-name match. Among several
/// prefix matches an exact (case-insensitive) tag is preferred, then the
/// first tag in sorted order.
fn quick_search<'a>(roster: &'a Roster, term: &str) -> (Vec<&'a PlayerRecord>, FilterMode) {
    let needle = term.to_lowercase();

    let candidates: Vec<&str> = roster
        .alliances()
        .into_iter()
        .filter(|tag| tag.to_lowercase().starts_with(&needle))
        .collect();

    let chosen = candidates
        .iter()
        .find(|tag| tag.to_lowercase() == needle)
        .or_else(|| candidates.first());

    if let Some(&tag) = chosen {
        let members = roster.members(&GroupKey::Alliance(tag.to_string()));
        return (members, FilterMode::QuickAlliance(tag.to_string()));
    }

    let players = roster
        .records()
        .iter()
        .filter(|r| r.player.to_lowercase() == needle)
        .collect();
    (players, FilterMode::QuickPlayer)
}

fn alliance_options<'a>(working: &[&'a PlayerRecord]) -> Vec<AllianceOption<'a>> {
    let mut first_seen: BTreeMap<&'a str, i64> = BTreeMap::new();
    for r in working {
        first_seen.entry(r.alliance.as_str()).or_insert(r.server);
    }
    first_seen
        .into_iter()
        .map(|(alliance, server)| AllianceOption { alliance, server })
        .collect()
}

/// Slider limits for the power window: the working set's extremes snapped
/// to bins, padded by one bin on each side (never below 0).
pub fn power_bounds(working: &[&PlayerRecord], bin_size: u64) -> PowerRange {
    let bin = bin_size.max(1);
    let lo = working.iter().map(|r| r.power).min();
    let hi = working.iter().map(|r| r.power).max();
    match (lo, hi) {
        (Some(lo), Some(hi)) => PowerRange {
            lo: bin_floor(lo, bin).saturating_sub(bin),
            hi: hi.div_ceil(bin).saturating_mul(bin).saturating_add(bin),
        },
        _ => PowerRange::default(),
    }
}

pub fn apply_power_range<'a>(working: &[&'a PlayerRecord], range: PowerRange) -> Vec<&'a PlayerRecord> {
    working
        .iter()
        .copied()
        .filter(|r| range.admits(r.power))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedBin {
    pub lower_bound: u64,
    pub count: usize,
    /// Whether the bin overlaps the active power window.
    pub in_range: bool,
}

/// Everything the main roster table shows for one set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryView<'a> {
    pub mode: FilterMode,
    pub working_set: Vec<&'a PlayerRecord>,
    pub alliance_options: Vec<AllianceOption<'a>>,
    pub power_bounds: PowerRange,
    pub power_range: PowerRange,
    pub histogram: Vec<FlaggedBin>,
    pub table: Vec<RankedRow<'a>>,
}

pub fn query<'a>(roster: &'a Roster, criteria: &FilterCriteria, params: &ViewParams) -> QueryView<'a> {
    let outcome = apply(roster, criteria);
    let bin = params.bin_size.max(1);

    let bounds = power_bounds(&outcome.working_set, bin);
    let window = criteria.power_range.unwrap_or(bounds);

    let domain = PowerDomain {
        min: bounds.lo,
        max: bounds.hi,
    };
    let flagged = histogram(outcome.working_set.iter().copied(), bin, domain)
        .into_iter()
        .map(|b| FlaggedBin {
            lower_bound: b.lower_bound,
            count: b.count,
            in_range: b.lower_bound.saturating_add(bin) >= window.lo && b.lower_bound <= window.hi,
        })
        .collect();

    let table = ranked(apply_power_range(&outcome.working_set, window));

    QueryView {
        mode: outcome.mode,
        working_set: outcome.working_set,
        alliance_options: outcome.alliance_options,
        power_bounds: bounds,
        power_range: window,
        histogram: flagged,
        table,
    }
}
