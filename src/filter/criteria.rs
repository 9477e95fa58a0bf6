use crate::consts::QUICK_SEARCH_MIN_LEN;
use crate::error::RosterError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use typed_builder::TypedBuilder;

/// Which servers the criteria-mode filter admits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerSelector {
    /// No restriction (the full slider range).
    #[default]
    Any,
    /// Inclusive on both ends.
    Range { min: i64, max: i64 },
    /// An empty set admits nothing.
    Explicit(BTreeSet<i64>),
}

impl ServerSelector {
    pub fn admits(&self, server: i64) -> bool {
        match self {
            Self::Any => true,
            Self::Range { min, max } => (*min..=*max).contains(&server),
            Self::Explicit(set) => set.contains(&server),
        }
    }
}

impl FromStr for ServerSelector {
    type Err = RosterError;

    /// `"98, 99"` is an explicit set, `"10-20"` or `"10..20"` a range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RosterError::Config("server selector is empty".into()));
        }

        let split = s.split_once("..").or_else(|| s.split_once('-'));
        if let Some((a, b)) = split {
            if let (Ok(a), Ok(b)) = (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
                return Ok(Self::Range {
                    min: a.min(b),
                    max: a.max(b),
                });
            }
        }

        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|_| RosterError::Config(format!("invalid server id '{}'", part)))
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self::Explicit)
    }
}

/// Inclusive power window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerRange {
    pub lo: u64,
    pub hi: u64,
}

impl PowerRange {
    pub fn new(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    pub fn admits(&self, power: u64) -> bool {
        power >= self.lo && power <= self.hi
    }
}

/// Structured filter state for the main roster table.
///
/// A `search_term` of three or more characters puts the filter in
/// quick-search mode, where `server_selector` and `alliance_tag` are
/// ignored entirely. An empty `alliance_tag` means "all alliances".
#[derive(Debug, Clone, PartialEq, Eq, Default, TypedBuilder, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    #[builder(default, setter(into))]
    pub search_term: String,
    #[builder(default)]
    pub server_selector: ServerSelector,
    #[builder(default, setter(strip_option, into))]
    pub alliance_tag: Option<String>,
    #[builder(default, setter(strip_option))]
    pub power_range: Option<PowerRange>,
}

impl FilterCriteria {
    pub fn is_quick_search(&self) -> bool {
        self.search_term.chars().count() >= QUICK_SEARCH_MIN_LEN
    }

    pub(crate) fn alliance_filter(&self) -> Option<&str> {
        self.alliance_tag.as_deref().filter(|tag| !tag.is_empty())
    }
}
