use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// One validated row of the roster snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player: String,
    pub alliance: String,
    pub server: i64,
    pub power: u64,
}

/// Loose input shape accepted from CSV/JSON before validation.
///
/// Numbers arrive as `f64` so that fractional or negative values can be
/// reported as validation failures instead of aborting deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub alliance: String,
    pub server: f64,
    pub power: f64,
}

impl RawRecord {
    pub fn new(player: &str, alliance: &str, server: f64, power: f64) -> Self {
        Self {
            player: player.to_string(),
            alliance: alliance.to_string(),
            server,
            power,
        }
    }
}

impl From<&PlayerRecord> for RawRecord {
    fn from(r: &PlayerRecord) -> Self {
        Self {
            player: r.player.clone(),
            alliance: r.alliance.clone(),
            server: r.server as f64,
            power: r.power as f64,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Alliance,
    Server,
}

/// Scope of a comparison: an alliance tag or a server id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GroupKey {
    Alliance(String),
    Server(i64),
}

impl GroupKey {
    pub fn kind(&self) -> GroupKind {
        match self {
            Self::Alliance(_) => GroupKind::Alliance,
            Self::Server(_) => GroupKind::Server,
        }
    }

    /// Turns already-resolved text into a key of the requested kind.
    /// Alliance tags are taken verbatim; server ids must parse as integers.
    pub fn parse(kind: GroupKind, text: &str) -> Option<Self> {
        match kind {
            GroupKind::Alliance if !text.is_empty() => Some(Self::Alliance(text.to_string())),
            GroupKind::Alliance => None,
            GroupKind::Server => text.trim().parse().ok().map(Self::Server),
        }
    }

    pub fn contains(&self, record: &PlayerRecord) -> bool {
        match self {
            Self::Alliance(tag) => record.alliance == *tag,
            Self::Server(id) => record.server == *id,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alliance(tag) => write!(f, "{}", tag),
            Self::Server(id) => write!(f, "{}", id),
        }
    }
}
