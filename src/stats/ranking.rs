use crate::roster::PlayerRecord;
use serde::Serialize;

/// Highest-power records first. Equal power keeps input order
/// (`sort_by` is stable), which display order depends on.
pub fn top_n<'a, I>(records: I, n: usize) -> Vec<&'a PlayerRecord>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    let mut sorted: Vec<&PlayerRecord> = records.into_iter().collect();
    sorted.sort_by(|a, b| b.power.cmp(&a.power));
    sorted.truncate(n);
    sorted
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow<'a> {
    pub rank: usize,
    pub record: &'a PlayerRecord,
}

/// Full leaderboard with 1-based ranks.
pub fn ranked<'a, I>(records: I) -> Vec<RankedRow<'a>>
where
    I: IntoIterator<Item = &'a PlayerRecord>,
{
    top_n(records, usize::MAX)
        .into_iter()
        .enumerate()
        .map(|(i, record)| RankedRow { rank: i + 1, record })
        .collect()
}
