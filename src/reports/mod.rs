mod tables;

pub use self::tables::{
    alliance_options as print_alliance_options, comparison as print_comparison,
    comparison_histograms as print_comparison_histograms, players as print_player_table,
    power_histogram as print_power_histogram,
};

use rosterforge::filter::{FilterMode, QueryView};

pub fn print_query_summary(view: &QueryView) {
    let mode = match &view.mode {
        FilterMode::Criteria => "criteria".to_string(),
        FilterMode::QuickAlliance(tag) => format!("quick search → alliance {}", tag),
        FilterMode::QuickPlayer => "quick search → player name".to_string(),
    };
    println!("Mode: {}", mode);
    println!(
        "Matched: {} players ({} within power {}–{})",
        view.working_set.len(),
        view.table.len(),
        thousands(view.power_range.lo),
        thousands(view.power_range.hi)
    );
}

/// `1234567` → `"1,234,567"`.
pub(crate) fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Bin label in millions, e.g. `30M`.
pub(crate) fn millions(n: u64) -> String {
    format!("{}M", n / 1_000_000)
}

const SPARK: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One character per bin, scaled against `max` so rows share a scale.
pub(crate) fn sparkline(counts: impl Iterator<Item = usize>, max: usize) -> String {
    counts
        .map(|c| {
            if max == 0 || c == 0 {
                SPARK[0]
            } else {
                let level = (c * (SPARK.len() - 1)).div_ceil(max);
                SPARK[level.clamp(1, SPARK.len() - 1)]
            }
        })
        .collect()
}
