use super::{millions, sparkline, thousands};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use rosterforge::filter::{AllianceOption, FlaggedBin};
use rosterforge::session::SlotView;
use rosterforge::stats::{PowerDomain, RankedRow};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn alliance_options(options: &[AllianceOption]) {
    if options.is_empty() {
        println!("\nNo alliances in the current selection.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Alliance").add_attribute(Attribute::Bold),
        Cell::new("Server"),
    ]);
    for opt in options {
        table.add_row(vec![Cell::new(opt.alliance), Cell::new(opt.server)]);
    }
    println!("\n{}", table);
}

pub fn power_histogram(bins: &[FlaggedBin], bin_size: u64) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Power").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("Range"),
    ]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for b in bins {
        let label = format!("{}–{}", millions(b.lower_bound), millions(b.lower_bound.saturating_add(bin_size)));
        let marker = if b.in_range { "●" } else { "" };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(b.count),
            Cell::new(marker).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn players(rows: &[RankedRow], limit: Option<usize>) {
    if rows.is_empty() {
        println!("\nNo players match.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Player"),
        Cell::new("Alliance"),
        Cell::new("Server"),
        Cell::new("Power").fg(Color::Cyan),
    ]);
    for i in [0, 3, 4] {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in rows.iter().take(limit.unwrap_or(usize::MAX)) {
        let r = row.record;
        table.add_row(vec![
            Cell::new(row.rank),
            Cell::new(&r.player),
            Cell::new(&r.alliance),
            Cell::new(r.server),
            Cell::new(thousands(r.power)).fg(Color::Cyan),
        ]);
    }
    println!("\n{}", table);
}

pub fn comparison(views: &[SlotView]) {
    if views.is_empty() {
        println!("\nNo comparison slots.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Slot").add_attribute(Attribute::Bold),
        Cell::new("Group").add_attribute(Attribute::Bold),
        Cell::new("Rate").fg(Color::Cyan),
        Cell::new("Total (G)"),
        Cell::new("Members"),
        Cell::new("Stars").fg(Color::Green),
    ]);
    for i in 2..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (pos, v) in views.iter().enumerate() {
        let slot = format!("{} {}", pos, v.slot.id);
        match &v.stats {
            Some(s) => {
                let stars = s
                    .top
                    .iter()
                    .map(|p| format!("[{}] {} {}", p.alliance, p.player, thousands(p.power)))
                    .collect::<Vec<_>>()
                    .join("\n");
                table.add_row(vec![
                    Cell::new(slot),
                    Cell::new(&s.key).add_attribute(Attribute::Bold),
                    Cell::new(format!("{:.2}", s.rate_index)).fg(Color::Cyan),
                    Cell::new(format!("{:.2}", s.total_power_giga)),
                    Cell::new(s.members),
                    Cell::new(stars).fg(Color::Green),
                ]);
            }
            None => {
                let label = v
                    .slot
                    .bound_key
                    .as_ref()
                    .map(|k| format!("{} (gone)", k))
                    .unwrap_or_else(|| "(empty)".to_string());
                table.add_row(vec![
                    Cell::new(slot),
                    Cell::new(label).fg(Color::DarkGrey),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(""),
                ]);
            }
        }
    }
    println!("\n{}", table);
}

/// All bound slots on one shared axis.
pub fn comparison_histograms(views: &[SlotView], domain: PowerDomain, bin_size: u64) {
    let bound: Vec<_> = views.iter().filter_map(|v| v.stats.as_ref()).collect();
    if bound.is_empty() {
        return;
    }

    let max = bound
        .iter()
        .flat_map(|s| s.histogram.iter().map(|b| b.count))
        .max()
        .unwrap_or(0);

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Group").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "Distribution {}–{} ({} per bin)",
            millions(domain.min),
            millions(domain.max),
            millions(bin_size)
        )),
    ]);
    for s in bound {
        table.add_row(vec![
            Cell::new(&s.key),
            Cell::new(sparkline(s.histogram.iter().map(|b| b.count), max)),
        ]);
    }
    println!("\n{}", table);
}
