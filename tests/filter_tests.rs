mod common;

use common::{names, sample_roster, BIN, M};
use rosterforge::config::ViewParams;
use rosterforge::filter::{
    self, apply, power_bounds, AllianceOption, FilterCriteria, FilterMode, PowerRange,
    ServerSelector,
};
use rosterforge::RosterError;
use rstest::rstest;
use std::collections::BTreeSet;

fn explicit(ids: &[i64]) -> ServerSelector {
    ServerSelector::Explicit(ids.iter().copied().collect::<BTreeSet<_>>())
}

fn options<'a>(opts: &[AllianceOption<'a>]) -> Vec<(&'a str, i64)> {
    opts.iter().map(|o| (o.alliance, o.server)).collect()
}

// --- CRITERIA MODE ---

#[test]
fn test_default_criteria_pass_everything() {
    let roster = sample_roster();
    let out = apply(&roster, &FilterCriteria::default());

    assert_eq!(out.mode, FilterMode::Criteria);
    assert_eq!(out.working_set.len(), roster.len());
    assert_eq!(
        options(&out.alliance_options),
        vec![("BEAR", 102), ("EAGL", 101), ("WOLF", 101), ("WOLVES", 102)]
    );
}

#[test]
fn test_server_range_is_inclusive() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder()
        .server_selector(ServerSelector::Range { min: 101, max: 101 })
        .build();

    let out = apply(&roster, &criteria);
    assert_eq!(names(out.working_set), vec!["Alice", "Bob", "Frank"]);
}

#[test]
fn test_explicit_server_set_keeps_roster_order() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder()
        .server_selector(explicit(&[102, 103]))
        .build();

    let out = apply(&roster, &criteria);
    assert_eq!(
        names(out.working_set),
        vec!["Carol", "Dave", "Eve", "alice", "Grace"]
    );
}

#[test]
fn test_empty_explicit_set_matches_nothing() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder().server_selector(explicit(&[])).build();

    let out = apply(&roster, &criteria);
    assert!(out.working_set.is_empty());
    assert!(out.alliance_options.is_empty());
}

#[test]
fn test_alliance_and_server_combine() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder()
        .server_selector(explicit(&[102]))
        .alliance_tag("BEAR")
        .build();

    let out = apply(&roster, &criteria);
    assert_eq!(names(out.working_set), vec!["Carol", "Grace"]);
    assert_eq!(options(&out.alliance_options), vec![("BEAR", 102)]);
}

#[test]
fn test_empty_alliance_tag_means_all() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder().alliance_tag("").build();

    assert_eq!(apply(&roster, &criteria).working_set.len(), roster.len());
}

#[test]
fn test_short_search_term_stays_in_criteria_mode() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder()
        .search_term("be")
        .alliance_tag("WOLF")
        .build();

    let out = apply(&roster, &criteria);
    assert_eq!(out.mode, FilterMode::Criteria);
    assert_eq!(names(out.working_set), vec!["Alice", "Bob"]);
}

// --- QUICK SEARCH ---

#[test]
fn test_quick_search_prefers_alliance_prefix() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder().search_term("wol").build();

    let out = apply(&roster, &criteria);
    assert_eq!(out.mode, FilterMode::QuickAlliance("WOLF".into()));
    assert_eq!(names(out.working_set), vec!["Alice", "Bob"]);
}

#[test]
fn test_quick_search_exact_tag_beats_earlier_prefix() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder().search_term("wolves").build();

    let out = apply(&roster, &criteria);
    assert_eq!(out.mode, FilterMode::QuickAlliance("WOLVES".into()));
    assert_eq!(names(out.working_set), vec!["Dave"]);
}

#[test]
fn test_quick_search_falls_back_to_player_name() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder().search_term("ALICE").build();

    let out = apply(&roster, &criteria);
    assert_eq!(out.mode, FilterMode::QuickPlayer);
    assert_eq!(names(out.working_set.iter().copied()), vec!["Alice", "alice"]);
    assert_eq!(
        options(&out.alliance_options),
        vec![("EAGL", 103), ("WOLF", 101)]
    );
}

#[test]
fn test_quick_search_player_name_is_exact() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder().search_term("ali").build();

    let out = apply(&roster, &criteria);
    assert_eq!(out.mode, FilterMode::QuickPlayer);
    assert!(out.working_set.is_empty());
}

#[test]
fn test_quick_search_ignores_other_criteria() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder()
        .search_term("bea")
        .server_selector(explicit(&[999]))
        .alliance_tag("WOLF")
        .build();

    let out = apply(&roster, &criteria);
    assert_eq!(out.mode, FilterMode::QuickAlliance("BEAR".into()));
    assert_eq!(names(out.working_set), vec!["Carol", "Eve", "Grace"]);
}

#[test]
fn test_clearing_search_restores_criteria() {
    let roster = sample_roster();
    let mut criteria = FilterCriteria::builder()
        .search_term("eagl")
        .server_selector(ServerSelector::Range { min: 101, max: 101 })
        .build();
    assert_eq!(names(apply(&roster, &criteria).working_set), vec!["Frank", "alice"]);

    criteria.search_term.clear();
    assert_eq!(
        names(apply(&roster, &criteria).working_set),
        vec!["Alice", "Bob", "Frank"]
    );
}

// --- POWER WINDOW ---

#[test]
fn test_power_bounds_pad_by_one_bin() {
    let roster = sample_roster();
    let all: Vec<_> = roster.records().iter().collect();

    assert_eq!(power_bounds(&all, BIN), PowerRange::new(0, 130 * M));
    assert_eq!(power_bounds(&[], BIN), PowerRange::new(0, 0));

    let bear = roster.members(&rosterforge::roster::GroupKey::Alliance("BEAR".into()));
    assert_eq!(power_bounds(&bear, BIN), PowerRange::new(10 * M, 110 * M));
}

#[test]
fn test_query_applies_power_window_to_table_only() {
    let roster = sample_roster();
    let criteria = FilterCriteria::builder()
        .power_range(PowerRange::new(40 * M, 95 * M))
        .build();

    let view = filter::query(&roster, &criteria, &ViewParams::default());

    assert_eq!(view.working_set.len(), roster.len());
    assert_eq!(view.power_bounds, PowerRange::new(0, 130 * M));
    assert_eq!(view.power_range, PowerRange::new(40 * M, 95 * M));

    let table: Vec<&str> = view.table.iter().map(|r| r.record.player.as_str()).collect();
    assert_eq!(table, vec!["Carol", "Eve", "Bob", "alice", "Dave"]);
    assert_eq!(view.table[0].rank, 1);

    assert_eq!(view.histogram.len(), 14);
    let flagged: Vec<u64> = view
        .histogram
        .iter()
        .filter(|b| b.in_range)
        .map(|b| b.lower_bound)
        .collect();
    assert_eq!(flagged, (3..=9).map(|i| i * 10 * M).collect::<Vec<_>>());

    let counted: usize = view.histogram.iter().map(|b| b.count).sum();
    assert_eq!(counted, roster.len());
}

#[test]
fn test_query_without_window_uses_bounds() {
    let roster = sample_roster();
    let view = filter::query(&roster, &FilterCriteria::default(), &ViewParams::default());

    assert_eq!(view.power_range, view.power_bounds);
    assert_eq!(view.table.len(), roster.len());
    assert!(view.histogram.iter().all(|b| b.in_range));
}

// --- SERVER SELECTOR PARSING ---

#[rstest]
#[case("101", explicit(&[101]))]
#[case(" 98, 99 ,", explicit(&[98, 99]))]
#[case("10-20", ServerSelector::Range { min: 10, max: 20 })]
#[case("20..10", ServerSelector::Range { min: 10, max: 20 })]
fn test_server_selector_parses(#[case] input: &str, #[case] expected: ServerSelector) {
    assert_eq!(input.parse::<ServerSelector>().unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("abc")]
#[case("1, two")]
fn test_server_selector_rejects(#[case] input: &str) {
    let err = input.parse::<ServerSelector>().unwrap_err();
    assert!(matches!(err, RosterError::Config(_)));
}
