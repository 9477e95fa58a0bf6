use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    _dir: TempDir,
    roster_path: PathBuf,
}

impl TestContext {
    fn new(rows: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let roster_path = dir.path().join("roster.csv");

        let mut file = File::create(&roster_path).unwrap();
        writeln!(file, "player,alliance,server,power").unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }

        Self {
            _dir: dir,
            roster_path,
        }
    }

    fn standard() -> Self {
        Self::new(&["P1,A,1,50000000", "P2,A,1,30000000", "P3,B,2,90000000"])
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_rosterforge"))
            .arg("--roster")
            .arg(&self.roster_path)
            .args(args)
            .output()
            .expect("Failed to execute binary")
    }
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn rate_of(stdout: &str, group: &str) -> f64 {
    let re = Regex::new(&format!(r"\|\s*{}\s*\|\s*([0-9.]+)\s*\|", regex::escape(group))).unwrap();
    re.captures(stdout)
        .unwrap_or_else(|| panic!("no comparison row for {} in:\n{}", group, stdout))[1]
        .parse()
        .unwrap()
}

#[test]
fn test_compare_prints_rate_index() {
    let ctx = TestContext::standard();
    let stdout = stdout_of(&ctx.run(&["compare", "A", "B"]));

    assert!(stdout.contains("ALLIANCE COMPARISON"));
    assert_eq!(rate_of(&stdout, "A"), 64.79);
    assert_eq!(rate_of(&stdout, "B"), 100.0);
}

#[test]
fn test_compare_by_server() {
    let ctx = TestContext::standard();
    let stdout = stdout_of(&ctx.run(&["compare", "--kind", "server", "1", "2"]));

    assert!(stdout.contains("SERVER COMPARISON"));
    assert_eq!(rate_of(&stdout, "2"), 100.0);
}

#[test]
fn test_compare_move_changes_row_order() {
    let ctx = TestContext::standard();
    let stdout = stdout_of(&ctx.run(&["compare", "A", "B", "--move", "1:0"]));

    let b = stdout.find("100.00").unwrap();
    let a = stdout.find("64.79").unwrap();
    assert!(b < a, "B should be listed first:\n{}", stdout);
}

#[test]
fn test_compare_unknown_key_leaves_slot_empty() {
    let ctx = TestContext::standard();
    let stdout = stdout_of(&ctx.run(&["compare", "A", "NOPE"]));

    assert!(stdout.contains("(empty)"));
    assert_eq!(rate_of(&stdout, "A"), 64.79);
}

#[test]
fn test_query_filters_by_alliance() {
    let ctx = TestContext::standard();
    let stdout = stdout_of(&ctx.run(&["query", "--alliance", "A"]));

    assert!(stdout.contains("Mode: criteria"));
    assert!(stdout.contains("Matched: 2 players"));
    assert!(stdout.contains("P1"));
    assert!(!stdout.contains("P3"));
}

#[test]
fn test_query_quick_search_names_alliance() {
    let ctx = TestContext::new(&["Alice,WOLF,101,120000000", "Bob,BEAR,102,80000000"]);
    let stdout = stdout_of(&ctx.run(&["query", "--search", "wol"]));

    assert!(stdout.contains("alliance WOLF"));
    assert!(stdout.contains("Alice"));
    assert!(!stdout.contains("Bob"));
}

#[test]
fn test_invalid_roster_exits_non_zero() {
    let ctx = TestContext::new(&["P1,A,1,50000000", "P2,A,1,-3"]);
    let output = ctx.run(&["query"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("power -3 is negative"), "stderr was:\n{}", stderr);
}

#[test]
fn test_zero_bin_size_exits_non_zero() {
    let ctx = TestContext::standard();
    let output = ctx.run(&["query", "--bin-size", "0"]);
    assert!(!output.status.success());
}
