#![allow(dead_code)]

use rosterforge::roster::{RawRecord, Roster};

pub const M: u64 = 1_000_000;
pub const BIN: u64 = 10 * M;

/// Builder for RawRecord to clean up tests
pub struct RecordBuilder {
    rec: RawRecord,
}

impl RecordBuilder {
    pub fn new(player: &str) -> Self {
        Self {
            rec: RawRecord::new(player, "AAA", 1.0, 0.0),
        }
    }

    pub fn alliance(mut self, alliance: &str) -> Self {
        self.rec.alliance = alliance.to_string();
        self
    }

    pub fn server(mut self, server: i64) -> Self {
        self.rec.server = server as f64;
        self
    }

    pub fn power(mut self, power: u64) -> Self {
        self.rec.power = power as f64;
        self
    }

    pub fn build(self) -> RawRecord {
        self.rec
    }
}

pub fn rec(player: &str, alliance: &str, server: i64, power: u64) -> RawRecord {
    RecordBuilder::new(player)
        .alliance(alliance)
        .server(server)
        .power(power)
        .build()
}

/// P1/P2 in alliance A on server 1, P3 in B on server 2.
pub fn three_player_roster() -> Roster {
    Roster::load(vec![
        rec("P1", "A", 1, 50 * M),
        rec("P2", "A", 1, 30 * M),
        rec("P3", "B", 2, 90 * M),
    ])
    .expect("valid roster")
}

/// Four alliances over three servers, with a repeated (case-differing)
/// player name and tied power values.
pub fn sample_roster() -> Roster {
    Roster::load(vec![
        rec("Alice", "WOLF", 101, 120 * M),
        rec("Bob", "WOLF", 101, 80 * M),
        rec("Carol", "BEAR", 102, 95 * M),
        rec("Dave", "WOLVES", 102, 40 * M),
        rec("Eve", "BEAR", 103, 95 * M),
        rec("Frank", "EAGL", 101, 15 * M),
        rec("alice", "EAGL", 103, 60 * M),
        rec("Grace", "BEAR", 102, 20 * M),
    ])
    .expect("valid roster")
}

pub fn names<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a rosterforge::roster::PlayerRecord>,
{
    records.into_iter().map(|r| r.player.as_str()).collect()
}
