use crate::reports;
use clap::Args;
use rosterforge::config::ViewParams;
use rosterforge::filter::{FilterCriteria, PowerRange, ServerSelector};
use rosterforge::roster::Roster;
use rosterforge::session::TrackerSession;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    #[command(flatten)]
    pub view: ViewParams,

    /// Quick search: alliance tag prefix or exact player name (3+ chars).
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Explicit ids ("98, 99") or an inclusive range ("10-20").
    #[arg(long)]
    pub servers: Option<ServerSelector>,

    #[arg(short, long)]
    pub alliance: Option<String>,

    #[arg(long)]
    pub power_min: Option<u64>,

    #[arg(long)]
    pub power_max: Option<u64>,

    /// Only print the first N table rows.
    #[arg(long)]
    pub limit: Option<usize>,
}

impl QueryArgs {
    fn criteria(&self) -> FilterCriteria {
        let power_range = match (self.power_min, self.power_max) {
            (None, None) => None,
            (lo, hi) => Some(PowerRange::new(lo.unwrap_or(0), hi.unwrap_or(u64::MAX))),
        };

        FilterCriteria {
            search_term: self.search.clone(),
            server_selector: self.servers.clone().unwrap_or_default(),
            alliance_tag: self.alliance.clone(),
            power_range,
        }
    }
}

pub fn run(args: &QueryArgs, roster: Arc<Roster>, params: ViewParams) {
    let session = TrackerSession::new(roster, params);
    let criteria = args.criteria();
    let view = session.query(&criteria);

    println!("\n🔎 === ROSTER QUERY === 🔎");
    reports::print_query_summary(&view);
    reports::print_alliance_options(&view.alliance_options);
    reports::print_power_histogram(&view.histogram, session.params().bin_size);
    reports::print_player_table(&view.table, args.limit);
}
