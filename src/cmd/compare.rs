use crate::reports;
use clap::Args;
use rosterforge::config::ViewParams;
use rosterforge::roster::{GroupKind, Roster};
use rosterforge::session::TrackerSession;
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub view: ViewParams,

    #[arg(short, long, default_value = "alliance")]
    pub kind: GroupKind,

    /// Groups to pin, one slot each, in order.
    pub keys: Vec<String>,

    /// Move a slot, FROM:TO (0-based). Applied in order after binding.
    #[arg(long = "move", value_parser = parse_move)]
    pub moves: Vec<(usize, usize)>,
}

fn parse_move(s: &str) -> Result<(usize, usize), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{}'", s))?;
    let from = from.trim().parse().map_err(|_| format!("bad index '{}'", from))?;
    let to = to.trim().parse().map_err(|_| format!("bad index '{}'", to))?;
    Ok((from, to))
}

pub fn run(args: &CompareArgs, roster: Arc<Roster>, params: ViewParams) {
    let mut session = TrackerSession::new(roster, params);
    let kind = args.kind;

    for key in &args.keys {
        let Some(id) = session.add_slot(kind) else {
            warn!("⚠️  All slots in use; '{}' skipped", key);
            continue;
        };
        if !session.bind_slot(kind, id, key) {
            warn!("⚠️  '{}' is not a known {}; slot {} left empty", key, kind, id);
        }
    }

    for &(from, to) in &args.moves {
        let len = session.slots(kind).len();
        if from >= len || to >= len {
            warn!("⚠️  Move {}:{} ignored, only {} slots", from, to, len);
            continue;
        }
        session.move_slot(kind, from, to);
    }

    let views = session.comparison(kind);
    let domain = session.cache().domain();

    println!("\n📊 === {} COMPARISON === 📊", kind.to_string().to_uppercase());
    reports::print_comparison(&views);
    reports::print_comparison_histograms(&views, domain, session.params().bin_size);
}
