use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use rosterforge::config::ViewParams;
use rosterforge::roster::{loader, Roster};
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/roster.csv")]
    roster: String,

    /// JSON file with view parameters; explicit flags still win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Query(cmd::query::QueryArgs),
    Compare(cmd::compare::CompareArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing RosterForge...");

    let raw = loader::load_path(&cli.roster).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    let roster = match Roster::load(raw) {
        Ok(r) => Arc::new(r),
        Err(e) => {
            error!("❌ FATAL ERROR LOADING ROSTER:");
            error!("   {}", e);
            process::exit(1);
        }
    };

    let (cli_params, sub_name) = match &cli.command {
        Commands::Query(args) => (&args.view, "query"),
        Commands::Compare(args) => (&args.view, "compare"),
    };

    let params = match (&cli.config, matches.subcommand_matches(sub_name)) {
        (Some(path), Some(sub_matches)) => {
            info!("⚙️  Loading view parameters from: {}", path);
            let mut file_params = ViewParams::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_params.merge_from_cli(cli_params, sub_matches);
            file_params
        }
        _ => cli_params.clone(),
    };

    if let Err(e) = params.validate() {
        error!("{}", e);
        process::exit(1);
    }

    match cli.command {
        Commands::Query(args) => cmd::query::run(&args, roster, params),
        Commands::Compare(args) => cmd::compare::run(&args, roster, params),
    }
}
