//! camelsim
//!
//! Simulate Camel Up games between bots and manage their logs.
//!
//! Commands: simulate, concat

use std::path::PathBuf;
use std::process::ExitCode;

use camel_sim::bots::BOT_NAMES;
use camel_sim::{concat_logs, run_simulation, GameConfig, PlayerId, SimulationConfig, SimulationSummary};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "camelsim", version, about = "Camel Up simulation engine")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a batch of games and write one log per game.
    Simulate {
        /// Number of games.
        #[arg(short, long, default_value_t = 1)]
        games: usize,

        /// Bots in seat order, comma separated.
        #[arg(short, long, value_delimiter = ',', required = true)]
        bots: Vec<String>,

        /// Base seed; game i uses seed + i.
        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Directory for per-game logs.
        #[arg(short, long, default_value = "games")]
        out: PathBuf,

        /// JSON game configuration. Missing fields use the standard rules.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Play games in parallel.
        #[arg(short, long)]
        parallel: bool,

        /// Abandon a game after this many actions.
        #[arg(long, default_value_t = 10_000)]
        turn_limit: usize,
    },
    /// Merge every game log in a directory into one file.
    Concat {
        /// Directory holding per-game logs.
        #[arg(short, long)]
        dir: PathBuf,

        /// Combined output file.
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn log(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    if let Err(e) = simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("logger unavailable: {}", e);
    }
}

fn simulate(
    games: usize,
    bots: Vec<String>,
    seed: u64,
    out: PathBuf,
    config: Option<PathBuf>,
    parallel: bool,
    turn_limit: usize,
) -> camel_sim::Result<()> {
    let game = match config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    let players = bots.len();
    let sim = SimulationConfig::new()
        .with_games(games)
        .with_bots(bots)
        .with_seed(seed)
        .with_output_dir(out)
        .with_game(game)
        .with_parallel(parallel)
        .with_turn_limit(turn_limit);

    let reports = run_simulation(&sim)?;
    let summary = SimulationSummary::from_reports(&reports, players);

    log::info!("{} games completed, {} abandoned", summary.completed, summary.failed);
    for (seat, name) in sim.bots.iter().enumerate() {
        let player = PlayerId::new(seat as u8);
        log::info!(
            "{:<10}{:<10}{:>6} wins{:>10.2} coins",
            player.to_string(),
            name,
            summary.wins[player],
            summary.mean_coins(player)
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    log(cli.verbose);

    let result = match cli.command {
        Command::Simulate {
            games,
            bots,
            seed,
            out,
            config,
            parallel,
            turn_limit,
        } => simulate(games, bots, seed, out, config, parallel, turn_limit),
        Command::Concat { dir, out } => concat_logs(dir, out).map(|_| ()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(camel_sim::Error::UnknownBot(name)) => {
            log::error!("unknown bot `{}`; known bots: {}", name, BOT_NAMES.join(", "));
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
