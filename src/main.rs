//! CLI entry point for the tube sorting game.
//!
//! Usage:
//!   tubes [options]
//!
//! Options:
//!   -c, --colors <n>   Number of colors (default: 5)
//!   -e, --extra <n>    Number of extra tubes (default: 2)
//!   -l, --slots <n>    Number of slots per tube (default: 4)
//!   -s, --seed <n>     Random seed for the game (default: random)
//!   -f, --file <path>  Read the game from a file instead of generating it
//!   -S, --solve        Write a solution file
//!   -N, --noplay       Do not play the game interactively
//!   --json             Also write the solution as JSON
//!   --exhaustive       Try every destination when backtracking
//!   --max-depth <n>    Give up on branches deeper than this many pours
//!   -v                 More log output (repeatable)

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tubes::board::{Board, GameConfig};
use tubes::input::read_board;
use tubes::play::play;
use tubes::report::{self, SolutionReport};
use tubes::seed::fresh_seed;
use tubes::solver::{solve, DestinationPolicy, SolverConfig};

#[derive(Parser)]
#[command(name = "tubes")]
#[command(about = "Generic \"colour sorting game\" (with solver)")]
#[command(version)]
struct Cli {
    /// Number of colors
    #[arg(short = 'c', long = "colors", default_value = "5")]
    colors: usize,

    /// Number of extra tubes
    #[arg(short = 'e', long = "extra", default_value = "2")]
    extra: usize,

    /// Number of slots per tube
    #[arg(short = 'l', long = "slots", default_value = "4")]
    slots: usize,

    /// Random seed for the game (default: random)
    #[arg(short = 's', long)]
    seed: Option<u32>,

    /// Read the game from a file instead of generating it from a seed
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write the solution to a file
    #[arg(short = 'S', long)]
    solve: bool,

    /// Do not actually play the game
    #[arg(short = 'N', long)]
    noplay: bool,

    /// Also write the solution as JSON
    #[arg(long)]
    json: bool,

    /// Try every destination for each source when backtracking
    #[arg(long)]
    exhaustive: bool,

    /// Maximum number of outstanding pours during the search
    #[arg(long)]
    max_depth: Option<usize>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut board = match &cli.file {
        Some(path) => match read_board(path) {
            Ok(raw) => Board::load(&raw, path),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            let config = GameConfig {
                num_colors: cli.colors,
                num_extra: cli.extra,
                num_slots: cli.slots,
            };
            let seed = cli.seed.unwrap_or_else(fresh_seed);
            match Board::generate(&config, seed) {
                Ok(board) => board,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };
    tracing::info!(origin = %board.origin(), tubes = board.num_tubes(), "board ready");

    if cli.solve {
        let config = SolverConfig {
            policy: if cli.exhaustive {
                DestinationPolicy::Exhaustive
            } else {
                DestinationPolicy::FirstFit
            },
            max_depth: cli.max_depth,
        };
        if let Err(e) = solve_and_report(&mut board, &config, cli.json) {
            eprintln!("Error writing solution: {}", e);
            std::process::exit(1);
        }
    }

    if !cli.noplay {
        let stdin = io::stdin();
        if let Err(e) = play(&mut board, stdin.lock(), io::stdout()) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Solve `board`, write the report files, and leave the board as it was.
fn solve_and_report(board: &mut Board, config: &SolverConfig, json: bool) -> io::Result<()> {
    let result = solve(board, config);
    let Some(solution) = result.solution else {
        tracing::warn!(
            pours_attempted = result.pours_attempted,
            "no solution found, nothing written"
        );
        return Ok(());
    };

    report::rewind(board, &solution);
    report::write_text(board, &solution)?;
    if json {
        let report = SolutionReport::new(board, &solution);
        report::write_json(&report, &report::json_path(board))?;
    }
    Ok(())
}
