use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use sweeper_core::{BoardConfig, CellCount, Coord, DriveResult, FlagAccounting, PointerLayout};

use command::{Command, HELP, parse_script};
use controller::{ManualController, Reply, run_solver};
use render::{TextView, mine_map};

mod command;
mod controller;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play from standard input
    Manual,
    /// Hand the board to an automated controller
    Solver,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity,

    #[arg(long, value_enum, default_value_t = Mode::Manual)]
    mode: Mode,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    #[arg(long)]
    mines: Option<CellCount>,

    /// Force a seed instead of the preset one
    #[arg(short, long)]
    seed: Option<u64>,

    /// Draw a fresh seed for every board
    #[arg(long, conflicts_with = "seed")]
    random: bool,

    /// Reveal zero regions automatically
    #[arg(long, overrides_with = "no_flood_fill")]
    flood_fill: bool,

    #[arg(long, overrides_with = "flood_fill")]
    no_flood_fill: bool,

    /// Only count flags placed on hidden cells and removed from flagged ones
    #[arg(long)]
    strict_flags: bool,

    /// Actions for the solver, one command per line
    #[arg(long)]
    script: Option<PathBuf>,

    /// Stop the solver after this many rounds
    #[arg(long, default_value_t = 10_000)]
    max_rounds: usize,
}

impl Args {
    fn board_config(&self) -> BoardConfig {
        let preset = match self.mode {
            Mode::Manual => BoardConfig::manual_session(),
            Mode::Solver => BoardConfig::solver_session(),
        };

        let mut config = BoardConfig {
            rows: self.rows.unwrap_or(preset.rows),
            cols: self.cols.unwrap_or(preset.cols),
            mines: self.mines.unwrap_or(preset.mines),
            seed: self.seed.or(preset.seed),
            ..preset
        };
        if self.random {
            config.seed = None;
        }
        if self.flood_fill {
            config.auto_flood_fill = true;
        } else if self.no_flood_fill {
            config.auto_flood_fill = false;
        }
        if self.strict_flags {
            config.flag_accounting = FlagAccounting::Transitional;
        }
        config
    }
}

fn init_logging(verbose: &Verbosity) {
    tracing_subscriber::fmt()
        .with_max_level(verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = args.board_config();
    log::debug!("config: {:?}", config);

    match args.mode {
        Mode::Manual => play(config),
        Mode::Solver => solve(config, &args),
    }
}

fn play(config: BoardConfig) -> Result<()> {
    let mut controller = ManualController::new(config)?;
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "Starting Manual Game...")?;
    writeln!(stdout, "r ROW COL: reveal, f ROW COL: flag, help: more")?;
    write!(stdout, "{}", TextView::new(controller.board()))?;
    stdout.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        let command: Command = match line.parse() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err:#}")?;
                continue;
            }
        };

        match controller.handle(command)? {
            Reply::Quit => break,
            Reply::Help => writeln!(stdout, "{HELP}")?,
            Reply::Facts(json) => writeln!(stdout, "{json}")?,
            Reply::Restarted => {
                writeln!(stdout, "Restarting...")?;
                write!(stdout, "{}", TextView::new(controller.board()))?;
            }
            Reply::Updated | Reply::Unchanged => {
                write!(stdout, "{}", TextView::new(controller.board()))?;
            }
        }
        stdout.flush()?;
    }

    Ok(())
}

fn solve(config: BoardConfig, args: &Args) -> Result<()> {
    let script = match &args.script {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read script {}", path.display()))?;
            Some(parse_script(&text, &PointerLayout::default(), config.size())?)
        }
        None => None,
    };

    let (board, outcome) = run_solver(config, script, args.max_rounds)?;

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", TextView::new(&board))?;
    match outcome.result {
        DriveResult::Won => writeln!(stdout, "Solver won in {} rounds", outcome.rounds)?,
        DriveResult::Lost => {
            writeln!(stdout, "Solver lost after {} rounds", outcome.rounds)?;
            write!(stdout, "{}", mine_map(&board))?;
        }
        DriveResult::Resigned => writeln!(
            stdout,
            "Solver stopped after {} rounds with the game still open",
            outcome.rounds
        )?,
    }
    Ok(())
}
