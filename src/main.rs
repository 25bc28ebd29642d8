use clap::{Parser, Subcommand};
use crossbeam_channel::{bounded, never, Receiver};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

mod board;
mod error;
mod logging;
mod puzzle;
mod search;

use error::Error;
use puzzle::{Puzzle, Word};
use search::{run_race, RaceConfig, RaceOutcome};

/// Exit code for a puzzle that was not produced or did not validate.
const EXIT_FAILURE: i32 = 1;
/// Exit code for bad input detected before any work starts.
const EXIT_CONFIG: i32 = 2;
/// Conventional exit code after SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "wordgrid")]
#[command(about = "wordgrid - Word-search puzzle generator")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a board hiding every given word exactly once
    Generate {
        /// Words to hide
        #[arg(required = true)]
        words: Vec<String>,
        /// Board width (1-10)
        #[arg(long, short = 'W', default_value = "5")]
        width: usize,
        /// Board height (1-10)
        #[arg(long, short = 'H', default_value = "5")]
        height: usize,
        /// Number of worker threads (default: twice the CPU count)
        #[arg(long, short = 'j')]
        workers: Option<usize>,
        /// Base random seed; worker N uses seed + N
        #[arg(long)]
        seed: Option<u64>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Milliseconds between progress updates
        #[arg(long, default_value = "1000")]
        report_interval: u64,
        /// Enable verbose output
        #[arg(long, short)]
        verbose: bool,
    },
    /// Check that a previously generated dump is still unambiguous
    Validate {
        /// Dump JSON, as printed by `generate`
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        dump: Option<String>,
        /// File containing the dump JSON
        #[arg(long)]
        file: Option<PathBuf>,
        /// Enable verbose output
        #[arg(long, short)]
        verbose: bool,
    },
}

/// Options for a generation run
struct GenerateOptions {
    words: Vec<Word>,
    width: usize,
    height: usize,
    workers: Option<usize>,
    seed: Option<u64>,
    timeout: Option<Duration>,
    report_interval: Duration,
}

// --- Generation ---

fn generate(options: &GenerateOptions) -> Result<i32, Error> {
    let mut config = RaceConfig::default()
        .with_size(options.width, options.height)
        .with_report_interval(options.report_interval);
    if let Some(workers) = options.workers {
        config = config.with_workers(workers);
    }
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    if let Some(timeout) = options.timeout {
        config = config.with_timeout(timeout);
    }

    // Fail fast, before installing handlers or printing anything.
    config.check_input(&options.words)?;

    println!(
        "Generating a {}x{} board for {} words with {} workers",
        config.width,
        config.height,
        options.words.len(),
        config.num_workers
    );
    if let Some(seed) = config.base_seed {
        println!("  Base seed: {}", seed);
    }

    let interrupt = install_interrupt_handler();
    let mut reported = false;
    let report = run_race(&options.words, &config, interrupt, |progress| {
        print!("\r{}", progress.status_line());
        let _ = io::stdout().flush();
        reported = true;
    })?;
    if reported {
        println!();
    }

    let stats = &report.statistics;
    match report.outcome {
        RaceOutcome::Solved(puzzle) => {
            println!();
            println!(
                "Completed after {} attempts with {} validations. Took {:.2?}",
                stats.attempts, stats.validations, stats.elapsed_time
            );
            log::debug!("Race statistics:\n{}", stats.format_summary());
            println!();
            println!("Dump:\n{}", puzzle.to_dump()?);
            println!();
            println!("Board:\n");
            print!("{}", puzzle.board.render_table());
            Ok(0)
        }
        RaceOutcome::Interrupted => {
            println!();
            println!(
                "Stopping after {:.2}M attempts...",
                stats.attempts as f64 / 1e6
            );
            Ok(EXIT_INTERRUPTED)
        }
        RaceOutcome::TimedOut => {
            println!();
            println!(
                "No unambiguous board found within {:.2?} ({} attempts, {} validations)",
                stats.elapsed_time, stats.attempts, stats.validations
            );
            Ok(EXIT_FAILURE)
        }
    }
}

/// Route Ctrl+C / SIGTERM into a channel the race can wait on. A second
/// signal exits on the spot.
fn install_interrupt_handler() -> Receiver<()> {
    let (tx, rx) = bounded(1);
    let mut interrupted = false;
    match ctrlc::set_handler(move || {
        if interrupted {
            process::exit(EXIT_INTERRUPTED);
        }
        interrupted = true;
        let _ = tx.try_send(());
    }) {
        Ok(()) => rx,
        Err(e) => {
            log::warn!("Could not install interrupt handler: {}", e);
            never()
        }
    }
}

// --- Validation ---

fn validate_dump(dump: Option<String>, file: Option<PathBuf>) -> Result<i32, Error> {
    let json = match (dump, file) {
        (Some(dump), _) => dump,
        (None, Some(path)) => fs::read_to_string(&path)?,
        (None, None) => return Err(Error::MalformedDump("no dump given".to_string())),
    };

    let puzzle = Puzzle::from_dump(&json)?;
    log::debug!(
        "Decoded {}x{} board with {} words on {} filled cells",
        puzzle.board.width(),
        puzzle.board.height(),
        puzzle.word_set.len(),
        puzzle.board.filled()
    );

    println!("Board:\n");
    print!("{}", puzzle.board);
    println!();

    match puzzle.first_ambiguous() {
        None => {
            println!("Valid: every word appears exactly once.");
            Ok(0)
        }
        Some(placement) => {
            println!(
                "Ambiguous: \"{}\" can also be read off its path.",
                placement.word
            );
            Ok(EXIT_FAILURE)
        }
    }
}

fn exit_with(result: Result<i32, Error>) -> ! {
    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(if e.is_configuration() {
                EXIT_CONFIG
            } else {
                EXIT_FAILURE
            });
        }
    }
}

// --- Main Function ---
fn main() {
    let args = Args::parse();

    match args.command {
        Commands::Generate {
            words,
            width,
            height,
            workers,
            seed,
            timeout,
            report_interval,
            verbose,
        } => {
            logging::init_logger(verbose);

            let options = GenerateOptions {
                words: words.into_iter().map(Word::from).collect(),
                width,
                height,
                workers,
                seed,
                timeout: timeout.map(Duration::from_secs),
                report_interval: Duration::from_millis(report_interval),
            };
            exit_with(generate(&options));
        }
        Commands::Validate {
            dump,
            file,
            verbose,
        } => {
            logging::init_logger(verbose);
            exit_with(validate_dump(dump, file));
        }
    }
}
