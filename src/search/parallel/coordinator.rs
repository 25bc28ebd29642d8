//! Race coordinator that manages worker threads.

use crate::board::Board;
use crate::error::Error;
use crate::puzzle::{Puzzle, Word};
use crate::search::parallel::channel::{
    create_channels, CoordinatorChannels, WorkerChannels, WorkerMessage,
};
use crate::search::parallel::config::RaceConfig;
use crate::search::{Filler, Progress, RaceOutcome, RaceReport, RaceStatistics, Validator};
use crossbeam_channel::{after, never, select, tick, Receiver};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Race `config.num_workers` workers to build an unambiguous puzzle from
/// `words`.
///
/// Blocks until a worker succeeds, `interrupt` fires (a message or a
/// disconnect), or the configured timeout elapses. `on_progress` runs on
/// every report tick. Invalid input is rejected before any worker starts.
pub fn run_race<F>(
    words: &[Word],
    config: &RaceConfig,
    interrupt: Receiver<()>,
    mut on_progress: F,
) -> Result<RaceReport, Error>
where
    F: FnMut(&Progress),
{
    config.check_input(words)?;
    let board = Board::new(config.width, config.height)?;

    let start_time = Instant::now();
    let num_workers = config.num_workers;
    let (coordinator_channels, worker_channels) = create_channels(num_workers);
    let words: Arc<[Word]> = words.into();

    log::info!(
        "Racing {} workers on a {}x{} board ({} words)",
        num_workers,
        config.width,
        config.height,
        words.len()
    );

    let worker_handles: Vec<JoinHandle<()>> = worker_channels
        .into_iter()
        .enumerate()
        .map(|(worker_id, channels)| {
            let words = Arc::clone(&words);
            let board = board.clone();
            let seed = config.base_seed.map(|s| s.wrapping_add(worker_id as u64));

            thread::spawn(move || run_worker(worker_id, &words, board, seed, channels))
        })
        .collect();

    let result = run_coordinator(
        &coordinator_channels,
        config,
        &interrupt,
        start_time,
        &mut on_progress,
    );

    // The race is decided one way or another; let the losers go.
    coordinator_channels.shared.signal_stop();
    for handle in worker_handles {
        if handle.join().is_err() {
            log::warn!("A worker panicked");
        }
    }

    let (outcome, winner) = result?;
    let statistics = RaceStatistics {
        workers: num_workers,
        attempts: coordinator_channels.shared.attempts(),
        validations: coordinator_channels.shared.validations(),
        elapsed_time: start_time.elapsed(),
        winner,
    };

    Ok(RaceReport {
        outcome,
        statistics,
    })
}

/// Wait on the first solution, the report ticker, the interrupt and the
/// deadline, whichever is ready first.
fn run_coordinator(
    channels: &CoordinatorChannels,
    config: &RaceConfig,
    interrupt: &Receiver<()>,
    start_time: Instant,
    on_progress: &mut dyn FnMut(&Progress),
) -> Result<(RaceOutcome, Option<usize>), Error> {
    let ticker = tick(config.report_interval);
    let deadline = config.timeout.map(after).unwrap_or_else(never);

    let mut prev_attempts = 0;
    let mut prev_tick = start_time;

    loop {
        select! {
            recv(channels.from_workers) -> msg => match msg {
                Ok(WorkerMessage::Solved { worker_id, puzzle }) => {
                    log::info!("Worker {} found a puzzle", worker_id);
                    return Ok((RaceOutcome::Solved(puzzle), Some(worker_id)));
                }
                Err(_) => {
                    log::error!("All workers exited without a puzzle");
                    return Err(Error::WorkersExited {
                        workers: config.num_workers,
                    });
                }
            },
            recv(ticker) -> _ => {
                let now = Instant::now();
                let attempts = channels.shared.attempts();
                let window = now.duration_since(prev_tick).as_secs_f64();
                let progress = Progress {
                    attempts,
                    validations: channels.shared.validations(),
                    attempts_per_sec: if window > 0.0 {
                        attempts.saturating_sub(prev_attempts) as f64 / window
                    } else {
                        0.0
                    },
                    elapsed_time: now.duration_since(start_time),
                };
                on_progress(&progress);
                prev_attempts = attempts;
                prev_tick = now;
            },
            recv(interrupt) -> _ => {
                log::info!("Interrupted");
                return Ok((RaceOutcome::Interrupted, None));
            },
            recv(deadline) -> _ => {
                log::info!("Timed out after {:?}", start_time.elapsed());
                return Ok((RaceOutcome::TimedOut, None));
            },
        }
    }
}

/// Worker loop: clear, fill, validate, repeat until someone wins.
fn run_worker(
    worker_id: usize,
    words: &[Word],
    mut board: Board,
    seed: Option<u64>,
    channels: WorkerChannels,
) {
    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };
    log::debug!("Worker {} started (seed: {:?})", worker_id, seed);

    let mut filler = Filler::new(rng);
    let shared = &channels.shared;

    while !shared.should_stop() {
        shared.record_attempt();
        board.reset();
        filler.reset();

        let Some(word_set) = filler.fill(&mut board, words) else {
            continue;
        };

        shared.record_validation();
        // Abandoned when the race is decided mid-check.
        if !Validator::with_stop(&board, shared.stop_flag()).validate(&word_set) {
            continue;
        }

        if shared.claim_win() {
            let puzzle = Puzzle::new(board, word_set);
            // The coordinator may already have given up; nothing to do then.
            let _ = channels
                .to_coordinator
                .send(WorkerMessage::Solved { worker_id, puzzle });
        }
        return;
    }

    log::debug!("Worker {} stopped", worker_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::time::Duration;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|&w| Word::from(w)).collect()
    }

    /// Two one-letter words that are the same letter can never be
    /// unambiguous, so a race over them never finishes on its own.
    fn hopeless() -> (Vec<Word>, RaceConfig) {
        (
            words(&["a", "a"]),
            RaceConfig::default().with_size(2, 1).with_workers(2),
        )
    }

    #[test]
    fn test_race_single_word() {
        let words = words(&["cat"]);
        let config = RaceConfig::default()
            .with_size(5, 5)
            .with_workers(2)
            .with_seed(42)
            .with_timeout(Duration::from_secs(30));

        let report = run_race(&words, &config, never(), |_| {}).unwrap();
        let puzzle = report.outcome.puzzle().expect("cat fits on 5x5");

        assert!(puzzle.check_consistency().is_ok());
        assert!(puzzle.is_unambiguous());
        assert_eq!(puzzle.board.filled(), 3);

        let placement = puzzle.word_set.find(&Word::from("cat")).unwrap();
        assert!(placement.path.is_connected());

        assert!(report.statistics.attempts >= 1);
        assert!(report.statistics.validations >= 1);
        assert!(report.statistics.winner.is_some());
        assert_eq!(report.statistics.workers, 2);
    }

    #[test]
    fn test_race_several_words() {
        let words = words(&["tree", "leaf", "root"]);
        let config = RaceConfig::default()
            .with_size(6, 6)
            .with_workers(4)
            .with_seed(7)
            .with_timeout(Duration::from_secs(60));

        let report = run_race(&words, &config, never(), |_| {}).unwrap();
        let puzzle = report.outcome.puzzle().expect("three short words fit on 6x6");
        assert_eq!(puzzle.word_set.len(), 3);
        assert!(puzzle.check_consistency().is_ok());
        assert!(puzzle.is_unambiguous());
    }

    #[test]
    fn test_oversized_input_spawns_nothing() {
        let config = RaceConfig::default().with_size(2, 2).with_workers(2);
        let mut ticks = 0;
        let err = run_race(&words(&["hello"]), &config, never(), |_| ticks += 1).unwrap_err();

        assert!(matches!(err, Error::CapacityExceeded { .. }));
        assert_eq!(ticks, 0);
    }

    #[test]
    fn test_interrupt_stops_race() {
        let (words, config) = hopeless();
        let (tx, rx) = bounded(1);
        tx.send(()).unwrap();

        let report = run_race(&words, &config, rx, |_| {}).unwrap();
        assert!(matches!(report.outcome, RaceOutcome::Interrupted));
        assert!(report.statistics.winner.is_none());
    }

    #[test]
    fn test_timeout_stops_race() {
        let (words, config) = hopeless();
        let config = config.with_timeout(Duration::from_millis(200));

        let report = run_race(&words, &config, never(), |_| {}).unwrap();
        assert!(matches!(report.outcome, RaceOutcome::TimedOut));
        assert!(!report.outcome.is_solved());
        assert_eq!(report.statistics.validations, report.statistics.attempts);
    }

    /// A single long word of one repeated letter: fills succeed quickly but
    /// each validation walks an enormous number of paths.
    fn slow_to_validate(workers: usize) -> (Vec<Word>, RaceConfig) {
        (
            vec![Word::from("a".repeat(22))],
            RaceConfig::default()
                .with_size(10, 10)
                .with_workers(workers)
                .with_seed(5),
        )
    }

    #[test]
    fn test_timeout_cuts_long_validation() {
        let (words, config) = slow_to_validate(2);
        let config = config.with_timeout(Duration::from_millis(200));

        let started = Instant::now();
        let report = run_race(&words, &config, never(), |_| {}).unwrap();

        assert!(matches!(report.outcome, RaceOutcome::TimedOut));
        assert!(
            started.elapsed() < Duration::from_secs(10),
            "race took {:?} to stop",
            started.elapsed()
        );
    }

    #[test]
    fn test_interrupt_cuts_long_validation() {
        let (words, config) = slow_to_validate(1);
        let (tx, rx) = bounded(1);
        let sender = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            let _ = tx.send(());
        });

        let started = Instant::now();
        let report = run_race(&words, &config, rx, |_| {}).unwrap();
        sender.join().unwrap();

        assert!(matches!(report.outcome, RaceOutcome::Interrupted));
        assert!(
            started.elapsed() < Duration::from_secs(10),
            "race took {:?} to stop",
            started.elapsed()
        );
    }

    #[test]
    fn test_progress_is_reported() {
        let (words, config) = hopeless();
        let config = config
            .with_timeout(Duration::from_millis(400))
            .with_report_interval(Duration::from_millis(50));

        let mut seen: Vec<Progress> = Vec::new();
        let report = run_race(&words, &config, never(), |p| seen.push(*p)).unwrap();

        assert!(matches!(report.outcome, RaceOutcome::TimedOut));
        assert!(!seen.is_empty());
        assert!(seen.windows(2).all(|w| w[0].attempts <= w[1].attempts));
        assert!(seen.iter().all(|p| p.validations <= p.attempts));
    }
}
