//! Race outcomes and statistics

use crate::puzzle::Puzzle;
use std::time::Duration;

/// How a race ended.
#[derive(Debug)]
pub enum RaceOutcome {
    /// A worker produced an unambiguous puzzle.
    Solved(Puzzle),
    /// The caller asked to stop.
    Interrupted,
    /// The configured timeout elapsed first.
    TimedOut,
}

#[cfg(test)]
impl RaceOutcome {
    pub fn puzzle(&self) -> Option<&Puzzle> {
        match self {
            RaceOutcome::Solved(puzzle) => Some(puzzle),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, RaceOutcome::Solved(_))
    }
}

/// Result of a race.
#[derive(Debug)]
pub struct RaceReport {
    pub outcome: RaceOutcome,
    pub statistics: RaceStatistics,
}

/// Counters gathered over a whole race.
#[derive(Debug, Clone, Default)]
pub struct RaceStatistics {
    /// Number of worker threads that took part
    pub workers: usize,
    /// Fill attempts started across all workers
    pub attempts: u64,
    /// Attempts whose fill succeeded and were passed to the validator
    pub validations: u64,
    /// Wall-clock time from spawning the workers to the race being decided
    pub elapsed_time: Duration,
    /// Worker that produced the puzzle, if any
    pub winner: Option<usize>,
}

impl RaceStatistics {
    /// Attempts per second over the whole race.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.attempts as f64 / secs
        }
    }

    /// Fraction of attempts that reached validation (0.0 to 1.0).
    pub fn validation_rate(&self) -> f64 {
        rate(self.validations, self.attempts)
    }

    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Workers: {}\n", self.workers));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Attempts: {}\n", self.attempts));
        s.push_str(&format!(
            "Validations: {} ({:.2}%)\n",
            self.validations,
            self.validation_rate() * 100.0
        ));
        s.push_str(&format!("Throughput: {:.0} attempts/sec\n", self.throughput()));
        if let Some(winner) = self.winner {
            s.push_str(&format!("Winning worker: {}\n", winner));
        }
        s
    }
}

/// Snapshot handed to the progress callback on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub attempts: u64,
    pub validations: u64,
    /// Attempts per second since the previous tick
    pub attempts_per_sec: f64,
    pub elapsed_time: Duration,
}

impl Progress {
    pub fn validation_rate(&self) -> f64 {
        rate(self.validations, self.attempts)
    }

    /// One-line status, e.g. `Attempt #1.20M [350K/s] (0.04M (3.33%) validations)`.
    pub fn status_line(&self) -> String {
        format!(
            "Attempt #{:.2}M [{:.0}K/s] ({:.2}M ({:.2}%) validations)",
            self.attempts as f64 / 1e6,
            self.attempts_per_sec / 1e3,
            self.validations as f64 / 1e6,
            self.validation_rate() * 100.0
        )
    }
}

fn rate(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_rates() {
        let stats = RaceStatistics {
            workers: 4,
            attempts: 10_000,
            validations: 250,
            elapsed_time: Duration::from_secs(10),
            winner: Some(2),
        };

        assert!((stats.throughput() - 1000.0).abs() < 1e-10);
        assert!((stats.validation_rate() - 0.025).abs() < 1e-10);

        let summary = stats.format_summary();
        assert!(summary.contains("Attempts: 10000"));
        assert!(summary.contains("Winning worker: 2"));
    }

    #[test]
    fn test_statistics_zero_division() {
        let stats = RaceStatistics::default();
        assert_eq!(stats.throughput(), 0.0);
        assert_eq!(stats.validation_rate(), 0.0);
        assert!(!stats.format_summary().contains("Winning worker"));
    }

    #[test]
    fn test_progress_status_line() {
        let progress = Progress {
            attempts: 1_200_000,
            validations: 40_000,
            attempts_per_sec: 350_000.0,
            elapsed_time: Duration::from_secs(4),
        };
        assert_eq!(
            progress.status_line(),
            "Attempt #1.20M [350K/s] (0.04M (3.33%) validations)"
        );
    }
}
