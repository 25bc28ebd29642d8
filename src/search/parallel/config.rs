//! Configuration for a generation race.

use crate::board::{MAX_HEIGHT, MAX_WIDTH};
use crate::error::Error;
use crate::puzzle::Word;
use std::time::Duration;

/// Workers spawned per CPU by default. Workers never block, so a small
/// oversubscription keeps every core busy.
pub const WORKERS_PER_CPU: usize = 2;

/// Configuration for a generation race.
#[derive(Debug, Clone)]
pub struct RaceConfig {
    /// Board width in cells.
    pub width: usize,
    /// Board height in cells.
    pub height: usize,
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// Base random seed (workers get seed + worker_id).
    pub base_seed: Option<u64>,
    /// Give up after this long.
    pub timeout: Option<Duration>,
    /// How often the progress callback runs.
    pub report_interval: Duration,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            num_workers: num_cpus::get() * WORKERS_PER_CPU,
            base_seed: None,
            timeout: None,
            report_interval: Duration::from_secs(1),
        }
    }
}

impl RaceConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Cells available on the configured board.
    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    /// Reject inputs no amount of retrying could place.
    pub fn check_input(&self, words: &[Word]) -> Result<(), Error> {
        if !(1..=MAX_WIDTH).contains(&self.width) || !(1..=MAX_HEIGHT).contains(&self.height) {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if words.is_empty() {
            return Err(Error::NoWords);
        }
        if let Some(index) = words.iter().position(|w| w.is_empty()) {
            return Err(Error::EmptyWord { index });
        }

        let total: usize = words.iter().map(Word::len).sum();
        if total > self.capacity() {
            return Err(Error::CapacityExceeded {
                total,
                capacity: self.capacity(),
            });
        }

        Ok(())
    }
}
