//! Parallel generation race.
//!
//! Generation attempts are cheap and most of them fail, so the fastest way to
//! an unambiguous puzzle is to run many independent attempt loops at once and
//! take whichever succeeds first.
//!
//! # Architecture
//!
//! - A **coordinator** spawns the workers and waits on the first solution, a
//!   progress ticker, an interrupt channel and an optional deadline
//! - Multiple **workers**, each owning a board, a filler and its own RNG,
//!   loop fill, validate, reset without ever waiting on each other
//! - **Shared state** holds the attempt/validation counters and the win and
//!   stop flags; it is the only data the workers share
//!
//! # Example
//!
//! ```ignore
//! use crossbeam_channel::never;
//!
//! let config = RaceConfig::default()
//!     .with_size(6, 6)
//!     .with_timeout(Duration::from_secs(60));
//!
//! let report = run_race(&words, &config, never(), |p| eprint!("\r{}", p.status_line()))?;
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;

pub use config::RaceConfig;
pub use coordinator::run_race;
