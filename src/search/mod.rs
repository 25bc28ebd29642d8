//! Puzzle generation
//!
//! - Filler: random-walk placement of a whole word set, restart on failure
//! - Validator: exhaustive search for accidental second occurrences
//! - Parallel: the race that runs both in a loop on every core

pub mod filler;
pub mod parallel;
pub mod result;
pub mod validator;

pub use filler::Filler;
pub use parallel::{run_race, RaceConfig};
pub use result::{Progress, RaceOutcome, RaceReport, RaceStatistics};
pub use validator::Validator;
