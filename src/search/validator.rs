//! Ambiguity checking for finished boards
//!
//! A board is accepted only if every word can be read along its own path and
//! nowhere else. For each word the validator starts a depth-first walk from
//! every cell holding the word's first letter and follows king moves onto
//! matching letters, branching on every match. A walk that spells the whole
//! word after touching at least one cell outside the word's path is a second
//! occurrence, and rejects the board.
//!
//! The walk is exhaustive and unmemoized, and stops at the first second
//! occurrence it finds. On dense boards it can run for a very long time, so a
//! caller may attach a stop flag that abandons the walk.

use crate::board::{Board, Point};
use crate::puzzle::{Path, Placement, WordSet};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct Validator<'a> {
    board: &'a Board,
    stop: Option<&'a AtomicBool>,
}

impl<'a> Validator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, stop: None }
    }

    /// Like `new`, but gives up as soon as `stop` is raised. An abandoned
    /// check reports the board as ambiguous.
    pub fn with_stop(board: &'a Board, stop: &'a AtomicBool) -> Self {
        Self {
            board,
            stop: Some(stop),
        }
    }

    /// True if no word in `word_set` appears anywhere but its own path.
    pub fn validate(&self, word_set: &WordSet) -> bool {
        self.first_ambiguous(word_set).is_none()
    }

    /// The first placement, in word-set order, whose word can also be read
    /// somewhere else.
    pub fn first_ambiguous<'w>(&self, word_set: &'w WordSet) -> Option<&'w Placement> {
        word_set
            .iter()
            .find(|placement| self.occurs_elsewhere(placement.word.chars(), &placement.path))
    }

    fn stopped(&self) -> bool {
        self.stop.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn occurs_elsewhere(&self, word: &[char], path: &Path) -> bool {
        let Some((&first, rest)) = word.split_first() else {
            return false;
        };

        self.board
            .points()
            .filter(|&p| self.board.at(p) == Some(first))
            .any(|start| self.has_collision(rest, path, start, !path.contains(start)))
    }

    /// Can `rest` be spelled starting next to `at`? Only walks that have left
    /// `path` somewhere count.
    fn has_collision(&self, rest: &[char], path: &Path, at: Point, off_path: bool) -> bool {
        if self.stopped() {
            return true;
        }
        let Some((&next, tail)) = rest.split_first() else {
            return off_path;
        };

        self.board
            .neighbors_with(at, next)
            .any(|p| self.has_collision(tail, path, p, off_path || !path.contains(p)))
    }
}
