//! Words, placement paths and finished puzzles
//!
//! A [`Puzzle`] is what a successful generation run produces: the filled
//! [`Board`] plus a [`WordSet`] recording where each word was placed.

pub mod dump;

use crate::board::{Board, Point};
use crate::error::Error;
use crate::search::Validator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A word to hide on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Word(Vec<char>);

impl Word {
    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Word {
    fn from(s: &str) -> Self {
        Word(s.chars().collect())
    }
}

impl From<String> for Word {
    fn from(s: String) -> Self {
        Word(s.chars().collect())
    }
}

impl From<Word> for String {
    fn from(w: Word) -> Self {
        w.0.into_iter().collect()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// The cells a word occupies, in letter order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Point>);

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Path(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.0.contains(&p)
    }

    /// Every consecutive pair of cells is king-adjacent.
    pub fn is_connected(&self) -> bool {
        self.0.windows(2).all(|pair| pair[0].is_adjacent(pair[1]))
    }
}

/// A word together with where it was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub word: Word,
    pub path: Path,
}

/// Placements in the order they were made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordSet(Vec<Placement>);

impl WordSet {
    pub fn with_capacity(capacity: usize) -> Self {
        WordSet(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, placement: Placement) {
        self.0.push(placement);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up the placement of a word.
    #[cfg(test)]
    pub fn find(&self, word: &Word) -> Option<&Placement> {
        self.0.iter().find(|p| &p.word == word)
    }
}

impl From<Vec<Placement>> for WordSet {
    fn from(placements: Vec<Placement>) -> Self {
        WordSet(placements)
    }
}

impl<'a> IntoIterator for &'a WordSet {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A finished board and the placements it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub board: Board,
    pub word_set: WordSet,
}

impl Puzzle {
    pub fn new(board: Board, word_set: WordSet) -> Self {
        Self { board, word_set }
    }

    /// The first word that can also be read somewhere other than its own
    /// path, if any.
    pub fn first_ambiguous(&self) -> Option<&Placement> {
        Validator::new(&self.board).first_ambiguous(&self.word_set)
    }

    /// True when no word can be read anywhere other than its own path.
    #[cfg(test)]
    pub fn is_unambiguous(&self) -> bool {
        self.first_ambiguous().is_none()
    }

    /// Check that every placement is well formed and agrees with the board:
    /// paths match their word's length, stay on the board, are king-connected,
    /// never share a cell, and spell their word.
    pub fn check_consistency(&self) -> Result<(), Error> {
        let mut used = HashSet::new();

        for placement in &self.word_set {
            let Placement { word, path } = placement;
            if word.is_empty() {
                return Err(Error::MalformedDump("empty word in word set".to_string()));
            }
            if path.len() != word.len() {
                return Err(Error::MalformedDump(format!(
                    "path for \"{}\" has {} cells, expected {}",
                    word,
                    path.len(),
                    word.len()
                )));
            }
            if !path.is_connected() {
                return Err(Error::MalformedDump(format!(
                    "path for \"{}\" is not connected",
                    word
                )));
            }

            for (&p, &c) in path.points().iter().zip(word.chars()) {
                if !self.board.contains(p) {
                    return Err(Error::MalformedDump(format!(
                        "path for \"{}\" leaves the board at {}",
                        word, p
                    )));
                }
                if self.board.at(p) != Some(c) {
                    return Err(Error::MalformedDump(format!(
                        "board has {:?} at {} but \"{}\" needs '{}'",
                        self.board.at(p),
                        p,
                        word,
                        c
                    )));
                }
                if !used.insert(p) {
                    return Err(Error::MalformedDump(format!(
                        "cell {} is used more than once",
                        p
                    )));
                }
            }
        }

        Ok(())
    }
}
