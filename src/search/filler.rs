//! Randomized word placement
//!
//! Places every word of a set onto an empty board by random walks:
//! 1. Shuffle the word order
//! 2. For each word, start on a uniformly chosen empty cell
//! 3. Step to a uniformly chosen empty neighbour for each further letter
//! 4. Give up on the whole attempt as soon as a walk gets stuck
//!
//! There is no backtracking. A stuck attempt is thrown away and the caller
//! starts over on a cleared board.

use crate::board::{Board, Point};
use crate::puzzle::{Path, Placement, Word, WordSet};
use rand::Rng;

/// Most candidates a single step can see: a full 3x3 neighbourhood.
const MAX_NEARBY_CELLS: usize = 9;

pub struct Filler<R: Rng> {
    rng: R,
    /// Cells written since the last reset.
    total_used: usize,
    // Scratch buffers reused across attempts.
    perm: Vec<usize>,
    candidates: Vec<Point>,
    path: Vec<Point>,
}

impl<R: Rng> Filler<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            total_used: 0,
            perm: Vec::new(),
            candidates: Vec::with_capacity(MAX_NEARBY_CELLS),
            path: Vec::new(),
        }
    }

    /// Forget the cells used by the previous attempt. Pair with `Board::reset`.
    pub fn reset(&mut self) {
        self.total_used = 0;
    }

    #[cfg(test)]
    pub fn total_used(&self) -> usize {
        self.total_used
    }

    /// Try to place all `words` on `board`, which must be empty.
    ///
    /// Returns `None` if any word could not be placed. The board is then left
    /// partially filled and both it and the filler must be reset before the
    /// next attempt.
    pub fn fill(&mut self, board: &mut Board, words: &[Word]) -> Option<WordSet> {
        self.shuffle_indices(words.len());

        let mut set = WordSet::with_capacity(words.len());
        for k in 0..words.len() {
            let word = &words[self.perm[k]];
            let path = self.place(board, word)?;
            set.push(Placement {
                word: word.clone(),
                path,
            });
        }

        Some(set)
    }

    fn place(&mut self, board: &mut Board, word: &Word) -> Option<Path> {
        let mut at = self.random_empty_cell(board)?;

        self.path.clear();
        for (i, &c) in word.chars().iter().enumerate() {
            self.write(board, at, c);
            self.path.push(at);

            if i + 1 < word.len() {
                at = self.random_empty_neighbor(board, at)?;
            }
        }

        Some(Path::new(self.path.clone()))
    }

    fn write(&mut self, board: &mut Board, p: Point, c: char) {
        self.total_used += 1;
        board.set(p, c);
    }

    /// Pick the k-th empty cell for a uniform k, scanning column by column.
    /// Costs one pass over the board instead of an unbounded rejection loop.
    fn random_empty_cell(&mut self, board: &Board) -> Option<Point> {
        let unused = board.capacity().saturating_sub(self.total_used);
        if unused == 0 {
            return None;
        }

        let target = self.rng.random_range(0..unused);
        let found = board.points().filter(|&p| board.is_empty_at(p)).nth(target);
        debug_assert!(found.is_some(), "used-cell count out of sync with board");
        found
    }

    fn random_empty_neighbor(&mut self, board: &Board, at: Point) -> Option<Point> {
        self.candidates.clear();
        self.candidates.extend(
            board
                .neighborhood(at)
                .points()
                .filter(|&p| board.is_empty_at(p)),
        );

        if self.candidates.is_empty() {
            return None;
        }
        let pick = self.rng.random_range(0..self.candidates.len());
        Some(self.candidates[pick])
    }

    /// Inside-out Fisher-Yates into the reused `perm` buffer.
    fn shuffle_indices(&mut self, n: usize) {
        self.perm.clear();
        self.perm.resize(n, 0);
        for i in 0..n {
            let j = self.rng.random_range(0..=i);
            self.perm[i] = self.perm[j];
            self.perm[j] = i;
        }
    }
}
