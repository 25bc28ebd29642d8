//! JSON dump of a finished puzzle, for printing and offline re-validation.
//!
//! ```json
//! {"width":3,"height":2,
//!  "rows":[["c","a",null],["t",null,null]],
//!  "words":[{"word":"cat","path":[[0,0],[1,0],[0,1]]}]}
//! ```
//!
//! `rows[y][x]` holds the cell at `(x, y)`.

use super::{Puzzle, WordSet};
use crate::board::{Board, Point, Unit};
use crate::error::Error;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Dump {
    width: usize,
    height: usize,
    rows: Vec<Vec<Option<char>>>,
    words: WordSet,
}

impl Puzzle {
    /// Encode as compact JSON.
    pub fn to_dump(&self) -> Result<String, Error> {
        let board = &self.board;
        let rows = (0..board.height())
            .map(|y| {
                (0..board.width())
                    .map(|x| board.at(Point::new(x, y)))
                    .collect()
            })
            .collect();

        let dump = Dump {
            width: board.width() as usize,
            height: board.height() as usize,
            rows,
            words: self.word_set.clone(),
        };
        Ok(serde_json::to_string(&dump)?)
    }

    /// Decode a dump and check it describes a consistent puzzle.
    pub fn from_dump(json: &str) -> Result<Puzzle, Error> {
        let dump: Dump = serde_json::from_str(json.trim())?;
        let mut board = Board::new(dump.width, dump.height)?;

        if dump.rows.len() != dump.height {
            return Err(Error::MalformedDump(format!(
                "expected {} rows, found {}",
                dump.height,
                dump.rows.len()
            )));
        }
        for (y, row) in dump.rows.iter().enumerate() {
            if row.len() != dump.width {
                return Err(Error::MalformedDump(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    dump.width
                )));
            }
            for (x, cell) in row.iter().enumerate() {
                if let Some(c) = cell {
                    board.set(Point::new(x as Unit, y as Unit), *c);
                }
            }
        }

        let puzzle = Puzzle::new(board, dump.words);
        puzzle.check_consistency()?;
        Ok(puzzle)
    }
}
