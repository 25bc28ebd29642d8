//! Fixed-capacity letter grid
//!
//! The board stores at most `MAX_WIDTH x MAX_HEIGHT` cells inline so workers
//! can reset it between attempts without reallocating. Coordinates are kept
//! in a single byte per axis.

pub mod render;

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest supported board width.
pub const MAX_WIDTH: usize = 10;
/// Largest supported board height.
pub const MAX_HEIGHT: usize = 10;

/// Coordinate component. Widen this if boards larger than 10x10 are needed.
pub type Unit = u8;

/// A cell coordinate, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Unit; 2]", into = "[Unit; 2]")]
pub struct Point {
    pub x: Unit,
    pub y: Unit,
}

impl Point {
    pub const fn new(x: Unit, y: Unit) -> Self {
        Self { x, y }
    }

    /// King-move adjacency: at most one step on each axis, and not the same cell.
    pub fn is_adjacent(&self, other: Point) -> bool {
        *self != other && self.x.abs_diff(other.x) <= 1 && self.y.abs_diff(other.y) <= 1
    }
}

impl From<[Unit; 2]> for Point {
    fn from([x, y]: [Unit; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Point> for [Unit; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Iterate the rectangle's coordinates column by column (x outer, y inner).
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let Rect { min, max } = *self;
        (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |y| Point::new(x, y)))
    }
}

/// A word-search board: `width x height` cells, each empty or holding one letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: Unit,
    height: Unit,
    cells: [[Option<char>; MAX_HEIGHT]; MAX_WIDTH],
}

impl Board {
    /// Create an empty board.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        if !(1..=MAX_WIDTH).contains(&width) || !(1..=MAX_HEIGHT).contains(&height) {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Self {
            width: width as Unit,
            height: height as Unit,
            cells: [[None; MAX_HEIGHT]; MAX_WIDTH],
        })
    }

    pub fn width(&self) -> Unit {
        self.width
    }

    pub fn height(&self) -> Unit {
        self.height
    }

    /// Total number of cells.
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    pub fn at(&self, p: Point) -> Option<char> {
        debug_assert!(self.contains(p), "point {} is off the board", p);
        self.cells[p.x as usize][p.y as usize]
    }

    pub fn is_empty_at(&self, p: Point) -> bool {
        self.at(p).is_none()
    }

    pub fn set(&mut self, p: Point, c: char) {
        debug_assert!(self.contains(p), "point {} is off the board", p);
        self.cells[p.x as usize][p.y as usize] = Some(c);
    }

    /// Clear every cell.
    pub fn reset(&mut self) {
        self.cells = [[None; MAX_HEIGHT]; MAX_WIDTH];
    }

    /// The whole board as a rectangle.
    pub fn bounds(&self) -> Rect {
        Rect {
            min: Point::new(0, 0),
            max: Point::new(self.width - 1, self.height - 1),
        }
    }

    /// All coordinates, column by column.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        self.bounds().points()
    }

    /// The 3x3 box centred on `p`, clipped to the board. Includes `p` itself.
    pub fn neighborhood(&self, p: Point) -> Rect {
        Rect {
            min: Point::new(p.x.saturating_sub(1), p.y.saturating_sub(1)),
            max: Point::new(
                (p.x + 1).min(self.width - 1),
                (p.y + 1).min(self.height - 1),
            ),
        }
    }

    /// Coordinates king-adjacent to `p` that hold `c`.
    pub fn neighbors_with(&self, p: Point, c: char) -> impl Iterator<Item = Point> + '_ {
        self.neighborhood(p)
            .points()
            .filter(move |&n| n != p && self.at(n) == Some(c))
    }

    /// Number of filled cells.
    pub fn filled(&self) -> usize {
        self.points().filter(|&p| !self.is_empty_at(p)).count()
    }
}
