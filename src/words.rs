//! Word list input and the placement-level word types.
//!
//! Words are upper-case alphabetic strings. Positions inside a word are
//! character indices, and grid coordinates are signed so that candidate
//! start cells computed off the edge of the grid can be represented and
//! rejected by the bounds check.

use serde::{Deserialize, Serialize};

/// The demo word list used when no words are supplied.
pub const WORD_LIST: &[&str] = &["SEAT", "EAST", "TEA", "SET", "EAT"];

/// A grid coordinate `(x, y)`; `x` grows to the right, `y` grows downward.
pub type Coord = (i32, i32);

/// Errors raised while normalizing a word list.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum WordListError {
    #[display("word list is empty")]
    Empty,
    #[display("invalid word {word:?}: words must be non-empty and alphabetic")]
    InvalidWord { word: String },
}

/// Trims and upper-cases every word, rejecting empty or non-alphabetic ones.
///
/// Duplicates are kept; the word graph folds them onto a single node.
pub fn parse_word_list<S: AsRef<str>>(words: &[S]) -> Result<Vec<String>, WordListError> {
    if words.is_empty() {
        return Err(WordListError::Empty);
    }

    words
        .iter()
        .map(|word| {
            let word = word.as_ref().trim();
            if word.is_empty() || !word.chars().all(char::is_alphabetic) {
                return Err(WordListError::InvalidWord {
                    word: word.to_string(),
                });
            }
            Ok(word.to_uppercase())
        })
        .collect()
}

/// Axis along which a word's letters are laid out.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Direction {
    #[display("across")]
    Horizontal,
    #[display("down")]
    Vertical,
}

impl Direction {
    /// Returns the perpendicular direction.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Unit step `(dx, dy)` along this direction.
    #[inline]
    pub const fn step(self) -> Coord {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
        }
    }

    /// Cell holding the letter at `offset` of a word starting at `start`.
    #[inline]
    pub const fn cell_at(self, start: Coord, offset: i32) -> Coord {
        let (dx, dy) = self.step();
        (start.0 + dx * offset, start.1 + dy * offset)
    }
}

/// A shared letter between two words.
///
/// `first` indexes into the word the point was computed for, `second` into
/// the other word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntersectionPoint {
    pub first: usize,
    pub second: usize,
    pub letter: char,
}

impl IntersectionPoint {
    /// The same point seen from the other word.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
            letter: self.letter,
        }
    }
}

/// A word committed to the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub start_x: i32,
    pub start_y: i32,
    pub direction: Direction,
    /// 1-based position in the sequence of successful placements.
    pub order_number: usize,
}

impl PlacedWord {
    pub fn new(
        word: impl Into<String>,
        start: Coord,
        direction: Direction,
        order_number: usize,
    ) -> Self {
        Self {
            word: word.into(),
            start_x: start.0,
            start_y: start.1,
            direction,
            order_number,
        }
    }

    #[inline]
    pub fn start(&self) -> Coord {
        (self.start_x, self.start_y)
    }

    /// Number of letters in the word.
    #[inline]
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Returns the cells covered by this word, in letter order.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.len() as i32).map(|offset| self.direction.cell_at(self.start(), offset))
    }

    /// Returns true if `(x, y)` is one of this word's cells.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let len = self.len() as i32;
        match self.direction {
            Direction::Horizontal => {
                y == self.start_y && x >= self.start_x && x < self.start_x + len
            }
            Direction::Vertical => x == self.start_x && y >= self.start_y && y < self.start_y + len,
        }
    }
}
