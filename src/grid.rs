//! Square letter grid and the placement rules.
//!
//! Cells are stored row-major in a flat vector, `None` for empty. The grid
//! is sized once per attempt to `floor(1.5 * total letters)` and is only
//! ever written by committed placements.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::words::{Coord, Direction, PlacedWord};

/// Why a candidate placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Rejection {
    #[display("word does not fit inside the grid")]
    OutOfBounds,
    #[display("conflicting letter at ({x}, {y})")]
    LetterConflict { x: i32, y: i32 },
    #[display("new letter at ({x}, {y}) touches a neighboring letter")]
    PerpendicularContact { x: i32, y: i32 },
    #[display("word would run into the letter at ({x}, {y})")]
    Concatenation { x: i32, y: i32 },
    #[display("word crosses {count} existing letters")]
    AmbiguousIntersection { count: usize },
    #[display("word crosses a word other than its target")]
    WrongNeighbor,
    #[display("word does not cross any placed word")]
    Disconnected,
    #[display("word is entirely covered by placed words")]
    Embedded,
}

/// Inclusive bounding box of the filled cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }
}

/// Attempt-scoped letter grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<char>>,
    /// Number of words committed so far.
    word_count: usize,
}

impl Grid {
    /// Creates an empty `size x size` grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            word_count: 0,
        }
    }

    /// Side length for a word list: one and a half times its letter count.
    pub fn size_for_letters(letters: usize) -> usize {
        letters * 3 / 2
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    #[inline]
    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds((x, y)).then(|| y as usize * self.size + x as usize)
    }

    /// Letter at `(x, y)`; `None` for empty or out-of-range cells.
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    #[inline]
    fn is_filled(&self, (x, y): Coord) -> bool {
        self.cell(x, y).is_some()
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<char>]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Validates placing `word` at `start` along `direction`.
    ///
    /// Rules, checked in order:
    /// 1. every letter lies inside the grid;
    /// 2. filled cells already hold the matching letter;
    /// 3. cells the word newly fills have empty perpendicular neighbors;
    /// 4. the cells just before and just after the word are empty;
    /// 5. with a `target`, the word crosses exactly one filled cell at most,
    ///    and that cell belongs to `target`;
    /// 6. once any word is placed, the word crosses at least one filled cell
    ///    and fills at least one empty one.
    pub fn check_placement(
        &self,
        word: &str,
        start: Coord,
        direction: Direction,
        target: Option<&PlacedWord>,
    ) -> Result<(), Rejection> {
        let letters: Vec<char> = word.chars().collect();
        let len = letters.len() as i32;
        if len == 0 || !self.in_bounds(start) || !self.in_bounds(direction.cell_at(start, len - 1))
        {
            return Err(Rejection::OutOfBounds);
        }

        let mut crossings = 0;
        let mut crossings_on_target = 0;
        for (offset, &letter) in letters.iter().enumerate() {
            let (x, y) = direction.cell_at(start, offset as i32);
            match self.cell(x, y) {
                Some(existing) if existing != letter => {
                    return Err(Rejection::LetterConflict { x, y });
                }
                Some(_) => {
                    crossings += 1;
                    if target.is_some_and(|t| t.contains(x, y)) {
                        crossings_on_target += 1;
                    }
                }
                None => {}
            }
        }

        let (px, py) = direction.opposite().step();
        for offset in 0..len {
            let (x, y) = direction.cell_at(start, offset);
            if self.is_filled((x, y)) {
                continue;
            }
            if self.is_filled((x - px, y - py)) || self.is_filled((x + px, y + py)) {
                return Err(Rejection::PerpendicularContact { x, y });
            }
        }

        for (x, y) in [direction.cell_at(start, -1), direction.cell_at(start, len)] {
            if self.is_filled((x, y)) {
                return Err(Rejection::Concatenation { x, y });
            }
        }

        if target.is_some() {
            if crossings > 1 {
                return Err(Rejection::AmbiguousIntersection { count: crossings });
            }
            if crossings == 1 && crossings_on_target == 0 {
                return Err(Rejection::WrongNeighbor);
            }
        }

        if self.word_count > 0 {
            if crossings == 0 {
                return Err(Rejection::Disconnected);
            }
            if crossings == letters.len() {
                return Err(Rejection::Embedded);
            }
        }

        Ok(())
    }

    /// Boolean form of [`Grid::check_placement`].
    #[inline]
    pub fn can_place(
        &self,
        word: &str,
        start: Coord,
        direction: Direction,
        target: Option<&PlacedWord>,
    ) -> bool {
        self.check_placement(word, start, direction, target).is_ok()
    }

    /// Writes `word` into the grid without validation.
    ///
    /// Callers check the placement first; letters falling outside the grid
    /// are dropped.
    pub fn place(&mut self, word: &str, start: Coord, direction: Direction) {
        for (offset, letter) in word.chars().enumerate() {
            let (x, y) = direction.cell_at(start, offset as i32);
            debug_assert!(self.in_bounds((x, y)), "placing {word} off the grid");
            if let Some(i) = self.index(x, y) {
                self.cells[i] = Some(letter);
            }
        }
        self.word_count += 1;
    }

    /// Bounding box of all filled cells, or `None` for an empty grid.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for (y, row) in self.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.is_none() {
                    continue;
                }
                bounds = Some(match bounds {
                    None => Bounds {
                        min_x: x,
                        max_x: x,
                        min_y: y,
                        max_y: y,
                    },
                    Some(b) => Bounds {
                        min_x: b.min_x.min(x),
                        max_x: b.max_x.max(x),
                        min_y: b.min_y.min(y),
                        max_y: b.max_y.max(y),
                    },
                });
            }
        }
        bounds
    }
}

/// Groups placed words by start cell.
///
/// Groups appear in order of their lowest order number; words inside a group
/// are sorted by order number. Two words may legitimately share a start cell
/// when they cross at their first letters.
pub fn group_by_start(placed_words: &[PlacedWord]) -> Vec<(Coord, Vec<&PlacedWord>)> {
    let mut sorted: Vec<&PlacedWord> = placed_words.iter().collect();
    sorted.sort_by_key(|word| word.order_number);

    let mut groups: Vec<(Coord, Vec<&PlacedWord>)> = Vec::new();
    let mut group_of: FxHashMap<Coord, usize> = FxHashMap::default();
    for word in sorted {
        match group_of.get(&word.start()) {
            Some(&i) => groups[i].1.push(word),
            None => {
                group_of.insert(word.start(), groups.len());
                groups.push((word.start(), vec![word]));
            }
        }
    }
    groups
}

/// Label for a start cell: its order numbers joined with `-`.
pub fn start_label(words: &[&PlacedWord]) -> String {
    words
        .iter()
        .map(|word| word.order_number.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Formats a layout as text.
///
/// The filled area is cropped to its bounding box with `.` for empty cells,
/// followed by one line per start cell.
pub fn format_layout(grid: &Grid, placed_words: &[PlacedWord]) -> String {
    let mut output = String::new();

    if let Some(bounds) = grid.bounds() {
        for y in bounds.min_y..=bounds.max_y {
            for x in bounds.min_x..=bounds.max_x {
                output.push(grid.cell(x as i32, y as i32).unwrap_or('.'));
            }
            output.push('\n');
        }
    }

    if !placed_words.is_empty() {
        output.push('\n');
    }
    for ((x, y), words) in group_by_start(placed_words) {
        let entries: Vec<String> = words
            .iter()
            .map(|word| format!("{} {}", word.word, word.direction))
            .collect();
        let _ = writeln!(
            output,
            "{} ({x}, {y}) {}",
            start_label(&words),
            entries.join(", ")
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::words::Direction::{Horizontal, Vertical};

    /// Grid with SEAT across at (0, 1), as the first placed word.
    fn grid_with_seat() -> (Grid, PlacedWord) {
        let mut grid = Grid::new(8);
        let seat = PlacedWord::new("SEAT", (0, 1), Horizontal, 1);
        grid.place(&seat.word, seat.start(), seat.direction);
        (grid, seat)
    }

    #[test]
    fn test_size_for_letters() {
        assert_eq!(Grid::size_for_letters(3), 4);
        assert_eq!(Grid::size_for_letters(17), 25);
        assert_eq!(Grid::size_for_letters(1), 1);
    }

    #[test]
    fn test_empty_grid_accepts_anything_in_bounds() {
        let grid = Grid::new(4);
        assert!(grid.can_place("ABC", (0, 0), Horizontal, None));
        assert!(grid.can_place("ABC", (1, 3), Horizontal, None));
        assert!(grid.can_place("ABCD", (3, 0), Vertical, None));
        assert_eq!(grid.bounds(), None);
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let grid = Grid::new(4);
        assert_eq!(
            grid.check_placement("ABC", (2, 0), Horizontal, None),
            Err(Rejection::OutOfBounds)
        );
        assert_eq!(
            grid.check_placement("ABC", (-1, 0), Horizontal, None),
            Err(Rejection::OutOfBounds)
        );
        assert_eq!(
            grid.check_placement("ABC", (0, 4), Horizontal, None),
            Err(Rejection::OutOfBounds)
        );
        assert_eq!(
            grid.check_placement("ABC", (0, 2), Vertical, None),
            Err(Rejection::OutOfBounds)
        );
    }

    #[test]
    fn test_accepts_single_crossing_on_target() {
        let (grid, seat) = grid_with_seat();
        assert_eq!(
            grid.check_placement("EAST", (1, 1), Vertical, Some(&seat)),
            Ok(())
        );
    }

    #[test]
    fn test_rejects_conflicting_letter() {
        let (grid, seat) = grid_with_seat();
        assert_eq!(
            grid.check_placement("TEA", (0, 0), Vertical, Some(&seat)),
            Err(Rejection::LetterConflict { x: 0, y: 1 })
        );
    }

    #[test]
    fn test_rejects_perpendicular_contact() {
        let (grid, _) = grid_with_seat();
        assert_eq!(
            grid.check_placement("EAT", (0, 2), Horizontal, None),
            Err(Rejection::PerpendicularContact { x: 0, y: 2 })
        );
    }

    #[test]
    fn test_rejects_concatenation() {
        let (grid, _) = grid_with_seat();
        assert_eq!(
            grid.check_placement("TEA", (4, 1), Horizontal, None),
            Err(Rejection::Concatenation { x: 3, y: 1 })
        );
        assert_eq!(
            grid.check_placement("ATE", (3, 2), Vertical, None),
            Err(Rejection::Concatenation { x: 3, y: 1 })
        );
    }

    #[test]
    fn test_rejects_two_crossings() {
        let mut grid = Grid::new(8);
        let seat = PlacedWord::new("SEAT", (0, 0), Horizontal, 1);
        grid.place(&seat.word, seat.start(), seat.direction);
        grid.place("EAT", (0, 2), Horizontal);
        assert_eq!(
            grid.check_placement("SEE", (0, 0), Vertical, Some(&seat)),
            Err(Rejection::AmbiguousIntersection { count: 2 })
        );
    }

    #[test]
    fn test_rejects_crossing_the_wrong_word() {
        let mut grid = Grid::new(8);
        let seat = PlacedWord::new("SEAT", (0, 0), Horizontal, 1);
        let tea = PlacedWord::new("TEA", (3, 0), Vertical, 2);
        grid.place(&seat.word, seat.start(), seat.direction);
        grid.place(&tea.word, tea.start(), tea.direction);

        assert_eq!(
            grid.check_placement("EAT", (3, 1), Horizontal, Some(&seat)),
            Err(Rejection::WrongNeighbor)
        );
        assert_eq!(
            grid.check_placement("EAT", (3, 1), Horizontal, Some(&tea)),
            Ok(())
        );
    }

    #[test]
    fn test_rejects_disconnected_word() {
        let (grid, _) = grid_with_seat();
        assert_eq!(
            grid.check_placement("TEA", (0, 4), Horizontal, None),
            Err(Rejection::Disconnected)
        );
    }

    #[test]
    fn test_rejects_embedded_word() {
        let (grid, _) = grid_with_seat();
        assert_eq!(
            grid.check_placement("SEAT", (0, 1), Horizontal, None),
            Err(Rejection::Embedded)
        );
    }

    #[test]
    fn test_shared_start_cell_is_allowed() {
        let mut grid = Grid::new(8);
        let seat = PlacedWord::new("SEAT", (0, 0), Horizontal, 1);
        grid.place(&seat.word, seat.start(), seat.direction);
        assert!(grid.can_place("SET", (0, 0), Vertical, Some(&seat)));
    }

    #[test]
    fn test_bounds() {
        let (mut grid, _) = grid_with_seat();
        grid.place("EAST", (1, 1), Vertical);
        let bounds = grid.bounds().unwrap();
        assert_eq!(
            bounds,
            Bounds {
                min_x: 0,
                max_x: 3,
                min_y: 1,
                max_y: 4
            }
        );
        assert_eq!(bounds.width(), 4);
        assert_eq!(bounds.height(), 4);
        assert_eq!(grid.word_count(), 2);
    }

    #[test]
    fn test_cell_lookup() {
        let (grid, _) = grid_with_seat();
        assert_eq!(grid.cell(0, 1), Some('S'));
        assert_eq!(grid.cell(3, 1), Some('T'));
        assert_eq!(grid.cell(4, 1), None);
        assert_eq!(grid.cell(-1, 1), None);
        assert_eq!(grid.cell(0, 8), None);
        let row: Vec<Option<char>> = grid.rows().nth(1).unwrap()[..5].to_vec();
        assert_eq!(row, vec![Some('S'), Some('E'), Some('A'), Some('T'), None]);
    }

    #[test]
    fn test_format_layout() {
        let (mut grid, seat) = grid_with_seat();
        let east = PlacedWord::new("EAST", (1, 1), Vertical, 2);
        grid.place(&east.word, east.start(), east.direction);

        insta::assert_snapshot!(format_layout(&grid, &[seat, east]).trim_end(), @r"
        SEAT
        .A..
        .S..
        .T..

        1 (0, 1) SEAT across
        2 (1, 1) EAST down
        ");
    }

    #[test]
    fn test_group_by_start_merges_shared_cells() {
        let words = vec![
            PlacedWord::new("SET", (0, 0), Vertical, 3),
            PlacedWord::new("SEAT", (0, 0), Horizontal, 1),
            PlacedWord::new("EAST", (1, 0), Vertical, 2),
        ];
        let groups = group_by_start(&words);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, (0, 0));
        assert_eq!(start_label(&groups[0].1), "1-3");
        assert_eq!(start_label(&groups[1].1), "2");
    }
}
