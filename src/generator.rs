//! Randomized layout generation with whole-attempt restarts.
//!
//! An attempt sizes a fresh grid, derives a placement order from a random
//! start word, drops the first word near the center and then threads each
//! following word through a single letter of an already placed,
//! perpendicular word. Any word that cannot be placed abandons the attempt;
//! the generator then starts over from a blank grid until the attempt budget
//! runs out.
//!
//! All randomness comes from one `Pcg64` stream seeded per generation, so a
//! seed reproduces its layout exactly.

use std::fmt;

use log::{debug, info, trace};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::graph::WordGraph;
use crate::grid::{format_layout, group_by_start, start_label, Bounds, Grid};
use crate::planner::placement_order;
use crate::words::{Coord, Direction, PlacedWord, WordListError};

/// Default number of attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Default number of start cells tried for the first word of an attempt.
pub const DEFAULT_MAX_FIRST_WORD_TRIES: usize = 100;

/// Errors surfaced by generation.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum GenerationError {
    #[display("invalid word list: {_0}")]
    #[from]
    InvalidWordList(WordListError),
    #[display("no valid layout found after {attempts} attempts")]
    GenerationFailed { attempts: usize },
}

/// Tunables for [`PuzzleGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Attempts (fresh grids) before reporting [`GenerationError::GenerationFailed`].
    pub max_attempts: usize,
    /// Start cells tried for the first word before abandoning an attempt.
    pub max_first_word_tries: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_first_word_tries: DEFAULT_MAX_FIRST_WORD_TRIES,
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_first_word_tries(mut self, max_first_word_tries: usize) -> Self {
        self.max_first_word_tries = max_first_word_tries;
        self
    }
}

/// A finished layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Seed that reproduces this layout.
    pub seed: u64,
    /// Attempts used, counting the successful one.
    pub attempts: usize,
    pub grid: Grid,
    /// Words in placement order.
    pub placed_words: Vec<PlacedWord>,
}

impl Layout {
    /// Bounding box of the filled cells.
    pub fn bounds(&self) -> Option<Bounds> {
        self.grid.bounds()
    }

    /// Letter at `(x, y)`.
    pub fn cell(&self, x: i32, y: i32) -> Option<char> {
        self.grid.cell(x, y)
    }

    /// Number labels per start cell, e.g. `"1-3"` when words 1 and 3 start
    /// on the same cell.
    pub fn start_labels(&self) -> Vec<(Coord, String)> {
        group_by_start(&self.placed_words)
            .into_iter()
            .map(|(cell, words)| (cell, start_label(&words)))
            .collect()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_layout(&self.grid, &self.placed_words))
    }
}

/// Grid and placed words of the attempt in progress.
struct Attempt {
    grid: Grid,
    placed: Vec<PlacedWord>,
}

impl Attempt {
    fn new(size: usize, capacity: usize) -> Self {
        Self {
            grid: Grid::new(size),
            placed: Vec::with_capacity(capacity),
        }
    }

    fn commit(&mut self, word: PlacedWord) {
        self.grid.place(&word.word, word.start(), word.direction);
        trace!(
            "placed #{} {} {} at ({}, {})",
            word.order_number,
            word.word,
            word.direction,
            word.start_x,
            word.start_y
        );
        self.placed.push(word);
    }
}

/// Start cell for a word crossing `placed` so that the new word's letter
/// `new_index` lands on `placed`'s letter `placed_index`.
///
/// The new word runs perpendicular to `placed`.
pub fn crossing_start(placed: &PlacedWord, placed_index: usize, new_index: usize) -> Coord {
    let (placed_index, new_index) = (placed_index as i32, new_index as i32);
    match placed.direction {
        // new word is horizontal
        Direction::Vertical => (placed.start_x - new_index, placed.start_y + placed_index),
        // new word is vertical
        Direction::Horizontal => (placed.start_x + placed_index, placed.start_y - new_index),
    }
}

/// Generates layouts for one word graph.
pub struct PuzzleGenerator<'a> {
    graph: &'a WordGraph,
    config: GeneratorConfig,
}

impl<'a> PuzzleGenerator<'a> {
    pub fn new(graph: &'a WordGraph) -> Self {
        Self {
            graph,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Generates a layout from a fresh random seed.
    pub fn generate(&self) -> Result<Layout, GenerationError> {
        self.generate_with_seed(rand::random())
    }

    /// Generates the layout determined by `seed`.
    pub fn generate_with_seed(&self, seed: u64) -> Result<Layout, GenerationError> {
        let mut rng = Pcg64::seed_from_u64(seed);
        let (attempts, attempt) = self.run(&mut rng)?;
        info!(
            "placed {} words after {attempts} attempt(s) (seed {seed})",
            attempt.placed.len()
        );
        Ok(Layout {
            seed,
            attempts,
            grid: attempt.grid,
            placed_words: attempt.placed,
        })
    }

    /// Runs attempts until one succeeds or the budget is spent.
    fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<(usize, Attempt), GenerationError> {
        if self.graph.is_empty() {
            return Err(WordListError::Empty.into());
        }

        for number in 1..=self.config.max_attempts {
            match self.attempt(rng) {
                Some(attempt) => return Ok((number, attempt)),
                None => debug!("attempt {number} failed; restarting from a blank grid"),
            }
        }

        Err(GenerationError::GenerationFailed {
            attempts: self.config.max_attempts,
        })
    }

    /// One full attempt; `None` when some word could not be placed.
    fn attempt<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Attempt> {
        let size = Grid::size_for_letters(self.graph.letter_count());
        let mut attempt = Attempt::new(size, self.graph.len());

        let entries = self.graph.entries();
        let start = entries[rng.random_range(0..entries.len())];
        let order = placement_order(self.graph, start);
        debug!(
            "grid {size}x{size}, placement order: {}",
            order
                .iter()
                .map(|&node| self.graph.word(node))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let first = self.place_first(&attempt.grid, order[0], rng)?;
        attempt.commit(first);

        for (i, &node) in order.iter().enumerate().skip(1) {
            let Some(word) = self.place_next(&attempt, node, i + 1, rng) else {
                debug!("no legal placement for {}", self.graph.word(node));
                return None;
            };
            attempt.commit(word);
        }

        Some(attempt)
    }

    /// Picks a direction at random and a start cell near the center,
    /// resampling uniformly among in-bounds cells until one is accepted.
    fn place_first<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        node: usize,
        rng: &mut R,
    ) -> Option<PlacedWord> {
        let word = self.graph.word(node);
        let len = word.chars().count();
        let size = grid.size();
        if len > size {
            return None;
        }

        let direction = if rng.random_bool(0.5) {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };
        let center = (size / 2) as i32;
        let mut start = (center, center);
        let slack = (size - len) as i32;

        for _ in 0..self.config.max_first_word_tries {
            match grid.check_placement(word, start, direction, None) {
                Ok(()) => return Some(PlacedWord::new(word, start, direction, 1)),
                Err(rejection) => trace!("first word {word} at {start:?}: {rejection}"),
            }
            start = match direction {
                Direction::Horizontal => (
                    rng.random_range(0..=slack),
                    rng.random_range(0..size as i32),
                ),
                Direction::Vertical => (
                    rng.random_range(0..size as i32),
                    rng.random_range(0..=slack),
                ),
            };
        }

        None
    }

    /// Searches directions, then perpendicular placed words in random order,
    /// then their shared letters in random order, for the first accepted
    /// crossing.
    fn place_next<R: Rng + ?Sized>(
        &self,
        attempt: &Attempt,
        node: usize,
        order_number: usize,
        rng: &mut R,
    ) -> Option<PlacedWord> {
        let word = self.graph.word(node);
        let last = attempt.placed.last()?.direction;

        for direction in [last.opposite(), last] {
            let mut neighbors: Vec<&PlacedWord> = attempt
                .placed
                .iter()
                .filter(|placed| placed.direction != direction)
                .collect();
            neighbors.shuffle(rng);

            for neighbor in neighbors {
                let Some(connection) = self
                    .graph
                    .node(&neighbor.word)
                    .and_then(|other| self.graph.connection(node, other))
                else {
                    continue;
                };

                let mut points = connection.intersections.clone();
                points.shuffle(rng);
                for point in points {
                    let start = crossing_start(neighbor, point.second, point.first);
                    match attempt
                        .grid
                        .check_placement(word, start, direction, Some(neighbor))
                    {
                        Ok(()) => {
                            return Some(PlacedWord::new(word, start, direction, order_number))
                        }
                        Err(rejection) => trace!(
                            "{word} {direction} at {start:?} via {} '{}': {rejection}",
                            neighbor.word,
                            point.letter
                        ),
                    }
                }
            }
        }

        None
    }
}
