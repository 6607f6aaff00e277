//! Crossword Layout Library
//!
//! Lays a fixed word list out on a letter grid, crossword style: every word
//! after the first crosses exactly one earlier word at one shared letter,
//! and no two words touch anywhere else. Generation is randomized with
//! whole-attempt restarts and is reproducible from a seed.

pub mod generator;
pub mod graph;
pub mod grid;
pub mod persistence;
pub mod planner;
pub mod words;

pub use generator::{GenerationError, GeneratorConfig, Layout, PuzzleGenerator};
pub use graph::WordGraph;
pub use grid::Grid;
pub use words::{Direction, PlacedWord};

use words::parse_word_list;

/// Generates a layout for `words` with the default configuration.
pub fn generate<S: AsRef<str>>(words: &[S]) -> Result<Layout, GenerationError> {
    generate_with(words, GeneratorConfig::default(), None)
}

/// Generates a layout for `words`, reproducibly when `seed` is given.
pub fn generate_with<S: AsRef<str>>(
    words: &[S],
    config: GeneratorConfig,
    seed: Option<u64>,
) -> Result<Layout, GenerationError> {
    let words = parse_word_list(words)?;
    let graph = WordGraph::build(&words);
    let generator = PuzzleGenerator::new(&graph).with_config(config);
    match seed {
        Some(seed) => generator.generate_with_seed(seed),
        None => generator.generate(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::{WordListError, WORD_LIST};

    #[test]
    fn test_generate_demo_list() {
        let layout = generate(WORD_LIST).unwrap();
        assert_eq!(layout.placed_words.len(), WORD_LIST.len());
        assert!(layout.bounds().is_some());
    }

    #[test]
    fn test_generate_normalizes_input() {
        let layout = generate_with(&["seat", "east"], GeneratorConfig::default(), Some(1)).unwrap();
        assert!(layout.placed_words.iter().all(|w| w.word == "SEAT" || w.word == "EAST"));
    }

    #[test]
    fn test_generate_rejects_bad_input() {
        let empty: [&str; 0] = [];
        assert_eq!(
            generate(&empty),
            Err(GenerationError::InvalidWordList(WordListError::Empty))
        );
        assert!(matches!(
            generate(&["TEA", "T-A"]),
            Err(GenerationError::InvalidWordList(WordListError::InvalidWord { .. }))
        ));
    }

    #[test]
    fn test_generate_is_reproducible() {
        let config = GeneratorConfig::default();
        assert_eq!(
            generate_with(WORD_LIST, config, Some(123)),
            generate_with(WORD_LIST, config, Some(123))
        );
    }
}
