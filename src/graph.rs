//! Letter-sharing graph over the word list.
//!
//! Every distinct word is a node. Two nodes are connected when the words
//! share at least one letter, and each edge carries every position pair
//! where they do. Edges are stored on both endpoints with the indices
//! swapped, in the order the pairs were discovered, so traversal order is
//! reproducible.

use std::fmt::Write as _;

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::words::IntersectionPoint;

/// Finds every `(i, j)` with `first[i] == second[j]`.
///
/// Points are ordered by `i`, then `j`.
pub fn find_all_intersections(first: &str, second: &str) -> Vec<IntersectionPoint> {
    let mut intersections = Vec::new();
    for (i, a) in first.chars().enumerate() {
        for (j, b) in second.chars().enumerate() {
            if a == b {
                intersections.push(IntersectionPoint {
                    first: i,
                    second: j,
                    letter: a,
                });
            }
        }
    }
    intersections
}

/// Edge from one word to another it shares letters with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Node index of the connected word.
    pub node: usize,
    /// Shared positions, relative to the owning word first.
    pub intersections: Vec<IntersectionPoint>,
}

/// Immutable word graph, built once per word list.
#[derive(Debug, Clone)]
pub struct WordGraph {
    words: Vec<String>,
    index: FxHashMap<String, usize>,
    connections: Vec<Vec<Connection>>,
    /// Node of every input entry, duplicates included.
    entries: Vec<usize>,
    /// Letters across all input entries, duplicates included.
    letter_count: usize,
}

impl WordGraph {
    /// Builds the graph for `words`. Repeated words share one node.
    pub fn build<S: AsRef<str>>(words: &[S]) -> Self {
        let mut nodes: Vec<String> = Vec::with_capacity(words.len());
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        let mut entries = Vec::with_capacity(words.len());
        let mut letter_count = 0;
        for word in words {
            let word = word.as_ref();
            letter_count += word.chars().count();
            let node = match index.get(word) {
                Some(&node) => node,
                None => {
                    index.insert(word.to_string(), nodes.len());
                    nodes.push(word.to_string());
                    nodes.len() - 1
                }
            };
            entries.push(node);
        }

        let mut connections: Vec<Vec<Connection>> = vec![Vec::new(); nodes.len()];
        for a in 0..nodes.len() {
            for b in a + 1..nodes.len() {
                let intersections = find_all_intersections(&nodes[a], &nodes[b]);
                if intersections.is_empty() {
                    continue;
                }
                let mirrored = intersections.iter().map(|p| p.mirrored()).collect();
                connections[a].push(Connection {
                    node: b,
                    intersections,
                });
                connections[b].push(Connection {
                    node: a,
                    intersections: mirrored,
                });
            }
        }

        let graph = Self {
            words: nodes,
            index,
            connections,
            entries,
            letter_count,
        };
        if graph.len() > 1 {
            for node in graph.isolated_nodes() {
                warn!(
                    "{} shares no letters with any other word; no layout can place it",
                    graph.words[node]
                );
            }
        }
        debug!("word graph:\n{}", graph.format());
        graph
    }

    /// Number of distinct words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Distinct words in first-occurrence order.
    #[inline]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[inline]
    pub fn word(&self, node: usize) -> &str {
        &self.words[node]
    }

    /// Node of each word in the input list, in input order.
    #[inline]
    pub fn entries(&self) -> &[usize] {
        &self.entries
    }

    /// Total letters in the input list.
    #[inline]
    pub fn letter_count(&self) -> usize {
        self.letter_count
    }

    /// Node index of `word`, if it is in the graph.
    #[inline]
    pub fn node(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// All edges of `node`, in insertion order.
    #[inline]
    pub fn connections(&self, node: usize) -> &[Connection] {
        &self.connections[node]
    }

    /// The edge from `from` to `to`, if the two words share a letter.
    pub fn connection(&self, from: usize, to: usize) -> Option<&Connection> {
        self.connections[from].iter().find(|c| c.node == to)
    }

    /// Nodes with no edges at all.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&node| self.connections[node].is_empty())
    }

    /// Formats the graph as one block per word listing its edges.
    ///
    /// ```text
    /// TEA
    ///   -> EAT via T 0/2, E 1/0, A 2/1
    /// ```
    pub fn format(&self) -> String {
        let mut output = String::new();
        for (node, word) in self.words.iter().enumerate() {
            let _ = writeln!(output, "{word}");
            for connection in &self.connections[node] {
                let points: Vec<String> = connection
                    .intersections
                    .iter()
                    .map(|p| format!("{} {}/{}", p.letter, p.first, p.second))
                    .collect();
                let _ = writeln!(
                    output,
                    "  -> {} via {}",
                    self.words[connection.node],
                    points.join(", ")
                );
            }
        }
        output
    }
}
