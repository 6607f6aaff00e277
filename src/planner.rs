//! Placement order derived from a depth-first walk of the word graph.

use crate::graph::WordGraph;

/// Returns every node of `graph` exactly once, starting at `start`.
///
/// Nodes are emitted in depth-first preorder following each node's edges
/// in insertion order. Nodes not reachable from `start` follow in
/// first-occurrence order.
///
/// Uses an explicit stack; children are pushed in reverse so they pop in
/// edge order, which reproduces the recursive visiting order.
pub fn placement_order(graph: &WordGraph, start: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(graph.len());
    let mut visited = vec![false; graph.len()];
    let mut stack = vec![start];

    while let Some(node) = stack.pop() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        order.push(node);

        for connection in graph.connections(node).iter().rev() {
            if !visited[connection.node] {
                stack.push(connection.node);
            }
        }
    }

    // disconnected remainder
    for node in 0..graph.len() {
        if !visited[node] {
            order.push(node);
        }
    }

    order
}
