//! Predicate-driven breadth-first search over a document tree
//!
//! The matcher knows nothing about HTML: it walks any [`DomNode`] tree level by
//! level, left to right, and keeps every node the predicate accepts.

use std::collections::VecDeque;

use crate::domain::document::DomNode;

/// Collect every node under `root` (inclusive) for which `predicate` holds.
///
/// Results are in breadth-first order. An absent root or an absent predicate
/// yields an empty result rather than an error.
pub fn find_matching_nodes<N, P>(root: Option<N>, predicate: Option<P>) -> Vec<N>
where
    N: DomNode,
    P: Fn(&N) -> bool,
{
    match (root, predicate) {
        (Some(root), Some(predicate)) => {
            breadth_first_matches(root, &predicate, || false).unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

/// Same traversal as [`find_matching_nodes`], but `should_stop` is consulted
/// before every node visit. Returns `None` when the walk was interrupted.
pub fn find_matching_nodes_until<N, P, S>(root: Option<N>, predicate: P, should_stop: S) -> Option<Vec<N>>
where
    N: DomNode,
    P: Fn(&N) -> bool,
    S: FnMut() -> bool,
{
    match root {
        Some(root) => breadth_first_matches(root, &predicate, should_stop),
        None => Some(Vec::new()),
    }
}

fn breadth_first_matches<N, P, S>(root: N, predicate: &P, mut should_stop: S) -> Option<Vec<N>>
where
    N: DomNode,
    P: Fn(&N) -> bool,
    S: FnMut() -> bool,
{
    let mut matches = Vec::new();
    let mut to_visit = VecDeque::from([root]);

    while let Some(node) = to_visit.pop_front() {
        if should_stop() {
            return None;
        }
        if predicate(&node) {
            matches.push(node.clone());
        }
        to_visit.extend(node.children());
    }

    Some(matches)
}
