//! Fixed-length simple path enumeration over the topology graph.
//!
//! Bonds, angles and dihedrals are the simple paths of two, three and four
//! beads. A path and its exact reversal describe the same interaction, so
//! the aggregated sets keep only the first orientation found, using the
//! lexicographically smaller orientation as the hash key.

use super::graph::TopologyGraph;
use std::collections::HashSet;

/// Bond, angle and dihedral paths of a chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermPaths {
    pub bonds: Vec<[usize; 2]>,
    pub angles: Vec<[usize; 3]>,
    pub dihedrals: Vec<[usize; 4]>,
}

/// Enumerates every bond, angle and dihedral path of `graph`.
pub fn enumerate_terms(graph: &TopologyGraph) -> TermPaths {
    TermPaths {
        bonds: enumerate_paths::<2>(graph),
        angles: enumerate_paths::<3>(graph),
        dihedrals: enumerate_paths::<4>(graph),
    }
}

/// All simple paths of `N` beads starting at `start`.
///
/// Paths are produced depth-first, visiting neighbors in ascending index
/// order. A path and its reversal may both appear here when `start` is an
/// endpoint of a palindromic walk; deduplication is the job of
/// [`enumerate_paths`].
pub fn paths_from<const N: usize>(graph: &TopologyGraph, start: usize) -> Vec<[usize; N]> {
    let mut out = Vec::new();
    if N == 0 || start >= graph.bead_count() {
        return out;
    }

    let mut path = Vec::with_capacity(N);
    path.push(start);
    extend(graph, &mut path, &mut out);
    out
}

fn extend<const N: usize>(
    graph: &TopologyGraph,
    path: &mut Vec<usize>,
    out: &mut Vec<[usize; N]>,
) {
    if path.len() == N {
        let mut term = [0; N];
        term.copy_from_slice(path.as_slice());
        out.push(term);
        return;
    }

    let Some(&tail) = path.last() else {
        return;
    };
    for &next in graph.neighbors(tail) {
        if path.contains(&next) {
            continue;
        }
        path.push(next);
        extend(graph, path, out);
        path.pop();
    }
}

/// All simple paths of `N` beads in `graph`, with no path present
/// alongside its reversal.
///
/// Start beads are visited in ascending order, so the result is
/// deterministic for a given graph.
pub fn enumerate_paths<const N: usize>(graph: &TopologyGraph) -> Vec<[usize; N]> {
    let mut seen: HashSet<[usize; N]> = HashSet::new();
    let mut result = Vec::new();

    for start in 0..graph.bead_count() {
        for path in paths_from::<N>(graph, start) {
            if seen.insert(canonical(&path)) {
                result.push(path);
            }
        }
    }

    result
}

/// The lexicographically smaller of `path` and its reversal.
pub fn canonical<const N: usize>(path: &[usize; N]) -> [usize; N] {
    let mut reversed = *path;
    reversed.reverse();
    if reversed < *path { reversed } else { *path }
}
