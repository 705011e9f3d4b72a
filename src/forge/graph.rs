//! Bonded topology of a chain as an index-addressed adjacency list.
//!
//! The [`TopologyGraph`] is built once from the chain's bond list and never
//! mutated afterwards. Every edge is stored in both directions and
//! self-loops are rejected at construction.

use super::error::Error;
use crate::model::chain::{Bond, Chain};
use std::collections::HashSet;

/// Symmetric adjacency list over bead indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyGraph {
    /// Sorted neighbor indices for every bead.
    neighbors: Vec<Vec<usize>>,
    /// Undirected edges, each stored once with `i < j`.
    edges: HashSet<Bond>,
}

impl TopologyGraph {
    /// Builds the graph for a chain, validating bead indices and bonds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyChain`] if the chain has no beads,
    /// [`Error::BeadIndexMismatch`] if bead `k` does not declare index `k`,
    /// or [`Error::InvalidBond`] for out-of-range or self-referencing bonds.
    pub fn from_chain(chain: &Chain) -> Result<Self, Error> {
        if chain.beads.is_empty() {
            return Err(Error::EmptyChain);
        }

        for (position, bead) in chain.beads.iter().enumerate() {
            if bead.index != position {
                return Err(Error::BeadIndexMismatch {
                    position,
                    index: bead.index,
                });
            }
        }

        Self::from_edges(chain.beads.len(), &chain.bonds)
    }

    /// Builds the graph for `n_beads` beads from an edge list.
    ///
    /// Repeated edges (in either orientation) collapse into one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBond`] if an edge references an index
    /// `>= n_beads` or connects a bead to itself.
    pub fn from_edges(n_beads: usize, bonds: &[Bond]) -> Result<Self, Error> {
        let mut neighbors = vec![Vec::new(); n_beads];
        let mut edges = HashSet::with_capacity(bonds.len());

        for bond in bonds {
            if bond.i >= n_beads || bond.j >= n_beads {
                return Err(Error::invalid_bond(
                    bond.i,
                    bond.j,
                    format!("bead index out of bounds (n_beads = {})", n_beads),
                ));
            }
            if bond.i == bond.j {
                return Err(Error::invalid_bond(bond.i, bond.j, "self-loop"));
            }

            if edges.insert(Bond::new(bond.i, bond.j)) {
                neighbors[bond.i].push(bond.j);
                neighbors[bond.j].push(bond.i);
            }
        }

        for list in &mut neighbors {
            list.sort_unstable();
        }

        Ok(Self { neighbors, edges })
    }

    #[inline]
    pub fn bead_count(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Directly bonded neighbors of `bead`, in ascending order.
    #[inline]
    pub fn neighbors(&self, bead: usize) -> &[usize] {
        &self.neighbors[bead]
    }

    #[inline]
    pub fn degree(&self, bead: usize) -> usize {
        self.neighbors[bead].len()
    }

    /// Whether `a` and `b` share an edge, checked in both orders.
    #[inline]
    pub fn are_bonded(&self, a: usize, b: usize) -> bool {
        self.edges.contains(&Bond::new(a, b))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Bond> {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::bead::Bead;

    fn linear_chain(n: usize) -> Chain {
        let mut chain = Chain::new();
        for i in 0..n {
            chain
                .beads
                .push(Bead::from_martini(i, "P4", [i as f64 * 4.7, 0.0, 0.0], 72.0).unwrap());
        }
        for i in 1..n {
            chain.bonds.push(Bond::new(i - 1, i));
        }
        chain
    }

    #[test]
    fn graph_from_linear_chain() {
        let graph = TopologyGraph::from_chain(&linear_chain(4)).unwrap();

        assert_eq!(graph.bead_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(3), &[2]);
    }

    #[test]
    fn every_edge_has_a_reciprocal() {
        let graph = TopologyGraph::from_chain(&linear_chain(6)).unwrap();
        for a in 0..graph.bead_count() {
            for &b in graph.neighbors(a) {
                assert!(graph.neighbors(b).contains(&a));
                assert!(graph.are_bonded(a, b));
                assert!(graph.are_bonded(b, a));
            }
        }
    }

    #[test]
    fn duplicate_edges_collapse() {
        let edges = [Bond::new(0, 1), Bond::new(1, 0), Bond { i: 1, j: 0 }];
        let graph = TopologyGraph::from_edges(2, &edges).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
    }

    #[test]
    fn errors_on_empty_chain() {
        let result = TopologyGraph::from_chain(&Chain::new());
        assert!(matches!(result, Err(Error::EmptyChain)));
    }

    #[test]
    fn errors_on_out_of_range_bond() {
        let mut chain = linear_chain(2);
        chain.bonds.push(Bond::new(1, 99));

        let result = TopologyGraph::from_chain(&chain);
        assert!(matches!(result, Err(Error::InvalidBond { i: 1, j: 99, .. })));
    }

    #[test]
    fn errors_on_self_loop() {
        let result = TopologyGraph::from_edges(3, &[Bond::new(2, 2)]);
        assert!(matches!(result, Err(Error::InvalidBond { i: 2, j: 2, .. })));
    }

    #[test]
    fn errors_on_bead_index_mismatch() {
        let mut chain = linear_chain(3);
        chain.beads[2].index = 7;

        let result = TopologyGraph::from_chain(&chain);
        assert!(matches!(
            result,
            Err(Error::BeadIndexMismatch {
                position: 2,
                index: 7
            })
        ));
    }
}
