//! Non-bonded pair discovery within a cutoff.

use super::graph::TopologyGraph;
use super::interaction::InteractionTable;
use super::spatial::SpatialGrid;
use crate::model::bead::Bead;
use crate::model::topology::PairTerm;
use crate::model::types::BeadCategory;

/// Finds every unbonded bead pair closer than `cutoff` and attaches its
/// Lennard-Jones parameters.
///
/// # Arguments
///
/// * `beads` — Bead list, addressed by index
/// * `categories` — Interaction-table category of each bead
/// * `graph` — Topology used for bonded-pair exclusion
/// * `positions` — Positions to search, one per bead
/// * `cutoff` — Search radius, must be positive
/// * `table` — Interaction table with the configured epsilon scale
///
/// # Returns
///
/// Pairs with `i < j`, each unordered pair at most once, sorted by `(i, j)`.
pub fn find_pairs(
    beads: &[Bead],
    categories: &[Option<BeadCategory>],
    graph: &TopologyGraph,
    positions: &[[f64; 3]],
    cutoff: f64,
    table: &InteractionTable,
) -> Vec<PairTerm> {
    let grid = SpatialGrid::from_positions(positions, cutoff);

    grid.pairs_within(positions, cutoff)
        .into_iter()
        .filter(|&(i, j)| !graph.are_bonded(i, j))
        .map(|(i, j)| {
            let (class, sigma, epsilon) =
                table.pair_parameters(&beads[i], categories[i], &beads[j], categories[j]);
            PairTerm {
                i,
                j,
                class,
                sigma,
                epsilon,
            }
        })
        .collect()
}
