mod config;
mod diagnostic;
mod error;
mod graph;
pub(crate) mod interaction;
pub(crate) mod neighbors;
mod paramgen;
mod params;
mod paths;
mod spatial;

pub use config::{
    DEFAULT_CUTOFF, EvaluationMode, FORCE_CONSTANT_SCALE, ForgeConfig, NeighborPolicy,
};
pub use diagnostic::{Diagnostic, TermKind};
pub use error::Error;
pub use graph::TopologyGraph;
pub use interaction::{
    InteractionClass, InteractionTable, classify, effective_size, energy_scale,
};
pub use params::{ParameterStore, get_default_parameters, load_parameters};
pub use paths::{TermPaths, canonical, enumerate_paths, enumerate_terms, paths_from};

use crate::model::chain::Chain;
use crate::model::topology::ForceField;

/// Builds the immutable [`ForceField`] of a chain.
///
/// Runs the whole setup pipeline once: topology validation, path
/// enumeration, parameter resolution, bead categorization and the initial
/// non-bonded pair search from the chain's bead positions.
///
/// # Errors
///
/// Fails on an invalid configuration, an inconsistent topology, or
/// parameter tables that cannot be parsed or name beads outside the chain.
/// Missing parameters and unknown bead categories are not errors; they are
/// recorded in [`ForceField::diagnostics`].
pub fn forge(chain: &Chain, config: &ForgeConfig) -> Result<ForceField, Error> {
    config.validate()?;

    let graph = TopologyGraph::from_chain(chain)?;

    let store = params::load_parameters(config.params.as_deref())?;
    store.validate(chain.bead_count())?;

    let paths = enumerate_terms(&graph);
    let bonded = paramgen::generate_bonded_terms(&paths, &store, &chain.beads, config);
    let mut diagnostics = bonded.diagnostics;

    let categories: Vec<_> = chain
        .beads
        .iter()
        .map(|bead| {
            let category = bead.bead_type.category();
            if category.is_none() {
                let diagnostic = Diagnostic::UnknownInteractionCategory {
                    bead: bead.index,
                    bead_type: bead.bead_type.to_string(),
                };
                diagnostic.emit();
                diagnostics.push(diagnostic);
            }
            category
        })
        .collect();

    let table = InteractionTable::new(config.epsilon_scale);
    let pairs = neighbors::find_pairs(
        &chain.beads,
        &categories,
        &graph,
        &chain.positions(),
        config.cutoff,
        &table,
    );

    log::debug!(
        "forged chain of {} beads: {} bonds, {} angles, {} dihedrals, {} pairs, {} diagnostics",
        chain.bead_count(),
        bonded.bonds.len(),
        bonded.angles.len(),
        bonded.dihedrals.len(),
        pairs.len(),
        diagnostics.len()
    );

    Ok(ForceField {
        beads: chain.beads.clone(),
        categories,
        graph,
        bonds: bonded.bonds,
        angles: bonded.angles,
        dihedrals: bonded.dihedrals,
        pairs,
        config: config.clone(),
        diagnostics,
    })
}
