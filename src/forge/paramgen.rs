use super::config::ForgeConfig;
use super::diagnostic::{Diagnostic, TermKind};
use super::params::ParameterStore;
use super::paths::TermPaths;
use crate::model::bead::Bead;
use crate::model::topology::{AngleTerm, BondTerm, DihedralTerm, ParamSource, Term, TermParams};
use crate::model::types::BeadType;

/// Resolved bonded terms of a chain plus what went missing on the way.
#[derive(Debug, Clone, Default)]
pub struct BondedTerms {
    pub bonds: Vec<BondTerm>,
    pub angles: Vec<AngleTerm>,
    pub dihedrals: Vec<DihedralTerm>,
    pub diagnostics: Vec<Diagnostic>,
}

/// How a stored equilibrium value is brought into evaluator units.
#[derive(Clone, Copy)]
enum Equilibrium {
    Length,
    Degrees,
}

impl Equilibrium {
    fn convert(self, value: f64) -> f64 {
        match self {
            Equilibrium::Length => value,
            Equilibrium::Degrees => value.to_radians(),
        }
    }
}

/// Resolves parameters for every enumerated path.
///
/// Each term is looked up by its bead indices first, then (angles and
/// dihedrals only) by the bead types along the path. A term that matches
/// neither is kept with [`TermParams::INERT`] and reported as a
/// [`Diagnostic::MissingParameter`].
///
/// Resolved force constants carry `config.force_constant_scale`; angle and
/// dihedral equilibria are converted from degrees to radians.
pub fn generate_bonded_terms(
    paths: &TermPaths,
    store: &ParameterStore,
    beads: &[Bead],
    config: &ForgeConfig,
) -> BondedTerms {
    let mut diagnostics = Vec::new();
    let scale = config.force_constant_scale;

    let bonds = paths
        .bonds
        .iter()
        .map(|&path| {
            resolve(
                path,
                store.bond(path),
                None,
                Equilibrium::Length,
                scale,
                TermKind::Bond,
                &mut diagnostics,
            )
        })
        .collect();

    let angles = paths
        .angles
        .iter()
        .map(|&path| {
            let fallback = store.angle_default(&path_types(beads, &path));
            resolve(
                path,
                store.angle(path),
                fallback,
                Equilibrium::Degrees,
                scale,
                TermKind::Angle,
                &mut diagnostics,
            )
        })
        .collect();

    let dihedrals = paths
        .dihedrals
        .iter()
        .map(|&path| {
            let fallback = store.dihedral_default(&path_types(beads, &path));
            resolve(
                path,
                store.dihedral(path),
                fallback,
                Equilibrium::Degrees,
                scale,
                TermKind::Dihedral,
                &mut diagnostics,
            )
        })
        .collect();

    BondedTerms {
        bonds,
        angles,
        dihedrals,
        diagnostics,
    }
}

fn path_types<const N: usize>(beads: &[Bead], path: &[usize; N]) -> [BeadType; N] {
    path.map(|b| beads[b].bead_type.clone())
}

fn resolve<const N: usize>(
    beads: [usize; N],
    by_index: Option<TermParams>,
    by_type: Option<TermParams>,
    equilibrium: Equilibrium,
    scale: f64,
    kind: TermKind,
    diagnostics: &mut Vec<Diagnostic>,
) -> Term<N> {
    let (raw, source) = match (by_index, by_type) {
        (Some(p), _) => (p, ParamSource::Indices),
        (None, Some(p)) => (p, ParamSource::TypeDefault),
        (None, None) => {
            let diagnostic = Diagnostic::missing_parameter(kind, &beads);
            diagnostic.emit();
            diagnostics.push(diagnostic);
            return Term {
                beads,
                params: TermParams::INERT,
                source: ParamSource::Missing,
            };
        }
    };

    Term {
        beads,
        params: TermParams::new(
            equilibrium.convert(raw.equilibrium),
            raw.force_constant * scale,
        ),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::graph::TopologyGraph;
    use crate::forge::paths::enumerate_terms;
    use crate::model::chain::Bond;

    fn chain_of(names: &[&str]) -> (Vec<Bead>, TermPaths) {
        let beads: Vec<Bead> = names
            .iter()
            .enumerate()
            .map(|(i, name)| Bead::from_martini(i, name, [i as f64 * 4.7, 0.0, 0.0], 72.0).unwrap())
            .collect();
        let bonds: Vec<Bond> = (1..beads.len()).map(|i| Bond::new(i - 1, i)).collect();
        let graph = TopologyGraph::from_edges(beads.len(), &bonds).unwrap();
        (beads, enumerate_terms(&graph))
    }

    #[test]
    fn index_entries_are_scaled_and_converted() {
        let (beads, paths) = chain_of(&["P4", "Na", "P1", "C1"]);
        let mut store = ParameterStore::new();
        store.insert_bond([0, 1], TermParams::new(4.7, 1.25));
        store.insert_angle([2, 1, 0], TermParams::new(120.0, 0.025));
        store.insert_dihedral([0, 1, 2, 3], TermParams::new(180.0, 0.001));

        let terms = generate_bonded_terms(&paths, &store, &beads, &ForgeConfig::default());

        let bond = &terms.bonds[0];
        assert_eq!(bond.source, ParamSource::Indices);
        assert_eq!(bond.params.equilibrium, 4.7);
        assert!((bond.params.force_constant - 1250.0).abs() < 1e-9);

        let angle = &terms.angles[0];
        assert_eq!(angle.beads, [0, 1, 2]);
        assert_eq!(angle.source, ParamSource::Indices);
        assert!((angle.params.equilibrium - 120f64.to_radians()).abs() < 1e-12);
        assert!((angle.params.force_constant - 25.0).abs() < 1e-9);

        let dihedral = &terms.dihedrals[0];
        assert!((dihedral.params.equilibrium - std::f64::consts::PI).abs() < 1e-12);
        assert!((dihedral.params.force_constant - 1.0).abs() < 1e-9);
    }

    #[test]
    fn angle_falls_back_to_type_defaults() {
        let (beads, paths) = chain_of(&["P4", "Na", "P1"]);
        let terms = generate_bonded_terms(
            &paths,
            crate::forge::get_default_parameters(),
            &beads,
            &ForgeConfig::default(),
        );

        let angle = &terms.angles[0];
        assert_eq!(angle.source, ParamSource::TypeDefault);
        assert!((angle.params.equilibrium - 166f64.to_radians()).abs() < 1e-12);
        assert!((angle.params.force_constant - 50.0).abs() < 1e-9);
    }

    #[test]
    fn missing_terms_are_inert_and_reported() {
        let (beads, paths) = chain_of(&["C1", "C1", "C1", "C1"]);
        let terms =
            generate_bonded_terms(&paths, &ParameterStore::new(), &beads, &ForgeConfig::default());

        assert_eq!(terms.bonds.len(), 3);
        assert!(terms.bonds.iter().all(|t| t.params.is_inert()));
        assert!(terms.angles.iter().all(|t| t.source == ParamSource::Missing));
        assert_eq!(terms.diagnostics.len(), 3 + 2 + 1);
        assert!(terms.diagnostics.contains(&Diagnostic::MissingParameter {
            kind: TermKind::Dihedral,
            beads: vec![0, 1, 2, 3],
        }));
    }

    #[test]
    fn index_entry_wins_over_type_default() {
        let (beads, paths) = chain_of(&["P4", "Na", "P1"]);
        let mut store = crate::forge::get_default_parameters().clone();
        store.insert_angle([0, 1, 2], TermParams::new(90.0, 0.1));

        let terms = generate_bonded_terms(&paths, &store, &beads, &ForgeConfig::default());
        assert_eq!(terms.angles[0].source, ParamSource::Indices);
        assert!((terms.angles[0].params.equilibrium - 90f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn custom_force_constant_scale() {
        let (beads, paths) = chain_of(&["P4", "P4"]);
        let mut store = ParameterStore::new();
        store.insert_bond([0, 1], TermParams::new(4.7, 2.0));
        let config = ForgeConfig {
            force_constant_scale: 1.0,
            ..Default::default()
        };

        let terms = generate_bonded_terms(&paths, &store, &beads, &config);
        assert_eq!(terms.bonds[0].params.force_constant, 2.0);
    }
}
