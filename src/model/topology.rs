use super::bead::Bead;
use super::types::BeadCategory;
use crate::forge::{Diagnostic, ForgeConfig, InteractionClass, TopologyGraph};

/// Equilibrium value and force constant of a bonded term.
///
/// Once resolved into a [`Term`], angles are in radians and the force
/// constant already carries the configured import scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermParams {
    pub equilibrium: f64,
    pub force_constant: f64,
}

impl TermParams {
    /// Zero force constant: the term contributes nothing.
    pub const INERT: TermParams = TermParams {
        equilibrium: 0.0,
        force_constant: 0.0,
    };

    pub const fn new(equilibrium: f64, force_constant: f64) -> Self {
        Self {
            equilibrium,
            force_constant,
        }
    }

    #[inline]
    pub fn is_inert(&self) -> bool {
        self.force_constant == 0.0
    }
}

/// Where a term's parameters were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    /// Per-index entry of the parameter store.
    Indices,
    /// Bead-type default table.
    TypeDefault,
    /// Nothing matched; the term is inert.
    Missing,
}

/// A bonded term over a simple path of `N` beads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term<const N: usize> {
    pub beads: [usize; N],
    pub params: TermParams,
    pub source: ParamSource,
}

pub type BondTerm = Term<2>;
pub type AngleTerm = Term<3>;
pub type DihedralTerm = Term<4>;

/// A non-bonded bead pair with its Lennard-Jones parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairTerm {
    pub i: usize,
    pub j: usize,
    pub class: InteractionClass,
    pub sigma: f64,
    pub epsilon: f64,
}

/// Everything the per-tick evaluator needs, materialized once at setup.
#[derive(Debug, Clone)]
pub struct ForceField {
    pub beads: Vec<Bead>,
    /// Interaction-table category of every bead, `None` when unknown.
    pub categories: Vec<Option<BeadCategory>>,
    pub graph: TopologyGraph,
    pub bonds: Vec<BondTerm>,
    pub angles: Vec<AngleTerm>,
    pub dihedrals: Vec<DihedralTerm>,
    pub pairs: Vec<PairTerm>,
    pub config: ForgeConfig,
    /// Recoverable problems found while forging.
    pub diagnostics: Vec<Diagnostic>,
}

impl ForceField {
    #[inline]
    pub fn bead_count(&self) -> usize {
        self.beads.len()
    }

    pub fn term_count(&self) -> usize {
        self.bonds.len() + self.angles.len() + self.dihedrals.len() + self.pairs.len()
    }
}
