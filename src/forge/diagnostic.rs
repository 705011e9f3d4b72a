//! Recoverable problems found while forging or evaluating a chain.

use std::fmt;

/// Kind of term a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Bond,
    Angle,
    Dihedral,
    Pair,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TermKind::Bond => "bond",
            TermKind::Angle => "angle",
            TermKind::Dihedral => "dihedral",
            TermKind::Pair => "pair",
        };
        f.write_str(name)
    }
}

/// A condition that was recovered locally instead of failing the run.
///
/// Each variant names the beads involved so the caller can trace it back to
/// its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No per-index or type-default parameters; the term is inert.
    MissingParameter { kind: TermKind, beads: Vec<usize> },
    /// A bead's type is outside the interaction table; its pairs use the
    /// weakest class.
    UnknownInteractionCategory { bead: usize, bead_type: String },
    /// Coincident or collinear beads made a term's direction undefined; the
    /// term was skipped for this tick.
    DegenerateGeometry { kind: TermKind, beads: Vec<usize> },
    /// A term produced a non-finite force component and was excluded.
    NumericInstability { kind: TermKind, beads: Vec<usize> },
}

impl Diagnostic {
    pub fn missing_parameter(kind: TermKind, beads: &[usize]) -> Self {
        Self::MissingParameter {
            kind,
            beads: beads.to_vec(),
        }
    }

    pub fn degenerate_geometry(kind: TermKind, beads: &[usize]) -> Self {
        Self::DegenerateGeometry {
            kind,
            beads: beads.to_vec(),
        }
    }

    pub fn numeric_instability(kind: TermKind, beads: &[usize]) -> Self {
        Self::NumericInstability {
            kind,
            beads: beads.to_vec(),
        }
    }

    /// Sends the diagnostic to the `log` facade at `warn` level.
    pub fn emit(&self) {
        log::warn!("{}", self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingParameter { kind, beads } => {
                write!(f, "no parameters for {} {:?}; term is inert", kind, beads)
            }
            Diagnostic::UnknownInteractionCategory { bead, bead_type } => write!(
                f,
                "bead {} has type '{}' outside the interaction table; using weakest class",
                bead, bead_type
            ),
            Diagnostic::DegenerateGeometry { kind, beads } => write!(
                f,
                "degenerate geometry in {} {:?}; skipped this tick",
                kind, beads
            ),
            Diagnostic::NumericInstability { kind, beads } => write!(
                f,
                "non-finite force from {} {:?}; excluded from accumulation",
                kind, beads
            ),
        }
    }
}
