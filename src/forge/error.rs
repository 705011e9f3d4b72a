//! Error types for chain setup and force evaluation.
//!
//! Only conditions with no valid state to continue from are errors. Missing
//! parameters, unknown bead categories and bad geometry during a tick are
//! recovered locally and reported as [`Diagnostic`](super::Diagnostic)s.

use thiserror::Error;

/// Errors that can occur while forging a chain or evaluating a tick.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to parse parameter tables TOML.
    #[error("failed to parse parameter tables: {0}")]
    ParameterParse(#[from] toml::de::Error),

    /// The input chain contains no beads.
    #[error("input chain is empty: at least one bead is required")]
    EmptyChain,

    /// A bead's declared index does not match its position in the bead list.
    ///
    /// Beads are addressed by index everywhere, so the bead list must be
    /// ordered `0..n` with no gaps or repeats.
    #[error("bead at position {position} declares index {index}")]
    BeadIndexMismatch {
        /// Position in the bead list.
        position: usize,
        /// Index the bead declares.
        index: usize,
    },

    /// Invalid bond definition in the input chain.
    #[error("invalid bond between beads {i} and {j}: {detail}")]
    InvalidBond {
        /// First bead index.
        i: usize,
        /// Second bead index.
        j: usize,
        /// Description of the problem.
        detail: String,
    },

    /// A parameter table entry cannot describe a term of this chain.
    #[error("invalid {table} parameter entry {key}: {detail}")]
    InvalidParameterEntry {
        /// Table the entry came from (`bonds`, `angles`, `angle_defaults`, ...).
        table: &'static str,
        /// Key of the entry as written in the table.
        key: String,
        /// Description of the problem.
        detail: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tick positions do not cover every bead exactly once.
    #[error("expected {expected} bead positions, found {found}")]
    PositionCountMismatch {
        /// Number of beads in the force field.
        expected: usize,
        /// Number of positions supplied.
        found: usize,
    },
}

impl Error {
    /// Creates an [`InvalidBond`](Error::InvalidBond) error.
    ///
    /// # Arguments
    ///
    /// * `i` — First bead index
    /// * `j` — Second bead index
    /// * `details` — Description of the bond problem
    pub fn invalid_bond(i: usize, j: usize, details: impl Into<String>) -> Self {
        Self::InvalidBond {
            i,
            j,
            detail: details.into(),
        }
    }

    /// Creates an [`InvalidParameterEntry`](Error::InvalidParameterEntry) error.
    pub fn invalid_parameter_entry(
        table: &'static str,
        key: impl std::fmt::Debug,
        details: impl Into<String>,
    ) -> Self {
        Self::InvalidParameterEntry {
            table,
            key: format!("{:?}", key),
            detail: details.into(),
        }
    }
}
