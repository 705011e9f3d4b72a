//! Core data structures for bead chains and their resolved force fields.
//!
//! - [`types`] – Bead categories, size classes and Martini type names.
//! - [`bead`] – A single bead with type, size, position and mass.
//! - [`chain`] – Beads plus the bonds that form the topology.
//! - [`topology`] – Resolved bonded terms, non-bonded pairs and the
//!   [`ForceField`](topology::ForceField) produced by [`crate::forge()`].
//!
//! Input ([`Chain`](chain::Chain)) and output ([`ForceField`](topology::ForceField))
//! are kept apart so the setup pipeline can turn one into the other once,
//! before any tick runs.

pub mod bead;
pub mod chain;
pub mod topology;
pub mod types;
