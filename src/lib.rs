//! Topology enumeration and force-field evaluation for Martini-style
//! coarse-grained polymer chains.
//!
//! A chain of beads is turned once into an immutable [`ForceField`]: every
//! bond, angle and dihedral path of the bond graph with its resolved
//! parameters, plus the Lennard-Jones pairs found within a cutoff. Each
//! simulation tick then evaluates that force field at the current bead
//! positions and hands one net force per bead to the integrator.
//!
//! # Features
//!
//! - **Path enumeration** — Bonds, angles and dihedrals as simple paths of
//!   two, three and four beads, never listing a path next to its reversal
//! - **Parameter resolution** — Per-index tables with bead-type fallbacks,
//!   loaded from TOML; missing terms degrade to inert with a diagnostic
//! - **Interaction table** — Nineteen bead categories, ten interaction
//!   classes, size-dependent epsilon and sigma
//! - **Force evaluation** — Harmonic stretch, cosine-harmonic bend,
//!   harmonic torsion and Lennard-Jones 12-6 forces with energies,
//!   evaluated in parallel with a per-bead reduction
//!
//! # Quick Start
//!
//! ```
//! use martini_forge::{Bead, Bond, Chain, ForgeConfig, ForgeError, Simulation, forge};
//!
//! // A four-bead chain along x.
//! let mut chain = Chain::new();
//! for (i, name) in ["P4", "Na", "P1", "C1"].iter().enumerate() {
//!     let bead = Bead::from_martini(i, name, [i as f64 * 4.7, 0.0, 0.0], 72.0).unwrap();
//!     chain.beads.push(bead);
//! }
//! chain.bonds.push(Bond::new(0, 1));
//! chain.bonds.push(Bond::new(1, 2));
//! chain.bonds.push(Bond::new(2, 3));
//!
//! let config = ForgeConfig {
//!     params: Some(
//!         "[[bonds]]\nbeads = [0, 1]\nlength = 4.7\nk = 1.25\n".to_string(),
//!     ),
//!     ..Default::default()
//! };
//! let ff = forge(&chain, &config)?;
//!
//! assert_eq!(ff.bonds.len(), 3);
//! assert_eq!(ff.angles.len(), 2);
//! assert_eq!(ff.dihedrals.len(), 1);
//!
//! // Two bonds and both angles have no parameters; they stay inert.
//! assert!(!ff.diagnostics.is_empty());
//!
//! // One tick: stretch the first bond by one unit.
//! let mut positions = chain.positions();
//! positions[0][0] -= 1.0;
//!
//! let mut sim = Simulation::new(ff);
//! let mut external = vec![[0.0; 3]; 4];
//! let tick = sim.step(&positions, &mut external)?;
//!
//! assert!(external[0][0] > 0.0);
//! assert!(tick.energy.stretch > 0.0);
//! # Ok::<(), ForgeError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`forge()`] — One-time setup from a [`Chain`] and [`ForgeConfig`]
//! - [`engine`] — Force functions, per-tick evaluation and [`Simulation`]
//! - [`analysis`] — Center of mass, radius of gyration, measured angles
//!
//! # Units
//!
//! Lengths are in the system's distance unit (the bundled sigmas are
//! reduced units ×10). Parameter tables give angles in degrees and force
//! constants in the external convention; both are converted once, at
//! setup, using [`FORCE_CONSTANT_SCALE`] unless the configuration says
//! otherwise.

mod forge;
mod model;

pub mod analysis;
pub mod engine;

pub use model::bead::Bead;
pub use model::chain::{Bond, Chain};
pub use model::types::{BeadCategory, BeadType, ParseBeadTypeError, ParseCategoryError, SizeClass};

pub use model::topology::{
    AngleTerm, BondTerm, DihedralTerm, ForceField, PairTerm, ParamSource, Term, TermParams,
};

pub use forge::{
    DEFAULT_CUTOFF, Diagnostic, EvaluationMode, FORCE_CONSTANT_SCALE, ForgeConfig,
    InteractionClass, InteractionTable, NeighborPolicy, ParameterStore, TermKind, TermPaths,
    TopologyGraph, canonical, classify, effective_size, energy_scale, enumerate_paths,
    enumerate_terms, forge, get_default_parameters, load_parameters, paths_from,
};

pub use engine::{EnergyBreakdown, ForceSink, GeometryError, Simulation, TermForces, TickForces};

pub use forge::Error as ForgeError;
