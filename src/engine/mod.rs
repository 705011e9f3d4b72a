//! Per-tick force evaluation.
//!
//! A [`ForceField`] is evaluated against the current bead positions to
//! produce a [`TickForces`]. The tick is computed into its own buffer and
//! only handed to a [`ForceSink`] once every term has been evaluated, so an
//! integrator never sees a partially applied tick.

mod accumulate;
pub mod bonded;
pub mod nonbonded;
mod sink;
pub mod vector;

pub use accumulate::{EnergyBreakdown, TickForces};
pub use bonded::{GeometryError, TermForces};
pub use sink::ForceSink;

use crate::forge::interaction::InteractionTable;
use crate::forge::{Error, TermKind, neighbors};
use crate::model::topology::ForceField;
use vector::Vec3;

impl ForceField {
    /// Evaluates every bonded term and non-bonded pair at `positions`.
    ///
    /// Terms with degenerate geometry or non-finite results are skipped and
    /// reported in [`TickForces::diagnostics`]; they never abort the tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionCountMismatch`] unless there is exactly one
    /// position per bead.
    pub fn evaluate(&self, positions: &[Vec3]) -> Result<TickForces, Error> {
        self.check_positions(positions)?;

        let n = self.bead_count();
        let mode = self.config.evaluation;

        let bonds = accumulate::accumulate(&self.bonds, n, mode, |acc, term| {
            let [i, j] = term.beads;
            acc.apply(
                TermKind::Bond,
                &term.beads,
                bonded::stretch(positions[i], positions[j], term.params),
            );
        });
        let angles = accumulate::accumulate(&self.angles, n, mode, |acc, term| {
            let [i, j, k] = term.beads;
            acc.apply(
                TermKind::Angle,
                &term.beads,
                bonded::bend(positions[i], positions[j], positions[k], term.params),
            );
        });
        let dihedrals = accumulate::accumulate(&self.dihedrals, n, mode, |acc, term| {
            let [i, j, k, l] = term.beads;
            acc.apply(
                TermKind::Dihedral,
                &term.beads,
                bonded::torsion(
                    positions[i],
                    positions[j],
                    positions[k],
                    positions[l],
                    term.params,
                ),
            );
        });
        let pairs = accumulate::accumulate(&self.pairs, n, mode, |acc, pair| {
            acc.apply(
                TermKind::Pair,
                &[pair.i, pair.j],
                nonbonded::lennard_jones(
                    positions[pair.i],
                    positions[pair.j],
                    pair.sigma,
                    pair.epsilon,
                ),
            );
        });

        let tick = bonds.merge(angles).merge(dihedrals).merge(pairs).finish();
        for diagnostic in &tick.diagnostics {
            diagnostic.emit();
        }
        Ok(tick)
    }

    /// Rebuilds the non-bonded pair list from `positions`.
    ///
    /// Beads at non-finite positions join no pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration was changed to
    /// an unusable one after setup, and [`Error::PositionCountMismatch`]
    /// unless there is exactly one position per bead.
    pub fn refresh_pairs(&mut self, positions: &[Vec3]) -> Result<(), Error> {
        self.config.validate()?;
        self.check_positions(positions)?;

        let table = InteractionTable::new(self.config.epsilon_scale);
        self.pairs = neighbors::find_pairs(
            &self.beads,
            &self.categories,
            &self.graph,
            positions,
            self.config.cutoff,
            &table,
        );
        log::debug!("refreshed neighbor list: {} pairs", self.pairs.len());
        Ok(())
    }

    fn check_positions(&self, positions: &[Vec3]) -> Result<(), Error> {
        if positions.len() != self.bead_count() {
            return Err(Error::PositionCountMismatch {
                expected: self.bead_count(),
                found: positions.len(),
            });
        }
        Ok(())
    }
}

/// Drives a [`ForceField`] tick by tick, applying the configured
/// [`NeighborPolicy`](crate::NeighborPolicy).
#[derive(Debug, Clone)]
pub struct Simulation {
    force_field: ForceField,
    tick: u64,
}

impl Simulation {
    pub fn new(force_field: ForceField) -> Self {
        Self {
            force_field,
            tick: 0,
        }
    }

    pub fn force_field(&self) -> &ForceField {
        &self.force_field
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Evaluates one tick at `positions` and adds the forces to `sink`.
    ///
    /// The pair list is rebuilt first when the neighbor policy says it is
    /// due. Nothing reaches `sink` if the tick fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PositionCountMismatch`] unless there is exactly one
    /// position per bead, and [`Error::InvalidConfig`] if a due refresh
    /// finds an unusable configuration.
    pub fn step<S: ForceSink + ?Sized>(
        &mut self,
        positions: &[Vec3],
        sink: &mut S,
    ) -> Result<TickForces, Error> {
        if self
            .force_field
            .config
            .neighbor_policy
            .refresh_due(self.tick)
        {
            self.force_field.refresh_pairs(positions)?;
        }

        let forces = self.force_field.evaluate(positions)?;
        forces.apply_to(sink);
        self.tick += 1;
        Ok(forces)
    }

    pub fn into_force_field(self) -> ForceField {
        self.force_field
    }
}
