//! Per-bead force accumulation for one tick.
//!
//! Terms write into a private [`Accumulator`]; in parallel mode every
//! rayon job folds its share of terms into its own accumulator and the
//! partial results are merged pairwise. No contribution is shared between
//! threads, so none can be lost or counted twice.

use super::bonded::{GeometryError, TermForces};
use super::vector::{self, Vec3, ZERO};
use crate::forge::{Diagnostic, EvaluationMode, TermKind};
use rayon::prelude::*;
use std::ops::{Add, AddAssign};

/// Potential energy of one tick, split by term kind.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyBreakdown {
    pub stretch: f64,
    pub bend: f64,
    pub torsion: f64,
    pub lennard_jones: f64,
}

impl EnergyBreakdown {
    pub fn total(&self) -> f64 {
        self.stretch + self.bend + self.torsion + self.lennard_jones
    }

    fn slot(&mut self, kind: TermKind) -> &mut f64 {
        match kind {
            TermKind::Bond => &mut self.stretch,
            TermKind::Angle => &mut self.bend,
            TermKind::Dihedral => &mut self.torsion,
            TermKind::Pair => &mut self.lennard_jones,
        }
    }
}

impl Add for EnergyBreakdown {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            stretch: self.stretch + other.stretch,
            bend: self.bend + other.bend,
            torsion: self.torsion + other.torsion,
            lennard_jones: self.lennard_jones + other.lennard_jones,
        }
    }
}

impl AddAssign for EnergyBreakdown {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Result of one fully evaluated tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickForces {
    /// Net force on every bead, indexed by bead.
    pub forces: Vec<Vec3>,
    pub energy: EnergyBreakdown,
    /// Terms skipped this tick and why.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone)]
pub(crate) struct Accumulator {
    forces: Vec<Vec3>,
    energy: EnergyBreakdown,
    diagnostics: Vec<Diagnostic>,
}

impl Accumulator {
    pub(crate) fn new(n_beads: usize) -> Self {
        Self {
            forces: vec![ZERO; n_beads],
            energy: EnergyBreakdown::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Adds one term's outcome.
    ///
    /// Degenerate geometry and non-finite results are recorded as
    /// diagnostics and contribute nothing.
    pub(crate) fn apply<const N: usize>(
        &mut self,
        kind: TermKind,
        beads: &[usize; N],
        outcome: Result<TermForces<N>, GeometryError>,
    ) {
        match outcome {
            Err(_) => self
                .diagnostics
                .push(Diagnostic::degenerate_geometry(kind, beads)),
            Ok(term) if !term.is_finite() => self
                .diagnostics
                .push(Diagnostic::numeric_instability(kind, beads)),
            Ok(term) => {
                for (&bead, force) in beads.iter().zip(term.forces) {
                    vector::add_assign(&mut self.forces[bead], force);
                }
                *self.energy.slot(kind) += term.energy;
            }
        }
    }

    pub(crate) fn merge(mut self, other: Self) -> Self {
        for (acc, f) in self.forces.iter_mut().zip(other.forces) {
            vector::add_assign(acc, f);
        }
        self.energy += other.energy;
        self.diagnostics.extend(other.diagnostics);
        self
    }

    pub(crate) fn finish(self) -> TickForces {
        TickForces {
            forces: self.forces,
            energy: self.energy,
            diagnostics: self.diagnostics,
        }
    }
}

/// Folds `terms` into a fresh accumulator with `eval`.
///
/// Both modes visit terms in the same logical order, so diagnostics come
/// out in term order either way.
pub(crate) fn accumulate<T, F>(
    terms: &[T],
    n_beads: usize,
    mode: EvaluationMode,
    eval: F,
) -> Accumulator
where
    T: Sync,
    F: Fn(&mut Accumulator, &T) + Sync + Send,
{
    match mode {
        EvaluationMode::Serial => {
            let mut acc = Accumulator::new(n_beads);
            for term in terms {
                eval(&mut acc, term);
            }
            acc
        }
        EvaluationMode::Parallel => terms
            .par_iter()
            .fold(
                || Accumulator::new(n_beads),
                |mut acc, term| {
                    eval(&mut acc, term);
                    acc
                },
            )
            .reduce(|| Accumulator::new(n_beads), Accumulator::merge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(f: Vec3, energy: f64) -> Result<TermForces<2>, GeometryError> {
        Ok(TermForces {
            forces: [vector::neg(f), f],
            energy,
        })
    }

    #[test]
    fn contributions_add_per_bead() {
        let mut acc = Accumulator::new(3);
        acc.apply(TermKind::Bond, &[0, 1], pair([1.0, 0.0, 0.0], 2.0));
        acc.apply(TermKind::Bond, &[1, 2], pair([0.0, 2.0, 0.0], 3.0));
        let tick = acc.finish();

        assert_eq!(tick.forces[0], [-1.0, 0.0, 0.0]);
        assert_eq!(tick.forces[1], [1.0, -2.0, 0.0]);
        assert_eq!(tick.forces[2], [0.0, 2.0, 0.0]);
        assert_eq!(tick.energy.stretch, 5.0);
        assert_eq!(tick.energy.total(), 5.0);
        assert!(tick.diagnostics.is_empty());
    }

    #[test]
    fn non_finite_terms_are_excluded() {
        let mut acc = Accumulator::new(2);
        acc.apply(TermKind::Pair, &[0, 1], pair([f64::NAN, 0.0, 0.0], 1.0));
        acc.apply(TermKind::Pair, &[0, 1], pair([1.0, 0.0, 0.0], f64::INFINITY));
        let tick = acc.finish();

        assert_eq!(tick.forces, vec![ZERO, ZERO]);
        assert_eq!(tick.energy.lennard_jones, 0.0);
        assert_eq!(
            tick.diagnostics,
            vec![
                Diagnostic::numeric_instability(TermKind::Pair, &[0, 1]),
                Diagnostic::numeric_instability(TermKind::Pair, &[0, 1]),
            ]
        );
    }

    #[test]
    fn degenerate_terms_are_skipped() {
        let mut acc = Accumulator::new(2);
        acc.apply::<2>(TermKind::Bond, &[0, 1], Err(GeometryError::CoincidentBeads));
        let tick = acc.finish();
        assert_eq!(tick.forces, vec![ZERO, ZERO]);
        assert_eq!(
            tick.diagnostics,
            vec![Diagnostic::degenerate_geometry(TermKind::Bond, &[0, 1])]
        );
    }

    #[test]
    fn parallel_matches_serial() {
        let terms: Vec<[usize; 2]> = (0..500).map(|i| [i % 37, (i * 7 + 1) % 37]).collect();
        let eval = |acc: &mut Accumulator, t: &[usize; 2]| {
            let f = [t[0] as f64, 1.0, -(t[1] as f64)];
            acc.apply(TermKind::Pair, t, pair(f, 0.5));
        };

        let serial = accumulate(&terms, 37, EvaluationMode::Serial, eval).finish();
        let parallel = accumulate(&terms, 37, EvaluationMode::Parallel, eval).finish();

        assert_eq!(serial.forces.len(), parallel.forces.len());
        for (a, b) in serial.forces.iter().zip(&parallel.forces) {
            for c in 0..3 {
                assert!((a[c] - b[c]).abs() < 1e-9);
            }
        }
        assert!((serial.energy.lennard_jones - 250.0).abs() < 1e-9);
        assert!((parallel.energy.lennard_jones - 250.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_addition() {
        let a = EnergyBreakdown {
            stretch: 1.0,
            bend: 2.0,
            torsion: 3.0,
            lennard_jones: 4.0,
        };
        let mut b = a;
        b += a;
        assert_eq!(b.total(), 20.0);
        assert_eq!((a + a).torsion, 6.0);
    }
}
