//! Chain observables: center of mass, radius of gyration and measured
//! term geometry.

use crate::engine::bonded;
use crate::engine::vector::{self, Vec3, ZERO};

/// Summary shape of a chain at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    pub center_of_mass: Vec3,
    /// Mean squared distance of the beads from the center of mass.
    pub radius_of_gyration_sq: f64,
}

impl ChainStats {
    /// Measures `positions` weighted by `masses`.
    ///
    /// Returns `None` for an empty chain, mismatched slices, or a
    /// non-positive total mass.
    pub fn measure(positions: &[Vec3], masses: &[f64]) -> Option<Self> {
        let center_of_mass = center_of_mass(positions, masses)?;
        Some(Self {
            center_of_mass,
            radius_of_gyration_sq: mean_sq_distance(positions, center_of_mass),
        })
    }
}

/// Mass-weighted mean position.
pub fn center_of_mass(positions: &[Vec3], masses: &[f64]) -> Option<Vec3> {
    if positions.is_empty() || positions.len() != masses.len() {
        return None;
    }

    let total: f64 = masses.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let weighted = positions
        .iter()
        .zip(masses)
        .fold(ZERO, |acc, (p, &m)| vector::add(acc, vector::scale(*p, m)));
    Some(vector::scale(weighted, 1.0 / total))
}

/// Squared radius of gyration about the mass-weighted center.
///
/// The average over beads is unweighted.
pub fn radius_of_gyration_sq(positions: &[Vec3], masses: &[f64]) -> Option<f64> {
    ChainStats::measure(positions, masses).map(|s| s.radius_of_gyration_sq)
}

fn mean_sq_distance(positions: &[Vec3], center: Vec3) -> f64 {
    let sum: f64 = positions
        .iter()
        .map(|p| vector::norm_sq(vector::sub(*p, center)))
        .sum();
    sum / positions.len() as f64
}

pub fn bond_length(pi: Vec3, pj: Vec3) -> f64 {
    vector::norm(vector::sub(pj, pi))
}

/// Angle at vertex `pj` in degrees, `None` if an arm has zero length.
pub fn bend_angle_degrees(pi: Vec3, pj: Vec3, pk: Vec3) -> Option<f64> {
    let a = vector::sub(pi, pj);
    let b = vector::sub(pk, pj);
    let (la, lb) = (vector::norm(a), vector::norm(b));
    if la < bonded::MIN_DISTANCE || lb < bonded::MIN_DISTANCE {
        return None;
    }
    let cos_theta = (vector::dot(a, b) / (la * lb)).clamp(-1.0, 1.0);
    Some(cos_theta.acos().to_degrees())
}

/// Signed dihedral in degrees, `(-180, 180]`, with trans at 180.
pub fn dihedral_angle_degrees(pi: Vec3, pj: Vec3, pk: Vec3, pl: Vec3) -> Option<f64> {
    bonded::dihedral_angle(pi, pj, pk, pl)
        .ok()
        .map(f64::to_degrees)
}
