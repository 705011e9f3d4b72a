//! Lennard-Jones 12-6 pair force.

use super::bonded::{GeometryError, MIN_DISTANCE, TermForces};
use super::vector::{self, Vec3};

/// Separation at which the Lennard-Jones force vanishes, `sigma * 2^(1/6)`.
pub fn equilibrium_separation(sigma: f64) -> f64 {
    sigma * 2f64.powf(1.0 / 6.0)
}

/// Lennard-Jones force and energy of the pair `(p1, p2)`.
///
/// With `dir` the unit vector from `p1` to `p2`, bead 2 receives
/// `(48 eps sigma^12 / r^13 - 24 eps sigma^6 / r^7) dir` and bead 1 the
/// negation. The energy is `4 eps ((sigma/r)^12 - (sigma/r)^6)`.
///
/// # Errors
///
/// [`GeometryError::CoincidentBeads`] when the beads overlap.
pub fn lennard_jones(
    p1: Vec3,
    p2: Vec3,
    sigma: f64,
    epsilon: f64,
) -> Result<TermForces<2>, GeometryError> {
    let d = vector::sub(p2, p1);
    let r = vector::norm(d);
    if r < MIN_DISTANCE {
        return Err(GeometryError::CoincidentBeads);
    }

    let sr6 = (sigma / r).powi(6);
    let sr12 = sr6 * sr6;
    let magnitude = (48.0 * epsilon * sr12 - 24.0 * epsilon * sr6) / r;
    let f2 = vector::scale(d, magnitude / r);

    Ok(TermForces {
        forces: [vector::neg(f2), f2],
        energy: 4.0 * epsilon * (sr12 - sr6),
    })
}
