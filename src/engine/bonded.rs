//! Stretch, bend and torsion forces.
//!
//! Each function is pure: it takes the term's bead positions and resolved
//! parameters and returns one force per bead together with the term's
//! energy. Forces of a term always sum to zero. A term with a zero force
//! constant returns zero forces without looking at the geometry.

use super::vector::{self, Vec3, ZERO};
use crate::model::topology::TermParams;
use std::f64::consts::PI;
use thiserror::Error;

/// Below this length a direction is treated as undefined.
pub const MIN_DISTANCE: f64 = 1e-10;

/// Geometry that leaves a term's forces undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("beads are coincident")]
    CoincidentBeads,
    #[error("beads are collinear")]
    Collinear,
}

/// Forces on the `N` beads of a term, in term order, and the term's energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermForces<const N: usize> {
    pub forces: [Vec3; N],
    pub energy: f64,
}

impl<const N: usize> TermForces<N> {
    pub const ZERO: Self = Self {
        forces: [ZERO; N],
        energy: 0.0,
    };

    /// Whether every force component and the energy are finite.
    pub fn is_finite(&self) -> bool {
        self.energy.is_finite() && self.forces.iter().all(|f| vector::is_finite(*f))
    }
}

/// Harmonic bond stretch, `U = Kb (r - d0)^2`.
///
/// The force on `pj` is `-2 Kb (r - d0)` along the unit vector from `pi`
/// to `pj`; `pi` receives the exact negation.
///
/// # Errors
///
/// [`GeometryError::CoincidentBeads`] when the beads overlap.
pub fn stretch(pi: Vec3, pj: Vec3, params: TermParams) -> Result<TermForces<2>, GeometryError> {
    if params.is_inert() {
        return Ok(TermForces::ZERO);
    }

    let d = vector::sub(pj, pi);
    let r = vector::norm(d);
    if r < MIN_DISTANCE {
        return Err(GeometryError::CoincidentBeads);
    }

    let dr = r - params.equilibrium;
    let f_j = vector::scale(d, -2.0 * params.force_constant * dr / r);

    Ok(TermForces {
        forces: [vector::neg(f_j), f_j],
        energy: params.force_constant * dr * dr,
    })
}

/// Cosine-harmonic bend around vertex `pj`, `U = Ka (cos t - cos t0)^2`.
///
/// `params.equilibrium` is the angle in radians.
///
/// # Errors
///
/// [`GeometryError::CoincidentBeads`] when an arm has zero length.
pub fn bend(
    pi: Vec3,
    pj: Vec3,
    pk: Vec3,
    params: TermParams,
) -> Result<TermForces<3>, GeometryError> {
    if params.is_inert() {
        return Ok(TermForces::ZERO);
    }

    let a = vector::sub(pi, pj);
    let b = vector::sub(pk, pj);
    let la = vector::norm(a);
    let lb = vector::norm(b);
    if la < MIN_DISTANCE || lb < MIN_DISTANCE {
        return Err(GeometryError::CoincidentBeads);
    }

    let inv_ab = 1.0 / (la * lb);
    let cos_theta = (vector::dot(a, b) * inv_ab).clamp(-1.0, 1.0);
    let delta = cos_theta - params.equilibrium.cos();

    // Gradients of cos(theta) with respect to the two outer beads.
    let dcos_i = vector::sub(vector::scale(b, inv_ab), vector::scale(a, cos_theta / (la * la)));
    let dcos_k = vector::sub(vector::scale(a, inv_ab), vector::scale(b, cos_theta / (lb * lb)));

    let prefactor = -2.0 * params.force_constant * delta;
    let f_i = vector::scale(dcos_i, prefactor);
    let f_k = vector::scale(dcos_k, prefactor);
    let f_j = vector::neg(vector::add(f_i, f_k));

    Ok(TermForces {
        forces: [f_i, f_j, f_k],
        energy: params.force_constant * delta * delta,
    })
}

/// Signed dihedral angle of `pi-pj-pk-pl` in `(-pi, pi]`, zero for cis and
/// `pi` for trans.
///
/// # Errors
///
/// [`GeometryError::Collinear`] when either bead triple is collinear, which
/// leaves the angle undefined.
pub fn dihedral_angle(pi: Vec3, pj: Vec3, pk: Vec3, pl: Vec3) -> Result<f64, GeometryError> {
    Ok(DihedralFrame::new(pi, pj, pk, pl)?.phi)
}

struct DihedralFrame {
    r_ij: Vec3,
    r_kj: Vec3,
    r_kl: Vec3,
    m: Vec3,
    n: Vec3,
    m_sq: f64,
    n_sq: f64,
    phi: f64,
}

impl DihedralFrame {
    fn new(pi: Vec3, pj: Vec3, pk: Vec3, pl: Vec3) -> Result<Self, GeometryError> {
        let r_ij = vector::sub(pi, pj);
        let r_kj = vector::sub(pk, pj);
        let r_kl = vector::sub(pk, pl);
        if vector::norm(r_kj) < MIN_DISTANCE {
            return Err(GeometryError::CoincidentBeads);
        }

        let m = vector::cross(r_ij, r_kj);
        let n = vector::cross(r_kj, r_kl);
        let m_sq = vector::norm_sq(m);
        let n_sq = vector::norm_sq(n);
        if m_sq < MIN_DISTANCE * MIN_DISTANCE || n_sq < MIN_DISTANCE * MIN_DISTANCE {
            return Err(GeometryError::Collinear);
        }

        let unsigned = vector::norm(vector::cross(m, n)).atan2(vector::dot(m, n));
        let phi = if vector::dot(r_ij, n) < 0.0 {
            -unsigned
        } else {
            unsigned
        };

        Ok(Self {
            r_ij,
            r_kj,
            r_kl,
            m,
            n,
            m_sq,
            n_sq,
            phi,
        })
    }
}

/// Wraps an angle difference into `(-pi, pi]`.
pub fn wrap_angle(delta: f64) -> f64 {
    let wrapped = (delta + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI { PI } else { wrapped }
}

/// Harmonic torsion, `U = Kd (phi - phi0)^2` with the difference wrapped
/// into `(-pi, pi]`.
///
/// `params.equilibrium` is the dihedral in radians. Forces follow the
/// analytic gradient of `phi` built from the plane normals
/// `m = r_ij x r_kj` and `n = r_kj x r_kl`.
///
/// # Errors
///
/// [`GeometryError::Collinear`] or [`GeometryError::CoincidentBeads`] when
/// the dihedral is undefined.
pub fn torsion(
    pi: Vec3,
    pj: Vec3,
    pk: Vec3,
    pl: Vec3,
    params: TermParams,
) -> Result<TermForces<4>, GeometryError> {
    if params.is_inert() {
        return Ok(TermForces::ZERO);
    }

    let frame = DihedralFrame::new(pi, pj, pk, pl)?;
    let delta = wrap_angle(frame.phi - params.equilibrium);
    let ddphi = 2.0 * params.force_constant * delta;

    let r_kj_sq = vector::norm_sq(frame.r_kj);
    let r_kj_len = r_kj_sq.sqrt();

    let f_i = vector::scale(frame.m, -ddphi * r_kj_len / frame.m_sq);
    let f_l = vector::scale(frame.n, ddphi * r_kj_len / frame.n_sq);

    let p = vector::dot(frame.r_ij, frame.r_kj) / r_kj_sq;
    let q = vector::dot(frame.r_kl, frame.r_kj) / r_kj_sq;
    let s = vector::sub(vector::scale(f_i, p), vector::scale(f_l, q));
    let f_j = vector::sub(f_i, s);
    let f_k = vector::add(f_l, s);

    Ok(TermForces {
        forces: [f_i, vector::neg(f_j), vector::neg(f_k), f_l],
        energy: params.force_constant * delta * delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn assert_sums_to_zero<const N: usize>(forces: &[Vec3; N]) {
        let total = forces.iter().fold(ZERO, |acc, f| vector::add(acc, *f));
        for c in total {
            assert!(c.abs() < 1e-8, "net force {:?}", total);
        }
    }

    fn assert_vec_close(a: Vec3, b: Vec3, tol: f64) {
        for c in 0..3 {
            assert!((a[c] - b[c]).abs() < tol, "{:?} != {:?}", a, b);
        }
    }

    /// Central-difference check of `forces == -grad(energy)`.
    fn check_gradient<const N: usize>(
        positions: [Vec3; N],
        eval: impl Fn(&[Vec3; N]) -> TermForces<N>,
    ) {
        let analytic = eval(&positions);
        let h = 1e-6;
        for bead in 0..N {
            for c in 0..3 {
                let mut plus = positions;
                plus[bead][c] += h;
                let mut minus = positions;
                minus[bead][c] -= h;
                let numeric = -(eval(&plus).energy - eval(&minus).energy) / (2.0 * h);
                let expected = analytic.forces[bead][c];
                assert!(
                    (numeric - expected).abs() < 1e-4 * (1.0 + expected.abs()),
                    "bead {} axis {}: numeric {} analytic {}",
                    bead,
                    c,
                    numeric,
                    expected
                );
            }
        }
    }

    #[test]
    fn stretch_is_zero_at_equilibrium() {
        let out = stretch([0.0; 3], [5.0, 0.0, 0.0], TermParams::new(5.0, 1250.0)).unwrap();
        assert_eq!(out.forces, [ZERO, ZERO]);
        assert_eq!(out.energy, 0.0);
    }

    #[test]
    fn stretch_is_equal_and_opposite() {
        let out =
            stretch([0.1, -0.3, 0.2], [3.0, 2.0, -1.0], TermParams::new(4.7, 1250.0)).unwrap();
        assert_eq!(out.forces[0], vector::neg(out.forces[1]));
    }

    #[test]
    fn stretch_restoring_magnitude() {
        let k = 1250.0;
        let out = stretch([5.0, 0.0, 0.0], [11.0, 0.0, 0.0], TermParams::new(5.0, k)).unwrap();
        // Stretched by 1: pulled back together with magnitude 2 Kb.
        assert_vec_close(out.forces[1], [-2.0 * k, 0.0, 0.0], TOL);
        assert_vec_close(out.forces[0], [2.0 * k, 0.0, 0.0], TOL);
        assert!((out.energy - k).abs() < TOL);
    }

    #[test]
    fn stretch_matches_energy_gradient() {
        let params = TermParams::new(4.7, 3.5);
        check_gradient([[0.2, 0.1, -0.4], [3.1, 2.2, 1.0]], |p| {
            stretch(p[0], p[1], params).unwrap()
        });
    }

    #[test]
    fn stretch_coincident_beads_is_degenerate() {
        let p = [1.0, 2.0, 3.0];
        assert_eq!(
            stretch(p, p, TermParams::new(4.7, 1.0)),
            Err(GeometryError::CoincidentBeads)
        );
        // Inert terms never look at geometry.
        assert_eq!(stretch(p, p, TermParams::INERT), Ok(TermForces::ZERO));
    }

    #[test]
    fn bend_forces_sum_to_zero() {
        let params = TermParams::new(120f64.to_radians(), 25.0);
        let triangles = [
            [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[4.1, -0.2, 0.3], [0.0, 0.5, 0.0], [-2.0, 3.0, 1.5]],
            [[0.3, 0.1, 4.0], [0.0, 0.0, 0.0], [0.2, 0.1, -4.0]],
        ];
        for [a, b, c] in triangles {
            let out = bend(a, b, c, params).unwrap();
            assert_sums_to_zero(&out.forces);
        }
    }

    #[test]
    fn bend_is_zero_at_equilibrium() {
        let params = TermParams::new(90f64.to_radians(), 25.0);
        let out = bend([2.0, 0.0, 0.0], [0.0; 3], [0.0, 3.0, 0.0], params).unwrap();
        for f in out.forces {
            assert_vec_close(f, ZERO, 1e-12);
        }
    }

    #[test]
    fn bend_matches_energy_gradient() {
        let params = TermParams::new(113f64.to_radians(), 50.0);
        check_gradient(
            [[4.1, -0.2, 0.3], [0.0, 0.5, 0.0], [-2.0, 3.0, 1.5]],
            |p| bend(p[0], p[1], p[2], params).unwrap(),
        );
    }

    #[test]
    fn bend_opens_a_closed_angle() {
        // 60 degrees against a 120 degree equilibrium: outer beads move apart.
        let params = TermParams::new(120f64.to_radians(), 25.0);
        let pi = [1.0, 0.0, 0.0];
        let pk = [0.5, 3f64.sqrt() / 2.0, 0.0];
        let out = bend(pi, [0.0; 3], pk, params).unwrap();
        let separation = vector::sub(pk, pi);
        assert!(vector::dot(out.forces[2], separation) > 0.0);
        assert!(vector::dot(out.forces[0], separation) < 0.0);
    }

    #[test]
    fn bend_zero_arm_is_degenerate() {
        let p = [0.0; 3];
        assert_eq!(
            bend(p, p, [1.0, 0.0, 0.0], TermParams::new(1.0, 1.0)),
            Err(GeometryError::CoincidentBeads)
        );
    }

    #[test]
    fn dihedral_angle_conventions() {
        let j = [0.0; 3];
        let k = [1.0, 0.0, 0.0];
        let i = [0.0, 1.0, 0.0];
        let cis = dihedral_angle(i, j, k, [1.0, 1.0, 0.0]).unwrap();
        let trans = dihedral_angle(i, j, k, [1.0, -1.0, 0.0]).unwrap();
        let gauche = dihedral_angle(i, j, k, [1.0, 0.0, 1.0]).unwrap();
        assert!(cis.abs() < TOL);
        assert!((trans - PI).abs() < TOL);
        assert!((gauche - PI / 2.0).abs() < TOL);
        let mirrored = dihedral_angle(i, j, k, [1.0, 0.0, -1.0]).unwrap();
        assert!((mirrored + PI / 2.0).abs() < TOL);
    }

    #[test]
    fn torsion_forces_sum_to_zero() {
        let j = [0.0; 3];
        let k = [1.5, 0.0, 0.0];
        let i = [-0.4, 1.2, 0.0];
        // Fourth bead swept from near-cis through gauche to near-trans.
        let fourths = [
            [1.9, 1.2, 0.01],
            [1.9, 1.2, -0.01],
            [1.9, 0.8, 0.9],
            [1.9, 0.0, 1.3],
            [1.9, -0.9, -0.7],
            [1.9, -1.2, 0.01],
            [1.9, -1.2, -0.01],
        ];
        for equilibrium in [0.0, 0.5, PI / 2.0, PI] {
            let params = TermParams::new(equilibrium, 2.0);
            for l in fourths {
                let out = torsion(i, j, k, l, params).unwrap();
                assert_sums_to_zero(&out.forces);
                assert!(out.is_finite());
            }
        }

        let out = torsion(
            [1.0, 0.3, 0.1],
            [0.2, 0.1, -0.2],
            [0.4, 1.3, 0.5],
            [1.5, 1.9, -0.4],
            TermParams::new(0.5, 2.0),
        )
        .unwrap();
        assert_sums_to_zero(&out.forces);
        assert!(out.energy > 0.0);
    }

    #[test]
    fn torsion_matches_energy_gradient() {
        let params = TermParams::new(0.5, 2.0);
        check_gradient(
            [
                [1.0, 0.3, 0.1],
                [0.2, 0.1, -0.2],
                [0.4, 1.3, 0.5],
                [1.5, 1.9, -0.4],
            ],
            |p| torsion(p[0], p[1], p[2], p[3], params).unwrap(),
        );
    }

    #[test]
    fn torsion_wraps_across_pi() {
        // Current angle near -pi against equilibrium pi: a small difference.
        let params = TermParams::new(PI, 1.0);
        let j = [0.0; 3];
        let k = [1.0, 0.0, 0.0];
        let i = [0.0, 1.0, 0.0];
        let l = [1.0, -1.0, -0.01];
        let out = torsion(i, j, k, l, params).unwrap();
        assert!(out.energy < 1e-3);
    }

    #[test]
    fn inert_torsion_is_zero_anywhere() {
        let p = [0.0; 3];
        let out = torsion(p, p, p, p, TermParams::INERT).unwrap();
        assert_eq!(out, TermForces::ZERO);
    }

    #[test]
    fn collinear_torsion_is_degenerate() {
        let result = torsion(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [3.0, 1.0, 0.0],
            TermParams::new(0.0, 1.0),
        );
        assert_eq!(result, Err(GeometryError::Collinear));
    }

    #[test]
    fn wrap_angle_range() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < TOL);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < TOL);
        assert_eq!(wrap_angle(-PI), PI);
        assert!((wrap_angle(0.25) - 0.25).abs() < TOL);
    }
}
