//! Bead-category interaction table for the Lennard-Jones term.
//!
//! Every pair of the nineteen [`BeadCategory`] values maps to one of ten
//! interaction classes, and each class to a base well depth (epsilon, in
//! kJ/mol). The contact distance (sigma) follows a small piecewise rule on
//! bead family and size.

use crate::model::bead::Bead;
use crate::model::types::{BeadCategory, SizeClass};
use std::fmt;

/// Epsilon multiplier applied when either bead of a pair is small.
pub const SMALL_EPSILON_FACTOR: f64 = 0.75;

/// Sigma for two charged (`Q`) beads.
pub const SIGMA_CHARGED: f64 = 6.2;
/// Sigma for two beads drawn from `C1`/`C2`.
pub const SIGMA_APOLAR: f64 = 6.2;
/// Sigma when either bead is the `BP4` antifreeze marker.
pub const SIGMA_ANTIFREEZE: f64 = 5.7;
/// Sigma when either bead is small.
pub const SIGMA_SMALL: f64 = 4.3;
/// Sigma for every other pair.
pub const SIGMA_DEFAULT: f64 = 4.7;

/// Discretized non-bonded interaction strength, strongest (`O`) to
/// weakest (`IX`).
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InteractionClass {
    O,
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
    IX,
}

impl InteractionClass {
    /// The class assumed for beads outside the table.
    pub const WEAKEST: InteractionClass = InteractionClass::IX;

    /// Base well depth in kJ/mol.
    pub fn epsilon(&self) -> f64 {
        match self {
            InteractionClass::O => 5.6,
            InteractionClass::I => 5.0,
            InteractionClass::II => 4.5,
            InteractionClass::III => 4.0,
            InteractionClass::IV => 3.5,
            InteractionClass::V => 3.1,
            InteractionClass::VI => 2.7,
            InteractionClass::VII => 2.3,
            InteractionClass::VIII => 2.0,
            InteractionClass::IX => 2.0,
        }
    }
}

impl fmt::Display for InteractionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const N: usize = BeadCategory::COUNT;

#[rustfmt::skip]
const LEVELS: [[InteractionClass; N]; N] = {
    use InteractionClass::*;
    [
        // Qda
        [O, O, O, II, O, O, O, I, I, I, I, I, IV, V, VI, VII, IX, IX, O],
        // Qd
        [O, I, O, II, O, O, O, I, I, I, III, I, IV, V, VI, VII, IX, IX, O],
        // Qa
        [O, O, I, II, O, O, O, I, I, I, I, III, IV, V, VI, VII, IX, IX, O],
        // Q0
        [II, II, II, IV, I, O, I, II, III, III, III, III, IV, V, VI, VII, IX, IX, O],
        // P5
        [O, O, O, I, O, O, O, O, O, I, I, I, IV, V, VI, VI, VII, VIII, O],
        // P4
        [O, O, O, O, O, I, I, II, II, III, III, III, IV, V, VI, VI, VII, VIII, O],
        // P3
        [O, O, O, I, O, I, I, II, II, II, II, II, IV, IV, V, V, VI, VII, O],
        // P2
        [I, I, I, II, O, II, II, II, II, II, II, II, III, IV, IV, V, VI, VII, O],
        // P1
        [I, I, I, III, O, II, II, II, II, II, II, II, III, IV, IV, IV, V, VI, O],
        // Nda
        [I, I, I, III, I, III, II, II, II, II, II, II, IV, IV, V, VI, VI, VI, O],
        // Nd
        [I, III, I, III, I, III, II, II, II, II, III, II, IV, IV, V, VI, VI, VI, O],
        // Na
        [I, I, III, III, I, III, II, II, II, II, II, III, IV, IV, V, VI, VI, VI, O],
        // N0
        [IV, IV, IV, IV, IV, IV, IV, III, III, IV, IV, IV, IV, IV, IV, IV, V, VI, O],
        // C5
        [V, V, V, V, V, V, IV, IV, IV, IV, IV, IV, IV, IV, IV, IV, V, V, O],
        // C4
        [VI, VI, VI, VI, VI, VI, V, IV, IV, V, V, V, IV, IV, IV, IV, V, V, O],
        // C3
        [VII, VII, VII, VII, VI, VI, V, V, IV, VI, VI, VI, IV, IV, IV, IV, IV, IV, O],
        // C2
        [IX, IX, IX, IX, VII, VII, VI, VI, V, VI, VI, VI, V, V, V, IV, IV, IV, O],
        // C1
        [IX, IX, IX, IX, VIII, VIII, VII, VII, VI, VI, VI, VI, VI, V, V, IV, IV, IV, O],
        // BP4
        [O, O, O, O, O, O, O, O, O, O, O, O, O, O, O, O, O, O, O],
    ]
};

/// Interaction class of two categories. Unknown categories fail closed to
/// [`InteractionClass::WEAKEST`].
pub fn classify(a: Option<BeadCategory>, b: Option<BeadCategory>) -> InteractionClass {
    match (a, b) {
        (Some(a), Some(b)) => LEVELS[a.index()][b.index()],
        _ => InteractionClass::WEAKEST,
    }
}

/// Well depth of a class for beads of the given sizes, in kJ/mol.
pub fn energy_scale(class: InteractionClass, size_a: SizeClass, size_b: SizeClass) -> f64 {
    if size_a.is_small() || size_b.is_small() {
        class.epsilon() * SMALL_EPSILON_FACTOR
    } else {
        class.epsilon()
    }
}

fn is_apolar_pair_member(bead: &Bead) -> bool {
    matches!(
        bead.bead_type.category(),
        Some(BeadCategory::C1 | BeadCategory::C2)
    )
}

fn is_antifreeze(bead: &Bead) -> bool {
    bead.bead_type.category() == Some(BeadCategory::BP4)
}

/// Contact distance of a bead pair; the first matching rule wins.
pub fn effective_size(a: &Bead, b: &Bead) -> f64 {
    if a.bead_type.is_charged() && b.bead_type.is_charged() {
        SIGMA_CHARGED
    } else if is_apolar_pair_member(a) && is_apolar_pair_member(b) {
        SIGMA_APOLAR
    } else if is_antifreeze(a) || is_antifreeze(b) {
        SIGMA_ANTIFREEZE
    } else if a.size.is_small() || b.size.is_small() {
        SIGMA_SMALL
    } else {
        SIGMA_DEFAULT
    }
}

/// Per-chain view of the table with the configured epsilon unit scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionTable {
    epsilon_scale: f64,
}

impl InteractionTable {
    pub fn new(epsilon_scale: f64) -> Self {
        Self { epsilon_scale }
    }

    /// Class, sigma and scaled epsilon for a bead pair.
    pub fn pair_parameters(
        &self,
        a: &Bead,
        category_a: Option<BeadCategory>,
        b: &Bead,
        category_b: Option<BeadCategory>,
    ) -> (InteractionClass, f64, f64) {
        let class = classify(category_a, category_b);
        let epsilon = energy_scale(class, a.size, b.size) * self.epsilon_scale;
        (class, effective_size(a, b), epsilon)
    }
}

impl Default for InteractionTable {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bead(name: &str) -> Bead {
        Bead::from_martini(0, name, [0.0; 3], 72.0).unwrap()
    }

    #[test]
    fn table_is_symmetric() {
        for a in BeadCategory::ALL {
            for b in BeadCategory::ALL {
                assert_eq!(
                    classify(Some(a), Some(b)),
                    classify(Some(b), Some(a)),
                    "{} / {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn known_table_entries() {
        use BeadCategory::*;
        assert_eq!(classify(Some(Qda), Some(Qda)), InteractionClass::O);
        assert_eq!(classify(Some(Qd), Some(Nd)), InteractionClass::III);
        assert_eq!(classify(Some(Q0), Some(Q0)), InteractionClass::IV);
        assert_eq!(classify(Some(P5), Some(C1)), InteractionClass::VIII);
        assert_eq!(classify(Some(Qa), Some(C2)), InteractionClass::IX);
        assert_eq!(classify(Some(C1), Some(C1)), InteractionClass::IV);
        assert_eq!(classify(Some(BP4), Some(P4)), InteractionClass::O);
    }

    #[test]
    fn unknown_category_fails_closed() {
        assert_eq!(
            classify(None, Some(BeadCategory::P4)),
            InteractionClass::WEAKEST
        );
        assert_eq!(classify(None, None), InteractionClass::IX);
    }

    #[test]
    fn class_epsilons_decrease() {
        assert_eq!(InteractionClass::O.epsilon(), 5.6);
        assert_eq!(InteractionClass::IV.epsilon(), 3.5);
        assert_eq!(InteractionClass::IX.epsilon(), 2.0);
        assert!(InteractionClass::O.epsilon() > InteractionClass::I.epsilon());
        assert!(InteractionClass::VII.epsilon() > InteractionClass::VIII.epsilon());
    }

    #[test]
    fn small_beads_scale_epsilon() {
        let regular = energy_scale(InteractionClass::II, SizeClass::Regular, SizeClass::Regular);
        let small = energy_scale(InteractionClass::II, SizeClass::Small, SizeClass::Regular);
        assert_eq!(regular, 4.5);
        assert!((small - 4.5 * 0.75).abs() < 1e-12);
        assert_eq!(
            small,
            energy_scale(InteractionClass::II, SizeClass::Regular, SizeClass::Small)
        );
    }

    #[test]
    fn effective_size_rules_in_order() {
        assert_eq!(effective_size(&bead("Qa"), &bead("Q0")), SIGMA_CHARGED);
        // Charged beats small.
        assert_eq!(effective_size(&bead("SQa"), &bead("Qd")), SIGMA_CHARGED);
        assert_eq!(effective_size(&bead("C1"), &bead("C2")), SIGMA_APOLAR);
        assert_eq!(effective_size(&bead("SC1"), &bead("C1")), SIGMA_APOLAR);
        assert_eq!(effective_size(&bead("BP4"), &bead("SP1")), SIGMA_ANTIFREEZE);
        assert_eq!(effective_size(&bead("SP1"), &bead("C3")), SIGMA_SMALL);
        assert_eq!(effective_size(&bead("P4"), &bead("Nda")), SIGMA_DEFAULT);
        assert_eq!(effective_size(&bead("C1"), &bead("C3")), SIGMA_DEFAULT);
    }

    #[test]
    fn pair_parameters_apply_epsilon_scale() {
        let table = InteractionTable::new(1000.0);
        let a = bead("P4");
        let b = bead("SP4");
        let (class, sigma, epsilon) =
            table.pair_parameters(&a, a.bead_type.category(), &b, b.bead_type.category());
        assert_eq!(class, InteractionClass::I);
        assert_eq!(sigma, SIGMA_SMALL);
        assert!((epsilon - 5.0 * 0.75 * 1000.0).abs() < 1e-9);
    }
}
