use super::bead::Bead;

/// An undirected bonded edge, stored with `i <= j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2 }
        } else {
            Self { i: idx2, j: idx1 }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Chain {
    pub beads: Vec<Bead>,
    pub bonds: Vec<Bond>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn bead_count(&self) -> usize {
        self.beads.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.beads.iter().map(|b| b.position).collect()
    }

    pub fn masses(&self) -> Vec<f64> {
        self.beads.iter().map(|b| b.mass).collect()
    }

    pub fn total_mass(&self) -> f64 {
        self.beads.iter().map(|b| b.mass).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_new_orders_endpoints() {
        assert_eq!(Bond::new(3, 1), Bond { i: 1, j: 3 });
        assert_eq!(Bond::new(1, 3), Bond::new(3, 1));
    }

    #[test]
    fn chain_collects_positions_and_mass() {
        let mut chain = Chain::new();
        chain
            .beads
            .push(Bead::from_martini(0, "P4", [0.0, 0.0, 0.0], 72.0).unwrap());
        chain
            .beads
            .push(Bead::from_martini(1, "SC1", [4.7, 0.0, 0.0], 54.0).unwrap());
        chain.bonds.push(Bond::new(0, 1));

        assert_eq!(chain.bead_count(), 2);
        assert_eq!(chain.bond_count(), 1);
        assert_eq!(chain.positions(), vec![[0.0, 0.0, 0.0], [4.7, 0.0, 0.0]]);
        assert_eq!(chain.masses(), vec![72.0, 54.0]);
        assert_eq!(chain.total_mass(), 126.0);
        assert!(chain.beads[1].size.is_small());
    }
}
