//! Hand-off of tick forces to the integrator.

use super::accumulate::TickForces;
use super::vector::{self, Vec3, ZERO};

/// Receiver of per-bead external forces, typically the integrator's force
/// accumulator.
///
/// Forces are additive: the sink adds each vector on top of whatever else
/// it has gathered for the bead this tick.
pub trait ForceSink {
    fn add_force(&mut self, bead: usize, force: Vec3);
}

impl ForceSink for Vec<Vec3> {
    fn add_force(&mut self, bead: usize, force: Vec3) {
        if bead >= self.len() {
            self.resize(bead + 1, ZERO);
        }
        vector::add_assign(&mut self[bead], force);
    }
}

impl<S: ForceSink + ?Sized> ForceSink for &mut S {
    fn add_force(&mut self, bead: usize, force: Vec3) {
        (**self).add_force(bead, force);
    }
}

impl TickForces {
    /// Adds every bead's net force to `sink`.
    pub fn apply_to<S: ForceSink + ?Sized>(&self, sink: &mut S) {
        for (bead, force) in self.forces.iter().enumerate() {
            sink.add_force(bead, *force);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EnergyBreakdown;

    struct Recorder(Vec<(usize, Vec3)>);

    impl ForceSink for Recorder {
        fn add_force(&mut self, bead: usize, force: Vec3) {
            self.0.push((bead, force));
        }
    }

    fn tick(forces: Vec<Vec3>) -> TickForces {
        TickForces {
            forces,
            energy: EnergyBreakdown::default(),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn vec_sink_adds_on_top() {
        let mut sink = vec![[1.0, 1.0, 1.0], ZERO];
        tick(vec![[1.0, 0.0, 0.0], [0.0, 0.0, -2.0]]).apply_to(&mut sink);
        assert_eq!(sink, vec![[2.0, 1.0, 1.0], [0.0, 0.0, -2.0]]);
    }

    #[test]
    fn vec_sink_grows_to_fit() {
        let mut sink: Vec<Vec3> = Vec::new();
        tick(vec![ZERO, [0.0, 3.0, 0.0]]).apply_to(&mut sink);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1], [0.0, 3.0, 0.0]);
    }

    #[test]
    fn every_bead_is_visited_once() {
        let mut recorder = Recorder(Vec::new());
        tick(vec![ZERO; 4]).apply_to(&mut recorder);
        let beads: Vec<usize> = recorder.0.iter().map(|(b, _)| *b).collect();
        assert_eq!(beads, vec![0, 1, 2, 3]);
    }
}
