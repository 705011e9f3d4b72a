//! Run-time policy selections.
//!
//! These enums choose how the per-tick evaluator behaves without changing
//! any force formula.

/// When the non-bonded pair list is rebuilt.
///
/// Pairs that drift into or out of the cutoff after setup are only seen
/// by a refreshing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborPolicy {
    /// Pairs are found once, from the setup positions.
    #[default]
    Static,

    /// Pairs are rebuilt from current positions every `every` ticks.
    Refresh { every: usize },
}

impl NeighborPolicy {
    /// Whether the pair list is stale at the start of tick `tick`
    /// (zero-based, counted since setup).
    pub fn refresh_due(&self, tick: u64) -> bool {
        match *self {
            NeighborPolicy::Static => false,
            NeighborPolicy::Refresh { every } => {
                every > 0 && tick > 0 && tick % every as u64 == 0
            }
        }
    }
}

/// How a tick's terms are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationMode {
    /// Terms are spread across the rayon thread pool and per-bead totals
    /// are merged in a reduction pass.
    #[default]
    Parallel,

    /// Terms are evaluated in order on the calling thread.
    Serial,
}
