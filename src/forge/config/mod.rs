//! Configuration types for chain setup and force evaluation.
//!
//! # Overview
//!
//! - [`ForgeConfig`] — Main configuration struct
//! - [`NeighborPolicy`] — When the non-bonded pair list is rebuilt
//! - [`EvaluationMode`] — Parallel or serial per-tick evaluation

mod policy;

pub use policy::{EvaluationMode, NeighborPolicy};

use super::error::Error;

/// Multiplier applied to every stored force constant when a term's
/// parameters are resolved.
///
/// Parameter tables keep the external force-field unit convention; the
/// evaluator works in units one thousand times larger.
pub const FORCE_CONSTANT_SCALE: f64 = 1000.0;

/// Default radius of non-bonded neighbor discovery, in system length units.
pub const DEFAULT_CUTOFF: f64 = 12.0;

/// Main configuration for forging a chain.
///
/// # Examples
///
/// ```
/// use martini_forge::{ForgeConfig, NeighborPolicy, EvaluationMode};
///
/// // Embedded parameter tables, static pair list, parallel evaluation
/// let default = ForgeConfig::default();
///
/// // Rebuild pairs every 50 ticks and evaluate on the calling thread
/// let custom = ForgeConfig {
///     neighbor_policy: NeighborPolicy::Refresh { every: 50 },
///     evaluation: EvaluationMode::Serial,
///     ..Default::default()
/// };
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ForgeConfig {
    /// Custom parameter tables in TOML format.
    ///
    /// If `None`, uses the embedded `default.params.toml`, which carries
    /// only the bead-type angle defaults.
    pub params: Option<String>,

    /// Scale applied to stored force constants, see [`FORCE_CONSTANT_SCALE`].
    pub force_constant_scale: f64,

    /// Scale applied to interaction-class epsilons (kJ/mol in the table).
    pub epsilon_scale: f64,

    /// Non-bonded neighbor discovery radius.
    pub cutoff: f64,

    pub neighbor_policy: NeighborPolicy,

    pub evaluation: EvaluationMode,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            params: None,
            force_constant_scale: FORCE_CONSTANT_SCALE,
            epsilon_scale: 1.0,
            cutoff: DEFAULT_CUTOFF,
            neighbor_policy: NeighborPolicy::Static,
            evaluation: EvaluationMode::Parallel,
        }
    }
}

impl ForgeConfig {
    /// Checks every numeric setting for a usable range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.cutoff.is_finite() && self.cutoff > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "cutoff must be positive and finite, got {}",
                self.cutoff
            )));
        }
        if !(self.force_constant_scale.is_finite() && self.force_constant_scale >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "force_constant_scale must be non-negative and finite, got {}",
                self.force_constant_scale
            )));
        }
        if !(self.epsilon_scale.is_finite() && self.epsilon_scale >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "epsilon_scale must be non-negative and finite, got {}",
                self.epsilon_scale
            )));
        }
        if let NeighborPolicy::Refresh { every: 0 } = self.neighbor_policy {
            return Err(Error::InvalidConfig(
                "neighbor refresh interval must be at least one tick".to_string(),
            ));
        }
        Ok(())
    }
}
