// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Crystal Configuration
// Mirrors crystal parameters of: 06_spacetime_crystal.py
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, DhcnError, DhcnResult};

/// Parameters of the spacetime-crystal evolver.
///
/// Everything the evolver needs is passed in here; there is no
/// process-wide state. The defaults are the "high energy" run: a dense
/// 60-node graph where any edge without shared neighbours is cut
/// within a handful of ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalConfig {
    /// Number of nodes, fixed for the lifetime of the graph.
    /// Default: 60.
    pub node_count: usize,

    /// Bernoulli inclusion probability for every unordered node pair.
    /// Default: 0.25.
    pub edge_probability: f64,

    /// Reward per unit of curvature ("gravity").
    /// Default: 0.3.
    pub gravity_strength: f64,

    /// Uniform per-tick penalty applied to every edge ("dark energy").
    /// Default: 0.1.
    pub dark_energy: f64,

    /// Edges whose updated weight falls below this are removed.
    /// Default: 0.5.
    pub cutoff_threshold: f64,

    /// Upper clamp for edge weights.
    /// Default: 2.0.
    pub weight_cap: f64,

    /// Number of ticks a full run drives the evolver for.
    /// Default: 60.
    pub tick_count: usize,

    /// Seed for the initial graph draw.
    /// Default: 42.
    pub seed: u64,
}

impl Default for CrystalConfig {
    fn default() -> Self {
        Self {
            node_count: 60,
            edge_probability: 0.25,
            gravity_strength: 0.3,
            dark_energy: 0.1,
            cutoff_threshold: 0.5,
            weight_cap: 2.0,
            tick_count: 60,
            seed: 42,
        }
    }
}

impl CrystalConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> DhcnResult<()> {
        if self.node_count == 0 {
            return Err(DhcnError::invalid("node_count must be > 0, got 0"));
        }
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(DhcnError::invalid(format!(
                "edge_probability must be in [0, 1], got {}",
                self.edge_probability
            )));
        }
        ensure_finite("gravity_strength", self.gravity_strength)?;
        ensure_finite("dark_energy", self.dark_energy)?;
        ensure_finite("cutoff_threshold", self.cutoff_threshold)?;
        ensure_finite("weight_cap", self.weight_cap)?;
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> DhcnResult<Self> {
        serde_json::from_str(json).map_err(|e| DhcnError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialise to a JSON string.
    pub fn to_json(&self) -> DhcnResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DhcnError::Config(format!("JSON encode error: {e}")))
    }
}
