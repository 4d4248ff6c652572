// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Cosmic Expansion
// Mirrors: 05_cosmic_expansion.py
// ─────────────────────────────────────────────────────────────────────
//! Two-component expansion history:
//!
//!   v_matter ← v_matter / (1 + drag)     (gravity slows the bang)
//!   v_dark    = size · λ                  (network grows with space)
//!   size     += v_matter + v_dark
//!
//! Early on the decaying matter term dominates and expansion slows;
//! later the size-proportional term takes over. The minimum of the total
//! velocity is the "cosmic jerk".

use serde::{Deserialize, Serialize};

use dhcn_types::error::{ensure_finite, ensure_positive};
use dhcn_types::{DhcnError, DhcnResult};

use crate::params::argmin;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpansionParams {
    pub initial_size: f64,
    /// Initial (big-bang) expansion velocity.
    pub hubble_0: f64,
    /// Per-step fractional slowdown of the matter term.
    pub gravity_drag: f64,
    /// Per-step network growth rate.
    pub lambda: f64,
    pub steps: usize,
}

impl Default for ExpansionParams {
    fn default() -> Self {
        Self {
            initial_size: 50.0,
            hubble_0: 3.0,
            gravity_drag: 0.05,
            lambda: 0.008,
            steps: 150,
        }
    }
}

impl ExpansionParams {
    pub fn validate(&self) -> DhcnResult<()> {
        ensure_positive("initial_size", self.initial_size)?;
        ensure_finite("hubble_0", self.hubble_0)?;
        ensure_finite("gravity_drag", self.gravity_drag)?;
        ensure_finite("lambda", self.lambda)?;
        if self.gravity_drag <= -1.0 {
            return Err(DhcnError::invalid(format!(
                "gravity_drag must be > -1, got {}",
                self.gravity_drag
            )));
        }
        Ok(())
    }
}

/// Per-step record of the expansion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpansionHistory {
    /// Total expansion velocity after each step.
    pub velocities: Vec<f64>,
    /// Matter contribution after each step.
    pub matter: Vec<f64>,
    /// Network-growth contribution after each step.
    pub dark_energy: Vec<f64>,
    /// Size of the universe after each step.
    pub sizes: Vec<f64>,
}

impl ExpansionHistory {
    /// `(step, velocity)` of the slowest expansion.
    pub fn jerk_point(&self) -> Option<(usize, f64)> {
        argmin(&self.velocities).map(|i| (i, self.velocities[i]))
    }

    /// True when the jerk point lies strictly inside the run, i.e. a
    /// decelerating phase was followed by an accelerating one.
    pub fn has_transition(&self) -> bool {
        matches!(self.jerk_point(), Some((i, _)) if i > 0 && i + 1 < self.velocities.len())
    }
}

pub fn simulate_expansion(params: &ExpansionParams) -> DhcnResult<ExpansionHistory> {
    params.validate()?;

    let mut history = ExpansionHistory {
        velocities: Vec::with_capacity(params.steps),
        matter: Vec::with_capacity(params.steps),
        dark_energy: Vec::with_capacity(params.steps),
        sizes: Vec::with_capacity(params.steps),
    };

    let mut size = params.initial_size;
    let mut v_matter = params.hubble_0;

    for _ in 0..params.steps {
        v_matter /= 1.0 + params.gravity_drag;
        let v_dark = size * params.lambda;
        let v_total = v_matter + v_dark;
        size += v_total;

        history.velocities.push(v_total);
        history.matter.push(v_matter);
        history.dark_energy.push(v_dark);
        history.sizes.push(size);
    }

    if let Some((t, v)) = history.jerk_point() {
        log::debug!("expansion: jerk at step {t}, v={v:.4}, final size={size:.2}");
    }
    Ok(history)
}
