// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Bandwidth Time Dilation
// Mirrors: 01_time_dilation.py
// ─────────────────────────────────────────────────────────────────────
//! First law of the bandwidth model: an agent splits the fixed refresh
//! budget Ω between moving through space and ticking its own clock.
//!
//!   f_x² + f_τ² = Ω²,   f_x = (v / c) Ω
//!   ⇒ f_τ = Ω √(1 − v²/c²)
//!
//! Integrating f_τ over global time gives proper time, so a moving clock
//! falls behind a static one by the Lorentz factor.

use serde::{Deserialize, Serialize};

use dhcn_types::error::{ensure_finite, ensure_positive};
use dhcn_types::{DhcnError, DhcnResult};

use crate::params::{linspace, step_count, MAX_SPEED_FRACTION, OMEGA_MAX, SPEED_OF_LIGHT};

/// Constants of the bandwidth split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandwidthParams {
    pub c: f64,
    pub omega_max: f64,
}

impl Default for BandwidthParams {
    fn default() -> Self {
        Self {
            c: SPEED_OF_LIGHT,
            omega_max: OMEGA_MAX,
        }
    }
}

impl BandwidthParams {
    pub fn validate(&self) -> DhcnResult<()> {
        ensure_positive("c", self.c)?;
        ensure_positive("omega_max", self.omega_max)
    }

    /// Bandwidth spent on spatial displacement, f_x = (v / c) Ω.
    pub fn spatial_frequency(&self, speed: f64) -> f64 {
        (speed / self.c) * self.omega_max
    }

    /// Bandwidth left for the internal clock, f_τ = √|Ω² − f_x²|.
    ///
    /// The absolute value absorbs rounding just above v = c.
    pub fn internal_frequency(&self, speed: f64) -> f64 {
        let f_x = self.spatial_frequency(speed);
        (self.omega_max.powi(2) - f_x.powi(2)).abs().sqrt()
    }

    /// Theoretical proper-time rate √(1 − v²/c²).
    pub fn lorentz_ratio(&self, speed: f64) -> f64 {
        (1.0 - (speed / self.c).powi(2)).max(0.0).sqrt()
    }
}

/// Particle-like agent whose internal clock runs on leftover bandwidth.
#[derive(Debug, Clone)]
pub struct NetworkAgent {
    pub name: String,
    velocity: Vec<f64>,
    speed: f64,
    internal_clock: f64,
    clock_history: Vec<f64>,
    params: BandwidthParams,
}

impl NetworkAgent {
    /// Create an agent; speeds at or above `c` are clamped to 0.999 c.
    pub fn new(name: impl Into<String>, velocity: &[f64], params: BandwidthParams) -> Self {
        let name = name.into();
        let mut velocity = velocity.to_vec();
        let mut speed = velocity.iter().map(|v| v * v).sum::<f64>().sqrt();

        if speed >= params.c {
            let clamped = MAX_SPEED_FRACTION * params.c;
            log::warn!("{name}: speed {speed:.4} exceeds c, clamping to {clamped:.4}");
            for v in velocity.iter_mut() {
                *v *= clamped / speed;
            }
            speed = clamped;
        }

        Self {
            name,
            velocity,
            speed,
            internal_clock: 0.0,
            clock_history: Vec::new(),
            params,
        }
    }

    /// Advance by one global step `dt`, accruing f_τ · dt internal ticks.
    pub fn update_step(&mut self, dt: f64) {
        self.internal_clock += self.params.internal_frequency(self.speed) * dt;
        self.clock_history.push(self.internal_clock);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn internal_clock(&self) -> f64 {
        self.internal_clock
    }

    pub fn clock_history(&self) -> &[f64] {
        &self.clock_history
    }
}

/// Clock trace of one agent after a dilation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTrace {
    pub name: String,
    /// Speed in units of c.
    pub speed_c: f64,
    pub final_clock: f64,
    /// Measured clock ratio against the reference agent, `None` when the
    /// reference clock never ticked.
    pub measured_ratio: Option<f64>,
    /// Lorentz prediction of the same ratio.
    pub predicted_ratio: f64,
    pub clock_history: Vec<f64>,
}

/// Output of [`simulate_dilation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DilationReport {
    pub time_axis: Vec<f64>,
    /// Ticks an agent holding the whole bandwidth would accumulate, Ω · t.
    pub max_ticks: Vec<f64>,
    /// One trace per agent; the first is the reference.
    pub agents: Vec<AgentTrace>,
}

/// Run every agent for `⌊total_time / dt⌋` global steps.
///
/// The first agent is the reference clock for the ratios.
pub fn simulate_dilation(
    params: BandwidthParams,
    agents: &[(String, Vec<f64>)],
    total_time: f64,
    dt: f64,
) -> DhcnResult<DilationReport> {
    params.validate()?;
    ensure_positive("total_time", total_time)?;
    ensure_positive("dt", dt)?;
    if agents.is_empty() {
        return Err(DhcnError::invalid("at least one agent is required"));
    }
    for (name, velocity) in agents {
        for &v in velocity {
            ensure_finite(&format!("{name} velocity"), v)?;
        }
    }

    let steps = step_count(total_time, dt);
    let mut agents: Vec<NetworkAgent> = agents
        .iter()
        .map(|(name, v)| NetworkAgent::new(name.clone(), v, params))
        .collect();

    for _ in 0..steps {
        for agent in agents.iter_mut() {
            agent.update_step(dt);
        }
    }

    let reference_clock = agents[0].internal_clock();
    let reference_rate = params.lorentz_ratio(agents[0].speed());
    if reference_clock <= 0.0 {
        log::warn!("reference clock did not tick; ratios unavailable");
    }

    let traces = agents
        .iter()
        .map(|a| AgentTrace {
            name: a.name.clone(),
            speed_c: a.speed() / params.c,
            final_clock: a.internal_clock(),
            measured_ratio: (reference_clock > 0.0).then(|| a.internal_clock() / reference_clock),
            predicted_ratio: if reference_rate > 0.0 {
                params.lorentz_ratio(a.speed()) / reference_rate
            } else {
                0.0
            },
            clock_history: a.clock_history().to_vec(),
        })
        .collect();

    let time_axis = linspace(0.0, total_time, steps);
    let max_ticks = time_axis.iter().map(|t| params.omega_max * t).collect();

    Ok(DilationReport {
        time_axis,
        max_ticks,
        agents: traces,
    })
}
