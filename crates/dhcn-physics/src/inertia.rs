// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Inertia Limit
// Mirrors: 02_inertia_limit.py
// ─────────────────────────────────────────────────────────────────────
//! Constant force on a bandwidth-limited agent.
//!
//!   dp/dt = F
//!   v     = p / √((m c)² + (p / c)²)     (always < c)
//!   m_eff = F / a                          (undefined once a vanishes)
//!
//! The internal clock is charged with the same bandwidth split as
//! [`crate::bandwidth`].

use serde::{Deserialize, Serialize};

use dhcn_types::error::{ensure_finite, ensure_positive};
use dhcn_types::DhcnResult;

use crate::bandwidth::BandwidthParams;
use crate::params::{linspace, step_count, OMEGA_MAX, REST_MASS, SPEED_OF_LIGHT};

/// Below this acceleration no effective inertia is reported.
pub const MIN_ACCELERATION: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaParams {
    pub c: f64,
    pub omega_max: f64,
    pub rest_mass: f64,
}

impl Default for InertiaParams {
    fn default() -> Self {
        Self {
            c: SPEED_OF_LIGHT,
            omega_max: OMEGA_MAX,
            rest_mass: REST_MASS,
        }
    }
}

impl InertiaParams {
    pub fn validate(&self) -> DhcnResult<()> {
        ensure_positive("c", self.c)?;
        ensure_positive("omega_max", self.omega_max)?;
        ensure_positive("rest_mass", self.rest_mass)
    }

    fn bandwidth(&self) -> BandwidthParams {
        BandwidthParams {
            c: self.c,
            omega_max: self.omega_max,
        }
    }

    /// Speed reached at momentum `p`.
    pub fn speed_from_momentum(&self, p: f64) -> f64 {
        p / ((self.rest_mass * self.c).powi(2) + (p / self.c).powi(2)).sqrt()
    }
}

/// State after one force application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaSample {
    pub t: f64,
    pub speed: f64,
    pub acceleration: f64,
    /// F / a; `None` once the acceleration drops below [`MIN_ACCELERATION`].
    pub effective_inertia: Option<f64>,
    pub internal_clock: f64,
}

/// Agent accelerated by an external force.
#[derive(Debug, Clone)]
pub struct DynamicAgent {
    pub name: String,
    momentum: f64,
    speed: f64,
    internal_clock: f64,
    params: InertiaParams,
}

impl DynamicAgent {
    pub fn new(name: impl Into<String>, params: InertiaParams) -> Self {
        Self {
            name: name.into(),
            momentum: 0.0,
            speed: 0.0,
            internal_clock: 0.0,
            params,
        }
    }

    /// Apply `force` for `dt`: update momentum, solve for speed, and
    /// charge the internal clock. `t` is left at 0 for the caller to fill.
    pub fn apply_force(&mut self, force: f64, dt: f64) -> InertiaSample {
        self.momentum += force * dt;

        let old_speed = self.speed;
        self.speed = self.params.speed_from_momentum(self.momentum);
        let acceleration = (self.speed - old_speed) / dt;

        let effective_inertia = (acceleration > MIN_ACCELERATION).then(|| force / acceleration);

        self.internal_clock += self.params.bandwidth().internal_frequency(self.speed) * dt;

        InertiaSample {
            t: 0.0,
            speed: self.speed,
            acceleration,
            effective_inertia,
            internal_clock: self.internal_clock,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn internal_clock(&self) -> f64 {
        self.internal_clock
    }
}

/// Output of [`simulate_inertia`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InertiaReport {
    pub force: f64,
    pub samples: Vec<InertiaSample>,
    /// v = (F / m) t, no light-speed cap.
    pub newtonian_speed: Vec<f64>,
}

impl InertiaReport {
    pub fn final_sample(&self) -> Option<&InertiaSample> {
        self.samples.last()
    }
}

/// Push a resting agent with a constant force for `⌊total_time / dt⌋` steps.
pub fn simulate_inertia(
    params: InertiaParams,
    force: f64,
    total_time: f64,
    dt: f64,
) -> DhcnResult<InertiaReport> {
    params.validate()?;
    ensure_finite("force", force)?;
    ensure_positive("total_time", total_time)?;
    ensure_positive("dt", dt)?;

    let steps = step_count(total_time, dt);
    let time_axis = linspace(0.0, total_time, steps);
    let mut agent = DynamicAgent::new("rocket", params);

    let samples: Vec<InertiaSample> = time_axis
        .iter()
        .map(|&t| InertiaSample {
            t,
            ..agent.apply_force(force, dt)
        })
        .collect();

    let newtonian_speed = time_axis
        .iter()
        .map(|t| (force / params.rest_mass) * t)
        .collect();

    log::debug!(
        "inertia run: F={force}, steps={steps}, final speed={:.4}c",
        agent.speed() / params.c
    );

    Ok(InertiaReport {
        force,
        samples,
        newtonian_speed,
    })
}
