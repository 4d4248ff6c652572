//! Subcommand arguments and handlers.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use dhcn_crystal::SpacetimeCrystal;
use dhcn_physics::params::linspace;
use dhcn_physics::{
    simulate_dilation, simulate_expansion, simulate_inertia, BandwidthParams, ExpansionHistory,
    ExpansionParams, InertiaParams, InterferencePattern, Minimum, Observation, RotationModel,
    RotationSample, TwoSlitConfig,
};
use dhcn_types::{CrystalConfig, CrystalReport};

/// Crystal summary prints every n-th tick.
const SUMMARY_STRIDE: usize = 10;

fn emit_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// crystal
// ============================================================================

#[derive(Args, Debug)]
pub struct CrystalArgs {
    /// JSON file with a crystal config; flags below override its fields
    #[arg(long, env = "DHCN_CRYSTAL_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub nodes: Option<usize>,

    #[arg(long)]
    pub probability: Option<f64>,

    #[arg(long)]
    pub gravity: Option<f64>,

    #[arg(long)]
    pub dark_energy: Option<f64>,

    #[arg(long)]
    pub cutoff: Option<f64>,

    #[arg(long)]
    pub cap: Option<f64>,

    #[arg(long)]
    pub ticks: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CrystalArgs {
    fn resolve_config(&self) -> anyhow::Result<CrystalConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                log::info!("loaded crystal config from {}", path.display());
                CrystalConfig::from_json(&text)?
            }
            None => CrystalConfig::default(),
        };

        if let Some(v) = self.nodes {
            cfg.node_count = v;
        }
        if let Some(v) = self.probability {
            cfg.edge_probability = v;
        }
        if let Some(v) = self.gravity {
            cfg.gravity_strength = v;
        }
        if let Some(v) = self.dark_energy {
            cfg.dark_energy = v;
        }
        if let Some(v) = self.cutoff {
            cfg.cutoff_threshold = v;
        }
        if let Some(v) = self.cap {
            cfg.weight_cap = v;
        }
        if let Some(v) = self.ticks {
            cfg.tick_count = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        Ok(cfg)
    }
}

pub fn run_crystal(args: CrystalArgs) -> anyhow::Result<()> {
    let cfg = args.resolve_config()?;
    let mut crystal = SpacetimeCrystal::new(cfg)?;
    let report = crystal.simulate();

    if args.json {
        return emit_json(&report);
    }
    print_crystal_summary(&report);
    Ok(())
}

fn print_crystal_summary(report: &CrystalReport) {
    println!("--- Spacetime Crystal ---");
    println!("Initial Edges: {}", report.initial.edge_count());
    println!("Initial Order: {:.4}", report.initial_order);
    for r in report.history.iter().filter(|r| r.tick % SUMMARY_STRIDE == 0) {
        println!(
            "Step {}: Order={:.4}, Edges={} (Broken: {})",
            r.tick, r.order, r.edge_count, r.edges_removed
        );
    }
    println!("--- End ---");
    println!("Final Order: {:.4}", report.final_order());
    println!("Final Edges: {}", report.final_state.edge_count());
    if let Some(t) = report.quiescent_at() {
        println!("Quiescent after step {t}");
    }
}

// ============================================================================
// dilation
// ============================================================================

#[derive(Args, Debug)]
pub struct DilationArgs {
    /// Speed of the moving agent in units of c
    #[arg(long, default_value_t = 0.8, allow_negative_numbers = true)]
    pub speed: f64,

    #[arg(long, default_value_t = 10.0)]
    pub total_time: f64,

    #[arg(long, default_value_t = 0.01)]
    pub dt: f64,

    #[arg(long, default_value_t = dhcn_physics::params::OMEGA_MAX)]
    pub omega_max: f64,

    #[arg(long)]
    pub json: bool,
}

pub fn run_dilation(args: DilationArgs) -> anyhow::Result<()> {
    let params = BandwidthParams {
        omega_max: args.omega_max,
        ..BandwidthParams::default()
    };
    let agents = vec![
        ("static".to_string(), vec![0.0, 0.0]),
        ("fast".to_string(), vec![args.speed * params.c, 0.0]),
    ];
    let report = simulate_dilation(params, &agents, args.total_time, args.dt)?;

    if args.json {
        return emit_json(&report);
    }

    println!("--- Time Dilation ---");
    println!("System Bandwidth (Omega): {} Hz", params.omega_max);
    for a in &report.agents {
        println!("Agent {} Speed: {:.3}c", a.name, a.speed_c);
    }
    for a in &report.agents {
        println!("Final Internal Clock ({}): {:.2} ticks", a.name, a.final_clock);
    }
    if let Some(fast) = report.agents.get(1) {
        match fast.measured_ratio {
            Some(ratio) => {
                println!("Time Dilation Ratio (fast/static): {ratio:.4}");
                println!("Theoretical Prediction (sqrt(1-v^2/c^2)): {:.4}", fast.predicted_ratio);
            }
            None => println!("Static clock did not tick"),
        }
    }
    Ok(())
}

// ============================================================================
// inertia
// ============================================================================

#[derive(Args, Debug)]
pub struct InertiaArgs {
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    pub force: f64,

    #[arg(long, default_value_t = 20.0)]
    pub total_time: f64,

    #[arg(long, default_value_t = 0.01)]
    pub dt: f64,

    #[arg(long, default_value_t = dhcn_physics::params::REST_MASS)]
    pub rest_mass: f64,

    #[arg(long)]
    pub json: bool,
}

pub fn run_inertia(args: InertiaArgs) -> anyhow::Result<()> {
    let params = InertiaParams {
        rest_mass: args.rest_mass,
        ..InertiaParams::default()
    };
    let report = simulate_inertia(params, args.force, args.total_time, args.dt)?;

    if args.json {
        return emit_json(&report);
    }

    println!("--- Inertia Limit ---");
    println!("Applied Constant Force: {}", report.force);
    println!("Agent Rest Mass: {}", params.rest_mass);
    if let Some(last) = report.final_sample() {
        println!("Final Speed: {:.4} c", last.speed / params.c);
        println!("Final Acceleration: {:.6}", last.acceleration);
        match last.effective_inertia {
            Some(m) => println!("Final Effective Inertia: {m:.4}"),
            None => println!("Final Effective Inertia: unbounded (no acceleration)"),
        }
    }
    Ok(())
}

// ============================================================================
// galaxy
// ============================================================================

#[derive(Args, Debug)]
pub struct GalaxyArgs {
    /// Heavier centre and stronger entropic term
    #[arg(long)]
    pub pronounced: bool,

    /// Innermost radius [default: 1, or 10 with --pronounced]
    #[arg(long)]
    pub r_min: Option<f64>,

    /// Outermost radius [default: 100, or 200 with --pronounced]
    #[arg(long)]
    pub r_max: Option<f64>,

    /// Curve samples [default: 200, or 500 with --pronounced]
    #[arg(long)]
    pub samples: Option<usize>,

    /// Number of synthetic observations
    #[arg(long, default_value_t = 20)]
    pub observations: usize,

    /// Scatter of the synthetic observations
    #[arg(long, default_value_t = 0.2)]
    pub sigma: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long)]
    pub json: bool,
}

impl GalaxyArgs {
    fn model(&self) -> RotationModel {
        if self.pronounced {
            RotationModel::pronounced()
        } else {
            RotationModel::standard()
        }
    }

    /// `(r_min, r_max, samples)`, preset defaults filled in.
    fn radii(&self) -> (f64, f64, usize) {
        let (r_min, r_max, samples) = if self.pronounced {
            (10.0, 200.0, 500)
        } else {
            (1.0, 100.0, 200)
        };
        (
            self.r_min.unwrap_or(r_min),
            self.r_max.unwrap_or(r_max),
            self.samples.unwrap_or(samples),
        )
    }
}

#[derive(Serialize)]
struct GalaxyOutput {
    model: RotationModel,
    curve: Vec<RotationSample>,
    observations: Vec<Observation>,
}

pub fn run_galaxy(args: GalaxyArgs) -> anyhow::Result<()> {
    let model = args.model();
    model.validate()?;

    let (r_min, r_max, samples) = args.radii();
    let curve = model.rotation_curve(&linspace(r_min, r_max, samples));
    let span = r_max - r_min;
    let obs_radii = linspace(r_min + 0.05 * span, r_max - 0.05 * span, args.observations);
    let observations = model.synthetic_observations(&obs_radii, args.sigma, args.seed)?;

    if args.json {
        return emit_json(&GalaxyOutput {
            model,
            curve,
            observations,
        });
    }

    println!("--- Galaxy Rotation ---");
    println!("G={}, M={}, alpha={}", model.g, model.mass, model.alpha);
    if let Some(outer) = curve.last() {
        println!("Outer radius: {:.2}", outer.r);
        println!("Newtonian velocity: {:.4}", outer.newtonian);
        println!("Entropic velocity:  {:.4}", outer.entropic);
        println!("Missing velocity (dark matter gap): {:.4}", outer.gap);
    }
    println!("Asymptotic velocity sqrt(alpha): {:.4}", model.asymptotic_velocity());
    Ok(())
}

// ============================================================================
// interference
// ============================================================================

#[derive(Args, Debug)]
pub struct InterferenceArgs {
    #[arg(long, default_value_t = 1000)]
    pub screen_width: usize,

    #[arg(long, default_value_t = 20.0)]
    pub wavelength: f64,

    #[arg(long, default_value_t = 120.0)]
    pub slit_distance: f64,

    #[arg(long, default_value_t = 2000.0)]
    pub screen_distance: f64,

    #[arg(long, default_value_t = 400.0)]
    pub half_span: f64,

    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct InterferenceOutput {
    config: TwoSlitConfig,
    constructive_ratio: f64,
    first_minimum: Option<Minimum>,
    pattern: InterferencePattern,
}

pub fn run_interference(args: InterferenceArgs) -> anyhow::Result<()> {
    let config = TwoSlitConfig {
        screen_width: args.screen_width,
        wavelength: args.wavelength,
        slit_distance: args.slit_distance,
        screen_distance: args.screen_distance,
        half_span: args.half_span,
    };
    let pattern = InterferencePattern::compute(&config)?;
    let constructive_ratio = pattern.constructive_ratio();
    let first_minimum = pattern.first_minimum();

    if args.json {
        return emit_json(&InterferenceOutput {
            config,
            constructive_ratio,
            first_minimum,
            pattern,
        });
    }

    println!("--- Path Integral ---");
    println!("1. Center Intensity (Wave):     {:.4}", pattern.center_wave());
    println!("2. Center Intensity (Particle): {:.4}", pattern.center_particle());
    println!("3. Constructive Ratio: {constructive_ratio:.4} (target 2.0)");
    match first_minimum {
        Some(m) => println!(
            "4. First Dark Fringe: y={:.2}, intensity={:.6} (far field {:.2})",
            m.position,
            m.intensity,
            config.fringe_spacing() / 2.0
        ),
        None => println!("4. No dark fringe on screen"),
    }
    Ok(())
}

// ============================================================================
// expansion
// ============================================================================

#[derive(Args, Debug)]
pub struct ExpansionArgs {
    #[arg(long, default_value_t = 50.0)]
    pub initial_size: f64,

    #[arg(long, default_value_t = 3.0)]
    pub hubble_0: f64,

    #[arg(long, default_value_t = 0.05)]
    pub gravity_drag: f64,

    #[arg(long, default_value_t = 0.008)]
    pub lambda: f64,

    #[arg(long, default_value_t = 150)]
    pub steps: usize,

    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ExpansionOutput {
    params: ExpansionParams,
    jerk_step: Option<usize>,
    jerk_velocity: Option<f64>,
    history: ExpansionHistory,
}

pub fn run_expansion(args: ExpansionArgs) -> anyhow::Result<()> {
    let params = ExpansionParams {
        initial_size: args.initial_size,
        hubble_0: args.hubble_0,
        gravity_drag: args.gravity_drag,
        lambda: args.lambda,
        steps: args.steps,
    };
    let history = simulate_expansion(&params)?;
    let jerk = history.jerk_point();

    if args.json {
        return emit_json(&ExpansionOutput {
            params,
            jerk_step: jerk.map(|(t, _)| t),
            jerk_velocity: jerk.map(|(_, v)| v),
            history,
        });
    }

    println!("--- Cosmic Expansion ---");
    match jerk {
        Some((t, v)) => println!("Cosmic jerk at step {t}: velocity={v:.4}"),
        None => println!("No steps simulated"),
    }
    if !history.has_transition() {
        println!("No deceleration-to-acceleration transition in this run");
    }
    if let Some(size) = history.sizes.last() {
        println!("Final Size: {size:.2}");
    }
    Ok(())
}
