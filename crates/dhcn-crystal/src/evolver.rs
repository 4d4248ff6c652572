// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Spacetime-Crystal Evolver
// Mirrors: 06_spacetime_crystal.py (SpacetimeCrystal.evolve)
// ─────────────────────────────────────────────────────────────────────
//! One tick of the crystal:
//!   1. Score every edge against the pre-tick neighbour structure
//!   2. Δw = G·κ(u, v) − Λ,  w' = min(w + Δw, w_cap)
//!   3. Commit w' for survivors, mark w' < cutoff for removal
//!   4. Remove marked edges
//!
//! Steps 1–3 finish before any edge is removed, so no curvature value in
//! a tick sees that tick's removals. The trajectory is a pure function of
//! the config.

use rand::rngs::StdRng;
use rand::SeedableRng;

use dhcn_types::{
    CrystalConfig, CrystalPhase, CrystalReport, DhcnResult, GraphSnapshot, TickRecord,
};

use crate::graph::CrystalGraph;
use crate::observables::{average_clustering, jaccard_curvature};

/// Weight given to every edge at creation.
pub const INITIAL_WEIGHT: f64 = 1.0;

/// Weighted random graph evolving under curvature reward and uniform decay.
pub struct SpacetimeCrystal {
    cfg: CrystalConfig,
    graph: CrystalGraph,
    phase: CrystalPhase,
    step_count: usize,
    history: Vec<TickRecord>,
}

impl SpacetimeCrystal {
    /// Draw the initial graph from `config.seed`.
    pub fn new(config: CrystalConfig) -> DhcnResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let graph = CrystalGraph::random(
            config.node_count,
            config.edge_probability,
            INITIAL_WEIGHT,
            &mut rng,
        );
        log::debug!(
            "crystal created: n={}, p={}, seed={}, edges={}",
            config.node_count,
            config.edge_probability,
            config.seed,
            graph.edge_count()
        );
        Ok(Self::with_graph(config, graph))
    }

    /// Build from an explicit edge list, every edge at [`INITIAL_WEIGHT`].
    ///
    /// `edge_probability` and `seed` are not used.
    pub fn from_edges(config: CrystalConfig, edges: &[(usize, usize)]) -> DhcnResult<Self> {
        config.validate()?;
        let mut graph = CrystalGraph::new(config.node_count);
        for &(u, v) in edges {
            graph.add_edge(u, v, INITIAL_WEIGHT)?;
        }
        Ok(Self::with_graph(config, graph))
    }

    pub fn default_params() -> DhcnResult<Self> {
        Self::new(CrystalConfig::default())
    }

    fn with_graph(cfg: CrystalConfig, graph: CrystalGraph) -> Self {
        let phase = if graph.edge_count() == 0 {
            CrystalPhase::Quiescent
        } else {
            CrystalPhase::Active
        };
        Self {
            cfg,
            graph,
            phase,
            step_count: 0,
            history: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Observables
    // ------------------------------------------------------------------

    /// Jaccard curvature of `(u, v)` under the current edge set.
    pub fn curvature(&self, u: usize, v: usize) -> f64 {
        jaccard_curvature(&self.graph, u, v)
    }

    /// Average clustering coefficient, 0 when there are no nodes.
    pub fn order_metric(&self) -> f64 {
        average_clustering(&self.graph)
    }

    /// True when every surviving weight lies in `[cutoff, cap]`.
    ///
    /// Holds after any tick. Freshly created edges sit at
    /// [`INITIAL_WEIGHT`], which need not satisfy it.
    pub fn weights_within_bounds(&self) -> bool {
        self.graph
            .edges()
            .all(|(_, _, w)| w >= self.cfg.cutoff_threshold && w <= self.cfg.weight_cap)
    }

    // ------------------------------------------------------------------
    // Tick
    // ------------------------------------------------------------------

    /// Advance one tick. Returns the number of edges removed.
    pub fn evolve(&mut self) -> usize {
        if self.phase == CrystalPhase::Quiescent {
            return 0;
        }

        let gravity = self.cfg.gravity_strength;
        let dark_energy = self.cfg.dark_energy;
        let cap = self.cfg.weight_cap;
        let cutoff = self.cfg.cutoff_threshold;

        // 1–2. Score against the frozen structure
        let updated: Vec<(usize, usize, f64)> = self
            .graph
            .edges()
            .map(|(u, v, w)| {
                let kappa = jaccard_curvature(&self.graph, u, v);
                let delta = gravity * kappa - dark_energy;
                (u, v, (w + delta).min(cap))
            })
            .collect();

        // 3. Commit survivors
        let mut doomed = Vec::new();
        for (u, v, w) in updated {
            if w < cutoff {
                doomed.push((u, v));
            } else {
                self.graph.set_weight(u, v, w);
            }
        }

        // 4. Topology surgery
        for &(u, v) in &doomed {
            self.graph.remove_edge(u, v);
        }

        if self.graph.edge_count() == 0 {
            self.phase = CrystalPhase::Quiescent;
            log::info!(
                "crystal quiescent after tick {}: all edges cut",
                self.step_count
            );
        }

        doomed.len()
    }

    /// One tick plus observables, appended to the history.
    pub fn step(&mut self) -> TickRecord {
        let edges_removed = self.evolve();
        let record = TickRecord {
            tick: self.step_count,
            edges_removed,
            edge_count: self.graph.edge_count(),
            order: self.order_metric(),
        };
        log::debug!(
            "tick {}: order={:.4}, edges={} (broken: {})",
            record.tick,
            record.order,
            record.edge_count,
            record.edges_removed
        );
        self.history.push(record);
        self.step_count += 1;
        record
    }

    /// Run `n_ticks` steps.
    pub fn run(&mut self, n_ticks: usize) -> Vec<TickRecord> {
        let mut records = Vec::with_capacity(n_ticks);
        for _ in 0..n_ticks {
            records.push(self.step());
        }
        records
    }

    /// Run `config.tick_count` ticks from the current state and report.
    pub fn simulate(&mut self) -> CrystalReport {
        let initial = self.graph.snapshot();
        let initial_order = self.order_metric();
        let history = self.run(self.cfg.tick_count);
        CrystalReport {
            config: self.cfg.clone(),
            initial,
            initial_order,
            history,
            final_state: self.graph.snapshot(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &CrystalConfig {
        &self.cfg
    }

    pub fn graph(&self) -> &CrystalGraph {
        &self.graph
    }

    pub fn phase(&self) -> CrystalPhase {
        self.phase
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        self.graph.weight(u, v)
    }

    /// Current neighbours of `u`, empty for unknown nodes.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.neighbors(u).iter().copied()
    }

    /// Ticks taken through [`step`](Self::step) so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn history(&self) -> &[TickRecord] {
        &self.history
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.graph.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhcn_types::DhcnError;

    fn scenario_config(n: usize) -> CrystalConfig {
        CrystalConfig {
            node_count: n,
            gravity_strength: 0.3,
            dark_energy: 0.1,
            cutoff_threshold: 0.5,
            weight_cap: 2.0,
            ..CrystalConfig::default()
        }
    }

    fn assert_weight(c: &SpacetimeCrystal, u: usize, v: usize, expected: f64) {
        let w = c.weight(u, v).unwrap_or_else(|| panic!("edge ({u}, {v}) missing"));
        assert!(
            (w - expected).abs() < 1e-12,
            "w({u}, {v}) = {w}, expected {expected}"
        );
    }

    #[test]
    fn test_path_scenario_single_tick() {
        let mut c =
            SpacetimeCrystal::from_edges(scenario_config(4), &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let removed = c.evolve();
        assert_eq!(removed, 0);
        assert_eq!(c.edge_count(), 3);
        assert_weight(&c, 0, 1, 0.9);
        assert_weight(&c, 1, 2, 0.9);
        assert_weight(&c, 2, 3, 0.9);
    }

    #[test]
    fn test_path_scenario_decays_to_quiescence() {
        let mut c =
            SpacetimeCrystal::from_edges(scenario_config(4), &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let records = c.run(10);
        let total: usize = records.iter().map(|r| r.edges_removed).sum();
        assert_eq!(total, 3);
        assert_eq!(c.phase(), CrystalPhase::Quiescent);
        // A path has no triangles to reward: every edge dies on the same tick
        assert_eq!(records.iter().filter(|r| r.edges_removed > 0).count(), 1);
    }

    #[test]
    fn test_triangle_with_pendant_single_tick() {
        let mut c = SpacetimeCrystal::from_edges(
            scenario_config(4),
            &[(0, 1), (1, 2), (0, 2), (2, 3)],
        )
        .unwrap();
        c.evolve();
        // κ(0,1) = 1/3 → Δw ≈ 0
        assert_weight(&c, 0, 1, 1.0 + 0.3 / 3.0 - 0.1);
        // κ(0,2) = κ(1,2) = 1/4
        assert_weight(&c, 0, 2, 1.0 + 0.3 * 0.25 - 0.1);
        assert_weight(&c, 1, 2, 1.0 + 0.3 * 0.25 - 0.1);
        // κ(2,3) = 0
        assert_weight(&c, 2, 3, 0.9);
    }

    #[test]
    fn test_neighbors_accessor() {
        let c = SpacetimeCrystal::from_edges(scenario_config(4), &[(0, 1), (1, 2), (0, 2)])
            .unwrap();
        assert_eq!(c.neighbors(2).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(c.neighbors(3).count(), 0);
        assert_eq!(c.neighbors(99).count(), 0);
    }

    #[test]
    fn test_removal_uses_pre_tick_structure() {
        // Cutoff high enough to cut the pendant edge this tick
        let cfg = CrystalConfig {
            cutoff_threshold: 0.95,
            ..scenario_config(4)
        };
        let mut c =
            SpacetimeCrystal::from_edges(cfg, &[(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
        let removed = c.evolve();
        assert_eq!(removed, 1);
        assert!(c.weight(2, 3).is_none());
        // (1, 2) still scored with 3 ∈ N(2): κ = 1/4, not 1/3
        assert_weight(&c, 1, 2, 1.0 + 0.3 * 0.25 - 0.1);
    }

    #[test]
    fn test_complete_graph_grows_to_cap() {
        let edges: Vec<_> = (0..4)
            .flat_map(|i| ((i + 1)..4).map(move |j| (i, j)))
            .collect();
        let mut c = SpacetimeCrystal::from_edges(scenario_config(4), &edges).unwrap();
        c.evolve();
        // κ = (4 − 2) / 4 = 0.5 → Δw = 0.05
        assert_weight(&c, 0, 3, 1.0 + 0.3 * 0.5 - 0.1);
        c.run(40);
        for (_, _, w) in c.graph().edges() {
            assert!(w <= 2.0);
            assert!((w - 2.0).abs() < 1e-12, "w={w} should sit at the cap");
        }
        assert!((c.order_metric() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sentinel_curvature_isolated_node() {
        let c = SpacetimeCrystal::from_edges(scenario_config(4), &[(0, 1)]).unwrap();
        assert_eq!(c.curvature(0, 3), -1.0);
    }

    #[test]
    fn test_determinism() {
        let cfg = CrystalConfig::default();
        let mut a = SpacetimeCrystal::new(cfg.clone()).unwrap();
        let mut b = SpacetimeCrystal::new(cfg).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.run(30), b.run(30));
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = SpacetimeCrystal::new(CrystalConfig::default()).unwrap();
        let b = SpacetimeCrystal::new(CrystalConfig {
            seed: 7,
            ..CrystalConfig::default()
        })
        .unwrap();
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_invariants_hold_every_tick() {
        let mut c = SpacetimeCrystal::default_params().unwrap();
        let n = c.node_count();
        for _ in 0..60 {
            c.step();
            assert!(c.weights_within_bounds());
            assert_eq!(c.node_count(), n);
        }
    }

    #[test]
    fn test_quiescence_idempotent() {
        let cfg = CrystalConfig {
            node_count: 10,
            edge_probability: 0.2,
            ..CrystalConfig::default()
        };
        // Strong decay, no reward: everything dies quickly
        let cfg = CrystalConfig {
            gravity_strength: 0.0,
            dark_energy: 0.6,
            ..cfg
        };
        let mut c = SpacetimeCrystal::new(cfg).unwrap();
        c.run(5);
        assert_eq!(c.edge_count(), 0);
        assert_eq!(c.phase(), CrystalPhase::Quiescent);
        for _ in 0..20 {
            assert_eq!(c.evolve(), 0);
            assert_eq!(c.order_metric(), 0.0);
        }
    }

    #[test]
    fn test_zero_probability_starts_quiescent() {
        let c = SpacetimeCrystal::new(CrystalConfig {
            edge_probability: 0.0,
            ..CrystalConfig::default()
        })
        .unwrap();
        assert_eq!(c.phase(), CrystalPhase::Quiescent);
        assert_eq!(c.edge_count(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad_p = CrystalConfig {
            edge_probability: 1.5,
            ..CrystalConfig::default()
        };
        assert!(matches!(
            SpacetimeCrystal::new(bad_p),
            Err(DhcnError::InvalidConfiguration(_))
        ));
        let bad_n = CrystalConfig {
            node_count: 0,
            ..CrystalConfig::default()
        };
        assert!(SpacetimeCrystal::new(bad_n).is_err());
    }

    #[test]
    fn test_from_edges_rejects_bad_edges() {
        assert!(SpacetimeCrystal::from_edges(scenario_config(3), &[(0, 3)]).is_err());
        assert!(SpacetimeCrystal::from_edges(scenario_config(3), &[(1, 1)]).is_err());
    }

    #[test]
    fn test_step_records_history() {
        let mut c = SpacetimeCrystal::default_params().unwrap();
        let before = c.edge_count();
        let r0 = c.step();
        let r1 = c.step();
        assert_eq!(r0.tick, 0);
        assert_eq!(r1.tick, 1);
        assert_eq!(c.step_count(), 2);
        assert_eq!(c.history(), &[r0, r1]);
        assert_eq!(before - r0.edges_removed, r0.edge_count);
        assert_eq!(r0.edge_count - r1.edges_removed, r1.edge_count);
    }

    #[test]
    fn test_simulate_report() {
        let cfg = CrystalConfig {
            tick_count: 25,
            ..CrystalConfig::default()
        };
        let mut c = SpacetimeCrystal::new(cfg).unwrap();
        let report = c.simulate();
        assert_eq!(report.history.len(), 25);
        assert_eq!(report.initial.node_count, 60);
        assert!(report.initial.edges.iter().all(|e| e.weight == INITIAL_WEIGHT));
        assert_eq!(
            report.initial.edge_count() - report.total_removed(),
            report.final_state.edge_count()
        );
        assert_eq!(report.final_state, c.snapshot());
        assert!((report.final_order() - c.order_metric()).abs() < 1e-12);
    }

    #[test]
    fn test_report_serialises_for_plotting() {
        let cfg = CrystalConfig {
            node_count: 8,
            tick_count: 3,
            ..CrystalConfig::default()
        };
        let report = SpacetimeCrystal::new(cfg).unwrap().simulate();
        let json = serde_json::to_string(&report).unwrap();
        let back: CrystalReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.history.len(), 3);
        assert_eq!(back.initial.edge_count(), report.initial.edge_count());
        assert_eq!(back.final_state.edge_count(), report.final_state.edge_count());
        assert_eq!(back.config.node_count, 8);
    }

    #[test]
    fn test_default_run_prunes_edges() {
        let mut c = SpacetimeCrystal::default_params().unwrap();
        let before = c.edge_count();
        c.run(60);
        assert!(c.edge_count() < before, "dark energy should cut links");
    }
}
