// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Report Records
// Mirrors: 06_spacetime_crystal.py (history + final graph)
// ─────────────────────────────────────────────────────────────────────
//! Plain records handed to reporting and plotting collaborators.

use serde::{Deserialize, Serialize};

use crate::config::CrystalConfig;

/// Lifecycle phase of the evolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrystalPhase {
    /// At least one edge left to tick.
    Active,
    /// No edges remain; ticking is a no-op.
    Quiescent,
}

/// Observables recorded after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TickRecord {
    /// Zero-based tick index.
    pub tick: usize,
    /// Edges removed during this tick.
    pub edges_removed: usize,
    /// Edges remaining after the tick.
    pub edge_count: usize,
    /// Average clustering coefficient after the tick.
    pub order: f64,
}

/// One weighted edge, endpoints normalised so that `u < v`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub u: usize,
    pub v: usize,
    pub weight: f64,
}

/// Frozen copy of the graph structure, edges sorted by `(u, v)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub node_count: usize,
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Full outcome of a fixed-length crystal run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalReport {
    pub config: CrystalConfig,
    pub initial: GraphSnapshot,
    pub initial_order: f64,
    pub history: Vec<TickRecord>,
    pub final_state: GraphSnapshot,
}

impl CrystalReport {
    /// Order after the last tick, or the initial order for a zero-tick run.
    pub fn final_order(&self) -> f64 {
        self.history.last().map_or(self.initial_order, |r| r.order)
    }

    /// Total edges removed across the run.
    pub fn total_removed(&self) -> usize {
        self.history.iter().map(|r| r.edges_removed).sum()
    }

    /// First tick after which no edges were left, if any.
    pub fn quiescent_at(&self) -> Option<usize> {
        self.history
            .iter()
            .find(|r| r.edge_count == 0)
            .map(|r| r.tick)
    }
}
