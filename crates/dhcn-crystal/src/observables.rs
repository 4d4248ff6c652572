// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Crystal Observables
// Mirrors: 06_spacetime_crystal.py (calculate_curvature + measure_order)
// ─────────────────────────────────────────────────────────────────────
//! Local geometry read off the current edge set:
//!
//!   κ(u, v) = |N(u) ∩ N(v)| / |N(u) ∪ N(v)|     (Jaccard "curvature")
//!   C_i     = links(N(i)) / (k_i (k_i − 1) / 2)  (local clustering)
//!   order   = ⟨C_i⟩ over all nodes
//!
//! Edge weights do not enter either quantity.

use crate::graph::CrystalGraph;

/// Returned by [`jaccard_curvature`] when either endpoint is isolated.
pub const CURVATURE_SENTINEL: f64 = -1.0;

/// Jaccard similarity of the neighbour sets of `u` and `v`.
///
/// Returns [`CURVATURE_SENTINEL`] when either node has no neighbours or
/// the union is empty. The sentinel is a plain number to the update rule.
pub fn jaccard_curvature(graph: &CrystalGraph, u: usize, v: usize) -> f64 {
    let nu = graph.neighbors(u);
    let nv = graph.neighbors(v);
    if nu.is_empty() || nv.is_empty() {
        return CURVATURE_SENTINEL;
    }
    let common = nu.intersection(nv).count();
    let union = nu.len() + nv.len() - common;
    if union == 0 {
        return CURVATURE_SENTINEL;
    }
    common as f64 / union as f64
}

/// Fraction of neighbour pairs of `u` that are themselves connected.
/// Nodes of degree < 2 have coefficient 0.
pub fn local_clustering(graph: &CrystalGraph, u: usize) -> f64 {
    let nbrs = graph.neighbors(u);
    let k = nbrs.len();
    if k < 2 {
        return 0.0;
    }
    // Each closed pair (a, b) with a < b counted once.
    let links: usize = nbrs
        .iter()
        .map(|&a| nbrs.range((a + 1)..).filter(|&&b| graph.has_edge(a, b)).count())
        .sum();
    let pairs = k * (k - 1) / 2;
    links as f64 / pairs as f64
}

/// Average clustering coefficient over every node, 0 for an empty graph.
pub fn average_clustering(graph: &CrystalGraph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = (0..n).map(|u| local_clustering(graph, u)).sum();
    total / n as f64
}
