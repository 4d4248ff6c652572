// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Crystal Graph
// Mirrors: 06_spacetime_crystal.py (graph construction)
// ─────────────────────────────────────────────────────────────────────
//! Undirected weighted graph over a fixed node set `0..n`.
//!
//! Adjacency is one ordered set per node plus a weight map keyed by the
//! normalised pair `(min, max)`. Both containers are ordered so that
//! iteration, and therefore every tick, is reproducible.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use dhcn_types::{DhcnError, DhcnResult, EdgeRecord, GraphSnapshot};

static NO_NEIGHBORS: BTreeSet<usize> = BTreeSet::new();

#[inline]
fn edge_key(u: usize, v: usize) -> (usize, usize) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Weighted graph with a fixed node count. Only edges change.
#[derive(Debug, Clone, PartialEq)]
pub struct CrystalGraph {
    n: usize,
    adjacency: Vec<BTreeSet<usize>>,
    weights: BTreeMap<(usize, usize), f64>,
}

impl CrystalGraph {
    /// Edgeless graph over `n` nodes.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            adjacency: vec![BTreeSet::new(); n],
            weights: BTreeMap::new(),
        }
    }

    /// Erdős–Rényi draw: every pair `i < j`, visited row by row, gets an
    /// edge of weight `initial_weight` when `uniform[0, 1) < p`.
    pub fn random<R: Rng>(n: usize, p: f64, initial_weight: f64, rng: &mut R) -> Self {
        let mut graph = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.gen::<f64>() < p {
                    graph.insert_unchecked(i, j, initial_weight);
                }
            }
        }
        graph
    }

    fn insert_unchecked(&mut self, u: usize, v: usize, weight: f64) {
        self.adjacency[u].insert(v);
        self.adjacency[v].insert(u);
        self.weights.insert(edge_key(u, v), weight);
    }

    /// Add (or overwrite) the edge `{u, v}`.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: f64) -> DhcnResult<()> {
        if u >= self.n || v >= self.n {
            return Err(DhcnError::invalid(format!(
                "edge ({u}, {v}) references a node outside 0..{}",
                self.n
            )));
        }
        if u == v {
            return Err(DhcnError::invalid(format!("self-loop on node {u}")));
        }
        if !weight.is_finite() {
            return Err(DhcnError::invalid(format!(
                "edge ({u}, {v}) weight must be finite, got {weight}"
            )));
        }
        self.insert_unchecked(u, v, weight);
        Ok(())
    }

    /// Remove the edge `{u, v}`, returning its last weight.
    pub fn remove_edge(&mut self, u: usize, v: usize) -> Option<f64> {
        let w = self.weights.remove(&edge_key(u, v))?;
        self.adjacency[u].remove(&v);
        self.adjacency[v].remove(&u);
        Some(w)
    }

    /// Overwrite the weight of an existing edge. Returns `false` if absent.
    pub fn set_weight(&mut self, u: usize, v: usize, weight: f64) -> bool {
        match self.weights.get_mut(&edge_key(u, v)) {
            Some(w) => {
                *w = weight;
                true
            }
            None => false,
        }
    }

    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        self.weights.get(&edge_key(u, v)).copied()
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.weights.contains_key(&edge_key(u, v))
    }

    /// Neighbour set of `u`; empty for ids outside the node range.
    pub fn neighbors(&self, u: usize) -> &BTreeSet<usize> {
        self.adjacency.get(u).unwrap_or(&NO_NEIGHBORS)
    }

    pub fn degree(&self, u: usize) -> usize {
        self.neighbors(u).len()
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Edges as `(u, v, weight)` with `u < v`, in ascending pair order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.weights.iter().map(|(&(u, v), &w)| (u, v, w))
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            node_count: self.n,
            edges: self
                .edges()
                .map(|(u, v, weight)| EdgeRecord { u, v, weight })
                .collect(),
        }
    }
}
