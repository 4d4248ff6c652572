// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Spacetime Crystal
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Spacetime-crystal evolver.
//!
//! A random weighted graph whose edges compete: local clustering
//! (Jaccard "curvature") rewards an edge, a uniform "dark energy" term
//! drains every edge, and edges falling below the survival cutoff are
//! cut. Nodes never change.
//!
//! Architecture:
//!   - CrystalGraph: adjacency sets + ordered edge-weight map
//!   - observables: Jaccard curvature, clustering coefficient
//!   - SpacetimeCrystal: seeded construction and the tick loop
//!
//! # Tick ordering
//!
//! Every curvature value of a tick is computed before any weight is
//! committed or any edge removed. Scoring while mutating changes the
//! trajectory.

pub mod evolver;
pub mod graph;
pub mod observables;

pub use evolver::{SpacetimeCrystal, INITIAL_WEIGHT};
pub use graph::CrystalGraph;
pub use observables::{average_clustering, jaccard_curvature, local_clustering, CURVATURE_SENTINEL};
