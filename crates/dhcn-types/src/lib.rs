// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Configuration, error hierarchy, and report records shared by the
//! DHCN simulation crates.

pub mod config;
pub mod error;
pub mod report;

pub use config::CrystalConfig;
pub use error::{DhcnError, DhcnResult};
pub use report::{CrystalPhase, CrystalReport, EdgeRecord, GraphSnapshot, TickRecord};
