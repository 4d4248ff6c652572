// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Bandwidth Physics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Companion simulations of the finite-bandwidth network model.
//!
//! Each module is a small, self-contained numerical experiment that
//! returns a serialisable report:
//!
//!   - bandwidth:    time dilation from the Ω² = f_x² + f_τ² split
//!   - inertia:      constant force against the bandwidth limit
//!   - galaxy:       flat rotation curves from an entropic correction
//!   - interference: two-slit path summation, wave vs particle mode
//!   - expansion:    decelerating then accelerating expansion
//!
//! Parameters are validated up front; invalid input surfaces as
//! [`dhcn_types::DhcnError::InvalidConfiguration`].

pub mod bandwidth;
pub mod expansion;
pub mod galaxy;
pub mod inertia;
pub mod interference;
pub mod params;

pub use bandwidth::{simulate_dilation, AgentTrace, BandwidthParams, DilationReport, NetworkAgent};
pub use expansion::{simulate_expansion, ExpansionHistory, ExpansionParams};
pub use galaxy::{Observation, RotationModel, RotationSample};
pub use inertia::{simulate_inertia, DynamicAgent, InertiaParams, InertiaReport, InertiaSample};
pub use interference::{InterferencePattern, Minimum, TwoSlitConfig};
