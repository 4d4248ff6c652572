// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Two-Slit Path Summation
// Mirrors: 04_quantum_path_integral.py
// ─────────────────────────────────────────────────────────────────────
//! Direct path-length summation from two slits to every screen pixel.
//!
//!   r_{1,2} = √(L² + (y ∓ d/2)²)
//!   ψ_j     = e^{i k r_j} / r_j,      k = 2π / λ
//!
//! Unobserved (wave) mode keeps phase:   I = |ψ1 + ψ2|²
//! Observed (particle) mode drops it:    I = |ψ1|² + |ψ2|²
//!
//! Both are normalised by the peak single-slit intensity max |ψ1|², so the
//! centre reads ≈ 4 (wave) against ≈ 2 (particle).

use serde::{Deserialize, Serialize};

use dhcn_types::error::ensure_positive;
use dhcn_types::{DhcnError, DhcnResult};

use crate::params::linspace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwoSlitConfig {
    /// Number of screen samples.
    pub screen_width: usize,
    pub wavelength: f64,
    /// Slit separation d.
    pub slit_distance: f64,
    /// Slit-to-screen distance L.
    pub screen_distance: f64,
    /// Screen covers y ∈ [−half_span, half_span].
    pub half_span: f64,
}

impl Default for TwoSlitConfig {
    fn default() -> Self {
        Self {
            screen_width: 1000,
            wavelength: 20.0,
            slit_distance: 120.0,
            screen_distance: 2000.0,
            half_span: 400.0,
        }
    }
}

impl TwoSlitConfig {
    pub fn validate(&self) -> DhcnResult<()> {
        if self.screen_width < 2 {
            return Err(DhcnError::invalid(format!(
                "screen_width must be >= 2, got {}",
                self.screen_width
            )));
        }
        ensure_positive("wavelength", self.wavelength)?;
        ensure_positive("slit_distance", self.slit_distance)?;
        ensure_positive("screen_distance", self.screen_distance)?;
        ensure_positive("half_span", self.half_span)
    }

    pub fn wavenumber(&self) -> f64 {
        std::f64::consts::TAU / self.wavelength
    }

    /// Far-field fringe spacing λ L / d.
    pub fn fringe_spacing(&self) -> f64 {
        self.wavelength * self.screen_distance / self.slit_distance
    }
}

/// Normalised intensities along the screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterferencePattern {
    pub positions: Vec<f64>,
    pub wave: Vec<f64>,
    pub particle: Vec<f64>,
}

/// Location and depth of a destructive fringe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Minimum {
    pub index: usize,
    pub position: f64,
    pub intensity: f64,
}

impl InterferencePattern {
    /// Sum both paths for every screen sample.
    pub fn compute(cfg: &TwoSlitConfig) -> DhcnResult<Self> {
        cfg.validate()?;
        let k = cfg.wavenumber();
        let l2 = cfg.screen_distance.powi(2);
        let half_d = cfg.slit_distance / 2.0;

        let positions = linspace(-cfg.half_span, cfg.half_span, cfg.screen_width);
        let mut wave = Vec::with_capacity(positions.len());
        let mut particle = Vec::with_capacity(positions.len());
        let mut single = Vec::with_capacity(positions.len());

        for &y in &positions {
            let r1 = (l2 + (y - half_d).powi(2)).sqrt();
            let r2 = (l2 + (y + half_d).powi(2)).sqrt();

            // ψ = (cos kr + i sin kr) / r
            let (re1, im1) = ((k * r1).cos() / r1, (k * r1).sin() / r1);
            let (re2, im2) = ((k * r2).cos() / r2, (k * r2).sin() / r2);

            let i1 = re1 * re1 + im1 * im1;
            let i2 = re2 * re2 + im2 * im2;
            wave.push((re1 + re2).powi(2) + (im1 + im2).powi(2));
            particle.push(i1 + i2);
            single.push(i1);
        }

        let max_single = single.iter().copied().fold(0.0, f64::max);
        for v in wave.iter_mut().chain(particle.iter_mut()) {
            *v /= max_single;
        }

        Ok(Self {
            positions,
            wave,
            particle,
        })
    }

    pub fn center_index(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn center_wave(&self) -> f64 {
        self.wave[self.center_index()]
    }

    pub fn center_particle(&self) -> f64 {
        self.particle[self.center_index()]
    }

    /// Wave over particle intensity at the centre: (1+1)² / (1²+1²) ≈ 2.
    pub fn constructive_ratio(&self) -> f64 {
        self.center_wave() / self.center_particle()
    }

    /// First local minimum of the wave intensity walking from the centre
    /// towards +y.
    pub fn first_minimum(&self) -> Option<Minimum> {
        let start = self.center_index() + 1;
        (start..self.wave.len().saturating_sub(1))
            .find(|&i| self.wave[i] <= self.wave[i - 1] && self.wave[i] <= self.wave[i + 1])
            .map(|index| Minimum {
                index,
                position: self.positions[index],
                intensity: self.wave[index],
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> InterferencePattern {
        InterferencePattern::compute(&TwoSlitConfig::default()).unwrap()
    }

    #[test]
    fn test_lengths() {
        let p = pattern();
        assert_eq!(p.positions.len(), 1000);
        assert_eq!(p.wave.len(), 1000);
        assert_eq!(p.particle.len(), 1000);
        assert_eq!(p.center_index(), 500);
    }

    #[test]
    fn test_constructive_ratio_two() {
        let p = pattern();
        let ratio = p.constructive_ratio();
        assert!((ratio - 2.0).abs() < 1e-3, "ratio={ratio}");
        assert!((p.center_wave() - 4.0).abs() < 0.01, "wave={}", p.center_wave());
        assert!((p.center_particle() - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_particle_mode_has_no_fringes() {
        let p = pattern();
        // Smooth: no sample drops below half the centre value
        let c = p.center_particle();
        assert!(p.particle.iter().all(|&v| v > 0.5 * c));
    }

    #[test]
    fn test_first_minimum_is_dark_fringe() {
        let cfg = TwoSlitConfig::default();
        let p = pattern();
        let m = p.first_minimum().unwrap();
        let expected = cfg.fringe_spacing() / 2.0;
        assert!(
            (m.position - expected).abs() < 2.0,
            "minimum at {}, expected ≈ {expected}",
            m.position
        );
        assert!(m.intensity < 0.01, "intensity={}", m.intensity);
    }

    #[test]
    fn test_wave_bounded_by_four() {
        let p = pattern();
        assert!(p.wave.iter().all(|&v| (0.0..=4.0 + 1e-9).contains(&v)));
    }

    #[test]
    fn test_invalid_geometry() {
        let bad = TwoSlitConfig {
            wavelength: 0.0,
            ..TwoSlitConfig::default()
        };
        assert!(InterferencePattern::compute(&bad).is_err());
        let narrow = TwoSlitConfig {
            screen_width: 1,
            ..TwoSlitConfig::default()
        };
        assert!(InterferencePattern::compute(&narrow).is_err());
    }
}
