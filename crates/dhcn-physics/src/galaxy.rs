// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Galaxy Rotation Curves
// Mirrors: 03_galaxy_rotation.py
// ─────────────────────────────────────────────────────────────────────
//! Circular orbit speed around a central mass, with and without the
//! long-range entropic correction:
//!
//!   Newton:   v² = G M / r
//!   Entropic: v² = G M / r + α        → v → √α as r → ∞
//!
//! Radii below 0.1 are clamped to keep the centre finite.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use dhcn_types::error::{ensure_finite, ensure_positive};
use dhcn_types::{DhcnError, DhcnResult};

/// Smallest radius fed to the velocity formulas.
pub const MIN_RADIUS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationModel {
    /// Gravitational constant.
    pub g: f64,
    /// Central (black hole + disk) mass.
    pub mass: f64,
    /// Entropic correction coefficient.
    pub alpha: f64,
}

impl Default for RotationModel {
    fn default() -> Self {
        Self::standard()
    }
}

impl RotationModel {
    /// G = 1, M = 1000, α = 2.
    pub fn standard() -> Self {
        Self {
            g: 1.0,
            mass: 1000.0,
            alpha: 2.0,
        }
    }

    /// Heavier centre and stronger correction so the flat tail stands out:
    /// G = 1, M = 5000, α = 25.
    pub fn pronounced() -> Self {
        Self {
            g: 1.0,
            mass: 5000.0,
            alpha: 25.0,
        }
    }

    pub fn validate(&self) -> DhcnResult<()> {
        ensure_positive("g", self.g)?;
        ensure_positive("mass", self.mass)?;
        ensure_finite("alpha", self.alpha)?;
        if self.alpha < 0.0 {
            return Err(DhcnError::invalid(format!(
                "alpha must be >= 0, got {}",
                self.alpha
            )));
        }
        Ok(())
    }

    fn newton_term(&self, r: f64) -> f64 {
        self.g * self.mass / r.max(MIN_RADIUS)
    }

    pub fn newtonian_velocity(&self, r: f64) -> f64 {
        self.newton_term(r).sqrt()
    }

    pub fn entropic_velocity(&self, r: f64) -> f64 {
        (self.newton_term(r) + self.alpha).sqrt()
    }

    /// Flat-curve limit √α.
    pub fn asymptotic_velocity(&self) -> f64 {
        self.alpha.sqrt()
    }

    pub fn rotation_curve(&self, radii: &[f64]) -> Vec<RotationSample> {
        radii
            .iter()
            .map(|&r| {
                let newtonian = self.newtonian_velocity(r);
                let entropic = self.entropic_velocity(r);
                RotationSample {
                    r,
                    newtonian,
                    entropic,
                    gap: entropic - newtonian,
                }
            })
            .collect()
    }

    /// Entropic velocities with seeded Gaussian scatter of width `sigma`.
    pub fn synthetic_observations(
        &self,
        radii: &[f64],
        sigma: f64,
        seed: u64,
    ) -> DhcnResult<Vec<Observation>> {
        ensure_finite("sigma", sigma)?;
        if sigma < 0.0 {
            return Err(DhcnError::invalid(format!("sigma must be >= 0, got {sigma}")));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        Ok(radii
            .iter()
            .map(|&r| Observation {
                r,
                velocity: self.entropic_velocity(r) + sigma * standard_normal(&mut rng),
            })
            .collect())
    }
}

/// Box–Muller draw from N(0, 1).
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1 = rng.gen::<f64>().max(1e-300);
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Both predictions at one radius. `gap` is the "dark matter" deficit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationSample {
    pub r: f64,
    pub newtonian: f64,
    pub entropic: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub r: f64,
    pub velocity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::linspace;

    #[test]
    fn test_entropic_tends_to_asymptote() {
        let m = RotationModel::standard();
        let v = m.entropic_velocity(1e9);
        assert!((v - 2f64.sqrt()).abs() < 1e-3, "v={v}");
        assert!((m.asymptotic_velocity() - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_newtonian_decays() {
        let m = RotationModel::standard();
        let curve = m.rotation_curve(&linspace(1.0, 100.0, 200));
        assert!(curve.windows(2).all(|w| w[1].newtonian < w[0].newtonian));
        // 1000 / 100 → √10
        assert!((curve[199].newtonian - 10f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_entropic_above_newtonian() {
        let m = RotationModel::pronounced();
        let curve = m.rotation_curve(&linspace(10.0, 200.0, 500));
        assert!(curve.iter().all(|s| s.gap > 0.0));
        // The gap widens with radius
        assert!(curve[499].gap > curve[0].gap);
    }

    #[test]
    fn test_centre_clamped() {
        let m = RotationModel::standard();
        let v = m.newtonian_velocity(0.0);
        assert!(v.is_finite());
        assert!((v - (1000.0f64 / 0.1).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_observations_seeded() {
        let m = RotationModel::standard();
        let radii = linspace(5.0, 95.0, 20);
        let a = m.synthetic_observations(&radii, 0.2, 42).unwrap();
        let b = m.synthetic_observations(&radii, 0.2, 42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
        // Scatter stays within a few sigma of the model
        assert!(a
            .iter()
            .all(|o| (o.velocity - m.entropic_velocity(o.r)).abs() < 2.0));
    }

    #[test]
    fn test_zero_sigma_matches_model() {
        let m = RotationModel::standard();
        let obs = m.synthetic_observations(&[10.0, 50.0], 0.0, 1).unwrap();
        for o in obs {
            assert_eq!(o.velocity, m.entropic_velocity(o.r));
        }
    }

    #[test]
    fn test_validate() {
        assert!(RotationModel::standard().validate().is_ok());
        let bad = RotationModel {
            alpha: -1.0,
            ..RotationModel::standard()
        };
        assert!(bad.validate().is_err());
        assert!(RotationModel::standard()
            .synthetic_observations(&[1.0], -0.1, 0)
            .is_err());
    }
}
