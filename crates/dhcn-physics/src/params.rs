// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Canonical Parameters
// ─────────────────────────────────────────────────────────────────────
//! Normalised constants of the bandwidth model and small series helpers
//! shared by the simulations.

/// Speed of light in normalised units.
pub const SPEED_OF_LIGHT: f64 = 1.0;

/// Total refresh bandwidth Ω_max of the network (operations per unit time).
pub const OMEGA_MAX: f64 = 100.0;

/// Rest mass of a test agent.
pub const REST_MASS: f64 = 1.0;

/// Agents requested at or above `c` are clamped to this fraction of `c`.
pub const MAX_SPEED_FRACTION: f64 = 0.999;

/// `n` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Index of the smallest finite value, first one on ties.
pub fn argmin(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b <= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Whole steps of length `dt` that fit in `total` (truncating).
pub fn step_count(total: f64, dt: f64) -> usize {
    // Tolerate 10.0 / 0.01 landing just under 1000
    ((total / dt) + 1e-9).floor().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(1.0, 100.0, 200);
        assert_eq!(xs.len(), 200);
        assert_eq!(xs[0], 1.0);
        assert!((xs[199] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn test_argmin() {
        assert_eq!(argmin(&[3.0, 1.0, 2.0, 1.0]), Some(1));
        assert_eq!(argmin(&[f64::NAN, 5.0]), Some(1));
        assert_eq!(argmin(&[]), None);
    }

    #[test]
    fn test_step_count() {
        assert_eq!(step_count(10.0, 0.01), 1000);
        assert_eq!(step_count(20.0, 0.01), 2000);
        assert_eq!(step_count(0.05, 0.1), 0);
    }

    #[test]
    fn test_speed_fraction_subluminal() {
        assert!(MAX_SPEED_FRACTION < 1.0);
    }
}
