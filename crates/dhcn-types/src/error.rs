// ─────────────────────────────────────────────────────────────────────
// DHCN Simulation Kernel — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all DHCN kernel failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DhcnError {
    /// Parameters that make construction impossible (probability outside
    /// [0, 1], zero nodes, non-finite constants, malformed edges).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl DhcnError {
    /// Shorthand for building an [`DhcnError::InvalidConfiguration`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

pub type DhcnResult<T> = Result<T, DhcnError>;

/// Reject NaN and infinities in a named parameter.
pub fn ensure_finite(name: &str, value: f64) -> DhcnResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DhcnError::invalid(format!("{name} must be finite, got {value}")))
    }
}

/// Reject values that are not strictly positive (or not finite).
pub fn ensure_positive(name: &str, value: f64) -> DhcnResult<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(DhcnError::invalid(format!("{name} must be > 0, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_configuration() {
        let err = DhcnError::invalid("node_count must be > 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: node_count must be > 0"
        );
    }

    #[test]
    fn test_ensure_finite_rejects_nan() {
        assert!(ensure_finite("x", f64::NAN).is_err());
        assert!(ensure_finite("x", f64::INFINITY).is_err());
        assert!(ensure_finite("x", -3.5).is_ok());
    }

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("dt", 0.01).is_ok());
        assert!(ensure_positive("dt", 0.0).is_err());
        assert!(ensure_positive("dt", -1.0).is_err());
    }
}
