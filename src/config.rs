/// Default tolerance for [`MatrixLayout::is_close`](crate::MatrixLayout::is_close).
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default eigenvalue iteration budget (per eigenvalue).
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Numeric settings for comparisons and iterative kernels.
///
/// Passed explicitly to every operation that needs it; the crate keeps no
/// global state.
///
/// ```
/// use matrica::KernelConfig;
///
/// let cfg = KernelConfig::default().with_max_iterations(100);
/// assert_eq!(cfg.max_iterations, 100);
/// assert_eq!(cfg.tolerance, 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Frobenius-norm tolerance for approximate equality (default: 1e-9).
    pub tolerance: f64,
    /// Maximum QR sweeps spent on any single eigenvalue before returning
    /// [`MatrixError::MaxIterationsExceeded`](crate::MatrixError::MaxIterationsExceeded)
    /// (default: 50).
    pub max_iterations: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl KernelConfig {
    /// Replace the comparison tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replace the eigenvalue iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Settings from `MATRICA_TOLERANCE` / `MATRICA_MAX_ITERATIONS`.
    ///
    /// Unset variables keep their defaults; unparsable or negative values are
    /// logged and ignored.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[cfg(feature = "std")]
    fn from_lookup(lookup: impl Fn(&str) -> Option<std::string::String>) -> Self {
        let mut cfg = Self::default();
        if let Some(raw) = lookup("MATRICA_TOLERANCE") {
            match raw.trim().parse::<f64>() {
                Ok(tol) if tol.is_finite() && tol >= 0.0 => cfg.tolerance = tol,
                _ => tracing::warn!(value = %raw, "ignoring invalid MATRICA_TOLERANCE"),
            }
        }
        if let Some(raw) = lookup("MATRICA_MAX_ITERATIONS") {
            match raw.trim().parse::<usize>() {
                Ok(n) => cfg.max_iterations = n,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid MATRICA_MAX_ITERATIONS"),
            }
        }
        cfg
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use std::string::{String, ToString};

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults() {
        let cfg = KernelConfig::default();
        assert_eq!(cfg.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(cfg.max_iterations, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn env_overrides() {
        let cfg = KernelConfig::from_lookup(lookup(&[
            ("MATRICA_TOLERANCE", "1e-6"),
            ("MATRICA_MAX_ITERATIONS", " 80 "),
        ]));
        assert_eq!(cfg.tolerance, 1e-6);
        assert_eq!(cfg.max_iterations, 80);
    }

    #[test]
    fn env_invalid_values_fall_back() {
        let cfg = KernelConfig::from_lookup(lookup(&[
            ("MATRICA_TOLERANCE", "-1"),
            ("MATRICA_MAX_ITERATIONS", "lots"),
        ]));
        assert_eq!(cfg, KernelConfig::default());
    }
}
