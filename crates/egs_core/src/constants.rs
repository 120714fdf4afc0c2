//! Constants for EGS
//!
//! Layer: L0_Foundation → Constants
//!
//! Physical constants of the reference superconducting processor and the
//! benchmark defaults.

// ============================================================================
// Physics Constants
// ============================================================================

pub mod physics {
    //! Physical constants for the reference hardware
    //! Typical values for IBM Eagle-like processors

    /// T1 relaxation time in microseconds
    pub const DEFAULT_T1_US: f64 = 120.0;

    /// T2 dephasing time in microseconds
    pub const DEFAULT_T2_US: f64 = 80.0;

    /// Single-qubit gate time in nanoseconds
    pub const GATE_TIME_1Q_NS: f64 = 60.0;

    /// Two-qubit gate time in nanoseconds
    pub const GATE_TIME_2Q_NS: f64 = 300.0;

    /// Measurement time in nanoseconds (timing analysis only)
    pub const MEASUREMENT_NS: f64 = 5000.0;

    /// Single-qubit depolarizing probability
    pub const DEPOL_1Q: f64 = 0.001;

    /// Two-qubit depolarizing probability
    pub const DEPOL_2Q: f64 = 0.01;

    /// Instructions that carry single-qubit noise
    pub const NOISY_1Q_GATES: &[&str] = &["h", "x", "z", "ry", "rz", "rx", "s", "t"];

    /// Instructions that carry two-qubit noise
    pub const NOISY_2Q_GATES: &[&str] = &["cx", "cz"];

    /// Convert microseconds to nanoseconds
    #[inline]
    pub const fn us_to_ns(us: f64) -> f64 {
        us * 1e3
    }

    /// Convert nanoseconds to microseconds
    #[inline]
    pub const fn ns_to_us(ns: f64) -> f64 {
        ns * 1e-3
    }
}

// ============================================================================
// Benchmark Constants
// ============================================================================

pub mod bench {
    //! Benchmark defaults

    /// Shots per circuit execution
    pub const DEFAULT_SHOTS: u64 = 8192;

    /// Seed for parameter generation and sampling
    pub const DEFAULT_SEED: u64 = 42;

    /// Ansatz width
    pub const DEFAULT_QUBITS: usize = 10;

    /// Ansatz layers
    pub const DEFAULT_LAYERS: usize = 2;

    /// Deepest ansatz accepted
    pub const MAX_LAYERS: usize = 1_000;

    /// Optimization level used for both circuits
    pub const DEFAULT_OPTIMIZATION_LEVEL: u8 = 3;

    /// Largest register the state-vector simulator accepts
    pub const MAX_SIM_QUBITS: usize = 20;

    /// Upper bound on shots per execution
    pub const MAX_SHOTS: u64 = 1_000_000;

    /// Number of ansatz parameters for `layers` layers on `num_qubits` qubits
    ///
    /// Saturates at `usize::MAX`.
    #[inline]
    pub const fn num_params(num_qubits: usize, layers: usize) -> usize {
        if num_qubits == 0 {
            0
        } else {
            layers.saturating_mul(num_qubits.saturating_add(num_qubits - 1))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t2_constraint() {
        assert!(physics::DEFAULT_T2_US <= 2.0 * physics::DEFAULT_T1_US);
    }

    #[test]
    fn test_num_params() {
        assert_eq!(bench::num_params(10, 2), 38);
        assert_eq!(bench::num_params(2, 1), 3);
        assert_eq!(bench::num_params(0, 3), 0);
    }

    #[test]
    fn test_unit_conversion() {
        assert!((physics::us_to_ns(1.5) - 1500.0).abs() < 1e-9);
        assert!((physics::ns_to_us(300.0) - 0.3).abs() < 1e-12);
    }
}
