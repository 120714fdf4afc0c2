//! # EGS Noise
//!
//! Thermal-relaxation noise model and gate timing for superconducting
//! processors.
//!
//! ## Architecture
//!
//! ```text
//! egs_noise // L2: Noise Model
//!     ThermalNoiseModel // T1/T2 + depolarizing, per instruction name
//!         eagle_like(), ideal(), new(), validate()
//!         error_for(), gate_fidelity_estimate(), estimate_circuit_fidelity()
//!     ThermalRelaxation // gamma/lambda over a duration
//!     GateError // relaxation composed with depolarizing
//!     GateTimes // gate durations
//!         from_noise_model(), gate_duration(), circuit_duration_asap()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use egs_noise::prelude::*;
//! use egs_core::Gate;
//!
//! let model = ThermalNoiseModel::eagle_like();
//! let cx_error = model.error_for(&Gate::Cnot(0, 1)).unwrap();
//! assert_eq!(cx_error.num_qubits, 2);
//!
//! // coherences decay as exp(-t/T2)
//! let r = model.relaxation_2q();
//! assert!((r.coherence_factor() - (-0.3f64 / 80.0).exp()).abs() < 1e-12);
//! ```
//!
//! ## Gate Timing
//!
//! ```rust
//! use egs_noise::prelude::*;
//! use egs_core::CircuitBuilder;
//!
//! let times = GateTimes::default();
//! let circuit = CircuitBuilder::new(5).h_layer().cx_chain().build();
//!
//! let (duration, _) = times.circuit_duration_asap(&circuit);
//! assert!((duration - (60.0 + 4.0 * 300.0)).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Thermal noise model (L2_Noise → ThermalNoiseModel)
pub mod noise_model;

/// Gate timing configuration (L2_Noise → GateTimes)
pub mod gate_times;

// ============================================================================
// Re-exports
// ============================================================================

pub use gate_times::GateTimes;
pub use noise_model::{GateError, ThermalNoiseModel, ThermalRelaxation};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::gate_times::GateTimes;
    pub use crate::noise_model::{GateError, ThermalNoiseModel, ThermalRelaxation};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use egs_core::CircuitBuilder;

    #[test]
    fn test_deeper_circuit_has_lower_estimate() {
        let model = ThermalNoiseModel::eagle_like();

        let shallow = CircuitBuilder::new(4).h_layer().cx_chain().build();
        let deep = CircuitBuilder::new(4)
            .h_layer()
            .cx_chain()
            .cx_chain()
            .cx_chain()
            .build();

        let f_shallow = model.estimate_circuit_fidelity(&shallow);
        let f_deep = model.estimate_circuit_fidelity(&deep);
        assert!(f_deep < f_shallow);
        assert!(f_shallow < 1.0);
    }

    #[test]
    fn test_ideal_model_estimates_unity() {
        let model = ThermalNoiseModel::ideal();
        let circuit = CircuitBuilder::new(3).h_layer().cx_chain().measure_all().build();
        assert!((model.estimate_circuit_fidelity(&circuit) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_times_follow_model() {
        let model = ThermalNoiseModel::eagle_like().with_gate_times(100.0, 400.0);
        let times = GateTimes::from_noise_model(&model);
        let circuit = CircuitBuilder::new(2).h(0).cx(0, 1).build();
        let (duration, _) = times.circuit_duration_asap(&circuit);
        assert!((duration - 500.0).abs() < 1e-9);
    }
}
