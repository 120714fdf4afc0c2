//! # EGS Backend
//!
//! Backend abstraction and a noisy state-vector simulator for EGS.
//!
//! ## Architecture
//!
//! ```text
//! egs_backend // L6: Backend
//!     Backend // trait: execute(), execute_batch()
//!     ExecutionResult // counts, shots, metadata
//!         max_probability(), hellinger_fidelity(), entropy_bits()
//!     SimulatorBackend // state vector + trajectory noise
//!         ideal(), eagle_like(), with_seed()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use egs_backend::prelude::*;
//! use egs_core::CircuitBuilder;
//!
//! // Create ideal simulator
//! let backend = SimulatorBackend::ideal(3).with_seed(42);
//!
//! let circuit = CircuitBuilder::new(3)
//!     .h(0)
//!     .cnot(0, 1)
//!     .cnot(1, 2)
//!     .measure_all()
//!     .build();
//!
//! let result = backend.execute(&circuit, 1000).unwrap();
//! assert_eq!(result.total_counts(), 1000);
//! println!("P(000) = {:.3}", result.probability("000"));
//! ```
//!
//! ## Noisy Simulation
//!
//! ```rust
//! use egs_backend::prelude::*;
//! use egs_core::CircuitBuilder;
//! use egs_noise::ThermalNoiseModel;
//!
//! // T1 = 120 µs, T2 = 80 µs, 60/300 ns gates
//! let backend = SimulatorBackend::new(2, ThermalNoiseModel::eagle_like()).with_seed(7);
//!
//! let circuit = CircuitBuilder::new(2).x(0).x(1).measure_all().build();
//! let result = backend.execute(&circuit, 500).unwrap();
//!
//! // "11" dominates; relaxation and depolarizing leak a little elsewhere
//! assert_eq!(result.most_frequent().unwrap().0, "11");
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait (L6_Backend → BackendTrait)
pub mod execution;

/// Simulator backend (L6_Backend → SimulatorBackend)
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use execution::{Backend, ExecutionMetadata, ExecutionResult};
pub use simulator::SimulatorBackend;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use egs_backend::prelude::*;
    //! ```

    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
    pub use crate::simulator::SimulatorBackend;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use egs_core::CircuitBuilder;
    use egs_noise::ThermalNoiseModel;
    use egs_schedule::AnsatzSpec;

    #[test]
    fn test_ghz_state() {
        let backend = SimulatorBackend::ideal(4).with_seed(42);
        let circuit = CircuitBuilder::new(4).h(0).cx_chain().measure_all().build();

        let result = backend.execute(&circuit, 1000).unwrap();
        let p = result.probability("0000") + result.probability("1111");
        assert!((p - 1.0).abs() < 1e-12);
        assert!((result.entropy_bits() - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_ansatz_circuits_execute() {
        let spec = AnsatzSpec::new(4, 1);
        let params = spec.random_params(42);
        let backend = SimulatorBackend::ideal(4).with_seed(1);

        for circuit in [
            spec.build_standard(&params).unwrap(),
            spec.build_egs(&params).unwrap(),
        ] {
            let result = backend.execute(&circuit, 2048).unwrap();
            assert_eq!(result.total_counts(), 2048);
            assert!(result.counts.keys().all(|bs| bs.len() == 4));
        }
    }

    #[test]
    fn test_noise_spreads_distribution() {
        let circuit = CircuitBuilder::new(3).x(0).x(1).x(2).cx_chain().measure_all().build();

        let ideal = SimulatorBackend::ideal(3).with_seed(3).execute(&circuit, 1000).unwrap();
        let noisy_model = ThermalNoiseModel::eagle_like().with_depol(0.02, 0.08);
        let noisy = SimulatorBackend::new(3, noisy_model)
            .with_seed(3)
            .execute(&circuit, 1000)
            .unwrap();

        assert_eq!(ideal.num_outcomes(), 1);
        assert!(noisy.num_outcomes() > 1);
        assert!(noisy.max_probability() < ideal.max_probability());
        assert!(noisy.hellinger_fidelity(&ideal) < 1.0);
    }
}
