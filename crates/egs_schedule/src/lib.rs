//! # EGS Schedule
//!
//! Standard and entropic orderings of the genomic ansatz, plus ASAP timing
//! analysis for comparing them.
//!
//! ## Architecture
//!
//! ```text
//! egs_schedule // L4: Scheduling
//!     Ansatz
//!         AnsatzSpec // num_qubits, layers
//!             num_params(), random_params(), build_standard(), build_egs()
//!         SchedulingStrategy // Standard | Egs
//!     ScheduledGate // time-tagged gate
//!     TimeSlot // per-qubit occupancy
//!     CircuitSchedule // idle, parallelism, decoherence
//!     Scheduler // compute_asap(), score_circuit()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use egs_schedule::prelude::*;
//!
//! let spec = AnsatzSpec::new(6, 2);
//! let params = spec.random_params(42);
//!
//! let standard = SchedulingStrategy::Standard.build(&spec, &params).unwrap();
//! let egs = SchedulingStrategy::Egs.build(&spec, &params).unwrap();
//!
//! // entanglement is halved and deferred
//! assert_eq!(egs.count_2q() * 2, standard.count_2q());
//! ```
//!
//! ## Timing Analysis
//!
//! ```rust
//! use egs_schedule::prelude::*;
//! use egs_core::CircuitBuilder;
//! use egs_noise::{GateTimes, ThermalNoiseModel};
//!
//! let circuit = CircuitBuilder::new(3)
//!     .h(0)
//!     .cnot(0, 1)
//!     .cnot(1, 2)
//!     .build();
//!
//! let schedule = Scheduler::compute_asap(&circuit, &GateTimes::default());
//! let decoherence = schedule.estimate_decoherence(&ThermalNoiseModel::eagle_like());
//! println!("{}", schedule);
//! println!("Estimated idle decoherence: {:.6}", decoherence);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Ansatz orderings (L4_Scheduling → Ansatz)
pub mod ansatz;

/// Scheduled gate with timing (L4_Scheduling → ScheduledGate)
pub mod scheduled_gate;

/// Circuit schedule (L4_Scheduling → CircuitSchedule)
pub mod circuit_schedule;

/// Scheduler algorithms (L4_Scheduling → Scheduler)
pub mod scheduler;

// ============================================================================
// Re-exports
// ============================================================================

pub use ansatz::{AnsatzSpec, SchedulingStrategy};
pub use circuit_schedule::CircuitSchedule;
pub use scheduled_gate::{ScheduledGate, TimeSlot};
pub use scheduler::Scheduler;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use egs_schedule::prelude::*;
    //! ```

    pub use crate::ansatz::{AnsatzSpec, SchedulingStrategy};
    pub use crate::circuit_schedule::CircuitSchedule;
    pub use crate::scheduled_gate::{ScheduledGate, TimeSlot};
    pub use crate::scheduler::Scheduler;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use egs_noise::{GateTimes, ThermalNoiseModel};

    fn both(n: usize, layers: usize) -> (egs_core::Circuit, egs_core::Circuit) {
        let spec = AnsatzSpec::new(n, layers);
        let params = spec.random_params(42);
        (
            spec.build_standard(&params).unwrap(),
            spec.build_egs(&params).unwrap(),
        )
    }

    #[test]
    fn test_egs_is_shorter_in_time() {
        let (std, egs) = both(10, 2);
        let times = GateTimes::default();

        let t_std = Scheduler::compute_asap(&std, &times).total_duration_ns();
        let t_egs = Scheduler::compute_asap(&egs, &times).total_duration_ns();
        assert!(t_egs < t_std, "egs {} vs standard {}", t_egs, t_std);
    }

    #[test]
    fn test_egs_is_shallower() {
        let (std, egs) = both(10, 2);
        assert!(egs.depth() < std.depth());
    }

    #[test]
    fn test_egs_scores_higher() {
        let (std, egs) = both(8, 2);
        let model = ThermalNoiseModel::eagle_like();
        let times = GateTimes::from_noise_model(&model);

        let s_std = Scheduler::score_circuit(&std, &model, &times);
        let s_egs = Scheduler::score_circuit(&egs, &model, &times);
        assert!(s_egs > s_std);
    }

    #[test]
    fn test_schedules_are_conflict_free() {
        let (std, egs) = both(5, 3);
        let times = GateTimes::default();
        assert!(!Scheduler::compute_asap(&std, &times).has_conflicts());
        assert!(!Scheduler::compute_asap(&egs, &times).has_conflicts());
    }

    #[test]
    fn test_measurement_ends_schedule() {
        let (_, egs) = both(4, 1);
        let schedule = Scheduler::compute_asap(&egs, &GateTimes::default());
        let last = schedule.gates().last().unwrap();
        assert!(last.gate.is_measurement());
        assert_eq!(last.end_ns, schedule.total_duration_ns());
    }
}
