//! Circuit schedule for EGS
//!
//! Layer: L4_Scheduling → CircuitSchedule
//!
//! Timed instruction list with idle-time analysis and decoherence
//! estimates against a thermal noise model.

use crate::scheduled_gate::{ScheduledGate, TimeSlot};
use egs_core::QubitId;
use egs_noise::ThermalNoiseModel;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

const TIME_EPSILON_NS: f64 = 1e-6;

/// Timed circuit
///
/// Per-qubit free times and the makespan are derived from the instruction
/// intervals; a qubit that never runs anything is free at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSchedule {
    num_qubits: usize,
    gates: Vec<ScheduledGate>,
    free_at: Vec<f64>,
    makespan_ns: f64,
}

impl CircuitSchedule {
    /// Build from timed instructions in circuit order
    pub fn from_gates(num_qubits: usize, gates: Vec<ScheduledGate>) -> Self {
        let mut free_at = vec![0.0_f64; num_qubits];
        for gate in &gates {
            for (q, t) in free_at.iter_mut().enumerate() {
                if gate.affects_qubit(q) {
                    *t = t.max(gate.end_ns);
                }
            }
        }
        let makespan_ns = gates.iter().map(|g| g.end_ns).fold(0.0, f64::max);

        Self {
            num_qubits,
            gates,
            free_at,
            makespan_ns,
        }
    }

    /// Timed instructions in circuit order
    pub fn gates(&self) -> &[ScheduledGate] {
        &self.gates
    }

    /// Makespan (ns)
    pub fn total_duration_ns(&self) -> f64 {
        self.makespan_ns
    }

    /// Register width
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Time each qubit finishes its last instruction (ns)
    pub fn qubit_end_times(&self) -> &[f64] {
        &self.free_at
    }

    // ========================================================================
    // Critical Path
    // ========================================================================

    /// Number of distinct start times among instructions that take time
    pub fn critical_path_depth(&self) -> usize {
        let mut starts: Vec<f64> = self
            .gates
            .iter()
            .filter(|g| g.duration() > 0.0)
            .map(|g| g.start_ns)
            .collect();
        starts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        starts.dedup_by(|a, b| (*a - *b).abs() < TIME_EPSILON_NS);
        starts.len()
    }

    /// Circuit indices of the timed instructions on the last qubit to finish
    ///
    /// Ties go to the lowest qubit index.
    pub fn critical_path(&self) -> Vec<usize> {
        let Some(last) = (0..self.num_qubits).reduce(|best, q| {
            if self.free_at[q] > self.free_at[best] {
                q
            } else {
                best
            }
        }) else {
            return Vec::new();
        };

        self.gates
            .iter()
            .filter(|g| g.slot_on(last).is_some())
            .map(|g| g.index)
            .collect()
    }

    // ========================================================================
    // Idle Time
    // ========================================================================

    /// Busy time per qubit (ns)
    pub fn active_times(&self) -> Vec<f64> {
        (0..self.num_qubits)
            .map(|q| self.time_slots(q).iter().map(TimeSlot::duration).sum())
            .collect()
    }

    /// Gaps before each qubit's last instruction (ns)
    ///
    /// Trailing time after a qubit finishes is not counted; readout closes
    /// every ansatz circuit, so all qubits end together there.
    pub fn idle_times(&self) -> Vec<f64> {
        self.free_at
            .iter()
            .zip(self.active_times())
            .map(|(&end, busy)| (end - busy).max(0.0))
            .collect()
    }

    /// Idle time summed over qubits (ns)
    pub fn total_idle_time(&self) -> f64 {
        self.idle_times().iter().sum()
    }

    /// Total idle time in units of T2
    pub fn weighted_idle_time(&self, model: &ThermalNoiseModel) -> f64 {
        let t2_ns = model.t2_us() * 1000.0;
        if t2_ns.is_finite() && t2_ns > 0.0 {
            self.total_idle_time() / t2_ns
        } else {
            0.0
        }
    }

    /// Busy slots of one qubit sorted by start time
    pub fn time_slots(&self, qubit: QubitId) -> Vec<TimeSlot> {
        let mut slots: Vec<TimeSlot> = self.gates.iter().filter_map(|g| g.slot_on(qubit)).collect();
        slots.sort_by(|a, b| a.start_ns.partial_cmp(&b.start_ns).unwrap_or(Ordering::Equal));
        slots
    }

    /// Whether any qubit is double-booked
    pub fn has_conflicts(&self) -> bool {
        (0..self.num_qubits).any(|q| {
            self.time_slots(q)
                .windows(2)
                .any(|pair| pair[0].overlaps(&pair[1]))
        })
    }

    /// Summed instruction time over makespan; 1.0 means fully serial
    pub fn parallelism_factor(&self) -> f64 {
        if self.makespan_ns <= 0.0 {
            return 1.0;
        }
        let serial: f64 = self.gates.iter().map(ScheduledGate::duration).sum();
        serial / self.makespan_ns
    }

    // ========================================================================
    // Decoherence
    // ========================================================================

    /// Mean per-qubit coherence loss while idle: `1 - exp(-idle/T2)`
    pub fn estimate_decoherence(&self, model: &ThermalNoiseModel) -> f64 {
        self.mean_idle_error(|idle_ns| 1.0 - model.relaxation_for(idle_ns).coherence_factor())
    }

    /// Mean per-qubit amplitude-damping probability while idle
    pub fn estimate_t1_error(&self, model: &ThermalNoiseModel) -> f64 {
        self.mean_idle_error(|idle_ns| model.relaxation_for(idle_ns).gamma)
    }

    fn mean_idle_error(&self, error: impl Fn(f64) -> f64) -> f64 {
        if self.num_qubits == 0 {
            return 0.0;
        }
        self.idle_times().into_iter().map(error).sum::<f64>() / self.num_qubits as f64
    }
}

impl fmt::Display for CircuitSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} instructions on {} qubits, {:.0} ns, {:.2}x parallel, {:.0} ns idle",
            self.gates.len(),
            self.num_qubits,
            self.makespan_ns,
            self.parallelism_factor(),
            self.total_idle_time()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use egs_core::Gate;

    /// rz on q1 while q0 runs two rotations, then an entangler and readout
    fn staggered() -> CircuitSchedule {
        CircuitSchedule::from_gates(
            2,
            vec![
                ScheduledGate::new(0, Gate::Rx(0, 0.3), 0.0, 60.0),
                ScheduledGate::new(1, Gate::Rz(1, 0.2), 0.0, 60.0),
                ScheduledGate::new(2, Gate::Rx(0, 0.1), 60.0, 120.0),
                ScheduledGate::new(3, Gate::Cnot(0, 1), 120.0, 420.0),
                ScheduledGate::new(4, Gate::Barrier(vec![]), 420.0, 420.0),
                ScheduledGate::new(5, Gate::MeasureAll, 420.0, 5420.0),
            ],
        )
    }

    #[test]
    fn test_derived_end_times() {
        let schedule = staggered();
        assert_eq!(schedule.total_duration_ns(), 5420.0);
        assert_eq!(schedule.qubit_end_times(), &[5420.0, 5420.0]);
        assert!(!schedule.has_conflicts());
    }

    #[test]
    fn test_unused_qubit_is_free_at_zero() {
        let schedule =
            CircuitSchedule::from_gates(3, vec![ScheduledGate::new(0, Gate::H(0), 0.0, 60.0)]);
        assert_eq!(schedule.qubit_end_times(), &[60.0, 0.0, 0.0]);
        assert_eq!(schedule.idle_times(), vec![0.0; 3]);
    }

    #[test]
    fn test_idle_and_active_times() {
        let schedule = staggered();
        assert_eq!(schedule.active_times(), vec![5420.0, 5360.0]);
        // q1 waits 60 ns for q0's second rotation
        assert_eq!(schedule.idle_times(), vec![0.0, 60.0]);
        assert_eq!(schedule.total_idle_time(), 60.0);
    }

    #[test]
    fn test_critical_path() {
        let schedule = staggered();
        // starts at 0, 60, 120 and 420
        assert_eq!(schedule.critical_path_depth(), 4);
        assert_eq!(schedule.critical_path(), vec![0, 2, 3, 5]);
    }

    #[test]
    fn test_conflict_detection() {
        let schedule = CircuitSchedule::from_gates(
            1,
            vec![
                ScheduledGate::new(0, Gate::H(0), 0.0, 60.0),
                ScheduledGate::new(1, Gate::X(0), 30.0, 90.0),
            ],
        );
        assert!(schedule.has_conflicts());
        assert_eq!(schedule.time_slots(0).len(), 2);
    }

    #[test]
    fn test_parallelism_factor() {
        let schedule = staggered();
        let serial = 60.0 + 60.0 + 60.0 + 300.0 + 5000.0;
        assert!((schedule.parallelism_factor() - serial / 5420.0).abs() < 1e-12);
        assert_eq!(CircuitSchedule::from_gates(2, vec![]).parallelism_factor(), 1.0);
    }

    #[test]
    fn test_decoherence_estimation() {
        let schedule = staggered();
        let model = ThermalNoiseModel::eagle_like();

        // only q1 idles, for 60 ns
        let expected = (1.0 - (-0.06f64 / 80.0).exp()) / 2.0;
        assert!((schedule.estimate_decoherence(&model) - expected).abs() < 1e-12);
        assert!(schedule.estimate_t1_error(&model) > 0.0);
        assert!((schedule.weighted_idle_time(&model) - 60.0 / 80_000.0).abs() < 1e-12);
        assert_eq!(schedule.estimate_decoherence(&ThermalNoiseModel::ideal()), 0.0);
    }

    #[test]
    fn test_display() {
        let text = CircuitSchedule::from_gates(
            1,
            vec![ScheduledGate::new(0, Gate::H(0), 0.0, 60.0)],
        )
        .to_string();
        assert_eq!(text, "1 instructions on 1 qubits, 60 ns, 1.00x parallel, 0 ns idle");
    }
}
