//! Circuit scheduler for EGS
//!
//! Layer: L4_Scheduling → Scheduler
//!
//! ASAP placement of a circuit on the time axis, plus the scores and
//! diagnostics the benchmark derives from it.

use crate::circuit_schedule::CircuitSchedule;
use crate::scheduled_gate::ScheduledGate;
use egs_core::{Circuit, Gate, QubitId};
use egs_noise::{GateTimes, ThermalNoiseModel};

/// Circuit scheduler
pub struct Scheduler;

impl Scheduler {
    // ========================================================================
    // ASAP Placement
    // ========================================================================

    /// Place every instruction as early as its qubits allow
    ///
    /// Barriers take no time but align the qubits they span. Global
    /// instructions wait for the whole register.
    pub fn compute_asap(circuit: &Circuit, gate_times: &GateTimes) -> CircuitSchedule {
        let width = circuit.num_qubits();
        let mut free_at = vec![0.0_f64; width];

        let timed = circuit
            .gates()
            .iter()
            .enumerate()
            .map(|(index, gate)| {
                let span = Self::span(gate, width);
                let start = span.iter().map(|&q| free_at[q]).fold(0.0, f64::max);
                let end = start + gate_times.gate_duration(gate);
                for q in span {
                    free_at[q] = end;
                }
                ScheduledGate::new(index, gate.clone(), start, end)
            })
            .collect();

        CircuitSchedule::from_gates(width, timed)
    }

    /// Register positions `gate` waits on and then blocks
    fn span(gate: &Gate, width: usize) -> Vec<QubitId> {
        if gate.is_global() {
            (0..width).collect()
        } else {
            gate.qubits().into_iter().filter(|&q| q < width).collect()
        }
    }

    // ========================================================================
    // Scoring
    // ========================================================================

    /// Expected gate fidelity times the coherence left after idling
    ///
    /// In `[0, 1]`; an ideal model scores 1.
    pub fn score_circuit(
        circuit: &Circuit,
        model: &ThermalNoiseModel,
        gate_times: &GateTimes,
    ) -> f64 {
        let idle_loss = Self::compute_asap(circuit, gate_times).estimate_decoherence(model);
        model.estimate_circuit_fidelity(circuit) * (1.0 - idle_loss)
    }

    /// Qubit that idles longest, or `None` when nothing idles
    pub fn find_bottleneck_qubit(schedule: &CircuitSchedule) -> Option<QubitId> {
        schedule
            .idle_times()
            .into_iter()
            .enumerate()
            .filter(|&(_, idle)| idle > 0.0)
            .fold(None, |best: Option<(QubitId, f64)>, (q, idle)| match best {
                Some((_, top)) if top >= idle => best,
                _ => Some((q, idle)),
            })
            .map(|(q, _)| q)
    }

    /// Busy qubit-time over makespan times width; 1.0 when nobody waits
    pub fn scheduling_efficiency(schedule: &CircuitSchedule) -> f64 {
        let available = schedule.total_duration_ns() * schedule.num_qubits() as f64;
        if available <= 0.0 {
            return 1.0;
        }
        schedule.active_times().iter().sum::<f64>() / available
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use egs_core::CircuitBuilder;

    #[test]
    fn test_asap_simple() {
        let circuit = CircuitBuilder::new(2).h(0).h(1).cnot(0, 1).build();
        let schedule = Scheduler::compute_asap(&circuit, &GateTimes::default());

        let gates = schedule.gates();
        assert_eq!(gates[0].start_ns, 0.0);
        assert_eq!(gates[1].start_ns, 0.0);
        assert_eq!(gates[2].start_ns, 60.0);
        assert_eq!(schedule.total_duration_ns(), 360.0);
    }

    #[test]
    fn test_asap_chain() {
        let circuit = CircuitBuilder::new(3).h(0).cx_chain().build();
        let schedule = Scheduler::compute_asap(&circuit, &GateTimes::default());

        let gates = schedule.gates();
        assert_eq!(gates[1].start_ns, 60.0);
        assert_eq!(gates[2].start_ns, gates[1].end_ns);
    }

    #[test]
    fn test_barrier_alignment() {
        let circuit = CircuitBuilder::new(2)
            .cx(0, 1)
            .h(0)
            .barrier_all()
            .h(1)
            .build();
        let schedule = Scheduler::compute_asap(&circuit, &GateTimes::default());

        // h(1) waits for h(0) behind the barrier
        assert_eq!(schedule.gates()[3].start_ns, 360.0);
        assert!(!schedule.has_conflicts());
    }

    #[test]
    fn test_partial_barrier() {
        let circuit = CircuitBuilder::new(3)
            .h(0)
            .barrier(vec![0, 1])
            .h(1)
            .h(2)
            .build();
        let schedule = Scheduler::compute_asap(&circuit, &GateTimes::default());

        assert_eq!(schedule.gates()[2].start_ns, 60.0);
        assert_eq!(schedule.gates()[3].start_ns, 0.0);
    }

    #[test]
    fn test_parallelism() {
        let circuit = CircuitBuilder::new(5).h_layer().build();
        let schedule = Scheduler::compute_asap(&circuit, &GateTimes::default());
        assert!((schedule.parallelism_factor() - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_score_circuit() {
        let circuit = CircuitBuilder::new(2).h(0).cnot(0, 1).measure_all().build();
        let score = Scheduler::score_circuit(
            &circuit,
            &ThermalNoiseModel::eagle_like(),
            &GateTimes::default(),
        );
        assert!(score > 0.0 && score < 1.0);

        let ideal = Scheduler::score_circuit(
            &circuit,
            &ThermalNoiseModel::ideal(),
            &GateTimes::default(),
        );
        assert!((ideal - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_bottleneck_is_the_waiting_qubit() {
        // q1 waits 180 ns for three rotations on q0
        let circuit = CircuitBuilder::new(2).rx(0, 0.1).rx(0, 0.2).rx(0, 0.3).cx(0, 1).build();
        let schedule = Scheduler::compute_asap(&circuit, &GateTimes::default());
        assert_eq!(Scheduler::find_bottleneck_qubit(&schedule), Some(1));

        let layer = CircuitBuilder::new(3).h_layer().build();
        let flat = Scheduler::compute_asap(&layer, &GateTimes::default());
        assert_eq!(Scheduler::find_bottleneck_qubit(&flat), None);
    }

    #[test]
    fn test_scheduling_efficiency() {
        let times = GateTimes::default();
        let efficiency = |c: &Circuit| Scheduler::scheduling_efficiency(&Scheduler::compute_asap(c, &times));

        // 720 busy ns out of 2 x 420
        let staggered = CircuitBuilder::new(2).rz(0, 0.5).cx(0, 1).rz(1, 0.5).build();
        assert!((efficiency(&staggered) - 720.0 / 840.0).abs() < 1e-12);

        let layer = CircuitBuilder::new(2).rx_layer(&[0.1, 0.2]).build();
        assert!((efficiency(&layer) - 1.0).abs() < 1e-12);
        assert_eq!(efficiency(&Circuit::new(2)), 1.0);
    }

    #[test]
    fn test_empty_circuit() {
        let schedule = Scheduler::compute_asap(&Circuit::new(3), &GateTimes::default());
        assert_eq!(schedule.total_duration_ns(), 0.0);
        assert_eq!(schedule.idle_times(), vec![0.0; 3]);
    }
}
