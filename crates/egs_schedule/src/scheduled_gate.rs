//! Scheduled gate representation for EGS
//!
//! Layer: L4_Scheduling → ScheduledGate
//!
//! Time-tagged instructions for idle-time analysis.

use egs_core::{Gate, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction placed on the time axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGate {
    /// Position in the source circuit
    pub index: usize,

    /// Instruction
    pub gate: Gate,

    /// Start (ns)
    pub start_ns: f64,

    /// End (ns)
    pub end_ns: f64,
}

impl ScheduledGate {
    /// Place `gate` on `[start_ns, end_ns)`
    pub fn new(index: usize, gate: Gate, start_ns: f64, end_ns: f64) -> Self {
        Self {
            index,
            gate,
            start_ns,
            end_ns,
        }
    }

    /// Length of the interval (ns)
    pub fn duration(&self) -> f64 {
        self.end_ns - self.start_ns
    }

    /// Qubits listed on the instruction (empty for global operations)
    pub fn qubits(&self) -> Vec<QubitId> {
        self.gate.qubits()
    }

    /// Half-open interval intersection with `[start, end)`
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start_ns < end && start < self.end_ns
    }

    /// Whether the instruction occupies `qubit`; global operations occupy all
    pub fn affects_qubit(&self, qubit: QubitId) -> bool {
        self.gate.acts_on(qubit)
    }

    /// Occupied slot on `qubit`, if the instruction touches it and takes time
    pub fn slot_on(&self, qubit: QubitId) -> Option<TimeSlot> {
        (self.duration() > 0.0 && self.affects_qubit(qubit))
            .then(|| TimeSlot::new(qubit, self.start_ns, self.end_ns))
    }
}

impl fmt::Display for ScheduledGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {:?} @ {:.0}..{:.0} ns",
            self.index,
            self.gate.name(),
            self.qubits(),
            self.start_ns,
            self.end_ns
        )
    }
}

// ============================================================================
// TimeSlot
// ============================================================================

/// Busy interval of one qubit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Qubit
    pub qubit: QubitId,
    /// Start (ns)
    pub start_ns: f64,
    /// End (ns)
    pub end_ns: f64,
}

impl TimeSlot {
    /// Slot on `qubit` covering `[start_ns, end_ns)`
    pub fn new(qubit: QubitId, start_ns: f64, end_ns: f64) -> Self {
        Self {
            qubit,
            start_ns,
            end_ns,
        }
    }

    /// Two slots collide when they share a qubit and their intervals intersect
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.qubit == other.qubit && self.start_ns < other.end_ns && other.start_ns < self.end_ns
    }

    /// Length (ns)
    pub fn duration(&self) -> f64 {
        self.end_ns - self.start_ns
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entangler_interval() {
        let cx = ScheduledGate::new(4, Gate::Cnot(2, 3), 60.0, 360.0);
        assert_eq!(cx.duration(), 300.0);
        assert_eq!(cx.qubits(), vec![2, 3]);
        assert_eq!(cx.to_string(), "#4 cx [2, 3] @ 60..360 ns");
    }

    #[test]
    fn test_half_open_overlap() {
        let rz = ScheduledGate::new(0, Gate::Rz(1, 0.4), 60.0, 120.0);

        assert!(rz.overlaps(0.0, 61.0));
        assert!(rz.overlaps(119.0, 500.0));
        assert!(!rz.overlaps(0.0, 60.0));
        assert!(!rz.overlaps(120.0, 180.0));
    }

    #[test]
    fn test_measure_all_occupies_every_qubit() {
        let meas = ScheduledGate::new(9, Gate::MeasureAll, 720.0, 5720.0);
        assert!(meas.affects_qubit(0));
        assert!(meas.affects_qubit(9));
        assert!(meas.qubits().is_empty());
    }

    #[test]
    fn test_slot_on() {
        let rx = ScheduledGate::new(0, Gate::Rx(3, 0.1), 60.0, 120.0);
        assert_eq!(rx.slot_on(3), Some(TimeSlot::new(3, 60.0, 120.0)));
        assert_eq!(rx.slot_on(2), None);

        // zero-length barriers never occupy a qubit
        let barrier = ScheduledGate::new(1, Gate::Barrier(vec![]), 120.0, 120.0);
        assert_eq!(barrier.slot_on(0), None);
    }

    #[test]
    fn test_back_to_back_slots_do_not_collide() {
        let first = TimeSlot::new(1, 0.0, 300.0);
        let next = TimeSlot::new(1, 300.0, 360.0);
        let parallel = TimeSlot::new(2, 0.0, 300.0);
        let clash = TimeSlot::new(1, 299.0, 360.0);

        assert!(!first.overlaps(&next));
        assert!(!first.overlaps(&parallel));
        assert!(first.overlaps(&clash));
        assert_eq!(next.duration(), 60.0);
    }
}
