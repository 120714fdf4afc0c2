//! Pass trait and working representation for EGS compilation
//!
//! Layer: L5_Transpile → Pass

use egs_core::error::EgsResult;
use egs_core::{Circuit, Gate, QubitId};
use std::f64::consts::{PI, TAU};

/// Rotations closer than this to zero are treated as identity
pub const ANGLE_EPSILON: f64 = 1e-10;

/// A circuit-to-circuit rewrite
pub trait Pass: Send + Sync {
    /// Pass name used in statistics and logs
    fn name(&self) -> &'static str;

    /// Rewrite `circuit` in place; returns whether anything changed
    fn run(&self, circuit: &mut Circuit) -> EgsResult<bool>;
}

/// Wrap an angle into `(-π, π]`
///
/// Rotations by `θ` and `θ + 2π` differ only by a global phase.
pub fn normalize_angle(theta: f64) -> f64 {
    let mut a = theta % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Check whether a rotation angle is the identity up to global phase
pub fn is_zero_angle(theta: f64) -> bool {
    normalize_angle(theta).abs() < ANGLE_EPSILON
}

// ============================================================================
// GateSlots
// ============================================================================

/// Instruction list with tombstones, for passes that delete and rewrite
pub(crate) struct GateSlots {
    slots: Vec<Option<Gate>>,
}

impl GateSlots {
    pub(crate) fn from_circuit(circuit: &Circuit) -> Self {
        Self {
            slots: circuit.gates().iter().cloned().map(Some).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&Gate> {
        self.slots.get(idx).and_then(|s| s.as_ref())
    }

    pub(crate) fn remove(&mut self, idx: usize) -> Option<Gate> {
        self.slots.get_mut(idx).and_then(|s| s.take())
    }

    pub(crate) fn replace(&mut self, idx: usize, gate: Gate) {
        if let Some(slot) = self.slots.get_mut(idx) {
            *slot = Some(gate);
        }
    }

    /// Insert before `idx`, shifting later slots
    pub(crate) fn insert(&mut self, idx: usize, gate: Gate) {
        self.slots.insert(idx.min(self.slots.len()), Some(gate));
    }

    /// Next live instruction after `after` that touches `qubit`
    pub(crate) fn next_on_qubit(&self, after: usize, qubit: QubitId) -> Option<usize> {
        (after + 1..self.slots.len()).find(|&j| self.get(j).is_some_and(|g| g.acts_on(qubit)))
    }

    /// Instruction that directly follows `idx` on every one of its qubits
    ///
    /// None when the successors differ between wires or the gate is global.
    pub(crate) fn successor(&self, idx: usize) -> Option<usize> {
        let gate = self.get(idx)?;
        if gate.is_global() {
            return None;
        }
        let mut next = None;
        for q in gate.qubits() {
            let j = self.next_on_qubit(idx, q)?;
            match next {
                None => next = Some(j),
                Some(prev) if prev != j => return None,
                Some(_) => {}
            }
        }
        next
    }

    /// Write the surviving instructions back into `circuit`
    pub(crate) fn write_back(self, circuit: &mut Circuit) {
        let gates = self.slots.into_iter().flatten().collect();
        *circuit = circuit.with_gates(gates);
    }
}

// ============================================================================
// Tests
// ============================================================================
