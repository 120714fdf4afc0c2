//! Circuit builder for EGS
//!
//! Layer: L1_Circuit → CircuitBuilder
//!
//! Fluent builder for constructing circuits, with layer helpers for the
//! ansatz shapes the scheduler produces.

use crate::circuit::Circuit;
use crate::error::{EgsError, EgsResult};
use crate::gate::Gate;
use crate::types::{Angle, QubitId};

/// One appender method per fixed one-qubit gate
macro_rules! fixed_gates {
    ($($(#[$doc:meta])* $method:ident => $variant:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $method(self, qubit: QubitId) -> Self {
                self.gate(Gate::$variant(qubit))
            }
        )*
    };
}

/// One appender method per rotation axis
macro_rules! rotations {
    ($($(#[$doc:meta])* $method:ident => $variant:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $method(self, qubit: QubitId, angle: Angle) -> Self {
                self.gate(Gate::$variant(qubit, angle))
            }
        )*
    };
}

/// Consuming circuit builder
///
/// A gate the circuit rejects is dropped; the first rejection is kept for
/// [`CircuitBuilder::try_build`].
pub struct CircuitBuilder {
    circuit: Circuit,
    first_error: Option<EgsError>,
}

impl CircuitBuilder {
    /// Builder for an empty `num_qubits`-qubit circuit
    pub fn new(num_qubits: usize) -> Self {
        Self::wrap(Circuit::new(num_qubits))
    }

    /// Builder for an empty named circuit
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self::wrap(Circuit::with_name(num_qubits, name))
    }

    fn wrap(circuit: Circuit) -> Self {
        Self {
            circuit,
            first_error: None,
        }
    }

    /// Append any instruction
    pub fn gate(mut self, gate: Gate) -> Self {
        self.push(gate);
        self
    }

    fn push(&mut self, gate: Gate) {
        if let Err(e) = self.circuit.add_gate(gate) {
            self.first_error.get_or_insert(e);
        }
    }

    // ========================================================================
    // Single-qubit
    // ========================================================================

    fixed_gates! {
        /// Hadamard
        h => H;
        /// Bit flip
        x => X;
        /// Pauli Y
        y => Y;
        /// Phase flip
        z => Z;
        /// √Z
        s => S;
        /// S†
        sdg => Sdg;
        /// ⁴√Z
        t => T;
        /// T†
        tdg => Tdg;
        /// √X
        sx => Sx;
        /// No-op placeholder
        id => Id;
    }

    rotations! {
        /// X rotation by `angle` radians
        rx => Rx;
        /// Y rotation by `angle` radians
        ry => Ry;
        /// Z rotation by `angle` radians
        rz => Rz;
    }

    // ========================================================================
    // Entanglers and control
    // ========================================================================

    /// CX with `control` and `target`
    pub fn cnot(self, control: QubitId, target: QubitId) -> Self {
        self.gate(Gate::Cnot(control, target))
    }

    /// Same as [`CircuitBuilder::cnot`]
    pub fn cx(self, control: QubitId, target: QubitId) -> Self {
        self.cnot(control, target)
    }

    /// Controlled Z
    pub fn cz(self, control: QubitId, target: QubitId) -> Self {
        self.gate(Gate::Cz(control, target))
    }

    /// Exchange two qubits
    pub fn swap(self, qubit1: QubitId, qubit2: QubitId) -> Self {
        self.gate(Gate::Swap(qubit1, qubit2))
    }

    /// Read out one qubit
    pub fn measure(self, qubit: QubitId) -> Self {
        self.gate(Gate::Measure(qubit))
    }

    /// Barrier across the register followed by measurement of every qubit
    pub fn measure_all(self) -> Self {
        self.barrier_all().gate(Gate::MeasureAll)
    }

    /// Fence over `qubits`
    pub fn barrier(self, qubits: Vec<QubitId>) -> Self {
        self.gate(Gate::Barrier(qubits))
    }

    /// Fence over the whole register
    pub fn barrier_all(self) -> Self {
        self.gate(Gate::Barrier(vec![]))
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// H on every qubit
    pub fn h_layer(mut self) -> Self {
        for q in 0..self.circuit.num_qubits() {
            self.push(Gate::H(q));
        }
        self
    }

    /// `rx(angles[i])` on qubit `i`
    pub fn rx_layer(mut self, angles: &[Angle]) -> Self {
        for (q, &a) in angles.iter().enumerate() {
            self.push(Gate::Rx(q, a));
        }
        self
    }

    /// `rz(angles[i])` on qubit `offset + i`
    pub fn rz_layer(mut self, offset: QubitId, angles: &[Angle]) -> Self {
        for (i, &a) in angles.iter().enumerate() {
            self.push(Gate::Rz(offset + i, a));
        }
        self
    }

    /// `cx(i, i+1)` down the line
    pub fn cx_chain(mut self) -> Self {
        for i in 0..self.circuit.num_qubits().saturating_sub(1) {
            self.push(Gate::Cnot(i, i + 1));
        }
        self
    }

    // ========================================================================
    // Finish
    // ========================================================================

    /// Circuit without the rejected gates
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Circuit, or the first rejection
    pub fn try_build(self) -> EgsResult<Circuit> {
        match self.first_error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }

    /// Circuit built so far
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Register width
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::new(3)
            .h(0)
            .cnot(0, 1)
            .cnot(1, 2)
            .measure_all()
            .build();

        assert_eq!(circuit.num_qubits(), 3);
        // H + 2 CX + barrier + MeasureAll
        assert_eq!(circuit.gate_count(), 5);
        assert_eq!(circuit.count_measurements(), 3);
    }

    #[test]
    fn test_builder_chain() {
        let circuit = CircuitBuilder::new(5).h(0).cx_chain().build();
        assert_eq!(circuit.count_2q(), 4);
        assert_eq!(circuit.depth(), 5);
    }

    #[test]
    fn test_builder_layers() {
        let circuit = CircuitBuilder::new(3)
            .h_layer()
            .rz_layer(1, &[0.1, 0.2])
            .rx_layer(&[0.3, 0.4, 0.5])
            .build();

        assert_eq!(circuit.count_parameterized(), 5);
        assert_eq!(circuit.gates()[3], Gate::Rz(1, 0.1));
        assert_eq!(circuit.gates()[5], Gate::Rx(0, 0.3));
    }

    #[test]
    fn test_try_build_reports_first_error() {
        let result = CircuitBuilder::new(2).h(0).h(5).cx(0, 0).try_build();
        assert!(matches!(result, Err(EgsError::GateQubitMismatch { qubit: 5, .. })));

        let lenient = CircuitBuilder::new(2).h(0).h(5).build();
        assert_eq!(lenient.gate_count(), 1);
    }
}
