//! Quantum gate definitions for EGS
//!
//! Layer: L1_Circuit → Gate
//!
//! Gate set of the benchmark ansatz plus the gates the transpiler
//! emits when translating to a hardware basis.

use crate::types::{Angle, QubitId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instruction on the qubit register, named as Qiskit names it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Fixed single-qubit
    // ========================================================================
    /// Hadamard
    H(QubitId),
    /// Bit flip
    X(QubitId),
    /// Pauli Y
    Y(QubitId),
    /// Phase flip
    Z(QubitId),
    /// √Z
    S(QubitId),
    /// S†
    Sdg(QubitId),
    /// ⁴√Z
    T(QubitId),
    /// T†
    Tdg(QubitId),
    /// √X, part of the IBM basis
    Sx(QubitId),
    /// √X†
    Sxdg(QubitId),
    /// Explicit no-op
    Id(QubitId),

    // ========================================================================
    // Rotations (radians)
    // ========================================================================
    /// exp(-iθX/2)
    Rx(QubitId, Angle),
    /// exp(-iθY/2)
    Ry(QubitId, Angle),
    /// exp(-iθZ/2)
    Rz(QubitId, Angle),

    // ========================================================================
    // Entanglers
    // ========================================================================
    /// CX with (control, target)
    Cnot(QubitId, QubitId),
    /// Controlled Z, symmetric in its operands
    Cz(QubitId, QubitId),
    /// Exchange two qubits
    Swap(QubitId, QubitId),

    // ========================================================================
    // Non-unitary
    // ========================================================================
    /// Readout into the classical bit with the same index
    Measure(QubitId),

    /// Readout of the whole register
    MeasureAll,

    /// Scheduling fence over the listed qubits; empty spans the register
    Barrier(Vec<QubitId>),
}

impl Gate {
    // ========================================================================
    // Classification
    // ========================================================================

    /// Operands in instruction order
    ///
    /// `MeasureAll` and the global barrier return an empty list; callers
    /// treat that as "every qubit".
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q)
            | Gate::X(q)
            | Gate::Y(q)
            | Gate::Z(q)
            | Gate::S(q)
            | Gate::Sdg(q)
            | Gate::T(q)
            | Gate::Tdg(q)
            | Gate::Sx(q)
            | Gate::Sxdg(q)
            | Gate::Id(q)
            | Gate::Rx(q, _)
            | Gate::Ry(q, _)
            | Gate::Rz(q, _)
            | Gate::Measure(q) => vec![*q],

            Gate::Cnot(a, b) | Gate::Cz(a, b) | Gate::Swap(a, b) => vec![*a, *b],

            Gate::MeasureAll => vec![],
            Gate::Barrier(qs) => qs.clone(),
        }
    }

    /// One-qubit unitary
    pub fn is_single_qubit(&self) -> bool {
        !self.is_two_qubit() && !self.is_measurement() && !self.is_barrier()
    }

    /// CX, CZ or SWAP
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cnot(_, _) | Gate::Cz(_, _) | Gate::Swap(_, _))
    }

    /// Anything but readout and barriers
    pub fn is_unitary(&self) -> bool {
        self.is_single_qubit() || self.is_two_qubit()
    }

    /// Carries a rotation angle
    pub fn is_parameterized(&self) -> bool {
        matches!(self, Gate::Rx(_, _) | Gate::Ry(_, _) | Gate::Rz(_, _))
    }

    /// `measure` on one qubit or the register
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure(_) | Gate::MeasureAll)
    }

    /// `barrier`, full or partial
    pub fn is_barrier(&self) -> bool {
        matches!(self, Gate::Barrier(_))
    }

    /// Diagonal in the computational basis, so it commutes with other diagonals
    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            Gate::Z(_)
                | Gate::S(_)
                | Gate::Sdg(_)
                | Gate::T(_)
                | Gate::Tdg(_)
                | Gate::Id(_)
                | Gate::Rz(_, _)
                | Gate::Cz(_, _)
        )
    }

    /// Spans the whole register (`MeasureAll`, empty barrier)
    pub fn is_global(&self) -> bool {
        match self {
            Gate::MeasureAll => true,
            Gate::Barrier(qs) => qs.is_empty(),
            _ => false,
        }
    }

    /// Occupies `qubit`
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.is_global() || self.qubits().contains(&qubit)
    }

    /// Qiskit instruction name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Y(_) => "y",
            Gate::Z(_) => "z",
            Gate::S(_) => "s",
            Gate::Sdg(_) => "sdg",
            Gate::T(_) => "t",
            Gate::Tdg(_) => "tdg",
            Gate::Sx(_) => "sx",
            Gate::Sxdg(_) => "sxdg",
            Gate::Id(_) => "id",
            Gate::Rx(_, _) => "rx",
            Gate::Ry(_, _) => "ry",
            Gate::Rz(_, _) => "rz",
            Gate::Cnot(_, _) => "cx",
            Gate::Cz(_, _) => "cz",
            Gate::Swap(_, _) => "swap",
            Gate::Measure(_) | Gate::MeasureAll => "measure",
            Gate::Barrier(_) => "barrier",
        }
    }

        /// Angle of `rx`, `ry` or `rz`
    pub fn angle(&self) -> Option<Angle> {
        match self {
            Gate::Rx(_, a) | Gate::Ry(_, a) | Gate::Rz(_, a) => Some(*a),
            _ => None,
        }
    }

    /// Same rotation with a different angle (None for fixed gates)
    pub fn with_angle(&self, angle: Angle) -> Option<Gate> {
        match self {
            Gate::Rx(q, _) => Some(Gate::Rx(*q, angle)),
            Gate::Ry(q, _) => Some(Gate::Ry(*q, angle)),
            Gate::Rz(q, _) => Some(Gate::Rz(*q, angle)),
            _ => None,
        }
    }

    /// Inverse gate (None for measurement and barriers)
    pub fn inverse(&self) -> Option<Gate> {
        let inv = match self {
            Gate::H(q) => Gate::H(*q),
            Gate::X(q) => Gate::X(*q),
            Gate::Y(q) => Gate::Y(*q),
            Gate::Z(q) => Gate::Z(*q),
            Gate::S(q) => Gate::Sdg(*q),
            Gate::Sdg(q) => Gate::S(*q),
            Gate::T(q) => Gate::Tdg(*q),
            Gate::Tdg(q) => Gate::T(*q),
            Gate::Sx(q) => Gate::Sxdg(*q),
            Gate::Sxdg(q) => Gate::Sx(*q),
            Gate::Id(q) => Gate::Id(*q),
            Gate::Rx(q, a) => Gate::Rx(*q, -a),
            Gate::Ry(q, a) => Gate::Ry(*q, -a),
            Gate::Rz(q, a) => Gate::Rz(*q, -a),
            Gate::Cnot(c, t) => Gate::Cnot(*c, *t),
            Gate::Cz(a, b) => Gate::Cz(*a, *b),
            Gate::Swap(a, b) => Gate::Swap(*a, *b),
            Gate::Measure(_) | Gate::MeasureAll | Gate::Barrier(_) => return None,
        };
        Some(inv)
    }

    /// Check whether `other` undoes `self` exactly (same operands)
    ///
    /// CZ and SWAP are symmetric in their operands; CX is not.
    pub fn cancels_with(&self, other: &Gate) -> bool {
        match (self, other) {
            (Gate::Cz(a, b), Gate::Cz(c, d)) | (Gate::Swap(a, b), Gate::Swap(c, d)) => {
                (a == c && b == d) || (a == d && b == c)
            }
            _ => match self.inverse() {
                Some(inv) if !self.is_parameterized() => &inv == other,
                _ => false,
            },
        }
    }

    /// OpenQASM 2.0 statement, `;` included
    pub fn to_qasm(&self) -> String {
        let operands = match self {
            Gate::MeasureAll => return "measure q -> c;".to_string(),
            Gate::Measure(q) => return format!("measure q[{q}] -> c[{q}];"),
            Gate::Barrier(qs) if qs.is_empty() => "q".to_string(),
            _ => self
                .qubits()
                .iter()
                .map(|q| format!("q[{q}]"))
                .collect::<Vec<_>>()
                .join(","),
        };

        match self.angle() {
            Some(theta) => format!("{}({}) {};", self.name(), theta, operands),
            None => format!("{} {};", self.name(), operands),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_qubits() {
        assert_eq!(Gate::H(0).qubits(), vec![0]);
        assert_eq!(Gate::Cnot(0, 1).qubits(), vec![0, 1]);
        assert!(Gate::MeasureAll.qubits().is_empty());
    }

    #[test]
    fn test_gate_classification() {
        assert!(Gate::H(0).is_single_qubit());
        assert!(Gate::Cnot(0, 1).is_two_qubit());
        assert!(Gate::Rx(0, 1.0).is_parameterized());
        assert!(!Gate::H(0).is_parameterized());
        assert!(Gate::Rz(0, 0.3).is_diagonal());
        assert!(!Gate::Rx(0, 0.3).is_diagonal());
        assert!(!Gate::Barrier(vec![0]).is_unitary());
    }

    #[test]
    fn test_global_gates() {
        assert!(Gate::MeasureAll.is_global());
        assert!(Gate::Barrier(vec![]).is_global());
        assert!(!Gate::Barrier(vec![0, 1]).is_global());
        assert!(Gate::MeasureAll.acts_on(7));
        assert!(!Gate::H(1).acts_on(0));
    }

    #[test]
    fn test_inverse_pairs() {
        assert_eq!(Gate::S(2).inverse(), Some(Gate::Sdg(2)));
        assert_eq!(Gate::Rz(0, 0.5).inverse(), Some(Gate::Rz(0, -0.5)));
        assert_eq!(Gate::MeasureAll.inverse(), None);
    }

    #[test]
    fn test_cancels_with() {
        assert!(Gate::H(0).cancels_with(&Gate::H(0)));
        assert!(Gate::Cnot(0, 1).cancels_with(&Gate::Cnot(0, 1)));
        assert!(!Gate::Cnot(0, 1).cancels_with(&Gate::Cnot(1, 0)));
        assert!(Gate::Cz(0, 1).cancels_with(&Gate::Cz(1, 0)));
        assert!(Gate::T(0).cancels_with(&Gate::Tdg(0)));
        // rotations are merged, not cancelled
        assert!(!Gate::Rz(0, 0.5).cancels_with(&Gate::Rz(0, -0.5)));
    }

    #[test]
    fn test_gate_to_qasm() {
        assert_eq!(Gate::H(0).to_qasm(), "h q[0];");
        assert_eq!(Gate::Cnot(0, 1).to_qasm(), "cx q[0],q[1];");
        assert_eq!(Gate::Rx(0, 0.5).to_qasm(), "rx(0.5) q[0];");
        assert_eq!(Gate::Barrier(vec![0, 2]).to_qasm(), "barrier q[0],q[2];");
        assert_eq!(Gate::Measure(3).to_qasm(), "measure q[3] -> c[3];");
    }

    #[test]
    fn test_with_angle() {
        assert_eq!(Gate::Rz(1, 0.1).with_angle(0.7), Some(Gate::Rz(1, 0.7)));
        assert_eq!(Gate::H(1).with_angle(0.7), None);
    }
}
