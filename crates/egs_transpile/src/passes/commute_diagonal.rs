//! Diagonal-gate commutation through entanglers

use crate::pass::{GateSlots, Pass};
use egs_core::error::EgsResult;
use egs_core::{Circuit, Gate, QubitId};

/// Moves single-qubit diagonal gates past a CX control or a CZ
///
/// A diagonal gate on the control of a CX (or on either wire of a CZ)
/// commutes with it. The gate is only moved when that lands it next to a
/// partner it can fuse with: another `rz`, or its exact inverse. The actual
/// fusion is left to [`MergeRotations`](super::MergeRotations) and
/// [`CancelInverses`](super::CancelInverses).
pub struct CommuteDiagonal;

impl CommuteDiagonal {
    fn is_movable(gate: &Gate) -> bool {
        gate.is_single_qubit() && gate.is_diagonal() && !matches!(gate, Gate::Id(_))
    }

    fn commutes_through(gate: &Gate, qubit: QubitId) -> bool {
        match gate {
            Gate::Cnot(control, _) => *control == qubit,
            Gate::Cz(a, b) => *a == qubit || *b == qubit,
            _ => false,
        }
    }

    fn fuses(moving: &Gate, partner: &Gate) -> bool {
        if !Self::is_movable(partner) {
            return false;
        }
        matches!((moving, partner), (Gate::Rz(_, _), Gate::Rz(_, _))) || moving.cancels_with(partner)
    }

    /// Slot pair (from, to) for the first profitable move, if any
    fn find_move(slots: &GateSlots) -> Option<(usize, usize)> {
        for i in 0..slots.len() {
            let Some(gate) = slots.get(i) else { continue };
            if !Self::is_movable(gate) {
                continue;
            }
            let q = gate.qubits()[0];
            let Some(j) = slots.next_on_qubit(i, q) else { continue };
            if !slots.get(j).is_some_and(|g| Self::commutes_through(g, q)) {
                continue;
            }
            let Some(k) = slots.next_on_qubit(j, q) else { continue };
            if slots.get(k).is_some_and(|partner| Self::fuses(gate, partner)) {
                return Some((i, k));
            }
        }
        None
    }
}

impl Pass for CommuteDiagonal {
    fn name(&self) -> &'static str {
        "commute_diagonal"
    }

    fn run(&self, circuit: &mut Circuit) -> EgsResult<bool> {
        let mut slots = GateSlots::from_circuit(circuit);
        let mut changed = false;

        while let Some((from, to)) = Self::find_move(&slots) {
            if let Some(gate) = slots.remove(from) {
                slots.insert(to, gate);
                changed = true;
            }
        }

        if changed {
            slots.write_back(circuit);
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(num_qubits: usize, gates: Vec<Gate>) -> (bool, Vec<Gate>) {
        let mut c = Circuit::from_gates(num_qubits, gates).unwrap();
        let changed = CommuteDiagonal.run(&mut c).unwrap();
        (changed, c.into_gates())
    }

    #[test]
    fn test_rz_moves_through_control() {
        let (changed, gates) = run(
            2,
            vec![Gate::Rz(0, 0.3), Gate::Cnot(0, 1), Gate::Rz(0, 0.4)],
        );
        assert!(changed);
        assert_eq!(gates, vec![Gate::Cnot(0, 1), Gate::Rz(0, 0.3), Gate::Rz(0, 0.4)]);
    }

    #[test]
    fn test_target_side_does_not_commute() {
        let (changed, _) = run(
            2,
            vec![Gate::Rz(1, 0.3), Gate::Cnot(0, 1), Gate::Rz(1, 0.4)],
        );
        assert!(!changed);
    }

    #[test]
    fn test_inverse_pair_through_cz() {
        let (changed, gates) = run(2, vec![Gate::S(1), Gate::Cz(0, 1), Gate::Sdg(1)]);
        assert!(changed);
        assert_eq!(gates, vec![Gate::Cz(0, 1), Gate::S(1), Gate::Sdg(1)]);
    }

    #[test]
    fn test_no_partner_no_move() {
        let (changed, gates) = run(2, vec![Gate::Rz(0, 0.3), Gate::Cnot(0, 1), Gate::H(0)]);
        assert!(!changed);
        assert_eq!(gates[0], Gate::Rz(0, 0.3));
    }

    #[test]
    fn test_barrier_blocks() {
        let (changed, _) = run(
            2,
            vec![Gate::Rz(0, 0.3), Gate::Barrier(vec![]), Gate::Cnot(0, 1), Gate::Rz(0, 0.4)],
        );
        assert!(!changed);
    }
}
