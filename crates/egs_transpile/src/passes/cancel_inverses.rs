//! Inverse-pair cancellation

use crate::pass::{GateSlots, Pass};
use egs_core::error::EgsResult;
use egs_core::Circuit;

/// Removes adjacent gate pairs whose product is the identity
///
/// `H·H`, `X·X`, `CX·CX` (same control and target), `S·Sdg`, `T·Tdg`,
/// `SX·SXdg`, `CZ·CZ`, `SWAP·SWAP`. Adjacent means nothing else touches any
/// of the pair's qubits in between; barriers and measurements block.
pub struct CancelInverses;

impl CancelInverses {
    fn sweep(slots: &mut GateSlots) -> bool {
        let mut changed = false;
        for i in 0..slots.len() {
            let Some(gate) = slots.get(i) else { continue };
            if !gate.is_unitary() {
                continue;
            }
            let Some(j) = slots.successor(i) else { continue };
            let cancels = match slots.get(j) {
                Some(next) => gate.cancels_with(next),
                None => false,
            };
            if cancels {
                slots.remove(i);
                slots.remove(j);
                changed = true;
            }
        }
        changed
    }
}

impl Pass for CancelInverses {
    fn name(&self) -> &'static str {
        "cancel_inverses"
    }

    fn run(&self, circuit: &mut Circuit) -> EgsResult<bool> {
        let mut slots = GateSlots::from_circuit(circuit);
        let mut changed = false;
        while Self::sweep(&mut slots) {
            changed = true;
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
    use egs_core::Gate;

    fn run(num_qubits: usize, gates: Vec<Gate>) -> (bool, Vec<Gate>) {
        let mut c = Circuit::from_gates(num_qubits, gates).unwrap();
        let changed = CancelInverses.run(&mut c).unwrap();
        (changed, c.into_gates())
    }

    #[test]
    fn test_cancels_self_inverse_pairs() {
        let (changed, gates) = run(2, vec![Gate::H(0), Gate::H(0), Gate::Cnot(0, 1), Gate::Cnot(0, 1)]);
        assert!(changed);
        assert!(gates.is_empty());
    }

    #[test]
    fn test_nested_pairs_collapse() {
        let (_, gates) = run(1, vec![Gate::H(0), Gate::S(0), Gate::Sdg(0), Gate::H(0)]);
        assert!(gates.is_empty());
    }

    #[test]
    fn test_reversed_cx_does_not_cancel() {
        let (changed, gates) = run(2, vec![Gate::Cnot(0, 1), Gate::Cnot(1, 0)]);
        assert!(!changed);
        assert_eq!(gates.len(), 2);
    }

    #[test]
    fn test_intervening_gate_blocks() {
        let (changed, _) = run(2, vec![Gate::Cnot(0, 1), Gate::Rz(1, 0.4), Gate::Cnot(0, 1)]);
        assert!(!changed);
    }

    #[test]
    fn test_unrelated_qubit_does_not_block() {
        let (_, gates) = run(3, vec![Gate::Cnot(0, 1), Gate::H(2), Gate::Cnot(0, 1)]);
        assert_eq!(gates, vec![Gate::H(2)]);
    }

    #[test]
    fn test_barrier_blocks() {
        let (changed, gates) = run(1, vec![Gate::X(0), Gate::Barrier(vec![]), Gate::X(0)]);
        assert!(!changed);
        assert_eq!(gates.len(), 3);
    }
}
