//! Rotation merging

use crate::pass::{is_zero_angle, normalize_angle, GateSlots, Pass};
use egs_core::error::EgsResult;
use egs_core::{Circuit, Gate};
use std::mem::discriminant;

/// Fuses consecutive rotations about the same axis on the same qubit
///
/// `rz(a)·rz(b) → rz(a+b)`, likewise for `rx` and `ry`. The merged angle is
/// wrapped into `(-π, π]`; a merge that lands on zero removes both gates.
pub struct MergeRotations;

impl MergeRotations {
    fn merged(first: &Gate, second: &Gate) -> Option<Gate> {
        if discriminant(first) != discriminant(second) || first.qubits() != second.qubits() {
            return None;
        }
        let total = first.angle()? + second.angle()?;
        second.with_angle(normalize_angle(total))
    }

    fn sweep(slots: &mut GateSlots) -> bool {
        let mut changed = false;
        for i in 0..slots.len() {
            let Some(gate) = slots.get(i) else { continue };
            if !gate.is_parameterized() {
                continue;
            }
            let Some(j) = slots.successor(i) else { continue };
            let merged = match slots.get(j) {
                Some(next) => Self::merged(gate, next),
                None => None,
            };
            let Some(merged) = merged else { continue };

            slots.remove(i);
            match merged.angle() {
                Some(a) if is_zero_angle(a) => {
                    slots.remove(j);
                }
                _ => slots.replace(j, merged),
            }
            changed = true;
        }
        changed
    }
}

impl Pass for MergeRotations {
    fn name(&self) -> &'static str {
        "merge_rotations"
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
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn run(num_qubits: usize, gates: Vec<Gate>) -> Vec<Gate> {
        let mut c = Circuit::from_gates(num_qubits, gates).unwrap();
        MergeRotations.run(&mut c).unwrap();
        c.into_gates()
    }

    #[test]
    fn test_merges_runs() {
        let gates = run(1, vec![Gate::Rz(0, 0.1), Gate::Rz(0, 0.2), Gate::Rz(0, 0.3)]);
        assert_eq!(gates.len(), 1);
        assert_relative_eq!(gates[0].angle().unwrap(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_wraps_angle() {
        let gates = run(1, vec![Gate::Rx(0, 3.0), Gate::Rx(0, 3.0)]);
        assert_relative_eq!(gates[0].angle().unwrap(), 6.0 - 2.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_opposite_angles_vanish() {
        let gates = run(1, vec![Gate::H(0), Gate::Ry(0, 0.7), Gate::Ry(0, -0.7), Gate::H(0)]);
        assert_eq!(gates, vec![Gate::H(0), Gate::H(0)]);
    }

    #[test]
    fn test_different_axes_untouched() {
        let gates = run(1, vec![Gate::Rz(0, 0.1), Gate::Rx(0, 0.2)]);
        assert_eq!(gates.len(), 2);
    }

    #[test]
    fn test_other_qubit_between_is_transparent() {
        let gates = run(2, vec![Gate::Rz(0, 0.1), Gate::H(1), Gate::Rz(0, 0.1)]);
        assert_eq!(gates.len(), 2);
        assert_eq!(gates[0], Gate::H(1));
    }
}
