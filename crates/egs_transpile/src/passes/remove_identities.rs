//! Identity removal

use crate::pass::{is_zero_angle, Pass};
use egs_core::error::EgsResult;
use egs_core::{Circuit, Gate};

/// Drops `id` gates and rotations by a multiple of 2π
pub struct RemoveIdentities;

impl RemoveIdentities {
    fn is_identity(gate: &Gate) -> bool {
        match gate {
            Gate::Id(_) => true,
            Gate::Rx(_, a) | Gate::Ry(_, a) | Gate::Rz(_, a) => is_zero_angle(*a),
            _ => false,
        }
    }
}

impl Pass for RemoveIdentities {
    fn name(&self) -> &'static str {
        "remove_identities"
    }

    fn run(&self, circuit: &mut Circuit) -> EgsResult<bool> {
        let before = circuit.gate_count();
        let gates: Vec<Gate> = circuit
            .gates()
            .iter()
            .filter(|g| !Self::is_identity(g))
            .cloned()
            .collect();

        if gates.len() == before {
            return Ok(false);
        }
        *circuit = circuit.with_gates(gates);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn test_removes_identities() {
        let mut c = Circuit::from_gates(
            2,
            vec![
                Gate::Id(0),
                Gate::Rz(1, 0.0),
                Gate::Rx(0, TAU),
                Gate::Ry(1, 0.3),
                Gate::H(0),
            ],
        )
        .unwrap();

        assert!(RemoveIdentities.run(&mut c).unwrap());
        assert_eq!(c.gates(), &[Gate::Ry(1, 0.3), Gate::H(0)]);
        assert!(!RemoveIdentities.run(&mut c).unwrap());
    }
}
