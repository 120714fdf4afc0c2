//! Translation to the IBM native basis `{rz, sx, x, cx}`

use crate::pass::Pass;
use egs_core::error::EgsResult;
use egs_core::{Circuit, Gate, QubitId};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Rewrites every unitary into `rz`, `sx`, `x` and `cx`
///
/// Measurements and barriers pass through. Decompositions are exact up to
/// a global phase.
pub struct BasisTranslation;

/// Gate names accepted by IBM Eagle-class devices
pub const IBM_BASIS: [&str; 4] = ["rz", "sx", "x", "cx"];

impl BasisTranslation {
    fn hadamard(q: QubitId) -> [Gate; 3] {
        [Gate::Rz(q, FRAC_PI_2), Gate::Sx(q), Gate::Rz(q, FRAC_PI_2)]
    }

    /// Decomposition of one gate, in time order
    pub fn decompose(gate: &Gate) -> Vec<Gate> {
        match gate {
            Gate::H(q) => Self::hadamard(*q).to_vec(),
            Gate::Y(q) => vec![Gate::Rz(*q, PI), Gate::X(*q)],
            Gate::Z(q) => vec![Gate::Rz(*q, PI)],
            Gate::S(q) => vec![Gate::Rz(*q, FRAC_PI_2)],
            Gate::Sdg(q) => vec![Gate::Rz(*q, -FRAC_PI_2)],
            Gate::T(q) => vec![Gate::Rz(*q, FRAC_PI_4)],
            Gate::Tdg(q) => vec![Gate::Rz(*q, -FRAC_PI_4)],
            Gate::Sxdg(q) => vec![Gate::Rz(*q, PI), Gate::Sx(*q), Gate::Rz(*q, PI)],
            Gate::Id(_) => vec![],
            Gate::Rx(q, theta) => vec![
                Gate::Rz(*q, FRAC_PI_2),
                Gate::Sx(*q),
                Gate::Rz(*q, theta + PI),
                Gate::Sx(*q),
                Gate::Rz(*q, FRAC_PI_2),
            ],
            Gate::Ry(q, theta) => vec![
                Gate::Sx(*q),
                Gate::Rz(*q, theta + PI),
                Gate::Sx(*q),
                Gate::Rz(*q, PI),
            ],
            Gate::Cz(a, b) => {
                let mut out = Self::hadamard(*b).to_vec();
                out.push(Gate::Cnot(*a, *b));
                out.extend(Self::hadamard(*b));
                out
            }
            Gate::Swap(a, b) => vec![Gate::Cnot(*a, *b), Gate::Cnot(*b, *a), Gate::Cnot(*a, *b)],
            other => vec![other.clone()],
        }
    }

    /// Check whether a gate is already expressible on the device
    pub fn is_native(gate: &Gate) -> bool {
        !gate.is_unitary() || IBM_BASIS.contains(&gate.name())
    }
}

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "basis_translation"
    }

    fn run(&self, circuit: &mut Circuit) -> EgsResult<bool> {
        if circuit.gates().iter().all(Self::is_native) {
            return Ok(false);
        }

        let gates: Vec<Gate> = circuit.gates().iter().flat_map(Self::decompose).collect();
        *circuit = circuit.with_gates(gates);
        Ok(true)
    }
}
