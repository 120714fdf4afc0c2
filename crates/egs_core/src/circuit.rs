//! Quantum circuit structure for EGS
//!
//! Layer: L1_Circuit → Circuit
//!
//! Flat instruction list with the analysis queries the benchmark reports
//! (depth, per-kind gate counts) and OpenQASM 2.0 import/export.

use crate::error::{EgsError, EgsResult};
use crate::gate::Gate;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Instructions on a fixed-width register
///
/// Every operand is checked against the width on insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Empty circuit on `num_qubits` qubits
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Empty named circuit
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// Validated circuit from an instruction list
    pub fn from_gates(num_qubits: usize, gates: Vec<Gate>) -> EgsResult<Self> {
        let circuit = Self {
            num_qubits,
            gates,
            name: None,
        };
        for gate in &circuit.gates {
            circuit.check_gate(gate)?;
        }
        Ok(circuit)
    }

    /// Same register and name, different instruction list
    ///
    /// Used by rewriting passes; the caller guarantees the gates came from
    /// (or were derived from) a circuit on the same register.
    pub fn with_gates(&self, gates: Vec<Gate>) -> Self {
        Self {
            num_qubits: self.num_qubits,
            gates,
            name: self.name.clone(),
        }
    }

    // ========================================================================
    // Editing and access
    // ========================================================================

    /// Append one instruction after checking its operands
    pub fn add_gate(&mut self, gate: Gate) -> EgsResult<()> {
        self.check_gate(&gate)?;
        self.gates.push(gate);
        Ok(())
    }

    /// Append instructions in order, stopping at the first invalid one
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> EgsResult<()> {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    /// Register width
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Instruction list
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Instruction list, by value
    pub fn into_gates(self) -> Vec<Gate> {
        self.gates
    }

    /// Label used in reports
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Relabel
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// No instructions at all
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    /// Layers on the longest qubit path, Qiskit style
    ///
    /// Barriers line up the qubits they span without adding a layer.
    /// `MeasureAll` is one readout layer on every qubit.
    pub fn depth(&self) -> usize {
        let mut level = vec![0usize; self.num_qubits];

        for gate in &self.gates {
            if matches!(gate, Gate::MeasureAll) {
                level.iter_mut().for_each(|l| *l += 1);
                continue;
            }

            let span: Vec<QubitId> = if gate.is_global() {
                (0..self.num_qubits).collect()
            } else {
                gate.qubits()
            };
            let reached = span.iter().filter_map(|&q| level.get(q)).max().copied();
            let next = reached.unwrap_or(0) + usize::from(!gate.is_barrier());
            for q in span {
                if let Some(l) = level.get_mut(q) {
                    *l = next;
                }
            }
        }

        level.into_iter().max().unwrap_or(0)
    }

    /// Instructions, barriers included
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// One-qubit unitaries
    pub fn count_1q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_single_qubit()).count()
    }

    /// Entanglers
    pub fn count_2q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Readouts, with `MeasureAll` counted once per qubit
    pub fn count_measurements(&self) -> usize {
        self.gates
            .iter()
            .map(|g| match g {
                Gate::MeasureAll => self.num_qubits,
                Gate::Measure(_) => 1,
                _ => 0,
            })
            .sum()
    }

    /// Rotations
    pub fn count_parameterized(&self) -> usize {
        self.gates.iter().filter(|g| g.is_parameterized()).count()
    }

    /// Barrier instructions
    pub fn count_barriers(&self) -> usize {
        self.gates.iter().filter(|g| g.is_barrier()).count()
    }

    /// Instruction histogram by name
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut ops = BTreeMap::new();
        for gate in &self.gates {
            *ops.entry(gate.name().to_string()).or_insert(0) += 1;
        }
        ops
    }

    /// Whether anything is read out
    pub fn has_measurements(&self) -> bool {
        self.gates.iter().any(|g| g.is_measurement())
    }

    /// Qubits measured by the circuit, ascending
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        if self.gates.iter().any(|g| matches!(g, Gate::MeasureAll)) {
            return (0..self.num_qubits).collect();
        }
        let mut measured: Vec<QubitId> = self
            .gates
            .iter()
            .filter_map(|g| match g {
                Gate::Measure(q) => Some(*q),
                _ => None,
            })
            .collect();
        measured.sort_unstable();
        measured.dedup();
        measured
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_gate(&self, gate: &Gate) -> EgsResult<()> {
        let qubits = gate.qubits();
        for &qubit in &qubits {
            if qubit >= self.num_qubits {
                return Err(EgsError::GateQubitMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        if gate.is_two_qubit() && qubits[0] == qubits[1] {
            return Err(EgsError::DuplicateQubit {
                gate: gate.name().to_string(),
                qubit: qubits[0],
            });
        }
        Ok(())
    }

    // ========================================================================
    // OpenQASM 2.0
    // ========================================================================

    /// Program with one `q` and one `c` register of the circuit's width
    pub fn to_qasm(&self) -> String {
        let mut program = format!(
            "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[{n}];\ncreg c[{n}];\n",
            n = self.num_qubits
        );
        for gate in &self.gates {
            program.push_str(&gate.to_qasm());
            program.push('\n');
        }
        program
    }

    /// Parse the subset `to_qasm` writes: a single `qreg` and one
    /// statement per line
    pub fn from_qasm(qasm: &str) -> EgsResult<Self> {
        let mut width = None;
        let mut gates = Vec::new();

        for statement in qasm.lines().map(str::trim) {
            let keyword = statement
                .split(|c: char| c.is_whitespace() || c == '(')
                .next()
                .unwrap_or_default();

            match keyword {
                "" | "OPENQASM" | "include" | "creg" => {}
                _ if keyword.starts_with("//") => {}
                "qreg" => {
                    let size = bracket_index(statement).ok_or_else(|| {
                        EgsError::InvalidQasm(format!("bad register declaration '{}'", statement))
                    })?;
                    width = Some(size);
                }
                _ => gates.push(parse_gate_line(statement)?),
            }
        }

        let width = width
            .filter(|&n| n > 0)
            .ok_or_else(|| EgsError::InvalidQasm("no qreg declaration".into()))?;
        Circuit::from_gates(width, gates)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit '{}' ({} qubits, {} instructions, depth {})",
            self.name.as_deref().unwrap_or("unnamed"),
            self.num_qubits,
            self.gates.len(),
            self.depth()
        )?;
        for gate in &self.gates {
            writeln!(f, "  {}", gate)?;
        }
        Ok(())
    }
}

// ============================================================================
// QASM parsing
// ============================================================================

fn bracket_index(decl: &str) -> Option<usize> {
    let (_, rest) = decl.split_once('[')?;
    let (size, _) = rest.split_once(']')?;
    size.trim().parse().ok()
}

fn parse_gate_line(line: &str) -> EgsResult<Gate> {
    let line = line.trim().trim_end_matches(';').trim();
    let bad = || EgsError::InvalidQasm(format!("Unsupported statement: {}", line));

    if line == "measure q -> c" {
        return Ok(Gate::MeasureAll);
    }
    if line == "barrier q" {
        return Ok(Gate::Barrier(vec![]));
    }

    let (name, params, operands) = if let Some(open) = line.find('(') {
        let close = line
            .find(')')
            .ok_or_else(|| EgsError::InvalidQasm(format!("Missing closing paren: {}", line)))?;
        let params = line[open + 1..close]
            .split(',')
            .map(|s| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| EgsError::InvalidQasm(format!("Bad parameter '{}'", s.trim())))
            })
            .collect::<EgsResult<Vec<f64>>>()?;
        (&line[..open], params, line[close + 1..].trim())
    } else {
        let mut parts = line.splitn(2, ' ');
        let name = parts.next().ok_or_else(bad)?;
        let rest = parts.next().ok_or_else(bad)?;
        (name, Vec::new(), rest.trim())
    };

    // "measure q[i] -> c[i]" keeps only the quantum operand
    let operands = operands.split("->").next().unwrap_or("");
    let qubits = parse_qubits(operands)?;
    let q = |i: usize| qubits.get(i).copied().ok_or_else(bad);
    let p = |i: usize| params.get(i).copied().ok_or_else(bad);

    let gate = match name.trim().to_lowercase().as_str() {
        "h" => Gate::H(q(0)?),
        "x" => Gate::X(q(0)?),
        "y" => Gate::Y(q(0)?),
        "z" => Gate::Z(q(0)?),
        "s" => Gate::S(q(0)?),
        "sdg" => Gate::Sdg(q(0)?),
        "t" => Gate::T(q(0)?),
        "tdg" => Gate::Tdg(q(0)?),
        "sx" => Gate::Sx(q(0)?),
        "sxdg" => Gate::Sxdg(q(0)?),
        "id" => Gate::Id(q(0)?),
        "rx" => Gate::Rx(q(0)?, p(0)?),
        "ry" => Gate::Ry(q(0)?, p(0)?),
        "rz" => Gate::Rz(q(0)?, p(0)?),
        "cx" | "cnot" => Gate::Cnot(q(0)?, q(1)?),
        "cz" => Gate::Cz(q(0)?, q(1)?),
        "swap" => Gate::Swap(q(0)?, q(1)?),
        "measure" => Gate::Measure(q(0)?),
        "barrier" => Gate::Barrier(qubits.clone()),
        _ => return Err(bad()),
    };

    Ok(gate)
}

fn parse_qubits(operands: &str) -> EgsResult<Vec<QubitId>> {
    operands
        .split(',')
        .map(str::trim)
        .filter(|op| !op.is_empty())
        .map(|op| {
            bracket_index(op)
                .ok_or_else(|| EgsError::InvalidQasm(format!("bad operand '{}'", op)))
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_gate_validates_qubits() {
        let mut c = Circuit::new(2);
        assert!(c.add_gate(Gate::H(1)).is_ok());
        assert!(c.add_gate(Gate::H(2)).is_err());
        assert!(matches!(
            c.add_gate(Gate::Cnot(1, 1)),
            Err(EgsError::DuplicateQubit { .. })
        ));
    }

    #[test]
    fn test_depth_parallel_and_serial() {
        let c = Circuit::from_gates(3, vec![Gate::H(0), Gate::H(1), Gate::H(2)]).unwrap();
        assert_eq!(c.depth(), 1);

        let c = Circuit::from_gates(3, vec![Gate::H(0), Gate::Cnot(0, 1), Gate::Cnot(1, 2)])
            .unwrap();
        assert_eq!(c.depth(), 3);
    }

    #[test]
    fn test_depth_barrier_synchronises_without_depth() {
        let c = Circuit::from_gates(
            2,
            vec![Gate::H(0), Gate::H(0), Gate::Barrier(vec![]), Gate::H(1)],
        )
        .unwrap();
        // q1 starts after the barrier, at level 2
        assert_eq!(c.depth(), 3);

        let only_barrier = Circuit::from_gates(2, vec![Gate::H(0), Gate::Barrier(vec![])])
            .unwrap();
        assert_eq!(only_barrier.depth(), 1);
    }

    #[test]
    fn test_depth_measure_all() {
        let c = Circuit::from_gates(2, vec![Gate::H(0), Gate::MeasureAll]).unwrap();
        assert_eq!(c.depth(), 2);
        assert_eq!(Circuit::new(4).depth(), 0);
    }

    #[test]
    fn test_counts() {
        let c = Circuit::from_gates(
            3,
            vec![
                Gate::H(0),
                Gate::Rz(1, 0.1),
                Gate::Cnot(0, 1),
                Gate::Barrier(vec![]),
                Gate::MeasureAll,
            ],
        )
        .unwrap();
        assert_eq!(c.count_1q(), 2);
        assert_eq!(c.count_2q(), 1);
        assert_eq!(c.count_measurements(), 3);
        assert_eq!(c.count_parameterized(), 1);
        assert_eq!(c.count_barriers(), 1);
        assert_eq!(c.count_ops().get("cx"), Some(&1));
        assert_eq!(c.measured_qubits(), vec![0, 1, 2]);
    }

    #[test]
    fn test_qasm_roundtrip() {
        let original = Circuit::from_gates(
            3,
            vec![
                Gate::H(0),
                Gate::Cnot(0, 1),
                Gate::Rz(2, 0.25),
                Gate::Barrier(vec![]),
                Gate::MeasureAll,
            ],
        )
        .unwrap();

        let parsed = Circuit::from_qasm(&original.to_qasm()).unwrap();
        assert_eq!(parsed.gates(), original.gates());
        assert_eq!(parsed.num_qubits(), 3);
    }

    #[test]
    fn test_qasm_rejects_unknown_gate() {
        let qasm = "OPENQASM 2.0;\nqreg q[2];\nfoo q[0];";
        assert!(matches!(
            Circuit::from_qasm(qasm),
            Err(EgsError::InvalidQasm(_))
        ));
    }

    #[test]
    fn test_qasm_missing_qreg() {
        assert!(Circuit::from_qasm("OPENQASM 2.0;").is_err());
    }
}
