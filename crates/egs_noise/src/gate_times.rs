//! Gate timing information for EGS
//!
//! Layer: L2_Noise → GateTimes
//!
//! Instruction durations used by the scheduler and by idle-time
//! decoherence estimates.

use crate::noise_model::ThermalNoiseModel;
use egs_core::constants::physics;
use egs_core::{Circuit, Gate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Instruction durations in nanoseconds
///
/// Barriers always take zero time. A per-name override (e.g. a virtual
/// `rz` of 0 ns) wins over the class durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateTimes {
    /// Any single-qubit gate
    pub single_qubit_ns: f64,

    /// Any two-qubit gate
    pub two_qubit_ns: f64,

    /// Readout
    pub measurement_ns: f64,

    #[serde(default)]
    overrides: HashMap<String, f64>,
}

impl GateTimes {
    /// Class durations without overrides
    pub fn new(single_qubit_ns: f64, two_qubit_ns: f64, measurement_ns: f64) -> Self {
        Self {
            single_qubit_ns,
            two_qubit_ns,
            measurement_ns,
            overrides: HashMap::new(),
        }
    }

    /// Durations the noise model assumes for its relaxation channels
    pub fn from_noise_model(model: &ThermalNoiseModel) -> Self {
        Self::new(model.time_1q_ns(), model.time_2q_ns(), physics::MEASUREMENT_NS)
    }

    /// Override the duration of one instruction name (case-insensitive)
    pub fn with_gate_time(mut self, name: &str, time_ns: f64) -> Self {
        self.overrides.insert(name.to_ascii_lowercase(), time_ns);
        self
    }

    /// Duration of `gate`
    pub fn gate_duration(&self, gate: &Gate) -> f64 {
        if gate.is_barrier() {
            return 0.0;
        }
        if let Some(&ns) = self.overrides.get(gate.name()) {
            return ns;
        }
        match gate {
            g if g.is_measurement() => self.measurement_ns,
            g if g.is_two_qubit() => self.two_qubit_ns,
            _ => self.single_qubit_ns,
        }
    }

    /// ASAP makespan of `circuit` and the time each qubit becomes free
    ///
    /// Global instructions (`MeasureAll`, full barriers) start once every
    /// qubit is free.
    pub fn circuit_duration_asap(&self, circuit: &Circuit) -> (f64, Vec<f64>) {
        let mut free_at = vec![0.0_f64; circuit.num_qubits()];

        for gate in circuit.gates() {
            let span: Vec<usize> = if gate.is_global() {
                (0..free_at.len()).collect()
            } else {
                gate.qubits().into_iter().filter(|&q| q < free_at.len()).collect()
            };

            let start = span.iter().map(|&q| free_at[q]).fold(0.0, f64::max);
            let end = start + self.gate_duration(gate);
            for q in span {
                free_at[q] = end;
            }
        }

        let makespan = free_at.iter().copied().fold(0.0, f64::max);
        (makespan, free_at)
    }
}

impl Default for GateTimes {
    fn default() -> Self {
        Self::from_noise_model(&ThermalNoiseModel::eagle_like())
    }
}

impl fmt::Display for GateTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "1q {} ns, 2q {} ns, measure {} ns",
            self.single_qubit_ns, self.two_qubit_ns, self.measurement_ns
        )?;
        if !self.overrides.is_empty() {
            let mut names: Vec<_> = self.overrides.iter().collect();
            names.sort_by(|a, b| a.0.cmp(b.0));
            for (name, ns) in names {
                write!(f, ", {} {} ns", name, ns)?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
