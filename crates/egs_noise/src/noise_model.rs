//! Thermal noise model for EGS
//!
//! Layer: L2_Noise → ThermalNoiseModel
//!
//! Superconducting-processor noise: T1/T2 thermal relaxation over each gate
//! duration, composed with a depolarizing channel. Errors attach to gates by
//! instruction name, so gates outside the noisy sets run ideally.

use egs_core::constants::physics;
use egs_core::error::{EgsError, EgsResult};
use egs_core::{Circuit, Gate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Thermal Relaxation
// ============================================================================

/// Damping parameters of a thermal-relaxation channel over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalRelaxation {
    /// Amplitude damping probability: 1 - exp(-t/T1)
    pub gamma: f64,

    /// Pure dephasing probability: 1 - exp(-2t/T2 + t/T1)
    pub lambda: f64,
}

impl ThermalRelaxation {
    /// Channel for `duration_ns` on a qubit with the given T1/T2 (µs)
    ///
    /// Infinite T1 or T2 contributes no damping.
    pub fn new(t1_us: f64, t2_us: f64, duration_ns: f64) -> Self {
        let t = physics::ns_to_us(duration_ns);
        let t1_rate = if t1_us.is_finite() { t / t1_us } else { 0.0 };
        let t2_rate = if t2_us.is_finite() { t / t2_us } else { 0.0 };

        let gamma = 1.0 - (-t1_rate).exp();
        let lambda = (1.0 - (-2.0 * t2_rate + t1_rate).exp()).clamp(0.0, 1.0);

        Self { gamma, lambda }
    }

    /// No damping
    pub const NONE: Self = Self {
        gamma: 0.0,
        lambda: 0.0,
    };

    /// Factor multiplying the off-diagonal density-matrix elements
    ///
    /// Equals exp(-t/T2) for a physical T1/T2 pair.
    pub fn coherence_factor(&self) -> f64 {
        ((1.0 - self.gamma) * (1.0 - self.lambda)).sqrt()
    }

    /// Check whether the channel is the identity
    pub fn is_identity(&self) -> bool {
        self.gamma == 0.0 && self.lambda == 0.0
    }

    /// Entanglement (process) fidelity with the identity channel
    pub fn process_fidelity(&self) -> f64 {
        (2.0 - self.gamma + 2.0 * self.coherence_factor()) / 4.0
    }
}

// ============================================================================
// Gate Error
// ============================================================================

/// Error attached to one instruction: relaxation on each operand, then
/// depolarizing on the whole operand set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateError {
    /// Number of qubits the error acts on (1 or 2)
    pub num_qubits: usize,

    /// Per-qubit thermal relaxation over the gate duration
    pub relaxation: ThermalRelaxation,

    /// Probability of replacing the operation with a uniformly random
    /// n-qubit Pauli (identity included)
    pub depol: f64,
}

impl GateError {
    /// Hilbert-space dimension of the operand set
    fn dim(&self) -> f64 {
        (1usize << self.num_qubits) as f64
    }

    /// Process fidelity of relaxation followed by depolarizing
    pub fn process_fidelity(&self) -> f64 {
        let d = self.dim();
        let thermal = self.relaxation.process_fidelity().powi(self.num_qubits as i32);
        (1.0 - self.depol) * thermal + self.depol / (d * d)
    }

    /// Average gate fidelity: (d·F_pro + 1) / (d + 1)
    pub fn average_fidelity(&self) -> f64 {
        let d = self.dim();
        (d * self.process_fidelity() + 1.0) / (d + 1.0)
    }
}

// ============================================================================
// Thermal Noise Model
// ============================================================================

/// Noise model for a superconducting processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalNoiseModel {
    /// T1 relaxation time in microseconds
    t1_us: f64,

    /// T2 dephasing time in microseconds
    t2_us: f64,

    /// Single-qubit gate duration in nanoseconds
    time_1q_ns: f64,

    /// Two-qubit gate duration in nanoseconds
    time_2q_ns: f64,

    /// Single-qubit depolarizing probability
    depol_1q: f64,

    /// Two-qubit depolarizing probability
    depol_2q: f64,

    /// Instruction names carrying the single-qubit error
    noisy_1q: Vec<String>,

    /// Instruction names carrying the two-qubit error
    noisy_2q: Vec<String>,
}

impl ThermalNoiseModel {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a validated model with the default noisy instruction sets
    pub fn new(
        t1_us: f64,
        t2_us: f64,
        time_1q_ns: f64,
        time_2q_ns: f64,
        depol_1q: f64,
        depol_2q: f64,
    ) -> EgsResult<Self> {
        let model = Self {
            t1_us,
            t2_us,
            time_1q_ns,
            time_2q_ns,
            depol_1q,
            depol_2q,
            ..Self::eagle_like()
        };
        model.validate()?;
        Ok(model)
    }

    /// IBM Eagle-like processor (T1 120µs, T2 80µs, 60/300ns gates)
    pub fn eagle_like() -> Self {
        Self {
            t1_us: physics::DEFAULT_T1_US,
            t2_us: physics::DEFAULT_T2_US,
            time_1q_ns: physics::GATE_TIME_1Q_NS,
            time_2q_ns: physics::GATE_TIME_2Q_NS,
            depol_1q: physics::DEPOL_1Q,
            depol_2q: physics::DEPOL_2Q,
            noisy_1q: to_names(physics::NOISY_1Q_GATES),
            noisy_2q: to_names(physics::NOISY_2Q_GATES),
        }
    }

    /// Noiseless model
    pub fn ideal() -> Self {
        Self {
            t1_us: f64::INFINITY,
            t2_us: f64::INFINITY,
            depol_1q: 0.0,
            depol_2q: 0.0,
            ..Self::eagle_like()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set T1 time
    pub fn with_t1(mut self, t1_us: f64) -> Self {
        self.t1_us = t1_us;
        self
    }

    /// Set T2 time
    pub fn with_t2(mut self, t2_us: f64) -> Self {
        self.t2_us = t2_us;
        self
    }

    /// Set gate durations
    pub fn with_gate_times(mut self, time_1q_ns: f64, time_2q_ns: f64) -> Self {
        self.time_1q_ns = time_1q_ns;
        self.time_2q_ns = time_2q_ns;
        self
    }

    /// Set depolarizing probabilities
    pub fn with_depol(mut self, depol_1q: f64, depol_2q: f64) -> Self {
        self.depol_1q = depol_1q;
        self.depol_2q = depol_2q;
        self
    }

    /// Replace the single-qubit noisy instruction set
    pub fn with_noisy_1q(mut self, names: &[&str]) -> Self {
        self.noisy_1q = to_names(names);
        self
    }

    /// Replace the two-qubit noisy instruction set
    pub fn with_noisy_2q(mut self, names: &[&str]) -> Self {
        self.noisy_2q = to_names(names);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get T1 time in microseconds
    pub fn t1_us(&self) -> f64 {
        self.t1_us
    }

    /// Get T2 time in microseconds
    pub fn t2_us(&self) -> f64 {
        self.t2_us
    }

    /// Single-qubit gate duration (ns)
    pub fn time_1q_ns(&self) -> f64 {
        self.time_1q_ns
    }

    /// Two-qubit gate duration (ns)
    pub fn time_2q_ns(&self) -> f64 {
        self.time_2q_ns
    }

    /// Single-qubit depolarizing probability
    pub fn depol_1q(&self) -> f64 {
        self.depol_1q
    }

    /// Two-qubit depolarizing probability
    pub fn depol_2q(&self) -> f64 {
        self.depol_2q
    }

    /// Instruction names carrying single-qubit noise
    pub fn noisy_1q(&self) -> &[String] {
        &self.noisy_1q
    }

    /// Instruction names carrying two-qubit noise
    pub fn noisy_2q(&self) -> &[String] {
        &self.noisy_2q
    }

    /// Check whether every error channel is the identity
    pub fn is_ideal(&self) -> bool {
        self.depol_1q == 0.0
            && self.depol_2q == 0.0
            && self.relaxation_1q().is_identity()
            && self.relaxation_2q().is_identity()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate physical constraints (T2 <= 2*T1)
    pub fn validate(&self) -> EgsResult<()> {
        if self.t1_us.is_nan() || self.t1_us <= 0.0 {
            return Err(EgsError::NoiseModelError(format!(
                "T1 must be positive: {}",
                self.t1_us
            )));
        }

        if self.t2_us.is_nan() || self.t2_us <= 0.0 {
            return Err(EgsError::NoiseModelError(format!(
                "T2 must be positive: {}",
                self.t2_us
            )));
        }

        if self.t2_us > 2.0 * self.t1_us {
            return Err(EgsError::InvalidT2 {
                t2_us: self.t2_us,
                t1_us: self.t1_us,
            });
        }

        for (label, t) in [("1Q", self.time_1q_ns), ("2Q", self.time_2q_ns)] {
            if !t.is_finite() || t < 0.0 {
                return Err(EgsError::NoiseModelError(format!(
                    "{} gate time must be finite and non-negative: {}",
                    label, t
                )));
            }
        }

        for p in [self.depol_1q, self.depol_2q] {
            if !(0.0..=1.0).contains(&p) {
                return Err(EgsError::InvalidProbability(p));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Derived Quantities
    // ========================================================================

    /// Relaxation over one single-qubit gate
    pub fn relaxation_1q(&self) -> ThermalRelaxation {
        ThermalRelaxation::new(self.t1_us, self.t2_us, self.time_1q_ns)
    }

    /// Relaxation of each operand over one two-qubit gate
    pub fn relaxation_2q(&self) -> ThermalRelaxation {
        ThermalRelaxation::new(self.t1_us, self.t2_us, self.time_2q_ns)
    }

    /// Relaxation for an arbitrary idle duration
    pub fn relaxation_for(&self, duration_ns: f64) -> ThermalRelaxation {
        ThermalRelaxation::new(self.t1_us, self.t2_us, duration_ns)
    }

    /// Error attached to `gate`, if its instruction name is noisy
    pub fn error_for(&self, gate: &Gate) -> Option<GateError> {
        let name = gate.name();
        if gate.is_single_qubit() && self.noisy_1q.iter().any(|n| n == name) {
            Some(GateError {
                num_qubits: 1,
                relaxation: self.relaxation_1q(),
                depol: self.depol_1q,
            })
        } else if gate.is_two_qubit() && self.noisy_2q.iter().any(|n| n == name) {
            Some(GateError {
                num_qubits: 2,
                relaxation: self.relaxation_2q(),
                depol: self.depol_2q,
            })
        } else {
            None
        }
    }

    /// Average gate fidelity of `gate` under this model (1.0 when noiseless)
    pub fn gate_fidelity_estimate(&self, gate: &Gate) -> f64 {
        self.error_for(gate)
            .map(|e| e.average_fidelity())
            .unwrap_or(1.0)
    }

    /// Product of per-gate average fidelities
    ///
    /// Ignores idle decoherence; see the scheduler for idle-time analysis.
    pub fn estimate_circuit_fidelity(&self, circuit: &Circuit) -> f64 {
        circuit
            .gates()
            .iter()
            .map(|g| self.gate_fidelity_estimate(g))
            .product()
    }
}

fn to_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_lowercase()).collect()
}

impl Default for ThermalNoiseModel {
    fn default() -> Self {
        Self::eagle_like()
    }
}

impl fmt::Display for ThermalNoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ThermalNoiseModel(T1={:.0}μs, T2={:.0}μs, 1Q={:.0}ns/{:.4}, 2Q={:.0}ns/{:.4})",
            self.t1_us, self.t2_us, self.time_1q_ns, self.depol_1q, self.time_2q_ns, self.depol_2q
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
