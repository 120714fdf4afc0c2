//! Simulator backend for EGS
//!
//! Layer: L6_Backend → SimulatorBackend
//!
//! State-vector simulator with thermal-relaxation and depolarizing noise,
//! sampled as quantum trajectories (one stochastic Kraus unravelling per
//! shot).

use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
use egs_core::bench::{MAX_SHOTS, MAX_SIM_QUBITS};
use egs_core::{Bitstring, Circuit, Counts, EgsError, EgsResult, Gate, QubitId};
use egs_noise::{GateError, ThermalNoiseModel, ThermalRelaxation};
use num_complex::Complex64;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::time::Instant;

/// Amplitudes whose squared norm falls below this are treated as zero
const NORM_EPSILON: f64 = 1e-15;

/// Simulator backend with noise model
pub struct SimulatorBackend {
    /// Backend name
    name: String,

    /// Number of qubits
    num_qubits: usize,

    /// Noise model
    noise_model: ThermalNoiseModel,

    /// Random seed
    seed: Option<u64>,
}

impl SimulatorBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create new simulator backend
    pub fn new(num_qubits: usize, noise_model: ThermalNoiseModel) -> Self {
        Self {
            name: "egs_simulator".to_string(),
            num_qubits,
            noise_model,
            seed: None,
        }
    }

    /// Create ideal (noiseless) simulator
    pub fn ideal(num_qubits: usize) -> Self {
        Self::new(num_qubits, ThermalNoiseModel::ideal())
    }

    /// Create simulator with the Eagle-like thermal model
    pub fn eagle_like(num_qubits: usize) -> Self {
        Self::new(num_qubits, ThermalNoiseModel::eagle_like())
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Get noise model
    pub fn noise_model(&self) -> &ThermalNoiseModel {
        &self.noise_model
    }

    /// Get seed
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    fn check(&self, circuit: &Circuit, shots: u64) -> EgsResult<()> {
        if shots == 0 || shots > self.max_shots() {
            return Err(EgsError::ShotsOutOfRange(shots, 1, self.max_shots()));
        }
        if circuit.num_qubits() > self.num_qubits {
            return Err(EgsError::TooManyQubits {
                requested: circuit.num_qubits(),
                available: self.num_qubits,
            });
        }
        if circuit.num_qubits() > MAX_SIM_QUBITS {
            return Err(EgsError::BackendError(format!(
                "{} qubits exceeds the state-vector limit of {}",
                circuit.num_qubits(),
                MAX_SIM_QUBITS
            )));
        }
        Self::check_terminal_measurements(circuit)
    }

    /// Readout happens once, at the end of the shot, so no instruction
    /// may touch a qubit after it has been measured
    fn check_terminal_measurements(circuit: &Circuit) -> EgsResult<()> {
        let mut measured = vec![false; circuit.num_qubits()];

        for (index, gate) in circuit.gates().iter().enumerate() {
            match gate {
                Gate::Measure(q) => {
                    if let Some(m) = measured.get_mut(*q) {
                        *m = true;
                    }
                }
                Gate::MeasureAll => measured.iter_mut().for_each(|m| *m = true),
                Gate::Barrier(_) => {}
                _ => {
                    let reused = gate
                        .qubits()
                        .into_iter()
                        .find(|&q| measured.get(q).copied().unwrap_or(false));
                    if let Some(q) = reused {
                        return Err(EgsError::BackendError(format!(
                            "instruction {} ({}) acts on qubit {} after its measurement",
                            index,
                            gate.name(),
                            q
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Whether any instruction in the circuit carries an error
    fn is_noisy(&self, circuit: &Circuit) -> bool {
        circuit
            .gates()
            .iter()
            .filter_map(|g| self.noise_model.error_for(g))
            .any(|e| !e.relaxation.is_identity() || e.depol > 0.0)
    }

    /// Simulate circuit and return counts
    fn simulate(&self, circuit: &Circuit, shots: u64, rng: &mut StdRng) -> Counts {
        let readout = Readout::for_circuit(circuit);
        let mut counts: Counts = HashMap::new();

        if self.is_noisy(circuit) {
            for _ in 0..shots {
                let state = self.run_trajectory(circuit, rng);
                let outcome = state.sample(rng);
                *counts.entry(readout.format(outcome)).or_insert(0) += 1;
            }
        } else {
            // Deterministic evolution: one pass, then sample every shot
            let state = self.run_trajectory(circuit, rng);
            let cumulative = state.cumulative_probabilities();
            for _ in 0..shots {
                let outcome = sample_cumulative(&cumulative, rng);
                *counts.entry(readout.format(outcome)).or_insert(0) += 1;
            }
        }

        counts
    }

    /// Evolve |0…0⟩ through the circuit, sampling noise along the way
    fn run_trajectory(&self, circuit: &Circuit, rng: &mut StdRng) -> StateVector {
        let mut state = StateVector::new(circuit.num_qubits());

        for gate in circuit.gates() {
            state.apply_gate(gate);
            if let Some(error) = self.noise_model.error_for(gate) {
                state.apply_gate_error(&gate.qubits(), &error, rng);
            }
        }

        state
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn execute(&self, circuit: &Circuit, shots: u64) -> EgsResult<ExecutionResult> {
        self.check(circuit, shots)?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let started = Instant::now();
        let counts = self.simulate(circuit, shots, &mut rng);
        let elapsed_ms = started.elapsed().as_millis() as u64;

        log::debug!(
            "{}: {} shots of {} ({} qubits, {} gates) in {} ms, {} outcomes",
            self.name,
            shots,
            circuit.name().unwrap_or("circuit"),
            circuit.num_qubits(),
            circuit.gate_count(),
            elapsed_ms,
            counts.len()
        );

        let mut tags = BTreeMap::new();
        tags.insert("noise_model".to_string(), self.noise_model.to_string());
        if let Some(name) = circuit.name() {
            tags.insert("circuit".to_string(), name.to_string());
        }

        Ok(ExecutionResult {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                wall_time_ms: Some(elapsed_ms),
                simulated: true,
                seed: self.seed,
                num_qubits: circuit.num_qubits(),
                tags,
            },
        })
    }

    fn is_simulator(&self) -> bool {
        true
    }

    fn max_shots(&self) -> u64 {
        MAX_SHOTS
    }
}

// ============================================================================
// Readout
// ============================================================================

/// Maps a basis-state index to the reported bitstring
struct Readout {
    width: usize,
    /// Measured qubits, ascending; None reports every qubit
    qubits: Option<Vec<QubitId>>,
}

impl Readout {
    fn for_circuit(circuit: &Circuit) -> Self {
        let measured = circuit.measured_qubits();
        let qubits = if measured.is_empty() || measured.len() == circuit.num_qubits() {
            None
        } else {
            Some(measured)
        };
        Self {
            width: circuit.num_qubits(),
            qubits,
        }
    }

    /// Qubit 0 (or the lowest measured qubit) is the rightmost character
    fn format(&self, index: usize) -> String {
        match &self.qubits {
            None => Bitstring::from_index(index, self.width).to_string(),
            Some(qubits) => qubits
                .iter()
                .rev()
                .map(|&q| if (index >> q) & 1 == 1 { '1' } else { '0' })
                .collect(),
        }
    }
}

fn sample_cumulative(cumulative: &[f64], rng: &mut StdRng) -> usize {
    let total = cumulative.last().copied().unwrap_or(1.0);
    let r: f64 = rng.gen::<f64>() * total;
    cumulative
        .partition_point(|&c| c <= r)
        .min(cumulative.len().saturating_sub(1))
}

// ============================================================================
// State Vector
// ============================================================================

/// Pure state over `num_qubits`; basis index bit `q` is qubit `q`
#[derive(Debug, Clone)]
pub(crate) struct StateVector {
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    pub(crate) fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    pub(crate) fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    fn cumulative_probabilities(&self) -> Vec<f64> {
        let mut acc = 0.0;
        self.probabilities()
            .into_iter()
            .map(|p| {
                acc += p;
                acc
            })
            .collect()
    }

    /// Sample a basis-state index
    fn sample(&self, rng: &mut StdRng) -> usize {
        let r: f64 = rng.gen();
        let mut cumsum = 0.0;
        for (i, a) in self.amplitudes.iter().enumerate() {
            cumsum += a.norm_sqr();
            if r < cumsum {
                return i;
            }
        }
        // rounding left r above the total; take the last populated state
        self.amplitudes
            .iter()
            .rposition(|a| a.norm_sqr() > NORM_EPSILON)
            .unwrap_or(0)
    }

    /// Probability that `qubit` reads 1
    fn prob_one(&self, qubit: QubitId) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    fn normalize(&mut self) {
        let norm: f64 = self.amplitudes.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt();
        if norm > NORM_EPSILON {
            for a in self.amplitudes.iter_mut() {
                *a /= norm;
            }
        }
    }

    // ========================================================================
    // Unitaries
    // ========================================================================

    pub(crate) fn apply_gate(&mut self, gate: &Gate) {
        let i = Complex64::i();
        match gate {
            Gate::H(q) => self.apply_1q(*q, |a, b| {
                ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2)
            }),
            Gate::X(q) => self.apply_1q(*q, |a, b| (b, a)),
            Gate::Y(q) => self.apply_1q(*q, |a, b| (-i * b, i * a)),
            Gate::Z(q) => self.apply_1q(*q, |a, b| (a, -b)),
            Gate::S(q) => self.apply_1q(*q, |a, b| (a, i * b)),
            Gate::Sdg(q) => self.apply_1q(*q, |a, b| (a, -i * b)),
            Gate::T(q) => {
                let phase = Complex64::from_polar(1.0, PI / 4.0);
                self.apply_1q(*q, |a, b| (a, b * phase))
            }
            Gate::Tdg(q) => {
                let phase = Complex64::from_polar(1.0, -PI / 4.0);
                self.apply_1q(*q, |a, b| (a, b * phase))
            }
            Gate::Sx(q) => {
                let (p, m) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
                self.apply_1q(*q, |a, b| (p * a + m * b, m * a + p * b))
            }
            Gate::Sxdg(q) => {
                let (p, m) = (Complex64::new(0.5, 0.5), Complex64::new(0.5, -0.5));
                self.apply_1q(*q, |a, b| (m * a + p * b, p * a + m * b))
            }
            Gate::Id(_) => {}
            Gate::Rx(q, angle) => {
                let (s, c) = (angle / 2.0).sin_cos();
                let ms = Complex64::new(0.0, -s);
                self.apply_1q(*q, |a, b| (a * c + b * ms, a * ms + b * c))
            }
            Gate::Ry(q, angle) => {
                let (s, c) = (angle / 2.0).sin_cos();
                self.apply_1q(*q, |a, b| (a * c - b * s, a * s + b * c))
            }
            Gate::Rz(q, angle) => {
                let neg = Complex64::from_polar(1.0, -angle / 2.0);
                let pos = Complex64::from_polar(1.0, angle / 2.0);
                self.apply_1q(*q, |a, b| (a * neg, b * pos))
            }
            Gate::Cnot(c, t) => self.apply_cnot(*c, *t),
            Gate::Cz(a, b) => self.apply_cz(*a, *b),
            Gate::Swap(a, b) => self.apply_swap(*a, *b),
            // Measurement is deferred to the end of the shot
            Gate::Measure(_) | Gate::MeasureAll | Gate::Barrier(_) => {}
        }
    }

    fn apply_1q<F>(&mut self, q: QubitId, f: F)
    where
        F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
    {
        let mask = 1 << q;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (new_i, new_j) = f(self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = new_i;
                self.amplitudes[j] = new_j;
            }
        }
    }

    fn apply_cnot(&mut self, control: QubitId, target: QubitId) {
        let control_mask = 1 << control;
        let target_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & control_mask != 0 && i & target_mask == 0 {
                self.amplitudes.swap(i, i | target_mask);
            }
        }
    }

    fn apply_cz(&mut self, q1: QubitId, q2: QubitId) {
        let mask = (1 << q1) | (1 << q2);
        for (i, a) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == mask {
                *a = -*a;
            }
        }
    }

    fn apply_swap(&mut self, q1: QubitId, q2: QubitId) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if i & mask1 != 0 && i & mask2 == 0 {
                self.amplitudes.swap(i, i ^ mask1 ^ mask2);
            }
        }
    }

    // ========================================================================
    // Noise Channels (trajectory sampling)
    // ========================================================================

    /// Relaxation on every operand, then depolarizing on the operand set
    fn apply_gate_error(&mut self, qubits: &[QubitId], error: &GateError, rng: &mut StdRng) {
        if !error.relaxation.is_identity() {
            for &q in qubits {
                self.apply_relaxation(q, &error.relaxation, rng);
            }
        }
        if error.depol > 0.0 && rng.gen::<f64>() < error.depol {
            self.apply_random_pauli(qubits, rng);
        }
    }

    fn apply_relaxation(&mut self, q: QubitId, relaxation: &ThermalRelaxation, rng: &mut StdRng) {
        self.amplitude_damp(q, relaxation.gamma, rng);
        self.phase_damp(q, relaxation.lambda, rng);
    }

    /// K0 = diag(1, √(1-γ)), K1 = √γ |0⟩⟨1|
    pub(crate) fn amplitude_damp(&mut self, q: QubitId, gamma: f64, rng: &mut StdRng) {
        if gamma <= 0.0 {
            return;
        }
        let mask = 1 << q;
        let p_jump = gamma * self.prob_one(q);

        if rng.gen::<f64>() < p_jump {
            for i in 0..self.amplitudes.len() {
                if i & mask == 0 {
                    self.amplitudes[i] = self.amplitudes[i | mask];
                    self.amplitudes[i | mask] = Complex64::new(0.0, 0.0);
                }
            }
        } else {
            let keep = (1.0 - gamma).sqrt();
            for (i, a) in self.amplitudes.iter_mut().enumerate() {
                if i & mask != 0 {
                    *a *= keep;
                }
            }
        }
        self.normalize();
    }

    /// K0 = diag(1, √(1-λ)), K1 = √λ |1⟩⟨1|
    pub(crate) fn phase_damp(&mut self, q: QubitId, lambda: f64, rng: &mut StdRng) {
        if lambda <= 0.0 {
            return;
        }
        let mask = 1 << q;
        let p_jump = lambda * self.prob_one(q);

        if rng.gen::<f64>() < p_jump {
            for (i, a) in self.amplitudes.iter_mut().enumerate() {
                if i & mask == 0 {
                    *a = Complex64::new(0.0, 0.0);
                }
            }
        } else {
            let keep = (1.0 - lambda).sqrt();
            for (i, a) in self.amplitudes.iter_mut().enumerate() {
                if i & mask != 0 {
                    *a *= keep;
                }
            }
        }
        self.normalize();
    }

    /// Uniform draw from the 4^n Paulis on `qubits`, identity included
    fn apply_random_pauli(&mut self, qubits: &[QubitId], rng: &mut StdRng) {
        for &q in qubits {
            match rng.gen_range(0..4u8) {
                1 => self.apply_gate(&Gate::X(q)),
                2 => self.apply_gate(&Gate::Y(q)),
                3 => self.apply_gate(&Gate::Z(q)),
                _ => {}
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
