//! Variational ansatz orderings for EGS
//!
//! Layer: L4_Scheduling → Ansatz
//!
//! Two orderings of the same hardware-efficient ansatz on a linear chain:
//!
//! * **Standard**: rotations interleaved with entanglement
//!   (`CX · RZ · CX` per neighbour pair, then an `RX` mixing layer).
//! * **EGS**: every single-qubit layer first, separated by barriers, with
//!   all `layers × (n-1)` CX gates deferred to the end of the circuit.
//!
//! Both consume the parameter vector in the same order. The two circuits
//! are not unitarily equivalent; the benchmark compares them as orderings.

use egs_core::constants::bench;
use egs_core::error::{EgsError, EgsResult};
use egs_core::{Circuit, CircuitBuilder, ParamVec};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

// ============================================================================
// Ansatz Shape
// ============================================================================

/// Shape of the genomic ansatz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsatzSpec {
    /// Register width
    pub num_qubits: usize,

    /// Number of repeated layers
    pub layers: usize,
}

impl AnsatzSpec {
    /// Create a new ansatz shape
    pub fn new(num_qubits: usize, layers: usize) -> Self {
        Self { num_qubits, layers }
    }

    /// Parameters consumed: `(n-1)` RZ plus `n` RX per layer
    pub fn num_params(&self) -> usize {
        bench::num_params(self.num_qubits, self.layers)
    }

    /// Two-qubit gates in the EGS ordering: `layers × (n-1)`
    pub fn num_entanglers(&self) -> usize {
        self.layers.saturating_mul(self.num_qubits.saturating_sub(1))
    }

    /// Require at least two qubits and between 1 and `MAX_LAYERS` layers
    pub fn validate(&self) -> EgsResult<()> {
        if self.num_qubits < 2 {
            return Err(EgsError::InvalidAnsatz(format!(
                "need at least 2 qubits, got {}",
                self.num_qubits
            )));
        }
        if self.layers == 0 {
            return Err(EgsError::InvalidAnsatz("need at least 1 layer".into()));
        }
        if self.layers > bench::MAX_LAYERS {
            return Err(EgsError::InvalidAnsatz(format!(
                "{} layers exceeds the limit of {}",
                self.layers,
                bench::MAX_LAYERS
            )));
        }
        self.num_qubits
            .checked_mul(2)
            .and_then(|width| (width - 1).checked_mul(self.layers))
            .map(|_| ())
            .ok_or_else(|| EgsError::InvalidAnsatz("parameter count overflows".into()))
    }

    /// Uniform parameters in `[-π, π)` from a seeded ChaCha stream
    pub fn random_params(&self, seed: u64) -> ParamVec {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..self.num_params())
            .map(|_| rng.gen_range(-PI..PI))
            .collect()
    }

    fn check_params(&self, params: &[f64]) -> EgsResult<()> {
        self.validate()?;
        let needed = self.num_params();
        if params.len() < needed {
            return Err(EgsError::InsufficientParameters {
                needed,
                got: params.len(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Orderings
    // ========================================================================

    /// Interleaved ordering
    pub fn build_standard(&self, params: &[f64]) -> EgsResult<Circuit> {
        self.check_params(params)?;
        let n = self.num_qubits;
        let mut params = params.iter().copied();
        let mut next = || params.next().unwrap_or_default();

        let mut builder = CircuitBuilder::with_name(n, "genomic_standard").h_layer();

        for _ in 0..self.layers {
            for i in 0..n - 1 {
                builder = builder.cx(i, i + 1).rz(i + 1, next()).cx(i, i + 1);
            }
            for q in 0..n {
                builder = builder.rx(q, next());
            }
        }

        builder.measure_all().try_build()
    }

    /// Layered ordering with deferred entanglement
    pub fn build_egs(&self, params: &[f64]) -> EgsResult<Circuit> {
        self.check_params(params)?;
        let n = self.num_qubits;
        let mut offset = 0;

        let mut builder = CircuitBuilder::with_name(n, "genomic_egs")
            .h_layer()
            .barrier_all();

        for _ in 0..self.layers {
            builder = builder
                .rz_layer(1, &params[offset..offset + n - 1])
                .barrier_all();
            offset += n - 1;

            builder = builder.rx_layer(&params[offset..offset + n]).barrier_all();
            offset += n;
        }

        for _ in 0..self.layers {
            builder = builder.cx_chain();
        }

        builder.measure_all().try_build()
    }
}

impl Default for AnsatzSpec {
    fn default() -> Self {
        Self::new(bench::DEFAULT_QUBITS, bench::DEFAULT_LAYERS)
    }
}

impl fmt::Display for AnsatzSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ansatz({} qubits, {} layers, {} params)",
            self.num_qubits,
            self.layers,
            self.num_params()
        )
    }
}

// ============================================================================
// Scheduling Strategy
// ============================================================================

/// Gate ordering used to lay out the ansatz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchedulingStrategy {
    /// Rotations interleaved with entanglement
    Standard,
    /// Entropic Gate Scheduling: parallel rotation layers, deferred entanglement
    Egs,
}

impl SchedulingStrategy {
    /// Both strategies, standard first
    pub const ALL: [SchedulingStrategy; 2] = [SchedulingStrategy::Standard, SchedulingStrategy::Egs];

    /// Build the ansatz in this ordering
    pub fn build(&self, spec: &AnsatzSpec, params: &[f64]) -> EgsResult<Circuit> {
        match self {
            SchedulingStrategy::Standard => spec.build_standard(params),
            SchedulingStrategy::Egs => spec.build_egs(params),
        }
    }

    /// Short label
    pub fn label(&self) -> &'static str {
        match self {
            SchedulingStrategy::Standard => "standard",
            SchedulingStrategy::Egs => "egs",
        }
    }
}

impl fmt::Display for SchedulingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Tests
// ============================================================================
