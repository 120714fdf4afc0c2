//! Execution results and the backend interface
//!
//! Layer: L6_Backend → BackendTrait
//!
//! Counts returned by a backend run and the queries the benchmark asks of
//! them: outcome probabilities, the dominant outcome and distribution-level
//! comparisons.

use egs_core::bench::MAX_SHOTS;
use egs_core::{Circuit, Counts, EgsResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Counts from one circuit run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Outcome histogram, keyed by bitstring with qubit 0 rightmost
    pub counts: Counts,

    /// Shots requested
    pub shots: u64,

    /// Provenance
    pub metadata: ExecutionMetadata,
}

/// Where and how a result was produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Wall-clock time of the run
    pub wall_time_ms: Option<u64>,

    /// Produced by a simulator
    pub simulated: bool,

    /// Sampling seed, if fixed
    pub seed: Option<u64>,

    /// Register width of the executed circuit
    pub num_qubits: usize,

    /// Free-form labels such as the circuit name and noise model
    pub tags: BTreeMap<String, String>,
}

impl ExecutionResult {
    /// Result with default simulator metadata
    pub fn new(counts: Counts, shots: u64, backend: &str) -> Self {
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                simulated: true,
                ..Default::default()
            },
        }
    }

    /// Sum of all counts; equals `shots` for a complete run
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Relative frequency of `bitstring`, 0 when unseen
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        let count = self.counts.get(bitstring).copied().unwrap_or(0);
        count as f64 / self.shots as f64
    }

    /// Dominant outcome and its count
    ///
    /// Equal counts go to the lexicographically smallest bitstring.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.counts
            .iter()
            .max_by(|(a_bs, a), (b_bs, b)| a.cmp(b).then_with(|| b_bs.cmp(a_bs)))
            .map(|(bs, &count)| (bs, count))
    }

    /// Probability of the most frequent bitstring
    pub fn max_probability(&self) -> f64 {
        match self.most_frequent() {
            Some((_, count)) if self.shots > 0 => count as f64 / self.shots as f64,
            _ => 0.0,
        }
    }

    /// Normalised distribution (bitstring -> probability)
    pub fn distribution(&self) -> HashMap<String, f64> {
        let total = self.total_counts().max(1) as f64;
        self.counts
            .iter()
            .map(|(bs, &c)| (bs.clone(), c as f64 / total))
            .collect()
    }

    /// Hellinger fidelity between two count distributions
    ///
    /// `(Σ √(p·q))²`, 1.0 for identical distributions and 0.0 for
    /// disjoint ones.
    pub fn hellinger_fidelity(&self, other: &ExecutionResult) -> f64 {
        let p = self.distribution();
        let q = other.distribution();
        let overlap: f64 = p
            .iter()
            .filter_map(|(bs, &pv)| q.get(bs).map(|&qv| (pv * qv).sqrt()))
            .sum();
        overlap * overlap
    }

    /// Shannon entropy of the count distribution in bits
    pub fn entropy_bits(&self) -> f64 {
        self.distribution()
            .values()
            .filter(|&&p| p > 0.0)
            .map(|&p| -p * p.log2())
            .sum()
    }

    /// Number of distinct outcomes observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} shots, {} outcomes, top p {:.4}, {:.3} bits",
            self.shots,
            self.counts.len(),
            self.max_probability(),
            self.entropy_bits()
        )
    }
}

/// Anything that turns a circuit into counts
pub trait Backend: Send + Sync {
    /// Identifier used in logs and metadata
    fn name(&self) -> &str;

    /// Widest circuit accepted
    fn num_qubits(&self) -> usize;

    /// Run `circuit` for `shots` shots
    fn execute(&self, circuit: &Circuit, shots: u64) -> EgsResult<ExecutionResult>;

    /// Run circuits one after another, failing on the first error
    fn execute_batch(&self, circuits: &[Circuit], shots: u64) -> EgsResult<Vec<ExecutionResult>> {
        circuits.iter().map(|c| self.execute(c, shots)).collect()
    }

    /// Whether results come from simulation
    fn is_simulator(&self) -> bool {
        true
    }

    /// Upper bound on `shots`
    fn max_shots(&self) -> u64 {
        MAX_SHOTS
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn counts(entries: &[(&str, u64)]) -> Counts {
        entries.iter().map(|&(bs, n)| (bs.to_string(), n)).collect()
    }

    // noisy GHZ-like spread over three qubits
    fn ghz_like() -> ExecutionResult {
        let c = counts(&[
            ("000", 400),
            ("111", 300),
            ("001", 80),
            ("110", 80),
            ("010", 40),
            ("101", 40),
            ("011", 30),
            ("100", 30),
        ]);
        ExecutionResult::new(c, 1000, "test")
    }

    fn single(bitstring: &str, shots: u64) -> ExecutionResult {
        ExecutionResult::new(counts(&[(bitstring, shots)]), shots, "test")
    }

    #[test]
    fn test_execution_result_new() {
        let result = ghz_like();
        assert_eq!(result.shots, 1000);
        assert_eq!(result.metadata.backend, "test");
        assert_eq!(result.total_counts(), 1000);
        assert_eq!(result.num_outcomes(), 8);
    }

    #[test]
    fn test_probability() {
        let result = ghz_like();
        assert_relative_eq!(result.probability("000"), 0.4);
        assert_relative_eq!(result.probability("111"), 0.3);
        assert_eq!(result.probability("1111"), 0.0);
    }

    #[test]
    fn test_most_frequent() {
        let result = ghz_like();
        let (bs, count) = result.most_frequent().unwrap();
        assert_eq!(bs, "000");
        assert_eq!(count, 400);
        assert_relative_eq!(result.max_probability(), 0.4);
    }

    #[test]
    fn test_most_frequent_tie_break() {
        let result = ExecutionResult::new(counts(&[("10", 5), ("01", 5)]), 10, "test");
        assert_eq!(result.most_frequent().unwrap().0, "01");
    }

    #[test]
    fn test_empty_result() {
        let result = ExecutionResult::new(HashMap::new(), 0, "test");
        assert!(result.most_frequent().is_none());
        assert_eq!(result.max_probability(), 0.0);
        assert_eq!(result.entropy_bits(), 0.0);
    }

    #[test]
    fn test_hellinger_fidelity() {
        let a = ghz_like();
        assert_relative_eq!(a.hellinger_fidelity(&a), 1.0, epsilon = 1e-12);

        let zero = single("000", 100);
        let one = single("111", 100);
        assert_eq!(zero.hellinger_fidelity(&one), 0.0);

        // overlap √0.4 → fidelity 0.4
        assert_relative_eq!(a.hellinger_fidelity(&zero), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(single("0", 10).entropy_bits(), 0.0);

        let c = counts(&[("00", 25), ("01", 25), ("10", 25), ("11", 25)]);
        let uniform = ExecutionResult::new(c, 100, "test");
        assert_relative_eq!(uniform.entropy_bits(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_serde_roundtrip() {
        let result = ghz_like();
        let json = serde_json::to_string(&result).unwrap();
        let back: ExecutionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counts, result.counts);
        assert_eq!(back.shots, 1000);
    }
}
