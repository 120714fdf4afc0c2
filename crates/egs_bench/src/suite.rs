//! Benchmark suite for EGS
//!
//! Layer: L8_Benchmark → BenchSuite
//!
//! Repeats the standard-vs-EGS comparison across register widths and layer
//! counts, collecting results for reporting.

use crate::benchmark::{BenchmarkResult, EgsBenchmark};
use crate::config::BenchConfig;
use egs_core::error::{EgsError, EgsResult};
use serde::{Deserialize, Serialize};

/// Smallest width used by qubit scaling
pub const MIN_SCALING_QUBITS: usize = 3;

/// Benchmark suite
pub struct BenchSuite {
    /// Template for every run
    base: BenchConfig,

    /// Results
    results: Vec<BenchmarkResult>,
}

impl BenchSuite {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create new benchmark suite with the default config
    pub fn new() -> Self {
        Self::with_config(BenchConfig::default())
    }

    /// Create from a config template
    pub fn with_config(base: BenchConfig) -> Self {
        Self {
            base,
            results: Vec::new(),
        }
    }

    /// Create with seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(BenchConfig::default().with_seed(seed))
    }

    /// Get config template
    pub fn config(&self) -> &BenchConfig {
        &self.base
    }

    // ========================================================================
    // Runs
    // ========================================================================

    fn record(&mut self, name: &str, config: &BenchConfig) -> EgsResult<BenchmarkResult> {
        let result = EgsBenchmark::run_named(name, config)?;
        self.results.push(result.clone());
        Ok(result)
    }

    /// Run the template config once
    pub fn run_single(&mut self) -> EgsResult<BenchmarkResult> {
        let config = self.base.clone();
        let name = format!("single_{}q_{}l", config.num_qubits, config.layers);
        self.record(&name, &config)
    }

    /// Run widths `3..=max_qubits` at the template's layer count
    ///
    /// A sweep with no widths in range is a `ConfigError`.
    pub fn run_qubit_scaling(&mut self, max_qubits: usize) -> EgsResult<Vec<BenchmarkResult>> {
        if max_qubits < MIN_SCALING_QUBITS {
            return Err(EgsError::ConfigError(format!(
                "qubit scaling starts at {} qubits, got a maximum of {}",
                MIN_SCALING_QUBITS, max_qubits
            )));
        }
        log::info!("=== Qubit Scaling Benchmark ===");

        let mut results = Vec::new();
        for n in MIN_SCALING_QUBITS..=max_qubits {
            let config = self.base.clone().with_qubits(n);
            let name = format!("qubit_scaling_{}q", n);
            results.push(self.record(&name, &config)?);
        }
        Ok(results)
    }

    /// Run layer counts `1..=max_layers` at the template's width
    pub fn run_layer_scaling(&mut self, max_layers: usize) -> EgsResult<Vec<BenchmarkResult>> {
        if max_layers == 0 {
            return Err(EgsError::ConfigError("layer scaling needs at least 1 layer".into()));
        }
        log::info!("=== Layer Scaling Benchmark ===");

        let mut results = Vec::new();
        for layers in 1..=max_layers {
            let config = self.base.clone().with_layers(layers);
            let name = format!("layer_scaling_{}l", layers);
            results.push(self.record(&name, &config)?);
        }
        Ok(results)
    }

    // ========================================================================
    // Results
    // ========================================================================

    /// Get all results
    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    /// Clear results
    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// Get statistics
    pub fn statistics(&self) -> BenchmarkStatistics {
        BenchmarkStatistics::from_results(&self.results)
    }
}

impl Default for BenchSuite {
    fn default() -> Self {
        Self::new()
    }
}

/// Benchmark statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkStatistics {
    /// Number of benchmarks
    pub count: usize,

    /// Average fidelity gain (%)
    pub avg_gain_percent: f64,

    /// Best fidelity gain (%)
    pub max_gain_percent: f64,

    /// Worst fidelity gain (%)
    pub min_gain_percent: f64,

    /// Fraction of runs where EGS reached the higher fidelity
    pub egs_win_rate: f64,

    /// Average standard fidelity
    pub avg_fid_std: f64,

    /// Average EGS fidelity
    pub avg_fid_egs: f64,

    /// Average compiled-depth reduction (%)
    pub avg_depth_reduction: f64,

    /// Average execution time (ms)
    pub avg_time_ms: f64,

    /// Total execution time (ms)
    pub total_time_ms: u64,
}

impl BenchmarkStatistics {
    /// Compute statistics from results
    pub fn from_results(results: &[BenchmarkResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let count = results.len();
        let n = count as f64;
        let mean = |f: fn(&BenchmarkResult) -> f64| results.iter().map(f).sum::<f64>() / n;

        let gains: Vec<f64> = results.iter().map(|r| r.gain_percent()).collect();
        let wins = results.iter().filter(|r| r.egs_wins()).count();
        let total_time_ms: u64 = results.iter().map(|r| r.time_ms).sum();

        Self {
            count,
            avg_gain_percent: gains.iter().sum::<f64>() / n,
            max_gain_percent: gains.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            min_gain_percent: gains.iter().cloned().fold(f64::INFINITY, f64::min),
            egs_win_rate: wins as f64 / n,
            avg_fid_std: mean(|r| r.fid_std()),
            avg_fid_egs: mean(|r| r.fid_egs()),
            avg_depth_reduction: mean(|r| r.depth_reduction()),
            avg_time_ms: total_time_ms as f64 / n,
            total_time_ms,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
