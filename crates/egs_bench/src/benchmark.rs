//! Standard vs EGS benchmark runner
//!
//! Layer: L8_Benchmark → EgsBenchmark
//!
//! One run: draw parameters, build both orderings, compile at the configured
//! level, execute on the noisy simulator and compare the fidelity of the
//! most frequent outcome alongside compiled depth.

use crate::config::BenchConfig;
use egs_backend::{Backend, SimulatorBackend};
use egs_core::error::EgsResult;
use egs_core::Circuit;
use egs_noise::GateTimes;
use egs_schedule::{Scheduler, SchedulingStrategy};
use egs_transpile::{TranspileOutput, Transpiler, TranspilerConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Measurements of one ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingMetrics {
    /// Probability of the most frequent bitstring
    pub fidelity: f64,

    /// Most frequent bitstring
    pub top_bitstring: String,

    /// Depth before compilation
    pub depth_raw: usize,

    /// Depth after compilation
    pub depth: usize,

    /// Instructions after compilation
    pub gate_count: usize,

    /// Two-qubit gates after compilation
    pub cx_count: usize,

    /// ASAP duration of the compiled circuit (ns)
    pub duration_ns: f64,

    /// Predicted fidelity from gate errors and idle decoherence
    pub predicted_score: f64,

    /// Shannon entropy of the measured distribution (bits)
    pub entropy_bits: f64,
}

/// Result of one standard-vs-EGS comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Benchmark name
    pub name: String,

    /// Ansatz width
    pub num_qubits: usize,

    /// Ansatz layers
    pub layers: usize,

    /// Shots per circuit
    pub shots: u64,

    /// Seed used
    pub seed: u64,

    /// Transpiler level used
    pub optimization_level: u8,

    /// Interleaved ordering
    pub standard: OrderingMetrics,

    /// Layered ordering
    pub egs: OrderingMetrics,

    /// Wall-clock time of the whole run (ms)
    pub time_ms: u64,
}

impl BenchmarkResult {
    /// Standard fidelity (max count / shots)
    pub fn fid_std(&self) -> f64 {
        self.standard.fidelity
    }

    /// EGS fidelity (max count / shots)
    pub fn fid_egs(&self) -> f64 {
        self.egs.fidelity
    }

    /// Compiled depth of the standard circuit
    pub fn depth_std(&self) -> usize {
        self.standard.depth
    }

    /// Compiled depth of the EGS circuit
    pub fn depth_egs(&self) -> usize {
        self.egs.depth
    }

    /// Relative fidelity gain in percent: `(fid_egs / fid_std - 1) · 100`
    ///
    /// Zero when the standard fidelity is zero.
    pub fn gain_percent(&self) -> f64 {
        if self.fid_std() == 0.0 {
            return 0.0;
        }
        (self.fid_egs() / self.fid_std() - 1.0) * 100.0
    }

    /// Compiled depth saved by EGS, in percent of the standard depth
    pub fn depth_reduction(&self) -> f64 {
        if self.depth_std() == 0 {
            return 0.0;
        }
        (1.0 - self.depth_egs() as f64 / self.depth_std() as f64) * 100.0
    }

    /// Check whether EGS reached a higher fidelity
    pub fn egs_wins(&self) -> bool {
        self.fid_egs() > self.fid_std()
    }

    /// The three-line summary printed by the command-line tool
    pub fn summary(&self) -> String {
        format!(
            "Standard Fidelity: {:.4}\nEGS Fidelity:      {:.4}\nImprovement:       {:+.1}%",
            self.fid_std(),
            self.fid_egs(),
            self.gain_percent()
        )
    }
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}Q x {}L): std={:.4} egs={:.4} gain={:+.1}% depth {}->{}",
            self.name,
            self.num_qubits,
            self.layers,
            self.fid_std(),
            self.fid_egs(),
            self.gain_percent(),
            self.depth_std(),
            self.depth_egs()
        )
    }
}

/// Benchmark runner
pub struct EgsBenchmark;

impl EgsBenchmark {
    /// Run the comparison described by `config`
    pub fn run(config: &BenchConfig) -> EgsResult<BenchmarkResult> {
        let name = format!("egs_{}q_{}l", config.num_qubits, config.layers);
        Self::run_named(&name, config)
    }

    /// Run with an explicit benchmark name
    pub fn run_named(name: &str, config: &BenchConfig) -> EgsResult<BenchmarkResult> {
        config.validate()?;
        let start = Instant::now();

        let spec = config.spec();
        let params = spec.random_params(config.seed);

        let transpiler = Transpiler::new(TranspilerConfig::level(config.optimization_level));
        let backend =
            SimulatorBackend::new(config.num_qubits, config.noise.clone()).with_seed(config.seed);

        let standard = Self::measure(
            &SchedulingStrategy::Standard.build(&spec, &params)?,
            &transpiler,
            &backend,
            config,
        )?;
        let egs = Self::measure(
            &SchedulingStrategy::Egs.build(&spec, &params)?,
            &transpiler,
            &backend,
            config,
        )?;

        let result = BenchmarkResult {
            name: name.to_string(),
            num_qubits: config.num_qubits,
            layers: config.layers,
            shots: config.shots,
            seed: config.seed,
            optimization_level: config.optimization_level,
            standard,
            egs,
            time_ms: start.elapsed().as_millis() as u64,
        };

        log::info!("{}", result);
        Ok(result)
    }

    /// Compile, execute and score one ordering
    fn measure(
        circuit: &Circuit,
        transpiler: &Transpiler,
        backend: &SimulatorBackend,
        config: &BenchConfig,
    ) -> EgsResult<OrderingMetrics> {
        let TranspileOutput {
            circuit: compiled,
            depth_before,
            depth_after,
            ..
        } = transpiler.transpile(circuit)?;

        let execution = backend.execute(&compiled, config.shots)?;
        let (top_bitstring, _) = execution
            .most_frequent()
            .map(|(bs, count)| (bs.clone(), count))
            .unwrap_or_default();

        let gate_times = GateTimes::from_noise_model(&config.noise);
        let schedule = Scheduler::compute_asap(&compiled, &gate_times);

        Ok(OrderingMetrics {
            fidelity: execution.max_probability(),
            top_bitstring,
            depth_raw: depth_before,
            depth: depth_after,
            gate_count: compiled.gate_count(),
            cx_count: compiled.count_2q(),
            duration_ns: schedule.total_duration_ns(),
            predicted_score: Scheduler::score_circuit(&compiled, &config.noise, &gate_times),
            entropy_bits: execution.entropy_bits(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use egs_noise::ThermalNoiseModel;

    fn metrics(fidelity: f64, depth: usize) -> OrderingMetrics {
        OrderingMetrics {
            fidelity,
            top_bitstring: "0000".into(),
            depth_raw: depth,
            depth,
            gate_count: 0,
            cx_count: 0,
            duration_ns: 0.0,
            predicted_score: 0.0,
            entropy_bits: 0.0,
        }
    }

    fn result(fid_std: f64, fid_egs: f64, depth_std: usize, depth_egs: usize) -> BenchmarkResult {
        BenchmarkResult {
            name: "test".into(),
            num_qubits: 4,
            layers: 1,
            shots: 1000,
            seed: 42,
            optimization_level: 3,
            standard: metrics(fid_std, depth_std),
            egs: metrics(fid_egs, depth_egs),
            time_ms: 1,
        }
    }

    #[test]
    fn test_gain_percent() {
        assert_relative_eq!(result(0.2, 0.25, 10, 5).gain_percent(), 25.0, epsilon = 1e-9);
        assert_relative_eq!(result(0.2, 0.1, 10, 5).gain_percent(), -50.0, epsilon = 1e-9);
        assert_eq!(result(0.0, 0.3, 10, 5).gain_percent(), 0.0);
    }

    #[test]
    fn test_depth_reduction() {
        assert_relative_eq!(result(0.1, 0.1, 20, 5).depth_reduction(), 75.0);
        assert_eq!(result(0.1, 0.1, 0, 0).depth_reduction(), 0.0);
    }

    #[test]
    fn test_summary_format() {
        let summary = result(0.0123, 0.0456, 10, 5).summary();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "Standard Fidelity: 0.0123");
        assert_eq!(lines[1], "EGS Fidelity:      0.0456");
        assert!(lines[2].starts_with("Improvement:       +270."));
    }

    #[test]
    fn test_run_quick() {
        let config = BenchConfig::quick().with_shots(256);
        let result = EgsBenchmark::run(&config).unwrap();

        assert_eq!(result.name, "egs_4q_1l");
        assert!(result.fid_std() > 0.0 && result.fid_std() <= 1.0);
        assert!(result.fid_egs() > 0.0 && result.fid_egs() <= 1.0);
        assert!(result.depth_egs() < result.depth_std());
        assert_eq!(result.egs.cx_count, 3);
        assert_eq!(result.standard.top_bitstring.len(), 4);
        assert!(result.egs.duration_ns < result.standard.duration_ns);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = BenchConfig::quick().with_shots(128).with_seed(5);
        let a = EgsBenchmark::run(&config).unwrap();
        let b = EgsBenchmark::run(&config).unwrap();
        assert_eq!(a.standard, b.standard);
        assert_eq!(a.egs.fidelity, b.egs.fidelity);
    }

    #[test]
    fn test_ideal_noise_prediction_is_perfect() {
        let config = BenchConfig::quick()
            .with_shots(64)
            .with_noise(ThermalNoiseModel::ideal());
        let result = EgsBenchmark::run(&config).unwrap();
        assert_relative_eq!(result.standard.predicted_score, 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.egs.predicted_score, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(EgsBenchmark::run(&BenchConfig::quick().with_qubits(1)).is_err());
    }
}
