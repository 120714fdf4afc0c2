//! Benchmark configuration
//!
//! Layer: L8_Benchmark → BenchConfig

use egs_core::bench::{
    DEFAULT_LAYERS, DEFAULT_OPTIMIZATION_LEVEL, DEFAULT_QUBITS, DEFAULT_SEED, DEFAULT_SHOTS,
    MAX_SHOTS, MAX_SIM_QUBITS,
};
use egs_core::error::{EgsError, EgsResult};
use egs_noise::ThermalNoiseModel;
use egs_schedule::AnsatzSpec;
use egs_transpile::transpiler::MAX_OPTIMIZATION_LEVEL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters of one standard-vs-EGS comparison
///
/// Missing JSON fields fall back to the defaults, so a config file only
/// needs the values it changes:
///
/// ```json
/// { "num_qubits": 6, "shots": 2048 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Ansatz width
    pub num_qubits: usize,

    /// Ansatz layers
    pub layers: usize,

    /// Shots per circuit
    pub shots: u64,

    /// Seed for parameters and sampling
    pub seed: u64,

    /// Transpiler optimisation level (0-3)
    pub optimization_level: u8,

    /// Simulator noise
    pub noise: ThermalNoiseModel,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            num_qubits: DEFAULT_QUBITS,
            layers: DEFAULT_LAYERS,
            shots: DEFAULT_SHOTS,
            seed: DEFAULT_SEED,
            optimization_level: DEFAULT_OPTIMIZATION_LEVEL,
            noise: ThermalNoiseModel::eagle_like(),
        }
    }
}

impl BenchConfig {
    // ========================================================================
    // Presets
    // ========================================================================

    /// 10 qubits, 2 layers, 8192 shots on the Eagle-like model
    pub fn new() -> Self {
        Self::default()
    }

    /// Small and fast: 4 qubits, 1 layer, 1024 shots
    pub fn quick() -> Self {
        Self::default()
            .with_qubits(4)
            .with_layers(1)
            .with_shots(1024)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Set ansatz width
    pub fn with_qubits(mut self, num_qubits: usize) -> Self {
        self.num_qubits = num_qubits;
        self
    }

    /// Set ansatz layers
    pub fn with_layers(mut self, layers: usize) -> Self {
        self.layers = layers;
        self
    }

    /// Set shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set optimisation level
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level;
        self
    }

    /// Set noise model
    pub fn with_noise(mut self, noise: ThermalNoiseModel) -> Self {
        self.noise = noise;
        self
    }

    // ========================================================================
    // Derived
    // ========================================================================

    /// Ansatz shape
    pub fn spec(&self) -> AnsatzSpec {
        AnsatzSpec::new(self.num_qubits, self.layers)
    }

    /// Check every field
    pub fn validate(&self) -> EgsResult<()> {
        self.spec().validate()?;

        if self.num_qubits > MAX_SIM_QUBITS {
            return Err(EgsError::ConfigError(format!(
                "num_qubits {} exceeds simulator limit {}",
                self.num_qubits, MAX_SIM_QUBITS
            )));
        }
        if self.shots == 0 || self.shots > MAX_SHOTS {
            return Err(EgsError::ShotsOutOfRange(self.shots, 1, MAX_SHOTS));
        }
        if self.optimization_level > MAX_OPTIMIZATION_LEVEL {
            return Err(EgsError::ConfigError(format!(
                "optimization_level must be 0-{}, got {}",
                MAX_OPTIMIZATION_LEVEL, self.optimization_level
            )));
        }
        self.noise.validate()
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> EgsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> EgsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> EgsResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| EgsError::FileError(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&text)?;
        log::debug!("Loaded bench config from {}", path.display());
        Ok(config)
    }

    /// Write to a JSON file
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> EgsResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .map_err(|e| EgsError::FileError(format!("{}: {}", path.display(), e)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let config = BenchConfig::default();
        assert_eq!(config.num_qubits, 10);
        assert_eq!(config.layers, 2);
        assert_eq!(config.shots, 8192);
        assert_eq!(config.seed, 42);
        assert_eq!(config.optimization_level, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            BenchConfig::quick().with_qubits(1).validate(),
            Err(EgsError::InvalidAnsatz(_))
        ));
        assert!(matches!(
            BenchConfig::quick().with_layers(0).validate(),
            Err(EgsError::InvalidAnsatz(_))
        ));
        assert!(matches!(
            BenchConfig::quick().with_layers(usize::MAX / 2).validate(),
            Err(EgsError::InvalidAnsatz(_))
        ));
        assert!(matches!(
            BenchConfig::quick().with_shots(0).validate(),
            Err(EgsError::ShotsOutOfRange(0, _, _))
        ));
        assert!(matches!(
            BenchConfig::quick().with_qubits(MAX_SIM_QUBITS + 1).validate(),
            Err(EgsError::ConfigError(_))
        ));
        assert!(matches!(
            BenchConfig::quick().with_optimization_level(4).validate(),
            Err(EgsError::ConfigError(_))
        ));
        assert!(BenchConfig::quick()
            .with_noise(ThermalNoiseModel::eagle_like().with_t2(500.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = BenchConfig::from_json(r#"{ "num_qubits": 6, "shots": 2048 }"#).unwrap();
        assert_eq!(config.num_qubits, 6);
        assert_eq!(config.shots, 2048);
        assert_eq!(config.layers, 2);
        assert_eq!(config.noise, ThermalNoiseModel::eagle_like());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = BenchConfig::quick().with_seed(7).with_optimization_level(1);
        let back = BenchConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("egs_bench_config_{}.json", std::process::id()));
        let config = BenchConfig::quick().with_layers(3);

        config.to_json_file(&path).unwrap();
        let loaded = BenchConfig::from_json_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = BenchConfig::from_json_file("/nonexistent/egs.json").unwrap_err();
        assert!(matches!(err, EgsError::FileError(_)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            BenchConfig::from_json("{ not json"),
            Err(EgsError::JsonError(_))
        ));
    }
}
