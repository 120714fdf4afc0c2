//! Optimisation-level driven transpiler
//!
//! Layer: L5_Transpile → Transpiler

use crate::pass::Pass;
use crate::passes::{
    BasisTranslation, CancelInverses, CommuteDiagonal, MergeRotations, RemoveIdentities,
};
use egs_core::bench::DEFAULT_OPTIMIZATION_LEVEL;
use egs_core::error::{EgsError, EgsResult};
use egs_core::Circuit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest supported optimisation level
pub const MAX_OPTIMIZATION_LEVEL: u8 = 3;

/// Default bound on fixed-point iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

// ============================================================================
// Configuration
// ============================================================================

/// Gate set the output circuit is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetBasis {
    /// Keep the gates the circuit was written in
    #[default]
    Native,

    /// IBM `{rz, sx, x, cx}`
    Ibm,
}

/// Transpiler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranspilerConfig {
    /// Optimization level (0-3)
    pub optimization_level: u8,

    /// Output gate set
    pub basis: TargetBasis,

    /// Upper bound on optimisation rounds
    pub max_iterations: usize,
}

impl Default for TranspilerConfig {
    fn default() -> Self {
        Self {
            optimization_level: DEFAULT_OPTIMIZATION_LEVEL,
            basis: TargetBasis::Native,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl TranspilerConfig {
    /// Config for an optimisation level, everything else default
    pub fn level(level: u8) -> Self {
        Self::default().with_optimization_level(level)
    }

    /// Set optimization level (clamped to 3)
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(MAX_OPTIMIZATION_LEVEL);
        self
    }

    /// Set output basis
    pub fn with_basis(mut self, basis: TargetBasis) -> Self {
        self.basis = basis;
        self
    }

    /// Set iteration bound (at least one round)
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }
}

// ============================================================================
// Output
// ============================================================================

/// Per-pass counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    /// Pass name
    pub name: String,
    /// Times the pass ran
    pub runs: usize,
    /// Times the pass changed the circuit
    pub changes: usize,
}

/// Compiled circuit with statistics
#[derive(Debug, Clone)]
pub struct TranspileOutput {
    /// Compiled circuit
    pub circuit: Circuit,
    /// Counters, in pass order
    pub pass_stats: Vec<PassStats>,
    /// Optimisation rounds performed
    pub iterations: usize,
    /// Depth of the input
    pub depth_before: usize,
    /// Depth of the output
    pub depth_after: usize,
    /// Instruction count of the input
    pub gates_before: usize,
    /// Instruction count of the output
    pub gates_after: usize,
}

impl TranspileOutput {
    /// Depth saved by compilation
    pub fn depth_saved(&self) -> isize {
        self.depth_before as isize - self.depth_after as isize
    }

    /// Instructions removed by compilation
    pub fn gates_saved(&self) -> isize {
        self.gates_before as isize - self.gates_after as isize
    }
}

impl fmt::Display for TranspileOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Transpiled in {} round(s): depth {} -> {}, gates {} -> {}",
            self.iterations, self.depth_before, self.depth_after, self.gates_before, self.gates_after
        )?;
        for stats in &self.pass_stats {
            writeln!(f, "  {:<18} runs={:<3} changes={}", stats.name, stats.runs, stats.changes)?;
        }
        Ok(())
    }
}

// ============================================================================
// Transpiler
// ============================================================================

/// Pass manager
pub struct Transpiler {
    config: TranspilerConfig,
    translation: Option<Box<dyn Pass>>,
    passes: Vec<Box<dyn Pass>>,
}

impl Transpiler {
    /// Create new transpiler
    pub fn new(config: TranspilerConfig) -> Self {
        let level = config.optimization_level.min(MAX_OPTIMIZATION_LEVEL);

        let mut passes: Vec<Box<dyn Pass>> = Vec::new();
        if level >= 1 {
            passes.push(Box::new(RemoveIdentities));
            passes.push(Box::new(CancelInverses));
        }
        if level >= 2 {
            passes.push(Box::new(MergeRotations));
        }
        if level >= 3 {
            passes.push(Box::new(CommuteDiagonal));
        }

        let translation: Option<Box<dyn Pass>> = match config.basis {
            TargetBasis::Native => None,
            TargetBasis::Ibm => Some(Box::new(BasisTranslation)),
        };

        Self {
            config,
            translation,
            passes,
        }
    }

    /// Transpiler for an optimisation level
    pub fn with_level(level: u8) -> Self {
        Self::new(TranspilerConfig::level(level))
    }

    /// Get config
    pub fn config(&self) -> &TranspilerConfig {
        &self.config
    }

    /// Names of the optimisation passes, in run order
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Compile a circuit
    ///
    /// Basis translation (if any) runs once, then the optimisation passes
    /// repeat until a full round changes nothing or `max_iterations` is hit.
    pub fn transpile(&self, circuit: &Circuit) -> EgsResult<TranspileOutput> {
        let mut working = circuit.clone();
        let mut stats: Vec<PassStats> = Vec::new();

        if let Some(pass) = &self.translation {
            let changed = pass.run(&mut working)?;
            stats.push(PassStats {
                name: pass.name().to_string(),
                runs: 1,
                changes: usize::from(changed),
            });
            Self::verify(pass.name(), circuit, &working)?;
        }

        let offset = stats.len();
        stats.extend(self.passes.iter().map(|p| PassStats {
            name: p.name().to_string(),
            runs: 0,
            changes: 0,
        }));

        let mut iterations = 0;
        while !self.passes.is_empty() && iterations < self.config.max_iterations.max(1) {
            iterations += 1;
            let mut round_changed = false;

            for (idx, pass) in self.passes.iter().enumerate() {
                let changed = pass.run(&mut working)?;
                Self::verify(pass.name(), circuit, &working)?;

                let entry = &mut stats[offset + idx];
                entry.runs += 1;
                if changed {
                    entry.changes += 1;
                    round_changed = true;
                    log::debug!(
                        "{} changed circuit (round {}, {} gates)",
                        pass.name(),
                        iterations,
                        working.gate_count()
                    );
                }
            }

            if !round_changed {
                break;
            }
        }

        if let Some(name) = circuit.name() {
            working.set_name(name);
        }

        let output = TranspileOutput {
            depth_before: circuit.depth(),
            depth_after: working.depth(),
            gates_before: circuit.gate_count(),
            gates_after: working.gate_count(),
            circuit: working,
            pass_stats: stats,
            iterations,
        };

        log::info!(
            "Transpiled {} at level {}: depth {} -> {}, gates {} -> {}",
            circuit.name().unwrap_or("circuit"),
            self.config.optimization_level,
            output.depth_before,
            output.depth_after,
            output.gates_before,
            output.gates_after
        );

        Ok(output)
    }

    /// Structural guarantees every pass must keep
    fn verify(pass: &str, original: &Circuit, rewritten: &Circuit) -> EgsResult<()> {
        let fail = |reason: String| EgsError::PassFailed {
            pass: pass.to_string(),
            reason,
        };

        if rewritten.num_qubits() != original.num_qubits() {
            return Err(fail(format!(
                "qubit count changed from {} to {}",
                original.num_qubits(),
                rewritten.num_qubits()
            )));
        }
        if rewritten.count_measurements() != original.count_measurements() {
            return Err(fail(format!(
                "measurement count changed from {} to {}",
                original.count_measurements(),
                rewritten.count_measurements()
            )));
        }
        if rewritten.count_barriers() != original.count_barriers() {
            return Err(fail(format!(
                "barrier count changed from {} to {}",
                original.count_barriers(),
                rewritten.count_barriers()
            )));
        }
        Ok(())
    }
}

impl Default for Transpiler {
    fn default() -> Self {
        Self::new(TranspilerConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use egs_core::CircuitBuilder;

    #[test]
    fn test_level_selects_passes() {
        assert!(Transpiler::with_level(0).pass_names().is_empty());
        assert_eq!(
            Transpiler::with_level(1).pass_names(),
            vec!["remove_identities", "cancel_inverses"]
        );
        assert_eq!(Transpiler::with_level(2).pass_names().len(), 3);
        assert_eq!(
            Transpiler::with_level(9).pass_names(),
            vec!["remove_identities", "cancel_inverses", "merge_rotations", "commute_diagonal"]
        );
        assert_eq!(TranspilerConfig::level(7).optimization_level, 3);
    }

    #[test]
    fn test_level_zero_is_identity() {
        let circuit = CircuitBuilder::new(1).h(0).h(0).build();
        let out = Transpiler::with_level(0).transpile(&circuit).unwrap();
        assert_eq!(out.circuit.gates(), circuit.gates());
        assert_eq!(out.iterations, 0);
    }

    #[test]
    fn test_cascading_simplification() {
        // rz(a) cx rz(-a) cx → commute, merge to zero, then cx·cx cancels
        let circuit = CircuitBuilder::new(2)
            .rz(0, 0.4)
            .cx(0, 1)
            .rz(0, -0.4)
            .cx(0, 1)
            .measure_all()
            .build();

        let level2 = Transpiler::with_level(2).transpile(&circuit).unwrap();
        assert_eq!(level2.circuit.count_2q(), 2);

        let level3 = Transpiler::with_level(3).transpile(&circuit).unwrap();
        assert_eq!(level3.circuit.count_2q(), 0);
        assert_eq!(level3.circuit.count_measurements(), 2);
        assert!(level3.depth_after < level3.depth_before);
        assert!(level3.iterations >= 2);
    }

    #[test]
    fn test_pass_stats_recorded() {
        let circuit = CircuitBuilder::new(1).x(0).x(0).id(0).build();
        let out = Transpiler::with_level(1).transpile(&circuit).unwrap();

        assert!(out.circuit.is_empty());
        let cancel = out.pass_stats.iter().find(|s| s.name == "cancel_inverses").unwrap();
        assert_eq!(cancel.changes, 1);
        assert_eq!(cancel.runs, out.iterations);
        assert_eq!(out.gates_saved(), 3);
    }

    #[test]
    fn test_ibm_basis_output() {
        let circuit = CircuitBuilder::new(2).h(0).cz(0, 1).ry(1, 0.3).measure_all().build();
        let config = TranspilerConfig::level(3).with_basis(TargetBasis::Ibm);
        let out = Transpiler::new(config).transpile(&circuit).unwrap();

        assert_eq!(out.pass_stats[0].name, "basis_translation");
        assert!(out
            .circuit
            .gates()
            .iter()
            .all(crate::passes::BasisTranslation::is_native));
    }

    #[test]
    fn test_empty_circuit() {
        let out = Transpiler::default().transpile(&Circuit::new(3)).unwrap();
        assert!(out.circuit.is_empty());
        assert_eq!(out.depth_after, 0);
        assert_eq!(out.circuit.num_qubits(), 3);
    }

    #[test]
    fn test_name_preserved() {
        let mut circuit = CircuitBuilder::new(1).h(0).build();
        circuit.set_name("bell");
        let out = Transpiler::default().transpile(&circuit).unwrap();
        assert_eq!(out.circuit.name(), Some("bell"));
    }

    #[test]
    fn test_config_serde() {
        let config = TranspilerConfig::level(2).with_basis(TargetBasis::Ibm);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"ibm\""));
        let back: TranspilerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
