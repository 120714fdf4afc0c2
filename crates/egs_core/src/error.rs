//! Error types for EGS
//!
//! Layer: L0_Foundation → Errors
//!
//! Single error enum shared by every EGS crate.

#![allow(missing_docs)]

use thiserror::Error;

/// Error shared by the EGS crates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EgsError {
    // ========================================================================
    // Validation
    // ========================================================================
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// Circuit wider than the backend it targets
    #[error("{requested} qubits requested, backend has {available}")]
    TooManyQubits { requested: usize, available: usize },

    /// T2 above the physical limit 2·T1
    #[error("T2 of {t2_us:.2} µs exceeds twice T1 of {t1_us:.2} µs")]
    InvalidT2 { t2_us: f64, t1_us: f64 },

    #[error("'{0}' is not a bitstring of '0' and '1'")]
    InvalidBitstring(String),

    #[error("non-finite rotation angle {0}")]
    InvalidAngle(f64),

    // ========================================================================
    // Circuits and ansatz
    // ========================================================================
    /// Operand past the circuit width
    #[error("qubit {qubit} used on a {num_qubits}-qubit circuit")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    /// Two-qubit gate with identical operands
    #[error("{gate} uses qubit {qubit} as both operands")]
    DuplicateQubit { gate: String, qubit: usize },

    #[error("cannot parse OpenQASM: {0}")]
    InvalidQasm(String),

    #[error("unsupported ansatz shape: {0}")]
    InvalidAnsatz(String),

    #[error("ansatz consumes {needed} parameters, only {got} supplied")]
    InsufficientParameters { needed: usize, got: usize },

    // ========================================================================
    // Noise, compilation, execution
    // ========================================================================
    #[error("noise model: {0}")]
    NoiseModelError(String),

    /// Pass broke a circuit invariant or could not run
    #[error("pass {pass}: {reason}")]
    PassFailed { pass: String, reason: String },

    #[error("backend: {0}")]
    BackendError(String),

    /// `(shots, min, max)`
    #[error("{0} shots requested, allowed {1}..={2}")]
    ShotsOutOfRange(u64, u64, u64),

    // ========================================================================
    // Configuration and files
    // ========================================================================
    #[error("config: {0}")]
    ConfigError(String),

    #[error("json: {0}")]
    JsonError(String),

    #[error("io: {0}")]
    FileError(String),
}

/// Result type alias for EGS operations
pub type EgsResult<T> = Result<T, EgsError>;

// ============================================================================
// Conversions
// ============================================================================

impl From<serde_json::Error> for EgsError {
    fn from(err: serde_json::Error) -> Self {
        EgsError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for EgsError {
    fn from(err: std::io::Error) -> Self {
        EgsError::FileError(err.to_string())
    }
}

// ============================================================================
// Classification
// ============================================================================

impl EgsError {
    /// Bad input value or configuration
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            EgsError::InvalidProbability(_)
                | EgsError::TooManyQubits { .. }
                | EgsError::InvalidT2 { .. }
                | EgsError::InvalidBitstring(_)
                | EgsError::InvalidAngle(_)
                | EgsError::ConfigError(_)
        )
    }

    /// Malformed circuit or ansatz request
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            EgsError::GateQubitMismatch { .. }
                | EgsError::DuplicateQubit { .. }
                | EgsError::InvalidQasm(_)
                | EgsError::InvalidAnsatz(_)
                | EgsError::InsufficientParameters { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EgsError::InvalidProbability(1.5).to_string(),
            "probability 1.5 is outside [0, 1]"
        );
        assert_eq!(
            EgsError::InvalidT2 { t2_us: 300.0, t1_us: 120.0 }.to_string(),
            "T2 of 300.00 µs exceeds twice T1 of 120.00 µs"
        );
        assert_eq!(
            EgsError::ShotsOutOfRange(0, 1, 100_000).to_string(),
            "0 shots requested, allowed 1..=100000"
        );
    }

    #[test]
    fn test_insufficient_parameters_display() {
        let err = EgsError::InsufficientParameters { needed: 38, got: 10 };
        let msg = err.to_string();
        assert!(msg.contains("38"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_error_classification() {
        assert!(EgsError::InvalidProbability(1.5).is_validation_error());
        assert!(!EgsError::BackendError("test".into()).is_validation_error());
        assert!(EgsError::InvalidAnsatz("1 qubit".into()).is_circuit_error());
        assert!(!EgsError::ShotsOutOfRange(0, 1, 10).is_circuit_error());
    }

    #[test]
    fn test_json_conversion() {
        let err: EgsError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, EgsError::JsonError(_)));
    }
}
