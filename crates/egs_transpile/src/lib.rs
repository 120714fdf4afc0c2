//! # EGS Transpile
//!
//! Pass-based circuit optimisation with Qiskit-style optimisation levels.
//!
//! ## Architecture
//!
//! ```text
//! egs_transpile // L5: Transpile
//!     Pass // trait: name(), run(&mut Circuit) -> changed
//!     passes
//!         RemoveIdentities // id, zero rotations
//!         CancelInverses // H·H, CX·CX, S·Sdg ...
//!         MergeRotations // rz(a)·rz(b) = rz(a+b)
//!         CommuteDiagonal // diagonal gates through CX controls
//!         BasisTranslation // {rz, sx, x, cx}
//!     TranspilerConfig // optimization_level, basis, max_iterations
//!     Transpiler // fixed-point pass manager
//!         transpile() -> TranspileOutput
//! ```
//!
//! | Level | Passes |
//! |-------|--------|
//! | 0 | none |
//! | 1 | RemoveIdentities, CancelInverses |
//! | 2 | + MergeRotations |
//! | 3 | + CommuteDiagonal |
//!
//! Barriers are never removed and no pass moves a gate across one.
//!
//! ## Quick Start
//!
//! ```rust
//! use egs_transpile::prelude::*;
//! use egs_core::CircuitBuilder;
//!
//! let circuit = CircuitBuilder::new(2)
//!     .h(0)
//!     .h(0)
//!     .rz(1, 0.2)
//!     .rz(1, 0.3)
//!     .cx(0, 1)
//!     .measure_all()
//!     .build();
//!
//! let output = Transpiler::with_level(3).transpile(&circuit).unwrap();
//! assert_eq!(output.circuit.count_1q(), 1);
//! println!("{}", output);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Pass trait and helpers (L5_Transpile → Pass)
pub mod pass;

/// Built-in passes (L5_Transpile → Passes)
pub mod passes;

/// Pass manager (L5_Transpile → Transpiler)
pub mod transpiler;

// ============================================================================
// Re-exports
// ============================================================================

pub use pass::{normalize_angle, Pass};
pub use passes::{BasisTranslation, CancelInverses, CommuteDiagonal, MergeRotations, RemoveIdentities};
pub use transpiler::{PassStats, TargetBasis, TranspileOutput, Transpiler, TranspilerConfig};

use egs_core::error::EgsResult;
use egs_core::Circuit;

/// Transpile at an optimisation level in the native basis
pub fn transpile(circuit: &Circuit, optimization_level: u8) -> EgsResult<Circuit> {
    Transpiler::with_level(optimization_level)
        .transpile(circuit)
        .map(|output| output.circuit)
}

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use egs_transpile::prelude::*;
    //! ```

    pub use crate::pass::Pass;
    pub use crate::passes::*;
    pub use crate::transpile;
    pub use crate::transpiler::{
        PassStats, TargetBasis, TranspileOutput, Transpiler, TranspilerConfig,
    };
}

// ============================================================================
// Integration Tests
// ============================================================================
