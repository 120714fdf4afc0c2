//! # EGS Core
//!
//! Core types, gates, circuits and errors for Entropic Gate Scheduling.
//!
//! ## Architecture
//!
//! ```text
//! egs_core // L0+L1: Foundation + Circuit
//!     L0_Foundation
//!         CoreTypes // QubitId, Probability, Bitstring
//!         Constants // physics + benchmark defaults
//!         Errors // EgsError shared by every crate
//!     L1_Circuit
//!         Gate // gate enum
//!         Circuit // instruction list + analysis + QASM
//!         CircuitBuilder // fluent builder
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use egs_core::prelude::*;
//!
//! let circuit = CircuitBuilder::new(3)
//!     .h(0)
//!     .cnot(0, 1)
//!     .cnot(1, 2)
//!     .measure_all()
//!     .build();
//!
//! assert_eq!(circuit.depth(), 4);
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Layered Construction
//!
//! ```rust
//! use egs_core::prelude::*;
//!
//! let circuit = CircuitBuilder::new(4)
//!     .h_layer()
//!     .barrier_all()
//!     .rz_layer(1, &[0.1, 0.2, 0.3])
//!     .barrier_all()
//!     .cx_chain()
//!     .build();
//!
//! assert_eq!(circuit.count_2q(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (L0_Foundation → CoreTypes)
pub mod types;

/// Constants (L0_Foundation → Constants)
pub mod constants;

/// Error types (L0_Foundation → Errors)
pub mod error;

/// Quantum gates (L1_Circuit → Gate)
pub mod gate;

/// Circuit structure (L1_Circuit → Circuit)
pub mod circuit;

/// Circuit builder (L1_Circuit → CircuitBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use constants::{bench, physics};
pub use error::{EgsError, EgsResult};
pub use gate::Gate;
pub use types::{Angle, Bitstring, Counts, ParamVec, Probability, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use egs_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::constants::{bench, physics};
    pub use crate::error::{EgsError, EgsResult};
    pub use crate::gate::Gate;
    pub use crate::types::{Angle, Bitstring, Counts, ParamVec, Probability, QubitId};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
