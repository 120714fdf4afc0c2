//! # EGS Bench
//!
//! Standard vs entropic gate scheduling benchmarks.
//!
//! ## Architecture
//!
//! ```text
//! egs_bench // L8: Benchmark
//!     BenchConfig // qubits, layers, shots, seed, level, noise
//!         from_json_file(), validate()
//!     EgsBenchmark // params → build → transpile → execute
//!         run() -> BenchmarkResult
//!     BenchSuite // repeated runs
//!         run_single(), run_qubit_scaling(), run_layer_scaling()
//!         statistics() -> BenchmarkStatistics
//!     Reporter // Markdown, JSON, CSV, Text
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use egs_bench::prelude::*;
//!
//! let config = BenchConfig::quick().with_shots(256);
//! let result = EgsBenchmark::run(&config).unwrap();
//!
//! assert!(result.depth_egs() < result.depth_std());
//! println!("{}", result.summary());
//! ```
//!
//! ## Scaling Suite
//!
//! ```rust
//! use egs_bench::prelude::*;
//!
//! let mut suite = BenchSuite::with_config(BenchConfig::quick().with_shots(128));
//! suite.run_qubit_scaling(4).unwrap();
//!
//! let stats = suite.statistics();
//! println!("Average improvement: {:+.2}%", stats.avg_gain_percent);
//! println!("{}", Reporter::report(suite.results(), ReportFormat::Markdown));
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Benchmark configuration (L8_Benchmark → BenchConfig)
pub mod config;

/// Single comparison runner (L8_Benchmark → EgsBenchmark)
pub mod benchmark;

/// Benchmark suite (L8_Benchmark → BenchSuite)
pub mod suite;

/// Reporting (L8_Benchmark → Reporter)
pub mod reporter;

// ============================================================================
// Re-exports
// ============================================================================

pub use benchmark::{BenchmarkResult, EgsBenchmark, OrderingMetrics};
pub use config::BenchConfig;
pub use reporter::{ReportFormat, Reporter};
pub use suite::{BenchSuite, BenchmarkStatistics};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use egs_bench::prelude::*;
    //! ```

    pub use crate::benchmark::{BenchmarkResult, EgsBenchmark, OrderingMetrics};
    pub use crate::config::BenchConfig;
    pub use crate::reporter::{ReportFormat, Reporter};
    pub use crate::suite::{BenchSuite, BenchmarkStatistics};
}

// ============================================================================
// Integration Tests
// ============================================================================
