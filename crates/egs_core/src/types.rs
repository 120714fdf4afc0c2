//! Core types for EGS
//!
//! Layer: L0_Foundation → CoreTypes
//!
//! Type aliases and validated wrappers used throughout the EGS crates.

use crate::error::{EgsError, EgsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
pub type QubitId = usize;

/// Rotation angle in radians
pub type Angle = f64;

/// Measurement counts: bitstring -> count
pub type Counts = HashMap<String, u64>;

/// Parameter vector for variational circuits
pub type ParamVec = Vec<f64>;

// ============================================================================
// Probability
// ============================================================================

/// A value in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    /// Impossible event
    pub const ZERO: Self = Self(0.0);

    /// Certain event
    pub const ONE: Self = Self(1.0);

    /// Validate `value`; NaN and anything outside `[0, 1]` is rejected
    pub fn new(value: f64) -> EgsResult<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(EgsError::InvalidProbability(value))
        }
    }

    /// Relative frequency `count / total` (zero when `total` is zero)
    pub fn from_frequency(count: u64, total: u64) -> Self {
        if total == 0 {
            Self::ZERO
        } else {
            Self(count.min(total) as f64 / total as f64)
        }
    }

    /// Raw value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// `1 - p`
    #[inline]
    pub fn complement(self) -> f64 {
        1.0 - self.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = EgsError;

    fn try_from(value: f64) -> EgsResult<Self> {
        Self::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> f64 {
        p.0
    }
}

// ============================================================================
// Bitstring
// ============================================================================

/// Computational basis state of `width` qubits
///
/// Formats with qubit 0 as the rightmost character, as Qiskit counts do.
/// Widths up to the pointer size are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bitstring {
    index: usize,
    width: usize,
}

impl Bitstring {
    /// Basis state `index` over `width` qubits; bits above `width` are dropped
    pub fn from_index(index: usize, width: usize) -> Self {
        let mask = if width >= usize::BITS as usize {
            usize::MAX
        } else {
            (1usize << width) - 1
        };
        Self {
            index: index & mask,
            width,
        }
    }

    /// Number of qubits
    pub fn len(&self) -> usize {
        self.width
    }

    /// Zero-width state
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Hamming weight
    pub fn popcount(&self) -> usize {
        self.index.count_ones() as usize
    }

    /// Value of `qubit`, `None` past the width
    pub fn qubit(&self, qubit: QubitId) -> Option<bool> {
        (qubit < self.width).then(|| (self.index >> qubit) & 1 == 1)
    }

    /// Basis-state index
    pub fn to_usize(&self) -> usize {
        self.index
    }
}

impl FromStr for Bitstring {
    type Err = EgsError;

    fn from_str(s: &str) -> EgsResult<Self> {
        if s.len() > usize::BITS as usize {
            return Err(EgsError::InvalidBitstring(s.to_string()));
        }
        let index = s.chars().try_fold(0usize, |acc, c| match c {
            '0' => Ok(acc << 1),
            '1' => Ok((acc << 1) | 1),
            _ => Err(EgsError::InvalidBitstring(s.to_string())),
        })?;
        Ok(Self {
            index,
            width: s.len(),
        })
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        write!(f, "{:0width$b}", self.index, width = self.width)
    }
}

// ============================================================================
// Tests
// ============================================================================
