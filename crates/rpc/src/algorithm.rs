//! Compression path selection.

use crate::config::{JIT_LOWER_BOUND_HEX_LEN, JIT_UPPER_BOUND_HEX_LEN};

/// Which of the three compression paths produced (or should produce) a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Synthesise a bespoke reconstruction contract.
    Jit,
    /// Forward through the fixed FastLZ-style decompressor template.
    Flz,
    /// Forward through the fixed run-length decompressor template.
    Cd,
}

/// Picks an algorithm for `data_hex_len` when the caller didn't supply a hint: outside the
/// `[JIT_LOWER_BOUND_HEX_LEN, JIT_UPPER_BOUND_HEX_LEN)` band JIT wins outright; within the band,
/// the caller must actually run both compressors and compare, which [`crate::rewrite`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Use JIT without running the other two compressors.
    Jit,
    /// Run both FLZ and CD and keep the shorter.
    CompareFlzAndCd,
}

/// Determines the selection strategy for a given input size, absent a caller-supplied hint.
#[must_use]
pub fn select(data_hex_len: usize) -> Selection {
    if data_hex_len < JIT_LOWER_BOUND_HEX_LEN || data_hex_len >= JIT_UPPER_BOUND_HEX_LEN {
        Selection::Jit
    } else {
        Selection::CompareFlzAndCd
    }
}
