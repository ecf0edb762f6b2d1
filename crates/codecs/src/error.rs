//! Error taxonomy for decompression failures.

use thiserror::Error;

/// Failure decoding a compressed calldata stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The stream ended in the middle of a literal run, a match offset, or a run-length pair.
    #[error("compressed stream ended unexpectedly")]
    Truncated,
}
