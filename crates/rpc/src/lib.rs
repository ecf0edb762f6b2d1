//! `eth_call` JSON-RPC payload rewriter.
//!
//! Validates eligibility, selects among the JIT synthesiser and the two codec-backed compression
//! paths, and substitutes a rewritten payload that targets a fixed decompressor address with a
//! state override supplying the chosen bytecode.

#![deny(unsafe_code)]

mod algorithm;
pub mod config;
mod eligibility;
mod error;
mod payload;
mod rewrite;

pub use algorithm::Algorithm;
pub use error::{Ineligibility, RewriteError};
pub use rewrite::compress_call;
