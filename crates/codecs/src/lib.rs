//! Concrete FastLZ-style and run-length calldata codecs, plus their paired forwarder bytecodes.
//!
//! This crate is architecturally decoupled from the synthesiser: nothing here calls into
//! `jitcc-synth`, and `jitcc-synth` never calls into this crate. The rewriter crate is the only
//! caller that reaches into both.

#![deny(unsafe_code)]

mod decoder_asm;
mod error;
mod flz;
mod forwarder;
mod rle;

pub use error::CodecError;
pub use flz::{flz_compress, flz_decompress};
pub use forwarder::{cd_forwarder_template, flz_forwarder_template, ForwarderTemplate};
pub use rle::{cd_compress, cd_decompress};
