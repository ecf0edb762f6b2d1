//! EVM opcodes and mnemonics.
//!
//! This crate carries over the typed opcode vocabulary of a general-purpose EVM assembler,
//! trimmed to what the calldata JIT synthesiser actually needs: a [`Mnemonic`] for every
//! opcode the synthesiser can emit or reason about, and an [`OpCode`] wrapper that also
//! accepts bytes with no known mnemonic. It deliberately does not carry the const-generic
//! per-opcode instruction structs (`Push<N>`, `Dup<N>`, ...) of a full assembler: the
//! synthesiser builds pushes and dups from widths and stack depths computed at runtime, so a
//! plain `Mnemonic` plus a `Vec<u8>` immediate serves better than a 33-way static dispatch.

#![deny(unsafe_code)]

mod opcode;

pub use opcode::{Mnemonic, OpCode};
