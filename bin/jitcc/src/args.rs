use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Utility for exercising the `eth_call` JIT calldata compressor and inspecting EVM mnemonics.
#[derive(Parser)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rewrite an `eth_call` JSON-RPC payload, read from a file or stdin.
    Compress {
        /// Path to the JSON-RPC payload. Reads stdin when omitted.
        file: Option<PathBuf>,
        /// Force a specific compression path instead of letting size drive the choice.
        #[arg(long)]
        algorithm: Option<AlgorithmArg>,
    },
    /// List all EVM mnemonics.
    Mnemonics,
    /// Get information about a specific mnemonic.
    Mnemonic {
        /// Mnemonic name, case-insensitive (e.g. `PUSH1`, `dup3`).
        name: String,
    },
}

/// Mirrors [`rpc::Algorithm`] as a `clap`-friendly value so the rewriter crate doesn't need a
/// `clap` dependency of its own.
#[derive(Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    /// Synthesise a bespoke reconstruction contract.
    Jit,
    /// Forward through the fixed FastLZ-style decompressor template.
    Flz,
    /// Forward through the fixed run-length decompressor template.
    Cd,
}

impl From<AlgorithmArg> for rpc::Algorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Jit => rpc::Algorithm::Jit,
            AlgorithmArg::Flz => rpc::Algorithm::Flz,
            AlgorithmArg::Cd => rpc::Algorithm::Cd,
        }
    }
}
