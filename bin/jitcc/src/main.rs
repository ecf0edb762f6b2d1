//! CLI front-end for the `eth_call` JIT calldata compressor and EVM mnemonic reference.

/// CLI arguments.
mod args;
/// Mnemonic utilities.
mod mnemonics;

use std::{
    fmt::Write as _,
    fs::File,
    io::{self, Read as _},
};

use anyhow::Context as _;
use asm::Mnemonic;
use clap::Parser as _;
use colored::Colorize as _;
use minus::Pager;
use strum::IntoEnumIterator as _;

use crate::{
    args::{Cli, Command},
    mnemonics::{get_mnemonic_by_name, MnemonicDescription},
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compress { file, algorithm } => compress(file, algorithm)?,
        Command::Mnemonics => list_mnemonics()?,
        Command::Mnemonic { name } => display_mnemonic_info_by_name(&name)?,
    }

    Ok(())
}

/// Reads a JSON-RPC payload from `file`, or from stdin when omitted.
fn read_payload(file: Option<std::path::PathBuf>) -> anyhow::Result<serde_json::Value> {
    let mut text = String::new();
    match file {
        Some(path) => {
            File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?
                .read_to_string(&mut text)
                .with_context(|| format!("failed to read {}", path.display()))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read payload from stdin")?;
        }
    }
    serde_json::from_str(&text).context("payload is not valid JSON")
}

/// Rewrites an `eth_call` JSON-RPC payload and prints the result.
fn compress(file: Option<std::path::PathBuf>, algorithm: Option<args::AlgorithmArg>) -> anyhow::Result<()> {
    let payload = read_payload(file)?;
    let hint = algorithm.map(rpc::Algorithm::from);

    let rewritten = rpc::compress_call(&payload, hint).context("failed to rewrite payload")?;

    if rewritten == payload {
        eprintln!("{}", "payload was not eligible for rewrite, or rewrite was not beneficial".yellow());
    }

    println!("{}", serde_json::to_string_pretty(&rewritten).context("failed to render rewritten payload")?);

    Ok(())
}

/// List a list of all mnemonics.
fn list_mnemonics() -> anyhow::Result<()> {
    let mut pager = Pager::new();

    for mnemonic in Mnemonic::iter() {
        writeln!(pager, "{}\n", mnemonic.format_human()).context("failed to write mnemonic info")?;
    }

    minus::page_all(pager).context("failed to display mnemonic info")?;

    Ok(())
}

/// Display information about a mnemonic by its name.
fn display_mnemonic_info_by_name(name: &str) -> anyhow::Result<()> {
    let mnemonic = get_mnemonic_by_name(name)?;
    println!("{}", mnemonic.format_human());

    Ok(())
}
