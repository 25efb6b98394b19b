//! Diagnostic binary for the `elemfrag` codec.
//!
//! Parses CLI arguments, runs one codec operation on hex input, and prints
//! the outcome.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use elemfrag::{
    config,
    fragment::{CodecError, UnitKind, decode_sequence, encode_sequence, plan, scan},
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[derive(Debug, Error)]
enum AppError {
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

fn run(command: Command) -> Result<String, AppError> {
    match command {
        Command::Plan { kind, id, len } => {
            let requirement = plan(UnitKind::from(kind.kind), id, len);
            if requirement.is_required() {
                Ok(format!(
                    "fragmentation required: total_len={} lead_bytes={} max_size_fragments={} \
                     trailing_fragment_len={} extra_header_bytes={}",
                    requirement.total_len(),
                    requirement.lead_bytes(),
                    requirement.max_size_fragments(),
                    requirement.trailing_fragment_len(),
                    requirement.extra_header_bytes(),
                ))
            } else {
                Ok(format!(
                    "fragmentation not required: unit_len={}",
                    requirement.total_len()
                ))
            }
        }
        Command::Build {
            kind,
            id,
            ext,
            payload,
        } => {
            let payload = hex::decode(payload.trim())?;
            let sequence = encode_sequence(UnitKind::from(kind.kind), id, ext, &payload)?;
            Ok(hex::encode(sequence))
        }
        Command::Scan { kind, buffer } => {
            let buffer = hex::decode(buffer.trim())?;
            let scanned = scan(UnitKind::from(kind.kind), &buffer)?;
            Ok(format!(
                "fragment_sequence={} total_len={} payload_len={}",
                scanned.is_fragment_sequence(),
                scanned.total_len(),
                scanned.payload_len(),
            ))
        }
        Command::Defrag { kind, buffer } => {
            let buffer = hex::decode(buffer.trim())?;
            let payload = decode_sequence(UnitKind::from(kind.kind), &buffer)?;
            Ok(hex::encode(payload))
        }
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the result.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
