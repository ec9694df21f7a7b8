// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rrc-per CLI
//!
//! Command-line tool for PER-encoded LTE RRC information elements.
//!
//! ## Usage
//!
//! ```sh
//! # List the known information elements
//! rrc-per list
//!
//! # Decode hex bytes to JSON
//! rrc-per decode periodicity_start_pos_r16 30
//!
//! # Encode JSON to hex bytes
//! rrc-per encode periodicity_start_pos_r16 '{"periodicity20ms": 1}'
//!
//! # Show the bits of a hex string
//! rrc-per bits 0082 --len 13
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{BitsCmd, DecodeCmd, EncodeCmd, ListCmd};
use common::Result;

/// rrc-per - PER codec for LTE RRC information elements
#[derive(Parser, Clone)]
#[command(name = "rrc-per")]
#[command(about = "Encode and decode LTE RRC information elements with ASN.1 PER", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// List the information elements known to the registry
    List(ListCmd),

    /// Decode hex bytes into JSON
    Decode(DecodeCmd),

    /// Encode JSON into hex bytes
    Encode(EncodeCmd),

    /// Print the bits of a hex string
    Bits(BitsCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List(cmd) => cmd.run(),
        Commands::Decode(cmd) => cmd.run(),
        Commands::Encode(cmd) => cmd.run(),
        Commands::Bits(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
