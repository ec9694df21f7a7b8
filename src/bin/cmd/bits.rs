// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bits command - show a hex string bit by bit.

use clap::Args;

use crate::common::{format_bits, parse_hex, Result};

/// Print the bits of hex bytes, MSB first.
#[derive(Args, Clone, Debug)]
pub struct BitsCmd {
    /// Bytes as hex
    #[arg(value_name = "HEX")]
    hex: String,

    /// Number of bits to show (defaults to all)
    #[arg(short, long)]
    len: Option<usize>,
}

impl BitsCmd {
    pub fn run(self) -> Result<()> {
        let data = parse_hex(&self.hex)?;
        let n_bits = self.len.unwrap_or(data.len() * 8);
        if n_bits > data.len() * 8 {
            anyhow::bail!(
                "Requested {n_bits} bits but the input has only {}",
                data.len() * 8
            );
        }
        println!("{}", format_bits(&data, n_bits));
        Ok(())
    }
}
