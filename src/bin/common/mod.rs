// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use rrc_per::core::{PerOptions, PerVariant};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Parse a hex string; whitespace, `:` separators and a `0x` prefix are allowed.
pub fn parse_hex(s: &str) -> CliResult<Vec<u8>> {
    let trimmed = s.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let cleaned: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(&cleaned).map_err(|e| anyhow::anyhow!("Invalid hex input '{s}': {e}"))
}

/// Render the first `n_bits` bits of `data`, MSB first, in groups of eight.
pub fn format_bits(data: &[u8], n_bits: usize) -> String {
    let mut out = String::with_capacity(n_bits + n_bits / 8);
    for i in 0..n_bits.min(data.len() * 8) {
        if i > 0 && i % 8 == 0 {
            out.push(' ');
        }
        let bit = data[i / 8] >> (7 - i % 8) & 1;
        out.push(if bit == 1 { '1' } else { '0' });
    }
    out
}

/// Codec options for a CLI variant flag.
pub fn options(variant: PerVariant) -> PerOptions {
    PerOptions::default().with_variant(variant)
}
