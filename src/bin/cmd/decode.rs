// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - PER bytes to JSON.

use clap::Args;

use crate::common::{options, parse_hex, Result};
use rrc_per::core::PerVariant;
use rrc_per::global_registry;

/// Decode an information element from hex bytes.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Information element name (see `rrc-per list`)
    #[arg(value_name = "IE")]
    ie: String,

    /// Encoded bytes as hex
    #[arg(value_name = "HEX")]
    hex: String,

    /// PER variant (uper or aper)
    #[arg(long, default_value = "uper")]
    variant: PerVariant,
}

impl DecodeCmd {
    pub fn run(self) -> Result<()> {
        let data = parse_hex(&self.hex)?;
        let codec = global_registry().get(&self.ie)?;
        let json = codec.decode_json(&data, &options(self.variant))?;
        println!("{json}");
        Ok(())
    }
}
