// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - JSON to PER bytes.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::common::{options, Result};
use rrc_per::core::PerVariant;
use rrc_per::global_registry;

/// Encode an information element given as JSON.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Information element name (see `rrc-per list`)
    #[arg(value_name = "IE")]
    ie: String,

    /// JSON value; omit when reading from --file
    #[arg(value_name = "JSON", required_unless_present = "file")]
    json: Option<String>,

    /// Read the JSON value from a file
    #[arg(short, long, conflicts_with = "json")]
    file: Option<PathBuf>,

    /// PER variant (uper or aper)
    #[arg(long, default_value = "uper")]
    variant: PerVariant,
}

impl EncodeCmd {
    pub fn run(self) -> Result<()> {
        let json = match (self.json, self.file) {
            (Some(json), _) => json,
            (None, Some(path)) => fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?,
            (None, None) => anyhow::bail!("No JSON input given"),
        };
        let codec = global_registry().get(&self.ie)?;
        let bytes = codec.encode_json(&json, &options(self.variant))?;
        println!("{}", hex::encode(bytes));
        Ok(())
    }
}
