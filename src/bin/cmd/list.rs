// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! List command - show the registered information elements.

use clap::Args;

use crate::common::Result;
use rrc_per::global_registry;

/// List registered information elements.
#[derive(Args, Clone, Debug)]
pub struct ListCmd {
    /// Also show the ASN.1 type names
    #[arg(short, long)]
    verbose: bool,
}

impl ListCmd {
    pub fn run(self) -> Result<()> {
        for (name, asn1_type) in global_registry().list()? {
            if self.verbose {
                println!("{name:<32} {asn1_type}");
            } else {
                println!("{name}");
            }
        }
        Ok(())
    }
}
