// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod bits;
mod decode;
mod encode;
mod list;

pub use bits::BitsCmd;
pub use decode::DecodeCmd;
pub use encode::EncodeCmd;
pub use list::ListCmd;
