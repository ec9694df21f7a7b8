// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rrc-per
//!
//! ASN.1 Packed Encoding Rules (X.691) runtime for LTE RRC information
//! elements.
//!
//! The library is organized as:
//! - `core/` - errors, diagnostics counters and codec options
//! - `encoding/per/` - bit cursors and the PER primitives
//! - `encoding/json.rs` - JSON rendering of decoded elements
//! - `encoding/batch.rs` - parallel encode/decode of independent messages
//! - `ies/` - information elements and a name-based registry
//!
//! ## Example: encoding an information element
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rrc_per::encoding::per::{decode, encode};
//! use rrc_per::ies::PeriodicityStartPosR16;
//!
//! let bytes = encode(&PeriodicityStartPosR16::Periodicity20ms(1))?;
//! assert_eq!(bytes, vec![0x30]);
//! let value: PeriodicityStartPosR16 = decode(&bytes)?;
//! assert_eq!(value, PeriodicityStartPosR16::Periodicity20ms(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: decoding with the aligned variant
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rrc_per::core::{PerOptions, PerVariant};
//! use rrc_per::encoding::per::{decode_with, encode_with, DynOctString};
//!
//! let opts = PerOptions::default().with_variant(PerVariant::Aligned);
//! let value: DynOctString = "c0ffee".parse()?;
//! let bytes = encode_with(&value, &opts)?;
//! assert_eq!(decode_with::<DynOctString>(&bytes, &opts)?, value);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{CodecError, Diagnostics, ErrorCode, PerOptions, PerVariant, Result};

// Encoding/decoding
pub mod encoding;

pub use encoding::per::{decode, encode, BitCursor, BitWriter, PerDecode, PerEncode};

// Information elements
pub mod ies;

pub use ies::{global_registry, IeRegistry};
