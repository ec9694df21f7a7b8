// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message encoding/decoding.
//!
//! - [`per`] - Packed Encoding Rules primitives and codec traits
//! - [`json`] - JSON rendering of decoded elements
//! - [`batch`] - Parallel processing of independent messages

pub mod batch;
pub mod json;
pub mod per;

pub use batch::{decode_batch, encode_batch, BatchConfig};
pub use json::{to_json_string, JsonWriter, ToJson};
pub use per::{decode, decode_with, encode, encode_with, BitCursor, BitWriter, PerDecode, PerEncode};
