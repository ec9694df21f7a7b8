// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! BIT STRING (X.691 §16).
//!
//! Bits are stored little-endian by index: bit 0 is the least significant
//! bit of the first octet and is the *last* bit on the wire. The textual
//! form lists bits from the highest index down, so `"1010"` is the number 10.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{error, warn};

use super::codec::{PerDecode, PerEncode};
use super::cursor::BitCursor;
use super::length::{pack_constrained_length, pack_length, unpack_constrained_length, unpack_length};
use super::writer::BitWriter;
use crate::core::diagnostics::LOG_TARGET;
use crate::core::{CodecError, ErrorCode, Result as CoreResult};
use crate::encoding::json::{JsonWriter, ToJson};

/// Upper bound of a SIZE constraint without an upper limit.
pub const UNBOUNDED: usize = usize::MAX;

/// BIT STRING (SIZE(LB..UB)), extensible when `EXT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString<const LB: usize, const UB: usize, const EXT: bool> {
    octets: Vec<u8>,
    nof_bits: usize,
}

/// BIT STRING (SIZE(N))
pub type FixedBitString<const N: usize> = BitString<N, N, false>;

/// BIT STRING (SIZE(LB..UB))
pub type BoundedBitString<const LB: usize, const UB: usize> = BitString<LB, UB, false>;

/// BIT STRING without a size constraint
pub type DynBitString = BitString<0, { UNBOUNDED }, false>;

impl<const LB: usize, const UB: usize, const EXT: bool> Default for BitString<LB, UB, EXT> {
    fn default() -> Self {
        Self::with_len(LB)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> BitString<LB, UB, EXT> {
    /// Lower size bound.
    pub const LB: usize = LB;
    /// Upper size bound.
    pub const UB: usize = UB;

    /// Zeroed bit string of the minimum size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroed bit string of `nof_bits` bits.
    pub fn with_len(nof_bits: usize) -> Self {
        Self {
            octets: vec![0; nof_bits.div_ceil(8)],
            nof_bits,
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.nof_bits
    }

    /// Check if the bit string holds no bits.
    pub fn is_empty(&self) -> bool {
        self.nof_bits == 0
    }

    /// Number of octets backing the bits.
    pub fn nof_octets(&self) -> usize {
        self.octets.len()
    }

    /// Backing octets, bit 0 in the low bit of the first octet.
    pub fn as_octets(&self) -> &[u8] {
        &self.octets
    }

    /// Change the size; the content is cleared.
    pub fn resize(&mut self, nof_bits: usize) {
        self.nof_bits = nof_bits;
        self.octets.clear();
        self.octets.resize(nof_bits.div_ceil(8), 0);
    }

    /// Bit at `idx`; indices past the end read as zero.
    pub fn get(&self, idx: usize) -> bool {
        idx < self.nof_bits && self.octets[idx / 8] & (1 << (idx % 8)) != 0
    }

    /// Set bit `idx`; indices past the end are ignored with a diagnostic.
    pub fn set(&mut self, idx: usize, value: bool) {
        if idx >= self.nof_bits {
            warn!(
                target: LOG_TARGET,
                "bit index {} out of range for a bit string of {} bits", idx, self.nof_bits
            );
            return;
        }
        let mask = 1u8 << (idx % 8);
        if value {
            self.octets[idx / 8] |= mask;
        } else {
            self.octets[idx / 8] &= !mask;
        }
    }

    fn check_size(nof_bits: usize, direction: ErrorCode) -> CoreResult<()> {
        if nof_bits < LB || nof_bits > UB {
            error!(
                target: LOG_TARGET,
                "The provided size={} is not within the bounds [{}, {}]", nof_bits, LB, UB
            );
            return Err(CodecError::length_out_of_range(nof_bits, LB, UB, direction));
        }
        Ok(())
    }

    /// Value of the bits as an unsigned number.
    ///
    /// Bits above index 63 do not fit and are ignored with a diagnostic.
    pub fn to_number(&self) -> u64 {
        if self.nof_bits > 64 {
            error!(
                target: LOG_TARGET,
                "bitstring of size={} does not fit in an uint64_t", self.nof_bits
            );
        }
        self.octets
            .iter()
            .take(8)
            .enumerate()
            .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (i * 8)))
    }

    /// Shortest bit string (at least `LB` bits) holding `value`.
    pub fn from_number(value: u64) -> CoreResult<Self> {
        let needed = (64 - value.leading_zeros()) as usize;
        Self::from_number_bits(value, needed.max(LB))
    }

    /// Bit string of exactly `nof_bits` bits holding the low bits of `value`.
    pub fn from_number_bits(value: u64, nof_bits: usize) -> CoreResult<Self> {
        Self::check_size(nof_bits, ErrorCode::EncodeFail)?;
        let mut bs = Self::with_len(nof_bits);
        for idx in 0..nof_bits.min(64) {
            if value & (1u64 << idx) != 0 {
                bs.set(idx, true);
            }
        }
        Ok(bs)
    }

    /// Append the bits to `w`, highest index first.
    fn pack_bits(&self, w: &mut BitWriter) -> CoreResult<()> {
        if self.nof_bits == 0 {
            return Ok(());
        }
        let n_octs = self.octets.len();
        let top = ((self.nof_bits - 1) % 8) as u32 + 1;
        w.write_bits(u64::from(self.octets[n_octs - 1]), top)?;
        for i in (0..n_octs - 1).rev() {
            w.write_bits(u64::from(self.octets[i]), 8)?;
        }
        Ok(())
    }

    /// Read `nof_bits` bits from `r`, highest index first.
    fn unpack_bits(r: &mut BitCursor<'_>, nof_bits: usize) -> CoreResult<Self> {
        if nof_bits > r.remaining_bits() {
            return Err(CodecError::buffer_too_short(
                nof_bits,
                r.remaining_bits(),
                r.distance(),
            ));
        }
        let mut bs = Self::with_len(nof_bits);
        if nof_bits == 0 {
            return Ok(bs);
        }
        let n_octs = bs.octets.len();
        let top = ((nof_bits - 1) % 8) as u32 + 1;
        bs.octets[n_octs - 1] = r.read_bits(top)? as u8;
        for i in (0..n_octs - 1).rev() {
            bs.octets[i] = r.read_bits(8)? as u8;
        }
        Ok(bs)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> FromStr for BitString<LB, UB, EXT> {
    type Err = CodecError;

    /// Parse `"0101..."`; the first character is the highest index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s.len();
        Self::check_size(n, ErrorCode::EncodeFail)?;
        let mut bs = Self::with_len(n);
        for (i, c) in s.chars().enumerate() {
            match c {
                '1' => bs.set(n - 1 - i, true),
                '0' => {}
                other => {
                    return Err(CodecError::encode(
                        "bit string",
                        format!("invalid character '{other}' at position {i}"),
                    ))
                }
            }
        }
        Ok(bs)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> fmt::Display for BitString<LB, UB, EXT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = (0..self.nof_bits)
            .rev()
            .map(|idx| if self.get(idx) { '1' } else { '0' })
            .collect();
        f.write_str(&s)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> PartialEq<str> for BitString<LB, UB, EXT> {
    fn eq(&self, other: &str) -> bool {
        other.len() == self.nof_bits && self.to_string() == other
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> PartialEq<&str> for BitString<LB, UB, EXT> {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> PerEncode for BitString<LB, UB, EXT> {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        let len = self.nof_bits;
        let aligned = w.aligned();
        if EXT {
            let ext = len < LB || len > UB;
            w.write_bool(ext)?;
            if ext {
                pack_length(w, len, aligned)?;
                return self.pack_bits(w);
            }
        }
        if LB == UB {
            Self::check_size(len, ErrorCode::EncodeFail)?;
            if aligned && LB > 16 {
                w.align_bytes_zero()?;
            }
        } else if UB == UNBOUNDED {
            Self::check_size(len, ErrorCode::EncodeFail)?;
            pack_length(w, len, aligned)?;
        } else {
            pack_constrained_length(w, len, LB, UB, aligned)?;
            if aligned {
                w.align_bytes_zero()?;
            }
        }
        self.pack_bits(w)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> PerDecode for BitString<LB, UB, EXT> {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        let aligned = r.aligned();
        if EXT && r.read_bool()? {
            let len = unpack_length(r, aligned)?;
            return Self::unpack_bits(r, len);
        }
        let len = if LB == UB {
            if aligned && LB > 16 {
                r.align_bytes()?;
            }
            LB
        } else if UB == UNBOUNDED {
            let len = unpack_length(r, aligned)?;
            Self::check_size(len, ErrorCode::DecodeFail)?;
            len
        } else {
            let len = unpack_constrained_length(r, LB, UB, aligned)?;
            if aligned {
                r.align_bytes()?;
            }
            len
        };
        Self::unpack_bits(r, len)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> ToJson for BitString<LB, UB, EXT> {
    fn to_json(&self, j: &mut JsonWriter) {
        j.write_str("", &self.to_string());
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> Serialize for BitString<LB, UB, EXT> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, const LB: usize, const UB: usize, const EXT: bool> Deserialize<'de>
    for BitString<LB, UB, EXT>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
