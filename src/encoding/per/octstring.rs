// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! OCTET STRING (X.691 §17).

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::error;

use super::bitstring::UNBOUNDED;
use super::codec::{PerDecode, PerEncode};
use super::cursor::BitCursor;
use super::length::{pack_constrained_length, pack_length, unpack_constrained_length, unpack_length};
use super::writer::BitWriter;
use crate::core::diagnostics::LOG_TARGET;
use crate::core::{CodecError, ErrorCode, Result as CoreResult};
use crate::encoding::json::{JsonWriter, ToJson};

/// OCTET STRING (SIZE(LB..UB)), extensible when `EXT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OctString<const LB: usize, const UB: usize, const EXT: bool> {
    octets: Vec<u8>,
}

/// OCTET STRING (SIZE(N))
pub type FixedOctString<const N: usize> = OctString<N, N, false>;

/// OCTET STRING (SIZE(LB..UB))
pub type BoundedOctString<const LB: usize, const UB: usize> = OctString<LB, UB, false>;

/// OCTET STRING without a size constraint
pub type DynOctString = OctString<0, { UNBOUNDED }, false>;

impl<const LB: usize, const UB: usize, const EXT: bool> Default for OctString<LB, UB, EXT> {
    fn default() -> Self {
        Self {
            octets: vec![0; LB],
        }
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> OctString<LB, UB, EXT> {
    /// Zeroed octet string of the minimum size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `octets`, checking the size constraint.
    pub fn from_vec(octets: Vec<u8>) -> CoreResult<Self> {
        if !EXT {
            Self::check_size(octets.len(), ErrorCode::EncodeFail)?;
        }
        Ok(Self { octets })
    }

    /// Change the size; the content is cleared.
    pub fn resize(&mut self, len: usize) {
        self.octets.clear();
        self.octets.resize(len, 0);
    }

    /// Consume the string and return the octets.
    pub fn into_vec(self) -> Vec<u8> {
        self.octets
    }

    fn check_size(len: usize, direction: ErrorCode) -> CoreResult<()> {
        if len < LB || len > UB {
            error!(
                target: LOG_TARGET,
                "The provided size={} is not within the bounds [{}, {}]", len, LB, UB
            );
            return Err(CodecError::length_out_of_range(len, LB, UB, direction));
        }
        Ok(())
    }

    /// Big-endian value of the octets; only the last 8 octets count.
    pub fn to_number(&self) -> u64 {
        if self.octets.len() > 8 {
            error!(
                target: LOG_TARGET,
                "octstring of size={} does not fit in an uint64_t", self.octets.len()
            );
        }
        let start = self.octets.len().saturating_sub(8);
        self.octets[start..]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
    }

    /// Big-endian encoding of `value` in the current size.
    pub fn from_number(&mut self, value: u64) -> CoreResult<()> {
        let len = self.octets.len();
        if len < 8 && value >> (len * 8) != 0 {
            return Err(CodecError::value_out_of_range(
                value,
                0,
                (1i128 << (len * 8)) - 1,
                ErrorCode::EncodeFail,
            ));
        }
        for (i, octet) in self.octets.iter_mut().rev().enumerate() {
            *octet = if i < 8 { (value >> (i * 8)) as u8 } else { 0 };
        }
        Ok(())
    }

    fn pack_octets(&self, w: &mut BitWriter) -> CoreResult<()> {
        w.write_bytes(&self.octets)
    }

    fn unpack_octets(r: &mut BitCursor<'_>, len: usize) -> CoreResult<Self> {
        if len.saturating_mul(8) > r.remaining_bits() {
            return Err(CodecError::buffer_too_short(
                len.saturating_mul(8),
                r.remaining_bits(),
                r.distance(),
            ));
        }
        Ok(Self {
            octets: r.read_bytes(len)?,
        })
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> Deref for OctString<LB, UB, EXT> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.octets
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> DerefMut for OctString<LB, UB, EXT> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.octets
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> FromStr for OctString<LB, UB, EXT> {
    type Err = CodecError;

    /// Parse a hex string such as `"0a1b"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let octets =
            hex::decode(s).map_err(|e| CodecError::encode("octet string", e.to_string()))?;
        Self::from_vec(octets)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> fmt::Display for OctString<LB, UB, EXT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.octets))
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> PerEncode for OctString<LB, UB, EXT> {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        let len = self.octets.len();
        let aligned = w.aligned();
        if EXT {
            let ext = len < LB || len > UB;
            w.write_bool(ext)?;
            if ext {
                pack_length(w, len, aligned)?;
                return self.pack_octets(w);
            }
        }
        if LB == UB {
            Self::check_size(len, ErrorCode::EncodeFail)?;
            if aligned && LB > 2 {
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
        self.pack_octets(w)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> PerDecode for OctString<LB, UB, EXT> {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        let aligned = r.aligned();
        if EXT && r.read_bool()? {
            let len = unpack_length(r, aligned)?;
            return Self::unpack_octets(r, len);
        }
        let len = if LB == UB {
            if aligned && LB > 2 {
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
        Self::unpack_octets(r, len)
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> ToJson for OctString<LB, UB, EXT> {
    fn to_json(&self, j: &mut JsonWriter) {
        j.write_str("", &self.to_string());
    }
}

impl<const LB: usize, const UB: usize, const EXT: bool> Serialize for OctString<LB, UB, EXT> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, const LB: usize, const UB: usize, const EXT: bool> Deserialize<'de>
    for OctString<LB, UB, EXT>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
