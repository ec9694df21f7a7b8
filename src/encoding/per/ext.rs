// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Extension groups and open fields (X.691 §18.8, §10.2).
//!
//! An extensible SEQUENCE encodes, after its root fields, a bitmap with one
//! flag per extension group, then each present group wrapped in an open
//! field (a general length in octets followed by the group's bits padded to
//! an octet). The length prefix is what lets an older decoder step over
//! groups it has never heard of.

use tracing::error;

use super::cursor::BitCursor;
use super::integer::{pack_norm_small_integer, unpack_norm_small_integer};
use super::length::{pack_length, unpack_length};
use super::writer::BitWriter;
use crate::core::diagnostics::{log_skipped, LOG_TARGET};
use crate::core::{CodecError, ErrorCode, Result as CoreResult};

/// Write an extension marker that must be unset.
pub fn pack_unsupported_ext_flag(w: &mut BitWriter, ext: bool) -> CoreResult<()> {
    w.write_bool(ext)?;
    if ext {
        error!(target: LOG_TARGET, "asn1 error: ASN extensions not currently supported");
        return Err(CodecError::unsupported("extension", ErrorCode::EncodeFail));
    }
    Ok(())
}

/// Read an extension marker that must be unset.
pub fn unpack_unsupported_ext_flag(r: &mut BitCursor<'_>) -> CoreResult<bool> {
    let ext = r.read_bool()?;
    if ext {
        error!(target: LOG_TARGET, "asn1 error: ASN extensions not currently supported");
        return Err(CodecError::unsupported("extension", ErrorCode::DecodeFail));
    }
    Ok(ext)
}

/// Presence flags of the extension groups of a SEQUENCE, encode side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtGroupsPacker {
    groups: Vec<bool>,
}

impl ExtGroupsPacker {
    /// Create an empty bitmap.
    pub fn new() -> Self {
        Self::default()
    }

    /// OR `present` into the flag of group `idx`, growing the bitmap as needed.
    pub fn set(&mut self, idx: usize, present: bool) {
        if idx >= self.groups.len() {
            self.groups.resize(idx + 1, false);
        }
        self.groups[idx] |= present;
    }

    /// Flag of group `idx`.
    pub fn get(&self, idx: usize) -> bool {
        self.groups.get(idx).copied().unwrap_or(false)
    }

    /// Number of groups that will be encoded: last present index + 1, at least 1.
    pub fn nof_groups(&self) -> usize {
        self.groups
            .iter()
            .rposition(|&present| present)
            .map_or(1, |last| last + 1)
    }

    /// Encode the group count and one flag per group.
    pub fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        let nof_groups = self.nof_groups();
        pack_norm_small_integer(w, (nof_groups - 1) as u64)?;
        for idx in 0..nof_groups {
            w.write_bool(self.get(idx))?;
        }
        Ok(())
    }
}

/// Presence flags of the extension groups of a SEQUENCE, decode side.
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use rrc_per::encoding::per::{BitCursor, ExtGroupsUnpacker};
///
/// // Two groups flagged, only the first is known to this decoder.
/// let data = [0x03, 0x80];
/// let mut r = BitCursor::new(&data);
/// let mut groups = ExtGroupsUnpacker::new(1);
/// groups.unpack(&mut r)?;
/// assert!(groups.is_present(0));
/// assert!(groups.is_present(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtGroupsUnpacker {
    nof_supported: usize,
    nof_unpacked: usize,
    groups: Vec<bool>,
}

impl ExtGroupsUnpacker {
    /// Create a bitmap for a decoder that knows `nof_supported` groups.
    pub fn new(nof_supported: usize) -> Self {
        Self {
            nof_supported,
            nof_unpacked: 0,
            groups: vec![false; nof_supported],
        }
    }

    /// Number of groups known to this decoder.
    pub fn nof_supported(&self) -> usize {
        self.nof_supported
    }

    /// Number of groups announced by the encoder.
    pub fn nof_unpacked(&self) -> usize {
        self.nof_unpacked
    }

    /// Decode the group count and flags.
    pub fn unpack(&mut self, r: &mut BitCursor<'_>) -> CoreResult<()> {
        let count = unpack_norm_small_integer(r)?;
        let left = r.remaining_bits();
        // One flag bit per group follows the count.
        let nof_groups = usize::try_from(count)
            .ok()
            .and_then(|n| n.checked_add(1))
            .filter(|&n| n <= left)
            .ok_or_else(|| {
                let announced = u128::from(count) + 1;
                error!(
                    target: LOG_TARGET,
                    "Extension group count {} exceeds the {} remaining bits", announced, left
                );
                CodecError::decode(
                    "extension groups",
                    format!("{announced} groups announced with {left} bits left"),
                )
            })?;
        if nof_groups > self.groups.len() {
            self.groups.resize(nof_groups, false);
        }
        for idx in 0..nof_groups {
            self.groups[idx] = r.read_bool()?;
        }
        self.nof_unpacked = nof_groups;
        Ok(())
    }

    /// Flag of group `idx`; groups the encoder did not send are absent.
    pub fn is_present(&self, idx: usize) -> bool {
        idx < self.nof_unpacked && self.groups[idx]
    }

    /// Step over every flagged group this decoder does not know.
    ///
    /// Must be called after the known groups were decoded, since unknown
    /// groups always follow them on the wire.
    pub fn skip_unknown(&self, r: &mut BitCursor<'_>) -> CoreResult<()> {
        let aligned = r.aligned();
        for idx in self.nof_supported..self.nof_unpacked {
            if self.groups[idx] {
                skip_open_field(r, aligned)?;
            }
        }
        Ok(())
    }
}

/// Encode the output of `f` as an open field.
///
/// The closure writes into a scratch writer. Its bits are zero padded to an
/// octet boundary (at least one octet), then a general length in octets and
/// the octets are appended to `w`. When `f` fails, `w` is left untouched.
pub fn pack_open_field<F>(w: &mut BitWriter, aligned: bool, f: F) -> CoreResult<()>
where
    F: FnOnce(&mut BitWriter) -> CoreResult<()>,
{
    let mut scratch = w.scratch();
    f(&mut scratch)?;
    scratch.align_bytes_zero()?;
    if scratch.distance() == 0 {
        scratch.write_bits(0, 8)?;
    }
    let bytes = scratch.finish();
    pack_length(w, bytes.len(), aligned)?;
    w.write_bytes(&bytes)
}

/// Decode an open field with `f`, then step past the whole field.
///
/// `f` sees a cursor bounded to the field, so it cannot read into the data
/// that follows. Bits it leaves unread (padding, fields added by a newer
/// encoder) are skipped.
pub fn unpack_open_field<T, F>(r: &mut BitCursor<'_>, aligned: bool, f: F) -> CoreResult<T>
where
    F: FnOnce(&mut BitCursor<'_>) -> CoreResult<T>,
{
    let len = unpack_length(r, aligned)?;
    let n_bits = len * 8;
    if n_bits > r.remaining_bits() {
        error!(
            target: LOG_TARGET,
            "Open field of {} octets exceeds the {} bits left in the buffer",
            len,
            r.remaining_bits()
        );
        return Err(CodecError::decode(
            "open field",
            format!(
                "length of {len} octets exceeds the {} remaining bits",
                r.remaining_bits()
            ),
        ));
    }
    let mut field = r.sub_cursor(n_bits)?;
    let value = f(&mut field)?;
    r.advance_bits(n_bits)?;
    Ok(value)
}

/// Skip an open field without decoding it. Returns the skipped length in octets.
pub fn skip_open_field(r: &mut BitCursor<'_>, aligned: bool) -> CoreResult<usize> {
    let n_bits = unpack_open_field(r, aligned, |field| Ok(field.remaining_bits()))?;
    log_skipped("open field", n_bits);
    Ok(n_bits / 8)
}
