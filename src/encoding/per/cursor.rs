// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bit-granular read cursor for PER decoding.

use crate::core::{CodecError, PerVariant, Result as CoreResult};

/// PER read cursor.
///
/// The cursor tracks:
/// - `offset`: current read position in bits from the start of `data`
/// - `end`: bit position the cursor may not read past
///
/// A bounded sub-cursor shares `data` with its parent but stops at its own
/// `end`, which is how open fields are decoded without running into the
/// fields that follow them.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use rrc_per::encoding::per::BitCursor;
///
/// let data = [0x30];
/// let mut cursor = BitCursor::new(&data);
/// assert_eq!(cursor.read_bits(3)?, 0b001);
/// assert!(cursor.read_bool()?);
/// assert_eq!(cursor.remaining_bits(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BitCursor<'a> {
    /// The input buffer
    data: &'a [u8],
    /// Current read position, in bits
    offset: usize,
    /// Read limit, in bits
    end: usize,
    /// PER variant, consulted by types that decode differently when aligned
    variant: PerVariant,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor over the whole buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            end: data.len() * 8,
            variant: PerVariant::Unaligned,
        }
    }

    /// Set the PER variant.
    #[must_use]
    pub fn with_variant(mut self, variant: PerVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Check if the aligned variant is selected.
    #[must_use]
    pub fn aligned(&self) -> bool {
        self.variant.is_aligned()
    }

    /// Current position in bits from the start of the buffer.
    #[must_use]
    pub fn distance(&self) -> usize {
        self.offset
    }

    /// Current position in bytes, counting a partially read byte.
    #[must_use]
    pub fn distance_bytes(&self) -> usize {
        self.offset.div_ceil(8)
    }

    /// Bits left before the read limit.
    #[inline]
    #[must_use]
    pub fn remaining_bits(&self) -> usize {
        self.end.saturating_sub(self.offset)
    }

    /// Check if every bit up to the read limit was consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.end
    }

    /// Check if the read position sits on an octet boundary.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.offset % 8 == 0
    }

    #[inline]
    fn ensure(&self, n_bits: usize) -> CoreResult<()> {
        if n_bits > self.remaining_bits() {
            return Err(CodecError::buffer_too_short(
                n_bits,
                self.remaining_bits(),
                self.offset,
            ));
        }
        Ok(())
    }

    fn peek_unchecked(&self, n_bits: u32) -> u64 {
        let mut value = 0u64;
        let mut pos = self.offset;
        let mut remaining = n_bits;
        while remaining > 0 {
            let used = (pos % 8) as u32;
            let avail = 8 - used;
            let take = avail.min(remaining);
            let byte = u64::from(self.data[pos / 8]);
            let chunk = (byte >> (avail - take)) & ((1u64 << take) - 1);
            value = (value << take) | chunk;
            pos += take as usize;
            remaining -= take;
        }
        value
    }

    /// Read `n_bits` (0..=64) without consuming them.
    pub fn peek_bits(&self, n_bits: u32) -> CoreResult<u64> {
        if n_bits > 64 {
            return Err(CodecError::decode(
                "read_bits",
                format!("cannot read {n_bits} bits at once, the limit is 64"),
            ));
        }
        self.ensure(n_bits as usize)?;
        Ok(self.peek_unchecked(n_bits))
    }

    /// Consume `n_bits` (0..=64) and return them MSB first.
    pub fn read_bits(&mut self, n_bits: u32) -> CoreResult<u64> {
        let value = self.peek_bits(n_bits)?;
        self.offset += n_bits as usize;
        Ok(value)
    }

    /// Consume a single bit.
    pub fn read_bool(&mut self) -> CoreResult<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Consume `n_bytes` whole octets.
    pub fn read_bytes(&mut self, n_bytes: usize) -> CoreResult<Vec<u8>> {
        self.ensure(n_bytes * 8)?;
        if self.is_aligned() {
            let start = self.offset / 8;
            self.offset += n_bytes * 8;
            return Ok(self.data[start..start + n_bytes].to_vec());
        }
        let mut out = Vec::with_capacity(n_bytes);
        for _ in 0..n_bytes {
            out.push(self.read_bits(8)? as u8);
        }
        Ok(out)
    }

    /// Consume `n_bits` bits into a MSB-first byte vector, last byte zero padded.
    pub fn read_bit_slice(&mut self, n_bits: usize) -> CoreResult<Vec<u8>> {
        self.ensure(n_bits)?;
        let mut out = self.read_bytes(n_bits / 8)?;
        let rest = (n_bits % 8) as u32;
        if rest > 0 {
            out.push((self.read_bits(rest)? as u8) << (8 - rest));
        }
        Ok(out)
    }

    /// Skip to the next octet boundary.
    pub fn align_bytes(&mut self) -> CoreResult<()> {
        let pad = (8 - self.offset % 8) % 8;
        self.advance_bits(pad)
    }

    /// Skip `n_bits` bits.
    pub fn advance_bits(&mut self, n_bits: usize) -> CoreResult<()> {
        self.ensure(n_bits)?;
        self.offset += n_bits;
        Ok(())
    }

    /// Cursor over the next `n_bits` bits only.
    ///
    /// The parent position is not moved; call [`advance_bits`](Self::advance_bits)
    /// afterwards to step over the region.
    pub fn sub_cursor(&self, n_bits: usize) -> CoreResult<BitCursor<'a>> {
        self.ensure(n_bits)?;
        Ok(BitCursor {
            data: self.data,
            offset: self.offset,
            end: self.offset + n_bits,
            variant: self.variant,
        })
    }
}
