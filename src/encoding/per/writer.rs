// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Bit-granular write cursor for PER encoding.

use crate::core::{CodecError, PerOptions, PerVariant, Result as CoreResult};

/// Default initial capacity for the writer buffer, in bytes.
const DEFAULT_CAPACITY: usize = 16;

/// PER write cursor.
///
/// Bits are appended MSB first. The write position only moves forward; a
/// partially written last byte is zero padded on the right.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use rrc_per::encoding::per::BitWriter;
///
/// let mut w = BitWriter::new();
/// w.write_bits(0b001, 3)?;
/// w.write_bool(true)?;
/// assert_eq!(w.distance(), 4);
/// assert_eq!(w.finish(), vec![0x30]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitWriter {
    /// Output bytes, last one possibly partial
    buf: Vec<u8>,
    /// Number of bits written
    offset: usize,
    /// Optional capacity limit in bytes
    max_bytes: Option<usize>,
    /// PER variant, consulted by types that encode differently when aligned
    variant: PerVariant,
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWriter {
    /// Create a new unbounded writer.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new unbounded writer with preallocated byte capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            offset: 0,
            max_bytes: None,
            variant: PerVariant::Unaligned,
        }
    }

    /// Create a writer that refuses to grow past `max_bytes` bytes.
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(max_bytes.min(4096)),
            offset: 0,
            max_bytes: Some(max_bytes),
            variant: PerVariant::Unaligned,
        }
    }

    /// Create a writer configured by `opts`.
    pub fn from_options(opts: &PerOptions) -> Self {
        let writer = match opts.max_bytes {
            Some(max) => Self::with_max_bytes(max),
            None => Self::new(),
        };
        writer.with_variant(opts.variant)
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

    /// Empty writer with the same variant, for encoding nested content.
    #[must_use]
    pub fn scratch(&self) -> Self {
        Self::new().with_variant(self.variant)
    }

    /// Capacity limit in bytes, if any.
    #[must_use]
    pub fn max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    /// Number of bits written so far.
    #[must_use]
    pub fn distance(&self) -> usize {
        self.offset
    }

    /// Number of bytes touched so far, counting a partial last byte.
    #[must_use]
    pub fn distance_bytes(&self) -> usize {
        self.offset.div_ceil(8)
    }

    /// Bit position inside the current byte (0 when aligned).
    #[must_use]
    pub fn bit_offset(&self) -> u32 {
        (self.offset % 8) as u32
    }

    /// Check if the write position sits on an octet boundary.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.offset % 8 == 0
    }

    /// Written bytes, last one zero padded.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer and return the encoded bytes.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Discard everything written, keeping the allocation and limit.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.offset = 0;
    }

    fn check_capacity(&self, n_bits: usize) -> CoreResult<()> {
        if let Some(max) = self.max_bytes {
            if (self.offset + n_bits).div_ceil(8) > max {
                return Err(CodecError::capacity_exceeded(n_bits, max, self.offset));
            }
        }
        Ok(())
    }

    /// Append the low `n_bits` of `value`, MSB first.
    pub fn write_bits(&mut self, value: u64, n_bits: u32) -> CoreResult<()> {
        if n_bits > 64 {
            return Err(CodecError::encode(
                "write_bits",
                format!("cannot write {n_bits} bits at once, the limit is 64"),
            ));
        }
        if n_bits == 0 {
            return Ok(());
        }
        self.check_capacity(n_bits as usize)?;

        let value = if n_bits == 64 {
            value
        } else {
            value & ((1u64 << n_bits) - 1)
        };
        let mut remaining = n_bits;
        while remaining > 0 {
            let used = self.bit_offset();
            if used == 0 {
                self.buf.push(0);
            }
            let free = 8 - used;
            let take = free.min(remaining);
            let chunk = ((value >> (remaining - take)) & ((1u64 << take) - 1)) as u8;
            if let Some(last) = self.buf.last_mut() {
                *last |= chunk << (free - take);
            }
            self.offset += take as usize;
            remaining -= take;
        }
        Ok(())
    }

    /// Append a single bit.
    pub fn write_bool(&mut self, value: bool) -> CoreResult<()> {
        self.write_bits(u64::from(value), 1)
    }

    /// Append whole octets, copying directly when aligned.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> CoreResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        if self.is_aligned() {
            self.check_capacity(bytes.len() * 8)?;
            self.buf.extend_from_slice(bytes);
            self.offset += bytes.len() * 8;
            return Ok(());
        }
        for &b in bytes {
            self.write_bits(u64::from(b), 8)?;
        }
        Ok(())
    }

    /// Append the first `n_bits` bits of `bytes` (MSB first).
    pub fn write_bit_slice(&mut self, bytes: &[u8], n_bits: usize) -> CoreResult<()> {
        let full = n_bits / 8;
        if full > bytes.len() || (n_bits % 8 != 0 && full >= bytes.len()) {
            return Err(CodecError::encode(
                "write_bit_slice",
                format!("{n_bits} bits requested from {} bytes", bytes.len()),
            ));
        }
        self.write_bytes(&bytes[..full])?;
        let rest = (n_bits % 8) as u32;
        if rest > 0 {
            self.write_bits(u64::from(bytes[full] >> (8 - rest)), rest)?;
        }
        Ok(())
    }

    /// Pad with zero bits up to the next octet boundary.
    pub fn align_bytes_zero(&mut self) -> CoreResult<()> {
        let pad = (8 - self.bit_offset()) % 8;
        self.write_bits(0, pad)
    }

    /// Append `n_bits` zero bits.
    pub fn advance_bits(&mut self, n_bits: usize) -> CoreResult<()> {
        self.check_capacity(n_bits)?;
        let mut remaining = n_bits;
        while remaining > 0 {
            let take = remaining.min(64);
            self.write_bits(0, take as u32)?;
            remaining -= take;
        }
        Ok(())
    }

    /// Append everything written into `other`.
    pub fn append(&mut self, other: &BitWriter) -> CoreResult<()> {
        self.write_bit_slice(&other.buf, other.offset)
    }
}
