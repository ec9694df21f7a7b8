// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec traits and top-level entry points.
//!
//! Every information element implements [`PerEncode`] and [`PerDecode`]:
//! `pack` calls the PER primitives in ASN.1 field order and `unpack` mirrors
//! it. Nested elements recurse through the same traits.

use tracing::debug;

use super::cursor::BitCursor;
use super::writer::BitWriter;
use crate::core::diagnostics::LOG_TARGET;
use crate::core::{CodecError, ErrorCode, PerOptions, Result as CoreResult};

// ============================================================================
// Traits
// ============================================================================

/// Types that can be packed into a PER bitstream.
pub trait PerEncode {
    /// Append the encoding of `self` to `w`.
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()>;
}

/// Types that can be unpacked from a PER bitstream.
pub trait PerDecode: Sized {
    /// Read one value from `r`.
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self>;
}

/// Field descriptor that knows how to pack and unpack items of type `T`.
///
/// Sequence-of codecs take an `ItemPacker` to encode their elements, so the
/// same codec handles lists of constrained integers, enumerations, fixed
/// size bit strings, and nested elements.
pub trait ItemPacker<T> {
    /// Encode one item.
    fn pack(&self, w: &mut BitWriter, item: &T) -> CoreResult<()>;

    /// Decode one item.
    fn unpack(&self, r: &mut BitCursor<'_>) -> CoreResult<T>;
}

/// Item packer for types that encode themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Packer;

impl<T: PerEncode + PerDecode> ItemPacker<T> for Packer {
    fn pack(&self, w: &mut BitWriter, item: &T) -> CoreResult<()> {
        item.pack(w)
    }

    fn unpack(&self, r: &mut BitCursor<'_>) -> CoreResult<T> {
        T::unpack(r)
    }
}

/// Item packer writing each item as a raw field of a fixed bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPacker(pub u32);

macro_rules! impl_bit_packer {
    ($($ty:ty),+) => {
        $(
            impl ItemPacker<$ty> for BitPacker {
                fn pack(&self, w: &mut BitWriter, item: &$ty) -> CoreResult<()> {
                    w.write_bits(u64::from(*item), self.0)
                }

                fn unpack(&self, r: &mut BitCursor<'_>) -> CoreResult<$ty> {
                    let raw = r.read_bits(self.0)?;
                    <$ty>::try_from(raw).map_err(|_| {
                        CodecError::value_out_of_range(raw, 0, <$ty>::MAX, ErrorCode::DecodeFail)
                    })
                }
            }
        )+
    };
}

impl_bit_packer!(u8, u16, u32, u64);

/// ASN.1 NULL, which encodes to nothing.
impl PerEncode for () {
    fn pack(&self, _w: &mut BitWriter) -> CoreResult<()> {
        Ok(())
    }
}

impl PerDecode for () {
    fn unpack(_r: &mut BitCursor<'_>) -> CoreResult<Self> {
        Ok(())
    }
}

impl PerEncode for bool {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        w.write_bool(*self)
    }
}

impl PerDecode for bool {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        r.read_bool()
    }
}

impl<T: PerEncode + ?Sized> PerEncode for Box<T> {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        (**self).pack(w)
    }
}

impl<T: PerDecode> PerDecode for Box<T> {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        T::unpack(r).map(Box::new)
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Encode `value` with default options.
pub fn encode<T: PerEncode + ?Sized>(value: &T) -> CoreResult<Vec<u8>> {
    encode_with(value, &PerOptions::default())
}

/// Encode `value` with the given options.
///
/// The result is padded to whole octets.
pub fn encode_with<T: PerEncode + ?Sized>(value: &T, opts: &PerOptions) -> CoreResult<Vec<u8>> {
    let mut w = BitWriter::from_options(opts);
    value.pack(&mut w)?;
    debug!(target: LOG_TARGET, bits = w.distance(), "encoded message");
    Ok(w.finish())
}

/// Decode a `T` from the start of `data` with default options.
pub fn decode<T: PerDecode>(data: &[u8]) -> CoreResult<T> {
    decode_with(data, &PerOptions::default())
}

/// Decode a `T` from the start of `data` with the given options.
///
/// Trailing padding after the value is ignored.
pub fn decode_with<T: PerDecode>(data: &[u8], opts: &PerOptions) -> CoreResult<T> {
    let mut r = BitCursor::new(data).with_variant(opts.variant);
    let value = T::unpack(&mut r)?;
    debug!(target: LOG_TARGET, bits = r.distance(), "decoded message");
    Ok(value)
}

/// Pack `value`, unpack the result, pack again and compare both encodings.
///
/// Returns the encoding on success. A mismatch in bit length or content is
/// reported as a decode failure, since the decoder did not reproduce what
/// the encoder wrote.
pub fn check_pack_unpack_consistency<T: PerEncode + PerDecode>(
    value: &T,
) -> CoreResult<Vec<u8>> {
    let mut w = BitWriter::new();
    value.pack(&mut w)?;

    let mut r = BitCursor::new(w.as_bytes());
    let decoded = T::unpack(&mut r)?;
    if r.distance() != w.distance() {
        return Err(CodecError::decode(
            "consistency check",
            format!(
                "packed {} bits but unpacked {} bits",
                w.distance(),
                r.distance()
            ),
        ));
    }

    let mut w2 = BitWriter::new();
    decoded.pack(&mut w2)?;
    if w2.distance() != w.distance() || w2.as_bytes() != w.as_bytes() {
        return Err(CodecError::decode(
            "consistency check",
            format!(
                "repacked {} bits differ from the original {} bits",
                w2.distance(),
                w.distance()
            ),
        ));
    }
    Ok(w.finish())
}
