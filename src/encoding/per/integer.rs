// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Whole number encodings (X.691 §10.5 to §10.8, §13).
//!
//! All arithmetic is carried out in `i128`/`u128`, so the offset `value - lb`
//! never overflows for any of the 8..64-bit integer types.

use tracing::error;

use super::codec::ItemPacker;
use super::cursor::BitCursor;
use super::length::{pack_length, unpack_length};
use super::writer::BitWriter;
use crate::core::diagnostics::LOG_TARGET;
use crate::core::{CodecError, ErrorCode, Result as CoreResult};

/// Integer types that can be PER encoded.
pub trait PerInt:
    Copy + PartialOrd + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Smallest value of the type.
    const MIN: i128;
    /// Largest value of the type.
    const MAX: i128;

    /// Widen to `i128`.
    fn to_i128(self) -> i128;

    /// Narrow from `i128`, `None` when the value does not fit.
    fn from_i128(value: i128) -> Option<Self>;
}

macro_rules! impl_per_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl PerInt for $t {
                const MIN: i128 = <$t>::MIN as i128;
                const MAX: i128 = <$t>::MAX as i128;

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_i128(value: i128) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_per_int!(i8, i16, i32, i64, u8, u16, u32, u64);

/// Number of bits of a bit-field that holds `range` distinct values.
///
/// `ceil(log2(range))`, so a single-valued range takes no bits.
#[inline]
pub fn range_bits(range: u128) -> u32 {
    if range <= 1 {
        0
    } else {
        128 - (range - 1).leading_zeros()
    }
}

/// Minimum number of octets of the unsigned binary form of `value` (at least 1).
fn unsigned_octets(value: u128) -> usize {
    ((128 - value.leading_zeros()) as usize).div_ceil(8).max(1)
}

/// Minimum number of octets of the two's complement form of `value`.
fn signed_octets(value: i128) -> usize {
    let significant = if value < 0 {
        128 - value.leading_ones()
    } else {
        128 - value.leading_zeros()
    };
    ((significant + 1) as usize).div_ceil(8)
}

fn write_octets(w: &mut BitWriter, value: u128, n_octets: usize) -> CoreResult<()> {
    let bytes = value.to_be_bytes();
    w.write_bytes(&bytes[16 - n_octets..])
}

fn read_octets(r: &mut BitCursor<'_>, n_octets: usize, signed: bool) -> CoreResult<i128> {
    if n_octets == 0 || n_octets > 16 {
        return Err(CodecError::unsupported(
            format!("integer of {n_octets} octets"),
            ErrorCode::DecodeFail,
        ));
    }
    let bytes = r.read_bytes(n_octets)?;
    let negative = signed && bytes[0] & 0x80 != 0;
    let mut acc: i128 = if negative { -1 } else { 0 };
    for b in bytes {
        acc = (acc << 8) | i128::from(b);
    }
    if !signed && acc < 0 {
        return Err(CodecError::decode(
            "whole number",
            "unsigned value does not fit in 127 bits",
        ));
    }
    Ok(acc)
}

/// Encode `offset` as a constrained whole number over `range` values.
pub(crate) fn pack_constrained_offset(
    w: &mut BitWriter,
    offset: u128,
    range: u128,
    aligned: bool,
) -> CoreResult<()> {
    if range <= 1 {
        return Ok(());
    }
    if !aligned || range <= 255 {
        let bits = range_bits(range);
        if bits > 64 {
            return Err(CodecError::unsupported(
                format!("constrained range of {bits} bits"),
                ErrorCode::EncodeFail,
            ));
        }
        return w.write_bits(offset as u64, bits);
    }
    if range == 256 {
        w.align_bytes_zero()?;
        return w.write_bits(offset as u64, 8);
    }
    if range <= 65536 {
        w.align_bytes_zero()?;
        return w.write_bits(offset as u64, 16);
    }
    // Length-prefixed octets: the octet count is itself constrained to 1..=max.
    let max_octets = unsigned_octets(range - 1);
    let n_octets = unsigned_octets(offset);
    pack_constrained_offset(w, (n_octets - 1) as u128, max_octets as u128, aligned)?;
    w.align_bytes_zero()?;
    write_octets(w, offset, n_octets)
}

/// Decode a constrained whole number offset over `range` values.
///
/// The result is not checked against `range`.
pub(crate) fn unpack_constrained_offset(
    r: &mut BitCursor<'_>,
    range: u128,
    aligned: bool,
) -> CoreResult<u128> {
    if range <= 1 {
        return Ok(0);
    }
    if !aligned || range <= 255 {
        let bits = range_bits(range);
        if bits > 64 {
            return Err(CodecError::unsupported(
                format!("constrained range of {bits} bits"),
                ErrorCode::DecodeFail,
            ));
        }
        return Ok(u128::from(r.read_bits(bits)?));
    }
    if range == 256 {
        r.align_bytes()?;
        return Ok(u128::from(r.read_bits(8)?));
    }
    if range <= 65536 {
        r.align_bytes()?;
        return Ok(u128::from(r.read_bits(16)?));
    }
    let max_octets = unsigned_octets(range - 1);
    let n_octets = unpack_constrained_offset(r, max_octets as u128, aligned)? as usize + 1;
    r.align_bytes()?;
    Ok(read_octets(r, n_octets, false)? as u128)
}

/// Encode `value` as a constrained whole number in `[lb, ub]`.
pub fn pack_constrained_whole_number(
    w: &mut BitWriter,
    value: i128,
    lb: i128,
    ub: i128,
    aligned: bool,
) -> CoreResult<()> {
    if lb > ub || value < lb || value > ub {
        error!(
            target: LOG_TARGET,
            "The condition lb <= n <= ub ({} <= {} <= {}) was not met", lb, value, ub
        );
        return Err(CodecError::value_out_of_range(
            value,
            lb,
            ub,
            ErrorCode::EncodeFail,
        ));
    }
    pack_constrained_offset(w, (value - lb) as u128, (ub - lb) as u128 + 1, aligned)
}

/// Decode a constrained whole number in `[lb, ub]`.
pub fn unpack_constrained_whole_number(
    r: &mut BitCursor<'_>,
    lb: i128,
    ub: i128,
    aligned: bool,
) -> CoreResult<i128> {
    if lb > ub {
        return Err(CodecError::decode(
            "constrained whole number",
            format!("empty range [{lb}, {ub}]"),
        ));
    }
    let offset = unpack_constrained_offset(r, (ub - lb) as u128 + 1, aligned)?;
    let value = lb + offset as i128;
    if value > ub {
        error!(
            target: LOG_TARGET,
            "The condition lb <= n <= ub ({} <= {} <= {}) was not met", lb, value, ub
        );
        return Err(CodecError::value_out_of_range(
            value,
            lb,
            ub,
            ErrorCode::DecodeFail,
        ));
    }
    Ok(value)
}

/// Encode a semi-constrained whole number (lower bound only).
pub fn pack_semi_constrained_whole_number(
    w: &mut BitWriter,
    value: i128,
    lb: i128,
    aligned: bool,
) -> CoreResult<()> {
    if value < lb {
        return Err(CodecError::value_out_of_range(
            value,
            lb,
            i128::MAX,
            ErrorCode::EncodeFail,
        ));
    }
    let offset = (value - lb) as u128;
    let n_octets = unsigned_octets(offset);
    pack_length(w, n_octets, aligned)?;
    write_octets(w, offset, n_octets)
}

/// Decode a semi-constrained whole number (lower bound only).
pub fn unpack_semi_constrained_whole_number(
    r: &mut BitCursor<'_>,
    lb: i128,
    aligned: bool,
) -> CoreResult<i128> {
    let n_octets = unpack_length(r, aligned)?;
    let offset = read_octets(r, n_octets, false)?;
    lb.checked_add(offset).ok_or_else(|| {
        CodecError::decode("semi-constrained whole number", "value overflows i128")
    })
}

/// Encode an unconstrained whole number (two's complement, length prefixed).
pub fn pack_unconstrained_whole_number(
    w: &mut BitWriter,
    value: i128,
    aligned: bool,
) -> CoreResult<()> {
    let n_octets = signed_octets(value);
    pack_length(w, n_octets, aligned)?;
    write_octets(w, value as u128, n_octets)
}

/// Decode an unconstrained whole number.
pub fn unpack_unconstrained_whole_number(
    r: &mut BitCursor<'_>,
    aligned: bool,
) -> CoreResult<i128> {
    let n_octets = unpack_length(r, aligned)?;
    read_octets(r, n_octets, true)
}

/// Encode a normally small non-negative whole number (X.691 §10.6).
pub fn pack_norm_small_integer(w: &mut BitWriter, n: u64) -> CoreResult<()> {
    if n <= 63 {
        w.write_bool(false)?;
        w.write_bits(n, 6)
    } else {
        w.write_bool(true)?;
        pack_semi_constrained_whole_number(w, i128::from(n), 0, false)
    }
}

/// Decode a normally small non-negative whole number.
pub fn unpack_norm_small_integer(r: &mut BitCursor<'_>) -> CoreResult<u64> {
    if !r.read_bool()? {
        return r.read_bits(6);
    }
    let value = unpack_semi_constrained_whole_number(r, 0, false)?;
    u64::try_from(value).map_err(|_| {
        CodecError::value_out_of_range(value, 0, u64::MAX, ErrorCode::DecodeFail)
    })
}

/// Encode an INTEGER with bounds `[lb, ub]`.
///
/// Values inside the bounds always take the constrained form, also when a
/// bound equals the type's extreme value. With `has_ext`, a value outside
/// `[lb, ub]` is sent in the extension as an unconstrained number; without
/// it, such a value is an encode failure. INTEGER types without bounds use
/// [`pack_semi_constrained_whole_number`] or [`pack_unconstrained_whole_number`].
pub fn pack_integer<I: PerInt>(
    w: &mut BitWriter,
    value: I,
    lb: I,
    ub: I,
    has_ext: bool,
    aligned: bool,
) -> CoreResult<()> {
    let (n, lo, hi) = (value.to_i128(), lb.to_i128(), ub.to_i128());
    let within_bounds = lo <= n && n <= hi;
    if has_ext {
        w.write_bool(!within_bounds)?;
    } else if !within_bounds {
        error!(
            target: LOG_TARGET,
            "The condition lb <= n <= ub ({} <= {} <= {}) was not met", lo, n, hi
        );
        return Err(CodecError::value_out_of_range(
            n,
            lo,
            hi,
            ErrorCode::EncodeFail,
        ));
    }
    if !within_bounds {
        return pack_unconstrained_whole_number(w, n, aligned);
    }
    pack_constrained_whole_number(w, n, lo, hi, aligned)
}

/// Decode an INTEGER with bounds `[lb, ub]`.
pub fn unpack_integer<I: PerInt>(
    r: &mut BitCursor<'_>,
    lb: I,
    ub: I,
    has_ext: bool,
    aligned: bool,
) -> CoreResult<I> {
    let (lo, hi) = (lb.to_i128(), ub.to_i128());
    let value = if has_ext && r.read_bool()? {
        unpack_unconstrained_whole_number(r, aligned)?
    } else {
        unpack_constrained_whole_number(r, lo, hi, aligned)?
    };
    I::from_i128(value).ok_or_else(|| {
        CodecError::value_out_of_range(value, I::MIN, I::MAX, ErrorCode::DecodeFail)
    })
}

/// Field descriptor for an INTEGER element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerPacker<I: PerInt> {
    /// Lower bound
    pub lb: I,
    /// Upper bound
    pub ub: I,
    /// Whether the constraint is extensible
    pub has_ext: bool,
    /// Whether the aligned variant is used
    pub aligned: bool,
}

impl<I: PerInt> IntegerPacker<I> {
    /// Unaligned, non-extensible packer over `[lb, ub]`.
    pub fn new(lb: I, ub: I) -> Self {
        Self {
            lb,
            ub,
            has_ext: false,
            aligned: false,
        }
    }

    /// Mark the constraint as extensible.
    pub fn with_ext(mut self) -> Self {
        self.has_ext = true;
        self
    }

    /// Select the aligned variant.
    pub fn with_aligned(mut self, aligned: bool) -> Self {
        self.aligned = aligned;
        self
    }
}

impl<I: PerInt> ItemPacker<I> for IntegerPacker<I> {
    fn pack(&self, w: &mut BitWriter, item: &I) -> CoreResult<()> {
        pack_integer(w, *item, self.lb, self.ub, self.has_ext, self.aligned)
    }

    fn unpack(&self, r: &mut BitCursor<'_>) -> CoreResult<I> {
        unpack_integer(r, self.lb, self.ub, self.has_ext, self.aligned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(w: &BitWriter) -> String {
        let mut cursor = BitCursor::new(w.as_bytes());
        (0..w.distance())
            .map(|_| if cursor.read_bool().unwrap() { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_range_bits() {
        assert_eq!(range_bits(1), 0);
        assert_eq!(range_bits(2), 1);
        assert_eq!(range_bits(3), 2);
        assert_eq!(range_bits(4), 2);
        assert_eq!(range_bits(5), 3);
        assert_eq!(range_bits(24), 5);
        assert_eq!(range_bits(256), 8);
        assert_eq!(range_bits(1 << 64), 64);
    }

    #[test]
    fn test_single_value_range_uses_no_bits() {
        let mut w = BitWriter::new();
        pack_integer(&mut w, 7u8, 7, 7, false, false).unwrap();
        assert_eq!(w.distance(), 0);
        let mut r = BitCursor::new(&[]);
        assert_eq!(unpack_integer::<u8>(&mut r, 7, 7, false, false).unwrap(), 7);
    }

    #[test]
    fn test_signed_offset_encoding() {
        let mut w = BitWriter::new();
        pack_integer(&mut w, -8i8, -8, 15, false, false).unwrap();
        assert_eq!(bits_of(&w), "00000");
        let mut w = BitWriter::new();
        pack_integer(&mut w, 15i8, -8, 15, false, false).unwrap();
        assert_eq!(bits_of(&w), "10111");
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut w = BitWriter::new();
        let err = pack_integer(&mut w, 16i8, -8, 15, false, false).unwrap_err();
        assert!(err.is_encode_failure());
        assert!(matches!(err, CodecError::ValueOutOfRange { value: 16, .. }));
        assert_eq!(w.distance(), 0);
    }

    #[test]
    fn test_decode_above_upper_bound() {
        // Range 24 uses 5 bits; 0b11111 decodes to lb + 31 > ub.
        let data = [0xf8];
        let mut r = BitCursor::new(&data);
        let err = unpack_integer::<i8>(&mut r, -8, 15, false, false).unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[test]
    fn test_full_u64_range() {
        let mut w = BitWriter::new();
        pack_constrained_whole_number(&mut w, u64::MAX as i128, 0, u64::MAX as i128, false)
            .unwrap();
        assert_eq!(w.distance(), 64);
        let bytes = w.finish();
        let mut r = BitCursor::new(&bytes);
        assert_eq!(
            unpack_constrained_whole_number(&mut r, 0, u64::MAX as i128, false).unwrap(),
            u64::MAX as i128
        );
    }

    #[test]
    fn test_extensible_integer() {
        let mut w = BitWriter::new();
        pack_integer(&mut w, 3u32, 0, 7, true, false).unwrap();
        assert_eq!(bits_of(&w), "0011");

        let mut w = BitWriter::new();
        pack_integer(&mut w, 300u32, 0, 7, true, false).unwrap();
        // ext bit, length 2, then 0x012c
        assert_eq!(w.distance(), 1 + 8 + 16);
        let bytes = w.finish();
        let mut r = BitCursor::new(&bytes);
        assert_eq!(unpack_integer::<u32>(&mut r, 0, 7, true, false).unwrap(), 300);
    }

    #[test]
    fn test_unconstrained_negative() {
        let mut w = BitWriter::new();
        pack_unconstrained_whole_number(&mut w, -129, false).unwrap();
        // length 2, then 0xff7f
        assert_eq!(w.as_bytes(), &[0x02, 0xff, 0x7f]);
        let bytes = w.finish();
        let mut r = BitCursor::new(&bytes);
        assert_eq!(unpack_unconstrained_whole_number(&mut r, false).unwrap(), -129);
    }

    #[test]
    fn test_bounds_at_type_extremes() {
        let mut w = BitWriter::new();
        pack_integer(&mut w, i64::MIN, i64::MIN, i64::MAX, false, false).unwrap();
        pack_integer(&mut w, 5u32, 3, u32::MAX, false, false).unwrap();
        assert_eq!(w.distance(), 64 + 32);
        let bytes = w.finish();
        let mut r = BitCursor::new(&bytes);
        assert_eq!(
            unpack_integer::<i64>(&mut r, i64::MIN, i64::MAX, false, false).unwrap(),
            i64::MIN
        );
        assert_eq!(unpack_integer::<u32>(&mut r, 3, u32::MAX, false, false).unwrap(), 5);
    }

    #[test]
    fn test_norm_small_integer() {
        let mut w = BitWriter::new();
        pack_norm_small_integer(&mut w, 5).unwrap();
        assert_eq!(bits_of(&w), "0000101");
        pack_norm_small_integer(&mut w, 64).unwrap();
        let bytes = w.finish();
        let mut r = BitCursor::new(&bytes);
        assert_eq!(unpack_norm_small_integer(&mut r).unwrap(), 5);
        assert_eq!(unpack_norm_small_integer(&mut r).unwrap(), 64);
    }

    #[test]
    fn test_aligned_constrained_forms() {
        let mut w = BitWriter::new();
        w.write_bool(true).unwrap();
        pack_constrained_whole_number(&mut w, 3, 0, 255, true).unwrap();
        assert_eq!(w.distance(), 16);
        pack_constrained_whole_number(&mut w, 0x1234, 0, 65535, true).unwrap();
        assert_eq!(w.distance(), 32);
        assert_eq!(w.as_bytes(), &[0x80, 0x03, 0x12, 0x34]);

        let mut w = BitWriter::new();
        pack_constrained_whole_number(&mut w, 5, 0, 1 << 20, true).unwrap();
        // 2-bit octet count (0 => 1 octet), pad, one octet
        assert_eq!(w.as_bytes(), &[0x00, 0x05]);
        let bytes = w.finish();
        let mut r = BitCursor::new(&bytes);
        assert_eq!(
            unpack_constrained_whole_number(&mut r, 0, 1 << 20, true).unwrap(),
            5
        );
    }

    #[test]
    fn test_integer_packer() {
        let packer = IntegerPacker::new(1u16, 8);
        let mut w = BitWriter::new();
        packer.pack(&mut w, &8).unwrap();
        assert_eq!(w.distance(), 3);
        let bytes = w.finish();
        let mut r = BitCursor::new(&bytes);
        assert_eq!(packer.unpack(&mut r).unwrap(), 8);
        assert!(packer.pack(&mut BitWriter::new(), &0).is_err());
    }
}
