// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Length determinants (X.691 §10.9).
//!
//! Two forms are used:
//! - Constrained: the length is a constrained whole number over `[lb, ub]`
//!   when `ub < 64K`
//! - General: `0` + 7 bits below 128, `10` + 14 bits below 16K
//!
//! Fragmented lengths (16K and above) are not supported.

use tracing::error;

use super::cursor::BitCursor;
use super::integer::{pack_constrained_offset, unpack_constrained_offset};
use super::writer::BitWriter;
use crate::core::diagnostics::LOG_TARGET;
use crate::core::{CodecError, ErrorCode, Result as CoreResult};

/// 16K, the first length that needs fragmentation.
pub const ASN_16K: usize = 16_384;

/// 64K, the largest upper bound that still uses a constrained length.
pub const ASN_64K: usize = 65_536;

/// Encode a general length determinant.
pub fn pack_length(w: &mut BitWriter, len: usize, aligned: bool) -> CoreResult<()> {
    if aligned {
        w.align_bytes_zero()?;
    }
    if len < 128 {
        w.write_bits(len as u64, 8)
    } else if len < ASN_16K {
        w.write_bits(0b10, 2)?;
        w.write_bits(len as u64, 14)
    } else {
        error!(target: LOG_TARGET, "Not handling sizes longer than 16383 octets");
        Err(CodecError::unsupported(
            format!("fragmented length {len}"),
            ErrorCode::EncodeFail,
        ))
    }
}

/// Decode a general length determinant.
pub fn unpack_length(r: &mut BitCursor<'_>, aligned: bool) -> CoreResult<usize> {
    if aligned {
        r.align_bytes()?;
    }
    if !r.read_bool()? {
        return Ok(r.read_bits(7)? as usize);
    }
    if !r.read_bool()? {
        return Ok(r.read_bits(14)? as usize);
    }
    error!(target: LOG_TARGET, "Not handling sizes longer than 16383 octets");
    Err(CodecError::unsupported(
        "fragmented length",
        ErrorCode::DecodeFail,
    ))
}

/// Encode a length bounded to `[lb, ub]`.
///
/// Uses the constrained form when `ub < 64K` and the general form otherwise.
pub fn pack_constrained_length(
    w: &mut BitWriter,
    len: usize,
    lb: usize,
    ub: usize,
    aligned: bool,
) -> CoreResult<()> {
    if len < lb || len > ub {
        error!(
            target: LOG_TARGET,
            "The provided size ({}) is not within the bounds [{}, {}]", len, lb, ub
        );
        return Err(CodecError::length_out_of_range(
            len,
            lb,
            ub,
            ErrorCode::EncodeFail,
        ));
    }
    if ub < ASN_64K {
        pack_constrained_offset(w, (len - lb) as u128, (ub - lb) as u128 + 1, aligned)
    } else {
        pack_length(w, len, aligned)
    }
}

/// Decode a length bounded to `[lb, ub]`.
pub fn unpack_constrained_length(
    r: &mut BitCursor<'_>,
    lb: usize,
    ub: usize,
    aligned: bool,
) -> CoreResult<usize> {
    if lb > ub {
        return Err(CodecError::decode(
            "constrained length",
            format!("empty bounds [{lb}, {ub}]"),
        ));
    }
    let len = if ub < ASN_64K {
        lb + unpack_constrained_offset(r, (ub - lb) as u128 + 1, aligned)? as usize
    } else {
        unpack_length(r, aligned)?
    };
    if len < lb || len > ub {
        error!(
            target: LOG_TARGET,
            "The decoded size ({}) is not within the bounds [{}, {}]", len, lb, ub
        );
        return Err(CodecError::length_out_of_range(
            len,
            lb,
            ub,
            ErrorCode::DecodeFail,
        ));
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_length() {
        let mut w = BitWriter::new();
        pack_length(&mut w, 5, false).unwrap();
        assert_eq!(w.as_bytes(), &[0x05]);
        let mut r = BitCursor::new(w.as_bytes());
        assert_eq!(unpack_length(&mut r, false).unwrap(), 5);
    }

    #[test]
    fn test_long_length() {
        let mut w = BitWriter::new();
        pack_length(&mut w, 300, false).unwrap();
        assert_eq!(w.as_bytes(), &[0x81, 0x2c]);
        let mut r = BitCursor::new(w.as_bytes());
        assert_eq!(unpack_length(&mut r, false).unwrap(), 300);
    }

    #[test]
    fn test_fragmented_length_unsupported() {
        let mut w = BitWriter::new();
        let err = pack_length(&mut w, ASN_16K, false).unwrap_err();
        assert!(err.is_encode_failure());

        let data = [0xc1];
        let mut r = BitCursor::new(&data);
        assert!(unpack_length(&mut r, false).unwrap_err().is_decode_failure());
    }

    #[test]
    fn test_aligned_length() {
        let mut w = BitWriter::new();
        w.write_bool(true).unwrap();
        pack_length(&mut w, 2, true).unwrap();
        assert_eq!(w.as_bytes(), &[0x80, 0x02]);
        let mut r = BitCursor::new(w.as_bytes());
        r.read_bool().unwrap();
        assert_eq!(unpack_length(&mut r, true).unwrap(), 2);
    }

    #[test]
    fn test_constrained_length() {
        let mut w = BitWriter::new();
        pack_constrained_length(&mut w, 11, 5, 15, false).unwrap();
        assert_eq!(w.distance(), 4);
        pack_constrained_length(&mut w, 3, 3, 3, false).unwrap();
        assert_eq!(w.distance(), 4);
        assert!(pack_constrained_length(&mut w, 16, 5, 15, false).is_err());

        let mut r = BitCursor::new(w.as_bytes());
        assert_eq!(unpack_constrained_length(&mut r, 5, 15, false).unwrap(), 11);
        assert_eq!(unpack_constrained_length(&mut r, 3, 3, false).unwrap(), 3);
    }

    #[test]
    fn test_constrained_length_decode_out_of_bounds() {
        // 4 bits of 0b1111 over [5, 15] gives 20.
        let data = [0xf0];
        let mut r = BitCursor::new(&data);
        let err = unpack_constrained_length(&mut r, 5, 15, false).unwrap_err();
        assert!(matches!(err, CodecError::LengthOutOfRange { length: 20, .. }));
    }

    #[test]
    fn test_large_upper_bound_uses_general_length() {
        let mut w = BitWriter::new();
        pack_constrained_length(&mut w, 2, 0, ASN_64K, false).unwrap();
        assert_eq!(w.as_bytes(), &[0x02]);
    }
}
