// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Forward compatibility: decoders built against an older release must skip
//! extensions added later and keep decoding what follows.

mod common;

use common::{csi_rs_full, csi_rs_root_only};
use rrc_per::encoding::per::{
    pack_integer, pack_norm_small_integer, pack_open_field, skip_open_field, unpack_integer,
    unpack_open_field,
    BitCursor, BitWriter, ExtGroupsPacker, ExtGroupsUnpacker, PerDecode, PerEncode,
};
use rrc_per::ies::{
    AntPortsCountR11, CbsrSelR13, CsiRsCfgNzpR11, NonPrecodedR13, PCAndCbsrR13,
    PeriodicityStartPosR16, QclCrsInfoR11,
};
use rrc_per::{CodecError, ErrorCode, Result};

rrc_per::enumerated! {
    /// Release 2 of an extensible enumeration: one extension value.
    pub enum ModeV2 = "mode_v2_e" [ext 1] {
        Off => "off",
        On => "on",
        Auto => "auto",
    }
}

rrc_per::enumerated! {
    /// Release 1 of the same enumeration: no extension value yet.
    pub enum ModeV1 = "mode_v1_e" [ext 0] {
        Off => "off",
        On => "on",
    }
}

/// CSI-RS-ConfigNZP-r11 as a decoder that only knows extension group 0 reads it.
fn unpack_csi_rs_v1310(r: &mut BitCursor<'_>) -> Result<(u8, Option<u8>)> {
    let ext = r.read_bool()?;
    let qcl_present = r.read_bool()?;
    let id: u8 = unpack_integer(r, 1, 3, false, false)?;
    AntPortsCountR11::unpack(r)?;
    unpack_integer::<u8>(r, 0, 31, false, false)?;
    unpack_integer::<u8>(r, 0, 154, false, false)?;
    unpack_integer::<u16>(r, 0, 503, false, false)?;
    if qcl_present {
        QclCrsInfoR11::unpack(r)?;
    }

    let mut id_v1310 = None;
    if ext {
        let mut groups = ExtGroupsUnpacker::new(1);
        groups.unpack(r)?;
        if groups.is_present(0) {
            id_v1310 = unpack_open_field(r, false, |r| {
                if r.read_bool()? {
                    Ok(Some(unpack_integer(r, 4u8, 24, false, false)?))
                } else {
                    Ok(None)
                }
            })?;
        }
        groups.skip_unknown(r)?;
    }
    Ok((id, id_v1310))
}

/// Root fields of `csi_rs_root_only()`, packed by hand.
fn pack_csi_rs_root(w: &mut BitWriter, ext: bool) -> Result<()> {
    w.write_bool(ext)?;
    w.write_bool(false)?;
    pack_integer(w, 2u8, 1, 3, false, false)?;
    AntPortsCountR11::An4.pack(w)?;
    pack_integer(w, 17u8, 0, 31, false, false)?;
    pack_integer(w, 100u8, 0, 154, false, false)?;
    pack_integer(w, 503u16, 0, 503, false, false)
}

// ============================================================================
// Extension groups
// ============================================================================

#[test]
fn test_old_decoder_skips_later_group() {
    let trailer = PeriodicityStartPosR16::Periodicity80ms(5);

    let mut w = BitWriter::new();
    csi_rs_full().pack(&mut w).unwrap();
    trailer.pack(&mut w).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    let (id, id_v1310) = unpack_csi_rs_v1310(&mut r).unwrap();
    assert_eq!(id, 2);
    assert_eq!(id_v1310, Some(24));
    assert_eq!(PeriodicityStartPosR16::unpack(&mut r).unwrap(), trailer);
    assert_eq!(r.distance(), w.distance());
}

#[test]
fn test_current_decoder_skips_unknown_group() {
    let trailer = PeriodicityStartPosR16::Periodicity20ms(1);

    let mut w = BitWriter::new();
    pack_csi_rs_root(&mut w, true).unwrap();
    let mut groups = ExtGroupsPacker::new();
    groups.set(0, true);
    groups.set(2, true);
    groups.pack(&mut w).unwrap();
    pack_open_field(&mut w, false, |w| {
        w.write_bool(true)?;
        pack_integer(w, 24u8, 4, 24, false, false)
    })
    .unwrap();
    // Group 2 does not exist in this release.
    pack_open_field(&mut w, false, |w| w.write_bits(0xabcde, 20)).unwrap();
    trailer.pack(&mut w).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    let decoded = CsiRsCfgNzpR11::unpack(&mut r).unwrap();
    assert_eq!(decoded.csi_rs_cfg_nzp_id_v1310, Some(24));
    assert_eq!(decoded.tx_comb_r14, None);
    assert_eq!(decoded.freq_density_r14, None);
    assert_eq!(PeriodicityStartPosR16::unpack(&mut r).unwrap(), trailer);
}

#[test]
fn test_group_with_appended_fields() {
    let mut w = BitWriter::new();
    pack_csi_rs_root(&mut w, true).unwrap();
    let mut groups = ExtGroupsPacker::new();
    groups.set(1, true);
    groups.pack(&mut w).unwrap();
    pack_open_field(&mut w, false, |w| {
        w.write_bool(true)?;
        w.write_bool(false)?;
        pack_integer(w, 1u8, 0, 2, false, false)?;
        // A field a newer encoder added to the group.
        w.write_bits(0x3ff, 10)
    })
    .unwrap();
    w.write_bits(0b101, 3).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    let decoded = CsiRsCfgNzpR11::unpack(&mut r).unwrap();
    assert_eq!(decoded.csi_rs_cfg_nzp_id_v1310, None);
    assert_eq!(decoded.tx_comb_r14, Some(1));
    assert_eq!(r.read_bits(3).unwrap(), 0b101);
}

#[test]
fn test_root_only_sends_no_extension() {
    let mut w = BitWriter::new();
    csi_rs_root_only().pack(&mut w).unwrap();
    let mut manual = BitWriter::new();
    pack_csi_rs_root(&mut manual, false).unwrap();
    assert_eq!(w.distance(), manual.distance());
    assert_eq!(w.as_bytes(), manual.as_bytes());
}

#[test]
fn test_open_field_longer_than_buffer() {
    let mut w = BitWriter::new();
    pack_csi_rs_root(&mut w, true).unwrap();
    let mut groups = ExtGroupsPacker::new();
    groups.set(0, true);
    groups.pack(&mut w).unwrap();
    // Length of 5 octets with a single octet behind it.
    w.write_bits(5, 8).unwrap();
    w.write_bits(0x80, 8).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    let err = CsiRsCfgNzpR11::unpack(&mut r).unwrap_err();
    assert!(err.is_decode_failure());
}

#[test]
fn test_skip_open_field_reports_octets() {
    let mut w = BitWriter::new();
    pack_open_field(&mut w, false, |w| w.write_bits(0x1ff, 9)).unwrap();
    pack_open_field(&mut w, false, |_| Ok(())).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    assert_eq!(skip_open_field(&mut r, false).unwrap(), 2);
    // An empty field still carries one octet.
    assert_eq!(skip_open_field(&mut r, false).unwrap(), 1);
    assert!(r.is_at_end());
}

#[test]
fn test_huge_group_count_is_decode_failure() {
    for count in [1u64 << 40, u64::MAX] {
        let mut w = BitWriter::new();
        pack_norm_small_integer(&mut w, count).unwrap();
        w.write_bits(0xff, 8).unwrap();

        let mut r = BitCursor::new(w.as_bytes());
        let err = ExtGroupsUnpacker::new(2).unpack(&mut r).unwrap_err();
        assert!(err.is_decode_failure(), "count {count}: {err}");
    }
}

#[test]
fn test_group_count_beyond_input_rejected_in_ie() {
    let mut w = BitWriter::new();
    pack_csi_rs_root(&mut w, true).unwrap();
    // 1 | length 6 | 2^40
    pack_norm_small_integer(&mut w, 1 << 40).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    let err = CsiRsCfgNzpR11::unpack(&mut r).unwrap_err();
    assert!(err.is_decode_failure());

    let mut w = BitWriter::new();
    w.write_bool(true).unwrap();
    pack_integer(&mut w, 0i8, -8, 15, false, false).unwrap();
    CbsrSelR13::NonPrecodedR13(NonPrecodedR13::default())
        .pack(&mut w)
        .unwrap();
    pack_norm_small_integer(&mut w, u64::MAX).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    assert!(PCAndCbsrR13::unpack(&mut r).unwrap_err().is_decode_failure());
}

// ============================================================================
// Extension markers without groups
// ============================================================================

#[test]
fn test_sequence_ext_marker_without_known_groups() {
    let value = PCAndCbsrR13 {
        ext: true,
        p_c_r13: 3,
        cbsr_sel_r13: CbsrSelR13::NonPrecodedR13(NonPrecodedR13 {
            cbsr1_r13: "11".parse().unwrap(),
            cbsr2_r13: "0".parse().unwrap(),
        }),
    };
    let mut w = BitWriter::new();
    value.pack(&mut w).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    let decoded = PCAndCbsrR13::unpack(&mut r).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(r.distance(), w.distance());
}

#[test]
fn test_sequence_skips_groups_of_newer_release() {
    let mut w = BitWriter::new();
    w.write_bool(true).unwrap();
    pack_integer(&mut w, 0i8, -8, 15, false, false).unwrap();
    CbsrSelR13::NonPrecodedR13(NonPrecodedR13::default())
        .pack(&mut w)
        .unwrap();
    let mut groups = ExtGroupsPacker::new();
    groups.set(0, true);
    groups.pack(&mut w).unwrap();
    pack_open_field(&mut w, false, |w| w.write_bits(0x5a, 8)).unwrap();
    w.write_bits(0b11, 2).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    let decoded = PCAndCbsrR13::unpack(&mut r).unwrap();
    assert!(decoded.ext);
    assert_eq!(decoded.p_c_r13, 0);
    assert_eq!(r.read_bits(2).unwrap(), 0b11);
}

// ============================================================================
// Extensible enumerations
// ============================================================================

#[test]
fn test_enum_extension_value_unknown_to_old_decoder() {
    let mut w = BitWriter::new();
    ModeV2::Auto.pack(&mut w).unwrap();

    let mut r = BitCursor::new(w.as_bytes());
    let err = ModeV1::unpack(&mut r).unwrap_err();
    assert!(matches!(
        err,
        CodecError::InvalidEnum {
            value: 2,
            direction: ErrorCode::DecodeFail,
            ..
        }
    ));

    // Root values keep their encoding across releases.
    let mut w = BitWriter::new();
    ModeV2::On.pack(&mut w).unwrap();
    let mut r = BitCursor::new(w.as_bytes());
    assert_eq!(ModeV1::unpack(&mut r).unwrap(), ModeV1::On);
}
