// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CHOICE and SEQUENCE OF tests.

mod common;

use common::{bits_of, pack_with};
use rrc_per::core::Diagnostics;
use rrc_per::encoding::per::{
    pack_choice, pack_dyn_seq_of, pack_fixed_seq_of, pack_norm_small_integer, unpack_choice,
    unpack_dyn_seq_of,
    unpack_fixed_seq_of, BitCursor, BitWriter, ChoiceIndex, EnumPacker, IntegerPacker,
    PerDecode, PerEncode, SeqOfPacker, SetupRelease,
};
use rrc_per::ies::{FreqDensityR14, MbsfnSfCfg, MbsfnSfCfgListSetup, RadioframeAllocPeriod, SfAlloc};
use rrc_per::{CodecError, ErrorCode};

// ============================================================================
// CHOICE
// ============================================================================

#[test]
fn test_choice_index_widths() {
    let w = pack_with(|w| pack_choice(w, ChoiceIndex::new(8), 5, "eight_c"));
    assert_eq!(bits_of(&w), "101");

    // Extensible, root alternative: marker then 2 bits.
    let w = pack_with(|w| pack_choice(w, ChoiceIndex::extensible(3, 0), 2, "three_c"));
    assert_eq!(bits_of(&w), "010");

    // Extension alternative: marker then a normally small offset.
    let w = pack_with(|w| pack_choice(w, ChoiceIndex::extensible(4, 1), 3, "four_c"));
    assert_eq!(bits_of(&w), "10000000");

    let mut r = BitCursor::new(w.as_bytes());
    assert_eq!(
        unpack_choice(&mut r, ChoiceIndex::extensible(4, 1), "four_c").unwrap(),
        3
    );
}

#[test]
fn test_choice_encode_rejects_unset_index() {
    let mut w = BitWriter::new();
    let err = pack_choice(&mut w, ChoiceIndex::new(2), 5, "two_c").unwrap_err();
    assert!(matches!(
        err,
        CodecError::InvalidChoice {
            id: 5,
            direction: ErrorCode::EncodeFail,
            ..
        }
    ));
    assert_eq!(w.distance(), 0);
}

#[test]
fn test_choice_decode_unknown_alternative() {
    let before = Diagnostics::snapshot();

    // Extension marker set, offset 3: index 2 + 3 = 5 on a 2-alternative CHOICE.
    let data = [0x83];
    let mut r = BitCursor::new(&data);
    let err = unpack_choice(&mut r, ChoiceIndex::extensible(2, 0), "two_c").unwrap_err();
    assert!(matches!(
        err,
        CodecError::InvalidChoice {
            id: 5,
            direction: ErrorCode::DecodeFail,
            ..
        }
    ));

    let delta = Diagnostics::snapshot().since(&before);
    assert!(delta.invalid_choice_ids >= 1);
}

#[test]
fn test_choice_decode_oversized_extension_index() {
    for offset in [1u64 << 33, u64::MAX] {
        let mut w = BitWriter::new();
        w.write_bool(true).unwrap();
        pack_norm_small_integer(&mut w, offset).unwrap();

        let mut r = BitCursor::new(w.as_bytes());
        let err = unpack_choice(&mut r, ChoiceIndex::extensible(4, 1), "four_c").unwrap_err();
        assert!(err.is_decode_failure(), "offset {offset}: {err}");
        assert!(matches!(err, CodecError::InvalidChoice { .. }));
    }
}

#[test]
fn test_setup_release() {
    let w = pack_with(|w| SetupRelease::<bool>::Release.pack(w));
    assert_eq!(bits_of(&w), "0");

    let w = pack_with(|w| SetupRelease::Setup(true).pack(w));
    assert_eq!(bits_of(&w), "11");

    let mut r = BitCursor::new(w.as_bytes());
    let decoded = SetupRelease::<bool>::unpack(&mut r).unwrap();
    assert!(decoded.is_setup());
    assert_eq!(decoded.setup(), Some(&true));
}

#[test]
fn test_setup_access_on_release_is_counted() {
    let before = Diagnostics::snapshot();
    let released = SetupRelease::<bool>::Release;
    assert_eq!(released.setup(), None);
    let delta = Diagnostics::snapshot().since(&before);
    assert!(delta.invalid_access_ids >= 1);
}

// ============================================================================
// SEQUENCE OF
// ============================================================================

#[test]
fn test_dyn_seq_of_integers() {
    let packer = IntegerPacker::new(0u8, 7);
    let w = pack_with(|w| pack_dyn_seq_of(w, &[1u8, 2, 3], 1, 4, false, &packer));
    // count 3 in 1..=4, then three 3-bit items
    assert_eq!(bits_of(&w), "10001010011");

    let mut r = BitCursor::new(w.as_bytes());
    let items = unpack_dyn_seq_of(&mut r, 1, 4, false, &packer).unwrap();
    assert_eq!(items, vec![1, 2, 3]);
}

#[test]
fn test_dyn_seq_of_size_violations() {
    let packer = IntegerPacker::new(0u8, 7);
    let mut w = BitWriter::new();
    let err = pack_dyn_seq_of(&mut w, &Vec::<u8>::new(), 1, 4, false, &packer).unwrap_err();
    assert!(matches!(err, CodecError::LengthOutOfRange { length: 0, .. }));

    let err = pack_dyn_seq_of(&mut w, &[0u8; 5], 1, 4, false, &packer).unwrap_err();
    assert!(err.is_encode_failure());
    assert_eq!(w.distance(), 0);
}

#[test]
fn test_dyn_seq_of_truncated_input() {
    let packer = IntegerPacker::new(0u8, 255);
    // Count says 4 items of 8 bits, but only one octet follows.
    let data = [0xc0, 0x10];
    let mut r = BitCursor::new(&data);
    let err = unpack_dyn_seq_of(&mut r, 1, 4, false, &packer).unwrap_err();
    assert!(matches!(err, CodecError::BufferTooShort { .. }));
}

#[test]
fn test_fixed_seq_of() {
    let packer = IntegerPacker::new(0u8, 3);
    let w = pack_with(|w| pack_fixed_seq_of(w, &[3u8, 0], 2, &packer));
    assert_eq!(bits_of(&w), "1100");

    let mut r = BitCursor::new(w.as_bytes());
    assert_eq!(unpack_fixed_seq_of(&mut r, 2, &packer).unwrap(), vec![3, 0]);

    let mut w = BitWriter::new();
    assert!(pack_fixed_seq_of(&mut w, &[1u8], 2, &packer).is_err());
}

#[test]
fn test_nested_seq_of() {
    let inner = SeqOfPacker::new(0, 2, IntegerPacker::new(0u8, 3));
    let lists = vec![vec![1u8, 2], vec![], vec![3]];
    let w = pack_with(|w| pack_dyn_seq_of(w, &lists, 1, 4, false, &inner));

    let mut r = BitCursor::new(w.as_bytes());
    let decoded = unpack_dyn_seq_of(&mut r, 1, 4, false, &inner).unwrap();
    assert_eq!(decoded, lists);
    assert_eq!(r.distance(), w.distance());
}

#[test]
fn test_seq_of_enumerated() {
    let values = [FreqDensityR14::D1, FreqDensityR14::D3];
    let w = pack_with(|w| pack_dyn_seq_of(w, &values, 1, 3, false, &EnumPacker));
    // count 2 in 1..=3, then d1 = 00, d3 = 10
    assert_eq!(bits_of(&w), "010010");

    let mut r = BitCursor::new(w.as_bytes());
    let decoded: Vec<FreqDensityR14> = unpack_dyn_seq_of(&mut r, 1, 3, false, &EnumPacker).unwrap();
    assert_eq!(decoded, values);
}

#[test]
fn test_mbsfn_list_of_choices() {
    let list = MbsfnSfCfgListSetup {
        sf_cfg_list: vec![
            MbsfnSfCfg {
                radioframe_alloc_period: RadioframeAllocPeriod::N4,
                radioframe_alloc_offset: 3,
                sf_alloc: SfAlloc::OneFrame("100001".parse().unwrap()),
            },
            MbsfnSfCfg {
                radioframe_alloc_period: RadioframeAllocPeriod::N32,
                radioframe_alloc_offset: 7,
                sf_alloc: SfAlloc::FourFrames("111100001111000011110000".parse().unwrap()),
            },
        ],
    };
    let w = pack_with(|w| list.pack(w));
    // count 3 bits, then 3 + 3 + 1 + 6 and 3 + 3 + 1 + 24
    assert_eq!(w.distance(), 3 + 13 + 31);

    let mut r = BitCursor::new(w.as_bytes());
    assert_eq!(MbsfnSfCfgListSetup::unpack(&mut r).unwrap(), list);
}
