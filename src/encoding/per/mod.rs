// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Packed Encoding Rules (ITU-T X.691) runtime.
//!
//! This module provides the primitives that RRC information elements are
//! packed and unpacked with:
//! - [`writer`] / [`cursor`] - bit-granular write and read cursors
//! - [`integer`] - constrained, semi-constrained and unconstrained integers
//! - [`length`] - length determinants
//! - [`ext`] - extension markers, extension groups and open fields
//! - [`enumerated`] / [`choice`] - ENUMERATED and CHOICE discriminants
//! - [`seq_of`] - SEQUENCE OF
//! - [`bitstring`] / [`octstring`] - BIT STRING and OCTET STRING
//! - [`codec`] - the `PerEncode`/`PerDecode` traits and entry points
//!
//! The wire format is Unaligned PER unless the writer or cursor carries the
//! aligned variant.

pub mod bitstring;
pub mod choice;
pub mod codec;
pub mod cursor;
pub mod enumerated;
pub mod ext;
pub mod integer;
pub mod length;
pub mod octstring;
pub mod seq_of;
pub mod writer;

pub use bitstring::{BitString, BoundedBitString, DynBitString, FixedBitString, UNBOUNDED};
pub use choice::{pack_choice, unpack_choice, ChoiceIndex, SetupRelease};
pub use codec::{
    check_pack_unpack_consistency, decode, decode_with, encode, encode_with, BitPacker,
    ItemPacker, Packer, PerDecode, PerEncode,
};
pub use cursor::BitCursor;
pub use enumerated::{
    convert_enum_idx, map_enum_number, number_string_to_enum, number_to_enum, pack_enum,
    pack_enumerated, string_to_enum, unpack_enum, unpack_enumerated, EnumNumber, EnumPacker,
    Enumerated,
};
pub use ext::{
    pack_open_field, pack_unsupported_ext_flag, skip_open_field, unpack_open_field,
    unpack_unsupported_ext_flag, ExtGroupsPacker, ExtGroupsUnpacker,
};
pub use integer::{
    pack_constrained_whole_number, pack_integer, pack_norm_small_integer,
    pack_semi_constrained_whole_number, pack_unconstrained_whole_number, range_bits,
    unpack_constrained_whole_number, unpack_integer, unpack_norm_small_integer,
    unpack_semi_constrained_whole_number, unpack_unconstrained_whole_number, IntegerPacker,
    PerInt,
};
pub use length::{
    pack_constrained_length, pack_length, unpack_constrained_length, unpack_length, ASN_16K,
    ASN_64K,
};
pub use octstring::{BoundedOctString, DynOctString, FixedOctString, OctString};
pub use seq_of::{
    pack_dyn_seq_of, pack_fixed_seq_of, pack_seq_of, unpack_dyn_seq_of, unpack_fixed_seq_of,
    unpack_seq_of, SeqOfPacker,
};
pub use writer::BitWriter;
