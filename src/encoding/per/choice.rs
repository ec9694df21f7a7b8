// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CHOICE discriminators (X.691 §23).
//!
//! A CHOICE is modelled as a Rust enum with data per alternative. Its
//! discriminant uses the same wire discipline as an ENUMERATED index; an
//! index that names no alternative is logged through
//! [`log_invalid_choice_id`] and fails the operation.

use serde::{Deserialize, Serialize};

use super::codec::{PerDecode, PerEncode};
use super::cursor::BitCursor;
use super::enumerated::pack_enum;
use super::integer::{range_bits, unpack_norm_small_integer};
use super::writer::BitWriter;
use crate::core::diagnostics::{log_invalid_access_choice_id, log_invalid_choice_id};
use crate::core::{CodecError, ErrorCode, Result as CoreResult};
use crate::encoding::json::{JsonWriter, ToJson};

/// Shape of a CHOICE discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChoiceIndex {
    /// Number of alternatives, root and extension
    pub nof_types: u32,
    /// Number of extension alternatives
    pub nof_exts: u32,
    /// Whether the CHOICE has an extension marker
    pub has_ext: bool,
}

impl ChoiceIndex {
    /// Non-extensible CHOICE with `nof_types` alternatives.
    pub const fn new(nof_types: u32) -> Self {
        Self {
            nof_types,
            nof_exts: 0,
            has_ext: false,
        }
    }

    /// Extensible CHOICE with `nof_exts` of its `nof_types` alternatives in the extension.
    pub const fn extensible(nof_types: u32, nof_exts: u32) -> Self {
        Self {
            nof_types,
            nof_exts,
            has_ext: true,
        }
    }

    /// Number of root alternatives.
    pub const fn nof_root(&self) -> u32 {
        self.nof_types - self.nof_exts
    }
}

/// Encode discriminant `idx` of a CHOICE named `name`.
pub fn pack_choice(w: &mut BitWriter, index: ChoiceIndex, idx: u32, name: &str) -> CoreResult<()> {
    if idx >= index.nof_types {
        log_invalid_choice_id(idx, name);
        return Err(CodecError::invalid_choice(idx, name, ErrorCode::EncodeFail));
    }
    pack_enum(w, idx, index.nof_types, index.nof_exts, index.has_ext)
}

/// Decode the discriminant of a CHOICE named `name`.
pub fn unpack_choice(r: &mut BitCursor<'_>, index: ChoiceIndex, name: &str) -> CoreResult<u32> {
    let idx = if index.has_ext && r.read_bool()? {
        let n = unpack_norm_small_integer(r)?;
        u32::try_from(n)
            .ok()
            .and_then(|n| n.checked_add(index.nof_root()))
            .unwrap_or(u32::MAX)
    } else {
        let width = if index.has_ext {
            index.nof_root()
        } else {
            index.nof_types
        };
        r.read_bits(range_bits(u128::from(width)))? as u32
    };
    if idx >= index.nof_types {
        log_invalid_choice_id(idx, name);
        return Err(CodecError::invalid_choice(idx, name, ErrorCode::DecodeFail));
    }
    Ok(idx)
}

/// SetupRelease{T} ::= CHOICE { release NULL, setup T }
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupRelease<T> {
    /// Release the configuration
    #[default]
    Release,
    /// Set up the configuration
    Setup(T),
}

impl<T> SetupRelease<T> {
    /// ASN.1 type name.
    pub const NAME: &'static str = "setup_release_c";
    /// Discriminant shape.
    pub const INDEX: ChoiceIndex = ChoiceIndex::new(2);

    /// Discriminant of the active alternative.
    pub fn type_index(&self) -> u32 {
        match self {
            SetupRelease::Release => 0,
            SetupRelease::Setup(_) => 1,
        }
    }

    /// Name of the active alternative.
    pub fn type_name(&self) -> &'static str {
        match self {
            SetupRelease::Release => "release",
            SetupRelease::Setup(_) => "setup",
        }
    }

    /// Check whether the setup alternative is active.
    pub fn is_setup(&self) -> bool {
        matches!(self, SetupRelease::Setup(_))
    }

    /// Setup content; accessing it while released is reported as an invalid access.
    pub fn setup(&self) -> Option<&T> {
        match self {
            SetupRelease::Setup(c) => Some(c),
            SetupRelease::Release => {
                log_invalid_access_choice_id(1, self.type_index());
                None
            }
        }
    }
}

impl<T: PerEncode> PerEncode for SetupRelease<T> {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        pack_choice(w, Self::INDEX, self.type_index(), Self::NAME)?;
        match self {
            SetupRelease::Release => Ok(()),
            SetupRelease::Setup(c) => c.pack(w),
        }
    }
}

impl<T: PerDecode> PerDecode for SetupRelease<T> {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        match unpack_choice(r, Self::INDEX, Self::NAME)? {
            0 => Ok(SetupRelease::Release),
            _ => Ok(SetupRelease::Setup(T::unpack(r)?)),
        }
    }
}

impl<T: ToJson> ToJson for SetupRelease<T> {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        if let SetupRelease::Setup(c) = self {
            j.write_fieldname("setup");
            c.to_json(j);
        } else {
            j.write_null("release");
        }
        j.end_obj();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Diagnostics;

    #[test]
    fn test_two_alternatives_use_one_bit() {
        let mut w = BitWriter::new();
        pack_choice(&mut w, ChoiceIndex::new(2), 1, "c").unwrap();
        assert_eq!(w.distance(), 1);
    }

    #[test]
    fn test_pack_unknown_alternative() {
        let mut w = BitWriter::new();
        let err = pack_choice(&mut w, ChoiceIndex::new(2), 5, "c").unwrap_err();
        assert!(matches!(err, CodecError::InvalidChoice { id: 5, .. }));
        assert!(err.is_encode_failure());
    }

    #[test]
    fn test_unpack_out_of_range_discriminant() {
        // 3 bits of 0b101 for a 5-alternative CHOICE
        let data = [0xa0];
        let before = Diagnostics::snapshot();
        let mut r = BitCursor::new(&data);
        let err = unpack_choice(&mut r, ChoiceIndex::new(5), "five_c").unwrap_err();
        assert!(matches!(err, CodecError::InvalidChoice { id: 5, .. }));
        assert!(err.is_decode_failure());
        assert!(Diagnostics::snapshot().since(&before).invalid_choice_ids >= 1);
    }

    #[test]
    fn test_extensible_choice() {
        let index = ChoiceIndex::extensible(4, 1);
        let mut w = BitWriter::new();
        pack_choice(&mut w, index, 2, "c").unwrap();
        pack_choice(&mut w, index, 3, "c").unwrap();
        // 0 10 | 1 0000000
        assert_eq!(w.distance(), 3 + 8);
        let bytes = w.finish();
        let mut r = BitCursor::new(&bytes);
        assert_eq!(unpack_choice(&mut r, index, "c").unwrap(), 2);
        assert_eq!(unpack_choice(&mut r, index, "c").unwrap(), 3);
    }

    #[test]
    fn test_setup_release_round_trip() {
        let value: SetupRelease<bool> = SetupRelease::Setup(true);
        let mut w = BitWriter::new();
        value.pack(&mut w).unwrap();
        assert_eq!(w.as_bytes(), &[0xc0]);
        let mut r = BitCursor::new(w.as_bytes());
        assert_eq!(SetupRelease::<bool>::unpack(&mut r).unwrap(), value);
        assert_eq!(value.setup(), Some(&true));
    }

    #[test]
    fn test_setup_access_on_release() {
        let value: SetupRelease<bool> = SetupRelease::Release;
        assert!(!value.is_setup());
        assert_eq!(value.type_name(), "release");
        assert_eq!(value.setup(), None);
    }
}
