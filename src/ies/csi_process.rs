// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! P-C-AndCBSR-r13 and its codebook subset restriction CHOICE.
//!
//! ```text
//! P-C-AndCBSR-r13 ::= SEQUENCE {
//!     p-C-r13             INTEGER (-8..15),
//!     cbsr-Selection-r13  CHOICE {
//!         nonPrecoded-r13   SEQUENCE {
//!             codebookSubsetRestriction1-r13  BIT STRING,
//!             codebookSubsetRestriction2-r13  BIT STRING
//!         },
//!         beamformedK1a-r13 SEQUENCE {
//!             codebookSubsetRestriction3-r13  BIT STRING
//!         },
//!         beamformedKN-r13  SEQUENCE {
//!             alternativeCodebookEnabledBeamformed-r13  ENUMERATED {true} OPTIONAL,
//!             codebookSubsetRestriction-r13             BIT STRING
//!         },
//!         ...
//!     },
//!     ...
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Result as CoreResult;
use crate::encoding::json::{JsonWriter, ToJson};
use crate::encoding::per::{
    pack_choice, pack_integer, unpack_choice, unpack_integer, BitCursor, BitWriter, ChoiceIndex,
    DynBitString, Enumerated, ExtGroupsPacker, ExtGroupsUnpacker, PerDecode, PerEncode,
};

crate::enumerated! {
    /// alternativeCodebookEnabledBeamformed-r13
    pub enum AltCodebookEnabledBfR13 = "bf_kn_r13_s_::alt_codebook_enabled_bf_r13_e_" {
        True => "true",
    }
}

/// nonPrecoded-r13
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonPrecodedR13 {
    #[serde(rename = "codebookSubsetRestriction1-r13")]
    pub cbsr1_r13: DynBitString,
    #[serde(rename = "codebookSubsetRestriction2-r13")]
    pub cbsr2_r13: DynBitString,
}

/// beamformedK1a-r13
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BfK1aR13 {
    #[serde(rename = "codebookSubsetRestriction3-r13")]
    pub cbsr3_r13: DynBitString,
}

/// beamformedKN-r13
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BfKnR13 {
    #[serde(
        rename = "alternativeCodebookEnabledBeamformed-r13",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub alt_codebook_enabled_bf_r13: Option<AltCodebookEnabledBfR13>,
    #[serde(rename = "codebookSubsetRestriction-r13")]
    pub cbsr_r13: DynBitString,
}

impl PerEncode for NonPrecodedR13 {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        self.cbsr1_r13.pack(w)?;
        self.cbsr2_r13.pack(w)
    }
}

impl PerDecode for NonPrecodedR13 {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        Ok(Self {
            cbsr1_r13: DynBitString::unpack(r)?,
            cbsr2_r13: DynBitString::unpack(r)?,
        })
    }
}

impl PerEncode for BfK1aR13 {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        self.cbsr3_r13.pack(w)
    }
}

impl PerDecode for BfK1aR13 {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        Ok(Self {
            cbsr3_r13: DynBitString::unpack(r)?,
        })
    }
}

impl PerEncode for BfKnR13 {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        w.write_bool(self.alt_codebook_enabled_bf_r13.is_some())?;
        if let Some(alt) = &self.alt_codebook_enabled_bf_r13 {
            alt.pack(w)?;
        }
        self.cbsr_r13.pack(w)
    }
}

impl PerDecode for BfKnR13 {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        let alt_present = r.read_bool()?;
        let alt_codebook_enabled_bf_r13 = if alt_present {
            Some(AltCodebookEnabledBfR13::unpack(r)?)
        } else {
            None
        };
        Ok(Self {
            alt_codebook_enabled_bf_r13,
            cbsr_r13: DynBitString::unpack(r)?,
        })
    }
}

impl ToJson for NonPrecodedR13 {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        j.write_str("codebookSubsetRestriction1-r13", &self.cbsr1_r13.to_string());
        j.write_str("codebookSubsetRestriction2-r13", &self.cbsr2_r13.to_string());
        j.end_obj();
    }
}

impl ToJson for BfK1aR13 {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        j.write_str("codebookSubsetRestriction3-r13", &self.cbsr3_r13.to_string());
        j.end_obj();
    }
}

impl ToJson for BfKnR13 {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        if let Some(alt) = &self.alt_codebook_enabled_bf_r13 {
            j.write_str("alternativeCodebookEnabledBeamformed-r13", alt.to_str());
        }
        j.write_str("codebookSubsetRestriction-r13", &self.cbsr_r13.to_string());
        j.end_obj();
    }
}

/// cbsr-Selection-r13
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CbsrSelR13 {
    #[serde(rename = "nonPrecoded-r13")]
    NonPrecodedR13(NonPrecodedR13),
    #[serde(rename = "beamformedK1a-r13")]
    BfK1aR13(BfK1aR13),
    #[serde(rename = "beamformedKN-r13")]
    BfKnR13(BfKnR13),
}

impl Default for CbsrSelR13 {
    fn default() -> Self {
        CbsrSelR13::NonPrecodedR13(NonPrecodedR13::default())
    }
}

impl CbsrSelR13 {
    /// ASN.1 type name.
    pub const NAME: &'static str = "p_c_and_cbsr_r13_s::cbsr_sel_r13_c_";
    /// Discriminant shape: three root alternatives and an extension marker.
    pub const INDEX: ChoiceIndex = ChoiceIndex::extensible(3, 0);

    /// Discriminant of the active alternative.
    pub fn type_index(&self) -> u32 {
        match self {
            CbsrSelR13::NonPrecodedR13(_) => 0,
            CbsrSelR13::BfK1aR13(_) => 1,
            CbsrSelR13::BfKnR13(_) => 2,
        }
    }

    /// Name of the active alternative.
    pub fn type_name(&self) -> &'static str {
        match self {
            CbsrSelR13::NonPrecodedR13(_) => "nonPrecoded-r13",
            CbsrSelR13::BfK1aR13(_) => "beamformedK1a-r13",
            CbsrSelR13::BfKnR13(_) => "beamformedKN-r13",
        }
    }
}

impl PerEncode for CbsrSelR13 {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        pack_choice(w, Self::INDEX, self.type_index(), Self::NAME)?;
        match self {
            CbsrSelR13::NonPrecodedR13(c) => c.pack(w),
            CbsrSelR13::BfK1aR13(c) => c.pack(w),
            CbsrSelR13::BfKnR13(c) => c.pack(w),
        }
    }
}

impl PerDecode for CbsrSelR13 {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        Ok(match unpack_choice(r, Self::INDEX, Self::NAME)? {
            0 => CbsrSelR13::NonPrecodedR13(NonPrecodedR13::unpack(r)?),
            1 => CbsrSelR13::BfK1aR13(BfK1aR13::unpack(r)?),
            _ => CbsrSelR13::BfKnR13(BfKnR13::unpack(r)?),
        })
    }
}

impl ToJson for CbsrSelR13 {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        j.write_fieldname(self.type_name());
        match self {
            CbsrSelR13::NonPrecodedR13(c) => c.to_json(j),
            CbsrSelR13::BfK1aR13(c) => c.to_json(j),
            CbsrSelR13::BfKnR13(c) => c.to_json(j),
        }
        j.end_obj();
    }
}

/// P-C-AndCBSR-r13
///
/// `ext` is the extension marker of the SEQUENCE. No extension groups are
/// defined yet; a set marker sends an empty group bitmap, and groups from a
/// newer encoder are skipped on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PCAndCbsrR13 {
    #[serde(default, skip_serializing)]
    pub ext: bool,
    #[serde(rename = "p-C-r13")]
    pub p_c_r13: i8,
    #[serde(rename = "cbsr-Selection-r13")]
    pub cbsr_sel_r13: CbsrSelR13,
}

impl PCAndCbsrR13 {
    /// ASN.1 type name.
    pub const NAME: &'static str = "p_c_and_cbsr_r13_s";
}

impl PerEncode for PCAndCbsrR13 {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        let aligned = w.aligned();
        w.write_bool(self.ext)?;
        pack_integer(w, self.p_c_r13, -8i8, 15i8, false, aligned)?;
        self.cbsr_sel_r13.pack(w)?;
        if self.ext {
            ExtGroupsPacker::new().pack(w)?;
        }
        Ok(())
    }
}

impl PerDecode for PCAndCbsrR13 {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        let aligned = r.aligned();
        let ext = r.read_bool()?;
        let p_c_r13 = unpack_integer(r, -8i8, 15i8, false, aligned)?;
        let cbsr_sel_r13 = CbsrSelR13::unpack(r)?;
        if ext {
            let mut groups = ExtGroupsUnpacker::new(0);
            groups.unpack(r)?;
            groups.skip_unknown(r)?;
        }
        Ok(Self {
            ext,
            p_c_r13,
            cbsr_sel_r13,
        })
    }
}

impl ToJson for PCAndCbsrR13 {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        j.write_int("p-C-r13", self.p_c_r13);
        j.write_fieldname("cbsr-Selection-r13");
        self.cbsr_sel_r13.to_json(j);
        j.end_obj();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::per::check_pack_unpack_consistency;

    fn k1a(bits: &str) -> PCAndCbsrR13 {
        PCAndCbsrR13 {
            ext: false,
            p_c_r13: -8,
            cbsr_sel_r13: CbsrSelR13::BfK1aR13(BfK1aR13 {
                cbsr3_r13: bits.parse().unwrap(),
            }),
        }
    }

    #[test]
    fn test_k1a_layout() {
        let mut w = BitWriter::new();
        k1a("1010").pack(&mut w).unwrap();
        // ext 0 | p-C 00000 | choice ext 0, idx 01 | len 00000100 | 1010
        assert_eq!(w.distance(), 1 + 5 + 3 + 8 + 4);
        assert_eq!(w.as_bytes(), &[0x00, 0x82, 0x50]);
    }

    #[test]
    fn test_k1a_round_trip() {
        let value = k1a("1010");
        let bytes = check_pack_unpack_consistency(&value).unwrap();
        let mut r = BitCursor::new(&bytes);
        let decoded = PCAndCbsrR13::unpack(&mut r).unwrap();
        assert_eq!(decoded.p_c_r13, -8);
        match &decoded.cbsr_sel_r13 {
            CbsrSelR13::BfK1aR13(c) => assert_eq!(c.cbsr3_r13, "1010"),
            other => panic!("unexpected alternative {other:?}"),
        }
    }

    #[test]
    fn test_p_c_bounds() {
        let mut value = k1a("1");
        value.p_c_r13 = 15;
        assert!(check_pack_unpack_consistency(&value).is_ok());
        value.p_c_r13 = 16;
        assert!(check_pack_unpack_consistency(&value)
            .unwrap_err()
            .is_encode_failure());
    }

    #[test]
    fn test_kn_optional_field() {
        let value = PCAndCbsrR13 {
            ext: true,
            p_c_r13: 3,
            cbsr_sel_r13: CbsrSelR13::BfKnR13(BfKnR13 {
                alt_codebook_enabled_bf_r13: Some(AltCodebookEnabledBfR13::True),
                cbsr_r13: "11".parse().unwrap(),
            }),
        };
        assert!(check_pack_unpack_consistency(&value).is_ok());
    }

    #[test]
    fn test_json_names_match_serde() {
        let value = k1a("0110");
        let json = crate::encoding::json::to_json_string(&value);
        let back: PCAndCbsrR13 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
