// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! PeriodicityStartPos-r16.
//!
//! ```text
//! periodicityStartPos-r16 CHOICE {
//!     periodicity10ms   NULL,
//!     periodicity20ms   INTEGER (0..1),
//!     periodicity40ms   INTEGER (0..3),
//!     periodicity80ms   INTEGER (0..7),
//!     periodicity160ms  INTEGER (0..15),
//!     spare3 NULL, spare2 NULL, spare1 NULL
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Result as CoreResult;
use crate::encoding::json::{JsonWriter, ToJson};
use crate::encoding::per::{
    pack_choice, pack_integer, unpack_choice, unpack_integer, BitCursor, BitWriter, ChoiceIndex,
    PerDecode, PerEncode,
};

/// Start position of a periodic allocation, one alternative per period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodicityStartPosR16 {
    #[default]
    #[serde(rename = "periodicity10ms")]
    Periodicity10ms,
    #[serde(rename = "periodicity20ms")]
    Periodicity20ms(u8),
    #[serde(rename = "periodicity40ms")]
    Periodicity40ms(u8),
    #[serde(rename = "periodicity80ms")]
    Periodicity80ms(u8),
    #[serde(rename = "periodicity160ms")]
    Periodicity160ms(u8),
    #[serde(rename = "spare3")]
    Spare3,
    #[serde(rename = "spare2")]
    Spare2,
    #[serde(rename = "spare1")]
    Spare1,
}

impl PeriodicityStartPosR16 {
    /// ASN.1 type name.
    pub const NAME: &'static str = "periodicity_start_pos_r16_c";
    /// Discriminant shape.
    pub const INDEX: ChoiceIndex = ChoiceIndex::new(8);
    /// Alternative names, in declaration order.
    pub const OPTIONS: &'static [&'static str] = &[
        "periodicity10ms",
        "periodicity20ms",
        "periodicity40ms",
        "periodicity80ms",
        "periodicity160ms",
        "spare3",
        "spare2",
        "spare1",
    ];

    /// Discriminant of the active alternative.
    pub fn type_index(&self) -> u32 {
        match self {
            Self::Periodicity10ms => 0,
            Self::Periodicity20ms(_) => 1,
            Self::Periodicity40ms(_) => 2,
            Self::Periodicity80ms(_) => 3,
            Self::Periodicity160ms(_) => 4,
            Self::Spare3 => 5,
            Self::Spare2 => 6,
            Self::Spare1 => 7,
        }
    }

    /// Name of the active alternative.
    pub fn type_name(&self) -> &'static str {
        Self::OPTIONS[self.type_index() as usize]
    }

    /// Upper bound of the start offset carried by the alternative at `idx`.
    fn offset_ub(idx: u32) -> Option<u8> {
        match idx {
            1 => Some(1),
            2 => Some(3),
            3 => Some(7),
            4 => Some(15),
            _ => None,
        }
    }

    /// Start offset of the active alternative, if it carries one.
    pub fn offset(&self) -> Option<u8> {
        match *self {
            Self::Periodicity20ms(v)
            | Self::Periodicity40ms(v)
            | Self::Periodicity80ms(v)
            | Self::Periodicity160ms(v) => Some(v),
            _ => None,
        }
    }
}

impl PerEncode for PeriodicityStartPosR16 {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        let aligned = w.aligned();
        let idx = self.type_index();
        pack_choice(w, Self::INDEX, idx, Self::NAME)?;
        if let (Some(ub), Some(v)) = (Self::offset_ub(idx), self.offset()) {
            pack_integer(w, v, 0u8, ub, false, aligned)?;
        }
        Ok(())
    }
}

impl PerDecode for PeriodicityStartPosR16 {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        let aligned = r.aligned();
        let idx = unpack_choice(r, Self::INDEX, Self::NAME)?;
        let offset = match Self::offset_ub(idx) {
            Some(ub) => unpack_integer(r, 0u8, ub, false, aligned)?,
            None => 0,
        };
        Ok(match idx {
            0 => Self::Periodicity10ms,
            1 => Self::Periodicity20ms(offset),
            2 => Self::Periodicity40ms(offset),
            3 => Self::Periodicity80ms(offset),
            4 => Self::Periodicity160ms(offset),
            5 => Self::Spare3,
            6 => Self::Spare2,
            _ => Self::Spare1,
        })
    }
}

impl ToJson for PeriodicityStartPosR16 {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        match self.offset() {
            Some(v) => j.write_int(self.type_name(), v),
            None => j.write_null(self.type_name()),
        }
        j.end_obj();
    }
}
