// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ENUMERATED discriminators (X.691 §14).
//!
//! Root values are a bit-field of `ceil(log2(nof_root))` bits. An extensible
//! enumeration prefixes the value with a marker bit and sends extension
//! values as a normally small number relative to the first extension.

use tracing::error;

use super::codec::ItemPacker;
use super::cursor::BitCursor;
use super::integer::{pack_norm_small_integer, range_bits, unpack_norm_small_integer};
use super::writer::BitWriter;
use crate::core::diagnostics::{invalid_enum_number, LOG_TARGET};
use crate::core::{CodecError, ErrorCode, Result as CoreResult};

/// An ASN.1 ENUMERATED type.
///
/// Usually declared with [`enumerated!`](crate::enumerated).
pub trait Enumerated: Copy + Sized + 'static {
    /// ASN.1 type name, used in diagnostics.
    const NAME: &'static str;
    /// Number of values, root and extension.
    const NOF_TYPES: u32;
    /// Number of extension values.
    const NOF_EXTS: u32 = 0;
    /// Whether the type has an extension marker.
    const HAS_EXT: bool = false;

    /// Position of the value in the declaration order.
    fn index(&self) -> u32;

    /// Value at position `idx`.
    fn from_index(idx: u32) -> Option<Self>;

    /// ASN.1 identifier of the value.
    fn to_str(&self) -> &'static str;
}

/// An ENUMERATED type whose values also map to numbers (e.g. `ms40` to 40).
pub trait EnumNumber: Enumerated {
    /// Numeric type of the mapping.
    type Number: Copy + PartialEq + std::fmt::Display;

    /// Numeric value.
    fn to_number(&self) -> Self::Number;

    /// Numeric value as text.
    fn to_number_string(&self) -> String {
        self.to_number().to_string()
    }
}

/// Encode enumeration index `idx`.
pub fn pack_enum(
    w: &mut BitWriter,
    idx: u32,
    nof_types: u32,
    nof_exts: u32,
    has_ext: bool,
) -> CoreResult<()> {
    if idx >= nof_types {
        error!(
            target: LOG_TARGET,
            "The provided enum is not within the range of possible values ({}>={})", idx, nof_types
        );
        return Err(CodecError::encode(
            "pack_enum",
            format!("index {idx} is not below {nof_types}"),
        ));
    }
    if !has_ext {
        return w.write_bits(u64::from(idx), range_bits(u128::from(nof_types)));
    }
    let nof_root = nof_types - nof_exts;
    let ext = idx >= nof_root;
    w.write_bool(ext)?;
    if ext {
        pack_norm_small_integer(w, u64::from(idx - nof_root))
    } else {
        w.write_bits(u64::from(idx), range_bits(u128::from(nof_root)))
    }
}

/// Decode an enumeration index.
///
/// An index that is not below `nof_types` is reported through
/// [`invalid_enum_number`] and fails the decode.
pub fn unpack_enum(
    r: &mut BitCursor<'_>,
    nof_types: u32,
    nof_exts: u32,
    has_ext: bool,
    name: &str,
) -> CoreResult<u32> {
    let idx = if has_ext {
        let nof_root = nof_types.saturating_sub(nof_exts);
        if r.read_bool()? {
            let n = unpack_norm_small_integer(r)?;
            u32::try_from(n)
                .ok()
                .and_then(|n| n.checked_add(nof_root))
                .unwrap_or(u32::MAX)
        } else {
            r.read_bits(range_bits(u128::from(nof_root)))? as u32
        }
    } else {
        r.read_bits(range_bits(u128::from(nof_types)))? as u32
    };
    if idx >= nof_types {
        invalid_enum_number(idx, name);
        return Err(CodecError::invalid_enum(idx, name, ErrorCode::DecodeFail));
    }
    Ok(idx)
}

/// Encode an [`Enumerated`] value.
pub fn pack_enumerated<E: Enumerated>(w: &mut BitWriter, e: &E) -> CoreResult<()> {
    pack_enum(w, e.index(), E::NOF_TYPES, E::NOF_EXTS, E::HAS_EXT)
}

/// Decode an [`Enumerated`] value.
pub fn unpack_enumerated<E: Enumerated>(r: &mut BitCursor<'_>) -> CoreResult<E> {
    let idx = unpack_enum(r, E::NOF_TYPES, E::NOF_EXTS, E::HAS_EXT, E::NAME)?;
    E::from_index(idx).ok_or_else(|| {
        invalid_enum_number(idx, E::NAME);
        CodecError::invalid_enum(idx, E::NAME, ErrorCode::DecodeFail)
    })
}

/// Item packer for sequences of enumerations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumPacker;

impl<E: Enumerated> ItemPacker<E> for EnumPacker {
    fn pack(&self, w: &mut BitWriter, item: &E) -> CoreResult<()> {
        pack_enumerated(w, item)
    }

    fn unpack(&self, r: &mut BitCursor<'_>) -> CoreResult<E> {
        unpack_enumerated(r)
    }
}

/// Option string of index `idx`, or `""` (with a diagnostic) when out of range.
pub fn convert_enum_idx(options: &[&'static str], idx: u32, enum_type: &str) -> &'static str {
    match options.get(idx as usize).copied() {
        Some(s) => s,
        None => {
            invalid_enum_number(idx, enum_type);
            ""
        }
    }
}

/// Number of index `idx`, or the default (with a diagnostic) when out of range.
pub fn map_enum_number<T: Copy + Default>(numbers: &[T], idx: u32, enum_type: &str) -> T {
    match numbers.get(idx as usize) {
        Some(n) => *n,
        None => {
            invalid_enum_number(idx, enum_type);
            T::default()
        }
    }
}

/// Value whose option string is `s`.
pub fn string_to_enum<E: Enumerated>(s: &str) -> Option<E> {
    (0..E::NOF_TYPES)
        .filter_map(E::from_index)
        .find(|e| e.to_str() == s)
}

/// Value whose number is `n`.
pub fn number_to_enum<E: EnumNumber>(n: E::Number) -> Option<E> {
    (0..E::NOF_TYPES)
        .filter_map(E::from_index)
        .find(|e| e.to_number() == n)
}

/// Value whose number, as text, is `s`.
pub fn number_string_to_enum<E: EnumNumber>(s: &str) -> Option<E> {
    (0..E::NOF_TYPES)
        .filter_map(E::from_index)
        .find(|e| e.to_number_string() == s)
}

/// Declare an ENUMERATED type.
///
/// Generates the Rust enum together with its [`Enumerated`] impl, PER and
/// JSON codecs, `Display`, and serde support keyed by the option strings.
/// An optional `[ext N]` marks the type extensible with `N` extension values
/// (the last `N` variants). A `: Type` after the name adds an
/// [`EnumNumber`] mapping, with one `= number` per variant.
///
/// ```
/// use rrc_per::enumerated;
/// use rrc_per::encoding::per::{EnumNumber, Enumerated};
///
/// enumerated! {
///     /// Number of antenna ports.
///     pub enum AntPortsCount = "ant_ports_count_e" : u8 {
///         An1 => "an1" = 1,
///         An2 => "an2" = 2,
///         An4 => "an4" = 4,
///         An8 => "an8" = 8,
///     }
/// }
///
/// assert_eq!(AntPortsCount::NOF_TYPES, 4);
/// assert_eq!(AntPortsCount::An4.to_str(), "an4");
/// assert_eq!(AntPortsCount::An8.to_number(), 8);
/// ```
#[macro_export]
macro_rules! enumerated {
    (@has_ext) => { false };
    (@has_ext $n:literal) => { true };
    (@nof_exts) => { 0 };
    (@nof_exts $n:literal) => { $n };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident = $asn:literal $([ext $nof_exts:literal])? {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            /// Option strings, in declaration order.
            pub const OPTIONS: &'static [&'static str] = &[$($text),+];
        }

        impl $crate::encoding::per::Enumerated for $name {
            const NAME: &'static str = $asn;
            const NOF_TYPES: u32 = $name::ALL.len() as u32;
            const NOF_EXTS: u32 = $crate::enumerated!(@nof_exts $($nof_exts)?);
            const HAS_EXT: bool = $crate::enumerated!(@has_ext $($nof_exts)?);

            fn index(&self) -> u32 {
                *self as u32
            }

            fn from_index(idx: u32) -> Option<Self> {
                $name::ALL.get(idx as usize).copied()
            }

            fn to_str(&self) -> &'static str {
                $crate::encoding::per::convert_enum_idx($name::OPTIONS, *self as u32, $asn)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::ALL[0]
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::encoding::per::Enumerated::to_str(self))
            }
        }

        impl $crate::encoding::per::PerEncode for $name {
            fn pack(&self, w: &mut $crate::encoding::per::BitWriter) -> $crate::core::Result<()> {
                $crate::encoding::per::pack_enumerated(w, self)
            }
        }

        impl $crate::encoding::per::PerDecode for $name {
            fn unpack(r: &mut $crate::encoding::per::BitCursor<'_>) -> $crate::core::Result<Self> {
                $crate::encoding::per::unpack_enumerated(r)
            }
        }

        impl $crate::encoding::json::ToJson for $name {
            fn to_json(&self, j: &mut $crate::encoding::json::JsonWriter) {
                j.write_str("", $crate::encoding::per::Enumerated::to_str(self));
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident = $asn:literal $([ext $nof_exts:literal])? : $num_ty:ty {
            $($variant:ident => $text:literal = $num:expr),+ $(,)?
        }
    ) => {
        $crate::enumerated! {
            $(#[$meta])*
            $vis enum $name = $asn $([ext $nof_exts])? {
                $($variant => $text),+
            }
        }

        impl $name {
            /// Numbers, in declaration order.
            pub const NUMBERS: &'static [$num_ty] = &[$($num),+];
        }

        impl $crate::encoding::per::EnumNumber for $name {
            type Number = $num_ty;

            fn to_number(&self) -> $num_ty {
                $crate::encoding::per::map_enum_number($name::NUMBERS, *self as u32, $asn)
            }
        }
    };
}
