// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout rrc-per.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Encode/decode failure reporting
//! - [`diagnostics`] - Logging hooks and counters for malformed input
//! - [`PerVariant`] - Aligned or unaligned PER
//! - [`PerOptions`] - Codec configuration

pub mod diagnostics;
pub mod error;

pub use diagnostics::{Diagnostics, DiagnosticsSnapshot};
pub use error::{CodecError, ErrorCode, Result};

/// PER variant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PerVariant {
    /// Unaligned PER (X.691 UPER), used by LTE RRC
    #[default]
    Unaligned,
    /// Aligned PER
    Aligned,
}

/// Error returned when parsing a `PerVariant` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseVariantError {
    _private: (),
}

impl std::fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid PER variant name, expected 'uper', 'unaligned', 'aper' or 'aligned'"
        )
    }
}

impl std::error::Error for ParseVariantError {}

impl std::str::FromStr for PerVariant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uper" | "unaligned" => Ok(PerVariant::Unaligned),
            "aper" | "aligned" => Ok(PerVariant::Aligned),
            _ => Err(ParseVariantError { _private: () }),
        }
    }
}

impl PerVariant {
    /// Check if this is the aligned variant.
    pub fn is_aligned(&self) -> bool {
        matches!(self, PerVariant::Aligned)
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PerVariant::Unaligned => "uper",
            PerVariant::Aligned => "aper",
        }
    }
}

/// Options for top-level encode and decode calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PerOptions {
    /// PER variant used for open fields and length determinants
    pub variant: PerVariant,

    /// Capacity limit of the output buffer in bytes.
    /// If None, the buffer grows without bound.
    pub max_bytes: Option<usize>,
}

impl Default for PerOptions {
    fn default() -> Self {
        Self {
            variant: PerVariant::Unaligned,
            max_bytes: None,
        }
    }
}

impl PerOptions {
    /// Select the PER variant.
    pub fn with_variant(mut self, variant: PerVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Limit the encoded output to `max_bytes` bytes.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }

    /// Check if the aligned variant is selected.
    pub fn aligned(&self) -> bool {
        self.variant.is_aligned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_str() {
        assert_eq!("uper".parse::<PerVariant>(), Ok(PerVariant::Unaligned));
        assert_eq!("APER".parse::<PerVariant>(), Ok(PerVariant::Aligned));
        assert!("ber".parse::<PerVariant>().is_err());
    }

    #[test]
    fn test_variant_as_str() {
        assert_eq!(PerVariant::Unaligned.as_str(), "uper");
        assert!(PerVariant::Aligned.is_aligned());
    }

    #[test]
    fn test_options_builder() {
        let opts = PerOptions::default()
            .with_variant(PerVariant::Aligned)
            .with_max_bytes(64);
        assert!(opts.aligned());
        assert_eq!(opts.max_bytes, Some(64));
        assert!(!PerOptions::default().aligned());
    }
}
