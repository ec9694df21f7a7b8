// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Diagnostics hooks for the PER runtime.
//!
//! Codec primitives report malformed discriminants and failing call sites
//! through the functions in this module. Each hook emits a `tracing` event
//! under the `asn1` target and bumps a process-wide counter, so a caller can
//! inspect how many problems a decode run hit without installing a
//! subscriber.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error, warn};

use super::error::{CodecError, ErrorCode};

/// Tracing target used by every diagnostics event.
pub const LOG_TARGET: &str = "asn1";

static INVALID_CHOICE_IDS: AtomicU64 = AtomicU64::new(0);
static INVALID_ACCESS_IDS: AtomicU64 = AtomicU64::new(0);
static INVALID_ENUM_NUMBERS: AtomicU64 = AtomicU64::new(0);
static ENCODE_FAILURES: AtomicU64 = AtomicU64::new(0);
static DECODE_FAILURES: AtomicU64 = AtomicU64::new(0);

/// Point-in-time copy of the diagnostics counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticsSnapshot {
    /// Unknown CHOICE discriminants seen on decode or encode
    pub invalid_choice_ids: u64,
    /// Accesses to a CHOICE alternative that is not the active one
    pub invalid_access_ids: u64,
    /// ENUMERATED values without a known option or number
    pub invalid_enum_numbers: u64,
    /// Encode failures reported through [`log_error_code`]
    pub encode_failures: u64,
    /// Decode failures reported through [`log_error_code`]
    pub decode_failures: u64,
}

impl DiagnosticsSnapshot {
    /// Sum of every counter.
    pub fn total(&self) -> u64 {
        self.invalid_choice_ids
            + self.invalid_access_ids
            + self.invalid_enum_numbers
            + self.encode_failures
            + self.decode_failures
    }

    /// Counter deltas between `earlier` and `self`.
    ///
    /// Counters are process-wide, so tests and batch runs compare two
    /// snapshots instead of resetting. Swapped arguments yield zeros.
    pub fn since(&self, earlier: &DiagnosticsSnapshot) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            invalid_choice_ids: self
                .invalid_choice_ids
                .saturating_sub(earlier.invalid_choice_ids),
            invalid_access_ids: self
                .invalid_access_ids
                .saturating_sub(earlier.invalid_access_ids),
            invalid_enum_numbers: self
                .invalid_enum_numbers
                .saturating_sub(earlier.invalid_enum_numbers),
            encode_failures: self.encode_failures.saturating_sub(earlier.encode_failures),
            decode_failures: self.decode_failures.saturating_sub(earlier.decode_failures),
        }
    }
}

/// Process-wide diagnostics counters.
pub struct Diagnostics;

impl Diagnostics {
    /// Read all counters.
    pub fn snapshot() -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            invalid_choice_ids: INVALID_CHOICE_IDS.load(Ordering::Relaxed),
            invalid_access_ids: INVALID_ACCESS_IDS.load(Ordering::Relaxed),
            invalid_enum_numbers: INVALID_ENUM_NUMBERS.load(Ordering::Relaxed),
            encode_failures: ENCODE_FAILURES.load(Ordering::Relaxed),
            decode_failures: DECODE_FAILURES.load(Ordering::Relaxed),
        }
    }
}

/// Report a CHOICE discriminant that matches no alternative.
pub fn log_invalid_choice_id(id: u32, choice_type: &str) {
    INVALID_CHOICE_IDS.fetch_add(1, Ordering::Relaxed);
    error!(
        target: LOG_TARGET,
        id,
        choice_type,
        "Invalid choice id={} for choice type {}",
        id,
        choice_type
    );
}

/// Report an access to a CHOICE alternative other than the active one.
pub fn log_invalid_access_choice_id(id: u32, expected: u32) {
    INVALID_ACCESS_IDS.fetch_add(1, Ordering::Relaxed);
    error!(
        target: LOG_TARGET,
        id,
        expected,
        "The access choice id is invalid ({}!={})",
        id,
        expected
    );
}

/// Report an ENUMERATED value that has no option or numeric mapping.
pub fn invalid_enum_number(value: u32, enum_type: &str) {
    INVALID_ENUM_NUMBERS.fetch_add(1, Ordering::Relaxed);
    error!(
        target: LOG_TARGET,
        value,
        enum_type,
        "The provided enum {} with value={} cannot be converted to a number",
        enum_type,
        value
    );
}

/// Report a failing codec call site and pass the error through.
///
/// ```
/// use rrc_per::core::diagnostics::log_error_code;
/// use rrc_per::core::{CodecError, ErrorCode};
///
/// let err = log_error_code(CodecError::decode("cbsr_sel_r13", "truncated"), "cbsr_sel_r13");
/// assert_eq!(err.code(), ErrorCode::DecodeFail);
/// ```
pub fn log_error_code(err: CodecError, site: &str) -> CodecError {
    match err.code() {
        ErrorCode::EncodeFail => {
            ENCODE_FAILURES.fetch_add(1, Ordering::Relaxed);
        }
        ErrorCode::DecodeFail => {
            DECODE_FAILURES.fetch_add(1, Ordering::Relaxed);
        }
    }
    let fields = err
        .log_fields()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ");
    warn!(target: LOG_TARGET, site, code = err.code().as_str(), %fields, "[{}] {}", site, err);
    err
}

/// Trace-level hook for skipped extension content.
pub(crate) fn log_skipped(what: &str, bits: usize) {
    debug!(target: LOG_TARGET, what, bits, "skipping unknown extension content");
}
