// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for rrc-per.
//!
//! Every pack/unpack call returns a [`Result`]. Errors fall in two families:
//! - Encode failures: the caller broke a packing precondition (value out of
//!   range, list size outside its cardinality, buffer capacity exhausted)
//! - Decode failures: the bitstream is truncated, malformed, or carries a
//!   value this decoder version does not know
//!
//! [`CodecError::code`] collapses any error into one of the two families.

use thiserror::Error;

/// Coarse result code of a codec call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A packing precondition was violated.
    EncodeFail,
    /// The input bitstream could not be decoded.
    DecodeFail,
}

impl ErrorCode {
    /// Human-readable name of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EncodeFail => "encode failure",
            ErrorCode::DecodeFail => "decode failure",
        }
    }
}

/// Errors that can occur while packing or unpacking PER data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Generic encoding failure
    #[error("Encode failure in {context}: {message}")]
    EncodeFailure {
        /// What was being encoded
        context: String,
        /// Error message
        message: String,
    },

    /// Generic decoding failure
    #[error("Decode failure in {context}: {message}")]
    DecodeFailure {
        /// What was being decoded
        context: String,
        /// Error message
        message: String,
    },

    /// Not enough bits left in the input
    #[error("Buffer too short: requested {requested} bits at bit position {cursor_pos}, but only {available} bits available")]
    BufferTooShort {
        /// Requested bits
        requested: usize,
        /// Available bits
        available: usize,
        /// Cursor position (in bits) when the error occurred
        cursor_pos: usize,
    },

    /// The output buffer reached its configured capacity
    #[error("Buffer capacity exceeded: writing {requested} bits at bit position {cursor_pos} exceeds the limit of {capacity} bytes")]
    CapacityExceeded {
        /// Requested bits
        requested: usize,
        /// Capacity limit in bytes
        capacity: usize,
        /// Cursor position (in bits) when the error occurred
        cursor_pos: usize,
    },

    /// Integer value outside its declared range
    #[error("Value {value} is outside the range [{lb}, {ub}] ({direction})")]
    ValueOutOfRange {
        /// Offending value
        value: i128,
        /// Lower bound
        lb: i128,
        /// Upper bound
        ub: i128,
        /// Which side detected the violation
        direction: ErrorCode,
    },

    /// Length or cardinality outside its declared bounds
    #[error("Length {length} is outside the bounds [{lb}, {ub}] ({direction})")]
    LengthOutOfRange {
        /// Offending length
        length: usize,
        /// Lower bound
        lb: usize,
        /// Upper bound
        ub: usize,
        /// Which side detected the violation
        direction: ErrorCode,
    },

    /// Unknown or unset CHOICE discriminant
    #[error("Invalid choice id={id} for choice type {choice_type} ({direction})")]
    InvalidChoice {
        /// Discriminant value
        id: u32,
        /// CHOICE type name
        choice_type: String,
        /// Which side detected the violation
        direction: ErrorCode,
    },

    /// ENUMERATED value outside the known options
    #[error("Invalid value {value} for enumerated {enum_type} ({direction})")]
    InvalidEnum {
        /// Index that was read or provided
        value: u32,
        /// ENUMERATED type name
        enum_type: String,
        /// Which side detected the violation
        direction: ErrorCode,
    },

    /// Feature of X.691 this runtime does not implement
    #[error("Unsupported feature: '{feature}' ({direction})")]
    Unsupported {
        /// What is not supported
        feature: String,
        /// Which side detected the violation
        direction: ErrorCode,
    },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CodecError {
    /// Create a generic encode failure.
    pub fn encode(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodeFailure {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a generic decode failure.
    pub fn decode(context: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::DecodeFailure {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, cursor_pos: usize) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create a capacity exceeded error.
    pub fn capacity_exceeded(requested: usize, capacity: usize, cursor_pos: usize) -> Self {
        CodecError::CapacityExceeded {
            requested,
            capacity,
            cursor_pos,
        }
    }

    /// Create a value out of range error.
    pub fn value_out_of_range(
        value: impl Into<i128>,
        lb: impl Into<i128>,
        ub: impl Into<i128>,
        direction: ErrorCode,
    ) -> Self {
        CodecError::ValueOutOfRange {
            value: value.into(),
            lb: lb.into(),
            ub: ub.into(),
            direction,
        }
    }

    /// Create a length out of range error.
    pub fn length_out_of_range(length: usize, lb: usize, ub: usize, direction: ErrorCode) -> Self {
        CodecError::LengthOutOfRange {
            length,
            lb,
            ub,
            direction,
        }
    }

    /// Create an invalid choice error.
    pub fn invalid_choice(id: u32, choice_type: impl Into<String>, direction: ErrorCode) -> Self {
        CodecError::InvalidChoice {
            id,
            choice_type: choice_type.into(),
            direction,
        }
    }

    /// Create an invalid enumerated error.
    pub fn invalid_enum(value: u32, enum_type: impl Into<String>, direction: ErrorCode) -> Self {
        CodecError::InvalidEnum {
            value,
            enum_type: enum_type.into(),
            direction,
        }
    }

    /// Create an unsupported feature error.
    pub fn unsupported(feature: impl Into<String>, direction: ErrorCode) -> Self {
        CodecError::Unsupported {
            feature: feature.into(),
            direction,
        }
    }

    /// Classify the error as an encode or decode failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            CodecError::EncodeFailure { .. } | CodecError::CapacityExceeded { .. } => {
                ErrorCode::EncodeFail
            }
            CodecError::DecodeFailure { .. } | CodecError::BufferTooShort { .. } => {
                ErrorCode::DecodeFail
            }
            CodecError::ValueOutOfRange { direction, .. }
            | CodecError::LengthOutOfRange { direction, .. }
            | CodecError::InvalidChoice { direction, .. }
            | CodecError::InvalidEnum { direction, .. }
            | CodecError::Unsupported { direction, .. } => *direction,
            CodecError::Other(_) => ErrorCode::DecodeFail,
        }
    }

    /// Check whether this error was raised while encoding.
    pub fn is_encode_failure(&self) -> bool {
        self.code() == ErrorCode::EncodeFail
    }

    /// Check whether this error was raised while decoding.
    pub fn is_decode_failure(&self) -> bool {
        self.code() == ErrorCode::DecodeFail
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::EncodeFailure { context, message }
            | CodecError::DecodeFailure { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            CodecError::BufferTooShort {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::CapacityExceeded {
                requested,
                capacity,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("capacity", capacity.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::ValueOutOfRange { value, lb, ub, .. } => vec![
                ("value", value.to_string()),
                ("lb", lb.to_string()),
                ("ub", ub.to_string()),
            ],
            CodecError::LengthOutOfRange { length, lb, ub, .. } => vec![
                ("length", length.to_string()),
                ("lb", lb.to_string()),
                ("ub", ub.to_string()),
            ],
            CodecError::InvalidChoice {
                id, choice_type, ..
            } => vec![("id", id.to_string()), ("type", choice_type.clone())],
            CodecError::InvalidEnum {
                value, enum_type, ..
            } => vec![("value", value.to_string()), ("type", enum_type.clone())],
            CodecError::Unsupported { feature, .. } => vec![("feature", feature.clone())],
            CodecError::Other(msg) => vec![("message", msg.clone())],
        }
    }
}

/// Result type for rrc-per operations.
pub type Result<T> = std::result::Result<T, CodecError>;
