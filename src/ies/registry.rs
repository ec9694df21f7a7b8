// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Name-based lookup of information element codecs.
//!
//! The CLI and other tools that only know an IE by name go through an
//! [`IeRegistry`]: it decodes PER bytes to JSON and encodes JSON input to
//! PER bytes.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rrc_per::core::PerOptions;
//! use rrc_per::ies::global_registry;
//!
//! let codec = global_registry().get("periodicity_start_pos_r16")?;
//! let bytes = codec.encode_json(r#"{"periodicity20ms": 1}"#, &PerOptions::default())?;
//! assert_eq!(bytes, vec![0x30]);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{OnceLock, RwLock};

use serde::de::DeserializeOwned;

use super::{CsiRsCfgNzpR11, PCAndCbsrR13, PeriodicityStartPosR16};
use crate::core::diagnostics::log_error_code;
use crate::core::{CodecError, PerOptions, Result};
use crate::encoding::json::{to_json_string, ToJson};
use crate::encoding::per::{decode_with, encode_with, PerDecode, PerEncode};

/// Codec for one information element, addressed by name.
pub trait IeCodec: Send + Sync {
    /// Registered name.
    fn name(&self) -> &str;

    /// ASN.1 type name.
    fn asn1_type(&self) -> &str;

    /// Decode PER bytes and render the IE as JSON.
    fn decode_json(&self, data: &[u8], opts: &PerOptions) -> Result<String>;

    /// Parse the IE from JSON and encode it.
    fn encode_json(&self, json: &str, opts: &PerOptions) -> Result<Vec<u8>>;
}

/// [`IeCodec`] for any type with PER, JSON output and serde input support.
pub struct TypedIe<T> {
    name: &'static str,
    asn1_type: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedIe<T> {
    /// Codec registered as `name` for the ASN.1 type `asn1_type`.
    pub fn new(name: &'static str, asn1_type: &'static str) -> Self {
        Self {
            name,
            asn1_type,
            _marker: PhantomData,
        }
    }
}

impl<T> IeCodec for TypedIe<T>
where
    T: PerEncode + PerDecode + ToJson + DeserializeOwned,
{
    fn name(&self) -> &str {
        self.name
    }

    fn asn1_type(&self) -> &str {
        self.asn1_type
    }

    fn decode_json(&self, data: &[u8], opts: &PerOptions) -> Result<String> {
        let value: T = decode_with(data, opts).map_err(|e| log_error_code(e, self.name))?;
        Ok(to_json_string(&value))
    }

    fn encode_json(&self, json: &str, opts: &PerOptions) -> Result<Vec<u8>> {
        let value: T = serde_json::from_str(json)
            .map_err(|e| CodecError::encode(self.name, format!("invalid JSON input: {e}")))
            .map_err(|e| log_error_code(e, self.name))?;
        encode_with(&value, opts).map_err(|e| log_error_code(e, self.name))
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> CodecError {
    CodecError::Other(format!("IE registry lock poisoned: {e}"))
}

/// Registry of IE codecs.
#[derive(Default)]
pub struct IeRegistry {
    codecs: RwLock<HashMap<String, Box<dyn IeCodec>>>,
}

impl IeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in IEs.
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        let builtin: [Box<dyn IeCodec>; 3] = [
            Box::new(TypedIe::<PeriodicityStartPosR16>::new(
                "periodicity_start_pos_r16",
                PeriodicityStartPosR16::NAME,
            )),
            Box::new(TypedIe::<PCAndCbsrR13>::new(
                "p_c_and_cbsr_r13",
                PCAndCbsrR13::NAME,
            )),
            Box::new(TypedIe::<CsiRsCfgNzpR11>::new(
                "csi_rs_cfg_nzp_r11",
                CsiRsCfgNzpR11::NAME,
            )),
        ];
        if let Ok(mut codecs) = registry.codecs.write() {
            for codec in builtin {
                codecs.insert(codec.name().to_string(), codec);
            }
        }
        registry
    }

    /// Register `codec` under its name, replacing any previous entry.
    pub fn register(&self, codec: Box<dyn IeCodec>) -> Result<()> {
        let mut codecs = self.codecs.write().map_err(lock_error)?;
        codecs.insert(codec.name().to_string(), codec);
        Ok(())
    }

    /// Remove the codec named `name`. Returns whether one was registered.
    pub fn unregister(&self, name: &str) -> Result<bool> {
        let mut codecs = self.codecs.write().map_err(lock_error)?;
        Ok(codecs.remove(name).is_some())
    }

    /// Check if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.codecs
            .read()
            .map(|codecs| codecs.contains_key(name))
            .unwrap_or(false)
    }

    /// Registered names with their ASN.1 types, sorted by name.
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let codecs = self.codecs.read().map_err(lock_error)?;
        let mut entries: Vec<_> = codecs
            .values()
            .map(|c| (c.name().to_string(), c.asn1_type().to_string()))
            .collect();
        entries.sort();
        Ok(entries)
    }

    /// Run `f` with the codec named `name`.
    pub fn with_codec<R>(&self, name: &str, f: impl FnOnce(&dyn IeCodec) -> Result<R>) -> Result<R> {
        let codecs = self.codecs.read().map_err(lock_error)?;
        let codec = codecs
            .get(name)
            .ok_or_else(|| CodecError::Other(format!("unknown IE: {name}")))?;
        f(codec.as_ref())
    }

    /// Handle to the codec named `name`.
    pub fn get(&self, name: &str) -> Result<IeHandle<'_>> {
        if !self.contains(name) {
            return Err(CodecError::Other(format!("unknown IE: {name}")));
        }
        Ok(IeHandle {
            registry: self,
            name: name.to_string(),
        })
    }

    /// Number of registered codecs.
    pub fn len(&self) -> usize {
        self.codecs.read().map(|codecs| codecs.len()).unwrap_or(0)
    }

    /// Check if no codec is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed handle to a registered codec.
pub struct IeHandle<'a> {
    registry: &'a IeRegistry,
    name: String,
}

impl IeHandle<'_> {
    /// Decode PER bytes and render the IE as JSON.
    pub fn decode_json(&self, data: &[u8], opts: &PerOptions) -> Result<String> {
        self.registry
            .with_codec(&self.name, |c| c.decode_json(data, opts))
    }

    /// Parse the IE from JSON and encode it.
    pub fn encode_json(&self, json: &str, opts: &PerOptions) -> Result<Vec<u8>> {
        self.registry
            .with_codec(&self.name, |c| c.encode_json(json, opts))
    }
}

static GLOBAL_REGISTRY: OnceLock<IeRegistry> = OnceLock::new();

/// Registry of the built-in IEs, shared by the whole process.
pub fn global_registry() -> &'static IeRegistry {
    GLOBAL_REGISTRY.get_or_init(IeRegistry::with_builtin)
}
