// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Parallel encoding and decoding of independent messages.
//!
//! Each message gets its own cursor on a rayon worker; a failure is reported
//! in that message's slot and does not affect the others.

use rayon::prelude::*;
use tracing::debug;

use super::per::{decode_with, encode_with, PerDecode, PerEncode};
use crate::core::diagnostics::LOG_TARGET;
use crate::core::{CodecError, PerOptions, Result as CoreResult};

/// Configuration for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Worker threads; `None` uses the global rayon pool
    pub num_threads: Option<usize>,
    /// Codec options applied to every message
    pub options: PerOptions,
}

impl BatchConfig {
    /// Use a dedicated pool of `num_threads` workers.
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Use the given codec options.
    pub fn with_options(mut self, options: PerOptions) -> Self {
        self.options = options;
        self
    }
}

fn run<R, F>(config: &BatchConfig, op: F) -> CoreResult<R>
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    match config.num_threads {
        None => Ok(op()),
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .thread_name(|index| format!("per-batch-{index}"))
                .build()
                .map_err(|e| {
                    CodecError::encode("batch", format!("Failed to create thread pool: {e}"))
                })?;
            Ok(pool.install(op))
        }
    }
}

/// Encode every value, preserving order.
pub fn encode_batch<T>(values: &[T], config: &BatchConfig) -> CoreResult<Vec<CoreResult<Vec<u8>>>>
where
    T: PerEncode + Sync,
{
    let results = run(config, || {
        values
            .par_iter()
            .map(|v| encode_with(v, &config.options))
            .collect::<Vec<_>>()
    })?;
    debug!(target: LOG_TARGET, messages = results.len(), "encoded batch");
    Ok(results)
}

/// Decode every message, preserving order.
pub fn decode_batch<T, B>(messages: &[B], config: &BatchConfig) -> CoreResult<Vec<CoreResult<T>>>
where
    T: PerDecode + Send,
    B: AsRef<[u8]> + Sync,
{
    let results = run(config, || {
        messages
            .par_iter()
            .map(|m| decode_with(m.as_ref(), &config.options))
            .collect::<Vec<_>>()
    })?;
    debug!(target: LOG_TARGET, messages = results.len(), "decoded batch");
    Ok(results)
}
