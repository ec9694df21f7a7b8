// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! SEQUENCE OF codecs (X.691 §20).

use super::codec::{ItemPacker, Packer, PerDecode, PerEncode};
use super::cursor::BitCursor;
use super::length::{pack_constrained_length, unpack_constrained_length};
use super::writer::BitWriter;
use crate::core::{CodecError, ErrorCode, Result as CoreResult};

/// Encode a SEQUENCE (SIZE(lb..ub)) OF items with `packer`.
///
/// The item count goes first as a length determinant; a count outside
/// `[lb, ub]` fails before anything is written.
pub fn pack_dyn_seq_of<T, P>(
    w: &mut BitWriter,
    items: &[T],
    lb: usize,
    ub: usize,
    aligned: bool,
    packer: &P,
) -> CoreResult<()>
where
    P: ItemPacker<T>,
{
    pack_constrained_length(w, items.len(), lb, ub, aligned)?;
    for item in items {
        packer.pack(w, item)?;
    }
    Ok(())
}

/// Decode a SEQUENCE (SIZE(lb..ub)) OF items with `packer`.
pub fn unpack_dyn_seq_of<T, P>(
    r: &mut BitCursor<'_>,
    lb: usize,
    ub: usize,
    aligned: bool,
    packer: &P,
) -> CoreResult<Vec<T>>
where
    P: ItemPacker<T>,
{
    let n = unpack_constrained_length(r, lb, ub, aligned)?;
    // Preallocation is capped by the bits left in the buffer.
    let mut items = Vec::with_capacity(n.min(r.remaining_bits()));
    for _ in 0..n {
        items.push(packer.unpack(r)?);
    }
    Ok(items)
}

/// Encode a SEQUENCE (SIZE(n)) OF items: no determinant, exactly `n` items.
pub fn pack_fixed_seq_of<T, P>(
    w: &mut BitWriter,
    items: &[T],
    n: usize,
    packer: &P,
) -> CoreResult<()>
where
    P: ItemPacker<T>,
{
    if items.len() != n {
        return Err(CodecError::length_out_of_range(
            items.len(),
            n,
            n,
            ErrorCode::EncodeFail,
        ));
    }
    for item in items {
        packer.pack(w, item)?;
    }
    Ok(())
}

/// Decode a SEQUENCE (SIZE(n)) OF items.
pub fn unpack_fixed_seq_of<T, P>(r: &mut BitCursor<'_>, n: usize, packer: &P) -> CoreResult<Vec<T>>
where
    P: ItemPacker<T>,
{
    (0..n).map(|_| packer.unpack(r)).collect()
}

/// [`pack_dyn_seq_of`] for items that encode themselves.
pub fn pack_seq_of<T: PerEncode + PerDecode>(
    w: &mut BitWriter,
    items: &[T],
    lb: usize,
    ub: usize,
) -> CoreResult<()> {
    let aligned = w.aligned();
    pack_dyn_seq_of(w, items, lb, ub, aligned, &Packer)
}

/// [`unpack_dyn_seq_of`] for items that decode themselves.
pub fn unpack_seq_of<T: PerEncode + PerDecode>(
    r: &mut BitCursor<'_>,
    lb: usize,
    ub: usize,
) -> CoreResult<Vec<T>> {
    let aligned = r.aligned();
    unpack_dyn_seq_of(r, lb, ub, aligned, &Packer)
}

/// Item packer for nested SEQUENCE OF lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqOfPacker<P> {
    /// Minimum item count
    pub lb: usize,
    /// Maximum item count
    pub ub: usize,
    /// Packer of the inner items
    pub packer: P,
}

impl<P> SeqOfPacker<P> {
    /// Packer for lists of `[lb, ub]` items encoded by `packer`.
    pub fn new(lb: usize, ub: usize, packer: P) -> Self {
        Self { lb, ub, packer }
    }
}

impl<T, P: ItemPacker<T>> ItemPacker<Vec<T>> for SeqOfPacker<P> {
    fn pack(&self, w: &mut BitWriter, item: &Vec<T>) -> CoreResult<()> {
        let aligned = w.aligned();
        pack_dyn_seq_of(w, item, self.lb, self.ub, aligned, &self.packer)
    }

    fn unpack(&self, r: &mut BitCursor<'_>) -> CoreResult<Vec<T>> {
        let aligned = r.aligned();
        unpack_dyn_seq_of(r, self.lb, self.ub, aligned, &self.packer)
    }
}
