//! Row decoders as values.

use alloc::{sync::Arc, vec::Vec};
use core::fmt;

use crate::cell::CellDecoder;

use super::{DecodeRow, Error, decode_collection};

type DecodeFn<T> = dyn Fn(&[&str]) -> Result<T, Error> + Send + Sync;

/// A shareable, immutable capability to decode a `T` from the cells of a
/// row.
///
/// Fixed-shape decoders are built from a tuple of [`CellDecoder`]s, and
/// records by mapping over them:
///
/// ```
/// let people = RowDecoder::from((CellDecoder::<u32>::of(), CellDecoder::<String>::of()))
///     .map(|(id, name)| Person { id, name });
/// ```
pub struct RowDecoder<T> {
    decode: Arc<DecodeFn<T>>,
}

impl<T: 'static> RowDecoder<T> {
    /// Build a decoder from a function.
    pub fn from_fn(decode: impl Fn(&[&str]) -> Result<T, Error> + Send + Sync + 'static) -> Self {
        Self {
            decode: Arc::new(decode),
        }
    }

    /// The decoder given by the [`DecodeRow`] implementation of `T`.
    pub fn of() -> Self
    where
        T: DecodeRow,
    {
        Self::from_fn(T::decode_row)
    }

    /// Transform decoded values, keeping failures unchanged.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> RowDecoder<U> {
        RowDecoder::from_fn(move |row| self.decode(row).map(&f))
    }
}

impl<T> RowDecoder<T> {
    /// Decode a value from the raw text of each cell in a row.
    pub fn decode(&self, row: &[&str]) -> Result<T, Error> {
        (self.decode)(row)
    }
}

impl<T> Clone for RowDecoder<T> {
    fn clone(&self) -> Self {
        Self {
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<T> fmt::Debug for RowDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowDecoder").finish_non_exhaustive()
    }
}

/// Derive a decoder of rows of any length, holding values of a single type.
///
/// Cells are decoded with `cell` from left to right, and collected in that
/// order. The first failing cell aborts the row. An empty row decodes to an
/// empty vector.
pub fn collection<A: 'static>(cell: CellDecoder<A>) -> RowDecoder<Vec<A>> {
    RowDecoder::from_fn(move |row| decode_collection(row, |c| cell.decode(c)))
}
