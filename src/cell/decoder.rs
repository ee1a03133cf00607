//! Cell decoders as values.

use alloc::sync::Arc;
use core::fmt;

use either::Either;

use super::{DecodeCell, Error, decode_either, decode_optional};

type DecodeFn<T> = dyn Fn(&str) -> Result<T, Error> + Send + Sync;

/// A shareable, immutable capability to decode a `T` from a single cell.
///
/// Cloning is cheap: clones share the underlying function.
pub struct CellDecoder<T> {
    expected: &'static str,
    decode: Arc<DecodeFn<T>>,
}

impl<T: 'static> CellDecoder<T> {
    /// Build a decoder from a function, naming the type it produces.
    pub fn from_fn(
        expected: &'static str,
        decode: impl Fn(&str) -> Result<T, Error> + Send + Sync + 'static,
    ) -> Self {
        Self {
            expected,
            decode: Arc::new(decode),
        }
    }

    /// The decoder given by the [`DecodeCell`] implementation of `T`.
    pub fn of() -> Self
    where
        T: DecodeCell,
    {
        Self::from_fn(T::expected(), T::decode_cell)
    }

    /// Transform decoded values, keeping failures unchanged.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> CellDecoder<U> {
        let expected = self.expected;
        CellDecoder::from_fn(expected, move |cell| self.decode(cell).map(&f))
    }
}

impl<T> CellDecoder<T> {
    /// Decode a value from the raw text of a cell.
    pub fn decode(&self, cell: &str) -> Result<T, Error> {
        (self.decode)(cell)
    }

    /// Name of the decoded type, as reported in errors.
    pub fn expected(&self) -> &'static str {
        self.expected
    }
}

impl<T> Clone for CellDecoder<T> {
    fn clone(&self) -> Self {
        Self {
            expected: self.expected,
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<T> fmt::Debug for CellDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellDecoder")
            .field("expected", &self.expected)
            .finish_non_exhaustive()
    }
}

/// Derive a decoder of optional values.
///
/// An empty cell decodes to `None` without consulting `inner`. Any other
/// text is passed to `inner`, and its result is returned wrapped in `Some`.
pub fn optional<A: 'static>(inner: CellDecoder<A>) -> CellDecoder<Option<A>> {
    CellDecoder::from_fn(core::any::type_name::<Option<A>>(), move |cell| {
        decode_optional(cell, |cell| inner.decode(cell))
    })
}

/// Derive a decoder of a disjoint union.
///
/// The cell is given to `left` first, and to `right` only if `left` fails.
/// This order matters: text accepted by both decoders always decodes to
/// [`Either::Left`]. When both fail, the error names both attempted types
/// and carries both failures.
pub fn either<A: 'static, B: 'static>(
    left: CellDecoder<A>,
    right: CellDecoder<B>,
) -> CellDecoder<Either<A, B>> {
    CellDecoder::from_fn(core::any::type_name::<Either<A, B>>(), move |cell| {
        decode_either(
            cell,
            left.expected,
            |cell| left.decode(cell),
            right.expected,
            |cell| right.decode(cell),
        )
    })
}
