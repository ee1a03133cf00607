//! Decoders for rows of cells.
//!
//! A type implementing [`DecodeRow`] can be read from the ordered cells of a
//! single row. Implementations are provided for tuples of up to twelve
//! [`DecodeCell`] types (see [`tuple`]) and for `Vec<A>`; structs can derive
//! one with the [`DecodeRow`](macro@crate::DecodeRow) macro.
//!
//! Fixed-shape decoders fail fast: the first field that cannot be decoded
//! aborts the row, and the error records its column.

use alloc::{string::String, vec::Vec};

use thiserror::Error;

use crate::cell::{self, DecodeCell, EncodeCell};

pub mod decoder;
pub mod tuple;

pub use decoder::{RowDecoder, collection};

/// The encoded cells of one row.
pub type Cells = Vec<String>;

/// Errors occurring while decoding a row.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// The row has fewer cells than the decoder reads.
    #[error("Expected at least {expected} columns, found {found}.")]
    InsufficientColumns { expected: usize, found: usize },
    /// A cell could not be decoded.
    #[error("Column {column}: {source}")]
    Cell { column: usize, source: cell::Error },
}

impl Error {
    /// Column responsible for the failure, if a single one is.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Cell { column, .. } => Some(*column),
            Self::InsufficientColumns { .. } => None,
        }
    }
}

/// Decode a value from the cells of a row.
pub trait DecodeRow: Sized {
    /// Decode a value from the raw text of each cell in a row.
    fn decode_row(row: &[&str]) -> Result<Self, Error>;
}

/// Encode a value to the cells of a row.
pub trait EncodeRow {
    /// Encode the value as the text of each cell.
    fn encode_row(&self) -> Cells;
}

/// Every cell is decoded as an `A`, left to right. An empty row yields an
/// empty vector.
impl<A: DecodeCell> DecodeRow for Vec<A> {
    fn decode_row(row: &[&str]) -> Result<Self, Error> {
        decode_collection(row, A::decode_cell)
    }
}

impl<A: EncodeCell> EncodeRow for Vec<A> {
    fn encode_row(&self) -> Cells {
        self.iter().map(A::encode_cell).collect()
    }
}

impl<A: EncodeCell> EncodeRow for [A] {
    fn encode_row(&self) -> Cells {
        self.iter().map(A::encode_cell).collect()
    }
}

impl<T: EncodeRow + ?Sized> EncodeRow for &T {
    fn encode_row(&self) -> Cells {
        T::encode_row(self)
    }
}

/// Check that a row holds at least `expected` cells.
pub fn require(row: &[&str], expected: usize) -> Result<(), Error> {
    if row.len() < expected {
        Err(Error::InsufficientColumns {
            expected,
            found: row.len(),
        })
    } else {
        Ok(())
    }
}

/// Decode the cell at `column`, attributing any failure to that column.
pub fn column<T>(
    row: &[&str],
    column: usize,
    decode: impl FnOnce(&str) -> Result<T, cell::Error>,
) -> Result<T, Error> {
    let cell = row.get(column).ok_or(Error::InsufficientColumns {
        expected: column + 1,
        found: row.len(),
    })?;

    decode(cell).map_err(|source| Error::Cell { column, source })
}

/// A row of `len` empty cells, filled in by derived [`EncodeRow`]
/// implementations.
#[doc(hidden)]
pub fn empty_cells(len: usize) -> Cells {
    let mut cells = Vec::with_capacity(len);
    cells.resize(len, String::new());
    cells
}

pub(crate) fn decode_collection<A>(
    row: &[&str],
    mut decode: impl FnMut(&str) -> Result<A, cell::Error>,
) -> Result<Vec<A>, Error> {
    row.iter()
        .enumerate()
        .map(|(column, cell)| decode(cell).map_err(|source| Error::Cell { column, source }))
        .collect()
}
