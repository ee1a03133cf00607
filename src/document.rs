//! Decoding whole documents.
//!
//! A document is split into rows on a row separator, and each row into cells
//! on a cell separator. The split is literal: quoting and escaping are not
//! interpreted, so a separator inside a cell always splits it, and a `\r`
//! before a `\n` stays part of the last cell. Documents needing these rules
//! should be read with a full CSV parser.
//!
//! A row separator at the very end of a document terminates the last row
//! rather than starting an empty one, and an empty document has no rows. A
//! zero-length row holds a single empty cell.
//!
//! Rows are decoded independently: a row failing to decode is reported, and
//! decoding continues with the next.

use alloc::{string::String, vec::Vec};
use core::{iter::Enumerate, str::SplitTerminator};

use thiserror::Error;
use tracing::{debug, trace};

use crate::row::{self, DecodeRow, EncodeRow, RowDecoder};

#[cfg(feature = "std")]
pub mod reader;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;

/// Errors occurring while decoding a document.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("Row {row}: {source}")]
pub struct Error {
    /// Zero-based position of the row in the document, counting any header.
    pub row: usize,
    /// Failure within the row.
    pub source: row::Error,
}

impl Error {
    /// Column responsible for the failure, if a single one is.
    pub fn column(&self) -> Option<usize> {
        self.source.column()
    }
}

/// Separators and row handling used to split a document.
///
/// The default dialect splits rows on `\n` and cells on `,`, and decodes
/// every row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dialect {
    row_separator: char,
    cell_separator: char,
    has_headers: bool,
    skip_empty_rows: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect {
    /// The default dialect.
    pub const fn new() -> Self {
        Self {
            row_separator: '\n',
            cell_separator: ',',
            has_headers: false,
            skip_empty_rows: false,
        }
    }

    /// Set the character separating rows.
    pub const fn row_separator(mut self, separator: char) -> Self {
        self.row_separator = separator;
        self
    }

    /// Set the character separating cells within a row.
    pub const fn cell_separator(mut self, separator: char) -> Self {
        self.cell_separator = separator;
        self
    }

    /// Treat the first row as a header, and skip it.
    pub const fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Skip zero-length rows instead of decoding them as a single empty cell.
    pub const fn skip_empty_rows(mut self, yes: bool) -> Self {
        self.skip_empty_rows = yes;
        self
    }

    /// Decode every row of a document with the [`DecodeRow`] implementation
    /// of `T`.
    pub fn decode<'a, T: DecodeRow>(&self, text: &'a str) -> Rows<'a, T> {
        Rows::new(*self, text, Decode::Static(T::decode_row))
    }

    /// Decode every row of a document with a row decoder.
    pub fn decode_with<'a, T>(&self, text: &'a str, decoder: &'a RowDecoder<T>) -> Rows<'a, T> {
        Rows::new(*self, text, Decode::Dynamic(decoder))
    }

    /// Encode rows into a document, terminating each with the row separator.
    ///
    /// Cells are written as they are: a cell containing a separator will not
    /// decode back to the same value.
    pub fn encode<I>(&self, rows: I) -> String
    where
        I: IntoIterator,
        I::Item: EncodeRow,
    {
        let mut text = String::new();

        for row in rows {
            for (i, cell) in row.encode_row().iter().enumerate() {
                if i != 0 {
                    text.push(self.cell_separator);
                }
                text.push_str(cell);
            }
            text.push(self.row_separator);
        }

        text
    }
}

/// Decode every row of a document in the default [`Dialect`].
pub fn decode<T: DecodeRow>(text: &str) -> Rows<'_, T> {
    Dialect::new().decode(text)
}

/// Decode every row of a document in the default [`Dialect`] with a row
/// decoder.
pub fn decode_with<'a, T>(text: &'a str, decoder: &'a RowDecoder<T>) -> Rows<'a, T> {
    Dialect::new().decode_with(text, decoder)
}

/// Encode rows into a document in the default [`Dialect`].
pub fn encode<I>(rows: I) -> String
where
    I: IntoIterator,
    I::Item: EncodeRow,
{
    Dialect::new().encode(rows)
}

enum Decode<'a, T> {
    Static(fn(&[&str]) -> Result<T, row::Error>),
    Dynamic(&'a RowDecoder<T>),
}

/// Lazily decoded rows of a document.
///
/// Yields one result per row, in document order. Collect into a
/// `Result<Vec<T>, Error>` to stop at the first failing row, or into a
/// `Vec<Result<T, Error>>` to keep every outcome.
pub struct Rows<'a, T> {
    dialect: Dialect,
    lines: Enumerate<SplitTerminator<'a, char>>,
    cells: Vec<&'a str>,
    decode: Decode<'a, T>,
}

impl<'a, T> Rows<'a, T> {
    fn new(dialect: Dialect, text: &'a str, decode: Decode<'a, T>) -> Self {
        debug!(
            bytes = text.len(),
            has_headers = dialect.has_headers,
            "decoding document"
        );

        Self {
            dialect,
            lines: text.split_terminator(dialect.row_separator).enumerate(),
            cells: Vec::new(),
            decode,
        }
    }
}

impl<T> Iterator for Rows<'_, T> {
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line) = self.lines.next()?;

            if index == 0 && self.dialect.has_headers {
                trace!(row = index, "skipping header");
                continue;
            }

            if line.is_empty() && self.dialect.skip_empty_rows {
                trace!(row = index, "skipping empty row");
                continue;
            }

            self.cells.clear();
            self.cells.extend(line.split(self.dialect.cell_separator));

            let result = match &self.decode {
                Decode::Static(decode) => decode(&self.cells),
                Decode::Dynamic(decoder) => decoder.decode(&self.cells),
            };

            return Some(match result {
                Ok(value) => {
                    trace!(row = index, cells = self.cells.len(), "decoded row");
                    Ok(value)
                }
                Err(source) => {
                    debug!(row = index, error = %source, "failed to decode row");
                    Err(Error { row: index, source })
                }
            });
        }
    }
}
