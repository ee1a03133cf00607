//! Reader-based decoding.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use thiserror::Error;

use crate::row::{DecodeRow, RowDecoder};

use super::Dialect;

extern crate std;

/// Errors occurring while reading a document.
///
/// Failures decoding individual rows are not reading errors; they are
/// returned alongside the other rows.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The document is not valid UTF-8.
    #[error("Document is not valid UTF-8: {0}.")]
    Encoding(#[from] core::str::Utf8Error),
}

/// Decode every row of a document read to its end from a reader.
///
/// This method is also re-exported as `cellar::document::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode<T: DecodeRow>(
    r: &mut impl Read,
    dialect: &Dialect,
) -> Result<Vec<Result<T, super::Error>>, Error> {
    let buf = read(r)?;
    Ok(dialect.decode(core::str::from_utf8(&buf)?).collect())
}

/// Decode every row of a document read to its end from a reader, with a row
/// decoder.
///
/// _Requires Cargo feature `std`._
pub fn decode_with<T>(
    r: &mut impl Read,
    dialect: &Dialect,
    decoder: &RowDecoder<T>,
) -> Result<Vec<Result<T, super::Error>>, Error> {
    let buf = read(r)?;
    Ok(dialect.decode_with(core::str::from_utf8(&buf)?, decoder).collect())
}

fn read(r: &mut impl Read) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;

    tracing::debug!(bytes = buf.len(), "read document");

    Ok(buf)
}
