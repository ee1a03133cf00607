//! Decoders for single text cells.
//!
//! A type implementing [`DecodeCell`] can be read from one raw cell. The
//! implementations for scalar types live in [`primitive`]; this module adds
//! the combinators deriving decoders for `Option<A>` and `Either<A, B>` from
//! those of `A` and `B`.
//!
//! The same capabilities are available as values through [`CellDecoder`],
//! for decoders assembled at runtime or resolved from a
//! [`Registry`](crate::Registry).

use alloc::{boxed::Box, string::String};

use either::Either::{self, Left, Right};
use thiserror::Error;

pub mod decoder;
pub mod primitive;

pub use decoder::{CellDecoder, either, optional};

/// Errors occurring while decoding a cell.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// The cell text is not in the canonical form of the expected type.
    #[error("Cannot decode `{text}` as {expected}.")]
    Malformed { expected: &'static str, text: String },
    /// Neither side of a disjoint union accepted the cell.
    #[error("Cannot decode as {left} ({left_error}) or as {right} ({right_error}).")]
    Neither {
        left: &'static str,
        right: &'static str,
        left_error: Box<Error>,
        right_error: Box<Error>,
    },
}

impl Error {
    /// Build a [`Error::Malformed`] for some offending text.
    pub fn malformed(expected: &'static str, text: &str) -> Self {
        Self::Malformed {
            expected,
            text: text.into(),
        }
    }
}

/// Decode a value from a single cell.
///
/// Implementations must be total: return the value the text denotes, or an
/// error. A decoder never substitutes a default for text it cannot read.
pub trait DecodeCell: Sized {
    /// Decode a value from the raw text of a cell.
    fn decode_cell(cell: &str) -> Result<Self, Error>;

    /// Name of the type, as reported in decoding errors.
    fn expected() -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Encode a value to the raw text of a single cell.
///
/// For every type implementing both traits, decoding the encoded text of a
/// value yields the value again.
pub trait EncodeCell {
    /// Encode the value as cell text.
    fn encode_cell(&self) -> String;
}

/// An empty cell is absent, without consulting the decoder of `A`.
impl<A: DecodeCell> DecodeCell for Option<A> {
    fn decode_cell(cell: &str) -> Result<Self, Error> {
        decode_optional(cell, A::decode_cell)
    }
}

impl<A: EncodeCell> EncodeCell for Option<A> {
    fn encode_cell(&self) -> String {
        self.as_ref().map(A::encode_cell).unwrap_or_default()
    }
}

/// Left-biased: text accepted by both `A` and `B` decodes to [`Left`].
impl<A: DecodeCell, B: DecodeCell> DecodeCell for Either<A, B> {
    fn decode_cell(cell: &str) -> Result<Self, Error> {
        decode_either(cell, A::expected(), A::decode_cell, B::expected(), B::decode_cell)
    }
}

impl<A: EncodeCell, B: EncodeCell> EncodeCell for Either<A, B> {
    fn encode_cell(&self) -> String {
        match self {
            Left(a) => a.encode_cell(),
            Right(b) => b.encode_cell(),
        }
    }
}

pub(crate) fn decode_optional<A>(
    cell: &str,
    inner: impl FnOnce(&str) -> Result<A, Error>,
) -> Result<Option<A>, Error> {
    if cell.is_empty() {
        Ok(None)
    } else {
        inner(cell).map(Some)
    }
}

pub(crate) fn decode_either<A, B>(
    cell: &str,
    left: &'static str,
    a: impl FnOnce(&str) -> Result<A, Error>,
    right: &'static str,
    b: impl FnOnce(&str) -> Result<B, Error>,
) -> Result<Either<A, B>, Error> {
    let left_error = match a(cell) {
        Ok(value) => return Ok(Left(value)),
        Err(err) => err,
    };

    let right_error = match b(cell) {
        Ok(value) => return Ok(Right(value)),
        Err(err) => err,
    };

    Err(Error::Neither {
        left,
        right,
        left_error: Box::new(left_error),
        right_error: Box::new(right_error),
    })
}
