//! Cell decoders for scalar types.
//!
//! Numbers are read with their [`FromStr`](core::str::FromStr)
//! implementation, restricted to canonical text: surrounding whitespace and
//! a leading `+` are rejected, and integers may not have leading zeros.
//! Booleans accept exactly `true` and `false`. Strings accept any text,
//! including the empty cell.

use alloc::string::{String, ToString};

use super::{DecodeCell, EncodeCell, Error};

macro_rules! from_str_cell {
    ($canonical:ident: $($t:ty),* $(,)?) => {
        $(
            impl DecodeCell for $t {
                fn decode_cell(cell: &str) -> Result<Self, Error> {
                    if !$canonical(cell) {
                        return Err(Error::malformed(Self::expected(), cell));
                    }
                    cell.parse().map_err(|_| Error::malformed(Self::expected(), cell))
                }

                fn expected() -> &'static str {
                    stringify!($t)
                }
            }

            impl EncodeCell for $t {
                fn encode_cell(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

fn integer(cell: &str) -> bool {
    let digits = cell.strip_prefix('-').unwrap_or(cell);
    !cell.starts_with('+') && (digits == "0" || !digits.starts_with('0'))
}

fn float(cell: &str) -> bool {
    !cell.starts_with('+')
}

fn exact(_: &str) -> bool {
    true
}

from_str_cell! {
    integer:
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
}

from_str_cell! { float: f32, f64 }

from_str_cell! { exact: bool }

impl DecodeCell for String {
    fn decode_cell(cell: &str) -> Result<Self, Error> {
        Ok(cell.into())
    }

    fn expected() -> &'static str {
        "String"
    }
}

impl EncodeCell for String {
    fn encode_cell(&self) -> String {
        self.clone()
    }
}

impl EncodeCell for str {
    fn encode_cell(&self) -> String {
        self.into()
    }
}

impl<T: EncodeCell + ?Sized> EncodeCell for &T {
    fn encode_cell(&self) -> String {
        T::encode_cell(self)
    }
}

/// A cell holding exactly one Unicode scalar value.
impl DecodeCell for char {
    fn decode_cell(cell: &str) -> Result<Self, Error> {
        let mut chars = cell.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::malformed(Self::expected(), cell)),
        }
    }

    fn expected() -> &'static str {
        "char"
    }
}

impl EncodeCell for char {
    fn encode_cell(&self) -> String {
        self.to_string()
    }
}

/// A UUID in any of the textual forms accepted by [`uuid::Uuid::parse_str`].
///
/// _Requires Cargo feature `uuid`._
#[cfg(feature = "uuid")]
impl DecodeCell for uuid::Uuid {
    fn decode_cell(cell: &str) -> Result<Self, Error> {
        uuid::Uuid::parse_str(cell).map_err(|_| Error::malformed(Self::expected(), cell))
    }

    fn expected() -> &'static str {
        "Uuid"
    }
}

/// Encodes to the hyphenated lowercase form.
#[cfg(feature = "uuid")]
impl EncodeCell for uuid::Uuid {
    fn encode_cell(&self) -> String {
        self.hyphenated().to_string()
    }
}
