#![no_std]

//! Composable, trait-based decoders from delimited text into typed Rust
//! values.
//!
//! Cellar decodes naive delimited documents (rows split on `\n`, cells split
//! on `,`) in four layers, each built on the one below:
//!
//! 1. [`cell`]: a single text cell into a typed value ([`DecodeCell`]).
//! 2. [`row`]: an ordered sequence of cells into a typed aggregate
//!    ([`DecodeRow`]), such as a tuple, a `Vec` or a derived struct.
//! 3. Combinators: `Option<A>`, `Either<A, B>` and `Vec<A>` decoders derived
//!    from the decoders of their parts.
//! 4. [`document`]: applies a row decoder to every row of a text.
//!
//! Most users should start with [`document::decode`] and the
//! [`DecodeRow`](macro@DecodeRow) derive macro. Decoders can also be built
//! and combined as values ([`CellDecoder`], [`RowDecoder`]), and resolved by
//! type from an explicit [`Registry`] assembled at start-up.
//!
//! ```
//! let rows: Vec<(i32, String)> = cellar::document::decode("1,Nicolas\n2,Jessica")
//!     .collect::<Result<_, _>>()?;
//! ```
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader-based decoding (default).
//! - `uuid`: enable a cell decoder for `uuid::Uuid`.

extern crate alloc;

pub mod cell;
pub mod document;
pub mod registry;
pub mod row;

pub use cell::{CellDecoder, DecodeCell, EncodeCell};
pub use registry::{Registry, ResolveCell, ResolveRow};
pub use row::{DecodeRow, EncodeRow, RowDecoder};

/// Derive [`DecodeRow`] for a struct with a fixed list of fields.
///
/// _Requires Cargo feature `derive`._
///
/// Each field is decoded with its type's [`DecodeCell`] implementation from
/// the column matching its position in the declaration. Pin a field to
/// another column with the `column(N)` attribute.
///
/// ```
/// #[derive(Debug, DecodeRow)]
/// struct Person {
///     id: u32,
///     name: String,
///     #[column(3)]
///     email: Option<String>,
/// }
/// ```
#[cfg(feature = "derive")]
pub use cellar_derive::DecodeRow;

/// Derive [`EncodeRow`] for a struct with a fixed list of fields.
///
/// _Requires Cargo feature `derive`._
///
/// Field placement follows the same rules as the
/// [`DecodeRow`](macro@DecodeRow) macro. Columns not claimed by any field
/// are written empty.
#[cfg(feature = "derive")]
pub use cellar_derive::EncodeRow;
