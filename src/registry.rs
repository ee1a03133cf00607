//! Decoders resolved by type from an explicit registry.
//!
//! A [`Registry`] maps types to decoder values. It is populated once, before
//! decoding starts, and only read afterwards. Resolving a decoder for a type
//! either finds exactly one candidate or fails with an [`Error`], so a
//! document can never start decoding against a type without a decoder.
//!
//! Resolution chains through generic types: a decoder for `Option<A>` is
//! derived from the one resolved for `A`, a decoder for `Vec<A>` rows from
//! the cell decoder for `A`, and so on, until registered decoders are
//! reached. These rules are the [`ResolveCell`] and [`ResolveRow`]
//! implementations of the generic types. Other types opt in with an empty
//! implementation, which looks up their registrations:
//!
//! ```
//! impl ResolveCell for Currency {}
//!
//! let mut registry = Registry::default();
//! registry.register_cell(CellDecoder::from_fn("Currency", Currency::parse));
//!
//! let decoder = registry.row::<(Option<Currency>, u32)>()?;
//! ```
//!
//! A registration for a type that a rule can also derive counts as a second
//! candidate, and makes the type ambiguous.

use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};
use core::{
    any::{Any, TypeId, type_name},
    fmt,
};

use either::Either;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    cell::{self, CellDecoder},
    row::{self, RowDecoder, tuple::for_each_tuple},
};

/// Errors occurring while resolving a decoder.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// No decoder is registered or derivable for the type.
    #[error("No decoder available for `{type_name}`.")]
    Unavailable { type_name: &'static str },
    /// More than one decoder is registered or derivable for the type.
    #[error("Found {candidates} decoders for `{type_name}`.")]
    Ambiguous {
        type_name: &'static str,
        candidates: usize,
    },
}

type Entries = BTreeMap<TypeId, Vec<Box<dyn Any + Send + Sync>>>;

/// A set of decoders, keyed by the type they produce.
///
/// [`Registry::new`] starts empty; [`Registry::default`] holds a cell decoder
/// for every primitive type.
pub struct Registry {
    cells: Entries,
    rows: Entries,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            cells: Entries::new(),
            rows: Entries::new(),
        }
    }

    /// Register a cell decoder for `T`.
    pub fn register_cell<T: 'static>(&mut self, decoder: CellDecoder<T>) -> &mut Self {
        trace!(type_name = type_name::<T>(), "registering cell decoder");
        self.cells
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Box::new(decoder));
        self
    }

    /// Register a row decoder for `T`.
    pub fn register_row<T: 'static>(&mut self, decoder: RowDecoder<T>) -> &mut Self {
        trace!(type_name = type_name::<T>(), "registering row decoder");
        self.rows
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Box::new(decoder));
        self
    }

    /// Resolve the cell decoder for `T`.
    pub fn cell<T: ResolveCell>(&self) -> Result<CellDecoder<T>, Error> {
        let decoder = T::resolve_cell(self)?;
        debug!(type_name = type_name::<T>(), "resolved cell decoder");
        Ok(decoder)
    }

    /// Resolve the row decoder for `T`.
    pub fn row<T: ResolveRow>(&self) -> Result<RowDecoder<T>, Error> {
        let decoder = T::resolve_row(self)?;
        debug!(type_name = type_name::<T>(), "resolved row decoder");
        Ok(decoder)
    }

    /// The single cell decoder registered for `T`.
    pub fn registered_cell<T: 'static>(&self) -> Result<CellDecoder<T>, Error> {
        select::<T, _>(&self.cells, Err(unavailable::<T>()))
    }

    /// The single row decoder registered for `T`.
    pub fn registered_row<T: 'static>(&self) -> Result<RowDecoder<T>, Error> {
        select::<T, _>(&self.rows, Err(unavailable::<T>()))
    }

    /// Choose between the cell decoders registered for `T` and one derived
    /// by a rule.
    pub fn derived_cell<T: 'static>(
        &self,
        derived: Result<CellDecoder<T>, Error>,
    ) -> Result<CellDecoder<T>, Error> {
        select::<T, _>(&self.cells, derived)
    }

    /// Choose between the row decoders registered for `T` and one derived by
    /// a rule.
    pub fn derived_row<T: 'static>(
        &self,
        derived: Result<RowDecoder<T>, Error>,
    ) -> Result<RowDecoder<T>, Error> {
        select::<T, _>(&self.rows, derived)
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::new();
        register_primitives(&mut registry);
        registry
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = |entries: &Entries| entries.values().map(Vec::len).sum::<usize>();

        f.debug_struct("Registry")
            .field("cells", &count(&self.cells))
            .field("rows", &count(&self.rows))
            .finish()
    }
}

/// Pick the only candidate among the decoders registered for `T` and a
/// derived decoder. An unavailable derivation is not a candidate; an
/// ambiguous one contributes all of its candidates.
fn select<T: 'static, D: Clone + 'static>(
    entries: &Entries,
    derived: Result<D, Error>,
) -> Result<D, Error> {
    let registered = entries
        .get(&TypeId::of::<T>())
        .map(Vec::as_slice)
        .unwrap_or_default();

    match (registered, derived) {
        ([], derived) => derived,
        ([only], Err(Error::Unavailable { .. })) => only
            .downcast_ref::<D>()
            .cloned()
            .ok_or_else(unavailable::<T>),
        (registered, derived) => {
            let derived = match derived {
                Ok(_) => 1,
                Err(Error::Unavailable { .. }) => 0,
                Err(Error::Ambiguous { candidates, .. }) => candidates,
            };

            Err(Error::Ambiguous {
                type_name: type_name::<T>(),
                candidates: registered.len() + derived,
            })
        }
    }
}

fn unavailable<T>() -> Error {
    Error::Unavailable {
        type_name: type_name::<T>(),
    }
}

/// Resolve a cell decoder from a [`Registry`].
///
/// The default implementation looks up the decoder registered for `Self`.
pub trait ResolveCell: Sized + 'static {
    /// Resolve the cell decoder for `Self`.
    fn resolve_cell(registry: &Registry) -> Result<CellDecoder<Self>, Error> {
        registry.registered_cell()
    }
}

/// Resolve a row decoder from a [`Registry`].
///
/// The default implementation looks up the decoder registered for `Self`.
pub trait ResolveRow: Sized + 'static {
    /// Resolve the row decoder for `Self`.
    fn resolve_row(registry: &Registry) -> Result<RowDecoder<Self>, Error> {
        registry.registered_row()
    }
}

macro_rules! primitive {
    ($($t:ty),* $(,)?) => {
        $(impl ResolveCell for $t {})*

        fn register_primitives(registry: &mut Registry) {
            $(registry.register_cell(CellDecoder::<$t>::of());)*

            #[cfg(feature = "uuid")]
            registry.register_cell(CellDecoder::<uuid::Uuid>::of());
        }
    };
}

primitive! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    bool, char, String,
}

#[cfg(feature = "uuid")]
impl ResolveCell for uuid::Uuid {}

impl<A: ResolveCell> ResolveCell for Option<A> {
    fn resolve_cell(registry: &Registry) -> Result<CellDecoder<Self>, Error> {
        registry.derived_cell(A::resolve_cell(registry).map(cell::optional))
    }
}

impl<A: ResolveCell, B: ResolveCell> ResolveCell for Either<A, B> {
    fn resolve_cell(registry: &Registry) -> Result<CellDecoder<Self>, Error> {
        let derived = A::resolve_cell(registry)
            .and_then(|a| Ok(cell::either(a, B::resolve_cell(registry)?)));
        registry.derived_cell(derived)
    }
}

impl<A: ResolveCell> ResolveRow for Vec<A> {
    fn resolve_row(registry: &Registry) -> Result<RowDecoder<Self>, Error> {
        registry.derived_row(A::resolve_cell(registry).map(row::collection))
    }
}

macro_rules! tuple_resolve {
    ($len:literal; $($idx:tt $T:ident $v:ident),+) => {
        impl<$($T: ResolveCell),+> ResolveRow for ($($T,)+) {
            fn resolve_row(registry: &Registry) -> Result<RowDecoder<Self>, Error> {
                let derive = || -> Result<_, Error> {
                    Ok(RowDecoder::from(($($T::resolve_cell(registry)?,)+)))
                };
                registry.derived_row(derive())
            }
        }
    };
}

for_each_tuple!(tuple_resolve);
