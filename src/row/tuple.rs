//! Row decoders for tuples.
//!
//! Element `i` of a tuple is read from column `i`, so a row must hold at
//! least as many cells as the tuple has elements. Extra cells are ignored.

use crate::cell::{CellDecoder, DecodeCell, EncodeCell};

use super::{Cells, DecodeRow, EncodeRow, Error, RowDecoder, column, require};

/// Invoke a macro once for every supported tuple arity, passing the arity
/// followed by the index, type parameter and binding name of each element.
macro_rules! for_each_tuple {
    ($m:ident) => {
        $m!(1; 0 A a);
        $m!(2; 0 A a, 1 B b);
        $m!(3; 0 A a, 1 B b, 2 C c);
        $m!(4; 0 A a, 1 B b, 2 C c, 3 D d);
        $m!(5; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e);
        $m!(6; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f);
        $m!(7; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f, 6 G g);
        $m!(8; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f, 6 G g, 7 H h);
        $m!(9; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f, 6 G g, 7 H h, 8 I i);
        $m!(10; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f, 6 G g, 7 H h, 8 I i, 9 J j);
        $m!(11; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f, 6 G g, 7 H h, 8 I i, 9 J j, 10 K k);
        $m!(12; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f, 6 G g, 7 H h, 8 I i, 9 J j, 10 K k, 11 L l);
    };
}

pub(crate) use for_each_tuple;

macro_rules! tuple_row {
    ($len:literal; $($idx:tt $T:ident $v:ident),+) => {
        impl<$($T: DecodeCell),+> DecodeRow for ($($T,)+) {
            fn decode_row(row: &[&str]) -> Result<Self, Error> {
                require(row, $len)?;
                Ok(($(column(row, $idx, $T::decode_cell)?,)+))
            }
        }

        impl<$($T: EncodeCell),+> EncodeRow for ($($T,)+) {
            fn encode_row(&self) -> Cells {
                alloc::vec![$(self.$idx.encode_cell()),+]
            }
        }

        impl<$($T: 'static),+> From<($(CellDecoder<$T>,)+)> for RowDecoder<($($T,)+)> {
            fn from(($($v,)+): ($(CellDecoder<$T>,)+)) -> Self {
                RowDecoder::from_fn(move |row| {
                    require(row, $len)?;
                    Ok(($(column(row, $idx, |cell| $v.decode(cell))?,)+))
                })
            }
        }
    };
}

for_each_tuple!(tuple_row);
