use cellar::{
    CellDecoder, DecodeCell, EncodeCell,
    cell::{self, Error},
};
use either::Either::{self, Left, Right};

#[test]
fn primitives_decode_canonical_text() {
    assert_eq!(i32::decode_cell("-42"), Ok(-42));
    assert_eq!(u8::decode_cell("255"), Ok(255));
    assert_eq!(u64::decode_cell("18446744073709551615"), Ok(u64::MAX));
    assert_eq!(f64::decode_cell("2.5"), Ok(2.5));
    assert_eq!(bool::decode_cell("true"), Ok(true));
    assert_eq!(bool::decode_cell("false"), Ok(false));
    assert_eq!(char::decode_cell("é"), Ok('é'));
    assert_eq!(String::decode_cell("Nicolas"), Ok("Nicolas".to_string()));
}

#[test]
fn primitives_reencode_to_the_decoded_text() {
    for text in ["0", "-17", "2147483647"] {
        assert_eq!(i32::decode_cell(text).unwrap().encode_cell(), text);
    }
    for text in ["0.1", "-3.75", "1e-7"] {
        let value = f64::decode_cell(text).unwrap();
        assert_eq!(f64::decode_cell(&value.encode_cell()), Ok(value));
    }
    for text in ["true", "false"] {
        assert_eq!(bool::decode_cell(text).unwrap().encode_cell(), text);
    }
    assert_eq!(String::decode_cell("").unwrap().encode_cell(), "");
    assert_eq!(char::decode_cell("é").unwrap().encode_cell(), "é");
    assert_eq!(u8::decode_cell("200").unwrap().encode_cell(), "200");
    assert_eq!(
        i128::decode_cell("-170141183460469231731687303715884105728")
            .unwrap()
            .encode_cell(),
        "-170141183460469231731687303715884105728"
    );
    assert_eq!(f32::decode_cell("0.25").unwrap().encode_cell(), "0.25");
    assert_eq!(usize::decode_cell("42").unwrap().encode_cell(), "42");
}

#[test]
fn numbers_reject_non_canonical_text() {
    assert_eq!(i32::decode_cell("+5"), Err(Error::malformed("i32", "+5")));
    assert!(u8::decode_cell("007").is_err());
    assert!(i64::decode_cell("-01").is_err());
    assert!(f64::decode_cell("+1.50").is_err());

    assert_eq!(u8::decode_cell("0"), Ok(0));
    assert_eq!(i8::decode_cell("-0"), Ok(0));
    assert_eq!(i16::decode_cell("-10"), Ok(-10));
    assert_eq!(f64::decode_cell("-0.5"), Ok(-0.5));
}

#[test]
fn malformed_cells_name_the_type_and_text() {
    assert_eq!(
        i32::decode_cell("x"),
        Err(Error::Malformed {
            expected: "i32",
            text: "x".to_string(),
        })
    );
    assert!(u8::decode_cell("256").is_err());
    assert!(u8::decode_cell("-1").is_err());
    assert!(i32::decode_cell(" 1").is_err());
    assert!(i32::decode_cell("").is_err());
    assert!(bool::decode_cell("True").is_err());
    assert!(bool::decode_cell("1").is_err());
    assert!(char::decode_cell("ab").is_err());
    assert!(char::decode_cell("").is_err());

    let err = f32::decode_cell("one").unwrap_err();
    assert_eq!(err.to_string(), "Cannot decode `one` as f32.");
}

#[test]
fn empty_cell_is_absent_for_every_inner_decoder() {
    assert_eq!(Option::<i32>::decode_cell(""), Ok(None));
    assert_eq!(Option::<bool>::decode_cell(""), Ok(None));
    // The inner decoder would accept an empty string, and is still bypassed.
    assert_eq!(Option::<String>::decode_cell(""), Ok(None));
}

#[test]
fn present_cell_delegates_to_inner_decoder() {
    assert_eq!(Option::<i32>::decode_cell("7"), Ok(Some(7)));
    assert_eq!(
        Option::<i32>::decode_cell("seven"),
        Err(Error::malformed("i32", "seven"))
    );
}

#[test]
fn either_prefers_left_when_both_accept() {
    type IntOrFloat = Either<i64, f64>;

    assert_eq!(IntOrFloat::decode_cell("3"), Ok(Left(3)));
    assert_eq!(IntOrFloat::decode_cell("3.5"), Ok(Right(3.5)));
    assert_eq!(Either::<f64, i64>::decode_cell("3"), Ok(Left(3.0)));
    assert_eq!(Either::<String, i32>::decode_cell("3"), Ok(Left("3".to_string())));
}

#[test]
fn either_reports_both_failures() {
    let err = Either::<i32, bool>::decode_cell("maybe").unwrap_err();

    assert_eq!(
        err,
        Error::Neither {
            left: "i32",
            right: "bool",
            left_error: Box::new(Error::malformed("i32", "maybe")),
            right_error: Box::new(Error::malformed("bool", "maybe")),
        }
    );
    assert_eq!(
        err.to_string(),
        "Cannot decode as i32 (Cannot decode `maybe` as i32.) or as bool \
         (Cannot decode `maybe` as bool.)."
    );
}

#[test]
fn combinators_encode_the_held_value() {
    assert_eq!(Some(5i32).encode_cell(), "5");
    assert_eq!(None::<i32>.encode_cell(), "");
    assert_eq!(Left::<i32, bool>(1).encode_cell(), "1");
    assert_eq!(Right::<i32, bool>(true).encode_cell(), "true");
}

#[test]
fn value_decoders_match_their_trait_counterparts() {
    let ints = CellDecoder::<i32>::of();
    assert_eq!(ints.expected(), "i32");
    assert_eq!(ints.decode("12"), Ok(12));
    assert_eq!(ints.decode("x"), Err(Error::malformed("i32", "x")));

    let optional = cell::optional(ints.clone());
    assert_eq!(optional.decode(""), Ok(None));
    assert_eq!(optional.decode("4"), Ok(Some(4)));

    let either = cell::either(ints, CellDecoder::<bool>::of());
    assert_eq!(either.decode("4"), Ok(Left(4)));
    assert_eq!(either.decode("true"), Ok(Right(true)));
    assert!(matches!(
        either.decode("?"),
        Err(Error::Neither {
            left: "i32",
            right: "bool",
            ..
        })
    ));
}

#[test]
fn optional_bypasses_a_decoder_that_rejects_everything() {
    let never = CellDecoder::<u8>::from_fn("never", |cell| Err(Error::malformed("never", cell)));
    let optional = cell::optional(never);

    assert_eq!(optional.decode(""), Ok(None));
    assert_eq!(optional.decode("1"), Err(Error::malformed("never", "1")));
}

#[test]
fn custom_decoders_map_over_existing_ones() {
    #[derive(Debug, PartialEq)]
    struct Celsius(f64);

    let celsius = CellDecoder::<f64>::of().map(Celsius);

    assert_eq!(celsius.decode("21.5"), Ok(Celsius(21.5)));
    assert_eq!(celsius.decode("warm"), Err(Error::malformed("f64", "warm")));
}

#[cfg(feature = "uuid")]
#[test]
fn uuids_decode_and_encode_hyphenated() {
    let text = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    let id = uuid::Uuid::decode_cell(text).unwrap();

    assert_eq!(id.encode_cell(), text);
    assert!(uuid::Uuid::decode_cell("not-a-uuid").is_err());
}
