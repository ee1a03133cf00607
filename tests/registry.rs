use cellar::{
    CellDecoder, Registry, ResolveCell, ResolveRow, RowDecoder, cell,
    document::{self, Dialect},
    registry::Error,
};
use either::Either::{self, Left, Right};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Currency {
    Eur,
    Usd,
}

impl Currency {
    fn parse(cell: &str) -> Result<Self, cell::Error> {
        match cell {
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            _ => Err(cell::Error::malformed("Currency", cell)),
        }
    }
}

impl ResolveCell for Currency {}

#[derive(Debug, PartialEq)]
struct Price {
    amount: u32,
    currency: Currency,
}

impl ResolveRow for Price {}

fn registry() -> Registry {
    let mut registry = Registry::default();
    registry.register_cell(CellDecoder::from_fn("Currency", Currency::parse));
    registry
}

#[test]
fn primitives_are_registered_by_default() {
    let registry = Registry::default();

    assert_eq!(registry.cell::<i32>().unwrap().decode("5"), Ok(5));
    assert_eq!(registry.cell::<bool>().unwrap().decode("true"), Ok(true));
    assert_eq!(
        registry.cell::<String>().unwrap().decode("Nicolas"),
        Ok("Nicolas".to_string())
    );
}

#[test]
fn empty_registry_has_nothing_to_resolve() {
    let registry = Registry::new();

    assert_eq!(
        registry.cell::<i32>().unwrap_err(),
        Error::Unavailable { type_name: "i32" }
    );
    assert!(matches!(
        registry.row::<(i32, String)>(),
        Err(Error::Unavailable { type_name: "i32" })
    ));
}

#[test]
fn unregistered_custom_types_are_unavailable() {
    let registry = Registry::default();

    assert!(matches!(
        registry.cell::<Currency>(),
        Err(Error::Unavailable { .. })
    ));
    // Resolution fails before any row is seen.
    assert!(matches!(
        registry.row::<(u32, Option<Currency>)>(),
        Err(Error::Unavailable { .. })
    ));
}

#[test]
fn registered_custom_types_resolve() {
    let registry = registry();
    let currencies = registry.cell::<Currency>().unwrap();

    assert_eq!(currencies.expected(), "Currency");
    assert_eq!(currencies.decode("EUR"), Ok(Currency::Eur));
    assert!(currencies.decode("GBP").is_err());
}

#[test]
fn generic_rules_chain_to_registered_decoders() {
    let registry = registry();

    let optional = registry.cell::<Option<Currency>>().unwrap();
    assert_eq!(optional.decode(""), Ok(None));
    assert_eq!(optional.decode("USD"), Ok(Some(Currency::Usd)));

    let union = registry.cell::<Either<Currency, Option<u32>>>().unwrap();
    assert_eq!(union.decode("EUR"), Ok(Left(Currency::Eur)));
    assert_eq!(union.decode("12"), Ok(Right(Some(12))));
    assert_eq!(union.decode(""), Ok(Right(None)));

    let rows = registry.row::<Vec<Option<Currency>>>().unwrap();
    assert_eq!(
        rows.decode(&["EUR", "", "USD"]),
        Ok(vec![Some(Currency::Eur), None, Some(Currency::Usd)])
    );
}

#[test]
fn tuple_rows_resolve_from_their_cells() {
    let registry = registry();
    let prices = registry.row::<(u32, Currency)>().unwrap();

    let rows: Vec<_> = document::decode_with("12,EUR\n7,GBP\n", &prices).collect();

    assert_eq!(rows[0], Ok((12, Currency::Eur)));
    assert_eq!(rows[1].as_ref().unwrap_err().row, 1);
    assert_eq!(rows[1].as_ref().unwrap_err().column(), Some(1));
}

#[test]
fn registered_rows_resolve() {
    let mut registry = registry();
    let pair = registry.row::<(u32, Currency)>().unwrap();
    registry.register_row(pair.map(|(amount, currency)| Price { amount, currency }));

    let prices = registry.row::<Price>().unwrap();
    let rows: Vec<Price> = Dialect::new()
        .has_headers(true)
        .decode_with("amount,currency\n3,USD", &prices)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        rows,
        [Price {
            amount: 3,
            currency: Currency::Usd,
        }]
    );
}

#[test]
fn duplicate_registrations_are_ambiguous() {
    let mut registry = registry();
    registry.register_cell(CellDecoder::from_fn("Currency", |_| Ok(Currency::Eur)));

    assert_eq!(
        registry.cell::<Currency>().unwrap_err(),
        Error::Ambiguous {
            type_name: core::any::type_name::<Currency>(),
            candidates: 2,
        }
    );
    // Ambiguity propagates through rules built on the type.
    assert!(matches!(
        registry.cell::<Option<Currency>>(),
        Err(Error::Ambiguous { .. })
    ));
}

#[test]
fn registration_does_not_hide_an_ambiguous_rule() {
    let mut registry = registry();
    registry.register_cell(CellDecoder::from_fn("Currency", |_| Ok(Currency::Usd)));
    registry.register_cell(CellDecoder::from_fn("Option<Currency>", |cell| {
        Ok(Currency::parse(cell).ok())
    }));

    assert_eq!(
        registry.cell::<Option<Currency>>().unwrap_err(),
        Error::Ambiguous {
            type_name: core::any::type_name::<Option<Currency>>(),
            candidates: 3,
        }
    );
}

#[test]
fn registration_competing_with_a_rule_is_ambiguous() {
    let mut registry = Registry::default();
    registry.register_cell(CellDecoder::from_fn("Option<i32>", |cell| {
        Ok(cell.parse::<i32>().ok())
    }));

    assert_eq!(
        registry.cell::<Option<i32>>().unwrap_err(),
        Error::Ambiguous {
            type_name: core::any::type_name::<Option<i32>>(),
            candidates: 2,
        }
    );
}

#[test]
fn registration_fills_in_where_no_rule_applies() {
    let mut registry = Registry::new();
    registry.register_cell(CellDecoder::from_fn("Option<i32>", |cell| {
        Ok(cell.parse::<i32>().ok())
    }));

    // No decoder exists for `i32`, so the registration is the only candidate.
    let lenient = registry.cell::<Option<i32>>().unwrap();
    assert_eq!(lenient.decode("n/a"), Ok(None));
    assert_eq!(lenient.decode("4"), Ok(Some(4)));
}

#[test]
fn resolved_decoders_are_shareable_across_threads() {
    let registry = registry();
    let decoder: RowDecoder<(u32, Currency)> = registry.row().unwrap();

    let handles: Vec<_> = ["1,EUR", "2,USD"]
        .into_iter()
        .map(|text| {
            let decoder = decoder.clone();
            std::thread::spawn(move || {
                document::decode_with(text, &decoder)
                    .collect::<Result<Vec<_>, _>>()
                    .unwrap()
            })
        })
        .collect();

    let rows: Vec<_> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    assert_eq!(rows, [(1, Currency::Eur), (2, Currency::Usd)]);
}

#[test]
fn registry_debug_counts_registrations() {
    let registry = registry();
    let debug = format!("{registry:?}");

    assert!(debug.starts_with("Registry"));
    assert!(debug.contains("rows: 0"));
}
