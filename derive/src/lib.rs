use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod columns;
mod decode_row;
mod encode_row;

#[proc_macro_derive(DecodeRow, attributes(column))]
pub fn derive_decode_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match decode_row::expand_decode_row(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}

#[proc_macro_derive(EncodeRow, attributes(column))]
pub fn derive_encode_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match encode_row::expand_encode_row(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
