use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result, parse_quote};

use crate::columns::Columns;

pub(crate) fn expand_decode_row(input: &DeriveInput) -> Result<TokenStream> {
    let columns = Columns::parse(input, "DecodeRow")?;
    let required = columns.required();

    let mut generics = input.generics.clone();
    let predicates = &mut generics.make_where_clause().predicates;
    for field in &columns.fields {
        let ty = &field.ty;
        predicates.push(parse_quote!(#ty: ::cellar::cell::DecodeCell));
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Fields are decoded in declaration order, so the first failure reported
    // is that of the earliest declared field.
    let fields = columns.fields.iter().map(|field| {
        let member = &field.member;
        let ty = &field.ty;
        let column = field.column;

        quote! {
            #member: ::cellar::row::column(
                row,
                #column,
                <#ty as ::cellar::cell::DecodeCell>::decode_cell,
            )?
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl #impl_generics ::cellar::row::DecodeRow for #name #ty_generics #where_clause {
            fn decode_row(
                row: &[&str],
            ) -> ::core::result::Result<Self, ::cellar::row::Error> {
                ::cellar::row::require(row, #required)?;
                ::core::result::Result::Ok(Self { #(#fields),* })
            }
        }
    };

    Ok(expanded.into())
}
