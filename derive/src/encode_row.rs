use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result, parse_quote};

use crate::columns::Columns;

pub(crate) fn expand_encode_row(input: &DeriveInput) -> Result<TokenStream> {
    let columns = Columns::parse(input, "EncodeRow")?;
    let required = columns.required();

    let mut generics = input.generics.clone();
    let predicates = &mut generics.make_where_clause().predicates;
    for field in &columns.fields {
        let ty = &field.ty;
        predicates.push(parse_quote!(#ty: ::cellar::cell::EncodeCell));
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let assignments = columns.fields.iter().map(|field| {
        let member = &field.member;
        let column = field.column;

        quote! {
            cells[#column] = ::cellar::cell::EncodeCell::encode_cell(&self.#member);
        }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl #impl_generics ::cellar::row::EncodeRow for #name #ty_generics #where_clause {
            #[allow(unused_mut)]
            fn encode_row(&self) -> ::cellar::row::Cells {
                let mut cells = ::cellar::row::empty_cells(#required);
                #(#assignments)*
                cells
            }
        }
    };

    Ok(expanded.into())
}
