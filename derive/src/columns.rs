use std::collections::HashSet;

use syn::{
    Data, DeriveInput, Error, Index, LitInt, Member, Result, Type,
    parse::{Parse, ParseStream},
};

/// The column read for each field of a struct.
///
/// Braced struct expressions accept both named and numeric members, so the
/// generated code needs no special case for tuple or unit structs.
#[derive(Debug)]
pub(crate) struct Columns {
    pub(crate) fields: Vec<ColumnMetadata>,
}

#[derive(Debug)]
pub(crate) struct ColumnMetadata {
    pub(crate) member: Member,
    pub(crate) ty: Type,
    pub(crate) column: usize,
}

impl Columns {
    pub(crate) fn parse(input: &DeriveInput, derive: &str) -> Result<Self> {
        let Data::Struct(data) = &input.data else {
            Err(Error::new_spanned(
                input,
                format!("`{derive}` may only be derived on structs."),
            ))?
        };

        let mut seen = HashSet::new();
        let mut fields = Vec::new();

        for (i, field) in data.fields.iter().enumerate() {
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index::from(i)),
            };

            let column = match field.attrs.iter().find(|a| a.path().is_ident("column")) {
                Some(attr) => {
                    let ColumnAttribute { number } = attr.parse_args()?;
                    number.base10_parse::<usize>()?
                }
                None => i,
            };

            if !seen.insert(column) {
                Err(Error::new_spanned(
                    field,
                    format!("Column {column} is already read by another field."),
                ))?
            }

            fields.push(ColumnMetadata {
                member,
                ty: field.ty.clone(),
                column,
            });
        }

        Ok(Self { fields })
    }

    /// Number of cells a row must hold for every field to be read.
    pub(crate) fn required(&self) -> usize {
        self.fields.iter().map(|f| f.column + 1).max().unwrap_or(0)
    }
}

#[derive(Debug)]
struct ColumnAttribute {
    number: LitInt,
}

impl Parse for ColumnAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let number = input.parse::<LitInt>()?;
        Ok(Self { number })
    }
}
