use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Error, Field, Fields, Ident, Meta, Result};

pub(crate) struct ParsedEntity {
    name: Ident,
}

impl ParsedEntity {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(Error::new(
                input.generics.span(),
                "Entity cannot be derived for generic structs",
            ));
        }

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    for field in &named.named {
                        Self::check_field_attrs(field)?;
                    }
                }
                Fields::Unit => {}
                Fields::Unnamed(_) => return Err(Error::new(input.ident.span(), "Entity requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "Entity can only be derived for structs")),
        }

        Ok(Self {
            name: input.ident.clone(),
        })
    }

    // The generator matches the bare path only; arguments would be ignored.
    fn check_field_attrs(field: &Field) -> Result<()> {
        for attr in &field.attrs {
            if attr.path().is_ident("no_dto") && !matches!(attr.meta, Meta::Path(_)) {
                return Err(Error::new(attr.span(), "#[no_dto] takes no arguments"));
            }
        }
        Ok(())
    }

    pub(crate) fn emit(&self) -> TokenStream {
        let name = &self.name;
        quote! {
            impl ::dtogen::Entity for #name {}
        }
    }
}
