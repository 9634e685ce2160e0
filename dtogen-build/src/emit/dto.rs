//! Transfer struct generation.

use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitOptions, cfg_attrs, field_type, ident};
use crate::error::GenerateResult;
use crate::model::EntityDeclaration;

/// Render `<Name>Dto` with one public field per retained entity field.
pub fn render_dto(entity: &EntityDeclaration, options: &EmitOptions) -> GenerateResult<TokenStream> {
    let dto_ident = ident(&entity.dto_name())?;

    let field_defs = entity
        .fields
        .iter()
        .map(|field| {
            let name = ident(&field.name)?;
            let ty = field_type(entity, field)?;
            let cfgs = cfg_attrs(entity, &field.cfgs)?;
            Ok(quote! { #(#cfgs)* pub #name: #ty })
        })
        .collect::<GenerateResult<Vec<_>>>()?;

    let item_cfgs = cfg_attrs(entity, &entity.cfgs)?;
    let doc = format!(" Transfer type generated from the `{}` entity.", entity.name);
    let derives = &options.dto_derives;
    let derive_attr = if derives.is_empty() {
        TokenStream::new()
    } else {
        quote! { #[derive(#(#derives),*)] }
    };

    Ok(quote! {
        #(#item_cfgs)*
        #[doc = #doc]
        #derive_attr
        pub struct #dto_ident {
            #(#field_defs),*
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::test_support::entity;

    #[test]
    fn test_render_person_dto() {
        let person = entity(
            "Person",
            Some("crate::domain"),
            &[("id", "i32"), ("first_name", "String"), ("last_name", "String")],
        );

        let tokens = render_dto(&person, &EmitOptions::default()).unwrap();
        let expected = quote! {
            #[doc = " Transfer type generated from the `Person` entity."]
            #[derive(Debug, Clone, PartialEq)]
            pub struct PersonDto {
                pub id: i32,
                pub first_name: String,
                pub last_name: String
            }
        };

        assert_eq!(tokens.to_string(), expected.to_string());
    }

    #[test]
    fn test_render_empty_dto() {
        let empty = entity("Empty", Some("crate::domain"), &[]);
        let tokens = render_dto(&empty, &EmitOptions::new::<&str>(&[], "::dtogen").unwrap()).unwrap();

        let expected = quote! {
            #[doc = " Transfer type generated from the `Empty` entity."]
            pub struct EmptyDto {}
        };
        assert_eq!(tokens.to_string(), expected.to_string());
    }

    #[test]
    fn test_render_dto_without_namespace() {
        let local = entity("Local", None, &[("id", "u32")]);
        let item: syn::ItemStruct = syn::parse2(render_dto(&local, &EmitOptions::default()).unwrap()).unwrap();
        assert_eq!(item.ident, "LocalDto");
    }

    #[test]
    fn test_render_dto_echoes_type_text() {
        let order = entity("Order", Some("crate"), &[("lines", "Vec < (String , u32) >")]);
        let item: syn::ItemStruct = syn::parse2(render_dto(&order, &EmitOptions::default()).unwrap()).unwrap();

        let actual = &item.fields.iter().next().unwrap().ty;
        let expected: syn::Type = syn::parse_str("Vec<(String, u32)>").unwrap();
        assert_eq!(quote!(#actual).to_string(), quote!(#expected).to_string());
    }

    #[test]
    fn test_render_dto_rejects_unbalanced_type() {
        let broken = entity("Broken", Some("crate"), &[("id", "Vec<(u32>")]);
        assert!(render_dto(&broken, &EmitOptions::default()).is_err());
    }

    #[test]
    fn test_render_dto_is_deterministic() {
        let car = entity("Car", Some("crate::domain"), &[("id", "i32"), ("model", "String")]);
        let options = EmitOptions::default();
        assert_eq!(
            render_dto(&car, &options).unwrap().to_string(),
            render_dto(&car, &options).unwrap().to_string()
        );
    }

    #[test]
    fn test_render_dto_carries_cfgs() {
        let mut record = entity("Record", Some("crate::domain"), &[("id", "i32"), ("actor", "String")]);
        record.cfgs = vec!["test".to_string()];
        record.fields[1].cfgs = vec!["feature = \"audit\"".to_string()];

        let options = EmitOptions::new(&["Debug"], "::dtogen").unwrap();
        let expected = quote! {
            #[cfg(test)]
            #[doc = " Transfer type generated from the `Record` entity."]
            #[derive(Debug)]
            pub struct RecordDto {
                pub id: i32,
                #[cfg(feature = "audit")]
                pub actor: String
            }
        };
        assert_eq!(render_dto(&record, &options).unwrap().to_string(), expected.to_string());
    }

    #[test]
    fn test_render_dto_rejects_broken_cfg() {
        let mut record = entity("Record", Some("crate"), &[("id", "i32")]);
        record.cfgs = vec!["feature = \"unterminated".to_string()];
        assert!(matches!(
            render_dto(&record, &EmitOptions::default()),
            Err(crate::error::GenerateError::InvalidCfg { .. })
        ));
    }
}
