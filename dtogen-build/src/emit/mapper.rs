//! `ToDto` implementation generation.

use proc_macro2::TokenStream;
use quote::quote;

use super::{EmitOptions, cfg_attrs, ident, parse_path};
use crate::diagnostics::Diagnostics;
use crate::error::GenerateResult;
use crate::model::EntityDeclaration;

/// Render `impl ToDto` for one entity.
///
/// Returns `None` and reports a diagnostic when the entity has no module
/// path, since the impl could not name the entity type.
pub fn render_mapper(
    entity: &EntityDeclaration,
    options: &EmitOptions,
    diagnostics: &mut Diagnostics,
) -> GenerateResult<Option<TokenStream>> {
    let Some(qualified) = entity.qualified_name() else {
        diagnostics.missing_namespace(entity);
        return Ok(None);
    };

    let entity_path = parse_path(&qualified)?;
    let dto_ident = ident(&entity.dto_name())?;
    let runtime = &options.runtime_path;
    let item_cfgs = cfg_attrs(entity, &entity.cfgs)?;

    let assigns = entity
        .fields
        .iter()
        .map(|field| {
            let name = ident(&field.name)?;
            let cfgs = cfg_attrs(entity, &field.cfgs)?;
            Ok(quote! { #(#cfgs)* #name: self.#name.clone() })
        })
        .collect::<GenerateResult<Vec<_>>>()?;

    Ok(Some(quote! {
        #(#item_cfgs)*
        impl #runtime::ToDto for #entity_path {
            type Dto = #dto_ident;

            #[allow(clippy::clone_on_copy)]
            fn to_dto(&self) -> Self::Dto {
                #dto_ident { #(#assigns),* }
            }
        }
    }))
}
