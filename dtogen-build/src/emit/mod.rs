//! Rendering of discovered entities into generated Rust source.
//!
//! Each emitter turns an [`EntityDeclaration`] into a token stream; the
//! streams of one artifact kind are then formatted together by
//! [`render_artifact`].

mod dto;
mod mapper;

pub use dto::render_dto;
pub use mapper::render_mapper;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Path, parse_quote};

use crate::error::{GenerateError, GenerateResult};
use crate::model::{EntityDeclaration, FieldDescriptor, GeneratedArtifact};

const HEADER: &str = "// @generated by dtogen-build. Do not edit manually.\n";

/// Formatting choices shared by both emitters.
#[derive(Clone)]
pub struct EmitOptions {
    /// Derives placed on every transfer struct.
    pub dto_derives: Vec<Path>,
    /// Path of the runtime crate providing `ToDto`.
    pub runtime_path: Path,
}

impl EmitOptions {
    pub fn new<S: AsRef<str>>(dto_derives: &[S], runtime_path: &str) -> GenerateResult<Self> {
        Ok(Self {
            dto_derives: dto_derives.iter().map(|d| parse_path(d.as_ref())).collect::<GenerateResult<_>>()?,
            runtime_path: parse_path(runtime_path)?,
        })
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            dto_derives: vec![parse_quote!(Debug), parse_quote!(Clone), parse_quote!(PartialEq)],
            runtime_path: parse_quote!(::dtogen),
        }
    }
}

/// Format the items of one artifact kind into a source file.
///
/// Falls back to unformatted tokens when the items do not parse as a file.
/// The pipeline checks every entity's items before they get here.
pub fn render_artifact(id: &'static str, items: Vec<TokenStream>) -> GeneratedArtifact {
    let tokens = quote! { #(#items)* };

    let body = match syn::parse2::<syn::File>(tokens.clone()) {
        Ok(file) => prettyplease::unparse(&file),
        Err(err) => {
            log::warn!("artifact `{id}` does not parse ({err}); writing unformatted tokens");
            format!("{tokens}\n")
        }
    };

    GeneratedArtifact {
        id,
        content: format!("{HEADER}\n{body}"),
    }
}

fn parse_path(path: &str) -> GenerateResult<Path> {
    syn::parse_str(path).map_err(|_| GenerateError::InvalidPath { path: path.to_string() })
}

fn ident(name: &str) -> GenerateResult<Ident> {
    syn::parse_str(name).map_err(|_| GenerateError::InvalidIdent { name: name.to_string() })
}

fn field_type(entity: &EntityDeclaration, field: &FieldDescriptor) -> GenerateResult<TokenStream> {
    field.ty.parse().map_err(|_| GenerateError::InvalidFieldType {
        entity: entity.name.clone(),
        field: field.name.clone(),
        ty: field.ty.clone(),
    })
}

/// `#[cfg(...)]` attributes for the given predicates.
fn cfg_attrs(entity: &EntityDeclaration, predicates: &[String]) -> GenerateResult<Vec<TokenStream>> {
    predicates
        .iter()
        .map(|predicate| {
            let tokens: TokenStream = predicate.parse().map_err(|_| GenerateError::InvalidCfg {
                entity: entity.name.clone(),
                predicate: predicate.clone(),
            })?;
            Ok(quote! { #[cfg(#tokens)] })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DTO_ARTIFACT;

    #[test]
    fn test_emit_options_parse_paths() {
        let options = EmitOptions::new(&["Debug", "serde::Serialize"], "::dtogen").unwrap();
        assert_eq!(options.dto_derives.len(), 2);
        assert!(options.dto_derives[1].segments.last().unwrap().ident == "Serialize");

        assert!(matches!(
            EmitOptions::new(&["not a path"], "::dtogen"),
            Err(GenerateError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_render_artifact_formats_items() {
        let items = vec![quote! { pub struct ADto {} }, quote! { pub struct BDto { pub id: i32 } }];
        let artifact = render_artifact(DTO_ARTIFACT, items);

        assert_eq!(artifact.id, DTO_ARTIFACT);
        assert!(artifact.content.starts_with(HEADER));

        let file = syn::parse_file(&artifact.content).unwrap();
        assert_eq!(file.items.len(), 2);
    }

    #[test]
    fn test_render_artifact_without_items() {
        let artifact = render_artifact(DTO_ARTIFACT, Vec::new());
        assert!(syn::parse_file(&artifact.content).unwrap().items.is_empty());
    }
}
