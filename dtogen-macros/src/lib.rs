use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod entity;

use entity::ParsedEntity;

/// Mark a struct as an entity.
///
/// Implements `dtogen::Entity` so the build-time generator picks the struct
/// up, and registers the `#[no_dto]` field attribute that keeps a field out
/// of the generated transfer struct.
///
/// ```text
/// #[derive(dtogen::Entity)]
/// pub struct Person {
///     pub id: i32,
///     pub name: String,
///     #[no_dto]
///     pub password_hash: String,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(no_dto))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedEntity::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
