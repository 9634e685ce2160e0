//! dtogen runtime.
//!
//! Marker and conversion traits shared by entity definitions and the code
//! generated by `dtogen-build`.

extern crate self as dtogen;

pub use dtogen_macros::Entity;

/// Marker for structs that get a generated transfer type.
///
/// Implement it with `#[derive(Entity)]`, by hand, or through a trait that
/// has `Entity` as a supertrait.
pub trait Entity {}

/// Conversion from an entity into its generated transfer type.
///
/// Implementations are generated; each one copies every retained field by
/// name into `<Name>Dto`.
pub trait ToDto {
    type Dto;

    fn to_dto(&self) -> Self::Dto;
}

/// File name of the generated transfer structs inside `OUT_DIR`.
pub const DTO_FILE: &str = "generated_dto.rs";

/// File name of the generated `ToDto` impls inside `OUT_DIR`.
pub const MAPPER_FILE: &str = "generated_dto_map.rs";

/// Include both generated artifacts at the call site.
///
/// Call it once, at the crate root, in a crate whose `build.rs` runs
/// `dtogen_build::generate_dtos()`.
#[macro_export]
macro_rules! include_dtos {
    () => {
        include!(concat!(env!("OUT_DIR"), "/generated_dto.rs"));
        include!(concat!(env!("OUT_DIR"), "/generated_dto_map.rs"));
    };
}
