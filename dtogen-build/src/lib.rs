//! Build-time generator for entity transfer types.
//!
//! This crate scans your source files for structs implementing
//! `dtogen::Entity` and generates, for each one, a `<Name>Dto` struct with the
//! same fields (minus those marked `#[no_dto]`) and a `ToDto` implementation
//! converting the entity into it.
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     dtogen_build::generate_dtos()
//!         .scan_path("src/")
//!         .run()
//!         .expect("Failed to generate DTOs");
//! }
//! ```
//!
//! And in your crate root:
//!
//! ```ignore
//! dtogen::include_dtos!();
//! ```
//!
//! Entities whose module path cannot be determined (for example structs
//! declared inside a function body) still get their DTO, but no mapper; a
//! `DTO0001` error is reported to Cargo instead. An entity that cannot be
//! rendered is skipped with a `DTO0002` error, and the rest of the pass still
//! completes. `#[cfg]` attributes on entities, their enclosing modules and
//! their fields are copied onto the generated items.

mod diagnostics;
mod discovery;
mod emit;
mod error;
mod generator;
mod host;
mod model;
mod pipeline;
mod scanner;
mod semantic;

pub use diagnostics::{
    DUPLICATE_NAME, Diagnostic, DiagnosticDescriptor, Diagnostics, GENERATION_FAILED, MISSING_NAMESPACE, Severity,
};
pub use discovery::{discover_entities, extract_fields};
pub use emit::{EmitOptions, render_artifact, render_dto, render_mapper};
pub use error::{GenerateError, GenerateResult};
pub use generator::{DtoGenerator, GenerationSummary};
pub use host::{CargoHost, GeneratorHost, MemoryHost};
pub use model::{
    DTO_ARTIFACT, EntityDeclaration, FieldDescriptor, GeneratedArtifact, Location, MAPPER_ARTIFACT, MemberDecl,
    TypeDecl, dto_name,
};
pub use pipeline::{GenerationPass, generate, run_pass};
pub use scanner::{GatedModule, ImplDecl, SourceFile, TraitDecl, scan_directory};
pub use semantic::{Markers, SemanticModel, SourceModel};

/// Create a new DTO generator with default settings.
///
/// # Example
///
/// ```ignore
/// dtogen_build::generate_dtos()
///     .scan_path("src/")
///     .run()
///     .expect("Failed to generate DTOs");
/// ```
pub fn generate_dtos() -> DtoGenerator {
    DtoGenerator::new()
}
