use thiserror::Error;

/// Failures while rendering or configuring a generation pass.
///
/// Rendering failures are per entity: the pipeline turns them into a
/// `DTO0002` diagnostic and keeps going. Scanned sources never produce them;
/// they guard against declaration views handed in by a custom
/// [`SemanticModel`](crate::SemanticModel). Configuration failures surface
/// from [`EmitOptions::new`](crate::EmitOptions::new) and
/// [`DtoGenerator::run`](crate::DtoGenerator::run).
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A declared field type is not valid Rust token text.
    #[error("field `{entity}.{field}` has a type that cannot be tokenized: `{ty}`")]
    InvalidFieldType { entity: String, field: String, ty: String },

    /// An entity or field name is not a valid Rust identifier.
    #[error("`{name}` is not a valid identifier")]
    InvalidIdent { name: String },

    /// A `#[cfg]` predicate attached to an entity or field cannot be tokenized.
    #[error("entity `{entity}` carries a cfg predicate that cannot be tokenized: `{predicate}`")]
    InvalidCfg { entity: String, predicate: String },

    /// The tokens rendered for an entity do not form a Rust item.
    #[error("generated item for `{entity}` does not parse: {message}")]
    MalformedItem { entity: String, message: String },

    /// A configured derive or runtime path is not a valid Rust path.
    #[error("`{path}` is not a valid path")]
    InvalidPath { path: String },

    /// No output directory was configured and `OUT_DIR` is unset.
    #[error("OUT_DIR is not set; call `out_dir()` when running outside a build script")]
    MissingOutDir,
}

pub type GenerateResult<T> = Result<T, GenerateError>;
