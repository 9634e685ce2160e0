//! Declaration views shared by the scanner, the semantic model and the pipeline.

use std::fmt;
use std::path::PathBuf;

/// Position of a declaration in the scanned sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 0-based column.
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column + 1)
    }
}

/// One struct declaration as seen by the host, before any entity filtering.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// The struct name (e.g., "Person")
    pub name: String,
    /// The module path the struct lives in (e.g., "crate::domain").
    /// `None` when the struct cannot be named from the crate root.
    pub namespace: Option<String>,
    pub members: Vec<MemberDecl>,
    /// Paths listed in `#[derive(...)]`, rendered as `a::b`.
    pub derives: Vec<String>,
    /// `#[cfg]` predicates gating the struct, enclosing modules first.
    pub cfgs: Vec<String>,
    pub location: Location,
}

impl TypeDecl {
    /// Fully qualified path of the declaration, if its module path is known.
    pub fn qualified_name(&self) -> Option<String> {
        self.namespace.as_ref().map(|ns| format!("{ns}::{}", self.name))
    }
}

/// One named field of a [`TypeDecl`].
#[derive(Debug, Clone)]
pub struct MemberDecl {
    pub name: String,
    /// Declared type as token text. Never interpreted.
    pub ty: String,
    /// Attribute paths on the field, rendered as `a::b`.
    pub attributes: Vec<String>,
    /// `#[cfg]` predicates on the field, as token text.
    pub cfgs: Vec<String>,
}

/// A discovered entity with its retained fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDeclaration {
    pub name: String,
    pub namespace: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    /// Copied onto both generated items.
    pub cfgs: Vec<String>,
    pub location: Location,
}

impl EntityDeclaration {
    /// `namespace::name`, or `None` when the namespace is unresolved.
    pub fn qualified_name(&self) -> Option<String> {
        self.namespace.as_ref().map(|ns| format!("{ns}::{}", self.name))
    }

    /// Name of the generated transfer type.
    pub fn dto_name(&self) -> String {
        dto_name(&self.name)
    }
}

/// Transfer type name for an entity name.
pub fn dto_name(entity: &str) -> String {
    format!("{entity}Dto")
}

/// A data field carried into the generated transfer type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: String,
    pub excluded: bool,
    pub cfgs: Vec<String>,
}

/// A published block of generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub id: &'static str,
    pub content: String,
}

/// Artifact holding every generated transfer struct.
pub const DTO_ARTIFACT: &str = "generated_dto";

/// Artifact holding every generated `ToDto` implementation.
pub const MAPPER_ARTIFACT: &str = "generated_dto_map";
