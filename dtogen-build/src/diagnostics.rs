//! Diagnostics raised while generating transfer types and mappers.

use std::fmt;

use crate::error::GenerateError;
use crate::model::{EntityDeclaration, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Static description of a diagnostic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    pub code: &'static str,
    pub title: &'static str,
    /// Message with `{0}` standing for the entity name and `{1}` for the
    /// per-report detail.
    pub message_template: &'static str,
    pub category: &'static str,
    pub severity: Severity,
}

/// The entity's module path is unknown, so no `ToDto` impl can name it.
pub const MISSING_NAMESPACE: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "DTO0001",
    title: "Unable to find entity namespace",
    message_template: "Namespace not found for entity {0}",
    category: "DtoMapGenerator",
    severity: Severity::Error,
};

/// Rendering one entity failed; neither its DTO nor its mapper is emitted.
pub const GENERATION_FAILED: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "DTO0002",
    title: "Unable to generate entity",
    message_template: "Entity {0} was skipped: {1}",
    category: "DtoGenerator",
    severity: Severity::Error,
};

/// Two entities share a simple name, so their `<Name>Dto` items collide.
pub const DUPLICATE_NAME: DiagnosticDescriptor = DiagnosticDescriptor {
    code: "DTO0003",
    title: "Duplicate entity name",
    message_template: "Entity {0} shares its name with the entity at {1}",
    category: "DtoGenerator",
    severity: Severity::Warning,
};

/// One reported problem tied to an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub severity: Severity,
    pub title: &'static str,
    pub category: &'static str,
    pub message_template: &'static str,
    pub location: Location,
    pub entity: String,
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn new(descriptor: &DiagnosticDescriptor, location: Location, entity: impl Into<String>) -> Self {
        Self {
            code: descriptor.code,
            severity: descriptor.severity,
            title: descriptor.title,
            category: descriptor.category,
            message_template: descriptor.message_template,
            location,
            entity: entity.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn message(&self) -> String {
        self.message_template
            .replace("{0}", &self.entity)
            .replace("{1}", self.detail.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}[{}]: {}",
            self.location,
            self.severity,
            self.code,
            self.message()
        )
    }
}

/// Collects diagnostics for one generation pass, in report order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::debug!("{}: {diagnostic}", diagnostic.category);
        self.reported.push(diagnostic);
    }

    pub fn missing_namespace(&mut self, entity: &EntityDeclaration) {
        self.report(Diagnostic::new(
            &MISSING_NAMESPACE,
            entity.location.clone(),
            entity.name.clone(),
        ));
    }

    pub fn generation_failed(&mut self, entity: &EntityDeclaration, error: &GenerateError) {
        self.report(
            Diagnostic::new(&GENERATION_FAILED, entity.location.clone(), entity.name.clone())
                .with_detail(error.to_string()),
        );
    }

    /// `entity` repeats the name of `first`, which was discovered earlier.
    pub fn duplicate_name(&mut self, entity: &EntityDeclaration, first: &EntityDeclaration) {
        self.report(
            Diagnostic::new(&DUPLICATE_NAME, entity.location.clone(), entity.name.clone())
                .with_detail(first.location.to_string()),
        );
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.reported
    }
}
