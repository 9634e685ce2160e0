//! Capability queries over the scanned declarations.
//!
//! The pipeline never inspects syntax itself. It asks a [`SemanticModel`]
//! which declarations are entities and which fields carry the exclude
//! marker; [`SourceModel`] answers both from a symbol table built over every
//! scanned file.

use std::collections::HashSet;

use crate::model::{Location, MemberDecl, TypeDecl};
use crate::scanner::{GatedModule, ImplDecl, SourceFile, TraitDecl};

/// Host-supplied view of the compilation.
pub trait SemanticModel {
    /// Every candidate declaration, in first-seen order.
    fn declarations(&self) -> &[TypeDecl];

    /// Whether the declaration implements the entity marker, directly or
    /// through a trait that extends it.
    fn is_entity(&self, decl: &TypeDecl) -> bool;

    /// Whether the field carries the exclude marker.
    fn is_excluded(&self, member: &MemberDecl) -> bool;
}

/// Names of the marker trait and the field exclusion attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub entity: String,
    pub exclude: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            entity: "Entity".to_string(),
            exclude: "no_dto".to_string(),
        }
    }
}

/// Symbol table over scanned source files.
#[derive(Debug, Clone)]
pub struct SourceModel {
    declarations: Vec<TypeDecl>,
    /// Declarations confirmed as entities through a trait impl.
    implemented: HashSet<Location>,
    markers: Markers,
}

impl SourceModel {
    pub fn new(files: Vec<SourceFile>, crate_name: &str, markers: Markers) -> Self {
        let entity_traits = entity_traits(&files, &markers.entity);
        let gated = gated_modules(&files);
        let declarations: Vec<TypeDecl> = files
            .iter()
            .flat_map(|f| f.structs.iter().cloned())
            .map(|decl| inherit_module_cfgs(decl, &gated))
            .collect();

        let mut implemented = HashSet::new();
        for imp in files.iter().flat_map(|f| &f.impls) {
            if !entity_traits.contains(imp.trait_name.as_str()) {
                continue;
            }
            match resolve_self_type(&declarations, imp, crate_name) {
                Some(decl) => {
                    implemented.insert(decl.location.clone());
                }
                None => log::debug!(
                    "impl {} for {} does not resolve to a scanned struct",
                    imp.trait_name,
                    imp.self_path.join("::")
                ),
            }
        }

        Self {
            declarations,
            implemented,
            markers,
        }
    }

    fn derives_marker(&self, decl: &TypeDecl) -> bool {
        decl.derives
            .iter()
            .any(|path| path.rsplit("::").next() == Some(self.markers.entity.as_str()))
    }
}

impl SemanticModel for SourceModel {
    fn declarations(&self) -> &[TypeDecl] {
        &self.declarations
    }

    fn is_entity(&self, decl: &TypeDecl) -> bool {
        self.derives_marker(decl) || self.implemented.contains(&decl.location)
    }

    fn is_excluded(&self, member: &MemberDecl) -> bool {
        member.attributes.iter().any(|attr| *attr == self.markers.exclude)
    }
}

/// The marker trait plus every trait whose supertraits reach it.
fn entity_traits<'a>(files: &'a [SourceFile], marker: &'a str) -> HashSet<&'a str> {
    let traits: Vec<&TraitDecl> = files.iter().flat_map(|f| &f.traits).collect();
    let mut reached = HashSet::from([marker]);

    loop {
        let before = reached.len();
        for decl in &traits {
            if decl.supertraits.iter().any(|s| reached.contains(s.as_str())) {
                reached.insert(decl.name.as_str());
            }
        }
        if reached.len() == before {
            return reached;
        }
    }
}

/// Gated modules of every file, outermost first.
fn gated_modules(files: &[SourceFile]) -> Vec<&GatedModule> {
    let mut gated: Vec<&GatedModule> = files.iter().flat_map(|f| &f.gated_modules).collect();
    gated.sort_by_key(|m| m.path.matches("::").count());
    gated
}

/// Prepend the predicates of every gated module enclosing `decl`.
fn inherit_module_cfgs(mut decl: TypeDecl, gated: &[&GatedModule]) -> TypeDecl {
    let Some(namespace) = decl.namespace.as_deref() else {
        return decl;
    };

    let mut cfgs: Vec<String> = gated
        .iter()
        .filter(|m| {
            namespace == m.path
                || namespace
                    .strip_prefix(m.path.as_str())
                    .is_some_and(|rest| rest.starts_with("::"))
        })
        .flat_map(|m| m.cfgs.iter().cloned())
        .collect();

    if !cfgs.is_empty() {
        cfgs.append(&mut decl.cfgs);
        decl.cfgs = cfgs;
    }
    decl
}

/// Resolve the self type of an impl block to exactly one declaration.
fn resolve_self_type<'a>(declarations: &'a [TypeDecl], imp: &ImplDecl, crate_name: &str) -> Option<&'a TypeDecl> {
    let name = imp.self_path.last()?;
    let candidates: Vec<&TypeDecl> = declarations.iter().filter(|d| &d.name == name).collect();

    if imp.self_path.len() > 1 {
        let absolute = absolute_path(&imp.self_path, imp.namespace.as_deref(), crate_name)?;
        return candidates
            .into_iter()
            .find(|d| d.qualified_name().as_deref() == Some(absolute.as_str()));
    }

    let local: Vec<&TypeDecl> = candidates
        .iter()
        .copied()
        .filter(|d| d.namespace == imp.namespace)
        .collect();

    match (local.as_slice(), candidates.as_slice()) {
        ([decl], _) => Some(*decl),
        ([], [decl]) => Some(*decl),
        _ => None,
    }
}

/// Turn a path written inside `namespace` into a crate-absolute path.
fn absolute_path(segments: &[String], namespace: Option<&str>, crate_name: &str) -> Option<String> {
    let (first, rest) = segments.split_first()?;

    let mut base: Vec<String> = match first.as_str() {
        "crate" => vec![crate_name.to_string()],
        "self" | "super" => namespace?.split("::").map(str::to_string).collect(),
        _ => {
            let mut base: Vec<String> = namespace?.split("::").map(str::to_string).collect();
            base.push(first.clone());
            base
        }
    };

    let mut rest = rest.iter().peekable();
    if first == "super" {
        base.pop()?;
        while rest.next_if(|s| *s == "super").is_some() {
            base.pop()?;
        }
    }
    if base.is_empty() {
        return None;
    }

    base.extend(rest.cloned());
    Some(base.join("::"))
}
