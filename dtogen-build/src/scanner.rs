//! Source file scanner collecting struct, trait and impl declarations.

use anyhow::{Context, Result, ensure};
use quote::ToTokens;
use std::fs;
use std::path::{Path, PathBuf};
use syn::punctuated::Punctuated;
use syn::visit::{self, Visit};
use syn::{
    Attribute, Block, Fields, Ident, ImplItemFn, ItemFn, ItemImpl, ItemMod, ItemStruct, ItemTrait, Meta, Type,
    TypeParamBound,
};
use walkdir::{DirEntry, WalkDir};

use crate::model::{Location, MemberDecl, TypeDecl};

/// Declarations found in one source file, in source order.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub path: PathBuf,
    pub structs: Vec<TypeDecl>,
    pub traits: Vec<TraitDecl>,
    pub impls: Vec<ImplDecl>,
    /// Out-of-line `mod name;` declarations carrying `#[cfg]`.
    pub gated_modules: Vec<GatedModule>,
}

/// A module declared in another file under `#[cfg]` predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatedModule {
    pub path: String,
    pub cfgs: Vec<String>,
}

/// A trait declaration and the last segment of each supertrait path.
#[derive(Debug, Clone)]
pub struct TraitDecl {
    pub name: String,
    pub supertraits: Vec<String>,
}

/// A `impl Trait for Type` block.
#[derive(Debug, Clone)]
pub struct ImplDecl {
    /// Last segment of the implemented trait path.
    pub trait_name: String,
    /// Segments of the self type path as written.
    pub self_path: Vec<String>,
    /// Module the impl block lives in.
    pub namespace: Option<String>,
}

/// Scan a directory recursively, in file-name order, for Rust declarations.
pub fn scan_directory(path: &Path, crate_name: &str) -> Result<Vec<SourceFile>> {
    ensure!(path.exists(), "scan path {} does not exist", path.display());

    let mut files = Vec::new();

    for entry in WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == "rs"))
    {
        let file_path = entry.path();
        match scan_file(file_path, path, crate_name) {
            Ok(file) => files.push(file),
            Err(err) => log::warn!("skipping {}: {err:#}", file_path.display()),
        }
    }

    Ok(files)
}

fn is_ignored(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && (name == "target" || name == "generated"))
}

/// Scan a single Rust file.
fn scan_file(file_path: &Path, base_path: &Path, crate_name: &str) -> Result<SourceFile> {
    let content =
        fs::read_to_string(file_path).with_context(|| format!("Failed to read {}", file_path.display()))?;

    let module_path = compute_module_path(file_path, base_path, crate_name);
    if module_path.is_none() {
        log::debug!("{} has no nameable module path", file_path.display());
    }

    scan_source(file_path, &content, module_path)
}

/// Parse `content` and collect its declarations under `module_path`.
pub(crate) fn scan_source(file_path: &Path, content: &str, module_path: Option<String>) -> Result<SourceFile> {
    let syntax = syn::parse_file(content).with_context(|| format!("Failed to parse {}", file_path.display()))?;

    let mut visitor = DeclVisitor {
        file: SourceFile {
            path: file_path.to_path_buf(),
            ..SourceFile::default()
        },
        scope: module_path,
        cfgs: cfg_predicates(&syntax.attrs),
    };
    visitor.visit_file(&syntax);

    Ok(visitor.file)
}

struct DeclVisitor {
    file: SourceFile,
    /// Module path of the items being visited; `None` inside unnameable scopes.
    scope: Option<String>,
    /// `#[cfg]` predicates of every enclosing item, outermost first.
    cfgs: Vec<String>,
}

impl DeclVisitor {
    fn gated(&mut self, attrs: &[Attribute], visit: impl FnOnce(&mut Self)) {
        let depth = self.cfgs.len();
        self.cfgs.extend(cfg_predicates(attrs));
        visit(self);
        self.cfgs.truncate(depth);
    }

    fn type_decl(&self, item: &ItemStruct) -> Option<TypeDecl> {
        if !item.generics.params.is_empty() {
            log::debug!("skipping generic struct `{}`", item.ident);
            return None;
        }

        let members = match &item.fields {
            Fields::Named(named) => named.named.iter().filter_map(member_decl).collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                log::debug!("skipping tuple struct `{}`", item.ident);
                return None;
            }
        };

        let mut cfgs = self.cfgs.clone();
        cfgs.extend(cfg_predicates(&item.attrs));

        let start = item.ident.span().start();

        Some(TypeDecl {
            name: item.ident.to_string(),
            namespace: self.scope.clone(),
            members,
            derives: derive_paths(&item.attrs),
            cfgs,
            location: Location::new(self.file.path.clone(), start.line, start.column),
        })
    }
}

impl<'ast> Visit<'ast> for DeclVisitor {
    fn visit_item_mod(&mut self, item: &'ast ItemMod) {
        let outer = self.scope.clone();
        self.scope = outer.as_ref().map(|ns| format!("{ns}::{}", item.ident));
        self.gated(&item.attrs, |v| {
            if item.content.is_none()
                && !v.cfgs.is_empty()
                && let Some(path) = &v.scope
            {
                v.file.gated_modules.push(GatedModule {
                    path: path.clone(),
                    cfgs: v.cfgs.clone(),
                });
            }
            visit::visit_item_mod(v, item);
        });
        self.scope = outer;
    }

    fn visit_item_fn(&mut self, item: &'ast ItemFn) {
        self.gated(&item.attrs, |v| visit::visit_item_fn(v, item));
    }

    fn visit_impl_item_fn(&mut self, item: &'ast ImplItemFn) {
        self.gated(&item.attrs, |v| visit::visit_impl_item_fn(v, item));
    }

    fn visit_block(&mut self, block: &'ast Block) {
        let outer = self.scope.take();
        visit::visit_block(self, block);
        self.scope = outer;
    }

    fn visit_item_struct(&mut self, item: &'ast ItemStruct) {
        if let Some(decl) = self.type_decl(item) {
            self.file.structs.push(decl);
        }
    }

    fn visit_item_trait(&mut self, item: &'ast ItemTrait) {
        let supertraits = item
            .supertraits
            .iter()
            .filter_map(|bound| match bound {
                TypeParamBound::Trait(bound) => bound.path.segments.last().map(|s| s.ident.to_string()),
                _ => None,
            })
            .collect();

        self.file.traits.push(TraitDecl {
            name: item.ident.to_string(),
            supertraits,
        });

        visit::visit_item_trait(self, item);
    }

    fn visit_item_impl(&mut self, item: &'ast ItemImpl) {
        if let Some((None, trait_path, _)) = &item.trait_
            && let Some(trait_segment) = trait_path.segments.last()
            && let Type::Path(self_ty) = &*item.self_ty
            && self_ty.qself.is_none()
        {
            self.file.impls.push(ImplDecl {
                trait_name: trait_segment.ident.to_string(),
                self_path: self_ty.path.segments.iter().map(|s| s.ident.to_string()).collect(),
                namespace: self.scope.clone(),
            });
        }

        visit::visit_item_impl(self, item);
    }
}

fn member_decl(field: &syn::Field) -> Option<MemberDecl> {
    let name = field.ident.as_ref()?;
    Some(MemberDecl {
        name: name.to_string(),
        ty: field.ty.to_token_stream().to_string(),
        attributes: field.attrs.iter().map(|attr| path_to_string(attr.path())).collect(),
        cfgs: cfg_predicates(&field.attrs),
    })
}

/// Predicates of every `#[cfg(...)]` attribute, as token text.
fn cfg_predicates(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("cfg"))
        .filter_map(|attr| match &attr.meta {
            Meta::List(list) => Some(list.tokens.to_string()),
            _ => None,
        })
        .collect()
}

/// Collect every path listed in `#[derive(...)]` attributes.
fn derive_paths(attrs: &[Attribute]) -> Vec<String> {
    let mut derives = Vec::new();
    for attr in attrs {
        if attr.path().is_ident("derive")
            && let Ok(nested) = attr.parse_args_with(Punctuated::<syn::Path, syn::Token![,]>::parse_terminated)
        {
            derives.extend(nested.iter().map(path_to_string));
        }
    }
    derives
}

fn path_to_string(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

/// Compute the module path from a file path.
/// e.g., "src/domain/models.rs" -> "crate::domain::models"
///
/// Returns `None` when the file cannot be mapped onto a module, either because
/// it lies outside `base_path` or because a path component is not an identifier.
fn compute_module_path(file_path: &Path, base_path: &Path, crate_name: &str) -> Option<String> {
    let relative = file_path.strip_prefix(base_path).ok()?;

    let without_extension = relative.with_extension("");
    let mut parts = without_extension
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<&str>>>()?;

    if parts.last() == Some(&"mod") {
        parts.pop();
    }
    if parts.len() == 1 && (parts[0] == "lib" || parts[0] == "main") {
        parts.pop();
    }

    if parts.iter().any(|part| syn::parse_str::<Ident>(part).is_err()) {
        return None;
    }

    if parts.is_empty() {
        Some(crate_name.to_string())
    } else {
        Some(format!("{}::{}", crate_name, parts.join("::")))
    }
}
