//! One generation pass: discovery, emission, publication.

use std::collections::HashMap;

use anyhow::Result;
use proc_macro2::TokenStream;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::discovery::discover_entities;
use crate::emit::{EmitOptions, render_artifact, render_dto, render_mapper};
use crate::error::{GenerateError, GenerateResult};
use crate::host::GeneratorHost;
use crate::model::{DTO_ARTIFACT, EntityDeclaration, GeneratedArtifact, MAPPER_ARTIFACT};
use crate::semantic::SemanticModel;

/// Everything produced by one pass.
#[derive(Debug, Clone)]
pub struct GenerationPass {
    pub entities: Vec<EntityDeclaration>,
    pub dtos: GeneratedArtifact,
    pub mappers: GeneratedArtifact,
    /// Number of `ToDto` impls in `mappers`.
    pub mapper_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run discovery and both emitters without publishing anything.
///
/// Output order follows discovery order. Failures stay local to one entity:
/// an entity without a module path still gets its transfer struct and a
/// `DTO0001` diagnostic in place of its mapper, and an entity that cannot be
/// rendered at all is left out of both artifacts with a `DTO0002` diagnostic.
pub fn generate<M: SemanticModel + ?Sized>(model: &M, options: &EmitOptions) -> GenerationPass {
    let entities = discover_entities(model);
    log::debug!("discovered {} entities", entities.len());

    let mut dto_slots = Vec::with_capacity(entities.len());
    let mut mapper_slots = Vec::with_capacity(entities.len());
    let mut diagnostics = Diagnostics::default();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (position, entity) in entities.iter().enumerate() {
        match first_seen.get(&entity.name) {
            Some(&first) => diagnostics.duplicate_name(entity, &entities[first]),
            None => {
                first_seen.insert(entity.name.clone(), position);
            }
        }

        match render_entity(entity, options, &mut diagnostics) {
            Ok((dto, mapper)) => {
                dto_slots.push(dto);
                mapper_slots.extend(mapper);
            }
            Err(err) => {
                log::warn!("skipping entity `{}`: {err}", entity.name);
                diagnostics.generation_failed(entity, &err);
            }
        }
    }

    GenerationPass {
        mapper_count: mapper_slots.len(),
        dtos: render_artifact(DTO_ARTIFACT, dto_slots),
        mappers: render_artifact(MAPPER_ARTIFACT, mapper_slots),
        diagnostics: diagnostics.into_vec(),
        entities,
    }
}

/// Generate and hand the result to `host`: diagnostics first, then both artifacts.
pub fn run_pass<M, H>(model: &M, options: &EmitOptions, host: &mut H) -> Result<GenerationPass>
where
    M: SemanticModel + ?Sized,
    H: GeneratorHost + ?Sized,
{
    let pass = generate(model, options);

    for diagnostic in &pass.diagnostics {
        host.report_diagnostic(diagnostic);
    }
    host.publish(&pass.dtos)?;
    host.publish(&pass.mappers)?;

    Ok(pass)
}

// Both items are checked before either is kept, so a failure drops the pair.
fn render_entity(
    entity: &EntityDeclaration,
    options: &EmitOptions,
    diagnostics: &mut Diagnostics,
) -> GenerateResult<(TokenStream, Option<TokenStream>)> {
    let dto = render_dto(entity, options)?;
    ensure_item(entity, &dto)?;

    let mapper = render_mapper(entity, options, diagnostics)?;
    if let Some(mapper) = &mapper {
        ensure_item(entity, mapper)?;
    }

    Ok((dto, mapper))
}

fn ensure_item(entity: &EntityDeclaration, tokens: &TokenStream) -> GenerateResult<()> {
    syn::parse2::<syn::Item>(tokens.clone())
        .map(drop)
        .map_err(|err| GenerateError::MalformedItem {
            entity: entity.name.clone(),
            message: err.to_string(),
        })
}
