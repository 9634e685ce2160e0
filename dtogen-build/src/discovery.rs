//! Entity discovery and field extraction.

use crate::model::{EntityDeclaration, FieldDescriptor, TypeDecl};
use crate::semantic::SemanticModel;

/// Select every declaration that implements the entity marker, in first-seen order.
pub fn discover_entities<M: SemanticModel + ?Sized>(model: &M) -> Vec<EntityDeclaration> {
    model
        .declarations()
        .iter()
        .filter(|decl| model.is_entity(decl))
        .map(|decl| EntityDeclaration {
            name: decl.name.clone(),
            namespace: decl.namespace.clone(),
            fields: extract_fields(model, decl),
            cfgs: decl.cfgs.clone(),
            location: decl.location.clone(),
        })
        .collect()
}

/// Direct fields of `decl` in declaration order, minus excluded ones.
pub fn extract_fields<M: SemanticModel + ?Sized>(model: &M, decl: &TypeDecl) -> Vec<FieldDescriptor> {
    decl.members
        .iter()
        .map(|member| FieldDescriptor {
            name: member.name.clone(),
            ty: member.ty.clone(),
            excluded: model.is_excluded(member),
            cfgs: member.cfgs.clone(),
        })
        .filter(|field| !field.excluded)
        .collect()
}
