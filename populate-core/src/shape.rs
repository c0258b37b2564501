//! Type classification.

use crate::error::{PopulateError, Result};
use crate::registry::Registry;
use crate::types::TypeDesc;

/// The generator family a type is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Enum,
    Primitive,
    Date,
    Array,
    Collection,
    Map,
    Custom,
    Composite,
    Interface,
}

/// Classify a descriptor into exactly one shape.
///
/// Built-in shapes win over the registry; the registry wins over composite
/// population. A type known only by identity that nobody registered a
/// generator for is unsupported.
pub fn classify(ty: &TypeDesc, registry: &Registry) -> Result<Shape> {
    let shape = match ty {
        TypeDesc::Enum(_) => Shape::Enum,
        TypeDesc::Scalar(_) => Shape::Primitive,
        TypeDesc::Date(_) => Shape::Date,
        TypeDesc::Array(_) => Shape::Array,
        TypeDesc::Collection { .. } => Shape::Collection,
        TypeDesc::Map { .. } => Shape::Map,
        TypeDesc::Interface(_) => Shape::Interface,
        TypeDesc::Struct(desc) if registry.contains(&desc.key()) => Shape::Custom,
        TypeDesc::Struct(_) => Shape::Composite,
        TypeDesc::Opaque(key) if registry.contains(key) => Shape::Custom,
        TypeDesc::Opaque(key) => return Err(PopulateError::unsupported(key.name())),
    };
    Ok(shape)
}
