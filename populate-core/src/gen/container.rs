//! Array, collection and map generators.
//!
//! Sizes are drawn from `[0, container_limit)`. Elements are requested
//! through the context one at a time; the first absent element (depth
//! ceiling reached) ends the container, which is returned as filled so far.
//! A length hint on the container is not passed down to its elements.

use super::RandomValue;
use crate::context::Context;
use crate::data::Length;
use crate::error::{PopulateError, Result};
use crate::types::{CollectionKind, MapKind, TypeDesc};
use crate::value::Value;
use rand::Rng;

fn draw_size(ctx: &Context<'_>) -> usize {
    let limit = ctx.config().container_limit;
    if limit == 0 {
        0
    } else {
        ctx.rng().gen_range(0..limit)
    }
}

/// Variable-length array of one element type.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomArray {
    element: TypeDesc,
}

impl RandomArray {
    pub fn new(element: TypeDesc) -> Self {
        RandomArray { element }
    }
}

impl RandomValue for RandomArray {
    fn value(&self, ctx: &mut Context<'_>, _length: Length) -> Result<Value> {
        let size = draw_size(ctx);
        let mut items = Vec::with_capacity(size);
        for _ in 0..size {
            match ctx.create(&self.element, Length::DEFAULT)? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(Value::Array(items))
    }
}

/// Collection of the kind's default implementation.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomCollection {
    kind: CollectionKind,
    args: Vec<TypeDesc>,
}

impl RandomCollection {
    pub fn new(kind: CollectionKind, args: Vec<TypeDesc>) -> Self {
        RandomCollection { kind, args }
    }
}

impl RandomValue for RandomCollection {
    fn value(&self, ctx: &mut Context<'_>, _length: Length) -> Result<Value> {
        let element = match self.args.as_slice() {
            [] => {
                return Err(PopulateError::invalid_argument(
                    "Non-parameterized collections are not supported",
                ))
            }
            [element] => element,
            args => {
                return Err(PopulateError::invalid_argument(format!(
                    "Collection {:?} expects one type argument, got {}",
                    self.kind,
                    args.len()
                )))
            }
        };

        let container = self.kind.implementation();
        let size = draw_size(ctx);
        let mut items: Vec<Value> = Vec::with_capacity(size);
        for _ in 0..size {
            let Some(item) = ctx.create(element, Length::DEFAULT)? else {
                break;
            };
            if container.is_set() && items.contains(&item) {
                continue;
            }
            items.push(item);
        }
        Ok(Value::Collection(container, items))
    }
}

/// Map of the kind's default implementation.
///
/// A repeated key replaces the earlier entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomMap {
    kind: MapKind,
    args: Vec<TypeDesc>,
}

impl RandomMap {
    pub fn new(kind: MapKind, args: Vec<TypeDesc>) -> Self {
        RandomMap { kind, args }
    }
}

impl RandomValue for RandomMap {
    fn value(&self, ctx: &mut Context<'_>, _length: Length) -> Result<Value> {
        let (key_ty, value_ty) = match self.args.as_slice() {
            [key, value] => (key, value),
            [] => {
                return Err(PopulateError::invalid_argument(
                    "Non-parameterized maps are not supported",
                ))
            }
            args => {
                return Err(PopulateError::invalid_argument(format!(
                    "Map {:?} expects key and value type arguments, got {}",
                    self.kind,
                    args.len()
                )))
            }
        };

        let size = draw_size(ctx);
        let mut entries: Vec<(Value, Value)> = Vec::with_capacity(size);
        for _ in 0..size {
            let Some(key) = ctx.create(key_ty, Length::DEFAULT)? else {
                break;
            };
            let Some(value) = ctx.create(value_ty, Length::DEFAULT)? else {
                break;
            };
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
        Ok(Value::Map(self.kind.implementation(), entries))
    }
}
