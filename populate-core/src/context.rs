//! Generation context: depth tracking and dispatch by shape.

use crate::data::{Config, Length};
use crate::error::{PopulateError, Result};
use crate::fields::FieldDescriptor;
use crate::gen::{
    RandomArray, RandomCollection, RandomComposite, RandomDate, RandomEnum, RandomMap,
    RandomPrimitive, RandomValue,
};
use crate::populator::Environment;
use crate::reflect::Reflect;
use crate::shape::{classify, Shape};
use crate::types::{StructDesc, TypeDesc};
use crate::value::Value;
use rand::RngCore;
use std::cell::RefMut;
use std::rc::Rc;

/// One generation request in progress.
///
/// The context counts how deep the current request has recursed. Once the
/// depth reaches [`Config::depth_limit`], [`Context::create`] returns `None`
/// instead of a value; that is how cyclic type graphs terminate.
pub struct Context<'a> {
    env: &'a Environment,
    depth: usize,
}

impl<'a> Context<'a> {
    pub(crate) fn new(env: &'a Environment) -> Self {
        Context { env, depth: 0 }
    }

    /// The random source shared by every generator of this environment.
    ///
    /// Release the guard before requesting nested values.
    pub fn rng(&self) -> RefMut<'a, Box<dyn RngCore>> {
        self.env.rng.borrow_mut()
    }

    pub fn config(&self) -> &'a Config {
        &self.env.config
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Resolved field descriptors of a composite type.
    pub fn fields(&self, desc: &StructDesc) -> Result<Rc<[FieldDescriptor]>> {
        self.env.fields.borrow_mut().resolve(desc)
    }

    /// Generate a value for `ty`, or `None` once the depth ceiling is hit.
    pub fn create(&mut self, ty: &TypeDesc, length: Length) -> Result<Option<Value>> {
        self.depth += 1;
        if self.depth >= self.env.config.depth_limit {
            tracing::trace!(depth = self.depth, type_name = %ty, "depth ceiling reached");
            self.depth -= 1;
            return Ok(None);
        }
        let result = self.dispatch(ty, length);
        self.depth -= 1;
        result.map(Some)
    }

    /// Typed variant of [`Context::create`].
    pub fn instance<T: Reflect>(&mut self, length: Length) -> Result<Option<T>> {
        self.create(&T::type_desc(), length)?
            .map(T::from_value)
            .transpose()
    }

    fn dispatch(&mut self, ty: &TypeDesc, length: Length) -> Result<Value> {
        let shape = classify(ty, &self.env.registry.borrow())?;
        let generator: Box<dyn RandomValue> = match (shape, ty) {
            (Shape::Enum, TypeDesc::Enum(desc)) => Box::new(RandomEnum::new(*desc)),
            (Shape::Primitive, TypeDesc::Scalar(kind)) => Box::new(RandomPrimitive::new(*kind)),
            (Shape::Date, TypeDesc::Date(kind)) => Box::new(RandomDate::new(*kind)),
            (Shape::Array, TypeDesc::Array(element)) => {
                Box::new(RandomArray::new(element.as_ref().clone()))
            }
            (Shape::Collection, TypeDesc::Collection { kind, args }) => {
                Box::new(RandomCollection::new(*kind, args.clone()))
            }
            (Shape::Map, TypeDesc::Map { kind, args }) => {
                Box::new(RandomMap::new(*kind, args.clone()))
            }
            (Shape::Composite, TypeDesc::Struct(desc)) => Box::new(RandomComposite::new(*desc)),
            (Shape::Custom, _) => self
                .env
                .registry
                .borrow()
                .instantiate(ty)
                .ok_or_else(|| PopulateError::unsupported(ty.to_string()))?,
            // Stubs need an owning populator; only top-level requests build them.
            (Shape::Interface, _) => return Err(PopulateError::unresolved(ty.to_string())),
            _ => return Err(PopulateError::unresolved(ty.to_string())),
        };
        generator.value(self, length)
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("depth", &self.depth).finish()
    }
}
