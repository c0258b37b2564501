//! Random value generators.
//!
//! Every generator implements [`RandomValue`]. The built-in ones are picked
//! by shape inside [`Context`]; custom ones live in the
//! [`crate::registry::Registry`] and are picked by type identity.

use crate::context::Context;
use crate::data::Length;
use crate::error::Result;
use crate::value::Value;

pub mod composite;
pub mod container;
pub mod custom;
pub mod scalar;

pub use composite::RandomComposite;
pub use container::{RandomArray, RandomCollection, RandomMap};
pub use custom::{RandomFile, RandomTimeZone, RandomUrl};
pub use scalar::{RandomDate, RandomEnum, RandomPrimitive};

/// A source of random values of one type.
///
/// `length` is the maximum length hint of the field being populated;
/// [`Length::DEFAULT`] leaves the size to the generator. Generators that
/// need nested values request them through `ctx`, which enforces the depth
/// ceiling.
pub trait RandomValue {
    fn value(&self, ctx: &mut Context<'_>, length: Length) -> Result<Value>;
}

impl<F> RandomValue for F
where
    F: Fn(&mut Context<'_>, Length) -> Result<Value>,
{
    fn value(&self, ctx: &mut Context<'_>, length: Length) -> Result<Value> {
        self(ctx, length)
    }
}
