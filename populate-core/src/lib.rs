//! Core functionality for populate: type-directed random test fixtures.
//!
//! This crate provides the generation engine: type descriptors, the shape
//! classifier, the built-in and registered generators, field configuration,
//! the depth-limited generation context and interface stubs.

pub mod context;
pub mod corpus;
pub mod data;
pub mod error;
pub mod fields;
pub mod gen;
pub mod interface;
pub mod populator;
pub mod reflect;
pub mod registry;
pub mod shape;
pub mod types;
pub mod value;

// Re-export the main types
pub use context::Context;
pub use data::*;
pub use error::*;
pub use fields::{FieldConfig, FieldDescriptor, FieldEntry};
pub use gen::{
    RandomArray, RandomCollection, RandomComposite, RandomDate, RandomEnum, RandomFile, RandomMap,
    RandomPrimitive, RandomTimeZone, RandomUrl, RandomValue,
};
pub use interface::{Interface, Stub};
pub use populator::{configure, new_instance, populator, register, unregister, Populator};
pub use reflect::Reflect;
pub use registry::{GeneratorCtor, Registry};
pub use shape::{classify, Shape};
pub use types::*;
pub use value::*;
