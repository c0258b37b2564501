//! Generator registry: custom generators keyed by concrete type.

use crate::gen::{RandomFile, RandomTimeZone, RandomUrl, RandomValue};
use crate::types::{TypeDesc, TypeKey};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// How a registered generator is constructed for each request.
#[derive(Clone, Copy)]
pub enum GeneratorCtor {
    /// No-argument constructor.
    Plain(fn() -> Box<dyn RandomValue>),
    /// Constructor that inspects the requested type descriptor.
    Typed(fn(&TypeDesc) -> Box<dyn RandomValue>),
}

impl GeneratorCtor {
    /// Constructor for a generator built with `Default`.
    pub fn of<G: RandomValue + Default + 'static>() -> Self {
        GeneratorCtor::Plain(|| Box::new(G::default()) as Box<dyn RandomValue>)
    }

    pub fn build(&self, ty: &TypeDesc) -> Box<dyn RandomValue> {
        match self {
            GeneratorCtor::Plain(ctor) => ctor(),
            GeneratorCtor::Typed(ctor) => ctor(ty),
        }
    }
}

impl fmt::Debug for GeneratorCtor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorCtor::Plain(_) => f.write_str("GeneratorCtor::Plain"),
            GeneratorCtor::Typed(_) => f.write_str("GeneratorCtor::Typed"),
        }
    }
}

/// Mapping from concrete type to the generator that builds it.
///
/// Consulted after the built-in shapes and before composite population.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    generators: HashMap<TypeKey, GeneratorCtor>,
}

impl Registry {
    /// A registry with no generators at all.
    pub fn empty() -> Self {
        Registry::default()
    }

    /// A registry seeded with the URL, file path and time zone generators.
    pub fn with_builtins() -> Self {
        let mut registry = Registry::empty();
        registry.register::<RandomUrl>(TypeKey::of::<url::Url>());
        registry.register::<RandomFile>(TypeKey::of::<PathBuf>());
        registry.register::<RandomTimeZone>(TypeKey::of::<chrono_tz::Tz>());
        registry
    }

    pub fn register<G: RandomValue + Default + 'static>(&mut self, key: TypeKey) {
        self.insert(key, GeneratorCtor::of::<G>());
    }

    pub fn register_typed(&mut self, key: TypeKey, ctor: fn(&TypeDesc) -> Box<dyn RandomValue>) {
        self.insert(key, GeneratorCtor::Typed(ctor));
    }

    /// Register `ctor` for `key`, replacing any previous generator.
    pub fn insert(&mut self, key: TypeKey, ctor: GeneratorCtor) {
        tracing::debug!(type_name = key.name(), "registering random generator");
        self.generators.insert(key, ctor);
    }

    /// Remove the generator for `key`; returns whether one was registered.
    pub fn unregister(&mut self, key: &TypeKey) -> bool {
        let removed = self.generators.remove(key).is_some();
        if removed {
            tracing::debug!(type_name = key.name(), "unregistered random generator");
        }
        removed
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.generators.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Build the generator registered for `ty`, if any.
    pub fn instantiate(&self, ty: &TypeDesc) -> Option<Box<dyn RandomValue>> {
        let key = ty.key()?;
        self.generators.get(&key).map(|ctor| ctor.build(ty))
    }
}
