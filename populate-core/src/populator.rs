//! The generation environment and its public entry points.

use crate::context::Context;
use crate::data::{Config, Length, Seed};
use crate::error::{PopulateError, Result};
use crate::fields::{FieldConfig, FieldDescriptor, FieldTable};
use crate::gen::RandomValue;
use crate::interface::{Interface, Stub, StubKey};
use crate::reflect::Reflect;
use crate::registry::{GeneratorCtor, Registry};
use crate::types::{CollectionKind, InterfaceDesc, MapKind, TypeDesc, TypeKey};
use crate::value::Value;
use rand::RngCore;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// State shared by every request of one populator.
pub(crate) struct Environment {
    pub(crate) config: Config,
    pub(crate) rng: RefCell<Box<dyn RngCore>>,
    pub(crate) registry: RefCell<Registry>,
    pub(crate) fields: RefCell<FieldTable>,
    pub(crate) stub_values: RefCell<HashMap<StubKey, Value>>,
    next_stub: Cell<u64>,
}

/// Handle to a generation environment.
///
/// Cloning is cheap and clones share everything: configuration, random
/// source, generator registry, field configuration and the stub value cache.
/// A populator is single-threaded.
///
/// ```
/// use populate_core::{Populator, TypeDesc, ScalarKind};
///
/// let populator = Populator::new();
/// populator.reseed(42);
/// let name: String = populator.new_instance().unwrap();
/// assert!(!name.is_empty());
/// let value = populator.create(&TypeDesc::Scalar(ScalarKind::I64)).unwrap();
/// assert_eq!(value.kind(), "i64");
/// ```
#[derive(Clone)]
pub struct Populator {
    pub(crate) env: Rc<Environment>,
}

impl Populator {
    pub fn new() -> Self {
        Populator::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let env = Environment {
            config,
            rng: RefCell::new(Box::new(Seed::random())),
            registry: RefCell::new(Registry::with_builtins()),
            fields: RefCell::new(FieldTable::default()),
            stub_values: RefCell::new(HashMap::new()),
            next_stub: Cell::new(0),
        };
        Populator { env: Rc::new(env) }
    }

    pub fn config(&self) -> &Config {
        &self.env.config
    }

    /// Restart the random source from `seed`, making the following requests
    /// reproducible.
    pub fn reseed(&self, seed: u64) {
        self.set_rng(Seed::from_u64(seed));
    }

    /// Replace the random source.
    pub fn set_rng<R: RngCore + 'static>(&self, rng: R) {
        *self.env.rng.borrow_mut() = Box::new(rng);
    }

    /// A fresh context at depth zero, for issuing several requests.
    pub fn context(&self) -> Context<'_> {
        Context::new(&self.env)
    }

    /// Generate a value for `ty`.
    ///
    /// Interfaces are answered with a [`Stub`]. Errors with `Internal` when
    /// the depth ceiling leaves nothing to return.
    pub fn create(&self, ty: &TypeDesc) -> Result<Value> {
        self.create_with_length(ty, Length::DEFAULT)?.ok_or_else(|| {
            PopulateError::internal(format!(
                "depth limit {} leaves no room to generate {ty}",
                self.env.config.depth_limit
            ))
        })
    }

    /// Generate a value for `ty` under a maximum length hint.
    pub fn create_with_length(&self, ty: &TypeDesc, length: Length) -> Result<Option<Value>> {
        match ty {
            TypeDesc::Interface(desc) => Ok(Some(Value::Stub(self.new_stub(*desc)))),
            _ => self.context().create(ty, length),
        }
    }

    pub fn new_instance<T: Reflect>(&self) -> Result<T> {
        T::from_value(self.create(&T::type_desc())?)
    }

    pub fn new_instance_with_length<T: Reflect>(&self, length: Length) -> Result<Option<T>> {
        self.create_with_length(&T::type_desc(), length)?
            .map(T::from_value)
            .transpose()
    }

    /// Generate a collection of `kind` holding `element` values.
    pub fn new_collection(&self, kind: CollectionKind, element: &TypeDesc) -> Result<Value> {
        self.create(&TypeDesc::collection(kind, element.clone()))
    }

    pub fn new_map(&self, kind: MapKind, key: &TypeDesc, value: &TypeDesc) -> Result<Value> {
        self.create(&TypeDesc::map(kind, key.clone(), value.clone()))
    }

    /// A stub answering the accessors of interface `I`.
    pub fn stub<I: Interface>(&self) -> I {
        I::from_stub(self.new_stub(I::interface()))
    }

    pub(crate) fn new_stub(&self, desc: InterfaceDesc) -> Stub {
        let instance = self.env.next_stub.get();
        self.env.next_stub.set(instance + 1);
        Stub::new(desc, self.clone(), instance)
    }

    /// Use a default-constructed `G` whenever a `T` is requested.
    pub fn register<T: 'static, G: RandomValue + Default + 'static>(&self) {
        self.env.registry.borrow_mut().register::<G>(TypeKey::of::<T>());
    }

    /// Use the generator `ctor` builds from the requested descriptor whenever
    /// a `T` is requested.
    pub fn register_typed<T: 'static>(&self, ctor: fn(&TypeDesc) -> Box<dyn RandomValue>) {
        self.env
            .registry
            .borrow_mut()
            .register_typed(TypeKey::of::<T>(), ctor);
    }

    pub fn register_key(&self, key: TypeKey, ctor: GeneratorCtor) {
        self.env.registry.borrow_mut().insert(key, ctor);
    }

    /// Returns whether a generator was registered for `T`.
    pub fn unregister<T: 'static>(&self) -> bool {
        self.unregister_key(&TypeKey::of::<T>())
    }

    pub fn unregister_key(&self, key: &TypeKey) -> bool {
        self.env.registry.borrow_mut().unregister(key)
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.env.registry.borrow().contains(&TypeKey::of::<T>())
    }

    /// Replace the field configuration; discovered fields are forgotten.
    pub fn configure(&self, config: FieldConfig) {
        tracing::debug!(classes = config.len(), "installing field configuration");
        *self.env.fields.borrow_mut() = FieldTable::new(config);
    }

    pub fn configure_xml(&self, document: &str) -> Result<()> {
        self.configure(FieldConfig::from_xml(document)?);
        Ok(())
    }

    pub fn configure_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.configure(FieldConfig::from_path(path)?);
        Ok(())
    }

    /// Go back to discovering every mutable, non-identity field.
    pub fn clear_configuration(&self) {
        tracing::debug!("clearing field configuration");
        *self.env.fields.borrow_mut() = FieldTable::default();
    }

    /// The fields population assigns for composite type `T`.
    pub fn fields_of<T: Reflect>(&self) -> Result<Rc<[FieldDescriptor]>> {
        match T::type_desc() {
            TypeDesc::Struct(desc) => self.env.fields.borrow_mut().resolve(&desc),
            other => Err(PopulateError::invalid_argument(format!(
                "{other} is not a composite type"
            ))),
        }
    }
}

impl Default for Populator {
    fn default() -> Self {
        Populator::new()
    }
}

impl fmt::Debug for Populator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Populator")
            .field("config", &self.env.config)
            .field("generators", &self.env.registry.borrow().len())
            .finish_non_exhaustive()
    }
}

thread_local! {
    static DEFAULT: Populator = Populator::new();
}

/// The populator behind this thread's free functions.
pub fn populator() -> Populator {
    DEFAULT.with(Populator::clone)
}

/// Generate a `T` with this thread's populator.
pub fn new_instance<T: Reflect>() -> Result<T> {
    populator().new_instance()
}

pub fn register<T: 'static, G: RandomValue + Default + 'static>() {
    populator().register::<T, G>();
}

pub fn unregister<T: 'static>() -> bool {
    populator().unregister::<T>()
}

pub fn configure(config: FieldConfig) {
    populator().configure(config);
}
