//! Interface stubs.
//!
//! A stub answers every accessor of an interface with a random value of the
//! accessor's return type. Values are memoized, so an accessor called twice
//! returns the same value. By default the memo is shared by all stubs of the
//! same interface from one populator; [`StubScope::PerInstance`] keys it by
//! stub as well.

use crate::data::StubScope;
use crate::error::{PopulateError, Result};
use crate::populator::Populator;
use crate::reflect::Reflect;
use crate::types::{InterfaceDesc, TypeKey};
use crate::value::Value;
use std::fmt;

/// An interface that random stubs can stand in for.
///
/// Implemented by the `#[stub]` attribute for the generated stub type.
pub trait Interface: Sized {
    fn interface() -> InterfaceDesc;
    fn from_stub(stub: Stub) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct StubKey {
    interface: TypeKey,
    method: &'static str,
    instance: Option<u64>,
}

/// Random stand-in for an interface.
#[derive(Clone)]
pub struct Stub {
    desc: InterfaceDesc,
    populator: Populator,
    instance: u64,
}

impl Stub {
    pub(crate) fn new(desc: InterfaceDesc, populator: Populator, instance: u64) -> Self {
        Stub {
            desc,
            populator,
            instance,
        }
    }

    pub fn interface(&self) -> InterfaceDesc {
        self.desc
    }

    /// Sequence number of this stub within its populator.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// The memoized value of accessor `method`, generated on first use.
    pub fn value(&self, method: &str) -> Result<Value> {
        let accessor = self.desc.method(method).ok_or_else(|| {
            PopulateError::invalid_argument(format!(
                "Interface {} has no accessor `{method}`",
                self.desc.name()
            ))
        })?;
        let key = StubKey {
            interface: self.desc.key(),
            method: accessor.name(),
            instance: match self.populator.config().stub_scope {
                StubScope::Shared => None,
                StubScope::PerInstance => Some(self.instance),
            },
        };

        let env = &self.populator.env;
        let cached = env.stub_values.borrow().get(&key).cloned();
        if let Some(value) = cached {
            tracing::trace!(interface = self.desc.name(), method, "stub cache hit");
            return Ok(value);
        }
        tracing::trace!(interface = self.desc.name(), method, "stub cache miss");
        let value = self.populator.create(accessor.returns())?;
        env.stub_values.borrow_mut().insert(key, value.clone());
        Ok(value)
    }

    /// Typed value of accessor `method`.
    pub fn get<T: Reflect>(&self, method: &str) -> Result<T> {
        T::from_value(self.value(method)?)
    }

    /// Typed value of accessor `method`, for trait implementations that
    /// cannot return errors.
    ///
    /// # Panics
    ///
    /// Panics with the error message when the value cannot be generated.
    pub fn accessor<T: Reflect>(&self, method: &str) -> T {
        match self.get(method) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl PartialEq for Stub {
    fn eq(&self, other: &Self) -> bool {
        self.desc == other.desc && self.instance == other.instance
    }
}

impl fmt::Display for Stub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "random stub for {}", self.desc.name())
    }
}

impl fmt::Debug for Stub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stub")
            .field("interface", &self.desc.name())
            .field("instance", &self.instance)
            .finish()
    }
}
