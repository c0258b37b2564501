//! Generated values.

use crate::error::{PopulateError, Result};
use crate::interface::Stub;
use crate::types::{Container, MapContainer, TypeKey};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::time::SystemTime;

/// A randomly generated value, prior to conversion into a Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
    Enum(EnumValue),
    Date(DateValue),
    Array(Vec<Value>),
    Collection(Container, Vec<Value>),
    Map(MapContainer, Vec<(Value, Value)>),
    Record(Record),
    Custom(CustomValue),
    Stub(Stub),
}

impl Value {
    /// Short description of the value's shape, for mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::I128(_) => "i128",
            Value::Isize(_) => "isize",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U128(_) => "u128",
            Value::Usize(_) => "usize",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::String(_) => "string",
            Value::Enum(_) => "enum constant",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Collection(..) => "collection",
            Value::Map(..) => "map",
            Value::Record(_) => "record",
            Value::Custom(_) => "custom value",
            Value::Stub(_) => "interface stub",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Elements of an array or collection.
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::Collection(_, items) => Some(items),
            _ => None,
        }
    }

    pub fn entries(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(_, entries) => Some(entries),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(custom) => custom.downcast_ref(),
            _ => None,
        }
    }

    /// Take the payload of a custom value produced by a registered generator.
    pub fn into_custom<T: Any + Clone>(self) -> Result<T> {
        match self {
            Value::Custom(custom) => custom.downcast(),
            other => Err(PopulateError::mismatch(
                std::any::type_name::<T>(),
                other.kind(),
            )),
        }
    }

    /// Index of the enum constant, checked against the expected enumeration.
    pub fn into_enum_index<T: 'static>(self) -> Result<usize> {
        let expected = TypeKey::of::<T>();
        match self {
            Value::Enum(constant) if constant.key == expected => Ok(constant.index),
            Value::Enum(constant) => Err(PopulateError::mismatch(
                expected.name(),
                constant.key.name(),
            )),
            other => Err(PopulateError::mismatch(expected.name(), other.kind())),
        }
    }

    pub fn into_stub(self) -> Result<Stub> {
        match self {
            Value::Stub(stub) => Ok(stub),
            other => Err(PopulateError::mismatch("interface stub", other.kind())),
        }
    }
}

/// One constant of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue {
    pub key: TypeKey,
    pub index: usize,
    pub name: &'static str,
}

/// An instant in one of the supported date/time representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue {
    Utc(DateTime<Utc>),
    NaiveDateTime(NaiveDateTime),
    NaiveDate(NaiveDate),
    NaiveTime(NaiveTime),
    SystemTime(SystemTime),
}

/// Generated fields of a composite type, in population order.
///
/// A field maps to `None` when its generation was truncated by the depth
/// ceiling; conversion leaves such fields at their default.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    key: TypeKey,
    fields: Vec<(&'static str, Option<Value>)>,
}

impl Record {
    pub fn new(key: TypeKey) -> Self {
        Record {
            key,
            fields: Vec::new(),
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn set(&mut self, field: &'static str, value: Option<Value>) {
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// The generated value of `field`, if it was populated and not truncated.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| *name == field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, Option<&Value>)> + '_ {
        self.fields.iter().map(|(name, value)| (*name, value.as_ref()))
    }

    /// Populated fields with a value, dropping truncated ones.
    pub fn into_present(self) -> impl Iterator<Item = (&'static str, Value)> {
        self.fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
    }
}

/// Payload of a registered custom generator.
#[derive(Clone)]
pub struct CustomValue {
    key: TypeKey,
    inner: Rc<dyn Any>,
}

impl CustomValue {
    pub fn new<T: Any>(value: T) -> Self {
        CustomValue {
            key: TypeKey::of::<T>(),
            inner: Rc::new(value),
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Move the payload out, cloning it when the value is shared.
    pub fn downcast<T: Any + Clone>(self) -> Result<T> {
        let found = self.key.name();
        match self.inner.downcast::<T>() {
            Ok(rc) => Ok(Rc::try_unwrap(rc).unwrap_or_else(|shared| (*shared).clone())),
            Err(_) => Err(PopulateError::mismatch(std::any::type_name::<T>(), found)),
        }
    }
}

impl PartialEq for CustomValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomValue").field(&self.key.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_record_keeps_truncated_fields_out_of_present() {
        let mut record = Record::new(TypeKey::of::<String>());
        record.set("name", Some(Value::String("kermit".into())));
        record.set("parent", None);
        assert_eq!(record.len(), 2);
        assert!(record.contains("parent"));
        assert_eq!(record.get("parent"), None);
        let present: Vec<_> = record.into_present().map(|(name, _)| name).collect();
        assert_eq!(present, vec!["name"]);
    }

    #[test]
    fn test_custom_value_round_trips_payload() {
        let value = Value::Custom(CustomValue::new(PathBuf::from("/tmp/a")));
        assert_eq!(
            value.downcast_ref::<PathBuf>(),
            Some(&PathBuf::from("/tmp/a"))
        );
        let shared = value.clone();
        assert_eq!(shared.into_custom::<PathBuf>().unwrap(), PathBuf::from("/tmp/a"));
        assert!(value.into_custom::<String>().is_err());
    }

    #[test]
    fn test_enum_index_checks_enumeration() {
        enum Colour {}
        enum Shape {}
        let constant = Value::Enum(EnumValue {
            key: TypeKey::of::<Colour>(),
            index: 2,
            name: "Blue",
        });
        assert_eq!(constant.clone().into_enum_index::<Colour>().unwrap(), 2);
        assert!(constant.into_enum_index::<Shape>().is_err());
    }
}
