//! Conversion between Rust types and the engine's descriptors and values.

use crate::error::{PopulateError, Result};
use crate::types::{CollectionKind, DateKind, MapKind, ScalarKind, TypeDesc, TypeKey};
use crate::value::{DateValue, Value};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::path::PathBuf;
use std::time::SystemTime;

/// A type the engine can describe and build.
///
/// Implement it with `#[derive(Populate)]` for structs and fieldless enums,
/// or by hand for types served by a registered generator:
///
/// ```
/// use populate_core::{Reflect, Result, TypeDesc, Value};
///
/// #[derive(Clone)]
/// struct Isbn(String);
///
/// impl Reflect for Isbn {
///     fn type_desc() -> TypeDesc {
///         TypeDesc::opaque::<Self>()
///     }
///
///     fn from_value(value: Value) -> Result<Self> {
///         value.into_custom()
///     }
/// }
/// ```
pub trait Reflect: Sized + 'static {
    fn type_desc() -> TypeDesc;
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T>(found: &Value) -> PopulateError {
    PopulateError::mismatch(std::any::type_name::<T>(), found.kind())
}

macro_rules! reflect_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::Scalar(ScalarKind::$kind)
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::$kind(inner) => Ok(inner),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

reflect_scalar! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_desc() -> TypeDesc {
        T::type_desc()
    }

    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(Some)
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_desc() -> TypeDesc {
        T::type_desc()
    }

    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(Box::new)
    }
}

fn elements<T: Reflect, C: FromIterator<T>>(value: Value, target: &str) -> Result<C> {
    match value {
        Value::Array(items) | Value::Collection(_, items) => {
            items.into_iter().map(T::from_value).collect()
        }
        other => Err(PopulateError::mismatch(target, other.kind())),
    }
}

fn entries<K: Reflect, V: Reflect, C: FromIterator<(K, V)>>(
    value: Value,
    target: &str,
) -> Result<C> {
    match value {
        Value::Map(_, entries) => entries
            .into_iter()
            .map(|(k, v)| -> Result<(K, V)> { Ok((K::from_value(k)?, V::from_value(v)?)) })
            .collect(),
        other => Err(PopulateError::mismatch(target, other.kind())),
    }
}

impl<T: Reflect> Reflect for Box<[T]> {
    fn type_desc() -> TypeDesc {
        TypeDesc::array(T::type_desc())
    }

    fn from_value(value: Value) -> Result<Self> {
        elements::<T, Vec<T>>(value, std::any::type_name::<Self>()).map(Vec::into_boxed_slice)
    }
}

macro_rules! reflect_collection {
    ($($ty:ident<T $(: $($bound:path),+)?> => $kind:ident),* $(,)?) => {
        $(
            impl<T: Reflect $($(+ $bound)+)?> Reflect for $ty<T> {
                fn type_desc() -> TypeDesc {
                    TypeDesc::collection(CollectionKind::$kind, T::type_desc())
                }

                fn from_value(value: Value) -> Result<Self> {
                    elements::<T, Self>(value, std::any::type_name::<Self>())
                }
            }
        )*
    };
}

reflect_collection! {
    Vec<T> => List,
    VecDeque<T> => Deque,
    HashSet<T: Eq, Hash> => Set,
    BTreeSet<T: Ord> => SortedSet,
}

impl<K: Reflect + Eq + Hash, V: Reflect> Reflect for HashMap<K, V> {
    fn type_desc() -> TypeDesc {
        TypeDesc::map(MapKind::Map, K::type_desc(), V::type_desc())
    }

    fn from_value(value: Value) -> Result<Self> {
        entries::<K, V, Self>(value, std::any::type_name::<Self>())
    }
}

impl<K: Reflect + Ord, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_desc() -> TypeDesc {
        TypeDesc::map(MapKind::SortedMap, K::type_desc(), V::type_desc())
    }

    fn from_value(value: Value) -> Result<Self> {
        entries::<K, V, Self>(value, std::any::type_name::<Self>())
    }
}

macro_rules! reflect_date {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::Date(DateKind::$kind)
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Date(DateValue::$kind(inner)) => Ok(inner),
                        other => Err(mismatch::<Self>(&other)),
                    }
                }
            }
        )*
    };
}

reflect_date! {
    DateTime<Utc> => Utc,
    NaiveDateTime => NaiveDateTime,
    NaiveDate => NaiveDate,
    NaiveTime => NaiveTime,
    SystemTime => SystemTime,
}

/// Offset date-times belong to the date family but have no generator.
impl Reflect for DateTime<FixedOffset> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Date(DateKind::Other(TypeKey::of::<Self>()))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(DateValue::Utc(instant)) => Ok(instant.fixed_offset()),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

macro_rules! reflect_registered {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::opaque::<Self>()
                }

                fn from_value(value: Value) -> Result<Self> {
                    value.into_custom()
                }
            }
        )*
    };
}

reflect_registered!(url::Url, PathBuf, chrono_tz::Tz);
