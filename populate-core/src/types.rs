//! Type descriptors: the structural metadata the engine dispatches on.
//!
//! A [`TypeDesc`] is built once per request from [`crate::Reflect::type_desc`]
//! (or by hand for dynamic requests). Struct and interface descriptors hold
//! a function pointer to their member list instead of the members
//! themselves, so self-referential types describe themselves without
//! recursing.

use crate::data::Length;
use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a Rust type: its `TypeId` plus its fully-qualified name.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeKey {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Numbers, booleans, characters and strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    String,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Char => "char",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::I128 => "i128",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::U128 => "u128",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::String => "String",
        }
    }
}

/// A fieldless enumeration and its declared constants, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDesc {
    key: TypeKey,
    constants: &'static [&'static str],
}

impl EnumDesc {
    pub fn new<T: 'static>(constants: &'static [&'static str]) -> Self {
        EnumDesc {
            key: TypeKey::of::<T>(),
            constants,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn constants(&self) -> &'static [&'static str] {
        self.constants
    }
}

/// Members of the calendar date family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    /// `chrono::DateTime<Utc>`
    Utc,
    /// `chrono::NaiveDateTime`
    NaiveDateTime,
    /// `chrono::NaiveDate`
    NaiveDate,
    /// `chrono::NaiveTime`
    NaiveTime,
    /// `std::time::SystemTime`
    SystemTime,
    /// Any other date-like type; no generator exists for these.
    Other(TypeKey),
}

impl DateKind {
    pub fn name(&self) -> &'static str {
        match self {
            DateKind::Utc => "chrono::DateTime<chrono::Utc>",
            DateKind::NaiveDateTime => "chrono::NaiveDateTime",
            DateKind::NaiveDate => "chrono::NaiveDate",
            DateKind::NaiveTime => "chrono::NaiveTime",
            DateKind::SystemTime => "std::time::SystemTime",
            DateKind::Other(key) => key.name(),
        }
    }
}

/// Abstract single-element containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Any sequence.
    Collection,
    /// Ordered, indexable list.
    List,
    /// Double-ended queue.
    Deque,
    /// Unordered set.
    Set,
    /// Ordered set.
    SortedSet,
}

/// Concrete containers a collection is materialized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Vec,
    VecDeque,
    HashSet,
    BTreeSet,
}

impl CollectionKind {
    /// The default implementation for this kind of collection.
    pub fn implementation(self) -> Container {
        match self {
            CollectionKind::Collection => Container::VecDeque,
            CollectionKind::List => Container::Vec,
            CollectionKind::Deque => Container::VecDeque,
            CollectionKind::Set => Container::HashSet,
            CollectionKind::SortedSet => Container::BTreeSet,
        }
    }
}

impl Container {
    /// Sets drop elements equal to one already present.
    pub fn is_set(self) -> bool {
        matches!(self, Container::HashSet | Container::BTreeSet)
    }
}

/// Abstract key/value associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKind {
    Map,
    SortedMap,
}

/// Concrete maps an association is materialized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapContainer {
    HashMap,
    BTreeMap,
}

impl MapKind {
    /// The default implementation for this kind of map.
    pub fn implementation(self) -> MapContainer {
        match self {
            MapKind::Map => MapContainer::HashMap,
            MapKind::SortedMap => MapContainer::BTreeMap,
        }
    }
}

/// One declared field of a struct, as the struct definition describes it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    name: &'static str,
    ty: TypeDesc,
    max_length: Length,
    identity: bool,
    immutable: bool,
}

impl FieldDef {
    pub fn new(name: &'static str, ty: TypeDesc) -> Self {
        FieldDef {
            name,
            ty,
            max_length: Length::DEFAULT,
            identity: false,
            immutable: false,
        }
    }

    /// Default max length for this field when discovered.
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Length(length);
        self
    }

    /// Mark the field as a primary-key-like identity.
    pub fn identity(mut self) -> Self {
        self.identity = true;
        self
    }

    /// Mark the field as never assigned by population.
    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    pub fn default_length(&self) -> Length {
        self.max_length
    }

    /// Fields named `id` are identities by convention.
    pub fn is_identity(&self) -> bool {
        self.identity || self.name == "id"
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }
}

/// A struct-like composite type.
#[derive(Clone, Copy)]
pub struct StructDesc {
    key: TypeKey,
    fields: fn() -> Vec<FieldDef>,
}

impl StructDesc {
    pub fn new<T: 'static>(fields: fn() -> Vec<FieldDef>) -> Self {
        StructDesc {
            key: TypeKey::of::<T>(),
            fields,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Every declared field, including the ones population skips.
    pub fn fields(&self) -> Vec<FieldDef> {
        (self.fields)()
    }
}

impl PartialEq for StructDesc {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl fmt::Debug for StructDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructDesc").field(&self.key.name).finish()
    }
}

/// One accessor of an interface.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDef {
    name: &'static str,
    returns: TypeDesc,
}

impl MethodDef {
    pub fn new(name: &'static str, returns: TypeDesc) -> Self {
        MethodDef { name, returns }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn returns(&self) -> &TypeDesc {
        &self.returns
    }
}

/// An interface (trait) whose accessors a stub answers.
#[derive(Clone, Copy)]
pub struct InterfaceDesc {
    key: TypeKey,
    name: &'static str,
    methods: fn() -> Vec<MethodDef>,
}

impl InterfaceDesc {
    /// `T` is the type that stands in for the interface, usually its stub.
    pub fn new<T: 'static>(name: &'static str, methods: fn() -> Vec<MethodDef>) -> Self {
        InterfaceDesc {
            key: TypeKey::of::<T>(),
            name,
            methods,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Fully-qualified interface name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn methods(&self) -> Vec<MethodDef> {
        (self.methods)()
    }

    pub fn method(&self, name: &str) -> Option<MethodDef> {
        self.methods().into_iter().find(|method| method.name == name)
    }
}

impl PartialEq for InterfaceDesc {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl fmt::Debug for InterfaceDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InterfaceDesc").field(&self.name).finish()
    }
}

/// Descriptor of a generation target.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
    Scalar(ScalarKind),
    Enum(EnumDesc),
    Date(DateKind),
    /// Variable-length array of the element type.
    Array(Box<TypeDesc>),
    /// Raw collection plus its type arguments; exactly one is expected.
    Collection {
        kind: CollectionKind,
        args: Vec<TypeDesc>,
    },
    /// Raw map plus its type arguments; key and value are expected.
    Map { kind: MapKind, args: Vec<TypeDesc> },
    Struct(StructDesc),
    Interface(InterfaceDesc),
    /// A type known only by identity; only the generator registry can build it.
    Opaque(TypeKey),
}

impl TypeDesc {
    pub fn array(element: TypeDesc) -> Self {
        TypeDesc::Array(Box::new(element))
    }

    pub fn collection(kind: CollectionKind, element: TypeDesc) -> Self {
        TypeDesc::Collection {
            kind,
            args: vec![element],
        }
    }

    /// A collection with no element type.
    pub fn raw_collection(kind: CollectionKind) -> Self {
        TypeDesc::Collection {
            kind,
            args: Vec::new(),
        }
    }

    pub fn map(kind: MapKind, key: TypeDesc, value: TypeDesc) -> Self {
        TypeDesc::Map {
            kind,
            args: vec![key, value],
        }
    }

    /// A map with no key or value types.
    pub fn raw_map(kind: MapKind) -> Self {
        TypeDesc::Map {
            kind,
            args: Vec::new(),
        }
    }

    pub fn opaque<T: ?Sized + 'static>() -> Self {
        TypeDesc::Opaque(TypeKey::of::<T>())
    }

    /// Identity used for generator registry lookups.
    pub fn key(&self) -> Option<TypeKey> {
        match self {
            TypeDesc::Struct(desc) => Some(desc.key()),
            TypeDesc::Opaque(key) => Some(*key),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Scalar(kind) => f.write_str(kind.name()),
            TypeDesc::Enum(desc) => f.write_str(desc.key().name()),
            TypeDesc::Date(kind) => f.write_str(kind.name()),
            TypeDesc::Array(element) => write!(f, "[{element}]"),
            TypeDesc::Collection { kind, args } => write_generic(f, &format!("{kind:?}"), args),
            TypeDesc::Map { kind, args } => write_generic(f, &format!("{kind:?}"), args),
            TypeDesc::Struct(desc) => f.write_str(desc.key().name()),
            TypeDesc::Interface(desc) => f.write_str(desc.name()),
            TypeDesc::Opaque(key) => f.write_str(key.name()),
        }
    }
}

fn write_generic(f: &mut fmt::Formatter<'_>, raw: &str, args: &[TypeDesc]) -> fmt::Result {
    f.write_str(raw)?;
    if args.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    f.write_str(">")
}
