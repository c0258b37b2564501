//! Field descriptors and the field configuration table.
//!
//! By default the fields of a composite are discovered from its
//! [`StructDesc`]: every declared field except identities and immutable
//! ones. A [`FieldConfig`] replaces discovery, type by type, with an explicit
//! list of fields and their maximum lengths.

use crate::data::Length;
use crate::error::{PopulateError, Result};
use crate::types::{StructDesc, TypeDesc, TypeKey};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// A field the engine populates, with its length constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    owner: TypeKey,
    name: &'static str,
    ty: TypeDesc,
    max_length: Length,
}

impl FieldDescriptor {
    pub fn owner(&self) -> TypeKey {
        self.owner
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    pub fn max_length(&self) -> Length {
        self.max_length
    }
}

/// One configured field: its name and optional maximum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub max_length: Length,
}

/// Declarative per-type field lists, keyed by fully-qualified type name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConfig {
    classes: HashMap<String, Vec<FieldEntry>>,
}

impl FieldConfig {
    pub fn new() -> Self {
        FieldConfig::default()
    }

    /// List `field` for `type_name`; `max_length` of `None` means unbounded.
    pub fn with_field(
        mut self,
        type_name: impl Into<String>,
        field: impl Into<String>,
        max_length: Option<usize>,
    ) -> Self {
        self.classes
            .entry(type_name.into())
            .or_default()
            .push(FieldEntry {
                name: field.into(),
                max_length: Length(max_length.unwrap_or(0)),
            });
        self
    }

    /// List `type_name` with no fields: nothing of it gets populated.
    pub fn with_class(mut self, type_name: impl Into<String>) -> Self {
        self.classes.entry(type_name.into()).or_default();
        self
    }

    pub fn fields_for(&self, type_name: &str) -> Option<&[FieldEntry]> {
        self.classes.get(type_name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Read a field configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|err| {
            PopulateError::invalid_config_with(format!("cannot read {}", path.display()), err)
        })?;
        FieldConfig::from_xml(&document)
    }

    /// Parse a field configuration document.
    ///
    /// ```xml
    /// <test-data>
    ///   <class name="fixtures::Person">
    ///     <field name="name" length="20"/>
    ///     <field name="surname"/>
    ///   </class>
    /// </test-data>
    /// ```
    pub fn from_xml(document: &str) -> Result<Self> {
        let mut reader = Reader::from_str(document);
        let mut config = FieldConfig::new();
        let mut current: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"class" => {
                    let name = required_attr(e, "name")?;
                    config.classes.entry(name.clone()).or_default();
                    current = Some(name);
                }
                Ok(Event::Empty(ref e)) if e.name().as_ref() == b"class" => {
                    let name = required_attr(e, "name")?;
                    config.classes.entry(name).or_default();
                }
                Ok(Event::End(ref e)) if e.name().as_ref() == b"class" => {
                    current = None;
                }
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if e.name().as_ref() == b"field" =>
                {
                    let Some(class) = current.as_ref() else {
                        return Err(PopulateError::invalid_config(
                            "<field> must appear inside a <class> element",
                        ));
                    };
                    let name = required_attr(e, "name")?;
                    let max_length = match optional_attr(e, "length")? {
                        Some(text) if !text.is_empty() => {
                            let length = text.trim().parse::<usize>().map_err(|err| {
                                PopulateError::invalid_config_with(
                                    format!("field {class}.{name} has invalid length `{text}`"),
                                    err,
                                )
                            })?;
                            Length(length)
                        }
                        _ => Length::DEFAULT,
                    };
                    if let Some(fields) = config.classes.get_mut(class) {
                        fields.push(FieldEntry { name, max_length });
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    return Err(PopulateError::invalid_config_with(
                        format!("malformed document at byte {}", reader.buffer_position()),
                        err,
                    ))
                }
            }
        }

        tracing::debug!(classes = config.len(), "parsed field configuration");
        Ok(config)
    }
}

fn optional_attr(element: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|err| {
            PopulateError::invalid_config_with("malformed attribute", err)
        })?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr.unescape_value().map_err(|err| {
                PopulateError::invalid_config_with(format!("malformed `{key}` attribute"), err)
            })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required_attr(element: &BytesStart<'_>, key: &str) -> Result<String> {
    let tag = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    match optional_attr(element, key)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(PopulateError::invalid_config(format!(
            "<{tag}> requires a `{key}` attribute"
        ))),
    }
}

/// Resolved field descriptors, cached per composite type.
#[derive(Debug, Default)]
pub struct FieldTable {
    config: FieldConfig,
    cache: HashMap<TypeKey, Rc<[FieldDescriptor]>>,
}

impl FieldTable {
    pub fn new(config: FieldConfig) -> Self {
        FieldTable {
            config,
            cache: HashMap::new(),
        }
    }

    /// The fields to populate for `desc`, resolved once and then cached.
    pub fn resolve(&mut self, desc: &StructDesc) -> Result<Rc<[FieldDescriptor]>> {
        let key = desc.key();
        if let Some(fields) = self.cache.get(&key) {
            return Ok(Rc::clone(fields));
        }

        let fields: Rc<[FieldDescriptor]> = match self.config.fields_for(key.name()) {
            Some(entries) => configured(desc, entries)?.into(),
            None => discovered(desc).into(),
        };
        tracing::debug!(
            type_name = key.name(),
            fields = fields.len(),
            "resolved field descriptors"
        );
        self.cache.insert(key, Rc::clone(&fields));
        Ok(fields)
    }
}

fn discovered(desc: &StructDesc) -> Vec<FieldDescriptor> {
    desc.fields()
        .into_iter()
        .filter(|field| !field.is_identity() && !field.is_immutable())
        .map(|field| FieldDescriptor {
            owner: desc.key(),
            name: field.name(),
            max_length: field.default_length(),
            ty: field.ty().clone(),
        })
        .collect()
}

fn configured(desc: &StructDesc, entries: &[FieldEntry]) -> Result<Vec<FieldDescriptor>> {
    let declared = desc.fields();
    entries
        .iter()
        .map(|entry| {
            let field = declared
                .iter()
                .find(|field| field.name() == entry.name)
                .ok_or_else(|| {
                    PopulateError::invalid_config(format!(
                        "type {} has no field `{}`",
                        desc.key(),
                        entry.name
                    ))
                })?;
            Ok(FieldDescriptor {
                owner: desc.key(),
                name: field.name(),
                ty: field.ty().clone(),
                max_length: entry.max_length,
            })
        })
        .collect()
}
