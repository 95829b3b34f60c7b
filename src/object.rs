//! PDF object types.
//!
//! Value nodes of the generated object graph. Addressable nodes live in the
//! [`Compositor`](crate::writer::Compositor) arena as [`IndirectObject`]s and
//! are only ever embedded elsewhere through an [`ObjectRef`].

use crate::error::{Error, Result};
use crate::writer::ContentStreamBuilder;
use indexmap::IndexMap;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// Literal string
    String(String),
    /// Name (written with a leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (ordered key-value pairs)
    Dictionary(Dictionary),
    /// Stream (dictionary + content payload)
    Stream(StreamObject),
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
///
/// Equality is structural: two references name the same node when both the
/// object number and the generation match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Create a Name object.
    pub fn name(s: impl Into<String>) -> Self {
        Object::Name(s.into())
    }

    /// Create a String object.
    pub fn string(s: impl Into<String>) -> Self {
        Object::String(s.into())
    }

    /// Get the type name of this object (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream(_) => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Visit every indirect reference reachable from this value without
    /// following references.
    pub fn for_each_reference(&self, f: &mut impl FnMut(ObjectRef)) {
        match self {
            Object::Reference(r) => f(*r),
            Object::Array(items) => items.iter().for_each(|item| item.for_each_reference(f)),
            Object::Dictionary(dict) => dict.values().for_each(|v| v.for_each_reference(f)),
            Object::Stream(stream) => stream.dict.values().for_each(|v| v.for_each_reference(f)),
            Object::Integer(_) | Object::Real(_) | Object::String(_) | Object::Name(_) => {},
        }
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Integer(value)
    }
}

impl From<f64> for Object {
    fn from(value: f64) -> Self {
        Object::Real(value)
    }
}

impl From<f32> for Object {
    fn from(value: f32) -> Self {
        Object::Real(value as f64)
    }
}

impl From<Vec<Object>> for Object {
    fn from(items: Vec<Object>) -> Self {
        Object::Array(items)
    }
}

impl From<Dictionary> for Object {
    fn from(dict: Dictionary) -> Self {
        Object::Dictionary(dict)
    }
}

impl From<StreamObject> for Object {
    fn from(stream: StreamObject) -> Self {
        Object::Stream(stream)
    }
}

/// Passing an addressable handle where a value is expected always yields a
/// reference to it, never a second copy of the node.
impl From<ObjectRef> for Object {
    fn from(reference: ObjectRef) -> Self {
        Object::Reference(reference)
    }
}

/// Typed extraction of a value from an [`Object`].
pub trait FromObject<'a>: Sized {
    /// Returns `None` when the object is of a different variant.
    fn from_object(object: &'a Object) -> Option<Self>;
}

impl<'a> FromObject<'a> for &'a Object {
    fn from_object(object: &'a Object) -> Option<Self> {
        Some(object)
    }
}

impl<'a> FromObject<'a> for i64 {
    fn from_object(object: &'a Object) -> Option<Self> {
        match object {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl<'a> FromObject<'a> for f64 {
    fn from_object(object: &'a Object) -> Option<Self> {
        match object {
            Object::Real(r) => Some(*r),
            Object::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl<'a> FromObject<'a> for &'a str {
    fn from_object(object: &'a Object) -> Option<Self> {
        match object {
            Object::Name(s) | Object::String(s) => Some(s),
            _ => None,
        }
    }
}

impl<'a> FromObject<'a> for ObjectRef {
    fn from_object(object: &'a Object) -> Option<Self> {
        object.as_reference()
    }
}

impl<'a> FromObject<'a> for &'a [Object] {
    fn from_object(object: &'a Object) -> Option<Self> {
        match object {
            Object::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl<'a> FromObject<'a> for &'a Dictionary {
    fn from_object(object: &'a Object) -> Option<Self> {
        match object {
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}

impl<'a> FromObject<'a> for &'a StreamObject {
    fn from_object(object: &'a Object) -> Option<Self> {
        match object {
            Object::Stream(s) => Some(s),
            _ => None,
        }
    }
}

/// Dictionary with unique keys, written in insertion order.
///
/// Keys are append-only: setting a key that is already present is an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<String, Object>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary whose first entry is `/Type /<type_name>`.
    pub fn typed(type_name: &str) -> Self {
        Self::new().with_entry("Type", Object::name(type_name))
    }

    /// Insert a new entry.
    ///
    /// Addressable handles ([`ObjectRef`]) are stored as references.
    pub fn set(&mut self, key: &str, value: impl Into<Object>) -> Result<&mut Self> {
        if self.entries.contains_key(key) {
            return Err(Error::DuplicateKey(key.to_string()));
        }
        self.entries.insert(key.to_string(), value.into());
        Ok(self)
    }

    /// Builder-style insert for constructors whose key sets are fixed and
    /// distinct.
    pub(crate) fn with_entry(mut self, key: &str, value: impl Into<Object>) -> Self {
        debug_assert!(!self.entries.contains_key(key), "duplicate key /{}", key);
        self.entries.entry(key.to_string()).or_insert(value.into());
        self
    }

    /// Typed lookup. Missing keys and variant mismatches both yield `None`.
    pub fn get<'a, T: FromObject<'a>>(&'a self, key: &str) -> Option<T> {
        self.entries.get(key).and_then(T::from_object)
    }

    /// Mutable access to an existing value.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Object> {
        self.entries.get_mut(key)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Object)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Object> {
        self.entries.values()
    }
}

/// Stream object: a dictionary plus a content payload.
///
/// The dictionary carries a `/Length` entry that references a separate
/// Integer node; the writer fills that node in once the payload is measured.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamObject {
    /// Stream dictionary
    pub dict: Dictionary,
    /// Payload
    pub content: ContentStreamBuilder,
}

impl StreamObject {
    /// Create a stream whose length lives in the node named by `length`.
    pub fn new(length: ObjectRef, content: ContentStreamBuilder) -> Self {
        Self {
            dict: Dictionary::new().with_entry("Length", length),
            content,
        }
    }

    /// The Integer node that receives the measured payload length.
    pub fn length_ref(&self) -> Option<ObjectRef> {
        self.dict.get::<ObjectRef>("Length")
    }
}

/// An addressable node: a value paired with its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectObject {
    /// Identity of this node
    pub reference: ObjectRef,
    /// The wrapped value
    pub value: Object,
}
