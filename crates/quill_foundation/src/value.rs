//! Core value type for all template data.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::coerce::format_float;
use crate::collections::{LtMap, LtVec};
use crate::types::Type;

/// Layout used when a time is rendered with `%v`.
pub const TIME_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z %Z";

/// Core value type for all template data.
///
/// Values are cheaply cloneable (O(1) for every variant). Sequences use
/// structural sharing; mappings are shared handles, so a clone of a
/// [`Value::Map`] aliases the same storage.
#[derive(Clone)]
pub enum Value {
    /// The nil value (represents absence).
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit unsigned integer.
    Uint(u64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(Arc<str>),
    /// Raw bytes.
    Bytes(Arc<[u8]>),
    /// Persistent vector.
    Vec(LtVec<Value>),
    /// Shared string-keyed mapping.
    Map(Mapping),
    /// Zoned instant.
    Time(DateTime<Tz>),
    /// Host-supplied structured value.
    Opaque(Opaque),
}

/// A structured value supplied by the host.
///
/// Host objects are records the library cannot look inside. They are never
/// empty, and two of them are equal only when they are the same instance.
pub trait HostObject: fmt::Debug {
    /// The type name reported by `typeOf`.
    fn type_name(&self) -> &str;

    /// The message, if this object represents an error.
    fn error_message(&self) -> Option<String> {
        None
    }

    /// A custom text representation, if the object has one.
    fn text(&self) -> Option<String> {
        None
    }
}

/// Reference-counted handle to a [`HostObject`].
#[derive(Clone)]
pub struct Opaque(Rc<dyn HostObject>);

impl Opaque {
    /// Wraps a host object.
    #[must_use]
    pub fn new(object: impl HostObject + 'static) -> Self {
        Self(Rc::new(object))
    }

    /// Returns the wrapped object.
    #[must_use]
    pub fn object(&self) -> &dyn HostObject {
        self.0.as_ref()
    }

    /// Returns true if both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Renders the object as text: its error message, else its custom text,
    /// else its debug form.
    #[must_use]
    pub fn render(&self) -> String {
        self.0
            .error_message()
            .or_else(|| self.0.text())
            .unwrap_or_else(|| format!("{:?}", self.0))
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Entries of a [`Mapping`].
pub type Entries = LtMap<Arc<str>, Value>;

/// Shared, interior-mutable handle over a string-keyed map.
///
/// `set` and `unset` mutate through the handle, so every alias of the mapping
/// observes the change. Key order is unspecified.
#[derive(Clone, Default)]
pub struct Mapping(Rc<RefCell<Entries>>);

impl Mapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns true if the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Gets a copy of the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Inserts through the handle, returning the previous value.
    pub fn insert(&self, key: impl Into<Arc<str>>, value: Value) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value)
    }

    /// Removes through the handle, returning the removed value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.borrow_mut().remove(key)
    }

    /// Runs `f` with exclusive access to the entries.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Entries) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    /// Borrows the entries.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Entries> {
        self.0.borrow()
    }

    /// Returns an O(1) copy of the current entries, detached from the handle.
    #[must_use]
    pub fn snapshot(&self) -> Entries {
        self.0.borrow().clone()
    }

    /// Returns the keys, in unspecified order.
    #[must_use]
    pub fn keys(&self) -> Vec<Arc<str>> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Returns the values, in unspecified order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().values().cloned().collect()
    }

    /// Returns the entries sorted by key.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(Arc<str>, Value)> {
        let mut entries: Vec<_> = self
            .0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Returns true if both handles share storage.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl From<Entries> for Mapping {
    fn from(entries: Entries) -> Self {
        Self(Rc::new(RefCell::new(entries)))
    }
}

impl<K: Into<Arc<str>>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<Entries>()
            .into()
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.borrow())
    }
}

// ============================================================================
// Value
// ============================================================================

impl Value {
    /// Creates a string value.
    #[must_use]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Self::String(s.into())
    }

    /// Creates a bytes value.
    #[must_use]
    pub fn bytes(b: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(b.into())
    }

    /// Creates a sequence from anything convertible to values.
    #[must_use]
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Vec(items.into_iter().map(Into::into).collect())
    }

    /// Returns the type of this value.
    #[must_use]
    pub const fn value_type(&self) -> Type {
        match self {
            Self::Nil => Type::Nil,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Uint(_) => Type::Uint,
            Self::Float(_) => Type::Float,
            Self::String(_) => Type::String,
            Self::Bytes(_) => Type::Bytes,
            Self::Vec(_) => Type::Vec,
            Self::Map(_) => Type::Map,
            Self::Time(_) => Type::Time,
            Self::Opaque(_) => Type::Opaque,
        }
    }

    /// Returns the name `typeOf` reports for this value.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Nil => "<nil>".to_string(),
            Self::Bool(_) => "bool".to_string(),
            Self::Int(_) => "int64".to_string(),
            Self::Uint(_) => "uint64".to_string(),
            Self::Float(_) => "float64".to_string(),
            Self::String(_) => "string".to_string(),
            Self::Bytes(_) => "[]uint8".to_string(),
            Self::Vec(_) => "[]interface {}".to_string(),
            Self::Map(_) => "map[string]interface {}".to_string(),
            Self::Time(_) => "time.Time".to_string(),
            Self::Opaque(o) => o.object().type_name().to_string(),
        }
    }

    /// Returns the name `kindOf` reports for this value.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Nil => "invalid",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int64",
            Self::Uint(_) => "uint64",
            Self::Float(_) => "float64",
            Self::String(_) => "string",
            Self::Bytes(_) | Self::Vec(_) => "slice",
            Self::Map(_) => "map",
            Self::Time(_) => "struct",
            Self::Opaque(o) => {
                if o.object().error_message().is_some() {
                    "ptr"
                } else {
                    "struct"
                }
            }
        }
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract a signed integer; a `Uint` qualifies when in range.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Uint(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract a vector reference.
    #[must_use]
    pub const fn as_vec(&self) -> Option<&LtVec<Value>> {
        match self {
            Self::Vec(v) => Some(v),
            _ => None,
        }
    }

    /// Attempts to extract a mapping handle.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Attempts to extract a time.
    #[must_use]
    pub const fn as_time(&self) -> Option<&DateTime<Tz>> {
        match self {
            Self::Time(t) => Some(t),
            _ => None,
        }
    }
}

// Implement PartialEq manually to handle float comparison
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Vec(a), Self::Vec(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b && a.timezone() == b.timezone(),
            (Self::Opaque(a), Self::Opaque(b)) => Opaque::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}u"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "b{b:?}"),
            Self::Vec(v) => write!(f, "{v:?}"),
            Self::Map(m) => write!(f, "{m:?}"),
            Self::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Self::Opaque(o) => write!(f, "{o:?}"),
        }
    }
}

/// Renders the value the way a template prints it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "<nil>"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{}", format_float(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Bytes(b) => {
                write!(f, "[")?;
                for (i, byte) in b.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{byte}")?;
                }
                write!(f, "]")
            }
            Self::Vec(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(m) => {
                write!(f, "map[")?;
                for (i, (k, v)) in m.sorted_entries().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                write!(f, "]")
            }
            Self::Time(t) => write!(f, "{}", t.format(TIME_DISPLAY_FORMAT)),
            Self::Opaque(o) => write!(f, "{}", o.render()),
        }
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Uint(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Self::String(s)
    }
}

impl From<LtVec<Value>> for Value {
    fn from(v: LtVec<Value>) -> Self {
        Self::Vec(v)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Self::Map(m)
    }
}

impl From<DateTime<Tz>> for Value {
    fn from(t: DateTime<Tz>) -> Self {
        Self::Time(t)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Self::Opaque(o)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Vec(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Nil, Into::into)
    }
}
