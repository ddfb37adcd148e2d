//! Sort keys.
//!
//! A [`KeySpec`] is either an attribute path or a closure. A list of them
//! becomes a [`KeyExtractor`], which maps an object to its composite key.

use std::fmt;

use crate::error::Result;
use crate::path::AttrPath;
use crate::traits::Queryable;
use crate::value::Value;

type KeyFn<T> = Box<dyn for<'a> Fn(&'a T) -> Value<'a>>;

/// One component of a composite sort key.
pub enum KeySpec<T> {
    /// Attribute path such as `"born__year"`, parsed when the extractor is built.
    Path(String),
    /// Closure computing the key from the object.
    Func(KeyFn<T>),
}

impl<T> KeySpec<T> {
    /// Key from an attribute path.
    pub fn path(path: impl Into<String>) -> Self {
        KeySpec::Path(path.into())
    }

    /// Key computed by a closure.
    ///
    /// ```
    /// use doid::{KeySpec, Value};
    ///
    /// struct Person { name: String }
    ///
    /// let by_length = KeySpec::func(|p: &Person| Value::from(p.name.len()));
    /// # let _ = by_length;
    /// ```
    pub fn func<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Value<'a> + 'static,
    {
        KeySpec::Func(Box::new(f))
    }
}

impl<T> From<&str> for KeySpec<T> {
    fn from(path: &str) -> Self {
        KeySpec::Path(path.to_string())
    }
}

impl<T> From<String> for KeySpec<T> {
    fn from(path: String) -> Self {
        KeySpec::Path(path)
    }
}

impl<T> fmt::Debug for KeySpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySpec::Path(path) => f.debug_tuple("Path").field(path).finish(),
            KeySpec::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Builder for a list of key specs, in priority order.
///
/// ```
/// use doid::{K, Value};
///
/// struct Person { city: String, name: String }
///
/// let keys = K::new()
///     .path("city")
///     .func(|p: &Person| Value::from(p.name.to_lowercase()));
/// assert_eq!(keys.len(), 2);
/// ```
pub struct K<T> {
    specs: Vec<KeySpec<T>>,
}

impl<T> K<T> {
    /// Creates an empty key list.
    pub fn new() -> Self {
        K { specs: Vec::new() }
    }

    /// Appends an attribute path key.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.specs.push(KeySpec::path(path));
        self
    }

    /// Appends a closure key.
    pub fn func<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Value<'a> + 'static,
    {
        self.specs.push(KeySpec::func(f));
        self
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns `true` if no keys have been added.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<T> Default for K<T> {
    fn default() -> Self {
        K::new()
    }
}

impl<T> IntoIterator for K<T> {
    type Item = KeySpec<T>;
    type IntoIter = std::vec::IntoIter<KeySpec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.into_iter()
    }
}

enum Key<T> {
    Path(AttrPath),
    Func(KeyFn<T>),
}

/// Maps an object to its composite sort key.
pub struct KeyExtractor<T> {
    keys: Vec<Key<T>>,
}

impl<T> KeyExtractor<T> {
    /// Builds an extractor, parsing every path spec.
    pub fn new<I, S>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<KeySpec<T>>,
    {
        let keys = specs
            .into_iter()
            .map(|spec| match spec.into() {
                KeySpec::Path(path) => AttrPath::parse(&path).map(Key::Path),
                KeySpec::Func(f) => Ok(Key::Func(f)),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(KeyExtractor { keys })
    }

    /// Returns the number of key components.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the extractor has no key components.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<T: Queryable> KeyExtractor<T> {
    /// Computes the composite key of an object, in spec order.
    pub fn extract<'a>(&self, item: &'a T) -> Result<Vec<Value<'a>>> {
        self.keys
            .iter()
            .map(|key| match key {
                Key::Path(path) => path.resolve(item),
                Key::Func(f) => Ok(f(item)),
            })
            .collect()
    }
}
