//! Named field access for queryable objects.
//!
//! This module provides the [`Queryable`] trait, implemented by the
//! `#[derive(Queryable)]` macro, and [`AsValue`], which converts field types
//! into [`Value`]s.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::value::Value;

/// Trait for objects whose attributes can be looked up by name.
///
/// This trait is typically derived using `#[derive(Queryable)]`, but can
/// also be implemented manually.
///
/// # Derive Usage
///
/// ```ignore
/// use doid::Queryable;
///
/// #[derive(Queryable)]
/// struct Person {
///     name: String,
///     #[query(nested)]
///     address: Address,
///     #[query(skip)]
///     password_hash: String,
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use doid::{Queryable, Value};
///
/// struct Task {
///     name: String,
///     priority: u8,
/// }
///
/// impl Queryable for Task {
///     fn field(&self, name: &str) -> Option<Value<'_>> {
///         match name {
///             "name" => Some(Value::from(self.name.as_str())),
///             "priority" => Some(Value::from(self.priority)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Queryable {
    /// Returns the value of the named attribute.
    ///
    /// `None` means the object has no such attribute, which makes path
    /// resolution fail. An attribute that exists but holds nothing should
    /// return `Some(Value::None)`.
    fn field(&self, name: &str) -> Option<Value<'_>>;
}

impl<T: Queryable + ?Sized> Queryable for &T {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        (**self).field(name)
    }
}

impl<T: Queryable + ?Sized> Queryable for Box<T> {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        (**self).field(name)
    }
}

impl<T: Queryable + ?Sized> Queryable for Rc<T> {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        (**self).field(name)
    }
}

impl<T: Queryable + ?Sized> Queryable for Arc<T> {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        (**self).field(name)
    }
}

// Property maps: keys are attribute names.
impl<V: AsValue> Queryable for HashMap<String, V> {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(AsValue::as_value)
    }
}

impl<V: AsValue> Queryable for BTreeMap<String, V> {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(AsValue::as_value)
    }
}

/// Conversion of a field's type into a [`Value`].
///
/// Used by the derive macro for every exposed field. Implement it for your
/// own types to make them usable as plain (non-nested) fields.
///
/// # Example
///
/// ```
/// use doid::{AsValue, Value};
///
/// enum Status {
///     Pending,
///     Done,
/// }
///
/// impl AsValue for Status {
///     fn as_value(&self) -> Value<'_> {
///         match self {
///             Status::Pending => Value::from("pending"),
///             Status::Done => Value::from("done"),
///         }
///     }
/// }
/// ```
pub trait AsValue {
    /// Returns this field as a value.
    fn as_value(&self) -> Value<'_>;
}

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl<T: AsValue + ?Sized> AsValue for Box<T> {
    fn as_value(&self) -> Value<'_> {
        (**self).as_value()
    }
}

impl AsValue for str {
    fn as_value(&self) -> Value<'_> {
        Value::from(self)
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value<'_> {
        Value::from(self.as_str())
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl AsValue for NaiveDate {
    fn as_value(&self) -> Value<'_> {
        Value::Date(*self)
    }
}

impl AsValue for NaiveDateTime {
    fn as_value(&self) -> Value<'_> {
        Value::DateTime(*self)
    }
}

impl AsValue for Value<'_> {
    fn as_value(&self) -> Value<'_> {
        self.clone()
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::None, AsValue::as_value)
    }
}

impl<T: AsValue> AsValue for [T] {
    fn as_value(&self) -> Value<'_> {
        Value::List(self.iter().map(AsValue::as_value).collect())
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_value(&self) -> Value<'_> {
        self.as_slice().as_value()
    }
}

macro_rules! impl_as_value_number {
    ($($ty:ty),*) => {
        $(
            impl AsValue for $ty {
                fn as_value(&self) -> Value<'_> {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_as_value_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
