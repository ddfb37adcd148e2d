//! Runtime value types for field comparison.
//!
//! The [`Value`] enum represents the runtime value of an attribute extracted
//! from an object. Clause operands are plain `Value<'static>`s, so objects
//! and operands share one comparison model.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{QueryError, Result};
use crate::traits::Queryable;

/// Runtime value for comparison, usually borrowed from the source object.
///
/// # Example
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
#[derive(Clone)]
pub enum Value<'a> {
    /// Attribute present but null.
    None,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value, borrowed from the object or owned when computed.
    String(Cow<'a, str>),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time without timezone.
    DateTime(NaiveDateTime),
    /// Ordered sequence of values.
    List(Vec<Value<'a>>),
    /// Nested object whose attributes can be looked up further.
    Object(&'a dyn Queryable),
}

impl<'a> Value<'a> {
    /// Returns the name of this value's kind, as used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the date value, if present.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Extracts the list items, if present.
    pub fn as_list(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a named attribute on this value.
    ///
    /// Objects delegate to [`Queryable::field`]. Dates expose `year`,
    /// `month`, `day`, `weekday` (Monday = 0) and `ordinal`; datetimes add
    /// `hour`, `minute`, `second` and `date`. Every other kind has no
    /// attributes.
    pub fn field(&self, name: &str) -> Option<Value<'a>> {
        match self {
            Value::Object(obj) => Queryable::field(*obj, name),
            Value::Date(d) => date_field(d, name),
            Value::DateTime(dt) => match name {
                "hour" => Some(Value::from(dt.hour())),
                "minute" => Some(Value::from(dt.minute())),
                "second" => Some(Value::from(dt.second())),
                "date" => Some(Value::Date(dt.date())),
                _ => date_field(&dt.date(), name),
            },
            _ => None,
        }
    }

    /// Orders two values for the operator `op`.
    ///
    /// `Ok(None)` means the values are of comparable kinds but unordered (NaN).
    pub(crate) fn ordering(&self, other: &Value<'_>, op: &'static str) -> Result<Option<Ordering>> {
        let ordering = match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.compare(*b),
            (Value::String(a), Value::String(b)) => Some(a.as_ref().cmp(b.as_ref())),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.ordering(y, op)? {
                        Some(Ordering::Equal) => continue,
                        other => return Ok(other),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            _ => {
                return Err(QueryError::TypeMismatch {
                    op,
                    left: self.kind_name(),
                    right: other.kind_name(),
                })
            }
        };
        Ok(ordering)
    }

    /// Tests whether `needle` is contained in this value.
    ///
    /// Strings contain substrings; lists contain elements (by equality).
    pub fn contains(&self, needle: &Value<'_>) -> Result<bool> {
        match (self, needle) {
            (Value::String(haystack), Value::String(needle)) => {
                Ok(haystack.contains(needle.as_ref()))
            }
            (Value::List(items), needle) => Ok(items.iter().any(|item| item == needle)),
            _ => Err(QueryError::TypeMismatch {
                op: "in",
                left: self.kind_name(),
                right: needle.kind_name(),
            }),
        }
    }
}

fn date_field<'a>(date: &NaiveDate, name: &str) -> Option<Value<'a>> {
    match name {
        "year" => Some(Value::from(date.year())),
        "month" => Some(Value::from(date.month())),
        "day" => Some(Value::from(date.day())),
        "weekday" => Some(Value::from(date.weekday().num_days_from_monday())),
        "ordinal" => Some(Value::from(date.ordinal())),
        _ => None,
    }
}

/// Compares two values.
///
/// Returns `None` if the kinds are not comparable or the comparison is
/// undefined (NaN).
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Option<Ordering> {
    a.ordering(b, "compare").ok().flatten()
}

impl<'a, 'b> PartialEq<Value<'b>> for Value<'a> {
    fn eq(&self, other: &Value<'b>) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.compare(*b) == Some(Ordering::Equal),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::eq(*a as *const _ as *const u8, *b as *const _ as *const u8)
            }
            // Different kinds are never equal
            _ => false,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Value::DateTime(dt) => f.debug_tuple("DateTime").field(dt).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Object(obj) => write!(f, "Object({:p})", *obj),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(_) => f.write_str("<object>"),
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision.
/// Comparisons between different variants are exact between the integer
/// variants and go through `f64` when a float is involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(match u64::try_from(a) {
                Ok(a) => a.cmp(&b),
                Err(_) => Ordering::Less,
            }),
            (Number::U64(a), Number::I64(b)) => Some(match u64::try_from(b) {
                Ok(b) => a.cmp(&b),
                Err(_) => Ordering::Greater,
            }),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

macro_rules! impl_number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }

            impl From<$source> for Value<'_> {
                fn from(n: $source) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_number_from!(I64 as i64: i8, i16, i32, i64, isize);
impl_number_from!(U64 as u64: u8, u16, u32, u64, usize);
impl_number_from!(F64 as f64: f32, f64);

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl From<NaiveDate> for Value<'_> {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value<'_> {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl<'a, V: Into<Value<'a>>> From<Option<V>> for Value<'a> {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

impl<'a, V: Into<Value<'a>>> From<Vec<V>> for Value<'a> {
    fn from(items: Vec<V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<'a, V: Into<Value<'a>>, const N: usize> From<[V; N]> for Value<'a> {
    fn from(items: [V; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<'a, A: Into<Value<'a>>, B: Into<Value<'a>>> From<(A, B)> for Value<'a> {
    fn from((low, high): (A, B)) -> Self {
        Value::List(vec![low.into(), high.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn value_kind_names() {
        assert_eq!(Value::from("x").kind_name(), "string");
        assert_eq!(Value::from(1).kind_name(), "number");
        assert_eq!(Value::from(true).kind_name(), "bool");
        assert_eq!(Value::from(date(2000, 1, 1)).kind_name(), "date");
        assert_eq!(Value::from(vec![1, 2]).kind_name(), "list");
        assert_eq!(Value::None.kind_name(), "none");
    }

    #[test]
    fn value_extractors() {
        assert_eq!(Value::from("hello").as_str(), Some("hello"));
        assert_eq!(Value::from(42i64).as_number(), Some(Number::I64(42)));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(date(1999, 2, 3)).as_date(), Some(date(1999, 2, 3)));

        // Wrong kind returns None
        assert_eq!(Value::from("test").as_number(), None);
        assert_eq!(Value::from(1).as_str(), None);
    }

    #[test]
    fn date_attributes() {
        let born = Value::from(date(1939, 6, 19));
        assert_eq!(born.field("year"), Some(Value::from(1939)));
        assert_eq!(born.field("month"), Some(Value::from(6)));
        assert_eq!(born.field("day"), Some(Value::from(19)));
        // 1939-06-19 was a Monday
        assert_eq!(born.field("weekday"), Some(Value::from(0)));
        assert!(born.field("hour").is_none());
    }

    #[test]
    fn datetime_attributes() {
        let at = Value::from(date(2024, 1, 29).and_hms_opt(13, 45, 7).unwrap());
        assert_eq!(at.field("hour"), Some(Value::from(13)));
        assert_eq!(at.field("second"), Some(Value::from(7)));
        assert_eq!(at.field("year"), Some(Value::from(2024)));
        assert_eq!(at.field("date"), Some(Value::from(date(2024, 1, 29))));
    }

    #[test]
    fn scalars_have_no_attributes() {
        assert!(Value::from("abc").field("len").is_none());
        assert!(Value::from(3).field("denominator").is_none());
        assert!(Value::None.field("x").is_none());
    }

    #[test]
    fn loose_equality() {
        assert_eq!(Value::from(1i64), Value::from(1.0f64));
        assert_eq!(Value::from(1u8), Value::from(1i32));
        assert_eq!(Value::None, Value::None);
        assert_ne!(Value::from("1"), Value::from(1));
        assert_ne!(Value::from(true), Value::from(1));
        assert_eq!(Value::from(vec![1, 2]), Value::from([1u8, 2]));
        assert_ne!(Value::from(vec![1, 2]), Value::from(vec![1, 2, 3]));
    }

    #[test]
    fn ordering_same_kind() {
        assert_eq!(
            compare_values(&Value::from("apple"), &Value::from("banana")),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_values(&Value::from(date(2000, 1, 2)), &Value::from(date(2000, 1, 1))),
            Some(Ordering::Greater)
        );
        assert_eq!(
            compare_values(&Value::from(false), &Value::from(true)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn booleans_are_not_numbers() {
        assert_ne!(Value::from(true), Value::from(1));
        assert_ne!(Value::from(false), Value::from(0.0));
        assert!(matches!(
            Value::from(true).ordering(&Value::from(0), "gt"),
            Err(QueryError::TypeMismatch { left: "bool", .. })
        ));
    }

    #[test]
    fn ordering_lists_lexicographic() {
        let a = Value::from(vec![Value::from("x"), Value::from(1)]);
        let b = Value::from(vec![Value::from("x"), Value::from(2)]);
        assert_eq!(compare_values(&a, &b), Some(Ordering::Less));

        let short = Value::from(vec![1]);
        let long = Value::from(vec![1, 0]);
        assert_eq!(compare_values(&short, &long), Some(Ordering::Less));
    }

    #[test]
    fn ordering_type_mismatch_is_an_error() {
        let err = Value::from("x").ordering(&Value::from(1), "gt").unwrap_err();
        assert!(matches!(
            err,
            QueryError::TypeMismatch {
                op: "gt",
                left: "string",
                right: "number"
            }
        ));
        assert_eq!(compare_values(&Value::None, &Value::None), None);
    }

    #[test]
    fn ordering_nan_is_unordered() {
        let nan = Value::from(f64::NAN);
        assert_eq!(nan.ordering(&Value::from(1.0), "lt").unwrap(), None);
    }

    #[test]
    fn containment() {
        assert!(Value::from("Pattonstad").contains(&Value::from("ton")).unwrap());
        assert!(!Value::from("Pattonstad").contains(&Value::from("x")).unwrap());
        assert!(Value::from(vec![1, 2, 3]).contains(&Value::from(2.0)).unwrap());
        assert!(!Value::from(vec![1, 2, 3]).contains(&Value::from(4)).unwrap());
        assert!(Value::from(5).contains(&Value::from(5)).is_err());
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(Number::I64(5).compare(Number::U64(10)), Some(Ordering::Less));
        assert_eq!(Number::I64(-1).compare(Number::U64(0)), Some(Ordering::Less));
        assert_eq!(Number::U64(u64::MAX).compare(Number::I64(i64::MAX)), Some(Ordering::Greater));
        assert_eq!(Number::I64(5).compare(Number::F64(5.0)), Some(Ordering::Equal));
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_conversions() {
        assert_eq!(Number::from(42i32), Number::I64(42));
        assert_eq!(Number::from(42u32), Number::U64(42));
        assert_eq!(Number::from(42.5f64), Number::F64(42.5));
    }

    #[test]
    fn operand_conversions() {
        assert_eq!(Value::from((1960, 1980)), Value::from(vec![1960, 1980]));
        assert_eq!(Value::from(None::<i32>), Value::None);
        assert_eq!(Value::from(Some("AM")), Value::from("AM"));
        assert!(matches!(Value::from(String::from("x")), Value::String(Cow::Owned(_))));
    }

    #[test]
    fn display() {
        assert_eq!(Value::from("AM").to_string(), "\"AM\"");
        assert_eq!(Value::from([1960, 1980]).to_string(), "[1960, 1980]");
        assert_eq!(Value::from(date(2000, 1, 1)).to_string(), "2000-01-01");
    }
}
