//! `serde_json` support.
//!
//! A JSON object is queryable by key. Nested objects resolve as
//! [`Value::Object`], so paths like `address__city` walk into them; arrays
//! become [`Value::List`].

use serde_json::Value as Json;

use crate::traits::{AsValue, Queryable};
use crate::value::{Number, Value};

impl Queryable for Json {
    fn field(&self, name: &str) -> Option<Value<'_>> {
        match self {
            Json::Object(map) => map.get(name).map(AsValue::as_value),
            _ => None,
        }
    }
}

impl AsValue for Json {
    fn as_value(&self) -> Value<'_> {
        match self {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(json_number(n)),
            Json::String(s) => Value::from(s.as_str()),
            Json::Array(items) => Value::List(items.iter().map(AsValue::as_value).collect()),
            Json::Object(_) => Value::Object(self),
        }
    }
}

fn json_number(n: &serde_json::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::I64(i)
    } else if let Some(u) = n.as_u64() {
        Number::U64(u)
    } else {
        Number::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}
