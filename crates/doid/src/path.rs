//! Attribute paths: `born__year` style nested lookups.

use std::fmt;

use crate::error::{QueryError, Result};
use crate::traits::Queryable;
use crate::value::Value;

/// Separator between path segments (and before an operator suffix).
pub const DELIMITER: &str = "__";

/// A validated, non-empty sequence of attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttrPath {
    segments: Vec<String>,
}

impl AttrPath {
    /// Parses a path, splitting on [`DELIMITER`].
    ///
    /// The path must be non-empty, must not start or end with the delimiter,
    /// and every segment must be non-empty.
    pub fn parse(path: &str) -> Result<Self> {
        let segments = split_clause(path)?;
        Ok(AttrPath {
            segments: segments.into_iter().map(str::to_string).collect(),
        })
    }

    pub(crate) fn from_segments(segments: &[&str]) -> Self {
        AttrPath {
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns the attribute names in lookup order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolves this path against an object.
    ///
    /// Each segment is looked up on the value produced by the previous one.
    /// The first missing attribute aborts with [`QueryError::Lookup`].
    pub fn resolve<'a>(&self, obj: &'a dyn Queryable) -> Result<Value<'a>> {
        let mut current = Value::Object(obj);
        for segment in &self.segments {
            current = current.field(segment).ok_or_else(|| QueryError::Lookup {
                path: self.to_string(),
                segment: segment.clone(),
            })?;
        }
        Ok(current)
    }
}

impl fmt::Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(DELIMITER))
    }
}

/// Splits a clause name into segments, validating its shape.
pub(crate) fn split_clause(clause: &str) -> Result<Vec<&str>> {
    if clause.is_empty() {
        return Err(QueryError::invalid_clause(clause, "empty name"));
    }
    if clause.starts_with(DELIMITER) {
        return Err(QueryError::invalid_clause(clause, "starts with '__'"));
    }
    if clause.ends_with(DELIMITER) {
        return Err(QueryError::invalid_clause(clause, "ends with '__'"));
    }
    let segments: Vec<&str> = clause.split(DELIMITER).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(QueryError::invalid_clause(clause, "empty path segment"));
    }
    Ok(segments)
}

/// Resolves a path string against an object.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use doid::{lookup, Value};
///
/// let mut row = HashMap::new();
/// row.insert("city".to_string(), "Lake Rhonda".to_string());
///
/// assert_eq!(lookup(&row, "city").unwrap(), Value::from("Lake Rhonda"));
/// assert!(lookup(&row, "name").is_err());
/// ```
pub fn lookup<'a>(obj: &'a dyn Queryable, path: &str) -> Result<Value<'a>> {
    AttrPath::parse(path)?.resolve(obj)
}
