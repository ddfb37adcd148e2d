//! Predicate trees.
//!
//! A [`Predicate`] is an immutable boolean test over one object. Leaves are
//! built from clauses such as `born__year__ge = 2000`; inner nodes combine
//! predicates with `&`, `|`, `!` and unary `-`.
//!
//! # Clause syntax
//!
//! A clause name is split on `__`. If the last segment is a recognized
//! operator suffix ([`Op::SUFFIXES`]) the remaining segments are the
//! attribute path; otherwise the whole name is the path and the clause tests
//! equality.
//!
//! | Clause | Test |
//! |--------|------|
//! | `ampm` | `ampm == value` |
//! | `born__year__ge` | `born.year >= value` |
//! | `name__ne` | `name != value` |
//! | `tags__in` | `value` is contained in `tags` |
//! | `name__match` | regex `value` found in `name` |
//! | `name__imatch` | same, case-insensitive |
//! | `born__year__between` | `value[0] <= born.year <= value[1]` |

use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitOr, Neg, Not};
use std::rc::Rc;

use regex::{Regex, RegexBuilder};

use crate::error::{QueryError, Result};
use crate::op::Op;
use crate::path::{split_clause, AttrPath};
use crate::traits::Queryable;
use crate::value::Value;

type CustomFn = Rc<dyn Fn(&dyn Queryable) -> bool>;

/// A composable boolean test over a single object.
///
/// # Example
///
/// ```
/// use doid::Predicate;
///
/// let recent = Predicate::parse("born__year__ge", 1960).unwrap();
/// let morning = Predicate::parse("ampm", "AM").unwrap();
///
/// let either = recent.clone() | morning.clone();
/// let both = recent & !morning;
/// assert_eq!(both.to_string(), "(born__year__ge=1960 & !ampm=\"AM\")");
/// # let _ = either;
/// ```
#[derive(Clone)]
pub enum Predicate {
    /// Matches every object.
    Always,
    /// Attribute equals the operand.
    Equal {
        path: AttrPath,
        value: Value<'static>,
    },
    /// Attribute compared to the operand with `ne`, `gt`, `ge`, `lt` or `le`.
    Compare {
        path: AttrPath,
        op: Op,
        value: Value<'static>,
    },
    /// Attribute (string or list) contains the operand.
    Contains {
        path: AttrPath,
        value: Value<'static>,
    },
    /// Regex search in a string attribute (`match` or `imatch`).
    Regex { path: AttrPath, op: Op, regex: Regex },
    /// Attribute lies within inclusive bounds.
    Between {
        path: AttrPath,
        low: Value<'static>,
        high: Value<'static>,
    },
    /// Both predicates match.
    And(Box<Predicate>, Box<Predicate>),
    /// Either predicate matches.
    Or(Box<Predicate>, Box<Predicate>),
    /// The predicate does not match.
    Not(Box<Predicate>),
    /// Numeric negation of the predicate's result. Predicates here are
    /// boolean-valued, so evaluating this fails with
    /// [`QueryError::UnsupportedNegation`].
    Negate(Box<Predicate>),
    /// Caller-supplied test.
    Custom(CustomFn),
}

impl Predicate {
    /// Returns a predicate matching every object.
    pub fn always() -> Self {
        Predicate::Always
    }

    /// Builds a predicate from a single clause.
    ///
    /// Fails if the clause name is malformed, if the operand has the wrong
    /// shape for the operator, or if a `match`/`imatch` pattern is invalid.
    pub fn parse(clause: &str, value: impl Into<Value<'static>>) -> Result<Self> {
        let value = value.into();
        let segments = split_clause(clause)?;

        let (path, op) = match segments.split_last() {
            Some((last, rest)) if !rest.is_empty() => match Op::from_suffix(last) {
                Some(op) => (AttrPath::from_segments(rest), op),
                None => (AttrPath::from_segments(&segments), Op::Eq),
            },
            _ => (AttrPath::from_segments(&segments), Op::Eq),
        };
        tracing::trace!(clause, %path, op = %op, "parsed clause");

        let predicate = match op {
            Op::Eq => Predicate::Equal { path, value },
            Op::Ne | Op::Gt | Op::Ge | Op::Lt | Op::Le => Predicate::Compare { path, op, value },
            Op::In => Predicate::Contains { path, value },
            Op::Match | Op::IMatch => {
                let pattern = value
                    .as_str()
                    .ok_or_else(|| QueryError::invalid_operand(clause, "a string pattern"))?;
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(op == Op::IMatch)
                    .build()?;
                Predicate::Regex { path, op, regex }
            }
            Op::Between => match value {
                Value::List(bounds) if bounds.len() == 2 => {
                    let mut bounds = bounds.into_iter();
                    match (bounds.next(), bounds.next()) {
                        (Some(low), Some(high)) => Predicate::Between { path, low, high },
                        _ => return Err(QueryError::invalid_operand(clause, "two bounds")),
                    }
                }
                _ => return Err(QueryError::invalid_operand(clause, "two bounds")),
            },
        };
        Ok(predicate)
    }

    /// AND-combines predicates and clauses into one predicate.
    ///
    /// Positional predicates are reduced left to right, then each clause is
    /// parsed and added. With no input the result is [`Predicate::Always`].
    pub fn all<I, C, K, V>(predicates: I, clauses: C) -> Result<Self>
    where
        I: IntoIterator<Item = Predicate>,
        C: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value<'static>>,
    {
        let mut combined: Option<Predicate> = None;
        let mut push = |next: Predicate| {
            combined = Some(match combined.take() {
                Some(acc) => acc & next,
                None => next,
            });
        };

        for predicate in predicates {
            push(predicate);
        }
        for (clause, value) in clauses {
            push(Predicate::parse(clause.as_ref(), value)?);
        }

        Ok(combined.unwrap_or(Predicate::Always))
    }

    /// Wraps a closure as a predicate.
    ///
    /// # Example
    ///
    /// ```
    /// use doid::{lookup, Predicate};
    ///
    /// let short_name = Predicate::from_fn(|obj| {
    ///     lookup(obj, "name")
    ///         .ok()
    ///         .and_then(|v| v.as_str().map(|s| s.len() < 10))
    ///         .unwrap_or(false)
    /// });
    /// # let _ = short_name;
    /// ```
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&dyn Queryable) -> bool + 'static,
    {
        Predicate::Custom(Rc::new(f))
    }

    /// Evaluates this predicate against an object.
    ///
    /// Lookup failures and incompatible comparisons are returned as errors,
    /// never treated as a non-match.
    pub fn matches(&self, obj: &dyn Queryable) -> Result<bool> {
        match self {
            Predicate::Always => Ok(true),
            Predicate::Equal { path, value } => Ok(path.resolve(obj)? == *value),
            Predicate::Compare {
                path,
                op: Op::Ne,
                value,
            } => Ok(path.resolve(obj)? != *value),
            Predicate::Compare { path, op, value } => {
                let attr = path.resolve(obj)?;
                let ordering = attr.ordering(value, op.as_str())?;
                // NaN compares false under every ordering operator
                Ok(ordering.is_some_and(|o| op.eval_ordering(o)))
            }
            Predicate::Contains { path, value } => path.resolve(obj)?.contains(value),
            Predicate::Regex { path, op, regex } => {
                let attr = path.resolve(obj)?;
                match attr.as_str() {
                    Some(s) => Ok(regex.is_match(s)),
                    None => Err(QueryError::TypeMismatch {
                        op: op.as_str(),
                        left: attr.kind_name(),
                        right: "string",
                    }),
                }
            }
            Predicate::Between { path, low, high } => {
                let attr = path.resolve(obj)?;
                let above = low
                    .ordering(&attr, "between")?
                    .is_some_and(|o| o != Ordering::Greater);
                if !above {
                    return Ok(false);
                }
                let below = attr
                    .ordering(high, "between")?
                    .is_some_and(|o| o != Ordering::Greater);
                Ok(below)
            }
            Predicate::And(a, b) => Ok(a.matches(obj)? && b.matches(obj)?),
            Predicate::Or(a, b) => Ok(a.matches(obj)? || b.matches(obj)?),
            Predicate::Not(p) => Ok(!p.matches(obj)?),
            Predicate::Negate(_) => Err(QueryError::UnsupportedNegation),
            Predicate::Custom(f) => Ok(f(obj)),
        }
    }

    /// Returns `true` if this is [`Predicate::Always`].
    pub fn is_always(&self) -> bool {
        matches!(self, Predicate::Always)
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::Always
    }
}

impl BitAnd for Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Predicate) -> Predicate {
        Predicate::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Predicate) -> Predicate {
        Predicate::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }
}

impl Neg for Predicate {
    type Output = Predicate;

    fn neg(self) -> Predicate {
        Predicate::Negate(Box::new(self))
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: &Predicate) -> Predicate {
        self.clone() & rhs.clone()
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: &Predicate) -> Predicate {
        self.clone() | rhs.clone()
    }
}

impl Not for &Predicate {
    type Output = Predicate;

    fn not(self) -> Predicate {
        !self.clone()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always => f.write_str("*"),
            Predicate::Equal { path, value } => write!(f, "{path}={value}"),
            Predicate::Compare { path, op, value } => write!(f, "{path}__{op}={value}"),
            Predicate::Contains { path, value } => write!(f, "{path}__in={value}"),
            Predicate::Regex { path, op, regex } => {
                write!(f, "{path}__{op}={:?}", regex.as_str())
            }
            Predicate::Between { path, low, high } => {
                write!(f, "{path}__between=[{low}, {high}]")
            }
            Predicate::And(a, b) => write!(f, "({a} & {b})"),
            Predicate::Or(a, b) => write!(f, "({a} | {b})"),
            Predicate::Not(p) => write!(f, "!{p}"),
            Predicate::Negate(p) => write!(f, "-{p}"),
            Predicate::Custom(_) => f.write_str("<fn>"),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicate({self})")
    }
}
