//! Query builder.
//!
//! [`Q`] collects predicates and `name = value` clauses and AND-combines them
//! into a single [`Predicate`]. The [`q!`](crate::q) macro is shorthand for
//! the builder with bare clause names.

use crate::error::Result;
use crate::predicate::Predicate;
use crate::value::Value;

/// Builder combining predicates and clauses with AND.
///
/// Clause names are validated when [`Q::build`] runs, so a malformed name
/// is reported before any object is evaluated.
///
/// # Example
///
/// ```
/// use doid::Q;
///
/// let gen_x = Q::new()
///     .clause("born__year__ge", 1965)
///     .clause("born__year__le", 1980)
///     .build()
///     .unwrap();
/// assert_eq!(gen_x.to_string(), "(born__year__ge=1965 & born__year__le=1980)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Q {
    predicates: Vec<Predicate>,
    clauses: Vec<(String, Value<'static>)>,
}

impl Q {
    /// Creates an empty builder. An empty builder matches everything.
    pub fn new() -> Self {
        Q::default()
    }

    /// Adds a prebuilt predicate.
    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Adds a `name = value` clause, e.g. `("born__year__ge", 2000)`.
    pub fn clause(mut self, name: impl Into<String>, value: impl Into<Value<'static>>) -> Self {
        self.clauses.push((name.into(), value.into()));
        self
    }

    /// Returns `true` if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty() && self.clauses.is_empty()
    }

    /// Parses the clauses and combines everything into one predicate.
    ///
    /// Predicates come first, in insertion order, followed by the clauses.
    pub fn build(self) -> Result<Predicate> {
        Predicate::all(self.predicates, self.clauses)
    }
}

/// Builds a [`Predicate`] from clauses written as bare identifiers.
///
/// Evaluates to `Result<Predicate>`. Prebuilt predicates go before a `;`,
/// clauses after it; either part may stand alone.
///
/// ```
/// use doid::q;
///
/// let morning = q!(ampm = "AM").unwrap();
/// let recent = q!(born__year__ge = 2000).unwrap();
/// let both = q!(morning.clone(), recent.clone()).unwrap();
/// let gen_x = q!(!morning; born__year__between = [1965, 1980]).unwrap();
/// let everything = q!().unwrap();
/// # let _ = (both, gen_x, everything);
/// ```
#[macro_export]
macro_rules! q {
    () => {
        $crate::Q::new().build()
    };
    ($($name:ident = $value:expr),+ $(,)?) => {
        $crate::Q::new()$(.clause(stringify!($name), $value))+.build()
    };
    ($($predicate:expr),+ ; $($name:ident = $value:expr),* $(,)?) => {
        $crate::Q::new()$(.predicate($predicate))+$(.clause(stringify!($name), $value))*.build()
    };
    ($($predicate:expr),+ $(,)?) => {
        $crate::Q::new()$(.predicate($predicate))+.build()
    };
}
