//! Doid - Django-style filtering and multi-key sorting for Rust collections.
//!
//! Doid lets you query in-memory collections with clauses such as
//! `born__year__ge = 1960` and sort them by composite keys. It supports:
//!
//! - Nested attribute paths separated by `__`
//! - Operator suffixes: `ne`, `gt`, `ge`, `lt`, `le`, `in`, `match`,
//!   `imatch`, `between`
//! - Composable predicates with `&`, `|` and `!`
//! - Stable multi-key ordering by attribute paths or closures
//! - Structs (via `#[derive(Queryable)]`), property maps and JSON objects
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use doid::{q, ListContainer, Queryable, SortOptions};
//!
//! #[derive(Clone, Queryable)]
//! struct Person {
//!     name: String,
//!     city: String,
//!     born: NaiveDate,
//! }
//!
//! let people: ListContainer<Person> = vec![
//!     Person {
//!         name: "Crystal Cannon".into(),
//!         city: "Lake Rhonda".into(),
//!         born: NaiveDate::from_ymd_opt(1958, 5, 28).unwrap(),
//!     },
//!     Person {
//!         name: "Tonya Ross".into(),
//!         city: "Andersonfurt".into(),
//!         born: NaiveDate::from_ymd_opt(1979, 2, 3).unwrap(),
//!     },
//!     Person {
//!         name: "Cody Nash".into(),
//!         city: "Andersonfurt".into(),
//!         born: NaiveDate::from_ymd_opt(1972, 11, 30).unwrap(),
//!     },
//! ]
//! .into();
//!
//! let gen_x = q!(born__year__between = [1965, 1980]).unwrap();
//! let result = people
//!     .filter(&gen_x)
//!     .unwrap()
//!     .order_by_with(["city", "name"], SortOptions::descending())
//!     .unwrap();
//!
//! let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["Tonya Ross", "Cody Nash"]);
//! ```
//!
//! # Clause Semantics
//!
//! A clause name is split on `__`. When the last segment is an operator
//! suffix the rest is the attribute path, otherwise the whole name is a path
//! compared for equality. Paths resolve one attribute at a time, so a
//! missing attribute anywhere is an error, not a non-match.
//!
//! | Suffix | Matches when |
//! |--------|--------------|
//! | (none) | attribute equals the operand |
//! | `ne` | attribute differs from the operand |
//! | `gt`, `ge`, `lt`, `le` | attribute orders accordingly |
//! | `in` | attribute (string or list) contains the operand |
//! | `match`, `imatch` | regex found in the attribute (`imatch` ignores case) |
//! | `between` | `low <= attribute <= high` for an operand `[low, high]` |
//!
//! Equality across different kinds is simply false. Ordering across
//! different kinds is a [`QueryError::TypeMismatch`].
//!
//! Booleans are their own kind, not numbers: `active = 1` never matches
//! `true`, and `active__gt = 0` is a type mismatch. Compare booleans with
//! `true`/`false` operands.
//!
//! # Logging
//!
//! Container operations emit `tracing` events at `debug` level and clause
//! parsing at `trace` level. No subscriber is installed by the library.

mod container;
mod error;
#[cfg(feature = "json")]
mod json;
mod key;
mod op;
mod ordering;
mod path;
mod predicate;
mod q;
mod slice;
mod traits;
mod value;

// Re-export public API
pub use container::ListContainer;
pub use error::{QueryError, Result};
pub use key::{KeyExtractor, KeySpec, K};
pub use op::Op;
pub use ordering::SortOptions;
pub use path::{lookup, AttrPath, DELIMITER};
pub use predicate::Predicate;
pub use q::Q;
pub use slice::Slice;
pub use traits::{AsValue, Queryable};
pub use value::{compare_values, Number, Value};

#[cfg(feature = "derive")]
pub use doid_macros::Queryable;
