//! Proc macros for doid.
//!
//! # Available Macros
//!
//! - [`Queryable`] - Generate named attribute access for doid queries
//!
//! The generated code refers to the `doid` crate by absolute path, so use
//! the macro through `doid` (feature `derive`, on by default) rather than
//! depending on this crate directly.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod query;

/// Derives the `Queryable` trait for structs with named fields.
///
/// Every field is exposed under its own name through `doid::AsValue`, so
/// field types must implement `AsValue` (strings, numbers, booleans,
/// `chrono` dates, `Option`s and `Vec`s of those do).
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field from lookups |
/// | `rename = "..."` | Use a custom attribute name |
/// | `nested` | Expose a `Queryable` field as an object for further `__` hops |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Attribute name constants (e.g., `Person::NAME`, `Person::BORN`)
/// 2. Implementation of `Queryable::field()`
///
/// # Example
///
/// ```ignore
/// use chrono::NaiveDate;
/// use doid::{ListContainer, Predicate, Queryable};
///
/// #[derive(Clone, Queryable)]
/// struct Address {
///     city: String,
/// }
///
/// #[derive(Clone, Queryable)]
/// struct Person {
///     name: String,
///     #[query(rename = "born")]
///     birth_date: NaiveDate,
///     #[query(nested)]
///     address: Address,
///     #[query(skip)]
///     password_hash: String,
/// }
///
/// let people: ListContainer<Person> = load_people();
/// let locals = people
///     .filter(&Predicate::parse("address__city", "Lake Rhonda")?)?
///     .order_by([Person::BORN])?;
/// ```
#[proc_macro_derive(Queryable, attributes(query))]
pub fn queryable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    query::queryable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
