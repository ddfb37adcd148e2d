//! Implementation of the `#[derive(Queryable)]` macro.
//!
//! This module generates named field access for the doid query engine
//! from struct annotations, plus field name constants.

mod attrs;
mod derive;

pub use derive::queryable_derive_impl;
