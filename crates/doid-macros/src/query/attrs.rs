//! Attribute parsing for the Queryable derive macro.
//!
//! This module provides the parser for the `#[query(...)]` field attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[query(...)]`.
#[derive(Debug, Clone, Default)]
pub struct QueryAttr {
    /// Hide this field from lookups.
    pub skip: bool,
    /// Attribute name used in clauses (default: field name).
    pub rename: Option<String>,
    /// Expose the field as a nested object instead of through `AsValue`.
    pub nested: bool,
}

impl Parse for QueryAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = QueryAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                // Flags: query(skip), query(nested)
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("nested") {
                        attr.nested = true;
                    } else {
                        return Err(Error::new(p.span(), "expected skip or nested"));
                    }
                }

                // rename = "custom_name"
                Meta::NameValue(nv) => {
                    if !nv.path.is_ident("rename") {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename",
                        ));
                    }
                    match &nv.value {
                        syn::Expr::Lit(syn::ExprLit {
                            lit: Lit::Str(s), ..
                        }) => {
                            let name = s.value();
                            if name.is_empty() || name.contains("__") {
                                return Err(Error::new(
                                    s.span(),
                                    "rename must be non-empty and must not contain '__'",
                                ));
                            }
                            attr.rename = Some(name);
                        }
                        _ => {
                            return Err(Error::new(
                                nv.value.span(),
                                "rename must be a string literal",
                            ))
                        }
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown query attribute. Expected: skip, nested, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && (attr.nested || attr.rename.is_some()) {
            return Err(Error::new(
                input.span(),
                "skip cannot be combined with nested or rename",
            ));
        }

        Ok(attr)
    }
}

/// Extract `#[query(...)]` attributes from a field's attributes.
pub fn parse_query_attrs(attrs: &[Attribute]) -> Result<QueryAttr> {
    for attr in attrs {
        if attr.path().is_ident("query") {
            return attr.parse_args::<QueryAttr>();
        }
    }
    Ok(QueryAttr::default())
}
