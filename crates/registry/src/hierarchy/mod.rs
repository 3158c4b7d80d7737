//! Declared entity types and the hierarchy they form.
//!
//! Each type registers its own facets explicitly ([`TypeDecl`]); nothing is
//! discovered by inspecting values at runtime. A [`TypeCatalog`] validates the
//! parent relation once and precomputes, per type, the walk order used for
//! facet discovery and the ancestor set used for [`Specificity`] tests.

mod catalog;
mod decl;
mod macros;
mod registration;

pub use catalog::{CatalogBuilder, Specificity, TypeCatalog};
pub use decl::{TypeBuilder, TypeDecl};
pub use registration::TypeReg;

#[cfg(test)]
mod tests;
