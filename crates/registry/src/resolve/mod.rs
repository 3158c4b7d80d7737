//! Facet discovery across a type hierarchy and resolution of duplicate names.

mod collision;
mod discovery;

pub use collision::{Collision, CollisionCause};
pub use discovery::{FacetMap, ResolvedFacets};
