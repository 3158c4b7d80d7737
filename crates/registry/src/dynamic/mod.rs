//! The per-entity type registry.

mod identity;
mod registry;

pub use identity::{EntityId, EntityIdentity};
pub use registry::DynamicType;

#[cfg(test)]
mod tests;
