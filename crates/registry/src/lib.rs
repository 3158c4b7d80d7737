//! Dynamic type registry for managed entities.
//!
//! Every managed entity (an application component, a cluster, a location-bound
//! resource) carries a type assembled from three facet kinds declared across its
//! type hierarchy: **effectors** (invocable operations), **sensors** (observable
//! state channels) and **config keys** (typed configuration slots).
//!
//! # Mental Model
//!
//! 1. **Declaration:** each type lists its own facets and parents in a
//!    [`TypeDecl`], either by hand or through [`entity_type!`].
//! 2. **Catalog:** a [`TypeCatalog`] validates the hierarchy once and caches, per
//!    type, the facets resolved across all ancestors ([`ResolvedFacets`]).
//! 3. **Registry:** each entity owns a [`DynamicType`] seeded from its type's
//!    resolved facets. Sensors can be added and removed at runtime; every change
//!    is reported to the owner's [`EventSink`].
//! 4. **Consumption:** readers call [`DynamicType::snapshot`] and keep the
//!    returned [`EntityTypeSnapshot`] for as long as they like.
//!
//! # Precedence Contract
//!
//! - Effectors and sensors: the first declaration met in the hierarchy walk wins.
//! - Config keys: the declaration on the more specific type wins; unrelated
//!   declaring types, or two keys on one type, fall back to first-met.
//! - The same declaration reached through several paths is never a conflict.
//!
//! Genuine conflicts are logged at warn level and recorded as [`Collision`]s;
//! they never fail construction.

pub mod config;
pub mod core;
pub mod dynamic;
pub mod events;
pub mod hierarchy;
pub mod resolve;
pub mod snapshot;

pub use config::{ConfigError, ConfigResolver, ConfigStore};
pub use crate::core::{
	AttributeSensorAndConfigKey, ConfigKey, ConfigValue, Effector, Facet, FacetKind,
	FromConfigValue, HasConfigKey, Parameter, Sensor, SensorKind, TypeError, ValueType,
};
pub use dynamic::{DynamicType, EntityId, EntityIdentity};
pub use events::{EventSink, SENSOR_ADDED, SENSOR_REMOVED, TypeEvent, TypeEventKind};
pub use hierarchy::{CatalogBuilder, Specificity, TypeBuilder, TypeCatalog, TypeDecl};
pub use resolve::{Collision, CollisionCause, FacetMap, ResolvedFacets};
pub use snapshot::EntityTypeSnapshot;

#[doc(hidden)]
pub use {inventory, paste};
