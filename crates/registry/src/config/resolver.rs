//! Layered config value resolution.
//!
//! # Resolution Order
//!
//! 1. Entity-local value
//! 2. Value inherited from the parent entity
//! 3. The config key's declared default (the most specific declaration wins,
//!    see [`crate::resolve`])

use super::store::ConfigStore;
use crate::core::{ConfigKey, ConfigValue, Facet, FromConfigValue};
use crate::dynamic::DynamicType;
use crate::resolve::FacetMap;

/// Resolves config values for one entity through a layered hierarchy.
///
/// Stateless and cheap; create one per resolution site.
///
/// # Example
///
/// ```ignore
/// let mut parent = ConfigStore::new();
/// parent.set(&capacity, 300_i64)?;
///
/// let resolver = ConfigResolver::new(&registry).with_inherited(&parent);
/// assert_eq!(resolver.resolve_as::<i64>("pump.capacity"), Some(300));
/// ```
pub struct ConfigResolver<'a> {
	keys: &'a FacetMap<ConfigKey>,
	entity: Option<&'a ConfigStore>,
	inherited: Option<&'a ConfigStore>,
}

impl<'a> ConfigResolver<'a> {
	/// Creates a resolver over `registry`'s config keys with no stores.
	///
	/// Until stores are added every resolution yields the key's default.
	pub fn new(registry: &'a DynamicType) -> Self {
		Self {
			keys: registry.config_keys(),
			entity: None,
			inherited: None,
		}
	}

	/// Adds the entity's own values (highest priority).
	pub fn with_entity(mut self, store: &'a ConfigStore) -> Self {
		self.entity = Some(store);
		self
	}

	/// Adds values inherited from the parent entity.
	pub fn with_inherited(mut self, store: &'a ConfigStore) -> Self {
		self.inherited = Some(store);
		self
	}

	/// Resolves `name` through the layers.
	///
	/// Returns `None` for names the entity does not declare, and for declared keys
	/// with no value in any layer and no default. A stored value of the wrong type
	/// is skipped.
	pub fn resolve(&self, name: &str) -> Option<ConfigValue> {
		let key = self.keys.get(name)?;
		for (layer, store) in [("entity", self.entity), ("inherited", self.inherited)] {
			let Some(value) = store.and_then(|s| s.get(name)) else {
				continue;
			};
			if value.matches_type(key.value_type()) {
				return Some(value.clone());
			}
			tracing::warn!(
				key = key.name(),
				layer,
				expected = %key.value_type(),
				got = value.type_name(),
				"config type mismatch; falling through",
			);
		}
		key.default().cloned()
	}

	/// Resolves `name` and extracts it as `T`.
	pub fn resolve_as<T: FromConfigValue>(&self, name: &str) -> Option<T> {
		self.resolve(name).as_ref().and_then(T::from_config)
	}
}
