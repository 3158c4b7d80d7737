//! Immutable point-in-time view of an entity's type.
//!
//! # Role
//!
//! Pure view type handed to external consumers (status surfaces, REST
//! resources, persistence). It contains no mutation logic and shares no mutable
//! state with the registry that built it.

use std::sync::Arc;

use serde::Serialize;

use crate::core::{ConfigKey, Effector, Facet, Sensor};
use crate::resolve::FacetMap;

/// Frozen copy of `(type name, config keys, sensors, effectors)`.
///
/// A snapshot outlives later mutations of its registry unchanged. Iteration
/// order is the registry's insertion order; it carries no meaning across
/// snapshots of different registries.
#[derive(Debug, Clone, Serialize)]
pub struct EntityTypeSnapshot {
	name: Arc<str>,
	/// Rebuild counter of the registry that produced this snapshot.
	version: u64,
	config_keys: Arc<FacetMap<ConfigKey>>,
	sensors: FacetMap<Sensor>,
	effectors: Arc<[Arc<Effector>]>,
}

impl EntityTypeSnapshot {
	pub fn new(
		name: Arc<str>,
		version: u64,
		config_keys: Arc<FacetMap<ConfigKey>>,
		sensors: FacetMap<Sensor>,
		effectors: Arc<[Arc<Effector>]>,
	) -> Self {
		Self {
			name,
			version,
			config_keys,
			sensors,
			effectors,
		}
	}

	/// Fully qualified type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Type name without its dotted namespace.
	pub fn simple_name(&self) -> &str {
		self.name.rsplit('.').next().unwrap_or(&self.name)
	}

	pub fn version(&self) -> u64 {
		self.version
	}

	pub fn config_keys(&self) -> &FacetMap<ConfigKey> {
		&self.config_keys
	}

	pub fn config_key(&self, name: &str) -> Option<&Arc<ConfigKey>> {
		self.config_keys.get(name)
	}

	pub fn sensors(&self) -> &FacetMap<Sensor> {
		&self.sensors
	}

	pub fn sensor(&self, name: &str) -> Option<&Arc<Sensor>> {
		self.sensors.get(name)
	}

	pub fn has_sensor(&self, name: &str) -> bool {
		self.sensors.contains_key(name)
	}

	pub fn effectors(&self) -> &[Arc<Effector>] {
		&self.effectors
	}

	pub fn effector(&self, name: &str) -> Option<&Arc<Effector>> {
		self.effectors.iter().find(|e| e.name() == name)
	}

	pub fn has_effector(&self, name: &str) -> bool {
		self.effector(name).is_some()
	}
}
