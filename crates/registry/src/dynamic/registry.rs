//! Per-entity type registry with a lazily rebuilt snapshot.
//!
//! # Role
//!
//! Holds the resolved facets of one entity, lets the live entity add and remove
//! sensors, and publishes an [`EntityTypeSnapshot`] that readers can keep without
//! touching the live maps.
//!
//! # Concurrency
//!
//! - **Reads of a valid snapshot:** lock-free (atomic state load + `ArcSwap` load).
//! - **Rebuilds:** the state moves `INVALID -> REBUILDING` by compare-and-set
//!   under the rebuild mutex, so exactly one thread rebuilds per invalidation and
//!   no reader sees a half-built snapshot.
//! - **Sensor writes:** mutate the map under its write lock, then store `INVALID`.
//!   A write landing during a rebuild makes the closing `REBUILDING -> VALID`
//!   transition fail, so the next read rebuilds again.
//!
//! # Invariants
//!
//! - A thread that mutated the sensor set and then reads the snapshot observes
//!   its own mutation.
//! - Effectors and config keys are fixed at construction and shared with the
//!   per-type resolution cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use arc_swap::ArcSwap;
use indexmap::map::Entry;
use parking_lot::{Mutex, RwLock};
use tracing::trace;

use super::identity::{EntityId, EntityIdentity};
use crate::core::{ConfigKey, Effector, Facet, Sensor, TypeError};
use crate::events::{EventSink, TypeEvent, TypeEventKind};
use crate::hierarchy::TypeCatalog;
use crate::resolve::{Collision, FacetMap};
use crate::snapshot::EntityTypeSnapshot;

const INVALID: u8 = 0;
const REBUILDING: u8 = 1;
const VALID: u8 = 2;

/// The type registry of one entity instance.
///
/// Owned by its entity for the entity's lifetime. Snapshots handed out by
/// [`DynamicType::snapshot`] are independent of it.
pub struct DynamicType {
	identity: EntityIdentity,
	sink: Box<dyn EventSink>,
	effectors: Arc<FacetMap<Effector>>,
	effector_list: Arc<[Arc<Effector>]>,
	config_keys: Arc<FacetMap<ConfigKey>>,
	sensors: RwLock<FacetMap<Sensor>>,
	collisions: Arc<[Collision]>,
	snapshot: ArcSwap<EntityTypeSnapshot>,
	state: AtomicU8,
	/// Guards rebuilds; holds the version of the last published snapshot.
	rebuild: Mutex<u64>,
}

impl core::fmt::Debug for DynamicType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("DynamicType")
			.field("identity", &self.identity)
			.field("effectors", &self.effectors.len())
			.field("sensors", &self.sensors.read().len())
			.field("config_keys", &self.config_keys.len())
			.finish()
	}
}

impl DynamicType {
	/// Builds the registry for an entity of `type_name`.
	///
	/// Fails if the catalog does not know `type_name`.
	pub fn new(
		catalog: &TypeCatalog,
		type_name: &str,
		id: EntityId,
		sink: impl EventSink + 'static,
	) -> Result<Self, TypeError> {
		let resolved = catalog.resolve(type_name)?;
		let identity = EntityIdentity::new(id, Arc::clone(&resolved.type_name));

		trace!(entity = %identity.id(), effectors = ?resolved.effectors.keys().collect::<Vec<_>>(), "entity effectors");
		trace!(entity = %identity.id(), sensors = ?resolved.sensors.keys().collect::<Vec<_>>(), "entity sensors");
		trace!(entity = %identity.id(), config_keys = ?resolved.config_keys.keys().collect::<Vec<_>>(), "entity config keys");

		let effector_list: Arc<[Arc<Effector>]> = resolved.effectors.values().cloned().collect();
		let initial = EntityTypeSnapshot::new(
			Arc::clone(&resolved.type_name),
			1,
			Arc::clone(&resolved.config_keys),
			resolved.sensors.clone(),
			Arc::clone(&effector_list),
		);

		Ok(Self {
			identity,
			sink: Box::new(sink),
			effectors: Arc::clone(&resolved.effectors),
			effector_list,
			config_keys: Arc::clone(&resolved.config_keys),
			sensors: RwLock::new(resolved.sensors.clone()),
			collisions: Arc::clone(&resolved.collisions),
			snapshot: ArcSwap::from_pointee(initial),
			state: AtomicU8::new(VALID),
			rebuild: Mutex::new(1),
		})
	}

	pub fn identity(&self) -> &EntityIdentity {
		&self.identity
	}

	/// Collisions met while resolving this entity's type.
	pub fn collisions(&self) -> &[Collision] {
		&self.collisions
	}

	pub fn effector(&self, name: &str) -> Option<Arc<Effector>> {
		self.effectors.get(name).cloned()
	}

	/// Effectors by name. Fixed after construction.
	pub fn effectors(&self) -> &FacetMap<Effector> {
		&self.effectors
	}

	pub fn sensor(&self, name: &str) -> Option<Arc<Sensor>> {
		self.sensors.read().get(name).cloned()
	}

	pub fn has_sensor(&self, name: &str) -> bool {
		self.sensors.read().contains_key(name)
	}

	/// Copy of the current sensor set.
	pub fn sensors(&self) -> FacetMap<Sensor> {
		self.sensors.read().clone()
	}

	pub fn config_key(&self, name: &str) -> Option<Arc<ConfigKey>> {
		self.config_keys.get(name).cloned()
	}

	/// Config keys by name. Fixed after construction.
	pub fn config_keys(&self) -> &FacetMap<ConfigKey> {
		&self.config_keys
	}

	/// Adds `sensor`, replacing any sensor of the same name.
	///
	/// Always invalidates the snapshot and emits one [`TypeEventKind::SensorAdded`].
	pub fn add_sensor(&self, sensor: impl Into<Arc<Sensor>>) {
		let sensor = sensor.into();
		self.sensors
			.write()
			.insert(Arc::from(sensor.name()), Arc::clone(&sensor));
		self.invalidate();
		self.emit(TypeEventKind::SensorAdded, sensor);
	}

	/// Adds each sensor in order. Not atomic as a batch.
	pub fn add_sensors<I>(&self, sensors: I)
	where
		I: IntoIterator,
		I::Item: Into<Arc<Sensor>>,
	{
		for sensor in sensors {
			self.add_sensor(sensor);
		}
	}

	/// Adds `sensor` only if no sensor of that name exists.
	///
	/// Returns whether it was added; nothing is invalidated or emitted otherwise.
	pub fn add_sensor_if_absent(&self, sensor: impl Into<Arc<Sensor>>) -> bool {
		let sensor = sensor.into();
		let inserted = match self.sensors.write().entry(Arc::from(sensor.name())) {
			Entry::Occupied(_) => false,
			Entry::Vacant(slot) => {
				slot.insert(Arc::clone(&sensor));
				true
			}
		};
		if inserted {
			self.invalidate();
			self.emit(TypeEventKind::SensorAdded, sensor);
		}
		inserted
	}

	/// Removes the sensor called `name`, returning it if present.
	pub fn remove_sensor(&self, name: &str) -> Option<Arc<Sensor>> {
		let removed = self.sensors.write().shift_remove(name)?;
		self.invalidate();
		self.emit(TypeEventKind::SensorRemoved, Arc::clone(&removed));
		Some(removed)
	}

	/// Removes the sensor sharing `sensor`'s name. Returns whether one was removed.
	pub fn remove_sensor_def(&self, sensor: &Sensor) -> bool {
		self.remove_sensor(sensor.name()).is_some()
	}

	/// Returns the current snapshot, rebuilding it first if a mutation is pending.
	pub fn snapshot(&self) -> Arc<EntityTypeSnapshot> {
		if self.state.load(Ordering::Acquire) == VALID {
			return self.snapshot.load_full();
		}

		let mut version = self.rebuild.lock();
		if self
			.state
			.compare_exchange(INVALID, REBUILDING, Ordering::AcqRel, Ordering::Acquire)
			.is_ok()
		{
			*version += 1;
			let snap = Arc::new(EntityTypeSnapshot::new(
				Arc::clone(self.identity.type_name_arc()),
				*version,
				Arc::clone(&self.config_keys),
				self.sensors.read().clone(),
				Arc::clone(&self.effector_list),
			));
			self.snapshot.store(Arc::clone(&snap));
			// Fails if a writer invalidated mid-rebuild; the state then stays INVALID.
			let _ = self.state.compare_exchange(
				REBUILDING,
				VALID,
				Ordering::AcqRel,
				Ordering::Acquire,
			);
			trace!(entity = %self.identity.id(), version = *version, "rebuilt type snapshot");
			return snap;
		}
		self.snapshot.load_full()
	}

	fn invalidate(&self) {
		self.state.store(INVALID, Ordering::Release);
	}

	fn emit(&self, kind: TypeEventKind, sensor: Arc<Sensor>) {
		trace!(entity = %self.identity.id(), event = %kind, sensor = sensor.name(), "sensor set changed");
		self.sink.emit(TypeEvent {
			entity: self.identity.id().clone(),
			kind,
			sensor,
		});
	}
}
