//! Sensor change notifications.
//!
//! The registry does not know its owning entity; the owner injects an
//! [`EventSink`] at construction and receives a [`TypeEvent`] synchronously for
//! every sensor mutation that changed state.

use std::sync::Arc;

use crate::core::Sensor;
use crate::dynamic::EntityId;

/// Published name of [`TypeEventKind::SensorAdded`].
pub const SENSOR_ADDED: &str = "entity.sensor.added";
/// Published name of [`TypeEventKind::SensorRemoved`].
pub const SENSOR_REMOVED: &str = "entity.sensor.removed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeEventKind {
	SensorAdded,
	SensorRemoved,
}

impl TypeEventKind {
	/// The published event name.
	pub const fn name(self) -> &'static str {
		match self {
			Self::SensorAdded => SENSOR_ADDED,
			Self::SensorRemoved => SENSOR_REMOVED,
		}
	}
}

impl core::fmt::Display for TypeEventKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

/// A change to an entity's sensor set.
#[derive(Debug, Clone)]
pub struct TypeEvent {
	pub entity: EntityId,
	pub kind: TypeEventKind,
	/// The sensor that was added, or the one that was removed.
	pub sensor: Arc<Sensor>,
}

/// Receiver for [`TypeEvent`]s, supplied by the owning entity.
///
/// Called on the mutating thread after the registry has released its locks, so
/// a sink may read the registry back.
pub trait EventSink: Send + Sync {
	fn emit(&self, event: TypeEvent);
}

impl<F> EventSink for F
where
	F: Fn(TypeEvent) + Send + Sync,
{
	fn emit(&self, event: TypeEvent) {
		self(event)
	}
}
