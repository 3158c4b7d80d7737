use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;

use super::*;
use crate::core::{ConfigKey, Effector, Facet, Sensor, TypeError, ValueType};
use crate::events::{TypeEvent, TypeEventKind};
use crate::hierarchy::{TypeCatalog, TypeDecl};

type Events = Arc<Mutex<Vec<TypeEvent>>>;

fn catalog() -> TypeCatalog {
	TypeCatalog::builder()
		.register(
			TypeDecl::builder("example.Pump")
				.effector(Effector::new("start", ValueType::Void))
				.sensor(Sensor::attribute("pump.running", ValueType::Bool))
				.config_key(ConfigKey::new("pump.capacity", 100_i64))
				.build()
				.unwrap(),
		)
		.register(
			TypeDecl::builder("example.BigPump")
				.extends("example.Pump")
				.config_key(ConfigKey::new("pump.capacity", 500_i64))
				.build()
				.unwrap(),
		)
		.build()
		.unwrap()
}

fn pump(catalog: &TypeCatalog) -> (DynamicType, Events) {
	let events: Events = Arc::default();
	let sink = {
		let events = Arc::clone(&events);
		move |event: TypeEvent| events.lock().push(event)
	};
	let registry = DynamicType::new(catalog, "example.Pump", EntityId::from("pump-1"), sink).unwrap();
	(registry, events)
}

fn kinds(events: &Events) -> Vec<(TypeEventKind, String)> {
	events
		.lock()
		.iter()
		.map(|e| (e.kind, e.sensor.name().to_string()))
		.collect()
}

#[test]
fn unknown_type_is_rejected() {
	let err = DynamicType::new(&catalog(), "example.Valve", EntityId::generate(), |_: TypeEvent| {})
		.unwrap_err();
	assert_eq!(err, TypeError::UnknownType("example.Valve".into()));
}

#[test]
fn construction_exposes_resolved_facets() {
	let catalog = catalog();
	let (registry, events) = pump(&catalog);
	assert_eq!(registry.identity().type_name(), "example.Pump");
	assert_eq!(registry.identity().id().as_str(), "pump-1");
	assert!(registry.effector("start").is_some());
	assert!(registry.has_sensor("pump.running"));
	assert_eq!(
		registry.config_key("pump.capacity").and_then(|k| k.default().and_then(|d| d.get::<i64>())),
		Some(100)
	);
	assert!(registry.collisions().is_empty());
	assert!(events.lock().is_empty());
}

#[test]
fn snapshot_is_reused_until_mutation() {
	let catalog = catalog();
	let (registry, _) = pump(&catalog);
	let first = registry.snapshot();
	let second = registry.snapshot();
	assert!(Arc::ptr_eq(&first, &second));

	registry.add_sensor(Sensor::attribute("pump.flow", ValueType::Float));
	let third = registry.snapshot();
	assert!(!Arc::ptr_eq(&second, &third));
	assert!(third.version() > second.version());
	assert!(third.has_sensor("pump.flow"));
	assert!(!first.has_sensor("pump.flow"));
}

#[test]
fn add_sensor_replaces_and_always_notifies() {
	let catalog = catalog();
	let (registry, events) = pump(&catalog);
	let bool_flow = Arc::new(Sensor::attribute("pump.flow", ValueType::Bool));
	let float_flow = Arc::new(Sensor::attribute("pump.flow", ValueType::Float));

	registry.add_sensor(Arc::clone(&bool_flow));
	registry.add_sensor(Arc::clone(&float_flow));

	assert!(Arc::ptr_eq(&registry.sensor("pump.flow").unwrap(), &float_flow));
	assert_eq!(
		kinds(&events),
		[
			(TypeEventKind::SensorAdded, "pump.flow".to_string()),
			(TypeEventKind::SensorAdded, "pump.flow".to_string()),
		]
	);
	assert_eq!(events.lock()[0].entity.as_str(), "pump-1");
}

#[test]
fn add_sensor_if_absent_keeps_existing() {
	let catalog = catalog();
	let (registry, events) = pump(&catalog);
	let original = registry.sensor("pump.running").unwrap();
	let before = registry.snapshot();

	assert!(!registry.add_sensor_if_absent(Sensor::attribute("pump.running", ValueType::Int)));
	assert!(Arc::ptr_eq(&registry.sensor("pump.running").unwrap(), &original));
	assert!(Arc::ptr_eq(&before, &registry.snapshot()));
	assert!(events.lock().is_empty());

	assert!(registry.add_sensor_if_absent(Sensor::attribute("pump.flow", ValueType::Float)));
	assert_eq!(kinds(&events), [(TypeEventKind::SensorAdded, "pump.flow".to_string())]);
}

#[test]
fn remove_sensor_notifies_only_on_change() {
	let catalog = catalog();
	let (registry, events) = pump(&catalog);
	let before = registry.snapshot();

	assert!(registry.remove_sensor("pump.missing").is_none());
	assert!(events.lock().is_empty());
	assert!(Arc::ptr_eq(&before, &registry.snapshot()));

	let removed = registry.remove_sensor("pump.running").unwrap();
	assert_eq!(removed.name(), "pump.running");
	assert!(!registry.snapshot().has_sensor("pump.running"));
	assert!(before.has_sensor("pump.running"));
	assert_eq!(kinds(&events), [(TypeEventKind::SensorRemoved, "pump.running".to_string())]);

	assert!(!registry.remove_sensor_def(&removed));
	assert_eq!(events.lock().len(), 1);
}

#[test]
fn add_sensors_notifies_per_sensor() {
	let catalog = catalog();
	let (registry, events) = pump(&catalog);
	registry.add_sensors([
		Sensor::attribute("pump.flow", ValueType::Float),
		Sensor::notification("pump.alarm", ValueType::String),
	]);
	assert_eq!(events.lock().len(), 2);
	let snapshot = registry.snapshot();
	let names: Vec<_> = snapshot.sensors().keys().map(|k| &**k).collect();
	assert_eq!(names, ["pump.running", "pump.flow", "pump.alarm"]);
}

#[test]
fn snapshots_of_sibling_types_differ_only_where_declared() {
	let catalog = catalog();
	let big = DynamicType::new(&catalog, "example.BigPump", EntityId::generate(), |_: TypeEvent| {})
		.unwrap();
	let snapshot = big.snapshot();
	assert_eq!(snapshot.simple_name(), "BigPump");
	assert_eq!(
		snapshot.config_key("pump.capacity").and_then(|k| k.default().and_then(|d| d.get::<i64>())),
		Some(500)
	);
	assert!(snapshot.has_effector("start"));
	assert!(snapshot.has_sensor("pump.running"));
}

#[test]
fn concurrent_writers_see_their_own_sensor() {
	const WRITERS: usize = 16;
	let catalog = catalog();
	let (registry, events) = pump(&catalog);

	std::thread::scope(|scope| {
		for i in 0..WRITERS {
			let registry = &registry;
			scope.spawn(move || {
				let name = format!("pump.probe{i}");
				registry.add_sensor(Sensor::attribute(&name, ValueType::Int));
				assert!(registry.snapshot().has_sensor(&name));
			});
		}
		for _ in 0..4 {
			let registry = &registry;
			scope.spawn(move || {
				for _ in 0..100 {
					let snapshot = registry.snapshot();
					assert!(snapshot.has_sensor("pump.running"));
				}
			});
		}
	});

	assert_eq!(registry.snapshot().sensors().len(), WRITERS + 1);
	assert_eq!(events.lock().len(), WRITERS);
}

#[derive(Debug, Clone)]
enum Op {
	Add(u8),
	AddIfAbsent(u8),
	Remove(u8),
	Snapshot,
}

fn arb_op() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0u8..6).prop_map(Op::Add),
		(0u8..6).prop_map(Op::AddIfAbsent),
		(0u8..6).prop_map(Op::Remove),
		Just(Op::Snapshot),
	]
}

proptest! {
	/// After any sequence of mutations the snapshot mirrors the live sensor set,
	/// and versions never go backwards.
	#[test]
	fn prop_snapshot_tracks_live_sensors(ops in prop::collection::vec(arb_op(), 0..40)) {
		let catalog = catalog();
		let (registry, events) = pump(&catalog);
		let mut version = registry.snapshot().version();
		let mut expected_events = 0;

		for op in ops {
			match op {
				Op::Add(n) => {
					registry.add_sensor(Sensor::attribute(&format!("s{n}"), ValueType::Int));
					expected_events += 1;
				}
				Op::AddIfAbsent(n) => {
					if registry.add_sensor_if_absent(Sensor::attribute(&format!("s{n}"), ValueType::Int)) {
						expected_events += 1;
					}
				}
				Op::Remove(n) => {
					if registry.remove_sensor(&format!("s{n}")).is_some() {
						expected_events += 1;
					}
				}
				Op::Snapshot => {}
			}

			let snapshot = registry.snapshot();
			prop_assert!(snapshot.version() >= version);
			version = snapshot.version();
			prop_assert_eq!(snapshot.sensors(), &registry.sensors());
		}
		prop_assert_eq!(events.lock().len(), expected_events);
	}
}
