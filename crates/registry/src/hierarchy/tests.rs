use std::sync::Arc;

use super::*;
use crate::core::{ConfigKey, FacetKind, Sensor, TypeError, ValueType};
use crate::resolve::CollisionCause;

fn decl(name: &str, parents: &[&str]) -> TypeDecl {
	parents
		.iter()
		.fold(TypeDecl::builder(name), |b, p| b.extends(p))
		.build()
		.unwrap()
}

fn diamond() -> TypeCatalog {
	// Base <- Left, Base <- Right, Left + Right <- Leaf
	TypeCatalog::builder()
		.register(decl("Leaf", &["Left", "Right"]))
		.register(decl("Left", &["Base"]))
		.register(decl("Right", &["Base"]))
		.register(decl("Base", &[]))
		.build()
		.unwrap()
}

#[test]
fn walk_visits_self_first_and_each_ancestor_once() {
	let catalog = diamond();
	let walk: Vec<_> = catalog.walk("Leaf").unwrap().collect();
	assert_eq!(walk, ["Leaf", "Left", "Base", "Right"]);
	assert!(catalog.walk("Missing").is_none());
}

#[test]
fn specificity_is_exactly_one_relation() {
	let catalog = diamond();
	assert_eq!(catalog.specificity("Base", "Leaf"), Some(Specificity::Ancestor));
	assert_eq!(catalog.specificity("Leaf", "Base"), Some(Specificity::Descendant));
	assert_eq!(catalog.specificity("Left", "Right"), Some(Specificity::Unrelated));
	assert_eq!(catalog.specificity("Left", "Left"), Some(Specificity::Same));
	assert_eq!(catalog.specificity("Left", "Nope"), None);
	assert!(catalog.is_ancestor("Base", "Right"));
	assert!(!catalog.is_ancestor("Right", "Base"));
}

#[test]
fn unknown_parent_is_fatal() {
	let err = TypeCatalog::builder()
		.register(decl("Pump", &["Machine"]))
		.build()
		.unwrap_err();
	assert_eq!(
		err,
		TypeError::UnknownParent {
			type_name: "Pump".into(),
			parent: "Machine".into(),
		}
	);
}

#[test]
fn duplicate_type_is_fatal() {
	let err = TypeCatalog::builder()
		.register(decl("Pump", &[]))
		.register(decl("Pump", &[]))
		.build()
		.unwrap_err();
	assert_eq!(err, TypeError::DuplicateType("Pump".into()));
}

#[test]
fn cycle_is_fatal() {
	let err = TypeCatalog::builder()
		.register(decl("A", &["B"]))
		.register(decl("B", &["C"]))
		.register(decl("C", &["A"]))
		.build()
		.unwrap_err();
	match err {
		TypeError::CyclicHierarchy { path } => {
			assert_eq!(path.first(), path.last());
			assert_eq!(path.len(), 4);
		}
		other => panic!("expected cycle, got {other:?}"),
	}
}

#[test]
fn same_named_sensors_on_one_type_keep_the_first() {
	let pump = TypeDecl::builder("Pump")
		.sensor(Sensor::attribute("pump.running", ValueType::Bool))
		.sensor(Sensor::attribute("pump.running", ValueType::Int))
		.build()
		.unwrap();
	assert_eq!(pump.sensors().len(), 2);

	let catalog = TypeCatalog::builder()
		.register(pump)
		.register(decl("Valve", &[]))
		.build()
		.unwrap();
	assert!(catalog.resolve("Valve").is_ok());

	let resolved = catalog.resolve("Pump").unwrap();
	assert_eq!(resolved.sensors()["pump.running"].value_type(), ValueType::Bool);
	assert_eq!(resolved.collisions().len(), 1);
	let collision = &resolved.collisions()[0];
	assert_eq!(collision.kind, FacetKind::Sensor);
	assert_eq!(collision.cause, CollisionCause::Ambiguous);
	assert_eq!((&*collision.kept, &*collision.dropped), ("Pump", "Pump"));
}

#[test]
fn builder_ignores_repeated_declaration() {
	let key = Arc::new(ConfigKey::new("pump.capacity", 100_i64));
	let decl = TypeDecl::builder("Pump")
		.config_key(Arc::clone(&key))
		.config_key(Arc::clone(&key))
		.extends("Machine")
		.extends("Machine")
		.build()
		.unwrap();
	assert_eq!(decl.config_keys().len(), 1);
	assert_eq!(decl.parents().count(), 1);
}

#[test]
fn builder_rejects_empty_names() {
	assert_eq!(
		TypeDecl::builder("").build().unwrap_err(),
		TypeError::EmptyName { what: "type" }
	);
	assert_eq!(
		TypeDecl::builder("Pump")
			.sensor(Sensor::attribute("", ValueType::Bool))
			.build()
			.unwrap_err(),
		TypeError::EmptyName { what: "facet" }
	);
}
