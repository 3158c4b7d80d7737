//! Facet discovery and conflict resolution.
//!
//! # Precedence Contract
//!
//! Discovery visits the declaring types in the catalog's walk order (the type
//! itself, then its parents depth-first) and each type's facets in declaration
//! order. When a name is met a second time:
//!
//! - **Same declaration** (one `Arc` reachable through several paths): no collision.
//! - **Effectors and sensors**: the first declaration met is kept; the clash is
//!   logged at warn level.
//! - **Config keys**: the declaration on the more specific type is kept (logged at
//!   debug level). If neither declaring type inherits from the other, or both sit
//!   on the same type, the first declaration met is kept and the clash is logged
//!   at warn level.
//!
//! A conflict recorded against a declaration that a more specific one later
//! replaces is rewritten to name the replacement, so [`ResolvedFacets::collisions`]
//! always agrees with the resolved maps.
//!
//! The outcome depends only on the declared hierarchy, never on catalog
//! registration order.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::collision::{Collision, CollisionCause};
use crate::core::{ConfigKey, Effector, Facet, Sensor, TypeError};
use crate::hierarchy::{Specificity, TypeCatalog};

/// Insertion-ordered facets keyed by name.
pub type FacetMap<T> = IndexMap<Arc<str>, Arc<T>>;

/// The facets of one declaring type after the full hierarchy walk.
///
/// Computed once per type and shared by every entity of that type.
#[derive(Debug)]
pub struct ResolvedFacets {
	pub(crate) type_name: Arc<str>,
	pub(crate) effectors: Arc<FacetMap<Effector>>,
	pub(crate) sensors: FacetMap<Sensor>,
	pub(crate) config_keys: Arc<FacetMap<ConfigKey>>,
	pub(crate) collisions: Arc<[Collision]>,
}

impl ResolvedFacets {
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	pub fn effectors(&self) -> &FacetMap<Effector> {
		&self.effectors
	}

	pub fn sensors(&self) -> &FacetMap<Sensor> {
		&self.sensors
	}

	pub fn config_keys(&self) -> &FacetMap<ConfigKey> {
		&self.config_keys
	}

	pub fn collisions(&self) -> &[Collision] {
		&self.collisions
	}
}

impl TypeCatalog {
	/// Resolves every facet visible on `type_name`, computing it on first request.
	pub fn resolve(&self, type_name: &str) -> Result<Arc<ResolvedFacets>, TypeError> {
		let (idx, node) = self.node_of(type_name)?;
		let resolved = node.resolved.get_or_init(|| Arc::new(discover(self, idx)));
		Ok(Arc::clone(resolved))
	}
}

struct Site<T> {
	facet: Arc<T>,
	declared_on: usize,
}

struct Discovery<'a, T> {
	catalog: &'a TypeCatalog,
	root: usize,
	found: IndexMap<Arc<str>, Site<T>>,
}

impl<'a, T: Facet> Discovery<'a, T> {
	fn new(catalog: &'a TypeCatalog, root: usize) -> Self {
		Self {
			catalog,
			root,
			found: IndexMap::new(),
		}
	}

	fn type_name(&self, idx: usize) -> &Arc<str> {
		&self.catalog.nodes[idx].name
	}

	/// Inserts `facet` if its name is new; returns the existing site otherwise.
	fn offer(&mut self, facet: &Arc<T>, site: usize) -> Option<usize> {
		match self.found.get(facet.name()) {
			None => {
				self.found.insert(
					Arc::from(facet.name()),
					Site {
						facet: Arc::clone(facet),
						declared_on: site,
					},
				);
				None
			}
			Some(existing) if Arc::ptr_eq(&existing.facet, facet) => None,
			Some(existing) => Some(existing.declared_on),
		}
	}

	fn first_wins(&mut self, facet: &Arc<T>, site: usize, collisions: &mut Vec<Collision>) {
		if let Some(existing) = self.offer(facet, site) {
			self.ambiguous(facet.name(), existing, site, collisions);
		}
	}

	fn most_specific_wins(&mut self, facet: &Arc<T>, site: usize, collisions: &mut Vec<Collision>) {
		let Some(existing) = self.offer(facet, site) else {
			return;
		};
		match self.catalog.specificity_idx(existing, site) {
			Specificity::Ancestor => {
				self.overridden(facet.name(), site, existing, collisions);
				self.retarget(facet.name(), existing, site, collisions);
				if let Some(slot) = self.found.get_mut(facet.name()) {
					*slot = Site {
						facet: Arc::clone(facet),
						declared_on: site,
					};
				}
			}
			Specificity::Descendant => self.overridden(facet.name(), existing, site, collisions),
			Specificity::Same | Specificity::Unrelated => {
				self.ambiguous(facet.name(), existing, site, collisions)
			}
		}
	}

	/// Points earlier conflicts on `name` at the declaration that replaced `from`.
	fn retarget(&self, name: &str, from: usize, to: usize, collisions: &mut [Collision]) {
		let (from, to) = (self.type_name(from), self.type_name(to));
		for collision in collisions.iter_mut().filter(|c| {
			c.kind == T::KIND && c.is_conflict() && &*c.name == name && c.kept == *from
		}) {
			collision.kept = Arc::clone(to);
		}
	}

	fn overridden(&self, name: &str, kept: usize, dropped: usize, collisions: &mut Vec<Collision>) {
		debug!(
			entity_type = &**self.type_name(self.root),
			kind = %T::KIND,
			name,
			kept = &**self.type_name(kept),
			dropped = &**self.type_name(dropped),
			"multiple definitions; preferring the one in the sub-type",
		);
		collisions.push(Collision {
			kind: T::KIND,
			name: Arc::from(name),
			kept: Arc::clone(self.type_name(kept)),
			dropped: Arc::clone(self.type_name(dropped)),
			cause: CollisionCause::Override,
		});
	}

	fn ambiguous(&self, name: &str, kept: usize, dropped: usize, collisions: &mut Vec<Collision>) {
		warn!(
			entity_type = &**self.type_name(self.root),
			kind = %T::KIND,
			name,
			kept = &**self.type_name(kept),
			dropped = &**self.type_name(dropped),
			"multiple definitions; preferring the first declared",
		);
		collisions.push(Collision {
			kind: T::KIND,
			name: Arc::from(name),
			kept: Arc::clone(self.type_name(kept)),
			dropped: Arc::clone(self.type_name(dropped)),
			cause: CollisionCause::Ambiguous,
		});
	}

	fn finish(self) -> FacetMap<T> {
		self.found
			.into_iter()
			.map(|(name, site)| (name, site.facet))
			.collect()
	}
}

fn discover(catalog: &TypeCatalog, root: usize) -> ResolvedFacets {
	let mut collisions = Vec::new();
	let mut effectors = Discovery::<Effector>::new(catalog, root);
	let mut sensors = Discovery::<Sensor>::new(catalog, root);
	let mut config_keys = Discovery::<ConfigKey>::new(catalog, root);

	for &site in &catalog.nodes[root].walk {
		let decl = &catalog.nodes[site].decl;
		for effector in &decl.effectors {
			effectors.first_wins(effector, site, &mut collisions);
		}
		for sensor in &decl.sensors {
			sensors.first_wins(sensor, site, &mut collisions);
		}
		for key in &decl.config_keys {
			config_keys.most_specific_wins(key, site, &mut collisions);
		}
	}

	ResolvedFacets {
		type_name: Arc::clone(&catalog.nodes[root].name),
		effectors: Arc::new(effectors.finish()),
		sensors: sensors.finish(),
		config_keys: Arc::new(config_keys.finish()),
		collisions: Arc::from(collisions),
	}
}
