use std::sync::Arc;

use crate::core::{
	AttributeSensorAndConfigKey, ConfigKey, Effector, Facet, HasConfigKey, Sensor, TypeError,
};

/// Facets declared directly on one entity type, plus the names of its parents.
///
/// A declaration is immutable once built. It only describes the type itself;
/// inherited facets are found by walking the parents through a
/// [`TypeCatalog`](super::TypeCatalog).
#[derive(Debug, Clone)]
pub struct TypeDecl {
	pub(crate) name: Box<str>,
	pub(crate) parents: Vec<Box<str>>,
	pub(crate) effectors: Vec<Arc<Effector>>,
	pub(crate) sensors: Vec<Arc<Sensor>>,
	pub(crate) config_keys: Vec<Arc<ConfigKey>>,
}

impl TypeDecl {
	/// Starts a declaration for the type called `name`.
	pub fn builder(name: &str) -> TypeBuilder {
		TypeBuilder {
			decl: TypeDecl {
				name: name.into(),
				parents: Vec::new(),
				effectors: Vec::new(),
				sensors: Vec::new(),
				config_keys: Vec::new(),
			},
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Direct parents, in declaration order.
	pub fn parents(&self) -> impl Iterator<Item = &str> + '_ {
		self.parents.iter().map(AsRef::as_ref)
	}

	pub fn effectors(&self) -> &[Arc<Effector>] {
		&self.effectors
	}

	pub fn sensors(&self) -> &[Arc<Sensor>] {
		&self.sensors
	}

	pub fn config_keys(&self) -> &[Arc<ConfigKey>] {
		&self.config_keys
	}
}

/// Builder for [`TypeDecl`].
#[derive(Debug)]
pub struct TypeBuilder {
	decl: TypeDecl,
}

impl TypeBuilder {
	/// Adds a direct parent. Parents are walked in the order they are added.
	pub fn extends(mut self, parent: &str) -> Self {
		if !self.decl.parents.iter().any(|p| &**p == parent) {
			self.decl.parents.push(parent.into());
		}
		self
	}

	pub fn effector(mut self, effector: impl Into<Arc<Effector>>) -> Self {
		push_unique(&mut self.decl.effectors, effector.into());
		self
	}

	pub fn sensor(mut self, sensor: impl Into<Arc<Sensor>>) -> Self {
		push_unique(&mut self.decl.sensors, sensor.into());
		self
	}

	pub fn config_key(mut self, key: impl Into<Arc<ConfigKey>>) -> Self {
		push_unique(&mut self.decl.config_keys, key.into());
		self
	}

	/// Declares the config key carried by `holder`.
	pub fn has_config_key(mut self, holder: &impl HasConfigKey) -> Self {
		push_unique(&mut self.decl.config_keys, Arc::clone(holder.config_key()));
		self
	}

	/// Declares both the sensor and the config key of `pair`.
	pub fn sensor_and_config_key(self, pair: &AttributeSensorAndConfigKey) -> Self {
		self.sensor(Arc::clone(pair.sensor())).has_config_key(pair)
	}

	/// Validates and returns the declaration.
	pub fn build(self) -> Result<TypeDecl, TypeError> {
		let decl = self.decl;
		if decl.name.is_empty() {
			return Err(TypeError::EmptyName { what: "type" });
		}
		if decl.parents.iter().any(|p| p.is_empty()) {
			return Err(TypeError::EmptyName { what: "parent type" });
		}
		check_facets(&decl.effectors)?;
		check_facets(&decl.sensors)?;
		check_facets(&decl.config_keys)?;
		Ok(decl)
	}
}

/// Re-adding the same allocation is a no-op.
fn push_unique<T>(facets: &mut Vec<Arc<T>>, facet: Arc<T>) {
	if !facets.iter().any(|f| Arc::ptr_eq(f, &facet)) {
		facets.push(facet);
	}
}

/// Same-named facets on one type are left to discovery, which keeps the first.
fn check_facets<T: Facet>(facets: &[Arc<T>]) -> Result<(), TypeError> {
	if facets.iter().any(|f| f.name().is_empty()) {
		return Err(TypeError::EmptyName { what: "facet" });
	}
	Ok(())
}
