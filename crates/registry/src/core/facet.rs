//! Facet declarations: effectors, sensors and config keys.
//!
//! Facets are immutable once built and are shared through [`Arc`]. Two facets are
//! the *same declaration* when they are the same allocation ([`Arc::ptr_eq`]); two
//! distinct allocations sharing a name are different declarations even if every
//! field is equal.

use std::sync::Arc;

use serde::Serialize;

use super::error::TypeError;
use super::value::{ConfigValue, FromConfigValue, ValueType};

/// The three facet kinds a type can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
	Effector,
	Sensor,
	ConfigKey,
}

impl core::fmt::Display for FacetKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Effector => write!(f, "effector"),
			Self::Sensor => write!(f, "sensor"),
			Self::ConfigKey => write!(f, "config key"),
		}
	}
}

/// Common access to a named facet.
pub trait Facet: Send + Sync + 'static {
	/// Which kind of facet this is.
	const KIND: FacetKind;

	/// The facet's name, unique per kind within a resolved type.
	fn name(&self) -> &str;
}

/// A parameter accepted by an [`Effector`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
	name: Box<str>,
	value_type: ValueType,
	description: Box<str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	default: Option<ConfigValue>,
}

impl Parameter {
	pub fn new(name: &str, value_type: ValueType) -> Self {
		Self {
			name: name.into(),
			value_type,
			description: "".into(),
			default: None,
		}
	}

	pub fn with_description(mut self, description: &str) -> Self {
		self.description = description.into();
		self
	}

	/// Sets a default value, checked against the parameter's type.
	pub fn with_default(mut self, default: impl Into<ConfigValue>) -> Result<Self, TypeError> {
		let default = default.into();
		check_default(&self.name, self.value_type, &default)?;
		self.default = Some(default);
		Ok(self)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn value_type(&self) -> ValueType {
		self.value_type
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn default(&self) -> Option<&ConfigValue> {
		self.default.as_ref()
	}
}

/// A named, invocable operation declared on an entity type.
///
/// Only the signature is described here; invocation lives with the entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Effector {
	name: Box<str>,
	description: Box<str>,
	parameters: Vec<Parameter>,
	return_type: ValueType,
}

impl Effector {
	pub fn new(name: &str, return_type: ValueType) -> Self {
		Self {
			name: name.into(),
			description: "".into(),
			parameters: Vec::new(),
			return_type,
		}
	}

	pub fn with_description(mut self, description: &str) -> Self {
		self.description = description.into();
		self
	}

	/// Appends a parameter to the effector's signature.
	pub fn parameter(mut self, parameter: Parameter) -> Self {
		self.parameters.push(parameter);
		self
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn parameters(&self) -> &[Parameter] {
		&self.parameters
	}

	pub fn return_type(&self) -> ValueType {
		self.return_type
	}
}

impl Facet for Effector {
	const KIND: FacetKind = FacetKind::Effector;

	fn name(&self) -> &str {
		&self.name
	}
}

/// Semantic tag distinguishing the two sensor flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
	/// Holds a current value that can be read back.
	Attribute,
	/// Publishes transient notifications; nothing is retained.
	Notification,
}

/// A named, observable state channel declared on an entity type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sensor {
	name: Box<str>,
	description: Box<str>,
	value_type: ValueType,
	kind: SensorKind,
}

impl Sensor {
	/// Declares an attribute sensor.
	pub fn attribute(name: &str, value_type: ValueType) -> Self {
		Self::new(name, value_type, SensorKind::Attribute)
	}

	/// Declares a notification sensor.
	pub fn notification(name: &str, value_type: ValueType) -> Self {
		Self::new(name, value_type, SensorKind::Notification)
	}

	fn new(name: &str, value_type: ValueType, kind: SensorKind) -> Self {
		Self {
			name: name.into(),
			description: "".into(),
			value_type,
			kind,
		}
	}

	pub fn with_description(mut self, description: &str) -> Self {
		self.description = description.into();
		self
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn value_type(&self) -> ValueType {
		self.value_type
	}

	pub fn kind(&self) -> SensorKind {
		self.kind
	}
}

impl Facet for Sensor {
	const KIND: FacetKind = FacetKind::Sensor;

	fn name(&self) -> &str {
		&self.name
	}
}

/// A named, typed configuration slot with an optional default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigKey {
	name: Box<str>,
	description: Box<str>,
	value_type: ValueType,
	#[serde(skip_serializing_if = "Option::is_none")]
	default: Option<ConfigValue>,
	reconfigurable: bool,
}

impl ConfigKey {
	/// Declares a config key whose type follows the Rust type of its default.
	pub fn new<T: FromConfigValue>(name: &str, default: T) -> Self {
		Self {
			name: name.into(),
			description: "".into(),
			value_type: T::value_type(),
			default: Some(default.into()),
			reconfigurable: false,
		}
	}

	/// Declares a config key with no default value.
	pub fn without_default(name: &str, value_type: ValueType) -> Self {
		Self {
			name: name.into(),
			description: "".into(),
			value_type,
			default: None,
			reconfigurable: false,
		}
	}

	/// Declares a config key from a dynamically typed default.
	///
	/// Fails if `default` does not fit `value_type`.
	pub fn untyped(
		name: &str,
		value_type: ValueType,
		default: Option<ConfigValue>,
	) -> Result<Self, TypeError> {
		if let Some(default) = &default {
			check_default(name, value_type, default)?;
		}
		Ok(Self {
			name: name.into(),
			description: "".into(),
			value_type,
			default,
			reconfigurable: false,
		})
	}

	pub fn with_description(mut self, description: &str) -> Self {
		self.description = description.into();
		self
	}

	/// Marks the key as changeable on a running entity.
	pub fn reconfigurable(mut self) -> Self {
		self.reconfigurable = true;
		self
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn value_type(&self) -> ValueType {
		self.value_type
	}

	pub fn default(&self) -> Option<&ConfigValue> {
		self.default.as_ref()
	}

	pub fn is_reconfigurable(&self) -> bool {
		self.reconfigurable
	}
}

impl Facet for ConfigKey {
	const KIND: FacetKind = FacetKind::ConfigKey;

	fn name(&self) -> &str {
		&self.name
	}
}

/// A declaration that carries a config key without being one.
pub trait HasConfigKey {
	fn config_key(&self) -> &Arc<ConfigKey>;
}

impl HasConfigKey for Arc<ConfigKey> {
	fn config_key(&self) -> &Arc<ConfigKey> {
		self
	}
}

/// An attribute sensor whose initial value is supplied through a config key of
/// the same name.
#[derive(Debug, Clone)]
pub struct AttributeSensorAndConfigKey {
	sensor: Arc<Sensor>,
	config_key: Arc<ConfigKey>,
}

impl AttributeSensorAndConfigKey {
	/// Declares the pair with a typed default.
	pub fn new<T: FromConfigValue>(name: &str, default: T) -> Self {
		let config_key = ConfigKey::new(name, default);
		let sensor = Sensor::attribute(name, config_key.value_type());
		Self {
			sensor: Arc::new(sensor),
			config_key: Arc::new(config_key),
		}
	}

	/// Declares the pair with no default.
	pub fn without_default(name: &str, value_type: ValueType) -> Self {
		Self {
			sensor: Arc::new(Sensor::attribute(name, value_type)),
			config_key: Arc::new(ConfigKey::without_default(name, value_type)),
		}
	}

	pub fn sensor(&self) -> &Arc<Sensor> {
		&self.sensor
	}
}

impl HasConfigKey for AttributeSensorAndConfigKey {
	fn config_key(&self) -> &Arc<ConfigKey> {
		&self.config_key
	}
}

fn check_default(name: &str, value_type: ValueType, default: &ConfigValue) -> Result<(), TypeError> {
	if default.matches_type(value_type) {
		Ok(())
	} else {
		Err(TypeError::DefaultTypeMismatch {
			key: name.to_string(),
			expected: value_type,
			got: default.value_type(),
		})
	}
}
