use std::sync::Arc;

use indexmap::IndexMap;

use super::ConfigError;
use crate::core::{ConfigKey, ConfigValue, Facet, ValueType};
use crate::dynamic::DynamicType;

/// Explicit configuration values keyed by config-key name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
	values: IndexMap<Arc<str>, ConfigValue>,
}

impl ConfigStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a TOML table of `name = value` pairs, validating each against the
	/// config keys of `registry`.
	///
	/// Integers are accepted for float keys when the float holds them exactly.
	/// Arrays, tables and datetimes are rejected.
	pub fn from_toml(input: &str, registry: &DynamicType) -> Result<Self, ConfigError> {
		let table: toml::Table =
			toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
		let mut store = Self::new();
		for (name, value) in table {
			let key = registry
				.config_key(&name)
				.ok_or_else(|| ConfigError::UnknownKey {
					suggestion: suggest_key(&name, registry),
					key: name.clone(),
				})?;
			let value = from_toml_value(&key, value)?;
			store.values.insert(Arc::from(name), value);
		}
		Ok(store)
	}

	/// Stores `value` for `key` after checking it against the key's type.
	///
	/// Returns the value previously stored under that name.
	pub fn set(
		&mut self,
		key: &ConfigKey,
		value: impl Into<ConfigValue>,
	) -> Result<Option<ConfigValue>, ConfigError> {
		let value = value.into();
		if !value.matches_type(key.value_type()) {
			return Err(ConfigError::TypeMismatch {
				key: key.name().to_string(),
				expected: key.value_type(),
				got: value.type_name(),
			});
		}
		Ok(self.values.insert(Arc::from(key.name()), value))
	}

	/// Stores `value` under `name` without any type check.
	pub fn insert(&mut self, name: &str, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
		self.values.insert(Arc::from(name), value.into())
	}

	pub fn get(&self, name: &str) -> Option<&ConfigValue> {
		self.values.get(name)
	}

	pub fn remove(&mut self, name: &str) -> Option<ConfigValue> {
		self.values.shift_remove(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> + '_ {
		self.values.iter().map(|(k, v)| (&**k, v))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

fn from_toml_value(key: &ConfigKey, value: toml::Value) -> Result<ConfigValue, ConfigError> {
	let value = match value {
		toml::Value::Boolean(v) => ConfigValue::Bool(v),
		toml::Value::Integer(v) if key.value_type() == ValueType::Float => {
			let float = v as f64;
			// i128 so that i64::MAX, which rounds up to 2^63, does not saturate back.
			if float as i128 != i128::from(v) {
				return Err(ConfigError::InexactFloat {
					key: key.name().to_string(),
					value: v,
				});
			}
			ConfigValue::Float(float)
		}
		toml::Value::Integer(v) => ConfigValue::Int(v),
		toml::Value::Float(v) => ConfigValue::Float(v),
		toml::Value::String(v) => ConfigValue::String(v),
		other => {
			return Err(ConfigError::TypeMismatch {
				key: key.name().to_string(),
				expected: key.value_type(),
				got: other.type_str(),
			});
		}
	};
	if !value.matches_type(key.value_type()) {
		return Err(ConfigError::TypeMismatch {
			key: key.name().to_string(),
			expected: key.value_type(),
			got: value.type_name(),
		});
	}
	Ok(value)
}

fn suggest_key(name: &str, registry: &DynamicType) -> Option<String> {
	registry
		.config_keys()
		.keys()
		.min_by_key(|k| strsim::levenshtein(name, k))
		.filter(|k| strsim::levenshtein(name, k) <= 3)
		.map(|k| k.to_string())
}
