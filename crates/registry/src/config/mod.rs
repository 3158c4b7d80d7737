//! Configuration values for an entity's declared config keys.
//!
//! [`ConfigStore`] holds explicit values, optionally loaded from TOML and
//! validated against a registry's config keys. [`ConfigResolver`] layers stores
//! over the declared defaults.

mod resolver;
mod store;

pub use resolver::ConfigResolver;
pub use store::ConfigStore;

use crate::core::ValueType;

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
	/// The TOML input could not be parsed.
	#[error("config parse error: {0}")]
	Parse(String),

	/// A value names a config key the entity does not declare.
	#[error("unknown config key: {key}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	UnknownKey {
		/// The unrecognized key.
		key: String,
		/// A close declared key, if any.
		suggestion: Option<String>,
	},

	/// A value does not fit the key's declared type.
	#[error("type mismatch for config key '{key}': expected {expected}, got {got}")]
	TypeMismatch {
		key: String,
		expected: ValueType,
		got: &'static str,
	},

	/// An integer given for a float key has no exact `f64` representation.
	#[error("integer {value} for config key '{key}' is not exactly representable as a float")]
	InexactFloat { key: String, value: i64 },
}
