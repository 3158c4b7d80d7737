use serde::Serialize;

/// The declared value type of a facet (sensor value, config value, effector parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	/// Boolean type.
	Bool,
	/// Signed integer type.
	Int,
	/// Floating point type.
	Float,
	/// String type.
	String,
	/// No value (effectors returning nothing, notification-only sensors).
	Void,
	/// Any value; not checked.
	Any,
}

impl ValueType {
	/// Returns the lowercase name of this type.
	pub const fn name(self) -> &'static str {
		match self {
			ValueType::Bool => "bool",
			ValueType::Int => "int",
			ValueType::Float => "float",
			ValueType::String => "string",
			ValueType::Void => "void",
			ValueType::Any => "any",
		}
	}
}

impl core::fmt::Display for ValueType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.name())
	}
}

/// A configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
}

impl ConfigValue {
	/// Extracts the value as `T`, or `None` if it holds another type.
	pub fn get<T: FromConfigValue>(&self) -> Option<T> {
		T::from_config(self)
	}

	/// Borrows the string without cloning it.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			ConfigValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the [`ValueType`] of this value.
	pub fn value_type(&self) -> ValueType {
		match self {
			ConfigValue::Bool(_) => ValueType::Bool,
			ConfigValue::Int(_) => ValueType::Int,
			ConfigValue::Float(_) => ValueType::Float,
			ConfigValue::String(_) => ValueType::String,
		}
	}

	/// Returns true if this value may be stored under the given type.
	///
	/// [`ValueType::Any`] accepts everything; [`ValueType::Void`] accepts nothing.
	pub fn matches_type(&self, ty: ValueType) -> bool {
		ty == ValueType::Any || self.value_type() == ty
	}

	pub fn type_name(&self) -> &'static str {
		self.value_type().name()
	}
}

impl From<&str> for ConfigValue {
	fn from(v: &str) -> Self {
		ConfigValue::String(v.to_string())
	}
}

mod sealed {
	pub trait Sealed {}
}

/// Scalar Rust types that map one-to-one onto a [`ValueType`].
///
/// Implemented for `bool`, `i64`, `f64` and `String` only.
pub trait FromConfigValue: sealed::Sealed + Into<ConfigValue> + Sized {
	fn from_config(value: &ConfigValue) -> Option<Self>;

	fn value_type() -> ValueType;
}

/// Ties a Rust scalar to its [`ConfigValue`] variant in both directions.
macro_rules! scalar {
	($($ty:ty => $variant:ident),* $(,)?) => {$(
		impl sealed::Sealed for $ty {}

		impl From<$ty> for ConfigValue {
			fn from(v: $ty) -> Self {
				ConfigValue::$variant(v)
			}
		}

		impl FromConfigValue for $ty {
			fn from_config(value: &ConfigValue) -> Option<Self> {
				match value {
					ConfigValue::$variant(v) => Some(v.to_owned()),
					_ => None,
				}
			}

			fn value_type() -> ValueType {
				ValueType::$variant
			}
		}
	)*};
}

scalar! {
	bool => Bool,
	i64 => Int,
	f64 => Float,
	String => String,
}
