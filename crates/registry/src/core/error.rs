use super::value::ValueType;

/// Fatal declaration and construction errors.
///
/// These indicate a programming or configuration mistake in the declared type
/// hierarchy; there is no partially built catalog or registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
	/// A type or facet was declared with an empty name.
	#[error("empty {what} name")]
	EmptyName { what: &'static str },

	/// A config key default does not match the key's declared type.
	#[error("default for config key '{key}' is {got}, expected {expected}")]
	DefaultTypeMismatch {
		key: String,
		expected: ValueType,
		got: ValueType,
	},

	/// Two declarations share a type name.
	#[error("type '{0}' is declared more than once")]
	DuplicateType(String),

	/// A type names a parent that was never declared.
	#[error("type '{type_name}' extends unknown type '{parent}'")]
	UnknownParent { type_name: String, parent: String },

	/// The parent relation loops back on itself.
	#[error("type hierarchy is cyclic: {}", path.join(" -> "))]
	CyclicHierarchy { path: Vec<String> },

	/// A registry was requested for a type the catalog does not know.
	#[error("unknown entity type '{0}'")]
	UnknownType(String),
}
