use std::sync::Arc;

use serde::Serialize;

/// Identifier of an entity instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(Arc<str>);

impl EntityId {
	/// Generates a random identifier.
	pub fn generate() -> Self {
		Self(Arc::from(uuid::Uuid::new_v4().simple().to_string()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for EntityId {
	fn from(id: &str) -> Self {
		Self(Arc::from(id))
	}
}

impl From<String> for EntityId {
	fn from(id: String) -> Self {
		Self(Arc::from(id))
	}
}

impl core::fmt::Display for EntityId {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(&self.0)
	}
}

/// Identity of the entity owning a [`DynamicType`](super::DynamicType).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityIdentity {
	id: EntityId,
	type_name: Arc<str>,
}

impl EntityIdentity {
	pub(crate) fn new(id: EntityId, type_name: Arc<str>) -> Self {
		Self { id, type_name }
	}

	pub fn id(&self) -> &EntityId {
		&self.id
	}

	/// The entity's declaring type.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	pub(crate) fn type_name_arc(&self) -> &Arc<str> {
		&self.type_name
	}
}
