use super::decl::TypeDecl;
use crate::core::TypeError;

/// Process-wide registration of one entity type, collected by [`TypeCatalog::global`](super::TypeCatalog::global).
///
/// Submitted by [`entity_type!`](crate::entity_type); the declaration is built lazily
/// when the global catalog is first requested.
pub struct TypeReg {
	declare: fn() -> Result<TypeDecl, TypeError>,
}

impl TypeReg {
	pub const fn new(declare: fn() -> Result<TypeDecl, TypeError>) -> Self {
		Self { declare }
	}

	pub fn declare(&self) -> Result<TypeDecl, TypeError> {
		(self.declare)()
	}
}

inventory::collect!(TypeReg);
